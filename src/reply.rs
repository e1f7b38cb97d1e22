//! Conversion formatting and the one-shot message router
//!
//! Every inbound text message is handled independently: either it is one of
//! the six fixed rich-menu phrases, or it goes through the free-text parser.
//! All failure modes resolve to a fixed reply string; nothing here returns
//! an error to the webhook layer.

use crate::currency;
use crate::parser::{self, ParseResult};
use crate::rates::{round2, RateClient, RateTable};
use tracing::info;

const LOCAL_CURRENCY_REPLY: &str = "😅 不好意思，本服務僅提供外幣換算台幣\n\
    請直接輸入外幣金額，例如：\n\
    ✅ 100美金\n\
    ✅ JPY 5000\n\
    ✅ EUR 50";

const HELP_REPLY: &str = "🤔 看不懂這個格式呢！\n\
    💡 請這樣輸入：\n\
    ✅ 100美金\n\
    ✅ USD 100\n\
    ✅ JPY 5000\n\
    ❌ 不要輸入台幣喔！";

const UNKNOWN_MENU_REPLY: &str = "無法識別的貨幣類型";

const CONVERT_ERROR_REPLY: &str = "匯率換算發生錯誤，請稍後再試";

/// Convert against the given rate table.
///
/// With no amount (menu-button path) the reply shows both directions; with
/// an amount (free-text path) it shows foreign → TWD only. `None` means the
/// table has no usable rate for this currency; a zero or negative rate would
/// divide into inf, so it counts as missing.
pub fn convert(code: &str, amount: Option<f64>, table: &RateTable) -> Option<String> {
    let rate = table.rate(code).filter(|r| *r > 0.0)?;
    let display_name = currency::display_name_or(code, code);

    let reply = match amount {
        None => {
            let twd_to_foreign = round2(rate);
            let foreign_to_twd = round2(1.0 / rate);
            format!(
                "📌 匯率換算結果：\n\
                 1 台幣 = {} {}\n\
                 1 {} = {} 台幣\n\n\
                 ！！此匯率僅供參考使用！！\n\
                 ！！實際匯率請以銀行為準！！\n\n\
                 💡 小提示：您可以直接輸入想要換算的金額，例如：\n\
                 「100{}」或「{} 100」",
                twd_to_foreign, display_name, display_name, foreign_to_twd, display_name, code
            )
        }
        Some(amount) => {
            let twd_amount = round2(amount / rate);
            format!(
                "💱 匯率換算結果：\n\
                 {} {} = {} 台幣\n\n\
                 ！！此匯率僅供參考使用！！\n\
                 ！！實際匯率請以銀行為準！！",
                amount, display_name, twd_amount
            )
        }
    };

    Some(reply)
}

fn unavailable_reply(code: &str) -> String {
    format!("無法取得 {} 的匯率資訊", currency::display_name_or(code, code))
}

/// Build the reply for one inbound text message.
pub async fn build_reply(text: &str, rates: &RateClient) -> String {
    // Rich-menu buttons send a fixed "<名稱>匯率" phrase
    if text.ends_with("匯率") {
        let Some(code) = currency::MENU_COMMANDS.get(text).copied() else {
            return UNKNOWN_MENU_REPLY.to_string();
        };

        return match rates.fetch().await {
            Ok(table) => convert(code, None, &table).unwrap_or_else(|| unavailable_reply(code)),
            Err(_) => unavailable_reply(code),
        };
    }

    match parser::parse(text) {
        ParseResult::LocalCurrency => LOCAL_CURRENCY_REPLY.to_string(),
        ParseResult::Unrecognized => HELP_REPLY.to_string(),
        ParseResult::Amount { amount, code, .. } => {
            info!("Converting {} {} to TWD", amount, code);

            match rates.fetch().await {
                Ok(table) => {
                    convert(code, Some(amount), &table).unwrap_or_else(|| unavailable_reply(code))
                }
                Err(_) => CONVERT_ERROR_REPLY.to_string(),
            }
        }
    }
}
