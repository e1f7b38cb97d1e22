//! Amount + currency parser
//!
//! Extracts an amount and a currency token from free-form user input.
//! Accepted surface forms:
//! - number then token: "100美金", "100 USD"
//! - token then number: "美金100", "USD 100"
//!
//! A mention of the local currency (台幣/臺幣) short-circuits everything,
//! and a matched token that is not a known alias makes the whole parse
//! unrecognized rather than a partial success.

use crate::currency;
use lazy_static::lazy_static;
use regex::Regex;

#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult {
    /// The user mentioned TWD itself; conversion does not apply.
    LocalCurrency,
    /// A positive amount of a supported foreign currency.
    Amount {
        amount: f64,
        code: &'static str,
        display_name: String,
    },
    /// Nothing usable in the input.
    Unrecognized,
}

lazy_static! {
    // Leftmost-first alternation: number-then-token is preferred when both
    // forms start at the same offset, otherwise the earlier match wins.
    static ref AMOUNT_CURRENCY: Regex =
        Regex::new(r"(\d+\.?\d*)\s*([a-zA-Z一-龥]+)|([a-zA-Z一-龥]+)\s*(\d+\.?\d*)")
            .expect("amount/currency pattern is valid");
}

/// Parse user text into an amount + currency pair.
///
/// Pure function of the input and the static currency tables.
pub fn parse(text: &str) -> ParseResult {
    if text.contains("台幣") || text.contains("臺幣") {
        return ParseResult::LocalCurrency;
    }

    let Some(caps) = AMOUNT_CURRENCY.captures(text) else {
        return ParseResult::Unrecognized;
    };

    let (raw_amount, token) = match (caps.get(1), caps.get(2)) {
        (Some(amount), Some(token)) => (amount.as_str(), token.as_str()),
        // The other alternative matched: token before number.
        _ => match (caps.get(3), caps.get(4)) {
            (Some(token), Some(amount)) => (amount.as_str(), token.as_str()),
            _ => return ParseResult::Unrecognized,
        },
    };

    let Ok(amount) = raw_amount.parse::<f64>() else {
        return ParseResult::Unrecognized;
    };

    match currency::resolve_alias(token) {
        Some(code) => ParseResult::Amount {
            amount,
            code,
            display_name: currency::display_name_or(code, token).to_string(),
        },
        None => ParseResult::Unrecognized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_then_name() {
        assert_eq!(
            parse("100美金"),
            ParseResult::Amount {
                amount: 100.0,
                code: "USD",
                display_name: "美金".to_string(),
            }
        );
    }

    #[test]
    fn test_code_then_number() {
        assert_eq!(
            parse("USD 100"),
            ParseResult::Amount {
                amount: 100.0,
                code: "USD",
                display_name: "美金".to_string(),
            }
        );
    }

    #[test]
    fn test_local_currency_short_circuits() {
        assert_eq!(parse("台幣"), ParseResult::LocalCurrency);
        assert_eq!(parse("臺幣"), ParseResult::LocalCurrency);
        // Short-circuits even when a parseable foreign amount is present
        assert_eq!(parse("100台幣換美金"), ParseResult::LocalCurrency);
    }

    #[test]
    fn test_plain_chatter_is_unrecognized() {
        let cases = vec!["你好", "匯率", "hello", ""];

        for c in cases {
            assert_eq!(parse(c), ParseResult::Unrecognized, "input: {:?}", c);
        }
    }

    #[test]
    fn test_unknown_token_is_not_partial_success() {
        // 英鎊 matches the pattern but is not in the alias table
        assert_eq!(parse("100英鎊"), ParseResult::Unrecognized);
        assert_eq!(parse("GBP 100"), ParseResult::Unrecognized);
    }

    #[test]
    fn test_fractional_amounts() {
        assert_eq!(
            parse("99.5日幣"),
            ParseResult::Amount {
                amount: 99.5,
                code: "JPY",
                display_name: "日幣".to_string(),
            }
        );
        assert_eq!(
            parse("EUR 0.25"),
            ParseResult::Amount {
                amount: 0.25,
                code: "EUR",
                display_name: "歐元".to_string(),
            }
        );
    }

    #[test]
    fn test_whitespace_between_number_and_token() {
        assert_eq!(
            parse("5000 JPY"),
            ParseResult::Amount {
                amount: 5000.0,
                code: "JPY",
                display_name: "日幣".to_string(),
            }
        );
    }

    #[test]
    fn test_both_orderings_agree_for_every_alias() {
        for (alias, code) in crate::currency::CURRENCY_ALIASES.iter() {
            for n in ["1", "250", "99.5"] {
                let forward = parse(&format!("{}{}", n, alias));
                let reversed = parse(&format!("{}{}", alias, n));

                match (forward, reversed) {
                    (
                        ParseResult::Amount { code: c1, amount: a1, .. },
                        ParseResult::Amount { code: c2, amount: a2, .. },
                    ) => {
                        assert_eq!(c1, *code, "alias {} forward", alias);
                        assert_eq!(c2, *code, "alias {} reversed", alias);
                        assert_eq!(a1, a2);
                    }
                    other => panic!("alias {} did not parse both ways: {:?}", alias, other),
                }
            }
        }
    }

    #[test]
    fn test_leftmost_match_wins() {
        // Two candidate matches; the earlier one decides the outcome.
        assert_eq!(
            parse("美金100 日幣200"),
            ParseResult::Amount {
                amount: 100.0,
                code: "USD",
                display_name: "美金".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(
                parse("100美金"),
                ParseResult::Amount {
                    amount: 100.0,
                    code: "USD",
                    display_name: "美金".to_string(),
                }
            );
        }
    }
}
