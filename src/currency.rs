//! Supported currencies and their lookup tables
//!
//! Three immutable process-lifetime maps:
//! - alias → canonical 3-letter code (many-to-one; Chinese names and codes)
//! - canonical code → display name
//! - rich-menu button text → canonical code

use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    /// Free-text tokens users may type, mapped to canonical codes.
    pub static ref CURRENCY_ALIASES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        // Chinese currency names
        m.insert("美金", "USD");
        m.insert("美元", "USD");
        m.insert("日幣", "JPY");
        m.insert("日元", "JPY");
        m.insert("韓幣", "KRW");
        m.insert("韓元", "KRW");
        m.insert("人民幣", "CNY");
        m.insert("泰銖", "THB");
        m.insert("歐元", "EUR");
        // ISO-style codes map to themselves
        m.insert("USD", "USD");
        m.insert("JPY", "JPY");
        m.insert("KRW", "KRW");
        m.insert("CNY", "CNY");
        m.insert("THB", "THB");
        m.insert("EUR", "EUR");
        m
    };

    /// Canonical code → human-readable label used in replies.
    pub static ref DISPLAY_NAMES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("USD", "美金");
        m.insert("JPY", "日幣");
        m.insert("KRW", "韓幣");
        m.insert("CNY", "人民幣");
        m.insert("THB", "泰銖");
        m.insert("EUR", "歐元");
        m
    };

    /// Fixed rich-menu button texts → canonical code.
    pub static ref MENU_COMMANDS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("人民幣匯率", "CNY");
        m.insert("美金匯率", "USD");
        m.insert("日幣匯率", "JPY");
        m.insert("韓幣匯率", "KRW");
        m.insert("泰銖匯率", "THB");
        m.insert("歐元匯率", "EUR");
        m
    };
}

/// Resolve an alias to its canonical code, if the currency is supported.
pub fn resolve_alias(token: &str) -> Option<&'static str> {
    CURRENCY_ALIASES.get(token).copied()
}

/// Display name for a canonical code, falling back to the given token.
pub fn display_name_or<'a>(code: &str, fallback: &'a str) -> &'a str {
    DISPLAY_NAMES.get(code).copied().unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_resolve_to_known_codes() {
        for (alias, code) in CURRENCY_ALIASES.iter() {
            assert_eq!(resolve_alias(alias), Some(*code));
            assert!(
                DISPLAY_NAMES.contains_key(code),
                "alias {} maps to code {} without a display name",
                alias,
                code
            );
        }
    }

    #[test]
    fn test_menu_commands_cover_all_currencies() {
        assert_eq!(MENU_COMMANDS.len(), 6);
        for code in MENU_COMMANDS.values() {
            assert!(DISPLAY_NAMES.contains_key(code));
        }
    }

    #[test]
    fn test_display_name_fallback() {
        assert_eq!(display_name_or("USD", "美金"), "美金");
        assert_eq!(display_name_or("GBP", "英鎊"), "英鎊");
    }
}
