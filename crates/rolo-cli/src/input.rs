//! Input sanitization and phone validation
//!
//! The directory core only enforces its field policy; everything about what
//! a "reasonable" name or phone number looks like lives here.

use once_cell::sync::Lazy;
use regex::Regex;

/// Mainland mobile number: 11 digits, prefix 13/14/15/17/18/19
static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^1[345789][0-9]{9}$").expect("phone pattern is a valid regex"));

/// Strip control characters and the record separator, then trim
pub(crate) fn sanitize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_control() && *c != '|')
        .collect::<String>()
        .trim()
        .to_owned()
}

/// Keep what could be part of a typed phone number, minus spacing and dashes
pub(crate) fn sanitize_phone(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !c.is_control() && !matches!(c, '|' | '-'))
        .collect()
}

/// Check an already sanitized phone number
pub(crate) fn validate_phone(phone: &str) -> bool {
    PHONE.is_match(phone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_phones() {
        for phone in ["13800138000", "14700000000", "15912345678", "17012345678", "18800000000", "19999999999"] {
            assert!(validate_phone(phone), "{phone}");
        }
    }

    #[test]
    fn invalid_phones() {
        for phone in ["", "1380013800", "138001380000", "12800138000", "16800138000", "2380013800a", "1380013800x"] {
            assert!(!validate_phone(phone), "{phone}");
        }
    }

    #[test]
    fn sanitize_drops_separator_and_controls() {
        assert_eq!(sanitize("  Al|ice\t "), "Alice");
        assert_eq!(sanitize("Mary Ann"), "Mary Ann");
        assert_eq!(sanitize("\r\n"), "");
    }

    #[test]
    fn sanitize_phone_removes_spacing() {
        assert_eq!(sanitize_phone(" 138-0013 8000\n"), "13800138000");
        assert!(validate_phone(&sanitize_phone("138 0013 8000")));
    }
}
