//! Stock password checkers
//!
//! Each checker follows the registry protocol: it receives the password and
//! the `all` flag, and returns the weakness reasons it found. With `all` set to
//! `false` a checker stops at its first reason.

mod length;
mod pattern;
mod variety;

pub use length::{DEFAULT_MIN_LENGTH, length_checker};
pub use pattern::pattern_analysis;
pub use variety::character_variety;

use crate::registry::Registry;

/// Registers `length`, `variety` and `pattern` on the registry.
///
/// Checkers already registered under those names are kept.
pub fn register_stock_checkers(registry: &Registry) {
    registry.register_checker("length", length_checker(DEFAULT_MIN_LENGTH));
    registry.register_checker("variety", character_variety);
    registry.register_checker("pattern", pattern_analysis);
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn test_register_stock_checkers() {
        let registry = Registry::new();
        register_stock_checkers(&registry);
        assert_eq!(registry.checker_names(), ["length", "variety", "pattern"]);

        let pwd = SecretString::new("aaa".to_string().into());
        let report = registry.weakness(&pwd, &[], true).unwrap().unwrap();
        assert_eq!(report.get("length"), Some(&["too_short".to_string()][..]));
        assert_eq!(
            report.get("pattern"),
            Some(&["repetitive_pattern".to_string()][..])
        );
        assert_eq!(
            report.get("variety"),
            Some(
                &[
                    "digit_needed".to_string(),
                    "uppercase_needed".to_string(),
                    "special_needed".to_string()
                ][..]
            )
        );
    }

    #[test]
    fn test_register_stock_checkers_keeps_existing() {
        let registry = Registry::new();
        registry.register_checker("length", |_: &SecretString, _| false);
        register_stock_checkers(&registry);

        let pwd = SecretString::new("Ab1!".to_string().into());
        let result = registry.weakness(&pwd, &["length"], true).unwrap();
        assert_eq!(result, None);
    }
}
