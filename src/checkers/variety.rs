//! Character variety checker - digits, uppercase, lowercase, special chars.

use secrecy::{ExposeSecret, SecretString};

use crate::evaluator::CheckResult;

/// Reports every missing character class, or only the first one when `all` is `false`.
///
/// Reasons, in order: `digit_needed`, `uppercase_needed`, `lowercase_needed`,
/// `special_needed`.
pub fn character_variety(password: &SecretString, all: bool) -> CheckResult {
    let pwd = password.expose_secret();

    let rules: [(fn(char) -> bool, &str); 4] = [
        (|c| c.is_ascii_digit(), "digit_needed"),
        (|c| c.is_uppercase(), "uppercase_needed"),
        (|c| c.is_lowercase(), "lowercase_needed"),
        (|c| !c.is_alphanumeric(), "special_needed"),
    ];

    let mut missing = rules
        .iter()
        .filter(|(present, _)| !pwd.chars().any(*present))
        .map(|(_, reason)| reason.to_string());

    if all {
        CheckResult::Reasons(missing.collect())
    } else {
        missing.next().into()
    }
}
