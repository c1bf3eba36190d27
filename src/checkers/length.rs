//! Length checker - flags passwords under a minimum length.

use secrecy::{ExposeSecret, SecretString};

use crate::evaluator::CheckResult;

pub const DEFAULT_MIN_LENGTH: usize = 8;

/// Builds a checker reporting `too_short` when the password has fewer than
/// `min` characters.
pub fn length_checker(min: usize) -> impl Fn(&SecretString, bool) -> CheckResult + Send + Sync {
    move |password: &SecretString, _all: bool| {
        if password.expose_secret().chars().count() < min {
            return CheckResult::Reason("too_short".to_string());
        }
        CheckResult::Clear
    }
}
