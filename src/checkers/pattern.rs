//! Pattern analysis checker - detects repetitive and sequential patterns.

use secrecy::{ExposeSecret, SecretString};

use crate::evaluator::CheckResult;

const REPEAT_RUN: usize = 3;
const SEQUENCE_RUN: usize = 4;

fn has_repetition(chars: &[char]) -> bool {
    chars
        .windows(REPEAT_RUN)
        .any(|w| w.iter().all(|&c| c == w[0]))
}

fn has_sequence(chars: &[char]) -> bool {
    chars.windows(SEQUENCE_RUN).any(|window| {
        let steps: Vec<i64> = window
            .windows(2)
            .map(|w| w[1] as i64 - w[0] as i64)
            .collect();
        steps.iter().all(|&s| s == 1) || steps.iter().all(|&s| s == -1)
    })
}

/// Reports `repetitive_pattern` (e.g. "aaa") and `sequential_pattern`
/// (e.g. "1234", "dcba").
pub fn pattern_analysis(password: &SecretString, all: bool) -> CheckResult {
    let chars: Vec<char> = password.expose_secret().chars().collect();

    let mut reasons = Vec::new();
    if has_repetition(&chars) {
        reasons.push("repetitive_pattern".to_string());
        if !all {
            return CheckResult::Reasons(reasons);
        }
    }
    if has_sequence(&chars) {
        reasons.push("sequential_pattern".to_string());
    }
    CheckResult::Reasons(reasons)
}
