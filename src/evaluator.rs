//! Weakness evaluator - runs checkers and aggregates their reasons.

use indexmap::IndexMap;
use secrecy::SecretString;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::registry::{Error, Registry};

/// Value returned by a checker.
///
/// - `Clear` and `Flag(false)` - no weakness
/// - `Flag(true)` - weakness, reported under the checker's own name
/// - `Reason(r)` - a single weakness reason
/// - `Reasons(list)` - zero or more reasons; an empty list means no weakness
/// - `Unsupported(v)` - anything outside this protocol; fails the assessment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    Clear,
    Flag(bool),
    Reason(String),
    Reasons(Vec<String>),
    Unsupported(String),
}

impl CheckResult {
    /// Normalizes into the reasons this checker contributes, if any.
    fn into_reasons(self, checker: &str) -> Result<Option<Vec<String>>, Error> {
        match self {
            CheckResult::Clear | CheckResult::Flag(false) => Ok(None),
            CheckResult::Flag(true) => Ok(Some(vec![checker.to_string()])),
            CheckResult::Reason(reason) => Ok(Some(vec![reason])),
            CheckResult::Reasons(reasons) if reasons.is_empty() => Ok(None),
            CheckResult::Reasons(reasons) => Ok(Some(reasons)),
            CheckResult::Unsupported(value) => {
                #[cfg(feature = "tracing")]
                tracing::error!("Unsupported result from checker {}: {}", checker, value);
                Err(Error::UnsupportedCheckerResult {
                    checker: checker.to_string(),
                    value,
                })
            }
        }
    }
}

impl From<bool> for CheckResult {
    fn from(flag: bool) -> Self {
        CheckResult::Flag(flag)
    }
}

impl From<()> for CheckResult {
    fn from(_: ()) -> Self {
        CheckResult::Clear
    }
}

impl From<&str> for CheckResult {
    fn from(reason: &str) -> Self {
        CheckResult::Reason(reason.to_string())
    }
}

impl From<String> for CheckResult {
    fn from(reason: String) -> Self {
        CheckResult::Reason(reason)
    }
}

impl From<Vec<String>> for CheckResult {
    fn from(reasons: Vec<String>) -> Self {
        CheckResult::Reasons(reasons)
    }
}

impl From<Vec<&str>> for CheckResult {
    fn from(reasons: Vec<&str>) -> Self {
        CheckResult::Reasons(reasons.into_iter().map(String::from).collect())
    }
}

impl<T: Into<CheckResult>> From<Option<T>> for CheckResult {
    fn from(value: Option<T>) -> Self {
        value.map_or(CheckResult::Clear, Into::into)
    }
}

/// Checker name to the non-empty list of reasons it raised, in checker order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeaknessReport {
    entries: IndexMap<String, Vec<String>>,
}

impl WeaknessReport {
    pub fn get(&self, checker: &str) -> Option<&[String]> {
        self.entries.get(checker).map(Vec::as_slice)
    }

    pub fn contains(&self, checker: &str) -> bool {
        self.entries.contains_key(checker)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn checkers(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, reasons)| (name.as_str(), reasons.as_slice()))
    }

    pub fn into_inner(self) -> IndexMap<String, Vec<String>> {
        self.entries
    }
}

impl IntoIterator for WeaknessReport {
    type Item = (String, Vec<String>);
    type IntoIter = indexmap::map::IntoIter<String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Registry {
    /// Checks the password for weaknesses.
    ///
    /// # Arguments
    /// * `password` - The password to check
    /// * `checkers` - Checker names to run; empty means the default checkers,
    ///   or every registered checker when no defaults are set
    /// * `all` - When `false`, stop at the first checker reporting a weakness
    ///   and keep only its first reason
    ///
    /// # Returns
    /// `Ok(None)` when no checker is registered or nothing was found.
    ///
    /// # Errors
    /// - [`Error::CheckerNotFound`] if a requested checker is not registered
    /// - [`Error::UnsupportedCheckerResult`] if a checker returned `Unsupported`
    /// - [`Error::CheckerFailed`] if a fallible checker failed
    ///
    /// No partial report is returned on error.
    pub fn weakness(
        &self,
        password: &SecretString,
        checkers: &[&str],
        all: bool,
    ) -> Result<Option<WeaknessReport>, Error> {
        self.assess(password, checkers, all, &|| Ok(()))
    }

    /// Same as [`Registry::weakness`], checking `token` before each checker.
    ///
    /// # Errors
    /// [`Error::Cancelled`] once the token is cancelled, in addition to the
    /// errors of [`Registry::weakness`].
    #[cfg(feature = "async")]
    pub fn weakness_cancellable(
        &self,
        password: &SecretString,
        checkers: &[&str],
        all: bool,
        token: &CancellationToken,
    ) -> Result<Option<WeaknessReport>, Error> {
        self.assess(password, checkers, all, &|| {
            if token.is_cancelled() {
                Err(Error::Cancelled)
            } else {
                Ok(())
            }
        })
    }

    fn assess(
        &self,
        password: &SecretString,
        checkers: &[&str],
        all: bool,
        proceed: &dyn Fn() -> Result<(), Error>,
    ) -> Result<Option<WeaknessReport>, Error> {
        if self.has_no_checkers() {
            return Ok(None);
        }

        let resolved = self.resolve_checkers(checkers)?;
        let mut report = WeaknessReport::default();

        for (name, checker) in resolved {
            proceed()?;

            let result = checker(password, all).map_err(|source| {
                #[cfg(feature = "tracing")]
                tracing::error!("Checker {} failed: {}", name, source);
                Error::CheckerFailed {
                    checker: name.clone(),
                    source,
                }
            })?;

            let Some(mut reasons) = result.into_reasons(&name)? else {
                continue;
            };

            if !all {
                reasons.truncate(1);
                report.entries.insert(name, reasons);
                break;
            }
            report.entries.insert(name, reasons);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("Weakness assessment done: {} checker(s) flagged", report.len());

        Ok((!report.is_empty()).then_some(report))
    }
}

/// Async version that sends the assessment result via channel.
#[cfg(feature = "async")]
pub async fn weakness_tx(
    registry: &Registry,
    password: &SecretString,
    checkers: &[&str],
    all: bool,
    token: CancellationToken,
    tx: mpsc::Sender<Result<Option<WeaknessReport>, Error>>,
) {
    #[cfg(feature = "tracing")]
    tracing::info!("weakness assessment is about to start...");

    let result = registry.weakness_cancellable(password, checkers, all, &token);

    if let Err(_e) = tx.send(result).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send weakness assessment result: {}", _e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn secret(pwd: &str) -> SecretString {
        SecretString::new(pwd.to_string().into())
    }

    fn setup_registry() -> Registry {
        let registry = Registry::new();
        registry.register_checker("short", |pwd: &SecretString, _| {
            use secrecy::ExposeSecret;
            (pwd.expose_secret().len() < 8).then_some("too_short")
        });
        registry.register_checker("never", |_: &SecretString, _| false);
        registry
    }

    #[test]
    fn test_weakness_no_checkers_registered() {
        let registry = Registry::new();
        let result = registry.weakness(&secret("abc"), &["anything"], true).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_weakness_nothing_found() {
        let registry = setup_registry();
        let result = registry.weakness(&secret("long enough"), &[], true).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_weakness_single_checker_flags() {
        let registry = setup_registry();
        let report = registry.weakness(&secret("abc"), &[], true).unwrap().unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.get("short"), Some(&["too_short".to_string()][..]));
        assert!(!report.contains("never"));
    }

    #[test]
    fn test_weakness_all_keeps_every_reason() {
        let registry = Registry::new();
        registry.register_checker("a", |_: &SecretString, _| vec!["r1", "r2"]);
        registry.register_checker("b", |_: &SecretString, _| true);

        let report = registry.weakness(&secret("x"), &[], true).unwrap().unwrap();
        let entries: Vec<_> = report.into_iter().collect();
        assert_eq!(
            entries,
            vec![
                ("a".to_string(), vec!["r1".to_string(), "r2".to_string()]),
                ("b".to_string(), vec!["b".to_string()]),
            ]
        );
    }

    #[test]
    fn test_weakness_first_only_truncates() {
        let registry = Registry::new();
        registry.register_checker("a", |_: &SecretString, _| vec!["r1", "r2"]);
        registry.register_checker("b", |_: &SecretString, _| "other");

        let report = registry.weakness(&secret("x"), &[], false).unwrap().unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.get("a"), Some(&["r1".to_string()][..]));
    }

    #[test]
    fn test_weakness_first_only_follows_request_order() {
        let registry = Registry::new();
        registry.register_checker("a", |_: &SecretString, _| "from_a");
        registry.register_checker("b", |_: &SecretString, _| "from_b");

        let report = registry.weakness(&secret("x"), &["b", "a"], false).unwrap().unwrap();
        assert_eq!(report.checkers().collect::<Vec<_>>(), ["b"]);
    }

    #[test]
    fn test_weakness_first_only_stops_invoking() {
        let calls = Arc::new(AtomicUsize::new(0));
        let registry = Registry::new();
        registry.register_checker("a", |_: &SecretString, _| "hit");
        let counter = Arc::clone(&calls);
        registry.register_checker("b", move |_: &SecretString, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            "hit"
        });

        registry.weakness(&secret("x"), &[], false).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        registry.weakness(&secret("x"), &[], true).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_weakness_passes_all_flag_to_checkers() {
        let registry = Registry::new();
        registry.register_checker("mode", |_: &SecretString, all: bool| {
            if all { "all" } else { "first" }
        });

        let report = registry.weakness(&secret("x"), &[], false).unwrap().unwrap();
        assert_eq!(report.get("mode"), Some(&["first".to_string()][..]));
        let report = registry.weakness(&secret("x"), &[], true).unwrap().unwrap();
        assert_eq!(report.get("mode"), Some(&["all".to_string()][..]));
    }

    #[test]
    fn test_weakness_empty_reason_list_contributes_nothing() {
        let registry = Registry::new();
        registry.register_checker("empty", |_: &SecretString, _| Vec::<String>::new());
        registry.register_checker("unit", |_: &SecretString, _| ());
        assert_eq!(registry.weakness(&secret("x"), &[], true).unwrap(), None);
    }

    #[test]
    fn test_weakness_uses_default_checkers() {
        let registry = setup_registry();
        registry.register_checker("always", |_: &SecretString, _| true);
        registry.set_default_checkers(Some(["always"]));

        let report = registry.weakness(&secret("abc"), &[], true).unwrap().unwrap();
        assert_eq!(report.checkers().collect::<Vec<_>>(), ["always"]);
    }

    #[test]
    fn test_weakness_unknown_checker() {
        let calls = Arc::new(AtomicUsize::new(0));
        let registry = Registry::new();
        let counter = Arc::clone(&calls);
        registry.register_checker("a", move |_: &SecretString, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            "hit"
        });

        let result = registry.weakness(&secret("x"), &["a", "nonexistent"], true);
        match result {
            Err(Error::CheckerNotFound(name)) => assert_eq!(name, "nonexistent"),
            _ => panic!("Expected CheckerNotFound error"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_weakness_unsupported_result() {
        let registry = Registry::new();
        registry.register_checker("a", |_: &SecretString, _| "hit");
        registry.register_checker("int", |_: &SecretString, _| {
            CheckResult::Unsupported("42".to_string())
        });

        match registry.weakness(&secret("x"), &[], true) {
            Err(Error::UnsupportedCheckerResult { checker, value }) => {
                assert_eq!(checker, "int");
                assert_eq!(value, "42");
            }
            _ => panic!("Expected UnsupportedCheckerResult error"),
        }
    }

    #[test]
    fn test_weakness_fallible_checker_error_propagates() {
        let registry = Registry::new();
        registry.register_fallible_checker("db", |_: &SecretString, _| {
            Err::<bool, _>("connection refused")
        });

        match registry.weakness(&secret("x"), &[], true) {
            Err(Error::CheckerFailed { checker, source }) => {
                assert_eq!(checker, "db");
                assert_eq!(source.to_string(), "connection refused");
            }
            _ => panic!("Expected CheckerFailed error"),
        }
    }

    #[test]
    fn test_checker_may_use_its_registry() {
        let registry = Arc::new(Registry::new());
        let inner = Arc::downgrade(&registry);
        registry.register_checker("introspect", move |_: &SecretString, _| {
            inner.upgrade().map(|r| r.has_checker("introspect"))
        });

        let report = registry.weakness(&secret("x"), &[], true).unwrap().unwrap();
        assert!(report.contains("introspect"));
    }

    #[test]
    fn test_check_result_conversions() {
        assert_eq!(CheckResult::from(None::<&str>), CheckResult::Clear);
        assert_eq!(CheckResult::from(Some("r")), CheckResult::Reason("r".to_string()));
        assert_eq!(CheckResult::from(true), CheckResult::Flag(true));
        assert_eq!(
            CheckResult::from(vec!["a", "b"]),
            CheckResult::Reasons(vec!["a".to_string(), "b".to_string()])
        );
    }
}
