//! Registry management module
//!
//! Holds the named generators and checkers, the default selections and the
//! display policy. A `Registry` is an explicit object; `global()` hands out
//! the process-wide instance configured from the environment.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use secrecy::SecretString;
use thiserror::Error;

use crate::evaluator::CheckResult;

/// Boxed error returned by fallible checkers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub(crate) type Generator = Arc<dyn Fn() -> String + Send + Sync>;
pub(crate) type Checker =
    Arc<dyn Fn(&SecretString, bool) -> Result<CheckResult, BoxError> + Send + Sync>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid generator: no generator requested and no default set")]
    InvalidGenerator,
    #[error("generator not found: {0}")]
    GeneratorNotFound(String),
    #[error("checker not found: {0}")]
    CheckerNotFound(String),
    #[error("unsupported checker result from {checker}: {value}")]
    UnsupportedCheckerResult { checker: String, value: String },
    #[error("checker {checker} failed: {source}")]
    CheckerFailed {
        checker: String,
        #[source]
        source: BoxError,
    },
    #[cfg(feature = "async")]
    #[error("weakness assessment cancelled")]
    Cancelled,
}

const HIDE_VAR: &str = "PWD_HIDE";
const DEFAULT_GENERATOR_VAR: &str = "PWD_DEFAULT_GENERATOR";
const DEFAULT_CHECKERS_VAR: &str = "PWD_DEFAULT_CHECKERS";

/// Returns the display policy from `PWD_HIDE`.
///
/// `false`, `0`, `no` and `off` (any case) turn masking off. Anything else,
/// including an unset variable, keeps passwords hidden.
pub fn get_hide_from_env() -> bool {
    match std::env::var(HIDE_VAR) {
        Ok(v) => !matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "false" | "0" | "no" | "off"
        ),
        Err(_) => true,
    }
}

/// Returns the default generator name from `PWD_DEFAULT_GENERATOR`, if set and non-blank.
pub fn get_default_generator_from_env() -> Option<String> {
    std::env::var(DEFAULT_GENERATOR_VAR)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Returns the comma-separated default checker list from `PWD_DEFAULT_CHECKERS`.
pub fn get_default_checkers_from_env() -> Option<Vec<String>> {
    std::env::var(DEFAULT_CHECKERS_VAR).ok().map(|v| {
        v.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    })
}

struct State {
    generators: HashMap<String, Generator>,
    checkers: IndexMap<String, Checker>,
    default_generator: Option<String>,
    default_checkers: Option<Vec<String>>,
    hide: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            generators: HashMap::new(),
            checkers: IndexMap::new(),
            default_generator: None,
            default_checkers: None,
            hide: true,
        }
    }
}

/// Named generators and checkers plus their default selections.
///
/// All methods take `&self`; the tables sit behind an `RwLock`. Callables are
/// cloned out of the lock before they run, so a checker may use the registry
/// it is registered in.
pub struct Registry {
    state: RwLock<State>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read();
        f.debug_struct("Registry")
            .field("generators", &state.generators.keys().collect::<Vec<_>>())
            .field("checkers", &state.checkers.keys().collect::<Vec<_>>())
            .field("default_generator", &state.default_generator)
            .field("default_checkers", &state.default_checkers)
            .field("hide", &state.hide)
            .finish()
    }
}

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::from_env);

/// Returns the process-wide registry, configured from the environment on first use.
pub fn global() -> &'static Registry {
    &GLOBAL
}

impl Registry {
    /// Creates an empty registry that hides passwords on display.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
        }
    }

    /// Creates an empty registry with defaults and display policy read from
    /// `PWD_HIDE`, `PWD_DEFAULT_GENERATOR` and `PWD_DEFAULT_CHECKERS`.
    pub fn from_env() -> Self {
        let state = State {
            default_generator: get_default_generator_from_env(),
            default_checkers: get_default_checkers_from_env(),
            hide: get_hide_from_env(),
            ..State::default()
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Registry configured from environment: hide={}, default_generator={:?}, default_checkers={:?}",
            state.hide,
            state.default_generator,
            state.default_checkers
        );

        Self {
            state: RwLock::new(state),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a generator, replacing any generator already under `name`.
    pub fn register_generator<F>(&self, name: impl Into<String>, generator: F)
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        let name = name.into();

        #[cfg(feature = "tracing")]
        tracing::debug!("Registering generator: {}", name);

        self.write().generators.insert(name, Arc::new(generator));
    }

    /// Registers a checker unless one already exists under `name`.
    ///
    /// The first registration for a name wins; later ones are ignored. Returns
    /// whether the checker was stored.
    pub fn register_checker<F, R>(&self, name: impl Into<String>, checker: F) -> bool
    where
        F: Fn(&SecretString, bool) -> R + Send + Sync + 'static,
        R: Into<CheckResult>,
    {
        self.insert_checker(
            name.into(),
            Arc::new(move |password: &SecretString, all: bool| {
                Ok::<CheckResult, BoxError>(checker(password, all).into())
            }),
        )
    }

    /// Registers a checker that may fail, e.g. one backed by a database lookup.
    ///
    /// Same first-wins rule as [`Registry::register_checker`]. An error returned
    /// by the checker aborts the assessment with [`Error::CheckerFailed`].
    pub fn register_fallible_checker<F, R, E>(&self, name: impl Into<String>, checker: F) -> bool
    where
        F: Fn(&SecretString, bool) -> Result<R, E> + Send + Sync + 'static,
        R: Into<CheckResult>,
        E: Into<BoxError>,
    {
        self.insert_checker(
            name.into(),
            Arc::new(move |password: &SecretString, all: bool| {
                checker(password, all)
                    .map(Into::<CheckResult>::into)
                    .map_err(Into::<BoxError>::into)
            }),
        )
    }

    fn insert_checker(&self, name: String, checker: Checker) -> bool {
        let mut state = self.write();
        if state.checkers.contains_key(&name) {
            #[cfg(feature = "tracing")]
            tracing::debug!("Checker already registered, keeping the first one: {}", name);
            return false;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("Registering checker: {}", name);

        state.checkers.insert(name, checker);
        true
    }

    pub fn has_generator(&self, name: &str) -> bool {
        self.read().generators.contains_key(name)
    }

    pub fn has_checker(&self, name: &str) -> bool {
        self.read().checkers.contains_key(name)
    }

    /// Generator names, sorted.
    pub fn generator_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().generators.keys().cloned().collect();
        names.sort();
        names
    }

    /// Checker names in registration order.
    pub fn checker_names(&self) -> Vec<String> {
        self.read().checkers.keys().cloned().collect()
    }

    pub fn set_default_generator(&self, name: Option<&str>) {
        self.write().default_generator = name.map(String::from);
    }

    pub fn default_generator(&self) -> Option<String> {
        self.read().default_generator.clone()
    }

    /// Sets the default checker list. `None` or an empty list means every
    /// registered checker.
    pub fn set_default_checkers<I, S>(&self, names: Option<I>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.write().default_checkers = names.map(|n| n.into_iter().map(Into::into).collect());
    }

    pub fn default_checkers(&self) -> Option<Vec<String>> {
        self.read().default_checkers.clone()
    }

    /// Whether passwords are masked on display.
    pub fn hide(&self) -> bool {
        self.read().hide
    }

    pub fn set_hide(&self, hide: bool) {
        self.write().hide = hide;
    }

    /// Generates a plaintext with the named generator, or the default one when
    /// `name` is `None`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidGenerator`] if no name is given and no default is set
    /// - [`Error::GeneratorNotFound`] if the name was never registered
    pub fn generate(&self, name: Option<&str>) -> Result<SecretString, Error> {
        let generator = {
            let state = self.read();
            let name = match name {
                Some(n) => n.to_string(),
                None => state.default_generator.clone().ok_or(Error::InvalidGenerator)?,
            };
            state
                .generators
                .get(&name)
                .cloned()
                .ok_or(Error::GeneratorNotFound(name))?
        };

        Ok(SecretString::new(generator().into()))
    }

    /// Resolves the checkers to run, in order: the requested names, else the
    /// default list, else every registered checker.
    ///
    /// Every name is looked up before any checker runs.
    pub(crate) fn resolve_checkers(
        &self,
        requested: &[&str],
    ) -> Result<Vec<(String, Checker)>, Error> {
        let state = self.read();

        let names: Vec<String> = if !requested.is_empty() {
            requested.iter().map(|s| s.to_string()).collect()
        } else if let Some(defaults) = state.default_checkers.as_ref().filter(|d| !d.is_empty()) {
            defaults.clone()
        } else {
            return Ok(state
                .checkers
                .iter()
                .map(|(name, checker)| (name.clone(), Arc::clone(checker)))
                .collect());
        };

        names
            .into_iter()
            .map(|name| match state.checkers.get(&name) {
                Some(checker) => Ok((name, Arc::clone(checker))),
                None => Err(Error::CheckerNotFound(name)),
            })
            .collect()
    }

    pub(crate) fn has_no_checkers(&self) -> bool {
        self.read().checkers.is_empty()
    }
}
