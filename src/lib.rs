//! Password weakness checks and legacy hash encodings
//!
//! This library lets callers register named password generators and
//! checkers, aggregate checker verdicts into a weakness report, and render a
//! password under legacy credential encodings (MD5, SHA-1, SHA-256, NTLM and
//! LM hash) for old authentication stores.
//!
//! # Features
//!
//! - `async` (default): Enables cancellable and channel-based assessment
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! Read once, when [`registry::global()`] is first used:
//!
//! - `PWD_HIDE`: `false`/`0`/`no`/`off` shows plaintexts on display
//!   (default: hidden)
//! - `PWD_DEFAULT_GENERATOR`: default generator name
//! - `PWD_DEFAULT_CHECKERS`: comma-separated default checker names
//!   (default: every registered checker)
//!
//! # Example
//!
//! ```rust
//! use pwd_weakness::{Password, Registry, register_stock_checkers};
//! use secrecy::SecretString;
//!
//! let registry = Registry::new();
//! register_stock_checkers(&registry);
//! registry.register_checker("no_admin", |pwd: &SecretString, _all| {
//!     use secrecy::ExposeSecret;
//!     pwd.expose_secret().eq_ignore_ascii_case("admin")
//! });
//!
//! let password = Password::new("admin");
//! let report = password.weakness(&registry, &[], true).unwrap().unwrap();
//! assert!(report.contains("no_admin"));
//! assert_eq!(report.get("length"), Some(&["too_short".to_string()][..]));
//!
//! assert_eq!(password.ntlm(), "209c6174da490caeb422f3fa5a7ae634");
//! assert_eq!(password.display(&registry), "********");
//! ```

// Internal modules
mod checkers;
mod encoders;
mod evaluator;
mod generators;
mod password;
pub mod registry;

// Public API
pub use checkers::{
    DEFAULT_MIN_LENGTH, character_variety, length_checker, pattern_analysis,
    register_stock_checkers,
};
pub use encoders::{LegacyHash, lmhash, md5, ntlm, sha, sha256};
pub use evaluator::{CheckResult, WeaknessReport};
pub use generators::{alphanumeric, register_stock_generators};
pub use password::Password;
pub use registry::{BoxError, Error, Registry};

#[cfg(feature = "async")]
pub use evaluator::weakness_tx;
