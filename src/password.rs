//! Password value - an immutable plaintext with hashing and checking helpers.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::encoders;
use crate::evaluator::WeaknessReport;
use crate::registry::{self, Error, Registry};

const MASK: &str = "********";

/// Immutable plaintext password.
///
/// `Debug` never shows the plaintext. `Display` masks it unless the
/// process-wide registry has hiding turned off; use [`Password::display`] to
/// render against an explicit registry.
#[derive(Debug)]
pub struct Password {
    secret: SecretString,
}

impl Password {
    pub fn new(plaintext: impl Into<String>) -> Self {
        let plaintext: String = plaintext.into();
        Self {
            secret: SecretString::new(plaintext.into_boxed_str()),
        }
    }

    /// Creates a password from the registry's default generator.
    ///
    /// # Errors
    /// Same as [`Registry::generate`] with no name.
    pub fn generate(registry: &Registry) -> Result<Self, Error> {
        Self::generate_with(registry, None)
    }

    /// Creates a password from the named generator, or the default one.
    pub fn generate_with(registry: &Registry, name: Option<&str>) -> Result<Self, Error> {
        Ok(Self {
            secret: registry.generate(name)?,
        })
    }

    /// The plaintext.
    pub fn expose(&self) -> &str {
        self.secret.expose_secret()
    }

    pub fn as_secret(&self) -> &SecretString {
        &self.secret
    }

    /// Renders the password, masked unless the registry disables hiding.
    pub fn display(&self, registry: &Registry) -> &str {
        if registry.hide() { MASK } else { self.expose() }
    }

    /// Checks this password against the registry. See [`Registry::weakness`].
    pub fn weakness(
        &self,
        registry: &Registry,
        checkers: &[&str],
        all: bool,
    ) -> Result<Option<WeaknessReport>, Error> {
        registry.weakness(&self.secret, checkers, all)
    }

    pub fn md5(&self) -> String {
        encoders::md5(self.expose())
    }

    pub fn sha(&self) -> String {
        encoders::sha(self.expose())
    }

    pub fn sha256(&self) -> String {
        encoders::sha256(self.expose())
    }

    pub fn ntlm(&self) -> String {
        encoders::ntlm(self.expose())
    }

    pub fn lmhash(&self) -> String {
        encoders::lmhash(self.expose())
    }
}

impl Clone for Password {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl From<SecretString> for Password {
    fn from(secret: SecretString) -> Self {
        Self { secret }
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display(registry::global()))
    }
}
