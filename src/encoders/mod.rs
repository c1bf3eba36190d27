//! Legacy credential hash encodings
//!
//! Each encoder is a total, deterministic function of the plaintext. These are
//! kept for interoperability with old authentication stores and are not meant
//! to protect new credentials.

mod digest;
mod lmhash;
mod ntlm;

pub use digest::{md5, sha, sha256};
pub use lmhash::lmhash;
pub use ntlm::ntlm;

/// Selects a legacy encoding at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacyHash {
    Md5,
    Sha,
    Sha256,
    Ntlm,
    LmHash,
}

impl LegacyHash {
    pub const ALL: [LegacyHash; 5] = [
        LegacyHash::Md5,
        LegacyHash::Sha,
        LegacyHash::Sha256,
        LegacyHash::Ntlm,
        LegacyHash::LmHash,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LegacyHash::Md5 => "md5",
            LegacyHash::Sha => "sha",
            LegacyHash::Sha256 => "sha256",
            LegacyHash::Ntlm => "ntlm",
            LegacyHash::LmHash => "lmhash",
        }
    }

    pub fn encode(self, password: &str) -> String {
        match self {
            LegacyHash::Md5 => md5(password),
            LegacyHash::Sha => sha(password),
            LegacyHash::Sha256 => sha256(password),
            LegacyHash::Ntlm => ntlm(password),
            LegacyHash::LmHash => lmhash(password),
        }
    }
}
