//! Tagged digest encodings - `{MD5}`, `{SHA}` and `{sha256}` in LDAP userPassword style.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use md5::Md5;
use sha1::{Digest, Sha1};
use sha2::Sha256;

fn tagged<D: Digest>(tag: &str, password: &str) -> String {
    let digest = D::digest(password.as_bytes());
    format!("{}{}", tag, STANDARD.encode(digest))
}

/// Encodes the password as `{MD5}` followed by the base64 MD5 digest.
pub fn md5(password: &str) -> String {
    tagged::<Md5>("{MD5}", password)
}

/// Encodes the password as `{SHA}` followed by the base64 SHA-1 digest.
pub fn sha(password: &str) -> String {
    tagged::<Sha1>("{SHA}", password)
}

/// Encodes the password as `{sha256}` followed by the base64 SHA-256 digest.
///
/// The tag is lowercase, unlike `{MD5}` and `{SHA}`. Stores that expect this
/// encoding match the tag literally.
pub fn sha256(password: &str) -> String {
    tagged::<Sha256>("{sha256}", password)
}
