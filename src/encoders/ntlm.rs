//! NTLM encoding - MD4 over the UTF-16LE password.

use md4::{Digest, Md4};

/// Encodes the password as the lowercase hex NT hash.
pub fn ntlm(password: &str) -> String {
    let utf16_le: Vec<u8> = password
        .encode_utf16()
        .flat_map(|unit| unit.to_le_bytes())
        .collect();
    hex::encode(Md4::digest(&utf16_le))
}
