//! LM hash encoding - DES of `KGS!@#$%` under two keys cut from the password.

use des::Des;
use des::cipher::{Block, BlockEncrypt, Key, KeyInit};

const MAGIC: &[u8; 8] = b"KGS!@#$%";
const PASSWORD_LEN: usize = 14;

/// Uppercases the first 14 characters and null-pads (or cuts) to 14 bytes.
fn prepare_password(password: &str) -> [u8; PASSWORD_LEN] {
    let head: String = password.chars().take(PASSWORD_LEN).collect();
    let upper = head.to_uppercase();

    let mut buf = [0u8; PASSWORD_LEN];
    for (dst, src) in buf.iter_mut().zip(upper.bytes()) {
        *dst = src;
    }
    buf
}

/// Spreads 56 key bits over 8 bytes, appending an odd-parity bit to each 7-bit group.
fn expand_key(half: &[u8]) -> [u8; 8] {
    let bits = half.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b));

    let mut key = [0u8; 8];
    for (i, byte) in key.iter_mut().enumerate() {
        let group = ((bits >> (49 - 7 * i)) & 0x7f) as u8;
        let parity = if group.count_ones() % 2 == 0 { 1 } else { 0 };
        *byte = (group << 1) | parity;
    }
    key
}

fn des_magic(half: &[u8]) -> [u8; 8] {
    let key = expand_key(half);
    let cipher = Des::new(Key::<Des>::from_slice(&key));
    let mut block = Block::<Des>::clone_from_slice(MAGIC);
    cipher.encrypt_block(&mut block);

    let mut out = [0u8; 8];
    out.copy_from_slice(&block);
    out
}

/// Encodes the password as the lowercase hex LM hash.
///
/// Only the first 14 characters are significant and case is folded, so longer
/// passwords are silently truncated and shorter ones null-padded. Characters
/// whose uppercase UTF-8 form spans several bytes count by byte once inside
/// the 14-byte buffer.
pub fn lmhash(password: &str) -> String {
    let prepared = prepare_password(password);
    let (first, second) = prepared.split_at(7);

    let mut hash = [0u8; 16];
    hash[..8].copy_from_slice(&des_magic(first));
    hash[8..].copy_from_slice(&des_magic(second));
    hex::encode(hash)
}
