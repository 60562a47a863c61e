//! PBKDF2-HMAC-SHA512 specialised for BIP39: 2048 iterations, 64-byte
//! output, so exactly one T block and no output loop.

use crate::hash::sha512::HmacSha512;

/// BIP39 fixes the salt; passphrases are out of scope for the search
/// pipeline (reference vectors still exercise other salts via the `salt`
/// parameter).
pub const BIP39_SALT: &[u8] = b"mnemonic";

pub const BIP39_ROUNDS: u32 = 2048;

/// Derive the 64-byte seed. The HMAC key schedule is computed once and the
/// two half-states reused for all iterations; each U after the first costs
/// two SHA-512 compressions.
pub fn pbkdf2_hmac_sha512(password: &[u8], salt: &[u8], rounds: u32) -> [u8; 64] {
    debug_assert!(rounds >= 1);
    debug_assert!(salt.len() <= 64);

    let key = HmacSha512::new(password);

    // U1 = PRF(password, salt || INT_32_BE(1))
    let mut msg = [0u8; 68];
    msg[..salt.len()].copy_from_slice(salt);
    msg[salt.len()..salt.len() + 4].copy_from_slice(&1u32.to_be_bytes());
    let mut u = key.mac(&msg[..salt.len() + 4]);

    let mut t = u;
    for _ in 1..rounds {
        u = key.mac(&u);
        for (acc, byte) in t.iter_mut().zip(u.iter()) {
            *acc ^= byte;
        }
    }
    t
}
