//! BIP39 for 256-bit entropy: 24 word indices of 11 bits each, the last
//! eight bits being SHA-256(entropy)[0]. The English word table comes from
//! the `bip39` crate; this module only ever touches indices and the
//! space-joined ASCII phrase.

use once_cell::sync::Lazy;

use crate::hash::sha256::sha256;

static WORDLIST: Lazy<&'static [&'static str; 2048]> =
    Lazy::new(|| bip39::Language::English.word_list());

pub const WORD_COUNT: usize = 24;

/// Longest English word is 8 ASCII bytes; 23 separators.
pub const MAX_PHRASE_LEN: usize = WORD_COUNT * 9;

/// 256 entropy bits followed by the 8-bit checksum, MSB-first, cut into 24
/// groups of 11. The bit gathering is done in place; no 33-byte scratch.
pub fn entropy_to_indices(entropy: &[u8; 32]) -> [u16; WORD_COUNT] {
    let checksum = sha256(entropy)[0];
    let byte_at = |i: usize| -> u32 {
        if i < 32 {
            entropy[i] as u32
        } else if i == 32 {
            checksum as u32
        } else {
            0
        }
    };

    let mut indices = [0u16; WORD_COUNT];
    for (i, idx) in indices.iter_mut().enumerate() {
        let bit = i * 11;
        let byte = bit / 8;
        let shift = bit % 8;
        let window = (byte_at(byte) << 16) | (byte_at(byte + 1) << 8) | byte_at(byte + 2);
        *idx = ((window >> (13 - shift)) & 0x7FF) as u16;
    }
    indices
}

/// Inverse of [`entropy_to_indices`]: rebuild the 33 bytes, split off the
/// checksum, and verify it. Host-side verification of a published result.
pub fn indices_to_entropy(indices: &[u16; WORD_COUNT]) -> Option<[u8; 32]> {
    let mut data = [0u8; 33];
    let mut acc: u32 = 0;
    let mut bits = 0;
    let mut out = 0;
    for &idx in indices {
        if idx >= 2048 {
            return None;
        }
        acc = (acc << 11) | idx as u32;
        bits += 11;
        while bits >= 8 {
            bits -= 8;
            data[out] = (acc >> bits) as u8;
            out += 1;
        }
    }

    let mut entropy = [0u8; 32];
    entropy.copy_from_slice(&data[..32]);
    if sha256(&entropy)[0] != data[32] {
        return None;
    }
    Some(entropy)
}

/// Writes the space-joined phrase into `buf` and returns its length.
pub fn write_phrase(indices: &[u16; WORD_COUNT], buf: &mut [u8; MAX_PHRASE_LEN]) -> usize {
    let words = *WORDLIST;
    let mut len = 0;
    for (i, &idx) in indices.iter().enumerate() {
        if i > 0 {
            buf[len] = b' ';
            len += 1;
        }
        let word = words[(idx & 0x7FF) as usize].as_bytes();
        buf[len..len + word.len()].copy_from_slice(word);
        len += word.len();
    }
    len
}

pub fn phrase_string(indices: &[u16; WORD_COUNT]) -> String {
    let mut buf = [0u8; MAX_PHRASE_LEN];
    let len = write_phrase(indices, &mut buf);
    // The word table is pure ASCII.
    String::from_utf8_lossy(&buf[..len]).into_owned()
}
