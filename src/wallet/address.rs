//! Entropy to Ethereum address, the complete per-candidate pipeline.

use serde::Serialize;

use crate::hash::keccak::keccak256;
use crate::hash::pbkdf2::{pbkdf2_hmac_sha512, BIP39_ROUNDS, BIP39_SALT};
use crate::math::bigint::U256;
use crate::math::secp256k1;
use crate::wallet::{bip32, bip39};

/// How a 32-byte candidate is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u32)]
pub enum SourceMode {
    /// BIP39 entropy: mnemonic → seed → m/44'/60'/0'/0/0.
    MnemonicEntropy = 0,
    /// The candidate is the secp256k1 secret key itself.
    PrivateKey = 1,
}

/// The private key a candidate resolves to, or None when it falls outside
/// [1, n) (direct mode) or the path bottoms out degenerate (entropy mode).
pub fn derive_private_key(entropy: &[u8; 32], mode: SourceMode) -> Option<[u8; 32]> {
    let key = match mode {
        SourceMode::MnemonicEntropy => {
            let indices = bip39::entropy_to_indices(entropy);
            let mut phrase = [0u8; bip39::MAX_PHRASE_LEN];
            let len = bip39::write_phrase(&indices, &mut phrase);
            let seed = pbkdf2_hmac_sha512(&phrase[..len], BIP39_SALT, BIP39_ROUNDS);
            bip32::derive_eth_key(&seed)
        }
        SourceMode::PrivateKey => *entropy,
    };
    let scalar = U256::from_be_bytes(&key);
    secp256k1::is_valid_scalar(&scalar).then_some(key)
}

/// Keccak-256 over the X||Y of the uncompressed public key (tag byte
/// stripped); the address is the last 20 bytes of the digest.
pub fn address_for_key(key: &[u8; 32]) -> Option<[u8; 20]> {
    let scalar = U256::from_be_bytes(key);
    let pubkey = secp256k1::pubkey_uncompressed(&scalar)?;
    let digest = keccak256(&pubkey[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&digest[12..]);
    Some(address)
}

pub fn derive_address(entropy: &[u8; 32], mode: SourceMode) -> Option<[u8; 20]> {
    let key = derive_private_key(entropy, mode)?;
    address_for_key(&key)
}
