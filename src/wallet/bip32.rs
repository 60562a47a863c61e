//! BIP32 private-key derivation, restricted to what the Ethereum path
//! needs: master key from seed, hardened and non-hardened children,
//! private keys only.

use crate::hash::sha512::HmacSha512;
use crate::math::bigint::{self, U256};
use crate::math::secp256k1;

pub const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

pub const HARDENED: u32 = 0x8000_0000;

/// m/44'/60'/0'/0/0
pub const ETH_DERIVATION_PATH: [u32; 5] = [44 | HARDENED, 60 | HARDENED, HARDENED, 0, 0];

#[derive(Clone, Copy)]
pub struct ExtendedKey {
    pub key: [u8; 32],
    pub chain_code: [u8; 32],
}

impl ExtendedKey {
    fn from_hmac(output: [u8; 64]) -> Self {
        let mut key = [0u8; 32];
        let mut chain_code = [0u8; 32];
        key.copy_from_slice(&output[..32]);
        chain_code.copy_from_slice(&output[32..]);
        Self { key, chain_code }
    }

    /// A zeroed key marks a degenerate node (IL out of range, or a
    /// non-hardened step below an already degenerate parent).
    pub fn is_degenerate(&self) -> bool {
        self.key.iter().all(|&b| b == 0)
    }
}

pub fn master_key(seed: &[u8; 64]) -> ExtendedKey {
    let node = ExtendedKey::from_hmac(HmacSha512::new(MASTER_HMAC_KEY).mac(seed));
    let il = U256::from_be_bytes(&node.key);
    if !secp256k1::is_valid_scalar(&il) {
        return ExtendedKey {
            key: [0u8; 32],
            chain_code: node.chain_code,
        };
    }
    node
}

/// One child step. Non-hardened indices pay for a scalar multiplication to
/// form the compressed parent public key, per the standard. An IL ≥ n or
/// IL = 0 child is zeroed and carried forward; the caller discards it when
/// the derived key fails scalar validation downstream.
pub fn derive_child(parent: &ExtendedKey, index: u32) -> ExtendedKey {
    if parent.is_degenerate() {
        return *parent;
    }
    let mut data = [0u8; 37];
    if index >= HARDENED {
        data[0] = 0x00;
        data[1..33].copy_from_slice(&parent.key);
    } else {
        let parent_scalar = U256::from_be_bytes(&parent.key);
        match secp256k1::pubkey_compressed(&parent_scalar) {
            Some(compressed) => data[..33].copy_from_slice(&compressed),
            None => {
                return ExtendedKey {
                    key: [0u8; 32],
                    chain_code: parent.chain_code,
                }
            }
        }
    }
    data[33..37].copy_from_slice(&index.to_be_bytes());

    let output = HmacSha512::new(&parent.chain_code).mac(&data);
    let child = ExtendedKey::from_hmac(output);

    let il = U256::from_be_bytes(&child.key);
    if !secp256k1::is_valid_scalar(&il) {
        return ExtendedKey {
            key: [0u8; 32],
            chain_code: child.chain_code,
        };
    }

    let parent_scalar = U256::from_be_bytes(&parent.key);
    let tweaked = bigint::mod_add_n(&parent_scalar, &il);
    ExtendedKey {
        key: tweaked.to_be_bytes(),
        chain_code: child.chain_code,
    }
}

/// Walk the fixed Ethereum path and return the leaf private key.
pub fn derive_eth_key(seed: &[u8; 64]) -> [u8; 32] {
    let mut node = master_key(seed);
    for index in ETH_DERIVATION_PATH {
        node = derive_child(&node, index);
    }
    node.key
}
