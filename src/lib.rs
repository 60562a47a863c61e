//! vanity-pro: massively parallel Ethereum vanity-address miner.
//!
//! A random 256-bit entropy is fanned out across worker threads; each walks
//! a disjoint slice of the counter space, derives an address through the
//! full mnemonic pipeline (BIP39 → PBKDF2 → BIP32 → secp256k1 → Keccak-256)
//! and tests it against the requested condition. The first hit claims a
//! shared flag and publishes its entropy.
//!
//! Layout:
//! - `math`: 256-bit limb arithmetic and the secp256k1 point engine
//! - `hash`: SHA-256, SHA-512/HMAC, PBKDF2, Keccak-256
//! - `wallet`: BIP39 encoding, BIP32 derivation, the address pipeline
//! - `search`: condition encoding and the worker driver
//! - `api`: host-side orchestration (seeding, polling, timeout, decoding)

pub mod api;
pub mod error;
pub mod hash;
pub mod math;
pub mod search;
pub mod wallet;

pub use api::{search, SearchCondition, SearchRequest, SearchResponse};
pub use error::{Result, VanityError};
pub use search::condition::{
    parse_leading_zeros_condition, parse_pattern_condition, parse_prefix_condition,
    parse_suffix_condition, ConditionType, PatternConfig,
};
pub use search::{SearchConfig, SearchResult, SearchState};
pub use wallet::address::{derive_address, derive_private_key, SourceMode};
