pub mod address;
pub mod bip32;
pub mod bip39;
