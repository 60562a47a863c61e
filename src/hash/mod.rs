pub mod keccak;
pub mod pbkdf2;
pub mod sha256;
pub mod sha512;
