pub mod bigint;
pub mod secp256k1;
