//! The mnemonic pipeline against the published BIP39 vectors and the
//! bip39/bip32/k256/sha3 reference stack.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use vanity_pro::hash::pbkdf2::{pbkdf2_hmac_sha512, BIP39_ROUNDS, BIP39_SALT};
use vanity_pro::wallet::address::{derive_address, derive_private_key, SourceMode};
use vanity_pro::wallet::bip32 as wallet_bip32;
use vanity_pro::wallet::bip39::{
    entropy_to_indices, indices_to_entropy, phrase_string, write_phrase, MAX_PHRASE_LEN,
};

/// m/44'/60'/0'/0/0 through the bip32 crate.
fn reference_eth_key(seed: &[u8; 64]) -> [u8; 32] {
    let mut xprv = bip32::XPrv::new(seed).unwrap();
    for (index, hardened) in [(44u32, true), (60, true), (0, true), (0, false), (0, false)] {
        xprv = xprv
            .derive_child(bip32::ChildNumber::new(index, hardened).unwrap())
            .unwrap();
    }
    xprv.to_bytes().into()
}

fn reference_address(key: &[u8; 32]) -> [u8; 20] {
    use k256::elliptic_curve::sec1::ToEncodedPoint;
    use sha3::Digest;
    let secret = k256::SecretKey::from_slice(key).unwrap();
    let point = secret.public_key().to_encoded_point(false);
    let digest = sha3::Keccak256::digest(&point.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&digest[12..]);
    address
}

#[test]
fn zero_entropy_mnemonic() {
    let indices = entropy_to_indices(&[0u8; 32]);
    assert_eq!(&indices[..23], &[0u16; 23]);
    assert_eq!(indices[23], 102);
    let phrase = phrase_string(&indices);
    assert_eq!(
        phrase,
        "abandon abandon abandon abandon abandon abandon abandon abandon \
         abandon abandon abandon abandon abandon abandon abandon abandon \
         abandon abandon abandon abandon abandon abandon abandon art"
    );
}

#[test]
fn zero_entropy_trezor_seed_vector() {
    // Published BIP39 vector for the all-zero 256-bit entropy with the
    // TREZOR passphrase; the salt parameter exists exactly for this check.
    let indices = entropy_to_indices(&[0u8; 32]);
    let mut phrase = [0u8; MAX_PHRASE_LEN];
    let len = write_phrase(&indices, &mut phrase);
    let seed = pbkdf2_hmac_sha512(&phrase[..len], b"mnemonicTREZOR", BIP39_ROUNDS);
    assert_eq!(
        hex::encode(seed),
        "bda85446c68413707090a52022edd26a1c9462295029f2e60cd7c4f2bbd3097170af7a4d73245cafa9c3cca8d561a7c3de6f5d4a10be8ed2a5e608d68f92fcc8"
    );
}

#[test]
fn zero_entropy_full_pipeline_golden() {
    // The leaf of m/44'/60'/0'/0/0 for the zero-entropy mnemonic with no
    // passphrase, pinned end to end.
    let key = derive_private_key(&[0u8; 32], SourceMode::MnemonicEntropy).unwrap();
    assert_eq!(
        hex::encode(key),
        "1053fae1b3ac64f178bcc21026fd06a3f4544ec2f35338b001f02d1d8efa3d5f"
    );
    let address = derive_address(&[0u8; 32], SourceMode::MnemonicEntropy).unwrap();
    assert_eq!(
        hex::encode(address),
        "f278cf59f82edcf871d630f28ecc8056f25c1cdb"
    );
}

#[test]
fn seed_matches_bip39_crate() {
    let mut rng = StdRng::seed_from_u64(0xB1B3_9EED);
    for _ in 0..8 {
        let mut entropy = [0u8; 32];
        rng.fill_bytes(&mut entropy);

        let indices = entropy_to_indices(&entropy);
        let mut phrase = [0u8; MAX_PHRASE_LEN];
        let len = write_phrase(&indices, &mut phrase);
        let ours = pbkdf2_hmac_sha512(&phrase[..len], BIP39_SALT, BIP39_ROUNDS);

        let mnemonic = bip39::Mnemonic::from_entropy(&entropy).unwrap();
        assert_eq!(phrase_string(&indices), mnemonic.to_string());
        assert_eq!(ours, mnemonic.to_seed(""));
    }
}

#[test]
fn roundtrip_on_random_entropy() {
    let mut rng = StdRng::seed_from_u64(0x0DDB_A115);
    for _ in 0..64 {
        let mut entropy = [0u8; 32];
        rng.fill_bytes(&mut entropy);
        let indices = entropy_to_indices(&entropy);
        assert!(indices.iter().all(|&i| i < 2048));
        assert_eq!(indices_to_entropy(&indices), Some(entropy));
    }
}

#[test]
fn derivation_matches_bip32_crate() {
    let mut rng = StdRng::seed_from_u64(0xB1B3_2BED);
    for _ in 0..4 {
        let mut seed = [0u8; 64];
        rng.fill_bytes(&mut seed);
        assert_eq!(wallet_bip32::derive_eth_key(&seed), reference_eth_key(&seed));
    }
}

#[test]
fn master_key_matches_bip32_crate() {
    let seed = [0x3Cu8; 64];
    let ours = wallet_bip32::master_key(&seed);
    let xprv = bip32::XPrv::new(&seed).unwrap();
    let theirs: [u8; 32] = xprv.to_bytes().into();
    assert_eq!(ours.key, theirs);
}

#[test]
fn full_pipeline_matches_reference_stack() {
    let mut rng = StdRng::seed_from_u64(0xE7E7_E7E7);
    for _ in 0..3 {
        let mut entropy = [0u8; 32];
        rng.fill_bytes(&mut entropy);

        let key = derive_private_key(&entropy, SourceMode::MnemonicEntropy).unwrap();
        let address = derive_address(&entropy, SourceMode::MnemonicEntropy).unwrap();

        let mnemonic = bip39::Mnemonic::from_entropy(&entropy).unwrap();
        let seed = mnemonic.to_seed("");
        let expected_key = reference_eth_key(&seed);
        assert_eq!(key, expected_key);
        assert_eq!(address, reference_address(&expected_key));
    }
}

#[test]
fn private_key_mode_matches_reference() {
    let mut rng = StdRng::seed_from_u64(0x9999_0001);
    let mut verified = 0;
    while verified < 4 {
        let mut key = [0u8; 32];
        rng.fill_bytes(&mut key);
        let Some(address) = derive_address(&key, SourceMode::PrivateKey) else {
            continue;
        };
        assert_eq!(address, reference_address(&key));
        verified += 1;
    }
}
