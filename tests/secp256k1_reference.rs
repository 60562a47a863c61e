//! Point-engine checks against published curve vectors and the k256
//! implementation as an independent oracle.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use vanity_pro::math::bigint::{self, U256};
use vanity_pro::math::secp256k1::{
    is_valid_scalar, pubkey_uncompressed, scalar_mul_g, scalar_mul_g_affine, AffinePoint,
    JacobianPoint,
};

const GX_HEX: &str = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
const GY_HEX: &str = "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";
const G2X_HEX: &str = "c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5";
const G2Y_HEX: &str = "1ae168fea63dc339a3c58419466ceaeef7f632653266d0e1236431a950cfe52a";

fn scalar(hex_str: &str) -> U256 {
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(hex_str, &mut bytes).unwrap();
    U256::from_be_bytes(&bytes)
}

#[test]
fn k_equals_one_is_generator() {
    let pubkey = pubkey_uncompressed(&U256::ONE).unwrap();
    assert_eq!(pubkey[0], 0x04);
    assert_eq!(hex::encode(&pubkey[1..33]), GX_HEX);
    assert_eq!(hex::encode(&pubkey[33..65]), GY_HEX);
}

#[test]
fn k_equals_two_is_double_g() {
    let pubkey = pubkey_uncompressed(&U256::from_u64(2)).unwrap();
    assert_eq!(hex::encode(&pubkey[1..33]), G2X_HEX);
    assert_eq!(hex::encode(&pubkey[33..65]), G2Y_HEX);

    // Affine and Jacobian doubling agree with the pinned vector too.
    let g = AffinePoint::generator();
    assert_eq!(hex::encode(g.double().x.to_be_bytes()), G2X_HEX);
    let j = JacobianPoint::from_affine(&g).double().to_affine();
    assert_eq!(hex::encode(j.y.to_be_bytes()), G2Y_HEX);
}

#[test]
fn both_scalar_paths_agree_on_random_scalars() {
    let mut rng = StdRng::seed_from_u64(0x5ECB_256C);
    for _ in 0..12 {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        let k = U256::from_be_bytes(&bytes);
        if !is_valid_scalar(&k) {
            continue;
        }
        let windowed = scalar_mul_g(&k).to_affine();
        let ladder = scalar_mul_g_affine(&k);
        assert_eq!(windowed, ladder);
    }
}

#[test]
fn matches_k256_on_random_scalars() {
    let mut rng = StdRng::seed_from_u64(0xACC0_1ADE);
    let mut verified = 0;
    while verified < 16 {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        let k = U256::from_be_bytes(&bytes);
        if !is_valid_scalar(&k) {
            continue;
        }
        let ours = pubkey_uncompressed(&k).unwrap();
        let secret = k256::SecretKey::from_slice(&bytes).unwrap();
        let theirs = secret.public_key().to_encoded_point(false);
        assert_eq!(&ours[..], theirs.as_bytes());
        verified += 1;
    }
}

#[test]
fn boundary_scalars() {
    // n - 1 is the largest valid scalar; (n-1)·G = -G, sharing G's x.
    let n_minus_1 = bigint::N.sub_with_borrow(&U256::ONE).0;
    let pubkey = pubkey_uncompressed(&n_minus_1).unwrap();
    assert_eq!(hex::encode(&pubkey[1..33]), GX_HEX);
    assert_ne!(hex::encode(&pubkey[33..65]), GY_HEX);

    let secret = k256::SecretKey::from_slice(&n_minus_1.to_be_bytes()).unwrap();
    let theirs = secret.public_key().to_encoded_point(false);
    assert_eq!(&pubkey[..], theirs.as_bytes());
}

#[test]
fn nibble_edge_scalars() {
    // Exercise every window value, including runs of zero windows.
    for hex_str in [
        "000000000000000000000000000000000000000000000000000000000000000f",
        "0000000000000000000000000000000000000000000000000000000000000010",
        "00000000000000000000000000000000000000000000000000000000000000f0",
        "0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f",
        "f000000000000000000000000000000000000000000000000000000000000001",
        "8000000000000000000000000000000000000000000000000000000000000000",
    ] {
        let k = scalar(hex_str);
        let ours = pubkey_uncompressed(&k).unwrap();
        let secret = k256::SecretKey::from_slice(&k.to_be_bytes()).unwrap();
        let theirs = secret.public_key().to_encoded_point(false);
        assert_eq!(&ours[..], theirs.as_bytes(), "mismatch for {hex_str}");
    }
}

#[test]
fn modular_inverse_on_random_field_elements() {
    let mut rng = StdRng::seed_from_u64(0x1234_5678);
    for _ in 0..32 {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        let mut a = U256::from_be_bytes(&bytes);
        if a >= bigint::P {
            a = a.sub_with_borrow(&bigint::P).0;
        }
        if a.is_zero() {
            continue;
        }
        let inv = bigint::mod_inv(&a, &bigint::P);
        assert_eq!(bigint::mod_mul(&a, &inv), U256::ONE);
    }
}

#[test]
fn point_group_laws_on_random_points() {
    let mut rng = StdRng::seed_from_u64(0xD00D_F00D);
    for _ in 0..6 {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        let k = U256::from_be_bytes(&bytes);
        if !is_valid_scalar(&k) {
            continue;
        }
        let p = scalar_mul_g(&k).to_affine();
        assert!(p.is_on_curve());
        assert_eq!(p.double(), p.add(&p));
        assert!(p.add(&p.neg()).is_infinity());
        assert_eq!(p.add(&AffinePoint::INFINITY), p);

        let j = JacobianPoint::from_affine(&p);
        assert_eq!(j.double().to_affine(), p.double());
        assert!(j.add_affine(&p.neg()).is_infinity());
    }
}
