//! secp256k1 point arithmetic: y² = x³ + 7 over the prime field.
//!
//! Jacobian coordinates carry the hot path (one modular inverse per scalar
//! multiplication, at the terminal affine conversion); plain affine formulas
//! remain for table construction and as the slow reference ladder.

use once_cell::sync::Lazy;

use crate::math::bigint::{self, mod_add, mod_mul, mod_sqr, mod_sub, U256, N, P};

/// Generator x coordinate.
pub const GX: U256 = U256::new([
    0x16F8_1798,
    0x59F2_815B,
    0x2DCE_28D9,
    0x029B_FCDB,
    0xCE87_0B07,
    0x55A0_6295,
    0xF9DC_BBAC,
    0x79BE_667E,
]);

/// Generator y coordinate.
pub const GY: U256 = U256::new([
    0xFB10_D4B8,
    0x9C47_D08F,
    0xA685_5419,
    0xFD17_B448,
    0x0E11_08A8,
    0x5DA4_FBFC,
    0x26A3_C465,
    0x483A_DA77,
]);

/// Small multiples 1·G … 15·G, indexed by window value minus one. Built once
/// by repeated affine addition and shared read-only by every worker.
static SMALL_MULTIPLES: Lazy<[AffinePoint; 15]> = Lazy::new(|| {
    let g = AffinePoint { x: GX, y: GY };
    let mut table = [g; 15];
    for i in 1..table.len() {
        table[i] = table[i - 1].add(&g);
    }
    table
});

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AffinePoint {
    pub x: U256,
    pub y: U256,
}

impl AffinePoint {
    /// x = y = 0 stands in for the point at infinity in affine form.
    pub const INFINITY: AffinePoint = AffinePoint {
        x: U256::ZERO,
        y: U256::ZERO,
    };

    pub fn generator() -> AffinePoint {
        AffinePoint { x: GX, y: GY }
    }

    pub fn is_infinity(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }

    pub fn neg(&self) -> AffinePoint {
        AffinePoint {
            x: self.x,
            y: mod_sub(&U256::ZERO, &self.y, &P),
        }
    }

    /// General affine addition. One modular inverse per call; used for the
    /// precomputed table and the reference ladder, never in the window walk.
    pub fn add(&self, other: &AffinePoint) -> AffinePoint {
        if self.is_infinity() {
            return *other;
        }
        if other.is_infinity() {
            return *self;
        }
        if self.x == other.x {
            if self.y == other.y {
                return self.double();
            }
            // P + (-P)
            return AffinePoint::INFINITY;
        }
        let dx = mod_sub(&other.x, &self.x, &P);
        let dy = mod_sub(&other.y, &self.y, &P);
        let lambda = mod_mul(&dy, &bigint::mod_inv(&dx, &P));
        let x3 = mod_sub(&mod_sub(&mod_sqr(&lambda), &self.x, &P), &other.x, &P);
        let y3 = mod_sub(&mod_mul(&lambda, &mod_sub(&self.x, &x3, &P)), &self.y, &P);
        AffinePoint { x: x3, y: y3 }
    }

    pub fn double(&self) -> AffinePoint {
        if self.is_infinity() || self.y.is_zero() {
            return AffinePoint::INFINITY;
        }
        let xx = mod_sqr(&self.x);
        let num = mod_add(&mod_add(&xx, &xx, &P), &xx, &P);
        let den = mod_add(&self.y, &self.y, &P);
        let lambda = mod_mul(&num, &bigint::mod_inv(&den, &P));
        let two_x = mod_add(&self.x, &self.x, &P);
        let x3 = mod_sub(&mod_sqr(&lambda), &two_x, &P);
        let y3 = mod_sub(&mod_mul(&lambda, &mod_sub(&self.x, &x3, &P)), &self.y, &P);
        AffinePoint { x: x3, y: y3 }
    }

    /// Curve membership; diagnostic only.
    pub fn is_on_curve(&self) -> bool {
        if self.is_infinity() {
            return true;
        }
        let y2 = mod_sqr(&self.y);
        let x3 = mod_mul(&mod_sqr(&self.x), &self.x);
        y2 == mod_add(&x3, &U256::from_u64(7), &P)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct JacobianPoint {
    pub x: U256,
    pub y: U256,
    pub z: U256,
}

impl JacobianPoint {
    /// Z = 0 denotes infinity; (1, 1, 0) is the accumulator's initial state.
    pub const INFINITY: JacobianPoint = JacobianPoint {
        x: U256::ONE,
        y: U256::ONE,
        z: U256::ZERO,
    };

    pub fn from_affine(p: &AffinePoint) -> JacobianPoint {
        JacobianPoint {
            x: p.x,
            y: p.y,
            z: U256::ONE,
        }
    }

    pub fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }

    /// Doubling with the a = 0 simplification.
    pub fn double(&self) -> JacobianPoint {
        if self.is_infinity() || self.y.is_zero() {
            return JacobianPoint::INFINITY;
        }
        let xx = mod_sqr(&self.x);
        let yy = mod_sqr(&self.y);
        let yyyy = mod_sqr(&yy);

        // S = 2((X + YY)² - XX - YYYY)
        let mut s = mod_sqr(&mod_add(&self.x, &yy, &P));
        s = mod_sub(&s, &xx, &P);
        s = mod_sub(&s, &yyyy, &P);
        s = mod_add(&s, &s, &P);

        // M = 3·XX, T = M² - 2S
        let m = mod_add(&mod_add(&xx, &xx, &P), &xx, &P);
        let two_s = mod_add(&s, &s, &P);
        let x3 = mod_sub(&mod_sqr(&m), &two_s, &P);

        // Y3 = M(S - T) - 8·YYYY
        let mut eight_yyyy = mod_add(&yyyy, &yyyy, &P);
        eight_yyyy = mod_add(&eight_yyyy, &eight_yyyy, &P);
        eight_yyyy = mod_add(&eight_yyyy, &eight_yyyy, &P);
        let y3 = mod_sub(&mod_mul(&m, &mod_sub(&s, &x3, &P)), &eight_yyyy, &P);

        // Z3 = 2·Y·Z
        let yz = mod_mul(&self.y, &self.z);
        let z3 = mod_add(&yz, &yz, &P);

        JacobianPoint { x: x3, y: y3, z: z3 }
    }

    /// Mixed addition: `other` is affine (Z₂ = 1).
    pub fn add_affine(&self, other: &AffinePoint) -> JacobianPoint {
        if other.is_infinity() {
            return *self;
        }
        if self.is_infinity() {
            return JacobianPoint::from_affine(other);
        }
        let z1z1 = mod_sqr(&self.z);
        let u2 = mod_mul(&other.x, &z1z1);
        let s2 = mod_mul(&other.y, &mod_mul(&self.z, &z1z1));
        let h = mod_sub(&u2, &self.x, &P);
        let r_half = mod_sub(&s2, &self.y, &P);

        if h.is_zero() {
            if r_half.is_zero() {
                // Same point: fall through to doubling.
                return self.double();
            }
            // Opposite points.
            return JacobianPoint::INFINITY;
        }

        let hh = mod_sqr(&h);
        let mut i = mod_add(&hh, &hh, &P);
        i = mod_add(&i, &i, &P);
        let j = mod_mul(&h, &i);
        let v = mod_mul(&self.x, &i);
        let r = mod_add(&r_half, &r_half, &P);

        let two_v = mod_add(&v, &v, &P);
        let x3 = mod_sub(&mod_sub(&mod_sqr(&r), &j, &P), &two_v, &P);

        let yj = mod_mul(&self.y, &j);
        let two_yj = mod_add(&yj, &yj, &P);
        let y3 = mod_sub(&mod_mul(&r, &mod_sub(&v, &x3, &P)), &two_yj, &P);

        let mut z3 = mod_sqr(&mod_add(&self.z, &h, &P));
        z3 = mod_sub(&z3, &z1z1, &P);
        z3 = mod_sub(&z3, &hh, &P);

        JacobianPoint { x: x3, y: y3, z: z3 }
    }

    /// The single modular inverse of a scalar multiplication lives here.
    pub fn to_affine(&self) -> AffinePoint {
        if self.is_infinity() {
            return AffinePoint::INFINITY;
        }
        let zinv = bigint::mod_inv(&self.z, &P);
        let zinv2 = mod_sqr(&zinv);
        let zinv3 = mod_mul(&zinv2, &zinv);
        AffinePoint {
            x: mod_mul(&self.x, &zinv2),
            y: mod_mul(&self.y, &zinv3),
        }
    }
}

/// 0 < k < n.
pub fn is_valid_scalar(k: &U256) -> bool {
    !k.is_zero() && *k < N
}

/// k·G by 4-bit windows, most significant first: four doublings per window,
/// then a mixed add of the table entry. The first non-zero window lands on
/// the infinity accumulator and lifts the affine entry instead of adding.
pub fn scalar_mul_g(k: &U256) -> JacobianPoint {
    let table = &*SMALL_MULTIPLES;
    let mut acc = JacobianPoint::INFINITY;
    for byte in k.to_be_bytes() {
        for w in [byte >> 4, byte & 0x0F] {
            acc = acc.double().double().double().double();
            if w != 0 {
                acc = acc.add_affine(&table[(w - 1) as usize]);
            }
        }
    }
    acc
}

/// Bit-at-a-time affine ladder. Reference path; orders of magnitude slower
/// than the windowed walk.
pub fn scalar_mul_g_affine(k: &U256) -> AffinePoint {
    let g = AffinePoint::generator();
    let mut acc = AffinePoint::INFINITY;
    for i in (0..256).rev() {
        acc = acc.double();
        if k.bit(i) {
            acc = acc.add(&g);
        }
    }
    acc
}

/// 0x04 || X || Y, or None when k·G is the point at infinity (k ≡ 0 mod n).
pub fn pubkey_uncompressed(k: &U256) -> Option<[u8; 65]> {
    let p = scalar_mul_g(k).to_affine();
    if p.is_infinity() {
        return None;
    }
    let mut out = [0u8; 65];
    out[0] = 0x04;
    out[1..33].copy_from_slice(&p.x.to_be_bytes());
    out[33..65].copy_from_slice(&p.y.to_be_bytes());
    Some(out)
}

/// (0x02 | lsb(Y)) || X, the SEC1 compressed form BIP32 feeds into HMAC.
pub fn pubkey_compressed(k: &U256) -> Option<[u8; 33]> {
    let p = scalar_mul_g(k).to_affine();
    if p.is_infinity() {
        return None;
    }
    let mut out = [0u8; 33];
    out[0] = 0x02 | (p.y.limbs[0] & 1) as u8;
    out[1..33].copy_from_slice(&p.x.to_be_bytes());
    Some(out)
}
