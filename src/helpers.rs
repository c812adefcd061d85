use num_bigint::{BigUint, ModInverse, RandBigInt};
use num_integer::Integer;
use rand_core::CryptoRngCore;


/// If the condition is not met, return the given error. Borrowed from the `anyhow` crate.
macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($err);
        }
    };
}

pub(crate) use ensure; // make available throughout crate


/// Least common multiple; `lcm(p-1, q-1)` is the Carmichael function of a
/// two-prime modulus.
#[must_use]
pub(crate) fn lcm(a: &BigUint, b: &BigUint) -> BigUint { a.lcm(b) }


/// Modular inverse of `a` modulo `m`, or `None` when `gcd(a, m) != 1`.
/// The underlying routine works in signed arithmetic; the result is always
/// reduced into `[0, m)` so the sign can be discarded.
#[must_use]
pub(crate) fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    a.mod_inverse(m).and_then(|inv| inv.to_biguint())
}


/// Rejection-samples an odd integer in `[low, high)` coprime to `reduction`.
/// Used for the random public-exponent policies and for the blinding factor.
pub(crate) fn gen_coprime_odd(
    rng: &mut impl CryptoRngCore, low: &BigUint, high: &BigUint, reduction: &BigUint,
) -> BigUint {
    loop {
        let candidate = rng.gen_biguint_range(low, high);
        if candidate.is_odd() && candidate.gcd(reduction) == BigUint::from(1u8) {
            return candidate;
        }
    }
}


/// In-place xor of a mask into a buffer. The two slices must be equal length.
pub(crate) fn xor_in_place(dst: &mut [u8], mask: &[u8]) {
    debug_assert_eq!(dst.len(), mask.len(), "xor operand length mismatch");
    for (d, m) in dst.iter_mut().zip(mask) {
        *d ^= m;
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;
    use rand_core::SeedableRng;

    #[test]
    fn lcm_small() {
        assert_eq!(lcm(&BigUint::from(12u8), &BigUint::from(18u8)), BigUint::from(36u8));
    }

    #[test]
    fn mod_inverse_round_trip() {
        let m = BigUint::from(65537u32);
        let a = BigUint::from(12345u32);
        let inv = mod_inverse(&a, &m).unwrap();
        assert!((a * inv) % m == BigUint::one());
    }

    #[test]
    fn mod_inverse_not_coprime() {
        assert!(mod_inverse(&BigUint::from(6u8), &BigUint::from(9u8)).is_none());
    }

    #[test]
    fn coprime_odd_draws_in_range() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
        let low = BigUint::from(1u8);
        let high = BigUint::from(1_000_000u32);
        let reduction = BigUint::from(277_200u32); // highly composite
        for _i in 0..50 {
            let v = gen_coprime_odd(&mut rng, &low, &high, &reduction);
            assert!(v >= low && v < high);
            assert!(v.is_odd());
            assert!(v.gcd(&reduction) == BigUint::one());
        }
    }

    #[test]
    fn xor_involution() {
        let mut buf = *b"hello world";
        let mask = [0x5a; 11];
        xor_in_place(&mut buf, &mask);
        assert_ne!(&buf, b"hello world");
        xor_in_place(&mut buf, &mask);
        assert_eq!(&buf, b"hello world");
    }
}
