use crate::errors::Error;
use crate::helpers::{ensure, gen_coprime_odd, lcm, mod_inverse};
use crate::key::{PrivateKey, PublicKey};
use crate::MIN_MODULUS_BITS;
use num_bigint::{BigUint, RandPrime};
use num_integer::Integer;
use num_traits::One;
use rand_core::CryptoRngCore;

#[cfg(feature = "default-rng")]
use rand_core::OsRng;


/// F4, the conventional public exponent.
const F4: u32 = 65537;

/// Modulus sizes admitted by [`ExponentPolicy::RandomStrict`].
const STRICT_MODULUS_BITS: [usize; 4] = [1024, 2048, 3072, 4096];


/// How the public exponent is chosen during key generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExponentPolicy {
    /// `e = 65537`.
    Default,
    /// Random odd `e` with `2^16 < e < n - 1`, coprime to the reduction.
    Random,
    /// Random odd `e` with `2^16 < e < 2^256`, coprime to the reduction;
    /// only 1024/2048/3072/4096-bit moduli and only the Carmichael
    /// factory.
    RandomStrict,
}


/// The modular-reduction domain used to compute the private exponent.
///
/// These are plain values, not stateful factories: every method takes its
/// inputs explicitly and two calls never share anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyFactory {
    /// `d = e^-1 mod lambda(n)` with `lambda(n) = lcm(p-1, q-1)`, as RFC
    /// 8017 appendix A specifies.
    Carmichael,
    /// `d = e^-1 mod phi(n)` with `phi(n) = (p-1)(q-1)`, the classic
    /// textbook construction. Produces interoperable keys; `d` is merely
    /// not minimal.
    Euler,
}


impl KeyFactory {
    fn reduction(self, p: &BigUint, q: &BigUint) -> BigUint {
        let p1 = p - 1u32;
        let q1 = q - 1u32;
        match self {
            KeyFactory::Carmichael => lcm(&p1, &q1),
            KeyFactory::Euler => p1 * q1,
        }
    }

    /// Generates an RSA keypair with an `nlen`-bit modulus.
    ///
    /// Primes are drawn at `nlen/2` bits until their product has exactly
    /// `nlen` bits; a candidate set is also discarded when the exponent
    /// policy cannot be satisfied or the private exponent comes out at or
    /// below `2^(nlen/2)`.
    ///
    /// # Errors
    /// Returns [`Error::IllegalArgument`] for a modulus below 1024 bits or
    /// an unsupported policy/factory/size combination, and
    /// [`Error::KeyInvalid`] if a generated candidate fails validation.
    pub fn try_generate_with_rng(
        self, rng: &mut impl CryptoRngCore, nlen: usize, policy: ExponentPolicy,
    ) -> Result<(PublicKey, PrivateKey), Error> {
        ensure!(
            nlen >= MIN_MODULUS_BITS,
            Error::IllegalArgument("modulus below 1024 bits"),
        );
        if policy == ExponentPolicy::RandomStrict {
            ensure!(
                self == KeyFactory::Carmichael,
                Error::IllegalArgument("strict exponent policy requires the Carmichael factory"),
            );
            ensure!(
                STRICT_MODULUS_BITS.contains(&nlen),
                Error::IllegalArgument("strict exponent policy supports 1024/2048/3072/4096-bit moduli"),
            );
        }

        let e_low = (BigUint::one() << 16) + 1u32; // exponents must exceed 2^16
        let d_floor = BigUint::one() << (nlen / 2);
        loop {
            let p = rng.gen_prime(nlen / 2);
            let q = rng.gen_prime(nlen / 2);
            if p == q {
                continue;
            }
            let n = &p * &q;
            if n.bits() != nlen {
                continue;
            }
            let reduction = self.reduction(&p, &q);

            let e = match policy {
                ExponentPolicy::Default => {
                    let e = BigUint::from(F4);
                    if e.gcd(&reduction) != BigUint::one() {
                        continue; // p-1 or q-1 divisible by 65537; redraw
                    }
                    e
                }
                ExponentPolicy::Random => {
                    gen_coprime_odd(rng, &e_low, &(&n - 1u32), &reduction)
                }
                ExponentPolicy::RandomStrict => {
                    gen_coprime_odd(rng, &e_low, &(BigUint::one() << 256), &reduction)
                }
            };

            let Some(d) = mod_inverse(&e, &reduction) else {
                continue;
            };
            // A small private exponent invites Boneh-Durfee style attacks;
            // reject and redraw the whole candidate set.
            if d <= d_floor {
                continue;
            }

            let private = PrivateKey::new(n.clone(), e.clone(), d, p, q)?;
            let public = PublicKey::new(n, e)?;
            return Ok((public, private));
        }
    }

    /// Generates an RSA keypair using the operating system RNG.
    ///
    /// # Errors
    /// As [`KeyFactory::try_generate_with_rng`].
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use rfc8017::{ExponentPolicy, KeyFactory, OaepParams};
    ///
    /// let (public, private) =
    ///     KeyFactory::Carmichael.try_generate(1024, ExponentPolicy::Default)?;
    /// assert_eq!(public.modulus_bits(), 1024);
    ///
    /// let params = OaepParams::default();
    /// let ct = public.try_encrypt(&params, b"attack at dawn")?;
    /// assert_eq!(private.try_decrypt(&params, &ct)?, b"attack at dawn");
    /// # Ok(())}
    /// ```
    #[cfg(feature = "default-rng")]
    pub fn try_generate(
        self, nlen: usize, policy: ExponentPolicy,
    ) -> Result<(PublicKey, PrivateKey), Error> {
        self.try_generate_with_rng(&mut OsRng, nlen, policy)
    }

    /// Recomputes the public key of `key` from its private exponent and
    /// prime factors: `e = d^-1 mod reduction`.
    ///
    /// The result equals the embedded public key only when `key` was
    /// produced under the same reduction domain (a Carmichael `d` inverted
    /// modulo phi(n) yields a different, though equivalent, exponent).
    ///
    /// # Errors
    /// Returns [`Error::KeyInvalid`] when `d` has no inverse under this
    /// factory's reduction.
    pub fn derive_public(self, key: &PrivateKey) -> Result<PublicKey, Error> {
        let reduction = self.reduction(key.prime_p(), key.prime_q());
        let e = mod_inverse(key.private_exponent(), &reduction)
            .ok_or(Error::KeyInvalid("private exponent is not invertible"))?;
        PublicKey::new(key.modulus().clone(), e)
    }
}
