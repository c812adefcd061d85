use crate::blinding::Blinding;
use crate::errors::Error;
use crate::helpers::{ensure, mod_inverse};
use core::fmt;
use num_bigint::BigUint;
use num_traits::Zero;
use std::sync::{Mutex, PoisonError};
use zeroize::Zeroize;


/// The public half of an RSA key: modulus `n` and public exponent `e`.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub(crate) n: BigUint,
    pub(crate) e: BigUint,
}


impl PublicKey {
    /// Builds a public key, rejecting zero components.
    ///
    /// # Errors
    /// Returns [`Error::KeyInvalid`] when `n` or `e` is zero.
    pub fn new(n: BigUint, e: BigUint) -> Result<Self, Error> {
        ensure!(!n.is_zero(), Error::KeyInvalid("modulus is zero"));
        ensure!(!e.is_zero(), Error::KeyInvalid("public exponent is zero"));
        Ok(PublicKey { n, e })
    }

    /// The modulus `n`.
    #[must_use]
    pub fn modulus(&self) -> &BigUint { &self.n }

    /// The public exponent `e`.
    #[must_use]
    pub fn exponent(&self) -> &BigUint { &self.e }

    /// Bit length of the modulus.
    #[must_use]
    pub fn modulus_bits(&self) -> usize { self.n.bits() }

    /// Octet length `k` of the modulus, computed as `bits(n) / 8` with the
    /// division rounding down. Generated moduli always have a bit count
    /// that is a multiple of eight, where floor and ceiling agree; for an
    /// imported modulus of odd bit length this deliberately keeps the
    /// floor, matching deployed implementations of this key format.
    #[must_use]
    pub fn octet_len(&self) -> usize { self.n.bits() / 8 }
}


impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey")
            .field("bits", &self.modulus_bits())
            .field("e", &self.e)
            .finish()
    }
}


/// The Chinese Remainder Theorem exponents and coefficient of a private
/// key: `dP = d mod (p-1)`, `dQ = d mod (q-1)`, `qInv = q^-1 mod p`.
#[derive(Clone, PartialEq, Eq, Zeroize)]
pub struct CrtComponents {
    pub(crate) dp: BigUint,
    pub(crate) dq: BigUint,
    pub(crate) qinv: BigUint,
}


impl CrtComponents {
    /// Derives the CRT components from `d`, `p`, and `q`.
    ///
    /// # Errors
    /// Returns [`Error::KeyInvalid`] when `q` is not invertible modulo `p`
    /// (which cannot happen for distinct primes) or any derived component
    /// comes out zero.
    pub fn derive(d: &BigUint, p: &BigUint, q: &BigUint) -> Result<Self, Error> {
        let dp = d % (p - 1u32);
        let dq = d % (q - 1u32);
        let qinv =
            mod_inverse(q, p).ok_or(Error::KeyInvalid("prime factors are not coprime"))?;
        let crt = CrtComponents { dp, dq, qinv };
        crt.validate()?;
        Ok(crt)
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        ensure!(!self.dp.is_zero(), Error::KeyInvalid("dP is zero"));
        ensure!(!self.dq.is_zero(), Error::KeyInvalid("dQ is zero"));
        ensure!(!self.qinv.is_zero(), Error::KeyInvalid("qInv is zero"));
        Ok(())
    }

    /// `dP = d mod (p-1)`.
    #[must_use]
    pub fn dp(&self) -> &BigUint { &self.dp }

    /// `dQ = d mod (q-1)`.
    #[must_use]
    pub fn dq(&self) -> &BigUint { &self.dq }

    /// `qInv = q^-1 mod p`.
    #[must_use]
    pub fn qinv(&self) -> &BigUint { &self.qinv }
}


impl fmt::Debug for CrtComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CrtComponents { .. }")
    }
}


/// A two-prime RSA private key with mandatory CRT components.
///
/// The public exponent `e` is retained because serialization requires it
/// and the blinding construction consumes it. Keys without full CRT
/// components are rejected at every construction path. Secret fields are
/// wiped on drop.
pub struct PrivateKey {
    pub(crate) n: BigUint,
    pub(crate) e: BigUint,
    pub(crate) d: BigUint,
    pub(crate) p: BigUint,
    pub(crate) q: BigUint,
    pub(crate) crt: CrtComponents,
    // Lazily initialized on the first private-key operation; the mutex is
    // held across a whole blind/exponentiate/unblind sequence so the
    // dirty-refresh transition is never observed half-done.
    pub(crate) blinding: Mutex<Option<Blinding>>,
}


impl PrivateKey {
    /// Builds a private key from `(n, e, d, p, q)`, deriving the CRT
    /// components.
    ///
    /// # Errors
    /// Returns [`Error::KeyInvalid`] when any component is zero or the CRT
    /// derivation fails.
    pub fn new(
        n: BigUint, e: BigUint, d: BigUint, p: BigUint, q: BigUint,
    ) -> Result<Self, Error> {
        let crt = CrtComponents::derive(&d, &p, &q)?;
        PrivateKey::from_components(n, e, d, p, q, crt)
    }

    /// Builds a private key from all eight numeric components, as decoded
    /// from a PKCS #1 / PKCS #8 structure.
    ///
    /// # Errors
    /// Returns [`Error::KeyInvalid`] when any component is zero; a key
    /// carrying only `n` and `d` cannot be represented.
    pub fn from_components(
        n: BigUint, e: BigUint, d: BigUint, p: BigUint, q: BigUint, crt: CrtComponents,
    ) -> Result<Self, Error> {
        ensure!(!n.is_zero(), Error::KeyInvalid("modulus is zero"));
        ensure!(!e.is_zero(), Error::KeyInvalid("public exponent is zero"));
        ensure!(!d.is_zero(), Error::KeyInvalid("private exponent is zero"));
        ensure!(!p.is_zero(), Error::KeyInvalid("prime p is zero"));
        ensure!(!q.is_zero(), Error::KeyInvalid("prime q is zero"));
        crt.validate()?;
        Ok(PrivateKey { n, e, d, p, q, crt, blinding: Mutex::new(None) })
    }

    /// The public key embedded in this private key.
    #[must_use]
    pub fn public_key(&self) -> PublicKey {
        PublicKey { n: self.n.clone(), e: self.e.clone() }
    }

    /// The modulus `n`.
    #[must_use]
    pub fn modulus(&self) -> &BigUint { &self.n }

    /// The public exponent `e`.
    #[must_use]
    pub fn public_exponent(&self) -> &BigUint { &self.e }

    /// The private exponent `d`.
    #[must_use]
    pub fn private_exponent(&self) -> &BigUint { &self.d }

    /// The first prime factor `p`.
    #[must_use]
    pub fn prime_p(&self) -> &BigUint { &self.p }

    /// The second prime factor `q`.
    #[must_use]
    pub fn prime_q(&self) -> &BigUint { &self.q }

    /// The CRT components.
    #[must_use]
    pub fn crt(&self) -> &CrtComponents { &self.crt }

    /// Bit length of the modulus.
    #[must_use]
    pub fn modulus_bits(&self) -> usize { self.n.bits() }

    /// Octet length `k` of the modulus; see [`PublicKey::octet_len`].
    #[must_use]
    pub fn octet_len(&self) -> usize { self.n.bits() / 8 }

    /// Cross-checks the numeric components of a key against each other,
    /// perhaps after it was deserialized from storage: `n = p * q`, the
    /// CRT values match `d` and the primes, and `e * d = 1` modulo
    /// `lcm(p-1, q-1)` (which both generation domains guarantee). This
    /// function is not intended to operate in constant time.
    #[must_use]
    pub fn validate_vartime(&self) -> bool {
        use num_traits::One;
        let one = BigUint::one();
        let p1 = &self.p - 1u32;
        let q1 = &self.q - 1u32;
        self.n == &self.p * &self.q
            && self.crt.dp == &self.d % &p1
            && self.crt.dq == &self.d % &q1
            && (&self.crt.qinv * &self.q) % &self.p == one
            && (&self.e * &self.d) % crate::helpers::lcm(&p1, &q1) == one
    }
}


impl Clone for PrivateKey {
    fn clone(&self) -> Self {
        // The clone starts with fresh (empty) blinding state; sharing a
        // blinding pair across keys would couple their refresh schedules.
        PrivateKey {
            n: self.n.clone(),
            e: self.e.clone(),
            d: self.d.clone(),
            p: self.p.clone(),
            q: self.q.clone(),
            crt: self.crt.clone(),
            blinding: Mutex::new(None),
        }
    }
}


impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.n == other.n
            && self.e == other.e
            && self.d == other.d
            && self.p == other.p
            && self.q == other.q
            && self.crt == other.crt
    }
}

impl Eq for PrivateKey {}


impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("bits", &self.modulus_bits())
            .field("e", &self.e)
            .finish_non_exhaustive()
    }
}


impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.d.zeroize();
        self.p.zeroize();
        self.q.zeroize();
        self.crt.zeroize();
        let slot = self.blinding.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(blinding) = slot.as_mut() {
            blinding.zeroize();
        }
    }
}

impl zeroize::ZeroizeOnDrop for PrivateKey {}
