use crate::errors::Error;
use crate::helpers::{gen_coprime_odd, lcm, mod_inverse};
use crate::key::PrivateKey;
use num_bigint::BigUint;
use num_traits::One;
use rand_core::CryptoRngCore;
use std::sync::PoisonError;
use zeroize::Zeroize;


/// Kocher blinding state for one private key.
///
/// The pair satisfies `vi = (vf^-1)^e mod n`, so for a ciphertext `c`,
/// `unblind(rsadp(blind(c))) = (c * vi)^d * vf = c^d * vf^(-e*d) * vf
/// = c^d mod n`. After each use the pair is marked dirty and the next use
/// squares both values, which preserves the invariant (squaring commutes
/// with inversion and exponentiation modulo n) at the cost of one modular
/// multiplication each instead of a fresh inversion.
#[derive(Zeroize)]
pub(crate) struct Blinding {
    vf: BigUint,
    vi: BigUint,
    n: BigUint,
    dirty: bool,
}


impl Blinding {
    /// Draws a fresh blinding pair for the key: an odd `vf` in `[1, n)`
    /// coprime to `lambda(n)`, and `vi = (vf^-1)^e mod n`.
    pub(crate) fn try_new_with_rng(
        rng: &mut impl CryptoRngCore, key: &PrivateKey,
    ) -> Result<Self, Error> {
        let reduction = lcm(&(&key.p - 1u32), &(&key.q - 1u32));
        let one = BigUint::one();
        loop {
            let vf = gen_coprime_odd(rng, &one, &key.n, &reduction);
            // Coprimality to lambda does not imply coprimality to n; a vf
            // sharing a factor with n has no inverse and is redrawn.
            let Some(vf_inv) = mod_inverse(&vf, &key.n) else {
                continue;
            };
            let vi = vf_inv.modpow(&key.e, &key.n);
            return Ok(Blinding { vf, vi, n: key.n.clone(), dirty: false });
        }
    }

    /// Multiplies the representative into the blinded domain. When the
    /// previous cycle left the state dirty, both values are refreshed by
    /// squaring first.
    pub(crate) fn blind(&mut self, x: &BigUint) -> BigUint {
        if self.dirty {
            self.vf = &self.vf * &self.vf % &self.n;
            self.vi = &self.vi * &self.vi % &self.n;
            self.dirty = false;
        }
        x * &self.vi % &self.n
    }

    /// Removes the blinding factor and marks the pair used.
    pub(crate) fn unblind(&mut self, y: &BigUint) -> BigUint {
        self.dirty = true;
        y * &self.vf % &self.n
    }
}


impl PrivateKey {
    /// Runs `op` on the blinded representative, holding the blinding lock
    /// across the whole blind / exponentiate / unblind sequence. The RNG
    /// is only consumed the first time a key is used, to set up the pair.
    pub(crate) fn blinded_op(
        &self, rng: &mut impl CryptoRngCore, x: &BigUint,
        op: impl FnOnce(&PrivateKey, &BigUint) -> Result<BigUint, Error>,
    ) -> Result<BigUint, Error> {
        let mut slot = self.blinding.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            *slot = Some(Blinding::try_new_with_rng(rng, self)?);
        }
        let blinding = slot.as_mut().expect("blinding state just initialized");
        let blinded = blinding.blind(x);
        let result = op(self, &blinded)?;
        Ok(blinding.unblind(&result))
    }
}
