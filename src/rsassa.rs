//! RSASSA-PSS per RFC 8017 section 8.1: the signing and verification
//! operations over [`PrivateKey`] and [`PublicKey`].

use crate::byte_fns::{i2osp, os2ip};
use crate::errors::Error;
use crate::hash::HashAlg;
use crate::helpers::ensure;
use crate::key::{PrivateKey, PublicKey};
use crate::primitives::{rsasp1, rsavp1};
use crate::pss::{emsa_pss_encode, emsa_pss_verify};
use rand_core::CryptoRngCore;

#[cfg(feature = "default-rng")]
use rand_core::OsRng;


/// Signature scheme parameters. PSS is the only scheme today; the enum
/// leaves room for others without breaking the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum SignatureParams {
    /// RSASSA-PSS with a message/encoding hash, an MGF1 hash, and a salt
    /// length in octets.
    Pss {
        /// Hash applied to the message and inside the PSS encoding.
        pss_hash: HashAlg,
        /// Hash driving MGF1.
        mgf_hash: HashAlg,
        /// Salt length in octets.
        salt_len: usize,
    },
}


impl SignatureParams {
    /// PSS parameters.
    #[must_use]
    pub fn pss(pss_hash: HashAlg, mgf_hash: HashAlg, salt_len: usize) -> Self {
        SignatureParams::Pss { pss_hash, mgf_hash, salt_len }
    }
}


impl Default for SignatureParams {
    /// PSS with SHA-1, MGF1-SHA-1, and a 20-octet salt: the baseline
    /// parameter set every deployed stack accepts.
    fn default() -> Self { SignatureParams::pss(HashAlg::Sha1, HashAlg::Sha1, 20) }
}


impl PrivateKey {
    /// RSASSA-PSS signing (RFC 8017 section 8.1.1): hash the message,
    /// PSS-encode to `bits(n) - 1` bits, apply RSASP1 on a blinded
    /// representative, and return the `k`-octet signature.
    ///
    /// # Errors
    /// Returns [`Error::IllegalArgument`] when the salt does not fit the
    /// modulus and [`Error::RandomGeneratorFailure`] when the RNG fails.
    pub fn try_sign_with_rng(
        &self, rng: &mut impl CryptoRngCore, params: &SignatureParams, msg: &[u8],
    ) -> Result<Vec<u8>, Error> {
        let SignatureParams::Pss { pss_hash, mgf_hash, salt_len } = *params;
        let em_bits = self.modulus_bits() - 1;
        let m_hash = pss_hash.digest(msg);
        let em = emsa_pss_encode(rng, &m_hash, em_bits, pss_hash, mgf_hash, salt_len)?;
        let s = self.blinded_op(rng, &os2ip(&em), rsasp1)?;
        i2osp(&s, self.octet_len())
    }

    /// RSASSA-PSS signing using the operating system RNG.
    ///
    /// # Errors
    /// As [`PrivateKey::try_sign_with_rng`].
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use rfc8017::{ExponentPolicy, HashAlg, KeyFactory, SignatureParams};
    ///
    /// let (public, private) =
    ///     KeyFactory::Carmichael.try_generate(1024, ExponentPolicy::Default)?;
    /// let params = SignatureParams::pss(HashAlg::Sha256, HashAlg::Sha256, 32);
    /// let sig = private.try_sign(&params, b"release v1.2.3")?;
    /// public.try_verify(&params, b"release v1.2.3", &sig)?;
    /// assert!(public.try_verify(&params, b"release v1.2.4", &sig).is_err());
    /// # Ok(())}
    /// ```
    #[cfg(feature = "default-rng")]
    pub fn try_sign(&self, params: &SignatureParams, msg: &[u8]) -> Result<Vec<u8>, Error> {
        self.try_sign_with_rng(&mut OsRng, params, msg)
    }
}


impl PublicKey {
    /// RSASSA-PSS verification (RFC 8017 section 8.1.2). The signature
    /// must be exactly `k` octets; the message representative is
    /// recovered with RSAVP1 into `ceil((bits(n) - 1) / 8)` octets and
    /// checked by EMSA-PSS. Every failure, including an out-of-range
    /// representative or an I2OSP overflow, maps to the one
    /// [`Error::InvalidSignature`].
    ///
    /// # Errors
    /// Returns [`Error::InvalidSignature`] as above.
    pub fn try_verify(
        &self, params: &SignatureParams, msg: &[u8], signature: &[u8],
    ) -> Result<(), Error> {
        let SignatureParams::Pss { pss_hash, mgf_hash, salt_len } = *params;
        ensure!(signature.len() == self.octet_len(), Error::InvalidSignature);
        let m = rsavp1(self, &os2ip(signature))?;
        let em_bits = self.modulus_bits() - 1;
        let em_len = (em_bits + 7) / 8;
        let em = i2osp(&m, em_len).map_err(|_| Error::InvalidSignature)?;
        let m_hash = pss_hash.digest(msg);
        emsa_pss_verify(&m_hash, &em, em_bits, pss_hash, mgf_hash, salt_len)
    }
}
