//! RSAES-OAEP per RFC 8017 section 7.1: the encryption and decryption
//! operations over [`PublicKey`] and [`PrivateKey`].

use crate::byte_fns::{i2osp, os2ip};
use crate::errors::Error;
use crate::hash::HashAlg;
use crate::helpers::ensure;
use crate::key::{PrivateKey, PublicKey};
use crate::oaep::{eme_oaep_decode, eme_oaep_encode};
use crate::primitives::{rsadp, rsaep};
use rand_core::CryptoRngCore;

#[cfg(feature = "default-rng")]
use rand_core::OsRng;


/// OAEP parameters: the label hash and the MGF1 hash. Both default to
/// SHA-1, the scheme's historical baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OaepParams {
    /// Hash applied to the (empty) label.
    pub label_hash: HashAlg,
    /// Hash driving MGF1.
    pub mgf_hash: HashAlg,
}


impl OaepParams {
    /// Parameters with an explicit label hash and MGF1 hash.
    #[must_use]
    pub fn new(label_hash: HashAlg, mgf_hash: HashAlg) -> Self {
        OaepParams { label_hash, mgf_hash }
    }
}


impl Default for OaepParams {
    fn default() -> Self { OaepParams::new(HashAlg::Sha1, HashAlg::Sha1) }
}


impl PublicKey {
    /// RSAES-OAEP encryption (RFC 8017 section 7.1.1): OAEP-encode the
    /// message to the modulus width, apply RSAEP, and return the `k`-octet
    /// ciphertext.
    ///
    /// # Errors
    /// Returns [`Error::MessageTooLong`] when the message exceeds
    /// `k - 2*hLen - 2` octets, and [`Error::RandomGeneratorFailure`] when
    /// the RNG fails.
    pub fn try_encrypt_with_rng(
        &self, rng: &mut impl CryptoRngCore, params: &OaepParams, msg: &[u8],
    ) -> Result<Vec<u8>, Error> {
        let k = self.octet_len();
        let em = eme_oaep_encode(rng, msg, k, params.label_hash, params.mgf_hash)?;
        let c = rsaep(self, &os2ip(&em))?;
        i2osp(&c, k)
    }

    /// RSAES-OAEP encryption using the operating system RNG.
    ///
    /// # Errors
    /// As [`PublicKey::try_encrypt_with_rng`].
    #[cfg(feature = "default-rng")]
    pub fn try_encrypt(&self, params: &OaepParams, msg: &[u8]) -> Result<Vec<u8>, Error> {
        self.try_encrypt_with_rng(&mut OsRng, params, msg)
    }
}


impl PrivateKey {
    /// RSAES-OAEP decryption (RFC 8017 section 7.1.2). The RSADP
    /// exponentiation runs on a blinded representative; the RNG only
    /// feeds the blinding setup on a key's first private operation.
    ///
    /// All padding failures, including a ciphertext of the wrong length
    /// or out of range, surface as one undifferentiated
    /// [`Error::Decryption`].
    ///
    /// # Errors
    /// Returns [`Error::Decryption`] as above, and
    /// [`Error::RandomGeneratorFailure`] if the blinding setup cannot
    /// draw randomness.
    pub fn try_decrypt_with_rng(
        &self, rng: &mut impl CryptoRngCore, params: &OaepParams, ciphertext: &[u8],
    ) -> Result<Vec<u8>, Error> {
        let k = self.octet_len();
        ensure!(ciphertext.len() == k, Error::Decryption);
        let c = os2ip(ciphertext);
        // The blinded representative is always reduced, so the range
        // check must happen before blinding.
        ensure!(&c < self.modulus(), Error::Decryption);
        let m = self.blinded_op(rng, &c, rsadp).map_err(|e| match e {
            Error::RandomGeneratorFailure => Error::RandomGeneratorFailure,
            _ => Error::Decryption,
        })?;
        let em = i2osp(&m, k).map_err(|_| Error::Decryption)?;
        eme_oaep_decode(&em, k, params.label_hash, params.mgf_hash)
    }

    /// RSAES-OAEP decryption using the operating system RNG for blinding
    /// setup.
    ///
    /// # Errors
    /// As [`PrivateKey::try_decrypt_with_rng`].
    #[cfg(feature = "default-rng")]
    pub fn try_decrypt(&self, params: &OaepParams, ciphertext: &[u8]) -> Result<Vec<u8>, Error> {
        self.try_decrypt_with_rng(&mut OsRng, params, ciphertext)
    }
}
