//! DER serialization of RSA keys: PKCS #1 `RSAPublicKey` and
//! `RSAPrivateKey` (two-prime, version 0), and the PKCS #8
//! `PrivateKeyInfo` envelope with the `rsaEncryption` algorithm
//! identifier.

use crate::der::{DerReader, DerWriter, Tag};
use crate::errors::Error;
use crate::helpers::ensure;
use crate::key::{CrtComponents, PrivateKey, PublicKey};
use crate::oid::Oid;


/// The serialization schemes a key can be written to or read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodingScheme {
    /// Bare PKCS #1: `RSAPublicKey` or `RSAPrivateKey`.
    Pkcs1,
    /// PKCS #8 `PrivateKeyInfo` wrapping the PKCS #1 private key.
    /// Private keys only.
    Pkcs8,
}


impl PublicKey {
    /// Encodes the key as `SEQUENCE { INTEGER n, INTEGER e }`.
    ///
    /// # Errors
    /// Returns [`Error::IllegalArgument`] for [`EncodingScheme::Pkcs8`];
    /// only the PKCS #1 form of a public key is supported.
    pub fn try_to_der(&self, scheme: EncodingScheme) -> Result<Vec<u8>, Error> {
        ensure!(
            scheme == EncodingScheme::Pkcs1,
            Error::IllegalArgument("public keys support the PKCS #1 scheme only"),
        );
        let mut writer = DerWriter::new();
        writer.write_sequence(|seq| {
            seq.write_integer(&self.n);
            seq.write_integer(&self.e);
        });
        Ok(writer.into_bytes())
    }

    /// Decodes a PKCS #1 `RSAPublicKey`.
    ///
    /// # Errors
    /// Returns [`Error::IllegalArgument`] for an unsupported scheme,
    /// [`Error::KeyDecoding`] for malformed DER, and [`Error::KeyInvalid`]
    /// for zero components.
    pub fn try_from_der(bytes: &[u8], scheme: EncodingScheme) -> Result<Self, Error> {
        ensure!(
            scheme == EncodingScheme::Pkcs1,
            Error::IllegalArgument("public keys support the PKCS #1 scheme only"),
        );
        let mut reader = DerReader::new(bytes);
        let body = reader.expect(Tag::Sequence)?;
        ensure!(reader.is_empty(), Error::KeyDecoding("Trailing data"));
        let mut seq = DerReader::new(&body);
        let n = seq.expect_integer()?;
        let e = seq.expect_integer()?;
        ensure!(seq.is_empty(), Error::KeyDecoding("Trailing data"));
        PublicKey::new(n, e)
    }
}


impl PrivateKey {
    /// Encodes the key, either as the bare PKCS #1 `RSAPrivateKey`
    /// (version 0, all eight integers) or wrapped in a PKCS #8
    /// `PrivateKeyInfo`.
    ///
    /// # Errors
    /// Returns [`Error::KeyEncoding`] when the serializer fails
    /// internally.
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use rfc8017::{EncodingScheme, ExponentPolicy, KeyFactory, PrivateKey};
    ///
    /// let (_, private) =
    ///     KeyFactory::Carmichael.try_generate(1024, ExponentPolicy::Default)?;
    /// let der = private.try_to_der(EncodingScheme::Pkcs8)?;
    /// let restored = PrivateKey::try_from_der(&der, EncodingScheme::Pkcs8)?;
    /// assert_eq!(restored, private);
    /// # Ok(())}
    /// ```
    pub fn try_to_der(&self, scheme: EncodingScheme) -> Result<Vec<u8>, Error> {
        let pkcs1 = self.pkcs1_body();
        match scheme {
            EncodingScheme::Pkcs1 => Ok(pkcs1),
            EncodingScheme::Pkcs8 => {
                let mut writer = DerWriter::new();
                writer.write_sequence(|info| {
                    info.write_integer(&num_bigint::BigUint::from(0u8));
                    info.write_sequence(|alg| {
                        alg.write_tlv(Tag::ObjectIdentifier, &Oid::rsa_encryption().der_value());
                        alg.write_null();
                    });
                    info.write_tlv(Tag::OctetString, &pkcs1);
                });
                Ok(writer.into_bytes())
            }
        }
    }

    /// Decodes a private key from either scheme. The PKCS #8 path
    /// enforces version 0 and the `rsaEncryption` algorithm identifier
    /// (compared without short-circuiting); both paths reject keys whose
    /// CRT components are absent or zero.
    ///
    /// # Errors
    /// Returns [`Error::KeyDecoding`] for malformed DER and
    /// [`Error::KeyInvalid`] for zero or missing components.
    pub fn try_from_der(bytes: &[u8], scheme: EncodingScheme) -> Result<Self, Error> {
        match scheme {
            EncodingScheme::Pkcs1 => Self::from_pkcs1_body(bytes),
            EncodingScheme::Pkcs8 => {
                let mut reader = DerReader::new(bytes);
                let body = reader.expect(Tag::Sequence)?;
                ensure!(reader.is_empty(), Error::KeyDecoding("Trailing data"));
                let mut info = DerReader::new(&body);
                info.expect_version(0)?;

                let alg_body = info.expect(Tag::Sequence)?;
                let mut alg = DerReader::new(&alg_body);
                let oid_value = alg.expect(Tag::ObjectIdentifier)?;
                ensure!(
                    Oid::rsa_encryption().matches_der(&oid_value),
                    Error::KeyDecoding("Unsupported algorithm"),
                );
                alg.expect_null()?;
                ensure!(alg.is_empty(), Error::KeyDecoding("Trailing data"));

                let key_octets = info.expect(Tag::OctetString)?;
                ensure!(info.is_empty(), Error::KeyDecoding("Trailing data"));
                Self::from_pkcs1_body(&key_octets)
            }
        }
    }

    /// `RSAPrivateKey ::= SEQUENCE { version, n, e, d, p, q, dP, dQ, qInv }`.
    fn pkcs1_body(&self) -> Vec<u8> {
        let mut writer = DerWriter::new();
        writer.write_sequence(|seq| {
            seq.write_integer(&num_bigint::BigUint::from(0u8)); // two-prime
            seq.write_integer(&self.n);
            seq.write_integer(&self.e);
            seq.write_integer(&self.d);
            seq.write_integer(&self.p);
            seq.write_integer(&self.q);
            seq.write_integer(&self.crt.dp);
            seq.write_integer(&self.crt.dq);
            seq.write_integer(&self.crt.qinv);
        });
        writer.into_bytes()
    }

    fn from_pkcs1_body(bytes: &[u8]) -> Result<Self, Error> {
        let mut reader = DerReader::new(bytes);
        let body = reader.expect(Tag::Sequence)?;
        ensure!(reader.is_empty(), Error::KeyDecoding("Trailing data"));
        let mut seq = DerReader::new(&body);
        seq.expect_version(0)?;
        let n = seq.expect_integer()?;
        let e = seq.expect_integer()?;
        let d = seq.expect_integer()?;
        let p = seq.expect_integer()?;
        let q = seq.expect_integer()?;
        let dp = seq.expect_integer()?;
        let dq = seq.expect_integer()?;
        let qinv = seq.expect_integer()?;
        ensure!(seq.is_empty(), Error::KeyDecoding("Trailing data"));
        PrivateKey::from_components(n, e, d, p, q, CrtComponents { dp, dq, qinv })
    }
}


#[cfg(test)]
mod tests {
    use super::EncodingScheme;
    use crate::errors::Error;
    use crate::key::{PrivateKey, PublicKey};
    use num_bigint::BigUint;

    fn b(x: u32) -> BigUint { BigUint::from(x) }

    fn toy_key() -> PrivateKey {
        PrivateKey::new(b(3233), b(17), b(413), b(61), b(53)).unwrap()
    }

    #[test]
    fn public_round_trip() {
        let public = PublicKey::new(b(3233), b(17)).unwrap();
        let der = public.try_to_der(EncodingScheme::Pkcs1).unwrap();
        assert_eq!(PublicKey::try_from_der(&der, EncodingScheme::Pkcs1).unwrap(), public);
    }

    #[test]
    fn public_pkcs8_unsupported() {
        let public = PublicKey::new(b(3233), b(17)).unwrap();
        assert!(matches!(
            public.try_to_der(EncodingScheme::Pkcs8),
            Err(Error::IllegalArgument(_))
        ));
        assert!(matches!(
            PublicKey::try_from_der(&[0x30, 0x00], EncodingScheme::Pkcs8),
            Err(Error::IllegalArgument(_))
        ));
    }

    #[test]
    fn private_round_trips_both_schemes() {
        let key = toy_key();
        for scheme in [EncodingScheme::Pkcs1, EncodingScheme::Pkcs8] {
            let der = key.try_to_der(scheme).unwrap();
            let back = PrivateKey::try_from_der(&der, scheme).unwrap();
            assert_eq!(back, key, "{scheme:?}");
        }
    }

    #[test]
    fn pkcs8_inner_octets_are_pkcs1() {
        let key = toy_key();
        let pkcs8 = key.try_to_der(EncodingScheme::Pkcs8).unwrap();
        let pkcs1 = key.try_to_der(EncodingScheme::Pkcs1).unwrap();
        // The PKCS #1 body appears verbatim inside the OCTET STRING.
        assert!(
            pkcs8.windows(pkcs1.len()).any(|w| w == &pkcs1[..]),
            "PKCS #8 envelope must contain the PKCS #1 encoding"
        );
    }

    #[test]
    fn known_toy_encoding() {
        // n = 3233 = 0x0CA1, e = 17: 30 07 02 02 0C A1 02 01 11
        let public = PublicKey::new(b(3233), b(17)).unwrap();
        let der = public.try_to_der(EncodingScheme::Pkcs1).unwrap();
        assert_eq!(der, [0x30, 0x07, 0x02, 0x02, 0x0C, 0xA1, 0x02, 0x01, 0x11]);
    }

    #[test]
    fn truncated_der_rejected() {
        let key = toy_key();
        let der = key.try_to_der(EncodingScheme::Pkcs8).unwrap();
        for cut in 0..der.len() {
            assert!(
                matches!(
                    PrivateKey::try_from_der(&der[..cut], EncodingScheme::Pkcs8),
                    Err(Error::KeyDecoding(_))
                ),
                "prefix of {cut} octets must fail"
            );
        }
    }

    #[test]
    fn trailing_garbage_rejected() {
        let key = toy_key();
        let mut der = key.try_to_der(EncodingScheme::Pkcs1).unwrap();
        der.push(0x00);
        assert!(matches!(
            PrivateKey::try_from_der(&der, EncodingScheme::Pkcs1),
            Err(Error::KeyDecoding(_))
        ));
    }

    #[test]
    fn wrong_algorithm_oid_rejected() {
        let key = toy_key();
        let mut der = key.try_to_der(EncodingScheme::Pkcs8).unwrap();
        // The OID content starts after SEQ, version, SEQ, OID headers;
        // locate the rsaEncryption bytes and flip the last arc.
        let pos = der
            .windows(9)
            .position(|w| w == crate::oid::RSA_ENCRYPTION_DER)
            .unwrap();
        der[pos + 8] = 0x02;
        assert_eq!(
            PrivateKey::try_from_der(&der, EncodingScheme::Pkcs8),
            Err(Error::KeyDecoding("Unsupported algorithm"))
        );
    }
}
