//! Object identifiers: dotted-string parsing, the X.690 base-128 arc
//! encoding, and the `rsaEncryption` constant the key schemas pin.

use crate::errors::Error;
use crate::helpers::ensure;
use core::fmt;
use subtle::ConstantTimeEq;


/// The DER content octets of `rsaEncryption` (1.2.840.113549.1.1.1).
pub(crate) const RSA_ENCRYPTION_DER: [u8; 9] =
    [0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x01];


/// A validated object identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Oid {
    arcs: Vec<u64>,
}


impl Oid {
    /// Parses a dotted string such as `"1.2.840.113549.1.1.1"`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidOid`] when a component is not a
    /// non-negative integer or the arc constraints are violated.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let arcs = text
            .split('.')
            .map(|part| part.parse::<u64>().map_err(|_| Error::InvalidOid("non-numeric component")))
            .collect::<Result<Vec<u64>, Error>>()?;
        Oid::from_arcs(arcs)
    }

    /// Builds an identifier from raw arcs, enforcing that there are at
    /// least two, the first is at most 2, and the second at most 39.
    ///
    /// # Errors
    /// Returns [`Error::InvalidOid`] when the arc constraints are violated.
    pub fn from_arcs(arcs: Vec<u64>) -> Result<Self, Error> {
        ensure!(arcs.len() >= 2, Error::InvalidOid("fewer than two components"));
        ensure!(arcs[0] <= 2, Error::InvalidOid("first component above 2"));
        ensure!(arcs[1] <= 39, Error::InvalidOid("second component above 39"));
        Ok(Oid { arcs })
    }

    /// The `rsaEncryption` identifier, 1.2.840.113549.1.1.1.
    #[must_use]
    pub fn rsa_encryption() -> Self {
        Oid { arcs: vec![1, 2, 840, 113_549, 1, 1, 1] }
    }

    /// The arcs in dotted order.
    #[must_use]
    pub fn arcs(&self) -> &[u64] { &self.arcs }

    /// The DER content octets: the first two arcs fold into `40*a + b`,
    /// and every subidentifier is big-endian base-128 with the
    /// continuation bit set on all but its final octet (empty leading
    /// groups stripped).
    #[must_use]
    pub fn der_value(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.arcs.len() + 1);
        push_base128(&mut out, 40 * self.arcs[0] + self.arcs[1]);
        for &arc in &self.arcs[2..] {
            push_base128(&mut out, arc);
        }
        out
    }

    /// Decodes DER content octets back into an identifier, undoing the
    /// first-arc folding.
    ///
    /// # Errors
    /// Returns [`Error::InvalidOid`] for an empty encoding, a trailing
    /// continuation octet, an oversized subidentifier, or arcs that fail
    /// validation.
    pub fn from_der_value(value: &[u8]) -> Result<Self, Error> {
        ensure!(!value.is_empty(), Error::InvalidOid("empty encoding"));
        let mut subids = Vec::new();
        let mut acc: u64 = 0;
        for (i, &byte) in value.iter().enumerate() {
            ensure!(acc >> 57 == 0, Error::InvalidOid("subidentifier too large"));
            acc = (acc << 7) | u64::from(byte & 0x7F);
            if byte & 0x80 == 0 {
                subids.push(acc);
                acc = 0;
            } else {
                ensure!(i + 1 < value.len(), Error::InvalidOid("truncated subidentifier"));
            }
        }
        let (first, second) = match subids[0] {
            folded @ 0..=39 => (0, folded),
            folded @ 40..=79 => (1, folded - 40),
            folded => (2, folded - 80),
        };
        let mut arcs = vec![first, second];
        arcs.extend_from_slice(&subids[1..]);
        Oid::from_arcs(arcs)
    }

    /// Compares this identifier's encoding against raw DER content octets
    /// without short-circuiting on the first mismatch.
    #[must_use]
    pub fn matches_der(&self, value: &[u8]) -> bool {
        bool::from(self.der_value().ct_eq(value))
    }
}


impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arc) in self.arcs.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{arc}")?;
        }
        Ok(())
    }
}


fn push_base128(out: &mut Vec<u8>, mut value: u64) {
    let mut groups = [0u8; 10];
    let mut count = 0;
    loop {
        groups[count] = (value & 0x7F) as u8;
        value >>= 7;
        count += 1;
        if value == 0 {
            break;
        }
    }
    for i in (0..count).rev() {
        out.push(groups[i] | if i == 0 { 0 } else { 0x80 });
    }
}
