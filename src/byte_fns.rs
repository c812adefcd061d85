use crate::errors::Error;
use crate::helpers::ensure;
use num_bigint::BigUint;
use num_traits::Zero;


/// I2OSP per RFC 8017 section 4.1: the big-endian octet string of length
/// `x_len` representing the non-negative integer `x`, left-padded with zero
/// octets. Fails when `x >= 256^x_len`.
///
/// `BigUint::to_bytes_be` emits the minimal magnitude with no sign octet,
/// so no sign stripping is needed before padding.
pub(crate) fn i2osp(x: &BigUint, x_len: usize) -> Result<Vec<u8>, Error> {
    if x.is_zero() {
        return Ok(vec![0u8; x_len]);
    }
    let bytes = x.to_bytes_be();
    ensure!(bytes.len() <= x_len, Error::IntegerTooLarge);
    let mut out = vec![0u8; x_len];
    out[x_len - bytes.len()..].copy_from_slice(&bytes);
    Ok(out)
}


/// OS2IP per RFC 8017 section 4.2: interpret an octet string as a
/// big-endian unsigned integer.
#[must_use]
pub(crate) fn os2ip(octets: &[u8]) -> BigUint { BigUint::from_bytes_be(octets) }
