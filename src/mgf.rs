use crate::errors::Error;
use crate::hash::HashAlg;
use crate::helpers::ensure;


/// MGF1 per RFC 8017 appendix B.2.1: the first `mask_len` octets of
/// `H(seed || C(0)) || H(seed || C(1)) || ...` where `C(i)` is the 4-octet
/// big-endian counter.
///
/// The mask ceiling is `2^31 - 1 - hLen`; RFC 8017 permits up to
/// `2^32 * hLen`, but nothing anywhere near either bound is reachable from
/// an RSA modulus, so the conservative limit is kept.
pub(crate) fn mgf1(hash: HashAlg, seed: &[u8], mask_len: usize) -> Result<Vec<u8>, Error> {
    let h_len = hash.output_len();
    ensure!((mask_len as u64) <= (1u64 << 31) - 1 - h_len as u64, Error::MaskTooLong);

    let blocks = (mask_len + h_len - 1) / h_len;
    let mut mask = Vec::with_capacity(blocks * h_len);
    for counter in 0..blocks {
        let c = u32::try_from(counter).map_err(|_| Error::MaskTooLong)?;
        mask.extend_from_slice(&hash.digest_parts(&[seed, &c.to_be_bytes()]));
    }
    mask.truncate(mask_len);
    Ok(mask)
}
