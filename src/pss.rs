use crate::errors::Error;
use crate::hash::HashAlg;
use crate::helpers::{ensure, xor_in_place};
use crate::mgf::mgf1;
use rand_core::CryptoRngCore;
use subtle::ConstantTimeEq;

const TRAILER: u8 = 0xBC;
const PAD1: [u8; 8] = [0u8; 8];


/// EMSA-PSS encoding per RFC 8017 section 9.1.1.
///
/// `m_hash` is the already-hashed message; the output `EM` has length
/// `ceil(em_bits / 8)` with the top `8 * emLen - em_bits` bits cleared and
/// the `0xBC` trailer in place.
pub(crate) fn emsa_pss_encode(
    rng: &mut impl CryptoRngCore, m_hash: &[u8], em_bits: usize, hash: HashAlg,
    mgf_hash: HashAlg, salt_len: usize,
) -> Result<Vec<u8>, Error> {
    let h_len = hash.output_len();
    let em_len = (em_bits + 7) / 8;
    debug_assert_eq!(m_hash.len(), h_len, "mHash must be a digest of the PSS hash");

    // 3: the modulus must accommodate hash, salt, separator, and trailer
    ensure!(
        em_len >= h_len + salt_len + 2,
        Error::IllegalArgument("salt too long for modulus"),
    );

    // 4: random salt
    let mut salt = vec![0u8; salt_len];
    rng.try_fill_bytes(&mut salt).map_err(|_| Error::RandomGeneratorFailure)?;

    // 5-6: H = Hash(0x00 * 8 || mHash || salt)
    let h = hash.digest_parts(&[&PAD1, m_hash, &salt]);

    // 7-8: DB = PS || 0x01 || salt, of length emLen - hLen - 1
    let db_len = em_len - h_len - 1;
    let mut db = vec![0u8; db_len];
    db[db_len - salt_len - 1] = 0x01;
    db[db_len - salt_len..].copy_from_slice(&salt);

    // 9-10: mask DB and clear the excess top bits
    xor_in_place(&mut db, &mgf1(mgf_hash, &h, db_len)?);
    db[0] &= 0xFF >> (8 * em_len - em_bits);

    // 11-12: EM = maskedDB || H || 0xBC
    let mut em = db;
    em.extend_from_slice(&h);
    em.push(TRAILER);
    Ok(em)
}


/// EMSA-PSS verification per RFC 8017 section 9.1.2.
///
/// The structural checks (trailer, top bits, padding zeros, separator) act
/// on public signature data; the final hash comparison is constant-time.
/// Every failure maps to the one [`Error::InvalidSignature`].
pub(crate) fn emsa_pss_verify(
    m_hash: &[u8], em: &[u8], em_bits: usize, hash: HashAlg, mgf_hash: HashAlg,
    salt_len: usize,
) -> Result<(), Error> {
    let h_len = hash.output_len();
    let em_len = (em_bits + 7) / 8;
    debug_assert_eq!(m_hash.len(), h_len, "mHash must be a digest of the PSS hash");

    // 3-4: geometry and trailer
    ensure!(em.len() == em_len, Error::InvalidSignature);
    ensure!(em_len >= h_len + salt_len + 2, Error::InvalidSignature);
    ensure!(em[em_len - 1] == TRAILER, Error::InvalidSignature);

    // 5-6: split EM and check the masked top bits are clear
    let db_len = em_len - h_len - 1;
    let (masked_db, rest) = em.split_at(db_len);
    let h = &rest[..h_len];
    let top_mask = 0xFF >> (8 * em_len - em_bits);
    ensure!(masked_db[0] & !top_mask == 0, Error::InvalidSignature);

    // 7-9: recover DB and clear the top bits again
    let mut db = masked_db.to_vec();
    xor_in_place(&mut db, &mgf1(mgf_hash, h, db_len)?);
    db[0] &= top_mask;

    // 10: DB must be PS (all zero) || 0x01 || salt
    let ps_len = em_len - h_len - salt_len - 2;
    ensure!(db[..ps_len].iter().all(|&b| b == 0), Error::InvalidSignature);
    ensure!(db[ps_len] == 0x01, Error::InvalidSignature);

    // 11-13: recompute H' over the recovered salt and compare in constant time
    let salt = &db[db_len - salt_len..];
    let h_prime = hash.digest_parts(&[&PAD1, m_hash, salt]);
    ensure!(bool::from(h.ct_eq(&h_prime)), Error::InvalidSignature);
    Ok(())
}
