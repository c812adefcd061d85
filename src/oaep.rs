use crate::errors::Error;
use crate::hash::HashAlg;
use crate::helpers::{ensure, xor_in_place};
use crate::mgf::mgf1;
use rand_core::CryptoRngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};


/// EME-OAEP encoding per RFC 8017 section 7.1.1 steps 1-2.
///
/// Output: `EM = 0x00 || maskedSeed || maskedDB` of length `k`, where
/// `DB = lHash || PS || 0x01 || M` and both halves are masked with MGF1.
/// The label is always empty, so `lHash` is the precomputed empty digest.
pub(crate) fn eme_oaep_encode(
    rng: &mut impl CryptoRngCore, msg: &[u8], k: usize, label_hash: HashAlg, mgf_hash: HashAlg,
) -> Result<Vec<u8>, Error> {
    let h_len = label_hash.output_len();

    // 1: length check. The modulus must leave room for both hashes, the
    // 0x01 separator, and the leading zero octet.
    let capacity = k.checked_sub(2 * h_len + 2).ok_or(Error::MessageTooLong)?;
    ensure!(msg.len() <= capacity, Error::MessageTooLong);

    // 2b: DB = lHash || PS || 0x01 || M, of length k - hLen - 1
    let db_len = k - h_len - 1;
    let mut db = vec![0u8; db_len];
    db[..h_len].copy_from_slice(label_hash.empty_digest());
    db[db_len - msg.len() - 1] = 0x01;
    db[db_len - msg.len()..].copy_from_slice(msg);

    // 2d: random seed of length hLen
    let mut seed = vec![0u8; h_len];
    rng.try_fill_bytes(&mut seed).map_err(|_| Error::RandomGeneratorFailure)?;

    // 2e-2f: maskedDB = DB xor MGF(seed, k - hLen - 1)
    xor_in_place(&mut db, &mgf1(mgf_hash, &seed, db_len)?);

    // 2g-2h: maskedSeed = seed xor MGF(maskedDB, hLen)
    xor_in_place(&mut seed, &mgf1(mgf_hash, &db, h_len)?);

    // 2i: EM = 0x00 || maskedSeed || maskedDB
    let mut em = Vec::with_capacity(k);
    em.push(0x00);
    em.extend_from_slice(&seed);
    em.extend_from_slice(&db);
    Ok(em)
}


/// EME-OAEP decoding per RFC 8017 section 7.1.2 step 3.
///
/// Every check that depends on decrypted data is folded into a single
/// accumulated flag; the scan over DB never exits early, so the position of
/// a padding defect does not show in the timing. One uniform
/// [`Error::Decryption`] covers all failures.
pub(crate) fn eme_oaep_decode(
    em: &[u8], k: usize, label_hash: HashAlg, mgf_hash: HashAlg,
) -> Result<Vec<u8>, Error> {
    let h_len = label_hash.output_len();

    // Both operands of these checks are public, so failing fast is fine.
    ensure!(k >= 2 * h_len + 2, Error::Decryption);
    ensure!(em.len() == k, Error::Decryption);

    // 3b: split EM = Y || maskedSeed || maskedDB
    let y = em[0];
    let mut seed = em[1..=h_len].to_vec();
    let mut db = em[h_len + 1..].to_vec();

    // 3c-3f: undo the two masks
    xor_in_place(&mut seed, &mgf1(mgf_hash, &db, h_len)?);
    xor_in_place(&mut db, &mgf1(mgf_hash, &seed, k - h_len - 1)?);

    // 3g: DB = lHash' || PS || 0x01 || M. Walk the whole of DB past lHash'
    // exactly once: remember where the first 0x01 sits, and flag any
    // non-zero octet seen before it.
    let mut looking_for_one = Choice::from(1u8);
    let mut invalid = Choice::from(0u8);
    let mut one_index = 0u32;
    for (i, byte) in db.iter().enumerate().skip(h_len) {
        let is_one = byte.ct_eq(&0x01);
        let is_zero = byte.ct_eq(&0x00);
        one_index.conditional_assign(
            &u32::try_from(i).map_err(|_| Error::Decryption)?,
            looking_for_one & is_one,
        );
        invalid |= looking_for_one & !(is_zero | is_one);
        looking_for_one &= !is_one;
    }

    // No separator at all, label hash mismatch, or Y != 0 each poison the
    // flag; none of them short-circuits the others.
    invalid |= looking_for_one;
    invalid |= !db[..h_len].ct_eq(label_hash.empty_digest());
    invalid |= !y.ct_eq(&0x00);

    ensure!(!bool::from(invalid), Error::Decryption);
    Ok(db[one_index as usize + 1..].to_vec())
}
