use crate::errors::Error;
use crate::helpers::ensure;
use crate::key::{PrivateKey, PublicKey};
use num_bigint::BigUint;


/// RSAEP per RFC 8017 section 5.1.1: `c = m^e mod n`.
pub(crate) fn rsaep(key: &PublicKey, m: &BigUint) -> Result<BigUint, Error> {
    ensure!(m < &key.n, Error::MessageRepresentativeOutOfRange);
    Ok(m.modpow(&key.e, &key.n))
}


/// RSADP per RFC 8017 section 5.1.2: `m = c^d mod n`, via the CRT.
pub(crate) fn rsadp(key: &PrivateKey, c: &BigUint) -> Result<BigUint, Error> {
    ensure!(c < &key.n, Error::MessageRepresentativeOutOfRange);
    Ok(crt_power(key, c))
}


/// RSASP1 per RFC 8017 section 5.2.1: structurally RSADP over the message
/// representative.
pub(crate) fn rsasp1(key: &PrivateKey, m: &BigUint) -> Result<BigUint, Error> {
    ensure!(m < &key.n, Error::MessageRepresentativeOutOfRange);
    Ok(crt_power(key, m))
}


/// RSAVP1 per RFC 8017 section 5.2.2: `m = s^e mod n`. An out-of-range
/// signature representative is reported as an invalid signature.
pub(crate) fn rsavp1(key: &PublicKey, s: &BigUint) -> Result<BigUint, Error> {
    ensure!(s < &key.n, Error::InvalidSignature);
    Ok(s.modpow(&key.e, &key.n))
}


/// The two-prime CRT private-key power: `m1 = x^dP mod p`,
/// `m2 = x^dQ mod q`, `h = (m1 - m2) * qInv mod p`, `m = m2 + q * h`.
/// Roughly four times faster than a full-width `x^d mod n`.
fn crt_power(key: &PrivateKey, x: &BigUint) -> BigUint {
    let m1 = x.modpow(&key.crt.dp, &key.p);
    let m2 = x.modpow(&key.crt.dq, &key.q);
    // m1 and (m2 mod p) both lie below p, so adding p before subtracting
    // keeps the difference non-negative.
    let diff = (&m1 + &key.p - &m2 % &key.p) % &key.p;
    let h = diff * &key.crt.qinv % &key.p;
    m2 + &key.q * h
}
