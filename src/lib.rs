#![deny(clippy::pedantic, missing_docs, unsafe_code)]
#![deny(elided_lifetimes_in_paths, keyword_idents, missing_abi, non_ascii_idents)]
#![deny(trivial_casts, trivial_numeric_casts, unreachable_pub)]
#![deny(unused_extern_crates, unused_import_braces, unused_lifetimes)]
#![allow(clippy::must_use_candidate, clippy::missing_errors_doc, clippy::doc_markdown)]
#![allow(clippy::similar_names, clippy::many_single_char_names, clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions, clippy::unnecessary_wraps, clippy::missing_panics_doc)]
//
#![doc = include_str!("../README.md")]

// Implements the RSAES-OAEP and RSASSA-PSS schemes of RFC 8017 (PKCS #1 v2.2)
// plus PKCS #1 / PKCS #8 key serialization.
// See <https://datatracker.ietf.org/doc/html/rfc8017>

// Functionality map per RFC 8017
//
// Section 3.1/3.2 RSA key types                      --> key.rs
// Appendix A.1.1/A.1.2 key generation domains        --> key_gen.rs
// Section 4.1 I2OSP / Section 4.2 OS2IP              --> byte_fns.rs
// Section 5.1.1 RSAEP / 5.1.2 RSADP (with CRT)       --> primitives.rs
// Section 5.2.1 RSASP1 / 5.2.2 RSAVP1                --> primitives.rs
// Section 7.1 RSAES-OAEP (encrypt/decrypt)           --> oaep.rs, rsaes.rs
// Section 8.1 RSASSA-PSS (sign/verify)               --> rsassa.rs
// Section 9.1 EMSA-PSS (encode/verify)               --> pss.rs
// Appendix B.2.1 MGF1                                --> mgf.rs
// RFC 8017 A.1 RSAPublicKey / A.1.2 RSAPrivateKey,
//   RFC 5208 PrivateKeyInfo, over a minimal X.690
//   DER codec                                        --> pkcs.rs, der.rs, oid.rs
// Kocher blinding of private-key operations          --> blinding.rs
//
// Private-key exponentiations always take the CRT path and always run on a
// blinded representative. OAEP decoding and PSS verification accumulate
// their checks without early exit and collapse every failure into a single
// undifferentiated error.


/// The `rand_core` types are re-exported so that users of this crate do
/// not have to worry about using the exact correct version of `rand_core`.
pub use rand_core::{CryptoRng, CryptoRngCore, Error as RngError, RngCore};

mod blinding;
mod byte_fns;
mod errors;
mod hash;
mod helpers;
mod key;
mod key_gen;
mod mgf;
mod oaep;
mod pkcs;
mod primitives;
mod pss;
mod rsaes;
mod rsassa;

/// The X.690 DER building blocks the key schemas are assembled from.
pub mod der;
/// Object identifiers and their DER arc encoding.
pub mod oid;

pub use errors::Error;
pub use hash::HashAlg;
pub use key::{CrtComponents, PrivateKey, PublicKey};
pub use key_gen::{ExponentPolicy, KeyFactory};
pub use pkcs::EncodingScheme;
pub use rsaes::OaepParams;
pub use rsassa::SignatureParams;


/// The smallest modulus the key factories will generate, in bits.
pub const MIN_MODULUS_BITS: usize = 1024;
