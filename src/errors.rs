use core::fmt;


/// All failure modes surfaced by this crate.
///
/// Padding failures during decryption and signature verification are
/// deliberately undifferentiated: [`Error::Decryption`] and
/// [`Error::InvalidSignature`] carry no detail about which check failed,
/// and callers must not log anything more specific.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A key field was missing or zero at construction, or the CRT
    /// components were absent where they are required.
    KeyInvalid(&'static str),
    /// Malformed DER, an unexpected tag, an unsupported version or
    /// algorithm identifier, or truncated input.
    KeyDecoding(&'static str),
    /// The key serializer failed internally.
    KeyEncoding(&'static str),
    /// The integer passed to I2OSP does not fit the requested length.
    IntegerTooLarge,
    /// The plaintext exceeds the OAEP capacity of the modulus.
    MessageTooLong,
    /// An RSA primitive received a representative `>= n`.
    MessageRepresentativeOutOfRange,
    /// OAEP decoding failed. Uniform by design.
    Decryption,
    /// Signature verification failed. Uniform by design.
    InvalidSignature,
    /// The requested MGF1 output exceeds the mask ceiling.
    MaskTooLong,
    /// A malformed object identifier string.
    InvalidOid(&'static str),
    /// An unsupported scheme or parameter combination was requested.
    IllegalArgument(&'static str),
    /// The random number generator failed.
    RandomGeneratorFailure,
}


impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::KeyInvalid(msg) => write!(f, "invalid key: {msg}"),
            Error::KeyDecoding(msg) => write!(f, "key decoding error: {msg}"),
            Error::KeyEncoding(msg) => write!(f, "key encoding error: {msg}"),
            Error::IntegerTooLarge => write!(f, "integer too large"),
            Error::MessageTooLong => write!(f, "message too long"),
            Error::MessageRepresentativeOutOfRange => {
                write!(f, "message representative out of range")
            }
            Error::Decryption => write!(f, "decryption error"),
            Error::InvalidSignature => write!(f, "invalid signature"),
            Error::MaskTooLong => write!(f, "mask too long"),
            Error::InvalidOid(msg) => write!(f, "invalid object identifier: {msg}"),
            Error::IllegalArgument(msg) => write!(f, "illegal argument: {msg}"),
            Error::RandomGeneratorFailure => write!(f, "random number generator failed"),
        }
    }
}


impl std::error::Error for Error {}
