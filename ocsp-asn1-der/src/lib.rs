//! A DER (de)serializer for `serde`, covering the ASN.1 subset used by OCSP
//! and X.509.
//!
//! Types describe their ASN.1 shape with the wrapper newtypes from
//! `ocsp-asn1`; this crate recognizes the wrappers by their serde newtype
//! name and applies the corresponding tags. Input decoding is tolerant of a
//! few BER liberties (non-minimal lengths, any non-zero BOOLEAN), output is
//! always DER.

mod de;
mod misc;
mod raw_der;
mod ser;

pub use crate::de::{from_bytes, from_reader, Deserializer};
pub use crate::raw_der::Asn1RawDer;
pub use crate::ser::{to_byte_buf, to_vec, to_writer, Serializer};

use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Asn1DerError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Asn1DerError {
    /// the input ended before the announced element did
    #[error("truncated data")]
    Truncated,

    /// the encountered tag does not match what the schema expects
    #[error("unexpected tag")]
    TagMismatch,

    /// the encountered tag is outside the supported ASN.1 subset
    #[error("unsupported tag")]
    UnsupportedTag,

    /// the length field is indefinite, non-representable or exceeds the
    /// platform word
    #[error("invalid or overlong length")]
    OverlongLength,

    /// an integer does not fit the requested bounded type
    #[error("integer overflow")]
    IntegerOverflow,

    /// string content is not valid UTF-8
    #[error("invalid UTF-8 string")]
    Utf8Invalid,

    /// anything surfaced through the serde machinery
    #[error("{0}")]
    Message(String),
}

impl From<std::io::Error> for Asn1DerError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Asn1DerError::Truncated,
            _ => Asn1DerError::Message(e.to_string()),
        }
    }
}

impl serde::ser::Error for Asn1DerError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Asn1DerError::Message(msg.to_string())
    }
}

impl serde::de::Error for Asn1DerError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Asn1DerError::Message(msg.to_string())
    }
}
