use crate::{Asn1DerError, Result};

/// A deserializer for the `UTF8String` type.
pub struct Utf8String;

impl Utf8String {
    /// Deserializes a string slice from content octets.
    pub fn deserialize(data: &[u8]) -> Result<&str> {
        std::str::from_utf8(data).map_err(|_| Asn1DerError::Utf8Invalid)
    }
}
