use crate::{Asn1DerError, Result};

/// A deserializer for the `NULL` type.
pub struct Null;

impl Null {
    /// Deserializes `NULL` from content octets.
    pub fn deserialize(data: &[u8]) -> Result<()> {
        if !data.is_empty() {
            return Err(Asn1DerError::Message("invalid null content".to_owned()));
        }
        Ok(())
    }
}
