use crate::{Asn1DerError, Result};

/// A deserializer for the `BOOLEAN` type.
pub struct Boolean;

impl Boolean {
    /// Deserializes a boolean from content octets. DER mandates `0xFF` for
    /// TRUE but any non-zero value is accepted on input (BER tolerance).
    pub fn deserialize(data: &[u8]) -> Result<bool> {
        match data {
            [0x00] => Ok(false),
            [_] => Ok(true),
            _ => Err(Asn1DerError::Message("invalid boolean content".to_owned())),
        }
    }
}
