use crate::{Asn1DerError, Result};

/// A deserializer for unsigned `INTEGER`/`ENUMERATED` values.
pub struct UnsignedInteger;

impl UnsignedInteger {
    pub fn deserialize(data: &[u8]) -> Result<u128> {
        if data.is_empty() {
            return Err(Asn1DerError::Message("empty integer content".to_owned()));
        }
        if data[0] & 0x80 != 0 {
            // negative two's-complement value cannot fit an unsigned type
            return Err(Asn1DerError::IntegerOverflow);
        }

        // strip sign-padding zeros, keeping at least one octet
        let start = data[..data.len() - 1].iter().take_while(|b| **b == 0).count();
        let magnitude = &data[start..];

        if magnitude.len() > 16 {
            return Err(Asn1DerError::IntegerOverflow);
        }
        Ok(magnitude.iter().fold(0u128, |acc, b| (acc << 8) | u128::from(*b)))
    }
}
