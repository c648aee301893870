use crate::misc::WriteExt;
use crate::ser::Serializer;
use crate::Result;
use ocsp_asn1::tag::Tag;

/// A serializer for unsigned `INTEGER` values.
pub struct UnsignedInteger;

impl UnsignedInteger {
    pub fn serialize(value: u128, ser: &mut Serializer) -> Result<usize> {
        let bytes = value.to_be_bytes();
        let start = bytes[..15].iter().take_while(|b| **b == 0).count();
        let mut content = bytes[start..].to_vec();
        if content[0] & 0x80 != 0 {
            // keep the value positive in two's complement
            content.insert(0, 0x00);
        }

        let mut written = ser.h_write_header(Tag::INTEGER, content.len())?;
        written += ser.writer.write_exact(&content)?;
        Ok(written)
    }
}
