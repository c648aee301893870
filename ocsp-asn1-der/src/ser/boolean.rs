use crate::misc::WriteExt;
use crate::ser::Serializer;
use crate::Result;
use ocsp_asn1::tag::Tag;

/// A serializer for the `BOOLEAN` type.
pub struct Boolean;

impl Boolean {
    pub fn serialize(value: bool, ser: &mut Serializer) -> Result<usize> {
        let mut written = ser.h_write_header(Tag::BOOLEAN, 1)?;
        written += ser.writer.write_one(if value { 0xFF } else { 0x00 })?;
        Ok(written)
    }
}
