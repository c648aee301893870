use crate::misc::WriteExt;
use crate::ser::Serializer;
use crate::Result;
use ocsp_asn1::tag::Tag;

/// A serializer for the `UTF8String` type.
pub struct Utf8String;

impl Utf8String {
    pub fn serialize(value: &str, ser: &mut Serializer) -> Result<usize> {
        let mut written = ser.h_write_header(Tag::UTF8_STRING, value.len())?;
        written += ser.writer.write_exact(value.as_bytes())?;
        Ok(written)
    }
}
