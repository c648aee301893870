use crate::ser::Serializer;
use crate::Result;
use ocsp_asn1::tag::Tag;

/// A serializer for the `NULL` type.
pub struct Null;

impl Null {
    pub fn serialize(ser: &mut Serializer) -> Result<usize> {
        ser.h_write_header(Tag::NULL, 0)
    }
}
