use crate::misc::WriteExt;
use crate::ser::Serializer;
use crate::{Asn1DerError, Result};
use ocsp_asn1::tag::Tag;
use serde::ser;
use serde::Serialize;

/// Lazy constructed-type writer: elements are buffered so the definite
/// length can be written before the payload.
pub struct Sequence<'a, 'se: 'a> {
    ser: &'a mut Serializer<'se>,
    tag: Tag,
    buf: Vec<u8>,
}

impl<'a, 'se: 'a> Sequence<'a, 'se> {
    pub fn serialize_lazy(ser: &'a mut Serializer<'se>, tag: Tag) -> Self {
        Self {
            ser,
            tag,
            buf: Vec::new(),
        }
    }

    fn h_serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        crate::ser::to_byte_buf(value, &mut self.buf)?;
        Ok(())
    }

    fn h_end(self) -> Result<usize> {
        let mut written = self.ser.h_write_header(self.tag, self.buf.len())?;
        written += self.ser.writer.write_exact(&self.buf)?;
        Ok(written)
    }
}

impl<'a, 'se: 'a> ser::SerializeSeq for Sequence<'a, 'se> {
    type Ok = usize;
    type Error = Asn1DerError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.h_serialize_element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.h_end()
    }
}

impl<'a, 'se: 'a> ser::SerializeTuple for Sequence<'a, 'se> {
    type Ok = usize;
    type Error = Asn1DerError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.h_serialize_element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.h_end()
    }
}

impl<'a, 'se: 'a> ser::SerializeTupleStruct for Sequence<'a, 'se> {
    type Ok = usize;
    type Error = Asn1DerError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.h_serialize_element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.h_end()
    }
}

impl<'a, 'se: 'a> ser::SerializeStruct for Sequence<'a, 'se> {
    type Ok = usize;
    type Error = Asn1DerError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, _key: &'static str, value: &T) -> Result<()> {
        self.h_serialize_element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.h_end()
    }
}
