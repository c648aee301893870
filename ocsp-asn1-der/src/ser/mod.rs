mod boolean;
mod integer;
mod null;
mod sequence;
mod utf8_string;

use crate::misc::{encapsulator_tag_for_name, primitive_tag_for_name, Length, WriteExt};
use crate::raw_der::Asn1RawDer;
use crate::ser::boolean::Boolean;
use crate::ser::integer::UnsignedInteger;
use crate::ser::null::Null;
use crate::ser::sequence::Sequence;
use crate::ser::utf8_string::Utf8String;
use crate::{Asn1DerError, Result};
use ocsp_asn1::tag::Tag;
use ocsp_asn1::wrapper::{Asn1SequenceOf, Asn1SetOf};
use ocsp_asn1::Asn1Type;
use serde::Serialize;
use std::io::{Cursor, Write};

/// Serializes `value` into a fresh byte vector.
pub fn to_vec<T: ?Sized + Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    to_byte_buf(value, &mut buf)?;
    Ok(buf)
}

/// Serializes `value` into `buf` and returns the amount of serialized bytes.
pub fn to_byte_buf<T: ?Sized + Serialize>(value: &T, buf: &mut Vec<u8>) -> Result<usize> {
    let mut serializer = Serializer::new_to_byte_buf(buf);
    value.serialize(&mut serializer)
}

/// Serializes `value` to `writer` and returns the amount of serialized bytes.
pub fn to_writer<T: ?Sized + Serialize>(value: &T, writer: impl Write) -> Result<usize> {
    let mut serializer = Serializer::new_to_writer(writer);
    value.serialize(&mut serializer)
}

/// An ASN.1-DER serializer for `serde`.
pub struct Serializer<'se> {
    pub(crate) writer: Box<dyn Write + 'se>,
    tag_for_next_bytes: Tag,
    tag_for_next_seq: Tag,
    encapsulators: Vec<Tag>,
    no_header: bool,
}

impl<'se> Serializer<'se> {
    /// Creates a new serializer that appends to `buf`.
    pub fn new_to_byte_buf(buf: &'se mut Vec<u8>) -> Self {
        let position = buf.len() as u64;
        let mut cursor = Cursor::new(buf);
        cursor.set_position(position);
        Self::new_to_writer(cursor)
    }

    /// Creates a new serializer that writes to `writer`.
    pub fn new_to_writer(writer: impl Write + 'se) -> Self {
        Self {
            writer: Box::new(writer),
            tag_for_next_bytes: Tag::OCTET_STRING,
            tag_for_next_seq: Tag::SEQUENCE,
            encapsulators: Vec::with_capacity(3),
            no_header: false,
        }
    }

    fn h_encapsulate(&mut self, tag: Tag) {
        self.encapsulators.push(tag);
    }

    /// Writes the pending encapsulator headers for a payload of
    /// `payload_len` bytes. Each layer's length covers the payload plus the
    /// headers of the layers nested deeper.
    fn h_write_encapsulator(&mut self, payload_len: usize) -> Result<usize> {
        let mut written = 0;

        for (i, encapsulator) in self.encapsulators.iter().copied().enumerate() {
            let encapsulated_len = {
                let mut len = payload_len;
                for deeper in self.encapsulators.iter().skip(i + 1).copied().rev() {
                    if deeper == Tag::BIT_STRING {
                        len += Length::encoded_len(len + 1) + 2;
                    } else {
                        len += Length::encoded_len(len) + 1;
                    }
                }
                len
            };

            written += self.writer.write_one(encapsulator.number())?;
            if encapsulator == Tag::BIT_STRING {
                written += Length::serialize(encapsulated_len + 1, &mut self.writer)?;
                written += self.writer.write_one(0x00)?; // no unused bits
            } else {
                written += Length::serialize(encapsulated_len, &mut self.writer)?;
            }
        }

        self.encapsulators.clear();
        Ok(written)
    }

    pub(crate) fn h_write_header(&mut self, tag: Tag, len: usize) -> Result<usize> {
        let written;
        match self.encapsulators.last().copied() {
            Some(last) if last.is_implicit_context() => {
                // the implicit wrapper replaces this header; carry over the
                // constructed bit of the replaced tag
                if tag.is_constructed() {
                    let innermost = self.encapsulators.len() - 1;
                    self.encapsulators[innermost] = last.to_constructed();
                }
                written = self.h_write_encapsulator(len)?;
            }
            _ => {
                if self.no_header {
                    written = self.h_write_encapsulator(len)?;
                } else {
                    let mut w = self.h_write_encapsulator(Length::encoded_len(len) + len + 1)?;
                    w += self.writer.write_one(tag.number())?;
                    w += Length::serialize(len, &mut self.writer)?;
                    written = w;
                }
            }
        }
        self.no_header = false;
        Ok(written)
    }

    fn h_serialize_bytes_with_tag(&mut self, bytes: &[u8]) -> Result<usize> {
        let tag = self.tag_for_next_bytes;
        self.tag_for_next_bytes = Tag::OCTET_STRING;

        let mut written = self.h_write_header(tag, bytes.len())?;
        written += self.writer.write_exact(bytes)?;
        Ok(written)
    }
}

impl<'a, 'se> serde::ser::Serializer for &'a mut Serializer<'se> {
    type Ok = usize;
    type Error = Asn1DerError;

    type SerializeSeq = Sequence<'a, 'se>;
    type SerializeTuple = Sequence<'a, 'se>;
    type SerializeTupleStruct = Sequence<'a, 'se>;
    type SerializeTupleVariant = serde::ser::Impossible<usize, Asn1DerError>;
    type SerializeMap = serde::ser::Impossible<usize, Asn1DerError>;
    type SerializeStruct = Sequence<'a, 'se>;
    type SerializeStructVariant = serde::ser::Impossible<usize, Asn1DerError>;

    fn is_human_readable(&self) -> bool {
        false
    }

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        Boolean::serialize(v, self)
    }

    fn serialize_i8(self, _v: i8) -> Result<Self::Ok> {
        Err(Asn1DerError::Message("i8 is not supported".to_owned()))
    }

    fn serialize_i16(self, _v: i16) -> Result<Self::Ok> {
        Err(Asn1DerError::Message("i16 is not supported".to_owned()))
    }

    fn serialize_i32(self, _v: i32) -> Result<Self::Ok> {
        Err(Asn1DerError::Message("i32 is not supported".to_owned()))
    }

    fn serialize_i64(self, _v: i64) -> Result<Self::Ok> {
        Err(Asn1DerError::Message("i64 is not supported".to_owned()))
    }

    fn serialize_i128(self, _v: i128) -> Result<Self::Ok> {
        Err(Asn1DerError::Message("i128 is not supported".to_owned()))
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok> {
        self.serialize_u128(u128::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok> {
        self.serialize_u128(u128::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok> {
        self.serialize_u128(u128::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok> {
        self.serialize_u128(u128::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Self::Ok> {
        UnsignedInteger::serialize(v, self)
    }

    fn serialize_f32(self, _v: f32) -> Result<Self::Ok> {
        Err(Asn1DerError::Message("f32 is not supported".to_owned()))
    }

    fn serialize_f64(self, _v: f64) -> Result<Self::Ok> {
        Err(Asn1DerError::Message("f64 is not supported".to_owned()))
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        let mut buf = [0; 4];
        self.serialize_str(v.encode_utf8(&mut buf))
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        Utf8String::serialize(v, self)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok> {
        self.h_serialize_bytes_with_tag(v)
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Ok(0)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Self::Ok> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Null::serialize(self)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        Null::serialize(self)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Self::Ok> {
        Err(Asn1DerError::Message("unit variants are not supported".to_owned()))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(self, name: &'static str, value: &T) -> Result<Self::Ok> {
        if let Some(tag) = primitive_tag_for_name(name) {
            self.tag_for_next_bytes = tag;
        } else if let Some(tag) = encapsulator_tag_for_name(name) {
            self.h_encapsulate(tag);
        } else if name == Asn1SetOf::<()>::NAME {
            self.tag_for_next_seq = Tag::SET;
        } else if name == Asn1SequenceOf::<()>::NAME {
            self.tag_for_next_seq = Tag::SEQUENCE;
        } else if name == Asn1RawDer::NAME {
            self.no_header = true;
        }

        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok> {
        Err(Asn1DerError::Message("newtype variants are not supported".to_owned()))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        let mut tag = Tag::SEQUENCE;
        std::mem::swap(&mut tag, &mut self.tag_for_next_seq);
        Ok(Sequence::serialize_lazy(self, tag))
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Asn1DerError::Message("tuple variants are not supported".to_owned()))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Asn1DerError::Message("maps are not supported".to_owned()))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Asn1DerError::Message("struct variants are not supported".to_owned()))
    }
}
