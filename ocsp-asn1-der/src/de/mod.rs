mod boolean;
mod integer;
mod null;
mod sequence;
mod utf8_string;

use crate::de::boolean::Boolean;
use crate::de::integer::UnsignedInteger;
use crate::de::null::Null;
use crate::de::sequence::Sequence;
use crate::de::utf8_string::Utf8String;
use crate::misc::{encapsulator_tag_for_name, Length, PeekableReader, ReadExt};
use crate::raw_der::Asn1RawDer;
use crate::{Asn1DerError, Result};
use ocsp_asn1::tag::Tag;
use serde::de::Visitor;
use serde::Deserialize;
use std::io::{Cursor, Read};

/// Deserializes `T` from `bytes`.
pub fn from_bytes<'a, T: Deserialize<'a>>(bytes: &'a [u8]) -> Result<T> {
    let mut deserializer = Deserializer::new_from_bytes(bytes);
    T::deserialize(&mut deserializer)
}

/// Deserializes `T` from `reader`.
pub fn from_reader<'a, T: Deserialize<'a>>(reader: impl Read + 'a) -> Result<T> {
    let mut deserializer = Deserializer::new_from_reader(reader);
    T::deserialize(&mut deserializer)
}

/// An ASN.1-DER deserializer for `serde`.
pub struct Deserializer<'de> {
    reader: PeekableReader<Box<dyn Read + 'de>>,
    buf: Vec<u8>,
    encapsulator_tag_stack: Vec<Tag>,
}

impl<'de> Deserializer<'de> {
    /// Creates a new deserializer over `bytes`.
    pub fn new_from_bytes(bytes: &'de [u8]) -> Self {
        Self::new_from_reader(Cursor::new(bytes))
    }

    /// Creates a new deserializer for `reader`.
    pub fn new_from_reader(reader: impl Read + 'de) -> Self {
        Self {
            reader: PeekableReader::new(Box::new(reader)),
            buf: Vec::new(),
            encapsulator_tag_stack: Vec::with_capacity(3),
        }
    }

    pub(crate) fn pos(&self) -> usize {
        self.reader.pos()
    }

    /// Reads tag and length of the next object.
    fn h_next_tag_len(&mut self) -> Result<(Tag, usize)> {
        let tag = Tag::from(self.reader.read_one()?);
        let len = Length::deserialized(&mut self.reader)?;
        Ok((tag, len))
    }

    /// Reads `len` content bytes into `self.buf`.
    fn h_read_content(&mut self, len: usize) -> Result<()> {
        self.buf.clear();
        let read = (&mut self.reader).take(len as u64).read_to_end(&mut self.buf)?;
        if read != len {
            return Err(Asn1DerError::Truncated);
        }
        Ok(())
    }

    fn h_encapsulate(&mut self, tag: Tag) {
        self.encapsulator_tag_stack.push(tag);
    }

    /// Consumes the pending encapsulator headers in front of the next object.
    ///
    /// Returns the innermost (wire tag, length) plus whether that innermost
    /// wrapper is an implicit one, in which case its header replaces the
    /// object's own header and the caller must not read another one.
    fn h_decapsulate(&mut self) -> Result<Option<(Tag, usize, bool)>> {
        if self.encapsulator_tag_stack.is_empty() {
            return Ok(None);
        }

        let stack = std::mem::take(&mut self.encapsulator_tag_stack);
        let mut wire_tag = Tag::NULL;
        let mut len = 0;
        let mut implicit = false;

        for expected in stack {
            let peeked = Tag::from(self.reader.peek_one()?);
            // an implicitly tagged constructed value carries the constructed
            // bit on the wire
            let matches =
                peeked == expected || (expected.is_implicit_context() && peeked == expected.to_constructed());
            if !matches {
                return Err(Asn1DerError::TagMismatch);
            }

            self.reader.read_one()?;
            len = Length::deserialized(&mut self.reader)?;
            wire_tag = peeked;
            implicit = expected.is_implicit_context();

            if expected == Tag::BIT_STRING {
                self.reader.read_one()?; // unused bits octet
            }
        }

        Ok(Some((wire_tag, len, implicit)))
    }

    /// Reads the next object into `self.buf` and returns its tag.
    fn h_next_object(&mut self) -> Result<Tag> {
        let (tag, len) = match self.h_decapsulate()? {
            Some((tag, len, true)) => (tag, len),
            _ => self.h_next_tag_len()?,
        };
        self.h_read_content(len)?;
        Ok(tag)
    }

    /// Peeks the tag of the next object, looking through any pending
    /// encapsulators without consuming anything.
    fn h_peek_object(&mut self) -> Result<Tag> {
        if self.encapsulator_tag_stack.is_empty() {
            return Ok(Tag::from(self.reader.peek_one()?));
        }

        let stack = self.encapsulator_tag_stack.clone();
        let peeked = self.reader.peek_buffer()?;
        let mut cursor = 0usize;

        // implicit wrappers replace the object header, so only explicit
        // wrappers and containers put a header of their own in front
        for encapsulator in stack.into_iter().filter(|tag| !tag.is_implicit_context()) {
            if peeked.len() < cursor + 2 {
                return Err(Asn1DerError::Truncated);
            }
            let wire = Tag::from(peeked[cursor]);
            if wire != encapsulator {
                return Err(Asn1DerError::TagMismatch);
            }
            let len = Length::deserialized(Cursor::new(&peeked[cursor + 1..]))?;
            cursor += 1 + Length::encoded_len(len);
            if encapsulator == Tag::BIT_STRING {
                cursor += 1; // unused bits octet
            }
        }

        if peeked.len() <= cursor {
            return Err(Asn1DerError::Truncated);
        }
        Ok(Tag::from(peeked[cursor]))
    }

    /// Reads the next object verbatim (header included) into `self.buf`.
    fn h_next_object_raw(&mut self) -> Result<()> {
        self.buf.clear();

        let tag = self.reader.read_one()?;
        self.buf.push(tag);

        let first = self.reader.read_one()?;
        self.buf.push(first);
        let len = match first {
            short @ 0..=0x7F => usize::from(short),
            0x80 => return Err(Asn1DerError::OverlongLength),
            long => {
                let count = usize::from(long & 0x7F);
                if count > std::mem::size_of::<usize>() {
                    return Err(Asn1DerError::OverlongLength);
                }
                let mut value = 0usize;
                for _ in 0..count {
                    let byte = self.reader.read_one()?;
                    self.buf.push(byte);
                    value = (value << 8) | usize::from(byte);
                }
                value
            }
        };

        let header_len = self.buf.len();
        let read = (&mut self.reader).take(len as u64).read_to_end(&mut self.buf)?;
        if read != len {
            return Err(Asn1DerError::Truncated);
        }
        debug_assert_eq!(self.buf.len(), header_len + len);
        Ok(())
    }
}

impl<'de, 'a> serde::de::Deserializer<'de> for &'a mut Deserializer<'de> {
    type Error = Asn1DerError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.h_peek_object()? {
            Tag::BOOLEAN => self.deserialize_bool(visitor),
            Tag::NULL => self.deserialize_unit(visitor),
            Tag::SEQUENCE | Tag::SET => self.deserialize_seq(visitor),
            Tag::UTF8_STRING => self.deserialize_string(visitor),
            Tag::OID | Tag::UTC_TIME | Tag::GENERALIZED_TIME => self.deserialize_bytes(visitor),
            Tag::OCTET_STRING
            | Tag::BIT_STRING
            | Tag::INTEGER
            | Tag::ENUMERATED
            | Tag::PRINTABLE_STRING
            | Tag::IA5_STRING
            | Tag::BMP_STRING => self.deserialize_byte_buf(visitor),
            _ => Err(Asn1DerError::UnsupportedTag),
        }
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.h_peek_object()? {
            Tag::BOOLEAN => {}
            tag if tag.is_context_specific() => {}
            _ => return Err(Asn1DerError::TagMismatch),
        }
        self.h_next_object()?;
        visitor.visit_bool(Boolean::deserialize(&self.buf)?)
    }

    fn deserialize_i8<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(Asn1DerError::Message("i8 is not supported".to_owned()))
    }

    fn deserialize_i16<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(Asn1DerError::Message("i16 is not supported".to_owned()))
    }

    fn deserialize_i32<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(Asn1DerError::Message("i32 is not supported".to_owned()))
    }

    fn deserialize_i64<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(Asn1DerError::Message("i64 is not supported".to_owned()))
    }

    fn deserialize_i128<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(Asn1DerError::Message("i128 is not supported".to_owned()))
    }

    fn deserialize_u8<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.h_read_integer()?;
        let value = UnsignedInteger::deserialize(&self.buf)?;
        visitor.visit_u8(u8::try_from(value).map_err(|_| Asn1DerError::IntegerOverflow)?)
    }

    fn deserialize_u16<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.h_read_integer()?;
        let value = UnsignedInteger::deserialize(&self.buf)?;
        visitor.visit_u16(u16::try_from(value).map_err(|_| Asn1DerError::IntegerOverflow)?)
    }

    fn deserialize_u32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.h_read_integer()?;
        let value = UnsignedInteger::deserialize(&self.buf)?;
        visitor.visit_u32(u32::try_from(value).map_err(|_| Asn1DerError::IntegerOverflow)?)
    }

    fn deserialize_u64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.h_read_integer()?;
        let value = UnsignedInteger::deserialize(&self.buf)?;
        visitor.visit_u64(u64::try_from(value).map_err(|_| Asn1DerError::IntegerOverflow)?)
    }

    fn deserialize_u128<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.h_read_integer()?;
        visitor.visit_u128(UnsignedInteger::deserialize(&self.buf)?)
    }

    fn deserialize_f32<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(Asn1DerError::Message("f32 is not supported".to_owned()))
    }

    fn deserialize_f64<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(Asn1DerError::Message("f64 is not supported".to_owned()))
    }

    fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.h_peek_object()? {
            Tag::UTF8_STRING => {}
            tag if tag.is_context_specific() => {}
            _ => return Err(Asn1DerError::TagMismatch),
        }
        self.h_next_object()?;
        let s = Utf8String::deserialize(&self.buf)?;
        let c = s
            .chars()
            .next()
            .ok_or_else(|| Asn1DerError::Message("empty string for char".to_owned()))?;
        visitor.visit_char(c)
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.h_peek_object()? {
            Tag::UTF8_STRING => {}
            tag if tag.is_context_specific() => {}
            _ => return Err(Asn1DerError::TagMismatch),
        }
        self.h_next_object()?;
        visitor.visit_str(Utf8String::deserialize(&self.buf)?)
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.h_peek_object()? {
            Tag::UTF8_STRING => {}
            tag if tag.is_context_specific() => {}
            _ => return Err(Asn1DerError::TagMismatch),
        }
        self.h_next_object()?;
        visitor.visit_string(Utf8String::deserialize(&self.buf)?.to_owned())
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.h_peek_object()? {
            Tag::OCTET_STRING
            | Tag::OID
            | Tag::BIT_STRING
            | Tag::INTEGER
            | Tag::ENUMERATED
            | Tag::UTC_TIME
            | Tag::GENERALIZED_TIME => {}
            tag if tag.is_context_specific() => {}
            _ => return Err(Asn1DerError::TagMismatch),
        }
        self.h_next_object()?;
        visitor.visit_bytes(&self.buf)
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.h_peek_object()? {
            Tag::OCTET_STRING
            | Tag::BIT_STRING
            | Tag::INTEGER
            | Tag::ENUMERATED
            | Tag::UTF8_STRING
            | Tag::PRINTABLE_STRING
            | Tag::IA5_STRING
            | Tag::BMP_STRING => {}
            tag if tag.is_context_specific() => {}
            _ => return Err(Asn1DerError::TagMismatch),
        }
        self.h_next_object()?;
        visitor.visit_byte_buf(self.buf.clone())
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_some(self)
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.h_peek_object()? {
            Tag::NULL => {}
            tag if tag.is_context_specific() => {}
            _ => return Err(Asn1DerError::TagMismatch),
        }
        self.h_next_object()?;
        Null::deserialize(&self.buf)?;
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(self, _name: &'static str, visitor: V) -> Result<V::Value> {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(self, name: &'static str, visitor: V) -> Result<V::Value> {
        if name == Asn1RawDer::NAME {
            self.h_next_object_raw()?;
            return visitor.visit_byte_buf(self.buf.clone());
        }
        if let Some(tag) = encapsulator_tag_for_name(name) {
            self.h_encapsulate(tag);
        }
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(mut self, visitor: V) -> Result<V::Value> {
        let (tag, len) = match self.h_decapsulate()? {
            // an implicit wrapper's header already is the sequence header
            Some((tag, len, true)) => (tag, len),
            _ => self.h_next_tag_len()?,
        };

        match tag {
            Tag::SEQUENCE | Tag::SET => {}
            tag if tag.is_context_specific() => {}
            _ => return Err(Asn1DerError::TagMismatch),
        }

        visitor.visit_seq(Sequence::deserialize_lazy(&mut self, len))
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(Asn1DerError::Message("maps are not supported".to_owned()))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        self.deserialize_seq(visitor)
    }

    /// CHOICE support: hands the visitor a window covering the next TLV so it
    /// can peek the tag and then read the matching variant.
    fn deserialize_enum<V: Visitor<'de>>(
        mut self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        let peeked = self.reader.peek_buffer()?;
        if peeked.len() < 2 {
            return Err(Asn1DerError::Truncated);
        }
        let payload_len = Length::deserialized(Cursor::new(&peeked[1..]))?;
        let len = 1 + Length::encoded_len(payload_len) + payload_len;
        visitor.visit_seq(Sequence::deserialize_lazy(&mut self, len))
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let tag = self.h_peek_object()?;
        visitor.visit_u8(tag.number())
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let (_, len) = self.h_next_tag_len()?;
        self.h_read_content(len)?;
        visitor.visit_unit()
    }

    fn is_human_readable(&self) -> bool {
        false
    }
}

impl<'de> Deserializer<'de> {
    fn h_read_integer(&mut self) -> Result<()> {
        match self.h_peek_object()? {
            Tag::INTEGER | Tag::ENUMERATED => {}
            tag if tag.is_context_specific() => {}
            _ => return Err(Asn1DerError::TagMismatch),
        }
        self.h_next_object()?;
        Ok(())
    }
}
