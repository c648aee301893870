//! Newtype wrappers binding Rust values to ASN.1 tags.
//!
//! Wrappers serialize through `serialize_newtype_struct` so the DER backend
//! can recognize them by name and pick the right tag, either by overriding
//! the tag of the next primitive or by pushing an encapsulating header
//! (context tags, OCTET STRING / BIT STRING containers).

use crate::bit_string::BitString;
use crate::date::{GeneralizedTime, UTCTime};
use crate::restricted_string::{BmpString, IA5String, PrintableString};
use crate::tag::Tag;
use crate::Asn1Type;
use oid::ObjectIdentifier;
use serde::{de, ser};
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

/// Serializes already-prepared content octets; the wrapper's newtype name has
/// told the serializer which tag to apply.
struct SerializeRaw<'a>(&'a [u8]);

impl ser::Serialize for SerializeRaw<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_bytes(self.0)
    }
}

macro_rules! tagged_wrapper {
    ($ty:ident, $tag:expr, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
        pub struct $ty<T>(pub T);

        impl<T> Asn1Type for $ty<T> {
            const TAG: Tag = $tag;
            const NAME: &'static str = stringify!($ty);
        }

        impl<T> From<T> for $ty<T> {
            fn from(value: T) -> Self {
                Self(value)
            }
        }

        impl<T> Deref for $ty<T> {
            type Target = T;

            fn deref(&self) -> &T {
                &self.0
            }
        }

        impl<T> DerefMut for $ty<T> {
            fn deref_mut(&mut self) -> &mut T {
                &mut self.0
            }
        }

        impl<T: ser::Serialize> ser::Serialize for $ty<T> {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ser::Serializer,
            {
                serializer.serialize_newtype_struct(Self::NAME, &self.0)
            }
        }

        impl<'de, T: de::Deserialize<'de>> de::Deserialize<'de> for $ty<T> {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: de::Deserializer<'de>,
            {
                struct Visitor<T>(PhantomData<T>);

                impl<'de, T: de::Deserialize<'de>> de::Visitor<'de> for Visitor<T> {
                    type Value = $ty<T>;

                    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                        formatter.write_str(concat!("a valid DER-encoded ", stringify!($ty)))
                    }

                    fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
                    where
                        D: de::Deserializer<'de>,
                    {
                        T::deserialize(deserializer).map($ty)
                    }
                }

                deserializer.deserialize_newtype_struct(Self::NAME, Visitor(PhantomData))
            }
        }
    };
}

tagged_wrapper!(ExplicitContextTag0, Tag::context_explicit(0), "Explicit `[0]` wrapper.");
tagged_wrapper!(ExplicitContextTag1, Tag::context_explicit(1), "Explicit `[1]` wrapper.");
tagged_wrapper!(ExplicitContextTag2, Tag::context_explicit(2), "Explicit `[2]` wrapper.");
tagged_wrapper!(ExplicitContextTag3, Tag::context_explicit(3), "Explicit `[3]` wrapper.");
tagged_wrapper!(ExplicitContextTag4, Tag::context_explicit(4), "Explicit `[4]` wrapper.");
tagged_wrapper!(ExplicitContextTag5, Tag::context_explicit(5), "Explicit `[5]` wrapper.");
tagged_wrapper!(ExplicitContextTag6, Tag::context_explicit(6), "Explicit `[6]` wrapper.");
tagged_wrapper!(ExplicitContextTag7, Tag::context_explicit(7), "Explicit `[7]` wrapper.");
tagged_wrapper!(ExplicitContextTag8, Tag::context_explicit(8), "Explicit `[8]` wrapper.");
tagged_wrapper!(ImplicitContextTag0, Tag::context_implicit(0), "Implicit `[0]` wrapper.");
tagged_wrapper!(ImplicitContextTag1, Tag::context_implicit(1), "Implicit `[1]` wrapper.");
tagged_wrapper!(ImplicitContextTag2, Tag::context_implicit(2), "Implicit `[2]` wrapper.");
tagged_wrapper!(ImplicitContextTag3, Tag::context_implicit(3), "Implicit `[3]` wrapper.");
tagged_wrapper!(ImplicitContextTag4, Tag::context_implicit(4), "Implicit `[4]` wrapper.");
tagged_wrapper!(ImplicitContextTag5, Tag::context_implicit(5), "Implicit `[5]` wrapper.");
tagged_wrapper!(ImplicitContextTag6, Tag::context_implicit(6), "Implicit `[6]` wrapper.");
tagged_wrapper!(ImplicitContextTag7, Tag::context_implicit(7), "Implicit `[7]` wrapper.");
tagged_wrapper!(ImplicitContextTag8, Tag::context_implicit(8), "Implicit `[8]` wrapper.");
tagged_wrapper!(
    OctetStringAsn1Container,
    Tag::OCTET_STRING,
    "A value whose encoding is nested inside an OCTET STRING."
);
tagged_wrapper!(
    BitStringAsn1Container,
    Tag::BIT_STRING,
    "A value whose encoding is nested inside a BIT STRING (no unused bits)."
);

/// OBJECT IDENTIFIER
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectIdentifierAsn1(pub ObjectIdentifier);

impl Asn1Type for ObjectIdentifierAsn1 {
    const TAG: Tag = Tag::OID;
    const NAME: &'static str = "ObjectIdentifierAsn1";
}

impl From<ObjectIdentifier> for ObjectIdentifierAsn1 {
    fn from(oid: ObjectIdentifier) -> Self {
        Self(oid)
    }
}

impl From<ObjectIdentifierAsn1> for ObjectIdentifier {
    fn from(wrapper: ObjectIdentifierAsn1) -> Self {
        wrapper.0
    }
}

impl Deref for ObjectIdentifierAsn1 {
    type Target = ObjectIdentifier;

    fn deref(&self) -> &ObjectIdentifier {
        &self.0
    }
}

impl ser::Serialize for ObjectIdentifierAsn1 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        let encoded: Vec<u8> = self.0.clone().into();
        serializer.serialize_newtype_struct(Self::NAME, &SerializeRaw(&encoded))
    }
}

impl<'de> de::Deserialize<'de> for ObjectIdentifierAsn1 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = ObjectIdentifierAsn1;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid DER-encoded object identifier")
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                ObjectIdentifier::try_from(v)
                    .map(ObjectIdentifierAsn1)
                    .map_err(|_| E::invalid_value(de::Unexpected::Bytes(v), &"a valid object identifier"))
            }
        }

        deserializer.deserialize_bytes(Visitor)
    }
}

/// INTEGER, kept as its raw big-endian two's-complement content octets so
/// arbitrary-precision values round-trip untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct IntegerAsn1(pub Vec<u8>);

impl Asn1Type for IntegerAsn1 {
    const TAG: Tag = Tag::INTEGER;
    const NAME: &'static str = "IntegerAsn1";
}

impl IntegerAsn1 {
    pub fn is_negative(&self) -> bool {
        self.0.first().is_some_and(|b| b & 0x80 != 0)
    }

    /// The magnitude bytes, leading sign/padding zeros stripped.
    pub fn as_unsigned_bytes_be(&self) -> &[u8] {
        let upper = self.0.len().saturating_sub(1);
        let start = self.0[..upper].iter().take_while(|b| **b == 0).count();
        &self.0[start..]
    }

    pub fn from_bytes_be_signed(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Builds a non-negative INTEGER in minimal two's-complement form.
    pub fn from_bytes_be_unsigned(bytes: Vec<u8>) -> Self {
        let start = bytes.iter().take_while(|b| **b == 0).count();
        let mut content = bytes[start..].to_vec();
        if content.is_empty() {
            content.push(0x00);
        } else if content[0] & 0x80 != 0 {
            content.insert(0, 0x00);
        }
        Self(content)
    }
}

impl From<Vec<u8>> for IntegerAsn1 {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl ser::Serialize for IntegerAsn1 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_newtype_struct(Self::NAME, &SerializeRaw(&self.0))
    }
}

impl<'de> de::Deserialize<'de> for IntegerAsn1 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = IntegerAsn1;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid DER-encoded integer")
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if v.is_empty() {
                    return Err(E::invalid_value(
                        de::Unexpected::Other("empty integer content"),
                        &"at least one content octet",
                    ));
                }
                Ok(IntegerAsn1(v.to_vec()))
            }
        }

        deserializer.deserialize_bytes(Visitor)
    }
}

/// OCTET STRING
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct OctetStringAsn1(pub Vec<u8>);

impl Asn1Type for OctetStringAsn1 {
    const TAG: Tag = Tag::OCTET_STRING;
    const NAME: &'static str = "OctetStringAsn1";
}

impl From<Vec<u8>> for OctetStringAsn1 {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl Deref for OctetStringAsn1 {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.0
    }
}

impl ser::Serialize for OctetStringAsn1 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_newtype_struct(Self::NAME, &SerializeRaw(&self.0))
    }
}

impl<'de> de::Deserialize<'de> for OctetStringAsn1 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = OctetStringAsn1;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid DER-encoded octet string")
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(OctetStringAsn1(v.to_vec()))
            }

            fn visit_byte_buf<E>(self, v: Vec<u8>) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(OctetStringAsn1(v))
            }
        }

        deserializer.deserialize_byte_buf(Visitor)
    }
}

/// BIT STRING
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitStringAsn1(pub BitString);

impl Asn1Type for BitStringAsn1 {
    const TAG: Tag = Tag::BIT_STRING;
    const NAME: &'static str = "BitStringAsn1";
}

impl From<BitString> for BitStringAsn1 {
    fn from(bit_string: BitString) -> Self {
        Self(bit_string)
    }
}

impl Deref for BitStringAsn1 {
    type Target = BitString;

    fn deref(&self) -> &BitString {
        &self.0
    }
}

impl DerefMut for BitStringAsn1 {
    fn deref_mut(&mut self) -> &mut BitString {
        &mut self.0
    }
}

impl ser::Serialize for BitStringAsn1 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_newtype_struct(Self::NAME, &SerializeRaw(self.0.raw_view()))
    }
}

impl<'de> de::Deserialize<'de> for BitStringAsn1 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = BitStringAsn1;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid DER-encoded bit string")
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                BitString::try_from(v)
                    .map(BitStringAsn1)
                    .map_err(|_| E::invalid_value(de::Unexpected::Bytes(v), &"a valid bit string"))
            }
        }

        deserializer.deserialize_bytes(Visitor)
    }
}

/// ENUMERATED, restricted to values fitting an `u32` (plenty for the
/// protocol enums this crate family deals with).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EnumeratedAsn1(pub u32);

impl Asn1Type for EnumeratedAsn1 {
    const TAG: Tag = Tag::ENUMERATED;
    const NAME: &'static str = "EnumeratedAsn1";
}

impl From<u32> for EnumeratedAsn1 {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

fn minimal_unsigned_be(value: u32) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let start = bytes[..3].iter().take_while(|b| **b == 0).count();
    let mut content = bytes[start..].to_vec();
    if content[0] & 0x80 != 0 {
        content.insert(0, 0x00);
    }
    content
}

impl ser::Serialize for EnumeratedAsn1 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_newtype_struct(Self::NAME, &SerializeRaw(&minimal_unsigned_be(self.0)))
    }
}

impl<'de> de::Deserialize<'de> for EnumeratedAsn1 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = EnumeratedAsn1;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid DER-encoded enumerated value")
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if v.is_empty() || v[0] & 0x80 != 0 {
                    return Err(E::invalid_value(
                        de::Unexpected::Bytes(v),
                        &"a non-negative enumerated value",
                    ));
                }
                let start = v[..v.len() - 1].iter().take_while(|b| **b == 0).count();
                let content = &v[start..];
                if content.len() > 4 {
                    return Err(E::invalid_value(
                        de::Unexpected::Bytes(v),
                        &"an enumerated value fitting 32 bits",
                    ));
                }
                let value = content.iter().fold(0u32, |acc, b| (acc << 8) | u32::from(*b));
                Ok(EnumeratedAsn1(value))
            }
        }

        deserializer.deserialize_bytes(Visitor)
    }
}

macro_rules! string_wrapper {
    ($ty:ident($inner:ident), $tag:expr, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $ty(pub $inner);

        impl Asn1Type for $ty {
            const TAG: Tag = $tag;
            const NAME: &'static str = stringify!($ty);
        }

        impl From<$inner> for $ty {
            fn from(inner: $inner) -> Self {
                Self(inner)
            }
        }

        impl Deref for $ty {
            type Target = $inner;

            fn deref(&self) -> &$inner {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ser::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ser::Serializer,
            {
                serializer.serialize_newtype_struct(Self::NAME, &SerializeRaw(self.0.as_bytes()))
            }
        }

        impl<'de> de::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: de::Deserializer<'de>,
            {
                struct Visitor;

                impl<'de> de::Visitor<'de> for Visitor {
                    type Value = $ty;

                    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                        formatter.write_str(concat!("a valid DER-encoded ", stringify!($ty)))
                    }

                    fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
                    where
                        E: de::Error,
                    {
                        $inner::new(v.to_vec())
                            .map($ty)
                            .map_err(|_| E::invalid_value(de::Unexpected::Bytes(v), &self))
                    }
                }

                deserializer.deserialize_byte_buf(Visitor)
            }
        }
    };
}

string_wrapper!(
    PrintableStringAsn1(PrintableString),
    Tag::PRINTABLE_STRING,
    "PrintableString"
);
string_wrapper!(IA5StringAsn1(IA5String), Tag::IA5_STRING, "IA5String");
string_wrapper!(BmpStringAsn1(BmpString), Tag::BMP_STRING, "BMPString (opaque UTF-16BE)");

/// UTF8String
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Utf8StringAsn1(pub String);

impl Asn1Type for Utf8StringAsn1 {
    const TAG: Tag = Tag::UTF8_STRING;
    const NAME: &'static str = "Utf8StringAsn1";
}

impl From<String> for Utf8StringAsn1 {
    fn from(string: String) -> Self {
        Self(string)
    }
}

impl From<&str> for Utf8StringAsn1 {
    fn from(string: &str) -> Self {
        Self(string.to_owned())
    }
}

impl Deref for Utf8StringAsn1 {
    type Target = String;

    fn deref(&self) -> &String {
        &self.0
    }
}

impl fmt::Display for Utf8StringAsn1 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl ser::Serialize for Utf8StringAsn1 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_newtype_struct(Self::NAME, &SerializeRaw(self.0.as_bytes()))
    }
}

impl<'de> de::Deserialize<'de> for Utf8StringAsn1 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = Utf8StringAsn1;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid DER-encoded UTF8String")
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                std::str::from_utf8(v)
                    .map(|s| Utf8StringAsn1(s.to_owned()))
                    .map_err(|_| E::invalid_value(de::Unexpected::Bytes(v), &"valid UTF-8"))
            }

            fn visit_byte_buf<E>(self, v: Vec<u8>) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                String::from_utf8(v)
                    .map(Utf8StringAsn1)
                    .map_err(|_| E::invalid_value(de::Unexpected::Other("invalid UTF-8"), &"valid UTF-8"))
            }
        }

        deserializer.deserialize_byte_buf(Visitor)
    }
}

/// UTCTime
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UTCTimeAsn1(pub UTCTime);

impl Asn1Type for UTCTimeAsn1 {
    const TAG: Tag = Tag::UTC_TIME;
    const NAME: &'static str = "UTCTimeAsn1";
}

impl From<UTCTime> for UTCTimeAsn1 {
    fn from(date: UTCTime) -> Self {
        Self(date)
    }
}

impl Deref for UTCTimeAsn1 {
    type Target = UTCTime;

    fn deref(&self) -> &UTCTime {
        &self.0
    }
}

impl ser::Serialize for UTCTimeAsn1 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_newtype_struct(Self::NAME, &self.0)
    }
}

impl<'de> de::Deserialize<'de> for UTCTimeAsn1 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        <UTCTime as de::Deserialize>::deserialize(deserializer).map(Self)
    }
}

/// GeneralizedTime
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeneralizedTimeAsn1(pub GeneralizedTime);

impl Asn1Type for GeneralizedTimeAsn1 {
    const TAG: Tag = Tag::GENERALIZED_TIME;
    const NAME: &'static str = "GeneralizedTimeAsn1";
}

impl From<GeneralizedTime> for GeneralizedTimeAsn1 {
    fn from(date: GeneralizedTime) -> Self {
        Self(date)
    }
}

impl Deref for GeneralizedTimeAsn1 {
    type Target = GeneralizedTime;

    fn deref(&self) -> &GeneralizedTime {
        &self.0
    }
}

impl ser::Serialize for GeneralizedTimeAsn1 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_newtype_struct(Self::NAME, &self.0)
    }
}

impl<'de> de::Deserialize<'de> for GeneralizedTimeAsn1 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        <GeneralizedTime as de::Deserialize>::deserialize(deserializer).map(Self)
    }
}

macro_rules! collection_wrapper {
    ($ty:ident, $tag:expr, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $ty<T>(pub Vec<T>);

        impl<T> Default for $ty<T> {
            fn default() -> Self {
                Self(Vec::new())
            }
        }

        impl<T> Asn1Type for $ty<T> {
            const TAG: Tag = $tag;
            const NAME: &'static str = stringify!($ty);
        }

        impl<T> From<Vec<T>> for $ty<T> {
            fn from(values: Vec<T>) -> Self {
                Self(values)
            }
        }

        impl<T> Deref for $ty<T> {
            type Target = Vec<T>;

            fn deref(&self) -> &Vec<T> {
                &self.0
            }
        }

        impl<T> DerefMut for $ty<T> {
            fn deref_mut(&mut self) -> &mut Vec<T> {
                &mut self.0
            }
        }

        impl<T: ser::Serialize> ser::Serialize for $ty<T> {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ser::Serializer,
            {
                serializer.serialize_newtype_struct(Self::NAME, &self.0)
            }
        }

        impl<'de, T: de::Deserialize<'de>> de::Deserialize<'de> for $ty<T> {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: de::Deserializer<'de>,
            {
                <Vec<T> as de::Deserialize<'de>>::deserialize(deserializer).map($ty)
            }
        }
    };
}

collection_wrapper!(Asn1SequenceOf, Tag::SEQUENCE, "SEQUENCE OF");
collection_wrapper!(Asn1SetOf, Tag::SET, "SET OF");
