use serde::de;
use std::fmt;

/// An ASN.1 identifier octet.
///
/// Context-specific tags come in two flavors here: the "explicit" constant
/// (`0xA0 | number`, constructed) used by wrappers that add a header around
/// the inner encoding, and the "implicit" constant (`0x80 | number`) used by
/// wrappers that replace the inner header. For an implicitly tagged
/// constructed value the constructed bit is set on the wire; codecs compare
/// with [`Tag::to_constructed`] to account for that.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Tag(u8);

impl Tag {
    pub const BOOLEAN: Self = Tag(0x01);
    pub const INTEGER: Self = Tag(0x02);
    pub const BIT_STRING: Self = Tag(0x03);
    pub const OCTET_STRING: Self = Tag(0x04);
    pub const NULL: Self = Tag(0x05);
    pub const OID: Self = Tag(0x06);
    pub const ENUMERATED: Self = Tag(0x0A);
    pub const UTF8_STRING: Self = Tag(0x0C);
    pub const PRINTABLE_STRING: Self = Tag(0x13);
    pub const TELETEX_STRING: Self = Tag(0x14);
    pub const IA5_STRING: Self = Tag(0x16);
    pub const UTC_TIME: Self = Tag(0x17);
    pub const GENERALIZED_TIME: Self = Tag(0x18);
    pub const BMP_STRING: Self = Tag(0x1E);
    pub const SEQUENCE: Self = Tag(0x30);
    pub const SET: Self = Tag(0x31);

    /// Constructed context-specific tag, used by explicit wrappers.
    #[inline]
    pub const fn context_explicit(number: u8) -> Self {
        Tag(0xA0 | number)
    }

    /// Primitive-coded context-specific tag, used by implicit wrappers.
    #[inline]
    pub const fn context_implicit(number: u8) -> Self {
        Tag(0x80 | number)
    }

    #[inline]
    pub const fn number(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_context_specific(self) -> bool {
        self.0 & 0xC0 == 0x80
    }

    #[inline]
    pub const fn is_constructed(self) -> bool {
        self.0 & 0x20 != 0
    }

    #[inline]
    pub const fn is_explicit_context(self) -> bool {
        self.0 & 0xE0 == 0xA0
    }

    #[inline]
    pub const fn is_implicit_context(self) -> bool {
        self.0 & 0xE0 == 0x80
    }

    #[inline]
    pub const fn to_constructed(self) -> Self {
        Tag(self.0 | 0x20)
    }
}

impl From<u8> for Tag {
    fn from(tag: u8) -> Self {
        Self(tag)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Tag::BOOLEAN => write!(f, "BOOLEAN"),
            Tag::INTEGER => write!(f, "INTEGER"),
            Tag::BIT_STRING => write!(f, "BIT STRING"),
            Tag::OCTET_STRING => write!(f, "OCTET STRING"),
            Tag::NULL => write!(f, "NULL"),
            Tag::OID => write!(f, "OBJECT IDENTIFIER"),
            Tag::ENUMERATED => write!(f, "ENUMERATED"),
            Tag::UTF8_STRING => write!(f, "UTF8String"),
            Tag::PRINTABLE_STRING => write!(f, "PrintableString"),
            Tag::TELETEX_STRING => write!(f, "TeletexString"),
            Tag::IA5_STRING => write!(f, "IA5String"),
            Tag::UTC_TIME => write!(f, "UTCTime"),
            Tag::GENERALIZED_TIME => write!(f, "GeneralizedTime"),
            Tag::BMP_STRING => write!(f, "BMPString"),
            Tag::SEQUENCE => write!(f, "SEQUENCE"),
            Tag::SET => write!(f, "SET"),
            tag if tag.is_context_specific() => {
                write!(
                    f,
                    "[{}] ({})",
                    tag.0 & 0x1F,
                    if tag.is_constructed() { "constructed" } else { "primitive" }
                )
            }
            unknown => write!(f, "UNKNOWN({})", unknown.0),
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tag({}[{}])", self, self.0)
    }
}

/// Reads the next tag without consuming it, through
/// `Deserializer::deserialize_identifier`. Used to implement ASN.1 CHOICE and
/// trailing OPTIONAL fields.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagPeeker {
    pub next_tag: Tag,
}

impl<'de> de::Deserialize<'de> for TagPeeker {
    fn deserialize<D>(deserializer: D) -> Result<TagPeeker, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = TagPeeker;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid ASN.1 tag")
            }

            fn visit_u8<E>(self, v: u8) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(TagPeeker { next_tag: v.into() })
            }
        }

        deserializer.deserialize_identifier(Visitor)
    }
}
