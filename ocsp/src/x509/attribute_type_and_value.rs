use crate::oids;
use ocsp_asn1::restricted_string::PrintableString;
use ocsp_asn1::tag::{Tag, TagPeeker};
use ocsp_asn1::wrapper::{
    BmpStringAsn1, IA5StringAsn1, ObjectIdentifierAsn1, PrintableStringAsn1, Utf8StringAsn1,
};
use ocsp_asn1_der::Asn1RawDer;
use serde::{de, ser};
use std::borrow::Cow;
use std::fmt;

/// https://tools.ietf.org/html/rfc5280#section-4.1.2.4
///
/// The value is kept in whatever string form the certificate used so a
/// decoded Name re-encodes byte-identically; that is what the CertID
/// issuer-name hash is computed over.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct AttributeTypeAndValue {
    pub ty: ObjectIdentifierAsn1,
    pub value: DirectoryString,
}

impl AttributeTypeAndValue {
    pub fn new_common_name<S: Into<DirectoryString>>(name: S) -> Self {
        Self {
            ty: oids::at_common_name().into(),
            value: name.into(),
        }
    }

    pub fn new_country_name<S: Into<DirectoryString>>(name: S) -> Self {
        Self {
            ty: oids::at_country_name().into(),
            value: name.into(),
        }
    }

    pub fn new_organization_name<S: Into<DirectoryString>>(name: S) -> Self {
        Self {
            ty: oids::at_organization_name().into(),
            value: name.into(),
        }
    }

    pub fn new_organizational_unit_name<S: Into<DirectoryString>>(name: S) -> Self {
        Self {
            ty: oids::at_organizational_unit_name().into(),
            value: name.into(),
        }
    }
}

impl ser::Serialize for AttributeTypeAndValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        use ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element(&self.ty)?;
        seq.serialize_element(&self.value)?;
        seq.end()
    }
}

impl<'de> de::Deserialize<'de> for AttributeTypeAndValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = AttributeTypeAndValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid DER-encoded AttributeTypeAndValue")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let ty: ObjectIdentifierAsn1 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let value: DirectoryString = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                Ok(AttributeTypeAndValue { ty, value })
            }
        }

        deserializer.deserialize_seq(Visitor)
    }
}

/// The string CHOICE of X.520 attribute values.
///
/// Tags outside the common four are carried as raw DER so exotic names
/// still round-trip.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum DirectoryString {
    PrintableString(PrintableStringAsn1),
    Utf8String(Utf8StringAsn1),
    Ia5String(IA5StringAsn1),
    BmpString(BmpStringAsn1),
    Raw(Asn1RawDer),
}

impl DirectoryString {
    pub fn to_utf8_lossy(&self) -> Cow<'_, str> {
        match self {
            DirectoryString::PrintableString(s) => String::from_utf8_lossy(s.as_bytes()),
            DirectoryString::Utf8String(s) => Cow::Borrowed(s.0.as_str()),
            DirectoryString::Ia5String(s) => String::from_utf8_lossy(s.as_bytes()),
            DirectoryString::BmpString(s) => Cow::Owned(s.to_string()),
            DirectoryString::Raw(_) => Cow::Borrowed(""),
        }
    }
}

impl fmt::Display for DirectoryString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_utf8_lossy())
    }
}

impl From<&str> for DirectoryString {
    fn from(string: &str) -> Self {
        Self::Utf8String(string.into())
    }
}

impl From<String> for DirectoryString {
    fn from(string: String) -> Self {
        Self::Utf8String(string.into())
    }
}

impl From<PrintableString> for DirectoryString {
    fn from(string: PrintableString) -> Self {
        Self::PrintableString(string.into())
    }
}

impl ser::Serialize for DirectoryString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        match self {
            DirectoryString::PrintableString(s) => s.serialize(serializer),
            DirectoryString::Utf8String(s) => s.serialize(serializer),
            DirectoryString::Ia5String(s) => s.serialize(serializer),
            DirectoryString::BmpString(s) => s.serialize(serializer),
            DirectoryString::Raw(raw) => raw.serialize(serializer),
        }
    }
}

impl<'de> de::Deserialize<'de> for DirectoryString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = DirectoryString;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid DER-encoded DirectoryString")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let peeked = seq
                    .next_element::<TagPeeker>()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let value = match peeked.next_tag {
                    Tag::PRINTABLE_STRING => DirectoryString::PrintableString(
                        seq.next_element()?
                            .ok_or_else(|| de::Error::invalid_length(0, &self))?,
                    ),
                    Tag::UTF8_STRING => DirectoryString::Utf8String(
                        seq.next_element()?
                            .ok_or_else(|| de::Error::invalid_length(0, &self))?,
                    ),
                    Tag::IA5_STRING => DirectoryString::Ia5String(
                        seq.next_element()?
                            .ok_or_else(|| de::Error::invalid_length(0, &self))?,
                    ),
                    Tag::BMP_STRING => DirectoryString::BmpString(
                        seq.next_element()?
                            .ok_or_else(|| de::Error::invalid_length(0, &self))?,
                    ),
                    _ => DirectoryString::Raw(
                        seq.next_element()?
                            .ok_or_else(|| de::Error::invalid_length(0, &self))?,
                    ),
                };
                Ok(value)
            }
        }

        deserializer.deserialize_enum("DirectoryString", &["PrintableString", "Utf8String"], Visitor)
    }
}
