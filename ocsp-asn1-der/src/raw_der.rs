use serde::{de, ser};
use std::fmt;

/// One DER object kept verbatim, header included.
///
/// Deserializing captures the exact wire bytes of the next TLV; serializing
/// writes them back untouched. This is what lets a signed structure (such as
/// an OCSP `tbsResponseData`) be verified over the bytes it arrived in
/// rather than over a re-encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Asn1RawDer(pub Vec<u8>);

impl Asn1RawDer {
    pub const NAME: &'static str = "Asn1RawDer";
}

impl AsRef<[u8]> for Asn1RawDer {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

struct RawBytes<'a>(&'a [u8]);

impl ser::Serialize for RawBytes<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_bytes(self.0)
    }
}

impl ser::Serialize for Asn1RawDer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_newtype_struct(Self::NAME, &RawBytes(&self.0))
    }
}

impl<'de> de::Deserialize<'de> for Asn1RawDer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = Asn1RawDer;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a raw DER object")
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Asn1RawDer(v.to_vec()))
            }

            fn visit_byte_buf<E>(self, v: Vec<u8>) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Asn1RawDer(v))
            }
        }

        deserializer.deserialize_newtype_struct(Self::NAME, Visitor)
    }
}
