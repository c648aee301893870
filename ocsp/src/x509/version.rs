use serde::{de, ser};
use std::fmt;

/// https://tools.ietf.org/html/rfc5280#section-4.1.2.1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    V1 = 0x00,
    V2 = 0x01,
    V3 = 0x02,
}

impl ser::Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> de::Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = Version;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid X.509 version number")
            }

            fn visit_u8<E>(self, v: u8) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                match v {
                    0x00 => Ok(Version::V1),
                    0x01 => Ok(Version::V2),
                    0x02 => Ok(Version::V3),
                    _ => Err(E::invalid_value(
                        de::Unexpected::Unsigned(u64::from(v)),
                        &"a version number in 0..=2",
                    )),
                }
            }
        }

        deserializer.deserialize_u8(Visitor)
    }
}
