use ocsp_asn1::tag::{Tag, TagPeeker};
use ocsp_asn1::wrapper::{GeneralizedTimeAsn1, UTCTimeAsn1};
use serde::{de, ser, Deserialize, Serialize};
use std::fmt;

/// https://tools.ietf.org/html/rfc5280#section-4.1.2.5
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct Validity {
    pub not_before: Time,
    pub not_after: Time,
}

/// The UTCTime / GeneralizedTime CHOICE used by certificate validity.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Time {
    Utc(UTCTimeAsn1),
    Generalized(GeneralizedTimeAsn1),
}

impl Time {
    pub fn year(&self) -> u16 {
        match self {
            Time::Utc(date) => date.year(),
            Time::Generalized(date) => date.year(),
        }
    }
}

impl ser::Serialize for Time {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        match self {
            Time::Utc(date) => date.serialize(serializer),
            Time::Generalized(date) => date.serialize(serializer),
        }
    }
}

impl<'de> de::Deserialize<'de> for Time {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = Time;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid DER-encoded Time")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let peeked = seq
                    .next_element::<TagPeeker>()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                match peeked.next_tag {
                    Tag::UTC_TIME => Ok(Time::Utc(
                        seq.next_element()?
                            .ok_or_else(|| de::Error::invalid_length(0, &self))?,
                    )),
                    Tag::GENERALIZED_TIME => Ok(Time::Generalized(
                        seq.next_element()?
                            .ok_or_else(|| de::Error::invalid_length(0, &self))?,
                    )),
                    _ => Err(de::Error::invalid_value(
                        de::Unexpected::Other("unsupported time tag"),
                        &"a UTCTime or GeneralizedTime",
                    )),
                }
            }
        }

        deserializer.deserialize_enum("Time", &["Utc", "Generalized"], Visitor)
    }
}
