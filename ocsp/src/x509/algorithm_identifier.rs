use crate::hash::HashAlgorithm;
use crate::oids;
use ocsp_asn1::tag::{Tag, TagPeeker};
use ocsp_asn1::wrapper::ObjectIdentifierAsn1;
use ocsp_asn1_der::Asn1RawDer;
use serde::{de, ser};
use std::fmt;

/// https://tools.ietf.org/html/rfc5280#section-4.1.1.2
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct AlgorithmIdentifier {
    pub algorithm: ObjectIdentifierAsn1,
    pub parameters: AlgorithmIdentifierParameters,
}

impl AlgorithmIdentifier {
    pub fn new_hash(hash: HashAlgorithm) -> Self {
        Self {
            algorithm: hash.oid().into(),
            parameters: AlgorithmIdentifierParameters::Null,
        }
    }

    pub fn new_sha1() -> Self {
        Self::new_hash(HashAlgorithm::SHA1)
    }

    pub fn new_sha256() -> Self {
        Self::new_hash(HashAlgorithm::SHA2_256)
    }

    pub fn new_rsa_encryption() -> Self {
        Self {
            algorithm: oids::rsa_encryption().into(),
            parameters: AlgorithmIdentifierParameters::Null,
        }
    }

    pub fn new_sha256_with_rsa_encryption() -> Self {
        Self {
            algorithm: oids::sha256_with_rsa_encryption().into(),
            parameters: AlgorithmIdentifierParameters::Null,
        }
    }

    pub fn new_ecdsa_with_sha256() -> Self {
        Self {
            algorithm: oids::ecdsa_with_sha256().into(),
            parameters: AlgorithmIdentifierParameters::None,
        }
    }

    pub fn new_ecdsa_with_sha384() -> Self {
        Self {
            algorithm: oids::ecdsa_with_sha384().into(),
            parameters: AlgorithmIdentifierParameters::None,
        }
    }

    pub fn new_elliptic_curve(curve: oid::ObjectIdentifier) -> Self {
        Self {
            algorithm: oids::ec_public_key().into(),
            parameters: AlgorithmIdentifierParameters::NamedCurve(curve.into()),
        }
    }

    /// Symbolic name of the algorithm OID, dotted-decimal if unknown.
    pub fn symbolic_name(&self) -> String {
        oids::symbolic_name(&self.algorithm.0)
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AlgorithmIdentifierParameters {
    None,
    Null,
    NamedCurve(ObjectIdentifierAsn1),
    /// anything else, kept verbatim so the structure re-encodes untouched
    Unknown(Asn1RawDer),
}

impl ser::Serialize for AlgorithmIdentifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        use ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element(&self.algorithm)?;
        match &self.parameters {
            AlgorithmIdentifierParameters::None => {}
            AlgorithmIdentifierParameters::Null => {
                seq.serialize_element(&())?;
            }
            AlgorithmIdentifierParameters::NamedCurve(curve) => {
                seq.serialize_element(curve)?;
            }
            AlgorithmIdentifierParameters::Unknown(raw) => {
                seq.serialize_element(raw)?;
            }
        }
        seq.end()
    }
}

impl<'de> de::Deserialize<'de> for AlgorithmIdentifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = AlgorithmIdentifier;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid DER-encoded algorithm identifier")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let algorithm: ObjectIdentifierAsn1 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;

                let parameters = match seq.next_element::<TagPeeker>()? {
                    None => AlgorithmIdentifierParameters::None,
                    Some(peeked) => match peeked.next_tag {
                        Tag::NULL => {
                            seq.next_element::<()>()?;
                            AlgorithmIdentifierParameters::Null
                        }
                        Tag::OID => AlgorithmIdentifierParameters::NamedCurve(
                            seq.next_element()?
                                .ok_or_else(|| de::Error::invalid_length(1, &self))?,
                        ),
                        _ => AlgorithmIdentifierParameters::Unknown(
                            seq.next_element()?
                                .ok_or_else(|| de::Error::invalid_length(1, &self))?,
                        ),
                    },
                };

                Ok(AlgorithmIdentifier { algorithm, parameters })
            }
        }

        deserializer.deserialize_seq(Visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha1_with_null_parameters() {
        let sha1 = AlgorithmIdentifier::new_sha1();
        let encoded = [0x30, 0x09, 0x06, 0x05, 0x2B, 0x0E, 0x03, 0x02, 0x1A, 0x05, 0x00];
        check_serde!(sha1: AlgorithmIdentifier in encoded);
    }

    #[test]
    fn ecdsa_with_absent_parameters() {
        let ecdsa = AlgorithmIdentifier::new_ecdsa_with_sha256();
        let encoded = [0x30, 0x0A, 0x06, 0x08, 0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x04, 0x03, 0x02];
        check_serde!(ecdsa: AlgorithmIdentifier in encoded);
    }

    #[test]
    fn named_curve_parameters() {
        let ec = AlgorithmIdentifier::new_elliptic_curve(crate::oids::secp256r1());
        let encoded = [
            0x30, 0x13, 0x06, 0x07, 0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x02, 0x01, 0x06, 0x08, 0x2A, 0x86, 0x48, 0xCE,
            0x3D, 0x03, 0x01, 0x07,
        ];
        check_serde!(ec: AlgorithmIdentifier in encoded);
    }
}
