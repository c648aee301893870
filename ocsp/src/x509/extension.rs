use crate::oids;
use ocsp_asn1::bit_string::BitString;
use ocsp_asn1::restricted_string::IA5String;
use ocsp_asn1::tag::{Tag, TagPeeker};
use ocsp_asn1::wrapper::{
    Asn1SequenceOf, BitStringAsn1, IA5StringAsn1, ImplicitContextTag6, ObjectIdentifierAsn1, OctetStringAsn1,
    OctetStringAsn1Container,
};
use ocsp_asn1_der::Asn1RawDer;
use serde::{de, ser, Deserialize, Serialize};
use std::fmt;

/// https://tools.ietf.org/html/rfc5280#section-4.1.2.9
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct Extensions(pub Vec<Extension>);

impl Extensions {
    pub fn find(&self, dotted_oid: &str) -> Option<&Extension> {
        self.0.iter().find(|ext| {
            let dotted: String = (&ext.extn_id.0).into();
            dotted == dotted_oid
        })
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Extension {
    pub extn_id: ObjectIdentifierAsn1,
    pub critical: bool,
    pub extn_value: ExtensionValue,
}

impl Extension {
    pub fn new_key_usage(key_usage: KeyUsage) -> Self {
        Self {
            extn_id: oids::key_usage().into(),
            // When present, conforming CAs SHOULD mark this extension as critical
            critical: true,
            extn_value: ExtensionValue::KeyUsage(key_usage.into()),
        }
    }

    pub fn new_subject_key_identifier<V: Into<Vec<u8>>>(ski: V) -> Self {
        Self {
            extn_id: oids::subject_key_identifier().into(),
            // Conforming CAs MUST mark this extension as non-critical
            critical: false,
            extn_value: ExtensionValue::SubjectKeyIdentifier(OctetStringAsn1(ski.into()).into()),
        }
    }

    pub fn new_basic_constraints<CA: Into<Option<bool>>, PLC: Into<Option<u8>>>(
        is_critical: bool,
        ca: CA,
        path_len_constraint: PLC,
    ) -> Self {
        Self {
            extn_id: oids::basic_constraints().into(),
            critical: is_critical,
            extn_value: ExtensionValue::BasicConstraints(
                BasicConstraints {
                    ca: ca.into(),
                    path_len_constraint: path_len_constraint.into(),
                }
                .into(),
            ),
        }
    }

    pub fn new_authority_info_access<V: Into<Vec<AccessDescription>>>(entries: V) -> Self {
        Self {
            extn_id: oids::id_pe_authority_info_access().into(),
            // Conforming CAs MUST mark this extension as non-critical
            critical: false,
            extn_value: ExtensionValue::AuthorityInfoAccess(Asn1SequenceOf(entries.into()).into()),
        }
    }

    pub fn new_ocsp_nonce<V: Into<Vec<u8>>>(nonce: V) -> Self {
        Self {
            extn_id: oids::id_pkix_ocsp_nonce().into(),
            critical: false,
            extn_value: ExtensionValue::OcspNonce(OctetStringAsn1(nonce.into()).into()),
        }
    }
}

impl ser::Serialize for Extension {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        use ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(3))?;
        seq.serialize_element(&self.extn_id)?;
        if self.critical {
            // DEFAULT FALSE is omitted
            seq.serialize_element(&self.critical)?;
        }
        seq.serialize_element(&self.extn_value)?;
        seq.end()
    }
}

impl<'de> de::Deserialize<'de> for Extension {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = Extension;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid DER-encoded extension")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let extn_id: ObjectIdentifierAsn1 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;

                let critical = match seq.next_element::<TagPeeker>()? {
                    Some(peeked) if peeked.next_tag == Tag::BOOLEAN => seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(1, &self))?,
                    _ => false,
                };

                let dotted: String = (&extn_id.0).into();
                let extn_value = match dotted.as_str() {
                    oids::ID_PE_AUTHORITY_INFO_ACCESS => ExtensionValue::AuthorityInfoAccess(
                        seq.next_element()?
                            .ok_or_else(|| de::Error::invalid_length(2, &self))?,
                    ),
                    oids::SUBJECT_KEY_IDENTIFIER => ExtensionValue::SubjectKeyIdentifier(
                        seq.next_element()?
                            .ok_or_else(|| de::Error::invalid_length(2, &self))?,
                    ),
                    oids::KEY_USAGE => ExtensionValue::KeyUsage(
                        seq.next_element()?
                            .ok_or_else(|| de::Error::invalid_length(2, &self))?,
                    ),
                    oids::BASIC_CONSTRAINTS => ExtensionValue::BasicConstraints(
                        seq.next_element()?
                            .ok_or_else(|| de::Error::invalid_length(2, &self))?,
                    ),
                    oids::ID_PKIX_OCSP_NONCE => ExtensionValue::OcspNonce(
                        seq.next_element()?
                            .ok_or_else(|| de::Error::invalid_length(2, &self))?,
                    ),
                    _ => ExtensionValue::Generic(
                        seq.next_element()?
                            .ok_or_else(|| de::Error::invalid_length(2, &self))?,
                    ),
                };

                Ok(Extension {
                    extn_id,
                    critical,
                    extn_value,
                })
            }
        }

        deserializer.deserialize_seq(Visitor)
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ExtensionValue {
    AuthorityInfoAccess(OctetStringAsn1Container<Asn1SequenceOf<AccessDescription>>),
    SubjectKeyIdentifier(OctetStringAsn1Container<OctetStringAsn1>),
    KeyUsage(OctetStringAsn1Container<KeyUsage>),
    BasicConstraints(OctetStringAsn1Container<BasicConstraints>),
    /// the OCSP nonce: an OCTET STRING nested in the extension value
    OcspNonce(OctetStringAsn1Container<OctetStringAsn1>),
    /// any extension this library does not interpret
    Generic(OctetStringAsn1),
}

impl ser::Serialize for ExtensionValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        match self {
            ExtensionValue::AuthorityInfoAccess(aia) => aia.serialize(serializer),
            ExtensionValue::SubjectKeyIdentifier(ski) => ski.serialize(serializer),
            ExtensionValue::KeyUsage(key_usage) => key_usage.serialize(serializer),
            ExtensionValue::BasicConstraints(bc) => bc.serialize(serializer),
            ExtensionValue::OcspNonce(nonce) => nonce.serialize(serializer),
            ExtensionValue::Generic(octet_string) => octet_string.serialize(serializer),
        }
    }
}

/// https://tools.ietf.org/html/rfc5280#section-4.2.2.1
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct AccessDescription {
    pub access_method: ObjectIdentifierAsn1,
    pub access_location: GeneralName,
}

/// The slice of the RFC 5280 GeneralName CHOICE this library interprets:
/// AIA locations are URIs in practice; everything else round-trips raw.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum GeneralName {
    Uri(ImplicitContextTag6<IA5StringAsn1>),
    Other(Asn1RawDer),
}

impl GeneralName {
    pub fn new_uri(uri: IA5String) -> Self {
        Self::Uri(ImplicitContextTag6(uri.into()))
    }

    pub fn uri(&self) -> Option<String> {
        match self {
            GeneralName::Uri(uri) => Some(uri.0 .0.to_string()),
            GeneralName::Other(_) => None,
        }
    }
}

impl ser::Serialize for GeneralName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        match self {
            GeneralName::Uri(uri) => uri.serialize(serializer),
            GeneralName::Other(raw) => raw.serialize(serializer),
        }
    }
}

impl<'de> de::Deserialize<'de> for GeneralName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = GeneralName;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid DER-encoded GeneralName")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let peeked = seq
                    .next_element::<TagPeeker>()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                if peeked.next_tag == Tag::context_implicit(6) {
                    Ok(GeneralName::Uri(
                        seq.next_element()?
                            .ok_or_else(|| de::Error::invalid_length(0, &self))?,
                    ))
                } else {
                    Ok(GeneralName::Other(
                        seq.next_element()?
                            .ok_or_else(|| de::Error::invalid_length(0, &self))?,
                    ))
                }
            }
        }

        deserializer.deserialize_enum("GeneralName", &["Uri", "Other"], Visitor)
    }
}

/// https://tools.ietf.org/html/rfc5280#section-4.2.1.3
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct KeyUsage(BitStringAsn1);

impl Default for KeyUsage {
    fn default() -> Self {
        Self::new(9)
    }
}

macro_rules! bit_string_get_set {
    ($getter:ident , $setter:ident , $idx:literal) => {
        pub fn $getter(&self) -> bool {
            self.0.is_set($idx)
        }

        pub fn $setter(&mut self, val: bool) {
            if self.0.get_num_bits() <= $idx {
                self.0.set_num_bits($idx + 1)
            }
            self.0.set($idx, val);
        }
    };
    ( $( $getter:ident , $setter:ident , $idx:literal ; )+ ) => {
        $( bit_string_get_set! { $getter, $setter, $idx } )+
    };
}

impl KeyUsage {
    pub fn new(num_bits: usize) -> Self {
        Self(BitString::with_len(num_bits).into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.payload_view()
    }

    bit_string_get_set! {
        digital_signature, set_digital_signature, 0;
        content_commitment, set_content_commitment, 1;
        key_encipherment, set_key_encipherment, 2;
        data_encipherment, set_data_encipherment, 3;
        key_agreement, set_key_agreement, 4;
        key_cert_sign, set_key_cert_sign, 5;
        crl_sign, set_crl_sign, 6;
        encipher_only, set_encipher_only, 7;
        decipher_only, set_decipher_only, 8;
    }
}

/// https://tools.ietf.org/html/rfc5280#section-4.2.1.9
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct BasicConstraints {
    pub ca: Option<bool>,
    pub path_len_constraint: Option<u8>,
}

impl ser::Serialize for BasicConstraints {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        use ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(2))?;
        if let Some(true) = self.ca {
            // DEFAULT FALSE is omitted
            seq.serialize_element(&true)?;
        }
        if let Some(path_len) = self.path_len_constraint {
            seq.serialize_element(&path_len)?;
        }
        seq.end()
    }
}

impl<'de> de::Deserialize<'de> for BasicConstraints {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = BasicConstraints;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid DER-encoded basic constraints extension")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut constraints = BasicConstraints::default();
                while let Some(peeked) = seq.next_element::<TagPeeker>()? {
                    match peeked.next_tag {
                        Tag::BOOLEAN => constraints.ca = seq.next_element()?,
                        Tag::INTEGER => constraints.path_len_constraint = seq.next_element()?,
                        _ => {
                            return Err(de::Error::invalid_value(
                                de::Unexpected::Other("unexpected element in basic constraints"),
                                &"a BOOLEAN or INTEGER",
                            ))
                        }
                    }
                }
                Ok(constraints)
            }
        }

        deserializer.deserialize_seq(Visitor)
    }
}
