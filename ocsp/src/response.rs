use crate::cert_id::CertId;
use crate::error::OcspError;
use crate::key::PublicKey;
use crate::oids;
use crate::signature::SignatureAlgorithm;
use crate::x509::{AlgorithmIdentifier, Certificate, Extensions, ExtensionValue, Name};
use ocsp_asn1::date::GeneralizedTime;
use ocsp_asn1::tag::{Tag, TagPeeker};
use ocsp_asn1::wrapper::{
    Asn1SequenceOf, BitStringAsn1, EnumeratedAsn1, ExplicitContextTag0, ExplicitContextTag1, ExplicitContextTag2,
    GeneralizedTimeAsn1, ImplicitContextTag0, ImplicitContextTag1, ImplicitContextTag2, ObjectIdentifierAsn1,
    OctetStringAsn1,
};
use ocsp_asn1_der::{Asn1DerError, Asn1RawDer};
use serde::{de, ser, Deserialize, Serialize};
use std::fmt;

/// OCSPResponseStatus ::= ENUMERATED { successful(0), malformedRequest(1),
/// internalError(2), tryLater(3), sigRequired(5), unauthorized(6) }
///
/// Values 4 and 7+ are reserved and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Successful,
    MalformedRequest,
    InternalError,
    TryLater,
    SigRequired,
    Unauthorized,
}

impl ResponseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseStatus::Successful => "successful",
            ResponseStatus::MalformedRequest => "malformedRequest",
            ResponseStatus::InternalError => "internalError",
            ResponseStatus::TryLater => "tryLater",
            ResponseStatus::SigRequired => "sigRequired",
            ResponseStatus::Unauthorized => "unauthorized",
        }
    }

    fn code(self) -> u32 {
        match self {
            ResponseStatus::Successful => 0,
            ResponseStatus::MalformedRequest => 1,
            ResponseStatus::InternalError => 2,
            ResponseStatus::TryLater => 3,
            ResponseStatus::SigRequired => 5,
            ResponseStatus::Unauthorized => 6,
        }
    }

    fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(ResponseStatus::Successful),
            1 => Some(ResponseStatus::MalformedRequest),
            2 => Some(ResponseStatus::InternalError),
            3 => Some(ResponseStatus::TryLater),
            5 => Some(ResponseStatus::SigRequired),
            6 => Some(ResponseStatus::Unauthorized),
            _ => None,
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ser::Serialize for ResponseStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        EnumeratedAsn1(self.code()).serialize(serializer)
    }
}

impl<'de> de::Deserialize<'de> for ResponseStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let value = EnumeratedAsn1::deserialize(deserializer)?;
        ResponseStatus::from_code(value.0).ok_or_else(|| {
            de::Error::invalid_value(
                de::Unexpected::Unsigned(u64::from(value.0)),
                &"a defined OCSPResponseStatus",
            )
        })
    }
}

/// CRLReason (RFC 5280 §5.3.1). Values outside the table fail decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrlReason {
    Unspecified,
    KeyCompromise,
    CaCompromise,
    AffiliationChanged,
    Superseded,
    CessationOfOperation,
    CertificateHold,
    RemoveFromCrl,
    PrivilegeWithdrawn,
    AaCompromise,
}

impl CrlReason {
    pub fn as_str(self) -> &'static str {
        match self {
            CrlReason::Unspecified => "unspecified",
            CrlReason::KeyCompromise => "keyCompromise",
            CrlReason::CaCompromise => "cACompromise",
            CrlReason::AffiliationChanged => "affiliationChanged",
            CrlReason::Superseded => "superseded",
            CrlReason::CessationOfOperation => "cessationOfOperation",
            CrlReason::CertificateHold => "certificateHold",
            CrlReason::RemoveFromCrl => "removeFromCRL",
            CrlReason::PrivilegeWithdrawn => "privilegeWithdrawn",
            CrlReason::AaCompromise => "aACompromise",
        }
    }

    fn code(self) -> u32 {
        match self {
            CrlReason::Unspecified => 0,
            CrlReason::KeyCompromise => 1,
            CrlReason::CaCompromise => 2,
            CrlReason::AffiliationChanged => 3,
            CrlReason::Superseded => 4,
            CrlReason::CessationOfOperation => 5,
            CrlReason::CertificateHold => 6,
            CrlReason::RemoveFromCrl => 8,
            CrlReason::PrivilegeWithdrawn => 9,
            CrlReason::AaCompromise => 10,
        }
    }

    fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(CrlReason::Unspecified),
            1 => Some(CrlReason::KeyCompromise),
            2 => Some(CrlReason::CaCompromise),
            3 => Some(CrlReason::AffiliationChanged),
            4 => Some(CrlReason::Superseded),
            5 => Some(CrlReason::CessationOfOperation),
            6 => Some(CrlReason::CertificateHold),
            8 => Some(CrlReason::RemoveFromCrl),
            9 => Some(CrlReason::PrivilegeWithdrawn),
            10 => Some(CrlReason::AaCompromise),
            _ => None,
        }
    }
}

impl ser::Serialize for CrlReason {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        EnumeratedAsn1(self.code()).serialize(serializer)
    }
}

impl<'de> de::Deserialize<'de> for CrlReason {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let value = EnumeratedAsn1::deserialize(deserializer)?;
        CrlReason::from_code(value.0).ok_or_else(|| {
            de::Error::invalid_value(de::Unexpected::Unsigned(u64::from(value.0)), &"a defined CRLReason")
        })
    }
}

/// ResponderID ::= CHOICE { byName [1] Name, byKey [2] KeyHash }
#[derive(Debug, PartialEq, Clone)]
pub enum ResponderId {
    ByName(ExplicitContextTag1<Name>),
    ByKey(ExplicitContextTag2<OctetStringAsn1>),
}

impl ResponderId {
    pub fn by_name(name: Name) -> Self {
        Self::ByName(ExplicitContextTag1(name))
    }

    pub fn by_key<V: Into<Vec<u8>>>(key_hash: V) -> Self {
        Self::ByKey(ExplicitContextTag2(OctetStringAsn1(key_hash.into())))
    }
}

impl ser::Serialize for ResponderId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        match self {
            ResponderId::ByName(name) => name.serialize(serializer),
            ResponderId::ByKey(key_hash) => key_hash.serialize(serializer),
        }
    }
}

impl<'de> de::Deserialize<'de> for ResponderId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = ResponderId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid DER-encoded ResponderID")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let peeked = seq
                    .next_element::<TagPeeker>()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                match peeked.next_tag {
                    tag if tag == Tag::context_explicit(1) => Ok(ResponderId::ByName(
                        seq.next_element()?
                            .ok_or_else(|| de::Error::invalid_length(0, &self))?,
                    )),
                    tag if tag == Tag::context_explicit(2) => Ok(ResponderId::ByKey(
                        seq.next_element()?
                            .ok_or_else(|| de::Error::invalid_length(0, &self))?,
                    )),
                    _ => Err(de::Error::invalid_value(
                        de::Unexpected::Other("unknown ResponderID choice"),
                        &"a byName or byKey responder id",
                    )),
                }
            }
        }

        deserializer.deserialize_enum("ResponderId", &["ByName", "ByKey"], Visitor)
    }
}

/// RevokedInfo ::= SEQUENCE { revocationTime GeneralizedTime,
/// revocationReason [0] EXPLICIT CRLReason OPTIONAL }
#[derive(Serialize, Debug, PartialEq, Clone)]
pub struct RevokedInfo {
    pub revocation_time: GeneralizedTimeAsn1,
    pub revocation_reason: Option<ExplicitContextTag0<CrlReason>>,
}

impl<'de> de::Deserialize<'de> for RevokedInfo {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = RevokedInfo;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid DER-encoded RevokedInfo")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let revocation_time = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let revocation_reason = match seq.next_element::<TagPeeker>()? {
                    Some(peeked) if peeked.next_tag == Tag::context_explicit(0) => seq.next_element()?,
                    _ => None,
                };
                Ok(RevokedInfo {
                    revocation_time,
                    revocation_reason,
                })
            }
        }

        deserializer.deserialize_seq(Visitor)
    }
}

/// CertStatus ::= CHOICE { good [0] IMPLICIT NULL,
/// revoked [1] IMPLICIT RevokedInfo, unknown [2] IMPLICIT UnknownInfo }
#[derive(Debug, PartialEq, Clone)]
pub enum CertStatus {
    Good(ImplicitContextTag0<()>),
    Revoked(ImplicitContextTag1<RevokedInfo>),
    Unknown(ImplicitContextTag2<()>),
}

impl CertStatus {
    pub fn good() -> Self {
        Self::Good(ImplicitContextTag0(()))
    }

    pub fn revoked(info: RevokedInfo) -> Self {
        Self::Revoked(ImplicitContextTag1(info))
    }

    pub fn unknown() -> Self {
        Self::Unknown(ImplicitContextTag2(()))
    }
}

impl ser::Serialize for CertStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        match self {
            CertStatus::Good(null) => null.serialize(serializer),
            CertStatus::Revoked(info) => info.serialize(serializer),
            CertStatus::Unknown(null) => null.serialize(serializer),
        }
    }
}

impl<'de> de::Deserialize<'de> for CertStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = CertStatus;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid DER-encoded CertStatus")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let peeked = seq
                    .next_element::<TagPeeker>()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                match peeked.next_tag {
                    tag if tag == Tag::context_implicit(0) => Ok(CertStatus::Good(
                        seq.next_element()?
                            .ok_or_else(|| de::Error::invalid_length(0, &self))?,
                    )),
                    // implicitly tagged constructed value: constructed bit set
                    tag if tag == Tag::context_implicit(1).to_constructed() => Ok(CertStatus::Revoked(
                        seq.next_element()?
                            .ok_or_else(|| de::Error::invalid_length(0, &self))?,
                    )),
                    tag if tag == Tag::context_implicit(2) => Ok(CertStatus::Unknown(
                        seq.next_element()?
                            .ok_or_else(|| de::Error::invalid_length(0, &self))?,
                    )),
                    _ => Err(de::Error::invalid_value(
                        de::Unexpected::Other("unknown certificate status choice"),
                        &"a good, revoked or unknown status",
                    )),
                }
            }
        }

        deserializer.deserialize_enum("CertStatus", &["Good", "Revoked", "Unknown"], Visitor)
    }
}

/// SingleResponse ::= SEQUENCE { certID CertID, certStatus CertStatus,
/// thisUpdate GeneralizedTime, nextUpdate [0] EXPLICIT OPTIONAL,
/// singleExtensions [1] EXPLICIT OPTIONAL }
#[derive(Serialize, Debug, PartialEq, Clone)]
pub struct SingleResponse {
    pub cert_id: CertId,
    pub cert_status: CertStatus,
    pub this_update: GeneralizedTimeAsn1,
    pub next_update: Option<ExplicitContextTag0<GeneralizedTimeAsn1>>,
    pub single_extensions: Option<ExplicitContextTag1<Extensions>>,
}

impl<'de> de::Deserialize<'de> for SingleResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = SingleResponse;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid DER-encoded SingleResponse")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let cert_id = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let cert_status = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let this_update = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(2, &self))?;

                let mut next_update = None;
                let mut single_extensions = None;
                while let Some(peeked) = seq.next_element::<TagPeeker>()? {
                    match peeked.next_tag {
                        tag if tag == Tag::context_explicit(0) && next_update.is_none() => {
                            next_update = seq.next_element()?;
                        }
                        tag if tag == Tag::context_explicit(1) && single_extensions.is_none() => {
                            single_extensions = seq.next_element()?;
                        }
                        _ => {
                            return Err(de::Error::invalid_value(
                                de::Unexpected::Other("unexpected element in SingleResponse"),
                                &"nextUpdate or singleExtensions",
                            ))
                        }
                    }
                }

                Ok(SingleResponse {
                    cert_id,
                    cert_status,
                    this_update,
                    next_update,
                    single_extensions,
                })
            }
        }

        deserializer.deserialize_seq(Visitor)
    }
}

/// ResponseData ::= SEQUENCE { version [0] EXPLICIT DEFAULT v1,
/// responderID ResponderID, producedAt GeneralizedTime,
/// responses SEQUENCE OF SingleResponse, responseExtensions [1] EXPLICIT OPTIONAL }
#[derive(Serialize, Debug, PartialEq, Clone)]
pub struct TbsResponseData {
    pub responder_id: ResponderId,
    pub produced_at: GeneralizedTimeAsn1,
    pub responses: Asn1SequenceOf<SingleResponse>,
    pub response_extensions: Option<ExplicitContextTag1<Extensions>>,
}

impl<'de> de::Deserialize<'de> for TbsResponseData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = TbsResponseData;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid DER-encoded ResponseData")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                // version, if present, is always v1
                if let Some(peeked) = seq.next_element::<TagPeeker>()? {
                    if peeked.next_tag == Tag::context_explicit(0) {
                        seq.next_element::<Asn1RawDer>()?
                            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                    }
                }

                let responder_id = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let produced_at = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let responses = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(2, &self))?;

                let response_extensions = match seq.next_element::<TagPeeker>()? {
                    Some(peeked) if peeked.next_tag == Tag::context_explicit(1) => seq.next_element()?,
                    _ => None,
                };

                Ok(TbsResponseData {
                    responder_id,
                    produced_at,
                    responses,
                    response_extensions,
                })
            }
        }

        deserializer.deserialize_seq(Visitor)
    }
}

/// ResponseBytes ::= SEQUENCE { responseType OBJECT IDENTIFIER, response OCTET STRING }
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct ResponseBytes {
    pub response_type: ObjectIdentifierAsn1,
    pub response: OctetStringAsn1,
}

/// The outer OCSPResponse envelope. Public mostly so responses can be built
/// in tests and tools; callers normally go through [`OcspResponse`].
#[derive(Serialize, Debug, PartialEq, Clone)]
pub struct OcspResponseEnvelope {
    pub response_status: ResponseStatus,
    pub response_bytes: Option<ExplicitContextTag0<ResponseBytes>>,
}

impl<'de> de::Deserialize<'de> for OcspResponseEnvelope {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = OcspResponseEnvelope;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid DER-encoded OCSPResponse")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let response_status = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let response_bytes = match seq.next_element::<TagPeeker>()? {
                    Some(peeked) if peeked.next_tag == Tag::context_explicit(0) => seq.next_element()?,
                    _ => None,
                };
                Ok(OcspResponseEnvelope {
                    response_status,
                    response_bytes,
                })
            }
        }

        deserializer.deserialize_seq(Visitor)
    }
}

/// BasicOCSPResponse ::= SEQUENCE { tbsResponseData ResponseData,
/// signatureAlgorithm AlgorithmIdentifier, signature BIT STRING,
/// certs [0] EXPLICIT SEQUENCE OF Certificate OPTIONAL }
///
/// The exact wire bytes of `tbsResponseData` are retained: the responder's
/// signature covers those bytes, not a re-encoding.
#[derive(Debug, PartialEq, Clone)]
pub struct BasicOcspResponse {
    pub tbs_response_data: TbsResponseData,
    pub signature_algorithm: AlgorithmIdentifier,
    pub signature: BitStringAsn1,
    pub certs: Vec<Certificate>,
    encoded_tbs_response_data: Vec<u8>,
}

impl BasicOcspResponse {
    /// Assembles a basic response, deriving the retained `tbsResponseData`
    /// encoding from `tbs_response_data`.
    pub fn new(
        tbs_response_data: TbsResponseData,
        signature_algorithm: AlgorithmIdentifier,
        signature: BitStringAsn1,
        certs: Vec<Certificate>,
    ) -> Result<Self, Asn1DerError> {
        let encoded_tbs_response_data = ocsp_asn1_der::to_vec(&tbs_response_data)?;
        Ok(Self {
            tbs_response_data,
            signature_algorithm,
            signature,
            certs,
            encoded_tbs_response_data,
        })
    }

    pub fn from_der(bytes: &[u8]) -> Result<Self, Asn1DerError> {
        ocsp_asn1_der::from_bytes(bytes)
    }

    pub fn get_responses(&self) -> &[SingleResponse] {
        &self.tbs_response_data.responses.0
    }

    pub fn get_certificates(&self) -> &[Certificate] {
        &self.certs
    }

    pub fn get_responder_id(&self) -> &ResponderId {
        &self.tbs_response_data.responder_id
    }

    pub fn get_produced_at(&self) -> &GeneralizedTime {
        &self.tbs_response_data.produced_at.0
    }

    pub fn get_this_update(&self) -> Option<&GeneralizedTime> {
        self.get_responses().first().map(|single| &single.this_update.0)
    }

    pub fn get_next_update(&self) -> Option<&GeneralizedTime> {
        self.get_responses()
            .first()
            .and_then(|single| single.next_update.as_ref())
            .map(|next| &(next.0).0)
    }

    pub fn get_signature(&self) -> &[u8] {
        self.signature.payload_view()
    }

    /// Symbolic name of the signature algorithm, dotted-decimal if unknown.
    pub fn get_signature_algorithm(&self) -> String {
        self.signature_algorithm.symbolic_name()
    }

    /// The nonce echoed in the response extensions, if any.
    pub fn get_nonce_extension(&self) -> Option<&[u8]> {
        let extensions = self.tbs_response_data.response_extensions.as_ref()?;
        match &extensions.0.find(oids::ID_PKIX_OCSP_NONCE)?.extn_value {
            ExtensionValue::OcspNonce(nonce) => Some(&(nonce.0).0),
            _ => None,
        }
    }

    pub fn get_cert_id(&self) -> Option<&CertId> {
        self.get_responses().first().map(|single| &single.cert_id)
    }

    /// The `tbsResponseData` bytes exactly as they appeared on the wire.
    pub fn get_encoded_response_data(&self) -> &[u8] {
        &self.encoded_tbs_response_data
    }
}

impl ser::Serialize for BasicOcspResponse {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        use ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(4))?;
        seq.serialize_element(&self.tbs_response_data)?;
        seq.serialize_element(&self.signature_algorithm)?;
        seq.serialize_element(&self.signature)?;
        if !self.certs.is_empty() {
            seq.serialize_element(&ExplicitContextTag0(Asn1SequenceOf(self.certs.clone())))?;
        }
        seq.end()
    }
}

impl<'de> de::Deserialize<'de> for BasicOcspResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = BasicOcspResponse;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid DER-encoded BasicOCSPResponse")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                // capture the signed bytes verbatim before decoding them
                let raw_tbs: Asn1RawDer = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let tbs_response_data: TbsResponseData =
                    ocsp_asn1_der::from_bytes(&raw_tbs.0).map_err(de::Error::custom)?;

                let signature_algorithm =
                    seq.next_element()?.ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let signature = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(2, &self))?;

                let certs = match seq.next_element::<TagPeeker>()? {
                    Some(peeked) if peeked.next_tag == Tag::context_explicit(0) => {
                        let wrapped: ExplicitContextTag0<Asn1SequenceOf<Certificate>> = seq
                            .next_element()?
                            .ok_or_else(|| de::Error::invalid_length(3, &self))?;
                        (wrapped.0).0
                    }
                    _ => Vec::new(),
                };

                Ok(BasicOcspResponse {
                    tbs_response_data,
                    signature_algorithm,
                    signature,
                    certs,
                    encoded_tbs_response_data: raw_tbs.0,
                })
            }
        }

        deserializer.deserialize_seq(Visitor)
    }
}

/// A decoded OCSP response.
///
/// Construction decodes the outer envelope and, for a successful basic
/// response, the nested `BasicOCSPResponse`; the validators then check that
/// the response is about the requested certificate and authentically signed.
#[derive(Debug, Clone, PartialEq)]
pub struct OcspResponse {
    response_status: ResponseStatus,
    response_type: Option<ObjectIdentifierAsn1>,
    basic_response: Option<BasicOcspResponse>,
    revoke_reason: Option<CrlReason>,
}

impl OcspResponse {
    pub fn from_der(bytes: &[u8]) -> Result<Self, OcspError> {
        let envelope: OcspResponseEnvelope =
            ocsp_asn1_der::from_bytes(bytes).map_err(|e| OcspError::ResponseDecodeError { source: e })?;

        let mut response_type = None;
        let mut basic_response = None;

        if let Some(response_bytes) = envelope.response_bytes {
            let response_bytes = response_bytes.0;
            let dotted: String = (&response_bytes.response_type.0).into();
            let is_basic = dotted == oids::ID_PKIX_OCSP_BASIC;
            let has_content = !response_bytes.response.0.is_empty();
            response_type = Some(response_bytes.response_type);

            if envelope.response_status == ResponseStatus::Successful && is_basic && has_content {
                basic_response = Some(
                    BasicOcspResponse::from_der(&response_bytes.response.0)
                        .map_err(|e| OcspError::ResponseDecodeError { source: e })?,
                );
            }
        }

        Ok(Self {
            response_status: envelope.response_status,
            response_type,
            basic_response,
            revoke_reason: None,
        })
    }

    pub fn status(&self) -> ResponseStatus {
        self.response_status
    }

    /// Textual response status (`successful`, `tryLater`, …).
    pub fn get_status(&self) -> &'static str {
        self.response_status.as_str()
    }

    pub fn get_basic_response(&self) -> Result<&BasicOcspResponse, OcspError> {
        if let Some(response_type) = &self.response_type {
            let dotted: String = (&response_type.0).into();
            if dotted != oids::ID_PKIX_OCSP_BASIC {
                return Err(OcspError::UnexpectedValue {
                    context: format!(
                        "responseType is not \"id-pkix-ocsp-basic\" but is \"{}\"",
                        oids::symbolic_name(&response_type.0)
                    ),
                });
            }
        }
        self.basic_response.as_ref().ok_or_else(|| OcspError::UnexpectedValue {
            context: "Could not decode OcspResponse->responseBytes->response".to_owned(),
        })
    }

    /// Checks the single-response and responder-certificate cardinality
    /// rules this library relies on.
    pub fn validate_response_shape(&self) -> Result<(), OcspError> {
        let basic = self.get_basic_response()?;

        let count = basic.get_responses().len();
        if count != 1 {
            return Err(OcspError::VerifyFailed {
                context: format!("OCSP response must contain one response, received {count} responses instead"),
            });
        }

        if basic.certs.is_empty() {
            return Err(OcspError::VerifyFailed {
                context: "OCSP response must contain the responder certificate, but none was provided".to_owned(),
            });
        }

        Ok(())
    }

    /// Checks that the responder answered about the certificate that was
    /// asked about.
    pub fn validate_certificate_id(&self, expected: &CertId) -> Result<(), OcspError> {
        self.validate_response_shape()?;
        let basic = self.get_basic_response()?;

        // shape validation guarantees exactly one response
        let actual = &basic.get_responses()[0].cert_id;
        if actual != expected {
            return Err(OcspError::VerifyFailed {
                context: "OCSP responded with certificate ID that differs from the requested ID".to_owned(),
            });
        }
        Ok(())
    }

    /// Verifies the responder signature over the wire bytes of
    /// `tbsResponseData`, using the first certificate of the response.
    pub fn validate_signature(&self) -> Result<(), OcspError> {
        self.validate_response_shape()?;
        let basic = self.get_basic_response()?;

        let responder_cert = &basic.certs[0];

        let algorithm_name = basic.signature_algorithm.symbolic_name();
        let scheme = SignatureAlgorithm::from_algorithm_identifier(&basic.signature_algorithm).map_err(|_| {
            OcspError::CertificateError {
                context: format!("Signature algorithm {algorithm_name} not implemented"),
            }
        })?;

        let public_key = PublicKey::from_spki(responder_cert.tbs_certificate.subject_public_key_info.clone());

        scheme
            .verify(&public_key, basic.get_encoded_response_data(), basic.get_signature())
            .map_err(|_| OcspError::VerifyFailed {
                context: "OCSP response signature is not valid".to_owned(),
            })
    }

    /// Revocation verdict for the single response: `Some(false)` for good,
    /// `Some(true)` for revoked (remembering the reason), `None` for
    /// unknown.
    pub fn is_revoked(&mut self) -> Result<Option<bool>, OcspError> {
        self.validate_response_shape()?;

        let (verdict, reason) = {
            let basic = self.get_basic_response()?;
            match &basic.get_responses()[0].cert_status {
                CertStatus::Good(_) => (Some(false), None),
                CertStatus::Revoked(info) => (
                    Some(true),
                    (info.0).revocation_reason.as_ref().map(|wrapped| wrapped.0),
                ),
                CertStatus::Unknown(_) => (None, None),
            }
        };

        if verdict == Some(true) {
            self.revoke_reason = reason;
        }
        Ok(verdict)
    }

    /// Symbolic revocation reason recorded by a previous `is_revoked` call,
    /// empty if the certificate is not known to be revoked or no reason was
    /// given.
    pub fn get_revoke_reason(&self) -> &'static str {
        self.revoke_reason.map(CrlReason::as_str).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocsp_asn1::date::GeneralizedTime;
    use pretty_assertions::assert_eq;

    #[test]
    fn cert_status_wire_shapes() {
        let good = CertStatus::good();
        let encoded = [0x80, 0x00];
        check_serde!(good: CertStatus in encoded);

        let unknown = CertStatus::unknown();
        let encoded = [0x82, 0x00];
        check_serde!(unknown: CertStatus in encoded);

        let revoked = CertStatus::revoked(RevokedInfo {
            revocation_time: GeneralizedTime::new(2021, 9, 17, 18, 25, 24).unwrap().into(),
            revocation_reason: Some(ExplicitContextTag0(CrlReason::Unspecified)),
        });
        #[rustfmt::skip]
        let encoded = [
            0xA1, 0x16,
                0x18, 0x0F, 0x32, 0x30, 0x32, 0x31, 0x30, 0x39, 0x31, 0x37, 0x31, 0x38, 0x32, 0x35, 0x32, 0x34, 0x5A,
                0xA0, 0x03, 0x0A, 0x01, 0x00,
        ];
        check_serde!(revoked: CertStatus in encoded);
    }

    #[test]
    fn response_status_codes() {
        let status = ResponseStatus::Unauthorized;
        let encoded = [0x0A, 0x01, 0x06];
        check_serde!(status: ResponseStatus in encoded);

        // 4 is reserved
        let reserved: Result<ResponseStatus, _> = ocsp_asn1_der::from_bytes(&[0x0A, 0x01, 0x04]);
        assert!(reserved.is_err());
    }

    #[test]
    fn crl_reason_value_seven_fails_closed() {
        let reserved: Result<CrlReason, _> = ocsp_asn1_der::from_bytes(&[0x0A, 0x01, 0x07]);
        assert!(reserved.is_err());
        let valid: CrlReason = ocsp_asn1_der::from_bytes(&[0x0A, 0x01, 0x08]).unwrap();
        assert_eq!(valid, CrlReason::RemoveFromCrl);
    }

    #[test]
    fn responder_id_choices() {
        let by_key = ResponderId::by_key(vec![0xAB; 4]);
        let encoded = [0xA2, 0x06, 0x04, 0x04, 0xAB, 0xAB, 0xAB, 0xAB];
        check_serde!(by_key: ResponderId in encoded);

        let by_name = ResponderId::by_name(crate::x509::name::new_common_name("Responder"));
        let encoded = ocsp_asn1_der::to_vec(&by_name).unwrap();
        assert_eq!(encoded[0], 0xA1);
        let decoded: ResponderId = ocsp_asn1_der::from_bytes(&encoded).unwrap();
        assert_eq!(decoded, by_name);
    }
}
