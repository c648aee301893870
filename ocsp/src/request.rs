use crate::cert_id::CertId;
use crate::oids;
use crate::x509::{Extension, ExtensionValue, Extensions};
use ocsp_asn1::tag::{Tag, TagPeeker};
use ocsp_asn1::wrapper::{Asn1SequenceOf, ExplicitContextTag2};
use ocsp_asn1_der::{Asn1DerError, Asn1RawDer};
use serde::{de, Serialize};
use std::fmt;

/// https://tools.ietf.org/html/rfc6960#section-4.1.1
///
/// Request ::= SEQUENCE { reqCert CertID, singleRequestExtensions [0] EXPLICIT Extensions OPTIONAL }
///
/// Single-request extensions are never emitted but tolerated on input.
#[derive(Serialize, Debug, PartialEq, Eq, Clone)]
pub struct Request {
    pub req_cert: CertId,
}

impl<'de> de::Deserialize<'de> for Request {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = Request;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid DER-encoded OCSP Request")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let req_cert = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(0, &self))?;
                if seq.next_element::<TagPeeker>()?.is_some() {
                    let _ = seq.next_element::<Asn1RawDer>()?; // singleRequestExtensions
                }
                Ok(Request { req_cert })
            }
        }

        deserializer.deserialize_seq(Visitor)
    }
}

/// TBSRequest ::= SEQUENCE {
///     version             [0] EXPLICIT Version DEFAULT v1,
///     requestorName       [1] EXPLICIT GeneralName OPTIONAL,
///     requestList             SEQUENCE OF Request,
///     requestExtensions   [2] EXPLICIT Extensions OPTIONAL }
///
/// The version is v1 and default-omitted on output; requestorName is never
/// emitted. Both are tolerated on input.
#[derive(Serialize, Debug, PartialEq, Eq, Clone, Default)]
pub struct TbsRequest {
    pub request_list: Asn1SequenceOf<Request>,
    pub request_extensions: Option<ExplicitContextTag2<Extensions>>,
}

impl<'de> de::Deserialize<'de> for TbsRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = TbsRequest;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid DER-encoded TBSRequest")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                loop {
                    match seq.next_element::<TagPeeker>()? {
                        Some(peeked)
                            if peeked.next_tag == Tag::context_explicit(0)
                                || peeked.next_tag == Tag::context_explicit(1) =>
                        {
                            // version (always v1) or requestorName; neither
                            // affects the decoded value
                            seq.next_element::<Asn1RawDer>()?
                                .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                        }
                        Some(_) => break,
                        None => return Err(de::Error::invalid_length(0, &self)),
                    }
                }

                let request_list = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(0, &self))?;

                let request_extensions = match seq.next_element::<TagPeeker>()? {
                    Some(peeked) if peeked.next_tag == Tag::context_explicit(2) => Some(
                        seq.next_element()?
                            .ok_or_else(|| de::Error::invalid_length(1, &self))?,
                    ),
                    _ => None,
                };

                Ok(TbsRequest {
                    request_list,
                    request_extensions,
                })
            }
        }

        deserializer.deserialize_seq(Visitor)
    }
}

/// An OCSP request under construction.
///
/// OCSPRequest ::= SEQUENCE { tbsRequest TBSRequest, optionalSignature [0] EXPLICIT Signature OPTIONAL }
///
/// The request stays mutable after encoding; `encode_der` is read-only and
/// returns identical bytes for an unchanged request. Signed requests are not
/// produced.
#[derive(Serialize, Debug, PartialEq, Eq, Clone, Default)]
pub struct OcspRequest {
    pub tbs_request: TbsRequest,
}

impl OcspRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a certificate to the request list.
    pub fn add_certificate_id(&mut self, cert_id: CertId) {
        self.tbs_request.request_list.0.push(Request { req_cert: cert_id });
    }

    /// Appends a nonce extension carrying the caller-supplied bytes; the
    /// library does not generate randomness.
    pub fn add_nonce_extension(&mut self, nonce: Vec<u8>) {
        let extensions = self
            .tbs_request
            .request_extensions
            .get_or_insert_with(|| ExplicitContextTag2(Extensions::default()));
        (extensions.0).0.push(Extension::new_ocsp_nonce(nonce));
    }

    /// The nonce carried by the first nonce extension, if any.
    pub fn get_nonce_extension(&self) -> Option<&[u8]> {
        let extensions = self.tbs_request.request_extensions.as_ref()?;
        match &extensions.0.find(oids::ID_PKIX_OCSP_NONCE)?.extn_value {
            ExtensionValue::OcspNonce(nonce) => Some(&(nonce.0).0),
            _ => None,
        }
    }

    /// Emits the DER-encoded OCSPRequest.
    pub fn encode_der(&self) -> Result<Vec<u8>, Asn1DerError> {
        ocsp_asn1_der::to_vec(self)
    }

    pub fn from_der(bytes: &[u8]) -> Result<Self, Asn1DerError> {
        ocsp_asn1_der::from_bytes(bytes)
    }
}

impl<'de> de::Deserialize<'de> for OcspRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = OcspRequest;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a valid DER-encoded OCSPRequest")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let tbs_request = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(0, &self))?;
                if seq.next_element::<TagPeeker>()?.is_some() {
                    let _ = seq.next_element::<Asn1RawDer>()?; // optionalSignature
                }
                Ok(OcspRequest { tbs_request })
            }
        }

        deserializer.deserialize_seq(Visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::x509::AlgorithmIdentifier;
    use ocsp_asn1::wrapper::{IntegerAsn1, OctetStringAsn1};
    use pretty_assertions::assert_eq;

    fn sample_cert_id() -> CertId {
        CertId {
            hash_algorithm: AlgorithmIdentifier::new_sha1(),
            issuer_name_hash: OctetStringAsn1(vec![0x11; 20]),
            issuer_key_hash: OctetStringAsn1(vec![0x22; 20]),
            serial_number: IntegerAsn1(vec![0x01]),
        }
    }

    #[test]
    fn encode_is_idempotent() {
        let mut request = OcspRequest::new();
        request.add_certificate_id(sample_cert_id());
        request.add_nonce_extension(vec![0x47, 0xFF, 0xAF, 0xC9]);

        let first = request.encode_der().unwrap();
        let second = request.encode_der().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn round_trip() {
        let mut request = OcspRequest::new();
        request.add_certificate_id(sample_cert_id());
        request.add_nonce_extension(b"nonce".to_vec());

        let encoded = request.encode_der().unwrap();
        let decoded = OcspRequest::from_der(&encoded).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn nonce_round_trip() {
        let mut request = OcspRequest::new();
        assert_eq!(request.get_nonce_extension(), None);
        request.add_nonce_extension(vec![0x47, 0xFF, 0xAF, 0xC9, 0x18, 0x11, 0x77, 0x0E]);
        assert_eq!(
            request.get_nonce_extension(),
            Some(&[0x47, 0xFF, 0xAF, 0xC9, 0x18, 0x11, 0x77, 0x0E][..])
        );
    }

    #[test]
    fn explicit_version_is_tolerated_on_input() {
        let mut request = OcspRequest::new();
        request.add_certificate_id(sample_cert_id());
        let encoded = request.encode_der().unwrap();

        // splice in `[0] { INTEGER 0 }` in front of the request list
        let version = [0xA0, 0x03, 0x02, 0x01, 0x00];
        let mut with_version = Vec::new();
        with_version.push(0x30);
        with_version.push(encoded[1] + 5);
        with_version.push(0x30);
        with_version.push(encoded[3] + 5);
        with_version.extend_from_slice(&version);
        with_version.extend_from_slice(&encoded[4..]);

        let decoded = OcspRequest::from_der(&with_version).unwrap();
        assert_eq!(decoded, request);
    }
}
