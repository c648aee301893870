//! End-to-end request/response scenarios over in-memory responders.

use ocsp::cert_id::{generate_cert_id, CertId};
use ocsp::error::OcspError;
use ocsp::hash::HashAlgorithm;
use ocsp::response::{
    BasicOcspResponse, CertStatus, CrlReason, OcspResponse, OcspResponseEnvelope, ResponderId, ResponseBytes,
    ResponseStatus, RevokedInfo, SingleResponse, TbsResponseData,
};
use ocsp::x509::{
    AccessDescription, AlgorithmIdentifier, Cert, Certificate, Extension, Extensions, GeneralName,
    SubjectPublicKeyInfo, TbsCertificate, Time, Validity, Version,
};
use ocsp::OcspRequest;
use ocsp_asn1::bit_string::BitString;
use ocsp_asn1::date::{GeneralizedTime, UTCTime};
use ocsp_asn1::wrapper::{
    Asn1SequenceOf, ExplicitContextTag0, ExplicitContextTag1, ExplicitContextTag3, IntegerAsn1, OctetStringAsn1,
};
use pretty_assertions::assert_eq;
use rand::rngs::OsRng;
use rsa::traits::PublicKeyParts;

const NONCE: [u8; 8] = [0x47, 0xFF, 0xAF, 0xC9, 0x18, 0x11, 0x77, 0x0E];

fn validity() -> Validity {
    Validity {
        not_before: Time::Utc(UTCTime::new(2021, 1, 1, 0, 0, 0).unwrap().into()),
        not_after: Time::Utc(UTCTime::new(2031, 1, 1, 0, 0, 0).unwrap().into()),
    }
}

fn make_certificate(
    subject_cn: &str,
    issuer_cn: &str,
    serial: Vec<u8>,
    spki: SubjectPublicKeyInfo,
    extensions: Option<Extensions>,
) -> Certificate {
    Certificate {
        tbs_certificate: TbsCertificate {
            version: ExplicitContextTag0(Version::V3),
            serial_number: IntegerAsn1::from_bytes_be_unsigned(serial),
            signature: AlgorithmIdentifier::new_sha256_with_rsa_encryption(),
            issuer: ocsp::x509::name::new_common_name(issuer_cn),
            validity: validity(),
            subject: ocsp::x509::name::new_common_name(subject_cn),
            subject_public_key_info: spki,
            extensions: extensions.map(ExplicitContextTag3),
        },
        signature_algorithm: AlgorithmIdentifier::new_sha256_with_rsa_encryption(),
        // not validated by these scenarios; responder signatures are
        signature_value: BitString::with_bytes(vec![0x00; 32]).into(),
    }
}

fn sample_cert_id() -> CertId {
    CertId {
        hash_algorithm: AlgorithmIdentifier::new_sha1(),
        issuer_name_hash: OctetStringAsn1(vec![0x11; 20]),
        issuer_key_hash: OctetStringAsn1(vec![0x22; 20]),
        serial_number: IntegerAsn1(vec![0x2A]),
    }
}

fn produced_at() -> GeneralizedTime {
    GeneralizedTime::new(2021, 9, 17, 18, 25, 24).unwrap()
}

fn tbs_response_data(cert_status: CertStatus, with_nonce: bool) -> TbsResponseData {
    let response_extensions = with_nonce
        .then(|| ExplicitContextTag1(Extensions(vec![Extension::new_ocsp_nonce(NONCE.to_vec())])));

    TbsResponseData {
        responder_id: ResponderId::by_key(vec![0x33; 20]),
        produced_at: produced_at().into(),
        responses: Asn1SequenceOf(vec![SingleResponse {
            cert_id: sample_cert_id(),
            cert_status,
            this_update: produced_at().into(),
            next_update: None,
            single_extensions: None,
        }]),
        response_extensions,
    }
}

struct RsaResponder {
    signing_key: rsa::pkcs1v15::SigningKey<sha2::Sha256>,
    certificate: Certificate,
}

fn rsa_responder() -> RsaResponder {
    let private_key = rsa::RsaPrivateKey::new(&mut OsRng, 2048).expect("rsa key generation");
    let public_key = private_key.to_public_key();
    let spki = SubjectPublicKeyInfo::new_rsa_key(
        IntegerAsn1::from_bytes_be_unsigned(public_key.n().to_bytes_be()),
        IntegerAsn1::from_bytes_be_unsigned(public_key.e().to_bytes_be()),
    );
    RsaResponder {
        signing_key: rsa::pkcs1v15::SigningKey::new(private_key),
        certificate: make_certificate("Test OCSP Responder", "Test CA", vec![0x07], spki, None),
    }
}

fn signed_basic_response(responder: &RsaResponder, tbs: TbsResponseData) -> BasicOcspResponse {
    use rsa::signature::{SignatureEncoding, Signer};

    let encoded_tbs = ocsp_asn1_der::to_vec(&tbs).unwrap();
    let signature = responder.signing_key.try_sign(&encoded_tbs).unwrap().to_vec();

    BasicOcspResponse::new(
        tbs,
        AlgorithmIdentifier::new_sha256_with_rsa_encryption(),
        BitString::with_bytes(signature).into(),
        vec![responder.certificate.clone()],
    )
    .unwrap()
}

fn envelope_der(basic: &BasicOcspResponse) -> Vec<u8> {
    let envelope = OcspResponseEnvelope {
        response_status: ResponseStatus::Successful,
        response_bytes: Some(ExplicitContextTag0(ResponseBytes {
            response_type: ocsp::oids::id_pkix_ocsp_basic().into(),
            response: OctetStringAsn1(ocsp_asn1_der::to_vec(basic).unwrap()),
        })),
    };
    ocsp_asn1_der::to_vec(&envelope).unwrap()
}

#[test]
fn good_response_end_to_end() {
    let responder = rsa_responder();
    let basic = signed_basic_response(&responder, tbs_response_data(CertStatus::good(), true));
    let mut response = OcspResponse::from_der(&envelope_der(&basic)).unwrap();

    assert_eq!(response.get_status(), "successful");
    assert_eq!(response.is_revoked().unwrap(), Some(false));
    assert_eq!(response.get_revoke_reason(), "");

    let decoded = response.get_basic_response().unwrap();
    assert_eq!(decoded.get_produced_at(), &produced_at());
    assert_eq!(decoded.get_this_update(), Some(&produced_at()));
    assert_eq!(decoded.get_next_update(), None);
    assert_eq!(decoded.get_nonce_extension(), Some(&NONCE[..]));
    assert_eq!(decoded.get_signature_algorithm(), "sha256WithRSAEncryption");
    assert_eq!(decoded.get_cert_id(), Some(&sample_cert_id()));

    response.validate_certificate_id(&sample_cert_id()).unwrap();
    response.validate_signature().unwrap();
}

#[test]
fn signed_bytes_survive_the_round_trip_verbatim() {
    let responder = rsa_responder();
    let tbs = tbs_response_data(CertStatus::good(), false);
    let expected_tbs_bytes = ocsp_asn1_der::to_vec(&tbs).unwrap();

    let basic = signed_basic_response(&responder, tbs);
    let response = OcspResponse::from_der(&envelope_der(&basic)).unwrap();
    let decoded = response.get_basic_response().unwrap();

    assert_eq!(decoded.get_encoded_response_data(), &expected_tbs_bytes[..]);
}

#[test]
fn mismatched_certificate_id_is_rejected() {
    let responder = rsa_responder();
    let basic = signed_basic_response(&responder, tbs_response_data(CertStatus::good(), false));
    let response = OcspResponse::from_der(&envelope_der(&basic)).unwrap();

    let mut other = sample_cert_id();
    other.serial_number = IntegerAsn1(vec![0x2B]);

    let err = response.validate_certificate_id(&other).unwrap_err();
    assert_eq!(
        err.to_string(),
        "OCSP responded with certificate ID that differs from the requested ID"
    );
}

#[test]
fn tampered_response_data_fails_signature_validation() {
    let responder = rsa_responder();
    let good = signed_basic_response(&responder, tbs_response_data(CertStatus::good(), false));

    // keep the signature, swap the signed payload
    let tampered = BasicOcspResponse::new(
        tbs_response_data(CertStatus::unknown(), false),
        good.signature_algorithm.clone(),
        good.signature.clone(),
        good.certs.clone(),
    )
    .unwrap();

    let response = OcspResponse::from_der(&envelope_der(&tampered)).unwrap();
    let err = response.validate_signature().unwrap_err();
    assert_eq!(err.to_string(), "OCSP response signature is not valid");
}

#[test]
fn ecdsa_p256_signature_verifies() {
    use p256::ecdsa::signature::Signer;
    use p256::elliptic_curve::sec1::ToEncodedPoint;

    let signing_key = p256::ecdsa::SigningKey::random(&mut OsRng);
    let point = signing_key.verifying_key().to_encoded_point(false).as_bytes().to_vec();
    let spki = SubjectPublicKeyInfo::new_ec_key(ocsp::oids::secp256r1(), point);
    let certificate = make_certificate("EC OCSP Responder", "Test CA", vec![0x08], spki, None);

    let tbs = tbs_response_data(CertStatus::good(), false);
    let encoded_tbs = ocsp_asn1_der::to_vec(&tbs).unwrap();
    let signature: p256::ecdsa::Signature = signing_key.sign(&encoded_tbs);

    let basic = BasicOcspResponse::new(
        tbs,
        AlgorithmIdentifier::new_ecdsa_with_sha256(),
        BitString::with_bytes(signature.to_der().as_bytes().to_vec()).into(),
        vec![certificate],
    )
    .unwrap();

    let response = OcspResponse::from_der(&envelope_der(&basic)).unwrap();
    response.validate_signature().unwrap();
}

#[test]
fn revoked_response_reports_reason() {
    let responder = rsa_responder();
    let status = CertStatus::revoked(RevokedInfo {
        revocation_time: produced_at().into(),
        revocation_reason: Some(ExplicitContextTag0(CrlReason::Unspecified)),
    });
    let basic = signed_basic_response(&responder, tbs_response_data(status, false));
    let mut response = OcspResponse::from_der(&envelope_der(&basic)).unwrap();

    assert_eq!(response.is_revoked().unwrap(), Some(true));
    assert_eq!(response.get_revoke_reason(), "unspecified");
}

#[test]
fn unknown_status_yields_no_verdict() {
    let responder = rsa_responder();
    let basic = signed_basic_response(&responder, tbs_response_data(CertStatus::unknown(), false));
    let mut response = OcspResponse::from_der(&envelope_der(&basic)).unwrap();

    assert_eq!(response.is_revoked().unwrap(), None);
    assert_eq!(response.get_revoke_reason(), "");
}

#[test]
fn non_successful_status_skips_the_basic_response() {
    let envelope = OcspResponseEnvelope {
        response_status: ResponseStatus::TryLater,
        response_bytes: None,
    };
    let response = OcspResponse::from_der(&ocsp_asn1_der::to_vec(&envelope).unwrap()).unwrap();

    assert_eq!(response.get_status(), "tryLater");
    assert!(matches!(
        response.get_basic_response(),
        Err(OcspError::UnexpectedValue { .. })
    ));
}

#[test]
fn garbage_input_fails_decoding() {
    let err = OcspResponse::from_der(b"1").unwrap_err();
    assert!(matches!(err, OcspError::ResponseDecodeError { .. }));
    assert_eq!(err.to_string(), "Could not decode OCSP response");
}

#[test]
fn unexpected_response_type_is_reported() {
    let responder = rsa_responder();
    let basic = signed_basic_response(&responder, tbs_response_data(CertStatus::good(), false));

    let envelope = OcspResponseEnvelope {
        response_status: ResponseStatus::Successful,
        response_bytes: Some(ExplicitContextTag0(ResponseBytes {
            response_type: ocsp::oids::id_sha1().into(),
            response: OctetStringAsn1(ocsp_asn1_der::to_vec(&basic).unwrap()),
        })),
    };
    let response = OcspResponse::from_der(&ocsp_asn1_der::to_vec(&envelope).unwrap()).unwrap();

    let err = response.get_basic_response().unwrap_err();
    assert_eq!(
        err.to_string(),
        "responseType is not \"id-pkix-ocsp-basic\" but is \"id-sha1\""
    );
}

#[test]
fn empty_inner_response_is_reported() {
    let envelope = OcspResponseEnvelope {
        response_status: ResponseStatus::Successful,
        response_bytes: Some(ExplicitContextTag0(ResponseBytes {
            response_type: ocsp::oids::id_pkix_ocsp_basic().into(),
            response: OctetStringAsn1(Vec::new()),
        })),
    };
    let response = OcspResponse::from_der(&ocsp_asn1_der::to_vec(&envelope).unwrap()).unwrap();

    let err = response.get_basic_response().unwrap_err();
    assert_eq!(err.to_string(), "Could not decode OcspResponse->responseBytes->response");
}

#[test]
fn response_list_cardinality_is_enforced() {
    let responder = rsa_responder();
    let mut tbs = tbs_response_data(CertStatus::good(), false);
    let duplicated = tbs.responses.0[0].clone();
    tbs.responses.0.push(duplicated);

    let basic = signed_basic_response(&responder, tbs);
    let mut response = OcspResponse::from_der(&envelope_der(&basic)).unwrap();

    let err = response.validate_signature().unwrap_err();
    assert_eq!(
        err.to_string(),
        "OCSP response must contain one response, received 2 responses instead"
    );
    assert!(response.is_revoked().is_err());
}

#[test]
fn missing_responder_certificate_is_enforced() {
    let responder = rsa_responder();
    let tbs = tbs_response_data(CertStatus::good(), false);
    let signed = signed_basic_response(&responder, tbs.clone());

    let basic = BasicOcspResponse::new(tbs, signed.signature_algorithm.clone(), signed.signature.clone(), vec![])
        .unwrap();
    let response = OcspResponse::from_der(&envelope_der(&basic)).unwrap();

    let err = response.validate_signature().unwrap_err();
    assert_eq!(
        err.to_string(),
        "OCSP response must contain the responder certificate, but none was provided"
    );
}

#[test]
fn unsupported_signature_algorithm_is_reported() {
    let responder = rsa_responder();
    let tbs = tbs_response_data(CertStatus::good(), false);
    let signed = signed_basic_response(&responder, tbs.clone());

    let basic = BasicOcspResponse::new(
        tbs,
        // a digest OID is not a signature algorithm
        AlgorithmIdentifier::new_sha256(),
        signed.signature.clone(),
        signed.certs.clone(),
    )
    .unwrap();
    let response = OcspResponse::from_der(&envelope_der(&basic)).unwrap();

    let err = response.validate_signature().unwrap_err();
    assert!(matches!(err, OcspError::CertificateError { .. }));
    assert_eq!(err.to_string(), "Signature algorithm id-sha256 not implemented");
}

#[test]
fn cert_id_hash_algorithm_oid_matches_request() {
    let responder = rsa_responder();
    let issuer = Cert::from(responder.certificate.clone());
    let subject = Cert::from(make_certificate(
        "leaf.example.com",
        "Test CA",
        vec![0x01, 0x02, 0x03],
        responder.certificate.tbs_certificate.subject_public_key_info.clone(),
        None,
    ));

    for hash in [HashAlgorithm::SHA1, HashAlgorithm::SHA2_256] {
        let cert_id = generate_cert_id(&subject, &issuer, hash).unwrap();
        assert_eq!(cert_id.hash_algorithm.algorithm.0, hash.oid());
        assert_eq!(
            cert_id.issuer_name_hash.0,
            hash.digest(&issuer.subject_name_der().unwrap())
        );
        assert_eq!(cert_id.issuer_key_hash.0, hash.digest(issuer.subject_public_key_bits()));
        assert_eq!(cert_id.serial_number, IntegerAsn1(vec![0x01, 0x02, 0x03]));
    }
}

#[test]
fn aia_urls_are_extracted() {
    let responder = rsa_responder();
    let extensions = Extensions(vec![Extension::new_authority_info_access(vec![
        AccessDescription {
            access_method: ocsp::oids::id_ad_ocsp().into(),
            access_location: GeneralName::new_uri("http://ocsp.int-x3.letsencrypt.org".parse().unwrap()),
        },
        AccessDescription {
            access_method: ocsp::oids::id_ad_ca_issuers().into(),
            access_location: GeneralName::new_uri("http://cert.int-x3.letsencrypt.org/".parse().unwrap()),
        },
    ])]);

    let certificate = make_certificate(
        "leaf.example.com",
        "Test CA",
        vec![0x09],
        responder.certificate.tbs_certificate.subject_public_key_info.clone(),
        Some(extensions),
    );

    // across a wire round trip, not just in memory
    let encoded = ocsp_asn1_der::to_vec(&certificate).unwrap();
    let cert = Cert::from_der(&encoded).unwrap();

    assert_eq!(cert.ocsp_responder_url(), "http://ocsp.int-x3.letsencrypt.org");
    assert_eq!(cert.issuer_certificate_url(), "http://cert.int-x3.letsencrypt.org/");
    assert_eq!(cert.aia_entries().len(), 2);
}

#[test]
fn request_encoding_matches_known_vector() {
    use base64::engine::general_purpose;
    use base64::Engine as _;

    let expected = general_purpose::STANDARD
        .decode(
            "MEIwQDA+MDwwOjAJBgUrDgMCGgUABBT4cyABkyiCIhU4J\
             pmIBewdDnn8ZgQUbyBZ44kgy35o7xW5BMzM8FTvyTwCAQE=",
        )
        .unwrap();

    let mut request = OcspRequest::new();
    request.add_certificate_id(CertId {
        hash_algorithm: AlgorithmIdentifier::new_sha1(),
        issuer_name_hash: OctetStringAsn1(vec![
            0xF8, 0x73, 0x20, 0x01, 0x93, 0x28, 0x82, 0x22, 0x15, 0x38, 0x26, 0x99, 0x88, 0x05, 0xEC, 0x1D, 0x0E,
            0x79, 0xFC, 0x66,
        ]),
        issuer_key_hash: OctetStringAsn1(vec![
            0x6F, 0x20, 0x59, 0xE3, 0x89, 0x20, 0xCB, 0x7E, 0x68, 0xEF, 0x15, 0xB9, 0x04, 0xCC, 0xCC, 0xF0, 0x54,
            0xEF, 0xC9, 0x3C,
        ]),
        serial_number: IntegerAsn1(vec![0x01]),
    });

    assert_eq!(request.encode_der().unwrap(), expected);

    let decoded = OcspRequest::from_der(&expected).unwrap();
    assert_eq!(decoded, request);
}

#[test]
fn request_round_trip_with_nonce() {
    let mut request = OcspRequest::new();
    request.add_certificate_id(sample_cert_id());
    request.add_nonce_extension(NONCE.to_vec());

    let encoded = request.encode_der().unwrap();
    let decoded = OcspRequest::from_der(&encoded).unwrap();

    assert_eq!(decoded, request);
    assert_eq!(decoded.get_nonce_extension(), Some(&NONCE[..]));
    // unchanged request, identical bytes
    assert_eq!(request.encode_der().unwrap(), encoded);
}
