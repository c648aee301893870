use crate::error::OcspError;
use crate::key::PublicKey;
use crate::oids;
use crate::pem::{parse_pem, Pem};
use crate::x509::extension::{BasicConstraints, Extension, ExtensionValue, Extensions, KeyUsage};
use crate::x509::name::Name;
use crate::x509::subject_public_key_info::SubjectPublicKeyInfo;
use crate::x509::validity::Validity;
use crate::x509::version::Version;
use crate::x509::AlgorithmIdentifier;
use num_bigint_dig::BigUint;
use ocsp_asn1::tag::{Tag, TagPeeker};
use ocsp_asn1::wrapper::{BitStringAsn1, ExplicitContextTag0, ExplicitContextTag3, IntegerAsn1};
use ocsp_asn1_der::Asn1RawDer;
use serde::{de, Deserialize, Serialize};
use std::fmt;
use std::path::Path;

const CERT_PEM_LABEL: &str = "CERTIFICATE";

/// https://tools.ietf.org/html/rfc5280#section-4.1
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Certificate {
    pub tbs_certificate: TbsCertificate,
    pub signature_algorithm: AlgorithmIdentifier,
    pub signature_value: BitStringAsn1,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct TbsCertificate {
    pub version: ExplicitContextTag0<Version>,
    pub serial_number: IntegerAsn1,
    pub signature: AlgorithmIdentifier,
    pub issuer: Name,
    pub validity: Validity,
    pub subject: Name,
    pub subject_public_key_info: SubjectPublicKeyInfo,
    pub extensions: Option<ExplicitContextTag3<Extensions>>,
}

impl<'de> de::Deserialize<'de> for TbsCertificate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = TbsCertificate;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("struct TbsCertificate")
            }

            fn visit_seq<V>(self, mut seq: V) -> Result<Self::Value, V::Error>
            where
                V: de::SeqAccess<'de>,
            {
                match seq.next_element::<TagPeeker>()? {
                    Some(peeked) if peeked.next_tag == Tag::context_explicit(0) => {}
                    _ => {
                        return Err(de::Error::invalid_value(
                            de::Unexpected::Other("V1 certificates are not supported (no version field)"),
                            &"a V3 certificate",
                        ))
                    }
                }

                let version = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let serial_number = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let signature = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(2, &self))?;
                let issuer = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(3, &self))?;
                let validity = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(4, &self))?;
                let subject = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(5, &self))?;
                let subject_public_key_info =
                    seq.next_element()?.ok_or_else(|| de::Error::invalid_length(6, &self))?;

                // issuerUniqueID / subjectUniqueID are skipped, extensions kept
                let mut extensions = None;
                while let Some(peeked) = seq.next_element::<TagPeeker>()? {
                    match peeked.next_tag {
                        tag if tag == Tag::context_explicit(3) => {
                            extensions = Some(
                                seq.next_element::<ExplicitContextTag3<Extensions>>()?
                                    .ok_or_else(|| de::Error::invalid_length(7, &self))?,
                            );
                            break;
                        }
                        _ => {
                            seq.next_element::<Asn1RawDer>()?
                                .ok_or_else(|| de::Error::invalid_length(7, &self))?;
                        }
                    }
                }

                Ok(TbsCertificate {
                    version,
                    serial_number,
                    signature,
                    issuer,
                    validity,
                    subject,
                    subject_public_key_info,
                    extensions,
                })
            }
        }

        deserializer.deserialize_seq(Visitor)
    }
}

/// An AIA entry narrowed to what callers dispatch on: the access method and
/// its URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiaEntry {
    pub access_method: oid::ObjectIdentifier,
    pub access_location_uri: String,
}

/// High-level accessor over a parsed X.509 certificate.
#[derive(Clone, Debug, PartialEq)]
pub struct Cert(Certificate);

impl From<Certificate> for Cert {
    fn from(certificate: Certificate) -> Self {
        Self(certificate)
    }
}

macro_rules! find_ext {
    ($oid:expr, $self:ident, $ext_name:literal) => {{
        let searched: &str = $oid;
        $self
            .extensions()
            .iter()
            .find(|ext| Into::<String>::into(&ext.extn_id.0) == searched)
            .ok_or_else(|| OcspError::CertificateError {
                context: format!("extension not found: {}", $ext_name),
            })
    }};
}

impl Cert {
    pub fn from_der<T: ?Sized + AsRef<[u8]>>(der: &T) -> Result<Self, OcspError> {
        ocsp_asn1_der::from_bytes(der.as_ref())
            .map(Self)
            .map_err(|e| OcspError::CertificateError {
                context: format!("could not parse certificate: {e}"),
            })
    }

    pub fn from_pem(pem: &Pem) -> Result<Self, OcspError> {
        match pem.label() {
            CERT_PEM_LABEL => Self::from_der(pem.data()),
            label => Err(OcspError::CertificateError {
                context: format!("invalid PEM label: {label}"),
            }),
        }
    }

    pub fn from_pem_str(pem_str: &str) -> Result<Self, OcspError> {
        let pem = parse_pem(pem_str).map_err(|e| OcspError::CertificateError {
            context: format!("could not parse certificate: {e}"),
        })?;
        Self::from_pem(&pem)
    }

    /// Accepts PEM (with `-----BEGIN CERTIFICATE-----` framing) or raw DER.
    pub fn from_bytes<T: ?Sized + AsRef<[u8]>>(bytes: &T) -> Result<Self, OcspError> {
        let bytes = bytes.as_ref();
        if bytes.windows(10).any(|window| window == b"-----BEGIN") {
            let pem = parse_pem(bytes).map_err(|e| OcspError::CertificateError {
                context: format!("could not parse certificate: {e}"),
            })?;
            Self::from_pem(&pem)
        } else {
            Self::from_der(bytes)
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, OcspError> {
        let path = path.as_ref();
        let contents = std::fs::read(path).map_err(|e| OcspError::CertificateError {
            context: format!("could not read certificate file {}: {e}", path.display()),
        })?;
        Self::from_bytes(&contents)
    }

    pub fn to_der(&self) -> Result<Vec<u8>, OcspError> {
        ocsp_asn1_der::to_vec(&self.0).map_err(|e| OcspError::CertificateError {
            context: format!("could not encode certificate: {e}"),
        })
    }

    pub fn to_pem(&self) -> Result<Pem, OcspError> {
        Ok(Pem::new(CERT_PEM_LABEL, self.to_der()?))
    }

    pub fn certificate(&self) -> &Certificate {
        &self.0
    }

    pub fn serial_number(&self) -> BigUint {
        BigUint::from_bytes_be(self.0.tbs_certificate.serial_number.as_unsigned_bytes_be())
    }

    pub fn serial_number_asn1(&self) -> &IntegerAsn1 {
        &self.0.tbs_certificate.serial_number
    }

    pub fn subject_name(&self) -> &Name {
        &self.0.tbs_certificate.subject
    }

    pub fn issuer_name(&self) -> &Name {
        &self.0.tbs_certificate.issuer
    }

    /// Canonical re-encoding of the subject Name; this is the byte string a
    /// CertID issuer-name hash is computed over.
    pub fn subject_name_der(&self) -> Result<Vec<u8>, OcspError> {
        ocsp_asn1_der::to_vec(&self.0.tbs_certificate.subject).map_err(|e| OcspError::CertificateError {
            context: format!("could not encode subject name: {e}"),
        })
    }

    /// The subject public key bits with the BIT STRING unused-bits octet
    /// stripped.
    pub fn subject_public_key_bits(&self) -> &[u8] {
        self.0.tbs_certificate.subject_public_key_info.key_bits()
    }

    /// A verifier bound to the key algorithm declared in the certificate.
    pub fn signature_public_key(&self) -> PublicKey {
        PublicKey::from_spki(self.0.tbs_certificate.subject_public_key_info.clone())
    }

    pub fn extensions(&self) -> &[Extension] {
        match &self.0.tbs_certificate.extensions {
            Some(extensions) => &(extensions.0).0,
            None => &[],
        }
    }

    /// Authority Information Access entries carrying a URI location; absent
    /// extension yields an empty list.
    pub fn aia_entries(&self) -> Vec<AiaEntry> {
        let Ok(ext) = find_ext!(oids::ID_PE_AUTHORITY_INFO_ACCESS, self, "authority info access") else {
            return Vec::new();
        };
        match &ext.extn_value {
            ExtensionValue::AuthorityInfoAccess(container) => (container.0)
                .0
                .iter()
                .filter_map(|entry| {
                    entry.access_location.uri().map(|uri| AiaEntry {
                        access_method: entry.access_method.0.clone(),
                        access_location_uri: uri,
                    })
                })
                .collect(),
            _ => unreachable!("invalid extension (expected authority info access)"),
        }
    }

    /// URI of the first `id-ad-caIssuers` AIA entry, or an empty string.
    pub fn issuer_certificate_url(&self) -> String {
        self.first_aia_uri(oids::ID_AD_CA_ISSUERS)
    }

    /// URI of the first `id-ad-ocsp` AIA entry, or an empty string.
    pub fn ocsp_responder_url(&self) -> String {
        self.first_aia_uri(oids::ID_AD_OCSP)
    }

    fn first_aia_uri(&self, method: &str) -> String {
        self.aia_entries()
            .into_iter()
            .find(|entry| Into::<String>::into(&entry.access_method) == method)
            .map(|entry| entry.access_location_uri)
            .unwrap_or_default()
    }

    pub fn subject_key_identifier(&self) -> Result<&[u8], OcspError> {
        let ext = find_ext!(oids::SUBJECT_KEY_IDENTIFIER, self, "subject key identifier")?;
        match &ext.extn_value {
            ExtensionValue::SubjectKeyIdentifier(ski) => Ok(&(ski.0).0),
            _ => unreachable!("invalid extension (expected subject key identifier)"),
        }
    }

    pub fn basic_constraints(&self) -> Result<&BasicConstraints, OcspError> {
        let ext = find_ext!(oids::BASIC_CONSTRAINTS, self, "basic constraints")?;
        match &ext.extn_value {
            ExtensionValue::BasicConstraints(bc) => Ok(&bc.0),
            _ => unreachable!("invalid extension (expected basic constraints)"),
        }
    }

    pub fn key_usage(&self) -> Result<&KeyUsage, OcspError> {
        let ext = find_ext!(oids::KEY_USAGE, self, "key usage")?;
        match &ext.extn_value {
            ExtensionValue::KeyUsage(key_usage) => Ok(&key_usage.0),
            _ => unreachable!("invalid extension (expected key usage)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::x509::name::new_common_name;
    use crate::x509::validity::Time;
    use base64::engine::general_purpose;
    use base64::Engine as _;
    use ocsp_asn1::date::UTCTime;
    use pretty_assertions::assert_eq;

    fn test_certificate_der() -> Vec<u8> {
        general_purpose::STANDARD
            .decode(
                "MIIEGjCCAgKgAwIBAgIEN8NXxDANBgkqhkiG9w0BAQsFADAiMSAwHgYDVQQ\
                 DDBdjb250b3NvLmxvY2FsIEF1dGhvcml0eTAeFw0xOTEwMTcxNzQxMjhaFw0yMjEwM\
                 TYxNzQxMjhaMB0xGzAZBgNVBAMMEnRlc3QuY29udG9zby5sb2NhbDCCASIwDQYJKoZ\
                 IhvcNAQEBBQADggEPADCCAQoCggEBAMptALdk7xKj9JmFSycxlaTV47oLv5Aabir17\
                 f1WseAcZ492Mx0wqcJMmT8rVAusyfqvrhodHu4GELGBySo4KChLEuoEOGTNw/wEMtM\
                 6j1E9K7kig1iiuH9nf9oow7OUdix4+w7TWQWpwl1NekKdTtvLLtEGSjmG187CUqR6f\
                 NHYag+iVMV5Umc5VQadvAgva8qxOsPpDkN/E2df5gST7H5g3igaZtxUa3x7VreN3qJ\
                 P0+hYQiyM7KsgmdFAkKpHC6/k36H7SXtpzh0NbH5OJHifYsAP34WL+a6lAd0VM7UiI\
                 RMcLWA8HfmKL3p4bC+LFv5I0dvUUy1BTz1wHpRvVz8CAwEAAaNdMFswCQYDVR0TBAI\
                 wADAOBgNVHQ8BAf8EBAMCAaAwHQYDVR0OBBYEFCMimIgHf5c00sI9jZzeWoMLsR60M\
                 B8GA1UdIwQYMBaAFBbHC24DEnsUFLz/zmqB5cMCHo9OMA0GCSqGSIb3DQEBCwUAA4I\
                 CAQA1ehZTTBbes2DgGXwQugoV9PdOGMFEVT4dzrrluo/4exSfqLrNuY2NXVuNBKW4n\
                 DA5aD71Q/KUZ8Y8cV9qa8OBJQvQ0dd0qeHmeEYdDsj5YD4ECycKx9U1ZX5fi6tpSIX\
                 6DsietpCnrw4aTgbEOvMeQcuYCTP30Vpt+mYEKBlR/E2Vcl2zUD+67gqppSaC1RceL\
                 /8Cy6ZXlPqwmS2zqK9UhYVRKlEww8xSh/9CR9MmIDc4pHtCpMawcn6Dmo+A+LcKi5v\
                 /NIwvSJTei+h1gvRhvEOPcf4VZJMHXquNrxkMsKpuu7g/AYH7wl2MBaNaxyNlXY5e5\
                 OjxslrbRCfDab11YaJEONcBnapl/+Ajr70uVFN09tDXyk0EHYf75NiRztgVKclna26\
                 zP5qRb0JSYNQJW2kIIBX6DhU7kt6RcauF2hJ+jLWOF2vsAS8PdEr7vnR1EGOrrcQ3V\
                 UgMscNsDqf50YMi2Inu1Kt2t+QSvYs61ON39aVpqR67nskdUWzFCVgWQVezM1ZagoO\
                 yNp7WjRYl8hJ0YVZ7TRtP8nJOkZ6s046YHVWxMuGdqZfd/AUFb9xzzXjGRuuZ1JmSf\
                 +VBOFEe2MaPMyMQBeIs3Othz6Fcy6Am5F6c3It31WYJwiCa/NdbMIvGy1xvAN5kzR/\
                 Y6hkoQljoSr1rVuszJ9dtvuTccA==",
            )
            .expect("invalid base64")
    }

    #[test]
    fn x509_v3_certificate() {
        let encoded = test_certificate_der();

        // Issuer

        let issuer: Name = new_common_name("contoso.local Authority");
        check_serde!(issuer: Name in encoded[34..70]);

        // Validity

        let validity = Validity {
            not_before: Time::Utc(UTCTime::new(2019, 10, 17, 17, 41, 28).unwrap().into()),
            not_after: Time::Utc(UTCTime::new(2022, 10, 16, 17, 41, 28).unwrap().into()),
        };
        check_serde!(validity: Validity in encoded[70..102]);

        // Subject

        let subject: Name = new_common_name("test.contoso.local");
        check_serde!(subject: Name in encoded[102..133]);

        // SubjectPublicKeyInfo

        let subject_public_key_info = SubjectPublicKeyInfo::new_rsa_key(
            IntegerAsn1::from_bytes_be_unsigned(encoded[165..422].to_vec()),
            IntegerAsn1::from_bytes_be_unsigned(vec![0x01, 0x00, 0x01]),
        );
        check_serde!(subject_public_key_info: SubjectPublicKeyInfo in encoded[133..427]);

        // Extensions

        let mut key_usage = KeyUsage::new(7);
        key_usage.set_digital_signature(true);
        key_usage.set_key_encipherment(true);

        let extensions = Extensions(vec![
            Extension::new_basic_constraints(false, None, None),
            Extension::new_key_usage(key_usage),
            Extension::new_subject_key_identifier(encoded[469..489].to_vec()),
            Extension {
                extn_id: crate::oids::authority_key_identifier().into(),
                critical: false,
                extn_value: ExtensionValue::Generic(ocsp_asn1::wrapper::OctetStringAsn1(
                    encoded[498..522].to_vec(),
                )),
            },
        ]);
        check_serde!(extensions: Extensions in encoded[429..522]);

        // SignatureAlgorithm

        let signature_algorithm = AlgorithmIdentifier::new_sha256_with_rsa_encryption();
        check_serde!(signature_algorithm: AlgorithmIdentifier in encoded[522..537]);

        // TbsCertificate

        let tbs_certificate = TbsCertificate {
            version: ExplicitContextTag0(Version::V3),
            serial_number: IntegerAsn1::from_bytes_be_unsigned(vec![0x37, 0xC3, 0x57, 0xC4]),
            signature: signature_algorithm.clone(),
            issuer,
            validity,
            subject,
            subject_public_key_info,
            extensions: Some(ExplicitContextTag3(extensions)),
        };
        check_serde!(tbs_certificate: TbsCertificate in encoded[4..522]);

        // Full certificate

        let certificate = Certificate {
            tbs_certificate,
            signature_algorithm,
            signature_value: ocsp_asn1::bit_string::BitString::with_bytes(encoded[542..1054].to_vec()).into(),
        };
        check_serde!(certificate: Certificate in encoded);
    }

    #[test]
    fn accessors() {
        let cert = Cert::from_der(&test_certificate_der()).unwrap();

        assert_eq!(cert.serial_number(), BigUint::from(935548868u32));
        assert_eq!(
            hex::encode(cert.subject_key_identifier().unwrap()),
            "23229888077f9734d2c23d8d9cde5a830bb11eb4"
        );
        assert!(cert.key_usage().unwrap().digital_signature());
        assert_eq!(cert.basic_constraints().unwrap(), &BasicConstraints::default());

        // no AIA extension in this certificate
        assert!(cert.aia_entries().is_empty());
        assert_eq!(cert.ocsp_responder_url(), "");
        assert_eq!(cert.issuer_certificate_url(), "");

        // subject Name re-encoding matches the wire bytes
        let encoded = test_certificate_der();
        assert_eq!(cert.subject_name_der().unwrap(), &encoded[102..133]);

        // the RSA key parses out of the SPKI
        cert.signature_public_key().as_rsa().unwrap();
    }

    #[test]
    fn pem_round_trip() {
        let cert = Cert::from_der(&test_certificate_der()).unwrap();
        let pem = cert.to_pem().unwrap();
        assert_eq!(pem.label(), "CERTIFICATE");
        let reparsed = Cert::from_bytes(pem.to_string().as_bytes()).unwrap();
        assert_eq!(reparsed, cert);
    }
}
