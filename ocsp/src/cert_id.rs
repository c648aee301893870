use crate::error::OcspError;
use crate::hash::HashAlgorithm;
use crate::x509::{AlgorithmIdentifier, Cert};
use ocsp_asn1::wrapper::{IntegerAsn1, OctetStringAsn1};
use serde::{Deserialize, Serialize};

/// https://tools.ietf.org/html/rfc6960#section-4.1.1
///
/// CertID          ::=     SEQUENCE {
///     hashAlgorithm       AlgorithmIdentifier,
///     issuerNameHash      OCTET STRING,
///     issuerKeyHash       OCTET STRING,
///     serialNumber        CertificateSerialNumber }
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CertId {
    pub hash_algorithm: AlgorithmIdentifier,
    pub issuer_name_hash: OctetStringAsn1,
    pub issuer_key_hash: OctetStringAsn1,
    pub serial_number: IntegerAsn1,
}

/// Two CertIDs match iff the hash algorithm OID, both hashes and the serial
/// number (compared numerically) are all equal.
impl PartialEq for CertId {
    fn eq(&self, other: &Self) -> bool {
        self.hash_algorithm.algorithm == other.hash_algorithm.algorithm
            && self.issuer_name_hash == other.issuer_name_hash
            && self.issuer_key_hash == other.issuer_key_hash
            && self.serial_number.as_unsigned_bytes_be() == other.serial_number.as_unsigned_bytes_be()
    }
}

impl Eq for CertId {}

/// Computes the CertID identifying `subject` towards an OCSP responder.
///
/// The issuer-name hash is computed over this library's canonical
/// re-encoding of the issuer's subject Name (not over whatever subslice the
/// certificate happened to carry); the issuer-key hash covers the pure key
/// bits of the issuer's SPKI with the unused-bits octet stripped.
pub fn generate_cert_id(subject: &Cert, issuer: &Cert, hash_algorithm: HashAlgorithm) -> Result<CertId, OcspError> {
    let serial_number = subject.serial_number_asn1().clone();
    if serial_number.0.is_empty() {
        return Err(OcspError::CertificateError {
            context: "certificate has no serial number".to_owned(),
        });
    }

    if issuer.subject_name().0.is_empty() {
        return Err(OcspError::CertificateError {
            context: "issuer certificate has no subject name".to_owned(),
        });
    }
    let issuer_name_der = issuer.subject_name_der()?;
    let issuer_name_hash = hash_algorithm.digest(&issuer_name_der);

    let issuer_key_bits = issuer.subject_public_key_bits();
    if issuer_key_bits.is_empty() {
        return Err(OcspError::CertificateError {
            context: "issuer certificate has no public key".to_owned(),
        });
    }
    let issuer_key_hash = hash_algorithm.digest(issuer_key_bits);

    Ok(CertId {
        hash_algorithm: AlgorithmIdentifier::new_hash(hash_algorithm),
        issuer_name_hash: issuer_name_hash.into(),
        issuer_key_hash: issuer_key_hash.into(),
        serial_number,
    })
}
