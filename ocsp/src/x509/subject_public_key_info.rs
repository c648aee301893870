use crate::x509::AlgorithmIdentifier;
use ocsp_asn1::bit_string::BitString;
use ocsp_asn1::wrapper::{BitStringAsn1, IntegerAsn1};
use serde::{Deserialize, Serialize};

/// https://tools.ietf.org/html/rfc5280#section-4.1.2.7
///
/// The key material is kept as the raw BIT STRING so the bytes hashed for a
/// CertID issuer-key hash are exactly the bytes from the certificate;
/// interpretation (RSA modulus/exponent, EC point) happens on demand in the
/// key layer.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct SubjectPublicKeyInfo {
    pub algorithm: AlgorithmIdentifier,
    pub subject_public_key: BitStringAsn1,
}

/// RSAPublicKey ::= SEQUENCE { modulus INTEGER, publicExponent INTEGER }
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct RsaPublicKeyValue {
    pub modulus: IntegerAsn1,
    pub public_exponent: IntegerAsn1,
}

impl SubjectPublicKeyInfo {
    pub fn new_rsa_key(modulus: IntegerAsn1, public_exponent: IntegerAsn1) -> Self {
        let key = RsaPublicKeyValue {
            modulus,
            public_exponent,
        };
        // serializing two integers into a fresh buffer cannot fail
        let encoded = ocsp_asn1_der::to_vec(&key).expect("RSAPublicKey encoding");
        Self {
            algorithm: AlgorithmIdentifier::new_rsa_encryption(),
            subject_public_key: BitString::with_bytes(encoded).into(),
        }
    }

    pub fn new_ec_key(curve: oid::ObjectIdentifier, point: Vec<u8>) -> Self {
        Self {
            algorithm: AlgorithmIdentifier::new_elliptic_curve(curve),
            subject_public_key: BitString::with_bytes(point).into(),
        }
    }

    /// The pure key bits with the unused-bits octet stripped.
    pub fn key_bits(&self) -> &[u8] {
        self.subject_public_key.payload_view()
    }
}
