//! Public-key material extracted from certificates.

use crate::oids;
use crate::x509::{AlgorithmIdentifierParameters, RsaPublicKeyValue, SubjectPublicKeyInfo};
use rsa::BigUint;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KeyError {
    /// unsupported key algorithm
    #[error("unsupported key algorithm: {algorithm}")]
    UnsupportedAlgorithm { algorithm: String },

    /// unsupported elliptic curve
    #[error("unsupported elliptic curve: {curve}")]
    UnsupportedCurve { curve: String },

    /// invalid key encoding
    #[error("invalid key encoding: {context}")]
    InvalidEncoding { context: String },
}

/// Named elliptic curves this library can verify with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcCurve {
    NistP256,
    NistP384,
}

impl fmt::Display for EcCurve {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EcCurve::NistP256 => f.write_str("P-256"),
            EcCurve::NistP384 => f.write_str("P-384"),
        }
    }
}

/// A verifier-side public key bound to the algorithm its certificate
/// declares. Interpretation of the key bits happens on demand so the raw
/// BIT STRING stays untouched for hashing.
#[derive(Debug, Clone, PartialEq)]
pub struct PublicKey {
    spki: SubjectPublicKeyInfo,
}

impl PublicKey {
    pub fn from_spki(spki: SubjectPublicKeyInfo) -> Self {
        Self { spki }
    }

    fn algorithm_dotted(&self) -> String {
        (&self.spki.algorithm.algorithm.0).into()
    }

    /// Interprets the key bits as an RSAPublicKey.
    pub fn as_rsa(&self) -> Result<rsa::RsaPublicKey, KeyError> {
        if self.algorithm_dotted() != oids::RSA_ENCRYPTION {
            return Err(KeyError::UnsupportedAlgorithm {
                algorithm: oids::symbolic_name(&self.spki.algorithm.algorithm.0),
            });
        }

        let value: RsaPublicKeyValue =
            ocsp_asn1_der::from_bytes(self.spki.key_bits()).map_err(|e| KeyError::InvalidEncoding {
                context: format!("bad RSAPublicKey: {e}"),
            })?;

        rsa::RsaPublicKey::new(
            BigUint::from_bytes_be(value.modulus.as_unsigned_bytes_be()),
            BigUint::from_bytes_be(value.public_exponent.as_unsigned_bytes_be()),
        )
        .map_err(|e| KeyError::InvalidEncoding {
            context: format!("bad RSA key components: {e}"),
        })
    }

    /// The named curve of an EC key.
    pub fn ec_curve(&self) -> Result<EcCurve, KeyError> {
        if self.algorithm_dotted() != oids::EC_PUBLIC_KEY {
            return Err(KeyError::UnsupportedAlgorithm {
                algorithm: oids::symbolic_name(&self.spki.algorithm.algorithm.0),
            });
        }
        match &self.spki.algorithm.parameters {
            AlgorithmIdentifierParameters::NamedCurve(curve) => {
                let dotted: String = (&curve.0).into();
                match dotted.as_str() {
                    oids::SECP256R1 => Ok(EcCurve::NistP256),
                    oids::SECP384R1 => Ok(EcCurve::NistP384),
                    _ => Err(KeyError::UnsupportedCurve {
                        curve: oids::symbolic_name(&curve.0),
                    }),
                }
            }
            _ => Err(KeyError::InvalidEncoding {
                context: "EC key without named curve parameters".to_owned(),
            }),
        }
    }

    /// The SEC1 encoded point of an EC key.
    pub fn ec_point(&self) -> Result<&[u8], KeyError> {
        if self.algorithm_dotted() != oids::EC_PUBLIC_KEY {
            return Err(KeyError::UnsupportedAlgorithm {
                algorithm: oids::symbolic_name(&self.spki.algorithm.algorithm.0),
            });
        }
        Ok(self.spki.key_bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocsp_asn1::wrapper::IntegerAsn1;

    #[test]
    fn rsa_key_round_trip() {
        let spki = SubjectPublicKeyInfo::new_rsa_key(
            IntegerAsn1::from_bytes_be_unsigned(vec![0xC0, 0x01, 0xCA, 0xFE, 0x00, 0x01, 0x02, 0x03]),
            IntegerAsn1::from_bytes_be_unsigned(vec![0x01, 0x00, 0x01]),
        );
        let key = PublicKey::from_spki(spki);
        let rsa_key = key.as_rsa().unwrap();
        use rsa::traits::PublicKeyParts;
        assert_eq!(rsa_key.e(), &BigUint::from(65537u32));
    }

    #[test]
    fn ec_key_curve() {
        let spki = SubjectPublicKeyInfo::new_ec_key(crate::oids::secp256r1(), vec![0x04, 0x01, 0x02]);
        let key = PublicKey::from_spki(spki);
        assert_eq!(key.ec_curve().unwrap(), EcCurve::NistP256);
        assert_eq!(key.ec_point().unwrap(), &[0x04, 0x01, 0x02]);
        assert!(matches!(key.as_rsa(), Err(KeyError::UnsupportedAlgorithm { .. })));
    }
}
