//! Signature verification for OCSP responses.

use crate::hash::HashAlgorithm;
use crate::key::{EcCurve, KeyError, PublicKey};
use crate::oids;
use crate::x509::AlgorithmIdentifier;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SignatureError {
    /// Key error
    #[error("key error: {source}")]
    Key {
        #[from]
        source: KeyError,
    },

    /// RSA error
    #[error("RSA error: {context}")]
    Rsa { context: String },

    /// EC error
    #[error("EC error: {context}")]
    Ec { context: String },

    /// invalid signature
    #[error("invalid signature")]
    BadSignature,

    /// unsupported algorithm
    #[error("unsupported algorithm: {algorithm}")]
    UnsupportedAlgorithm { algorithm: String },
}

/// Verification schemes supported for responder signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SignatureAlgorithm {
    RsaPkcs1v15(HashAlgorithm),
    Ecdsa(HashAlgorithm),
}

impl TryFrom<&'_ AlgorithmIdentifier> for SignatureAlgorithm {
    type Error = SignatureError;

    fn try_from(id: &AlgorithmIdentifier) -> Result<Self, Self::Error> {
        let name = id.symbolic_name();
        // the hash is derived from the token embedded in the symbolic name
        let hash = HashAlgorithm::from_name_token(&name)
            .ok_or_else(|| SignatureError::UnsupportedAlgorithm { algorithm: name.clone() })?;

        let dotted: String = (&id.algorithm.0).into();
        match dotted.as_str() {
            oids::SHA1_WITH_RSA_ENCRYPTION
            | oids::SHA256_WITH_RSA_ENCRYPTION
            | oids::SHA384_WITH_RSA_ENCRYPTION
            | oids::SHA512_WITH_RSA_ENCRYPTION
            | oids::ID_RSASSA_PKCS1_V1_5_WITH_SHA3_256
            | oids::ID_RSASSA_PKCS1_V1_5_WITH_SHA3_384
            | oids::ID_RSASSA_PKCS1_V1_5_WITH_SHA3_512 => Ok(Self::RsaPkcs1v15(hash)),
            oids::ECDSA_WITH_SHA256
            | oids::ECDSA_WITH_SHA384
            | oids::ECDSA_WITH_SHA512
            | oids::ID_ECDSA_WITH_SHA3_256
            | oids::ID_ECDSA_WITH_SHA3_384
            | oids::ID_ECDSA_WITH_SHA3_512 => Ok(Self::Ecdsa(hash)),
            _ => Err(SignatureError::UnsupportedAlgorithm { algorithm: name }),
        }
    }
}

impl SignatureAlgorithm {
    pub fn from_algorithm_identifier(algorithm_identifier: &AlgorithmIdentifier) -> Result<Self, SignatureError> {
        Self::try_from(algorithm_identifier)
    }

    pub fn hash_algorithm(&self) -> HashAlgorithm {
        match self {
            SignatureAlgorithm::RsaPkcs1v15(hash) => *hash,
            SignatureAlgorithm::Ecdsa(hash) => *hash,
        }
    }

    pub fn verify(self, public_key: &PublicKey, msg: &[u8], signature: &[u8]) -> Result<(), SignatureError> {
        match self {
            SignatureAlgorithm::RsaPkcs1v15(hash) => {
                use rsa::pkcs1v15;
                use rsa::signature::Verifier as _;

                let rsa_public_key = public_key.as_rsa()?;
                let signature = pkcs1v15::Signature::try_from(signature).map_err(|e| SignatureError::Rsa {
                    context: format!("cannot parse signature: {e}"),
                })?;

                match hash {
                    HashAlgorithm::SHA1 => {
                        pkcs1v15::VerifyingKey::<sha1::Sha1>::new(rsa_public_key).verify(msg, &signature)
                    }
                    HashAlgorithm::SHA2_256 => {
                        pkcs1v15::VerifyingKey::<sha2::Sha256>::new(rsa_public_key).verify(msg, &signature)
                    }
                    HashAlgorithm::SHA2_384 => {
                        pkcs1v15::VerifyingKey::<sha2::Sha384>::new(rsa_public_key).verify(msg, &signature)
                    }
                    HashAlgorithm::SHA2_512 => {
                        pkcs1v15::VerifyingKey::<sha2::Sha512>::new(rsa_public_key).verify(msg, &signature)
                    }
                    HashAlgorithm::SHA3_256 => {
                        pkcs1v15::VerifyingKey::<sha3::Sha3_256>::new(rsa_public_key).verify(msg, &signature)
                    }
                    HashAlgorithm::SHA3_384 => {
                        pkcs1v15::VerifyingKey::<sha3::Sha3_384>::new(rsa_public_key).verify(msg, &signature)
                    }
                    HashAlgorithm::SHA3_512 => {
                        pkcs1v15::VerifyingKey::<sha3::Sha3_512>::new(rsa_public_key).verify(msg, &signature)
                    }
                }
                .map_err(|_| SignatureError::BadSignature)?;
            }
            SignatureAlgorithm::Ecdsa(hash) => {
                let curve = public_key.ec_curve()?;
                let point = public_key.ec_point()?;

                match (curve, hash) {
                    (EcCurve::NistP256, HashAlgorithm::SHA2_256) => {
                        use p256::ecdsa::signature::Verifier as _;

                        let verifying_key =
                            p256::ecdsa::VerifyingKey::from_sec1_bytes(point).map_err(|e| SignatureError::Ec {
                                context: format!("cannot parse p256 public key: {e}"),
                            })?;
                        let signature =
                            p256::ecdsa::Signature::from_der(signature).map_err(|e| SignatureError::Ec {
                                context: format!("cannot parse p256 signature: {e}"),
                            })?;
                        verifying_key
                            .verify(msg, &signature)
                            .map_err(|_| SignatureError::BadSignature)?;
                    }
                    (EcCurve::NistP384, HashAlgorithm::SHA2_384) => {
                        use p384::ecdsa::signature::Verifier as _;

                        let verifying_key =
                            p384::ecdsa::VerifyingKey::from_sec1_bytes(point).map_err(|e| SignatureError::Ec {
                                context: format!("cannot parse p384 public key: {e}"),
                            })?;
                        let signature =
                            p384::ecdsa::Signature::from_der(signature).map_err(|e| SignatureError::Ec {
                                context: format!("cannot parse p384 signature: {e}"),
                            })?;
                        verifying_key
                            .verify(msg, &signature)
                            .map_err(|_| SignatureError::BadSignature)?;
                    }
                    (curve, hash) => {
                        return Err(SignatureError::UnsupportedAlgorithm {
                            algorithm: format!("ECDSA over {curve} with {hash:?}"),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AlgorithmIdentifier::new_sha256_with_rsa_encryption(), SignatureAlgorithm::RsaPkcs1v15(HashAlgorithm::SHA2_256))]
    #[case(AlgorithmIdentifier::new_ecdsa_with_sha256(), SignatureAlgorithm::Ecdsa(HashAlgorithm::SHA2_256))]
    #[case(AlgorithmIdentifier::new_ecdsa_with_sha384(), SignatureAlgorithm::Ecdsa(HashAlgorithm::SHA2_384))]
    fn algorithm_identifier_conversions(#[case] id: AlgorithmIdentifier, #[case] expected: SignatureAlgorithm) {
        assert_eq!(SignatureAlgorithm::try_from(&id).unwrap(), expected);
    }

    #[test]
    fn plain_rsa_encryption_is_not_a_signature_algorithm() {
        let id = AlgorithmIdentifier::new_rsa_encryption();
        assert!(matches!(
            SignatureAlgorithm::try_from(&id),
            Err(SignatureError::UnsupportedAlgorithm { algorithm }) if algorithm == "rsaEncryption"
        ));
    }
}
