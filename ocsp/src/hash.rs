//! Hash algorithms supported for CertID generation and signature checks.

use crate::oids;
use digest::Digest;
use oid::ObjectIdentifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum HashAlgorithm {
    SHA1,
    SHA2_256,
    SHA2_384,
    SHA2_512,
    SHA3_256,
    SHA3_384,
    SHA3_512,
}

impl HashAlgorithm {
    pub fn digest(self, msg: &[u8]) -> Vec<u8> {
        match self {
            Self::SHA1 => sha1::Sha1::digest(msg).to_vec(),
            Self::SHA2_256 => sha2::Sha256::digest(msg).to_vec(),
            Self::SHA2_384 => sha2::Sha384::digest(msg).to_vec(),
            Self::SHA2_512 => sha2::Sha512::digest(msg).to_vec(),
            Self::SHA3_256 => sha3::Sha3_256::digest(msg).to_vec(),
            Self::SHA3_384 => sha3::Sha3_384::digest(msg).to_vec(),
            Self::SHA3_512 => sha3::Sha3_512::digest(msg).to_vec(),
        }
    }

    /// The OID identifying this hash (`id-sha1`, `id-sha256`, …).
    pub fn oid(self) -> ObjectIdentifier {
        match self {
            Self::SHA1 => oids::id_sha1(),
            Self::SHA2_256 => oids::id_sha256(),
            Self::SHA2_384 => oids::id_sha384(),
            Self::SHA2_512 => oids::id_sha512(),
            Self::SHA3_256 => oids::id_sha3_256(),
            Self::SHA3_384 => oids::id_sha3_384(),
            Self::SHA3_512 => oids::id_sha3_512(),
        }
    }

    /// Derives the hash from the token embedded in an algorithm's symbolic
    /// name, e.g. `sha256WithRSAEncryption` or `ecdsa-with-SHA384`.
    pub fn from_name_token(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        // the SHA-3 tokens must win over their SHA-2 substrings
        const TOKENS: &[(&str, HashAlgorithm)] = &[
            ("sha3-256", HashAlgorithm::SHA3_256),
            ("sha3-384", HashAlgorithm::SHA3_384),
            ("sha3-512", HashAlgorithm::SHA3_512),
            ("sha512", HashAlgorithm::SHA2_512),
            ("sha384", HashAlgorithm::SHA2_384),
            ("sha256", HashAlgorithm::SHA2_256),
            ("sha1", HashAlgorithm::SHA1),
        ];
        TOKENS.iter().find(|(token, _)| name.contains(token)).map(|(_, hash)| *hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // FIPS 180 / 202 "abc" test vectors
    #[test]
    fn digest_matches_known_vectors() {
        assert_eq!(
            hex::encode(HashAlgorithm::SHA1.digest(b"abc")),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(
            hex::encode(HashAlgorithm::SHA2_256.digest(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[rstest]
    #[case("sha256WithRSAEncryption", Some(HashAlgorithm::SHA2_256))]
    #[case("ecdsa-with-SHA256", Some(HashAlgorithm::SHA2_256))]
    #[case("ecdsa-with-SHA384", Some(HashAlgorithm::SHA2_384))]
    #[case("id-sha1", Some(HashAlgorithm::SHA1))]
    #[case("id-rsassa-pkcs1-v1_5-with-sha3-256", Some(HashAlgorithm::SHA3_256))]
    #[case("sha512WithRSAEncryption", Some(HashAlgorithm::SHA2_512))]
    #[case("rsaEncryption", None)]
    fn hash_token_extraction(#[case] name: &str, #[case] expected: Option<HashAlgorithm>) {
        assert_eq!(HashAlgorithm::from_name_token(name), expected);
    }
}
