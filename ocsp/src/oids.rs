//! OIDs used by OCSP and the X.509 accessor.
//!
//! The registry is a process-wide immutable table: typed accessors are
//! initialized once behind [`OnceLock`]s on first use, and the
//! dotted-decimal/symbolic-name maps are built the same way. Unknown OIDs
//! pass through as their dotted-decimal form.

use oid::ObjectIdentifier;
use std::collections::HashMap;
use std::sync::OnceLock;

macro_rules! define_oid {
    ( $( $uppercase:ident => $lowercase:ident => $dotted:literal => $symbolic:literal, )+ ) => {
        $(
            pub const $uppercase: &str = $dotted;

            pub fn $lowercase() -> ObjectIdentifier {
                static OID: OnceLock<ObjectIdentifier> = OnceLock::new();
                OID.get_or_init(|| $dotted.try_into().expect("hardcoded oid")).clone()
            }
        )+

        const REGISTRY: &[(&str, &str)] = &[
            $( ($dotted, $symbolic), )+
        ];
    };
}

define_oid! {
    // OCSP (RFC 6960)
    ID_PKIX_OCSP => id_pkix_ocsp => "1.3.6.1.5.5.7.48.1" => "id-pkix-ocsp",
    ID_PKIX_OCSP_BASIC => id_pkix_ocsp_basic => "1.3.6.1.5.5.7.48.1.1" => "id-pkix-ocsp-basic",
    ID_PKIX_OCSP_NONCE => id_pkix_ocsp_nonce => "1.3.6.1.5.5.7.48.1.2" => "id-pkix-ocsp-nonce",

    // Authority Information Access (RFC 5280)
    ID_PE_AUTHORITY_INFO_ACCESS => id_pe_authority_info_access => "1.3.6.1.5.5.7.1.1" => "id-pe-authorityInfoAccess",
    ID_AD_CA_ISSUERS => id_ad_ca_issuers => "1.3.6.1.5.5.7.48.2" => "id-ad-caIssuers",

    // hash algorithms
    ID_SHA1 => id_sha1 => "1.3.14.3.2.26" => "id-sha1",
    ID_SHA256 => id_sha256 => "2.16.840.1.101.3.4.2.1" => "id-sha256",
    ID_SHA384 => id_sha384 => "2.16.840.1.101.3.4.2.2" => "id-sha384",
    ID_SHA512 => id_sha512 => "2.16.840.1.101.3.4.2.3" => "id-sha512",
    ID_SHA3_256 => id_sha3_256 => "2.16.840.1.101.3.4.2.8" => "id-sha3-256",
    ID_SHA3_384 => id_sha3_384 => "2.16.840.1.101.3.4.2.9" => "id-sha3-384",
    ID_SHA3_512 => id_sha3_512 => "2.16.840.1.101.3.4.2.10" => "id-sha3-512",

    // RSA signature algorithms (RSADSI)
    RSA_ENCRYPTION => rsa_encryption => "1.2.840.113549.1.1.1" => "rsaEncryption",
    SHA1_WITH_RSA_ENCRYPTION => sha1_with_rsa_encryption => "1.2.840.113549.1.1.5" => "sha1WithRSAEncryption",
    SHA256_WITH_RSA_ENCRYPTION => sha256_with_rsa_encryption => "1.2.840.113549.1.1.11" => "sha256WithRSAEncryption",
    SHA384_WITH_RSA_ENCRYPTION => sha384_with_rsa_encryption => "1.2.840.113549.1.1.12" => "sha384WithRSAEncryption",
    SHA512_WITH_RSA_ENCRYPTION => sha512_with_rsa_encryption => "1.2.840.113549.1.1.13" => "sha512WithRSAEncryption",
    ID_RSASSA_PKCS1_V1_5_WITH_SHA3_256 => id_rsassa_pkcs1_v1_5_with_sha3_256 => "2.16.840.1.101.3.4.3.14" => "id-rsassa-pkcs1-v1_5-with-sha3-256",
    ID_RSASSA_PKCS1_V1_5_WITH_SHA3_384 => id_rsassa_pkcs1_v1_5_with_sha3_384 => "2.16.840.1.101.3.4.3.15" => "id-rsassa-pkcs1-v1_5-with-sha3-384",
    ID_RSASSA_PKCS1_V1_5_WITH_SHA3_512 => id_rsassa_pkcs1_v1_5_with_sha3_512 => "2.16.840.1.101.3.4.3.16" => "id-rsassa-pkcs1-v1_5-with-sha3-512",

    // EC signature algorithms (ANSI-X962, NIST)
    EC_PUBLIC_KEY => ec_public_key => "1.2.840.10045.2.1" => "ecPublicKey",
    ECDSA_WITH_SHA256 => ecdsa_with_sha256 => "1.2.840.10045.4.3.2" => "ecdsa-with-SHA256",
    ECDSA_WITH_SHA384 => ecdsa_with_sha384 => "1.2.840.10045.4.3.3" => "ecdsa-with-SHA384",
    ECDSA_WITH_SHA512 => ecdsa_with_sha512 => "1.2.840.10045.4.3.4" => "ecdsa-with-SHA512",
    ID_ECDSA_WITH_SHA3_256 => id_ecdsa_with_sha3_256 => "2.16.840.1.101.3.4.3.10" => "id-ecdsa-with-sha3-256",
    ID_ECDSA_WITH_SHA3_384 => id_ecdsa_with_sha3_384 => "2.16.840.1.101.3.4.3.11" => "id-ecdsa-with-sha3-384",
    ID_ECDSA_WITH_SHA3_512 => id_ecdsa_with_sha3_512 => "2.16.840.1.101.3.4.3.12" => "id-ecdsa-with-sha3-512",

    // named curves
    SECP256R1 => secp256r1 => "1.2.840.10045.3.1.7" => "secp256r1",
    SECP384R1 => secp384r1 => "1.3.132.0.34" => "secp384r1",

    // attribute types
    AT_COMMON_NAME => at_common_name => "2.5.4.3" => "commonName",
    AT_SERIAL_NUMBER => at_serial_number => "2.5.4.5" => "serialNumber",
    AT_COUNTRY_NAME => at_country_name => "2.5.4.6" => "countryName",
    AT_LOCALITY_NAME => at_locality_name => "2.5.4.7" => "localityName",
    AT_STATE_OR_PROVINCE_NAME => at_state_or_province_name => "2.5.4.8" => "stateOrProvinceName",
    AT_ORGANIZATION_NAME => at_organization_name => "2.5.4.10" => "organizationName",
    AT_ORGANIZATIONAL_UNIT_NAME => at_organizational_unit_name => "2.5.4.11" => "organizationalUnitName",

    // certificate extensions
    SUBJECT_KEY_IDENTIFIER => subject_key_identifier => "2.5.29.14" => "subjectKeyIdentifier",
    KEY_USAGE => key_usage => "2.5.29.15" => "keyUsage",
    BASIC_CONSTRAINTS => basic_constraints => "2.5.29.19" => "basicConstraints",
    AUTHORITY_KEY_IDENTIFIER => authority_key_identifier => "2.5.29.35" => "authorityKeyIdentifier",
}

// RFC 6960 defines id-pkix-ocsp as an alias of the id-ad-ocsp access method.
pub const ID_AD_OCSP: &str = ID_PKIX_OCSP;

pub fn id_ad_ocsp() -> ObjectIdentifier {
    id_pkix_ocsp()
}

fn by_dotted() -> &'static HashMap<&'static str, &'static str> {
    static MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    MAP.get_or_init(|| REGISTRY.iter().copied().collect())
}

fn by_name() -> &'static HashMap<&'static str, &'static str> {
    static MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    MAP.get_or_init(|| REGISTRY.iter().map(|(dotted, name)| (*name, *dotted)).collect())
}

/// Symbolic name for a dotted-decimal OID, if the registry knows it.
pub fn name_of(dotted: &str) -> Option<&'static str> {
    by_dotted().get(dotted).copied()
}

/// Dotted-decimal form for a symbolic name, if the registry knows it.
pub fn dotted_of(name: &str) -> Option<&'static str> {
    by_name().get(name).copied()
}

/// Symbolic name of `oid`, falling back to its dotted-decimal form.
pub fn symbolic_name(oid: &ObjectIdentifier) -> String {
    let dotted: String = oid.into();
    match name_of(&dotted) {
        Some(name) => name.to_owned(),
        None => dotted,
    }
}
