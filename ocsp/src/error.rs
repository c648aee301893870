use ocsp_asn1_der::Asn1DerError;
use thiserror::Error;

/// Errors surfaced by the OCSP layer.
///
/// Validation is propagation-only: nothing is retried, logged or swallowed,
/// and a failed call leaves the object unchanged.
#[derive(Debug, Error)]
pub enum OcspError {
    /// a certificate could not be loaded, or lacks a field the protocol
    /// needs, or declares an algorithm this library does not implement
    #[error("{context}")]
    CertificateError { context: String },

    /// the OCSP response envelope (or the basic response inside it) could
    /// not be decoded
    #[error("Could not decode OCSP response")]
    ResponseDecodeError { source: Asn1DerError },

    /// a response integrity or signature check failed
    #[error("{context}")]
    VerifyFailed { context: String },

    /// a decoded value is not what the protocol requires at this point
    #[error("{context}")]
    UnexpectedValue { context: String },
}
