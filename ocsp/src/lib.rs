//! An OCSP (RFC 6960) client library.
//!
//! The crate covers the protocol work between a caller and its HTTP
//! transport: building a DER-encoded `OCSPRequest` for a certificate, and
//! decoding plus validating the `OCSPResponse` a responder sends back.
//!
//! ```no_run
//! use ocsp::hash::HashAlgorithm;
//! use ocsp::x509::Cert;
//!
//! # fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let subject = Cert::from_file("subject.crt")?;
//! let issuer = Cert::from_file("issuer.crt")?;
//!
//! let cert_id = ocsp::generate_cert_id(&subject, &issuer, HashAlgorithm::SHA2_256)?;
//! let mut request = ocsp::OcspRequest::new();
//! request.add_certificate_id(cert_id.clone());
//! let encoded = request.encode_der()?;
//!
//! // POST `encoded` to `subject.ocsp_responder_url()` as
//! // application/ocsp-request, then hand the body back:
//! # let body: Vec<u8> = vec![];
//! let mut response = ocsp::OcspResponse::from_der(&body)?;
//! response.validate_certificate_id(&cert_id)?;
//! response.validate_signature()?;
//! let revoked = response.is_revoked()?;
//! # Ok(())
//! # }
//! ```

#[cfg(test)]
#[macro_use]
mod test_utils;

pub mod cert_id;
pub mod error;
pub mod hash;
pub mod key;
pub mod oids;
pub mod pem;
pub mod request;
pub mod response;
pub mod signature;
pub mod x509;

pub use cert_id::{generate_cert_id, CertId};
pub use error::OcspError;
pub use hash::HashAlgorithm;
pub use request::OcspRequest;
pub use response::{BasicOcspResponse, OcspResponse, ResponseStatus};
