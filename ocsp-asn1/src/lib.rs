//! ASN.1 model types shared by the OCSP crates.
//!
//! Types in this crate know their ASN.1 identity (tag and serde newtype name)
//! but are encoding-agnostic: the actual DER work is done by the
//! `ocsp-asn1-der` (de)serializer, which recognizes the wrapper names exposed
//! through [`Asn1Type`].

pub mod bit_string;
pub mod date;
pub mod restricted_string;
pub mod tag;
pub mod wrapper;

use tag::Tag;

/// Binds a type to its ASN.1 tag and to the serde newtype name the DER
/// backend dispatches on.
pub trait Asn1Type {
    const TAG: Tag;
    const NAME: &'static str;
}
