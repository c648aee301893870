use crate::x509::attribute_type_and_value::{AttributeTypeAndValue, DirectoryString};
use ocsp_asn1::wrapper::{Asn1SequenceOf, Asn1SetOf};
use std::fmt;

pub type RelativeDistinguishedName = Asn1SetOf<AttributeTypeAndValue>;

/// https://tools.ietf.org/html/rfc5280#section-4.1.2.4
pub type Name = Asn1SequenceOf<RelativeDistinguishedName>;

pub fn new_common_name<S: Into<DirectoryString>>(name: S) -> Name {
    Asn1SequenceOf(vec![Asn1SetOf(vec![AttributeTypeAndValue::new_common_name(name)])])
}

/// `CN=…,O=…` style rendering for diagnostics.
pub struct NamePrettyFormatter<'a>(pub &'a Name);

impl fmt::Display for NamePrettyFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for rdn in &(self.0).0 {
            for attr in &rdn.0 {
                if first {
                    first = false;
                } else {
                    write!(f, ",")?;
                }
                let dotted: String = (&attr.ty.0).into();
                let prefix = match dotted.as_str() {
                    crate::oids::AT_COMMON_NAME => "CN",
                    crate::oids::AT_COUNTRY_NAME => "C",
                    crate::oids::AT_LOCALITY_NAME => "L",
                    crate::oids::AT_STATE_OR_PROVINCE_NAME => "ST",
                    crate::oids::AT_ORGANIZATION_NAME => "O",
                    crate::oids::AT_ORGANIZATIONAL_UNIT_NAME => "OU",
                    crate::oids::AT_SERIAL_NUMBER => "SN",
                    _ => "?",
                };
                write!(f, "{}={}", prefix, attr.value)?;
            }
        }
        Ok(())
    }
}
