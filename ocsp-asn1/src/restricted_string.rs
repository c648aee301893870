use std::fmt;
use std::str::FromStr;

/// A byte is outside the character set of the restricted string type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharSetError;

impl fmt::Display for CharSetError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("invalid character set")
    }
}

impl std::error::Error for CharSetError {}

fn is_printable_char(byte: u8) -> bool {
    matches!(byte,
        b'a'..=b'z'
        | b'A'..=b'Z'
        | b'0'..=b'9'
        | b' ' | b'\'' | b'(' | b')' | b'+' | b',' | b'-' | b'.' | b'/' | b':' | b'=' | b'?')
}

macro_rules! restricted_string {
    ($ty:ident, $check:expr, $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone, PartialEq, Eq, Hash)]
        pub struct $ty(Vec<u8>);

        impl $ty {
            pub fn new<V: Into<Vec<u8>>>(data: V) -> Result<Self, CharSetError> {
                let data = data.into();
                #[allow(clippy::redundant_closure_call)]
                if !($check)(&data) {
                    return Err(CharSetError);
                }
                Ok(Self(data))
            }

            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            pub fn into_bytes(self) -> Vec<u8> {
                self.0
            }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, concat!(stringify!($ty), "({})"), self)
            }
        }
    };
}

restricted_string!(
    PrintableString,
    |data: &[u8]| data.iter().copied().all(is_printable_char),
    "An ASN.1 PrintableString (subset of ASCII)."
);

restricted_string!(
    IA5String,
    |data: &[u8]| data.iter().all(|b| b.is_ascii()),
    "An ASN.1 IA5String (ASCII)."
);

restricted_string!(
    BmpString,
    |data: &[u8]| data.len() % 2 == 0,
    "An ASN.1 BMPString, kept as opaque UTF-16BE code units."
);

impl fmt::Display for PrintableString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // charset is a subset of ASCII
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Display for IA5String {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Display for BmpString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let units: Vec<u16> = self
            .0
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        f.write_str(&String::from_utf16_lossy(&units))
    }
}

impl FromStr for PrintableString {
    type Err = CharSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.as_bytes().to_vec())
    }
}

impl FromStr for IA5String {
    type Err = CharSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_charset() {
        assert!("CN=test, O=contoso".parse::<PrintableString>().is_ok());
        assert!("underscore_is_not_printable".parse::<PrintableString>().is_err());
    }

    #[test]
    fn ia5_is_ascii_only() {
        assert!("http://ocsp.example.com/".parse::<IA5String>().is_ok());
        assert!(IA5String::new(vec![0xC3, 0xA9]).is_err());
    }

    #[test]
    fn bmp_wants_even_length() {
        assert!(BmpString::new(vec![0x00, 0x41]).is_ok());
        assert!(BmpString::new(vec![0x00, 0x41, 0x00]).is_err());
        assert_eq!(BmpString::new(vec![0x00, 0x41]).unwrap().to_string(), "A");
    }
}
