use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const PEM_HEADER_START: &str = "-----BEGIN";
const PEM_HEADER_END: &str = "-----END";

#[derive(Debug, Clone, Error)]
pub enum PemError {
    #[error("pem header not found")]
    HeaderNotFound,

    #[error("invalid pem header")]
    InvalidHeader,

    #[error("pem footer not found")]
    FooterNotFound,

    #[error("couldn't decode base64: {0}")]
    Base64Decoding(#[from] base64::DecodeError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pem {
    label: String,
    data: Vec<u8>,
}

impl Pem {
    pub fn new<L: Into<String>, D: Into<Vec<u8>>>(label: L, data: D) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

impl FromStr for Pem {
    type Err = PemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_pem(s.as_bytes())
    }
}

impl fmt::Display for Pem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {}-----\n{}\n{} {}-----",
            PEM_HEADER_START,
            self.label,
            BASE64.encode(&self.data),
            PEM_HEADER_END,
            self.label,
        )
    }
}

/// Reads the first PEM-encoded block found in `input`.
pub fn parse_pem<T: ?Sized + AsRef<[u8]>>(input: &T) -> Result<Pem, PemError> {
    parse_pem_impl(input.as_ref())
}

fn parse_pem_impl(input: &[u8]) -> Result<Pem, PemError> {
    let header_start_idx = find(input, PEM_HEADER_START.as_bytes()).ok_or(PemError::HeaderNotFound)?;

    let label_start_idx = header_start_idx + PEM_HEADER_START.len();
    let label_end_idx = find(&input[label_start_idx..], b"-").ok_or(PemError::InvalidHeader)? + label_start_idx;
    let label = String::from_utf8_lossy(&input[label_start_idx..label_end_idx])
        .trim()
        .to_owned();

    let header_end_idx = find(&input[label_end_idx..], b"\n").ok_or(PemError::FooterNotFound)? + label_end_idx;

    let footer_start_idx =
        find(&input[header_end_idx..], PEM_HEADER_END.as_bytes()).ok_or(PemError::FooterNotFound)? + header_end_idx;

    let body: Vec<u8> = input[header_end_idx + 1..footer_start_idx]
        .iter()
        .copied()
        .filter(|byte| *byte != b'\r' && *byte != b'\n')
        .collect();
    let data = BASE64.decode(&body)?;

    Ok(Pem { label, data })
}

fn find(buffer: &[u8], value: &[u8]) -> Option<usize> {
    buffer.windows(value.len()).position(|window| window == value)
}
