use crate::{Asn1DerError, Result};
use ocsp_asn1::tag::Tag;
use ocsp_asn1::wrapper::*;
use ocsp_asn1::Asn1Type;
use std::io::{Read, Write};

/// How many bytes [`PeekableReader::peek_buffer`] keeps around. Enough for a
/// few nested encapsulator headers with long-form lengths.
const PEEK_CAPACITY: usize = 32;

pub trait ReadExt {
    fn read_one(&mut self) -> Result<u8>;
}

impl<R: Read> ReadExt for R {
    fn read_one(&mut self) -> Result<u8> {
        let mut byte = [0u8; 1];
        self.read_exact(&mut byte)?;
        Ok(byte[0])
    }
}

pub trait WriteExt {
    fn write_one(&mut self, byte: u8) -> Result<usize>;
    fn write_exact(&mut self, data: &[u8]) -> Result<usize>;
}

impl<W: Write> WriteExt for W {
    fn write_one(&mut self, byte: u8) -> Result<usize> {
        self.write_exact(&[byte])
    }

    fn write_exact(&mut self, data: &[u8]) -> Result<usize> {
        self.write_all(data)?;
        Ok(data.len())
    }
}

/// A reader with a small lookahead window and a consumed-bytes counter.
/// Peeked bytes are not counted as consumed until they are read back.
pub struct PeekableReader<R> {
    inner: R,
    peeked: [u8; PEEK_CAPACITY],
    peeked_len: usize,
    pos: usize,
}

impl<R: Read> PeekableReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            peeked: [0u8; PEEK_CAPACITY],
            peeked_len: 0,
            pos: 0,
        }
    }

    /// Count of bytes consumed so far (peeks excluded).
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn peek_one(&mut self) -> Result<u8> {
        if self.peeked_len == 0 {
            self.fill_peek_window()?;
        }
        if self.peeked_len == 0 {
            return Err(Asn1DerError::Truncated);
        }
        Ok(self.peeked[0])
    }

    /// Fills the lookahead window as far as the input allows and returns it.
    /// Reaching EOF is not an error here; callers check the window length.
    pub fn peek_buffer(&mut self) -> Result<&[u8]> {
        self.fill_peek_window()?;
        Ok(&self.peeked[..self.peeked_len])
    }

    fn fill_peek_window(&mut self) -> Result<()> {
        while self.peeked_len < PEEK_CAPACITY {
            let read = self.inner.read(&mut self.peeked[self.peeked_len..])?;
            if read == 0 {
                break;
            }
            self.peeked_len += read;
        }
        Ok(())
    }
}

impl<R: Read> Read for PeekableReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.peeked_len > 0 {
            let served = self.peeked_len.min(buf.len());
            buf[..served].copy_from_slice(&self.peeked[..served]);
            self.peeked.copy_within(served..self.peeked_len, 0);
            self.peeked_len -= served;
            self.pos += served;
            return Ok(served);
        }
        let read = self.inner.read(buf)?;
        self.pos += read;
        Ok(read)
    }
}

/// DER length field codec.
pub struct Length;

impl Length {
    /// Reads a length field. Long non-minimal forms are accepted (BER input
    /// tolerance); indefinite lengths are not.
    pub fn deserialized(mut reader: impl Read) -> Result<usize> {
        match reader.read_one()? {
            short @ 0..=0x7F => Ok(usize::from(short)),
            0x80 => Err(Asn1DerError::OverlongLength),
            long => {
                let count = usize::from(long & 0x7F);
                if count > std::mem::size_of::<usize>() {
                    return Err(Asn1DerError::OverlongLength);
                }
                let mut value = 0usize;
                for _ in 0..count {
                    value = (value << 8) | usize::from(reader.read_one()?);
                }
                Ok(value)
            }
        }
    }

    /// Size of the encoded length field for a payload of `len` bytes.
    pub fn encoded_len(len: usize) -> usize {
        if len <= 0x7F {
            1
        } else {
            1 + Self::byte_count(len)
        }
    }

    /// Writes `len` in minimal DER form.
    pub fn serialize(len: usize, mut writer: impl Write) -> Result<usize> {
        if len <= 0x7F {
            writer.write_one(len as u8)
        } else {
            let count = Self::byte_count(len);
            let mut written = writer.write_one(0x80 | count as u8)?;
            for shift in (0..count).rev() {
                written += writer.write_one((len >> (shift * 8)) as u8)?;
            }
            Ok(written)
        }
    }

    fn byte_count(len: usize) -> usize {
        let mut count = 0;
        let mut remaining = len;
        while remaining > 0 {
            count += 1;
            remaining >>= 8;
        }
        count.max(1)
    }
}

/// Maps a wrapper's serde newtype name to the encapsulating tag it stands
/// for. Names that override the tag of the next primitive (OIDs, strings,
/// times, …) are handled separately by the serializer.
pub fn encapsulator_tag_for_name(name: &str) -> Option<Tag> {
    match name {
        _ if name == OctetStringAsn1Container::<()>::NAME => Some(OctetStringAsn1Container::<()>::TAG),
        _ if name == BitStringAsn1Container::<()>::NAME => Some(BitStringAsn1Container::<()>::TAG),
        _ if name == ExplicitContextTag0::<()>::NAME => Some(ExplicitContextTag0::<()>::TAG),
        _ if name == ExplicitContextTag1::<()>::NAME => Some(ExplicitContextTag1::<()>::TAG),
        _ if name == ExplicitContextTag2::<()>::NAME => Some(ExplicitContextTag2::<()>::TAG),
        _ if name == ExplicitContextTag3::<()>::NAME => Some(ExplicitContextTag3::<()>::TAG),
        _ if name == ExplicitContextTag4::<()>::NAME => Some(ExplicitContextTag4::<()>::TAG),
        _ if name == ExplicitContextTag5::<()>::NAME => Some(ExplicitContextTag5::<()>::TAG),
        _ if name == ExplicitContextTag6::<()>::NAME => Some(ExplicitContextTag6::<()>::TAG),
        _ if name == ExplicitContextTag7::<()>::NAME => Some(ExplicitContextTag7::<()>::TAG),
        _ if name == ExplicitContextTag8::<()>::NAME => Some(ExplicitContextTag8::<()>::TAG),
        _ if name == ImplicitContextTag0::<()>::NAME => Some(ImplicitContextTag0::<()>::TAG),
        _ if name == ImplicitContextTag1::<()>::NAME => Some(ImplicitContextTag1::<()>::TAG),
        _ if name == ImplicitContextTag2::<()>::NAME => Some(ImplicitContextTag2::<()>::TAG),
        _ if name == ImplicitContextTag3::<()>::NAME => Some(ImplicitContextTag3::<()>::TAG),
        _ if name == ImplicitContextTag4::<()>::NAME => Some(ImplicitContextTag4::<()>::TAG),
        _ if name == ImplicitContextTag5::<()>::NAME => Some(ImplicitContextTag5::<()>::TAG),
        _ if name == ImplicitContextTag6::<()>::NAME => Some(ImplicitContextTag6::<()>::TAG),
        _ if name == ImplicitContextTag7::<()>::NAME => Some(ImplicitContextTag7::<()>::TAG),
        _ if name == ImplicitContextTag8::<()>::NAME => Some(ImplicitContextTag8::<()>::TAG),
        _ => None,
    }
}

/// Maps a wrapper's serde newtype name to the tag used for the next
/// primitive value it wraps.
pub fn primitive_tag_for_name(name: &str) -> Option<Tag> {
    match name {
        _ if name == ObjectIdentifierAsn1::NAME => Some(ObjectIdentifierAsn1::TAG),
        _ if name == IntegerAsn1::NAME => Some(IntegerAsn1::TAG),
        _ if name == OctetStringAsn1::NAME => Some(OctetStringAsn1::TAG),
        _ if name == BitStringAsn1::NAME => Some(BitStringAsn1::TAG),
        _ if name == EnumeratedAsn1::NAME => Some(EnumeratedAsn1::TAG),
        _ if name == Utf8StringAsn1::NAME => Some(Utf8StringAsn1::TAG),
        _ if name == PrintableStringAsn1::NAME => Some(PrintableStringAsn1::TAG),
        _ if name == IA5StringAsn1::NAME => Some(IA5StringAsn1::TAG),
        _ if name == BmpStringAsn1::NAME => Some(BmpStringAsn1::TAG),
        _ if name == UTCTimeAsn1::NAME => Some(UTCTimeAsn1::TAG),
        _ if name == GeneralizedTimeAsn1::NAME => Some(GeneralizedTimeAsn1::TAG),
        _ => None,
    }
}
