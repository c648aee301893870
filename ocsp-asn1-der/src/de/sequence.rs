use crate::de::Deserializer;
use crate::{Asn1DerError, Result};
use serde::de::{DeserializeSeed, SeqAccess};

/// Lazy sequence walker: elements are deserialized on demand until the
/// announced byte budget is exhausted, which is how trailing OPTIONAL fields
/// are detected.
pub struct Sequence<'a, 'de: 'a> {
    de: &'a mut Deserializer<'de>,
    end: usize,
}

impl<'a, 'de: 'a> Sequence<'a, 'de> {
    pub fn deserialize_lazy(de: &'a mut Deserializer<'de>, len: usize) -> Self {
        let end = de.pos() + len;
        Self { de, end }
    }
}

impl<'a, 'de: 'a> SeqAccess<'de> for Sequence<'a, 'de> {
    type Error = Asn1DerError;

    fn next_element_seed<T: DeserializeSeed<'de>>(&mut self, seed: T) -> Result<Option<T::Value>> {
        if self.de.pos() >= self.end {
            return Ok(None);
        }
        seed.deserialize(&mut *self.de).map(Some)
    }
}
