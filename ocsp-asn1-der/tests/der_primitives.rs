use ocsp_asn1::bit_string::BitString;
use ocsp_asn1::date::GeneralizedTime;
use ocsp_asn1::wrapper::*;
use ocsp_asn1_der::{Asn1DerError, Asn1RawDer};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};

macro_rules! check {
    ($item:ident: $type:ty, in $encoded:expr) => {
        let encoded = &$encoded[..];

        let serialized = ocsp_asn1_der::to_vec(&$item).expect(concat!("failed ", stringify!($item), " serialization"));
        assert_eq!(
            serialized, encoded,
            concat!("serialized ", stringify!($item), " doesn't match")
        );

        let deserialized: $type =
            ocsp_asn1_der::from_bytes(encoded).expect(concat!("failed ", stringify!($item), " deserialization"));
        assert_eq!(
            deserialized, $item,
            concat!("deserialized ", stringify!($item), " doesn't match")
        );
    };
}

#[test]
fn boolean() {
    let yes = true;
    check!(yes: bool, in [0x01, 0x01, 0xFF]);
    let no = false;
    check!(no: bool, in [0x01, 0x01, 0x00]);

    // BER input tolerance: any non-zero value is TRUE
    let ber: bool = ocsp_asn1_der::from_bytes(&[0x01, 0x01, 0x01]).unwrap();
    assert!(ber);
}

#[test]
fn unsigned_integers() {
    let zero = 0u8;
    check!(zero: u8, in [0x02, 0x01, 0x00]);
    let small = 0x7Fu8;
    check!(small: u8, in [0x02, 0x01, 0x7F]);
    let padded = 0x80u8;
    check!(padded: u8, in [0x02, 0x02, 0x00, 0x80]);
    let wide = 0x1234u16;
    check!(wide: u16, in [0x02, 0x02, 0x12, 0x34]);
}

#[test]
fn integer_overflow_is_reported() {
    let result: Result<u8, _> = ocsp_asn1_der::from_bytes(&[0x02, 0x02, 0x12, 0x34]);
    assert_eq!(result, Err(Asn1DerError::IntegerOverflow));
}

#[test]
fn octet_string() {
    let value = OctetStringAsn1(vec![0xDE, 0xAD, 0xBE, 0xEF]);
    check!(value: OctetStringAsn1, in [0x04, 0x04, 0xDE, 0xAD, 0xBE, 0xEF]);
}

#[test]
fn bit_string_keeps_unused_bits_octet() {
    let value = BitStringAsn1(BitString::with_bytes(vec![0xA0]));
    check!(value: BitStringAsn1, in [0x03, 0x02, 0x00, 0xA0]);
}

#[test]
fn object_identifier() {
    let sha1 = ObjectIdentifierAsn1(oid::ObjectIdentifier::try_from("1.3.14.3.2.26").unwrap());
    check!(sha1: ObjectIdentifierAsn1, in [0x06, 0x05, 0x2B, 0x0E, 0x03, 0x02, 0x1A]);
}

#[test]
fn enumerated() {
    let status = EnumeratedAsn1(6);
    check!(status: EnumeratedAsn1, in [0x0A, 0x01, 0x06]);
}

#[test]
fn generalized_time() {
    let date = GeneralizedTimeAsn1(GeneralizedTime::new(2021, 9, 17, 18, 25, 24).unwrap());
    let encoded = [
        0x18, 0x0F, 0x32, 0x30, 0x32, 0x31, 0x30, 0x39, 0x31, 0x37, 0x31, 0x38, 0x32, 0x35, 0x32, 0x34, 0x5A,
    ];
    check!(date: GeneralizedTimeAsn1, in encoded);
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Pair {
    first: OctetStringAsn1,
    second: u8,
}

#[test]
fn derived_struct_is_a_sequence() {
    let pair = Pair {
        first: OctetStringAsn1(vec![0xAB]),
        second: 7,
    };
    check!(pair: Pair, in [0x30, 0x06, 0x04, 0x01, 0xAB, 0x02, 0x01, 0x07]);
}

#[test]
fn explicit_context_tag_adds_a_header() {
    let wrapped = ExplicitContextTag0(OctetStringAsn1(vec![0x01, 0x02]));
    check!(wrapped: ExplicitContextTag0<OctetStringAsn1>, in [0xA0, 0x04, 0x04, 0x02, 0x01, 0x02]);
}

#[test]
fn implicit_context_tag_replaces_the_header() {
    let wrapped = ImplicitContextTag6(OctetStringAsn1(vec![0x01, 0x02]));
    check!(wrapped: ImplicitContextTag6<OctetStringAsn1>, in [0x86, 0x02, 0x01, 0x02]);
}

#[test]
fn implicit_context_tag_keeps_constructed_bit() {
    let wrapped = ImplicitContextTag1(Pair {
        first: OctetStringAsn1(vec![0xAB]),
        second: 7,
    });
    check!(wrapped: ImplicitContextTag1<Pair>, in [0xA1, 0x06, 0x04, 0x01, 0xAB, 0x02, 0x01, 0x07]);
}

#[test]
fn octet_string_container_nests_the_encoding() {
    let nested = OctetStringAsn1Container(Pair {
        first: OctetStringAsn1(vec![0xAB]),
        second: 7,
    });
    check!(nested: OctetStringAsn1Container<Pair>, in [0x04, 0x08, 0x30, 0x06, 0x04, 0x01, 0xAB, 0x02, 0x01, 0x07]);
}

#[test]
fn bit_string_container_prepends_the_unused_bits_octet() {
    let nested = BitStringAsn1Container(Pair {
        first: OctetStringAsn1(vec![0xAB]),
        second: 7,
    });
    check!(nested: BitStringAsn1Container<Pair>, in [0x03, 0x09, 0x00, 0x30, 0x06, 0x04, 0x01, 0xAB, 0x02, 0x01, 0x07]);
}

#[test]
fn set_of_uses_set_tag() {
    let set = Asn1SetOf(vec![OctetStringAsn1(vec![0x01])]);
    check!(set: Asn1SetOf<OctetStringAsn1>, in [0x31, 0x03, 0x04, 0x01, 0x01]);
}

#[test]
fn raw_der_round_trips_verbatim() {
    let raw = Asn1RawDer(vec![0x30, 0x03, 0x02, 0x01, 0x2A]);
    check!(raw: Asn1RawDer, in [0x30, 0x03, 0x02, 0x01, 0x2A]);
}

#[test]
fn raw_der_captures_one_object_out_of_a_sequence() {
    #[derive(Deserialize, Debug, PartialEq)]
    struct Skimmed {
        head: Asn1RawDer,
        tail: u8,
    }

    let encoded = [0x30, 0x08, 0x30, 0x03, 0x02, 0x01, 0x2A, 0x02, 0x01, 0x07];
    let skimmed: Skimmed = ocsp_asn1_der::from_bytes(&encoded).unwrap();
    assert_eq!(skimmed.head, Asn1RawDer(vec![0x30, 0x03, 0x02, 0x01, 0x2A]));
    assert_eq!(skimmed.tail, 7);
}

#[test]
fn truncated_input_is_reported() {
    let result: Result<OctetStringAsn1, _> = ocsp_asn1_der::from_bytes(&[0x04, 0x05, 0x01]);
    assert_eq!(result, Err(Asn1DerError::Truncated));

    let result: Result<Pair, _> = ocsp_asn1_der::from_bytes(&[0x30]);
    assert_eq!(result, Err(Asn1DerError::Truncated));
}

#[test]
fn indefinite_length_is_rejected() {
    let result: Result<OctetStringAsn1, _> = ocsp_asn1_der::from_bytes(&[0x04, 0x80, 0x00, 0x00]);
    assert_eq!(result, Err(Asn1DerError::OverlongLength));
}

#[test]
fn tag_mismatch_is_reported() {
    // a SEQUENCE where a primitive is expected
    let result: Result<bool, _> = ocsp_asn1_der::from_bytes(&[0x30, 0x00]);
    assert_eq!(result, Err(Asn1DerError::TagMismatch));
}

#[test]
fn non_minimal_length_is_tolerated_on_input() {
    // 0x81 0x03 is a long-form length for a value DER would encode short
    let value: OctetStringAsn1 = ocsp_asn1_der::from_bytes(&[0x04, 0x81, 0x03, 0x01, 0x02, 0x03]).unwrap();
    assert_eq!(value, OctetStringAsn1(vec![0x01, 0x02, 0x03]));
}

#[test]
fn serialization_is_deterministic() {
    let pair = Pair {
        first: OctetStringAsn1(vec![0xAB]),
        second: 7,
    };
    assert_eq!(ocsp_asn1_der::to_vec(&pair).unwrap(), ocsp_asn1_der::to_vec(&pair).unwrap());
}
