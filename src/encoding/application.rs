//! Application tag dispatcher.

use super::buffer::{ReadBuffer, WriteBuffer};
use super::header::{TagClass, TagHeader};
use super::payload::{
    BitStringPayload, CharacterStringPayload, DatePayload, EnumeratedPayload, PrimitiveValue,
    SignedPayload, TimePayload, UnsignedPayload,
};
use super::{Encode, Result};
use crate::object::ObjectIdentifier;

/// BACnet application tag numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u8)]
pub enum ApplicationTag {
    Null = 0,
    Boolean = 1,
    UnsignedInteger = 2,
    SignedInteger = 3,
    Real = 4,
    Double = 5,
    OctetString = 6,
    CharacterString = 7,
    BitString = 8,
    Enumerated = 9,
    Date = 10,
    Time = 11,
    ObjectIdentifier = 12,
}

impl TryFrom<u8> for ApplicationTag {
    type Error = u8;

    fn try_from(value: u8) -> core::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(ApplicationTag::Null),
            1 => Ok(ApplicationTag::Boolean),
            2 => Ok(ApplicationTag::UnsignedInteger),
            3 => Ok(ApplicationTag::SignedInteger),
            4 => Ok(ApplicationTag::Real),
            5 => Ok(ApplicationTag::Double),
            6 => Ok(ApplicationTag::OctetString),
            7 => Ok(ApplicationTag::CharacterString),
            8 => Ok(ApplicationTag::BitString),
            9 => Ok(ApplicationTag::Enumerated),
            10 => Ok(ApplicationTag::Date),
            11 => Ok(ApplicationTag::Time),
            12 => Ok(ApplicationTag::ObjectIdentifier),
            other => Err(other),
        }
    }
}

/// A self-describing application tag: its header and the payload it announces
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ApplicationTagValue {
    header: TagHeader,
    value: PrimitiveValue,
}

impl ApplicationTagValue {
    /// Wrap `value` with the header derived from it
    pub fn new(value: PrimitiveValue) -> Self {
        let header = TagHeader::new(
            TagClass::Application,
            value.application_tag() as u8,
            value.header_length(TagClass::Application),
        );
        Self { header, value }
    }

    pub fn null() -> Self {
        Self::new(PrimitiveValue::Null)
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(PrimitiveValue::Boolean(value))
    }

    pub fn unsigned(value: u64) -> Self {
        Self::new(PrimitiveValue::UnsignedInteger(UnsignedPayload::new(value)))
    }

    pub fn signed(value: i64) -> Self {
        Self::new(PrimitiveValue::SignedInteger(SignedPayload::new(value)))
    }

    pub fn real(value: f32) -> Self {
        Self::new(PrimitiveValue::Real(value))
    }

    pub fn double(value: f64) -> Self {
        Self::new(PrimitiveValue::Double(value))
    }

    pub fn octet_string(value: impl Into<Vec<u8>>) -> Self {
        Self::new(PrimitiveValue::OctetString(value.into()))
    }

    pub fn character_string(value: &str) -> Self {
        Self::new(PrimitiveValue::CharacterString(CharacterStringPayload::new(value)))
    }

    pub fn bit_string(bits: &[bool]) -> Self {
        Self::new(PrimitiveValue::BitString(BitStringPayload::from_bits(bits)))
    }

    pub fn enumerated(value: u32) -> Self {
        Self::new(PrimitiveValue::Enumerated(EnumeratedPayload::new(value)))
    }

    pub fn date(value: DatePayload) -> Self {
        Self::new(PrimitiveValue::Date(value))
    }

    pub fn time(value: TimePayload) -> Self {
        Self::new(PrimitiveValue::Time(value))
    }

    pub fn object_identifier(value: ObjectIdentifier) -> Self {
        Self::new(PrimitiveValue::ObjectIdentifier(value))
    }

    pub fn header(&self) -> &TagHeader {
        &self.header
    }

    pub fn value(&self) -> &PrimitiveValue {
        &self.value
    }

    pub fn into_value(self) -> PrimitiveValue {
        self.value
    }

    pub fn application_tag(&self) -> ApplicationTag {
        self.value.application_tag()
    }

    pub fn decode(reader: &mut ReadBuffer<'_>) -> Result<Self> {
        let start = reader.position();
        reader.push_context("ApplicationTag")?;
        let header = TagHeader::decode(reader)?;
        if header.tag_class() != TagClass::Application {
            return Err(reader.validation_error(
                start,
                format!("expected application tag, found {}", header),
            ));
        }
        if header.is_bracket() {
            return Err(reader.structural_error(
                start,
                "length/value/type 6 and 7 are reserved for opening and closing tags",
            ));
        }
        let kind = ApplicationTag::try_from(header.tag_number()).map_err(|number| {
            reader.unmapped_error(start, format!("application tag number {}", number))
        })?;
        let value = PrimitiveValue::decode(reader, kind, &header)?;
        reader.pop_context("ApplicationTag")?;
        Ok(Self { header, value })
    }

    /// Decode an application tag that must be of kind `expected`
    pub fn decode_expecting(reader: &mut ReadBuffer<'_>, expected: ApplicationTag) -> Result<Self> {
        let start = reader.position();
        let value = Self::decode(reader)?;
        if value.application_tag() != expected {
            return Err(reader.validation_error(
                start,
                format!(
                    "expected application tag {:?}, found {:?}",
                    expected,
                    value.application_tag()
                ),
            ));
        }
        Ok(value)
    }
}

impl Encode for ApplicationTagValue {
    fn encode(&self, writer: &mut WriteBuffer) -> Result<()> {
        self.header.encode(writer)?;
        self.value.encode(writer, TagClass::Application)
    }

    fn len_in_bits(&self) -> usize {
        self.header.len_in_bits() + self.value.payload_length(TagClass::Application) * 8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::ErrorKind;
    use crate::object::ObjectType;
    use proptest::prelude::*;

    fn decode(data: &[u8]) -> (ApplicationTagValue, usize) {
        let mut reader = ReadBuffer::new(data);
        let value = ApplicationTagValue::decode(&mut reader).unwrap();
        (value, reader.position())
    }

    #[test]
    fn test_well_formed_fixtures_round_trip() {
        let fixtures: [&[u8]; 16] = [
            &[0x00],
            &[0x10],
            &[0x11],
            &[0x21, 0x05],
            &[0x22, 0x01, 0x00],
            &[0x31, 0xFF],
            &[0x32, 0x01, 0x2C],
            &[0x44, 0x42, 0x28, 0x00, 0x00],
            &[0x55, 0x08, 0x40, 0x09, 0x21, 0xFB, 0x54, 0x44, 0x2D, 0x18],
            &[0x63, 0x01, 0x02, 0x03],
            &[0x75, 0x07, 0x00, b'B', b'A', b'C', b'n', b'e', b't'],
            &[0x82, 0x04, 0xA0],
            &[0x91, 0x01],
            &[0xA4, 0x7C, 0x03, 0x0F, 0x05],
            &[0xB4, 0x0E, 0x1E, 0x2D, 0x32],
            &[0xC4, 0x02, 0x00, 0x00, 0x7B],
        ];

        for bytes in fixtures {
            let (value, consumed) = decode(bytes);
            assert_eq!(consumed, bytes.len());
            assert_eq!(value.len_in_bits() / 8, bytes.len());
            assert_eq!(value.to_bytes().unwrap(), bytes);
        }
    }

    #[test]
    fn test_decoded_values() {
        assert_eq!(decode(&[0x11]).0.value(), &PrimitiveValue::Boolean(true));
        assert_eq!(decode(&[0x44, 0x42, 0x28, 0x00, 0x00]).0.value(), &PrimitiveValue::Real(42.0));
        assert!(matches!(
            decode(&[0x32, 0x01, 0x2C]).0.value(),
            PrimitiveValue::SignedInteger(s) if s.value() == 300
        ));

        let (value, _) = decode(&[0xC4, 0x02, 0x00, 0x00, 0x7B]);
        assert_eq!(
            value.value(),
            &PrimitiveValue::ObjectIdentifier(ObjectIdentifier::new(ObjectType::Device, 123))
        );

        let (value, _) = decode(&[0x75, 0x07, 0x00, b'B', b'A', b'C', b'n', b'e', b't']);
        match value.value() {
            PrimitiveValue::CharacterString(text) => assert_eq!(text.value().unwrap(), "BACnet"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_constructors_match_wire_format() {
        assert_eq!(ApplicationTagValue::boolean(false).to_bytes().unwrap(), vec![0x10]);
        assert_eq!(ApplicationTagValue::unsigned(256).to_bytes().unwrap(), vec![0x22, 0x01, 0x00]);
        assert_eq!(ApplicationTagValue::signed(-1).to_bytes().unwrap(), vec![0x31, 0xFF]);
        assert_eq!(ApplicationTagValue::enumerated(1).to_bytes().unwrap(), vec![0x91, 0x01]);
        assert_eq!(
            ApplicationTagValue::bit_string(&[true, false, true, false]).to_bytes().unwrap(),
            vec![0x82, 0x04, 0xA0]
        );
        assert_eq!(
            ApplicationTagValue::date(DatePayload::from_raw(124, 3, 15, 5)).to_bytes().unwrap(),
            vec![0xA4, 0x7C, 0x03, 0x0F, 0x05]
        );
    }

    #[test]
    fn test_character_string_length_boundaries() {
        let one_octet_form = ApplicationTagValue::character_string(&"a".repeat(252));
        let bytes = one_octet_form.to_bytes().unwrap();
        assert_eq!(&bytes[..2], &[0x75, 0xFD]);
        assert_eq!(bytes.len(), 2 + 253);

        let two_octet_form = ApplicationTagValue::character_string(&"a".repeat(253));
        let bytes = two_octet_form.to_bytes().unwrap();
        assert_eq!(&bytes[..4], &[0x75, 0xFE, 0x00, 0xFE]);
        assert_eq!(two_octet_form.len_in_bytes(), bytes.len());
        assert_eq!(decode(&bytes).0, two_octet_form);

        let four_octet_form = ApplicationTagValue::octet_string(vec![0x55; 65536]);
        let bytes = four_octet_form.to_bytes().unwrap();
        assert_eq!(&bytes[..6], &[0x65, 0xFF, 0x00, 0x01, 0x00, 0x00]);
        assert_eq!(decode(&bytes), (four_octet_form, 65542));
    }

    #[test]
    fn test_rejects_context_class() {
        let mut reader = ReadBuffer::new(&[0x09, 0x05]);
        let err = ApplicationTagValue::decode(&mut reader).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.reason().contains("expected application tag"));
    }

    #[test]
    fn test_unmapped_application_tag() {
        let mut reader = ReadBuffer::new(&[0xD1, 0x00]);
        let err = ApplicationTagValue::decode(&mut reader).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnmappedType);
        assert_eq!(err.offset(), Some(0));
    }

    #[test]
    fn test_reserved_length_value_type() {
        let mut reader = ReadBuffer::new(&[0x26]);
        let err = ApplicationTagValue::decode(&mut reader).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
    }

    #[test]
    fn test_truncated_payload() {
        let mut reader = ReadBuffer::new(&[0x44, 0x42, 0x28]);
        let err = ApplicationTagValue::decode(&mut reader).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert_eq!(err.path(), "ApplicationTag");
    }

    #[test]
    fn test_decode_expecting() {
        let mut reader = ReadBuffer::new(&[0x91, 0x01]);
        let err =
            ApplicationTagValue::decode_expecting(&mut reader, ApplicationTag::Real).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.offset(), Some(0));
    }

    proptest! {
        #[test]
        fn prop_character_string_round_trip(text in "\\PC{0,300}") {
            let value = ApplicationTagValue::character_string(&text);
            let bytes = value.to_bytes().unwrap();
            prop_assert_eq!(bytes.len(), value.len_in_bytes());
            let mut reader = ReadBuffer::new(&bytes);
            let decoded = ApplicationTagValue::decode(&mut reader).unwrap();
            match decoded.value() {
                PrimitiveValue::CharacterString(payload) => {
                    prop_assert_eq!(payload.value(), Some(text))
                }
                other => prop_assert!(false, "unexpected {:?}", other),
            }
        }

        #[test]
        fn prop_real_round_trip(value in -1.0e6f32..1.0e6) {
            let tag = ApplicationTagValue::real(value);
            let bytes = tag.to_bytes().unwrap();
            let mut reader = ReadBuffer::new(&bytes);
            prop_assert_eq!(ApplicationTagValue::decode(&mut reader).unwrap(), tag);
        }
    }
}
