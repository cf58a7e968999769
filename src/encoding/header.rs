//! Tag header codec (ASHRAE 135 clause 20.2.1).

use core::fmt;

use super::buffer::{ReadBuffer, WriteBuffer};
use super::{Encode, Result};

const EXTENDED_TAG_NUMBER: u8 = 0x0F;
const EXTENDED_LENGTH: u8 = 5;
const OPENING_TAG: u8 = 6;
const CLOSING_TAG: u8 = 7;
const EXTENDED_LENGTH_U16: u8 = 254;
const EXTENDED_LENGTH_U32: u8 = 255;

/// Tag class bit of the initial octet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TagClass {
    Application,
    ContextSpecific,
}

/// A parsed tag header.
///
/// `length` is the resolved value of the length/value/type field: the inline value
/// for 0 to 4, the extended length for 5, and 0 for the opening and closing brackets.
/// For application booleans it is the boolean itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TagHeader {
    tag_number: u8,
    tag_class: TagClass,
    length_value_type: u8,
    length: u32,
}

impl TagHeader {
    /// Header for a payload of `length` octets.
    ///
    /// Lengths 0 to 4 are inline, anything longer uses the extended length form.
    pub fn new(tag_class: TagClass, tag_number: u8, length: u32) -> Self {
        let length_value_type = if length < u32::from(EXTENDED_LENGTH) {
            length as u8
        } else {
            EXTENDED_LENGTH
        };
        Self {
            tag_number,
            tag_class,
            length_value_type,
            length,
        }
    }

    pub fn opening(tag_number: u8) -> Self {
        Self {
            tag_number,
            tag_class: TagClass::ContextSpecific,
            length_value_type: OPENING_TAG,
            length: 0,
        }
    }

    pub fn closing(tag_number: u8) -> Self {
        Self {
            tag_number,
            tag_class: TagClass::ContextSpecific,
            length_value_type: CLOSING_TAG,
            length: 0,
        }
    }

    pub fn tag_number(&self) -> u8 {
        self.tag_number
    }

    pub fn tag_class(&self) -> TagClass {
        self.tag_class
    }

    pub fn is_context_specific(&self) -> bool {
        self.tag_class == TagClass::ContextSpecific
    }

    pub fn length_value_type(&self) -> u8 {
        self.length_value_type
    }

    /// Resolved payload length (or value, for application booleans)
    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn is_opening(&self) -> bool {
        self.length_value_type == OPENING_TAG
    }

    pub fn is_closing(&self) -> bool {
        self.length_value_type == CLOSING_TAG
    }

    pub fn is_bracket(&self) -> bool {
        self.is_opening() || self.is_closing()
    }

    pub fn has_extended_tag_number(&self) -> bool {
        self.tag_number >= EXTENDED_TAG_NUMBER
    }

    pub fn decode(reader: &mut ReadBuffer<'_>) -> Result<Self> {
        let initial = reader.read_u8()?;
        let tag_class = if initial & 0x08 != 0 {
            TagClass::ContextSpecific
        } else {
            TagClass::Application
        };
        let length_value_type = initial & 0x07;

        let tag_number = match initial >> 4 {
            EXTENDED_TAG_NUMBER => reader.read_u8()?,
            inline => inline,
        };

        let length = match length_value_type {
            EXTENDED_LENGTH => match reader.read_u8()? {
                EXTENDED_LENGTH_U16 => u32::from(reader.read_u16()?),
                EXTENDED_LENGTH_U32 => reader.read_u32()?,
                short => u32::from(short),
            },
            OPENING_TAG | CLOSING_TAG => 0,
            inline => u32::from(inline),
        };

        Ok(Self {
            tag_number,
            tag_class,
            length_value_type,
            length,
        })
    }
}

impl Encode for TagHeader {
    fn encode(&self, writer: &mut WriteBuffer) -> Result<()> {
        let number_nibble = if self.has_extended_tag_number() {
            EXTENDED_TAG_NUMBER
        } else {
            self.tag_number
        };
        let class_bit = match self.tag_class {
            TagClass::Application => 0x00,
            TagClass::ContextSpecific => 0x08,
        };
        writer.write_u8(number_nibble << 4 | class_bit | self.length_value_type);

        if self.has_extended_tag_number() {
            writer.write_u8(self.tag_number);
        }

        if self.length_value_type == EXTENDED_LENGTH {
            match self.length {
                0..=253 => writer.write_u8(self.length as u8),
                254..=0xFFFF => {
                    writer.write_u8(EXTENDED_LENGTH_U16);
                    writer.write_u16(self.length as u16);
                }
                _ => {
                    writer.write_u8(EXTENDED_LENGTH_U32);
                    writer.write_u32(self.length);
                }
            }
        }
        Ok(())
    }

    fn len_in_bits(&self) -> usize {
        let mut octets = 1;
        if self.has_extended_tag_number() {
            octets += 1;
        }
        if self.length_value_type == EXTENDED_LENGTH {
            octets += match self.length {
                0..=253 => 1,
                254..=0xFFFF => 3,
                _ => 5,
            };
        }
        octets * 8
    }
}

impl fmt::Display for TagHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.tag_class, self.length_value_type) {
            (TagClass::ContextSpecific, OPENING_TAG) => {
                write!(f, "opening tag {}", self.tag_number)
            }
            (TagClass::ContextSpecific, CLOSING_TAG) => {
                write!(f, "closing tag {}", self.tag_number)
            }
            (TagClass::ContextSpecific, _) => {
                write!(f, "context tag {} (length {})", self.tag_number, self.length)
            }
            (TagClass::Application, _) => {
                write!(f, "application tag {} (length {})", self.tag_number, self.length)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::ErrorKind;
    use proptest::prelude::*;

    fn decode(data: &[u8]) -> (TagHeader, usize) {
        let mut reader = ReadBuffer::new(data);
        let header = TagHeader::decode(&mut reader).unwrap();
        (header, reader.position())
    }

    #[test]
    fn test_decode_inline_header() {
        let (header, consumed) = decode(&[0x21]);
        assert_eq!(consumed, 1);
        assert_eq!(header.tag_number(), 2);
        assert_eq!(header.tag_class(), TagClass::Application);
        assert_eq!(header.length(), 1);

        let (header, _) = decode(&[0x3A]);
        assert_eq!(header.tag_number(), 3);
        assert!(header.is_context_specific());
        assert_eq!(header.length(), 2);
    }

    #[test]
    fn test_extended_tag_number() {
        let header = TagHeader::new(TagClass::ContextSpecific, 20, 2);
        let bytes = header.to_bytes().unwrap();
        assert_eq!(bytes, vec![0xFA, 0x14]);
        assert_eq!(decode(&bytes), (header, 2));

        let header = TagHeader::new(TagClass::ContextSpecific, 14, 0);
        assert_eq!(header.to_bytes().unwrap(), vec![0xE8]);
    }

    #[test]
    fn test_extended_length_boundaries() {
        let cases: [(u32, Vec<u8>); 7] = [
            (0, vec![0x70]),
            (4, vec![0x74]),
            (5, vec![0x75, 0x05]),
            (253, vec![0x75, 0xFD]),
            (254, vec![0x75, 0xFE, 0x00, 0xFE]),
            (65535, vec![0x75, 0xFE, 0xFF, 0xFF]),
            (65536, vec![0x75, 0xFF, 0x00, 0x01, 0x00, 0x00]),
        ];

        for (length, expected) in cases {
            let header = TagHeader::new(TagClass::Application, 7, length);
            let bytes = header.to_bytes().unwrap();
            assert_eq!(bytes, expected, "length {}", length);
            assert_eq!(header.len_in_bytes(), expected.len());
            assert_eq!(decode(&bytes), (header, expected.len()));
        }
    }

    #[test]
    fn test_brackets() {
        let (opening, _) = decode(&[0x3E]);
        assert!(opening.is_opening());
        assert_eq!(opening, TagHeader::opening(3));
        assert_eq!(opening.length(), 0);

        let (closing, consumed) = decode(&[0xFF, 0x20]);
        assert_eq!(consumed, 2);
        assert_eq!(closing, TagHeader::closing(32));
        assert_eq!(closing.to_bytes().unwrap(), vec![0xFF, 0x20]);
        assert_eq!(closing.to_string(), "closing tag 32");
    }

    #[test]
    fn test_truncated_header() {
        for data in [&[0xF9][..], &[0x75], &[0x75, 0xFE, 0x00], &[0x75, 0xFF, 0, 0, 0]] {
            let mut reader = ReadBuffer::new(data);
            let err = TagHeader::decode(&mut reader).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Structural);
        }
    }

    proptest! {
        #[test]
        fn prop_header_round_trip(
            context in any::<bool>(),
            tag_number in 0u8..=254,
            length in any::<u32>(),
        ) {
            let class = if context { TagClass::ContextSpecific } else { TagClass::Application };
            let header = TagHeader::new(class, tag_number, length);
            let bytes = header.to_bytes().unwrap();
            prop_assert_eq!(bytes.len(), header.len_in_bytes());
            let mut reader = ReadBuffer::new(&bytes);
            prop_assert_eq!(TagHeader::decode(&mut reader).unwrap(), header);
            prop_assert_eq!(reader.position(), bytes.len());
        }
    }
}
