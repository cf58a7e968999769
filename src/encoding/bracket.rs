//! Opening/closing tag matching and non-consuming presence tests.

use super::application::ApplicationTag;
use super::buffer::{ReadBuffer, WriteBuffer};
use super::header::{TagClass, TagHeader};
use super::{Encode, Result};

/// Opening bracket of a constructed value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OpeningTag {
    header: TagHeader,
}

impl OpeningTag {
    pub fn new(tag_number: u8) -> Self {
        Self {
            header: TagHeader::opening(tag_number),
        }
    }

    pub fn tag_number(&self) -> u8 {
        self.header.tag_number()
    }

    pub fn decode(reader: &mut ReadBuffer<'_>, expected: u8) -> Result<Self> {
        let start = reader.position();
        let header = TagHeader::decode(reader)?;
        if !header.is_context_specific() || !header.is_opening() {
            return Err(reader.structural_error(
                start,
                format!("expected opening tag {}, found {}", expected, header),
            ));
        }
        if header.tag_number() != expected {
            return Err(reader.structural_error(
                start,
                format!("bracket mismatch: expected opening tag {}, found {}", expected, header),
            ));
        }
        log::trace!("opening tag {} at offset {}", expected, start);
        Ok(Self { header })
    }
}

impl Encode for OpeningTag {
    fn encode(&self, writer: &mut WriteBuffer) -> Result<()> {
        self.header.encode(writer)
    }

    fn len_in_bits(&self) -> usize {
        self.header.len_in_bits()
    }
}

/// Closing bracket matching an [`OpeningTag`] of the same number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClosingTag {
    header: TagHeader,
}

impl ClosingTag {
    pub fn new(tag_number: u8) -> Self {
        Self {
            header: TagHeader::closing(tag_number),
        }
    }

    pub fn tag_number(&self) -> u8 {
        self.header.tag_number()
    }

    pub fn decode(reader: &mut ReadBuffer<'_>, expected: u8) -> Result<Self> {
        let start = reader.position();
        if !reader.has_remaining() {
            return Err(reader.structural_error(
                start,
                format!("opening tag {} is never closed before the end of data", expected),
            ));
        }
        let header = TagHeader::decode(reader)?;
        if !header.is_context_specific() || !header.is_closing() {
            return Err(reader.structural_error(
                start,
                format!("expected closing tag {}, found {}", expected, header),
            ));
        }
        if header.tag_number() != expected {
            return Err(reader.structural_error(
                start,
                format!("bracket mismatch: expected closing tag {}, found {}", expected, header),
            ));
        }
        log::trace!("closing tag {} at offset {}", expected, start);
        Ok(Self { header })
    }
}

impl Encode for ClosingTag {
    fn encode(&self, writer: &mut WriteBuffer) -> Result<()> {
        self.header.encode(writer)
    }

    fn len_in_bits(&self) -> usize {
        self.header.len_in_bits()
    }
}

/// Parse the next header without consuming it
pub fn peek_header(reader: &mut ReadBuffer<'_>) -> Result<TagHeader> {
    reader.peek(|r| TagHeader::decode(r))
}

fn peek_matches(reader: &mut ReadBuffer<'_>, predicate: impl FnOnce(&TagHeader) -> bool) -> bool {
    peek_header(reader).map(|header| predicate(&header)).unwrap_or(false)
}

/// Whether the next tag closes bracket `tag_number`
pub fn is_closing_tag(reader: &mut ReadBuffer<'_>, tag_number: u8) -> bool {
    peek_matches(reader, |h| {
        h.is_context_specific() && h.is_closing() && h.tag_number() == tag_number
    })
}

/// Whether the next tag opens bracket `tag_number`
pub fn is_opening_tag(reader: &mut ReadBuffer<'_>, tag_number: u8) -> bool {
    peek_matches(reader, |h| {
        h.is_context_specific() && h.is_opening() && h.tag_number() == tag_number
    })
}

/// Whether the next tag is a primitive context tag numbered `tag_number`
pub fn is_context_tag(reader: &mut ReadBuffer<'_>, tag_number: u8) -> bool {
    peek_matches(reader, |h| {
        h.is_context_specific() && !h.is_bracket() && h.tag_number() == tag_number
    })
}

/// Whether the next tag is an application tag of kind `tag`
pub fn is_application_tag(reader: &mut ReadBuffer<'_>, tag: ApplicationTag) -> bool {
    peek_matches(reader, |h| h.tag_class() == TagClass::Application && h.tag_number() == tag as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::ErrorKind;

    #[test]
    fn test_matched_pair() {
        let data = [0x3E, 0x3F];
        let mut reader = ReadBuffer::new(&data);
        let opening = OpeningTag::decode(&mut reader, 3).unwrap();
        assert!(is_closing_tag(&mut reader, 3));
        let closing = ClosingTag::decode(&mut reader, 3).unwrap();
        assert_eq!(opening.tag_number(), closing.tag_number());
        assert!(!reader.has_remaining());
    }

    #[test]
    fn test_mismatched_closing_tag() {
        let data = [0x3E, 0x5F];
        let mut reader = ReadBuffer::new(&data);
        OpeningTag::decode(&mut reader, 3).unwrap();
        assert!(!is_closing_tag(&mut reader, 3));
        let err = ClosingTag::decode(&mut reader, 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert_eq!(err.offset(), Some(1));
        assert!(err.reason().contains("bracket mismatch"));
    }

    #[test]
    fn test_unterminated_opening_tag() {
        let mut reader = ReadBuffer::new(&[0x3E]);
        OpeningTag::decode(&mut reader, 3).unwrap();
        let err = ClosingTag::decode(&mut reader, 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
    }

    #[test]
    fn test_opening_tag_rejections() {
        let mut reader = ReadBuffer::new(&[0x4E]);
        assert_eq!(OpeningTag::decode(&mut reader, 3).unwrap_err().kind(), ErrorKind::Structural);

        let mut reader = ReadBuffer::new(&[0x39, 0x00]);
        assert_eq!(OpeningTag::decode(&mut reader, 3).unwrap_err().kind(), ErrorKind::Structural);
    }

    #[test]
    fn test_extended_bracket_numbers() {
        assert_eq!(OpeningTag::new(20).to_bytes().unwrap(), vec![0xFE, 0x14]);
        assert_eq!(ClosingTag::new(20).to_bytes().unwrap(), vec![0xFF, 0x14]);
        let mut reader = ReadBuffer::new(&[0xFF, 0x14]);
        assert!(is_closing_tag(&mut reader, 20));
        assert_eq!(ClosingTag::decode(&mut reader, 20).unwrap().len_in_bytes(), 2);
    }

    #[test]
    fn test_presence_tests_never_consume() {
        let data = [0x29, 0x05];
        let mut reader = ReadBuffer::new(&data);
        assert!(is_context_tag(&mut reader, 2));
        assert!(!is_context_tag(&mut reader, 3));
        assert!(!is_opening_tag(&mut reader, 2));
        assert!(!is_closing_tag(&mut reader, 2));
        assert!(!is_application_tag(&mut reader, ApplicationTag::UnsignedInteger));
        assert_eq!(reader.position(), 0);

        let mut reader = ReadBuffer::new(&[0x21, 0x05]);
        assert!(is_application_tag(&mut reader, ApplicationTag::UnsignedInteger));
        assert!(!is_context_tag(&mut reader, 2));

        let mut empty = ReadBuffer::new(&[]);
        assert!(!is_closing_tag(&mut empty, 0));
        assert!(peek_header(&mut empty).is_err());
        assert_eq!(empty.position(), 0);

        let mut truncated = ReadBuffer::new(&[0xF8]);
        assert!(!is_context_tag(&mut truncated, 15));
        assert_eq!(truncated.position(), 0);
    }

    #[test]
    fn test_closing_tag_is_not_a_context_field() {
        let mut reader = ReadBuffer::new(&[0x2F]);
        assert!(!is_context_tag(&mut reader, 2));
        assert!(is_closing_tag(&mut reader, 2));
    }
}
