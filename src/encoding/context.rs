//! Context-specific tags, decoded against a caller supplied data type.
//!
//! Nothing on the wire says what a context tag contains: the same two octets are an
//! unsigned integer under one grammar and an enumeration under another. The enclosing
//! grammar supplies both the tag number and the [`DataType`].

use super::application::ApplicationTag;
use super::buffer::{ReadBuffer, WriteBuffer};
use super::header::{TagClass, TagHeader};
use super::payload::{EnumeratedPayload, PrimitiveValue, UnsignedPayload};
use super::{Encode, Result};

/// Expected payload kind of a context tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DataType {
    Null,
    Boolean,
    UnsignedInteger,
    SignedInteger,
    Real,
    Double,
    OctetString,
    CharacterString,
    BitString,
    Enumerated,
    Date,
    Time,
    ObjectIdentifier,
    /// Raw octets, sized by the header
    Unknown,
}

impl DataType {
    pub fn application_tag(self) -> Option<ApplicationTag> {
        Some(match self {
            DataType::Null => ApplicationTag::Null,
            DataType::Boolean => ApplicationTag::Boolean,
            DataType::UnsignedInteger => ApplicationTag::UnsignedInteger,
            DataType::SignedInteger => ApplicationTag::SignedInteger,
            DataType::Real => ApplicationTag::Real,
            DataType::Double => ApplicationTag::Double,
            DataType::OctetString => ApplicationTag::OctetString,
            DataType::CharacterString => ApplicationTag::CharacterString,
            DataType::BitString => ApplicationTag::BitString,
            DataType::Enumerated => ApplicationTag::Enumerated,
            DataType::Date => ApplicationTag::Date,
            DataType::Time => ApplicationTag::Time,
            DataType::ObjectIdentifier => ApplicationTag::ObjectIdentifier,
            DataType::Unknown => return None,
        })
    }
}

impl From<ApplicationTag> for DataType {
    fn from(tag: ApplicationTag) -> Self {
        match tag {
            ApplicationTag::Null => DataType::Null,
            ApplicationTag::Boolean => DataType::Boolean,
            ApplicationTag::UnsignedInteger => DataType::UnsignedInteger,
            ApplicationTag::SignedInteger => DataType::SignedInteger,
            ApplicationTag::Real => DataType::Real,
            ApplicationTag::Double => DataType::Double,
            ApplicationTag::OctetString => DataType::OctetString,
            ApplicationTag::CharacterString => DataType::CharacterString,
            ApplicationTag::BitString => DataType::BitString,
            ApplicationTag::Enumerated => DataType::Enumerated,
            ApplicationTag::Date => DataType::Date,
            ApplicationTag::Time => DataType::Time,
            ApplicationTag::ObjectIdentifier => DataType::ObjectIdentifier,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ContextValue {
    Known(PrimitiveValue),
    Unknown(Vec<u8>),
}

/// A context-specific tag and the value its grammar assigned to it
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContextTagValue {
    header: TagHeader,
    value: ContextValue,
}

impl ContextTagValue {
    pub fn new(tag_number: u8, value: PrimitiveValue) -> Self {
        let header = TagHeader::new(
            TagClass::ContextSpecific,
            tag_number,
            value.header_length(TagClass::ContextSpecific),
        );
        Self {
            header,
            value: ContextValue::Known(value),
        }
    }

    pub fn unsigned(tag_number: u8, value: u64) -> Self {
        Self::new(tag_number, PrimitiveValue::UnsignedInteger(UnsignedPayload::new(value)))
    }

    pub fn enumerated(tag_number: u8, value: u32) -> Self {
        Self::new(tag_number, PrimitiveValue::Enumerated(EnumeratedPayload::new(value)))
    }

    pub fn unknown(tag_number: u8, raw: Vec<u8>) -> Self {
        let header = TagHeader::new(TagClass::ContextSpecific, tag_number, raw.len() as u32);
        Self {
            header,
            value: ContextValue::Unknown(raw),
        }
    }

    pub fn header(&self) -> &TagHeader {
        &self.header
    }

    pub fn tag_number(&self) -> u8 {
        self.header.tag_number()
    }

    pub fn value(&self) -> &ContextValue {
        &self.value
    }

    /// The decoded primitive, unless the tag was captured as raw octets
    pub fn primitive(&self) -> Option<&PrimitiveValue> {
        match &self.value {
            ContextValue::Known(value) => Some(value),
            ContextValue::Unknown(_) => None,
        }
    }

    pub fn data_type(&self) -> DataType {
        match &self.value {
            ContextValue::Known(value) => value.application_tag().into(),
            ContextValue::Unknown(_) => DataType::Unknown,
        }
    }

    /// Decode a context tag numbered `tag_number` whose payload is of `data_type`
    pub fn decode(
        reader: &mut ReadBuffer<'_>,
        tag_number: u8,
        data_type: DataType,
    ) -> Result<Self> {
        let start = reader.position();
        reader.push_context("ContextTag")?;
        let header = TagHeader::decode(reader)?;
        if header.tag_class() != TagClass::ContextSpecific {
            return Err(reader.validation_error(
                start,
                format!("expected context tag {}, found {}", tag_number, header),
            ));
        }
        if header.tag_number() != tag_number {
            return Err(reader.validation_error(
                start,
                format!(
                    "expected context tag {}, found context tag {}",
                    tag_number,
                    header.tag_number()
                ),
            ));
        }
        if header.is_bracket() {
            return Err(reader.validation_error(
                start,
                format!(
                    "context tag {} uses length/value/type {}, reserved for brackets",
                    tag_number,
                    header.length_value_type()
                ),
            ));
        }

        let value = match data_type.application_tag() {
            Some(kind) => ContextValue::Known(PrimitiveValue::decode(reader, kind, &header)?),
            None => ContextValue::Unknown(reader.read_bytes(header.length() as usize)?.to_vec()),
        };
        reader.pop_context("ContextTag")?;
        Ok(Self { header, value })
    }
}

impl Encode for ContextTagValue {
    fn encode(&self, writer: &mut WriteBuffer) -> Result<()> {
        self.header.encode(writer)?;
        match &self.value {
            ContextValue::Known(value) => value.encode(writer, TagClass::ContextSpecific),
            ContextValue::Unknown(raw) => {
                writer.write_bytes(raw);
                Ok(())
            }
        }
    }

    fn len_in_bits(&self) -> usize {
        let payload = match &self.value {
            ContextValue::Known(value) => value.payload_length(TagClass::ContextSpecific),
            ContextValue::Unknown(raw) => raw.len(),
        };
        self.header.len_in_bits() + payload * 8
    }
}
