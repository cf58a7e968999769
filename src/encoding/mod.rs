//! BACnet Encoding/Decoding Module
//!
//! This module decodes and encodes the application-layer tagged encoding defined by
//! ASHRAE 135 clause 20.2. Every value on the wire is a tag: a short header carrying a
//! tag number, a tag class and a length/value/type field, followed by a payload whose
//! shape depends on that header.
//!
//! # Overview
//!
//! - [`TagHeader`] parses and writes the 1 to 7 octet header, including extended tag
//!   numbers and extended lengths
//! - [`ApplicationTagValue`] covers the thirteen self-describing primitive kinds
//! - [`ContextTagValue`] decodes a context-specific tag against a caller supplied
//!   [`DataType`]
//! - [`OpeningTag`] and [`ClosingTag`] delimit constructed data, with non-consuming
//!   presence tests such as [`is_closing_tag`]
//! - [`combinators`] builds self-terminating arrays and optional fields out of those
//!   presence tests
//!
//! # Example
//!
//! ```
//! use bacnet_codec::encoding::{decode_application_tag, Encode, PrimitiveValue};
//!
//! let (value, consumed) = decode_application_tag(&[0x21, 0x2A]).unwrap();
//! assert_eq!(consumed, 2);
//! assert!(matches!(value.value(), PrimitiveValue::UnsignedInteger(u) if u.value() == 42));
//! assert_eq!(value.to_bytes().unwrap(), vec![0x21, 0x2A]);
//! ```

mod application;
mod bracket;
mod buffer;
pub mod combinators;
mod context;
mod header;
mod payload;

pub use application::{ApplicationTag, ApplicationTagValue};
pub use bracket::{
    is_application_tag, is_closing_tag, is_context_tag, is_opening_tag, peek_header, ClosingTag,
    OpeningTag,
};
pub use buffer::{DecodeLimits, ReadBuffer, WriteBuffer};
pub use context::{ContextTagValue, ContextValue, DataType};
pub use header::{TagClass, TagHeader};
pub use payload::{
    BitStringPayload, CharacterEncoding, CharacterStringPayload, DatePayload, EnumeratedPayload,
    PrimitiveValue, SignedPayload, TimePayload, UnsignedPayload,
};

use thiserror::Error;

/// Result type for encoding operations
pub type Result<T> = core::result::Result<T, EncodingError>;

/// Broad classification of an [`EncodingError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Buffer underrun, bracket mismatch or unbalanced brackets
    Structural,
    /// A tag of the wrong class, number or length where a specific one is mandated
    Validation,
    /// A tag number or dispatch key with no known grammar
    UnmappedType,
    /// A value that cannot be represented on the wire
    ValueOutOfRange,
}

/// Errors that can occur during encoding/decoding operations
///
/// Decode errors carry the named scope path that was active and the byte offset at
/// which the offending element started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("structural error in {path} at offset {offset}: {reason}")]
    Structural {
        path: String,
        offset: usize,
        reason: String,
    },
    #[error("validation error in {path} at offset {offset}: {reason}")]
    Validation {
        path: String,
        offset: usize,
        reason: String,
    },
    #[error("unmapped type in {path} at offset {offset}: {reason}")]
    UnmappedType {
        path: String,
        offset: usize,
        reason: String,
    },
    #[error("value out of range in {path}: {reason}")]
    ValueOutOfRange { path: String, reason: String },
}

impl EncodingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EncodingError::Structural { .. } => ErrorKind::Structural,
            EncodingError::Validation { .. } => ErrorKind::Validation,
            EncodingError::UnmappedType { .. } => ErrorKind::UnmappedType,
            EncodingError::ValueOutOfRange { .. } => ErrorKind::ValueOutOfRange,
        }
    }

    /// Named scope path active when the error was raised
    pub fn path(&self) -> &str {
        match self {
            EncodingError::Structural { path, .. }
            | EncodingError::Validation { path, .. }
            | EncodingError::UnmappedType { path, .. }
            | EncodingError::ValueOutOfRange { path, .. } => path,
        }
    }

    /// Byte offset of the failing element, for decode errors
    pub fn offset(&self) -> Option<usize> {
        match self {
            EncodingError::Structural { offset, .. }
            | EncodingError::Validation { offset, .. }
            | EncodingError::UnmappedType { offset, .. } => Some(*offset),
            EncodingError::ValueOutOfRange { .. } => None,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            EncodingError::Structural { reason, .. }
            | EncodingError::Validation { reason, .. }
            | EncodingError::UnmappedType { reason, .. }
            | EncodingError::ValueOutOfRange { reason, .. } => reason,
        }
    }
}

/// Serialization shared by every node of the tag tree.
///
/// `len_in_bits` must agree with what `encode` writes; enclosing structures rely on it
/// to pre-size their buffers.
pub trait Encode {
    fn encode(&self, writer: &mut WriteBuffer) -> Result<()>;

    fn len_in_bits(&self) -> usize;

    fn len_in_bytes(&self) -> usize {
        self.len_in_bits() / 8
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = WriteBuffer::with_capacity(self.len_in_bytes());
        self.encode(&mut writer)?;
        Ok(writer.into_vec())
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode(&self, writer: &mut WriteBuffer) -> Result<()> {
        match self {
            Some(value) => value.encode(writer),
            None => Ok(()),
        }
    }

    fn len_in_bits(&self) -> usize {
        self.as_ref().map_or(0, Encode::len_in_bits)
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, writer: &mut WriteBuffer) -> Result<()> {
        for item in self {
            item.encode(writer)?;
        }
        Ok(())
    }

    fn len_in_bits(&self) -> usize {
        self.iter().map(Encode::len_in_bits).sum()
    }
}

impl<T: Encode> Encode for Box<T> {
    fn encode(&self, writer: &mut WriteBuffer) -> Result<()> {
        self.as_ref().encode(writer)
    }

    fn len_in_bits(&self) -> usize {
        self.as_ref().len_in_bits()
    }
}

/// Decode one application tag, returning the value and the number of octets consumed
pub fn decode_application_tag(data: &[u8]) -> Result<(ApplicationTagValue, usize)> {
    let mut reader = ReadBuffer::new(data);
    let value = ApplicationTagValue::decode(&mut reader)?;
    Ok((value, reader.position()))
}

/// Decode one context tag with the given tag number and expected data type
pub fn decode_context_tag(
    data: &[u8],
    tag_number: u8,
    data_type: DataType,
) -> Result<(ContextTagValue, usize)> {
    let mut reader = ReadBuffer::new(data);
    let value = ContextTagValue::decode(&mut reader, tag_number, data_type)?;
    Ok((value, reader.position()))
}

/// Append the encoding of an application tag to `buffer`
pub fn encode_application_tag(buffer: &mut Vec<u8>, value: &ApplicationTagValue) -> Result<()> {
    buffer.extend_from_slice(&value.to_bytes()?);
    Ok(())
}
