//! Constructed Data
//!
//! A property value on the wire is wrapped in an opening/closing tag pair and carries
//! no description of its own shape. The shape is chosen by the object type and the
//! property identifier the value belongs to: the same `[0x91, 0x01]` is a binary
//! present value for a binary object and a validation error for an analog one.
//!
//! [`ConstructedData::decode`] looks the pair up in the dispatch table ([`lookup`]),
//! then runs the selected [`PropertyGrammar`]. Grammars are data: element grammars
//! name application kinds, enumerations or [`RecordGrammar`]s, and records are
//! sequences of [`FieldSpec`]s. The arguments are passed down by value so that a
//! nested property value (as in a command object's action list) is dispatched on the
//! object and property named next to it.
//!
//! # Example
//!
//! ```
//! use bacnet_codec::constructed::{decode_constructed_data, PropertyArguments};
//! use bacnet_codec::object::{ObjectType, PropertyIdentifier};
//!
//! let args =
//!     PropertyArguments::new(ObjectType::BinaryValue, PropertyIdentifier::PresentValue, None);
//! let (data, consumed) = decode_constructed_data(&[0x3E, 0x91, 0x01, 0x3F], 3, args).unwrap();
//! assert_eq!(consumed, 4);
//! let name = data.single().and_then(|element| element.enumeration_name());
//! assert_eq!(name.as_deref(), Some("Active"));
//! ```

mod grammar;
mod record;
pub mod records;
mod table;

pub use grammar::{Element, ElementGrammar, EnumerationKind, PropertyGrammar, TaggedEnumeration};
pub use record::{Field, FieldKind, FieldSpec, FieldValue, Record, RecordGrammar};
pub use table::{lookup, DispatchEntry, LookupError, DISPATCH_TABLE};

use crate::encoding::combinators::read_terminated;
use crate::encoding::{
    ApplicationTag, ApplicationTagValue, ClosingTag, Encode, OpeningTag, PrimitiveValue, ReadBuffer,
    Result, WriteBuffer,
};
use crate::object::{ObjectType, PropertyIdentifier};

/// The dispatch key of a property value, threaded down to nested values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PropertyArguments {
    pub object_type: ObjectType,
    pub property_identifier: PropertyIdentifier,
    pub array_index: Option<u32>,
}

impl PropertyArguments {
    pub fn new(
        object_type: ObjectType,
        property_identifier: PropertyIdentifier,
        array_index: Option<u32>,
    ) -> Self {
        Self {
            object_type,
            property_identifier,
            array_index,
        }
    }
}

impl Default for PropertyArguments {
    fn default() -> Self {
        Self::new(ObjectType::Device, PropertyIdentifier::All, None)
    }
}

/// Contents between the brackets of a constructed value
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ConstructedValue {
    Single(Element),
    /// For array index 0 only the element count is present
    Array {
        number_of_data_elements: Option<ApplicationTagValue>,
        elements: Vec<Element>,
    },
    List(Vec<Element>),
}

impl Encode for ConstructedValue {
    fn encode(&self, writer: &mut WriteBuffer) -> Result<()> {
        match self {
            ConstructedValue::Single(element) => element.encode(writer),
            ConstructedValue::Array {
                number_of_data_elements,
                elements,
            } => {
                number_of_data_elements.encode(writer)?;
                elements.encode(writer)
            }
            ConstructedValue::List(elements) => elements.encode(writer),
        }
    }

    fn len_in_bits(&self) -> usize {
        match self {
            ConstructedValue::Single(element) => element.len_in_bits(),
            ConstructedValue::Array {
                number_of_data_elements,
                elements,
            } => number_of_data_elements.len_in_bits() + elements.len_in_bits(),
            ConstructedValue::List(elements) => elements.len_in_bits(),
        }
    }
}

/// A property value inside opening/closing tag `tag_number`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConstructedData {
    arguments: PropertyArguments,
    opening_tag: OpeningTag,
    value: ConstructedValue,
    closing_tag: ClosingTag,
}

impl ConstructedData {
    pub fn new(tag_number: u8, arguments: PropertyArguments, value: ConstructedValue) -> Self {
        Self {
            arguments,
            opening_tag: OpeningTag::new(tag_number),
            value,
            closing_tag: ClosingTag::new(tag_number),
        }
    }

    pub fn tag_number(&self) -> u8 {
        self.opening_tag.tag_number()
    }

    pub fn arguments(&self) -> PropertyArguments {
        self.arguments
    }

    pub fn object_type(&self) -> ObjectType {
        self.arguments.object_type
    }

    pub fn property_identifier(&self) -> PropertyIdentifier {
        self.arguments.property_identifier
    }

    pub fn array_index(&self) -> Option<u32> {
        self.arguments.array_index
    }

    pub fn value(&self) -> &ConstructedValue {
        &self.value
    }

    /// The element of a single-valued property
    pub fn single(&self) -> Option<&Element> {
        match &self.value {
            ConstructedValue::Single(element) => Some(element),
            _ => None,
        }
    }

    /// Elements of an array or list; empty for a single value or an array count
    pub fn elements(&self) -> &[Element] {
        match &self.value {
            ConstructedValue::Single(_) => &[],
            ConstructedValue::Array { elements, .. } | ConstructedValue::List(elements) => elements,
        }
    }

    /// Element count carried when the array index is 0
    pub fn number_of_data_elements(&self) -> Option<u64> {
        match &self.value {
            ConstructedValue::Array {
                number_of_data_elements: Some(count),
                ..
            } => match count.value() {
                PrimitiveValue::UnsignedInteger(payload) => Some(payload.value()),
                _ => None,
            },
            _ => None,
        }
    }

    /// Decode a property value bracketed by `tag_number`, choosing its grammar from
    /// `args`
    pub fn decode(
        reader: &mut ReadBuffer<'_>,
        tag_number: u8,
        args: PropertyArguments,
    ) -> Result<Self> {
        reader.push_context("ConstructedData")?;
        let start = reader.position();
        let opening_tag = OpeningTag::decode(reader, tag_number)?;

        let grammar = match lookup(args.object_type, args.property_identifier) {
            Ok(grammar) => grammar,
            Err(LookupError::Sentinel) => {
                return Err(reader.validation_error(
                    start,
                    format!(
                        "{} names a group of properties and carries no value",
                        args.property_identifier
                    ),
                ));
            }
            Err(LookupError::Unmapped) => {
                log::debug!(
                    "no grammar for {} {} (array index {:?})",
                    args.object_type,
                    args.property_identifier,
                    args.array_index
                );
                return Err(reader.unmapped_error(
                    start,
                    format!("no grammar for {} {}", args.object_type, args.property_identifier),
                ));
            }
        };
        log::trace!(
            "{} {} in tag {} uses {}",
            args.object_type,
            args.property_identifier,
            tag_number,
            grammar
        );

        let value = match grammar {
            PropertyGrammar::Single(element) => {
                ConstructedValue::Single(element.decode(reader, args)?)
            }
            PropertyGrammar::Array(element) => {
                if args.array_index == Some(0) {
                    let count = ApplicationTagValue::decode_expecting(
                        reader,
                        ApplicationTag::UnsignedInteger,
                    )?;
                    ConstructedValue::Array {
                        number_of_data_elements: Some(count),
                        elements: Vec::new(),
                    }
                } else {
                    ConstructedValue::Array {
                        number_of_data_elements: None,
                        elements: read_terminated(reader, tag_number, |r| element.decode(r, args))?,
                    }
                }
            }
            PropertyGrammar::List(element) => {
                let elements = read_terminated(reader, tag_number, |r| element.decode(r, args))?;
                ConstructedValue::List(elements)
            }
        };

        let closing_tag = ClosingTag::decode(reader, tag_number)?;
        reader.pop_context("ConstructedData")?;
        Ok(Self {
            arguments: args,
            opening_tag,
            value,
            closing_tag,
        })
    }
}

impl Encode for ConstructedData {
    fn encode(&self, writer: &mut WriteBuffer) -> Result<()> {
        writer.push_context("ConstructedData")?;
        self.opening_tag.encode(writer)?;
        self.value.encode(writer)?;
        self.closing_tag.encode(writer)?;
        writer.pop_context("ConstructedData")
    }

    fn len_in_bits(&self) -> usize {
        self.opening_tag.len_in_bits() + self.value.len_in_bits() + self.closing_tag.len_in_bits()
    }
}

/// Decode constructed data from `data`, returning it and the number of octets consumed
pub fn decode_constructed_data(
    data: &[u8],
    tag_number: u8,
    args: PropertyArguments,
) -> Result<(ConstructedData, usize)> {
    let mut reader = ReadBuffer::new(data);
    let value = ConstructedData::decode(&mut reader, tag_number, args)?;
    Ok((value, reader.position()))
}
