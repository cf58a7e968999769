//! Property and element grammars.

use core::fmt;

use super::record::{Record, RecordGrammar};
use super::PropertyArguments;
use crate::encoding::{
    ApplicationTag, ApplicationTagValue, Encode, PrimitiveValue, ReadBuffer, Result, WriteBuffer,
};
use crate::object::{
    BinaryPV, DeviceStatus, EngineeringUnits, EventState, ObjectType, Polarity, PropertyIdentifier,
    Reliability, Segmentation,
};

/// Shape of a property value inside its constructed-data brackets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyGrammar {
    /// Exactly one element
    Single(ElementGrammar),
    /// An array: the element count alone for index 0, otherwise elements up to the
    /// closing tag
    Array(ElementGrammar),
    /// A list of elements up to the closing tag
    List(ElementGrammar),
}

/// Grammar of one element of a property value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementGrammar {
    Application(ApplicationTag),
    /// An application enumerated value of a known enumeration
    Enumerated(EnumerationKind),
    /// Any application tag
    AnyApplication,
    Record(&'static RecordGrammar),
}

impl ElementGrammar {
    pub fn decode(&self, reader: &mut ReadBuffer<'_>, args: PropertyArguments) -> Result<Element> {
        match self {
            ElementGrammar::Application(tag) => {
                ApplicationTagValue::decode_expecting(reader, *tag).map(Element::Application)
            }
            ElementGrammar::Enumerated(kind) => {
                let tag =
                    ApplicationTagValue::decode_expecting(reader, ApplicationTag::Enumerated)?;
                Ok(Element::Enumerated(TaggedEnumeration { kind: *kind, tag }))
            }
            ElementGrammar::AnyApplication => {
                ApplicationTagValue::decode(reader).map(Element::Application)
            }
            ElementGrammar::Record(grammar) => grammar.decode(reader, args).map(Element::Record),
        }
    }
}

impl fmt::Display for ElementGrammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementGrammar::Application(tag) => write!(f, "{:?}", tag),
            ElementGrammar::Enumerated(kind) => write!(f, "Enumerated({:?})", kind),
            ElementGrammar::AnyApplication => f.write_str("any application tag"),
            ElementGrammar::Record(grammar) => f.write_str(grammar.name),
        }
    }
}

impl fmt::Display for PropertyGrammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyGrammar::Single(element) => write!(f, "{}", element),
            PropertyGrammar::Array(element) => write!(f, "array of {}", element),
            PropertyGrammar::List(element) => write!(f, "list of {}", element),
        }
    }
}

/// A decoded element
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Element {
    Application(ApplicationTagValue),
    Enumerated(TaggedEnumeration),
    Record(Record),
}

impl Element {
    /// Primitive value of an application or enumerated element
    pub fn primitive(&self) -> Option<&PrimitiveValue> {
        match self {
            Element::Application(tag) => Some(tag.value()),
            Element::Enumerated(enumeration) => Some(enumeration.tag.value()),
            Element::Record(_) => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Element::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Symbolic name of an enumerated element
    pub fn enumeration_name(&self) -> Option<String> {
        match self {
            Element::Enumerated(enumeration) => Some(enumeration.name()),
            _ => None,
        }
    }
}

impl Encode for Element {
    fn encode(&self, writer: &mut WriteBuffer) -> Result<()> {
        match self {
            Element::Application(tag) => tag.encode(writer),
            Element::Enumerated(enumeration) => enumeration.tag.encode(writer),
            Element::Record(record) => record.encode(writer),
        }
    }

    fn len_in_bits(&self) -> usize {
        match self {
            Element::Application(tag) => tag.len_in_bits(),
            Element::Enumerated(enumeration) => enumeration.tag.len_in_bits(),
            Element::Record(record) => record.len_in_bits(),
        }
    }
}

/// Enumerations the dispatch table can name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum EnumerationKind {
    BinaryPV,
    Polarity,
    EventState,
    Reliability,
    EngineeringUnits,
    DeviceStatus,
    Segmentation,
    ObjectType,
    PropertyIdentifier,
    /// An enumeration without a typed model here
    Unnamed,
}

impl EnumerationKind {
    /// Symbolic name of `value` in this enumeration
    pub fn name(self, value: u32) -> String {
        match self {
            EnumerationKind::BinaryPV => BinaryPV::from(value).to_string(),
            EnumerationKind::Polarity => Polarity::from(value).to_string(),
            EnumerationKind::EventState => EventState::from(value).to_string(),
            EnumerationKind::Reliability => Reliability::from(value).to_string(),
            EnumerationKind::EngineeringUnits => EngineeringUnits::from(value).to_string(),
            EnumerationKind::DeviceStatus => DeviceStatus::from(value).to_string(),
            EnumerationKind::Segmentation => Segmentation::from(value).to_string(),
            EnumerationKind::ObjectType => match u16::try_from(value) {
                Ok(raw) => ObjectType::from(raw).to_string(),
                Err(_) => value.to_string(),
            },
            EnumerationKind::PropertyIdentifier => PropertyIdentifier::from(value).to_string(),
            EnumerationKind::Unnamed => value.to_string(),
        }
    }
}

/// An application enumerated tag and the enumeration its grammar assigns to it
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TaggedEnumeration {
    kind: EnumerationKind,
    tag: ApplicationTagValue,
}

impl TaggedEnumeration {
    pub fn new(kind: EnumerationKind, value: u32) -> Self {
        Self {
            kind,
            tag: ApplicationTagValue::enumerated(value),
        }
    }

    pub fn kind(&self) -> EnumerationKind {
        self.kind
    }

    pub fn tag(&self) -> &ApplicationTagValue {
        &self.tag
    }

    pub fn value(&self) -> u32 {
        match self.tag.value() {
            PrimitiveValue::Enumerated(payload) => payload.value(),
            _ => 0,
        }
    }

    pub fn name(&self) -> String {
        self.kind.name(self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::ErrorKind;

    fn args() -> PropertyArguments {
        PropertyArguments::new(ObjectType::BinaryValue, PropertyIdentifier::PresentValue, None)
    }

    #[test]
    fn test_enumerated_element_names() {
        let mut reader = ReadBuffer::new(&[0x91, 0x01]);
        let element = ElementGrammar::Enumerated(EnumerationKind::BinaryPV)
            .decode(&mut reader, args())
            .unwrap();
        match &element {
            Element::Enumerated(enumeration) => {
                assert_eq!(enumeration.value(), 1);
                assert_eq!(enumeration.name(), "Active");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(element.to_bytes().unwrap(), vec![0x91, 0x01]);
        let expected = TaggedEnumeration::new(EnumerationKind::BinaryPV, 1);
        assert_eq!(element, Element::Enumerated(expected));
    }

    #[test]
    fn test_grammar_display() {
        let grammar =
            PropertyGrammar::Array(ElementGrammar::Application(ApplicationTag::CharacterString));
        assert_eq!(grammar.to_string(), "array of CharacterString");
        let grammar =
            PropertyGrammar::Single(ElementGrammar::Enumerated(EnumerationKind::BinaryPV));
        assert_eq!(grammar.to_string(), "Enumerated(BinaryPV)");
    }

    #[test]
    fn test_enumeration_kind_names() {
        assert_eq!(EnumerationKind::ObjectType.name(8), "Device");
        assert_eq!(EnumerationKind::ObjectType.name(70_000), "70000");
        assert_eq!(EnumerationKind::EngineeringUnits.name(300), "Proprietary(300)");
        assert_eq!(EnumerationKind::Unnamed.name(4), "4");
    }

    #[test]
    fn test_element_kind_enforced() {
        let mut reader = ReadBuffer::new(&[0x21, 0x01]);
        let err = ElementGrammar::Enumerated(EnumerationKind::EventState)
            .decode(&mut reader, args())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let mut reader = ReadBuffer::new(&[0x21, 0x01]);
        let element = ElementGrammar::AnyApplication.decode(&mut reader, args()).unwrap();
        assert!(matches!(element.primitive(), Some(PrimitiveValue::UnsignedInteger(_))));
    }
}
