//! Declarative record grammars.
//!
//! A record is an ordered sequence of fields. Each [`FieldSpec`] names the field,
//! says how it is tagged on the wire and whether it may be absent. Optional fields
//! and choices are resolved by peeking at the next header, never by consuming it.

use super::{ConstructedData, PropertyArguments};
use crate::encoding::combinators::{read_optional, read_terminated};
use crate::encoding::{
    is_application_tag, is_context_tag, is_opening_tag, peek_header, ApplicationTag,
    ApplicationTagValue, ClosingTag, ContextTagValue, DataType, Encode, OpeningTag, PrimitiveValue,
    ReadBuffer, Result, WriteBuffer,
};
use crate::object::PropertyIdentifier;

/// Field sequence of a constructed type such as BACnetDeviceObjectReference
#[derive(Debug, PartialEq, Eq)]
pub struct RecordGrammar {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

#[derive(Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub optional: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            optional: false,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            optional: true,
        }
    }
}

/// How a field is tagged on the wire
#[derive(Debug, PartialEq, Eq)]
pub enum FieldKind {
    Application(ApplicationTag),
    Context(u8, DataType),
    /// Fields of another record, inline without brackets
    Sequence(&'static RecordGrammar),
    /// A record inside opening/closing tag `n`
    Constructed(u8, &'static RecordGrammar),
    /// Records inside opening/closing tag `n`, up to the closing tag
    ConstructedList(u8, &'static RecordGrammar),
    /// The first alternative whose tag is next
    Choice(&'static [FieldSpec]),
    /// Context object identifier that also sets the object type for later
    /// [`FieldKind::PropertyValue`] fields
    ObjectTypeArgument(u8),
    /// Context enumerated property identifier that sets the property for later
    /// [`FieldKind::PropertyValue`] fields
    PropertyIdentifierArgument(u8),
    /// Context unsigned array index for later [`FieldKind::PropertyValue`] fields
    ArrayIndexArgument(u8),
    /// Constructed data in tag `n`, dispatched on the arguments collected so far
    PropertyValue(u8),
}

impl FieldKind {
    /// Whether this field starts at the current position
    pub fn is_present(&self, reader: &mut ReadBuffer<'_>) -> bool {
        match self {
            FieldKind::Application(tag) => is_application_tag(reader, *tag),
            FieldKind::Context(number, _)
            | FieldKind::ObjectTypeArgument(number)
            | FieldKind::PropertyIdentifierArgument(number)
            | FieldKind::ArrayIndexArgument(number) => is_context_tag(reader, *number),
            FieldKind::Sequence(grammar) => grammar
                .fields
                .first()
                .is_some_and(|first| first.kind.is_present(reader)),
            FieldKind::Constructed(number, _)
            | FieldKind::ConstructedList(number, _)
            | FieldKind::PropertyValue(number) => is_opening_tag(reader, *number),
            FieldKind::Choice(alternatives) => alternatives
                .iter()
                .any(|alternative| alternative.kind.is_present(reader)),
        }
    }

    fn decode(
        &self,
        reader: &mut ReadBuffer<'_>,
        args: &mut PropertyArguments,
    ) -> Result<FieldValue> {
        let value = match self {
            FieldKind::Application(tag) => {
                FieldValue::Application(ApplicationTagValue::decode_expecting(reader, *tag)?)
            }
            FieldKind::Context(number, data_type) => {
                FieldValue::Context(ContextTagValue::decode(reader, *number, *data_type)?)
            }
            FieldKind::Sequence(grammar) => FieldValue::Sequence(grammar.decode(reader, *args)?),
            FieldKind::Constructed(number, grammar) => {
                let opening = OpeningTag::decode(reader, *number)?;
                let record = grammar.decode(reader, *args)?;
                let closing = ClosingTag::decode(reader, *number)?;
                FieldValue::Constructed {
                    opening,
                    record,
                    closing,
                }
            }
            FieldKind::ConstructedList(number, grammar) => {
                let opening = OpeningTag::decode(reader, *number)?;
                let inner = *args;
                let records = read_terminated(reader, *number, |r| grammar.decode(r, inner))?;
                let closing = ClosingTag::decode(reader, *number)?;
                FieldValue::ConstructedList {
                    opening,
                    records,
                    closing,
                }
            }
            FieldKind::Choice(alternatives) => {
                let start = reader.position();
                let selected = alternatives
                    .iter()
                    .find(|alternative| alternative.kind.is_present(reader));
                let Some(selected) = selected else {
                    let found = peek_header(reader)
                        .map(|header| header.to_string())
                        .unwrap_or_else(|err| err.reason().to_string());
                    let reason = format!("no alternative matches {}", found);
                    return Err(reader.unmapped_error(start, reason));
                };
                reader.push_context(selected.name)?;
                let value = selected.kind.decode(reader, args)?;
                reader.pop_context(selected.name)?;
                FieldValue::Choice {
                    alternative: selected.name,
                    value: Box::new(value),
                }
            }
            FieldKind::ObjectTypeArgument(number) => {
                let tag = ContextTagValue::decode(reader, *number, DataType::ObjectIdentifier)?;
                if let Some(PrimitiveValue::ObjectIdentifier(identifier)) = tag.primitive() {
                    args.object_type = identifier.object_type;
                }
                FieldValue::Context(tag)
            }
            FieldKind::PropertyIdentifierArgument(number) => {
                let tag = ContextTagValue::decode(reader, *number, DataType::Enumerated)?;
                if let Some(PrimitiveValue::Enumerated(payload)) = tag.primitive() {
                    args.property_identifier = PropertyIdentifier::from(payload.value());
                }
                FieldValue::Context(tag)
            }
            FieldKind::ArrayIndexArgument(number) => {
                let start = reader.position();
                let tag = ContextTagValue::decode(reader, *number, DataType::UnsignedInteger)?;
                if let Some(PrimitiveValue::UnsignedInteger(payload)) = tag.primitive() {
                    let index = u32::try_from(payload.value()).map_err(|_| {
                        let reason = format!("array index {} exceeds 32 bits", payload.value());
                        reader.validation_error(start, reason)
                    })?;
                    args.array_index = Some(index);
                }
                FieldValue::Context(tag)
            }
            FieldKind::PropertyValue(number) => {
                let nested = ConstructedData::decode(reader, *number, *args)?;
                FieldValue::PropertyValue(Box::new(nested))
            }
        };
        Ok(value)
    }
}

impl RecordGrammar {
    pub fn decode(&self, reader: &mut ReadBuffer<'_>, args: PropertyArguments) -> Result<Record> {
        reader.push_context(self.name)?;
        let mut args = args;
        let mut fields = Vec::with_capacity(self.fields.len());
        for spec in self.fields {
            let present = !spec.optional || spec.kind.is_present(reader);
            let value = read_optional(reader, present, |r| {
                r.push_context(spec.name)?;
                let value = spec.kind.decode(r, &mut args)?;
                r.pop_context(spec.name)?;
                Ok(value)
            })?;
            if value.is_none() && matches!(spec.kind, FieldKind::ArrayIndexArgument(_)) {
                args.array_index = None;
            }
            fields.push(Field { name: spec.name, value });
        }
        reader.pop_context(self.name)?;
        Ok(Record {
            name: self.name,
            fields,
        })
    }
}

/// A decoded record: every field of its grammar, in order, absent ones as `None`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Record {
    name: &'static str,
    fields: Vec<Field>,
}

impl Record {
    pub fn new(name: &'static str, fields: Vec<Field>) -> Self {
        Self { name, fields }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Value of the named field, if present
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .and_then(|field| field.value.as_ref())
    }
}

impl Encode for Record {
    fn encode(&self, writer: &mut WriteBuffer) -> Result<()> {
        writer.push_context(self.name)?;
        for field in &self.fields {
            field.value.encode(writer)?;
        }
        writer.pop_context(self.name)
    }

    fn len_in_bits(&self) -> usize {
        self.fields.iter().map(|field| field.value.len_in_bits()).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Field {
    pub name: &'static str,
    pub value: Option<FieldValue>,
}

impl Field {
    pub fn new(name: &'static str, value: Option<FieldValue>) -> Self {
        Self { name, value }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FieldValue {
    Application(ApplicationTagValue),
    Context(ContextTagValue),
    Sequence(Record),
    Constructed {
        opening: OpeningTag,
        record: Record,
        closing: ClosingTag,
    },
    ConstructedList {
        opening: OpeningTag,
        records: Vec<Record>,
        closing: ClosingTag,
    },
    Choice {
        alternative: &'static str,
        value: Box<FieldValue>,
    },
    PropertyValue(Box<ConstructedData>),
}

impl FieldValue {
    /// Bracket a record in tag `tag_number`
    pub fn constructed(tag_number: u8, record: Record) -> Self {
        FieldValue::Constructed {
            opening: OpeningTag::new(tag_number),
            record,
            closing: ClosingTag::new(tag_number),
        }
    }

    pub fn primitive(&self) -> Option<&PrimitiveValue> {
        match self {
            FieldValue::Application(tag) => Some(tag.value()),
            FieldValue::Context(tag) => tag.primitive(),
            FieldValue::Choice { value, .. } => value.primitive(),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            FieldValue::Sequence(record) | FieldValue::Constructed { record, .. } => Some(record),
            FieldValue::Choice { value, .. } => value.as_record(),
            _ => None,
        }
    }
}

impl Encode for FieldValue {
    fn encode(&self, writer: &mut WriteBuffer) -> Result<()> {
        match self {
            FieldValue::Application(tag) => tag.encode(writer),
            FieldValue::Context(tag) => tag.encode(writer),
            FieldValue::Sequence(record) => record.encode(writer),
            FieldValue::Constructed {
                opening,
                record,
                closing,
            } => {
                opening.encode(writer)?;
                record.encode(writer)?;
                closing.encode(writer)
            }
            FieldValue::ConstructedList {
                opening,
                records,
                closing,
            } => {
                opening.encode(writer)?;
                records.encode(writer)?;
                closing.encode(writer)
            }
            FieldValue::Choice { value, .. } => value.encode(writer),
            FieldValue::PropertyValue(data) => data.encode(writer),
        }
    }

    fn len_in_bits(&self) -> usize {
        match self {
            FieldValue::Application(tag) => tag.len_in_bits(),
            FieldValue::Context(tag) => tag.len_in_bits(),
            FieldValue::Sequence(record) => record.len_in_bits(),
            FieldValue::Constructed {
                opening,
                record,
                closing,
            } => opening.len_in_bits() + record.len_in_bits() + closing.len_in_bits(),
            FieldValue::ConstructedList {
                opening,
                records,
                closing,
            } => opening.len_in_bits() + records.len_in_bits() + closing.len_in_bits(),
            FieldValue::Choice { value, .. } => value.len_in_bits(),
            FieldValue::PropertyValue(data) => data.len_in_bits(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructed::records::{
        DATE_TIME, DEVICE_OBJECT_PROPERTY_REFERENCE, DEVICE_OBJECT_REFERENCE, HOST_N_PORT,
        TIME_STAMP,
    };
    use crate::encoding::ErrorKind;

    fn decode(grammar: &'static RecordGrammar, data: &[u8]) -> Result<(Record, usize)> {
        let mut reader = ReadBuffer::new(data);
        let record = grammar.decode(&mut reader, PropertyArguments::default())?;
        Ok((record, reader.position()))
    }

    #[test]
    fn test_optional_field_absent() {
        let data = [0x1C, 0x00, 0x80, 0x00, 0x01];
        let (record, consumed) = decode(&DEVICE_OBJECT_REFERENCE, &data).unwrap();
        assert_eq!(consumed, 5);
        assert!(record.get("device_identifier").is_none());
        assert!(record.get("object_identifier").is_some());
        assert_eq!(record.fields().len(), 2);
        assert_eq!(record.to_bytes().unwrap(), data);
    }

    #[test]
    fn test_optional_fields_present() {
        let data = [
            0x0C, 0x00, 0x00, 0x00, 0x05, // object identifier
            0x19, 0x55, // property identifier
            0x29, 0x03, // array index
            0x3C, 0x02, 0x00, 0x00, 0x01, // device identifier
        ];
        let (record, consumed) = decode(&DEVICE_OBJECT_PROPERTY_REFERENCE, &data).unwrap();
        assert_eq!(consumed, data.len());
        assert!(matches!(
            record.get("property_array_index").and_then(FieldValue::primitive),
            Some(PrimitiveValue::UnsignedInteger(index)) if index.value() == 3
        ));
        assert_eq!(record.len_in_bytes(), data.len());
        assert_eq!(record.to_bytes().unwrap(), data);
    }

    #[test]
    fn test_choice_alternatives() {
        let sequence_number = [0x19, 0x05];
        let (record, _) = decode(&TIME_STAMP, &sequence_number).unwrap();
        match record.get("value") {
            Some(FieldValue::Choice { alternative, .. }) => {
                assert_eq!(*alternative, "sequence_number")
            }
            other => panic!("unexpected {:?}", other),
        }

        let date_time = [
            0x2E, 0xA4, 0x7C, 0x03, 0x0F, 0x05, 0xB4, 0x0E, 0x1E, 0x2D, 0x32, 0x2F,
        ];
        let (record, consumed) = decode(&TIME_STAMP, &date_time).unwrap();
        assert_eq!(consumed, date_time.len());
        let inner = record.get("value").and_then(FieldValue::as_record).unwrap();
        assert_eq!(inner.name(), DATE_TIME.name);
        assert_eq!(record.to_bytes().unwrap(), date_time);
    }

    #[test]
    fn test_unmatched_choice() {
        let err = decode(&TIME_STAMP, &[0x39, 0x05]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnmappedType);
        assert_eq!(err.path(), "TimeStamp/value");
    }

    #[test]
    fn test_error_path_names_nested_field() {
        let data = [0x0E, 0x1C, 0xC0, 0xA8, 0x01, 0x01, 0x0F, 0x1A, 0xBA];
        let err = decode(&HOST_N_PORT, &data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert_eq!(err.path(), "HostNPort/port/ContextTag");
        assert_eq!(err.offset(), Some(8));
    }

    #[test]
    fn test_records_built_by_hand() {
        let record = Record::new(
            "DateTime",
            vec![
                Field::new(
                    "date",
                    Some(FieldValue::Application(ApplicationTagValue::date(
                        crate::encoding::DatePayload::from_raw(124, 3, 15, 5),
                    ))),
                ),
                Field::new(
                    "time",
                    Some(FieldValue::Application(ApplicationTagValue::time(
                        crate::encoding::TimePayload::from_raw(14, 30, 45, 50),
                    ))),
                ),
            ],
        );
        let bytes = FieldValue::constructed(2, record.clone()).to_bytes().unwrap();
        assert_eq!(bytes.len(), 12);
        let mut reader = ReadBuffer::new(&bytes[1..11]);
        assert_eq!(DATE_TIME.decode(&mut reader, PropertyArguments::default()).unwrap(), record);
    }
}
