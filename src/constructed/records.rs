//! Record grammars of the constructed types the dispatch table refers to.
//!
//! Names follow the BACnet production names without the `BACnet` prefix. Context tag
//! numbers are those of ASHRAE 135 clause 21.

use super::record::{FieldKind, FieldSpec, RecordGrammar};
use crate::encoding::{ApplicationTag, DataType};

pub static DATE_TIME: RecordGrammar = RecordGrammar {
    name: "DateTime",
    fields: &[
        FieldSpec::required("date", FieldKind::Application(ApplicationTag::Date)),
        FieldSpec::required("time", FieldKind::Application(ApplicationTag::Time)),
    ],
};

pub static DATE_RANGE: RecordGrammar = RecordGrammar {
    name: "DateRange",
    fields: &[
        FieldSpec::required("start_date", FieldKind::Application(ApplicationTag::Date)),
        FieldSpec::required("end_date", FieldKind::Application(ApplicationTag::Date)),
    ],
};

pub static OBJECT_PROPERTY_REFERENCE: RecordGrammar = RecordGrammar {
    name: "ObjectPropertyReference",
    fields: &[
        FieldSpec::required("object_identifier", FieldKind::Context(0, DataType::ObjectIdentifier)),
        FieldSpec::required("property_identifier", FieldKind::Context(1, DataType::Enumerated)),
        FieldSpec::optional(
            "property_array_index",
            FieldKind::Context(2, DataType::UnsignedInteger),
        ),
    ],
};

pub static DEVICE_OBJECT_PROPERTY_REFERENCE: RecordGrammar = RecordGrammar {
    name: "DeviceObjectPropertyReference",
    fields: &[
        FieldSpec::required("object_identifier", FieldKind::Context(0, DataType::ObjectIdentifier)),
        FieldSpec::required("property_identifier", FieldKind::Context(1, DataType::Enumerated)),
        FieldSpec::optional(
            "property_array_index",
            FieldKind::Context(2, DataType::UnsignedInteger),
        ),
        FieldSpec::optional("device_identifier", FieldKind::Context(3, DataType::ObjectIdentifier)),
    ],
};

pub static DEVICE_OBJECT_REFERENCE: RecordGrammar = RecordGrammar {
    name: "DeviceObjectReference",
    fields: &[
        FieldSpec::optional("device_identifier", FieldKind::Context(0, DataType::ObjectIdentifier)),
        FieldSpec::required("object_identifier", FieldKind::Context(1, DataType::ObjectIdentifier)),
    ],
};

pub static SETPOINT_REFERENCE: RecordGrammar = RecordGrammar {
    name: "SetpointReference",
    fields: &[FieldSpec::optional(
        "setpoint_reference",
        FieldKind::Constructed(0, &OBJECT_PROPERTY_REFERENCE),
    )],
};

static HOST_ADDRESS_ALTERNATIVES: [FieldSpec; 3] = [
    FieldSpec::required("none", FieldKind::Context(0, DataType::Null)),
    FieldSpec::required("ip_address", FieldKind::Context(1, DataType::OctetString)),
    FieldSpec::required("name", FieldKind::Context(2, DataType::CharacterString)),
];

pub static HOST_ADDRESS: RecordGrammar = RecordGrammar {
    name: "HostAddress",
    fields: &[FieldSpec::required("address", FieldKind::Choice(&HOST_ADDRESS_ALTERNATIVES))],
};

pub static HOST_N_PORT: RecordGrammar = RecordGrammar {
    name: "HostNPort",
    fields: &[
        FieldSpec::required("host", FieldKind::Constructed(0, &HOST_ADDRESS)),
        FieldSpec::required("port", FieldKind::Context(1, DataType::UnsignedInteger)),
    ],
};

/// Broadcast distribution table entry
pub static BDT_ENTRY: RecordGrammar = RecordGrammar {
    name: "BdtEntry",
    fields: &[
        FieldSpec::required("bbmd_address", FieldKind::Constructed(0, &HOST_N_PORT)),
        FieldSpec::optional("broadcast_mask", FieldKind::Context(1, DataType::OctetString)),
    ],
};

pub static ADDRESS: RecordGrammar = RecordGrammar {
    name: "Address",
    fields: &[
        FieldSpec::required(
            "network_number",
            FieldKind::Application(ApplicationTag::UnsignedInteger),
        ),
        FieldSpec::required("mac_address", FieldKind::Application(ApplicationTag::OctetString)),
    ],
};

pub static ADDRESS_BINDING: RecordGrammar = RecordGrammar {
    name: "AddressBinding",
    fields: &[
        FieldSpec::required(
            "device_identifier",
            FieldKind::Application(ApplicationTag::ObjectIdentifier),
        ),
        FieldSpec::required("device_address", FieldKind::Sequence(&ADDRESS)),
    ],
};

static TIME_STAMP_ALTERNATIVES: [FieldSpec; 3] = [
    FieldSpec::required("time", FieldKind::Context(0, DataType::Time)),
    FieldSpec::required("sequence_number", FieldKind::Context(1, DataType::UnsignedInteger)),
    FieldSpec::required("date_time", FieldKind::Constructed(2, &DATE_TIME)),
];

pub static TIME_STAMP: RecordGrammar = RecordGrammar {
    name: "TimeStamp",
    fields: &[FieldSpec::required("value", FieldKind::Choice(&TIME_STAMP_ALTERNATIVES))],
};

/// Value of one slot of a commandable object's priority array. Only the application
/// kinds and the bracketed date-time are recognised; an abstract-syntax value in
/// tag 0 has no alternative.
static PRIORITY_VALUE_ALTERNATIVES: [FieldSpec; 14] = [
    FieldSpec::required("null", FieldKind::Application(ApplicationTag::Null)),
    FieldSpec::required("real", FieldKind::Application(ApplicationTag::Real)),
    FieldSpec::required("enumerated", FieldKind::Application(ApplicationTag::Enumerated)),
    FieldSpec::required("unsigned", FieldKind::Application(ApplicationTag::UnsignedInteger)),
    FieldSpec::required("boolean", FieldKind::Application(ApplicationTag::Boolean)),
    FieldSpec::required("integer", FieldKind::Application(ApplicationTag::SignedInteger)),
    FieldSpec::required("double", FieldKind::Application(ApplicationTag::Double)),
    FieldSpec::required("time", FieldKind::Application(ApplicationTag::Time)),
    FieldSpec::required(
        "character_string",
        FieldKind::Application(ApplicationTag::CharacterString),
    ),
    FieldSpec::required("octet_string", FieldKind::Application(ApplicationTag::OctetString)),
    FieldSpec::required("bit_string", FieldKind::Application(ApplicationTag::BitString)),
    FieldSpec::required("date", FieldKind::Application(ApplicationTag::Date)),
    FieldSpec::required(
        "object_identifier",
        FieldKind::Application(ApplicationTag::ObjectIdentifier),
    ),
    FieldSpec::required("date_time", FieldKind::Constructed(1, &DATE_TIME)),
];

pub static PRIORITY_VALUE: RecordGrammar = RecordGrammar {
    name: "PriorityValue",
    fields: &[FieldSpec::required("value", FieldKind::Choice(&PRIORITY_VALUE_ALTERNATIVES))],
};

static OPTIONAL_BINARY_PV_ALTERNATIVES: [FieldSpec; 2] = [
    FieldSpec::required("null", FieldKind::Application(ApplicationTag::Null)),
    FieldSpec::required("binary_pv", FieldKind::Application(ApplicationTag::Enumerated)),
];

pub static OPTIONAL_BINARY_PV: RecordGrammar = RecordGrammar {
    name: "OptionalBinaryPV",
    fields: &[FieldSpec::required("value", FieldKind::Choice(&OPTIONAL_BINARY_PV_ALTERNATIVES))],
};

pub static LIGHTING_COMMAND: RecordGrammar = RecordGrammar {
    name: "LightingCommand",
    fields: &[
        FieldSpec::required("operation", FieldKind::Context(0, DataType::Enumerated)),
        FieldSpec::optional("target_level", FieldKind::Context(1, DataType::Real)),
        FieldSpec::optional("ramp_rate", FieldKind::Context(2, DataType::Real)),
        FieldSpec::optional("step_increment", FieldKind::Context(3, DataType::Real)),
        FieldSpec::optional("fade_time", FieldKind::Context(4, DataType::UnsignedInteger)),
        FieldSpec::optional("priority", FieldKind::Context(5, DataType::UnsignedInteger)),
    ],
};

// Tag 1 (constructed value) has no alternative.
static TIMER_STATE_CHANGE_VALUE_ALTERNATIVES: [FieldSpec; 16] = [
    FieldSpec::required("null", FieldKind::Application(ApplicationTag::Null)),
    FieldSpec::required("boolean", FieldKind::Application(ApplicationTag::Boolean)),
    FieldSpec::required("unsigned", FieldKind::Application(ApplicationTag::UnsignedInteger)),
    FieldSpec::required("integer", FieldKind::Application(ApplicationTag::SignedInteger)),
    FieldSpec::required("real", FieldKind::Application(ApplicationTag::Real)),
    FieldSpec::required("double", FieldKind::Application(ApplicationTag::Double)),
    FieldSpec::required("octet_string", FieldKind::Application(ApplicationTag::OctetString)),
    FieldSpec::required(
        "character_string",
        FieldKind::Application(ApplicationTag::CharacterString),
    ),
    FieldSpec::required("bit_string", FieldKind::Application(ApplicationTag::BitString)),
    FieldSpec::required("enumerated", FieldKind::Application(ApplicationTag::Enumerated)),
    FieldSpec::required("date", FieldKind::Application(ApplicationTag::Date)),
    FieldSpec::required("time", FieldKind::Application(ApplicationTag::Time)),
    FieldSpec::required(
        "object_identifier",
        FieldKind::Application(ApplicationTag::ObjectIdentifier),
    ),
    FieldSpec::required("no_value", FieldKind::Context(0, DataType::Null)),
    FieldSpec::required("date_time", FieldKind::Constructed(2, &DATE_TIME)),
    FieldSpec::required("lighting_command", FieldKind::Constructed(3, &LIGHTING_COMMAND)),
];

pub static TIMER_STATE_CHANGE_VALUE: RecordGrammar = RecordGrammar {
    name: "TimerStateChangeValue",
    fields: &[FieldSpec::required(
        "value",
        FieldKind::Choice(&TIMER_STATE_CHANGE_VALUE_ALTERNATIVES),
    )],
};

pub static NETWORK_SECURITY_POLICY: RecordGrammar = RecordGrammar {
    name: "NetworkSecurityPolicy",
    fields: &[
        FieldSpec::required("port_id", FieldKind::Context(0, DataType::UnsignedInteger)),
        FieldSpec::required("security_level", FieldKind::Context(1, DataType::Enumerated)),
    ],
};

/// One write of a command object action. The property value is decoded with the
/// object type, property and array index named by the preceding fields.
pub static ACTION_COMMAND: RecordGrammar = RecordGrammar {
    name: "ActionCommand",
    fields: &[
        FieldSpec::optional("device_identifier", FieldKind::Context(0, DataType::ObjectIdentifier)),
        FieldSpec::required("object_identifier", FieldKind::ObjectTypeArgument(1)),
        FieldSpec::required("property_identifier", FieldKind::PropertyIdentifierArgument(2)),
        FieldSpec::optional("property_array_index", FieldKind::ArrayIndexArgument(3)),
        FieldSpec::required("property_value", FieldKind::PropertyValue(4)),
        FieldSpec::optional("priority", FieldKind::Context(5, DataType::UnsignedInteger)),
        FieldSpec::optional("post_delay", FieldKind::Context(6, DataType::UnsignedInteger)),
        FieldSpec::required("quit_on_failure", FieldKind::Context(7, DataType::Boolean)),
        FieldSpec::required("write_successful", FieldKind::Context(8, DataType::Boolean)),
    ],
};

pub static ACTION_LIST: RecordGrammar = RecordGrammar {
    name: "ActionList",
    fields: &[FieldSpec::required("action", FieldKind::ConstructedList(0, &ACTION_COMMAND))],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructed::record::FieldValue;
    use crate::constructed::PropertyArguments;
    use crate::encoding::combinators::read_terminated;
    use crate::encoding::{Encode, ErrorKind, OpeningTag, PrimitiveValue, ReadBuffer};

    #[test]
    fn test_bdt_entry_with_mask() {
        let data = [
            0x0E, 0x0E, 0x1C, 0xC0, 0xA8, 0x01, 0x01, 0x0F, 0x1A, 0xBA, 0xC0, 0x0F, 0x1C, 0xFF,
            0xFF, 0xFF, 0xFF,
        ];
        let mut reader = ReadBuffer::new(&data);
        let entry = BDT_ENTRY.decode(&mut reader, PropertyArguments::default()).unwrap();
        assert_eq!(reader.position(), data.len());

        let host_n_port = entry.get("bbmd_address").and_then(FieldValue::as_record).unwrap();
        let host = host_n_port.get("host").and_then(FieldValue::as_record).unwrap();
        match host.get("address") {
            Some(FieldValue::Choice { alternative, value }) => {
                assert_eq!(*alternative, "ip_address");
                assert!(matches!(
                    value.primitive(),
                    Some(PrimitiveValue::OctetString(octets)) if octets == &[0xC0, 0xA8, 0x01, 0x01]
                ));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            host_n_port.get("port").and_then(FieldValue::primitive),
            Some(PrimitiveValue::UnsignedInteger(port)) if port.value() == 0xBAC0
        ));
        assert_eq!(entry.to_bytes().unwrap(), data);
    }

    #[test]
    fn test_address_binding_sequence() {
        let data = [
            0xC4, 0x02, 0x00, 0x00, 0x07, // device 7
            0x21, 0x00, // network 0
            0x65, 0x06, 0xC0, 0xA8, 0x01, 0x0A, 0xBA, 0xC0, // B/IP address
        ];
        let mut reader = ReadBuffer::new(&data);
        let binding = ADDRESS_BINDING.decode(&mut reader, PropertyArguments::default()).unwrap();
        assert_eq!(reader.position(), data.len());
        let address = binding.get("device_address").and_then(FieldValue::as_record).unwrap();
        assert_eq!(address.name(), "Address");
        assert!(matches!(
            address.get("mac_address").and_then(FieldValue::primitive),
            Some(PrimitiveValue::OctetString(mac)) if mac.len() == 6
        ));
        assert_eq!(binding.to_bytes().unwrap(), data);
    }

    #[test]
    fn test_setpoint_reference_empty() {
        let mut reader = ReadBuffer::new(&[]);
        let record = SETPOINT_REFERENCE.decode(&mut reader, PropertyArguments::default()).unwrap();
        assert!(record.get("setpoint_reference").is_none());
        assert!(record.to_bytes().unwrap().is_empty());
    }

    #[test]
    fn test_empty_record_in_terminated_list() {
        let data = [0x3E, 0x21, 0x01, 0x3F];
        let mut reader = ReadBuffer::new(&data);
        OpeningTag::decode(&mut reader, 3).unwrap();
        let err = read_terminated(&mut reader, 3, |r| {
            SETPOINT_REFERENCE.decode(r, PropertyArguments::default())
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert_eq!(err.offset(), Some(1));
    }

    #[test]
    fn test_missing_required_field() {
        let mut reader = ReadBuffer::new(&[0x0C, 0x00, 0x00, 0x00, 0x05]);
        let err = OBJECT_PROPERTY_REFERENCE
            .decode(&mut reader, PropertyArguments::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert_eq!(err.path(), "ObjectPropertyReference/property_identifier/ContextTag");
    }
}
