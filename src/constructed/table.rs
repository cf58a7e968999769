//! Property dispatch table.
//!
//! Maps an (object type, property identifier) pair to the grammar of the property's
//! value. Entries keyed on a specific object type take precedence over entries that
//! apply to every object type.

use super::grammar::{ElementGrammar, EnumerationKind, PropertyGrammar};
use super::record::RecordGrammar;
use super::records::{
    ACTION_LIST, ADDRESS_BINDING, BDT_ENTRY, DATE_RANGE, DATE_TIME,
    DEVICE_OBJECT_PROPERTY_REFERENCE, DEVICE_OBJECT_REFERENCE, NETWORK_SECURITY_POLICY,
    OBJECT_PROPERTY_REFERENCE, OPTIONAL_BINARY_PV, PRIORITY_VALUE, SETPOINT_REFERENCE,
    TIMER_STATE_CHANGE_VALUE, TIME_STAMP,
};
use crate::encoding::ApplicationTag;
use crate::object::{ObjectType, PropertyIdentifier};

/// One row of the dispatch table. `object_type: None` matches every object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchEntry {
    pub object_type: Option<ObjectType>,
    pub property: PropertyIdentifier,
    pub grammar: PropertyGrammar,
}

/// Why a dispatch key has no grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    /// `All`, `Required` and `Optional` name groups of properties, never a value
    Sentinel,
    Unmapped,
}

const fn entry(
    object_type: ObjectType,
    property: PropertyIdentifier,
    grammar: PropertyGrammar,
) -> DispatchEntry {
    DispatchEntry {
        object_type: Some(object_type),
        property,
        grammar,
    }
}

const fn any(property: PropertyIdentifier, grammar: PropertyGrammar) -> DispatchEntry {
    DispatchEntry {
        object_type: None,
        property,
        grammar,
    }
}

const fn app(tag: ApplicationTag) -> PropertyGrammar {
    PropertyGrammar::Single(ElementGrammar::Application(tag))
}

const fn enumerated(kind: EnumerationKind) -> PropertyGrammar {
    PropertyGrammar::Single(ElementGrammar::Enumerated(kind))
}

const fn record(grammar: &'static RecordGrammar) -> PropertyGrammar {
    PropertyGrammar::Single(ElementGrammar::Record(grammar))
}

const fn array_of(tag: ApplicationTag) -> PropertyGrammar {
    PropertyGrammar::Array(ElementGrammar::Application(tag))
}

const fn array_of_records(grammar: &'static RecordGrammar) -> PropertyGrammar {
    PropertyGrammar::Array(ElementGrammar::Record(grammar))
}

const fn list_of_records(grammar: &'static RecordGrammar) -> PropertyGrammar {
    PropertyGrammar::List(ElementGrammar::Record(grammar))
}

const REAL: PropertyGrammar = app(ApplicationTag::Real);
const UNSIGNED: PropertyGrammar = app(ApplicationTag::UnsignedInteger);
const BOOLEAN: PropertyGrammar = app(ApplicationTag::Boolean);
const CHARACTER_STRING: PropertyGrammar = app(ApplicationTag::CharacterString);
const BIT_STRING: PropertyGrammar = app(ApplicationTag::BitString);
const UNNAMED: PropertyGrammar = enumerated(EnumerationKind::Unnamed);

pub static DISPATCH_TABLE: &[DispatchEntry] = &[
    // Object specific
    entry(ObjectType::AnalogInput, PropertyIdentifier::FaultHighLimit, REAL),
    entry(ObjectType::AnalogInput, PropertyIdentifier::FaultLowLimit, REAL),
    entry(ObjectType::AnalogValue, PropertyIdentifier::FaultHighLimit, REAL),
    entry(ObjectType::AnalogValue, PropertyIdentifier::FaultLowLimit, REAL),
    entry(ObjectType::BinaryInput, PropertyIdentifier::InterfaceValue, record(&OPTIONAL_BINARY_PV)),
    entry(ObjectType::Command, PropertyIdentifier::Action, array_of_records(&ACTION_LIST)),
    entry(
        ObjectType::Command,
        PropertyIdentifier::ActionText,
        array_of(ApplicationTag::CharacterString),
    ),
    entry(
        ObjectType::AccessDoor,
        PropertyIdentifier::DoorMembers,
        array_of_records(&DEVICE_OBJECT_REFERENCE),
    ),
    entry(ObjectType::AccessDoor, PropertyIdentifier::DoorPulseTime, UNSIGNED),
    entry(ObjectType::AccessDoor, PropertyIdentifier::DoorExtendedPulseTime, UNSIGNED),
    entry(ObjectType::AccessDoor, PropertyIdentifier::DoorUnlockDelayTime, UNSIGNED),
    entry(ObjectType::AccessDoor, PropertyIdentifier::DoorOpenTooLongTime, UNSIGNED),
    entry(ObjectType::Loop, PropertyIdentifier::ControlledVariableValue, REAL),
    entry(ObjectType::Loop, PropertyIdentifier::Setpoint, REAL),
    entry(ObjectType::Loop, PropertyIdentifier::ProportionalConstant, REAL),
    entry(ObjectType::Loop, PropertyIdentifier::IntegralConstant, REAL),
    entry(ObjectType::Loop, PropertyIdentifier::DerivativeConstant, REAL),
    entry(ObjectType::Loop, PropertyIdentifier::Bias, REAL),
    entry(ObjectType::Loop, PropertyIdentifier::MaximumOutput, REAL),
    entry(ObjectType::Loop, PropertyIdentifier::MinimumOutput, REAL),
    entry(ObjectType::Loop, PropertyIdentifier::ErrorLimit, REAL),
    entry(ObjectType::Loop, PropertyIdentifier::SetpointReference, record(&SETPOINT_REFERENCE)),
    entry(
        ObjectType::Device,
        PropertyIdentifier::SystemStatus,
        enumerated(EnumerationKind::DeviceStatus),
    ),
    entry(
        ObjectType::NetworkPort,
        PropertyIdentifier::BbmdBroadcastDistributionTable,
        list_of_records(&BDT_ENTRY),
    ),
    entry(ObjectType::NetworkPort, PropertyIdentifier::BbmdAcceptFdRegistrations, BOOLEAN),
    // Any object
    any(PropertyIdentifier::ObjectIdentifier, app(ApplicationTag::ObjectIdentifier)),
    any(PropertyIdentifier::ObjectName, CHARACTER_STRING),
    any(PropertyIdentifier::ObjectType, enumerated(EnumerationKind::ObjectType)),
    any(PropertyIdentifier::Description, CHARACTER_STRING),
    any(PropertyIdentifier::ProfileName, CHARACTER_STRING),
    any(PropertyIdentifier::DeviceType, CHARACTER_STRING),
    any(PropertyIdentifier::Location, CHARACTER_STRING),
    any(PropertyIdentifier::VendorName, CHARACTER_STRING),
    any(PropertyIdentifier::ModelName, CHARACTER_STRING),
    any(PropertyIdentifier::FirmwareRevision, CHARACTER_STRING),
    any(PropertyIdentifier::ApplicationSoftwareVersion, CHARACTER_STRING),
    any(PropertyIdentifier::ActiveText, CHARACTER_STRING),
    any(PropertyIdentifier::InactiveText, CHARACTER_STRING),
    any(PropertyIdentifier::UserInformationReference, CHARACTER_STRING),
    any(PropertyIdentifier::StatusFlags, BIT_STRING),
    any(PropertyIdentifier::EventEnable, BIT_STRING),
    any(PropertyIdentifier::AckedTransitions, BIT_STRING),
    any(PropertyIdentifier::LimitEnable, BIT_STRING),
    any(PropertyIdentifier::ProtocolServicesSupported, BIT_STRING),
    any(PropertyIdentifier::ProtocolObjectTypesSupported, BIT_STRING),
    any(PropertyIdentifier::EventState, enumerated(EnumerationKind::EventState)),
    any(PropertyIdentifier::Reliability, enumerated(EnumerationKind::Reliability)),
    any(PropertyIdentifier::Units, enumerated(EnumerationKind::EngineeringUnits)),
    any(PropertyIdentifier::OutputUnits, enumerated(EnumerationKind::EngineeringUnits)),
    any(PropertyIdentifier::ControlledVariableUnits, enumerated(EnumerationKind::EngineeringUnits)),
    any(PropertyIdentifier::Polarity, enumerated(EnumerationKind::Polarity)),
    any(PropertyIdentifier::SegmentationSupported, enumerated(EnumerationKind::Segmentation)),
    any(PropertyIdentifier::NotifyType, UNNAMED),
    any(PropertyIdentifier::SecuredStatus, UNNAMED),
    any(PropertyIdentifier::CredentialDisable, UNNAMED),
    any(PropertyIdentifier::OperationDirection, UNNAMED),
    any(PropertyIdentifier::OutOfService, BOOLEAN),
    any(PropertyIdentifier::ReadOnly, BOOLEAN),
    any(PropertyIdentifier::Archive, BOOLEAN),
    any(PropertyIdentifier::StopWhenFull, BOOLEAN),
    any(PropertyIdentifier::Enable, BOOLEAN),
    any(PropertyIdentifier::DaylightSavingsStatus, BOOLEAN),
    any(PropertyIdentifier::PassengerAlarm, BOOLEAN),
    any(PropertyIdentifier::NumberOfStates, UNSIGNED),
    any(PropertyIdentifier::NotificationClass, UNSIGNED),
    any(PropertyIdentifier::NotificationThreshold, UNSIGNED),
    any(PropertyIdentifier::ProcessIdentifier, UNSIGNED),
    any(PropertyIdentifier::TimeDelay, UNSIGNED),
    any(PropertyIdentifier::UpdateInterval, UNSIGNED),
    any(PropertyIdentifier::VendorIdentifier, UNSIGNED),
    any(PropertyIdentifier::ProtocolVersion, UNSIGNED),
    any(PropertyIdentifier::ProtocolRevision, UNSIGNED),
    any(PropertyIdentifier::MaxApduLengthAccepted, UNSIGNED),
    any(PropertyIdentifier::MaxSegmentsAccepted, UNSIGNED),
    any(PropertyIdentifier::ApduTimeout, UNSIGNED),
    any(PropertyIdentifier::ApduSegmentTimeout, UNSIGNED),
    any(PropertyIdentifier::NumberOfApduRetries, UNSIGNED),
    any(PropertyIdentifier::DatabaseRevision, UNSIGNED),
    any(PropertyIdentifier::FileSize, UNSIGNED),
    any(PropertyIdentifier::BufferSize, UNSIGNED),
    any(PropertyIdentifier::RecordCount, UNSIGNED),
    any(PropertyIdentifier::TotalRecordCount, UNSIGNED),
    any(PropertyIdentifier::LogInterval, UNSIGNED),
    any(PropertyIdentifier::MinimumOffTime, UNSIGNED),
    any(PropertyIdentifier::MinimumOnTime, UNSIGNED),
    any(PropertyIdentifier::Priority, UNSIGNED),
    any(PropertyIdentifier::UtcOffset, app(ApplicationTag::SignedInteger)),
    any(PropertyIdentifier::LocalDate, app(ApplicationTag::Date)),
    any(PropertyIdentifier::LocalTime, app(ApplicationTag::Time)),
    any(PropertyIdentifier::CovIncrement, REAL),
    any(PropertyIdentifier::HighLimit, REAL),
    any(PropertyIdentifier::LowLimit, REAL),
    any(PropertyIdentifier::Deadband, REAL),
    any(PropertyIdentifier::Resolution, REAL),
    any(PropertyIdentifier::MinPresValue, REAL),
    any(PropertyIdentifier::MaxPresValue, REAL),
    any(PropertyIdentifier::DirectReading, REAL),
    any(PropertyIdentifier::TrackingValue, REAL),
    any(PropertyIdentifier::LoggingObject, app(ApplicationTag::ObjectIdentifier)),
    any(PropertyIdentifier::StateText, array_of(ApplicationTag::CharacterString)),
    any(PropertyIdentifier::ObjectList, array_of(ApplicationTag::ObjectIdentifier)),
    any(PropertyIdentifier::SlaveProxyEnable, array_of(ApplicationTag::Boolean)),
    any(PropertyIdentifier::DeviceAddressBinding, list_of_records(&ADDRESS_BINDING)),
    any(PropertyIdentifier::InputReference, record(&OBJECT_PROPERTY_REFERENCE)),
    any(PropertyIdentifier::ControlledVariableReference, record(&OBJECT_PROPERTY_REFERENCE)),
    any(PropertyIdentifier::ManipulatedVariableReference, record(&OBJECT_PROPERTY_REFERENCE)),
    any(PropertyIdentifier::LogDeviceObjectProperty, record(&DEVICE_OBJECT_PROPERTY_REFERENCE)),
    any(
        PropertyIdentifier::ListOfObjectPropertyReferences,
        list_of_records(&DEVICE_OBJECT_PROPERTY_REFERENCE),
    ),
    any(PropertyIdentifier::EffectivePeriod, record(&DATE_RANGE)),
    any(PropertyIdentifier::StartTime, record(&DATE_TIME)),
    any(PropertyIdentifier::StopTime, record(&DATE_TIME)),
    any(PropertyIdentifier::ChangeOfStateTime, record(&DATE_TIME)),
    any(PropertyIdentifier::TimeOfActiveTimeReset, record(&DATE_TIME)),
    any(PropertyIdentifier::TimeOfStateCountReset, record(&DATE_TIME)),
    any(PropertyIdentifier::EventTimeStamps, array_of_records(&TIME_STAMP)),
    any(PropertyIdentifier::StateChangeValues, array_of_records(&TIMER_STATE_CHANGE_VALUE)),
    any(
        PropertyIdentifier::NetworkAccessSecurityPolicies,
        array_of_records(&NETWORK_SECURITY_POLICY),
    ),
];

/// Object types with a priority array and a relinquish default
fn is_commandable(object_type: ObjectType) -> bool {
    matches!(
        object_type,
        ObjectType::AnalogOutput
            | ObjectType::AnalogValue
            | ObjectType::BinaryOutput
            | ObjectType::BinaryValue
            | ObjectType::MultiStateOutput
            | ObjectType::MultiStateValue
            | ObjectType::AccessDoor
            | ObjectType::LightingOutput
            | ObjectType::BinaryLightingOutput
            | ObjectType::BitstringValue
            | ObjectType::CharacterstringValue
            | ObjectType::DateValue
            | ObjectType::DatePatternValue
            | ObjectType::DatetimeValue
            | ObjectType::DatetimePatternValue
            | ObjectType::TimeValue
            | ObjectType::TimePatternValue
            | ObjectType::IntegerValue
            | ObjectType::LargeAnalogValue
            | ObjectType::OctetstringValue
            | ObjectType::PositiveIntegerValue
    )
}

/// Grammar of the present value (and relinquish default) of `object_type`
fn value_grammar(object_type: ObjectType) -> Option<ElementGrammar> {
    let grammar = match object_type {
        ObjectType::AnalogInput
        | ObjectType::AnalogOutput
        | ObjectType::AnalogValue
        | ObjectType::LightingOutput
        | ObjectType::Loop
        | ObjectType::PulseConverter => ElementGrammar::Application(ApplicationTag::Real),
        ObjectType::LargeAnalogValue => ElementGrammar::Application(ApplicationTag::Double),
        ObjectType::BinaryInput | ObjectType::BinaryOutput | ObjectType::BinaryValue => {
            ElementGrammar::Enumerated(EnumerationKind::BinaryPV)
        }
        ObjectType::MultiStateInput
        | ObjectType::MultiStateOutput
        | ObjectType::MultiStateValue
        | ObjectType::Accumulator
        | ObjectType::PositiveIntegerValue
        | ObjectType::Command
        | ObjectType::Timer => ElementGrammar::Application(ApplicationTag::UnsignedInteger),
        ObjectType::IntegerValue => ElementGrammar::Application(ApplicationTag::SignedInteger),
        ObjectType::Calendar => ElementGrammar::Application(ApplicationTag::Boolean),
        ObjectType::BitstringValue => ElementGrammar::Application(ApplicationTag::BitString),
        ObjectType::CharacterstringValue => {
            ElementGrammar::Application(ApplicationTag::CharacterString)
        }
        ObjectType::OctetstringValue => ElementGrammar::Application(ApplicationTag::OctetString),
        ObjectType::DateValue | ObjectType::DatePatternValue => {
            ElementGrammar::Application(ApplicationTag::Date)
        }
        ObjectType::TimeValue | ObjectType::TimePatternValue => {
            ElementGrammar::Application(ApplicationTag::Time)
        }
        ObjectType::DatetimeValue | ObjectType::DatetimePatternValue => {
            ElementGrammar::Record(&DATE_TIME)
        }
        ObjectType::Schedule | ObjectType::Channel => ElementGrammar::AnyApplication,
        ObjectType::LifeSafetyPoint
        | ObjectType::LifeSafetyZone
        | ObjectType::AccessDoor
        | ObjectType::LoadControl
        | ObjectType::BinaryLightingOutput => ElementGrammar::Enumerated(EnumerationKind::Unnamed),
        ObjectType::Device
        | ObjectType::EventEnrollment
        | ObjectType::File
        | ObjectType::Group
        | ObjectType::NotificationClass
        | ObjectType::Program
        | ObjectType::Averaging
        | ObjectType::TrendLog
        | ObjectType::EventLog
        | ObjectType::GlobalGroup
        | ObjectType::TrendLogMultiple
        | ObjectType::StructuredView
        | ObjectType::AccessCredential
        | ObjectType::AccessPoint
        | ObjectType::AccessRights
        | ObjectType::AccessUser
        | ObjectType::AccessZone
        | ObjectType::CredentialDataInput
        | ObjectType::NetworkSecurity
        | ObjectType::NotificationForwarder
        | ObjectType::AlertEnrollment
        | ObjectType::NetworkPort
        | ObjectType::ElevatorGroup
        | ObjectType::Escalator
        | ObjectType::Lift
        | ObjectType::Staging
        | ObjectType::AuditLogger
        | ObjectType::AuditReporter
        | ObjectType::Proprietary(_)
        | ObjectType::Reserved(_) => return None,
    };
    Some(grammar)
}

/// Find the grammar for `property` of `object_type`
pub fn lookup(
    object_type: ObjectType,
    property: PropertyIdentifier,
) -> Result<PropertyGrammar, LookupError> {
    match property {
        PropertyIdentifier::All | PropertyIdentifier::Required | PropertyIdentifier::Optional => {
            return Err(LookupError::Sentinel)
        }
        PropertyIdentifier::PresentValue | PropertyIdentifier::RelinquishDefault => {
            return value_grammar(object_type)
                .map(PropertyGrammar::Single)
                .ok_or(LookupError::Unmapped)
        }
        PropertyIdentifier::PriorityArray if is_commandable(object_type) => {
            return Ok(array_of_records(&PRIORITY_VALUE))
        }
        PropertyIdentifier::PriorityArray => return Err(LookupError::Unmapped),
        _ => {}
    }

    DISPATCH_TABLE
        .iter()
        .find(|entry| entry.object_type == Some(object_type) && entry.property == property)
        .or_else(|| {
            DISPATCH_TABLE
                .iter()
                .find(|entry| entry.object_type.is_none() && entry.property == property)
        })
        .map(|entry| entry.grammar)
        .ok_or(LookupError::Unmapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_value_by_object_type() {
        assert_eq!(
            lookup(ObjectType::AnalogValue, PropertyIdentifier::PresentValue),
            Ok(PropertyGrammar::Single(ElementGrammar::Application(ApplicationTag::Real)))
        );
        assert_eq!(
            lookup(ObjectType::BinaryValue, PropertyIdentifier::PresentValue),
            Ok(PropertyGrammar::Single(ElementGrammar::Enumerated(EnumerationKind::BinaryPV)))
        );
        assert_eq!(
            lookup(ObjectType::MultiStateValue, PropertyIdentifier::RelinquishDefault),
            Ok(UNSIGNED)
        );
        assert_eq!(
            lookup(ObjectType::Device, PropertyIdentifier::PresentValue),
            Err(LookupError::Unmapped)
        );
        assert_eq!(
            lookup(ObjectType::from(200u16), PropertyIdentifier::PresentValue),
            Err(LookupError::Unmapped)
        );
    }

    #[test]
    fn test_specific_entry_wins() {
        assert_eq!(
            lookup(ObjectType::Command, PropertyIdentifier::Action),
            Ok(array_of_records(&ACTION_LIST))
        );
        assert_eq!(
            lookup(ObjectType::AnalogInput, PropertyIdentifier::FaultHighLimit),
            Ok(REAL)
        );
        assert_eq!(
            lookup(ObjectType::MultiStateInput, PropertyIdentifier::FaultHighLimit),
            Err(LookupError::Unmapped)
        );
    }

    #[test]
    fn test_generic_entries() {
        assert_eq!(
            lookup(ObjectType::from(300u16), PropertyIdentifier::ObjectName),
            Ok(CHARACTER_STRING)
        );
        assert_eq!(
            lookup(ObjectType::Device, PropertyIdentifier::ObjectList),
            Ok(array_of(ApplicationTag::ObjectIdentifier))
        );
        assert_eq!(
            lookup(ObjectType::from(300u16), PropertyIdentifier::ProcessIdentifier),
            Ok(UNSIGNED)
        );
        assert_eq!(
            lookup(ObjectType::Device, PropertyIdentifier::SlaveProxyEnable),
            Ok(array_of(ApplicationTag::Boolean))
        );
    }

    #[test]
    fn test_priority_array_only_for_commandable_objects() {
        for object_type in [
            ObjectType::AnalogOutput,
            ObjectType::BinaryValue,
            ObjectType::DatetimeValue,
            ObjectType::LargeAnalogValue,
        ] {
            assert_eq!(
                lookup(object_type, PropertyIdentifier::PriorityArray),
                Ok(array_of_records(&PRIORITY_VALUE))
            );
            assert!(lookup(object_type, PropertyIdentifier::RelinquishDefault).is_ok());
        }
        for object_type in [
            ObjectType::AnalogInput,
            ObjectType::Loop,
            ObjectType::Accumulator,
            ObjectType::Calendar,
            ObjectType::Schedule,
            ObjectType::Command,
            ObjectType::Device,
        ] {
            assert_eq!(
                lookup(object_type, PropertyIdentifier::PriorityArray),
                Err(LookupError::Unmapped)
            );
        }
    }

    #[test]
    fn test_interface_value_keyed_to_binary_input() {
        assert_eq!(
            lookup(ObjectType::BinaryInput, PropertyIdentifier::InterfaceValue),
            Ok(record(&OPTIONAL_BINARY_PV))
        );
        assert_eq!(
            lookup(ObjectType::AnalogInput, PropertyIdentifier::InterfaceValue),
            Err(LookupError::Unmapped)
        );
    }

    #[test]
    fn test_sentinels_and_unknown_properties() {
        for sentinel in [
            PropertyIdentifier::All,
            PropertyIdentifier::Required,
            PropertyIdentifier::Optional,
        ] {
            assert_eq!(lookup(ObjectType::Device, sentinel), Err(LookupError::Sentinel));
        }
        assert_eq!(
            lookup(ObjectType::Device, PropertyIdentifier::from(600)),
            Err(LookupError::Unmapped)
        );
    }

    #[test]
    fn test_table_has_no_duplicate_keys() {
        for (index, entry) in DISPATCH_TABLE.iter().enumerate() {
            assert!(
                DISPATCH_TABLE[index + 1..].iter().all(|other| {
                    (other.object_type, other.property) != (entry.object_type, entry.property)
                }),
                "duplicate entry for {:?} {}",
                entry.object_type,
                entry.property
            );
        }
    }
}
