//! BACnet Object Vocabulary
//!
//! The enumerations that select grammars during decoding: object types, property
//! identifiers and the enumerated property values the dispatch table knows by name.
//!
//! # Object Identifiers
//!
//! An object identifier packs a 10-bit object type and a 22-bit instance number into
//! one 32-bit value (ASHRAE 135 clause 20.2.14).
//!
//! ```
//! use bacnet_codec::object::{ObjectIdentifier, ObjectType};
//!
//! let device = ObjectIdentifier::new(ObjectType::Device, 123);
//! assert_eq!(u32::from(device), 0x0200_007B);
//! assert_eq!(ObjectIdentifier::from(0x0200_007B), device);
//! ```

use core::fmt;

mod enumerations;
mod object_type;
mod property_identifier;

pub use enumerations::*;
pub use object_type::*;
pub use property_identifier::*;

/// Largest instance number that fits in 22 bits
pub const MAX_INSTANCE: u32 = 0x3F_FFFF;

/// Largest object type that fits in 10 bits
pub const MAX_OBJECT_TYPE: u16 = 0x3FF;

/// Object identifier (type + instance number)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ObjectIdentifier {
    pub object_type: ObjectType,
    pub instance: u32,
}

impl ObjectIdentifier {
    pub fn new(object_type: ObjectType, instance: u32) -> Self {
        Self {
            object_type,
            instance,
        }
    }

    /// Whether both fields fit their wire widths
    pub fn is_valid(&self) -> bool {
        self.instance <= MAX_INSTANCE && u16::from(self.object_type) <= MAX_OBJECT_TYPE
    }
}

impl From<u32> for ObjectIdentifier {
    fn from(value: u32) -> Self {
        let object_type = ((value >> 22) & 0x3FF) as u16;
        Self::new(object_type.into(), value & MAX_INSTANCE)
    }
}

impl From<ObjectIdentifier> for u32 {
    fn from(value: ObjectIdentifier) -> Self {
        let object_type = u32::from(u16::from(value.object_type));
        (object_type << 22) | (value.instance & MAX_INSTANCE)
    }
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.object_type, self.instance)
    }
}
