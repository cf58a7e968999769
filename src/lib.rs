#![doc = include_str!("../README.md")]

pub mod constructed;
pub mod encoding;
pub mod object;
pub mod util;

// Re-export main types without glob imports to avoid conflicts
pub use constructed::{decode_constructed_data, ConstructedData, PropertyArguments};
pub use encoding::{
    decode_application_tag, decode_context_tag, encode_application_tag, ApplicationTag,
    ApplicationTagValue, ContextTagValue, DataType, EncodingError, ErrorKind,
};
pub use object::{ObjectIdentifier, ObjectType, PropertyIdentifier};

/// Largest APDU a device may accept (ASHRAE 135 clause 20.1.2.5)
pub const BACNET_MAX_APDU: usize = 1476;
