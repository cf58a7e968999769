//! Enumerated property values.

use bitflags::bitflags;

use crate::encoding::BitStringPayload;

crate::generate_custom_enum!(
    /// Binary present value
    BinaryPV {
        Inactive = 0,
        Active = 1,
    },
    u32,
    0..0
);

impl From<bool> for BinaryPV {
    fn from(value: bool) -> Self {
        if value {
            BinaryPV::Active
        } else {
            BinaryPV::Inactive
        }
    }
}

crate::generate_custom_enum!(
    Polarity {
        Normal = 0,
        Reverse = 1,
    },
    u32,
    0..0
);

crate::generate_custom_enum!(
    /// Event state of an object
    EventState {
        Normal = 0,
        Fault = 1,
        Offnormal = 2,
        HighLimit = 3,
        LowLimit = 4,
        LifeSafetyAlarm = 5,
    },
    u32,
    64..=65535
);

crate::generate_custom_enum!(
    Reliability {
        NoFaultDetected = 0,
        NoSensor = 1,
        OverRange = 2,
        UnderRange = 3,
        OpenLoop = 4,
        ShortedLoop = 5,
        NoOutput = 6,
        UnreliableOther = 7,
        ProcessError = 8,
        MultiStateFault = 9,
        ConfigurationError = 10,
        CommunicationFailure = 12,
        MemberFault = 13,
    },
    u32,
    64..=65535
);

crate::generate_custom_enum!(
    /// Device status (system-status property)
    DeviceStatus {
        Operational = 0,
        OperationalReadOnly = 1,
        DownloadRequired = 2,
        DownloadInProgress = 3,
        NonOperational = 4,
        BackupInProgress = 5,
    },
    u32,
    64..=65535
);

crate::generate_custom_enum!(
    Segmentation {
        Both = 0,
        Transmit = 1,
        Receive = 2,
        NoSegmentation = 3,
    },
    u32,
    0..0
);

crate::generate_custom_enum!(
    /// Engineering units (subset)
    EngineeringUnits {
        Amperes = 2,
        Ohms = 4,
        Volts = 5,
        Watts = 47,
        Kilowatts = 48,
        Pascals = 53,
        Kilopascals = 54,
        DegreesCelsius = 62,
        DegreesKelvin = 63,
        DegreesFahrenheit = 64,
        MetersPerSecond = 74,
        KilometersPerHour = 75,
        CubicMetersPerSecond = 85,
        NoUnits = 95,
        Percent = 98,
        Milliamperes = 119,
        Millivolts = 124,
        LitersPerSecond = 126,
    },
    u32,
    256..=65535
);

bitflags! {
    /// The four-bit status-flags bit string. Bit 0 is the first bit on the wire.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    pub struct StatusFlags: u8 {
        const IN_ALARM = 1 << 0;
        const FAULT = 1 << 1;
        const OVERRIDDEN = 1 << 2;
        const OUT_OF_SERVICE = 1 << 3;
    }
}

impl StatusFlags {
    /// Flags set in the first four bits of `bits`; missing bits read as clear
    pub fn from_bit_string(bits: &BitStringPayload) -> Self {
        (0..4)
            .filter(|index| bits.bit(*index).unwrap_or(false))
            .fold(StatusFlags::empty(), |flags, index| {
                flags | StatusFlags::from_bits_truncate(1 << index)
            })
    }

    pub fn to_bit_string(self) -> BitStringPayload {
        let bits: Vec<bool> = (0..4).map(|index| self.bits() & (1 << index) != 0).collect();
        BitStringPayload::from_bits(&bits)
    }
}
