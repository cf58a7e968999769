//! Payload grammars of the thirteen primitive kinds.
//!
//! Application and context tags share these grammars; only the way the kind is
//! selected differs. Every payload is sized by the header length that precedes it.

use core::fmt;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

use super::application::ApplicationTag;
use super::buffer::{ReadBuffer, WriteBuffer};
use super::header::{TagClass, TagHeader};
use super::Result;
use crate::object::ObjectIdentifier;
use crate::util;

/// Unsigned integer payload: 1 to 8 big-endian octets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UnsignedPayload {
    value: u64,
    width: u8,
}

impl UnsignedPayload {
    /// Minimal-width encoding of `value`
    pub fn new(value: u64) -> Self {
        let significant_bits = 64 - value.leading_zeros();
        let width = significant_bits.div_ceil(8).max(1) as u8;
        Self { value, width }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    fn decode(reader: &mut ReadBuffer<'_>, length: u32) -> Result<Self> {
        check_width(reader, "unsigned integer", length, 8)?;
        let value = reader.read_uint(length as usize)?;
        Ok(Self {
            value,
            width: length as u8,
        })
    }
}

/// Signed integer payload: 1 to 8 octets, two's complement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SignedPayload {
    value: i64,
    width: u8,
}

impl SignedPayload {
    pub fn new(value: i64) -> Self {
        let width = (1..8u32)
            .find(|octets| {
                let limit = 1i64 << (octets * 8 - 1);
                (-limit..limit).contains(&value)
            })
            .unwrap_or(8) as u8;
        Self { value, width }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    fn decode(reader: &mut ReadBuffer<'_>, length: u32) -> Result<Self> {
        check_width(reader, "signed integer", length, 8)?;
        let value = reader.read_int(length as usize)?;
        Ok(Self {
            value,
            width: length as u8,
        })
    }
}

/// Enumerated payload: 1 to 4 big-endian octets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EnumeratedPayload {
    value: u32,
    width: u8,
}

impl EnumeratedPayload {
    pub fn new(value: u32) -> Self {
        let significant_bits = 32 - value.leading_zeros();
        let width = significant_bits.div_ceil(8).max(1) as u8;
        Self { value, width }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    fn decode(reader: &mut ReadBuffer<'_>, length: u32) -> Result<Self> {
        check_width(reader, "enumerated value", length, 4)?;
        let value = reader.read_uint(length as usize)? as u32;
        Ok(Self {
            value,
            width: length as u8,
        })
    }
}

fn check_width(reader: &ReadBuffer<'_>, kind: &str, length: u32, max: u32) -> Result<()> {
    if length == 0 || length > max {
        return Err(reader.validation_error(
            reader.position(),
            format!("{} needs 1 to {} octets, header announced {}", kind, max, length),
        ));
    }
    Ok(())
}

fn check_exact(reader: &ReadBuffer<'_>, kind: &str, length: u32, expected: u32) -> Result<()> {
    if length != expected {
        return Err(reader.validation_error(
            reader.position(),
            format!("{} needs exactly {} octets, header announced {}", kind, expected, length),
        ));
    }
    Ok(())
}

crate::generate_custom_enum!(
    /// Character set octet leading every character string
    CharacterEncoding {
        Utf8 = 0,
        Dbcs = 1,
        JisX0208 = 2,
        Ucs4 = 3,
        Ucs2 = 4,
        Iso88591 = 5,
    },
    u8,
    0..0
);

/// Character string payload: a character set octet followed by the encoded text.
///
/// The raw octets are kept so that strings in character sets this crate cannot
/// transcode still round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CharacterStringPayload {
    encoding: CharacterEncoding,
    raw: Vec<u8>,
}

impl CharacterStringPayload {
    /// UTF-8 string
    pub fn new(value: &str) -> Self {
        Self {
            encoding: CharacterEncoding::Utf8,
            raw: value.as_bytes().to_vec(),
        }
    }

    /// Encode `value` in the given character set, if it is representable there
    pub fn with_encoding(encoding: CharacterEncoding, value: &str) -> Option<Self> {
        let raw = match encoding {
            CharacterEncoding::Utf8 => value.as_bytes().to_vec(),
            CharacterEncoding::Iso88591 => {
                if !encoding_rs::mem::is_str_latin1(value) {
                    return None;
                }
                encoding_rs::mem::encode_latin1_lossy(value).into_owned()
            }
            CharacterEncoding::Ucs2 => {
                if value.chars().any(|c| u32::from(c) > 0xFFFF) {
                    return None;
                }
                value.encode_utf16().flat_map(u16::to_be_bytes).collect()
            }
            CharacterEncoding::Ucs4 => {
                value.chars().flat_map(|c| u32::from(c).to_be_bytes()).collect()
            }
            _ => return None,
        };
        Some(Self { encoding, raw })
    }

    /// Raw payload as received, for character sets without a decoder
    pub fn from_raw(encoding: CharacterEncoding, raw: Vec<u8>) -> Self {
        Self { encoding, raw }
    }

    pub fn encoding(&self) -> CharacterEncoding {
        self.encoding
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Decoded text, or `None` for malformed data or unsupported character sets
    pub fn value(&self) -> Option<String> {
        let text = match self.encoding {
            CharacterEncoding::Utf8 => encoding_rs::UTF_8
                .decode_without_bom_handling_and_without_replacement(&self.raw)
                .map(|text| text.into_owned()),
            CharacterEncoding::Ucs2 => encoding_rs::UTF_16BE
                .decode_without_bom_handling_and_without_replacement(&self.raw)
                .map(|text| text.into_owned()),
            CharacterEncoding::Iso88591 => {
                Some(encoding_rs::mem::decode_latin1(&self.raw).into_owned())
            }
            CharacterEncoding::Ucs4 => {
                if self.raw.len() % 4 != 0 {
                    None
                } else {
                    self.raw
                        .chunks_exact(4)
                        .map(|chunk| {
                            char::from_u32(u32::from_be_bytes([
                                chunk[0], chunk[1], chunk[2], chunk[3],
                            ]))
                        })
                        .collect()
                }
            }
            _ => None,
        };
        if text.is_none() {
            log::debug!("cannot transcode {} octets of {} text", self.raw.len(), self.encoding);
        }
        text
    }

    fn payload_length(&self) -> u32 {
        1 + self.raw.len() as u32
    }

    fn decode(reader: &mut ReadBuffer<'_>, length: u32) -> Result<Self> {
        if length == 0 {
            return Err(reader.validation_error(
                reader.position(),
                "character string needs at least the character set octet",
            ));
        }
        let encoding = CharacterEncoding::from(reader.read_u8()?);
        let raw = reader.read_bytes(length as usize - 1)?.to_vec();
        Ok(Self { encoding, raw })
    }
}

/// Bit string payload: an unused-bit count followed by the bits, most significant first
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BitStringPayload {
    unused_bits: u8,
    data: Vec<u8>,
}

impl BitStringPayload {
    pub fn from_bits(bits: &[bool]) -> Self {
        let mut data = vec![0u8; bits.len().div_ceil(8)];
        for (index, _) in bits.iter().enumerate().filter(|(_, set)| **set) {
            data[index / 8] |= 0x80 >> (index % 8);
        }
        let unused_bits = ((8 - bits.len() % 8) % 8) as u8;
        Self { unused_bits, data }
    }

    pub fn unused_bits(&self) -> u8 {
        self.unused_bits
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of significant bits
    pub fn len(&self) -> usize {
        self.data.len() * 8 - usize::from(self.unused_bits)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bit(&self, index: usize) -> Option<bool> {
        if index >= self.len() {
            return None;
        }
        Some(self.data[index / 8] & (0x80 >> (index % 8)) != 0)
    }

    pub fn bits(&self) -> Vec<bool> {
        (0..self.len()).filter_map(|index| self.bit(index)).collect()
    }

    fn payload_length(&self) -> u32 {
        1 + self.data.len() as u32
    }

    fn decode(reader: &mut ReadBuffer<'_>, length: u32) -> Result<Self> {
        let start = reader.position();
        if length == 0 {
            return Err(
                reader.validation_error(start, "bit string needs at least the unused-bits octet")
            );
        }
        let unused_bits = reader.read_u8()?;
        let data = reader.read_bytes(length as usize - 1)?.to_vec();
        if unused_bits > 7 || (data.is_empty() && unused_bits != 0) {
            return Err(reader.validation_error(
                start,
                format!("{} unused bits in a bit string of {} octets", unused_bits, data.len()),
            ));
        }
        Ok(Self { unused_bits, data })
    }
}

/// Date payload. Every field may be 255, meaning "unspecified".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DatePayload {
    year_minus_1900: u8,
    month: u8,
    day_of_month: u8,
    day_of_week: u8,
}

impl DatePayload {
    pub const UNSPECIFIED: u8 = 255;

    /// Date from raw octets, wildcards included
    pub fn from_raw(year_minus_1900: u8, month: u8, day_of_month: u8, day_of_week: u8) -> Self {
        Self {
            year_minus_1900,
            month,
            day_of_month,
            day_of_week,
        }
    }

    /// Concrete calendar date; `None` outside the representable years 1900 to 2154
    pub fn from_naive_date(date: NaiveDate) -> Option<Self> {
        let year_minus_1900 = u8::try_from(date.year().checked_sub(1900)?).ok()?;
        if year_minus_1900 == Self::UNSPECIFIED {
            return None;
        }
        Some(Self {
            year_minus_1900,
            month: date.month() as u8,
            day_of_month: date.day() as u8,
            day_of_week: date.weekday().number_from_monday() as u8,
        })
    }

    pub fn year(&self) -> Option<u16> {
        (self.year_minus_1900 != Self::UNSPECIFIED).then(|| 1900 + u16::from(self.year_minus_1900))
    }

    pub fn raw_year(&self) -> u8 {
        self.year_minus_1900
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day_of_month(&self) -> u8 {
        self.day_of_month
    }

    /// 1 = Monday through 7 = Sunday
    pub fn day_of_week(&self) -> u8 {
        self.day_of_week
    }

    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year()?),
            u32::from(self.month),
            u32::from(self.day_of_month),
        )
    }

    fn decode(reader: &mut ReadBuffer<'_>, length: u32) -> Result<Self> {
        check_exact(reader, "date", length, 4)?;
        Ok(Self {
            year_minus_1900: reader.read_u8()?,
            month: reader.read_u8()?,
            day_of_month: reader.read_u8()?,
            day_of_week: reader.read_u8()?,
        })
    }

    fn encode(&self, writer: &mut WriteBuffer) {
        writer.write_bytes(&[
            self.year_minus_1900,
            self.month,
            self.day_of_month,
            self.day_of_week,
        ]);
    }
}

impl fmt::Display for DatePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&util::format_date(self))
    }
}

/// Time payload. Every field may be 255, meaning "unspecified".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimePayload {
    hour: u8,
    minute: u8,
    second: u8,
    hundredths: u8,
}

impl TimePayload {
    pub const UNSPECIFIED: u8 = 255;

    pub fn from_raw(hour: u8, minute: u8, second: u8, hundredths: u8) -> Self {
        Self {
            hour,
            minute,
            second,
            hundredths,
        }
    }

    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
            second: time.second().min(59) as u8,
            hundredths: (time.nanosecond() / 10_000_000).min(99) as u8,
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    pub fn hundredths(&self) -> u8 {
        self.hundredths
    }

    /// Concrete time of day; `None` when any field is unspecified or out of range
    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_milli_opt(
            u32::from(self.hour),
            u32::from(self.minute),
            u32::from(self.second),
            u32::from(self.hundredths) * 10,
        )
    }

    fn decode(reader: &mut ReadBuffer<'_>, length: u32) -> Result<Self> {
        check_exact(reader, "time", length, 4)?;
        Ok(Self {
            hour: reader.read_u8()?,
            minute: reader.read_u8()?,
            second: reader.read_u8()?,
            hundredths: reader.read_u8()?,
        })
    }

    fn encode(&self, writer: &mut WriteBuffer) {
        writer.write_bytes(&[self.hour, self.minute, self.second, self.hundredths]);
    }
}

impl fmt::Display for TimePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&util::format_time(self))
    }
}

/// A decoded primitive value of any of the thirteen kinds
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PrimitiveValue {
    Null,
    Boolean(bool),
    UnsignedInteger(UnsignedPayload),
    SignedInteger(SignedPayload),
    Real(f32),
    Double(f64),
    OctetString(Vec<u8>),
    CharacterString(CharacterStringPayload),
    BitString(BitStringPayload),
    Enumerated(EnumeratedPayload),
    Date(DatePayload),
    Time(TimePayload),
    ObjectIdentifier(ObjectIdentifier),
}

impl PrimitiveValue {
    pub fn application_tag(&self) -> ApplicationTag {
        match self {
            PrimitiveValue::Null => ApplicationTag::Null,
            PrimitiveValue::Boolean(_) => ApplicationTag::Boolean,
            PrimitiveValue::UnsignedInteger(_) => ApplicationTag::UnsignedInteger,
            PrimitiveValue::SignedInteger(_) => ApplicationTag::SignedInteger,
            PrimitiveValue::Real(_) => ApplicationTag::Real,
            PrimitiveValue::Double(_) => ApplicationTag::Double,
            PrimitiveValue::OctetString(_) => ApplicationTag::OctetString,
            PrimitiveValue::CharacterString(_) => ApplicationTag::CharacterString,
            PrimitiveValue::BitString(_) => ApplicationTag::BitString,
            PrimitiveValue::Enumerated(_) => ApplicationTag::Enumerated,
            PrimitiveValue::Date(_) => ApplicationTag::Date,
            PrimitiveValue::Time(_) => ApplicationTag::Time,
            PrimitiveValue::ObjectIdentifier(_) => ApplicationTag::ObjectIdentifier,
        }
    }

    /// Value of the header length field for this payload under the given class.
    ///
    /// Application booleans carry their value here; context booleans carry one octet.
    pub(crate) fn header_length(&self, tag_class: TagClass) -> u32 {
        match (self, tag_class) {
            (PrimitiveValue::Boolean(value), TagClass::Application) => u32::from(*value),
            _ => self.payload_length(tag_class) as u32,
        }
    }

    /// Octets written after the header
    pub(crate) fn payload_length(&self, tag_class: TagClass) -> usize {
        match self {
            PrimitiveValue::Null => 0,
            PrimitiveValue::Boolean(_) => match tag_class {
                TagClass::Application => 0,
                TagClass::ContextSpecific => 1,
            },
            PrimitiveValue::UnsignedInteger(payload) => usize::from(payload.width),
            PrimitiveValue::SignedInteger(payload) => usize::from(payload.width),
            PrimitiveValue::Real(_) => 4,
            PrimitiveValue::Double(_) => 8,
            PrimitiveValue::OctetString(data) => data.len(),
            PrimitiveValue::CharacterString(payload) => payload.payload_length() as usize,
            PrimitiveValue::BitString(payload) => payload.payload_length() as usize,
            PrimitiveValue::Enumerated(payload) => usize::from(payload.width),
            PrimitiveValue::Date(_)
            | PrimitiveValue::Time(_)
            | PrimitiveValue::ObjectIdentifier(_) => 4,
        }
    }

    /// Decode the payload of `kind` announced by `header`
    pub(crate) fn decode(
        reader: &mut ReadBuffer<'_>,
        kind: ApplicationTag,
        header: &TagHeader,
    ) -> Result<Self> {
        let length = header.length();
        let value = match kind {
            ApplicationTag::Null => {
                check_exact(reader, "null", length, 0)?;
                PrimitiveValue::Null
            }
            ApplicationTag::Boolean => PrimitiveValue::Boolean(decode_boolean(reader, header)?),
            ApplicationTag::UnsignedInteger => {
                PrimitiveValue::UnsignedInteger(UnsignedPayload::decode(reader, length)?)
            }
            ApplicationTag::SignedInteger => {
                PrimitiveValue::SignedInteger(SignedPayload::decode(reader, length)?)
            }
            ApplicationTag::Real => {
                check_exact(reader, "real", length, 4)?;
                PrimitiveValue::Real(reader.read_f32()?)
            }
            ApplicationTag::Double => {
                check_exact(reader, "double", length, 8)?;
                PrimitiveValue::Double(reader.read_f64()?)
            }
            ApplicationTag::OctetString => {
                PrimitiveValue::OctetString(reader.read_bytes(length as usize)?.to_vec())
            }
            ApplicationTag::CharacterString => {
                PrimitiveValue::CharacterString(CharacterStringPayload::decode(reader, length)?)
            }
            ApplicationTag::BitString => {
                PrimitiveValue::BitString(BitStringPayload::decode(reader, length)?)
            }
            ApplicationTag::Enumerated => {
                PrimitiveValue::Enumerated(EnumeratedPayload::decode(reader, length)?)
            }
            ApplicationTag::Date => PrimitiveValue::Date(DatePayload::decode(reader, length)?),
            ApplicationTag::Time => PrimitiveValue::Time(TimePayload::decode(reader, length)?),
            ApplicationTag::ObjectIdentifier => {
                check_exact(reader, "object identifier", length, 4)?;
                PrimitiveValue::ObjectIdentifier(ObjectIdentifier::from(reader.read_u32()?))
            }
        };
        Ok(value)
    }

    pub(crate) fn encode(&self, writer: &mut WriteBuffer, tag_class: TagClass) -> Result<()> {
        match self {
            PrimitiveValue::Null => {}
            PrimitiveValue::Boolean(value) => {
                if tag_class == TagClass::ContextSpecific {
                    writer.write_u8(u8::from(*value));
                }
            }
            PrimitiveValue::UnsignedInteger(payload) => {
                writer.write_uint(payload.value, usize::from(payload.width))
            }
            PrimitiveValue::SignedInteger(payload) => {
                writer.write_int(payload.value, usize::from(payload.width))
            }
            PrimitiveValue::Real(value) => writer.write_f32(*value),
            PrimitiveValue::Double(value) => writer.write_f64(*value),
            PrimitiveValue::OctetString(data) => writer.write_bytes(data),
            PrimitiveValue::CharacterString(payload) => {
                writer.write_u8(u8::from(payload.encoding));
                writer.write_bytes(&payload.raw);
            }
            PrimitiveValue::BitString(payload) => {
                writer.write_u8(payload.unused_bits);
                writer.write_bytes(&payload.data);
            }
            PrimitiveValue::Enumerated(payload) => {
                writer.write_uint(u64::from(payload.value), usize::from(payload.width))
            }
            PrimitiveValue::Date(date) => date.encode(writer),
            PrimitiveValue::Time(time) => time.encode(writer),
            PrimitiveValue::ObjectIdentifier(identifier) => {
                if !identifier.is_valid() {
                    return Err(writer.out_of_range_error(format!(
                        "object identifier {} does not fit in 32 bits",
                        identifier
                    )));
                }
                writer.write_u32(u32::from(*identifier));
            }
        }
        Ok(())
    }
}

fn decode_boolean(reader: &mut ReadBuffer<'_>, header: &TagHeader) -> Result<bool> {
    let start = reader.position();
    let raw = match header.tag_class() {
        TagClass::Application => header.length(),
        TagClass::ContextSpecific => {
            check_exact(reader, "context boolean", header.length(), 1)?;
            u32::from(reader.read_u8()?)
        }
    };
    match raw {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(reader.validation_error(
            start,
            format!("boolean value {} is neither 0 nor 1", other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_minimal_integer_widths() {
        assert_eq!(UnsignedPayload::new(0).width(), 1);
        assert_eq!(UnsignedPayload::new(0xFF).width(), 1);
        assert_eq!(UnsignedPayload::new(0x100).width(), 2);
        assert_eq!(UnsignedPayload::new(0xFF_FFFF).width(), 3);
        assert_eq!(UnsignedPayload::new(0x1_0000_0000).width(), 5);
        assert_eq!(UnsignedPayload::new(u64::MAX).width(), 8);

        assert_eq!(SignedPayload::new(0).width(), 1);
        assert_eq!(SignedPayload::new(-128).width(), 1);
        assert_eq!(SignedPayload::new(127).width(), 1);
        assert_eq!(SignedPayload::new(128).width(), 2);
        assert_eq!(SignedPayload::new(-129).width(), 2);
        assert_eq!(SignedPayload::new(i64::MIN).width(), 8);

        assert_eq!(EnumeratedPayload::new(0).width(), 1);
        assert_eq!(EnumeratedPayload::new(256).width(), 2);
        assert_eq!(EnumeratedPayload::new(u32::MAX).width(), 4);
    }

    #[test]
    fn test_character_sets() {
        let latin =
            CharacterStringPayload::with_encoding(CharacterEncoding::Iso88591, "Zürich").unwrap();
        assert_eq!(latin.raw(), &[b'Z', 0xFC, b'r', b'i', b'c', b'h']);
        assert_eq!(latin.value().unwrap(), "Zürich");

        let ucs2 = CharacterStringPayload::with_encoding(CharacterEncoding::Ucs2, "Aé").unwrap();
        assert_eq!(ucs2.raw(), &[0x00, 0x41, 0x00, 0xE9]);
        assert_eq!(ucs2.value().unwrap(), "Aé");

        let ucs4 = CharacterStringPayload::with_encoding(CharacterEncoding::Ucs4, "😀").unwrap();
        assert_eq!(ucs4.raw(), &[0x00, 0x01, 0xF6, 0x00]);
        assert_eq!(ucs4.value().unwrap(), "😀");

        assert!(CharacterStringPayload::with_encoding(CharacterEncoding::Ucs2, "😀").is_none());
        assert!(
            CharacterStringPayload::with_encoding(CharacterEncoding::Iso88591, "€").is_none()
        );

        let jis = CharacterStringPayload::from_raw(CharacterEncoding::JisX0208, vec![0x30, 0x21]);
        assert_eq!(jis.value(), None);
        assert!(matches!(
            CharacterEncoding::from(9),
            CharacterEncoding::Reserved(raw) if raw.value() == 9
        ));
    }

    #[test]
    fn test_bit_string_layout() {
        let bits = BitStringPayload::from_bits(&[true, false, true, false]);
        assert_eq!(bits.unused_bits(), 4);
        assert_eq!(bits.data(), &[0xA0]);
        assert_eq!(bits.len(), 4);
        assert_eq!(bits.bit(2), Some(true));
        assert_eq!(bits.bit(4), None);

        let empty = BitStringPayload::from_bits(&[]);
        assert!(empty.is_empty());
        assert_eq!(empty.unused_bits(), 0);
        assert!(empty.data().is_empty());
    }

    #[test]
    fn test_date_conversions() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let payload = DatePayload::from_naive_date(date).unwrap();
        assert_eq!(payload, DatePayload::from_raw(124, 3, 15, 5));
        assert_eq!(payload.to_naive_date(), Some(date));

        let wildcard = DatePayload::from_raw(255, 255, 255, 255);
        assert_eq!(wildcard.year(), None);
        assert_eq!(wildcard.to_naive_date(), None);

        let too_old = NaiveDate::from_ymd_opt(1899, 12, 31).unwrap();
        assert!(DatePayload::from_naive_date(too_old).is_none());
    }

    #[test]
    fn test_time_conversions() {
        let time = NaiveTime::from_hms_milli_opt(14, 30, 45, 500).unwrap();
        let payload = TimePayload::from_naive_time(time);
        assert_eq!(payload, TimePayload::from_raw(14, 30, 45, 50));
        assert_eq!(payload.to_naive_time(), Some(time));
        assert_eq!(TimePayload::from_raw(255, 0, 0, 0).to_naive_time(), None);
    }

    #[test]
    fn test_invalid_payload_lengths() {
        let cases: [(ApplicationTag, u32, &[u8]); 5] = [
            (ApplicationTag::Real, 3, &[0, 0, 0]),
            (ApplicationTag::UnsignedInteger, 0, &[]),
            (ApplicationTag::Enumerated, 5, &[0, 0, 0, 0, 1]),
            (ApplicationTag::Date, 3, &[1, 2, 3]),
            (ApplicationTag::BitString, 2, &[8, 0xFF]),
        ];
        for (kind, length, data) in cases {
            let header = TagHeader::new(TagClass::Application, kind as u8, length);
            let mut reader = ReadBuffer::new(data);
            let err = PrimitiveValue::decode(&mut reader, kind, &header).unwrap_err();
            assert_eq!(err.kind(), crate::encoding::ErrorKind::Validation, "{:?}", kind);
        }
    }

    proptest! {
        #[test]
        fn prop_unsigned_round_trip(value in any::<u64>()) {
            let payload = UnsignedPayload::new(value);
            let mut writer = WriteBuffer::new();
            PrimitiveValue::UnsignedInteger(payload)
                .encode(&mut writer, TagClass::Application)
                .unwrap();
            let bytes = writer.into_vec();
            prop_assert_eq!(bytes.len(), usize::from(payload.width()));
            let mut reader = ReadBuffer::new(&bytes);
            let decoded = UnsignedPayload::decode(&mut reader, bytes.len() as u32).unwrap();
            prop_assert_eq!(decoded, payload);
        }

        #[test]
        fn prop_signed_round_trip(value in any::<i64>()) {
            let payload = SignedPayload::new(value);
            let mut writer = WriteBuffer::new();
            PrimitiveValue::SignedInteger(payload)
                .encode(&mut writer, TagClass::Application)
                .unwrap();
            let bytes = writer.into_vec();
            let mut reader = ReadBuffer::new(&bytes);
            let decoded = SignedPayload::decode(&mut reader, bytes.len() as u32).unwrap();
            prop_assert_eq!(decoded.value(), value);
        }

        #[test]
        fn prop_bit_string_round_trip(bits in proptest::collection::vec(any::<bool>(), 0..40)) {
            let payload = BitStringPayload::from_bits(&bits);
            prop_assert_eq!(payload.bits(), bits);
        }
    }
}
