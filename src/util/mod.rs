//! Utility Functions Module
//!
//! Formatting and debugging helpers shared by the codec.
//!
//! # Overview
//!
//! - Date and time rendering with BACnet wildcards
//! - Hex dumps of raw traffic
//! - A tag-level listing of an encoded buffer for diagnosing malformed device data
//!
//! # Example
//!
//! ```
//! use bacnet_codec::util::describe_tags;
//!
//! let listing = describe_tags(&[0x3E, 0x44, 0x42, 0x28, 0x00, 0x00, 0x3F]);
//! assert!(listing.contains("opening tag 3"));
//! ```

pub mod enum_macros;

use crate::encoding::{ReadBuffer, TagClass, TagHeader};
use crate::encoding::{DatePayload, TimePayload};

/// Render a date as `year/month/day (weekday)`, with `*` for unspecified fields
pub fn format_date(date: &DatePayload) -> String {
    let year_str = match date.year() {
        Some(year) => format!("{}", year),
        None => String::from("*"),
    };
    let month_str = match date.month() {
        13 => String::from("odd"),
        14 => String::from("even"),
        255 => String::from("*"),
        month => format!("{}", month),
    };
    let day_str = match date.day_of_month() {
        32 => String::from("last"),
        255 => String::from("*"),
        day => format!("{}", day),
    };
    let weekday_str = match date.day_of_week() {
        1 => "Mon",
        2 => "Tue",
        3 => "Wed",
        4 => "Thu",
        5 => "Fri",
        6 => "Sat",
        7 => "Sun",
        255 => "*",
        _ => "?",
    };

    format!("{}/{}/{} ({})", year_str, month_str, day_str, weekday_str)
}

/// Render a time as `hh:mm:ss.hh`, with `*` for unspecified fields
pub fn format_time(time: &TimePayload) -> String {
    let field = |value: u8| {
        if value == TimePayload::UNSPECIFIED {
            String::from("*")
        } else {
            format!("{:02}", value)
        }
    };

    format!(
        "{}:{}:{}.{}",
        field(time.hour()),
        field(time.minute()),
        field(time.second()),
        field(time.hundredths())
    )
}

/// Hex dump utility for debugging
pub fn hex_dump(data: &[u8], prefix: &str) -> String {
    let mut result = String::new();

    for (i, chunk) in data.chunks(16).enumerate() {
        let (left, right) = chunk.split_at(chunk.len().min(8));
        let spaced = |bytes: &[u8]| {
            bytes
                .iter()
                .map(|byte| hex::encode_upper([*byte]))
                .collect::<Vec<_>>()
                .join(" ")
        };
        let hex_column = format!("{:<23}  {:<23}", spaced(left), spaced(right));

        let ascii: String = chunk
            .iter()
            .map(|byte| {
                if byte.is_ascii_graphic() || *byte == b' ' {
                    *byte as char
                } else {
                    '.'
                }
            })
            .collect();

        result.push_str(&format!("{}{:04X}: {} |{}|\n", prefix, i * 16, hex_column, ascii));
    }

    result
}

/// List every tag header in `data`, indented by bracket depth.
///
/// Primitive payloads are shown as hex. Decoding stops at the first malformed
/// header, which is reported in the last line.
pub fn describe_tags(data: &[u8]) -> String {
    let mut reader = ReadBuffer::new(data);
    let mut result = String::new();
    let mut depth = 0usize;

    while reader.has_remaining() {
        let offset = reader.position();
        let header = match TagHeader::decode(&mut reader) {
            Ok(header) => header,
            Err(err) => {
                result.push_str(&format!("{:04X}: <{}>\n", offset, err.reason()));
                break;
            }
        };

        if header.is_closing() {
            depth = depth.saturating_sub(1);
        }
        let indent = "  ".repeat(depth);

        if header.is_bracket() {
            result.push_str(&format!("{:04X}: {}{}\n", offset, indent, header));
            if header.is_opening() {
                depth += 1;
            }
            continue;
        }

        let payload_length = match header.tag_class() {
            TagClass::Application if header.tag_number() == 1 => 0,
            _ => header.length() as usize,
        };
        match reader.read_bytes(payload_length) {
            Ok([]) => result.push_str(&format!("{:04X}: {}{}\n", offset, indent, header)),
            Ok(payload) => result.push_str(&format!(
                "{:04X}: {}{} {}\n",
                offset,
                indent,
                header,
                hex::encode_upper(payload)
            )),
            Err(err) => {
                let reason = err.reason();
                result.push_str(&format!("{:04X}: {}{} <{}>\n", offset, indent, header, reason));
                break;
            }
        }
    }

    result
}
