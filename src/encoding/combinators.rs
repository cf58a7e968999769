//! Sequence, array and optional-field combinators.
//!
//! BACnet collections carry no count prefix: a list inside brackets runs until the
//! matching closing tag, and an optional field is present when the next header says
//! so. These helpers express both with the non-consuming presence tests.

use super::bracket::{is_closing_tag, is_context_tag};
use super::buffer::ReadBuffer;
use super::context::{ContextTagValue, DataType};
use super::Result;

/// Decode elements until the closing tag `closing_tag_number` is next.
///
/// The closing tag itself is left in the buffer. Zero elements is valid; reaching the
/// end of data first is a structural error, and so is an element that consumes nothing.
pub fn read_terminated<'a, T>(
    reader: &mut ReadBuffer<'a>,
    closing_tag_number: u8,
    mut element: impl FnMut(&mut ReadBuffer<'a>) -> Result<T>,
) -> Result<Vec<T>> {
    let mut elements = Vec::new();
    while !is_closing_tag(reader, closing_tag_number) {
        let start = reader.position();
        if !reader.has_remaining() {
            let reason = format!(
                "opening tag {} is never closed before the end of data",
                closing_tag_number
            );
            return Err(reader.structural_error(start, reason));
        }
        elements.push(element(reader)?);
        if reader.position() == start {
            return Err(reader.structural_error(
                start,
                format!("element consumed no octets before closing tag {}", closing_tag_number),
            ));
        }
    }
    log::trace!("{} elements before closing tag {}", elements.len(), closing_tag_number);
    Ok(elements)
}

/// Decode exactly `count` elements
pub fn read_counted<'a, T>(
    reader: &mut ReadBuffer<'a>,
    count: usize,
    mut element: impl FnMut(&mut ReadBuffer<'a>) -> Result<T>,
) -> Result<Vec<T>> {
    let mut elements = Vec::with_capacity(count.min(reader.remaining()));
    for _ in 0..count {
        elements.push(element(reader)?);
    }
    Ok(elements)
}

/// Decode an element when `present` holds, consuming nothing otherwise
pub fn read_optional<'a, T>(
    reader: &mut ReadBuffer<'a>,
    present: bool,
    element: impl FnOnce(&mut ReadBuffer<'a>) -> Result<T>,
) -> Result<Option<T>> {
    if present {
        element(reader).map(Some)
    } else {
        Ok(None)
    }
}

/// Decode context tag `tag_number` if it is next
pub fn read_optional_context(
    reader: &mut ReadBuffer<'_>,
    tag_number: u8,
    data_type: DataType,
) -> Result<Option<ContextTagValue>> {
    let present = is_context_tag(reader, tag_number);
    read_optional(reader, present, |r| ContextTagValue::decode(r, tag_number, data_type))
}
