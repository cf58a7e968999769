//! Position-aware read and write buffers with named scopes for diagnostics.

use std::io::Cursor;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::{EncodingError, Result};

/// Decoder resource limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Maximum number of nested named scopes
    pub max_depth: usize,
    /// Maximum length of a single variable-length payload
    pub max_payload_length: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_depth: 32,
            max_payload_length: 16 * 1024 * 1024,
        }
    }
}

/// Read side of the codec: a cursor over an immutable byte slice.
///
/// Every read checks the remaining length first and fails with a structural error
/// naming the active scope path instead of panicking.
#[derive(Debug, Clone)]
pub struct ReadBuffer<'a> {
    cursor: Cursor<&'a [u8]>,
    contexts: Vec<&'static str>,
    limits: DecodeLimits,
}

impl<'a> ReadBuffer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_limits(data, DecodeLimits::default())
    }

    pub fn with_limits(data: &'a [u8], limits: DecodeLimits) -> Self {
        Self {
            cursor: Cursor::new(data),
            contexts: Vec::new(),
            limits,
        }
    }

    pub fn limits(&self) -> DecodeLimits {
        self.limits
    }

    pub fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }

    pub fn has_remaining(&self) -> bool {
        self.cursor.has_remaining()
    }

    /// Joined names of the active scopes, outermost first
    pub fn path(&self) -> String {
        format_path(&self.contexts)
    }

    pub fn push_context(&mut self, name: &'static str) -> Result<()> {
        if self.contexts.len() >= self.limits.max_depth {
            return Err(self.structural_error(
                self.position(),
                format!(
                    "entering {} exceeds the maximum nesting depth of {}",
                    name, self.limits.max_depth
                ),
            ));
        }
        self.contexts.push(name);
        Ok(())
    }

    pub fn pop_context(&mut self, name: &'static str) -> Result<()> {
        match self.contexts.last() {
            Some(&top) if top == name => {
                self.contexts.pop();
                Ok(())
            }
            Some(&top) => Err(self.structural_error(
                self.position(),
                format!("closing scope {} while {} is open", name, top),
            )),
            None => Err(self.structural_error(
                self.position(),
                format!("closing scope {} with no open scope", name),
            )),
        }
    }

    /// Run `f` speculatively: position and scope depth are restored afterwards,
    /// whatever `f` returns.
    pub fn peek<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let position = self.cursor.position();
        let depth = self.contexts.len();
        let result = f(self);
        self.cursor.set_position(position);
        self.contexts.truncate(depth);
        result
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.cursor.get_u8())
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.ensure(2)?;
        Ok(self.cursor.get_u16())
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.ensure(4)?;
        Ok(self.cursor.get_u32())
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        self.ensure(4)?;
        Ok(self.cursor.get_f32())
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        self.ensure(8)?;
        Ok(self.cursor.get_f64())
    }

    /// Big-endian unsigned integer of `width` octets (1 to 8)
    pub fn read_uint(&mut self, width: usize) -> Result<u64> {
        self.ensure(width)?;
        Ok(self.cursor.get_uint(width))
    }

    /// Big-endian two's complement integer of `width` octets (1 to 8), sign extended
    pub fn read_int(&mut self, width: usize) -> Result<i64> {
        self.ensure(width)?;
        Ok(self.cursor.get_int(width))
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.limits.max_payload_length {
            return Err(self.structural_error(
                self.position(),
                format!(
                    "payload of {} octets exceeds the limit of {}",
                    len, self.limits.max_payload_length
                ),
            ));
        }
        self.ensure(len)?;
        let data: &'a [u8] = *self.cursor.get_ref();
        let start = self.position();
        self.cursor.advance(len);
        Ok(&data[start..start + len])
    }

    fn ensure(&self, len: usize) -> Result<()> {
        if self.remaining() < len {
            return Err(self.structural_error(
                self.position(),
                format!(
                    "buffer underrun: needed {} octets, {} remaining",
                    len,
                    self.remaining()
                ),
            ));
        }
        Ok(())
    }

    pub(crate) fn structural_error(
        &self,
        offset: usize,
        reason: impl Into<String>,
    ) -> EncodingError {
        EncodingError::Structural {
            path: self.path(),
            offset,
            reason: reason.into(),
        }
    }

    pub(crate) fn validation_error(
        &self,
        offset: usize,
        reason: impl Into<String>,
    ) -> EncodingError {
        EncodingError::Validation {
            path: self.path(),
            offset,
            reason: reason.into(),
        }
    }

    pub(crate) fn unmapped_error(&self, offset: usize, reason: impl Into<String>) -> EncodingError {
        EncodingError::UnmappedType {
            path: self.path(),
            offset,
            reason: reason.into(),
        }
    }
}

/// Write side of the codec, growing a [`BytesMut`]
#[derive(Debug, Clone, Default)]
pub struct WriteBuffer {
    buffer: BytesMut,
    contexts: Vec<&'static str>,
}

impl WriteBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
            contexts: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Bytes {
        self.buffer.freeze()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buffer.to_vec()
    }

    pub fn path(&self) -> String {
        format_path(&self.contexts)
    }

    pub fn push_context(&mut self, name: &'static str) -> Result<()> {
        self.contexts.push(name);
        Ok(())
    }

    pub fn pop_context(&mut self, name: &'static str) -> Result<()> {
        match self.contexts.last() {
            Some(&top) if top == name => {
                self.contexts.pop();
                Ok(())
            }
            _ => Err(self.out_of_range_error(format!("closing scope {} that is not open", name))),
        }
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buffer.put_u8(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buffer.put_u16(value);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buffer.put_u32(value);
    }

    pub fn write_f32(&mut self, value: f32) {
        self.buffer.put_f32(value);
    }

    pub fn write_f64(&mut self, value: f64) {
        self.buffer.put_f64(value);
    }

    /// Lowest `width` octets of `value`, big-endian
    pub fn write_uint(&mut self, value: u64, width: usize) {
        self.buffer.put_uint(value, width);
    }

    pub fn write_int(&mut self, value: i64, width: usize) {
        self.buffer.put_int(value, width);
    }

    pub fn write_bytes(&mut self, data: &[u8]) {
        self.buffer.put_slice(data);
    }

    pub(crate) fn out_of_range_error(&self, reason: impl Into<String>) -> EncodingError {
        EncodingError::ValueOutOfRange {
            path: self.path(),
            reason: reason.into(),
        }
    }
}

fn format_path(contexts: &[&'static str]) -> String {
    if contexts.is_empty() {
        "<root>".to_string()
    } else {
        contexts.join("/")
    }
}
