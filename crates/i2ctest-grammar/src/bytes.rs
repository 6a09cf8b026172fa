use std::ops::Deref;

use crate::{Cursor, ParseError};

/// Longest buffer a single write may carry.
pub const MAX_WRITE_LENGTH: usize = 8192;

/// Bytes written to the bus, in the order they were typed.
///
/// Never empty: a buffer can only be built through [`parse_byte_buffer`] or
/// [`ByteBuffer::new`], both of which reject zero-length input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteBuffer(Vec<u8>);

impl ByteBuffer {
    pub fn new(bytes: Vec<u8>) -> Result<Self, ParseError> {
        if bytes.is_empty() {
            return Err(ParseError::ZeroLength);
        }
        Ok(Self(bytes))
    }
}

impl Deref for ByteBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

/// Parse `{ b0 b1 ... bn }` starting at the cursor.
///
/// Bytes are hex with one or more digits each, at most [`MAX_WRITE_LENGTH`]
/// of them. On failure nothing is returned, even if some bytes were already
/// read.
pub fn parse_byte_buffer(cursor: &mut Cursor<'_>) -> Result<ByteBuffer, ParseError> {
    cursor.expect('{')?;

    let mut bytes = Vec::new();
    while let Some(digits) = cursor.hex_digits() {
        // digits are all hex, so the only failure left is overflow
        let byte = u8::from_str_radix(digits, 16)
            .map_err(|_| ParseError::OutOfRange(digits.to_owned()))?;
        bytes.push(byte);
        if bytes.len() > MAX_WRITE_LENGTH {
            return Err(ParseError::TooLong { max: MAX_WRITE_LENGTH });
        }
    }

    if bytes.is_empty() {
        return Err(ParseError::ZeroLength);
    }
    cursor.expect('}')?;
    Ok(ByteBuffer(bytes))
}
