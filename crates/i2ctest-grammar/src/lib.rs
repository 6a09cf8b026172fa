//! Console grammar: byte buffers, read lengths and command lines.

pub mod bytes;
pub mod command;
pub mod cursor;
pub mod error;

pub use bytes::{parse_byte_buffer, ByteBuffer, MAX_WRITE_LENGTH};
pub use command::{parse_command, Command, TransferKind, MAX_READ_LENGTH};
pub use cursor::Cursor;
pub use error::{CommandError, ParseError};
