use crate::{parse_byte_buffer, ByteBuffer, CommandError, Cursor, ParseError};

/// Largest read a single command may request.
pub const MAX_READ_LENGTH: usize = 8192;

pub const WRITE_USAGE: &str = "Usage: write { 55 a0 ... ff }";
pub const READ_USAGE: &str = "Usage: read 4";
pub const WRITE_READ_USAGE: &str = "Usage: writeread { 55 a0 ... ff } 4";

/// One bus transaction, with the operands it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferKind {
    Write(ByteBuffer),
    Read(usize),
    /// Write, repeated start, then read; the bus is held throughout.
    WriteRead(ByteBuffer, usize),
}

impl TransferKind {
    pub fn write_len(&self) -> usize {
        match self {
            Self::Write(bytes) | Self::WriteRead(bytes, _) => bytes.len(),
            Self::Read(_) => 0,
        }
    }

    pub fn read_len(&self) -> usize {
        match self {
            Self::Read(len) | Self::WriteRead(_, len) => *len,
            Self::Write(_) => 0,
        }
    }

    /// Bytes the whole transaction moves when nothing is cut short.
    pub fn requested_len(&self) -> usize {
        self.write_len() + self.read_len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Transfer(TransferKind),
    Info,
    Help,
    Quit,
    /// Blank line.
    Empty,
}

/// Parse one console line.
///
/// The command word is case-sensitive. Anything after a complete command is
/// ignored.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut cursor = Cursor::new(line);
    let Some(name) = cursor.word() else {
        return Ok(Command::Empty);
    };

    let command = match name {
        "q" | "quit" => Command::Quit,
        "h" | "help" => Command::Help,
        "info" => Command::Info,
        "write" => {
            let bytes = parse_byte_buffer(&mut cursor).map_err(usage(WRITE_USAGE))?;
            Command::Transfer(TransferKind::Write(bytes))
        }
        "read" => {
            let len = parse_read_length(&mut cursor).map_err(usage(READ_USAGE))?;
            Command::Transfer(TransferKind::Read(len))
        }
        "writeread" => {
            let bytes = parse_byte_buffer(&mut cursor).map_err(usage(WRITE_READ_USAGE))?;
            let len = parse_read_length(&mut cursor).map_err(usage(WRITE_READ_USAGE))?;
            Command::Transfer(TransferKind::WriteRead(bytes, len))
        }
        other => return Err(CommandError::Unrecognized(other.to_owned())),
    };
    Ok(command)
}

fn usage(usage: &'static str) -> impl Fn(ParseError) -> CommandError {
    move |cause| CommandError::Usage { cause, usage }
}

/// Decimal byte count in `1..=MAX_READ_LENGTH`.
pub fn parse_read_length(cursor: &mut Cursor<'_>) -> Result<usize, ParseError> {
    let digits = cursor.decimal_digits()?;
    let out_of_range = || ParseError::LengthOutOfRange {
        value: digits.to_owned(),
        max: MAX_READ_LENGTH,
    };
    let len: usize = digits.parse().map_err(|_| out_of_range())?;
    if len == 0 || len > MAX_READ_LENGTH {
        return Err(out_of_range());
    }
    Ok(len)
}
