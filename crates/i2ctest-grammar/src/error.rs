use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Syntax error: expecting '{0}'")]
    Expected(char),
    #[error("Out of range [0, 0xff]: {0}")]
    OutOfRange(String),
    #[error("Zero-length buffers are not allowed")]
    ZeroLength,
    #[error("Buffer too long: at most {max} bytes per write")]
    TooLong { max: usize },
    #[error("Syntax error: expecting integer")]
    ExpectedInteger,
    #[error("Read length out of range [1, {max}]: {value}")]
    LengthOutOfRange { value: String, max: usize },
}

/// A line that could not be turned into a command.
///
/// Both variants are recoverable: the console reports them and moves on to
/// the next line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unrecognized command: {0}. Type 'help' for command usage.")]
    Unrecognized(String),
    #[error("{cause}\n{usage}")]
    Usage { cause: ParseError, usage: &'static str },
}
