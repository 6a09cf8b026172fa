use std::io::{BufRead, Write};

use i2ctest_grammar::parse_command;
use log::debug;

use crate::{execute, format_info, format_outcome, BusHandle, Command, SessionError};

pub const BANNER: &str = "  Type 'help' for a list of commands";

pub const HELP: &str = "Commands:
 > write { 00 11 22 .. FF }         Write supplied buffer
 > read N                           Read N bytes
 > writeread { 00 11 .. FF } N      Write buffer, restart, read N bytes
 > info                             Display device information
 > help                             Display this help message
 > quit                             Quit
";

const PROMPT: &str = "> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Interactive console bound to one bus handle for its whole lifetime.
pub struct Session<'a, B: BusHandle + ?Sized> {
    bus: &'a mut B,
}

impl<'a, B: BusHandle + ?Sized> Session<'a, B> {
    pub fn new(bus: &'a mut B) -> Self {
        Self { bus }
    }

    /// Prompt, read and dispatch lines until `quit` or end of input.
    ///
    /// Parse errors are printed and the loop goes on. Engine and bus errors
    /// end the session and are returned.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        output: &mut W,
    ) -> Result<(), SessionError> {
        let mut line = String::new();
        loop {
            output.write_all(PROMPT.as_bytes())?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                debug!("end of input");
                return Ok(());
            }

            if self.dispatch(line.trim_end_matches(['\r', '\n']), output)? == Flow::Quit {
                return Ok(());
            }
        }
    }

    fn dispatch<W: Write>(&mut self, line: &str, output: &mut W) -> Result<Flow, SessionError> {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(output, "{err}")?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Empty => {}
            Command::Help => output.write_all(HELP.as_bytes())?,
            Command::Info => writeln!(output, "{}", format_info(self.bus.connection_info()))?,
            Command::Transfer(kind) => {
                let outcome = execute(&kind, &mut *self.bus)?;
                let text = format_outcome(&kind, &outcome);
                if !text.is_empty() {
                    writeln!(output, "{text}")?;
                }
            }
        }
        Ok(Flow::Continue)
    }
}
