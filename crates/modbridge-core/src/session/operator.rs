//! Line-oriented operator I/O.

use std::io::{BufRead, Stdout, StdinLock, Write};

use crate::errors::{BridgeError, ExError};

/// The human driving the loop
pub trait Operator {
    /// Print one line.
    ///
    /// # Errors
    ///
    /// `ExErrorKind::Io` if the terminal cannot be written.
    fn say(&mut self, line: &str) -> Result<(), ExError>;

    /// Print `prompt` (no newline) and read one line.
    ///
    /// Returns `Ok(None)` once input is exhausted. The returned line has its
    /// line terminator removed and is otherwise verbatim.
    ///
    /// # Errors
    ///
    /// `ExErrorKind::Io` if the terminal cannot be read or written.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>, ExError>;
}

impl<O: Operator + ?Sized> Operator for &mut O {
    fn say(&mut self, line: &str) -> Result<(), ExError> {
        (**self).say(line)
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>, ExError> {
        (**self).ask(prompt)
    }
}

/// Operator on a reader/writer pair: stdin/stdout in the binary, buffers in tests
pub struct ConsoleOperator<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleOperator<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Everything written so far
    pub fn output(&self) -> &W {
        &self.output
    }
}

impl ConsoleOperator<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

fn terminal_error(op: &str, err: std::io::Error) -> ExError {
    BridgeError::Io {
        op: op.to_string(),
        message: err.to_string(),
    }
    .into()
}

impl<R: BufRead, W: Write> Operator for ConsoleOperator<R, W> {
    fn say(&mut self, line: &str) -> Result<(), ExError> {
        writeln!(self.output, "{}", line).map_err(|e| terminal_error("operator_say", e))
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>, ExError> {
        write!(self.output, "{}", prompt).map_err(|e| terminal_error("operator_prompt", e))?;
        self.output
            .flush()
            .map_err(|e| terminal_error("operator_prompt", e))?;

        // Undecodable bytes become U+FFFD and fail choice parsing like any other text
        let mut raw = Vec::new();
        let read = self
            .input
            .read_until(b'\n', &mut raw)
            .map_err(|e| terminal_error("operator_read", e))?;
        if read == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&raw);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}

/// Ask a yes/no question until answered. `Ok(None)` if input ran out first.
///
/// Accepts `y`/`yes`/`s`/`sim` and `n`/`no`/`nao`/`não`, case-insensitively.
///
/// # Errors
///
/// Propagates terminal I/O failures.
pub fn ask_yes_no<O: Operator>(operator: &mut O, question: &str) -> Result<Option<bool>, ExError> {
    operator.say(question)?;
    loop {
        let Some(answer) = operator.ask("Type 'y' for yes or 'n' for no: ")? else {
            return Ok(None);
        };
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" | "s" | "sim" => return Ok(Some(true)),
            "n" | "no" | "nao" | "não" => return Ok(Some(false)),
            _ => operator.say("Invalid answer. Please type 'y' or 'n'.")?,
        }
    }
}
