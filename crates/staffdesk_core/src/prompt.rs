//! Line-oriented prompting seam between operations and the terminal.
//!
//! # Responsibility
//! - Abstract "print a prompt, read one line" so operation flows can run
//!   against a terminal or a scripted input.
//!
//! # Invariants
//! - Returned lines never include the trailing line terminator.
//! - End of input is reported as `Ok(None)`, never as an empty line.

use std::io::{self, BufRead, Write};

/// Prompt/answer channel used by interactive operations.
pub trait Prompter {
    /// Writes `prompt` (without newline) and reads one answer line.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>>;
    /// Writes one full output line.
    fn say(&mut self, line: &str) -> io::Result<()>;
}

/// `Prompter` over any buffered reader and writer.
///
/// Used with stdin/stdout by the binary and with `io::Cursor` + `Vec<u8>` in
/// tests.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.output.write_all(prompt.as_bytes())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }
}
