//! The line-oriented console loop.
//!
//! `Repl` is generic over its input and output so the same loop runs
//! against stdin/stdout in the binary and against in-memory buffers
//! in tests.

use std::io::{self, BufRead, Write};

use crate::CoreError;
use crate::command::{COMMAND_SUMMARY, Command};
use crate::editor::{Editor, Outcome};

/// Reads commands line by line and runs them against an `Editor`.
pub struct Repl<R, W> {
    editor: Editor,
    input: R,
    output: W,
    /// Shown once, after the banner and before the first prompt
    greeting: Option<Outcome>,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    /// Creates a loop over the given editor and console streams.
    pub fn new(editor: Editor, input: R, output: W) -> Self {
        Self {
            editor,
            input,
            output,
            greeting: None,
        }
    }

    /// Reports the result of work done before the loop started, such as
    /// opening the file named on the command line.
    pub fn with_greeting(mut self, outcome: Outcome) -> Self {
        self.greeting = Some(outcome);
        self
    }

    /// Runs until `quit` or end of input.
    ///
    /// Command errors are printed and the loop continues. Only failures
    /// to read from or write to the console are returned.
    pub fn run(&mut self) -> io::Result<()> {
        if self.editor.config().repl.banner {
            writeln!(self.output, "Welcome to stackpad.")?;
            writeln!(self.output, "{COMMAND_SUMMARY}")?;
        }
        if let Some(outcome) = self.greeting.take() {
            writeln!(self.output, "{outcome}")?;
        }

        let mut line = String::new();
        while !self.editor.should_quit() {
            write!(self.output, "{}", self.editor.config().repl.prompt)?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                tracing::debug!("End of input");
                break;
            }

            self.step(&line)?;
        }

        self.output.flush()
    }

    /// Parses and executes a single line.
    fn step(&mut self, line: &str) -> io::Result<()> {
        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(()),
            Err(e) => return self.report(&e),
        };

        match self.editor.execute(&command) {
            Ok(outcome) => {
                let message = outcome.render(self.editor.config().repl.echo_text);
                if !message.is_empty() {
                    writeln!(self.output, "{message}")?;
                }
                Ok(())
            }
            Err(e) => self.report(&e),
        }
    }

    fn report(&mut self, error: &CoreError) -> io::Result<()> {
        if error.is_informational() {
            tracing::debug!("{}", error);
        } else {
            tracing::warn!("{}", error);
        }
        writeln!(self.output, "{error}")
    }

    /// Consumes the loop, returning the editor and the output stream.
    pub fn into_parts(self) -> (Editor, W) {
        (self.editor, self.output)
    }
}
