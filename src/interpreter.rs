//! The Smash execution engine.
//!
//! An [`Interpreter`] owns a filtered program, its loop table, a tape of
//! byte cells and a data pointer. Behavior:
//! - The tape is initialized to 0 and has a fixed length (30,000 by default).
//! - The pointer wraps: moving left from cell 0 lands on the last cell and
//!   moving right from the last cell lands on cell 0.
//! - Cells wrap modulo 256.
//! - `h` writes the current cell as one byte; `j` blocks for one value from
//!   the input source and fails when the source is exhausted.
//! - Loops `k`...`l` repeat while the current cell is nonzero. Unmatched
//!   loops are rejected at construction, so a built interpreter always runs.
//!   Open loops are tracked on a heap-allocated stack, so nesting depth is
//!   not limited by the thread's call stack.

use std::io::{self, Read, StdinLock, StdoutLock, Write};

use tracing::{debug, trace};

use crate::error::{ParseError, RuntimeError};
use crate::input::{ByteSource, InputMode, ReadFailure};
use crate::lexer::{self, Command};
use crate::loops::LoopPoints;

/// Tape length used when the caller does not pick one.
pub const DEFAULT_CELLS: usize = 30_000;

/// A validated Smash program bound to its tape and I/O streams.
pub struct Interpreter<R, W> {
    code: String,
    commands: Vec<Command>,
    loop_points: LoopPoints,
    tape: Vec<u8>,
    pointer: usize,
    input: ByteSource<R>,
    output: W,
}

impl<R: Read, W: Write> Interpreter<R, W> {
    /// Filter and validate `source`, reading raw bytes for input commands.
    ///
    /// A `cells` of 0 is treated as 1.
    pub fn new(source: &str, cells: usize, input: R, output: W) -> Result<Self, ParseError> {
        Self::with_input_mode(source, cells, InputMode::Raw, input, output)
    }

    /// Like [`Interpreter::new`] with an explicit input mode.
    pub fn with_input_mode(
        source: &str,
        cells: usize,
        input_mode: InputMode,
        input: R,
        output: W,
    ) -> Result<Self, ParseError> {
        let code = lexer::filter(source);
        let loop_points = LoopPoints::resolve(&code)?;
        let commands: Vec<Command> = code.chars().filter_map(Command::from_char).collect();
        let cells = cells.max(1);

        debug!(
            commands = commands.len(),
            loops = loop_points.len(),
            cells,
            ?input_mode,
            "program validated"
        );

        Ok(Self {
            code,
            commands,
            loop_points,
            tape: vec![0; cells],
            pointer: 0,
            input: ByteSource::new(input, input_mode),
            output,
        })
    }

    /// Run the whole program, then flush the output sink.
    ///
    /// Output produced before a runtime error is still flushed.
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        let result = self.execute();
        let end = self.commands.len();

        match result {
            Ok(()) => {
                self.output
                    .flush()
                    .map_err(|source| RuntimeError::Io { position: end, source })?;
                debug!(pointer = self.pointer, "run finished");
                Ok(())
            }
            Err(err) => {
                let _ = self.output.flush();
                debug!(%err, "run aborted");
                Err(err)
            }
        }
    }

    // Open-loop positions live in `frames`, one per loop currently being
    // executed, so memory follows the program's nesting depth.
    fn execute(&mut self) -> Result<(), RuntimeError> {
        let end = self.commands.len();
        let mut frames: Vec<usize> = Vec::new();
        let mut position = 0;

        while position < end {
            match self.commands[position] {
                Command::MoveRight => {
                    self.pointer = (self.pointer + 1) % self.tape.len();
                }
                Command::MoveLeft => {
                    self.pointer = (self.pointer + self.tape.len() - 1) % self.tape.len();
                }
                Command::Increment => {
                    self.tape[self.pointer] = self.tape[self.pointer].wrapping_add(1);
                }
                Command::Decrement => {
                    self.tape[self.pointer] = self.tape[self.pointer].wrapping_sub(1);
                }
                Command::Output => {
                    let byte = [self.tape[self.pointer]];
                    self.output
                        .write_all(&byte)
                        .map_err(|source| RuntimeError::Io { position, source })?;
                }
                Command::Input => {
                    self.tape[self.pointer] = match self.input.next_value() {
                        Ok(b) => b,
                        Err(ReadFailure::Exhausted) => {
                            return Err(RuntimeError::InputExhausted { position });
                        }
                        Err(ReadFailure::InvalidToken(token)) => {
                            return Err(RuntimeError::InvalidInput { position, token });
                        }
                        Err(ReadFailure::Io(source)) => {
                            return Err(RuntimeError::Io { position, source });
                        }
                    };
                }
                Command::LoopOpen => {
                    if self.tape[self.pointer] != 0 {
                        trace!(open = position, depth = frames.len(), pointer = self.pointer, "enter loop");
                        frames.push(position);
                    } else {
                        position = self
                            .loop_points
                            .close_for(position)
                            .expect("validated loop");
                    }
                }
                Command::LoopClose => {
                    // End of one pass: repeat the body or leave the loop.
                    if let Some(&open) = frames.last() {
                        if self.tape[self.pointer] != 0 {
                            position = open;
                        } else {
                            frames.pop();
                        }
                    }
                }
            }
            position += 1;
        }

        Ok(())
    }

    /// The filtered command stream.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn loop_points(&self) -> &LoopPoints {
        &self.loop_points
    }

    pub fn tape(&self) -> &[u8] {
        &self.tape
    }

    /// Current data pointer.
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn input_mode(&self) -> InputMode {
        self.input.mode()
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl Interpreter<StdinLock<'static>, StdoutLock<'static>> {
    /// Build an interpreter on the process's standard streams.
    pub fn stdio(source: &str, cells: usize, input_mode: InputMode) -> Result<Self, ParseError> {
        Self::with_input_mode(source, cells, input_mode, io::stdin().lock(), io::stdout().lock())
    }
}
