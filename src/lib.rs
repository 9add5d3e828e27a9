//! An interpreter for Smash, a Brainfuck dialect written with home-row letters.
//!
//! | Letter | Meaning                         |
//! |--------|---------------------------------|
//! | `a`    | move the pointer right          |
//! | `s`    | move the pointer left           |
//! | `d`    | increment the current cell      |
//! | `f`    | decrement the current cell      |
//! | `h`    | output the current cell         |
//! | `j`    | read one byte into the cell     |
//! | `k`    | start a loop (skip if cell = 0) |
//! | `l`    | end a loop                      |
//!
//! Every other character is a comment. The tape is circular (30,000 cells by
//! default) and cells wrap modulo 256.
//!
//! Quick start:
//!
//! ```no_run
//! use smash::Interpreter;
//!
//! // Prints "A": 65 = 5 * 13
//! let code = "ddddd k f a ddddddddddddd s l a h";
//! let mut smash = Interpreter::new(code, 30_000, std::io::stdin(), std::io::stdout())
//!     .expect("loops are balanced");
//! smash.run().expect("program should run");
//! ```

pub mod cli_util;
pub mod config;
pub mod error;
pub mod input;
pub mod interpreter;
pub mod lexer;
pub mod loops;

use std::io::{Read, Write};

pub use error::{Error, ParseError, RuntimeError, UnmatchedBracketKind};
pub use input::InputMode;
pub use interpreter::{DEFAULT_CELLS, Interpreter};
pub use lexer::{Command, filter};
pub use loops::LoopPoints;

/// Validate and run `source` in one step.
pub fn run<R: Read, W: Write>(
    source: &str,
    cells: usize,
    input_mode: InputMode,
    input: R,
    output: W,
) -> Result<(), Error> {
    let mut smash = Interpreter::with_input_mode(source, cells, input_mode, input, output)?;
    smash.run()?;
    Ok(())
}
