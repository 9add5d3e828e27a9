use std::io::{self, Write};

use crate::error::{Error, RuntimeError};

/// Pretty-print a parse or runtime failure with caret positioning.
/// `code` is the filtered command stream the error position refers to.
/// If `program` is `Some("smash")`, messages are prefixed with "smash: ...".
pub fn print_error(program: Option<&str>, code: &str, err: &Error) {
    let msg = error_message(err);
    let msg = match program {
        Some(p) => format!("{p}: {msg}"),
        None => msg,
    };
    print_error_with_context(&msg, code, error_position(err));
}

/// One-line description of `err`, without its position.
pub fn error_message(err: &Error) -> String {
    match err {
        Error::Parse(e) => format!("unmatched '{}' found", e.symbol()),
        Error::Runtime(RuntimeError::InputExhausted { .. }) => {
            "input exhausted".to_string()
        }
        Error::Runtime(RuntimeError::InvalidInput { token, .. }) => {
            format!("invalid input '{token}'")
        }
        Error::Runtime(RuntimeError::Io { source, .. }) => format!("I/O error: {source}"),
    }
}

fn error_position(err: &Error) -> usize {
    match err {
        Error::Parse(e) => e.position(),
        Error::Runtime(e) => e.position(),
    }
}

/// Print a concise error with its position and a caret context window.
pub fn print_error_with_context(prefix: &str, code: &str, pos: usize) {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    let _ = write_error_with_context(&mut out, prefix, code, pos);
    let _ = out.flush();
}

/// Render the message line, a window of `code` around `pos`, and a caret
/// under `pos`. The code is command letters only, so byte and char indices agree.
pub fn write_error_with_context<W: Write>(
    out: &mut W,
    prefix: &str,
    code: &str,
    pos: usize,
) -> io::Result<()> {
    writeln!(out, "{prefix} at position {pos}")?;

    if code.is_empty() {
        return Ok(());
    }

    // Show a short window around the position for context
    const WINDOW_CHARS: usize = 32;

    let start = pos.saturating_sub(WINDOW_CHARS);
    let end = (pos + WINDOW_CHARS + 1).min(code.len());
    let slice = code.get(start..end).unwrap_or_default();

    writeln!(out, "  {slice}")?;
    writeln!(out, "  {}^", " ".repeat(pos.saturating_sub(start)))
}
