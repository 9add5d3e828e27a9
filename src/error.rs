use std::fmt;

use crate::lexer::Command;

/// Which side of a loop was left without a partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmatchedBracketKind {
    Open,
    Close,
}

impl UnmatchedBracketKind {
    /// The command letter for this side of the loop.
    pub fn symbol(self) -> char {
        match self {
            UnmatchedBracketKind::Open => Command::LoopOpen.symbol(),
            UnmatchedBracketKind::Close => Command::LoopClose.symbol(),
        }
    }
}

impl fmt::Display for UnmatchedBracketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.symbol())
    }
}

/// Errors raised while validating a program, before anything executes.
///
/// Positions are zero-based indices into the filtered command stream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A `k` was never closed. Reports the innermost one still open.
    #[error("Unmatched 'k' found at position {position}")]
    UnmatchedOpen { position: usize },

    /// An `l` appeared with no `k` left to close.
    #[error("Unmatched 'l' found at position {position}")]
    UnmatchedClose { position: usize },
}

impl ParseError {
    pub fn kind(&self) -> UnmatchedBracketKind {
        match self {
            ParseError::UnmatchedOpen { .. } => UnmatchedBracketKind::Open,
            ParseError::UnmatchedClose { .. } => UnmatchedBracketKind::Close,
        }
    }

    /// The offending bracket letter.
    pub fn symbol(&self) -> char {
        self.kind().symbol()
    }

    pub fn position(&self) -> usize {
        match self {
            ParseError::UnmatchedOpen { position } | ParseError::UnmatchedClose { position } => {
                *position
            }
        }
    }
}

/// Errors that abort a run in progress.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// An input command ran after the input source was exhausted.
    #[error("Input exhausted at instruction {position}")]
    InputExhausted { position: usize },

    /// Decimal input mode read a token that is not a byte value.
    #[error("Invalid input '{token}' at instruction {position}")]
    InvalidInput { position: usize, token: String },

    /// Reading input or writing output failed.
    #[error("I/O error at instruction {position}: {source}")]
    Io {
        position: usize,
        #[source]
        source: std::io::Error,
    },
}

impl RuntimeError {
    /// Position in the command stream of the command that failed.
    pub fn position(&self) -> usize {
        match self {
            RuntimeError::InputExhausted { position }
            | RuntimeError::InvalidInput { position, .. }
            | RuntimeError::Io { position, .. } => *position,
        }
    }
}

/// Either phase's failure, for callers that build and run in one go.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_reports_symbol_and_position() {
        let open = ParseError::UnmatchedOpen { position: 4 };
        assert_eq!(open.symbol(), 'k');
        assert_eq!(open.position(), 4);
        assert_eq!(open.to_string(), "Unmatched 'k' found at position 4");

        let close = ParseError::UnmatchedClose { position: 0 };
        assert_eq!(close.symbol(), 'l');
        assert_eq!(close.kind(), UnmatchedBracketKind::Close);
        assert_eq!(close.kind().to_string(), "'l'");
    }

    #[test]
    fn error_wraps_both_phases() {
        let err: Error = ParseError::UnmatchedClose { position: 2 }.into();
        assert!(err.to_string().starts_with("Parse error"));

        let err: Error = RuntimeError::InputExhausted { position: 7 }.into();
        assert_eq!(err.to_string(), "Runtime error: Input exhausted at instruction 7");
    }
}
