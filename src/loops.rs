use std::collections::BTreeMap;

use crate::error::ParseError;
use crate::lexer::Command;

/// Matching `l` position for every `k` in a filtered program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopPoints {
    closes: BTreeMap<usize, usize>,
}

impl LoopPoints {
    /// Match brackets in an already-filtered command stream.
    ///
    /// Loops must nest: the most recent unmatched `k` is the one an `l`
    /// closes. An `l` with nothing open fails at that `l`; anything still
    /// open at the end fails at the innermost open `k`.
    pub fn resolve(code: &str) -> Result<Self, ParseError> {
        let mut closes = BTreeMap::new();
        let mut stack: Vec<usize> = Vec::new();

        for (i, c) in code.chars().enumerate() {
            match Command::from_char(c) {
                Some(Command::LoopOpen) => stack.push(i),
                Some(Command::LoopClose) => {
                    let Some(open) = stack.pop() else {
                        return Err(ParseError::UnmatchedClose { position: i });
                    };
                    closes.insert(open, i);
                }
                _ => {}
            }
        }

        if let Some(&open) = stack.last() {
            return Err(ParseError::UnmatchedOpen { position: open });
        }

        Ok(Self { closes })
    }

    /// Position of the `l` matching the `k` at `open`.
    pub fn close_for(&self, open: usize) -> Option<usize> {
        self.closes.get(&open).copied()
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// `(open, close)` pairs in ascending order of `open`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.closes.iter().map(|(&open, &close)| (open, close))
    }
}
