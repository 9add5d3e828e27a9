//! Source filtering.
//!
//! Smash recognizes eight letters. Everything else in a source file,
//! whitespace included, is a comment and is dropped before validation.

/// One recognized command letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `a`
    MoveRight,
    /// `s`
    MoveLeft,
    /// `d`
    Increment,
    /// `f`
    Decrement,
    /// `h`
    Output,
    /// `j`
    Input,
    /// `k`
    LoopOpen,
    /// `l`
    LoopClose,
}

impl Command {
    pub fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'a' => Command::MoveRight,
            's' => Command::MoveLeft,
            'd' => Command::Increment,
            'f' => Command::Decrement,
            'h' => Command::Output,
            'j' => Command::Input,
            'k' => Command::LoopOpen,
            'l' => Command::LoopClose,
            _ => return None,
        })
    }

    pub fn symbol(self) -> char {
        match self {
            Command::MoveRight => 'a',
            Command::MoveLeft => 's',
            Command::Increment => 'd',
            Command::Decrement => 'f',
            Command::Output => 'h',
            Command::Input => 'j',
            Command::LoopOpen => 'k',
            Command::LoopClose => 'l',
        }
    }
}

/// Keep only command letters, in order.
pub fn filter(source: &str) -> String {
    source
        .chars()
        .filter(|&c| Command::from_char(c).is_some())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_comments_and_whitespace() {
        assert_eq!(filter("d d\nd # add three\th"), "dddh");
    }

    #[test]
    fn uppercase_letters_are_comments() {
        assert_eq!(filter("ASDFHJKL asdfhjkl"), "asdfhjkl");
    }

    #[test]
    fn empty_source_yields_empty_stream() {
        assert_eq!(filter(""), "");
        assert_eq!(filter("no commands? yes: 'bcegimnopqrtuvwxyz'"), "");
    }

    #[test]
    fn letters_round_trip_through_command() {
        for c in "asdfhjkl".chars() {
            let cmd = Command::from_char(c).expect("command letter");
            assert_eq!(cmd.symbol(), c);
        }
        assert_eq!(Command::from_char('+'), None);
    }

    proptest! {
        #[test]
        fn filtering_is_idempotent(source in ".*") {
            let once = filter(&source);
            prop_assert_eq!(filter(&once), once.clone());
            prop_assert!(once.chars().all(|c| Command::from_char(c).is_some()));
        }
    }
}
