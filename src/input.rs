use std::io::{self, ErrorKind, Read};
use std::str::FromStr;

/// How input commands turn the input stream into cell values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Each input command consumes one raw byte.
    #[default]
    Raw,
    /// Input is whitespace-separated signed bytes (`-128..=127`), one per
    /// input command. Negative values are stored as two's complement.
    Decimal,
}

impl FromStr for InputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" | "bytes" => Ok(InputMode::Raw),
            "decimal" | "dec" => Ok(InputMode::Decimal),
            other => Err(format!("unknown input mode '{other}' (expected raw or decimal)")),
        }
    }
}

/// Why a value could not be read.
#[derive(Debug)]
pub enum ReadFailure {
    Exhausted,
    InvalidToken(String),
    Io(io::Error),
}

/// A blocking source of cell values pulled one at a time.
pub struct ByteSource<R> {
    reader: R,
    mode: InputMode,
}

impl<R: Read> ByteSource<R> {
    pub fn new(reader: R, mode: InputMode) -> Self {
        Self { reader, mode }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Block until the next value is available.
    pub fn next_value(&mut self) -> Result<u8, ReadFailure> {
        match self.mode {
            InputMode::Raw => self.next_byte()?.ok_or(ReadFailure::Exhausted),
            InputMode::Decimal => self.next_decimal(),
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>, ReadFailure> {
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(ReadFailure::Io(e)),
            }
        }
    }

    // Reads byte by byte so nothing past the token's trailing delimiter is consumed.
    fn next_decimal(&mut self) -> Result<u8, ReadFailure> {
        let mut token = Vec::new();
        while let Some(b) = self.next_byte()? {
            if b.is_ascii_whitespace() {
                if token.is_empty() {
                    continue;
                }
                break;
            }
            token.push(b);
        }

        if token.is_empty() {
            return Err(ReadFailure::Exhausted);
        }

        let token = String::from_utf8_lossy(&token).into_owned();
        match token.parse::<i8>() {
            Ok(v) => Ok(v as u8),
            Err(_) => Err(ReadFailure::InvalidToken(token)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn raw_mode_reads_single_bytes_then_exhausts() {
        let mut src = ByteSource::new(Cursor::new(b"Hi".to_vec()), InputMode::Raw);
        assert_eq!(src.next_value().unwrap(), b'H');
        assert_eq!(src.next_value().unwrap(), b'i');
        assert!(matches!(src.next_value(), Err(ReadFailure::Exhausted)));
    }

    #[test]
    fn decimal_mode_reads_tokens() {
        let mut src = ByteSource::new(Cursor::new(b"  72\n105 -1\t0".to_vec()), InputMode::Decimal);
        assert_eq!(src.next_value().unwrap(), 72);
        assert_eq!(src.next_value().unwrap(), 105);
        assert_eq!(src.next_value().unwrap(), 255);
        assert_eq!(src.next_value().unwrap(), 0);
        assert!(matches!(src.next_value(), Err(ReadFailure::Exhausted)));
    }

    #[test]
    fn decimal_mode_rejects_out_of_range_and_garbage() {
        let mut src =
            ByteSource::new(Cursor::new(b"128 -129 200 x1 127 -128".to_vec()), InputMode::Decimal);
        assert!(matches!(src.next_value(), Err(ReadFailure::InvalidToken(t)) if t == "128"));
        assert!(matches!(src.next_value(), Err(ReadFailure::InvalidToken(t)) if t == "-129"));
        assert!(matches!(src.next_value(), Err(ReadFailure::InvalidToken(t)) if t == "200"));
        assert!(matches!(src.next_value(), Err(ReadFailure::InvalidToken(t)) if t == "x1"));
        assert_eq!(src.next_value().unwrap(), 127);
        assert_eq!(src.next_value().unwrap(), 128);
    }

    #[test]
    fn decimal_mode_whitespace_only_is_exhausted() {
        let mut src = ByteSource::new(Cursor::new(b" \n\t ".to_vec()), InputMode::Decimal);
        assert!(matches!(src.next_value(), Err(ReadFailure::Exhausted)));
    }

    #[test]
    fn parses_mode_names() {
        assert_eq!("raw".parse::<InputMode>(), Ok(InputMode::Raw));
        assert_eq!(" Decimal ".parse::<InputMode>(), Ok(InputMode::Decimal));
        assert!("hex".parse::<InputMode>().is_err());
    }
}
