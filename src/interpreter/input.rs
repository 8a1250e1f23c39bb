use std::collections::VecDeque;
use std::io::{self, BufRead};

use log::debug;

use crate::config::interpreter::INTEGER_TOKEN;

/// Whitespace-delimited integer reader over a line-oriented source.
pub struct InputReader<R> {
    source: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> InputReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            pending: VecDeque::new(),
        }
    }

    /// Next integer token, or `None` if the source is exhausted or the token
    /// is not an integer. A bad token also drops the rest of its line.
    pub fn read_integer(&mut self) -> io::Result<Option<i64>> {
        let Some(token) = self.next_token()? else {
            debug!("input exhausted");
            return Ok(None);
        };
        let value = if INTEGER_TOKEN.is_match(&token) {
            token.parse::<i64>().ok()
        } else {
            None
        };
        if value.is_none() {
            debug!("malformed input token {:?}, discarding {} more", token, self.pending.len());
            self.pending.clear();
        }
        Ok(value)
    }

    fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            // a line that is not UTF-8 becomes a malformed token, not an I/O error
            let mut line = Vec::new();
            if self.source.read_until(b'\n', &mut line)? == 0 {
                return Ok(None);
            }
            let line = String::from_utf8_lossy(&line);
            self.pending.extend(line.split_whitespace().map(str::to_string));
        }
    }

    pub fn into_inner(self) -> R {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_across_lines() {
        let mut reader = InputReader::new("1 2\n\n  -3\n+4".as_bytes());
        assert_eq!(reader.read_integer().unwrap(), Some(1));
        assert_eq!(reader.read_integer().unwrap(), Some(2));
        assert_eq!(reader.read_integer().unwrap(), Some(-3));
        assert_eq!(reader.read_integer().unwrap(), Some(4));
        assert_eq!(reader.read_integer().unwrap(), None);
    }

    #[test]
    fn test_bad_token_discards_line() {
        let mut reader = InputReader::new("12x 5 6\n7\n".as_bytes());
        assert_eq!(reader.read_integer().unwrap(), None);
        assert_eq!(reader.read_integer().unwrap(), Some(7));
    }

    #[test]
    fn test_invalid_utf8_is_a_bad_token() {
        let mut reader = InputReader::new(&b"\xff 3\n7\n"[..]);
        assert_eq!(reader.read_integer().unwrap(), None);
        assert_eq!(reader.read_integer().unwrap(), Some(7));
    }

    #[test]
    fn test_out_of_range() {
        let mut reader = InputReader::new("99999999999999999999\n".as_bytes());
        assert_eq!(reader.read_integer().unwrap(), None);
    }
}
