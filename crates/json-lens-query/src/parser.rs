//! Dot-path parser.
//!
//! The grammar is the member-access subset of jq's path syntax: a leading
//! `.` (which alone selects the whole document), identifier segments
//! (`.a.b`), and bracketed integer indexes (`[0]`, `.items[-1]`, `.[2]`).

use crate::types::{QueryError, Step};

/// Dot-path parser.
pub struct PathParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> PathParser<'a> {
    /// Parse a path expression into its steps.
    pub fn parse(input: &'a str) -> Result<Vec<Step>, QueryError> {
        let mut parser = Self { input, pos: 0 };
        parser.parse_path()
    }

    fn parse_path(&mut self) -> Result<Vec<Step>, QueryError> {
        if self.peek() != Some('.') {
            return Err(self.invalid("path must start with '.'"));
        }
        self.advance();

        let mut steps = Vec::new();
        while let Some(c) = self.peek() {
            match c {
                '.' => {
                    self.advance();
                    match self.peek() {
                        Some('[') => {}
                        Some(c) if is_identifier_char(c) => {}
                        _ => return Err(self.invalid("expected member name after '.'")),
                    }
                }
                '[' => steps.push(self.parse_index()?),
                c if is_identifier_char(c) => steps.push(Step::Member(self.parse_identifier())),
                c => return Err(self.invalid(&format!("unexpected character '{c}'"))),
            }
        }
        Ok(steps)
    }

    fn parse_identifier(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !is_identifier_char(c) {
                break;
            }
            self.advance();
        }
        self.input[start..self.pos].to_string()
    }

    fn parse_index(&mut self) -> Result<Step, QueryError> {
        self.advance(); // consume '['
        let start = self.pos;
        if self.peek() == Some('-') {
            self.advance();
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }
        let digits = &self.input[start..self.pos];
        if digits.is_empty() || digits == "-" {
            return Err(self.invalid("expected integer index inside '[ ]'"));
        }
        if self.peek() != Some(']') {
            return Err(self.invalid("unclosed index selector"));
        }
        self.advance(); // consume ']'
        let index: isize = digits
            .parse()
            .map_err(|_| self.invalid(&format!("index '{digits}' out of range")))?;
        Ok(Step::Index(index))
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn invalid(&self, message: &str) -> QueryError {
        QueryError::InvalidPath(format!("{message} (at offset {})", self.pos))
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}
