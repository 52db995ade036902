//! Tolerant JavaScript-object-literal parsing.
//!
//! Player pages embed configuration as JS object literals rather than strict
//! JSON: keys are usually unquoted, strings single-quoted, and trailing
//! commas common. This module locates a `key: { ... }` fragment inside a
//! larger script block with explicit depth tracking (string-aware, so braces
//! and commas inside nested values don't truncate the fragment) and parses
//! the fragment into a `serde_json::Value`.

use serde_json::{Map, Number, Value};

use super::error::ExtractorError;

/// Finds the object literal assigned to `key` inside `source` and returns
/// the `{ ... }` slice including both braces.
///
/// Matches `key : {` at an identifier boundary, then scans to the balanced
/// closing brace, skipping over string literals. Returns `None` if the key
/// is absent or its braces never balance.
pub fn find_object_value<'a>(source: &'a str, key: &str) -> Option<&'a str> {
    let bytes = source.as_bytes();
    let mut search_from = 0;

    while let Some(rel) = source[search_from..].find(key) {
        let start = search_from + rel;
        search_from = start + key.len();

        // Key must stand alone, not be the tail of a longer identifier.
        if start > 0 {
            let prev = bytes[start - 1];
            if prev.is_ascii_alphanumeric() || prev == b'_' || prev == b'$' {
                continue;
            }
        }

        let mut pos = start + key.len();
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos >= bytes.len() || bytes[pos] != b':' {
            continue;
        }
        pos += 1;
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos >= bytes.len() || bytes[pos] != b'{' {
            continue;
        }

        if let Some(end) = scan_balanced(source, pos) {
            return Some(&source[pos..end]);
        }
    }

    None
}

/// Scans from an opening `{` at `open` to just past its matching `}`.
fn scan_balanced(source: &str, open: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut depth = 0usize;
    let mut pos = open;

    while pos < bytes.len() {
        match bytes[pos] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(pos + 1);
                }
            }
            quote @ (b'"' | b'\'') => {
                pos += 1;
                while pos < bytes.len() && bytes[pos] != quote {
                    if bytes[pos] == b'\\' {
                        pos += 1;
                    }
                    pos += 1;
                }
                if pos >= bytes.len() {
                    return None;
                }
            }
            _ => {}
        }
        pos += 1;
    }

    None
}

/// Parses a relaxed JS object literal into a `serde_json::Value`.
///
/// Accepted beyond strict JSON: unquoted keys, single-quoted strings, and
/// trailing commas. Anything else malformed is an error.
pub fn parse_js_object(input: &str) -> Result<Value, ExtractorError> {
    let mut parser = Parser {
        source: input,
        bytes: input.as_bytes(),
        pos: 0,
    };
    parser.skip_whitespace();
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    if parser.pos != parser.bytes.len() {
        return Err(parser.error("trailing characters after value"));
    }
    Ok(value)
}

struct Parser<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, message: &str) -> ExtractorError {
        ExtractorError::JsObjectError(format!("{} at offset {}", message, self.pos))
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn expect(&mut self, byte: u8) -> Result<(), ExtractorError> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", byte as char)))
        }
    }

    fn parse_value(&mut self) -> Result<Value, ExtractorError> {
        match self.peek() {
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b'"') | Some(b'\'') => Ok(Value::String(self.parse_string()?)),
            Some(c) if c == b'-' || c.is_ascii_digit() => self.parse_number(),
            Some(_) => self.parse_keyword(),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_object(&mut self) -> Result<Value, ExtractorError> {
        self.expect(b'{')?;
        let mut map = Map::new();

        loop {
            self.skip_whitespace();
            if self.peek() == Some(b'}') {
                self.pos += 1;
                return Ok(Value::Object(map));
            }

            let key = self.parse_key()?;
            self.skip_whitespace();
            self.expect(b':')?;
            self.skip_whitespace();
            let value = self.parse_value()?;
            map.insert(key, value);

            self.skip_whitespace();
            match self.peek() {
                // Trailing comma before '}' is handled by the loop head.
                Some(b',') => self.pos += 1,
                Some(b'}') => {}
                _ => return Err(self.error("expected ',' or '}' in object")),
            }
        }
    }

    fn parse_array(&mut self) -> Result<Value, ExtractorError> {
        self.expect(b'[')?;
        let mut items = Vec::new();

        loop {
            self.skip_whitespace();
            if self.peek() == Some(b']') {
                self.pos += 1;
                return Ok(Value::Array(items));
            }

            items.push(self.parse_value()?);

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {}
                _ => return Err(self.error("expected ',' or ']' in array")),
            }
        }
    }

    fn parse_key(&mut self) -> Result<String, ExtractorError> {
        match self.peek() {
            Some(b'"') | Some(b'\'') => self.parse_string(),
            Some(c) if c.is_ascii_alphabetic() || c == b'_' || c == b'$' => {
                let start = self.pos;
                while let Some(c) = self.peek() {
                    if c.is_ascii_alphanumeric() || c == b'_' || c == b'$' {
                        self.pos += 1;
                    } else {
                        break;
                    }
                }
                Ok(self.source[start..self.pos].to_string())
            }
            _ => Err(self.error("expected object key")),
        }
    }

    fn parse_string(&mut self) -> Result<String, ExtractorError> {
        let quote = self.peek().ok_or_else(|| self.error("expected string"))?;
        self.pos += 1;

        let mut out = String::new();
        loop {
            let Some(c) = self.peek() else {
                return Err(self.error("unterminated string"));
            };

            if c == quote {
                self.pos += 1;
                return Ok(out);
            }

            if c == b'\\' {
                self.pos += 1;
                let Some(escaped) = self.peek() else {
                    return Err(self.error("unterminated escape sequence"));
                };
                match escaped {
                    b'n' => out.push('\n'),
                    b't' => out.push('\t'),
                    b'r' => out.push('\r'),
                    b'b' => out.push('\u{0008}'),
                    b'f' => out.push('\u{000C}'),
                    b'u' => {
                        let hex = self
                            .source
                            .get(self.pos + 1..self.pos + 5)
                            .ok_or_else(|| self.error("truncated unicode escape"))?;
                        let code = u32::from_str_radix(hex, 16)
                            .map_err(|_| self.error("invalid unicode escape"))?;
                        out.push(
                            char::from_u32(code)
                                .ok_or_else(|| self.error("invalid unicode escape"))?,
                        );
                        self.pos += 4;
                    }
                    _ => {
                        // The escaped character may be multi-byte; consume it
                        // whole or the cursor lands mid-character.
                        let ch = self.source[self.pos..]
                            .chars()
                            .next()
                            .ok_or_else(|| self.error("unterminated escape sequence"))?;
                        out.push(ch);
                        self.pos += ch.len_utf8();
                        continue;
                    }
                }
                self.pos += 1;
                continue;
            }

            // Copy a full UTF-8 character, not just one byte.
            let ch = self.source[self.pos..]
                .chars()
                .next()
                .ok_or_else(|| self.error("invalid utf-8"))?;
            out.push(ch);
            self.pos += ch.len_utf8();
        }
    }

    fn parse_number(&mut self) -> Result<Value, ExtractorError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == b'.' || c == b'e' || c == b'E' || c == b'+' || c == b'-' {
                self.pos += 1;
            } else {
                break;
            }
        }

        let text = &self.source[start..self.pos];
        if let Ok(n) = text.parse::<i64>() {
            return Ok(Value::Number(n.into()));
        }
        let n = text
            .parse::<f64>()
            .map_err(|_| self.error("invalid number"))?;
        Number::from_f64(n)
            .map(Value::Number)
            .ok_or_else(|| self.error("invalid number"))
    }

    fn parse_keyword(&mut self) -> Result<Value, ExtractorError> {
        for (keyword, value) in [
            ("true", Value::Bool(true)),
            ("false", Value::Bool(false)),
            ("null", Value::Null),
            ("undefined", Value::Null),
        ] {
            if self.source[self.pos..].starts_with(keyword) {
                self.pos += keyword.len();
                return Ok(value);
            }
        }
        Err(self.error("unexpected token"))
    }
}
