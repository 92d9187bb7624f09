//! Parser for PHP translation files.
//!
//! Laravel language files are plain PHP scripts that return an array literal:
//!
//! ```php
//! <?php
//!
//! return [
//!     'failed' => 'These credentials do not match our records.',
//!     'login' => ['password' => 'The provided password is incorrect.'],
//! ];
//! ```
//!
//! Only this shape is understood: an optional `declare(...)` statement, one
//! `return` of an array literal (`[...]` or `array(...)`), scalar literals,
//! and `.` concatenation of scalars. Anything else (variables, function calls,
//! heredocs) is reported as a parse error instead of being executed.
//!
//! The result is a `serde_json` map so that it shares the flattening code with
//! JSON sources. Keys follow PHP array semantics: numeric strings become integer
//! keys, keyless elements get the next integer index and duplicate keys keep
//! their first position while taking the last value.

use std::{fs, num::IntErrorKind, path::Path};

use serde_json::{Map, Number, Value};

use crate::core::keys::scalar_to_string;
use crate::error::{Error, ParseError, Result};

pub fn parse_php_file(path: &Path) -> Result<Map<String, Value>> {
    let content = fs::read_to_string(path).map_err(|e| Error::io("read", path, e))?;
    Ok(parse_php_source(&content, path)?)
}

pub fn parse_php_source(content: &str, path: &Path) -> Result<Map<String, Value>, ParseError> {
    Parser::new(content, path).parse_document()
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    path: &'a Path,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str, path: &'a Path) -> Self {
        // Editors occasionally save a UTF-8 BOM in front of the open tag.
        let pos = if src.starts_with('\u{feff}') { '\u{feff}'.len_utf8() } else { 0 };
        Self { src, pos, path }
    }

    fn parse_document(mut self) -> Result<Map<String, Value>, ParseError> {
        self.skip_whitespace();
        if !self.eat_keyword("<?php") {
            return Err(self.error("expected `<?php` open tag"));
        }

        self.skip_trivia();
        if self.eat_keyword("declare") {
            self.skip_statement()?;
            self.skip_trivia();
        }

        if !self.eat_keyword("return") {
            return Err(self.error("expected `return` statement"));
        }

        let start = self.pos;
        let value = self.parse_expr()?;
        let Value::Object(map) = value else {
            return Err(self.error_at(start, "translation file must return an array"));
        };

        self.skip_trivia();
        self.expect(';')?;
        self.skip_trivia();
        if self.src[self.pos..].starts_with("?>") {
            self.pos += 2;
            self.skip_whitespace();
        }

        if self.pos < self.src.len() {
            return Err(self.error("unexpected content after `return` statement"));
        }

        Ok(map)
    }

    fn parse_expr(&mut self) -> Result<Value, ParseError> {
        let start = self.pos;
        let mut value = self.parse_term()?;

        loop {
            self.skip_trivia();
            if self.peek() != Some('.') {
                return Ok(value);
            }
            self.bump();
            self.skip_trivia();
            let rhs_start = self.pos;
            let rhs = self.parse_term()?;

            let Some(left) = scalar_to_string(&value) else {
                return Err(self.error_at(start, "cannot concatenate an array"));
            };
            let Some(right) = scalar_to_string(&rhs) else {
                return Err(self.error_at(rhs_start, "cannot concatenate an array"));
            };
            value = Value::String(left + &right);
        }
    }

    fn parse_term(&mut self) -> Result<Value, ParseError> {
        self.skip_trivia();
        match self.peek() {
            Some('[') => {
                self.bump();
                self.parse_array(']')
            }
            Some('(') => {
                self.bump();
                let value = self.parse_expr()?;
                self.skip_trivia();
                self.expect(')')?;
                Ok(value)
            }
            Some('\'') => self.parse_single_quoted().map(Value::String),
            Some('"') => self.parse_double_quoted().map(Value::String),
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' => self.parse_number(),
            Some(_) if self.src[self.pos..].starts_with("<<<") => {
                Err(self.error("heredoc and nowdoc strings are not supported"))
            }
            Some(c) if is_ident_start(c) => self.parse_identifier(),
            Some(c) => Err(self.error(format!("unexpected character '{}'", c))),
            None => Err(self.error("unexpected end of file")),
        }
    }

    fn parse_identifier(&mut self) -> Result<Value, ParseError> {
        let start = self.pos;
        let ident = self.take_while(is_ident_char);

        match ident.to_ascii_lowercase().as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "null" => Ok(Value::Null),
            "array" => {
                self.skip_trivia();
                self.expect('(')?;
                self.parse_array(')')
            }
            _ => Err(self.error_at(start, format!("unsupported expression '{}'", ident))),
        }
    }

    fn parse_array(&mut self, close: char) -> Result<Value, ParseError> {
        let mut map = Map::new();
        let mut next_index: i64 = 0;

        loop {
            self.skip_trivia();
            if self.peek() == Some(close) {
                self.bump();
                return Ok(Value::Object(map));
            }

            let key_start = self.pos;
            let first = self.parse_expr()?;
            self.skip_trivia();

            let (key, value) = if self.src[self.pos..].starts_with("=>") {
                self.pos += 2;
                let key = self.array_key(&first, key_start)?;
                (key, self.parse_expr()?)
            } else {
                (ArrayKey::Int(next_index), first)
            };

            if let ArrayKey::Int(index) = key
                && index >= next_index
            {
                next_index = index.saturating_add(1);
            }
            map.insert(key.into_string(), value);

            self.skip_trivia();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(c) if c == close => {}
                Some(c) => {
                    return Err(self.error(format!("expected ',' or '{}', found '{}'", close, c)));
                }
                None => return Err(self.error(format!("unclosed array, expected '{}'", close))),
            }
        }
    }

    fn array_key(&self, value: &Value, start: usize) -> Result<ArrayKey, ParseError> {
        match value {
            Value::String(s) => Ok(match canonical_int(s) {
                Some(i) => ArrayKey::Int(i),
                None => ArrayKey::String(s.clone()),
            }),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(ArrayKey::Int(i)),
                None => Ok(ArrayKey::Int(n.as_f64().map(|f| f.trunc() as i64).unwrap_or(0))),
            },
            Value::Bool(b) => Ok(ArrayKey::Int(i64::from(*b))),
            Value::Null => Ok(ArrayKey::String(String::new())),
            Value::Array(_) | Value::Object(_) => Err(self.error_at(start, "illegal array key")),
        }
    }

    fn parse_single_quoted(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        self.bump();
        let mut out = String::new();

        loop {
            match self.bump() {
                Some('\\') => match self.peek() {
                    Some(c @ ('\\' | '\'')) => {
                        self.bump();
                        out.push(c);
                    }
                    _ => out.push('\\'),
                },
                Some('\'') => return Ok(out),
                Some(c) => out.push(c),
                None => return Err(self.error_at(start, "unterminated string")),
            }
        }
    }

    fn parse_double_quoted(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        self.bump();
        let mut out: Vec<u8> = Vec::new();

        loop {
            let Some(c) = self.bump() else {
                return Err(self.error_at(start, "unterminated string"));
            };
            match c {
                '"' => break,
                '\\' => self.parse_escape(&mut out)?,
                '$' if self.peek().is_some_and(is_ident_start) || self.peek() == Some('{') => {
                    return Err(self.error_at(
                        self.pos - 1,
                        "variable interpolation is not supported",
                    ));
                }
                '{' if self.peek() == Some('$') => {
                    return Err(self.error_at(
                        self.pos - 1,
                        "variable interpolation is not supported",
                    ));
                }
                c => push_char(&mut out, c),
            }
        }

        String::from_utf8(out).map_err(|_| self.error_at(start, "string is not valid UTF-8"))
    }

    fn parse_escape(&mut self, out: &mut Vec<u8>) -> Result<(), ParseError> {
        let escape_start = self.pos - 1;
        let Some(c) = self.peek() else {
            out.push(b'\\');
            return Ok(());
        };

        match c {
            'n' => out.push(b'\n'),
            't' => out.push(b'\t'),
            'r' => out.push(b'\r'),
            'v' => out.push(0x0b),
            'e' => out.push(0x1b),
            'f' => out.push(0x0c),
            '\\' => out.push(b'\\'),
            '$' => out.push(b'$'),
            '"' => out.push(b'"'),
            '0'..='7' => {
                let digits = self.take_up_to(3, |c| ('0'..='7').contains(&c));
                let value = u32::from_str_radix(&digits, 8).unwrap_or(0);
                out.push((value & 0xff) as u8);
                return Ok(());
            }
            'x' if self.peek_nth(1).is_some_and(|c| c.is_ascii_hexdigit()) => {
                self.bump();
                let digits = self.take_up_to(2, |c| c.is_ascii_hexdigit());
                out.push(u8::from_str_radix(&digits, 16).unwrap_or(0));
                return Ok(());
            }
            'u' if self.peek_nth(1) == Some('{') => {
                self.bump();
                self.bump();
                let digits = self.take_while(|c| c.is_ascii_hexdigit());
                if self.peek() != Some('}') {
                    return Err(self.error_at(escape_start, "invalid unicode escape"));
                }
                self.bump();
                let ch = u32::from_str_radix(&digits, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| self.error_at(escape_start, "invalid unicode escape"))?;
                push_char(out, ch);
                return Ok(());
            }
            other => {
                out.push(b'\\');
                push_char(out, other);
            }
        }

        self.bump();
        Ok(())
    }

    fn parse_number(&mut self) -> Result<Value, ParseError> {
        let start = self.pos;
        let negative = match self.peek() {
            Some('-') => {
                self.bump();
                true
            }
            Some('+') => {
                self.bump();
                false
            }
            _ => false,
        };
        self.skip_trivia();

        let rest = &self.src[self.pos..];
        let radix = if rest.starts_with("0x") || rest.starts_with("0X") {
            Some(16)
        } else if rest.starts_with("0b") || rest.starts_with("0B") {
            Some(2)
        } else if rest.starts_with("0o") || rest.starts_with("0O") {
            Some(8)
        } else {
            None
        };

        if let Some(radix) = radix {
            self.pos += 2;
            let digits = self.take_while(|c| c.is_ascii_hexdigit() || c == '_');
            return self.integer_value(&digits, radix, negative, start);
        }

        let int_part = self.take_while(|c| c.is_ascii_digit() || c == '_');
        if int_part.is_empty() {
            return Err(self.error_at(start, "expected a number"));
        }

        let mut is_float = false;
        let mut literal = int_part.clone();
        if self.peek() == Some('.') {
            // `1.` is a float too.
            self.bump();
            is_float = true;
            literal.push('.');
            literal.push_str(&self.take_while(|c| c.is_ascii_digit() || c == '_'));
        }
        if matches!(self.peek(), Some('e' | 'E'))
            && (self.peek_nth(1).is_some_and(|c| c.is_ascii_digit())
                || (matches!(self.peek_nth(1), Some('+' | '-'))
                    && self.peek_nth(2).is_some_and(|c| c.is_ascii_digit())))
        {
            is_float = true;
            literal.push('e');
            self.bump();
            if let Some(sign @ ('+' | '-')) = self.peek() {
                literal.push(sign);
                self.bump();
            }
            literal.push_str(&self.take_while(|c| c.is_ascii_digit()));
        }

        if !is_float {
            let radix = if int_part.len() > 1 && int_part.starts_with('0') { 8 } else { 10 };
            return self.integer_value(&int_part, radix, negative, start);
        }

        let parsed: f64 = literal
            .replace('_', "")
            .parse()
            .map_err(|_| self.error_at(start, "invalid number"))?;
        let parsed = if negative { -parsed } else { parsed };
        Number::from_f64(parsed)
            .map(Value::Number)
            .ok_or_else(|| self.error_at(start, "invalid number"))
    }

    fn integer_value(
        &self,
        digits: &str,
        radix: u32,
        negative: bool,
        start: usize,
    ) -> Result<Value, ParseError> {
        let digits = digits.replace('_', "");
        match i64::from_str_radix(&digits, radix) {
            Ok(parsed) => Ok(Value::Number(Number::from(if negative { -parsed } else { parsed }))),
            // Integers beyond i64 become floats.
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
                let parsed = digits
                    .chars()
                    .filter_map(|c| c.to_digit(radix))
                    .fold(0f64, |acc, d| acc * f64::from(radix) + f64::from(d));
                Number::from_f64(if negative { -parsed } else { parsed })
                    .map(Value::Number)
                    .ok_or_else(|| self.error_at(start, "invalid integer literal"))
            }
            Err(_) => Err(self.error_at(start, "invalid integer literal")),
        }
    }

    /// Skip a `declare(...)` statement up to and including its `;`.
    fn skip_statement(&mut self) -> Result<(), ParseError> {
        match self.src[self.pos..].find(';') {
            Some(offset) => {
                self.pos += offset + 1;
                Ok(())
            }
            None => Err(self.error("expected ';'")),
        }
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    /// Skip whitespace and `//`, `#` and `/* */` comments.
    fn skip_trivia(&mut self) {
        loop {
            self.skip_whitespace();
            let rest = &self.src[self.pos..];
            if rest.starts_with("//") || (rest.starts_with('#') && !rest.starts_with("#[")) {
                match rest.find('\n') {
                    Some(offset) => self.pos += offset + 1,
                    None => self.pos = self.src.len(),
                }
            } else if rest.starts_with("/*") {
                match rest[2..].find("*/") {
                    Some(offset) => self.pos += offset + 4,
                    None => self.pos = self.src.len(),
                }
            } else {
                return;
            }
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let end = self.pos + keyword.len();
        let matches = self
            .src
            .get(self.pos..end)
            .is_some_and(|s| s.eq_ignore_ascii_case(keyword));
        let at_boundary = !self.src[end.min(self.src.len())..]
            .chars()
            .next()
            .is_some_and(is_ident_char);

        if matches && at_boundary {
            self.pos = end;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{}', found '{}'", expected, c))),
            None => Err(self.error(format!("expected '{}', found end of file", expected))),
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> String {
        let start = self.pos;
        while self.peek().is_some_and(&predicate) {
            self.bump();
        }
        self.src[start..self.pos].to_string()
    }

    fn take_up_to(&mut self, max: usize, predicate: impl Fn(char) -> bool) -> String {
        let start = self.pos;
        let mut taken = 0;
        while taken < max && self.peek().is_some_and(&predicate) {
            self.bump();
            taken += 1;
        }
        self.src[start..self.pos].to_string()
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        self.error_at(self.pos, message)
    }

    fn error_at(&self, offset: usize, message: impl Into<String>) -> ParseError {
        ParseError::at_offset(self.path, self.src, offset, message)
    }
}

enum ArrayKey {
    Int(i64),
    String(String),
}

impl ArrayKey {
    fn into_string(self) -> String {
        match self {
            ArrayKey::Int(i) => i.to_string(),
            ArrayKey::String(s) => s,
        }
    }
}

/// PHP turns keys like `"12"` or `"-3"` into integers, but not `"012"` or `"1.5"`.
fn canonical_int(s: &str) -> Option<i64> {
    let parsed: i64 = s.parse().ok()?;
    (parsed.to_string() == s).then_some(parsed)
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
