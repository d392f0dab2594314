//! Tolerant reader for the OpenStep property-list dialect used by `project.pbxproj`.
//!
//! Accepts `//` and `/* */` comments anywhere whitespace is allowed, quoted and
//! unquoted strings, `<hex>` data, and a trailing `,` in arrays.

use crate::error::{ModelError, ModelResult};
use crate::value::{Dict, Value};

pub fn parse_plist(input: &str) -> ModelResult<Value> {
    let mut parser = Parser::new(input);
    let value = parser.value()?;
    parser.skip_trivia()?;
    if parser.peek().is_some() {
        return Err(parser.error("unexpected content after root value"));
    }
    Ok(value)
}

struct Parser<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        Self {
            chars: input.chars().peekable(),
            line: 1,
        }
    }

    fn error(&self, message: impl Into<String>) -> ModelError {
        ModelError::Parse {
            line: self.line,
            message: message.into(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn expect(&mut self, wanted: char) -> ModelResult<()> {
        self.skip_trivia()?;
        match self.bump() {
            Some(c) if c == wanted => Ok(()),
            Some(c) => Err(self.error(format!("expected '{wanted}', found '{c}'"))),
            None => Err(self.error(format!("expected '{wanted}', found end of input"))),
        }
    }

    /// Skip whitespace and comments.
    fn skip_trivia(&mut self) -> ModelResult<()> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') => {
                    let mut lookahead = self.chars.clone();
                    lookahead.next();
                    match lookahead.peek() {
                        Some('/') => {
                            while let Some(c) = self.bump() {
                                if c == '\n' {
                                    break;
                                }
                            }
                        }
                        Some('*') => {
                            self.bump();
                            self.bump();
                            let mut prev = '\0';
                            loop {
                                match self.bump() {
                                    Some('/') if prev == '*' => break,
                                    Some(c) => prev = c,
                                    None => return Err(self.error("unterminated comment")),
                                }
                            }
                        }
                        // A bare '/' starts an unquoted string such as a path.
                        _ => return Ok(()),
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn value(&mut self) -> ModelResult<Value> {
        self.skip_trivia()?;
        match self.peek() {
            Some('{') => self.dict().map(Value::Dict),
            Some('(') => self.array().map(Value::Array),
            Some('<') => self.data().map(Value::Data),
            Some(_) => self.string().map(Value::String),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn dict(&mut self) -> ModelResult<Dict> {
        self.expect('{')?;
        let mut dict = Dict::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some('}') {
                self.bump();
                return Ok(dict);
            }
            let key = self.string()?;
            self.expect('=')?;
            let value = self.value()?;
            self.expect(';')?;
            dict.insert(key, value);
        }
    }

    fn array(&mut self) -> ModelResult<Vec<Value>> {
        self.expect('(')?;
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some(')') {
                self.bump();
                return Ok(items);
            }
            items.push(self.value()?);
            self.skip_trivia()?;
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(')') => {}
                Some(c) => return Err(self.error(format!("expected ',' or ')', found '{c}'"))),
                None => return Err(self.error("unterminated array")),
            }
        }
    }

    fn data(&mut self) -> ModelResult<Vec<u8>> {
        self.expect('<')?;
        let mut digits = String::new();
        loop {
            match self.bump() {
                Some('>') => break,
                Some(c) if c.is_ascii_hexdigit() => digits.push(c),
                Some(c) if c.is_whitespace() => {}
                Some(c) => return Err(self.error(format!("invalid data character '{c}'"))),
                None => return Err(self.error("unterminated data")),
            }
        }
        if digits.len() % 2 != 0 {
            return Err(self.error("odd number of hex digits in data"));
        }
        (0..digits.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&digits[i..i + 2], 16))
            .collect::<Result<Vec<u8>, _>>()
            .map_err(|e| self.error(e.to_string()))
    }

    fn string(&mut self) -> ModelResult<String> {
        self.skip_trivia()?;
        match self.peek() {
            Some('"') | Some('\'') => self.quoted(),
            Some(c) if is_unquoted_char(c) => {
                let mut out = String::new();
                while let Some(c) = self.peek() {
                    if !is_unquoted_char(c) {
                        break;
                    }
                    out.push(c);
                    self.bump();
                }
                Ok(out)
            }
            Some(c) => Err(self.error(format!("unexpected character '{c}'"))),
            None => Err(self.error("expected string, found end of input")),
        }
    }

    fn quoted(&mut self) -> ModelResult<String> {
        let quote = self.bump().unwrap_or('"');
        let mut out = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(out),
                Some('\\') => out.push(self.escape()?),
                Some(c) => out.push(c),
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn escape(&mut self) -> ModelResult<char> {
        match self.bump() {
            Some('n') => Ok('\n'),
            Some('t') => Ok('\t'),
            Some('r') => Ok('\r'),
            Some('U') | Some('u') => {
                let mut hex = String::with_capacity(4);
                for _ in 0..4 {
                    match self.bump() {
                        Some(c) if c.is_ascii_hexdigit() => hex.push(c),
                        _ => return Err(self.error("invalid \\U escape")),
                    }
                }
                let code = u32::from_str_radix(&hex, 16).map_err(|e| self.error(e.to_string()))?;
                char::from_u32(code).ok_or_else(|| self.error("invalid unicode scalar"))
            }
            Some(c) => Ok(c),
            None => Err(self.error("unterminated escape")),
        }
    }
}

/// Characters allowed in an unquoted token when reading.
fn is_unquoted_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '/' | ':' | '.' | '-' | '+')
}
