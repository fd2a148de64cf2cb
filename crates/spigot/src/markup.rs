//! Pipe-expression parsing.
//!
//! Turns the markup inside an output node into an entry expression and an
//! ordered filter chain:
//!
//! ```text
//! var | adjust: 5 | money
//! 'A' | concat: 'B', other
//! ```
//!
//! Terms are single- or double-quoted strings, signed integers and floats,
//! `true`/`false`/`nil`, or variable references (dotted paths like
//! `user.name` or `items.0`, resolved by the context at render time).

use serde_json::Value;
use spigot_filters::{FilterApplication, RawArgument};

use crate::error::RenderError;

/// A parsed pipe expression: the leading entry term and its filter chain.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedExpression {
    pub entry: RawArgument,
    pub chain: Vec<FilterApplication>,
}

/// Parses `entry (| name (: arg (, arg)*)?)*`.
pub(crate) fn parse_expression(markup: &str) -> Result<ParsedExpression, RenderError> {
    let mut scanner = Scanner::new(markup);

    scanner.skip_ws();
    let entry = scanner.term()?;
    let mut chain = Vec::new();

    loop {
        scanner.skip_ws();
        match scanner.peek() {
            None => break,
            Some('|') => {
                scanner.bump();
                scanner.skip_ws();
                let name = scanner.filter_name()?;
                let mut args = Vec::new();
                scanner.skip_ws();
                if scanner.peek() == Some(':') {
                    scanner.bump();
                    loop {
                        scanner.skip_ws();
                        args.push(scanner.term()?);
                        scanner.skip_ws();
                        if scanner.peek() == Some(',') {
                            scanner.bump();
                        } else {
                            break;
                        }
                    }
                }
                chain.push(FilterApplication::new(name, args));
            }
            Some(ch) => {
                return Err(syntax(format!("unexpected '{}'", ch), scanner.pos()));
            }
        }
    }

    Ok(ParsedExpression { entry, chain })
}

fn syntax(message: String, position: usize) -> RenderError {
    RenderError::Syntax { message, position }
}

struct Scanner<'a> {
    src: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            chars: src.char_indices().peekable(),
        }
    }

    fn pos(&mut self) -> usize {
        match self.chars.peek() {
            Some((index, _)) => *index,
            None => self.src.len(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, ch)| *ch)
    }

    fn bump(&mut self) -> Option<char> {
        self.chars.next().map(|(_, ch)| ch)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(ch) if ch.is_whitespace()) {
            self.bump();
        }
    }

    fn filter_name(&mut self) -> Result<String, RenderError> {
        let start = self.pos();
        let mut name = String::new();
        match self.peek() {
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
                name.push(ch);
                self.bump();
            }
            _ => return Err(syntax("expected filter name after '|'".to_string(), start)),
        }
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                name.push(ch);
                self.bump();
            } else {
                break;
            }
        }
        Ok(name)
    }

    fn term(&mut self) -> Result<RawArgument, RenderError> {
        let start = self.pos();
        match self.peek() {
            Some(quote @ ('\'' | '"')) => {
                self.bump();
                let text = self.quoted(quote, start)?;
                Ok(RawArgument::Literal(Value::String(text)))
            }
            Some(ch) if ch.is_ascii_digit() || ch == '-' || ch == '+' => self.number(start),
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
                let path = self.path();
                Ok(match path.as_str() {
                    "true" => RawArgument::Literal(Value::Bool(true)),
                    "false" => RawArgument::Literal(Value::Bool(false)),
                    "nil" | "null" => RawArgument::Literal(Value::Null),
                    _ => RawArgument::Variable(path),
                })
            }
            _ => Err(syntax("expected a value".to_string(), start)),
        }
    }

    fn quoted(&mut self, quote: char, start: usize) -> Result<String, RenderError> {
        let mut text = String::new();
        loop {
            match self.bump() {
                Some(ch) if ch == quote => return Ok(text),
                Some(ch) => text.push(ch),
                None => return Err(syntax("unterminated string literal".to_string(), start)),
            }
        }
    }

    fn number(&mut self, start: usize) -> Result<RawArgument, RenderError> {
        let mut text = String::new();
        if let Some(sign @ ('-' | '+')) = self.peek() {
            text.push(sign);
            self.bump();
        }
        let mut is_float = false;
        while let Some(ch) = self.peek() {
            match ch {
                '0'..='9' => {
                    text.push(ch);
                    self.bump();
                }
                '.' if !is_float => {
                    is_float = true;
                    text.push(ch);
                    self.bump();
                }
                _ => break,
            }
        }

        let literal = if is_float {
            text.parse::<f64>().ok().map(Value::from)
        } else {
            text.parse::<i64>().ok().map(Value::from)
        };
        literal
            .map(RawArgument::Literal)
            .ok_or_else(|| syntax(format!("invalid number '{}'", text), start))
    }

    fn path(&mut self) -> String {
        let mut path = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '.' {
                path.push(ch);
                self.bump();
            } else {
                break;
            }
        }
        path
    }
}
