//! Validator expression syntax.
//!
//! Schema values are call expressions such as `str(min=1, exclude='@')`,
//! `list(int(), str())` or `enum('a', 'b', required=False)`. Arguments are
//! literals (quoted strings, integers, floats, `True`, `False`, `None`) or
//! nested calls. A bare tag (`str`) is the same as `str()`.

use crate::{ParserError, Result};
use docschema_core::Value;

/// Parsed validator expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `name(args..., key=value...)`
    Call {
        name: String,
        args: Vec<Expr>,
        kwargs: Vec<(String, Expr)>,
    },
    /// Literal argument
    Literal(Value),
}

impl Expr {
    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Expr::Call { name, .. } => format!("{}()", name),
            Expr::Literal(value) => value.literal(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Str(String),
    Int(i64),
    Float(f64),
    LParen,
    RParen,
    Comma,
    Equals,
}

/// Parses a complete validator expression.
///
/// # Example
///
/// ```rust
/// use docschema_parser::{parse_expression, Expr};
///
/// let expr = parse_expression("int(max=10, required=False)").unwrap();
/// assert!(matches!(expr, Expr::Call { ref name, .. } if name == "int"));
/// ```
pub fn parse_expression(source: &str) -> Result<Expr> {
    let tokens = tokenize(source)?;
    let mut parser = ExprParser {
        source,
        tokens,
        pos: 0,
    };
    let expr = parser.expr()?;
    if let Some((offset, token)) = parser.tokens.get(parser.pos) {
        return Err(syntax(
            source,
            *offset,
            format!("unexpected {:?} after expression", token),
        ));
    }
    Ok(expr)
}

fn syntax(source: &str, position: usize, message: impl Into<String>) -> ParserError {
    ParserError::Syntax {
        expression: source.to_string(),
        position,
        message: message.into(),
    }
}

fn tokenize(source: &str) -> Result<Vec<(usize, Token)>> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' | ')' | ',' | '=' => {
                chars.next();
                let token = match c {
                    '(' => Token::LParen,
                    ')' => Token::RParen,
                    ',' => Token::Comma,
                    _ => Token::Equals,
                };
                tokens.push((offset, token));
            }
            '\'' | '"' => {
                let quote = c;
                chars.next();
                let mut text = String::new();
                let mut closed = false;
                while let Some((_, c)) = chars.next() {
                    match c {
                        '\\' => match chars.next() {
                            Some((_, 'n')) => text.push('\n'),
                            Some((_, 't')) => text.push('\t'),
                            Some((_, escaped)) => text.push(escaped),
                            None => break,
                        },
                        c if c == quote => {
                            closed = true;
                            break;
                        }
                        c => text.push(c),
                    }
                }
                if !closed {
                    return Err(syntax(source, offset, "unterminated string"));
                }
                tokens.push((offset, Token::Str(text)));
            }
            c if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => {
                let mut text = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '.' | '_') {
                        text.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push((offset, number(source, offset, &text)?));
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut text = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' {
                        text.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push((offset, Token::Ident(text)));
            }
            other => {
                return Err(syntax(source, offset, format!("unexpected character '{}'", other)));
            }
        }
    }

    Ok(tokens)
}

fn number(source: &str, offset: usize, text: &str) -> Result<Token> {
    let digits = text.replace('_', "");
    if let Ok(i) = digits.parse::<i64>() {
        return Ok(Token::Int(i));
    }
    digits
        .parse::<f64>()
        .map(Token::Float)
        .map_err(|_| syntax(source, offset, format!("invalid number '{}'", text)))
}

struct ExprParser<'s> {
    source: &'s str,
    tokens: Vec<(usize, Token)>,
    pos: usize,
}

impl ExprParser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(_, t)| t)
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|(o, _)| *o)
            .unwrap_or(self.source.len())
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(_, t)| t.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: Token) -> Result<()> {
        let offset = self.offset();
        match self.next() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(syntax(
                self.source,
                offset,
                format!("expected {:?}, found {:?}", expected, token),
            )),
            None => Err(syntax(
                self.source,
                offset,
                format!("expected {:?}, found end of input", expected),
            )),
        }
    }

    fn expr(&mut self) -> Result<Expr> {
        let offset = self.offset();
        match self.next() {
            Some(Token::Str(s)) => Ok(Expr::Literal(Value::String(s))),
            Some(Token::Int(i)) => Ok(Expr::Literal(Value::Int(i))),
            Some(Token::Float(f)) => Ok(Expr::Literal(Value::Float(f))),
            Some(Token::Ident(name)) => {
                if self.peek() == Some(&Token::LParen) {
                    self.pos += 1;
                    self.call(name)
                } else {
                    Ok(keyword_literal(&name).unwrap_or(Expr::Call {
                        name,
                        args: Vec::new(),
                        kwargs: Vec::new(),
                    }))
                }
            }
            Some(token) => Err(syntax(
                self.source,
                offset,
                format!("unexpected {:?}", token),
            )),
            None => Err(syntax(self.source, offset, "empty expression")),
        }
    }

    /// Parses call arguments; the opening parenthesis is already consumed.
    fn call(&mut self, name: String) -> Result<Expr> {
        let mut args = Vec::new();
        let mut kwargs: Vec<(String, Expr)> = Vec::new();

        loop {
            if self.peek() == Some(&Token::RParen) {
                self.pos += 1;
                break;
            }

            let offset = self.offset();
            let keyword = match (self.tokens.get(self.pos), self.tokens.get(self.pos + 1)) {
                (Some((_, Token::Ident(key))), Some((_, Token::Equals))) => Some(key.clone()),
                _ => None,
            };

            if let Some(key) = keyword {
                self.pos += 2;
                if kwargs.iter().any(|(k, _)| *k == key) {
                    return Err(syntax(
                        self.source,
                        offset,
                        format!("duplicate keyword '{}'", key),
                    ));
                }
                let value = self.expr()?;
                kwargs.push((key, value));
            } else {
                if !kwargs.is_empty() {
                    return Err(syntax(
                        self.source,
                        offset,
                        "positional argument after keyword argument",
                    ));
                }
                args.push(self.expr()?);
            }

            match self.peek() {
                Some(Token::Comma) => {
                    self.pos += 1;
                }
                Some(Token::RParen) => {}
                _ => self.expect(Token::RParen)?,
            }
        }

        Ok(Expr::Call { name, args, kwargs })
    }
}

fn keyword_literal(name: &str) -> Option<Expr> {
    let value = match name {
        "True" | "true" => Value::Bool(true),
        "False" | "false" => Value::Bool(false),
        "None" | "null" => Value::Null,
        _ => return None,
    };
    Some(Expr::Literal(value))
}
