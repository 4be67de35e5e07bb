//! Recursive-descent parser for the path grammar.
//!
//! ```text
//! Path      := '$' Segment*
//! Segment   := '.' (Name | '*') | '..' SearchTarget | '[' ArrayBody ']'
//! ArrayBody := '*' | (Index | Slice) {',' (Index | Slice)} | '?(' Filter ')' | '(' Index ')'
//! Slice     := [Int] ':' [Int] [':' [Int]]
//! ```
//!
//! Filter and index bodies are handed to the expression parser in
//! [`expression`], which shares this parser's token stream.

mod expression;
mod rewrite;

pub use rewrite::rewrite_boolean_context;

use std::str::FromStr;

use log::debug;

use crate::{
    ast::{ArraySelector, Expr, JsonPath, NameSelector, Operator, SearchTarget, Slice, Token},
    error::SyntaxError,
    lexer::Lexer,
};

pub struct Parser {
    lexer: Lexer,
    current_token: Token,
}

/// Contents of a `[...]` segment.
enum BracketBody {
    Name(String),
    Selector(ArraySelector),
}

/// Parses path text into a [`JsonPath`].
///
/// # Examples
///
/// ```
/// use clove_path::parse;
///
/// let path = parse("$.store.book[0].author").unwrap();
/// assert_eq!(path.to_string(), "$.store.book[0].author");
/// assert!(parse("$.").is_err());
/// ```
pub fn parse(text: &str) -> Result<JsonPath, SyntaxError> {
    if text.trim().is_empty() {
        return Err(SyntaxError::new("", "Path is empty"));
    }
    let mut parser = Parser::new(Lexer::new(text))?;
    let path = parser.parse_path()?;
    debug!("parsed path {}", path);
    Ok(path)
}

/// Parses a standalone expression, e.g. `@.price * 2 > $.limit`.
pub fn parse_expression(text: &str) -> Result<Expr, SyntaxError> {
    let mut parser = Parser::new(Lexer::new(text))?;
    let expr = parser.parse_expression()?;
    debug!("parsed expression {}", expr);
    Ok(expr)
}

/// Parses a standalone filter predicate; a bare property reference at the top
/// level becomes a has-property test.
pub fn parse_filter_expression(text: &str) -> Result<Expr, SyntaxError> {
    let mut parser = Parser::new(Lexer::new(text))?;
    let expr = parser.parse_filter_expression()?;
    debug!("parsed filter {}", expr);
    Ok(expr)
}

impl FromStr for JsonPath {
    type Err = SyntaxError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse(text)
    }
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, SyntaxError> {
        let current_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
        })
    }

    fn advance(&mut self) -> Result<(), SyntaxError> {
        self.current_token = self.lexer.next_token()?;
        Ok(())
    }

    fn error(&self, message: impl Into<String>) -> SyntaxError {
        SyntaxError::new(self.lexer.consumed(), message)
    }

    fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(&self.current_token) == std::mem::discriminant(token)
    }

    fn expect(&mut self, expected: Token) -> Result<(), SyntaxError> {
        if !self.check(&expected) {
            return Err(self.error(format!(
                "Expected {}, found {}",
                expected.describe(),
                self.current_token.describe()
            )));
        }
        self.advance()
    }

    /// The `count` tokens following the current one, without consuming them.
    fn peek(&mut self, count: usize) -> Result<Vec<Token>, SyntaxError> {
        let saved = self.lexer.checkpoint();
        let tokens = (0..count)
            .map(|_| self.lexer.next_token())
            .collect::<Result<Vec<_>, _>>();
        self.lexer.restore(saved);
        tokens
    }

    /// Parse a complete path: `$` followed by segments up to the end of input.
    pub fn parse_path(&mut self) -> Result<JsonPath, SyntaxError> {
        if !self.check(&Token::Dollar) {
            return Err(self.error(format!(
                "Path must start with '$', found {}",
                self.current_token.describe()
            )));
        }
        self.advance()?;

        let operators = self.parse_operators(false)?;

        if !self.check(&Token::Eof) {
            return Err(self.error(format!(
                "Unexpected {} after path",
                self.current_token.describe()
            )));
        }
        Ok(JsonPath::from(operators))
    }

    /// Parse segments until the next token cannot continue a path.
    ///
    /// Inside expressions (`embedded`), a trailing `.indexOf(` is left for the
    /// expression parser.
    pub(crate) fn parse_operators(&mut self, embedded: bool) -> Result<Vec<Operator>, SyntaxError> {
        let mut operators = vec![];

        loop {
            match self.current_token {
                Token::Dot => {
                    if embedded && self.at_index_of()? {
                        break;
                    }
                    self.advance()?;
                    operators.push(self.parse_dot_segment()?);
                }
                Token::DotDot => {
                    self.advance()?;
                    operators.push(self.parse_search_segment()?);
                }
                Token::LBracket => {
                    self.advance()?;
                    operators.push(match self.parse_bracket()? {
                        BracketBody::Name(name) => Operator::Name(NameSelector::Key(name)),
                        BracketBody::Selector(selector) => Operator::Array(selector),
                    });
                }
                _ => break,
            }
        }

        Ok(operators)
    }

    /// Whether the current `.` starts an `.indexOf(` call.
    pub(crate) fn at_index_of(&mut self) -> Result<bool, SyntaxError> {
        let next = self.peek(2)?;
        Ok(matches!(
            next.as_slice(),
            [Token::Identifier(name), Token::LParen] if name == "indexOf"
        ))
    }

    fn parse_dot_segment(&mut self) -> Result<Operator, SyntaxError> {
        match std::mem::replace(&mut self.current_token, Token::Eof) {
            Token::Identifier(name) => {
                self.advance()?;
                if name == "length" {
                    Ok(Operator::Length)
                } else {
                    Ok(Operator::Name(NameSelector::Key(name)))
                }
            }
            Token::String(name) => {
                self.advance()?;
                Ok(Operator::Name(NameSelector::Key(name)))
            }
            Token::Star => {
                self.advance()?;
                Ok(Operator::Name(NameSelector::Wildcard))
            }
            Token::Eof => Err(self.error("Trailing '.' with no selector")),
            token => Err(self.error(format!("Invalid name start: {}", token.describe()))),
        }
    }

    fn parse_search_segment(&mut self) -> Result<Operator, SyntaxError> {
        let target = match std::mem::replace(&mut self.current_token, Token::Eof) {
            Token::Identifier(name) => {
                self.advance()?;
                if name == "length" {
                    SearchTarget::Length
                } else {
                    SearchTarget::Name(NameSelector::Key(name))
                }
            }
            Token::String(name) => {
                self.advance()?;
                SearchTarget::Name(NameSelector::Key(name))
            }
            Token::Star => {
                self.advance()?;
                SearchTarget::Name(NameSelector::Wildcard)
            }
            Token::LBracket => {
                self.advance()?;
                match self.parse_bracket()? {
                    BracketBody::Name(name) => SearchTarget::Name(NameSelector::Key(name)),
                    BracketBody::Selector(selector) => SearchTarget::Array(selector),
                }
            }
            Token::Eof => return Err(self.error("Trailing '..' with no selector")),
            token => {
                return Err(self.error(format!("Invalid search target: {}", token.describe())));
            }
        };
        Ok(Operator::Search(target))
    }

    /// Parse the body of `[...]`; the opening bracket is already consumed.
    fn parse_bracket(&mut self) -> Result<BracketBody, SyntaxError> {
        let body = match &self.current_token {
            Token::Star => {
                self.advance()?;
                BracketBody::Selector(ArraySelector::Wildcard)
            }
            Token::Question => {
                self.advance()?;
                self.expect(Token::LParen)?;
                let predicate = self.parse_filter_body()?;
                self.expect(Token::RParen)?;
                BracketBody::Selector(ArraySelector::Filter(predicate))
            }
            Token::LParen => {
                self.advance()?;
                let index = self.parse_index_body()?;
                self.expect(Token::RParen)?;
                BracketBody::Selector(ArraySelector::Index(index))
            }
            Token::String(name) => {
                let name = name.clone();
                self.advance()?;
                BracketBody::Name(name)
            }
            Token::Integer(_) | Token::Minus | Token::Colon => {
                BracketBody::Selector(ArraySelector::Slices(self.parse_slices()?))
            }
            Token::RBracket => return Err(self.error("Empty brackets")),
            token => {
                return Err(self.error(format!(
                    "Unrecognized array selector starting with {}",
                    token.describe()
                )));
            }
        };

        self.expect(Token::RBracket)?;
        Ok(body)
    }

    fn parse_slices(&mut self) -> Result<Vec<Slice>, SyntaxError> {
        let mut slices = vec![];

        loop {
            let start = self.parse_slice_bound()?;

            let slice = if self.check(&Token::Colon) {
                self.advance()?;
                let end = self.parse_slice_bound()?;
                let step = if self.check(&Token::Colon) {
                    self.advance()?;
                    self.parse_slice_bound()?
                } else {
                    None
                };
                Slice::Range { start, end, step }
            } else {
                match start {
                    Some(index) => Slice::Index(index),
                    None => {
                        return Err(self.error(format!(
                            "Expected an index or slice, found {}",
                            self.current_token.describe()
                        )));
                    }
                }
            };
            slices.push(slice);

            if !self.check(&Token::Comma) {
                break;
            }
            self.advance()?;
        }

        Ok(slices)
    }

    fn parse_slice_bound(&mut self) -> Result<Option<i64>, SyntaxError> {
        let negative = self.check(&Token::Minus);
        if negative {
            self.advance()?;
        }

        match self.current_token {
            Token::Integer(n) => {
                self.advance()?;
                Ok(Some(if negative { -n } else { n }))
            }
            _ if negative => Err(self.error(format!(
                "Expected an integer after '-', found {}",
                self.current_token.describe()
            ))),
            _ => Ok(None),
        }
    }
}
