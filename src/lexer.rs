use crate::{ast::Token, error::SyntaxError};

/// Character scanner for path and expression text.
///
/// Whitespace between tokens is ignored. The lexer is restartable: the parser
/// can take a [`Checkpoint`] and rewind to it for multi-token lookahead.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    token_start: usize,
}

/// Saved lexer state, see [`Lexer::checkpoint`].
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint {
    position: usize,
    token_start: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            token_start: 0,
        }
    }

    /// Text before the start of the most recently produced token.
    pub fn consumed(&self) -> String {
        self.input[..self.token_start].iter().collect()
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            position: self.position,
            token_start: self.token_start,
        }
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.position = checkpoint.position;
        self.token_start = checkpoint.token_start;
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn error(&self, message: impl Into<String>) -> SyntaxError {
        SyntaxError::new(self.consumed(), message)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_string(&mut self, quote: char) -> Result<String, SyntaxError> {
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                c if c == quote => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    self.advance();
                    match self.current_char() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some('"') => result.push('"'),
                        Some('\'') => result.push('\''),
                        Some('\\') => result.push('\\'),
                        Some('/') => result.push('/'),
                        Some('u') => {
                            result.push(self.read_unicode_escape()?);
                            continue;
                        }
                        Some(ch) => {
                            return Err(self.error(format!("Invalid escape sequence: \\{}", ch)));
                        }
                        None => {
                            return Err(self.error("Unterminated string: unexpected end after backslash"));
                        }
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(self.error(format!("Unterminated string: missing closing {}", quote)))
    }

    /// Reads the four hex digits of a `\uXXXX` escape; the cursor sits on the `u`.
    fn read_unicode_escape(&mut self) -> Result<char, SyntaxError> {
        self.advance();
        let mut code = 0u32;
        for _ in 0..4 {
            let digit = self
                .current_char()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error("Invalid unicode escape: expected four hex digits"))?;
            code = code * 16 + digit;
            self.advance();
        }
        char::from_u32(code).ok_or_else(|| self.error(format!("Invalid unicode escape: {:04x}", code)))
    }

    fn read_number(&mut self) -> Result<Token, SyntaxError> {
        let mut number = String::new();
        let mut is_float = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.'
                && !is_float
                && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
            {
                is_float = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if matches!(self.current_char(), Some('e' | 'E')) {
            let signed = matches!(self.peek_char(1), Some('+' | '-'));
            let digit_offset = if signed { 2 } else { 1 };
            if self.peek_char(digit_offset).is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                for _ in 0..digit_offset {
                    if let Some(ch) = self.current_char() {
                        number.push(ch);
                        self.advance();
                    }
                }
                while let Some(ch) = self.current_char().filter(|c| c.is_ascii_digit()) {
                    number.push(ch);
                    self.advance();
                }
            }
        }

        if is_float {
            match number.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(Token::Float(value)),
                Ok(_) => Err(self.error(format!("Number '{}' is out of range", number))),
                Err(_) => Err(self.error(format!("Invalid number '{}'", number))),
            }
        } else {
            number
                .parse::<i64>()
                .map(Token::Integer)
                .map_err(|_| self.error(format!("Integer '{}' is out of range", number)))
        }
    }

    pub fn next_token(&mut self) -> Result<Token, SyntaxError> {
        self.skip_whitespace();
        self.token_start = self.position;

        let token = match self.current_char() {
            None => Token::Eof,
            Some('$') => {
                self.advance();
                Token::Dollar
            }
            Some('@') => {
                self.advance();
                Token::At
            }
            Some('.') => {
                if self.peek_char(1) == Some('.') {
                    self.advance();
                    self.advance();
                    Token::DotDot
                } else {
                    self.advance();
                    Token::Dot
                }
            }
            Some(',') => {
                self.advance();
                Token::Comma
            }
            Some(':') => {
                self.advance();
                Token::Colon
            }
            Some('?') => {
                self.advance();
                Token::Question
            }
            Some('+') => {
                self.advance();
                Token::Plus
            }
            Some('-') => {
                self.advance();
                Token::Minus
            }
            Some('*') => {
                self.advance();
                Token::Star
            }
            Some('/') => {
                self.advance();
                Token::Slash
            }
            Some('%') => {
                self.advance();
                Token::Percent
            }
            Some('^') => {
                self.advance();
                Token::Caret
            }
            Some('=') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Token::EqEq
                } else {
                    return Err(self.error("Unexpected '=' (did you mean '=='?)"));
                }
            }
            Some('!') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Token::NotEq
                } else {
                    self.advance();
                    Token::Bang
                }
            }
            Some('<') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Token::LtEq
                } else {
                    self.advance();
                    Token::Lt
                }
            }
            Some('>') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Token::GtEq
                } else {
                    self.advance();
                    Token::Gt
                }
            }
            Some('&') => {
                if self.peek_char(1) == Some('&') {
                    self.advance();
                    self.advance();
                    Token::AndAnd
                } else {
                    return Err(self.error("Unexpected '&' (did you mean '&&'?)"));
                }
            }
            Some('|') => {
                if self.peek_char(1) == Some('|') {
                    self.advance();
                    self.advance();
                    Token::OrOr
                } else {
                    return Err(self.error("Unexpected '|' (did you mean '||'?)"));
                }
            }
            Some('(') => {
                self.advance();
                Token::LParen
            }
            Some(')') => {
                self.advance();
                Token::RParen
            }
            Some('[') => {
                self.advance();
                Token::LBracket
            }
            Some(']') => {
                self.advance();
                Token::RBracket
            }
            Some('"') => Token::String(self.read_string('"')?),
            Some('\'') => Token::String(self.read_string('\'')?),
            Some(ch) if ch.is_alphabetic() || ch == '_' => Token::Identifier(self.read_identifier()),
            Some(ch) if ch.is_ascii_digit() => self.read_number()?,
            Some(ch) => return Err(self.error(format!("Unexpected character '{}'", ch))),
        };

        Ok(token)
    }
}

#[test]
fn test_path_punctuation() {
    let mut lexer = Lexer::new("$..book[?(@.price)]");
    assert_eq!(lexer.next_token().unwrap(), Token::Dollar);
    assert_eq!(lexer.next_token().unwrap(), Token::DotDot);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("book".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::LBracket);
    assert_eq!(lexer.next_token().unwrap(), Token::Question);
    assert_eq!(lexer.next_token().unwrap(), Token::LParen);
    assert_eq!(lexer.next_token().unwrap(), Token::At);
    assert_eq!(lexer.next_token().unwrap(), Token::Dot);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("price".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::RParen);
    assert_eq!(lexer.next_token().unwrap(), Token::RBracket);
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_checkpoint_rewinds() {
    let mut lexer = Lexer::new("a.b");
    let saved = lexer.checkpoint();
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("a".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Dot);
    lexer.restore(saved);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("a".to_string()));
}
