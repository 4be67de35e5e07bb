//! Shunting-yard parser for filter and index expressions.
//!
//! Operands are literals and path references; a path reference re-enters the
//! path grammar for its suffix and may end in `.length`, `.indexOf(...)` or a
//! single `[index]`, which become dedicated leaves.

use std::mem;

use crate::{
    ast::{ArraySelector, BinaryOp, Expr, JsonPath, Operator, PathRef, Slice, Token, UnaryOp},
    error::SyntaxError,
    parser::{Parser, rewrite::rewrite_boolean_context},
};

/// Where an expression ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    /// The whole input is the expression
    EndOfInput,
    /// An unmatched `)`, left unconsumed for the caller
    CloseParen,
}

/// Entries of the operator stack.
#[derive(Debug, Clone, Copy)]
enum Pending {
    Binary(BinaryOp),
    Unary(UnaryOp),
    Open,
}

fn binary_op(token: &Token) -> Option<BinaryOp> {
    Some(match token {
        Token::Plus => BinaryOp::Add,
        Token::Minus => BinaryOp::Subtract,
        Token::Star => BinaryOp::Multiply,
        Token::Slash => BinaryOp::Divide,
        Token::Percent => BinaryOp::Modulo,
        Token::Caret => BinaryOp::Exponent,
        Token::EqEq => BinaryOp::Equal,
        Token::NotEq => BinaryOp::NotEqual,
        Token::Lt => BinaryOp::LessThan,
        Token::LtEq => BinaryOp::LessOrEqual,
        Token::Gt => BinaryOp::GreaterThan,
        Token::GtEq => BinaryOp::GreaterOrEqual,
        Token::AndAnd => BinaryOp::And,
        Token::OrOr => BinaryOp::Or,
        _ => return None,
    })
}

impl Parser {
    /// Parse the whole input as one expression.
    pub fn parse_expression(&mut self) -> Result<Expr, SyntaxError> {
        let expr = self.parse_expression_until(Terminator::EndOfInput)?;
        self.expect(Token::Eof)?;
        Ok(rewrite_boolean_context(expr, false))
    }

    /// Parse the whole input as a filter predicate.
    pub fn parse_filter_expression(&mut self) -> Result<Expr, SyntaxError> {
        let expr = self.parse_expression_until(Terminator::EndOfInput)?;
        self.expect(Token::Eof)?;
        Ok(rewrite_boolean_context(expr, true))
    }

    /// Body of `[?( ... )]`, stopping before the closing parenthesis.
    pub(crate) fn parse_filter_body(&mut self) -> Result<Expr, SyntaxError> {
        let expr = self.parse_expression_until(Terminator::CloseParen)?;
        Ok(rewrite_boolean_context(expr, true))
    }

    /// Body of `[( ... )]`, stopping before the closing parenthesis.
    pub(crate) fn parse_index_body(&mut self) -> Result<Expr, SyntaxError> {
        let expr = self.parse_expression_until(Terminator::CloseParen)?;
        Ok(rewrite_boolean_context(expr, false))
    }

    fn parse_expression_until(&mut self, terminator: Terminator) -> Result<Expr, SyntaxError> {
        let mut output: Vec<Expr> = vec![];
        let mut pending: Vec<Pending> = vec![];
        let mut depth = 0usize;
        // `-` is negation whenever an operand is expected
        let mut expect_operand = true;

        loop {
            if expect_operand {
                match self.current_token {
                    Token::Minus => {
                        self.advance()?;
                        pending.push(Pending::Unary(UnaryOp::Negate));
                    }
                    Token::Bang => {
                        self.advance()?;
                        pending.push(Pending::Unary(UnaryOp::Not));
                    }
                    Token::LParen => {
                        self.advance()?;
                        pending.push(Pending::Open);
                        depth += 1;
                    }
                    Token::RParen | Token::RBracket | Token::Eof => {
                        return Err(if output.is_empty() && pending.is_empty() {
                            self.error("Empty expression")
                        } else {
                            self.error(format!(
                                "Expected an operand, found {}",
                                self.current_token.describe()
                            ))
                        });
                    }
                    _ => {
                        let operand = self.parse_operand()?;
                        output.push(operand);
                        expect_operand = false;
                    }
                }
                continue;
            }

            if let Some(op) = binary_op(&self.current_token) {
                self.advance()?;
                while let Some(&top) = pending.last() {
                    let reduce_first = match top {
                        Pending::Unary(_) => true,
                        Pending::Binary(previous) => {
                            previous.precedence() > op.precedence()
                                || (previous.precedence() == op.precedence()
                                    && !op.is_right_associative())
                        }
                        Pending::Open => false,
                    };
                    if !reduce_first {
                        break;
                    }
                    pending.pop();
                    self.reduce(&mut output, top)?;
                }
                pending.push(Pending::Binary(op));
                expect_operand = true;
                continue;
            }

            match self.current_token {
                Token::RParen if depth > 0 => {
                    self.advance()?;
                    loop {
                        match pending.pop() {
                            Some(Pending::Open) => break,
                            Some(entry) => self.reduce(&mut output, entry)?,
                            None => return Err(self.error("Unbalanced ')'")),
                        }
                    }
                    depth -= 1;
                }
                Token::RParen if terminator == Terminator::CloseParen => break,
                Token::Eof if terminator == Terminator::EndOfInput => break,
                Token::RParen => return Err(self.error("Unbalanced ')'")),
                Token::Eof => return Err(self.error("Missing ')' at end of expression")),
                _ => {
                    return Err(self.error(format!(
                        "Unexpected {} in expression",
                        self.current_token.describe()
                    )));
                }
            }
        }

        if depth > 0 {
            return Err(self.error("Unclosed '(' in expression"));
        }
        while let Some(entry) = pending.pop() {
            self.reduce(&mut output, entry)?;
        }

        match (output.pop(), output.is_empty()) {
            (Some(expr), true) => Ok(expr),
            (None, _) => Err(self.error("Empty expression")),
            (Some(_), false) => Err(self.error("Malformed expression")),
        }
    }

    fn reduce(&self, output: &mut Vec<Expr>, entry: Pending) -> Result<(), SyntaxError> {
        let missing = || self.error("Operator is missing an operand");
        let expr = match entry {
            Pending::Binary(op) => {
                let right = output.pop().ok_or_else(missing)?;
                let left = output.pop().ok_or_else(missing)?;
                Expr::binary(op, left, right)
            }
            Pending::Unary(UnaryOp::Negate) => Expr::negate(output.pop().ok_or_else(missing)?),
            Pending::Unary(UnaryOp::Not) => {
                Expr::unary(UnaryOp::Not, output.pop().ok_or_else(missing)?)
            }
            Pending::Open => return Err(self.error("Unbalanced '('")),
        };
        output.push(expr);
        Ok(())
    }

    /// Parse literal values, `@...` and `$...` references
    fn parse_operand(&mut self) -> Result<Expr, SyntaxError> {
        match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Integer(n) => {
                self.advance()?;
                Ok(Expr::number(n as f64))
            }
            Token::Float(n) => {
                self.advance()?;
                Ok(Expr::number(n))
            }
            Token::String(s) => {
                self.advance()?;
                Ok(Expr::string(s))
            }
            Token::Identifier(word) => match word.as_str() {
                "true" | "false" => {
                    self.advance()?;
                    Ok(Expr::boolean(word == "true"))
                }
                "null" => {
                    self.advance()?;
                    Ok(Expr::null())
                }
                _ => Err(self.error(format!(
                    "Unrecognized name '{}' (property access needs '@.' or '$.')",
                    word
                ))),
            },
            Token::At => {
                self.advance()?;
                self.parse_path_reference(true)
            }
            Token::Dollar => {
                self.advance()?;
                self.parse_path_reference(false)
            }
            token => Err(self.error(format!("Unrecognized token {}", token.describe()))),
        }
    }

    /// Parse the path after `@` or `$` and classify the leaf it forms.
    fn parse_path_reference(&mut self, is_local: bool) -> Result<Expr, SyntaxError> {
        let path = JsonPath::from(self.parse_operators(true)?);
        let target = PathRef { path, is_local };

        if self.check(&Token::Dot) && self.at_index_of()? {
            self.advance()?; // .
            self.advance()?; // indexOf
            self.expect(Token::LParen)?;
            let value = self.parse_expression_until(Terminator::CloseParen)?;
            self.expect(Token::RParen)?;
            return Ok(Expr::IndexOf {
                target,
                value: Box::new(value),
            });
        }

        Ok(classify_leaf(target))
    }
}

/// `.length` and a single trailing `[index]` get their own leaves; everything
/// else retrieves the selected value.
fn classify_leaf(target: PathRef) -> Expr {
    let PathRef { path, is_local } = target;

    let single_index = match path.last() {
        Some(Operator::Array(ArraySelector::Slices(slices))) => match slices.as_slice() {
            [Slice::Index(index)] => Some(*index),
            _ => None,
        },
        _ => None,
    };
    if let Some(index) = single_index {
        return Expr::ArrayIndex {
            target: PathRef {
                path: path.parent(),
                is_local,
            },
            index,
        };
    }

    if matches!(path.last(), Some(Operator::Length)) {
        return Expr::Length(PathRef {
            path: path.parent(),
            is_local,
        });
    }

    Expr::Path(PathRef { path, is_local })
}
