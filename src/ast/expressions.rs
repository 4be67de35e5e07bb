use std::fmt;

use crate::ast::{
    BinaryOp, JsonPath, UnaryOp,
    operators::{ATOM_PRECEDENCE, UNARY_PRECEDENCE},
    path::write_name,
};

/// Constant value written in an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
}

/// A path evaluated from the value under test (`@`) or from the document root (`$`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathRef {
    pub path: JsonPath,
    pub is_local: bool,
}

impl PathRef {
    /// `@` followed by `path`.
    pub fn local(path: JsonPath) -> Self {
        PathRef {
            path,
            is_local: true,
        }
    }

    /// `$` followed by `path`.
    pub fn root(path: JsonPath) -> Self {
        PathRef {
            path,
            is_local: false,
        }
    }
}

/// Expression tree embedded in filter (`[?( )]`) and index (`[( )]`) operators.
///
/// The tree is immutable once built; evaluation never modifies it.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `42`, `"text"`, `true`, `null`
    Literal(Literal),

    /// The single value a path selects
    ///
    /// # Examples
    /// ```text
    /// @.price
    /// $.limits.max
    /// ```
    Path(PathRef),

    /// Whether the target object has a truthy property `name`
    ///
    /// Produced from a bare property access used in a boolean position.
    ///
    /// # Example
    /// ```text
    /// $..book[?(@.isbn)]
    /// ```
    HasProperty { target: PathRef, name: String },

    /// Element count of the target array (`@.items.length`)
    Length(PathRef),

    /// Element of the target array at a fixed index (`@.items[2]`)
    ArrayIndex { target: PathRef, index: i64 },

    /// Position of `value` in the target array (`@.tags.indexOf("x")`)
    IndexOf { target: PathRef, value: Box<Expr> },

    /// Arithmetic, comparison or logical operation
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Negation or logical not
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Explicit parentheses; only affects printing
    Group(Box<Expr>),

    /// Explicit conversion marker from a host expression; evaluates as its operand
    Conversion(Box<Expr>),
}

impl Expr {
    pub fn null() -> Self {
        Expr::Literal(Literal::Null)
    }

    pub fn boolean(value: bool) -> Self {
        Expr::Literal(Literal::Boolean(value))
    }

    pub fn number(value: f64) -> Self {
        Expr::Literal(Literal::Number(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Literal(Literal::String(value.into()))
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Unary node; negating a number literal folds into a negative literal,
    /// which is what the parser produces for `-1`.
    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        match (op, operand) {
            (UnaryOp::Negate, Expr::Literal(Literal::Number(n))) => Expr::number(-n),
            (op, operand) => Expr::Unary {
                op,
                operand: Box::new(operand),
            },
        }
    }

    pub fn negate(operand: Expr) -> Self {
        Expr::unary(UnaryOp::Negate, operand)
    }

    /// Whether the expression is known to produce a boolean without evaluating it.
    pub fn is_statically_boolean(&self) -> bool {
        match self {
            Expr::Literal(Literal::Boolean(_)) | Expr::HasProperty { .. } => true,
            Expr::Binary { op, .. } => op.is_boolean(),
            Expr::Unary { op, .. } => *op == UnaryOp::Not,
            Expr::Group(inner) | Expr::Conversion(inner) => inner.is_statically_boolean(),
            _ => false,
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Binary { op, .. } => op.precedence(),
            Expr::Unary { .. } => UNARY_PRECEDENCE,
            Expr::Conversion(inner) => inner.precedence(),
            _ => ATOM_PRECEDENCE,
        }
    }

    fn write_operand(&self, f: &mut fmt::Formatter<'_>, parenthesize: bool) -> fmt::Result {
        if parenthesize {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => f.write_str("null"),
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else if n.fract() == 0.0 {
                    write!(f, "{:e}", n)
                } else {
                    write!(f, "{}", n)
                }
            }
            Literal::String(s) => {
                f.write_str("\"")?;
                for ch in s.chars() {
                    match ch {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\t' => f.write_str("\\t")?,
                        '\r' => f.write_str("\\r")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                f.write_str("\"")
            }
        }
    }
}

impl fmt::Display for PathRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_local { "@" } else { "$" })?;
        self.path.write_operators(f)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(literal) => write!(f, "{}", literal),
            Expr::Path(path) => write!(f, "{}", path),
            Expr::HasProperty { target, name } => {
                write!(f, "{}.", target)?;
                write_name(f, name)
            }
            Expr::Length(target) => write!(f, "{}.length", target),
            Expr::ArrayIndex { target, index } => write!(f, "{}[{}]", target, index),
            Expr::IndexOf { target, value } => write!(f, "{}.indexOf({})", target, value),
            Expr::Binary { op, left, right } => {
                let precedence = op.precedence();
                let (left_prec, right_prec) = (left.precedence(), right.precedence());
                left.write_operand(
                    f,
                    left_prec < precedence || (left_prec == precedence && op.is_right_associative()),
                )?;
                f.write_str(op.symbol())?;
                right.write_operand(
                    f,
                    right_prec < precedence || (right_prec == precedence && !op.is_right_associative()),
                )
            }
            Expr::Unary { op, operand } => {
                f.write_str(op.symbol())?;
                operand.write_operand(f, operand.precedence() < UNARY_PRECEDENCE)
            }
            Expr::Group(inner) => write!(f, "({})", inner),
            Expr::Conversion(inner) => write!(f, "{}", inner),
        }
    }
}
