//! Host-side expression capture.
//!
//! Closures passed to [`JsonPath::filter_with`](crate::JsonPath::filter_with)
//! and friends receive a placeholder marker and build a [`HostExpr`] tree with
//! ordinary Rust operators and method calls. Nothing here ever touches a
//! document; the tree only records what was written, and
//! [`translate`](crate::translate) turns it into an [`Expr`](crate::Expr).
//!
//! ```
//! use clove_path::{HostExpr, ScannedValue};
//!
//! let item = ScannedValue;
//! let cheap = (item.name("price") * 2).less_than(20);
//! assert!(matches!(cheap, HostExpr::Binary { .. }));
//! ```

use std::ops::{Add, Div, Mul, Neg, Not, Rem, Sub};

use serde_json::Value as JsonValue;

/// The value a placeholder stands for while an expression is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// Element currently tested by a filter (`@` in `[?( )]`)
    ScannedValue,
    /// Array an index expression runs against (`@` in `[( )]`)
    CurrentArray,
    /// The whole document (`$`)
    Root,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostBinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
    Equal,
    NotEqual,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
    AndAlso,
    OrElse,
    /// `a ?? b`; captured but has no path equivalent
    Coalesce,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostUnaryOp {
    Negate,
    Not,
    /// Explicit type conversion
    Convert,
}

/// A captured host expression.
#[derive(Debug, Clone, PartialEq)]
pub enum HostExpr {
    Parameter(Placeholder),
    Constant(JsonValue),
    Binary {
        op: HostBinaryOp,
        left: Box<HostExpr>,
        right: Box<HostExpr>,
    },
    Unary {
        op: HostUnaryOp,
        operand: Box<HostExpr>,
    },
    /// `receiver.method(args)`
    MemberCall {
        receiver: Box<HostExpr>,
        method: String,
        args: Vec<HostExpr>,
    },
    /// `receiver.member`
    MemberAccess {
        receiver: Box<HostExpr>,
        member: String,
    },
}

/// Placeholder for the element a filter is testing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScannedValue;

/// Placeholder for the array an index expression is evaluated against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CurrentArray;

impl HostExpr {
    /// Placeholder for the document root.
    pub fn root() -> Self {
        HostExpr::Parameter(Placeholder::Root)
    }

    pub fn constant(value: impl Into<JsonValue>) -> Self {
        HostExpr::Constant(value.into())
    }

    fn binary(self, op: HostBinaryOp, right: impl Into<HostExpr>) -> Self {
        HostExpr::Binary {
            op,
            left: Box::new(self),
            right: Box::new(right.into()),
        }
    }

    fn unary(self, op: HostUnaryOp) -> Self {
        HostExpr::Unary {
            op,
            operand: Box::new(self),
        }
    }

    /// Arbitrary method call; only the path methods below translate.
    pub fn call(self, method: impl Into<String>, args: Vec<HostExpr>) -> Self {
        HostExpr::MemberCall {
            receiver: Box::new(self),
            method: method.into(),
            args,
        }
    }

    /// Arbitrary member access; only `Length` translates.
    pub fn member(self, member: impl Into<String>) -> Self {
        HostExpr::MemberAccess {
            receiver: Box::new(self),
            member: member.into(),
        }
    }

    pub fn name(self, key: impl Into<String>) -> Self {
        self.call("Name", vec![HostExpr::Constant(JsonValue::String(key.into()))])
    }

    pub fn has_property(self, key: impl Into<String>) -> Self {
        self.call("HasProperty", vec![HostExpr::Constant(JsonValue::String(key.into()))])
    }

    pub fn length(self) -> Self {
        self.call("Length", vec![])
    }

    pub fn array_index(self, index: i64) -> Self {
        self.call("ArrayIndex", vec![HostExpr::constant(index)])
    }

    pub fn index_of(self, value: impl Into<HostExpr>) -> Self {
        self.call("IndexOf", vec![value.into()])
    }

    pub fn equals(self, other: impl Into<HostExpr>) -> Self {
        self.binary(HostBinaryOp::Equal, other)
    }

    pub fn not_equals(self, other: impl Into<HostExpr>) -> Self {
        self.binary(HostBinaryOp::NotEqual, other)
    }

    pub fn less_than(self, other: impl Into<HostExpr>) -> Self {
        self.binary(HostBinaryOp::LessThan, other)
    }

    pub fn less_or_equal(self, other: impl Into<HostExpr>) -> Self {
        self.binary(HostBinaryOp::LessOrEqual, other)
    }

    pub fn greater_than(self, other: impl Into<HostExpr>) -> Self {
        self.binary(HostBinaryOp::GreaterThan, other)
    }

    pub fn greater_or_equal(self, other: impl Into<HostExpr>) -> Self {
        self.binary(HostBinaryOp::GreaterOrEqual, other)
    }

    pub fn and(self, other: impl Into<HostExpr>) -> Self {
        self.binary(HostBinaryOp::AndAlso, other)
    }

    pub fn or(self, other: impl Into<HostExpr>) -> Self {
        self.binary(HostBinaryOp::OrElse, other)
    }

    pub fn pow(self, exponent: impl Into<HostExpr>) -> Self {
        self.binary(HostBinaryOp::Power, exponent)
    }

    pub fn coalesce(self, fallback: impl Into<HostExpr>) -> Self {
        self.binary(HostBinaryOp::Coalesce, fallback)
    }

    pub fn convert(self) -> Self {
        self.unary(HostUnaryOp::Convert)
    }
}

macro_rules! marker_methods {
    ($marker:ty) => {
        impl $marker {
            pub fn name(self, key: impl Into<String>) -> HostExpr {
                HostExpr::from(self).name(key)
            }

            pub fn has_property(self, key: impl Into<String>) -> HostExpr {
                HostExpr::from(self).has_property(key)
            }

            pub fn length(self) -> HostExpr {
                HostExpr::from(self).length()
            }

            pub fn array_index(self, index: i64) -> HostExpr {
                HostExpr::from(self).array_index(index)
            }

            pub fn index_of(self, value: impl Into<HostExpr>) -> HostExpr {
                HostExpr::from(self).index_of(value)
            }
        }
    };
}

marker_methods!(ScannedValue);
marker_methods!(CurrentArray);

impl From<ScannedValue> for HostExpr {
    fn from(_: ScannedValue) -> Self {
        HostExpr::Parameter(Placeholder::ScannedValue)
    }
}

impl From<CurrentArray> for HostExpr {
    fn from(_: CurrentArray) -> Self {
        HostExpr::Parameter(Placeholder::CurrentArray)
    }
}

impl From<JsonValue> for HostExpr {
    fn from(value: JsonValue) -> Self {
        HostExpr::Constant(value)
    }
}

macro_rules! constant_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for HostExpr {
                fn from(value: $ty) -> Self {
                    HostExpr::Constant(JsonValue::from(value))
                }
            }
        )*
    };
}

constant_from!(i32, i64, u32, u64, f64, bool, &str, String);

macro_rules! binary_operator {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<T: Into<HostExpr>> $trait<T> for HostExpr {
            type Output = HostExpr;

            fn $method(self, rhs: T) -> HostExpr {
                self.binary($op, rhs)
            }
        }
    };
}

binary_operator!(Add, add, HostBinaryOp::Add);
binary_operator!(Sub, sub, HostBinaryOp::Subtract);
binary_operator!(Mul, mul, HostBinaryOp::Multiply);
binary_operator!(Div, div, HostBinaryOp::Divide);
binary_operator!(Rem, rem, HostBinaryOp::Modulo);

impl Neg for HostExpr {
    type Output = HostExpr;

    fn neg(self) -> HostExpr {
        self.unary(HostUnaryOp::Negate)
    }
}

impl Not for HostExpr {
    type Output = HostExpr;

    fn not(self) -> HostExpr {
        self.unary(HostUnaryOp::Not)
    }
}
