pub mod ast;
pub mod builder;
pub mod cli;
pub mod error;
pub mod evaluator;
pub mod host;
pub mod lexer;
pub mod parser;
pub mod translator;
pub mod value;

pub use ast::{
    ArraySelector, BinaryOp, Expr, JsonPath, Literal, NameSelector, Operator, PathRef, SearchTarget,
    Slice, Token, UnaryOp,
};
pub use error::{EvalError, QueryError, SyntaxError};
pub use evaluator::{Evaluator, JsonPathQuery};
pub use host::{CurrentArray, HostBinaryOp, HostExpr, HostUnaryOp, Placeholder, ScannedValue};
pub use lexer::Lexer;
pub use parser::{Parser, parse, parse_expression, parse_filter_expression, rewrite_boolean_context};
pub use translator::{translate, translate_filter, translate_index};
pub use value::Value;
