//! # Clove Path - Abstract Syntax Tree
//!
//! Intermediate representation shared by every front-end (string parser,
//! builder, host-expression translator) and consumed by the evaluator.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[path]** - [`JsonPath`] and its pipeline [`Operator`]s
//! - **[slice]** - Index and `start:end:step` range descriptors
//! - **[expressions]** - Filter and index expression trees
//! - **[operators]** - Binary and unary expression operators with precedence
//!
//! ## Path Structure
//!
//! A path is the root `$` followed by operators applied left to right:
//!
//! ```text
//! $.store.book[?(@.price < 10)].title
//! ```
//!
//! - **Name** `.title`, `.'quoted'`, `.*`
//! - **Length** `.length` (bare only; `.'length'` is a property name)
//! - **Array** `[0]`, `[1:3]`, `[*]`, `[?(filter)]`, `[(index)]`
//! - **Search** `..author`, `..*`, `..[0]`
//!
//! Every node implements `Display` producing canonical text that parses back
//! to an equal tree.
pub mod tokens;
pub mod path;
pub mod slice;
pub mod expressions;
pub mod operators;

pub use tokens::Token;
pub use path::{ArraySelector, JsonPath, NameSelector, Operator, SearchTarget};
pub use slice::Slice;
pub use expressions::{Expr, Literal, PathRef};
pub use operators::{BinaryOp, UnaryOp};
