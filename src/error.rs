use thiserror::Error;

/// A violation of the path grammar or the filter/index expression grammar.
///
/// Parsing never recovers: the first violation aborts and no partial path is returned.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Syntax error after '{consumed}': {message}")]
pub struct SyntaxError {
    /// Input accepted before the offending token
    pub consumed: String,
    /// What went wrong
    pub message: String,
}

impl SyntaxError {
    pub fn new(consumed: impl Into<String>, message: impl Into<String>) -> Self {
        SyntaxError {
            consumed: consumed.into(),
            message: message.into(),
        }
    }
}

/// Errors raised while evaluating a path or translating a host expression.
///
/// Wrong-kind operands, missing properties and the like are not errors; they
/// evaluate to `null`, `false` or an empty selection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A path reference used as a single value selected several values
    #[error("Path '{path}' selected {count} values where a single value is required")]
    AmbiguousPath { path: String, count: usize },

    /// A host expression node the translator has no mapping for
    #[error("Unsupported expression: {0}")]
    UnsupportedExpression(String),

    /// A host constant of a JSON kind that has no literal form
    #[error("Cannot use a {0} constant as an expression literal")]
    InvalidLiteral(&'static str),
}

/// Either failure of a one-shot text query.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}
