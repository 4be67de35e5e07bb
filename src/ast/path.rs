use std::{fmt, sync::LazyLock};

use regex::Regex;

use crate::ast::{Expr, Slice};

/// Names that can be written without quotes after a `.`.
static BARE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{Alphabetic}_][\p{Alphabetic}\p{N}_]*$").expect("identifier pattern is valid")
});

/// A compiled JSON path: the ordered pipeline of operators applied to a document.
///
/// Two paths are equal when their operator sequences are equal. The `Display`
/// form is the canonical text, which parses back to an equal path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsonPath {
    operators: Vec<Operator>,
}

/// Property selection by exact key or for every property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NameSelector {
    Key(String),
    Wildcard,
}

/// What an `[...]` operator selects from an array.
#[derive(Debug, Clone, PartialEq)]
pub enum ArraySelector {
    /// `[*]` - every element (every value for objects)
    Wildcard,
    /// `[0,2:4]` - indices and ranges, concatenated in order
    Slices(Vec<Slice>),
    /// `[(expr)]` - one element at a computed index
    Index(Expr),
    /// `[?(expr)]` - elements for which the predicate holds
    Filter(Expr),
}

/// The match applied at every node visited by a recursive search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchTarget {
    Name(NameSelector),
    Length,
    Array(ArraySelector),
}

/// One pipeline stage of a path.
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    /// `.name`, `.'quoted name'` or `.*`
    Name(NameSelector),
    /// Bare `.length`: element count of each array candidate
    Length,
    /// `[...]`
    Array(ArraySelector),
    /// `..target`
    Search(SearchTarget),
}

impl JsonPath {
    /// The path `$`, selecting the document itself.
    pub fn root() -> Self {
        JsonPath::default()
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// Copy of this path with one more operator; the original is left untouched.
    pub fn with(&self, operator: Operator) -> Self {
        let mut operators = Vec::with_capacity(self.operators.len() + 1);
        operators.extend_from_slice(&self.operators);
        operators.push(operator);
        JsonPath { operators }
    }

    pub fn last(&self) -> Option<&Operator> {
        self.operators.last()
    }

    /// Copy of this path without its final operator.
    pub fn parent(&self) -> Self {
        let keep = self.operators.len().saturating_sub(1);
        JsonPath {
            operators: self.operators[..keep].to_vec(),
        }
    }

    /// Writes the operators without the leading `$`.
    pub(crate) fn write_operators(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.operators.iter().try_for_each(|op| write!(f, "{}", op))
    }
}

impl From<Vec<Operator>> for JsonPath {
    fn from(operators: Vec<Operator>) -> Self {
        JsonPath { operators }
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        self.write_operators(f)
    }
}

/// Writes a property name in dot position, quoting it when a bare name would
/// not parse back to the same key.
pub(crate) fn write_name(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    if name != "length" && BARE_NAME.is_match(name) {
        return f.write_str(name);
    }
    f.write_str("'")?;
    for ch in name.chars() {
        match ch {
            '\'' => f.write_str("\\'")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c => write!(f, "{}", c)?,
        }
    }
    f.write_str("'")
}

impl fmt::Display for NameSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameSelector::Key(name) => write_name(f, name),
            NameSelector::Wildcard => f.write_str("*"),
        }
    }
}

impl fmt::Display for ArraySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArraySelector::Wildcard => f.write_str("*"),
            ArraySelector::Slices(slices) => {
                for (i, slice) in slices.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", slice)?;
                }
                Ok(())
            }
            ArraySelector::Index(expr) => write!(f, "({})", expr),
            ArraySelector::Filter(expr) => write!(f, "?({})", expr),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Name(name) => write!(f, ".{}", name),
            Operator::Length => f.write_str(".length"),
            Operator::Array(selector) => write!(f, "[{}]", selector),
            Operator::Search(SearchTarget::Name(name)) => write!(f, "..{}", name),
            Operator::Search(SearchTarget::Length) => f.write_str("..length"),
            Operator::Search(SearchTarget::Array(selector)) => write!(f, "..[{}]", selector),
        }
    }
}
