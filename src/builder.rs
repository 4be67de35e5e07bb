//! Fluent construction of paths.
//!
//! Every method returns a new [`JsonPath`] with one operator appended and
//! leaves the receiver untouched, so a prefix can be shared between branches.
//!
//! ```
//! use clove_path::{JsonPath, Slice, parse};
//!
//! let books = JsonPath::root().name("store").name("book");
//! let first = books.array(Slice::index(0));
//! let last = books.array(Slice::range(Some(-1), None));
//!
//! assert_eq!(first, parse("$.store.book[0]").unwrap());
//! assert_eq!(last.to_string(), "$.store.book[-1:]");
//! assert_eq!(books.to_string(), "$.store.book");
//! ```

use crate::{
    ast::{ArraySelector, Expr, JsonPath, NameSelector, Operator, SearchTarget, Slice},
    error::EvalError,
    host::{CurrentArray, HostExpr, ScannedValue},
    parser::rewrite_boolean_context,
    translator::{translate_filter, translate_index},
};

impl JsonPath {
    /// `.key`
    pub fn name(&self, key: impl Into<String>) -> Self {
        self.with(Operator::Name(NameSelector::Key(key.into())))
    }

    /// `.*`
    pub fn wildcard(&self) -> Self {
        self.with(Operator::Name(NameSelector::Wildcard))
    }

    /// `.length`
    pub fn length(&self) -> Self {
        self.with(Operator::Length)
    }

    /// `..key`
    pub fn search(&self, key: impl Into<String>) -> Self {
        self.with(Operator::Search(SearchTarget::Name(NameSelector::Key(key.into()))))
    }

    /// `..*`
    pub fn search_wildcard(&self) -> Self {
        self.with(Operator::Search(SearchTarget::Name(NameSelector::Wildcard)))
    }

    /// `..length`
    pub fn search_length(&self) -> Self {
        self.with(Operator::Search(SearchTarget::Length))
    }

    /// `[slice]`
    pub fn array(&self, slice: Slice) -> Self {
        self.with(Operator::Array(ArraySelector::Slices(vec![slice])))
    }

    /// `[a,b,...]`; `None` for an empty list, which has no text form.
    pub fn array_union(&self, slices: impl IntoIterator<Item = Slice>) -> Option<Self> {
        let slices: Vec<Slice> = slices.into_iter().collect();
        if slices.is_empty() {
            return None;
        }
        Some(self.with(Operator::Array(ArraySelector::Slices(slices))))
    }

    /// `[*]`
    pub fn array_wildcard(&self) -> Self {
        self.with(Operator::Array(ArraySelector::Wildcard))
    }

    /// `[?(predicate)]`; bare property references in the predicate become
    /// has-property tests as they do in parsed filters.
    pub fn filter(&self, predicate: Expr) -> Self {
        self.with(Operator::Array(ArraySelector::Filter(rewrite_boolean_context(
            predicate, true,
        ))))
    }

    /// `[(index)]`
    pub fn index(&self, index: Expr) -> Self {
        self.with(Operator::Array(ArraySelector::Index(rewrite_boolean_context(
            index, false,
        ))))
    }

    /// `..[selector]`
    pub fn search_array(&self, selector: ArraySelector) -> Self {
        let selector = match selector {
            ArraySelector::Filter(predicate) => {
                ArraySelector::Filter(rewrite_boolean_context(predicate, true))
            }
            ArraySelector::Index(index) => ArraySelector::Index(rewrite_boolean_context(index, false)),
            other => other,
        };
        self.with(Operator::Search(SearchTarget::Array(selector)))
    }

    /// `[?(predicate)]` from a captured host expression.
    ///
    /// # Examples
    /// ```
    /// use clove_path::{JsonPath, parse};
    ///
    /// let cheap = JsonPath::root()
    ///     .search("book")
    ///     .filter_with(|book| book.name("price").less_than(10))
    ///     .unwrap();
    /// assert_eq!(cheap, parse("$..book[?(@.price<10)]").unwrap());
    /// ```
    pub fn filter_with<F>(&self, predicate: F) -> Result<Self, EvalError>
    where
        F: FnOnce(ScannedValue) -> HostExpr,
    {
        let expr = translate_filter(&predicate(ScannedValue))?;
        Ok(self.with(Operator::Array(ArraySelector::Filter(expr))))
    }

    /// `[(index)]` from a captured host expression.
    pub fn index_with<F>(&self, index: F) -> Result<Self, EvalError>
    where
        F: FnOnce(CurrentArray) -> HostExpr,
    {
        let expr = translate_index(&index(CurrentArray))?;
        Ok(self.with(Operator::Array(ArraySelector::Index(expr))))
    }

    /// `..[?(predicate)]` from a captured host expression.
    pub fn search_filter_with<F>(&self, predicate: F) -> Result<Self, EvalError>
    where
        F: FnOnce(ScannedValue) -> HostExpr,
    {
        let expr = translate_filter(&predicate(ScannedValue))?;
        Ok(self.with(Operator::Search(SearchTarget::Array(ArraySelector::Filter(expr)))))
    }
}
