use std::borrow::Cow;

use log::trace;
use rust_decimal::{Decimal, prelude::FromPrimitive, prelude::ToPrimitive};
use serde_json::Value as JsonValue;

use crate::{
    ast::{
        ArraySelector, BinaryOp, Expr, JsonPath, Literal, NameSelector, Operator, PathRef,
        SearchTarget, Slice, UnaryOp,
    },
    error::{EvalError, QueryError},
    parser::parse,
    value::{Value, json_equals},
};

/// Values selected so far; borrowed from the document except for computed lengths.
pub type Candidates<'v> = Vec<Cow<'v, JsonValue>>;

/// Executes paths and expressions against one document.
///
/// The evaluator only reads the document; every result is freshly allocated.
///
/// # Examples
///
/// ```
/// use clove_path::{Evaluator, parse};
/// use serde_json::json;
///
/// let doc = json!({"items": [1, 2, 3]});
/// let path = parse("$.items[-1:]").unwrap();
///
/// let evaluator = Evaluator::new(&doc);
/// let selected = evaluator.select(&path, &doc).unwrap();
/// assert_eq!(selected.len(), 1);
/// assert_eq!(*selected[0], json!(3));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'r> {
    /// The document `$` refers to
    root: &'r JsonValue,
}

impl JsonPath {
    /// Evaluates the path against `document`, returning the selected values in
    /// selection order. Duplicates are kept.
    pub fn evaluate(&self, document: &JsonValue) -> Result<Vec<JsonValue>, EvalError> {
        let selected = Evaluator::new(document).select(self, document)?;
        Ok(selected.into_iter().map(Cow::into_owned).collect())
    }
}

/// Run path text directly against a document.
///
/// # Examples
///
/// ```
/// use clove_path::JsonPathQuery;
/// use serde_json::json;
///
/// let doc = json!({"a": [{"b": 1}, {"b": 2}]});
/// assert_eq!(doc.query("$.a[*].b").unwrap(), vec![json!(1), json!(2)]);
/// ```
pub trait JsonPathQuery {
    fn query(&self, path: &str) -> Result<Vec<JsonValue>, QueryError>;
}

impl JsonPathQuery for JsonValue {
    fn query(&self, path: &str) -> Result<Vec<JsonValue>, QueryError> {
        Ok(parse(path)?.evaluate(self)?)
    }
}

fn is_truthy(value: &JsonValue) -> bool {
    !matches!(value, JsonValue::Null | JsonValue::Bool(false))
}

impl<'r> Evaluator<'r> {
    pub fn new(root: &'r JsonValue) -> Self {
        Evaluator { root }
    }

    /// Runs `path` starting from `start`, folding each operator over the
    /// candidate set.
    pub fn select<'v>(&self, path: &JsonPath, start: &'v JsonValue) -> Result<Candidates<'v>, EvalError> {
        let mut candidates: Candidates<'v> = vec![Cow::Borrowed(start)];
        for operator in path.operators() {
            candidates = self.apply(operator, candidates)?;
            trace!("applied {} -> {} candidates", operator, candidates.len());
        }
        Ok(candidates)
    }

    fn apply<'v>(&self, operator: &Operator, candidates: Candidates<'v>) -> Result<Candidates<'v>, EvalError> {
        let mut selected = Vec::new();
        for candidate in candidates {
            match candidate {
                Cow::Borrowed(value) => self.select_into(operator, value, &mut selected)?,
                Cow::Owned(value) => {
                    let mut hits = Vec::new();
                    self.select_into(operator, &value, &mut hits)?;
                    selected.extend(hits.into_iter().map(|hit| Cow::Owned(hit.into_owned())));
                }
            }
        }
        Ok(selected)
    }

    fn select_into<'c>(
        &self,
        operator: &Operator,
        value: &'c JsonValue,
        out: &mut Candidates<'c>,
    ) -> Result<(), EvalError> {
        match operator {
            Operator::Name(selector) => select_name(selector, value, out),
            Operator::Length => select_length(value, out),
            Operator::Array(selector) => self.select_array(selector, value, out)?,
            Operator::Search(target) => self.search(target, value, out)?,
        }
        Ok(())
    }

    fn select_array<'c>(
        &self,
        selector: &ArraySelector,
        value: &'c JsonValue,
        out: &mut Candidates<'c>,
    ) -> Result<(), EvalError> {
        match (selector, value) {
            // objects are accepted by `[*]` for compatibility
            (ArraySelector::Wildcard, JsonValue::Object(map)) => {
                out.extend(map.values().map(Cow::Borrowed));
            }
            (ArraySelector::Wildcard, JsonValue::Array(items)) => {
                out.extend(items.iter().map(Cow::Borrowed));
            }
            (ArraySelector::Slices(slices), JsonValue::Array(items)) => {
                for slice in slices {
                    out.extend(slice.resolve(items.len()).into_iter().map(|i| Cow::Borrowed(&items[i])));
                }
            }
            (ArraySelector::Index(expr), JsonValue::Array(items)) => {
                if let Value::Number(n) = self.evaluate_expression(expr, value)?
                    && n.fract() == 0.0
                {
                    out.extend(
                        Slice::Index(n as i64)
                            .resolve(items.len())
                            .into_iter()
                            .map(|i| Cow::Borrowed(&items[i])),
                    );
                }
            }
            (ArraySelector::Filter(expr), JsonValue::Array(items)) => {
                for item in items {
                    if self.evaluate_expression(expr, item)?.is_truthy() {
                        out.push(Cow::Borrowed(item));
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Pre-order descent: match at the node itself, then visit its children in
    /// document order whether or not the node matched.
    fn search<'c>(
        &self,
        target: &SearchTarget,
        node: &'c JsonValue,
        out: &mut Candidates<'c>,
    ) -> Result<(), EvalError> {
        match target {
            SearchTarget::Name(selector) => select_name(selector, node, out),
            SearchTarget::Length => select_length(node, out),
            SearchTarget::Array(selector) => self.select_array(selector, node, out)?,
        }

        match node {
            JsonValue::Array(items) => {
                for item in items {
                    self.search(target, item, out)?;
                }
            }
            JsonValue::Object(map) => {
                for child in map.values() {
                    self.search(target, child, out)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Evaluates a filter or index expression with `local` as `@`.
    ///
    /// Wrong-kind operands and missing values give `null` or `false`; the only
    /// error is a path reference selecting more than one value.
    pub fn evaluate_expression(&self, expr: &Expr, local: &JsonValue) -> Result<Value, EvalError> {
        let value = match expr {
            Expr::Literal(literal) => literal_value(literal),
            Expr::Path(path) => self
                .resolve(path, local)?
                .map(|found| Value::from_json(&found))
                .unwrap_or(Value::Null),
            Expr::HasProperty { target, name } => {
                let present = match self.resolve(target, local)?.as_deref() {
                    Some(JsonValue::Object(map)) => map.get(name).is_some_and(is_truthy),
                    _ => false,
                };
                Value::Boolean(present)
            }
            Expr::Length(target) => match self.resolve(target, local)?.as_deref() {
                Some(JsonValue::Array(items)) => Value::Number(items.len() as f64),
                _ => Value::Null,
            },
            Expr::ArrayIndex { target, index } => match self.resolve(target, local)?.as_deref() {
                Some(JsonValue::Array(items)) => Slice::Index(*index)
                    .resolve(items.len())
                    .first()
                    .map(|&i| Value::from_json(&items[i]))
                    .unwrap_or(Value::Null),
                _ => Value::Null,
            },
            Expr::IndexOf { target, value } => {
                let needle = self.evaluate_expression(value, local)?.into_json();
                match self.resolve(target, local)?.as_deref() {
                    Some(JsonValue::Array(items)) => Value::Number(
                        items
                            .iter()
                            .position(|item| json_equals(item, &needle))
                            .map(|i| i as f64)
                            .unwrap_or(-1.0),
                    ),
                    _ => Value::Null,
                }
            }
            Expr::Binary { op, left, right } => self.evaluate_binary(*op, left, right, local)?,
            Expr::Unary {
                op: UnaryOp::Negate,
                operand,
            } => match self.evaluate_expression(operand, local)? {
                Value::Number(n) => Value::Number(-n),
                _ => Value::Null,
            },
            Expr::Unary {
                op: UnaryOp::Not,
                operand,
            } => Value::Boolean(!self.evaluate_expression(operand, local)?.is_truthy()),
            Expr::Group(inner) | Expr::Conversion(inner) => self.evaluate_expression(inner, local)?,
        };
        Ok(value)
    }

    /// The single value a path reference selects, if any.
    fn resolve<'v>(&self, path: &PathRef, local: &'v JsonValue) -> Result<Option<Cow<'v, JsonValue>>, EvalError>
    where
        'r: 'v,
    {
        let start = if path.is_local { local } else { self.root };
        let mut selected = self.select(&path.path, start)?;
        match selected.len() {
            0 => Ok(None),
            1 => Ok(selected.pop()),
            count => Err(EvalError::AmbiguousPath {
                path: path.to_string(),
                count,
            }),
        }
    }

    fn evaluate_binary(
        &self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
        local: &JsonValue,
    ) -> Result<Value, EvalError> {
        match op {
            BinaryOp::And => {
                if !self.evaluate_expression(left, local)?.is_truthy() {
                    return Ok(Value::Boolean(false));
                }
                Ok(Value::Boolean(self.evaluate_expression(right, local)?.is_truthy()))
            }
            BinaryOp::Or => {
                if self.evaluate_expression(left, local)?.is_truthy() {
                    return Ok(Value::Boolean(true));
                }
                Ok(Value::Boolean(self.evaluate_expression(right, local)?.is_truthy()))
            }
            _ => {
                let left = self.evaluate_expression(left, local)?;
                let right = self.evaluate_expression(right, local)?;
                Ok(apply_binop(op, &left, &right))
            }
        }
    }
}

fn select_name<'c>(selector: &NameSelector, value: &'c JsonValue, out: &mut Candidates<'c>) {
    match (selector, value) {
        (NameSelector::Key(key), JsonValue::Object(map)) => {
            if let Some(found) = map.get(key) {
                out.push(Cow::Borrowed(found));
            }
        }
        (NameSelector::Wildcard, JsonValue::Object(map)) => {
            out.extend(map.values().map(Cow::Borrowed));
        }
        (NameSelector::Wildcard, JsonValue::Array(items)) => {
            out.extend(items.iter().map(Cow::Borrowed));
        }
        _ => {}
    }
}

fn select_length<'c>(value: &'c JsonValue, out: &mut Candidates<'c>) {
    if let JsonValue::Array(items) = value {
        out.push(Cow::Owned(JsonValue::from(items.len())));
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Null => Value::Null,
        Literal::Boolean(b) => Value::Boolean(*b),
        Literal::Number(n) => Value::Number(*n),
        Literal::String(s) => Value::String(s.clone()),
    }
}

fn apply_binop(op: BinaryOp, left: &Value, right: &Value) -> Value {
    use std::cmp::Ordering;

    let ordering = || match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    };

    match op {
        BinaryOp::Equal => Value::Boolean(left.loosely_equals(right)),
        BinaryOp::NotEqual => Value::Boolean(!left.loosely_equals(right)),
        BinaryOp::LessThan => Value::Boolean(ordering() == Some(Ordering::Less)),
        BinaryOp::LessOrEqual => Value::Boolean(matches!(ordering(), Some(Ordering::Less | Ordering::Equal))),
        BinaryOp::GreaterThan => Value::Boolean(ordering() == Some(Ordering::Greater)),
        BinaryOp::GreaterOrEqual => {
            Value::Boolean(matches!(ordering(), Some(Ordering::Greater | Ordering::Equal)))
        }
        BinaryOp::Add => match (left, right) {
            (Value::Number(a), Value::Number(b)) => arithmetic(op, *a, *b),
            (Value::String(a), Value::String(b)) => Value::String(format!("{}{}", a, b)),
            _ => Value::Null,
        },
        BinaryOp::Subtract
        | BinaryOp::Multiply
        | BinaryOp::Divide
        | BinaryOp::Modulo
        | BinaryOp::Exponent => match (left, right) {
            (Value::Number(a), Value::Number(b)) => arithmetic(op, *a, *b),
            _ => Value::Null,
        },
        // short-circuited in evaluate_binary
        BinaryOp::And => Value::Boolean(left.is_truthy() && right.is_truthy()),
        BinaryOp::Or => Value::Boolean(left.is_truthy() || right.is_truthy()),
    }
}

/// Numeric operation in decimal where both operands convert, so `0.1 + 0.2`
/// is `0.3`; otherwise in `f64`. Non-finite results are `null`.
fn arithmetic(op: BinaryOp, a: f64, b: f64) -> Value {
    let exact = Decimal::from_f64(a)
        .zip(Decimal::from_f64(b))
        .and_then(|(x, y)| match op {
            BinaryOp::Add => x.checked_add(y),
            BinaryOp::Subtract => x.checked_sub(y),
            BinaryOp::Multiply => x.checked_mul(y),
            BinaryOp::Divide => x.checked_div(y),
            BinaryOp::Modulo => x.checked_rem(y),
            _ => None,
        })
        .and_then(|d| d.to_f64());

    let result = exact.unwrap_or_else(|| match op {
        BinaryOp::Add => a + b,
        BinaryOp::Subtract => a - b,
        BinaryOp::Multiply => a * b,
        BinaryOp::Divide => a / b,
        BinaryOp::Modulo => a % b,
        BinaryOp::Exponent => a.powf(b),
        _ => f64::NAN,
    });

    if result.is_finite() {
        Value::Number(result)
    } else {
        Value::Null
    }
}
