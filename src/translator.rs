use log::debug;
use serde_json::Value as JsonValue;

use crate::{
    ast::{ArraySelector, BinaryOp, Expr, JsonPath, NameSelector, Operator, PathRef, Slice, UnaryOp},
    error::EvalError,
    host::{HostBinaryOp, HostExpr, HostUnaryOp, Placeholder},
    parser::rewrite_boolean_context,
};

/// Translate a captured host expression into an expression tree.
///
/// Path method chains (`name`, `has_property`, `length`, `array_index`,
/// `index_of`) become the same leaves the expression parser produces, so
/// `ScannedValue.name("price").less_than(10)` translates to the tree for
/// `@.price<10`.
///
/// # Examples
/// ```
/// use clove_path::{ScannedValue, parse_expression, translate};
///
/// let captured = ScannedValue.name("price").less_than(10);
/// assert_eq!(translate(&captured).unwrap(), parse_expression("@.price<10").unwrap());
/// ```
pub fn translate(expr: &HostExpr) -> Result<Expr, EvalError> {
    let translated = translate_node(expr)?;
    debug!("translated host expression to {}", translated);
    Ok(translated)
}

/// Translate a filter predicate, applying the boolean-context rewrite the
/// parser applies to `[?( )]` bodies.
///
/// Fails when an explicit `has_property` sits where the printed `@.key`
/// would read back as a value, such as an arithmetic operand.
pub fn translate_filter(expr: &HostExpr) -> Result<Expr, EvalError> {
    selector_body(translate(expr)?, true)
}

/// Translate an index expression for `[( )]`, with the same rewrite and
/// `has_property` placement rules as [`translate_filter`].
pub fn translate_index(expr: &HostExpr) -> Result<Expr, EvalError> {
    selector_body(translate(expr)?, false)
}

fn selector_body(expr: Expr, boolean: bool) -> Result<Expr, EvalError> {
    let rewritten = rewrite_boolean_context(expr, boolean);
    if rewrite_boolean_context(as_property_access(rewritten.clone()), boolean) != rewritten {
        return Err(EvalError::UnsupportedExpression(format!(
            "has-property test outside a boolean position in '{}'",
            rewritten
        )));
    }
    Ok(rewritten)
}

/// The tree the text form of `expr` parses to before the boolean rewrite:
/// every has-property test reads back as a plain property access.
fn as_property_access(expr: Expr) -> Expr {
    match expr {
        Expr::HasProperty { target, name } => Expr::Path(PathRef {
            path: target.path.name(name),
            is_local: target.is_local,
        }),
        Expr::Binary { op, left, right } => {
            Expr::binary(op, as_property_access(*left), as_property_access(*right))
        }
        Expr::Unary { op, operand } => Expr::unary(op, as_property_access(*operand)),
        Expr::Group(inner) => Expr::Group(Box::new(as_property_access(*inner))),
        Expr::Conversion(inner) => Expr::Conversion(Box::new(as_property_access(*inner))),
        Expr::IndexOf { target, value } => Expr::IndexOf {
            target,
            value: Box::new(as_property_access(*value)),
        },
        other => other,
    }
}

fn translate_node(expr: &HostExpr) -> Result<Expr, EvalError> {
    match expr {
        HostExpr::Parameter(placeholder) => Ok(Expr::Path(PathRef {
            path: JsonPath::root(),
            is_local: *placeholder != Placeholder::Root,
        })),

        HostExpr::Constant(value) => literal(value),

        HostExpr::Binary { op, left, right } => {
            let op = binary_op(*op)?;
            Ok(Expr::binary(op, translate_node(left)?, translate_node(right)?))
        }

        HostExpr::Unary { op, operand } => {
            let operand = translate_node(operand)?;
            Ok(match op {
                HostUnaryOp::Negate => Expr::negate(operand),
                HostUnaryOp::Not => Expr::unary(UnaryOp::Not, operand),
                HostUnaryOp::Convert => Expr::Conversion(Box::new(operand)),
            })
        }

        HostExpr::MemberCall {
            receiver,
            method,
            args,
        } => match (method.as_str(), args.as_slice()) {
            ("Name", [_]) => Ok(Expr::Path(extract_reference(expr)?)),
            ("HasProperty", [key]) => Ok(Expr::HasProperty {
                target: extract_reference(receiver)?,
                name: string_argument(key, method)?,
            }),
            ("Length", []) => Ok(Expr::Length(extract_reference(receiver)?)),
            ("ArrayIndex", [index]) => Ok(Expr::ArrayIndex {
                target: extract_reference(receiver)?,
                index: integer_argument(index, method)?,
            }),
            ("IndexOf", [value]) => Ok(Expr::IndexOf {
                target: extract_reference(receiver)?,
                value: Box::new(translate_node(value)?),
            }),
            _ => Err(EvalError::UnsupportedExpression(format!(
                "method '{}' with {} argument(s)",
                method,
                args.len()
            ))),
        },

        HostExpr::MemberAccess { receiver, member } if member == "Length" => {
            Ok(Expr::Length(extract_reference(receiver)?))
        }

        HostExpr::MemberAccess { member, .. } => {
            Err(EvalError::UnsupportedExpression(format!("member '{}'", member)))
        }
    }
}

fn literal(value: &JsonValue) -> Result<Expr, EvalError> {
    match value {
        JsonValue::Null => Ok(Expr::null()),
        JsonValue::Bool(b) => Ok(Expr::boolean(*b)),
        JsonValue::Number(n) => n
            .as_f64()
            .map(Expr::number)
            .ok_or(EvalError::InvalidLiteral("non-finite number")),
        JsonValue::String(s) => Ok(Expr::string(s.clone())),
        JsonValue::Array(_) => Err(EvalError::InvalidLiteral("array")),
        JsonValue::Object(_) => Err(EvalError::InvalidLiteral("object")),
    }
}

fn binary_op(op: HostBinaryOp) -> Result<BinaryOp, EvalError> {
    Ok(match op {
        HostBinaryOp::Add => BinaryOp::Add,
        HostBinaryOp::Subtract => BinaryOp::Subtract,
        HostBinaryOp::Multiply => BinaryOp::Multiply,
        HostBinaryOp::Divide => BinaryOp::Divide,
        HostBinaryOp::Modulo => BinaryOp::Modulo,
        HostBinaryOp::Power => BinaryOp::Exponent,
        HostBinaryOp::Equal => BinaryOp::Equal,
        HostBinaryOp::NotEqual => BinaryOp::NotEqual,
        HostBinaryOp::LessThan => BinaryOp::LessThan,
        HostBinaryOp::LessOrEqual => BinaryOp::LessOrEqual,
        HostBinaryOp::GreaterThan => BinaryOp::GreaterThan,
        HostBinaryOp::GreaterOrEqual => BinaryOp::GreaterOrEqual,
        HostBinaryOp::AndAlso => BinaryOp::And,
        HostBinaryOp::OrElse => BinaryOp::Or,
        HostBinaryOp::Coalesce => {
            return Err(EvalError::UnsupportedExpression("coalesce operator".to_string()));
        }
    })
}

/// Rebuild the path a receiver chain walks, starting at its placeholder.
fn extract_reference(expr: &HostExpr) -> Result<PathRef, EvalError> {
    let mut operators = Vec::new();
    let is_local = extract_path_recursive(expr, &mut operators)?;
    Ok(PathRef {
        path: JsonPath::from(operators),
        is_local,
    })
}

fn extract_path_recursive(expr: &HostExpr, operators: &mut Vec<Operator>) -> Result<bool, EvalError> {
    match expr {
        HostExpr::Parameter(placeholder) => Ok(*placeholder != Placeholder::Root),

        HostExpr::MemberCall {
            receiver,
            method,
            args,
        } => {
            // receiver first so operators come out in left-to-right order
            let is_local = extract_path_recursive(receiver, operators)?;
            match (method.as_str(), args.as_slice()) {
                ("Name", [key]) => {
                    operators.push(Operator::Name(NameSelector::Key(string_argument(key, method)?)));
                }
                ("ArrayIndex", [index]) => {
                    let index = integer_argument(index, method)?;
                    operators.push(Operator::Array(ArraySelector::Slices(vec![Slice::Index(index)])));
                }
                _ => {
                    return Err(EvalError::UnsupportedExpression(format!(
                        "method '{}' cannot be used inside a path",
                        method
                    )));
                }
            }
            Ok(is_local)
        }

        _ => Err(EvalError::UnsupportedExpression(
            "path methods must be called on a placeholder or another path method".to_string(),
        )),
    }
}

fn string_argument(arg: &HostExpr, method: &str) -> Result<String, EvalError> {
    match arg {
        HostExpr::Constant(JsonValue::String(s)) => Ok(s.clone()),
        _ => Err(EvalError::UnsupportedExpression(format!(
            "'{}' needs a constant string argument",
            method
        ))),
    }
}

fn integer_argument(arg: &HostExpr, method: &str) -> Result<i64, EvalError> {
    match arg {
        HostExpr::Constant(JsonValue::Number(n)) if n.is_i64() => n
            .as_i64()
            .ok_or_else(|| EvalError::UnsupportedExpression(format!("'{}' index out of range", method))),
        _ => Err(EvalError::UnsupportedExpression(format!(
            "'{}' needs a constant integer argument",
            method
        ))),
    }
}
