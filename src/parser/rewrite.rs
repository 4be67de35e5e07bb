use crate::ast::{BinaryOp, Expr, NameSelector, Operator, PathRef, UnaryOp};

/// Turns bare property accesses in boolean positions into has-property tests.
///
/// Boolean positions are the operands of `&&`, `||` and `!`, the root of a
/// filter (`boolean == true` on entry), and a property access compared with
/// `==`/`!=` against an expression that is statically boolean. Comparing two
/// property accesses stays a value comparison.
pub fn rewrite_boolean_context(expr: Expr, boolean: bool) -> Expr {
    match expr {
        Expr::Path(path) if boolean => into_has_property(path),
        Expr::Binary {
            op: op @ (BinaryOp::And | BinaryOp::Or),
            left,
            right,
        } => Expr::binary(
            op,
            rewrite_boolean_context(*left, true),
            rewrite_boolean_context(*right, true),
        ),
        Expr::Binary {
            op: op @ (BinaryOp::Equal | BinaryOp::NotEqual),
            left,
            right,
        } => {
            let (left_leaf, right_leaf) = (is_property_access(&left), is_property_access(&right));
            let both = left_leaf && right_leaf;
            let left_boolean = !both && left_leaf && right.is_statically_boolean();
            let right_boolean = !both && right_leaf && left.is_statically_boolean();
            Expr::binary(
                op,
                rewrite_boolean_context(*left, left_boolean),
                rewrite_boolean_context(*right, right_boolean),
            )
        }
        Expr::Binary { op, left, right } => Expr::binary(
            op,
            rewrite_boolean_context(*left, false),
            rewrite_boolean_context(*right, false),
        ),
        Expr::Unary {
            op: UnaryOp::Not,
            operand,
        } => Expr::unary(UnaryOp::Not, rewrite_boolean_context(*operand, true)),
        Expr::Unary { op, operand } => Expr::unary(op, rewrite_boolean_context(*operand, false)),
        Expr::Group(inner) => Expr::Group(Box::new(rewrite_boolean_context(*inner, boolean))),
        Expr::Conversion(inner) => {
            Expr::Conversion(Box::new(rewrite_boolean_context(*inner, boolean)))
        }
        Expr::IndexOf { target, value } => Expr::IndexOf {
            target,
            value: Box::new(rewrite_boolean_context(*value, false)),
        },
        other => other,
    }
}

/// A path reference whose final step is a named property.
fn is_property_access(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Path(path) if matches!(path.path.last(), Some(Operator::Name(NameSelector::Key(_))))
    )
}

fn into_has_property(path: PathRef) -> Expr {
    let name = match path.path.last() {
        Some(Operator::Name(NameSelector::Key(name))) => name.clone(),
        _ => return Expr::Path(path),
    };
    Expr::HasProperty {
        target: PathRef {
            path: path.path.parent(),
            is_local: path.is_local,
        },
        name,
    }
}
