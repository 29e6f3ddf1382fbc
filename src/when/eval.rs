//! Evaluation of a parsed when-clause against a context snapshot.
//!
//! Missing keys read as absent values: a bare identifier is false, `==`
//! is false, `!=` is true, ordering comparisons are false. `&&` and `||`
//! short-circuit.

use super::parse::{CmpOp, Expr, Literal};
use super::{ContextModel, ContextValue};

pub(crate) fn evaluate(expr: &Expr, model: &ContextModel) -> bool {
    match expr {
        Expr::Ident(key) => model.get(key).map(ContextValue::truthy).unwrap_or(false),
        Expr::Not(inner) => !evaluate(inner, model),
        Expr::And(left, right) => evaluate(left, model) && evaluate(right, model),
        Expr::Or(left, right) => evaluate(left, model) || evaluate(right, model),
        Expr::Cmp { key, op, literal } => compare(model.get(key), *op, literal),
    }
}

fn compare(value: Option<&ContextValue>, op: CmpOp, literal: &Literal) -> bool {
    match op {
        CmpOp::Eq => value.map(|v| value_eq(v, literal)).unwrap_or(false),
        CmpOp::Ne => value.map(|v| !value_eq(v, literal)).unwrap_or(true),
        CmpOp::Gt | CmpOp::Ge | CmpOp::Lt | CmpOp::Le => {
            // Ordering is defined for integer operands only; anything else
            // fails closed like a missing key.
            let (Some(ContextValue::Int(lhs)), Literal::Int(rhs)) = (value, literal) else {
                return false;
            };
            match op {
                CmpOp::Gt => lhs > rhs,
                CmpOp::Ge => lhs >= rhs,
                CmpOp::Lt => lhs < rhs,
                CmpOp::Le => lhs <= rhs,
                CmpOp::Eq | CmpOp::Ne => unreachable!(),
            }
        }
    }
}

fn value_eq(value: &ContextValue, literal: &Literal) -> bool {
    match (value, literal) {
        (ContextValue::Bool(v), Literal::Bool(l)) => v == l,
        (ContextValue::Int(v), Literal::Int(l)) => v == l,
        (ContextValue::Str(v), Literal::Str(l)) => v == l,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use crate::when::{ContextModel, WhenClause};

    fn model() -> ContextModel {
        let mut m = ContextModel::new();
        m.set("editorFocus", true);
        m.set("isFullscreen", false);
        m.set("tabCount", 3i64);
        m.set("activeWidget", "com.viloshell.terminal");
        m
    }

    fn eval(clause: &str, model: &ContextModel) -> bool {
        WhenClause::parse(clause).evaluate(model)
    }

    #[test]
    fn missing_key_is_false() {
        let m = model();
        assert!(!eval("noSuchKey", &m));
        assert!(eval("!noSuchKey", &m));
    }

    #[test]
    fn bare_identifier_truthiness() {
        let m = model();
        assert!(eval("editorFocus", &m));
        assert!(!eval("isFullscreen", &m));
        assert!(eval("tabCount", &m));
    }

    #[test]
    fn equality_against_literals() {
        let m = model();
        assert!(eval("activeWidget == com.viloshell.terminal", &m));
        assert!(!eval("activeWidget == com.viloshell.editor", &m));
        assert!(eval("activeWidget != com.viloshell.editor", &m));
        assert!(eval("isFullscreen == false", &m));
        assert!(eval("tabCount == 3", &m));
    }

    #[test]
    fn missing_key_comparisons() {
        let m = model();
        assert!(!eval("ghost == true", &m));
        assert!(eval("ghost != true", &m));
        assert!(!eval("ghost > 0", &m));
    }

    #[test]
    fn integer_ordering() {
        let m = model();
        assert!(eval("tabCount > 1", &m));
        assert!(eval("tabCount >= 3", &m));
        assert!(!eval("tabCount > 3", &m));
        assert!(eval("tabCount < 10", &m));
        assert!(eval("tabCount <= 3", &m));
    }

    #[test]
    fn ordering_on_non_integer_is_false() {
        let m = model();
        assert!(!eval("activeWidget > 1", &m));
        assert!(!eval("editorFocus > 0", &m));
    }

    #[test]
    fn type_mismatch_equality_is_false() {
        let m = model();
        assert!(!eval("tabCount == true", &m));
        assert!(!eval("editorFocus == 1", &m));
    }

    #[test]
    fn boolean_connectives() {
        let m = model();
        assert!(eval("editorFocus && !isFullscreen", &m));
        assert!(eval("isFullscreen || tabCount > 1", &m));
        assert!(!eval("isFullscreen && tabCount > 1", &m));
        assert!(eval("(isFullscreen || editorFocus) && tabCount == 3", &m));
    }

    #[test]
    fn short_circuit_ignores_right_side() {
        // The right operand references a missing key; short-circuiting
        // means the whole expression is decided by the left side.
        let m = model();
        assert!(eval("editorFocus || ghost > 1", &m));
        assert!(!eval("isFullscreen && ghost", &m));
    }

    #[test]
    fn precedence_and_binds_tighter_than_or() {
        let mut m = ContextModel::new();
        m.set("a", true);
        m.set("b", false);
        m.set("c", false);
        // a || b && c  ==  a || (b && c)
        assert!(eval("a || b && c", &m));
    }
}
