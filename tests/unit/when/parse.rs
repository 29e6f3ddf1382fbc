use super::*;

fn parse_ok(source: &str) -> Expr {
    parse(source).unwrap()
}

#[test]
fn parses_bare_identifier() {
    assert_eq!(
        parse_ok("editorFocus"),
        Expr::Ident(CompactString::from("editorFocus"))
    );
}

#[test]
fn parses_dotted_identifier() {
    assert_eq!(
        parse_ok("workbench.sidebar.visible"),
        Expr::Ident(CompactString::from("workbench.sidebar.visible"))
    );
}

#[test]
fn parses_negation() {
    let expr = parse_ok("!isFullscreen");
    assert!(matches!(expr, Expr::Not(_)));
}

#[test]
fn parses_double_negation() {
    let expr = parse_ok("!!a");
    let Expr::Not(inner) = expr else {
        panic!("expected Not, got something else");
    };
    assert!(matches!(*inner, Expr::Not(_)));
}

#[test]
fn parses_equality_with_string_literal() {
    assert_eq!(
        parse_ok("activeWidget == com.viloshell.terminal"),
        Expr::Cmp {
            key: CompactString::from("activeWidget"),
            op: CmpOp::Eq,
            literal: Literal::Str(CompactString::from("com.viloshell.terminal")),
        }
    );
}

#[test]
fn parses_bool_and_int_literals() {
    assert_eq!(
        parse_ok("sidebarVisible == true"),
        Expr::Cmp {
            key: CompactString::from("sidebarVisible"),
            op: CmpOp::Eq,
            literal: Literal::Bool(true),
        }
    );
    assert_eq!(
        parse_ok("tabCount != 1"),
        Expr::Cmp {
            key: CompactString::from("tabCount"),
            op: CmpOp::Ne,
            literal: Literal::Int(1),
        }
    );
}

#[test]
fn parses_ordering_operators() {
    for (source, op) in [
        ("tabCount > 1", CmpOp::Gt),
        ("tabCount >= 1", CmpOp::Ge),
        ("tabCount < 1", CmpOp::Lt),
        ("tabCount <= 1", CmpOp::Le),
    ] {
        let Expr::Cmp { op: parsed, .. } = parse_ok(source) else {
            panic!("expected comparison for {source}");
        };
        assert_eq!(parsed, op);
    }
}

#[test]
fn parses_nested_parens_and_connectives() {
    let expr = parse_ok("(a || b) && !(c == true)");
    let Expr::And(left, right) = expr else {
        panic!("expected And at the root");
    };
    assert!(matches!(*left, Expr::Or(_, _)));
    assert!(matches!(*right, Expr::Not(_)));
}

#[test]
fn and_binds_tighter_than_or() {
    let expr = parse_ok("a || b && c");
    assert!(matches!(expr, Expr::Or(_, _)));
}

#[test]
fn rejects_empty_input() {
    assert!(parse("").is_err());
    assert!(parse("   ").is_err());
}

#[test]
fn rejects_unbalanced_parens() {
    assert!(parse("(a && b").is_err());
    assert!(parse("a && b)").is_err());
}

#[test]
fn rejects_single_ampersand_and_pipe() {
    assert!(parse("a & b").is_err());
    assert!(parse("a | b").is_err());
}

#[test]
fn rejects_dangling_operator() {
    assert!(parse("a &&").is_err());
    assert!(parse("!").is_err());
    assert!(parse("a ==").is_err());
}

#[test]
fn rejects_literal_on_left_side() {
    assert!(parse("1 == tabCount").is_err());
}

#[test]
fn error_reports_offset() {
    let err = parse("a && $").unwrap_err();
    assert_eq!(err.offset, 5);
    assert!(err.to_string().contains("offset 5"));
}
