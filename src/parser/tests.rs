//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the PL/0 constructs including:
//! - Constant, variable and procedure declarations
//! - Statements and empty statements
//! - Expressions, signs and precedence
//! - Conditions
//! - Syntax errors

use std::rc::Rc;

use super::parser::{parse, MAX_NESTING_DEPTH};
use crate::{
    ast::ast::{Node, NodeKind, Operator},
    errors::errors::Error,
    lexer::lexer::tokenize,
};

fn parse_source(source: &str) -> Result<Node, Error> {
    let tokens = tokenize(source.to_string(), Some("test.pl0".to_string())).unwrap();
    parse(tokens, Rc::new("test.pl0".to_string()))
}

fn block_of(program: &Node) -> &NodeKind {
    match &program.kind {
        NodeKind::Program { block } => &block.kind,
        other => panic!("expected program, got {:?}", other),
    }
}

fn statement_of(program: &Node) -> &Node {
    match block_of(program) {
        NodeKind::Block { statement: Some(statement), .. } => statement,
        other => panic!("expected block with a statement, got {:?}", other),
    }
}

fn assigned_value(source: &str) -> Node {
    let program = parse_source(source).unwrap();
    match &statement_of(&program).kind {
        NodeKind::Assign { value, .. } => (**value).clone(),
        other => panic!("expected assignment, got {:?}", other),
    }
}

#[test]
fn test_parse_empty_program() {
    let program = parse_source(".").unwrap();

    match block_of(&program) {
        NodeKind::Block { constants, variables, procedures, statement } => {
            assert!(constants.is_empty());
            assert!(variables.is_empty());
            assert!(procedures.is_empty());
            assert!(statement.is_none());
        }
        other => panic!("expected block, got {:?}", other),
    }
}

#[test]
fn test_parse_constants() {
    let program = parse_source("CONST a = 10, b = 12, c = 23;.").unwrap();

    match block_of(&program) {
        NodeKind::Block { constants, .. } => {
            let names: Vec<(&str, i64)> = constants
                .iter()
                .map(|decl| match &decl.kind {
                    NodeKind::ConstDecl { name, value } => match value.kind {
                        NodeKind::Number { value } => (name.as_str(), value),
                        _ => panic!("constant without a number"),
                    },
                    _ => panic!("expected constant declaration"),
                })
                .collect();
            assert_eq!(names, vec![("a", 10), ("b", 12), ("c", 23)]);
        }
        other => panic!("expected block, got {:?}", other),
    }
}

#[test]
fn test_parse_variables() {
    let program = parse_source("VAR x, y, z;.").unwrap();

    match block_of(&program) {
        NodeKind::Block { variables, .. } => assert_eq!(variables.len(), 3),
        other => panic!("expected block, got {:?}", other),
    }
}

#[test]
fn test_parse_procedures() {
    // A procedure can have an empty block.
    assert!(parse_source("PROCEDURE p; ;.").is_ok());

    let program = parse_source("PROCEDURE p; ; PROCEDURE q; VAR a; a := 1;.").unwrap();
    match block_of(&program) {
        NodeKind::Block { procedures, .. } => {
            assert_eq!(procedures.len(), 2);
            match &procedures[1].kind {
                NodeKind::ProcDecl { name, block } => {
                    assert_eq!(name, "q");
                    assert!(matches!(block.kind, NodeKind::Block { statement: Some(_), .. }));
                }
                other => panic!("expected procedure, got {:?}", other),
            }
        }
        other => panic!("expected block, got {:?}", other),
    }
}

#[test]
fn test_parse_simple_statements() {
    assert!(matches!(statement_of(&parse_source("x := 3.").unwrap()).kind, NodeKind::Assign { .. }));
    assert!(matches!(statement_of(&parse_source("CALL square.").unwrap()).kind, NodeKind::Call { .. }));
    assert!(matches!(statement_of(&parse_source("READ x.").unwrap()).kind, NodeKind::Input { .. }));
    assert!(matches!(statement_of(&parse_source("WRITE y.").unwrap()).kind, NodeKind::Output { .. }));
}

#[test]
fn test_parse_begin_end() {
    match &statement_of(&parse_source("BEGIN END.").unwrap()).kind {
        NodeKind::Compound { statements } => assert!(statements.is_empty()),
        other => panic!("expected compound, got {:?}", other),
    }

    match &statement_of(&parse_source("BEGIN x := 5; ; CALL p; END.").unwrap()).kind {
        NodeKind::Compound { statements } => assert_eq!(statements.len(), 2),
        other => panic!("expected compound, got {:?}", other),
    }
}

#[test]
fn test_parse_if_and_while() {
    match &statement_of(&parse_source("IF x = 0 THEN.").unwrap()).kind {
        NodeKind::If { body, .. } => assert!(body.is_none()),
        other => panic!("expected if, got {:?}", other),
    }

    match &statement_of(&parse_source("WHILE x < 5 DO x := x + 1.").unwrap()).kind {
        NodeKind::While { condition, body } => {
            assert!(matches!(condition.kind, NodeKind::Condition { operator: Operator::Lt, .. }));
            assert!(body.is_some());
        }
        other => panic!("expected while, got {:?}", other),
    }
}

#[test]
fn test_parse_conditions() {
    let cases = vec![
        ("IF x = 5 THEN x := 0.", Operator::Eq),
        ("IF x # 5 THEN x := 0.", Operator::Neq),
        ("IF x < 5 THEN x := 0.", Operator::Lt),
        ("IF x <= 5 THEN x := 0.", Operator::Lte),
        ("IF x > 5 THEN x := 0.", Operator::Gt),
        ("IF x >= 5 THEN x := 0.", Operator::Gte),
    ];

    for (source, expected) in cases {
        match &statement_of(&parse_source(source).unwrap()).kind {
            NodeKind::If { condition, .. } => match &condition.kind {
                NodeKind::Condition { operator, right, .. } => {
                    assert_eq!(*operator, expected);
                    assert!(right.is_some());
                }
                other => panic!("expected condition, got {:?}", other),
            },
            other => panic!("expected if, got {:?}", other),
        }
    }

    match &statement_of(&parse_source("IF ODD 5 THEN x := 1.").unwrap()).kind {
        NodeKind::If { condition, .. } => {
            assert!(matches!(
                condition.kind,
                NodeKind::Condition { operator: Operator::Odd, right: None, .. }
            ));
        }
        other => panic!("expected if, got {:?}", other),
    }
}

#[test]
fn test_parse_precedence() {
    // b*b - 4*a  =>  MINUS(MULT(b, b), MULT(4, a))
    match assigned_value("x := b*b - 4*a.").kind {
        NodeKind::BinaryOp { operator, left, right } => {
            assert_eq!(operator, Operator::Minus);
            assert!(matches!(left.kind, NodeKind::BinaryOp { operator: Operator::Mult, .. }));
            assert!(matches!(right.kind, NodeKind::BinaryOp { operator: Operator::Mult, .. }));
        }
        other => panic!("expected binary op, got {:?}", other),
    }
}

#[test]
fn test_parse_left_associative() {
    // a - b - c  =>  MINUS(MINUS(a, b), c)
    match assigned_value("x := a - b - c.").kind {
        NodeKind::BinaryOp { operator, left, right } => {
            assert_eq!(operator, Operator::Minus);
            assert!(matches!(left.kind, NodeKind::BinaryOp { operator: Operator::Minus, .. }));
            assert_eq!(*right, Node::new(NodeKind::Identifier { name: "c".to_string() }, right.span.clone()));
        }
        other => panic!("expected binary op, got {:?}", other),
    }
}

#[test]
fn test_parse_signs() {
    match assigned_value("x := -7.").kind {
        NodeKind::BinaryOp { operator, left, right } => {
            assert_eq!(operator, Operator::Minus);
            assert!(matches!(left.kind, NodeKind::Number { value: 0 }));
            assert!(matches!(right.kind, NodeKind::Number { value: 7 }));
        }
        other => panic!("expected negation, got {:?}", other),
    }

    assert!(matches!(assigned_value("x := +y.").kind, NodeKind::Identifier { .. }));
    assert!(parse_source("x := -7 - b.").is_ok());
    assert!(parse_source("x := a + (-7).").is_ok());
    assert!(parse_source("x := (-b - (b*b - 4*a*c)) / (2*a).").is_ok());
}

#[test]
fn test_sign_only_at_expression_start() {
    let error = parse_source("x := a + -7.").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_parse_node_spans() {
    let program = parse_source("VAR x;\nx := 1.").unwrap();
    let statement = statement_of(&program);

    assert_eq!(statement.span.start.0, 7);
    assert_eq!(statement.span.end.0, 13);
}

#[test]
fn test_missing_dot() {
    let error = parse_source("VAR x; x := 1").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert!(error.to_string().contains("expected '.'"));
}

#[test]
fn test_trailing_input() {
    let error = parse_source("x := 1. y := 2").unwrap_err();

    assert!(error.to_string().contains("after the end of the program"));
}

#[test]
fn test_missing_end() {
    assert!(parse_source("BEGIN x := 1 .").is_err());
    assert!(parse_source("BEGIN x := 1 x := 2 END.").is_err());
}

#[test]
fn test_constant_requires_number() {
    let error = parse_source("CONST a = b;.").unwrap_err();

    assert!(error.to_string().contains("constants must be initialized with a number"));
}

#[test]
fn test_number_out_of_range() {
    let error = parse_source("x := 99999999999999999999.").unwrap_err();

    assert_eq!(error.get_error_name(), "NumberParseError");
}

#[test]
fn test_parse_complex_program() {
    let source = r#"VAR x, y, z, q, r, n, f;

        PROCEDURE multiply;
        VAR a, b;
        BEGIN
          a := x;
          b := y;
          z := 0;
          WHILE b > 0 DO
          BEGIN
            IF ODD b THEN z := z + a;
            a := 2 * a;
            b := b / 2
          END
        END;

        PROCEDURE gcd;
        VAR f, g;
        BEGIN
          f := x;
          g := y;
          WHILE f # g DO
          BEGIN
            IF f < g THEN g := g - f;
            IF g < f THEN f := f - g
          END;
          z := f
        END;

        PROCEDURE fact;
        BEGIN
          IF n > 1 THEN
          BEGIN
            f := n * f;
            n := n - 1;
            CALL fact
          END
        END;

        BEGIN
          READ x; READ y; CALL multiply; WRITE z;
          READ x; READ y; CALL gcd; WRITE z;
          READ n; f := 1; CALL fact; WRITE f
        END."#;

    let program = parse_source(source).unwrap();
    match block_of(&program) {
        NodeKind::Block { variables, procedures, statement, .. } => {
            assert_eq!(variables.len(), 7);
            assert_eq!(procedures.len(), 3);
            assert!(statement.is_some());
        }
        other => panic!("expected block, got {:?}", other),
    }
}

fn nested_parens(depth: usize) -> String {
    format!("VAR x; x := {}1{}.", "(".repeat(depth), ")".repeat(depth))
}

#[test]
fn test_nesting_at_limit() {
    // The program block is the first level.
    assert!(parse_source(&nested_parens(MAX_NESTING_DEPTH - 1)).is_ok());

    let begins = MAX_NESTING_DEPTH - 1;
    let source = format!("VAR x; {}x := 1{}.", "BEGIN ".repeat(begins), " END".repeat(begins));
    assert!(parse_source(&source).is_ok());
}

#[test]
fn test_nesting_past_limit() {
    let error = parse_source(&nested_parens(MAX_NESTING_DEPTH)).unwrap_err();
    assert!(error.to_string().contains("nesting too deep"), "{}", error);

    let ifs = MAX_NESTING_DEPTH;
    let source = format!("VAR x; {}x := 1.", "IF x = 0 THEN ".repeat(ifs));
    let error = parse_source(&source).unwrap_err();
    assert!(error.to_string().contains("nesting too deep"), "{}", error);
}

#[test]
fn test_long_operator_chain_is_bounded() {
    let within = format!("VAR x; x := 1{}.", " + 1".repeat(MAX_NESTING_DEPTH - 1));
    assert!(parse_source(&within).is_ok());

    let beyond = format!("VAR x; x := 1{}.", " + 1".repeat(MAX_NESTING_DEPTH));
    let error = parse_source(&beyond).unwrap_err();
    assert!(error.to_string().contains("nesting too deep"), "{}", error);
}

#[test]
fn test_nesting_depth_resets_between_siblings() {
    let group = format!("{}1{}", "(".repeat(MAX_NESTING_DEPTH - 2), ")".repeat(MAX_NESTING_DEPTH - 2));
    let source = format!("VAR x; BEGIN x := {}; x := {} END.", group, group);

    assert!(parse_source(&source).is_ok());
}
