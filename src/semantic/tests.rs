//! Unit tests for the symbol table and the semantic analyzer.

use std::rc::Rc;

use super::{
    analyzer::{analyze_semantics, SemanticAnalyzer},
    symbol_table::{SymbolKind, SymbolTable, GLOBAL_SCOPE},
};
use crate::{
    ast::ast::{Node, NodeKind},
    errors::errors::ErrorImpl,
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::types::Type,
    Position,
};

fn parse_source(source: &str) -> Node {
    let tokens = tokenize(source.to_string(), Some("test.pl0".to_string())).unwrap();
    parse(tokens, Rc::new("test.pl0".to_string())).unwrap()
}

fn analyze_error(source: &str) -> String {
    let (_, result) = analyze_semantics(&parse_source(source));
    result.unwrap_err().to_string()
}

fn row(name: &str, kind: &str, ty: &str, value: &str) -> String {
    format!("{:<20} {:<10} {:<10} {}\n", name, kind, ty, value)
}

const SEPARATOR: &str = "------------------------------------------------\n";

#[test]
fn test_declare_and_lookup() {
    let mut table = SymbolTable::new();
    table.enter_scope();

    table.declare("x", SymbolKind::Variable, Type::Integer, 0, Position::null()).unwrap();
    table.declare("c", SymbolKind::Constant, Type::Integer, 7, Position::null()).unwrap();

    let c = table.lookup("c").unwrap();
    assert_eq!(c.kind, SymbolKind::Constant);
    assert_eq!(c.value, 7);
    assert!(table.lookup_local("x").is_some());
    assert!(table.lookup("missing").is_none());
}

#[test]
fn test_redeclaration_in_same_scope() {
    let mut table = SymbolTable::new();
    table.enter_scope();
    table.declare("x", SymbolKind::Variable, Type::Integer, 0, Position::null()).unwrap();

    let error = table
        .declare("x", SymbolKind::Procedure, Type::Void, 0, Position::null())
        .unwrap_err();
    assert_eq!(error.get_internal_error(), &ErrorImpl::SymbolAlreadyDeclared { name: "x".to_string() });

    // The first declaration is untouched.
    assert_eq!(table.lookup("x").unwrap().kind, SymbolKind::Variable);
}

#[test]
fn test_shadowing_and_scope_exit() {
    let mut table = SymbolTable::new();
    table.enter_scope();
    table.declare("x", SymbolKind::Variable, Type::Integer, 0, Position::null()).unwrap();

    table.enter_scope();
    assert!(table.lookup_local("x").is_none());
    table.declare("x", SymbolKind::Constant, Type::Integer, 3, Position::null()).unwrap();
    table.declare("y", SymbolKind::Variable, Type::Integer, 0, Position::null()).unwrap();
    assert_eq!(table.lookup("x").unwrap().kind, SymbolKind::Constant);
    assert_eq!(table.depth(), 2);

    table.leave_scope().unwrap();
    assert_eq!(table.lookup("x").unwrap().kind, SymbolKind::Variable);
    assert!(table.lookup("y").is_none());
    assert_eq!(table.depth(), 1);
}

#[test]
fn test_leave_global_scope() {
    let mut table = SymbolTable::new();
    let inner = table.enter_scope();
    assert_ne!(inner, GLOBAL_SCOPE);

    assert_eq!(table.leave_scope().unwrap(), GLOBAL_SCOPE);
    assert!(table.is_global());

    let error = table.leave_scope().unwrap_err();
    assert_eq!(error.to_string(), "Cannot leave the global scope");
    assert!(table.is_global());
}

#[test]
fn test_valid_program() {
    let program = parse_source(
        "CONST max = 100;
        VAR x, y;
        PROCEDURE square;
        BEGIN
            x := x * x
        END;
        BEGIN
            x := 1;
            WHILE x <= max DO
            BEGIN
                CALL square;
                WRITE x;
                x := x + 1
            END
        END.",
    );

    let (analyzer, result) = analyze_semantics(&program);
    assert_eq!(result, Ok(()));
    assert!(analyzer.get_last_error().is_none());
    assert!(analyzer.get_symbol_table().is_global());
}

#[test]
fn test_undefined_identifier() {
    assert_eq!(analyze_error("VAR x; BEGIN x := y END."), "Undefined identifier 'y'");
    assert_eq!(analyze_error("BEGIN z := 1 END."), "Undefined identifier 'z'");
    assert_eq!(analyze_error("READ q."), "Undefined identifier 'q'");
    assert_eq!(analyze_error("WRITE q + 1."), "Undefined identifier 'q'");
    assert_eq!(analyze_error("VAR x; IF ODD w THEN x := 1."), "Undefined identifier 'w'");
    assert_eq!(analyze_error("VAR x; WHILE x < w DO x := 1."), "Undefined identifier 'w'");
}

#[test]
fn test_assign_to_constant() {
    assert_eq!(analyze_error("CONST max = 100; max := 200."), "Cannot assign to constant 'max'");
}

#[test]
fn test_assign_to_procedure() {
    assert_eq!(analyze_error("PROCEDURE p; ; p := 1."), "Cannot assign to procedure 'p'");
}

#[test]
fn test_call_checks() {
    assert_eq!(analyze_error("CALL undefined_proc."), "Undefined procedure 'undefined_proc'");
    assert_eq!(analyze_error("VAR x; CALL x."), "'x' is not a procedure");
    assert_eq!(analyze_error("CONST c = 1; CALL c."), "'c' is not a procedure");
}

#[test]
fn test_read_into_non_variable() {
    assert_eq!(analyze_error("CONST c = 1; READ c."), "Cannot read into 'c' - must be a variable");
    assert_eq!(analyze_error("PROCEDURE p; ; READ p."), "Cannot read into 'p' - must be a variable");
}

#[test]
fn test_procedure_as_value() {
    assert_eq!(
        analyze_error("VAR x; PROCEDURE p; ; x := p + 1."),
        "Procedure 'p' cannot be used as a value"
    );
}

#[test]
fn test_duplicate_declarations() {
    assert_eq!(analyze_error("VAR x, x; ."), "Symbol 'x' already declared in current scope");
    assert_eq!(analyze_error("CONST a = 1; VAR a; ."), "Symbol 'a' already declared in current scope");
    assert_eq!(
        analyze_error("VAR p; PROCEDURE p; ; ."),
        "Symbol 'p' already declared in current scope"
    );
}

#[test]
fn test_procedure_locals_are_private() {
    let source = "VAR x;
        PROCEDURE p;
        VAR local;
        local := 1;
        BEGIN
            x := local
        END.";
    assert_eq!(analyze_error(source), "Undefined identifier 'local'");
}

#[test]
fn test_procedure_sees_enclosing_and_itself() {
    let source = "VAR x;
        PROCEDURE outer;
            PROCEDURE inner;
            BEGIN
                x := x + 1;
                CALL outer
            END;
        CALL inner;
        CALL outer.";

    assert_eq!(analyze_semantics(&parse_source(source)).1, Ok(()));
}

#[test]
fn test_siblings_declared_later_are_not_visible() {
    let source = "PROCEDURE first; CALL second;
        PROCEDURE second; ;
        CALL first.";
    assert_eq!(analyze_error(source), "Undefined procedure 'second'");
}

#[test]
fn test_shadowing_in_procedure() {
    let source = "CONST x = 1;
        PROCEDURE p;
        VAR x;
        x := 2;
        CALL p.";

    assert_eq!(analyze_semantics(&parse_source(source)).1, Ok(()));
}

#[test]
fn test_constant_not_literal() {
    let block = Node::detached(NodeKind::Block {
        constants: vec![Node::detached(NodeKind::ConstDecl {
            name: "c".to_string(),
            value: Box::new(Node::identifier("x")),
        })],
        variables: vec![],
        procedures: vec![],
        statement: None,
    });
    let program = Node::detached(NodeKind::Program { block: Box::new(block) });

    let (analyzer, result) = analyze_semantics(&program);
    assert_eq!(result.unwrap_err().to_string(), "Constant 'c' must be initialized with a number");
    assert!(analyzer.get_last_error().is_some());
    // The failed block's scope is still closed.
    assert!(analyzer.get_symbol_table().is_global());
}

#[test]
fn test_error_position_points_at_node() {
    let source = "VAR x;\nBEGIN\n    x := y\nEND.\n";
    let (_, result) = analyze_semantics(&parse_source(source));

    assert_eq!(result.unwrap_err().get_position().0, 22);
}

#[test]
fn test_fresh_analyzers_agree() {
    let program = parse_source("VAR x; BEGIN READ x; WRITE x END.");

    let mut first = SemanticAnalyzer::new();
    let mut second = SemanticAnalyzer::new();
    assert_eq!(first.analyze(&program), Ok(()));
    assert_eq!(second.analyze(&program), Ok(()));

    let bad = parse_source("CALL nowhere.");
    assert_eq!(analyze_semantics(&bad).1, analyze_semantics(&bad).1);
}

#[test]
fn test_symbol_dump() {
    let program = parse_source("CONST c = 5; VAR x; PROCEDURE p; VAR y; ; BEGIN x := c END.");
    let (analyzer, result) = analyze_semantics(&program);
    assert_eq!(result, Ok(()));

    let mut out = Vec::new();
    analyzer.get_symbol_table().dump(&mut out).unwrap();

    let expected = [
        "\nSymbol Table:\n".to_string(),
        row("Name", "Kind", "Type", "Value"),
        SEPARATOR.to_string(),
        row("y", "variable", "integer", "-"),
        SEPARATOR.to_string(),
        row("p", "procedure", "void", "-"),
        row("x", "variable", "integer", "-"),
        row("c", "constant", "integer", "5"),
        SEPARATOR.to_string(),
        SEPARATOR.to_string(),
    ]
    .concat();

    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[test]
fn test_reused_analyzer_starts_clean() {
    let bad = parse_source("VAR x; BEGIN x := y END.");
    let good = parse_source("CONST c = 5;.");
    let mut analyzer = SemanticAnalyzer::new();

    assert!(analyzer.analyze(&bad).is_err());
    assert!(analyzer.get_last_error().is_some());

    assert_eq!(analyzer.analyze(&good), Ok(()));
    assert!(analyzer.get_last_error().is_none());

    let mut out = Vec::new();
    analyzer.get_symbol_table().dump(&mut out).unwrap();
    let expected = [
        "\nSymbol Table:\n".to_string(),
        row("Name", "Kind", "Type", "Value"),
        SEPARATOR.to_string(),
        row("c", "constant", "integer", "5"),
        SEPARATOR.to_string(),
        SEPARATOR.to_string(),
    ]
    .concat();
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}
