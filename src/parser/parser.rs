//! Parser implementation for building the syntax tree.
//!
//! This module contains the main Parser struct and the program entry point.
//! Expressions are parsed with NUD/LED handlers and binding powers; statements
//! are dispatched on their leading token.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for operands
//! - LED (left denotation) handlers for infix operators
//! - Binding powers for operator precedence

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::ast::{Node, NodeKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span, MK_TOKEN,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_block,
};

/// Deepest nesting of blocks, statements, groupings and operator chains the
/// parser accepts. Both passes and the tree printer recurse once per level.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Cursor over the token stream plus the handler tables that drive it.
pub struct Parser {
    /// Always terminated by EOF
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    file: Rc<String>,
    stmt_lookup: StmtLookup,
    nud_lookup: NUDLookup,
    led_lookup: LEDLookup,
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Lookup tables start empty; `create_token_lookups` fills them. An EOF
    /// token is appended when the stream does not already end with one.
    pub fn new(mut tokens: Vec<Token>, file: Rc<String>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or(Position(0, Rc::clone(&file)));
            tokens.push(MK_TOKEN!(
                TokenKind::EOF,
                String::from("EOF"),
                Span { start: end.clone(), end }
            ));
        }

        Parser {
            tokens,
            pos: 0,
            depth: 0,
            file,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        }
    }

    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.tokens[self.pos].kind
    }

    /// Steps past the current token and returns it. Stops on the trailing EOF.
    pub fn advance(&mut self) -> &Token {
        let current = self.pos;
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        &self.tokens[current]
    }

    /// Consumes the current token if it is `expected_kind`. Otherwise fails with
    /// `error`, or a plain unexpected-token error when none is given.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind != expected_kind {
            match error {
                Some(error) => Err(error),
                None => Err(Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: token.value.clone(),
                    },
                    token.span.start.clone(),
                )),
            }
        } else {
            Ok(self.advance().clone())
        }
    }

    /// Expects a token of the specified kind, explaining what was wanted on failure.
    pub fn expect_detailed(&mut self, expected_kind: TokenKind, message: &str) -> Result<Token, Error> {
        let error = self.error_here(message);
        self.expect_error(expected_kind, Some(error))
    }

    /// Builds a detailed unexpected-token error at the current token.
    pub fn error_here(&self, message: &str) -> Error {
        let token = self.current_token();
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: token.value.clone(),
                message: String::from(message),
            },
            token.span.start.clone(),
        )
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Binding power of the current token; tokens that are not infix operators
    /// bind at `Default` and so end an expression.
    pub fn current_binding_power(&self) -> BindingPower {
        *self
            .binding_power_lookup
            .get(&self.current_token_kind())
            .unwrap_or(&BindingPower::Default)
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (operand) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Descends one nesting level, failing at the current token once
    /// `MAX_NESTING_DEPTH` levels are open.
    pub fn enter_nesting(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error_here("nesting too deep"));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn leave_nesting(&mut self, levels: usize) {
        self.depth = self.depth.saturating_sub(levels);
    }

    /// Where the current token starts.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    /// Returns where the most recently consumed token ended.
    pub fn previous_end(&self) -> Position {
        match self.pos.checked_sub(1) {
            Some(previous) => self.tokens[previous].span.end.clone(),
            None => Position(0, Rc::clone(&self.file)),
        }
    }

    /// Span from `start` up to the end of the most recently consumed token.
    pub fn span_from(&self, start: Position) -> Span {
        Span {
            start,
            end: self.previous_end(),
        }
    }
}

/// Parses a stream of tokens into a syntax tree rooted at a `Program` node.
///
/// Accepts exactly `block "."` followed by EOF.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> Result<Node, Error> {
    let mut parser = Parser::new(tokens, file);
    create_token_lookups(&mut parser);

    let start = parser.get_position();
    let block = parse_block(&mut parser)?;

    parser.expect_detailed(TokenKind::Dot, "expected '.' at the end of the program")?;
    parser.expect_detailed(TokenKind::EOF, "unexpected input after the end of the program")?;

    log::debug!("parsed program ending at offset {}", parser.previous_end().0);

    Ok(Node::new(
        NodeKind::Program {
            block: Box::new(block),
        },
        parser.span_from(start),
    ))
}
