use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    /// Reserved words, keyed by their upper-case spelling.
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("CONST", TokenKind::Const);
        map.insert("VAR", TokenKind::Var);
        map.insert("PROCEDURE", TokenKind::Procedure);
        map.insert("CALL", TokenKind::Call);
        map.insert("BEGIN", TokenKind::Begin);
        map.insert("END", TokenKind::End);
        map.insert("IF", TokenKind::If);
        map.insert("THEN", TokenKind::Then);
        map.insert("WHILE", TokenKind::While);
        map.insert("DO", TokenKind::Do);
        map.insert("READ", TokenKind::Read);
        map.insert("WRITE", TokenKind::Write);
        map.insert("ODD", TokenKind::Odd);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    Identifier,

    OpenParen,
    CloseParen,

    Assignment, // :=
    Equals,     // =
    NotEquals,  // #

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Dot,
    Semicolon,
    Comma,

    Plus,
    Dash,
    Slash,
    Star,

    // Reserved
    Const,
    Var,
    Procedure,
    Call,
    Begin,
    End,
    If,
    Then,
    While,
    Do,
    Read,
    Write,
    Odd,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    pub fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }

    pub fn debug(&self) {
        if self.is_one_of_many(&[TokenKind::Identifier, TokenKind::Number]) {
            log::trace!("{} ({})", self.kind, self.value);
        } else {
            log::trace!("{} ()", self.kind);
        }
    }
}
