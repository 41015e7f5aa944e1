use std::fmt::Display;

use crate::{lexer::tokens::TokenKind, Span};

/// Operator tags carried by `BinaryOp` and `Condition` nodes.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Operator {
    Plus,
    Minus,
    Mult,
    Div,
    Odd,
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl Operator {
    pub fn from_token_kind(kind: TokenKind) -> Option<Operator> {
        match kind {
            TokenKind::Plus => Some(Operator::Plus),
            TokenKind::Dash => Some(Operator::Minus),
            TokenKind::Star => Some(Operator::Mult),
            TokenKind::Slash => Some(Operator::Div),
            TokenKind::Odd => Some(Operator::Odd),
            TokenKind::Equals => Some(Operator::Eq),
            TokenKind::NotEquals => Some(Operator::Neq),
            TokenKind::Less => Some(Operator::Lt),
            TokenKind::LessEquals => Some(Operator::Lte),
            TokenKind::Greater => Some(Operator::Gt),
            TokenKind::GreaterEquals => Some(Operator::Gte),
            _ => None,
        }
    }

    pub fn is_arithmetic(&self) -> bool {
        matches!(self, Operator::Plus | Operator::Minus | Operator::Mult | Operator::Div)
    }

    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            Operator::Eq | Operator::Neq | Operator::Lt | Operator::Lte | Operator::Gt | Operator::Gte
        )
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Operator::Plus => "PLUS",
            Operator::Minus => "MINUS",
            Operator::Mult => "MULT",
            Operator::Div => "DIV",
            Operator::Odd => "ODD",
            Operator::Eq => "EQ",
            Operator::Neq => "NEQ",
            Operator::Lt => "LT",
            Operator::Lte => "LTE",
            Operator::Gt => "GT",
            Operator::Gte => "GTE",
        };
        write!(f, "{}", tag)
    }
}

/// Node Kinds
///
/// One variant per kind of syntax tree node, carrying only the fields that kind
/// needs. Lists that the grammar repeats are kept as ordered vectors.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Program {
        block: Box<Node>,
    },
    Block {
        constants: Vec<Node>,
        variables: Vec<Node>,
        procedures: Vec<Node>,
        statement: Option<Box<Node>>,
    },
    ConstDecl {
        name: String,
        value: Box<Node>,
    },
    VarDecl {
        name: String,
    },
    ProcDecl {
        name: String,
        block: Box<Node>,
    },
    Assign {
        target: String,
        value: Box<Node>,
    },
    Call {
        target: String,
    },
    Input {
        target: String,
    },
    Output {
        value: Box<Node>,
    },
    Compound {
        statements: Vec<Node>,
    },
    If {
        condition: Box<Node>,
        body: Option<Box<Node>>,
    },
    While {
        condition: Box<Node>,
        body: Option<Box<Node>>,
    },
    /// `right` is absent only for `ODD`.
    Condition {
        operator: Operator,
        left: Box<Node>,
        right: Option<Box<Node>>,
    },
    BinaryOp {
        operator: Operator,
        left: Box<Node>,
        right: Box<Node>,
    },
    Number {
        value: i64,
    },
    Identifier {
        name: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Node { kind, span }
    }

    /// Builds a node with no source location, for trees assembled by hand.
    pub fn detached(kind: NodeKind) -> Self {
        Node::new(kind, Span::null())
    }

    pub fn number(value: i64) -> Self {
        Node::detached(NodeKind::Number { value })
    }

    pub fn identifier(name: &str) -> Self {
        Node::detached(NodeKind::Identifier {
            name: name.to_string(),
        })
    }

    pub fn is_executable(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Compound { .. }
                | NodeKind::If { .. }
                | NodeKind::While { .. }
                | NodeKind::Assign { .. }
                | NodeKind::Call { .. }
                | NodeKind::Input { .. }
                | NodeKind::Output { .. }
        )
    }

    pub fn is_expression(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Number { .. } | NodeKind::Identifier { .. } | NodeKind::BinaryOp { .. }
        )
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }
}
