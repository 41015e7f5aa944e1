use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A single diagnostic: what went wrong and where.
///
/// Every phase is fail-fast, so a run produces at most one of these.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::BinaryOperandMismatch { .. } => "BinaryOperandMismatch",
            ErrorImpl::OddOperandMismatch { .. } => "OddOperandMismatch",
            ErrorImpl::ComparisonOperandMismatch { .. } => "ComparisonOperandMismatch",
            ErrorImpl::InvalidExpressionNode => "InvalidExpressionNode",
            ErrorImpl::ConstantNotNumber => "ConstantNotNumber",
            ErrorImpl::AssignmentNotInteger => "AssignmentNotInteger",
            ErrorImpl::OutputNotInteger => "OutputNotInteger",
            ErrorImpl::ConditionNotBoolean => "ConditionNotBoolean",
            ErrorImpl::SymbolAlreadyDeclared { .. } => "SymbolAlreadyDeclared",
            ErrorImpl::UndefinedIdentifier { .. } => "UndefinedIdentifier",
            ErrorImpl::UndefinedProcedure { .. } => "UndefinedProcedure",
            ErrorImpl::AssignToConstant { .. } => "AssignToConstant",
            ErrorImpl::AssignToProcedure { .. } => "AssignToProcedure",
            ErrorImpl::NotAProcedure { .. } => "NotAProcedure",
            ErrorImpl::ReadIntoNonVariable { .. } => "ReadIntoNonVariable",
            ErrorImpl::ProcedureAsValue { .. } => "ProcedureAsValue",
            ErrorImpl::ConstantNotLiteral { .. } => "ConstantNotLiteral",
            ErrorImpl::LeaveGlobalScope => "LeaveGlobalScope",
        }
    }

    pub fn get_category(&self) -> ErrorCategory {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorCategory::Lexical,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::NumberParseError { .. } => ErrorCategory::Syntax,
            ErrorImpl::BinaryOperandMismatch { .. }
            | ErrorImpl::OddOperandMismatch { .. }
            | ErrorImpl::ComparisonOperandMismatch { .. }
            | ErrorImpl::InvalidExpressionNode
            | ErrorImpl::ConstantNotNumber
            | ErrorImpl::AssignmentNotInteger
            | ErrorImpl::OutputNotInteger
            | ErrorImpl::ConditionNotBoolean => ErrorCategory::Type,
            _ => ErrorCategory::Semantic,
        }
    }

    /// The identifier the diagnostic is about, if any.
    pub fn get_symbol_name(&self) -> Option<&str> {
        match &self.internal_error {
            ErrorImpl::SymbolAlreadyDeclared { name }
            | ErrorImpl::UndefinedIdentifier { name }
            | ErrorImpl::UndefinedProcedure { name }
            | ErrorImpl::AssignToConstant { name }
            | ErrorImpl::AssignToProcedure { name }
            | ErrorImpl::NotAProcedure { name }
            | ErrorImpl::ReadIntoNonVariable { name }
            | ErrorImpl::ProcedureAsValue { name }
            | ErrorImpl::ConstantNotLiteral { name } => Some(name),
            _ => None,
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::SymbolAlreadyDeclared { name } => ErrorTip::Suggestion(format!(
                "Rename `{}` or move it into a nested procedure",
                name
            )),
            ErrorImpl::ReadIntoNonVariable { name } | ErrorImpl::AssignToConstant { name } => {
                ErrorTip::Suggestion(format!("Declare `{}` with VAR instead", name))
            }
            _ => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lexical,
    Syntax,
    Type,
    Semantic,
}

impl Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Lexical => write!(f, "Lexical"),
            ErrorCategory::Syntax => write!(f, "Syntax"),
            ErrorCategory::Type => write!(f, "Type"),
            ErrorCategory::Semantic => write!(f, "Semantic"),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Lexical and syntax
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },

    // Type
    #[error("Binary operator requires integer operands, got {left} and {right}")]
    BinaryOperandMismatch { left: String, right: String },
    #[error("ODD operator requires integer operand, got {operand}")]
    OddOperandMismatch { operand: String },
    #[error("Comparison requires integer operands, got {left} and {right}")]
    ComparisonOperandMismatch { left: String, right: String },
    #[error("Invalid node type in expression")]
    InvalidExpressionNode,
    #[error("Constant must be initialized with a number")]
    ConstantNotNumber,
    #[error("Assignment requires integer expression")]
    AssignmentNotInteger,
    #[error("Output requires integer expression")]
    OutputNotInteger,
    #[error("Control structure requires boolean condition")]
    ConditionNotBoolean,

    // Semantic
    #[error("Symbol '{name}' already declared in current scope")]
    SymbolAlreadyDeclared { name: String },
    #[error("Undefined identifier '{name}'")]
    UndefinedIdentifier { name: String },
    #[error("Undefined procedure '{name}'")]
    UndefinedProcedure { name: String },
    #[error("Cannot assign to constant '{name}'")]
    AssignToConstant { name: String },
    #[error("Cannot assign to procedure '{name}'")]
    AssignToProcedure { name: String },
    #[error("'{name}' is not a procedure")]
    NotAProcedure { name: String },
    #[error("Cannot read into '{name}' - must be a variable")]
    ReadIntoNonVariable { name: String },
    #[error("Procedure '{name}' cannot be used as a value")]
    ProcedureAsValue { name: String },
    #[error("Constant '{name}' must be initialized with a number")]
    ConstantNotLiteral { name: String },
    #[error("Cannot leave the global scope")]
    LeaveGlobalScope,
}
