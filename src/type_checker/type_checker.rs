use crate::{
    ast::ast::{Node, NodeKind, Operator},
    errors::errors::{Error, ErrorImpl},
};

use super::types::Type;

/// State for one type-checking pass.
///
/// The checker itself is scope-free; it only remembers the diagnostic that
/// ended the pass, if any.
#[derive(Debug, Default)]
pub struct TypeChecker {
    last_error: Option<Error>,
}

impl TypeChecker {
    pub fn new() -> Self {
        TypeChecker { last_error: None }
    }

    /// Types `node` and everything beneath it, stopping at the first violation.
    pub fn check(&mut self, node: &Node) -> Result<Type, Error> {
        let result = check_type(node);
        self.last_error = result.as_ref().err().cloned();
        result
    }

    pub fn get_last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }
}

/// Runs a fresh pass over `ast`.
pub fn type_check(ast: &Node) -> (TypeChecker, Result<Type, Error>) {
    let mut type_checker = TypeChecker::new();
    let result = type_checker.check(ast);

    match &result {
        Ok(ty) => log::debug!("type checking finished: {}", ty),
        Err(error) => log::debug!("type checking failed: {}", error),
    }

    (type_checker, result)
}

fn error_at(node: &Node, error_impl: ErrorImpl) -> Error {
    Error::new(error_impl, node.get_span().start.clone())
}

/// Statement and declaration typing.
pub fn check_type(node: &Node) -> Result<Type, Error> {
    match &node.kind {
        NodeKind::Program { block } => {
            check_type(block)?;
            Ok(Type::Void)
        }
        NodeKind::Block { constants, variables, procedures, statement } => {
            for declaration in constants.iter().chain(variables).chain(procedures) {
                check_type(declaration)?;
            }
            if let Some(statement) = statement {
                check_type(statement)?;
            }
            Ok(Type::Void)
        }
        NodeKind::ConstDecl { value, .. } => match value.kind {
            NodeKind::Number { .. } => Ok(Type::Integer),
            _ => Err(error_at(node, ErrorImpl::ConstantNotNumber)),
        },
        NodeKind::VarDecl { .. } => Ok(Type::Integer),
        NodeKind::ProcDecl { block, .. } => {
            check_type(block)?;
            Ok(Type::Void)
        }
        NodeKind::Assign { value, .. } => {
            check_integer_value(node, value, ErrorImpl::AssignmentNotInteger)?;
            Ok(Type::Void)
        }
        NodeKind::Output { value } => {
            check_integer_value(node, value, ErrorImpl::OutputNotInteger)?;
            Ok(Type::Void)
        }
        NodeKind::If { condition, body } | NodeKind::While { condition, body } => {
            if check_condition_type(condition)? != Type::Boolean {
                return Err(error_at(node, ErrorImpl::ConditionNotBoolean));
            }
            if let Some(body) = body {
                check_type(body)?;
            }
            Ok(Type::Void)
        }
        NodeKind::Compound { statements } => {
            for statement in statements {
                check_type(statement)?;
            }
            Ok(Type::Void)
        }
        NodeKind::Input { .. } | NodeKind::Call { .. } => Ok(Type::Void),
        NodeKind::Condition { .. } => check_condition_type(node),
        _ => check_expression_type(node),
    }
}

/// A value that is not an expression at all is reported against the statement
/// holding it; failures inside the expression keep their own message.
fn check_integer_value(statement: &Node, value: &Node, error_impl: ErrorImpl) -> Result<(), Error> {
    if !value.is_expression() {
        return Err(error_at(statement, error_impl));
    }
    check_expression_type(value)?;
    Ok(())
}

pub fn check_expression_type(node: &Node) -> Result<Type, Error> {
    match &node.kind {
        NodeKind::Number { .. } => Ok(Type::Integer),
        // Every name in the language denotes an integer.
        NodeKind::Identifier { .. } => Ok(Type::Integer),
        NodeKind::BinaryOp { left, right, .. } => check_binary_op_type(node, left, right),
        _ => Err(error_at(node, ErrorImpl::InvalidExpressionNode)),
    }
}

fn check_binary_op_type(node: &Node, left: &Node, right: &Node) -> Result<Type, Error> {
    let left = check_expression_type(left)?;
    let right = check_expression_type(right)?;

    let ty = Type::arithmetic(left, right);
    if ty.is_error() {
        return Err(error_at(
            node,
            ErrorImpl::BinaryOperandMismatch {
                left: left.to_string(),
                right: right.to_string(),
            },
        ));
    }
    Ok(ty)
}

/// Types a condition as `Boolean`.
///
/// Anything that is not a condition node is typed as an expression, which the
/// enclosing control structure then rejects as non-boolean.
pub fn check_condition_type(node: &Node) -> Result<Type, Error> {
    let (operator, left, right) = match &node.kind {
        NodeKind::Condition { operator, left, right } => (*operator, left, right),
        _ => return check_expression_type(node),
    };

    let left = check_expression_type(left)?;

    if operator == Operator::Odd {
        let ty = Type::odd(left);
        if ty.is_error() {
            return Err(error_at(
                node,
                ErrorImpl::OddOperandMismatch {
                    operand: left.to_string(),
                },
            ));
        }
        return Ok(ty);
    }

    let right = match right {
        Some(right) => check_expression_type(right)?,
        None => Type::Void,
    };

    let ty = Type::comparison(left, right);
    if ty.is_error() {
        return Err(error_at(
            node,
            ErrorImpl::ComparisonOperandMismatch {
                left: left.to_string(),
                right: right.to_string(),
            },
        ));
    }
    Ok(ty)
}
