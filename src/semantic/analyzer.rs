use crate::{
    ast::ast::{Node, NodeKind},
    errors::errors::{Error, ErrorImpl},
    type_checker::types::Type,
};

use super::symbol_table::{SymbolKind, SymbolTable};

/// State for one scope-checking pass: the scope chain built while descending
/// and the diagnostic that ended the pass, if any.
#[derive(Debug, Default)]
pub struct SemanticAnalyzer {
    symbols: SymbolTable,
    last_error: Option<Error>,
}

/// Runs a fresh pass over `ast`.
pub fn analyze_semantics(ast: &Node) -> (SemanticAnalyzer, Result<(), Error>) {
    let mut analyzer = SemanticAnalyzer::new();
    let result = analyzer.analyze(ast);

    match &result {
        Ok(()) => log::debug!("semantic analysis finished"),
        Err(error) => log::debug!("semantic analysis failed: {}", error),
    }

    (analyzer, result)
}

fn error_at(node: &Node, error_impl: ErrorImpl) -> Error {
    Error::new(error_impl, node.get_span().start.clone())
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        SemanticAnalyzer {
            symbols: SymbolTable::new(),
            last_error: None,
        }
    }

    pub fn get_symbol_table(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn get_last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// Checks `node` and everything beneath it, stopping at the first violation.
    ///
    /// Each call starts from an empty symbol table.
    pub fn analyze(&mut self, node: &Node) -> Result<(), Error> {
        self.symbols = SymbolTable::new();
        let result = self.analyze_node(node);
        self.last_error = result.as_ref().err().cloned();
        result
    }

    fn analyze_node(&mut self, node: &Node) -> Result<(), Error> {
        match &node.kind {
            NodeKind::Program { block } => self.analyze_block(block),
            NodeKind::Block { .. } => self.analyze_block(node),
            NodeKind::Assign { target, value } => {
                match self.symbols.lookup(target).map(|symbol| symbol.kind) {
                    None => {
                        return Err(error_at(node, ErrorImpl::UndefinedIdentifier { name: target.clone() }))
                    }
                    Some(SymbolKind::Constant) => {
                        return Err(error_at(node, ErrorImpl::AssignToConstant { name: target.clone() }))
                    }
                    Some(SymbolKind::Procedure) => {
                        return Err(error_at(node, ErrorImpl::AssignToProcedure { name: target.clone() }))
                    }
                    Some(SymbolKind::Variable) => {}
                }
                self.resolve_expression(value)
            }
            NodeKind::Call { target } => match self.symbols.lookup(target).map(|symbol| symbol.kind) {
                None => Err(error_at(node, ErrorImpl::UndefinedProcedure { name: target.clone() })),
                Some(SymbolKind::Procedure) => Ok(()),
                Some(_) => Err(error_at(node, ErrorImpl::NotAProcedure { name: target.clone() })),
            },
            NodeKind::Input { target } => match self.symbols.lookup(target).map(|symbol| symbol.kind) {
                None => Err(error_at(node, ErrorImpl::UndefinedIdentifier { name: target.clone() })),
                Some(SymbolKind::Variable) => Ok(()),
                Some(_) => Err(error_at(node, ErrorImpl::ReadIntoNonVariable { name: target.clone() })),
            },
            NodeKind::Output { value } => self.resolve_expression(value),
            // Condition types belong to the type checker; only its names are resolved here.
            NodeKind::If { condition, body } | NodeKind::While { condition, body } => {
                self.resolve_expression(condition)?;
                match body {
                    Some(body) => self.analyze_node(body),
                    None => Ok(()),
                }
            }
            NodeKind::Compound { statements } => {
                for statement in statements {
                    self.analyze_node(statement)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Opens a scope for the block, declares its constants, variables and
    /// procedures (recursing into each procedure body right after declaring
    /// its name), checks its statement and closes the scope again.
    fn analyze_block(&mut self, node: &Node) -> Result<(), Error> {
        self.symbols.enter_scope();
        let result = self.analyze_block_contents(node);
        self.symbols.leave_scope()?;
        result
    }

    fn analyze_block_contents(&mut self, node: &Node) -> Result<(), Error> {
        let (constants, variables, procedures, statement) = match &node.kind {
            NodeKind::Block { constants, variables, procedures, statement } => {
                (constants, variables, procedures, statement)
            }
            _ => return Ok(()),
        };

        for constant in constants {
            if let NodeKind::ConstDecl { name, value } = &constant.kind {
                let value = match value.kind {
                    NodeKind::Number { value } => value,
                    _ => return Err(error_at(constant, ErrorImpl::ConstantNotLiteral { name: name.clone() })),
                };
                self.symbols.declare(name, SymbolKind::Constant, Type::Integer, value, constant.span.start.clone())?;
            }
        }

        for variable in variables {
            if let NodeKind::VarDecl { name } = &variable.kind {
                self.symbols.declare(name, SymbolKind::Variable, Type::Integer, 0, variable.span.start.clone())?;
            }
        }

        for procedure in procedures {
            if let NodeKind::ProcDecl { name, block } = &procedure.kind {
                self.symbols.declare(name, SymbolKind::Procedure, Type::Void, 0, procedure.span.start.clone())?;
                self.analyze_block(block)?;
            }
        }

        match statement {
            Some(statement) if statement.is_executable() => self.analyze_node(statement),
            _ => Ok(()),
        }
    }

    /// Every name used as a value must be a visible constant or variable.
    fn resolve_expression(&self, node: &Node) -> Result<(), Error> {
        match &node.kind {
            NodeKind::Identifier { name } => match self.symbols.lookup(name).map(|symbol| symbol.kind) {
                None => Err(error_at(node, ErrorImpl::UndefinedIdentifier { name: name.clone() })),
                Some(SymbolKind::Procedure) => Err(error_at(node, ErrorImpl::ProcedureAsValue { name: name.clone() })),
                Some(_) => Ok(()),
            },
            NodeKind::BinaryOp { left, right, .. } => {
                self.resolve_expression(left)?;
                self.resolve_expression(right)
            }
            NodeKind::Condition { left, right, .. } => {
                self.resolve_expression(left)?;
                match right {
                    Some(right) => self.resolve_expression(right),
                    None => Ok(()),
                }
            }
            _ => Ok(()),
        }
    }
}
