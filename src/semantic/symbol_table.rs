//! Lexically scoped symbol table.

use std::{
    fmt::Display,
    io::{self, Write},
};

use crate::{
    errors::errors::{Error, ErrorImpl},
    type_checker::types::Type,
    Position,
};

pub type ScopeId = usize;

pub const GLOBAL_SCOPE: ScopeId = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Constant,
    Variable,
    Procedure,
}

impl Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolKind::Constant => write!(f, "constant"),
            SymbolKind::Variable => write!(f, "variable"),
            SymbolKind::Procedure => write!(f, "procedure"),
        }
    }
}

/// A declared name. `value` is only meaningful for constants.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub ty: Type,
    pub value: i64,
}

#[derive(Debug, Clone)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    /// In declaration order.
    pub symbols: Vec<Symbol>,
}

impl Scope {
    fn new(parent: Option<ScopeId>) -> Self {
        Scope {
            parent,
            symbols: vec![],
        }
    }

    pub fn get_symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|symbol| symbol.name == name)
    }
}

/// Scopes live in an arena indexed by `ScopeId`; each one points back at its
/// parent. Leaving a scope only moves `current` back to the parent: the scope
/// stays in the arena for reporting, but nothing declared in it is reachable
/// from any later lookup.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    current: ScopeId,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            scopes: vec![Scope::new(None)],
            current: GLOBAL_SCOPE,
        }
    }

    pub fn is_global(&self) -> bool {
        self.current == GLOBAL_SCOPE
    }

    /// Number of scopes between the current scope and the global one.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut scope = self.current;
        while let Some(parent) = self.scopes[scope].parent {
            depth += 1;
            scope = parent;
        }
        depth
    }

    pub fn enter_scope(&mut self) -> ScopeId {
        self.scopes.push(Scope::new(Some(self.current)));
        self.current = self.scopes.len() - 1;

        log::debug!("entered scope {} (depth {})", self.current, self.depth());
        self.current
    }

    pub fn leave_scope(&mut self) -> Result<ScopeId, Error> {
        match self.scopes[self.current].parent {
            Some(parent) => {
                log::debug!("left scope {}", self.current);
                self.current = parent;
                Ok(parent)
            }
            None => Err(Error::new(ErrorImpl::LeaveGlobalScope, Position::null())),
        }
    }

    /// Adds a symbol to the current scope.
    ///
    /// Only the current scope is checked for an existing declaration, so a
    /// nested scope may shadow a name from any ancestor.
    pub fn declare(
        &mut self,
        name: &str,
        kind: SymbolKind,
        ty: Type,
        value: i64,
        position: Position,
    ) -> Result<(), Error> {
        if self.lookup_local(name).is_some() {
            return Err(Error::new(
                ErrorImpl::SymbolAlreadyDeclared {
                    name: name.to_string(),
                },
                position,
            ));
        }

        log::trace!("declared {} `{}` in scope {}", kind, name, self.current);
        self.scopes[self.current].symbols.push(Symbol {
            name: name.to_string(),
            kind,
            ty,
            value,
        });
        Ok(())
    }

    pub fn lookup_local(&self, name: &str) -> Option<&Symbol> {
        self.scopes[self.current].get_symbol(name)
    }

    /// Finds the innermost visible declaration of `name`.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        let mut scope = Some(self.current);

        while let Some(id) = scope {
            if let Some(symbol) = self.scopes[id].get_symbol(name) {
                log::trace!("resolved `{}` in scope {}", name, id);
                return Some(symbol);
            }
            scope = self.scopes[id].parent;
        }

        None
    }

    /// Writes the columnar symbol report.
    ///
    /// Scopes are listed most recently opened first, so nested scopes come
    /// before the scopes that enclose them; symbols within a scope are listed
    /// most recently declared first.
    pub fn dump(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "\nSymbol Table:")?;
        writeln!(out, "{:<20} {:<10} {:<10} {}", "Name", "Kind", "Type", "Value")?;
        writeln!(out, "{}", SEPARATOR)?;

        for scope in self.scopes.iter().rev() {
            for symbol in scope.symbols.iter().rev() {
                write!(out, "{:<20} {:<10} {:<10} ", symbol.name, symbol.kind, symbol.ty)?;
                if symbol.kind == SymbolKind::Constant {
                    writeln!(out, "{}", symbol.value)?;
                } else {
                    writeln!(out, "-")?;
                }
            }
            writeln!(out, "{}", SEPARATOR)?;
        }

        Ok(())
    }
}

const SEPARATOR: &str = "------------------------------------------------";
