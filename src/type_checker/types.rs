use std::fmt::Display;

/// The closed set of types the checker works with.
///
/// `Boolean` only ever describes a condition and `Error` marks an expression
/// that is already invalid; neither can be declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Integer,
    Boolean,
    Void,
    Error,
}

impl Type {
    pub fn is_error(&self) -> bool {
        *self == Type::Error
    }

    /// Result of `+ - * /`: integer operands give an integer, anything else
    /// (including an operand that is already `Error`) gives `Error`.
    pub fn arithmetic(left: Type, right: Type) -> Type {
        match (left, right) {
            (Type::Integer, Type::Integer) => Type::Integer,
            _ => Type::Error,
        }
    }

    /// Result of a relational operator.
    pub fn comparison(left: Type, right: Type) -> Type {
        match (left, right) {
            (Type::Integer, Type::Integer) => Type::Boolean,
            _ => Type::Error,
        }
    }

    pub fn odd(operand: Type) -> Type {
        match operand {
            Type::Integer => Type::Boolean,
            _ => Type::Error,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Integer => write!(f, "integer"),
            Type::Boolean => write!(f, "boolean"),
            Type::Void => write!(f, "void"),
            Type::Error => write!(f, "error"),
        }
    }
}
