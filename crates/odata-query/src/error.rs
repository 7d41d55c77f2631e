use crate::expr::Arity;
use std::fmt;
use thiserror::Error as ThisError;

///
/// ErrorClass
///
/// Stable classification shared by every error the crate surfaces.
/// `InvalidInput` is caller-correctable; `InvariantViolation` means the
/// expression tree itself is inconsistent and indicates a bug upstream.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    InvalidInput,
    InvariantViolation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidInput => "invalid_input",
            Self::InvariantViolation => "invariant_violation",
        };
        write!(f, "{label}")
    }
}

///
/// ConstructionError
///
/// Raised synchronously while an expression tree or a builder clause is
/// being assembled. The tree (or builder) is left untouched.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ConstructionError {
    #[error("cannot find a field path for accessor (value: {accessor})")]
    UnresolvablePath { accessor: String },

    #[error("parameter '{param}' must be greater than zero (value: {value})")]
    Range { param: &'static str, value: i64 },

    #[error("method '{method}' takes {expected} argument(s), got {found}")]
    Arity {
        method: &'static str,
        expected: Arity,
        found: usize,
    },
}

impl ConstructionError {
    pub(crate) fn unresolvable_path(accessor: impl Into<String>) -> Self {
        Self::UnresolvablePath {
            accessor: accessor.into(),
        }
    }
}

///
/// TraversalError
///
/// Raised when serialization finds the fragment stack in a state that a
/// well-formed tree can never produce.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TraversalError {
    #[error("malformed expression tree: {residual} fragment(s) remain after traversal, expected 1")]
    MalformedTree { residual: usize },

    #[error("malformed expression tree: {node} node needs {needed} operand(s), {available} available")]
    StackUnderflow {
        node: &'static str,
        needed: usize,
        available: usize,
    },
}

///
/// QueryError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum QueryError {
    #[error("{0}")]
    Construction(#[from] ConstructionError),

    #[error("{0}")]
    Traversal(#[from] TraversalError),
}

impl QueryError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Construction(_) => ErrorClass::InvalidInput,
            Self::Traversal(_) => ErrorClass::InvariantViolation,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class())
    }
}
