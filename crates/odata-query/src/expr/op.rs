use std::fmt;

// ============================================================================
// Precedence
// ============================================================================

/// Binding strength of a rendered fragment. Higher binds tighter.
pub type Precedence = u8;

pub(crate) const PREC_OR: Precedence = 1;
pub(crate) const PREC_AND: Precedence = 2;
pub(crate) const PREC_EQUALITY: Precedence = 3;
pub(crate) const PREC_RELATIONAL: Precedence = 4;
pub(crate) const PREC_ADDITIVE: Precedence = 5;
pub(crate) const PREC_MULTIPLICATIVE: Precedence = 6;
pub(crate) const PREC_UNARY: Precedence = 7;
pub(crate) const PREC_ATOM: Precedence = u8::MAX;

///
/// BinaryOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BinaryOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    And,
    Or,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    /// Protocol symbol for this operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::Lt => "lt",
            Self::Le => "le",
            Self::And => "and",
            Self::Or => "or",
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
            Self::Mod => "mod",
        }
    }

    #[must_use]
    pub const fn precedence(self) -> Precedence {
        match self {
            Self::Or => PREC_OR,
            Self::And => PREC_AND,
            Self::Eq | Self::Ne => PREC_EQUALITY,
            Self::Gt | Self::Ge | Self::Lt | Self::Le => PREC_RELATIONAL,
            Self::Add | Self::Sub => PREC_ADDITIVE,
            Self::Mul | Self::Div | Self::Mod => PREC_MULTIPLICATIVE,
        }
    }

    #[must_use]
    pub const fn is_logical(self) -> bool {
        matches!(self, Self::And | Self::Or)
    }

    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::Ne | Self::Gt | Self::Ge | Self::Lt | Self::Le
        )
    }

    #[must_use]
    pub const fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

///
/// UnaryOp
///
/// `Identity` passes its operand through unchanged; it wraps paging
/// literals so they travel as expressions.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum UnaryOp {
    Identity,
    Not,
    Negate,
}

impl UnaryOp {
    /// Prefix written before the operand, if any.
    #[must_use]
    pub const fn prefix(self) -> Option<&'static str> {
        match self {
            Self::Identity => None,
            Self::Not => Some("not "),
            Self::Negate => Some("-"),
        }
    }
}

///
/// Quantifier
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Quantifier {
    Any,
    All,
}

impl Quantifier {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::All => "all",
        }
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
