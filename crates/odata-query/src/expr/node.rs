use crate::{
    error::ConstructionError,
    expr::{
        BinaryOp, ExprVisitor, Method, MethodCall, Quantifier, UnaryOp,
        serialize::Serializer,
    },
    path::FieldPath,
    traits::FieldValue,
    value::Value,
};
use std::{borrow::Cow, fmt, ops};

/// Bare keyword used for null operands.
pub const NULL_KEYWORD: &str = "null";

///
/// Expr
///
/// Closed set of expression nodes. Operands are always `Expr`; literals and
/// accessors are normalized into `Value` / `Property` leaves when the tree is
/// built, and operator tags never change afterwards.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Value(Value),
    Property(Property),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Method(MethodCall),
    Lambda(LambdaExpr),
}

///
/// Property
///
/// `Field` names a location on the queried resource and is rebased onto the
/// bound variable inside a lambda. `Keyword` is emitted verbatim.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Property {
    Field(FieldPath),
    Keyword(Cow<'static, str>),
}

///
/// UnaryExpr
///

#[derive(Clone, Debug, PartialEq)]
pub struct UnaryExpr {
    op: UnaryOp,
    operand: Box<Expr>,
}

impl UnaryExpr {
    #[must_use]
    pub const fn op(&self) -> UnaryOp {
        self.op
    }

    #[must_use]
    pub fn operand(&self) -> &Expr {
        &self.operand
    }
}

///
/// BinaryExpr
///

#[derive(Clone, Debug, PartialEq)]
pub struct BinaryExpr {
    op: BinaryOp,
    left: Box<Expr>,
    right: Box<Expr>,
}

impl BinaryExpr {
    #[must_use]
    pub const fn op(&self) -> BinaryOp {
        self.op
    }

    #[must_use]
    pub fn left(&self) -> &Expr {
        &self.left
    }

    #[must_use]
    pub fn right(&self) -> &Expr {
        &self.right
    }
}

///
/// LambdaExpr
///
/// Quantified predicate over a collection-valued field. The collection is
/// always a `Property::Field` leaf; the predicate is evaluated per element
/// under a fresh bound variable.
///

#[derive(Clone, Debug, PartialEq)]
pub struct LambdaExpr {
    quantifier: Quantifier,
    collection: Box<Expr>,
    predicate: Box<Expr>,
}

impl LambdaExpr {
    #[must_use]
    pub fn new(quantifier: Quantifier, collection: FieldPath, predicate: Expr) -> Self {
        Self {
            quantifier,
            collection: Box::new(Expr::field(collection)),
            predicate: Box::new(predicate),
        }
    }

    #[must_use]
    pub const fn quantifier(&self) -> Quantifier {
        self.quantifier
    }

    #[must_use]
    pub fn collection(&self) -> &Expr {
        &self.collection
    }

    #[must_use]
    pub fn predicate(&self) -> &Expr {
        &self.predicate
    }
}

// ----------------------------------------------------------------------------
// Construction
// ----------------------------------------------------------------------------

impl Expr {
    /// Literal leaf.
    pub fn value(value: impl FieldValue) -> Self {
        Self::Value(value.to_value())
    }

    /// Field reference leaf.
    #[must_use]
    pub const fn field(path: FieldPath) -> Self {
        Self::Property(Property::Field(path))
    }

    /// Bare protocol keyword, e.g. `null` or `Edm.String`.
    pub fn keyword(keyword: impl Into<Cow<'static, str>>) -> Self {
        Self::Property(Property::Keyword(keyword.into()))
    }

    #[must_use]
    pub const fn null() -> Self {
        Self::Property(Property::Keyword(Cow::Borrowed(NULL_KEYWORD)))
    }

    #[must_use]
    pub fn unary(op: UnaryOp, operand: Self) -> Self {
        Self::Unary(UnaryExpr {
            op,
            operand: Box::new(operand),
        })
    }

    #[must_use]
    pub fn binary(op: BinaryOp, left: Self, right: Self) -> Self {
        Self::Binary(BinaryExpr {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Method call, validated against the method's arity.
    pub fn call(method: Method, args: Vec<Self>) -> Result<Self, ConstructionError> {
        MethodCall::new(method, args).map(Self::Method)
    }

    #[must_use]
    pub fn lambda(quantifier: Quantifier, collection: FieldPath, predicate: Self) -> Self {
        Self::Lambda(LambdaExpr::new(quantifier, collection, predicate))
    }

    // fixed-arity calls never fail; arity is checked by the catalog tests
    fn fixed(method: Method, args: Vec<Self>) -> Self {
        debug_assert!(method.arity().accepts(args.len()));

        Self::Method(MethodCall::from_parts(method, args))
    }

    // ------------------------------------------------------------------
    // logical and comparison
    // ------------------------------------------------------------------

    #[must_use]
    pub fn and(self, rhs: Self) -> Self {
        Self::binary(BinaryOp::And, self, rhs)
    }

    #[must_use]
    pub fn or(self, rhs: Self) -> Self {
        Self::binary(BinaryOp::Or, self, rhs)
    }

    #[must_use]
    pub fn equals(self, rhs: Self) -> Self {
        Self::binary(BinaryOp::Eq, self, rhs)
    }

    #[must_use]
    pub fn not_equals(self, rhs: Self) -> Self {
        Self::binary(BinaryOp::Ne, self, rhs)
    }

    #[must_use]
    pub fn gt(self, value: impl FieldValue) -> Self {
        Self::binary(BinaryOp::Gt, self, Self::value(value))
    }

    #[must_use]
    pub fn ge(self, value: impl FieldValue) -> Self {
        Self::binary(BinaryOp::Ge, self, Self::value(value))
    }

    #[must_use]
    pub fn lt(self, value: impl FieldValue) -> Self {
        Self::binary(BinaryOp::Lt, self, Self::value(value))
    }

    #[must_use]
    pub fn le(self, value: impl FieldValue) -> Self {
        Self::binary(BinaryOp::Le, self, Self::value(value))
    }

    // ------------------------------------------------------------------
    // method catalog
    // ------------------------------------------------------------------

    #[must_use]
    pub fn contains(self, needle: Self) -> Self {
        Self::fixed(Method::Contains, vec![self, needle])
    }

    #[must_use]
    pub fn starts_with(self, prefix: Self) -> Self {
        Self::fixed(Method::StartsWith, vec![self, prefix])
    }

    #[must_use]
    pub fn ends_with(self, suffix: Self) -> Self {
        Self::fixed(Method::EndsWith, vec![self, suffix])
    }

    #[must_use]
    pub fn index_of(self, needle: Self) -> Self {
        Self::fixed(Method::IndexOf, vec![self, needle])
    }

    #[must_use]
    pub fn concat(self, other: Self) -> Self {
        Self::fixed(Method::Concat, vec![self, other])
    }

    #[must_use]
    pub fn substring(self, start: Self, length: Option<Self>) -> Self {
        let mut args = vec![self, start];
        args.extend(length);

        Self::fixed(Method::Substring, args)
    }

    #[must_use]
    pub fn length(self) -> Self {
        Self::fixed(Method::Length, vec![self])
    }

    #[must_use]
    pub fn trim(self) -> Self {
        Self::fixed(Method::Trim, vec![self])
    }

    #[must_use]
    pub fn round(self) -> Self {
        Self::fixed(Method::Round, vec![self])
    }

    #[must_use]
    pub fn floor(self) -> Self {
        Self::fixed(Method::Floor, vec![self])
    }

    #[must_use]
    pub fn ceiling(self) -> Self {
        Self::fixed(Method::Ceiling, vec![self])
    }

    #[must_use]
    pub fn now() -> Self {
        Self::fixed(Method::Now, Vec::new())
    }

    #[must_use]
    pub fn date(self) -> Self {
        Self::fixed(Method::Date, vec![self])
    }

    #[must_use]
    pub fn hour(self) -> Self {
        Self::fixed(Method::Hour, vec![self])
    }

    #[must_use]
    pub fn month(self) -> Self {
        Self::fixed(Method::Month, vec![self])
    }

    #[must_use]
    pub fn total_seconds(self) -> Self {
        Self::fixed(Method::TotalSeconds, vec![self])
    }

    #[must_use]
    pub fn total_offset_minutes(self) -> Self {
        Self::fixed(Method::TotalOffsetMinutes, vec![self])
    }

    #[must_use]
    pub fn fractional_seconds(self) -> Self {
        Self::fixed(Method::FractionalSeconds, vec![self])
    }

    #[must_use]
    pub fn geo_distance(self, other: Self) -> Self {
        Self::fixed(Method::GeoDistance, vec![self, other])
    }

    #[must_use]
    pub fn geo_intersects(self, other: Self) -> Self {
        Self::fixed(Method::GeoIntersects, vec![self, other])
    }

    #[must_use]
    pub fn geo_length(self) -> Self {
        Self::fixed(Method::GeoLength, vec![self])
    }

    /// `isof(<type>)` against the current instance.
    #[must_use]
    pub fn is_of(type_name: impl Into<Cow<'static, str>>) -> Self {
        Self::fixed(Method::IsOf, vec![Self::keyword(type_name)])
    }

    /// `isof(<self>,<type>)`.
    #[must_use]
    pub fn is_of_type(self, type_name: impl Into<Cow<'static, str>>) -> Self {
        Self::fixed(Method::IsOf, vec![self, Self::keyword(type_name)])
    }

    /// `cast(<type>)` of the current instance.
    #[must_use]
    pub fn cast(type_name: impl Into<Cow<'static, str>>) -> Self {
        Self::fixed(Method::Cast, vec![Self::keyword(type_name)])
    }

    /// `cast(<self>,<type>)`.
    #[must_use]
    pub fn cast_to(self, type_name: impl Into<Cow<'static, str>>) -> Self {
        Self::fixed(Method::Cast, vec![self, Self::keyword(type_name)])
    }

    // ------------------------------------------------------------------
    // traversal
    // ------------------------------------------------------------------

    /// Drive `visitor` over this tree: `enter` before the children, `exit`
    /// after them. Lambda predicates are visited inside their own scope.
    pub fn accept(&self, visitor: &mut dyn ExprVisitor) {
        visitor.enter(self);

        match self {
            Self::Value(_) | Self::Property(_) => {}
            Self::Unary(node) => node.operand.accept(visitor),
            Self::Binary(node) => {
                node.left.accept(visitor);
                node.right.accept(visitor);
            }
            Self::Method(node) => {
                for arg in node.args() {
                    arg.accept(visitor);
                }
            }
            Self::Lambda(node) => {
                node.collection.accept(visitor);
                visitor.push_scope(node.quantifier);
                node.predicate.accept(visitor);
                visitor.pop_scope();
            }
        }

        visitor.exit(self);
    }

    /// Short node label used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Value(_) => "value",
            Self::Property(_) => "property",
            Self::Unary(_) => "unary",
            Self::Binary(_) => "binary",
            Self::Method(_) => "method",
            Self::Lambda(_) => "lambda",
        }
    }
}

impl ops::Not for Expr {
    type Output = Self;

    fn not(self) -> Self {
        Self::unary(UnaryOp::Not, self)
    }
}

impl ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self {
        Self::unary(UnaryOp::Negate, self)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = Serializer::default()
            .render(self)
            .map_err(|_| fmt::Error)?;

        f.write_str(&text)
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<FieldPath> for Expr {
    fn from(path: FieldPath) -> Self {
        Self::field(path)
    }
}
