use crate::{
    error::ConstructionError,
    expr::{BinaryOp, Expr, Quantifier, UnaryOp},
    path::{Collection, resolve},
    traits::{Entity, FieldValue, PathRef},
    value::Value,
};
use std::{borrow::Cow, marker::PhantomData};

///
/// IntoOperand
///
/// Anything usable as an operand: a literal (normalized into a `Value`
/// leaf) or an already-built expression (passed through unchanged).
///

pub trait IntoOperand {
    fn into_operand(self) -> Expr;
}

impl<T: FieldValue> IntoOperand for T {
    fn into_operand(self) -> Expr {
        Expr::Value(self.to_value())
    }
}

impl IntoOperand for Expr {
    fn into_operand(self) -> Expr {
        self
    }
}

// null compares against the bare keyword, never a quoted literal
fn comparand(operand: impl IntoOperand) -> Expr {
    match operand.into_operand() {
        Expr::Value(Value::Null) => Expr::null(),
        other => other,
    }
}

///
/// Expression
///
/// Entity-scoped expression factory. Every accessor is a closure over the
/// entity's generated `Fields` type, e.g.
/// `Expression::<Customer>::equals(|c| c.name(), "Jo")`.
///

pub struct Expression<E>(PhantomData<fn() -> E>);

impl<E: Entity> Expression<E> {
    /// Property leaf for an accessor.
    pub fn property<P: PathRef>(
        accessor: impl FnOnce(E::Fields) -> P,
    ) -> Result<Expr, ConstructionError> {
        resolve::<E, _, _>(accessor).map(Expr::field)
    }

    // ------------------------------------------------------------------
    // comparison
    // ------------------------------------------------------------------

    pub fn equals<P: PathRef>(
        accessor: impl FnOnce(E::Fields) -> P,
        value: impl IntoOperand,
    ) -> Result<Expr, ConstructionError> {
        Ok(Self::property(accessor)?.equals(comparand(value)))
    }

    pub fn not_equals<P: PathRef>(
        accessor: impl FnOnce(E::Fields) -> P,
        value: impl IntoOperand,
    ) -> Result<Expr, ConstructionError> {
        Ok(Self::property(accessor)?.not_equals(comparand(value)))
    }

    pub fn gt<P: PathRef>(
        accessor: impl FnOnce(E::Fields) -> P,
        value: impl FieldValue,
    ) -> Result<Expr, ConstructionError> {
        Ok(Self::property(accessor)?.gt(value))
    }

    pub fn gte<P: PathRef>(
        accessor: impl FnOnce(E::Fields) -> P,
        value: impl FieldValue,
    ) -> Result<Expr, ConstructionError> {
        Ok(Self::property(accessor)?.ge(value))
    }

    pub fn lt<P: PathRef>(
        accessor: impl FnOnce(E::Fields) -> P,
        value: impl FieldValue,
    ) -> Result<Expr, ConstructionError> {
        Ok(Self::property(accessor)?.lt(value))
    }

    pub fn lte<P: PathRef>(
        accessor: impl FnOnce(E::Fields) -> P,
        value: impl FieldValue,
    ) -> Result<Expr, ConstructionError> {
        Ok(Self::property(accessor)?.le(value))
    }

    // ------------------------------------------------------------------
    // string methods
    // ------------------------------------------------------------------

    pub fn contains<P: PathRef>(
        accessor: impl FnOnce(E::Fields) -> P,
        value: impl IntoOperand,
    ) -> Result<Expr, ConstructionError> {
        Ok(Self::property(accessor)?.contains(value.into_operand()))
    }

    pub fn starts_with<P: PathRef>(
        accessor: impl FnOnce(E::Fields) -> P,
        value: impl IntoOperand,
    ) -> Result<Expr, ConstructionError> {
        Ok(Self::property(accessor)?.starts_with(value.into_operand()))
    }

    pub fn ends_with<P: PathRef>(
        accessor: impl FnOnce(E::Fields) -> P,
        value: impl IntoOperand,
    ) -> Result<Expr, ConstructionError> {
        Ok(Self::property(accessor)?.ends_with(value.into_operand()))
    }

    pub fn index_of<P: PathRef>(
        accessor: impl FnOnce(E::Fields) -> P,
        value: impl IntoOperand,
    ) -> Result<Expr, ConstructionError> {
        Ok(Self::property(accessor)?.index_of(value.into_operand()))
    }

    /// `length(<field>)`.
    pub fn len<P: PathRef>(accessor: impl FnOnce(E::Fields) -> P) -> Result<Expr, ConstructionError> {
        Ok(Self::property(accessor)?.length())
    }

    #[must_use]
    pub fn trim(value: impl IntoOperand) -> Expr {
        value.into_operand().trim()
    }

    #[must_use]
    pub fn now() -> Expr {
        Expr::now()
    }

    // ------------------------------------------------------------------
    // arithmetic
    // ------------------------------------------------------------------

    #[must_use]
    pub fn add(left: impl IntoOperand, right: impl FieldValue) -> Expr {
        Self::arithmetic(BinaryOp::Add, left, right)
    }

    #[must_use]
    pub fn subtract(left: impl IntoOperand, right: impl FieldValue) -> Expr {
        Self::arithmetic(BinaryOp::Sub, left, right)
    }

    #[must_use]
    pub fn multiply(left: impl IntoOperand, right: impl FieldValue) -> Expr {
        Self::arithmetic(BinaryOp::Mul, left, right)
    }

    #[must_use]
    pub fn divide(left: impl IntoOperand, right: impl FieldValue) -> Expr {
        Self::arithmetic(BinaryOp::Div, left, right)
    }

    #[must_use]
    pub fn modulo(left: impl IntoOperand, right: impl FieldValue) -> Expr {
        Self::arithmetic(BinaryOp::Mod, left, right)
    }

    fn arithmetic(op: BinaryOp, left: impl IntoOperand, right: impl FieldValue) -> Expr {
        Expr::binary(op, left.into_operand(), Expr::value(right))
    }

    // ------------------------------------------------------------------
    // types
    // ------------------------------------------------------------------

    /// `cast(<type>)`.
    #[must_use]
    pub fn cast(type_name: impl Into<Cow<'static, str>>) -> Expr {
        Expr::cast(type_name)
    }

    /// `cast(<field>,<type>)`.
    pub fn cast_field<P: PathRef>(
        accessor: impl FnOnce(E::Fields) -> P,
        type_name: impl Into<Cow<'static, str>>,
    ) -> Result<Expr, ConstructionError> {
        Ok(Self::property(accessor)?.cast_to(type_name))
    }

    /// `isof(<type>)`.
    #[must_use]
    pub fn is_of(type_name: impl Into<Cow<'static, str>>) -> Expr {
        Expr::is_of(type_name)
    }

    /// `isof(<field>,<type>)`.
    pub fn is_of_field<P: PathRef>(
        accessor: impl FnOnce(E::Fields) -> P,
        type_name: impl Into<Cow<'static, str>>,
    ) -> Result<Expr, ConstructionError> {
        Ok(Self::property(accessor)?.is_of_type(type_name))
    }

    // ------------------------------------------------------------------
    // paging
    // ------------------------------------------------------------------

    pub fn top(count: i64) -> Result<Expr, ConstructionError> {
        paging("top", count)
    }

    pub fn skip(count: i64) -> Result<Expr, ConstructionError> {
        paging("skip", count)
    }

    // ------------------------------------------------------------------
    // lambda
    // ------------------------------------------------------------------

    /// `<collection>/any(x:<predicate>)`. The predicate is built against
    /// the element entity, so its paths are relative to each element.
    pub fn any<T>(
        accessor: impl FnOnce(E::Fields) -> Collection<T>,
        predicate: Expr,
    ) -> Result<Expr, ConstructionError> {
        Self::lambda(Quantifier::Any, accessor, predicate)
    }

    /// `<collection>/all(x:<predicate>)`.
    pub fn all<T>(
        accessor: impl FnOnce(E::Fields) -> Collection<T>,
        predicate: Expr,
    ) -> Result<Expr, ConstructionError> {
        Self::lambda(Quantifier::All, accessor, predicate)
    }

    fn lambda<T>(
        quantifier: Quantifier,
        accessor: impl FnOnce(E::Fields) -> Collection<T>,
        predicate: Expr,
    ) -> Result<Expr, ConstructionError> {
        let collection = resolve::<E, _, _>(accessor)?;

        Ok(Expr::lambda(quantifier, collection, predicate))
    }

    // ------------------------------------------------------------------
    // logical
    // ------------------------------------------------------------------

    #[must_use]
    pub fn and(left: Expr, right: Expr) -> Expr {
        left.and(right)
    }

    #[must_use]
    pub fn or(left: Expr, right: Expr) -> Expr {
        left.or(right)
    }

    #[must_use]
    pub fn not(operand: Expr) -> Expr {
        !operand
    }
}

pub(crate) fn paging(param: &'static str, count: i64) -> Result<Expr, ConstructionError> {
    if count <= 0 {
        return Err(ConstructionError::Range {
            param,
            value: count,
        });
    }

    Ok(Expr::unary(UnaryOp::Identity, Expr::value(count)))
}
