//! Module: expr
//! Responsibility: the expression tree, its operator/method catalog, the
//! entity-scoped factory and the post-order serializer.
//! Does not own: query option assembly or encoding.
//! Boundary: the builder hands finished trees to `serialize`.

mod factory;
mod method;
mod node;
mod op;
mod serialize;
mod visitor;

#[cfg(test)]
mod tests;

pub use factory::{Expression, IntoOperand};
pub use method::{Arity, Method, MethodCall};
pub use node::{BinaryExpr, Expr, LambdaExpr, NULL_KEYWORD, Property, UnaryExpr};
pub use op::{BinaryOp, Precedence, Quantifier, UnaryOp};
pub use serialize::{Serializer, serialize};
pub use visitor::ExprVisitor;

pub(crate) use factory::paging;

/// Fold predicates left-to-right with `and`: `((a and b) and c)`.
/// Returns `None` for an empty list.
pub fn fold_and(predicates: impl IntoIterator<Item = Expr>) -> Option<Expr> {
    predicates.into_iter().reduce(Expr::and)
}
