use crate::expr::{Expr, Quantifier};

///
/// ExprVisitor
///
/// Object-safe traversal contract driven by `Expr::accept`. `enter` fires
/// before a node's children and `exit` after them, so a visitor that only
/// implements `exit` observes nodes in post-order.
///
/// `push_scope` / `pop_scope` bracket the predicate of a lambda; the
/// collection operand is visited before the scope opens.
///

pub trait ExprVisitor {
    fn enter(&mut self, _node: &Expr) {}
    fn exit(&mut self, node: &Expr);

    fn push_scope(&mut self, _quantifier: Quantifier) {}
    fn pop_scope(&mut self) {}
}
