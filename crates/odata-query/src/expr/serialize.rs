//! Post-order rendering of an expression tree into protocol text.
//!
//! The serializer never looks at a node's children directly. Children have
//! already been rendered by the time a node's `exit` fires, and their
//! fragments sit on the stack in source order.

use crate::{
    DEFAULT_LAMBDA_VARIABLE,
    error::TraversalError,
    expr::{
        Expr, ExprVisitor, Property, Quantifier,
        op::{PREC_ATOM, PREC_UNARY, Precedence},
    },
};
use std::borrow::Cow;

///
/// Fragment
///
/// Rendered text plus the binding strength of its outermost operator.
///

#[derive(Clone, Debug, Eq, PartialEq)]
struct Fragment {
    text: String,
    precedence: Precedence,
}

impl Fragment {
    const fn atom(text: String) -> Self {
        Self {
            text,
            precedence: PREC_ATOM,
        }
    }

    // parenthesize when this fragment binds looser than its parent
    fn wrapped(self, parent: Precedence, strict: bool) -> String {
        let needs_parens = if strict {
            self.precedence <= parent
        } else {
            self.precedence < parent
        };

        if needs_parens {
            format!("({})", self.text)
        } else {
            self.text
        }
    }
}

///
/// Serializer
///
/// Stack-based `ExprVisitor`. Leaves push their rendering; inner nodes pop
/// exactly as many fragments as they have operands and push one combined
/// fragment. A well-formed tree leaves exactly one fragment behind.
///
/// Lambda variables are `<prefix>` for the outermost lambda and
/// `<prefix><depth>` for nested ones.
///

#[derive(Debug)]
pub struct Serializer {
    variable: Cow<'static, str>,
    stack: Vec<Fragment>,
    scopes: Vec<String>,
    fault: Option<TraversalError>,
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new(DEFAULT_LAMBDA_VARIABLE)
    }
}

impl Serializer {
    #[must_use]
    pub fn new(variable: impl Into<Cow<'static, str>>) -> Self {
        Self {
            variable: variable.into(),
            stack: Vec::new(),
            scopes: Vec::new(),
            fault: None,
        }
    }

    /// Traverse `expr` and return its rendering.
    pub fn render(mut self, expr: &Expr) -> Result<String, TraversalError> {
        expr.accept(&mut self);

        self.result()
    }

    /// The single fragment left after a full traversal.
    pub fn result(mut self) -> Result<String, TraversalError> {
        if let Some(err) = self.fault.take() {
            tracing::error!(error = %err, "expression traversal failed");
            return Err(err);
        }

        if self.stack.len() != 1 {
            let err = TraversalError::MalformedTree {
                residual: self.stack.len(),
            };
            tracing::error!(error = %err, "expression traversal failed");
            return Err(err);
        }

        match self.stack.pop() {
            Some(fragment) => Ok(fragment.text),
            None => Err(TraversalError::MalformedTree { residual: 0 }),
        }
    }

    fn variable_at(&self, depth: usize) -> String {
        if depth == 0 {
            self.variable.to_string()
        } else {
            format!("{}{depth}", self.variable)
        }
    }

    fn push(&mut self, fragment: Fragment) {
        self.stack.push(fragment);
    }

    // pop the top `needed` fragments, restored to source order
    fn pop(&mut self, node: &'static str, needed: usize) -> Option<Vec<Fragment>> {
        let available = self.stack.len();

        if available < needed {
            self.fault = Some(TraversalError::StackUnderflow {
                node,
                needed,
                available,
            });
            return None;
        }

        Some(self.stack.split_off(available - needed))
    }

    fn pop_one(&mut self, node: &'static str) -> Option<Fragment> {
        self.pop(node, 1)?.pop()
    }

    fn pop_two(&mut self, node: &'static str) -> Option<(Fragment, Fragment)> {
        let mut pair = self.pop(node, 2)?.into_iter();

        Some((pair.next()?, pair.next()?))
    }

    fn render_property(&self, property: &Property) -> String {
        match property {
            Property::Keyword(keyword) => keyword.to_string(),
            Property::Field(path) => match self.scopes.last() {
                Some(variable) => format!("{variable}/{path}"),
                None => path.to_string(),
            },
        }
    }
}

impl ExprVisitor for Serializer {
    fn exit(&mut self, node: &Expr) {
        if self.fault.is_some() {
            return;
        }

        match node {
            Expr::Value(value) => self.push(Fragment::atom(value.to_literal())),

            Expr::Property(property) => {
                let text = self.render_property(property);
                self.push(Fragment::atom(text));
            }

            Expr::Unary(unary) => {
                let Some(operand) = self.pop_one(node.kind()) else {
                    return;
                };

                let fragment = match unary.op().prefix() {
                    None => operand,
                    Some(prefix) => Fragment {
                        text: format!("{prefix}{}", operand.wrapped(PREC_UNARY, false)),
                        precedence: PREC_UNARY,
                    },
                };
                self.push(fragment);
            }

            Expr::Binary(binary) => {
                let Some((left, right)) = self.pop_two(node.kind()) else {
                    return;
                };

                let op = binary.op();
                let precedence = op.precedence();
                let text = format!(
                    "{} {} {}",
                    left.wrapped(precedence, false),
                    op.symbol(),
                    right.wrapped(precedence, true),
                );
                self.push(Fragment { text, precedence });
            }

            Expr::Method(call) => {
                let Some(args) = self.pop(node.kind(), call.args().len()) else {
                    return;
                };

                let args: Vec<String> = args.into_iter().map(|arg| arg.text).collect();
                let text = format!("{}({})", call.method().name(), args.join(","));
                self.push(Fragment::atom(text));
            }

            Expr::Lambda(lambda) => {
                let Some((collection, predicate)) = self.pop_two(node.kind()) else {
                    return;
                };

                // the lambda's own scope is already closed
                let variable = self.variable_at(self.scopes.len());
                let text = format!(
                    "{}/{}({variable}:{})",
                    collection.text,
                    lambda.quantifier().keyword(),
                    predicate.text,
                );
                self.push(Fragment::atom(text));
            }
        }
    }

    fn push_scope(&mut self, _quantifier: Quantifier) {
        let variable = self.variable_at(self.scopes.len());
        self.scopes.push(variable);
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
    }
}

/// Render `expr` with the default lambda variable.
pub fn serialize(expr: &Expr) -> Result<String, TraversalError> {
    Serializer::default().render(expr)
}
