mod factory;

use crate::{
    expr::{Expr, Expression, serialize as serialize_expr},
    fixtures::Customer,
};

fn render(expr: &Expr) -> String {
    serialize_expr(expr).unwrap()
}

fn name_is(value: &str) -> Expr {
    Expression::<Customer>::equals(|c| c.name(), value.to_string()).unwrap()
}

fn older_than(age: i64) -> Expr {
    Expression::<Customer>::gt(|c| c.age(), age).unwrap()
}
