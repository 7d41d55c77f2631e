use super::render;
use crate::{
    error::{ConstructionError, QueryError},
    expr::{Arity, Expr, Expression, Method, fold_and},
    fixtures::{Customer, CustomerFields},
    path::FieldPath,
    value::{Null, Value},
};

#[test]
fn equals_quotes_and_escapes_text() {
    let expr = Expression::<Customer>::equals(|c| c.name(), "Jo'hn").unwrap();

    assert_eq!(render(&expr), "Name eq 'Jo''hn'");
}

#[test]
fn null_operands_become_the_bare_keyword() {
    let marker = Expression::<Customer>::equals(|c| c.manager(), Null).unwrap();
    let none = Expression::<Customer>::not_equals(|c| c.manager(), None::<i32>).unwrap();
    let value = Expression::<Customer>::equals(|c| c.manager(), Value::Null).unwrap();

    assert_eq!(render(&marker), "Manager eq null");
    assert_eq!(render(&none), "Manager ne null");
    assert_eq!(render(&value), "Manager eq null");
    assert!(matches!(
        marker,
        Expr::Binary(ref node) if *node.right() == Expr::null()
    ));
}

#[test]
fn some_value_is_a_literal() {
    let expr = Expression::<Customer>::equals(|c| c.age(), Some(42)).unwrap();

    assert_eq!(render(&expr), "Age eq 42");
}

#[test]
fn built_expressions_pass_through_unchanged() {
    let other = Expression::<Customer>::property(|c| c.first_name()).unwrap();
    let expr = Expression::<Customer>::equals(|c| c.name(), other).unwrap();

    assert_eq!(render(&expr), "Name eq FirstName");
}

#[test]
fn comparisons_always_take_a_value_leaf() {
    let expr = Expression::<Customer>::lte(|c| c.address().city(), "M").unwrap();

    assert_eq!(render(&expr), "Address/City le 'M'");
    assert!(matches!(
        expr,
        Expr::Binary(ref node) if matches!(node.right(), Expr::Value(_))
    ));
}

#[test]
fn string_methods() {
    let starts = Expression::<Customer>::starts_with(|c| c.name(), "Jo").unwrap();
    let ends = Expression::<Customer>::ends_with(|c| c.name(), "hn").unwrap();
    let index = Expression::<Customer>::index_of(|c| c.name(), "o").unwrap();

    assert_eq!(render(&starts), "startswith(Name,'Jo')");
    assert_eq!(render(&ends), "endswith(Name,'hn')");
    assert_eq!(render(&index.equals(Expr::value(1))), "indexof(Name,'o') eq 1");
}

#[test]
fn arithmetic_accepts_literal_left_operand() {
    assert_eq!(render(&Expression::<Customer>::add(5, 3)), "5 add 3");
    assert_eq!(render(&Expression::<Customer>::modulo(7, 2)), "7 mod 2");
    assert_eq!(render(&Expression::<Customer>::divide(1.5, 2)), "1.5 div 2");
}

#[test]
fn trim_and_now() {
    let name = Expression::<Customer>::property(|c| c.name()).unwrap();

    assert_eq!(render(&Expression::<Customer>::trim(name)), "trim(Name)");
    assert_eq!(render(&Expression::<Customer>::now()), "now()");
}

#[test]
fn unresolvable_accessor_is_rejected() {
    let err = Expression::<Customer>::equals(CustomerFields::into_root, 1).unwrap_err();

    assert!(matches!(err, ConstructionError::UnresolvablePath { .. }));
    assert_eq!(QueryError::from(err).class().to_string(), "invalid_input");
}

#[test]
fn paging_rejects_non_positive_counts() {
    for count in [0, -1, i64::MIN] {
        assert_eq!(
            Expression::<Customer>::top(count).unwrap_err(),
            ConstructionError::Range {
                param: "top",
                value: count,
            }
        );
        assert_eq!(
            Expression::<Customer>::skip(count).unwrap_err(),
            ConstructionError::Range {
                param: "skip",
                value: count,
            }
        );
    }
}

#[test]
fn method_arity_is_enforced() {
    let err = Expr::call(Method::Substring, vec![Expr::value(1)]).unwrap_err();

    assert_eq!(
        err,
        ConstructionError::Arity {
            method: "substring",
            expected: Arity::Between(2, 3),
            found: 1,
        }
    );
    assert_eq!(
        err.to_string(),
        "method 'substring' takes 2 to 3 argument(s), got 1"
    );
}

#[test]
fn catalog_accepts_minimum_arity_for_every_method() {
    for method in Method::ALL {
        let min = match method.arity() {
            Arity::Exact(n) | Arity::Between(n, _) => n,
        };
        let args = (0..min).map(|_| Expr::field(FieldPath::new("A"))).collect();

        let expr = Expr::call(method, args).unwrap();
        let Expr::Method(call) = &expr else {
            panic!("expected method node for {method}");
        };

        assert_eq!(call.args().len(), min);
        assert!(render(&expr).starts_with(method.name()));
        assert_eq!(method.name(), method.name().to_lowercase());
    }
}

#[test]
fn catalog_rejects_one_argument_too_many() {
    for method in Method::ALL {
        let max = match method.arity() {
            Arity::Exact(n) | Arity::Between(_, n) => n,
        };
        let args = (0..=max).map(|_| Expr::value(0)).collect();

        assert!(Expr::call(method, args).is_err(), "{method}");
    }
}

#[test]
fn fold_of_nothing_is_none() {
    assert_eq!(fold_and(Vec::new()), None);
}

#[test]
fn fold_is_left_associative() {
    let a = Expr::field(FieldPath::new("A"));
    let b = Expr::field(FieldPath::new("B"));
    let c = Expr::field(FieldPath::new("C"));

    let folded = fold_and([a.clone(), b.clone(), c.clone()]);

    assert_eq!(folded, Some(a.and(b).and(c)));
}
