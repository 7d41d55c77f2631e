use super::*;
use crate::{
    error::{ConstructionError, ErrorClass, QueryError},
    expr::Expression,
    fixtures::{Customer, CustomerFields, Order},
    path::FieldPath,
    value::Null,
};

fn filter_of(builder: &QueryBuilder<Customer>) -> Option<String> {
    builder
        .params()
        .unwrap()
        .get(QueryOption::Filter)
        .map(ToString::to_string)
}

// ---------------------------------------------------------------------
// filters
// ---------------------------------------------------------------------

#[test]
fn empty_builder_compiles_to_nothing() {
    let builder = QueryBuilder::<Customer>::new();

    let query = builder.build().unwrap();

    assert_eq!(query, Query::Compiled(QueryParams::new()));
    assert_eq!(query.to_query_string(), "");
}

#[test]
fn single_filter_is_emitted_verbatim() {
    let mut builder = QueryBuilder::<Customer>::new();
    builder.equals(|c| c.name(), "Jo'hn").unwrap();

    assert_eq!(filter_of(&builder).as_deref(), Some("Name eq 'Jo''hn'"));
}

#[test]
fn filters_fold_left_to_right_with_and() {
    let mut builder = QueryBuilder::<Customer>::new();
    builder
        .equals(|c| c.name(), "A")
        .unwrap()
        .gt(|c| c.age(), 30)
        .unwrap()
        .not_equals(|c| c.manager(), Null)
        .unwrap();

    assert_eq!(
        filter_of(&builder).as_deref(),
        Some("Name eq 'A' and Age gt 30 and Manager ne null")
    );
}

#[test]
fn every_predicate_call_appends() {
    let mut builder = QueryBuilder::<Customer>::new();
    builder
        .contains(|c| c.name(), "o")
        .unwrap()
        .lt(|c| c.age(), 65)
        .unwrap()
        .lte(|c| c.age(), 64)
        .unwrap()
        .gte(|c| c.age(), 18)
        .unwrap()
        .multiply(2, 3);

    assert_eq!(
        filter_of(&builder).as_deref(),
        Some("contains(Name,'o') and Age lt 65 and Age le 64 and Age ge 18 and 2 mul 3")
    );
}

#[test]
fn or_groups_survive_folding() {
    let a = Expression::<Customer>::equals(|c| c.name(), "A").unwrap();
    let b = Expression::<Customer>::equals(|c| c.name(), "B").unwrap();

    let mut builder = QueryBuilder::<Customer>::new();
    builder.filter(a.or(b)).gt(|c| c.age(), 1).unwrap();

    assert_eq!(
        filter_of(&builder).as_deref(),
        Some("(Name eq 'A' or Name eq 'B') and Age gt 1")
    );
}

#[test]
fn lambda_filters() {
    let amount = Expression::<Order>::gt(|o| o.amount(), 100).unwrap();
    let none_negative = Expression::<Order>::gte(|o| o.amount(), 0).unwrap();

    let mut builder = QueryBuilder::<Customer>::new();
    builder
        .any(|c| c.orders(), amount)
        .unwrap()
        .all(|c| c.orders(), none_negative)
        .unwrap();

    assert_eq!(
        filter_of(&builder).as_deref(),
        Some("Orders/any(x:x/Amount gt 100) and Orders/all(x:x/Amount ge 0)")
    );
}

#[test]
fn lambda_variable_follows_build_option() {
    let amount = Expression::<Order>::gt(|o| o.amount(), 100).unwrap();

    let mut builder = QueryBuilder::<Customer>::new();
    builder.any(|c| c.orders(), amount).unwrap();

    let query = builder.build_with("o").unwrap();
    let params = query.params().unwrap();

    assert_eq!(
        params.get(QueryOption::Filter),
        Some("Orders/any(o:o/Amount gt 100)")
    );
}

#[test]
fn failed_predicate_leaves_builder_unchanged() {
    let mut builder = QueryBuilder::<Customer>::new();
    builder.equals(|c| c.name(), "A").unwrap();

    let err = builder.equals(CustomerFields::into_root, "B").unwrap_err();

    assert_eq!(err.class(), ErrorClass::InvalidInput);
    assert_eq!(filter_of(&builder).as_deref(), Some("Name eq 'A'"));
}

// ---------------------------------------------------------------------
// paging and counts
// ---------------------------------------------------------------------

#[test]
fn top_and_skip_emit_their_counts() {
    let mut builder = QueryBuilder::<Customer>::new();
    builder.top(10).unwrap().skip(20).unwrap();

    let params = builder.params().unwrap();

    assert_eq!(params.get(QueryOption::Top), Some("10"));
    assert_eq!(params.get(QueryOption::Skip), Some("20"));
}

#[test]
fn non_positive_paging_is_rejected_and_state_kept() {
    let mut builder = QueryBuilder::<Customer>::new();
    builder.top(5).unwrap();

    let err = builder.top(0).unwrap_err();
    assert_eq!(
        err,
        QueryError::Construction(ConstructionError::Range {
            param: "top",
            value: 0,
        })
    );
    assert!(builder.skip(-1).is_err());

    let params = builder.params().unwrap();
    assert_eq!(params.get(QueryOption::Top), Some("5"));
    assert!(!params.contains(QueryOption::Skip));
}

#[test]
fn count_and_inline_count_flags() {
    let mut builder = QueryBuilder::<Customer>::new();
    builder.count().inline_count();

    let params = builder.params().unwrap();

    assert_eq!(params.get(QueryOption::Count), Some("true"));
    assert_eq!(params.get(QueryOption::InlineCount), Some("allpages"));
}

#[test]
fn search_is_emitted_raw() {
    let mut builder = QueryBuilder::<Customer>::new();
    builder.search("blue OR green");

    let params = builder.params().unwrap();

    assert_eq!(params.get(QueryOption::Search), Some("blue OR green"));
    assert_eq!(params.encode(), "%24search=blue+OR+green");
}

// ---------------------------------------------------------------------
// ordering
// ---------------------------------------------------------------------

#[test]
fn order_by_joins_paths() {
    let mut builder = QueryBuilder::<Customer>::new();
    builder
        .order_by(|c| (c.last_name(), c.first_name()))
        .unwrap();

    let params = builder.params().unwrap();

    assert_eq!(params.get(QueryOption::OrderBy), Some("LastName,FirstName"));
}

#[test]
fn order_by_descending_appends_one_marker() {
    let mut builder = QueryBuilder::<Customer>::new();
    builder
        .order_by_descending(|c| (c.last_name(), c.address().city()))
        .unwrap();

    let params = builder.params().unwrap();

    assert_eq!(
        params.get(QueryOption::OrderBy),
        Some("LastName,Address/City desc")
    );
}

#[test]
fn last_order_by_call_wins() {
    let mut builder = QueryBuilder::<Customer>::new();
    builder
        .order_by(|c| c.name())
        .unwrap()
        .order_by_descending(|c| c.age())
        .unwrap();

    let params = builder.params().unwrap();

    assert_eq!(params.get(QueryOption::OrderBy), Some("Age desc"));
}

#[test]
fn order_by_builder_renders_each_direction() {
    let mut builder = QueryBuilder::<Customer>::new();
    builder.order_by_builder(&[
        OrderBy::desc("Age"),
        OrderBy::asc("Name"),
        OrderBy::new(FieldPath::parse("Address/City"), SortDirection::Desc),
    ])
    .unwrap();

    let params = builder.params().unwrap();

    assert_eq!(
        params.get(QueryOption::OrderBy),
        Some("Age desc,Name,Address/City desc")
    );
}

#[test]
fn empty_order_by_builder_clears_ordering() {
    let mut builder = QueryBuilder::<Customer>::new();
    builder
        .order_by(|c| c.name())
        .unwrap()
        .order_by_builder(&[])
        .unwrap();

    assert!(!builder.params().unwrap().contains(QueryOption::OrderBy));
}

#[test]
fn order_by_builder_rejects_keys_without_a_path() {
    let mut builder = QueryBuilder::<Customer>::new();
    builder.order_by(|c| c.age()).unwrap();

    let err = builder
        .order_by_builder(&[OrderBy::asc(""), OrderBy::desc("Name")])
        .unwrap_err();

    assert!(matches!(
        err,
        QueryError::Construction(ConstructionError::UnresolvablePath { ref accessor })
            if accessor == "order_by_builder[0]"
    ));
    assert_eq!(
        builder.params().unwrap().get(QueryOption::OrderBy),
        Some("Age")
    );
}

#[test]
fn builder_debug_does_not_require_entity_debug() {
    let mut builder = QueryBuilder::<Customer>::new();
    builder.search("blue").top(3).unwrap();

    let debug = format!("{builder:?}");

    assert!(debug.starts_with("QueryBuilder"));
    assert!(debug.contains("\"blue\""));
}

// ---------------------------------------------------------------------
// projection and expansion
// ---------------------------------------------------------------------

#[test]
fn select_joins_paths() {
    let mut builder = QueryBuilder::<Customer>::new();
    builder.select(|c| (c.name(), c.age())).unwrap();

    let params = builder.params().unwrap();

    assert_eq!(params.get(QueryOption::Select), Some("Name,Age"));
}

#[test]
fn expand_single_hop_is_bare() {
    let mut builder = QueryBuilder::<Customer>::new();
    builder.expand(|c| c.orders()).unwrap();

    let params = builder.params().unwrap();

    assert_eq!(params.get(QueryOption::Expand), Some("Orders"));
}

#[test]
fn expand_two_hops_uses_nested_form() {
    let mut builder = QueryBuilder::<Customer>::new();
    builder.expand(|c| c.address().city()).unwrap();

    let params = builder.params().unwrap();

    assert_eq!(params.get(QueryOption::Expand), Some("Address($expand=City)"));
}

#[test]
fn expand_select_uses_select_keyword() {
    let mut builder = QueryBuilder::<Customer>::new();
    builder.expand_select(|c| c.address().city()).unwrap();

    let params = builder.params().unwrap();

    assert_eq!(params.get(QueryOption::Expand), Some("Address($select=City)"));
}

// ---------------------------------------------------------------------
// encoding and override
// ---------------------------------------------------------------------

#[test]
fn options_follow_canonical_order() {
    let mut builder = QueryBuilder::<Customer>::new();
    builder
        .count()
        .expand(|c| c.orders())
        .unwrap()
        .order_by(|c| c.name())
        .unwrap()
        .inline_count()
        .skip(2)
        .unwrap()
        .top(1)
        .unwrap()
        .select(|c| c.name())
        .unwrap()
        .equals(|c| c.age(), 3)
        .unwrap()
        .search("x");

    let params = builder.params().unwrap();
    let keys: Vec<&str> = params.iter().map(|(option, _)| option.as_str()).collect();

    assert_eq!(
        keys,
        [
            "$search",
            "$filter",
            "$select",
            "$top",
            "$skip",
            "$inlinecount",
            "$orderby",
            "$expand",
            "$count",
        ]
    );
}

#[test]
fn encoding_turns_spaces_into_plus() {
    let mut builder = QueryBuilder::<Customer>::new();
    builder.equals(|c| c.name(), "A B").unwrap().top(5).unwrap();

    let encoded = builder.build().unwrap().to_query_string();

    assert!(encoded.contains("Name+eq+%27A+B%27"), "{encoded}");
    assert_eq!(encoded, "%24filter=Name+eq+%27A+B%27&%24top=5");
}

#[test]
fn encoding_escapes_reserved_characters() {
    let mut builder = QueryBuilder::<Customer>::new();
    builder.equals(|c| c.name(), "a&b=c").unwrap();

    let encoded = builder.build().unwrap().to_query_string();

    assert_eq!(encoded, "%24filter=Name+eq+%27a%26b%3Dc%27");
}

#[test]
fn raw_override_wins_over_everything() {
    let mut builder = QueryBuilder::<Customer>::new();
    builder
        .equals(|c| c.name(), "A")
        .unwrap()
        .top(3)
        .unwrap()
        .add_odata_string("$filter=Custom eq 1");

    let query = builder.build().unwrap();

    assert_eq!(query, Query::Raw("$filter=Custom eq 1".to_string()));
    assert_eq!(query.to_query_string(), "$filter=Custom eq 1");
    assert!(query.params().is_none());
}

#[test]
fn params_serialize_as_a_json_object() {
    let mut builder = QueryBuilder::<Customer>::new();
    builder.top(1).unwrap().count();

    let json = serde_json::to_value(builder.params().unwrap()).unwrap();

    assert_eq!(json, serde_json::json!({ "$top": "1", "$count": "true" }));
}
