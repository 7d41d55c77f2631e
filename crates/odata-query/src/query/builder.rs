use crate::{
    DEFAULT_LAMBDA_VARIABLE,
    error::{ConstructionError, QueryError},
    expr::{Expr, Expression, IntoOperand, Serializer, fold_and, paging},
    path::{Collection, FieldPath, nested_form, resolve, resolve_all},
    query::{
        COUNT_TRUE, INLINE_COUNT_ALL_PAGES, OrderBy, Query, QueryOption, QueryParams,
        SortDirection,
    },
    traits::{Entity, FieldValue, PathList, PathRef},
};
use std::{fmt, marker::PhantomData};

/// Keyword used by `expand` for the nested form.
const EXPAND_KEYWORD: &str = "$expand";

/// Keyword used by `expand_select` for the nested form.
const SELECT_KEYWORD: &str = "$select";

///
/// QueryBuilder
///
/// Fluent accumulation of query options for entity `E`.
///
/// Predicate calls append to an ordered filter list that is folded with
/// `and` at build time. Every other option is set by its call, and a later
/// call replaces an earlier one. Fallible calls leave the builder unchanged
/// when they fail.
///

pub struct QueryBuilder<E> {
    filters: Vec<Expr>,
    top: Option<Expr>,
    skip: Option<Expr>,
    order_by: Option<String>,
    select: Option<String>,
    expand: Option<String>,
    inline_count: bool,
    count: bool,
    search: Option<String>,
    raw: Option<String>,
    _marker: PhantomData<fn() -> E>,
}

impl<E> Default for QueryBuilder<E> {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            top: None,
            skip: None,
            order_by: None,
            select: None,
            expand: None,
            inline_count: false,
            count: false,
            search: None,
            raw: None,
            _marker: PhantomData,
        }
    }
}

impl<E> fmt::Debug for QueryBuilder<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("filters", &self.filters)
            .field("top", &self.top)
            .field("skip", &self.skip)
            .field("order_by", &self.order_by)
            .field("select", &self.select)
            .field("expand", &self.expand)
            .field("inline_count", &self.inline_count)
            .field("count", &self.count)
            .field("search", &self.search)
            .field("raw", &self.raw)
            .finish_non_exhaustive()
    }
}

impl<E: Entity> QueryBuilder<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Predicates
    // ------------------------------------------------------------------

    /// Append a pre-built predicate.
    pub fn filter(&mut self, predicate: Expr) -> &mut Self {
        self.filters.push(predicate);
        self
    }

    pub fn equals<P: PathRef>(
        &mut self,
        accessor: impl FnOnce(E::Fields) -> P,
        value: impl IntoOperand,
    ) -> Result<&mut Self, QueryError> {
        let predicate = Expression::<E>::equals(accessor, value)?;

        Ok(self.filter(predicate))
    }

    pub fn not_equals<P: PathRef>(
        &mut self,
        accessor: impl FnOnce(E::Fields) -> P,
        value: impl IntoOperand,
    ) -> Result<&mut Self, QueryError> {
        let predicate = Expression::<E>::not_equals(accessor, value)?;

        Ok(self.filter(predicate))
    }

    pub fn contains<P: PathRef>(
        &mut self,
        accessor: impl FnOnce(E::Fields) -> P,
        value: impl IntoOperand,
    ) -> Result<&mut Self, QueryError> {
        let predicate = Expression::<E>::contains(accessor, value)?;

        Ok(self.filter(predicate))
    }

    pub fn lt<P: PathRef>(
        &mut self,
        accessor: impl FnOnce(E::Fields) -> P,
        value: impl FieldValue,
    ) -> Result<&mut Self, QueryError> {
        let predicate = Expression::<E>::lt(accessor, value)?;

        Ok(self.filter(predicate))
    }

    pub fn lte<P: PathRef>(
        &mut self,
        accessor: impl FnOnce(E::Fields) -> P,
        value: impl FieldValue,
    ) -> Result<&mut Self, QueryError> {
        let predicate = Expression::<E>::lte(accessor, value)?;

        Ok(self.filter(predicate))
    }

    pub fn gt<P: PathRef>(
        &mut self,
        accessor: impl FnOnce(E::Fields) -> P,
        value: impl FieldValue,
    ) -> Result<&mut Self, QueryError> {
        let predicate = Expression::<E>::gt(accessor, value)?;

        Ok(self.filter(predicate))
    }

    pub fn gte<P: PathRef>(
        &mut self,
        accessor: impl FnOnce(E::Fields) -> P,
        value: impl FieldValue,
    ) -> Result<&mut Self, QueryError> {
        let predicate = Expression::<E>::gte(accessor, value)?;

        Ok(self.filter(predicate))
    }

    pub fn any<T>(
        &mut self,
        accessor: impl FnOnce(E::Fields) -> Collection<T>,
        predicate: Expr,
    ) -> Result<&mut Self, QueryError> {
        let lambda = Expression::<E>::any(accessor, predicate)?;

        Ok(self.filter(lambda))
    }

    pub fn all<T>(
        &mut self,
        accessor: impl FnOnce(E::Fields) -> Collection<T>,
        predicate: Expr,
    ) -> Result<&mut Self, QueryError> {
        let lambda = Expression::<E>::all(accessor, predicate)?;

        Ok(self.filter(lambda))
    }

    /// Append `<left> mul <right>` as a filter term.
    pub fn multiply(&mut self, left: impl IntoOperand, right: impl FieldValue) -> &mut Self {
        let product = Expression::<E>::multiply(left, right);

        self.filter(product)
    }

    // ------------------------------------------------------------------
    // Paging and counts
    // ------------------------------------------------------------------

    pub fn top(&mut self, count: i64) -> Result<&mut Self, QueryError> {
        self.top = Some(paging("top", count)?);

        Ok(self)
    }

    pub fn skip(&mut self, count: i64) -> Result<&mut Self, QueryError> {
        self.skip = Some(paging("skip", count)?);

        Ok(self)
    }

    /// `$inlinecount=allpages`.
    pub const fn inline_count(&mut self) -> &mut Self {
        self.inline_count = true;
        self
    }

    /// `$count=true`.
    pub const fn count(&mut self) -> &mut Self {
        self.count = true;
        self
    }

    pub fn search(&mut self, text: impl Into<String>) -> &mut Self {
        self.search = Some(text.into());
        self
    }

    // ------------------------------------------------------------------
    // Ordering
    // ------------------------------------------------------------------

    /// Sort ascending by one or more paths, e.g.
    /// `order_by(|c| (c.last_name(), c.first_name()))`.
    pub fn order_by<L: PathList>(
        &mut self,
        accessor: impl FnOnce(E::Fields) -> L,
    ) -> Result<&mut Self, QueryError> {
        self.set_order(accessor, SortDirection::Asc)
    }

    /// Sort descending; a single ` desc` follows the joined path list.
    pub fn order_by_descending<L: PathList>(
        &mut self,
        accessor: impl FnOnce(E::Fields) -> L,
    ) -> Result<&mut Self, QueryError> {
        self.set_order(accessor, SortDirection::Desc)
    }

    fn set_order<L: PathList>(
        &mut self,
        accessor: impl FnOnce(E::Fields) -> L,
        direction: SortDirection,
    ) -> Result<&mut Self, QueryError> {
        let paths = join_paths(&resolve_all::<E, _, _>(accessor)?);
        self.order_by = Some(format!("{paths}{}", direction.suffix()));

        Ok(self)
    }

    /// Explicit sort keys, each with its own direction. An empty slice
    /// clears the ordering; a key without a path is rejected.
    pub fn order_by_builder(&mut self, orders: &[OrderBy]) -> Result<&mut Self, QueryError> {
        if let Some(index) = orders.iter().position(|order| order.path().is_root()) {
            let accessor = format!("order_by_builder[{index}]");
            return Err(ConstructionError::unresolvable_path(accessor).into());
        }

        self.order_by = if orders.is_empty() {
            None
        } else {
            let keys: Vec<String> = orders.iter().map(ToString::to_string).collect();
            Some(keys.join(","))
        };

        Ok(self)
    }

    // ------------------------------------------------------------------
    // Projection and expansion
    // ------------------------------------------------------------------

    pub fn select<L: PathList>(
        &mut self,
        accessor: impl FnOnce(E::Fields) -> L,
    ) -> Result<&mut Self, QueryError> {
        let paths = resolve_all::<E, _, _>(accessor)?;
        self.select = Some(join_paths(&paths));

        Ok(self)
    }

    /// Expand a navigation; a multi-hop accessor yields `outer($expand=inner)`.
    pub fn expand<P: PathRef>(
        &mut self,
        accessor: impl FnOnce(E::Fields) -> P,
    ) -> Result<&mut Self, QueryError> {
        self.set_expand(accessor, EXPAND_KEYWORD)
    }

    /// Expand a navigation selecting one of its fields: `outer($select=inner)`.
    pub fn expand_select<P: PathRef>(
        &mut self,
        accessor: impl FnOnce(E::Fields) -> P,
    ) -> Result<&mut Self, QueryError> {
        self.set_expand(accessor, SELECT_KEYWORD)
    }

    fn set_expand<P: PathRef>(
        &mut self,
        accessor: impl FnOnce(E::Fields) -> P,
        keyword: &str,
    ) -> Result<&mut Self, QueryError> {
        let path = resolve::<E, _, _>(accessor)?;
        self.expand = Some(nested_form(&path, keyword));

        Ok(self)
    }

    // ------------------------------------------------------------------
    // Override
    // ------------------------------------------------------------------

    /// Use `raw` as the query string verbatim, ignoring every other option.
    pub fn add_odata_string(&mut self, raw: impl Into<String>) -> &mut Self {
        self.raw = Some(raw.into());
        self
    }

    // ------------------------------------------------------------------
    // Compilation
    // ------------------------------------------------------------------

    /// Compile with the default lambda variable.
    pub fn build(&self) -> Result<Query, QueryError> {
        self.build_with(DEFAULT_LAMBDA_VARIABLE)
    }

    /// Compile, naming the outermost lambda variable `lambda_variable`.
    pub fn build_with(&self, lambda_variable: &str) -> Result<Query, QueryError> {
        if let Some(raw) = &self.raw {
            tracing::debug!(raw = %raw, "using raw query override");
            return Ok(Query::Raw(raw.clone()));
        }

        let params = self.compile(lambda_variable)?;
        tracing::debug!(options = params.len(), "compiled query options");

        Ok(Query::Compiled(params))
    }

    /// Compiled options, ignoring any raw override.
    pub fn params(&self) -> Result<QueryParams, QueryError> {
        self.compile(DEFAULT_LAMBDA_VARIABLE)
    }

    fn compile(&self, lambda_variable: &str) -> Result<QueryParams, QueryError> {
        let render =
            |expr: &Expr| Serializer::new(lambda_variable.to_owned()).render(expr);

        let mut params = QueryParams::new();

        if let Some(search) = &self.search {
            params.insert(QueryOption::Search, search.as_str());
        }

        if let Some(filter) = fold_and(self.filters.iter().cloned()) {
            params.insert(QueryOption::Filter, render(&filter)?);
        }

        if let Some(select) = &self.select {
            params.insert(QueryOption::Select, select.as_str());
        }

        if let Some(top) = &self.top {
            params.insert(QueryOption::Top, render(top)?);
        }

        if let Some(skip) = &self.skip {
            params.insert(QueryOption::Skip, render(skip)?);
        }

        if self.inline_count {
            params.insert(QueryOption::InlineCount, INLINE_COUNT_ALL_PAGES);
        }

        if let Some(order_by) = &self.order_by {
            params.insert(QueryOption::OrderBy, order_by.as_str());
        }

        if let Some(expand) = &self.expand {
            params.insert(QueryOption::Expand, expand.as_str());
        }

        if self.count {
            params.insert(QueryOption::Count, COUNT_TRUE);
        }

        Ok(params)
    }
}

fn join_paths(paths: &[FieldPath]) -> String {
    let names: Vec<String> = paths.iter().map(ToString::to_string).collect();

    names.join(",")
}
