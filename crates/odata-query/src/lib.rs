//! Typed OData query construction: expression trees, a post-order text
//! serializer, and a fluent builder that compiles `$filter`, `$orderby`,
//! `$select`, `$expand`, paging and count options into a query string.
#![warn(unreachable_pub)]

extern crate self as odata_query;

// public exports are one module level down
pub mod config;
pub mod error;
pub mod expr;
pub mod path;
pub mod query;
pub mod request;
pub mod traits;
pub mod value;

#[cfg(test)]
mod fixtures;

pub use odata_query_derive::Entity;

///
/// CONSTANTS
///

/// Separator between hops of a property path inside query option values.
pub const PATH_SEPARATOR: char = '/';

/// Bound variable used by the outermost lambda; nested lambdas append their depth.
pub const DEFAULT_LAMBDA_VARIABLE: &str = "x";

///
/// Prelude
///
/// Prelude contains the vocabulary needed to describe and build a query.
/// Transports, configuration and error internals stay one level down.
///

pub mod prelude {
    pub use crate::{
        expr::{Expr, Expression},
        path::{Collection, Field, FieldPath},
        query::{OrderBy, Query, QueryBuilder, SortDirection},
        traits::{Entity, FieldSet, FieldValue, PathRef},
        value::{Null, Value},
    };
    pub use odata_query_derive::Entity;
}
