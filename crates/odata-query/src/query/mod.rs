//! Module: query
//! Responsibility: builder state, filter folding, option compilation and
//! query-string encoding.
//! Does not own: expression rendering (see `expr`) or transport.
//! Boundary: `QueryBuilder::build` is the only way a `Query` is produced.

mod builder;
mod order;
mod params;

#[cfg(test)]
mod tests;

pub use builder::QueryBuilder;
pub use order::{OrderBy, SortDirection};
pub use params::{QueryOption, QueryParams};

use std::fmt;

/// `$count` value emitted by `QueryBuilder::count`.
pub const COUNT_TRUE: &str = "true";

/// `$inlinecount` value emitted by `QueryBuilder::inline_count`.
pub const INLINE_COUNT_ALL_PAGES: &str = "allpages";

///
/// Query
///
/// Output of `QueryBuilder::build`. A raw override always wins over the
/// compiled options; the two are never merged.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Query {
    Compiled(QueryParams),
    Raw(String),
}

impl Query {
    /// Text to append after `?` on the request URL.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        match self {
            Self::Compiled(params) => params.encode(),
            Self::Raw(raw) => raw.clone(),
        }
    }

    #[must_use]
    pub const fn params(&self) -> Option<&QueryParams> {
        match self {
            Self::Compiled(params) => Some(params),
            Self::Raw(_) => None,
        }
    }

    #[must_use]
    pub const fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}
