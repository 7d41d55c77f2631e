use crate::{error::ConstructionError, expr::Expr};
use std::fmt;

///
/// Arity
///
/// Number of arguments a method accepts. Most methods are fixed; a few
/// (`substring`, `isof`, `cast`) have an optional trailing argument.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Arity {
    Exact(usize),
    Between(usize, usize),
}

impl Arity {
    #[must_use]
    pub const fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exact(n) => count == n,
            Self::Between(min, max) => count >= min && count <= max,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::Between(min, max) => write!(f, "{min} to {max}"),
        }
    }
}

///
/// Method
///
/// Closed catalog of protocol functions usable inside a predicate.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Method {
    // string
    Contains,
    StartsWith,
    EndsWith,
    Length,
    Trim,
    IndexOf,
    Substring,
    Concat,

    // arithmetic
    Round,
    Floor,
    Ceiling,

    // temporal
    Now,
    Date,
    Hour,
    Month,
    TotalSeconds,
    TotalOffsetMinutes,
    FractionalSeconds,

    // geo
    GeoDistance,
    GeoIntersects,
    GeoLength,

    // type
    IsOf,
    Cast,
}

impl Method {
    pub const ALL: [Self; 23] = [
        Self::Contains,
        Self::StartsWith,
        Self::EndsWith,
        Self::Length,
        Self::Trim,
        Self::IndexOf,
        Self::Substring,
        Self::Concat,
        Self::Round,
        Self::Floor,
        Self::Ceiling,
        Self::Now,
        Self::Date,
        Self::Hour,
        Self::Month,
        Self::TotalSeconds,
        Self::TotalOffsetMinutes,
        Self::FractionalSeconds,
        Self::GeoDistance,
        Self::GeoIntersects,
        Self::GeoLength,
        Self::IsOf,
        Self::Cast,
    ];

    /// Lower-case protocol name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::StartsWith => "startswith",
            Self::EndsWith => "endswith",
            Self::Length => "length",
            Self::Trim => "trim",
            Self::IndexOf => "indexof",
            Self::Substring => "substring",
            Self::Concat => "concat",
            Self::Round => "round",
            Self::Floor => "floor",
            Self::Ceiling => "ceiling",
            Self::Now => "now",
            Self::Date => "date",
            Self::Hour => "hour",
            Self::Month => "month",
            Self::TotalSeconds => "totalseconds",
            Self::TotalOffsetMinutes => "totaloffsetminutes",
            Self::FractionalSeconds => "fractionalseconds",
            Self::GeoDistance => "geo.distance",
            Self::GeoIntersects => "geo.intersects",
            Self::GeoLength => "geo.length",
            Self::IsOf => "isof",
            Self::Cast => "cast",
        }
    }

    #[must_use]
    pub const fn arity(self) -> Arity {
        match self {
            Self::Now => Arity::Exact(0),
            Self::Length
            | Self::Trim
            | Self::Round
            | Self::Floor
            | Self::Ceiling
            | Self::Date
            | Self::Hour
            | Self::Month
            | Self::TotalSeconds
            | Self::TotalOffsetMinutes
            | Self::FractionalSeconds
            | Self::GeoLength => Arity::Exact(1),
            Self::Contains
            | Self::StartsWith
            | Self::EndsWith
            | Self::IndexOf
            | Self::Concat
            | Self::GeoDistance
            | Self::GeoIntersects => Arity::Exact(2),
            Self::Substring => Arity::Between(2, 3),
            Self::IsOf | Self::Cast => Arity::Between(1, 2),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

///
/// MethodCall
///
/// A method applied to an argument list whose length always satisfies
/// the method's arity.
///

#[derive(Clone, Debug, PartialEq)]
pub struct MethodCall {
    method: Method,
    args: Vec<Expr>,
}

impl MethodCall {
    pub fn new(method: Method, args: Vec<Expr>) -> Result<Self, ConstructionError> {
        let expected = method.arity();

        if !expected.accepts(args.len()) {
            return Err(ConstructionError::Arity {
                method: method.name(),
                expected,
                found: args.len(),
            });
        }

        Ok(Self { method, args })
    }

    pub(crate) const fn from_parts(method: Method, args: Vec<Expr>) -> Self {
        Self { method, args }
    }

    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    #[must_use]
    pub fn args(&self) -> &[Expr] {
        &self.args
    }
}
