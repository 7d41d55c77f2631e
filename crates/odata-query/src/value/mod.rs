mod literal;


use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeDelta};
use rust_decimal::Decimal;
use uuid::Uuid;

///
/// Value
/// can be used on the right-hand side of any comparison
///
/// Null        → rendered as the bare `null` keyword.
/// Float32     → rendered in its own shortest form, never widened first.
/// Float       → rendered in its shortest round-trip decimal form.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float32(f32),
    Float(f64),
    Decimal(Decimal),
    Text(String),
    Guid(Uuid),
    Date(NaiveDate),
    TimeOfDay(NaiveTime),
    DateTime(DateTime<FixedOffset>),
    Duration(TimeDelta),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Protocol literal for this value.
    #[must_use]
    pub fn to_literal(&self) -> String {
        literal::render(self)
    }

    /// Short, stable name of the variant; used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Uint(_) => "uint",
            Self::Float32(_) => "float32",
            Self::Float(_) => "float",
            Self::Decimal(_) => "decimal",
            Self::Text(_) => "text",
            Self::Guid(_) => "guid",
            Self::Date(_) => "date",
            Self::TimeOfDay(_) => "time_of_day",
            Self::DateTime(_) => "date_time",
            Self::Duration(_) => "duration",
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&literal::render(self))
    }
}

///
/// Null
///
/// Marker for an explicit null operand, e.g. `equals(|c| c.manager(), Null)`.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Null;
