use crate::{
    path::{Collection, Field, FieldPath},
    value::{Null, Value},
};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// ============================================================================
/// ENTITY TRAITS
/// ============================================================================

///
/// Entity
///
/// A resource type that can be queried. Usually implemented through
/// `#[derive(Entity)]`, which also generates the accessor type `Fields`.
///

pub trait Entity {
    type Fields: FieldSet;

    /// Default resource path used when a request names no explicit path.
    const ENTITY_SET: &'static str;

    /// Accessor tokens rooted at the entity itself.
    #[must_use]
    fn fields() -> Self::Fields {
        Self::Fields::at(FieldPath::root())
    }
}

///
/// FieldSet
///
/// Generated accessor type for an entity. Rooted at an arbitrary path so
/// that nested entities can be reached through multi-hop chains.
///

pub trait FieldSet: PathRef {
    fn at(path: FieldPath) -> Self
    where
        Self: Sized;
}

///
/// PathRef
///
/// Anything that names a location on the queried resource.
///

pub trait PathRef {
    fn field_path(&self) -> &FieldPath;
}

///
/// PathList
///
/// One or more paths returned from a single accessor, e.g.
/// `|c| (c.last_name(), c.first_name())` for `select` and `order_by`.
///

pub trait PathList {
    fn field_paths(&self) -> Vec<&FieldPath>;
}

impl PathList for Field {
    fn field_paths(&self) -> Vec<&FieldPath> {
        vec![self.field_path()]
    }
}

impl<T> PathList for Collection<T> {
    fn field_paths(&self) -> Vec<&FieldPath> {
        vec![self.field_path()]
    }
}

impl PathList for FieldPath {
    fn field_paths(&self) -> Vec<&FieldPath> {
        vec![self]
    }
}

impl<P: PathRef> PathList for Vec<P> {
    fn field_paths(&self) -> Vec<&FieldPath> {
        self.iter().map(PathRef::field_path).collect()
    }
}

impl<P: PathRef, const N: usize> PathList for [P; N] {
    fn field_paths(&self) -> Vec<&FieldPath> {
        self.iter().map(PathRef::field_path).collect()
    }
}

// impl_path_list_tuple
macro_rules! impl_path_list_tuple {
    ( $( ( $( $name:ident ),+ ) ),* $(,)? ) => {
        $(
            impl<$( $name: PathRef ),+> PathList for ( $( $name, )+ ) {
                #[allow(non_snake_case)]
                fn field_paths(&self) -> Vec<&FieldPath> {
                    let ( $( $name, )+ ) = self;
                    vec![ $( $name.field_path() ),+ ]
                }
            }
        )*
    };
}

impl_path_list_tuple!(
    (A),
    (A, B),
    (A, B, C),
    (A, B, C, D),
    (A, B, C, D, E),
    (A, B, C, D, E, F),
    (A, B, C, D, E, F, G),
    (A, B, C, D, E, F, G, H),
);

/// ============================================================================
/// FIELD VALUES
/// ============================================================================

///
/// FieldValue
///
/// Conversion of a Rust literal into a protocol `Value`.
///

pub trait FieldValue {
    fn to_value(&self) -> Value;
}

impl FieldValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl FieldValue for Null {
    fn to_value(&self) -> Value {
        Value::Null
    }
}

impl FieldValue for str {
    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl<T: FieldValue + ?Sized> FieldValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: FieldValue + ?Sized> FieldValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl FieldValue for DateTime<Utc> {
    fn to_value(&self) -> Value {
        Value::DateTime(self.fixed_offset())
    }
}

// impl_field_value
#[macro_export]
macro_rules! impl_field_value {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl $crate::traits::FieldValue for $type {
                fn to_value(&self) -> $crate::value::Value {
                    $crate::value::Value::$variant((*self).into())
                }
            }
        )*
    };
}

impl_field_value!(
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Uint,
    u16 => Uint,
    u32 => Uint,
    u64 => Uint,
    f32 => Float32,
    f64 => Float,
    bool => Bool,
    Decimal => Decimal,
    Uuid => Guid,
    NaiveDate => Date,
    NaiveTime => TimeOfDay,
    DateTime<FixedOffset> => DateTime,
    TimeDelta => Duration,
);
