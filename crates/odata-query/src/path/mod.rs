//! Module: path
//! Responsibility: typed, path-bearing accessor tokens and their resolution
//! into protocol path strings.
//! Does not own: entity accessor generation (see the derive crate).
//! Boundary: every accessor handed to the factory or builder resolves here.

mod resolve;


use crate::{PATH_SEPARATOR, traits::PathRef};
use derive_more::Deref;
use std::{borrow::Cow, fmt, marker::PhantomData};

pub use resolve::{name_of, resolve, resolve_all, sub_name_of};
pub(crate) use resolve::nested_form;

///
/// FieldPath
///
/// Ordered hops from the queried resource to a field. The root path has no
/// hops and never resolves to a protocol string.
///

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct FieldPath {
    segments: Vec<Cow<'static, str>>,
}

impl FieldPath {
    /// The resource itself.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Single-hop path.
    #[must_use]
    pub fn new(segment: impl Into<Cow<'static, str>>) -> Self {
        Self::root().child(segment)
    }

    /// Parse a path written by hand. Both `/` and `.` separate hops;
    /// empty hops are dropped.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let segments = path
            .split(['/', '.'])
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(|segment| Cow::Owned(segment.to_string()))
            .collect();

        Self { segments }
    }

    /// Extend this path by one hop.
    #[must_use]
    pub fn child(&self, segment: impl Into<Cow<'static, str>>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());

        Self { segments }
    }

    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.is_root()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(AsRef::as_ref)
    }

    /// Final hop, if any.
    #[must_use]
    pub fn leaf(&self) -> Option<&str> {
        self.segments.last().map(AsRef::as_ref)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{PATH_SEPARATOR}")?;
            }
            f.write_str(segment)?;
        }

        Ok(())
    }
}

impl PathRef for FieldPath {
    fn field_path(&self) -> &FieldPath {
        self
    }
}

impl From<&'static str> for FieldPath {
    fn from(path: &'static str) -> Self {
        Self::parse(path)
    }
}

///
/// Field
///
/// Leaf accessor token returned by generated accessors for scalar fields.
/// Derefs to its `FieldPath`.
///

#[derive(Clone, Debug, Deref, Eq, Hash, PartialEq)]
pub struct Field(FieldPath);

impl Field {
    #[must_use]
    pub const fn new(path: FieldPath) -> Self {
        Self(path)
    }

    /// Field addressed by an explicit path string, for callers without a
    /// derived entity.
    #[must_use]
    pub fn named(path: &str) -> Self {
        Self(FieldPath::parse(path))
    }

    #[must_use]
    pub fn into_path(self) -> FieldPath {
        self.0
    }
}

impl PathRef for Field {
    fn field_path(&self) -> &FieldPath {
        &self.0
    }
}

///
/// Collection
///
/// Accessor token for a collection-valued navigation. The element type
/// scopes the predicate of `any` / `all`.
///

pub struct Collection<T> {
    path: FieldPath,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Collection<T> {
    #[must_use]
    pub const fn new(path: FieldPath) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn into_path(self) -> FieldPath {
        self.path
    }
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self::new(self.path.clone())
    }
}

impl<T> fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Collection").field(&self.path).finish()
    }
}

impl<T> PathRef for Collection<T> {
    fn field_path(&self) -> &FieldPath {
        &self.path
    }
}
