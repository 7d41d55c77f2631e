use crate::path::FieldPath;
use std::fmt;

///
/// SortDirection
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Text appended after the sorted path.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Asc => "",
            Self::Desc => " desc",
        }
    }
}

///
/// OrderBy
///
/// One explicit `(path, direction)` sort key.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct OrderBy {
    path: FieldPath,
    direction: SortDirection,
}

impl OrderBy {
    #[must_use]
    pub fn new(path: impl Into<FieldPath>, direction: SortDirection) -> Self {
        Self {
            path: path.into(),
            direction,
        }
    }

    #[must_use]
    pub fn asc(path: impl Into<FieldPath>) -> Self {
        Self::new(path, SortDirection::Asc)
    }

    #[must_use]
    pub fn desc(path: impl Into<FieldPath>) -> Self {
        Self::new(path, SortDirection::Desc)
    }

    #[must_use]
    pub const fn path(&self) -> &FieldPath {
        &self.path
    }

    #[must_use]
    pub const fn direction(&self) -> SortDirection {
        self.direction
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.path, self.direction.suffix())
    }
}
