use serde::ser::{Serialize, SerializeMap, Serializer};
use std::{collections::BTreeMap, fmt};

///
/// QueryOption
///
/// System query options, declared in the canonical emission order.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum QueryOption {
    Search,
    Filter,
    Select,
    Top,
    Skip,
    InlineCount,
    OrderBy,
    Expand,
    Count,
}

impl QueryOption {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "$search",
            Self::Filter => "$filter",
            Self::Select => "$select",
            Self::Top => "$top",
            Self::Skip => "$skip",
            Self::InlineCount => "$inlinecount",
            Self::OrderBy => "$orderby",
            Self::Expand => "$expand",
            Self::Count => "$count",
        }
    }
}

impl fmt::Display for QueryOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// QueryParams
///
/// Compiled parameter map: raw, unencoded option values keyed by option.
/// Only options that were set are present; iteration follows the
/// canonical order.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct QueryParams {
    entries: BTreeMap<QueryOption, String>,
}

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, option: QueryOption, value: impl Into<String>) {
        self.entries.insert(option, value.into());
    }

    #[must_use]
    pub fn get(&self, option: QueryOption) -> Option<&str> {
        self.entries.get(&option).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, option: QueryOption) -> bool {
        self.entries.contains_key(&option)
    }

    pub fn iter(&self) -> impl Iterator<Item = (QueryOption, &str)> {
        self.entries
            .iter()
            .map(|(option, value)| (*option, value.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// URL query string: each key and value percent-encoded on its own,
    /// pairs joined with `&`, then every `%20` turned into `+`.
    #[must_use]
    pub fn encode(&self) -> String {
        let pairs: Vec<String> = self
            .iter()
            .map(|(option, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(option.as_str()),
                    urlencoding::encode(value)
                )
            })
            .collect();

        pairs.join("&").replace("%20", "+")
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl Serialize for QueryParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (option, value) in self.iter() {
            map.serialize_entry(option.as_str(), value)?;
        }

        map.end()
    }
}
