use crate::DEFAULT_LAMBDA_VARIABLE;
use serde::{Deserialize, Deserializer, Serialize, de};
use thiserror::Error as ThisError;
use url::Url;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid client config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("cannot join path '{path}' onto service root: {source}")]
    Join {
        path: String,
        source: url::ParseError,
    },

    #[error("lambda variable '{value}' is not an identifier")]
    LambdaVariable { value: String },
}

///
/// ClientConfig
///
/// Settings shared by every request a `Client` sends. Every field has a
/// default, so a partial JSON document is enough.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL requests are resolved against; relative paths are sent
    /// as-is when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    service_root: Option<Url>,

    /// Bound variable of the outermost lambda.
    #[serde(deserialize_with = "deserialize_lambda_variable")]
    lambda_variable: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service_root: None,
            lambda_variable: DEFAULT_LAMBDA_VARIABLE.to_string(),
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new(service_root: Url) -> Self {
        Self {
            service_root: Some(service_root),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_lambda_variable(
        mut self,
        variable: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let variable = variable.into();
        check_lambda_variable(&variable)?;
        self.lambda_variable = variable;

        Ok(self)
    }

    #[must_use]
    pub const fn service_root(&self) -> Option<&Url> {
        self.service_root.as_ref()
    }

    #[must_use]
    pub fn lambda_variable(&self) -> &str {
        &self.lambda_variable
    }

    /// Resolve a resource path against the service root.
    pub fn resolve_path(&self, path: &str) -> Result<String, ConfigError> {
        let Some(root) = &self.service_root else {
            return Ok(path.to_string());
        };

        root.join(path)
            .map(String::from)
            .map_err(|source| ConfigError::Join {
                path: path.to_string(),
                source,
            })
    }
}

// letter or underscore first, then letters, digits or underscores
fn check_lambda_variable(value: &str) -> Result<(), ConfigError> {
    let mut chars = value.chars();
    let valid = chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_alphanumeric() || ch == '_');

    if valid {
        Ok(())
    } else {
        Err(ConfigError::LambdaVariable {
            value: value.to_string(),
        })
    }
}

fn deserialize_lambda_variable<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    check_lambda_variable(&value).map_err(de::Error::custom)?;

    Ok(value)
}
