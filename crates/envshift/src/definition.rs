//! environment definition: the [EnvironmentCatalog] and the [OverrideTable]
//!
//! ```yaml
//! fields:
//!   - name: api
//!     environments:
//!       prod: https://api.example.com
//!       staging: { scheme: https, host: api-staging.example.com }
//! overrides:
//!   - key: service.endpoint
//!     environments:
//!       prod: fixed-value
//! ```
use crate::document::LoadError;
use crate::key_path::KeyPath;
use crate::url::UrlValue;
use crate::value::Value;
use indexmap::IndexMap;
use std::path::Path;

#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Definition {
    #[serde(default)]
    pub fields: EnvironmentCatalog,
    #[serde(default)]
    pub overrides: OverrideTable,
}

impl Definition {
    pub fn parse(source: &str) -> Result<Self, LoadError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn load_file(file_path: &Path) -> Result<Self, LoadError> {
        let file_path = file_path.canonicalize()?;
        tracing::info!(path=%file_path.display(), "loading definition");

        let file_contents = std::fs::read_to_string(&file_path)?;
        let definition = Self::parse(&file_contents)?;

        tracing::debug!(
            fields = definition.fields.len(),
            overrides = definition.overrides.len(),
            "definition loaded"
        );
        Ok(definition)
    }
}

/// Where a field lives in one environment
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(untagged)]
pub enum Endpoint {
    /// `https://api.example.com`
    Url(String),
    /// `{ scheme: https, host: api.example.com }`
    Parts { scheme: String, host: String },
}

impl Endpoint {
    /// Text that identifies a url as belonging to this endpoint
    pub fn literal(&self) -> &str {
        match self {
            Endpoint::Url(url) => url,
            Endpoint::Parts { host, .. } => host,
        }
    }

    pub fn url(&self) -> UrlValue {
        match self {
            Endpoint::Url(url) => UrlValue::parse(url.as_str()),
            Endpoint::Parts { scheme, host } => UrlValue::parse(format!("{scheme}://{host}")),
        }
    }
}

impl From<&str> for Endpoint {
    fn from(value: &str) -> Self {
        Endpoint::Url(value.to_string())
    }
}

/// A logical endpoint whose url differs per environment
#[derive(Debug, Clone, PartialEq, serde::Deserialize, derive_new::new)]
#[serde(deny_unknown_fields)]
pub struct Field {
    pub name: String,
    pub environments: IndexMap<String, Endpoint>,
}

impl Field {
    pub fn has_environment(&self, environment: &str) -> bool {
        self.environments.contains_key(environment)
    }

    pub fn environment_url(&self, environment: &str) -> Option<UrlValue> {
        self.environments.get(environment).map(Endpoint::url)
    }

    /// `raw` contains the literal of any of this field's endpoints, regardless of environment
    fn matches(&self, raw: &str) -> bool {
        self.environments
            .values()
            .any(|endpoint| raw.contains(endpoint.literal()))
    }
}

/// Outcome of resolving a url against the [EnvironmentCatalog]
#[derive(Debug, PartialEq)]
pub enum Resolution<'c> {
    /// matching field with a binding for the environment
    Bound { field: &'c Field, url: UrlValue },
    /// matching field without a binding for the environment
    Unbound { field: &'c Field },
    /// no field matches
    Unmatched,
}

/// All known [Field]s, in definition order
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(transparent)]
pub struct EnvironmentCatalog(Vec<Field>);

impl EnvironmentCatalog {
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First field that `raw` belongs to
    ///
    /// Matching is by substring. When the literals of two fields both occur in `raw` the field defined first wins.
    pub fn find(&self, raw: &str) -> Option<&Field> {
        self.0.iter().find(|field| field.matches(raw))
    }

    pub fn resolve(&self, raw: &str, environment: &str) -> Resolution<'_> {
        let Some(field) = self.find(raw) else {
            return Resolution::Unmatched;
        };

        match field.environment_url(environment) {
            Some(url) => Resolution::Bound { field, url },
            None => Resolution::Unbound { field },
        }
    }
}

impl From<Vec<Field>> for EnvironmentCatalog {
    fn from(value: Vec<Field>) -> Self {
        Self(value)
    }
}

/// A fixed value for one key path, per environment
#[derive(Debug, Clone, serde::Deserialize, derive_new::new)]
#[serde(deny_unknown_fields)]
pub struct Override {
    pub key: String,
    pub environments: IndexMap<String, Value>,
}

/// All known [Override]s, in definition order
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(transparent)]
pub struct OverrideTable(Vec<Override>);

impl OverrideTable {
    pub fn iter(&self) -> impl Iterator<Item = &Override> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value to force at `path` in `environment`
    ///
    /// Only the first override for a key is considered. It is a miss when that override has no value for
    /// `environment`. The root path never matches.
    pub fn lookup(&self, path: &KeyPath, environment: &str) -> Option<&Value> {
        if path.is_root() {
            return None;
        }

        self.0
            .iter()
            .find(|entry| entry.key == path.as_str())
            .and_then(|entry| entry.environments.get(environment))
    }
}

impl From<Vec<Override>> for OverrideTable {
    fn from(value: Vec<Override>) -> Self {
        Self(value)
    }
}
