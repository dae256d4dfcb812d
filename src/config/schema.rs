//! Configuration schema definitions for cfgload.
//!
//! This module defines the decoded configuration record and the defaults
//! that fill in fields absent from the file.
//!
//! # Schema Overview
//!
//! ```text
//! Config (root)
//! └── root   - string, filesystem root path
//! ```
//!
//! Decoding works on a parsed [`serde_json::Value`] rather than a derived
//! `Deserialize` impl so that every schema failure can name the field and
//! the JSON types involved.

use std::borrow::Cow;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::error::{ConfigError, ConfigResult};

/// Declared default for [`Config::root`].
pub const DEFAULT_ROOT: &str = ".";

/// Where a field's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Decoded from the configuration file.
    File,
    /// Taken from [`ConfigDefaults`] because the file omitted the field.
    Default,
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::File => f.write_str("file"),
            Origin::Default => f.write_str("default"),
        }
    }
}

/// Decoded configuration record.
///
/// A `Config` is immutable once built: fields are private and exposed
/// through getters only. Values decoded from the file are owned
/// (`Cow::Owned`); values taken from a `'static` default borrow it
/// (`Cow::Borrowed`) and allocate nothing.
///
/// # JSON Structure
///
/// ```json
/// {"root": "/var/data"}
/// ```
///
/// # Example
///
/// ```
/// use cfgload::config::{ConfigDefaults, Origin, load_str};
///
/// let config = load_str(r#"{"root": "/var/data"}"#, &ConfigDefaults::required())?;
/// assert_eq!(config.root(), "/var/data");
/// assert_eq!(config.root_origin(), Origin::File);
/// # Ok::<(), cfgload::config::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    root: Cow<'static, str>,

    #[serde(skip)]
    root_origin: Origin,
}

impl Config {
    /// Filesystem root path.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// [`Config::root`] as a path.
    pub fn root_path(&self) -> &Path {
        Path::new(self.root.as_ref())
    }

    /// Where [`Config::root`] came from.
    pub fn root_origin(&self) -> Origin {
        self.root_origin
    }

    /// Encodes the record as pretty-printed JSON.
    ///
    /// The output loads back into an equal record as long as no field was
    /// filled from a default.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Builds a record from a decoded top-level JSON object.
    pub(crate) fn from_object(
        mut object: Map<String, Value>,
        defaults: &ConfigDefaults,
    ) -> ConfigResult<Self> {
        let (root, root_origin) = take_string(&mut object, "root", defaults.root.as_ref())?;

        for key in object.keys() {
            debug!("Ignoring unknown config key: {}", key);
        }

        Ok(Self { root, root_origin })
    }
}

/// Defaults for fields absent from the configuration file.
///
/// A field whose default is `None` is required. [`ConfigDefaults::default`]
/// carries the record's declared defaults; [`ConfigDefaults::required`]
/// makes every field required.
///
/// # Defaults
///
/// | Field | Default |
/// |-------|---------|
/// | `root` | `"."` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDefaults {
    pub root: Option<Cow<'static, str>>,
}

impl ConfigDefaults {
    /// Defaults with no fallback values: every field must be in the file.
    pub fn required() -> Self {
        Self { root: None }
    }

    /// Replaces the default for `root`.
    pub fn with_root(mut self, root: impl Into<Cow<'static, str>>) -> Self {
        self.root = Some(root.into());
        self
    }
}

impl Default for ConfigDefaults {
    fn default() -> Self {
        Self {
            root: Some(Cow::Borrowed(DEFAULT_ROOT)),
        }
    }
}

/// Removes a string field from `object`, falling back to `default`.
fn take_string(
    object: &mut Map<String, Value>,
    field: &'static str,
    default: Option<&Cow<'static, str>>,
) -> ConfigResult<(Cow<'static, str>, Origin)> {
    match object.remove(field) {
        Some(Value::String(value)) => Ok((Cow::Owned(value), Origin::File)),
        Some(other) => Err(ConfigError::TypeMismatch {
            field,
            expected: "string",
            found: json_type(&other),
        }),
        None => match default {
            Some(value) => {
                debug!("Using default for `{}`: {}", field, value);
                Ok((value.clone(), Origin::Default))
            }
            None => Err(ConfigError::MissingField { field }),
        },
    }
}

/// Name of a JSON value's type, as used in error messages.
pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
