//! Error types for configuration loading.
//!
//! Every failure of a load attempt is reported through [`ConfigError`]. The
//! variants fall into four categories that callers can branch on without
//! matching every variant:
//!
//! | Category | Variants | Typical cause |
//! |----------|----------|---------------|
//! | [`ErrorCategory::Io`] | `Io` | Missing file, permission denied |
//! | [`ErrorCategory::SizeLimit`] | `TooLarge` | File exceeds the byte ceiling |
//! | [`ErrorCategory::Parse`] | `Parse` | Malformed JSON, invalid UTF-8 |
//! | [`ErrorCategory::Schema`] | `NotAnObject`, `MissingField`, `TypeMismatch` | Wrong shape |

use std::path::PathBuf;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading a configuration file.
///
/// No variant is ever recovered from inside the loader. Each one ends the
/// load attempt and is returned to the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be opened or read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is larger than the configured byte ceiling.
    ///
    /// Reported separately from [`ConfigError::Io`] so callers can retry
    /// with a larger limit.
    #[error("{} is {size} bytes, exceeding the {limit} byte limit", .path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    /// The contents are not valid JSON.
    ///
    /// `line` and `column` are 1-based, as reported by the decoder.
    #[error("invalid JSON at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    /// The top-level JSON value is not an object.
    #[error("expected a JSON object at the top level, found {found}")]
    NotAnObject { found: &'static str },

    /// A required field is absent and has no default.
    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },

    /// A field is present but holds the wrong JSON type.
    #[error("field `{field}` has type {found}, expected {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

/// Coarse classification of a [`ConfigError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorCategory {
    Io,
    SizeLimit,
    Parse,
    Schema,
}

impl ConfigError {
    /// Returns the category this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConfigError::Io { .. } => ErrorCategory::Io,
            ConfigError::TooLarge { .. } => ErrorCategory::SizeLimit,
            ConfigError::Parse { .. } => ErrorCategory::Parse,
            ConfigError::NotAnObject { .. }
            | ConfigError::MissingField { .. }
            | ConfigError::TypeMismatch { .. } => ErrorCategory::Schema,
        }
    }

    /// Name of the offending field, for schema errors that have one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ConfigError::MissingField { field } | ConfigError::TypeMismatch { field, .. } => {
                Some(*field)
            }
            _ => None,
        }
    }

    pub(crate) fn parse(err: serde_json::Error) -> Self {
        let (line, column) = (err.line(), err.column());
        // serde_json appends the position to its message; it is carried separately here.
        let message = err.to_string();
        let suffix = format!(" at line {line} column {column}");
        let message = message.strip_suffix(&suffix).unwrap_or(&message).to_string();

        ConfigError::Parse {
            line,
            column,
            message,
        }
    }
}

/// Process exit code for an error category.
///
/// Codes 1 and 2 are left for generic failures and usage errors.
pub fn exit_code(category: ErrorCategory) -> i32 {
    match category {
        ErrorCategory::Io => 3,
        ErrorCategory::SizeLimit => 4,
        ErrorCategory::Parse => 5,
        ErrorCategory::Schema => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_mapping_is_stable() {
        let cases = [
            (ErrorCategory::Io, 3),
            (ErrorCategory::SizeLimit, 4),
            (ErrorCategory::Parse, 5),
            (ErrorCategory::Schema, 6),
        ];

        for (category, code) in cases {
            assert_eq!(exit_code(category), code);
        }
    }

    #[test]
    fn test_schema_errors_name_their_field() {
        let missing = ConfigError::MissingField { field: "root" };
        assert_eq!(missing.category(), ErrorCategory::Schema);
        assert_eq!(missing.field(), Some("root"));
        assert_eq!(missing.to_string(), "missing required field `root`");

        let mismatch = ConfigError::TypeMismatch {
            field: "root",
            expected: "string",
            found: "number",
        };
        assert_eq!(mismatch.field(), Some("root"));
        assert_eq!(
            mismatch.to_string(),
            "field `root` has type number, expected string"
        );
    }

    #[test]
    fn test_parse_error_keeps_position() {
        let err = serde_json::from_str::<serde_json::Value>("{\n  \"root\": }").unwrap_err();
        let err = ConfigError::parse(err);

        match err {
            ConfigError::Parse { line, column, .. } => {
                assert_eq!(line, 2);
                assert!(column > 0);
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_io_error_exposes_source() {
        use std::error::Error;

        let err = ConfigError::Io {
            path: PathBuf::from("/nonexistent/cfgload.json"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };

        assert_eq!(err.category(), ErrorCategory::Io);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("/nonexistent/cfgload.json"));
    }
}
