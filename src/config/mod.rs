//! Configuration loading and schema definitions.
//!
//! A configuration file is a single JSON object, for example:
//!
//! ```json
//! {"root": "/var/data"}
//! ```
//!
//! [`load`] reads the file into a bounded scratch buffer, decodes it, fills
//! absent fields from [`ConfigDefaults`] and returns an immutable [`Config`].
//! Failures are reported as a [`ConfigError`] that names the offending field
//! where there is one.

pub mod buffer;
pub mod error;
pub mod loader;
pub mod schema;

pub use buffer::{BufferStats, ScratchBuffer};
pub use error::{ConfigError, ConfigResult, ErrorCategory, exit_code};
pub use loader::{DEFAULT_MAX_SIZE, Loader, load, load_str};
pub use schema::{Config, ConfigDefaults, DEFAULT_ROOT, Origin};
