//! Configuration loading from disk.
//!
//! # Data Flow
//! ```text
//! config file (JSON)
//!     → size check against metadata (regular files)
//!     → ScratchBuffer (bounded read, released on every exit path)
//!     → serde_json::Value (syntax)
//!     → Config::from_object (per-field schema checks, defaults)
//!     → Config (immutable)
//! ```

use std::fs::File;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use super::buffer::{BufferStats, ScratchBuffer};
use super::error::{ConfigError, ConfigResult};
use super::schema::{Config, ConfigDefaults, json_type};

/// Default ceiling on configuration file size, in bytes.
pub const DEFAULT_MAX_SIZE: u64 = 512;

/// Reusable configuration loader.
///
/// Holds the size limit, the defaults for absent fields, and a scratch
/// allocation shared by successive loads. [`Loader::load`] takes `&mut self`,
/// so one loader never serves two loads at once.
///
/// # Example
///
/// ```no_run
/// use cfgload::config::{ConfigDefaults, Loader};
/// use std::path::Path;
///
/// let mut loader = Loader::new()
///     .max_size(1024)
///     .defaults(ConfigDefaults::required());
/// let config = loader.load(Path::new("cfgload.json"))?;
/// println!("{}", config.root());
/// # Ok::<(), cfgload::config::ConfigError>(())
/// ```
#[derive(Debug)]
pub struct Loader {
    max_size: u64,
    defaults: ConfigDefaults,
    scratch: Vec<u8>,
    stats: BufferStats,
}

impl Loader {
    /// Creates a loader with [`DEFAULT_MAX_SIZE`] and the declared defaults.
    pub fn new() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            defaults: ConfigDefaults::default(),
            scratch: Vec::new(),
            stats: BufferStats::new(),
        }
    }

    /// Sets the maximum file size in bytes.
    pub fn max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    /// Sets the defaults used for absent fields.
    pub fn defaults(mut self, defaults: ConfigDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Buffer acquisition and release counters for this loader.
    pub fn stats(&self) -> &BufferStats {
        &self.stats
    }

    /// Loads and decodes the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Io`] if the file cannot be opened or read
    /// - [`ConfigError::TooLarge`] if it exceeds the size limit; nothing is decoded
    /// - [`ConfigError::Parse`] if it is not valid JSON
    /// - a schema error if a field is missing or has the wrong type
    pub fn load(&mut self, path: &Path) -> ConfigResult<Config> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        let too_large = |size| ConfigError::TooLarge {
            path: path.to_path_buf(),
            size,
            limit: self.max_size,
        };

        let file = File::open(path).map_err(io_err)?;
        let metadata = file.metadata().map_err(io_err)?;
        // Only a regular file's length is its content size; anything else is
        // left to the bounded read below.
        if metadata.is_file() && metadata.len() > self.max_size {
            return Err(too_large(metadata.len()));
        }

        let mut buffer = ScratchBuffer::acquire(&mut self.scratch, &self.stats);
        // One byte past the limit distinguishes "exactly at limit" from "over".
        let read = buffer
            .fill_from(file, self.max_size.saturating_add(1))
            .map_err(io_err)? as u64;
        if read > self.max_size {
            return Err(too_large(read));
        }

        debug!("Read {} bytes from {}", read, path.display());

        decode(&buffer, &self.defaults)
    }

    /// Decodes configuration from an in-memory JSON string.
    ///
    /// The size limit does not apply.
    pub fn load_str(&self, content: &str) -> ConfigResult<Config> {
        decode(content.as_bytes(), &self.defaults)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Loads configuration from a JSON file no larger than `max_size` bytes.
///
/// Uses a fresh buffer that is released before this function returns.
///
/// # Example
///
/// ```no_run
/// use cfgload::config::{ConfigDefaults, DEFAULT_MAX_SIZE, load};
/// use std::path::Path;
///
/// let config = load(Path::new("cfgload.json"), DEFAULT_MAX_SIZE, &ConfigDefaults::default())?;
/// println!("Root: {}", config.root());
/// # Ok::<(), cfgload::config::ConfigError>(())
/// ```
pub fn load(path: &Path, max_size: u64, defaults: &ConfigDefaults) -> ConfigResult<Config> {
    Loader::new()
        .max_size(max_size)
        .defaults(defaults.clone())
        .load(path)
}

/// Loads configuration from a JSON string.
///
/// Useful for testing and embedded configuration.
pub fn load_str(content: &str, defaults: &ConfigDefaults) -> ConfigResult<Config> {
    decode(content.as_bytes(), defaults)
}

fn decode(bytes: &[u8], defaults: &ConfigDefaults) -> ConfigResult<Config> {
    let value: Value = serde_json::from_slice(bytes).map_err(ConfigError::parse)?;

    match value {
        Value::Object(object) => Config::from_object(object, defaults),
        other => Err(ConfigError::NotAnObject {
            found: json_type(&other),
        }),
    }
}
