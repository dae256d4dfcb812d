//! cfgload: a size-bounded JSON configuration loader.
//!
//! The crate reads a small configuration file, decodes it into a typed
//! [`Config`] record and reports precise, per-field errors.
//!
//! # Example
//!
//! ```no_run
//! use cfgload::config::{ConfigDefaults, DEFAULT_MAX_SIZE, load};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = load(
//!         std::path::Path::new("cfgload.json"),
//!         DEFAULT_MAX_SIZE,
//!         &ConfigDefaults::default(),
//!     )?;
//!     println!("{}", config.root());
//!     Ok(())
//! }
//! ```

pub mod config;

// Re-export commonly used types
pub use config::{Config, ConfigDefaults, ConfigError, Loader, load};
