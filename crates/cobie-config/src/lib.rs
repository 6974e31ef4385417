//! Configuration for the cobie-bundle pipeline.
//!
//! Settings are layered with `figment`. Priority: overrides (CLI) >
//! `COBIE_*` environment variables > config file > built-in defaults. The
//! defaults reproduce the COBie Coach deployment, so an empty configuration
//! builds `fable_build/cobie-coach{.min,}.js` from `Interop/JS.fs.js`.

pub mod config;
pub mod discovery;
pub mod error;

pub use config::{ConfigOverrides, PipelineConfig};
pub use discovery::ConfigDiscovery;
pub use error::{ConfigError, Result};
