//! Pipeline configuration and multi-source loading.

use std::path::{Path, PathBuf};

use cobie_bundler::{BuildJob, BundlerEngine, EsTarget, Pipeline, is_valid_identifier};
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::discovery::{ConfigDiscovery, is_toml};
use crate::error::{ConfigError, Result};

pub const DEFAULT_ENTRY: &str = "./Interop/JS.fs.js";
pub const DEFAULT_OUT_DIR: &str = "fable_build";
pub const DEFAULT_PACKAGE_NAME: &str = "cobie-coach";
pub const DEFAULT_GLOBAL_NAME: &str = "COBieCoach";

/// Prefix of environment variables read by [`PipelineConfig::load`].
pub const ENV_PREFIX: &str = "COBIE_";

// Other COBIE_* variables (e.g. COBIE_LOG) belong to other tools.
const ENV_KEYS: &[&str] = &[
    "entry",
    "out_dir",
    "package_name",
    "global_name",
    "target",
    "cwd",
];

/// Resolved pipeline settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Interop entry module.
    pub entry: PathBuf,

    /// Directory both artifacts are written to.
    pub out_dir: PathBuf,

    /// Artifact base name: `<package_name>.min.js` and `<package_name>.js`.
    pub package_name: String,

    /// Global binding the IIFE bundles assign their exports to.
    pub global_name: String,

    /// Language level of the emitted code.
    pub target: EsTarget,

    /// Project root for relative paths (default: process cwd).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            entry: PathBuf::from(DEFAULT_ENTRY),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            global_name: DEFAULT_GLOBAL_NAME.to_string(),
            target: EsTarget::Es2022,
            cwd: None,
        }
    }
}

/// Highest-priority settings, usually from command-line flags.
///
/// Unset fields leave lower layers untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<EsTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
}

impl PipelineConfig {
    /// Load configuration from every source.
    ///
    /// `config_path` names a config file explicitly; without it a
    /// `cobie.toml` or `cobie.config.json` in the project root is used if
    /// present. The project root is `overrides.cwd`, or the process cwd.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotFound`] if `config_path` does not exist, and
    /// [`ConfigError::Load`] for unreadable files or mistyped values.
    pub fn load(config_path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let config_file = match config_path {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => Some(path.to_path_buf()),
            None => {
                let root = match &overrides.cwd {
                    Some(cwd) => cwd.clone(),
                    None => std::env::current_dir()?,
                };
                ConfigDiscovery::new(root).find()
            }
        };

        if let Some(path) = config_file {
            tracing::debug!("loading config file {}", path.display());
            figment = if is_toml(&path) {
                figment.merge(Toml::file(path))
            } else {
                figment.merge(Json::file(path))
            };
        }

        // COBIE_OUT_DIR -> out_dir, COBIE_GLOBAL_NAME -> global_name, ...
        figment = figment.merge(Env::prefixed(ENV_PREFIX).only(ENV_KEYS));

        figment = figment.merge(Serialized::defaults(overrides));

        Ok(figment.extract()?)
    }

    /// Check values the type system cannot.
    pub fn validate(&self) -> Result<()> {
        if self.entry.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "entry",
                message: "entry module path cannot be empty".to_string(),
            });
        }
        if self.package_name.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "package_name",
                message: "package name cannot be empty".to_string(),
            });
        }
        if self.package_name.contains(['/', '\\']) || self.package_name == ".." {
            return Err(ConfigError::InvalidValue {
                field: "package_name",
                message: format!(
                    "'{}' must be a plain file name, not a path",
                    self.package_name
                ),
            });
        }
        if !is_valid_identifier(&self.global_name) {
            return Err(ConfigError::InvalidValue {
                field: "global_name",
                message: format!(
                    "'{}' is not a valid JavaScript identifier \
                     (letters, digits, '_' or '$', not starting with a digit)",
                    self.global_name
                ),
            });
        }
        Ok(())
    }

    /// The job template both artifacts are derived from.
    pub fn template(&self) -> BuildJob {
        let job = BuildJob::new(&self.entry, self.global_name.clone()).target(self.target);
        match &self.cwd {
            Some(cwd) => job.cwd(cwd),
            None => job,
        }
    }

    /// Output directory joined onto `cwd`.
    pub fn resolve_out_dir(&self) -> PathBuf {
        match &self.cwd {
            Some(cwd) if self.out_dir.is_relative() => cwd.join(&self.out_dir),
            _ => self.out_dir.clone(),
        }
    }

    /// Build the pipeline for this configuration.
    pub fn pipeline<E: BundlerEngine>(&self, engine: E) -> Pipeline<E> {
        Pipeline::new(
            engine,
            self.template(),
            self.out_dir.clone(),
            self.package_name.clone(),
        )
    }
}
