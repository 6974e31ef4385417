//! Build job descriptors.
//!
//! A [`BuildJob`] carries every option the engine receives for one artifact.
//! The pipeline builds one template and derives its jobs from it, so the entry
//! point and global name can never drift between artifacts.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use path_clean::PathClean;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// ECMAScript language level the output is lowered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EsTarget {
    Es2015,
    Es2016,
    Es2017,
    Es2018,
    Es2019,
    Es2020,
    Es2021,
    #[default]
    Es2022,
    Esnext,
}

impl EsTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Es2015 => "es2015",
            Self::Es2016 => "es2016",
            Self::Es2017 => "es2017",
            Self::Es2018 => "es2018",
            Self::Es2019 => "es2019",
            Self::Es2020 => "es2020",
            Self::Es2021 => "es2021",
            Self::Es2022 => "es2022",
            Self::Esnext => "esnext",
        }
    }
}

impl fmt::Display for EsTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EsTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "es2015" | "es6" => Ok(Self::Es2015),
            "es2016" => Ok(Self::Es2016),
            "es2017" => Ok(Self::Es2017),
            "es2018" => Ok(Self::Es2018),
            "es2019" => Ok(Self::Es2019),
            "es2020" => Ok(Self::Es2020),
            "es2021" => Ok(Self::Es2021),
            "es2022" => Ok(Self::Es2022),
            "esnext" => Ok(Self::Esnext),
            _ => Err(Error::InvalidConfig(format!(
                "Invalid target: '{}'. Expected one of es2015..es2022 or esnext",
                s
            ))),
        }
    }
}

/// Output module shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleFormat {
    /// Self-executing function that binds its exports to `global_name`.
    #[default]
    Iife,
    Esm,
    Cjs,
}

impl BundleFormat {
    pub(crate) fn to_rolldown(self) -> rolldown::OutputFormat {
        match self {
            Self::Iife => rolldown::OutputFormat::Iife,
            Self::Esm => rolldown::OutputFormat::Esm,
            Self::Cjs => rolldown::OutputFormat::Cjs,
        }
    }
}

impl fmt::Display for BundleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Iife => "iife",
            Self::Esm => "esm",
            Self::Cjs => "cjs",
        })
    }
}

/// Options for a single engine invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildJob {
    /// Entry module, relative to `cwd` unless absolute.
    pub entry: PathBuf,

    /// Inline every dependency into the artifact.
    pub bundle: bool,

    /// Minify whitespace and mangle identifiers.
    pub minify: bool,

    /// Emit a source map next to the artifact.
    pub sourcemap: bool,

    /// Language level of the emitted code.
    pub target: EsTarget,

    /// Exact artifact path, relative to `cwd` unless absolute.
    pub outfile: PathBuf,

    /// Identifier the IIFE assigns its exports to.
    pub global_name: String,

    /// Output module shape.
    pub format: BundleFormat,

    /// Base directory for relative paths (default: process cwd).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
}

impl BuildJob {
    /// Create a job template for `entry` exposed as `global_name`.
    ///
    /// Defaults: bundled, unminified, no source map, `es2022`, IIFE. The
    /// output path is left empty; set it with [`outfile`](Self::outfile) or
    /// [`derive`](Self::derive).
    pub fn new(entry: impl AsRef<Path>, global_name: impl Into<String>) -> Self {
        Self {
            entry: clean_path(entry.as_ref().to_path_buf()),
            bundle: true,
            minify: false,
            sourcemap: false,
            target: EsTarget::default(),
            outfile: PathBuf::new(),
            global_name: global_name.into(),
            format: BundleFormat::Iife,
            cwd: None,
        }
    }

    /// Copy this template, overriding only the minify flag and output path.
    pub fn derive(&self, minify: bool, outfile: impl Into<PathBuf>) -> Self {
        self.clone().minify(minify).outfile(outfile)
    }

    pub fn bundle(mut self, enabled: bool) -> Self {
        self.bundle = enabled;
        self
    }

    pub fn minify(mut self, enabled: bool) -> Self {
        self.minify = enabled;
        self
    }

    pub fn sourcemap(mut self, enabled: bool) -> Self {
        self.sourcemap = enabled;
        self
    }

    pub fn target(mut self, target: EsTarget) -> Self {
        self.target = target;
        self
    }

    pub fn outfile(mut self, file: impl Into<PathBuf>) -> Self {
        self.outfile = clean_path(file.into());
        self
    }

    pub fn format(mut self, format: BundleFormat) -> Self {
        self.format = format;
        self
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Entry path joined onto `cwd`.
    pub fn resolved_entry(&self) -> PathBuf {
        self.resolve(&self.entry)
    }

    /// Output path joined onto `cwd`.
    pub fn resolved_outfile(&self) -> PathBuf {
        self.resolve(&self.outfile)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.cwd {
            Some(cwd) if path.is_relative() => cwd.join(path).clean(),
            _ => path.to_path_buf(),
        }
    }

    /// Check the descriptor before it is handed to an engine.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for an empty entry or output path, an
    /// invalid IIFE global name, or a non-bundling job.
    pub fn validate(&self) -> Result<()> {
        if self.entry.as_os_str().is_empty() {
            return Err(Error::InvalidConfig("entry point is empty".to_string()));
        }
        if self.outfile.as_os_str().is_empty() {
            return Err(Error::InvalidConfig("output file is empty".to_string()));
        }
        if !self.bundle {
            return Err(Error::InvalidConfig(
                "this pipeline only produces self-contained bundles; bundle must be true"
                    .to_string(),
            ));
        }
        if self.format == BundleFormat::Iife && !is_valid_identifier(&self.global_name) {
            return Err(Error::InvalidConfig(format!(
                "global name '{}' is not a valid JavaScript identifier",
                self.global_name
            )));
        }
        Ok(())
    }
}

// `clean` maps "" to ".", which would hide a missing path from `validate`
fn clean_path(path: PathBuf) -> PathBuf {
    if path.as_os_str().is_empty() {
        path
    } else {
        path.clean()
    }
}

/// Whether `s` can be used as a JavaScript binding name.
///
/// Must start with a letter, `_` or `$`; the rest may also contain digits.
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}
