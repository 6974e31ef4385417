//! Config file discovery.

use std::path::{Path, PathBuf};

/// File names searched for, in priority order.
pub const CONFIG_FILE_NAMES: &[&str] = &["cobie.toml", "cobie.config.json"];

/// Finds a config file in a project directory.
///
/// # Example
///
/// ```no_run
/// use cobie_config::ConfigDiscovery;
///
/// if let Some(path) = ConfigDiscovery::new(".").find() {
///     println!("using {}", path.display());
/// }
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// First existing file from [`CONFIG_FILE_NAMES`] under the root.
    pub fn find(&self) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| self.root.join(name))
            .find(|path| path.is_file())
    }
}

/// Whether `path` should be parsed as TOML (anything else is JSON).
pub(crate) fn is_toml(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_detection() {
        assert!(is_toml(Path::new("cobie.toml")));
        assert!(!is_toml(Path::new("cobie.config.json")));
        assert!(!is_toml(Path::new("cobie")));
    }

    #[test]
    fn finds_nothing_in_missing_dir() {
        assert!(ConfigDiscovery::new("/definitely/not/here").find().is_none());
    }
}
