//! Artifact writing.
//!
//! Each artifact is written to `<file>.tmp` first and then renamed over the
//! target, so a reader never observes a half-written bundle and a rerun
//! replaces the previous artifact wholesale.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::{Error, Result};

/// Write `contents` to `path`, creating parent directories as needed.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns [`Error::WriteFailure`] if the parent cannot be created (for
/// example because it is a regular file), or the temp file cannot be written
/// or renamed. The temp file is removed on failure.
pub async fn write_artifact(path: &Path, contents: &[u8]) -> Result<u64> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| Error::WriteFailure {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    let temp_path = temp_path_for(path);

    if let Err(source) = fs::write(&temp_path, contents).await {
        cleanup_temp_file(&temp_path).await;
        return Err(Error::WriteFailure {
            path: temp_path,
            source,
        });
    }

    if let Err(source) = fs::rename(&temp_path, path).await {
        cleanup_temp_file(&temp_path).await;
        return Err(Error::WriteFailure {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(contents.len() as u64)
}

/// `cobie-coach.min.js` -> `cobie-coach.min.js.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

async fn cleanup_temp_file(temp_path: &Path) {
    if fs::try_exists(temp_path).await.unwrap_or(false) {
        if let Err(e) = fs::remove_file(temp_path).await {
            tracing::warn!(
                "Failed to clean up temporary file '{}': {}",
                temp_path.display(),
                e
            );
        }
    }
}
