//! The bundler engine boundary.
//!
//! The pipeline only knows how to hand a [`BuildJob`] to something that turns
//! it into an artifact on disk. [`RolldownEngine`] is the production engine;
//! tests substitute their own.

mod rolldown_engine;

pub use rolldown_engine::RolldownEngine;

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Serialize;

use crate::{BuildJob, Result};

/// An artifact the engine wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactWritten {
    /// Resolved path of the written file.
    pub path: PathBuf,

    /// Size in bytes.
    pub bytes: u64,

    /// Number of non-fatal warnings the engine reported.
    pub warnings: usize,
}

/// Something that can build one job into one artifact.
#[async_trait]
pub trait BundlerEngine: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Bundle `job.entry` and write the result to `job.outfile`.
    ///
    /// Implementations must not write anything when they fail before
    /// producing output, and must replace `job.outfile` wholesale on success.
    async fn build(&self, job: &BuildJob) -> Result<ArtifactWritten>;
}

#[async_trait]
impl<E: BundlerEngine + ?Sized> BundlerEngine for std::sync::Arc<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn build(&self, job: &BuildJob) -> Result<ArtifactWritten> {
        (**self).build(job).await
    }
}
