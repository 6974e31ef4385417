//! Rolldown-backed engine.

use std::path::PathBuf;

use async_trait::async_trait;
use either::Either;
use rolldown::{
    BundlerBuilder, BundlerOptions, InputItem, IsExternal, Platform, RawMinifyOptions,
    SourceMapType,
};
use rolldown_common::{BundlerTransformOptions, Output};
use tracing::{debug, info, warn};

use super::{ArtifactWritten, BundlerEngine};
use crate::diagnostics::{DiagnosticKind, DiagnosticSeverity, ExtractedDiagnostic};
use crate::output::write_artifact;
use crate::{BuildJob, BundleFormat, Error, Result};

/// Bundles with Rolldown and writes the entry chunk to the job's output path.
#[derive(Debug, Clone, Default)]
pub struct RolldownEngine {
    _private: (),
}

impl RolldownEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn base_dir(job: &BuildJob) -> Result<PathBuf> {
        match &job.cwd {
            Some(cwd) => Ok(cwd.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }
}

/// Map a job onto Rolldown's options.
pub(crate) fn configure_rolldown_options(job: &BuildJob, cwd: PathBuf) -> BundlerOptions {
    let mut options = BundlerOptions {
        input: Some(vec![InputItem {
            name: None,
            import: job.resolved_entry().to_string_lossy().into_owned(),
        }]),
        cwd: Some(cwd),
        format: Some(job.format.to_rolldown()),
        platform: Some(Platform::Browser),
        ..Default::default()
    };

    if job.format == BundleFormat::Iife {
        options.name = Some(job.global_name.clone());
    }

    if !job.bundle {
        // Library mode: leave bare imports to the host
        options.external = Some(IsExternal::from(vec!["^[^./]".to_string()]));
    }

    // The artifact is a single file, so maps are inlined into it
    options.sourcemap = job.sourcemap.then_some(SourceMapType::Inline);

    if job.minify {
        options.minify = Some(RawMinifyOptions::from(true));
    }

    options.transform = Some(BundlerTransformOptions {
        target: Some(Either::Left(job.target.to_string())),
        ..Default::default()
    });

    options
}

#[async_trait]
impl BundlerEngine for RolldownEngine {
    fn name(&self) -> &str {
        "rolldown"
    }

    async fn build(&self, job: &BuildJob) -> Result<ArtifactWritten> {
        let entry = job.resolved_entry();
        let is_file = tokio::fs::metadata(&entry)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            return Err(Error::EntryNotFound(entry));
        }

        let options = configure_rolldown_options(job, Self::base_dir(job)?);
        debug!(
            entry = %entry.display(),
            format = %job.format,
            target = %job.target,
            minify = job.minify,
            "configured rolldown"
        );

        let mut bundler = BundlerBuilder::default()
            .with_options(options)
            .build()
            .map_err(|e| Error::from_rolldown_batch(&e))?;

        let bundle = bundler
            .generate()
            .await
            .map_err(|e| Error::from_rolldown_batch(&e))?;

        for warning in &bundle.warnings {
            warn!(kind = %warning.kind(), "{warning}");
        }

        let chunk = bundle
            .assets
            .iter()
            .find_map(|output| match output {
                Output::Chunk(chunk) if chunk.is_entry => Some(chunk),
                _ => None,
            })
            .ok_or_else(|| {
                Error::Bundler(vec![ExtractedDiagnostic {
                    kind: DiagnosticKind::Other,
                    severity: DiagnosticSeverity::Error,
                    message: format!("Rolldown produced no entry chunk for {}", entry.display()),
                    file: Some(entry.to_string_lossy().into_owned()),
                    help: None,
                }])
            })?;

        let path = job.resolved_outfile();
        let bytes = write_artifact(&path, chunk.code.as_bytes()).await?;
        info!(path = %path.display(), bytes, "artifact written");

        Ok(ArtifactWritten {
            path,
            bytes,
            warnings: bundle.warnings.len(),
        })
    }
}
