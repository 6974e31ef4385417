//! The two-artifact bundle pipeline.
//!
//! One template job is split into a minified production artifact and an
//! unminified debug artifact. Jobs run strictly in that order; the first
//! failure aborts the run and nothing already written is rolled back.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use path_clean::PathClean;
use serde::Serialize;
use tracing::{Instrument, info, info_span};

use crate::engine::{ArtifactWritten, BundlerEngine};
use crate::{BuildJob, Error, Result};

/// Label of the minified production job.
pub const MINIFIED: &str = "minified";

/// Label of the unminified debug job.
pub const DEBUG: &str = "debug";

/// A job the pipeline will run, with its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedJob {
    pub label: &'static str,
    pub job: BuildJob,
}

/// Result of one successful job.
#[derive(Debug, Clone)]
pub struct JobOutcome {
    pub label: &'static str,
    pub job: BuildJob,
    pub artifact: ArtifactWritten,
    pub duration: Duration,
}

/// Result of a successful pipeline run, in execution order.
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    outcomes: Vec<JobOutcome>,
}

impl PipelineReport {
    pub fn outcomes(&self) -> &[JobOutcome] {
        &self.outcomes
    }

    pub fn total_bytes(&self) -> u64 {
        self.outcomes.iter().map(|o| o.artifact.bytes).sum()
    }
}

/// Drives a [`BundlerEngine`] through the minified and debug jobs.
pub struct Pipeline<E> {
    engine: E,
    template: BuildJob,
    out_dir: PathBuf,
    package_name: String,
}

impl<E: BundlerEngine> Pipeline<E> {
    /// Create a pipeline writing `<out_dir>/<package_name>.min.js` and
    /// `<out_dir>/<package_name>.js` from `template`.
    pub fn new(
        engine: E,
        template: BuildJob,
        out_dir: impl Into<PathBuf>,
        package_name: impl Into<String>,
    ) -> Self {
        Self {
            engine,
            template,
            out_dir: out_dir.into(),
            package_name: package_name.into(),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The jobs in execution order: minified first, then debug.
    pub fn plan(&self) -> Vec<PlannedJob> {
        let file = |suffix: &str| {
            self.out_dir
                .join(format!("{}{}", self.package_name, suffix))
                .clean()
        };

        vec![
            PlannedJob {
                label: MINIFIED,
                job: self.template.derive(true, file(".min.js")),
            },
            PlannedJob {
                label: DEBUG,
                job: self.template.derive(false, file(".js")),
            },
        ]
    }

    /// Run every planned job in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::JobFailed`] naming the first job that failed. Later
    /// jobs are not attempted; artifacts of earlier jobs stay on disk.
    pub async fn run(&self) -> Result<PipelineReport> {
        let mut report = PipelineReport::default();

        for PlannedJob { label, job } in self.plan() {
            let fail = |source: Error| Error::JobFailed {
                label: label.to_string(),
                outfile: job.outfile.clone(),
                source: Box::new(source),
            };

            job.validate().map_err(fail)?;

            let span = info_span!("job", label, engine = self.engine.name());
            let started = Instant::now();
            let artifact = self
                .engine
                .build(&job)
                .instrument(span)
                .await
                .map_err(fail)?;
            let duration = started.elapsed();

            info!(
                label,
                path = %artifact.path.display(),
                bytes = artifact.bytes,
                "job finished"
            );

            report.outcomes.push(JobOutcome {
                label,
                job,
                artifact,
                duration,
            });
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records calls and fails on the configured output file.
    #[derive(Default)]
    struct RecordingEngine {
        calls: Mutex<Vec<BuildJob>>,
        fail_on: Option<PathBuf>,
    }

    #[async_trait]
    impl BundlerEngine for RecordingEngine {
        fn name(&self) -> &str {
            "recording"
        }

        async fn build(&self, job: &BuildJob) -> Result<ArtifactWritten> {
            self.calls.lock().unwrap().push(job.clone());
            if self.fail_on.as_deref() == Some(job.outfile.as_path()) {
                return Err(Error::EntryNotFound(job.entry.clone()));
            }
            Ok(ArtifactWritten {
                path: job.outfile.clone(),
                bytes: if job.minify { 10 } else { 25 },
                warnings: 0,
            })
        }
    }

    fn pipeline(engine: RecordingEngine) -> Pipeline<RecordingEngine> {
        Pipeline::new(
            engine,
            BuildJob::new("./Interop/JS.fs.js", "COBieCoach"),
            "fable_build",
            "cobie-coach",
        )
    }

    #[test]
    fn plan_names_and_order() {
        let plan = pipeline(RecordingEngine::default()).plan();

        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].label, MINIFIED);
        assert!(plan[0].job.minify);
        assert_eq!(
            plan[0].job.outfile,
            PathBuf::from("fable_build/cobie-coach.min.js")
        );
        assert_eq!(plan[1].label, DEBUG);
        assert!(!plan[1].job.minify);
        assert_eq!(plan[1].job.outfile, PathBuf::from("fable_build/cobie-coach.js"));

        for planned in &plan {
            assert_eq!(planned.job.entry, PathBuf::from("Interop/JS.fs.js"));
            assert_eq!(planned.job.global_name, "COBieCoach");
            assert!(planned.job.bundle);
            assert!(!planned.job.sourcemap);
        }
    }

    #[tokio::test]
    async fn runs_minified_then_debug() {
        let pipeline = pipeline(RecordingEngine::default());

        let report = pipeline.run().await.unwrap();

        let calls = pipeline.engine().calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].minify);
        assert!(!calls[1].minify);

        let labels: Vec<_> = report.outcomes().iter().map(|o| o.label).collect();
        assert_eq!(labels, [MINIFIED, DEBUG]);
        assert_eq!(report.total_bytes(), 35);
    }

    #[tokio::test]
    async fn first_failure_skips_second_job() {
        let pipeline = pipeline(RecordingEngine {
            fail_on: Some(PathBuf::from("fable_build/cobie-coach.min.js")),
            ..Default::default()
        });

        let err = pipeline.run().await.unwrap_err();

        assert_eq!(err.failed_job(), Some(MINIFIED));
        assert!(matches!(err.root(), Error::EntryNotFound(_)));
        assert_eq!(pipeline.engine().calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn second_failure_is_attributed_to_debug_job() {
        let pipeline = pipeline(RecordingEngine {
            fail_on: Some(PathBuf::from("fable_build/cobie-coach.js")),
            ..Default::default()
        });

        let err = pipeline.run().await.unwrap_err();

        assert_eq!(err.failed_job(), Some(DEBUG));
        assert_eq!(pipeline.engine().calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn invalid_template_never_reaches_engine() {
        let pipeline = Pipeline::new(
            RecordingEngine::default(),
            BuildJob::new("entry.js", "not-an-identifier"),
            "out",
            "lib",
        );

        let err = pipeline.run().await.unwrap_err();

        assert_eq!(err.failed_job(), Some(MINIFIED));
        assert!(matches!(err.root(), Error::InvalidConfig(_)));
        assert!(pipeline.engine().calls.lock().unwrap().is_empty());
    }
}
