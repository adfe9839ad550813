//! Splitting a media file into equal-duration, stream-copied segments.
//!
//! [`Splitter`] probes the input once, plans the windows with [`SplitPlan`],
//! then extracts each [`SegmentJob`] in ascending order through a
//! [`MediaBackend`]. Nothing runs concurrently.

mod plan;

pub use plan::{
    choose_run_id, validate_segment_count, SegmentJob, SplitPlan, MAX_RUN_ID_ATTEMPTS,
    RUN_ID_MAX, RUN_ID_MIN,
};

pub use crate::config::FailurePolicy;

use rand::Rng;
use serde::Serialize;
use std::path::{Path, PathBuf};
use vidsplit_av::{Error, MediaBackend, OutputNamer, Result, DEFAULT_NAMING};

/// Settings for one split run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOptions {
    pub segment_count: u32,
    pub on_failure: FailurePolicy,
    pub naming: String,
    /// Plan and report without extracting anything
    pub dry_run: bool,
}

impl SplitOptions {
    pub fn new(segment_count: u32) -> Self {
        Self {
            segment_count,
            ..Self::default()
        }
    }
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            segment_count: 2,
            on_failure: FailurePolicy::default(),
            naming: DEFAULT_NAMING.to_string(),
            dry_run: false,
        }
    }
}

/// Progress notifications emitted during a run.
#[derive(Debug)]
pub enum SplitEvent<'a> {
    /// Duration probed and run id chosen; extraction is about to start.
    Planned { plan: &'a SplitPlan, run_id: u32 },
    /// Emitted before the extractor is invoked for `job`.
    SegmentStarted { job: &'a SegmentJob, total: u32 },
    /// The extractor reported an error for `job`.
    SegmentFailed { job: &'a SegmentJob, error: &'a Error },
}

/// A segment whose extraction failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentFailure {
    pub number: u32,
    pub output_path: PathBuf,
    pub message: String,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct SplitReport {
    pub input: PathBuf,
    pub run_id: u32,
    pub duration: f64,
    pub segment_count: u32,
    pub segment_duration: f64,
    pub dry_run: bool,
    /// Every planned segment, in order
    pub segments: Vec<SegmentJob>,
    pub failures: Vec<SegmentFailure>,
}

impl SplitReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Segments that were written, or would be in a dry run.
    pub fn succeeded(&self) -> impl Iterator<Item = &SegmentJob> {
        self.segments
            .iter()
            .filter(|job| !self.failures.iter().any(|f| f.number == job.number()))
    }
}

/// Orchestrates probing and extraction for one input file.
#[derive(Debug, Clone)]
pub struct Splitter<B> {
    backend: B,
    options: SplitOptions,
}

impl<B: MediaBackend> Splitter<B> {
    pub fn new(backend: B, options: SplitOptions) -> Self {
        Self { backend, options }
    }

    /// Split `input` using a thread-local random source for the run id.
    pub fn run<F>(&self, input: &Path, on_event: F) -> Result<SplitReport>
    where
        F: FnMut(SplitEvent<'_>),
    {
        self.run_with_rng(input, &mut rand::thread_rng(), on_event)
    }

    /// Split `input`, drawing the run id from `rng`.
    ///
    /// Validation and probing happen before anything is written; a failure
    /// there returns an error with no output produced.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] for a zero segment count or bad naming pattern.
    /// - Probe errors ([`Error::InvalidMedia`], [`Error::Format`], tool errors).
    /// - [`Error::SegmentFailed`] on the first failed extraction when the
    ///   policy is [`FailurePolicy::Abort`]. Under
    ///   [`FailurePolicy::Continue`] failures are collected in the report.
    pub fn run_with_rng<R, F>(
        &self,
        input: &Path,
        rng: &mut R,
        mut on_event: F,
    ) -> Result<SplitReport>
    where
        R: Rng + ?Sized,
        F: FnMut(SplitEvent<'_>),
    {
        let count = self.options.segment_count;
        validate_segment_count(count)?;
        let namer = OutputNamer::new(input, &self.options.naming)?;

        tracing::debug!("Probing duration of {:?}", input);
        let duration = self.backend.probe_duration(input)?;

        let plan = SplitPlan::new(duration, count)?;
        let run_id = choose_run_id(rng, &namer, |p| p.exists());

        tracing::info!(
            "Splitting {:?} ({:.3}s) into {} segments of {:.3}s, run id {}",
            input,
            duration,
            count,
            plan.segment_duration(),
            run_id
        );
        on_event(SplitEvent::Planned {
            plan: &plan,
            run_id,
        });

        let mut segments = Vec::new();
        let mut failures = Vec::new();

        for job in plan.jobs(&namer, run_id) {
            on_event(SplitEvent::SegmentStarted {
                job: &job,
                total: count,
            });

            if !self.options.dry_run {
                if let Err(e) = self.backend.extract_segment(
                    input,
                    job.start_time,
                    job.duration,
                    &job.output_path,
                ) {
                    tracing::warn!(
                        "Segment {}/{} ({:?}) failed: {}",
                        job.number(),
                        count,
                        job.output_path,
                        e
                    );
                    on_event(SplitEvent::SegmentFailed { job: &job, error: &e });

                    if self.options.on_failure == FailurePolicy::Abort {
                        return Err(Error::SegmentFailed {
                            number: job.number(),
                            output: job.output_path.clone(),
                            message: e.to_string(),
                        });
                    }

                    failures.push(SegmentFailure {
                        number: job.number(),
                        output_path: job.output_path.clone(),
                        message: e.to_string(),
                    });
                }
            }

            segments.push(job);
        }

        if failures.is_empty() {
            tracing::info!("Run {} complete: {} segments", run_id, count);
        } else {
            tracing::warn!(
                "Run {} finished with {} of {} segments failed",
                run_id,
                failures.len(),
                count
            );
        }

        Ok(SplitReport {
            input: input.to_path_buf(),
            run_id,
            duration,
            segment_count: count,
            segment_duration: plan.segment_duration(),
            dry_run: self.options.dry_run,
            segments,
            failures,
        })
    }
}
