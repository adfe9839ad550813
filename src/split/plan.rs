//! Segment boundary arithmetic and run identifiers.

use rand::Rng;
use serde::Serialize;
use std::path::{Path, PathBuf};
use vidsplit_av::{Error, OutputNamer, Result};

/// Smallest run identifier drawn.
pub const RUN_ID_MIN: u32 = 1000;
/// Largest run identifier drawn.
pub const RUN_ID_MAX: u32 = 9999;
/// Draws attempted before accepting a colliding run identifier.
pub const MAX_RUN_ID_ATTEMPTS: usize = 16;

/// Reject segment counts that cannot be planned.
pub fn validate_segment_count(segment_count: u32) -> Result<()> {
    if segment_count == 0 {
        return Err(Error::InvalidInput(
            "segment count must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Equal-length windows over a media duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SplitPlan {
    duration: f64,
    segment_count: u32,
    segment_duration: f64,
}

impl SplitPlan {
    /// Divide `duration` seconds into `segment_count` windows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when `segment_count` is zero.
    pub fn new(duration: f64, segment_count: u32) -> Result<Self> {
        validate_segment_count(segment_count)?;
        Ok(Self {
            duration,
            segment_count,
            segment_duration: duration / f64::from(segment_count),
        })
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn segment_count(&self) -> u32 {
        self.segment_count
    }

    pub fn segment_duration(&self) -> f64 {
        self.segment_duration
    }

    /// Start of the 0-based segment `index`, in seconds.
    pub fn start_time(&self, index: u32) -> f64 {
        f64::from(index) * self.segment_duration
    }

    /// Jobs in ascending order, built lazily.
    pub fn jobs<'a>(
        &'a self,
        namer: &'a OutputNamer,
        run_id: u32,
    ) -> impl Iterator<Item = SegmentJob> + 'a {
        (0..self.segment_count).map(move |index| SegmentJob {
            index,
            start_time: self.start_time(index),
            duration: self.segment_duration,
            output_path: namer.path_for(run_id, index + 1),
        })
    }
}

/// One extraction request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentJob {
    /// 0-based position in the plan
    pub index: u32,
    pub start_time: f64,
    pub duration: f64,
    pub output_path: PathBuf,
}

impl SegmentJob {
    /// 1-based number used in file names and progress output.
    pub fn number(&self) -> u32 {
        self.index + 1
    }
}

/// Draw a run identifier whose output names are not already taken.
///
/// A run writes segment 1 first, so only that name is checked per draw.
/// Gives up after [`MAX_RUN_ID_ATTEMPTS`] draws and returns the last one, in
/// which case existing files will be overwritten.
pub fn choose_run_id<R, F>(rng: &mut R, namer: &OutputNamer, exists: F) -> u32
where
    R: Rng + ?Sized,
    F: Fn(&Path) -> bool,
{
    let mut run_id = draw_run_id(rng);
    for attempt in 1..=MAX_RUN_ID_ATTEMPTS {
        if !exists(&namer.path_for(run_id, 1)) {
            return run_id;
        }
        tracing::debug!(
            "Run id {} collides with existing output (attempt {})",
            run_id,
            attempt
        );
        if attempt < MAX_RUN_ID_ATTEMPTS {
            run_id = draw_run_id(rng);
        }
    }

    tracing::warn!(
        "No free run id after {} attempts, existing files for run {} will be overwritten",
        MAX_RUN_ID_ATTEMPTS,
        run_id
    );
    run_id
}

fn draw_run_id<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(RUN_ID_MIN..=RUN_ID_MAX)
}
