//! The two tool operations the splitter depends on, behind a trait.

use crate::{actions, probe, Result, ToolPaths};
use std::path::Path;

/// Duration probing and lossless range extraction.
///
/// [`FfmpegBackend`] is the real implementation; tests substitute a fake that
/// returns canned durations and records extraction requests.
pub trait MediaBackend {
    /// Total duration of `path`, in seconds.
    fn probe_duration(&self, path: &Path) -> Result<f64>;

    /// Copy `duration` seconds of `input` starting at `start` into `output`.
    fn extract_segment(&self, input: &Path, start: f64, duration: f64, output: &Path)
        -> Result<()>;
}

impl<B: MediaBackend + ?Sized> MediaBackend for &B {
    fn probe_duration(&self, path: &Path) -> Result<f64> {
        (**self).probe_duration(path)
    }

    fn extract_segment(
        &self,
        input: &Path,
        start: f64,
        duration: f64,
        output: &Path,
    ) -> Result<()> {
        (**self).extract_segment(input, start, duration, output)
    }
}

/// Backend that shells out to ffprobe and ffmpeg.
#[derive(Debug, Clone, Default)]
pub struct FfmpegBackend {
    tools: ToolPaths,
}

impl FfmpegBackend {
    pub fn new(tools: ToolPaths) -> Self {
        Self { tools }
    }
}

impl MediaBackend for FfmpegBackend {
    fn probe_duration(&self, path: &Path) -> Result<f64> {
        probe::probe_duration_with_ffprobe(&self.tools.ffprobe, path)
    }

    fn extract_segment(
        &self,
        input: &Path,
        start: f64,
        duration: f64,
        output: &Path,
    ) -> Result<()> {
        actions::extract_segment(&self.tools.ffmpeg, input, start, duration, output)
    }
}
