//! Stream-copy extraction of a time range.

use crate::{Result, ToolCommand};
use std::path::Path;

/// Build the ffmpeg invocation that copies `duration` seconds starting at `start`.
///
/// Input seeking (`-ss` before `-i`) is used, so cut points snap to whatever
/// keyframe ffmpeg lands on. Existing output files are overwritten.
pub fn segment_command(
    ffmpeg: &Path,
    input: &Path,
    start: f64,
    duration: f64,
    output: &Path,
) -> ToolCommand {
    let mut cmd = ToolCommand::new(ffmpeg.to_path_buf());
    cmd.args(["-hide_banner", "-loglevel", "error", "-y"])
        .arg("-ss")
        .arg(seconds_arg(start))
        .arg("-i")
        .arg(input)
        .arg("-t")
        .arg(seconds_arg(duration))
        .args(["-c", "copy"])
        .arg(output);
    cmd
}

/// Copy a time range of `input` into `output` using ffmpeg stream copy.
///
/// # Errors
///
/// Returns [`crate::Error::ToolFailed`] with ffmpeg's stderr when it exits
/// unsuccessfully, or [`crate::Error::ToolNotFound`] if ffmpeg is missing.
pub fn extract_segment(
    ffmpeg: &Path,
    input: &Path,
    start: f64,
    duration: f64,
    output: &Path,
) -> Result<()> {
    #[cfg(feature = "tracing")]
    tracing::debug!(
        "Extracting {:?} [{} +{}] -> {:?}",
        input,
        start,
        duration,
        output
    );

    segment_command(ffmpeg, input, start, duration, output).execute()?;

    #[cfg(feature = "tracing")]
    tracing::debug!("Segment written: {:?}", output);

    Ok(())
}

/// Shortest decimal form that round-trips, e.g. `200` or `33.333333333333336`.
fn seconds_arg(secs: f64) -> String {
    format!("{}", secs)
}
