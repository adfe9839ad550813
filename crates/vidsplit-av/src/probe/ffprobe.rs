//! FFprobe-based duration probing.

use crate::{Error, Result, ToolCommand};
use std::path::Path;

/// Build the ffprobe invocation that prints only the container duration.
pub fn duration_command(ffprobe: &Path, path: &Path) -> ToolCommand {
    let mut cmd = ToolCommand::new(ffprobe.to_path_buf());
    cmd.args(["-v", "error"])
        .args(["-show_entries", "format=duration"])
        .args(["-of", "default=noprint_wrappers=1:nokey=1"])
        .arg(path);
    cmd
}

/// Query the container-level duration of a media file, in seconds.
///
/// Only the `format=duration` entry is requested, printed as a bare number.
pub fn probe_duration_with_ffprobe(ffprobe: &Path, path: &Path) -> Result<f64> {
    let cmd = duration_command(ffprobe, path);

    #[cfg(feature = "tracing")]
    tracing::debug!("Probing duration: {:?} {:?}", ffprobe, cmd.get_args());

    // ffprobe's exit status is not consulted; an empty stdout is the failure signal.
    let output = cmd.output()?;

    parse_duration_output(path, &output.stdout, &output.stderr)
}

/// Interpret ffprobe's stdout as a duration.
pub(crate) fn parse_duration_output(path: &Path, stdout: &str, stderr: &str) -> Result<f64> {
    let raw = stdout.trim();
    if raw.is_empty() {
        return Err(Error::invalid_media(path, stderr.trim()));
    }

    let seconds: f64 = raw
        .parse()
        .map_err(|e: std::num::ParseFloatError| Error::format("ffprobe", raw, e.to_string()))?;

    if !seconds.is_finite() || seconds < 0.0 {
        return Err(Error::format(
            "ffprobe",
            raw,
            "duration must be a finite, non-negative number",
        ));
    }

    Ok(seconds)
}
