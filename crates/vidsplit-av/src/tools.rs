//! External tool detection and management.

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Information about an external tool.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ToolInfo {
    /// Name of the tool.
    pub name: String,
    /// Whether the tool is available.
    pub available: bool,
    /// Version string if available.
    pub version: Option<String>,
    /// Path to the tool executable.
    pub path: Option<PathBuf>,
}

/// Run `program version_arg` and report whether it answered.
///
/// # Example
///
/// ```no_run
/// use vidsplit_av::tools::check_tool_at;
/// use std::path::Path;
///
/// let info = check_tool_at("ffprobe", Path::new("ffprobe"), "-version");
/// if info.available {
///     println!("ffprobe version: {:?}", info.version);
/// }
/// ```
pub fn check_tool_at(name: &str, program: &Path, version_arg: &str) -> ToolInfo {
    let result = std::process::Command::new(program).arg(version_arg).output();

    match result {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .map(|s| s.to_string());

            let path = which::which(program).ok();

            ToolInfo {
                name: name.to_string(),
                available: true,
                version,
                path,
            }
        }
        _ => ToolInfo {
            name: name.to_string(),
            available: false,
            version: None,
            path: None,
        },
    }
}

/// Check every tool the splitter needs.
pub fn check_tools(paths: &ToolPaths) -> Vec<ToolInfo> {
    vec![
        check_tool_at("ffprobe", &paths.ffprobe, "-version"),
        check_tool_at("ffmpeg", &paths.ffmpeg, "-version"),
    ]
}

/// Require that a tool is available, returning its path.
///
/// # Errors
///
/// Returns an error if the tool is not found.
pub fn require_tool(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| Error::tool_not_found(name))
}

/// Get the path to a tool, preferring a configured path over PATH lookup.
pub fn get_tool_path(name: &str, config_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = config_path {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        #[cfg(feature = "tracing")]
        tracing::warn!(
            "Configured {} path {:?} does not exist, searching PATH",
            name,
            path
        );
    }

    require_tool(name)
}

/// Locations of the probe and extraction executables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub ffprobe: PathBuf,
    pub ffmpeg: PathBuf,
}

impl ToolPaths {
    /// Resolve both tools, preferring configured paths.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToolNotFound`] for the first tool that cannot be located.
    pub fn resolve(ffprobe: Option<&Path>, ffmpeg: Option<&Path>) -> Result<Self> {
        Ok(Self {
            ffprobe: get_tool_path("ffprobe", ffprobe)?,
            ffmpeg: get_tool_path("ffmpeg", ffmpeg)?,
        })
    }

    /// Use configured paths as given, or bare names looked up at spawn time.
    pub fn unresolved(ffprobe: Option<&Path>, ffmpeg: Option<&Path>) -> Self {
        Self {
            ffprobe: ffprobe
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("ffprobe")),
            ffmpeg: ffmpeg
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("ffmpeg")),
        }
    }
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self::unresolved(None, None)
    }
}
