use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub split: SplitConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SplitConfig {
    /// Number of segments when `--split_count` is not given
    #[serde(default = "default_count")]
    pub count: u32,

    /// What to do when a segment extraction fails
    #[serde(default)]
    pub on_failure: FailurePolicy,

    /// Output file name pattern, placed next to the input
    #[serde(default = "default_naming")]
    pub naming: String,
}

fn default_count() -> u32 {
    2
}

fn default_naming() -> String {
    vidsplit_av::DEFAULT_NAMING.to_string()
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            on_failure: FailurePolicy::default(),
            naming: default_naming(),
        }
    }
}

/// Behaviour after a segment fails to extract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Attempt every segment and report all failures at the end
    #[default]
    Continue,
    /// Stop at the first failed segment
    Abort,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,

    #[serde(default)]
    pub ffprobe_path: Option<PathBuf>,
}
