//! Error types for vidsplit-av.

use std::path::PathBuf;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while probing or splitting a media file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The duration probe produced no usable output.
    #[error("invalid media {}: {diagnostics}", path.display())]
    InvalidMedia { path: PathBuf, diagnostics: String },

    /// Tool output could not be interpreted as a duration.
    #[error("failed to parse {tool} output {value:?}: {message}")]
    Format {
        tool: String,
        value: String,
        message: String,
    },

    /// A required external tool is not available.
    #[error("tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// An external tool failed to execute.
    #[error("tool execution failed: {tool}: {message}")]
    ToolFailed { tool: String, message: String },

    /// The specified file was not found.
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Invalid input provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A segment extraction failed and the run was stopped.
    #[error("segment {number} ({}) failed: {message}", output.display())]
    SegmentFailed {
        number: u32,
        output: PathBuf,
        message: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid media error.
    pub fn invalid_media(path: impl Into<PathBuf>, diagnostics: impl Into<String>) -> Self {
        Self::InvalidMedia {
            path: path.into(),
            diagnostics: diagnostics.into(),
        }
    }

    /// Create a format error.
    pub fn format(
        tool: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Format {
            tool: tool.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create a tool not found error.
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    /// Create a tool execution failed error.
    pub fn tool_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a file not found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Whether this error came from validating caller input rather than from a tool.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::FileNotFound { .. })
    }
}
