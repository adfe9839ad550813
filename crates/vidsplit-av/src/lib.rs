//! # vidsplit-av
//!
//! External tool layer for splitting media files without re-encoding.
//!
//! This crate provides:
//! - Duration probing via `ffprobe`
//! - Stream-copy extraction of a time range via `ffmpeg`
//! - Tool discovery ([`ToolPaths`], [`check_tools`])
//! - The [`MediaBackend`] trait the splitter is written against
//! - Output file naming templates ([`OutputNamer`])
//!
//! ## Features
//!
//! - `tracing` - Enable tracing support
//!
//! ## Example
//!
//! ```no_run
//! use vidsplit_av::{FfmpegBackend, MediaBackend, ToolPaths};
//! use std::path::Path;
//!
//! let backend = FfmpegBackend::new(ToolPaths::resolve(None, None)?);
//! let secs = backend.probe_duration(Path::new("/path/to/video.mp4"))?;
//! backend.extract_segment(
//!     Path::new("/path/to/video.mp4"),
//!     0.0,
//!     secs / 2.0,
//!     Path::new("/path/to/video_1234_1.mp4"),
//! )?;
//! # Ok::<(), vidsplit_av::Error>(())
//! ```

pub mod actions;
mod backend;
mod command;
mod error;
pub mod probe;
pub mod template;
pub mod tools;

// Re-exports
pub use backend::{FfmpegBackend, MediaBackend};
pub use command::{ToolCommand, ToolOutput};
pub use error::{Error, Result};
pub use probe::probe_duration_with_ffprobe;
pub use template::{OutputNamer, TemplateContext, DEFAULT_NAMING};
pub use tools::{check_tools, require_tool, ToolInfo, ToolPaths};
