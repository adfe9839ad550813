//! # vidsplit
//!
//! Divide a media file into N equal-duration segments using ffmpeg stream
//! copy. Segment boundaries come from a single ffprobe duration query; each
//! segment is extracted in turn and written next to the input as
//! `{stem}_{run_id}_{n}{ext}`.
//!
//! ```no_run
//! use std::path::Path;
//! use vidsplit::split::{SplitOptions, Splitter};
//! use vidsplit_av::{FfmpegBackend, ToolPaths};
//!
//! let backend = FfmpegBackend::new(ToolPaths::resolve(None, None)?);
//! let splitter = Splitter::new(backend, SplitOptions::new(3));
//! let report = splitter.run(Path::new("talk.mp4"), |_| {})?;
//! println!("run {} wrote {} files", report.run_id, report.segments.len());
//! # Ok::<(), vidsplit_av::Error>(())
//! ```

pub mod config;
pub mod split;

pub use vidsplit_av as av;
