//! Media duration probing.
//!
//! The only metadata the splitter needs is the container duration, which is
//! read from ffprobe's `format=duration` entry.

mod ffprobe;

pub use ffprobe::{duration_command, probe_duration_with_ffprobe};
