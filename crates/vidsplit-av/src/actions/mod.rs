//! Media processing actions.
//!
//! Currently a single operation: copying a time range of a file into a new
//! container without re-encoding.

mod segment;

pub use segment::{extract_segment, segment_command};
