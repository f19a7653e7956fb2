//! Fault helpers for the memory adapter

use std::fmt;

use umgate::error::RecordFault;

/// Helper to convert serialization errors
pub fn from_json_error<E: fmt::Display>(err: E) -> RecordFault {
	RecordFault::Format(err.to_string())
}

/// Helper to convert file system errors, keeping the path in the message
pub fn from_io_error(path: &std::path::Path, err: &std::io::Error) -> RecordFault {
	RecordFault::Io(format!("{}: {}", path.display(), err))
}

// vim: ts=4
