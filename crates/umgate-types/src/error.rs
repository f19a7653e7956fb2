//! Error types shared by the registries, the store wrapper and the adapters.

use std::fmt;

pub type ClResult<T> = std::result::Result<T, Error>;

/// Administrative error taxonomy.
///
/// Every registry operation reports one of these as a value. None of them is
/// fatal to the process; `StoreFault` only means the single operation could
/// not be completed and its effects are indeterminate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
	/// The key is already present in its table
	DuplicateKey,
	/// Blank key or key containing whitespace
	InvalidName,
	/// Blank password or whitespace in it
	InvalidPassword,
	/// A referenced group does not exist
	ReferenceNotFound,
	/// The key is absent (update or delete)
	NotFound,
	/// Delete blocked by the protection flag
	Protected,
	/// Group delete blocked by users or access limits referencing it
	InUse,
	/// Options rejected at build time
	ConfigError(String),
	/// The underlying record store failed
	StoreFault(RecordFault),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::DuplicateKey => write!(f, "duplicate key"),
			Error::InvalidName => write!(f, "invalid name"),
			Error::InvalidPassword => write!(f, "invalid password"),
			Error::ReferenceNotFound => write!(f, "referenced group not found"),
			Error::NotFound => write!(f, "not found"),
			Error::Protected => write!(f, "delete-protected"),
			Error::InUse => write!(f, "in use"),
			Error::ConfigError(msg) => write!(f, "config error: {}", msg),
			Error::StoreFault(fault) => write!(f, "store fault: {}", fault),
		}
	}
}

impl std::error::Error for Error {}

/// Faults reported by a [`RecordAdapter`](crate::record_adapter::RecordAdapter).
///
/// `RowDeleted` and `RowOutOfRange` are part of normal traversal: the first
/// marks a tombstone, the second the end of the row index. Everything else is
/// a genuine store failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordFault {
	RowDeleted,
	RowOutOfRange,
	UnknownDatabase,
	UnknownTable(Box<str>),
	UnknownColumn(Box<str>),
	TypeMismatch(Box<str>),
	Io(String),
	Format(String),
}

impl RecordFault {
	/// True for faults that traversal treats as "nothing here" rather than failure
	pub fn is_soft(&self) -> bool {
		matches!(self, RecordFault::RowDeleted | RecordFault::RowOutOfRange)
	}
}

impl fmt::Display for RecordFault {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RecordFault::RowDeleted => write!(f, "row deleted"),
			RecordFault::RowOutOfRange => write!(f, "row out of range"),
			RecordFault::UnknownDatabase => write!(f, "unknown database"),
			RecordFault::UnknownTable(name) => write!(f, "unknown table: {}", name),
			RecordFault::UnknownColumn(name) => write!(f, "unknown column: {}", name),
			RecordFault::TypeMismatch(name) => write!(f, "type mismatch in column: {}", name),
			RecordFault::Io(msg) => write!(f, "io error: {}", msg),
			RecordFault::Format(msg) => write!(f, "format error: {}", msg),
		}
	}
}

impl std::error::Error for RecordFault {}

impl From<RecordFault> for Error {
	fn from(fault: RecordFault) -> Self {
		Error::StoreFault(fault)
	}
}

impl From<std::io::Error> for RecordFault {
	fn from(err: std::io::Error) -> Self {
		RecordFault::Io(err.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_soft_faults() {
		assert!(RecordFault::RowDeleted.is_soft());
		assert!(RecordFault::RowOutOfRange.is_soft());
		assert!(!RecordFault::UnknownDatabase.is_soft());
		assert!(!RecordFault::Io("disk".into()).is_soft());
	}

	#[test]
	fn test_fault_converts_to_store_fault() {
		let err: Error = RecordFault::UnknownTable("users".into()).into();
		assert_eq!(err, Error::StoreFault(RecordFault::UnknownTable("users".into())));
		assert_eq!(err.to_string(), "store fault: unknown table: users");
	}
}

// vim: ts=4
