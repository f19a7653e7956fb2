//! Typed registries over the users, groups and access tables.
//!
//! All three share one `Store` and address rows through their key column.
//! Mutations return `ClResult`; field getters never fail and fall back to a
//! neutral value for missing keys, so callers that care about existence
//! call `exists` first.

pub mod access_limit;
pub mod group;
pub mod user;

pub use access_limit::{AccessLimits, CreateAccessLimitData};
pub use group::{CreateGroupData, Groups};
pub use user::{CreateUserData, Users};

use std::collections::HashSet;

use crate::enumerator::{self, LiveKeys};
use crate::prelude::*;

/// Key-addressed view of one table
#[derive(Debug, Clone)]
pub(crate) struct TableView {
	store: Store,
	table: &'static str,
	key_column: &'static str,
}

impl TableView {
	pub(crate) fn new(store: Store, table: &'static str, key_column: &'static str) -> Self {
		Self { store, table, key_column }
	}

	/// Row of a key. Blank keys never match.
	pub(crate) fn row(&self, key: &str) -> ClResult<Option<RowId>> {
		if key.is_empty() {
			return Ok(None);
		}
		self.store.find(self.table, self.key_column, key)
	}

	pub(crate) fn exists(&self, key: &str) -> bool {
		match self.row(key) {
			Ok(row) => row.is_some(),
			Err(err) => {
				warn!("UM: lookup of <{}> in {} failed: {}", key, self.table, err);
				false
			}
		}
	}

	/// True if any live row has `value` in `column`
	pub(crate) fn references(&self, column: &str, value: &str) -> bool {
		match self.store.find(self.table, column, value) {
			Ok(row) => row.is_some(),
			Err(err) => {
				// A failed lookup counts as referenced
				warn!("UM: reference check in {}.{} failed: {}", self.table, column, err);
				true
			}
		}
	}

	fn read<T>(
		&self,
		key: &str,
		column: &str,
		read: impl FnOnce(&Store, RowId) -> Result<T, RecordFault>,
	) -> Option<T> {
		let row = self.row(key).ok().flatten()?;
		match read(&self.store, row) {
			Ok(value) => Some(value),
			Err(fault) => {
				warn!("UM: read of {}.{} for <{}> failed: {}", self.table, column, key, fault);
				None
			}
		}
	}

	pub(crate) fn read_str(&self, key: &str, column: &str) -> Option<Box<str>> {
		self.read(key, column, |store, row| store.read_str(self.table, column, row))
	}

	pub(crate) fn read_int(&self, key: &str, column: &str) -> Option<i64> {
		self.read(key, column, |store, row| store.read_int(self.table, column, row))
	}

	pub(crate) fn read_flag(&self, key: &str, column: &str) -> Option<bool> {
		self.read_int(key, column).map(|v| v != 0)
	}

	/// Write one field of an existing key
	pub(crate) fn write(&self, key: &str, column: &str, value: FieldValue) -> ClResult<()> {
		let row = self.row(key)?.ok_or(Error::NotFound)?;
		self.store.write(self.table, column, row, value)
	}

	/// Append a row and write the key followed by the remaining fields.
	///
	/// Fields written before a failure stay written.
	pub(crate) fn insert(&self, key: &str, fields: Vec<(&str, FieldValue)>) -> ClResult<RowId> {
		let row = self.store.add_row(self.table)?;
		self.store.write(self.table, self.key_column, row, key.into())?;
		for (column, value) in fields {
			self.store.write(self.table, column, row, value)?;
		}
		Ok(row)
	}

	pub(crate) fn delete(&self, key: &str) -> ClResult<()> {
		let row = self.row(key)?.ok_or(Error::NotFound)?;
		self.store.delete_row(self.table, row)
	}

	pub(crate) fn first(&self) -> ClResult<Option<Box<str>>> {
		enumerator::first_key(&self.store, self.table, self.key_column)
	}

	pub(crate) fn next(&self, after: &str) -> ClResult<Option<Box<str>>> {
		Ok(enumerator::next_key(&self.store, self.table, self.key_column, after)?.into_key())
	}

	/// All live keys in row order, duplicates from out-of-band data dropped
	pub(crate) fn keys(&self) -> ClResult<Vec<Box<str>>> {
		let mut seen = HashSet::new();
		let mut keys = Vec::new();
		for key in LiveKeys::new(&self.store, self.table, self.key_column) {
			let key = key?;
			if seen.insert(key.clone()) {
				keys.push(key);
			}
		}
		Ok(keys)
	}
}

/// Non-empty text of an optional string field
pub(crate) fn non_empty(value: Option<Box<str>>) -> Option<Box<str>> {
	value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
	use umgate_types::schema::{COL_NAME, COL_PASSWORD, COL_PRIVILEGE, USERS_TABLE};

	use super::*;
	use crate::testing::memory_store;

	#[test]
	fn test_insert_partial_failure_keeps_row() {
		let view = TableView::new(memory_store(), USERS_TABLE, COL_NAME);
		let res = view.insert(
			"alice",
			vec![(COL_PASSWORD, "x".into()), (COL_PRIVILEGE, 1i64.into())],
		);
		assert_eq!(res, Err(Error::StoreFault(RecordFault::UnknownColumn(COL_PRIVILEGE.into()))));

		assert!(view.exists("alice"));
		assert_eq!(view.read_str("alice", COL_PASSWORD).as_deref(), Some("x"));
		assert_eq!(view.keys().unwrap(), vec![Box::<str>::from("alice")]);
	}

	#[test]
	fn test_blank_key_never_matches() {
		let view = TableView::new(memory_store(), USERS_TABLE, COL_NAME);
		view.insert("", vec![]).unwrap();
		assert_eq!(view.row("").unwrap(), None);
		assert!(!view.exists(""));
	}
}

// vim: ts=4
