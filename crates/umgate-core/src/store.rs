//! Typed access to the record adapter for one open database.
//!
//! A `Store` is a cheap handle (adapter + database id) handed to every
//! registry. Values are copied out; nothing references adapter storage.

use std::fmt;
use std::sync::Arc;

use umgate_types::record_adapter::{FaultResult, RecordAdapter};

use crate::prelude::*;

#[derive(Clone)]
pub struct Store {
	adapter: Arc<dyn RecordAdapter>,
	db: DbId,
}

impl fmt::Debug for Store {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Store").field("db", &self.db).finish_non_exhaustive()
	}
}

impl Store {
	pub fn new(adapter: Arc<dyn RecordAdapter>, db: DbId) -> Self {
		Self { adapter, db }
	}

	pub fn db(&self) -> DbId {
		self.db
	}

	pub fn find(&self, table: &str, column: &str, value: &str) -> ClResult<Option<RowId>> {
		Ok(self.adapter.search_exact(self.db, table, column, value)?)
	}

	/// Raw read, keeping soft faults visible to the caller
	pub fn read_str(&self, table: &str, column: &str, row: RowId) -> FaultResult<Box<str>> {
		match self.adapter.read_field(self.db, table, column, row)? {
			FieldValue::Str(s) => Ok(s),
			FieldValue::Int(_) => Err(RecordFault::TypeMismatch(column.into())),
		}
	}

	pub fn read_int(&self, table: &str, column: &str, row: RowId) -> FaultResult<i64> {
		match self.adapter.read_field(self.db, table, column, row)? {
			FieldValue::Int(i) => Ok(i),
			FieldValue::Str(_) => Err(RecordFault::TypeMismatch(column.into())),
		}
	}

	pub fn write(&self, table: &str, column: &str, row: RowId, value: FieldValue) -> ClResult<()> {
		Ok(self.adapter.write_field(self.db, table, column, row, value)?)
	}

	pub fn add_row(&self, table: &str) -> ClResult<RowId> {
		Ok(self.adapter.add_row(self.db, table)?)
	}

	pub fn delete_row(&self, table: &str, row: RowId) -> ClResult<()> {
		Ok(self.adapter.delete_row(self.db, table, row)?)
	}
}

// vim: ts=4
