//! Adapter over a keyed-row record store.
//!
//! The store owns canonical row storage. Rows are addressed by index and are
//! never compacted while the database is open: deleting a row leaves a
//! tombstone that reads report as [`RecordFault::RowDeleted`], and reading past
//! the last row reports [`RecordFault::RowOutOfRange`].
//!
//! Calls are blocking. Implementations must be callable from several request
//! threads, but callers serialize mutations against traversal.

use std::fmt::Debug;
use std::path::Path;

use crate::error::RecordFault;
use crate::schema::TableSchema;
use crate::types::{DbId, FieldValue, RowId};

pub type FaultResult<T> = std::result::Result<T, RecordFault>;

pub trait RecordAdapter: Debug + Send + Sync {
	/// Open a database. `file_hint` names the file the store would use by default.
	fn open(&self, name: &str, file_hint: Option<&Path>) -> FaultResult<DbId>;

	/// Close a database and drop its rows
	fn close(&self, db: DbId);

	/// Register a table descriptor. Re-registering an existing table is a no-op.
	fn register_schema(&self, db: DbId, schema: &TableSchema) -> FaultResult<()>;

	/// Append an empty row and return its index
	fn add_row(&self, db: DbId, table: &str) -> FaultResult<RowId>;

	/// Turn a row into a tombstone. Indexes of other rows do not change.
	fn delete_row(&self, db: DbId, table: &str, row: RowId) -> FaultResult<()>;

	fn read_field(&self, db: DbId, table: &str, column: &str, row: RowId) -> FaultResult<FieldValue>;

	fn write_field(
		&self,
		db: DbId,
		table: &str,
		column: &str,
		row: RowId,
		value: FieldValue,
	) -> FaultResult<()>;

	/// First live row whose string column equals `value` exactly
	fn search_exact(
		&self,
		db: DbId,
		table: &str,
		column: &str,
		value: &str,
	) -> FaultResult<Option<RowId>>;

	/// Write every live row of every table to `path`
	fn save(&self, db: DbId, path: &Path) -> FaultResult<()>;

	/// Append rows read from `path`. Callers clear first.
	fn load(&self, db: DbId, path: &Path) -> FaultResult<()>;

	/// Remove all rows of all tables, keeping the schemas
	fn clear(&self, db: DbId);
}

// vim: ts=4
