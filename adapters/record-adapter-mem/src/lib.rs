//! In-memory record adapter
//!
//! Implements the `RecordAdapter` trait with plain vectors of rows guarded by a
//! `parking_lot::RwLock`. Deleted rows become tombstones and keep their index
//! until the database is cleared, which is the behaviour the access-control
//! core is written against.
//!
//! # Persistence
//!
//! `save` writes every live row of every registered table to a JSON file and
//! `load` appends the rows of such a file. The core always clears before it
//! loads, so restoring never produces duplicates.

#![forbid(unsafe_code)]

mod error;
pub mod storage;

use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{debug, info};

use umgate::error::RecordFault;
use umgate::record_adapter::{FaultResult, RecordAdapter};
use umgate::schema::TableSchema;
use umgate::types::{DbId, FieldValue, RowId};

use storage::{SavedFile, Table, FORMAT_VERSION};

#[derive(Debug)]
struct Database {
	name: Box<str>,
	file_hint: Option<PathBuf>,
	tables: Vec<Table>,
}

impl Database {
	fn table(&self, name: &str) -> FaultResult<&Table> {
		self.tables
			.iter()
			.find(|t| t.schema.name == name)
			.ok_or_else(|| RecordFault::UnknownTable(name.into()))
	}

	fn table_mut(&mut self, name: &str) -> FaultResult<&mut Table> {
		self.tables
			.iter_mut()
			.find(|t| t.schema.name == name)
			.ok_or_else(|| RecordFault::UnknownTable(name.into()))
	}
}

/// Memory-backed implementation of RecordAdapter
#[derive(Debug, Default)]
pub struct RecordAdapterMem {
	databases: RwLock<HashMap<DbId, Database>>,
	next_id: AtomicU32,
}

impl RecordAdapterMem {
	pub fn new() -> Self {
		Self::default()
	}

	/// File the database was opened with, if any
	pub fn file_hint(&self, db: DbId) -> Option<PathBuf> {
		self.databases.read().get(&db).and_then(|d| d.file_hint.clone())
	}

	/// Number of row slots in a table, tombstones included
	pub fn row_slots(&self, db: DbId, table: &str) -> FaultResult<usize> {
		self.with_table(db, table, |t| Ok(t.rows.len()))
	}

	fn with_table<T>(
		&self,
		db: DbId,
		table: &str,
		f: impl FnOnce(&Table) -> FaultResult<T>,
	) -> FaultResult<T> {
		let databases = self.databases.read();
		let database = databases.get(&db).ok_or(RecordFault::UnknownDatabase)?;
		f(database.table(table)?)
	}

	fn with_table_mut<T>(
		&self,
		db: DbId,
		table: &str,
		f: impl FnOnce(&mut Table) -> FaultResult<T>,
	) -> FaultResult<T> {
		let mut databases = self.databases.write();
		let database = databases.get_mut(&db).ok_or(RecordFault::UnknownDatabase)?;
		f(database.table_mut(table)?)
	}
}

impl RecordAdapter for RecordAdapterMem {
	fn open(&self, name: &str, file_hint: Option<&Path>) -> FaultResult<DbId> {
		let db = DbId(self.next_id.fetch_add(1, Ordering::Relaxed));
		debug!("opening database {} as {}", name, db);
		self.databases.write().insert(
			db,
			Database {
				name: name.into(),
				file_hint: file_hint.map(Path::to_path_buf),
				tables: Vec::new(),
			},
		);
		Ok(db)
	}

	fn close(&self, db: DbId) {
		if let Some(database) = self.databases.write().remove(&db) {
			debug!("closed database {} ({})", database.name, db);
		}
	}

	fn register_schema(&self, db: DbId, schema: &TableSchema) -> FaultResult<()> {
		let mut databases = self.databases.write();
		let database = databases.get_mut(&db).ok_or(RecordFault::UnknownDatabase)?;
		if database.table(schema.name).is_err() {
			database.tables.push(Table::new(*schema));
		}
		Ok(())
	}

	fn add_row(&self, db: DbId, table: &str) -> FaultResult<RowId> {
		self.with_table_mut(db, table, Table::add_row)
	}

	fn delete_row(&self, db: DbId, table: &str, row: RowId) -> FaultResult<()> {
		self.with_table_mut(db, table, |t| t.delete_row(row))
	}

	fn read_field(&self, db: DbId, table: &str, column: &str, row: RowId) -> FaultResult<FieldValue> {
		self.with_table(db, table, |t| t.read(column, row))
	}

	fn write_field(
		&self,
		db: DbId,
		table: &str,
		column: &str,
		row: RowId,
		value: FieldValue,
	) -> FaultResult<()> {
		self.with_table_mut(db, table, |t| t.write(column, row, value))
	}

	fn search_exact(
		&self,
		db: DbId,
		table: &str,
		column: &str,
		value: &str,
	) -> FaultResult<Option<RowId>> {
		self.with_table(db, table, |t| t.search(column, value))
	}

	fn save(&self, db: DbId, path: &Path) -> FaultResult<()> {
		let data = {
			let databases = self.databases.read();
			let database = databases.get(&db).ok_or(RecordFault::UnknownDatabase)?;
			let file = SavedFile {
				version: FORMAT_VERSION,
				database: database.name.clone(),
				tables: database.tables.iter().map(Table::to_saved).collect(),
			};
			serde_json::to_vec_pretty(&file).map_err(error::from_json_error)?
		};
		std::fs::write(path, data).map_err(|e| error::from_io_error(path, &e))?;
		info!("saved database {} to {}", db, path.display());
		Ok(())
	}

	fn load(&self, db: DbId, path: &Path) -> FaultResult<()> {
		let data = std::fs::read(path).map_err(|e| error::from_io_error(path, &e))?;
		let file: SavedFile = serde_json::from_slice(&data).map_err(error::from_json_error)?;
		if file.version != FORMAT_VERSION {
			return Err(RecordFault::Format(format!(
				"unsupported format version {} in {}",
				file.version,
				path.display()
			)));
		}

		let mut databases = self.databases.write();
		let database = databases.get_mut(&db).ok_or(RecordFault::UnknownDatabase)?;
		let mut loaded = 0;
		for saved in file.tables {
			let table = database.table_mut(&saved.name)?;
			loaded += table.append_saved(saved)?;
		}
		info!("loaded {} rows into database {} from {}", loaded, db, path.display());
		Ok(())
	}

	fn clear(&self, db: DbId) {
		if let Some(database) = self.databases.write().get_mut(&db) {
			database.tables.iter_mut().for_each(Table::clear);
		}
	}
}

// vim: ts=4
