//! Row storage and the persisted file layout.
//!
//! A table is a vector of optional rows; `None` is a tombstone. Row indexes
//! stay valid until the table is cleared. The saved file holds live rows
//! only, so a save/load cycle compacts the tables.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use umgate::error::RecordFault;
use umgate::record_adapter::FaultResult;
use umgate::schema::TableSchema;
use umgate::types::{FieldValue, RowId};

/// Persisted file format version
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug)]
pub struct Table {
	pub schema: TableSchema,
	pub rows: Vec<Option<Box<[FieldValue]>>>,
}

impl Table {
	pub fn new(schema: TableSchema) -> Self {
		Self { schema, rows: Vec::new() }
	}

	pub fn add_row(&mut self) -> FaultResult<RowId> {
		let row = u32::try_from(self.rows.len())
			.map_err(|_| RecordFault::Format(format!("table {} is full", self.schema.name)))?;
		let cells = self.schema.columns.iter().map(|col| FieldValue::empty(col.typ)).collect();
		self.rows.push(Some(cells));
		Ok(RowId(row))
	}

	fn slot(&self, row: RowId) -> FaultResult<&Option<Box<[FieldValue]>>> {
		self.rows.get(row.0 as usize).ok_or(RecordFault::RowOutOfRange)
	}

	fn live_row(&self, row: RowId) -> FaultResult<&[FieldValue]> {
		self.slot(row)?.as_deref().ok_or(RecordFault::RowDeleted)
	}

	fn live_row_mut(&mut self, row: RowId) -> FaultResult<&mut [FieldValue]> {
		self.rows
			.get_mut(row.0 as usize)
			.ok_or(RecordFault::RowOutOfRange)?
			.as_deref_mut()
			.ok_or(RecordFault::RowDeleted)
	}

	fn column_index(&self, column: &str) -> FaultResult<usize> {
		self.schema
			.column(column)
			.map(|(idx, _)| idx)
			.ok_or_else(|| RecordFault::UnknownColumn(column.into()))
	}

	pub fn delete_row(&mut self, row: RowId) -> FaultResult<()> {
		let slot = self.rows.get_mut(row.0 as usize).ok_or(RecordFault::RowOutOfRange)?;
		if slot.take().is_none() {
			return Err(RecordFault::RowDeleted);
		}
		Ok(())
	}

	pub fn read(&self, column: &str, row: RowId) -> FaultResult<FieldValue> {
		let idx = self.column_index(column)?;
		let cells = self.live_row(row)?;
		cells.get(idx).cloned().ok_or_else(|| RecordFault::UnknownColumn(column.into()))
	}

	pub fn write(&mut self, column: &str, row: RowId, value: FieldValue) -> FaultResult<()> {
		let idx = self.column_index(column)?;
		if self.schema.columns[idx].typ != value.column_type() {
			return Err(RecordFault::TypeMismatch(column.into()));
		}
		let cells = self.live_row_mut(row)?;
		cells[idx] = value;
		Ok(())
	}

	pub fn search(&self, column: &str, value: &str) -> FaultResult<Option<RowId>> {
		let idx = self.column_index(column)?;
		let found = self.rows.iter().position(|row| {
			matches!(row.as_deref().and_then(|cells| cells.get(idx)),
				Some(FieldValue::Str(s)) if s.as_ref() == value)
		});
		// Row count fits u32, add_row guarantees it
		#[allow(clippy::cast_possible_truncation)]
		Ok(found.map(|idx| RowId(idx as u32)))
	}

	pub fn clear(&mut self) {
		self.rows.clear();
	}

	pub fn to_saved(&self) -> SavedTable {
		let rows = self
			.rows
			.iter()
			.flatten()
			.map(|cells| {
				self.schema
					.columns
					.iter()
					.zip(cells.iter())
					.map(|(col, value)| (col.name.to_string(), value.clone()))
					.collect()
			})
			.collect();
		SavedTable { name: self.schema.name.into(), rows }
	}

	/// Append rows from a saved table. Unknown columns are ignored, missing ones stay empty.
	pub fn append_saved(&mut self, saved: SavedTable) -> FaultResult<usize> {
		let count = saved.rows.len();
		for saved_row in saved.rows {
			let row = self.add_row()?;
			for (column, value) in saved_row {
				match self.write(&column, row, value) {
					Ok(()) => {}
					Err(RecordFault::UnknownColumn(col)) => {
						tracing::warn!("ignoring unknown column {}.{}", self.schema.name, col);
					}
					Err(err) => return Err(err),
				}
			}
		}
		Ok(count)
	}
}

/// One table in the saved file: rows as column → value maps
#[derive(Debug, Serialize, Deserialize)]
pub struct SavedTable {
	pub name: Box<str>,
	pub rows: Vec<BTreeMap<String, FieldValue>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SavedFile {
	pub version: u32,
	pub database: Box<str>,
	pub tables: Vec<SavedTable>,
}


// vim: ts=4
