//! Reference-counted open/close of the shared user-management database,
//! plus bulk commit and restore.
//!
//! Several parts of a server may open the subsystem independently. The first
//! open creates the database and registers the three tables, later opens
//! share it, and only the last close tears it down.

use parking_lot::Mutex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use umgate_types::record_adapter::RecordAdapter;
use umgate_types::schema;

use crate::prelude::*;
use crate::settings::UmOpts;

#[derive(Debug, Default)]
struct LifecycleState {
	open_count: u32,
	db: Option<DbId>,
	save_file: Option<PathBuf>,
}

pub struct StoreLifecycle {
	adapter: Arc<dyn RecordAdapter>,
	opts: UmOpts,
	state: Mutex<LifecycleState>,
}

impl fmt::Debug for StoreLifecycle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("StoreLifecycle")
			.field("opts", &self.opts)
			.field("state", &*self.state.lock())
			.finish_non_exhaustive()
	}
}

impl StoreLifecycle {
	pub fn new(adapter: Arc<dyn RecordAdapter>, opts: UmOpts) -> Self {
		Self { adapter, opts, state: Mutex::new(LifecycleState::default()) }
	}

	pub fn opts(&self) -> &UmOpts {
		&self.opts
	}

	pub fn open_count(&self) -> u32 {
		self.state.lock().open_count
	}

	/// File used by commit/restore when they are not given one
	pub fn save_file(&self) -> Option<PathBuf> {
		self.state.lock().save_file.clone()
	}

	/// Take a reference and return a store handle for the shared database
	pub fn open(&self) -> ClResult<Store> {
		let mut state = self.state.lock();
		if state.open_count == 0 {
			if state.db.is_none() {
				state.db = Some(self.init_database()?);
			}
			if state.save_file.is_none() {
				state.save_file = Some(self.opts.save_file.clone());
			}
		}
		let db = state.db.ok_or(Error::StoreFault(RecordFault::UnknownDatabase))?;
		state.open_count += 1;
		Ok(Store::new(Arc::clone(&self.adapter), db))
	}

	fn init_database(&self) -> ClResult<DbId> {
		let db = self.adapter.open(&self.opts.db_name, Some(self.opts.db_file.as_path()))?;
		for table in &schema::ALL {
			if let Err(fault) = self.adapter.register_schema(db, table) {
				self.adapter.close(db);
				return Err(fault.into());
			}
		}
		debug!("UM: opened database {} ({})", self.opts.db_name, db);
		Ok(db)
	}

	/// Release a reference. The last one closes the database.
	pub fn close(&self) {
		let mut state = self.state.lock();
		if state.open_count == 0 {
			warn!("UM: close without matching open");
			return;
		}
		state.open_count -= 1;
		if state.open_count > 0 {
			return;
		}
		if let Some(db) = state.db.take() {
			self.adapter.close(db);
			debug!("UM: closed database {}", db);
		}
		state.save_file = None;
	}

	/// Replace the remembered save file when a non-empty one is given and
	/// return the file to use.
	fn select_file(state: &mut LifecycleState, filename: Option<&Path>) -> ClResult<PathBuf> {
		if let Some(filename) = filename.filter(|f| !f.as_os_str().is_empty()) {
			state.save_file = Some(filename.to_path_buf());
		}
		state.save_file.clone().ok_or(Error::StoreFault(RecordFault::UnknownDatabase))
	}

	/// Persist all three tables
	pub fn commit(&self, filename: Option<&Path>) -> ClResult<()> {
		let mut state = self.state.lock();
		let db = state.db.ok_or(Error::StoreFault(RecordFault::UnknownDatabase))?;
		let file = Self::select_file(&mut state, filename)?;
		info!("UM: Writing User Configuration to file <{}>", file.display());
		Ok(self.adapter.save(db, &file)?)
	}

	/// Replace all tables with the content of a persisted file.
	///
	/// The store is cleared first so loading never duplicates rows. Nothing
	/// else may read or write the registries while this runs.
	pub fn restore(&self, filename: Option<&Path>) -> ClResult<()> {
		let mut state = self.state.lock();
		let db = state.db.ok_or(Error::StoreFault(RecordFault::UnknownDatabase))?;
		let file = Self::select_file(&mut state, filename)?;
		info!("UM: Loading User Configuration from file <{}>", file.display());
		self.adapter.clear(db);
		Ok(self.adapter.load(db, &file)?)
	}
}


// vim: ts=4
