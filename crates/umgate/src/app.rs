//! App builder - wires options and a record adapter into a shared handle

use parking_lot::{Mutex, MutexGuard};
use std::path::PathBuf;
use std::sync::Arc;

use crate::prelude::*;
use crate::record_adapter::RecordAdapter;
use umgate_core::decision::Decision;
use umgate_core::{StoreLifecycle, UmOpts, UserManagement};

pub struct UmBuilder {
	opts: UmOpts,
	record_adapter: Option<Arc<dyn RecordAdapter>>,
}

impl UmBuilder {
	pub fn new() -> Self {
		// A subscriber may already be installed by the embedding server
		let _ = tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.try_init();
		UmBuilder { opts: UmOpts::default(), record_adapter: None }
	}

	// Opts
	pub fn opts(&mut self, opts: UmOpts) -> &mut Self {
		self.opts = opts;
		self
	}
	pub fn db_name(&mut self, db_name: impl Into<Box<str>>) -> &mut Self {
		self.opts.db_name = db_name.into();
		self
	}
	pub fn db_file(&mut self, db_file: impl Into<PathBuf>) -> &mut Self {
		self.opts.db_file = db_file.into();
		self
	}
	pub fn save_file(&mut self, save_file: impl Into<PathBuf>) -> &mut Self {
		self.opts.save_file = save_file.into();
		self
	}
	pub fn secret(&mut self, secret: impl Into<Box<str>>) -> &mut Self {
		self.opts.secret = secret.into();
		self
	}

	// Adapters
	pub fn record_adapter(&mut self, record_adapter: Arc<dyn RecordAdapter>) -> &mut Self {
		self.record_adapter = Some(record_adapter);
		self
	}

	/// Validate the options and open the subsystem
	pub fn build(&self) -> ClResult<Um> {
		self.opts.validate()?;
		let Some(record_adapter) = self.record_adapter.clone() else {
			error!("FATAL: No record adapter configured");
			return Err(Error::ConfigError("no record adapter configured".into()));
		};
		debug!("UM: options {:?}", self.opts);

		let lifecycle = Arc::new(StoreLifecycle::new(record_adapter, self.opts.clone()));
		let session = UserManagement::open(Arc::clone(&lifecycle))?;
		info!("UM: user management ready (database {})", self.opts.db_name);
		Ok(Arc::new(UmState { lifecycle, session: Mutex::new(session) }))
	}
}

impl Default for UmBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Shared user-management state.
///
/// The session sits behind one lock so administrative changes never overlap
/// access decisions or persistence.
#[derive(Debug)]
pub struct UmState {
	lifecycle: Arc<StoreLifecycle>,
	session: Mutex<UserManagement>,
}

pub type Um = Arc<UmState>;

impl UmState {
	/// Exclusive access to the registries
	pub fn lock(&self) -> MutexGuard<'_, UserManagement> {
		self.session.lock()
	}

	/// An additional session on the same database. Callers serialize their
	/// use of it with [`UmState::lock`] holders themselves.
	pub fn open_session(&self) -> ClResult<UserManagement> {
		UserManagement::open(Arc::clone(&self.lifecycle))
	}

	pub fn lifecycle(&self) -> &StoreLifecycle {
		&self.lifecycle
	}

	pub fn evaluate(&self, user: &str, url: &str) -> Decision {
		self.lock().evaluate(user, url)
	}

	pub fn can_access(&self, user: &str, url: &str) -> bool {
		self.lock().can_access(user, url)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use umgate_record_adapter_mem::RecordAdapterMem;

	#[test]
	fn test_build_requires_adapter() {
		let res = UmBuilder::new().build();
		assert!(matches!(res, Err(Error::ConfigError(_))));
	}

	#[test]
	fn test_build_rejects_bad_opts() {
		let res = UmBuilder::new()
			.secret("")
			.record_adapter(Arc::new(RecordAdapterMem::new()))
			.build();
		assert!(matches!(res, Err(Error::ConfigError(_))));
	}

	#[test]
	fn test_build_opens_one_session() {
		let um = UmBuilder::new()
			.db_name("site")
			.record_adapter(Arc::new(RecordAdapterMem::new()))
			.build()
			.unwrap();
		assert_eq!(um.lifecycle().open_count(), 1);
		assert_eq!(um.lifecycle().opts().db_name.as_ref(), "site");

		let extra = um.open_session().unwrap();
		assert_eq!(um.lifecycle().open_count(), 2);
		drop(extra);
		assert_eq!(um.lifecycle().open_count(), 1);
	}

	#[test]
	fn test_unknown_user_denied() {
		let um =
			UmBuilder::new().record_adapter(Arc::new(RecordAdapterMem::new())).build().unwrap();
		assert!(!um.can_access("nobody", "/"));
	}
}

// vim: ts=4
