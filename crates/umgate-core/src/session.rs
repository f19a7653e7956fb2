//! An open handle on the user-management subsystem.
//!
//! Opening takes a reference on the shared [`StoreLifecycle`]; dropping the
//! session releases it, so nested sessions share one database and the last
//! one to go closes it.

use std::path::Path;
use std::sync::Arc;

use crate::decision::{AccessPolicy, Decision};
use crate::lifecycle::StoreLifecycle;
use crate::prelude::*;
use crate::registry::{AccessLimits, Groups, Users};
use crate::resolver;

#[derive(Debug)]
pub struct UserManagement {
	lifecycle: Arc<StoreLifecycle>,
	users: Users,
	groups: Groups,
	limits: AccessLimits,
}

impl UserManagement {
	pub fn open(lifecycle: Arc<StoreLifecycle>) -> ClResult<Self> {
		let store = lifecycle.open()?;
		let obfuscator = lifecycle.opts().obfuscator();
		Ok(Self {
			users: Users::new(store.clone(), obfuscator),
			groups: Groups::new(store.clone()),
			limits: AccessLimits::new(store),
			lifecycle,
		})
	}

	pub fn users(&self) -> &Users {
		&self.users
	}

	pub fn groups(&self) -> &Groups {
		&self.groups
	}

	pub fn access_limits(&self) -> &AccessLimits {
		&self.limits
	}

	pub fn policy(&self) -> AccessPolicy<'_> {
		AccessPolicy::new(&self.users, &self.groups, &self.limits)
	}

	pub fn evaluate(&self, user: &str, url: &str) -> Decision {
		self.policy().evaluate(user, url)
	}

	pub fn can_access(&self, user: &str, url: &str) -> bool {
		self.policy().can_access(user, url)
	}

	/// Key of the access limit governing `url`
	pub fn resolve(&self, url: &str) -> Option<Box<str>> {
		resolver::resolve(&self.limits, url)
	}

	pub fn method_for(&self, url: &str) -> AccessMethod {
		resolver::method_for(&self.limits, &self.groups, url)
	}

	/// Save all tables, to `filename` or the remembered save file
	pub fn commit(&self, filename: Option<&Path>) -> ClResult<()> {
		self.lifecycle.commit(filename)
	}

	/// Replace all tables with a saved file. Must not overlap any other use
	/// of this subsystem.
	pub fn restore(&self, filename: Option<&Path>) -> ClResult<()> {
		self.lifecycle.restore(filename)
	}
}

impl Drop for UserManagement {
	fn drop(&mut self) {
		self.lifecycle.close();
	}
}


// vim: ts=4
