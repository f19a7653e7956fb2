//! Groups registry

use umgate_types::schema::{
	ACCESS_TABLE, COL_DISABLED, COL_GROUP, COL_METHOD, COL_NAME, COL_PRIVILEGE, COL_PROTECTED,
	COL_URL, GROUPS_TABLE, USERS_TABLE,
};
use umgate_types::types::Group;
use umgate_types::utils::check_name;

use super::TableView;
use crate::prelude::*;

/// Data needed to create a new group
#[derive(Debug, Clone, Copy)]
pub struct CreateGroupData<'a> {
	pub name: &'a str,
	pub privilege: Privilege,
	pub method: AccessMethod,
	pub protected: bool,
	pub disabled: bool,
}

#[derive(Debug, Clone)]
pub struct Groups {
	groups: TableView,
	users: TableView,
	limits: TableView,
}

impl Groups {
	pub fn new(store: Store) -> Self {
		Self {
			groups: TableView::new(store.clone(), GROUPS_TABLE, COL_NAME),
			users: TableView::new(store.clone(), USERS_TABLE, COL_NAME),
			limits: TableView::new(store, ACCESS_TABLE, COL_URL),
		}
	}

	pub fn exists(&self, name: &str) -> bool {
		self.groups.exists(name)
	}

	pub fn add(&self, data: CreateGroupData<'_>) -> ClResult<()> {
		debug!("UM: Adding group <{}>", data.name);

		if self.groups.row(data.name)?.is_some() {
			return Err(Error::DuplicateKey);
		}
		if !check_name(data.name) {
			return Err(Error::InvalidName);
		}

		self.groups.insert(
			data.name,
			vec![
				(COL_PRIVILEGE, data.privilege.code().into()),
				(COL_METHOD, data.method.code().into()),
				(COL_PROTECTED, data.protected.into()),
				(COL_DISABLED, data.disabled.into()),
			],
		)?;
		info!("UM: added group <{}> ({}, privilege {})", data.name, data.method, data.privilege.0);
		Ok(())
	}

	/// True if any user or access limit names the group
	pub fn in_use(&self, name: &str) -> bool {
		self.users.references(COL_GROUP, name) || self.limits.references(COL_GROUP, name)
	}

	pub fn delete(&self, name: &str) -> ClResult<()> {
		debug!("UM: Deleting group <{}>", name);

		if !self.exists(name) {
			return Err(Error::NotFound);
		}
		if self.in_use(name) {
			return Err(Error::InUse);
		}
		if self.protected(name) {
			return Err(Error::Protected);
		}
		self.groups.delete(name)?;
		info!("UM: deleted group <{}>", name);
		Ok(())
	}

	pub fn first(&self) -> ClResult<Option<Box<str>>> {
		self.groups.first()
	}

	pub fn next(&self, after: &str) -> ClResult<Option<Box<str>>> {
		self.groups.next(after)
	}

	pub fn list(&self) -> ClResult<Vec<Box<str>>> {
		self.groups.keys()
	}

	pub fn get(&self, name: &str) -> Option<Group> {
		if !self.exists(name) {
			return None;
		}
		Some(Group {
			name: name.into(),
			privilege: self.privilege(name).unwrap_or_default(),
			method: self.method(name),
			protected: self.protected(name),
			enabled: self.enabled(name),
		})
	}

	pub fn privilege(&self, name: &str) -> Option<Privilege> {
		self.groups.read_int(name, COL_PRIVILEGE).map(Privilege::from_code)
	}

	pub fn set_privilege(&self, name: &str, privilege: Privilege) -> ClResult<()> {
		self.groups.write(name, COL_PRIVILEGE, privilege.code().into())
	}

	/// `Invalid` for unknown groups
	pub fn method(&self, name: &str) -> AccessMethod {
		self.groups
			.read_int(name, COL_METHOD)
			.map_or(AccessMethod::Invalid, AccessMethod::from_code)
	}

	pub fn set_method(&self, name: &str, method: AccessMethod) -> ClResult<()> {
		self.groups.write(name, COL_METHOD, method.code().into())
	}

	pub fn enabled(&self, name: &str) -> bool {
		self.groups.read_flag(name, COL_DISABLED).is_some_and(|disabled| !disabled)
	}

	pub fn set_enabled(&self, name: &str, enabled: bool) -> ClResult<()> {
		self.groups.write(name, COL_DISABLED, (!enabled).into())
	}

	pub fn protected(&self, name: &str) -> bool {
		self.groups.read_flag(name, COL_PROTECTED).unwrap_or(false)
	}

	pub fn set_protected(&self, name: &str, protected: bool) -> ClResult<()> {
		self.groups.write(name, COL_PROTECTED, protected.into())
	}
}


// vim: ts=4
