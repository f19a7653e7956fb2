//! Users registry

use umgate_types::schema::{
	COL_DISABLED, COL_GROUP, COL_NAME, COL_PASSWORD, COL_PROTECTED, GROUPS_TABLE, USERS_TABLE,
};
use umgate_types::types::User;
use umgate_types::utils::check_name;

use super::{non_empty, TableView};
use crate::obfuscate::Obfuscator;
use crate::prelude::*;

/// Data needed to create a new user
#[derive(Debug, Clone, Copy)]
pub struct CreateUserData<'a> {
	pub name: &'a str,
	pub password: &'a str,
	pub group: &'a str,
	pub protected: bool,
	pub disabled: bool,
}

#[derive(Debug, Clone)]
pub struct Users {
	users: TableView,
	groups: TableView,
	obfuscator: Obfuscator,
}

impl Users {
	pub fn new(store: Store, obfuscator: Obfuscator) -> Self {
		Self {
			users: TableView::new(store.clone(), USERS_TABLE, COL_NAME),
			groups: TableView::new(store, GROUPS_TABLE, COL_NAME),
			obfuscator,
		}
	}

	pub fn exists(&self, name: &str) -> bool {
		self.users.exists(name)
	}

	/// Add a user. The group must exist now; it is not re-checked later.
	pub fn add(&self, data: CreateUserData<'_>) -> ClResult<()> {
		debug!("UM: Adding User <{}>", data.name);

		if self.users.row(data.name)?.is_some() {
			return Err(Error::DuplicateKey);
		}
		if !check_name(data.name) {
			return Err(Error::InvalidName);
		}
		if !check_name(data.password) {
			return Err(Error::InvalidPassword);
		}
		if self.groups.row(data.group)?.is_none() {
			return Err(Error::ReferenceNotFound);
		}
		let password = self.obfuscator.conceal(data.password);

		self.users.insert(
			data.name,
			vec![
				(COL_PASSWORD, password.as_str().into()),
				(COL_GROUP, data.group.into()),
				(COL_PROTECTED, data.protected.into()),
				(COL_DISABLED, data.disabled.into()),
			],
		)?;
		info!("UM: added user <{}> in group <{}>", data.name, data.group);
		Ok(())
	}

	pub fn delete(&self, name: &str) -> ClResult<()> {
		debug!("UM: Deleting User <{}>", name);

		if !self.exists(name) {
			return Err(Error::NotFound);
		}
		if self.protected(name) {
			return Err(Error::Protected);
		}
		self.users.delete(name)?;
		info!("UM: deleted user <{}>", name);
		Ok(())
	}

	pub fn first(&self) -> ClResult<Option<Box<str>>> {
		self.users.first()
	}

	pub fn next(&self, after: &str) -> ClResult<Option<Box<str>>> {
		self.users.next(after)
	}

	pub fn list(&self) -> ClResult<Vec<Box<str>>> {
		self.users.keys()
	}

	/// Snapshot of a user row
	pub fn get(&self, name: &str) -> Option<User> {
		if !self.exists(name) {
			return None;
		}
		Some(User {
			name: name.into(),
			password: self.password(name).map(Into::into),
			group: self.group(name),
			protected: self.protected(name),
			enabled: self.enabled(name),
		})
	}

	/// De-obfuscated copy of the stored password
	pub fn password(&self, name: &str) -> Option<String> {
		let stored = self.users.read_str(name, COL_PASSWORD)?;
		self.obfuscator.reveal(&stored)
	}

	pub fn set_password(&self, name: &str, password: &str) -> ClResult<()> {
		debug!("UM: Attempting to change the password for user <{}>", name);
		if !check_name(password) {
			return Err(Error::InvalidPassword);
		}
		let stored = self.obfuscator.conceal(password);
		self.users.write(name, COL_PASSWORD, stored.as_str().into())
	}

	pub fn group(&self, name: &str) -> Option<Box<str>> {
		non_empty(self.users.read_str(name, COL_GROUP))
	}

	/// Move a user to another group. Existence of the group is not checked.
	pub fn set_group(&self, name: &str, group: &str) -> ClResult<()> {
		if !check_name(group) {
			return Err(Error::InvalidName);
		}
		self.users.write(name, COL_GROUP, group.into())
	}

	/// False for unknown users
	pub fn enabled(&self, name: &str) -> bool {
		self.users.read_flag(name, COL_DISABLED).is_some_and(|disabled| !disabled)
	}

	pub fn set_enabled(&self, name: &str, enabled: bool) -> ClResult<()> {
		self.users.write(name, COL_DISABLED, (!enabled).into())
	}

	/// False for unknown users
	pub fn protected(&self, name: &str) -> bool {
		self.users.read_flag(name, COL_PROTECTED).unwrap_or(false)
	}

	pub fn set_protected(&self, name: &str, protected: bool) -> ClResult<()> {
		self.users.write(name, COL_PROTECTED, protected.into())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::registry::{CreateGroupData, Groups};
	use crate::testing::memory_store;

	fn fixture() -> (Users, Groups) {
		let store = memory_store();
		let groups = Groups::new(store.clone());
		groups
			.add(CreateGroupData {
				name: "staff",
				privilege: Privilege::READ,
				method: AccessMethod::Basic,
				protected: false,
				disabled: false,
			})
			.unwrap();
		(Users::new(store, Obfuscator::default()), groups)
	}

	fn user<'a>(name: &'a str, group: &'a str) -> CreateUserData<'a> {
		CreateUserData { name, password: "pa55word", group, protected: false, disabled: false }
	}

	#[test]
	fn test_add_then_exists() {
		let (users, _) = fixture();
		users.add(user("alice", "staff")).unwrap();
		assert!(users.exists("alice"));
		assert!(!users.exists("Alice"));
	}

	#[test]
	fn test_add_duplicate() {
		let (users, _) = fixture();
		users.add(user("alice", "staff")).unwrap();
		assert_eq!(users.add(user("alice", "staff")), Err(Error::DuplicateKey));
	}

	#[test]
	fn test_add_validation() {
		let (users, _) = fixture();
		assert_eq!(users.add(user("", "staff")), Err(Error::InvalidName));
		assert_eq!(users.add(user("al ice", "staff")), Err(Error::InvalidName));
		assert_eq!(
			users.add(CreateUserData { password: "pass word", ..user("alice", "staff") }),
			Err(Error::InvalidPassword)
		);
		assert_eq!(
			users.add(CreateUserData { password: "", ..user("alice", "staff") }),
			Err(Error::InvalidPassword)
		);
		assert_eq!(users.add(user("alice", "nobody")), Err(Error::ReferenceNotFound));
		assert!(!users.exists("alice"));
	}

	#[test]
	fn test_password_is_obfuscated_at_rest() {
		let (users, _) = fixture();
		users.add(user("alice", "staff")).unwrap();

		let stored = users.users.read_str("alice", COL_PASSWORD).unwrap();
		assert_ne!(stored.as_ref(), "pa55word");
		assert_eq!(users.password("alice").as_deref(), Some("pa55word"));

		users.set_password("alice", "n3w-secret").unwrap();
		assert_eq!(users.password("alice").as_deref(), Some("n3w-secret"));
		assert_eq!(users.set_password("alice", "has space"), Err(Error::InvalidPassword));
	}

	#[test]
	fn test_non_ascii_password() {
		let (users, _) = fixture();
		users
			.add(CreateUserData { password: "pässwort", ..user("jürgen", "staff") })
			.unwrap();
		assert_eq!(users.password("jürgen").as_deref(), Some("pässwort"));

		users.set_password("jürgen", "密码").unwrap();
		assert_eq!(users.password("jürgen").as_deref(), Some("密码"));
	}

	#[test]
	fn test_getters_on_missing_user() {
		let (users, _) = fixture();
		assert!(!users.enabled("ghost"));
		assert!(!users.protected("ghost"));
		assert_eq!(users.group("ghost"), None);
		assert_eq!(users.password("ghost"), None);
		assert_eq!(users.get("ghost"), None);
	}

	#[test]
	fn test_setters_on_missing_user() {
		let (users, _) = fixture();
		assert_eq!(users.set_enabled("ghost", true), Err(Error::NotFound));
		assert_eq!(users.set_protected("ghost", true), Err(Error::NotFound));
		assert_eq!(users.set_group("ghost", "staff"), Err(Error::NotFound));
		assert_eq!(users.set_password("ghost", "secret"), Err(Error::NotFound));
	}

	#[test]
	fn test_flags() {
		let (users, _) = fixture();
		users.add(CreateUserData { disabled: true, ..user("alice", "staff") }).unwrap();
		assert!(!users.enabled("alice"));

		users.set_enabled("alice", true).unwrap();
		assert!(users.enabled("alice"));

		users.set_protected("alice", true).unwrap();
		let snapshot = users.get("alice").unwrap();
		assert!(snapshot.protected);
		assert!(snapshot.enabled);
		assert_eq!(snapshot.group.as_deref(), Some("staff"));
		assert_eq!(snapshot.password.as_deref(), Some("pa55word"));
	}

	#[test]
	fn test_set_group_does_not_check_existence() {
		let (users, _) = fixture();
		users.add(user("alice", "staff")).unwrap();
		users.set_group("alice", "elsewhere").unwrap();
		assert_eq!(users.group("alice").as_deref(), Some("elsewhere"));
		assert_eq!(users.set_group("alice", ""), Err(Error::InvalidName));
	}

	#[test]
	fn test_delete_protected() {
		let (users, _) = fixture();
		users.add(CreateUserData { protected: true, ..user("root", "staff") }).unwrap();
		assert_eq!(users.delete("root"), Err(Error::Protected));
		assert!(users.exists("root"));

		users.set_protected("root", false).unwrap();
		users.delete("root").unwrap();
		assert!(!users.exists("root"));
		assert_eq!(users.delete("root"), Err(Error::NotFound));
	}

	#[test]
	fn test_readd_after_delete() {
		let (users, _) = fixture();
		users.add(user("alice", "staff")).unwrap();
		users.delete("alice").unwrap();
		users.add(user("alice", "staff")).unwrap();
		assert_eq!(users.list().unwrap(), vec![Box::from("alice")]);
	}

	#[test]
	fn test_iteration() {
		let (users, _) = fixture();
		for name in ["carol", "alice", "bob"] {
			users.add(user(name, "staff")).unwrap();
		}
		users.delete("alice").unwrap();

		assert_eq!(users.first().unwrap().as_deref(), Some("carol"));
		assert_eq!(users.next("carol").unwrap().as_deref(), Some("bob"));
		assert_eq!(users.next("bob").unwrap(), None);
		assert_eq!(users.next("alice").unwrap(), None);
	}
}

// vim: ts=4
