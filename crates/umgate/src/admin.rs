//! Administrative commands.
//!
//! Each command takes the decoded fields of an admin form and reports a
//! human-readable outcome. A command only runs when its `ok` field is "ok"
//! (any case); anything else cancels it.

use serde::{Deserialize, Serialize};

use crate::prelude::*;
use crate::types::{AccessLimit, Group, User};
use umgate_core::{CreateAccessLimitData, CreateGroupData, CreateUserData, UserManagement};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum AdminOutcome {
	Done(String),
	Cancelled(String),
	Failed(String),
}

impl AdminOutcome {
	pub fn message(&self) -> &str {
		match self {
			AdminOutcome::Done(msg) | AdminOutcome::Cancelled(msg) | AdminOutcome::Failed(msg) => {
				msg
			}
		}
	}

	pub fn is_done(&self) -> bool {
		matches!(self, AdminOutcome::Done(_))
	}
}

fn confirmed(ok: &str) -> bool {
	ok.eq_ignore_ascii_case("ok")
}

/// Leading integer of a form value, 0 when there is none
fn form_int(value: &str) -> i64 {
	let value = value.trim_start();
	let (sign, digits) = match value.strip_prefix('-') {
		Some(rest) => (-1, rest),
		None => (1, value.strip_prefix('+').unwrap_or(value)),
	};
	let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
	digits[..end].parse::<i64>().map_or(0, |n| sign * n)
}

fn form_method(value: &str) -> AccessMethod {
	if value.is_empty() { AccessMethod::Full } else { AccessMethod::from_code(form_int(value)) }
}

// Forms //
//*******//
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddUserForm {
	pub user: String,
	pub password: String,
	pub passconf: String,
	pub group: String,
	pub enabled: String,
	pub ok: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserForm {
	pub user: String,
	pub ok: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddGroupForm {
	pub group: String,
	pub method: String,
	pub enabled: String,
	/// Space-delimited privilege flag values
	pub privilege: String,
	pub ok: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GroupForm {
	pub group: String,
	pub ok: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddAccessLimitForm {
	pub url: String,
	pub group: String,
	pub method: String,
	pub secure: String,
	pub ok: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AccessLimitForm {
	pub url: String,
	pub ok: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfirmForm {
	pub ok: String,
}

// Users //
//*******//
pub fn add_user(um: &UserManagement, form: &AddUserForm) -> AdminOutcome {
	if !confirmed(&form.ok) {
		return AdminOutcome::Cancelled("Add User Cancelled".into());
	}
	if form.password != form.passconf {
		return AdminOutcome::Failed("Confirmation Password did not match.".into());
	}

	let res = um.users().add(CreateUserData {
		name: &form.user,
		password: &form.password,
		group: &form.group,
		protected: false,
		disabled: form.enabled != "on",
	});
	match res {
		Ok(()) => AdminOutcome::Done(format!("User, \"{}\" was successfully added.", form.user)),
		Err(err) => {
			let reason = match err {
				Error::DuplicateKey => "User already exists.",
				Error::InvalidName => "Invalid user name.",
				Error::InvalidPassword => "Invalid password.",
				Error::ReferenceNotFound => "Invalid or unselected group.",
				_ => "Error writing user record.",
			};
			AdminOutcome::Failed(format!("Unable to add user, \"{}\".  {}", form.user, reason))
		}
	}
}

pub fn delete_user(um: &UserManagement, form: &UserForm) -> AdminOutcome {
	if !confirmed(&form.ok) {
		return AdminOutcome::Cancelled("Delete User Cancelled".into());
	}
	match um.users().delete(&form.user) {
		Ok(()) => AdminOutcome::Done(format!("User, \"{}\" was successfully deleted.", form.user)),
		Err(Error::NotFound) => {
			AdminOutcome::Failed(format!("ERROR: User \"{}\" not found", form.user))
		}
		Err(Error::Protected) => {
			AdminOutcome::Failed(format!("ERROR: User, \"{}\" is delete-protected.", form.user))
		}
		Err(err) => {
			warn!("UM: delete of user <{}> failed: {}", form.user, err);
			AdminOutcome::Failed(format!("ERROR: Unable to delete user, \"{}\" ", form.user))
		}
	}
}

pub fn display_user(um: &UserManagement, form: &UserForm) -> AdminOutcome {
	if !confirmed(&form.ok) {
		return AdminOutcome::Cancelled("Display User Cancelled".into());
	}
	let Some(user) = um.users().get(&form.user) else {
		return AdminOutcome::Failed(format!("ERROR: User {} not found.", form.user));
	};
	AdminOutcome::Done(format!(
		"User ID: {}\nUser Group: {}\nEnabled: {}",
		user.name,
		user.group.as_deref().unwrap_or(""),
		u8::from(user.enabled)
	))
}

// Groups //
//********//
pub fn add_group(um: &UserManagement, form: &AddGroupForm) -> AdminOutcome {
	if !confirmed(&form.ok) {
		return AdminOutcome::Cancelled("Add Group Cancelled.".into());
	}
	if form.group.is_empty() {
		return AdminOutcome::Failed("No Group Name was entered.".into());
	}
	if um.groups().exists(&form.group) {
		return AdminOutcome::Failed(format!("ERROR: Group, \"{}\" already exists.", form.group));
	}

	let res = um.groups().add(CreateGroupData {
		name: &form.group,
		privilege: Privilege::parse_list(&form.privilege),
		method: form_method(&form.method),
		protected: false,
		disabled: form.enabled != "on",
	});
	match res {
		Ok(()) => AdminOutcome::Done(format!("Group, \"{}\" was successfully added.", form.group)),
		Err(err) => {
			AdminOutcome::Failed(format!("Unable to add group, \"{}\": {}", form.group, err))
		}
	}
}

pub fn delete_group(um: &UserManagement, form: &GroupForm) -> AdminOutcome {
	if !confirmed(&form.ok) {
		return AdminOutcome::Cancelled("Delete Group Cancelled.".into());
	}
	if form.group.is_empty() {
		return AdminOutcome::Failed("ERROR: No group was selected.".into());
	}
	match um.groups().delete(&form.group) {
		Ok(()) => {
			AdminOutcome::Done(format!("Group, \"{}\" was successfully deleted.", form.group))
		}
		Err(Error::Protected) => {
			AdminOutcome::Failed(format!("ERROR: Group, \"{}\" is delete-protected.", form.group))
		}
		Err(Error::InUse) => {
			AdminOutcome::Failed(format!("ERROR: Group, \"{}\" is being used.", form.group))
		}
		Err(err) => {
			warn!("UM: delete of group <{}> failed: {}", form.group, err);
			AdminOutcome::Failed(format!("ERROR: Unable to delete group, \"{}\" ", form.group))
		}
	}
}

// Access limits //
//***************//
pub fn add_access_limit(um: &UserManagement, form: &AddAccessLimitForm) -> AdminOutcome {
	if !confirmed(&form.ok) {
		return AdminOutcome::Cancelled("Add Access Limit Cancelled.".into());
	}
	if form.url.is_empty() {
		return AdminOutcome::Failed("ERROR:  No URL was entered.".into());
	}
	if um.access_limits().exists(&form.url) {
		return AdminOutcome::Failed(format!(
			"ERROR:  An Access Limit for [{}] already exists.",
			form.url
		));
	}

	let res = um.access_limits().add(CreateAccessLimitData {
		url: &form.url,
		method: form_method(&form.method),
		secure: form_int(&form.secure) != 0,
		group: Some(form.group.as_str()),
	});
	match res {
		Ok(()) => AdminOutcome::Done(format!(
			"Access limit for [{}], was successfully added.",
			form.url
		)),
		Err(err) => {
			warn!("UM: adding access limit <{}> failed: {}", form.url, err);
			AdminOutcome::Failed(format!("Unable to add Access Limit for [{}]", form.url))
		}
	}
}

pub fn delete_access_limit(um: &UserManagement, form: &AccessLimitForm) -> AdminOutcome {
	if !confirmed(&form.ok) {
		return AdminOutcome::Cancelled("Delete Access Limit Cancelled".into());
	}
	match um.access_limits().delete(&form.url) {
		Ok(()) => AdminOutcome::Done(format!(
			"Access Limit for [{}], was successfully deleted.",
			form.url
		)),
		Err(_) => AdminOutcome::Failed(format!(
			"ERROR: Unable to delete Access Limit for [{}]",
			form.url
		)),
	}
}

// Persistence //
//*************//
pub fn save(um: &UserManagement, form: &ConfirmForm) -> AdminOutcome {
	if !confirmed(&form.ok) {
		return AdminOutcome::Cancelled("Save Cancelled.".into());
	}
	match um.commit(None) {
		Ok(()) => AdminOutcome::Done("User configuration was saved successfully.".into()),
		Err(err) => {
			error!("UM: saving user configuration failed: {}", err);
			AdminOutcome::Failed("ERROR: Unable to save user configuration.".into())
		}
	}
}

pub fn load(um: &UserManagement, form: &ConfirmForm) -> AdminOutcome {
	if !confirmed(&form.ok) {
		return AdminOutcome::Cancelled("Load Cancelled.".into());
	}
	match um.restore(None) {
		Ok(()) => AdminOutcome::Done("User configuration was re-loaded successfully.".into()),
		Err(err) => {
			error!("UM: loading user configuration failed: {}", err);
			AdminOutcome::Failed("ERROR: Unable to load user configuration.".into())
		}
	}
}

// Listings //
//**********//
pub fn list_users(um: &UserManagement) -> ClResult<Vec<User>> {
	Ok(um.users().list()?.iter().filter_map(|name| um.users().get(name)).collect())
}

pub fn list_groups(um: &UserManagement) -> ClResult<Vec<Group>> {
	Ok(um.groups().list()?.iter().filter_map(|name| um.groups().get(name)).collect())
}

pub fn list_access_limits(um: &UserManagement) -> ClResult<Vec<AccessLimit>> {
	Ok(um.access_limits().list()?.iter().filter_map(|url| um.access_limits().get(url)).collect())
}

/// Selectable access methods with their display names
pub fn method_options() -> Vec<(AccessMethod, &'static str)> {
	AccessMethod::ALL
		.iter()
		.map(|&am| match am {
			AccessMethod::None => (am, "NO ACCESS"),
			_ => (am, am.label()),
		})
		.collect()
}

/// Selectable privilege flags with their display names
pub fn privilege_options() -> &'static [(Privilege, &'static str)] {
	&Privilege::FLAGS
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_form_int() {
		assert_eq!(form_int("3"), 3);
		assert_eq!(form_int(" 12abc"), 12);
		assert_eq!(form_int("-2"), -2);
		assert_eq!(form_int("x"), 0);
		assert_eq!(form_int(""), 0);
	}

	#[test]
	fn test_form_method() {
		assert_eq!(form_method(""), AccessMethod::Full);
		assert_eq!(form_method("3"), AccessMethod::Digest);
		assert_eq!(form_method("0"), AccessMethod::None);
		assert_eq!(form_method("junk"), AccessMethod::None);
		assert_eq!(form_method("9"), AccessMethod::Invalid);
	}

	#[test]
	fn test_confirmed() {
		assert!(confirmed("ok"));
		assert!(confirmed("OK"));
		assert!(!confirmed(""));
		assert!(!confirmed("cancel"));
	}

	#[test]
	fn test_method_options() {
		let options = method_options();
		assert_eq!(options.first(), Some(&(AccessMethod::Full, "FULL ACCESS")));
		assert_eq!(options.last(), Some(&(AccessMethod::None, "NO ACCESS")));
		assert_eq!(privilege_options().len(), 3);
	}
}

// vim: ts=4
