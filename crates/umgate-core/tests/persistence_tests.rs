//! Commit and restore of the user-management tables

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;
use umgate_core::{
	CreateAccessLimitData, CreateGroupData, CreateUserData, StoreLifecycle, UmOpts, UserManagement,
};
use umgate_record_adapter_mem::RecordAdapterMem;
use umgate_types::types::{AccessMethod, Privilege};

fn lifecycle(save_file: &Path) -> Arc<StoreLifecycle> {
	let opts = UmOpts { save_file: save_file.to_path_buf(), ..UmOpts::default() };
	Arc::new(StoreLifecycle::new(Arc::new(RecordAdapterMem::new()), opts))
}

fn populate(um: &UserManagement) {
	um.groups()
		.add(CreateGroupData {
			name: "admins",
			privilege: Privilege::ADMIN,
			method: AccessMethod::Basic,
			protected: true,
			disabled: false,
		})
		.expect("Failed to add group");
	um.users()
		.add(CreateUserData {
			name: "alice",
			password: "s3cret",
			group: "admins",
			protected: false,
			disabled: false,
		})
		.expect("Failed to add user");
	um.access_limits()
		.add(CreateAccessLimitData {
			url: "/admin",
			method: AccessMethod::Digest,
			secure: true,
			group: Some("admins"),
		})
		.expect("Failed to add access limit");
}

#[test]
fn test_commit_then_restore_in_new_process() {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let path = temp_dir.path().join("umconfig.json");

	{
		let um = UserManagement::open(lifecycle(&path)).expect("Failed to open session");
		populate(&um);
		um.commit(None).expect("Failed to commit");
	}
	assert!(path.exists());

	let um = UserManagement::open(lifecycle(&path)).expect("Failed to open session");
	assert!(!um.users().exists("alice"));
	um.restore(None).expect("Failed to restore");

	assert_eq!(um.users().password("alice").as_deref(), Some("s3cret"));
	assert!(um.groups().protected("admins"));
	assert_eq!(um.access_limits().secure("/admin"), Some(true));
	assert_eq!(um.method_for("/admin/users"), AccessMethod::Basic);
	assert!(um.can_access("alice", "/admin/users"));
}

#[test]
fn test_restore_replaces_instead_of_appending() {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let path = temp_dir.path().join("umconfig.json");

	let um = UserManagement::open(lifecycle(&path)).expect("Failed to open session");
	populate(&um);
	um.commit(None).expect("Failed to commit");

	um.users().delete("alice").expect("Failed to delete user");
	um.restore(None).expect("Failed to restore");
	um.restore(None).expect("Failed to restore twice");

	assert_eq!(um.users().list().expect("list"), vec![Box::from("alice")]);
	assert_eq!(um.groups().list().expect("list"), vec![Box::from("admins")]);
}

#[test]
fn test_commit_to_explicit_file_is_remembered() {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let default_path = temp_dir.path().join("umconfig.json");
	let other_path = temp_dir.path().join("backup.json");

	let um = UserManagement::open(lifecycle(&default_path)).expect("Failed to open session");
	populate(&um);
	um.commit(Some(other_path.as_path())).expect("Failed to commit");
	um.commit(None).expect("Failed to commit again");

	assert!(other_path.exists());
	assert!(!default_path.exists());
}

#[test]
fn test_restore_missing_file_fails() {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let um = UserManagement::open(lifecycle(&temp_dir.path().join("missing.json")))
		.expect("Failed to open session");
	assert!(um.restore(None).is_err());
}

// vim: ts=4
