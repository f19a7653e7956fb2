//! Static table descriptors of the three user-management tables.

use serde::Serialize;

use crate::types::ColumnType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnDef {
	pub name: &'static str,
	pub typ: ColumnType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableSchema {
	pub name: &'static str,
	pub columns: &'static [ColumnDef],
}

impl TableSchema {
	pub fn column(&self, name: &str) -> Option<(usize, &ColumnDef)> {
		self.columns.iter().enumerate().find(|(_, col)| col.name == name)
	}
}

const fn str_col(name: &'static str) -> ColumnDef {
	ColumnDef { name, typ: ColumnType::Str }
}

const fn int_col(name: &'static str) -> ColumnDef {
	ColumnDef { name, typ: ColumnType::Int }
}

pub const USERS_TABLE: &str = "users";
pub const GROUPS_TABLE: &str = "groups";
pub const ACCESS_TABLE: &str = "access";

pub const COL_NAME: &str = "name";
pub const COL_PASSWORD: &str = "password";
pub const COL_GROUP: &str = "group";
pub const COL_PROTECTED: &str = "protected";
pub const COL_DISABLED: &str = "disabled";
pub const COL_PRIVILEGE: &str = "privilege";
pub const COL_METHOD: &str = "method";
pub const COL_URL: &str = "url";
pub const COL_SECURE: &str = "secure";

pub const USERS: TableSchema = TableSchema {
	name: USERS_TABLE,
	columns: &[
		str_col(COL_NAME),
		str_col(COL_PASSWORD),
		str_col(COL_GROUP),
		int_col(COL_PROTECTED),
		int_col(COL_DISABLED),
	],
};

pub const GROUPS: TableSchema = TableSchema {
	name: GROUPS_TABLE,
	columns: &[
		str_col(COL_NAME),
		int_col(COL_PRIVILEGE),
		int_col(COL_METHOD),
		int_col(COL_PROTECTED),
		int_col(COL_DISABLED),
	],
};

pub const ACCESS_LIMITS: TableSchema = TableSchema {
	name: ACCESS_TABLE,
	columns: &[str_col(COL_URL), int_col(COL_METHOD), int_col(COL_SECURE), str_col(COL_GROUP)],
};

/// All tables in registration order
pub const ALL: [TableSchema; 3] = [USERS, GROUPS, ACCESS_LIMITS];


// vim: ts=4
