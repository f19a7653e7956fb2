//! Common types used throughout umgate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle of an open database inside a record adapter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DbId(pub u32);

impl fmt::Display for DbId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Row index inside one table. Not stable across restore.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowId(pub u32);

impl RowId {
	pub fn next(self) -> Self {
		RowId(self.0.saturating_add(1))
	}
}

impl fmt::Display for RowId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

// AccessMethod //
//**************//
/// How a path may be reached.
///
/// `Basic` and `Digest` only matter by identity here. `Invalid` is the
/// sentinel for "no such group/limit" and never grants anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccessMethod {
	None,
	Full,
	Basic,
	Digest,
	Invalid,
}

impl AccessMethod {
	pub const ALL: [AccessMethod; 4] =
		[AccessMethod::Full, AccessMethod::Basic, AccessMethod::Digest, AccessMethod::None];

	/// Integer code as persisted in the method columns
	pub fn code(self) -> i64 {
		match self {
			AccessMethod::None => 0,
			AccessMethod::Full => 1,
			AccessMethod::Basic => 2,
			AccessMethod::Digest => 3,
			AccessMethod::Invalid => 4,
		}
	}

	/// Unknown codes map to `Invalid`
	pub fn from_code(code: i64) -> Self {
		match code {
			0 => AccessMethod::None,
			1 => AccessMethod::Full,
			2 => AccessMethod::Basic,
			3 => AccessMethod::Digest,
			_ => AccessMethod::Invalid,
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			AccessMethod::None => "NONE",
			AccessMethod::Full => "FULL ACCESS",
			AccessMethod::Basic => "BASIC ACCESS",
			AccessMethod::Digest => "DIGEST ACCESS",
			AccessMethod::Invalid => "INVALID",
		}
	}
}

impl fmt::Display for AccessMethod {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

// Privilege //
//***********//
/// Capability bitmask of a group. Any set bit counts as "some privilege".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Privilege(pub u16);

impl Privilege {
	pub const NONE: Privilege = Privilege(0x00);
	pub const READ: Privilege = Privilege(0x01);
	pub const WRITE: Privilege = Privilege(0x02);
	pub const ADMIN: Privilege = Privilege(0x04);

	pub const FLAGS: [(Privilege, &'static str); 3] = [
		(Privilege::READ, "READ"),
		(Privilege::WRITE, "EXECUTE"),
		(Privilege::ADMIN, "ADMINISTRATE"),
	];

	pub fn is_empty(self) -> bool {
		self.0 == 0
	}

	pub fn contains(self, other: Privilege) -> bool {
		self.0 & other.0 == other.0
	}

	/// Parse a space-delimited list of numeric flag values, OR-ing them together.
	///
	/// Non-numeric items count as zero, so `"1 x 4"` is `READ | ADMIN`.
	pub fn parse_list(list: &str) -> Privilege {
		list.split(' ')
			.map(|item| item.trim().parse::<u16>().unwrap_or(0))
			.fold(Privilege::NONE, |acc, bits| acc | Privilege(bits))
	}

	/// Stored as an integer column. Out-of-range values are truncated to the
	/// low 16 bits like any other short field.
	pub fn from_code(code: i64) -> Self {
		#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
		Privilege(code as u16)
	}

	pub fn code(self) -> i64 {
		i64::from(self.0)
	}
}

impl std::ops::BitOr for Privilege {
	type Output = Privilege;

	fn bitor(self, rhs: Privilege) -> Privilege {
		Privilege(self.0 | rhs.0)
	}
}

impl std::ops::BitOrAssign for Privilege {
	fn bitor_assign(&mut self, rhs: Privilege) {
		self.0 |= rhs.0;
	}
}

// Field values //
//**************//
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
	Str,
	Int,
}

/// A typed cell value as exchanged with the record adapter
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
	Int(i64),
	Str(Box<str>),
}

impl FieldValue {
	pub fn column_type(&self) -> ColumnType {
		match self {
			FieldValue::Str(_) => ColumnType::Str,
			FieldValue::Int(_) => ColumnType::Int,
		}
	}

	/// Zero value a freshly added row carries in a column of the given type
	pub fn empty(typ: ColumnType) -> Self {
		match typ {
			ColumnType::Str => FieldValue::Str("".into()),
			ColumnType::Int => FieldValue::Int(0),
		}
	}
}

impl From<&str> for FieldValue {
	fn from(s: &str) -> Self {
		FieldValue::Str(s.into())
	}
}

impl From<i64> for FieldValue {
	fn from(i: i64) -> Self {
		FieldValue::Int(i)
	}
}

impl From<bool> for FieldValue {
	fn from(b: bool) -> Self {
		FieldValue::Int(i64::from(b))
	}
}

// Entity snapshots //
//******************//
/// Owned copy of a user row. The password is the de-obfuscated text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct User {
	pub name: Box<str>,
	#[serde(skip_serializing)]
	pub password: Option<Box<str>>,
	pub group: Option<Box<str>>,
	pub protected: bool,
	pub enabled: bool,
}

/// Owned copy of a group row
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Group {
	pub name: Box<str>,
	pub privilege: Privilege,
	pub method: AccessMethod,
	pub protected: bool,
	pub enabled: bool,
}

/// Owned copy of an access limit row. An empty group is stored as `None`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AccessLimit {
	pub url: Box<str>,
	pub method: AccessMethod,
	pub secure: bool,
	pub group: Option<Box<str>>,
}


// vim: ts=4
