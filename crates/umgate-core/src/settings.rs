//! Options of the user-management subsystem

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

use crate::obfuscate::{Obfuscator, DEFAULT_SECRET};
use crate::prelude::*;

/// Subsystem options.
///
/// Deserialisable so embedders can keep them in their own config file;
/// every field has a default.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct UmOpts {
	/// Name the database is opened under
	pub db_name: Box<str>,
	/// File hint passed to the record adapter on open
	pub db_file: PathBuf,
	/// Default target of commit and restore
	pub save_file: PathBuf,
	/// Password obfuscation secret. Change it per site.
	pub secret: Box<str>,
}

impl Default for UmOpts {
	fn default() -> Self {
		Self {
			db_name: "users".into(),
			db_file: PathBuf::from("um.json"),
			save_file: PathBuf::from("umconfig.json"),
			secret: DEFAULT_SECRET.into(),
		}
	}
}

impl fmt::Debug for UmOpts {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("UmOpts")
			.field("db_name", &self.db_name)
			.field("db_file", &self.db_file)
			.field("save_file", &self.save_file)
			.field("secret", &"<redacted>")
			.finish()
	}
}

impl UmOpts {
	pub fn validate(&self) -> ClResult<()> {
		if self.db_name.is_empty() {
			return Err(Error::ConfigError("db_name cannot be empty".into()));
		}
		if self.save_file.as_os_str().is_empty() {
			return Err(Error::ConfigError("save_file cannot be empty".into()));
		}
		if self.secret.is_empty() {
			return Err(Error::ConfigError("secret cannot be empty".into()));
		}
		Ok(())
	}

	pub fn obfuscator(&self) -> Obfuscator {
		Obfuscator::new(self.secret.as_bytes())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_are_valid() {
		let opts = UmOpts::default();
		assert!(opts.validate().is_ok());
		assert_eq!(opts.save_file, PathBuf::from("umconfig.json"));
	}

	#[test]
	fn test_validate_rejects_empty() {
		let opts = UmOpts { secret: "".into(), ..UmOpts::default() };
		assert!(matches!(opts.validate(), Err(Error::ConfigError(_))));

		let opts = UmOpts { save_file: PathBuf::new(), ..UmOpts::default() };
		assert!(matches!(opts.validate(), Err(Error::ConfigError(_))));
	}

	#[test]
	fn test_deserialize_partial() {
		let opts: UmOpts =
			serde_json::from_str(r#"{"save_file": "/var/lib/um/users.json"}"#).unwrap();
		assert_eq!(opts.save_file, PathBuf::from("/var/lib/um/users.json"));
		assert_eq!(opts.db_name.as_ref(), "users");
	}

	#[test]
	fn test_debug_redacts_secret() {
		let opts = UmOpts { secret: "hunter2".into(), ..UmOpts::default() };
		assert!(!format!("{:?}", opts).contains("hunter2"));
	}
}

// vim: ts=4
