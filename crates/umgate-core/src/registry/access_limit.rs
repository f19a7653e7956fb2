//! Access limits registry
//!
//! An access limit attaches a method, a TLS requirement and optionally a
//! group to a URL prefix. The URL is stored verbatim and is the key.

use umgate_types::schema::{ACCESS_TABLE, COL_GROUP, COL_METHOD, COL_SECURE, COL_URL};
use umgate_types::types::AccessLimit;

use super::{non_empty, TableView};
use crate::prelude::*;

/// Data needed to create a new access limit
#[derive(Debug, Clone, Copy)]
pub struct CreateAccessLimitData<'a> {
	pub url: &'a str,
	pub method: AccessMethod,
	pub secure: bool,
	/// `None` or empty means any authenticated user
	pub group: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct AccessLimits {
	limits: TableView,
}

impl AccessLimits {
	pub fn new(store: Store) -> Self {
		Self { limits: TableView::new(store, ACCESS_TABLE, COL_URL) }
	}

	pub fn exists(&self, url: &str) -> bool {
		self.limits.exists(url)
	}

	/// Add a limit. The group is stored as given and not checked against the
	/// groups table.
	pub fn add(&self, data: CreateAccessLimitData<'_>) -> ClResult<()> {
		debug!("UM: Adding Access Limit for <{}>", data.url);

		if self.limits.row(data.url)?.is_some() {
			return Err(Error::DuplicateKey);
		}
		if data.url.is_empty() {
			return Err(Error::InvalidName);
		}

		self.limits.insert(
			data.url,
			vec![
				(COL_METHOD, data.method.code().into()),
				(COL_SECURE, data.secure.into()),
				(COL_GROUP, data.group.unwrap_or("").into()),
			],
		)?;
		info!("UM: added access limit for <{}> ({})", data.url, data.method);
		Ok(())
	}

	pub fn delete(&self, url: &str) -> ClResult<()> {
		debug!("UM: Deleting Access Limit for <{}>", url);
		self.limits.delete(url)?;
		info!("UM: deleted access limit for <{}>", url);
		Ok(())
	}

	pub fn first(&self) -> ClResult<Option<Box<str>>> {
		self.limits.first()
	}

	pub fn next(&self, after: &str) -> ClResult<Option<Box<str>>> {
		self.limits.next(after)
	}

	pub fn list(&self) -> ClResult<Vec<Box<str>>> {
		self.limits.keys()
	}

	pub fn get(&self, url: &str) -> Option<AccessLimit> {
		if !self.exists(url) {
			return None;
		}
		Some(AccessLimit {
			url: url.into(),
			method: self.method(url),
			secure: self.secure(url).unwrap_or(false),
			group: self.group(url),
		})
	}

	/// `Invalid` for unknown URLs
	pub fn method(&self, url: &str) -> AccessMethod {
		self.limits.read_int(url, COL_METHOD).map_or(AccessMethod::Invalid, AccessMethod::from_code)
	}

	pub fn set_method(&self, url: &str, method: AccessMethod) -> ClResult<()> {
		self.limits.write(url, COL_METHOD, method.code().into())
	}

	pub fn secure(&self, url: &str) -> Option<bool> {
		self.limits.read_flag(url, COL_SECURE)
	}

	pub fn set_secure(&self, url: &str, secure: bool) -> ClResult<()> {
		self.limits.write(url, COL_SECURE, secure.into())
	}

	pub fn group(&self, url: &str) -> Option<Box<str>> {
		non_empty(self.limits.read_str(url, COL_GROUP))
	}

	/// An empty group clears the restriction
	pub fn set_group(&self, url: &str, group: &str) -> ClResult<()> {
		self.limits.write(url, COL_GROUP, group.into())
	}
}


// vim: ts=4
