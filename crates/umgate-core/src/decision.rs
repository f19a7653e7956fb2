//! Allow/deny decision for a user requesting a URL.
//!
//! The checks run in a fixed order and the first failing one decides:
//! user state, then group state, then the resolved access limit. A URL with
//! no limit is granted without consulting any limit fields.

use std::fmt;

use crate::prelude::*;
use crate::registry::{AccessLimits, Groups, Users};
use crate::resolver;

/// Why access was granted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Allow {
	/// No access limit covers the URL
	Unrestricted,
	/// The named access limit permits the user
	Limit(Box<str>),
}

/// Why access was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
	UnknownUser,
	UserDisabled,
	NoPrivilege,
	GroupDisabled,
	GroupMethodNone,
	/// The governing limit hides the path
	PathHidden,
	/// The governing limit is restricted to another group
	GroupMismatch,
}

impl fmt::Display for Denial {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Denial::UnknownUser => write!(f, "unknown user"),
			Denial::UserDisabled => write!(f, "user disabled"),
			Denial::NoPrivilege => write!(f, "group has no privileges"),
			Denial::GroupDisabled => write!(f, "group disabled"),
			Denial::GroupMethodNone => write!(f, "group access method is NONE"),
			Denial::PathHidden => write!(f, "path access method is NONE"),
			Denial::GroupMismatch => write!(f, "path restricted to another group"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
	Allow(Allow),
	Deny(Denial),
}

impl Decision {
	pub fn is_allowed(&self) -> bool {
		matches!(self, Decision::Allow(_))
	}
}

/// Borrowed view of the three registries used to evaluate requests
#[derive(Debug, Clone, Copy)]
pub struct AccessPolicy<'a> {
	users: &'a Users,
	groups: &'a Groups,
	limits: &'a AccessLimits,
}

impl<'a> AccessPolicy<'a> {
	pub fn new(users: &'a Users, groups: &'a Groups, limits: &'a AccessLimits) -> Self {
		Self { users, groups, limits }
	}

	pub fn evaluate(&self, user: &str, url: &str) -> Decision {
		let decision = self.decide(user, url);
		match &decision {
			Decision::Allow(_) => trace!("UM: <{}> may access <{}>", user, url),
			Decision::Deny(reason) => debug!("UM: <{}> denied <{}>: {}", user, url, reason),
		}
		decision
	}

	pub fn can_access(&self, user: &str, url: &str) -> bool {
		self.evaluate(user, url).is_allowed()
	}

	fn decide(&self, user: &str, url: &str) -> Decision {
		if !self.users.exists(user) {
			return Decision::Deny(Denial::UnknownUser);
		}
		if !self.users.enabled(user) {
			return Decision::Deny(Denial::UserDisabled);
		}

		let group = self.users.group(user).unwrap_or_default();
		if self.groups.privilege(&group).is_none_or(Privilege::is_empty) {
			return Decision::Deny(Denial::NoPrivilege);
		}
		if !self.groups.enabled(&group) {
			return Decision::Deny(Denial::GroupDisabled);
		}
		if self.groups.method(&group) == AccessMethod::None {
			return Decision::Deny(Denial::GroupMethodNone);
		}

		let Some(limit) = resolver::resolve(self.limits, url) else {
			return Decision::Allow(Allow::Unrestricted);
		};
		if self.limits.method(&limit) == AccessMethod::None {
			return Decision::Deny(Denial::PathHidden);
		}
		if let Some(required) = self.limits.group(&limit) {
			if required != group {
				return Decision::Deny(Denial::GroupMismatch);
			}
		}
		Decision::Allow(Allow::Limit(limit))
	}
}


// vim: ts=4
