//! Longest-prefix lookup of the access limit governing a URL.
//!
//! Candidates are produced by walking the URL upward, alternately dropping
//! trailing separators and popping the last segment, so both `/a/b/` and
//! `/a/b` are tried before `/a/`. Both `/` and `\` count as separators.

use crate::prelude::*;
use crate::registry::{AccessLimits, Groups};

fn is_separator(c: char) -> bool {
	c == '/' || c == '\\'
}

/// Candidate limit keys for a URL, longest first
#[derive(Debug, Clone)]
pub struct UrlAncestors<'a> {
	rest: &'a str,
}

impl<'a> UrlAncestors<'a> {
	pub fn new(url: &'a str) -> Self {
		Self { rest: url }
	}
}

impl<'a> Iterator for UrlAncestors<'a> {
	type Item = &'a str;

	fn next(&mut self) -> Option<&'a str> {
		if self.rest.is_empty() {
			return None;
		}
		let current = self.rest;
		self.rest = if current.ends_with(is_separator) {
			current.trim_end_matches(is_separator)
		} else {
			current.trim_end_matches(|c| !is_separator(c))
		};
		Some(current)
	}
}

/// Key of the access limit governing `url`, if any
pub fn resolve(limits: &AccessLimits, url: &str) -> Option<Box<str>> {
	let found = UrlAncestors::new(url).find(|candidate| limits.exists(candidate)).map(Box::from);
	trace!("UM: access limit for <{}>: {:?}", url, found);
	found
}

/// Effective access method for `url`.
///
/// A limit restricted to a group takes that group's method, `Invalid` when
/// the group does not exist. An unrestricted limit uses its own method. URLs
/// without a limit are `Full`.
pub fn method_for(limits: &AccessLimits, groups: &Groups, url: &str) -> AccessMethod {
	let Some(limit) = resolve(limits, url) else {
		return AccessMethod::Full;
	};
	match limits.group(&limit) {
		Some(group) => groups.method(&group),
		None => limits.method(&limit),
	}
}


// vim: ts=4
