//! umgate is a small user-management and URL access-control layer for
//! embedded web servers.
//!
//! # Features
//!
//! - Users, groups and access limits kept in a pluggable record store
//! - Longest-prefix access limits over URL paths
//! - Ordered allow/deny decisions with a reason for every denial
//! - Form-equivalent admin commands
//! - axum middleware enforcing the policy per request

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

// Re-export shared types and the adapter trait from umgate-types
pub use umgate_types::error;
pub use umgate_types::record_adapter;
pub use umgate_types::schema;
pub use umgate_types::types;
pub use umgate_types::utils;

pub use umgate_core as core;

pub mod admin;
pub mod app;
pub mod middleware;
pub mod prelude;

pub use app::{Um, UmBuilder, UmState};
pub use middleware::{require_access, AuthUser};
pub use umgate_core::{
	AccessLimits, CreateAccessLimitData, CreateGroupData, CreateUserData, Decision, Groups, UmOpts,
	UserManagement, Users,
};

// vim: ts=4
