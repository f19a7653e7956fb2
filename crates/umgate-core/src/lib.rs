//! Access-control core of umgate.
//!
//! Users belong to groups, groups carry privileges and an access method, and
//! access limits attach rules to URL prefixes. All three live as tables in one
//! record store shared through a reference-counted [`StoreLifecycle`].

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod decision;
pub mod enumerator;
pub mod lifecycle;
pub mod obfuscate;
pub mod prelude;
pub mod registry;
pub mod resolver;
pub mod session;
pub mod settings;
pub mod store;

pub use decision::{AccessPolicy, Allow, Decision, Denial};
pub use lifecycle::StoreLifecycle;
pub use obfuscate::Obfuscator;
pub use registry::{
	AccessLimits, CreateAccessLimitData, CreateGroupData, CreateUserData, Groups, Users,
};
pub use session::UserManagement;
pub use settings::UmOpts;
pub use store::Store;


// vim: ts=4
