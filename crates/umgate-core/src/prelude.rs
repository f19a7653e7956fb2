pub use umgate_types::prelude::*;

pub use crate::store::Store;

// vim: ts=4
