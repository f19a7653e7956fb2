pub use umgate_core::prelude::*;

pub use crate::app::{Um, UmState};

// vim: ts=4
