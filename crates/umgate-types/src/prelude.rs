pub use crate::error::{ClResult, Error, RecordFault};
pub use crate::types::{AccessMethod, DbId, FieldValue, Privilege, RowId};

pub use tracing::{debug, error, info, trace, warn};

// vim: ts=4
