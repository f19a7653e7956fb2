//! Key traversal over tables that may contain tombstones.
//!
//! The store has no stable cursor across mutations, so `next_key` re-locates
//! the previous key by scanning from row 0. Deleted rows and blank keys are
//! skipped silently; only genuine store faults surface as errors. Order is the
//! store's row order, not sorted order.
//!
//! Deleting the row currently being enumerated invalidates the traversal:
//! restart from `first_key`.

use crate::prelude::*;

/// Outcome of looking for the key after a given one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextKey {
	Found(Box<str>),
	/// The previous key was found but no different non-blank key follows it
	NoSuccessor,
	/// The previous key is not (or no longer) in the table
	AnchorNotFound,
}

impl NextKey {
	pub fn into_key(self) -> Option<Box<str>> {
		match self {
			NextKey::Found(key) => Some(key),
			NextKey::NoSuccessor | NextKey::AnchorNotFound => None,
		}
	}
}

/// Live, non-blank keys of one column in row order
#[derive(Debug)]
pub struct LiveKeys<'a> {
	store: &'a Store,
	table: &'a str,
	column: &'a str,
	row: RowId,
	done: bool,
}

impl<'a> LiveKeys<'a> {
	pub fn new(store: &'a Store, table: &'a str, column: &'a str) -> Self {
		Self { store, table, column, row: RowId(0), done: false }
	}
}

impl Iterator for LiveKeys<'_> {
	type Item = ClResult<Box<str>>;

	fn next(&mut self) -> Option<Self::Item> {
		while !self.done {
			let row = self.row;
			self.row = row.next();
			match self.store.read_str(self.table, self.column, row) {
				Ok(key) if !key.is_empty() => return Some(Ok(key)),
				Ok(_) | Err(RecordFault::RowDeleted) => {}
				Err(RecordFault::RowOutOfRange) => self.done = true,
				Err(fault) => {
					self.done = true;
					return Some(Err(fault.into()));
				}
			}
		}
		None
	}
}

pub fn first_key(store: &Store, table: &str, column: &str) -> ClResult<Option<Box<str>>> {
	LiveKeys::new(store, table, column).next().transpose()
}

pub fn next_key(store: &Store, table: &str, column: &str, after: &str) -> ClResult<NextKey> {
	let mut keys = LiveKeys::new(store, table, column);

	loop {
		match keys.next() {
			None => return Ok(NextKey::AnchorNotFound),
			Some(Err(err)) => return Err(err),
			Some(Ok(key)) if *key == *after => break,
			Some(Ok(_)) => {}
		}
	}

	for key in keys {
		let key = key?;
		if *key != *after {
			return Ok(NextKey::Found(key));
		}
	}
	Ok(NextKey::NoSuccessor)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Arc;
	use umgate_record_adapter_mem::RecordAdapterMem;
	use umgate_types::record_adapter::RecordAdapter;
	use umgate_types::schema::{self, COL_NAME, USERS_TABLE};

	fn store_with(names: &[&str]) -> Store {
		let adapter = Arc::new(RecordAdapterMem::new());
		let db = adapter.open("users", None).unwrap();
		adapter.register_schema(db, &schema::USERS).unwrap();
		let store = Store::new(adapter, db);
		for name in names {
			let row = store.add_row(USERS_TABLE).unwrap();
			store.write(USERS_TABLE, COL_NAME, row, (*name).into()).unwrap();
		}
		store
	}

	fn next(store: &Store, after: &str) -> NextKey {
		next_key(store, USERS_TABLE, COL_NAME, after).unwrap()
	}

	#[test]
	fn test_empty_table() {
		let store = store_with(&[]);
		assert_eq!(first_key(&store, USERS_TABLE, COL_NAME), Ok(None));
		assert_eq!(next(&store, "alice"), NextKey::AnchorNotFound);
	}

	#[test]
	fn test_insertion_order() {
		let store = store_with(&["carol", "alice", "bob"]);
		assert_eq!(first_key(&store, USERS_TABLE, COL_NAME), Ok(Some("carol".into())));
		assert_eq!(next(&store, "carol"), NextKey::Found("alice".into()));
		assert_eq!(next(&store, "alice"), NextKey::Found("bob".into()));
		assert_eq!(next(&store, "bob"), NextKey::NoSuccessor);
	}

	#[test]
	fn test_first_is_idempotent() {
		let store = store_with(&["alice", "bob"]);
		let a = first_key(&store, USERS_TABLE, COL_NAME).unwrap();
		let b = first_key(&store, USERS_TABLE, COL_NAME).unwrap();
		assert_eq!(a, b);
	}

	#[test]
	fn test_skips_blank_and_deleted_rows() {
		let store = store_with(&["", "alice", "bob", "", "carol"]);
		store.delete_row(USERS_TABLE, RowId(2)).unwrap();

		assert_eq!(first_key(&store, USERS_TABLE, COL_NAME), Ok(Some("alice".into())));
		assert_eq!(next(&store, "alice"), NextKey::Found("carol".into()));
		assert_eq!(next(&store, "bob"), NextKey::AnchorNotFound);
	}

	#[test]
	fn test_deleted_first_row() {
		let store = store_with(&["alice", "bob"]);
		store.delete_row(USERS_TABLE, RowId(0)).unwrap();
		assert_eq!(first_key(&store, USERS_TABLE, COL_NAME), Ok(Some("bob".into())));
	}

	#[test]
	fn test_successor_deleted_between_calls() {
		let store = store_with(&["alice", "bob", "carol"]);
		let first = first_key(&store, USERS_TABLE, COL_NAME).unwrap().unwrap();
		store.delete_row(USERS_TABLE, RowId(1)).unwrap();
		assert_eq!(next(&store, &first), NextKey::Found("carol".into()));

		store.delete_row(USERS_TABLE, RowId(2)).unwrap();
		assert_eq!(next(&store, &first), NextKey::NoSuccessor);
	}

	#[test]
	fn test_duplicate_keys_are_passed_over() {
		let store = store_with(&["alice", "alice", "bob"]);
		assert_eq!(next(&store, "alice"), NextKey::Found("bob".into()));
	}

	#[test]
	fn test_hard_fault_propagates() {
		let store = store_with(&["alice"]);
		let res = first_key(&store, USERS_TABLE, "no_such_column");
		assert_eq!(res, Err(Error::StoreFault(RecordFault::UnknownColumn("no_such_column".into()))));
		assert!(next_key(&store, "no_such_table", COL_NAME, "alice").is_err());
	}

	#[test]
	fn test_into_key() {
		assert_eq!(NextKey::Found("a".into()).into_key(), Some("a".into()));
		assert_eq!(NextKey::NoSuccessor.into_key(), None);
		assert_eq!(NextKey::AnchorNotFound.into_key(), None);
	}
}

// vim: ts=4
