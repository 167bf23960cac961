//! Repository layer abstractions and bundled persistence backends.
//!
//! # Responsibility
//! - Define the storage contract the rest of the core depends on.
//! - Ship an in-memory backend and a SQLite backend behind that contract.
//!
//! # Invariants
//! - Lookups report absence as `None`, never as an error.
//! - `update_*` is an upsert; `delete_*` of an unknown uuid is a no-op.
//! - `insert_*` reports storage-level rejection as `false`.
//! - Each mutation commits all fields of one entity or none.

pub mod memory_repo;
pub mod sqlite_repo;
pub mod todo_list_repo;
