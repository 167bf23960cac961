//! Domain model for todo lists, headers, items and read-time sections.
//!
//! # Responsibility
//! - Define immutable value types shared by repositories, interactors and
//!   list composition.
//! - Provide the ordering key (`position`) used by every display surface.
//!
//! # Invariants
//! - Every entity is identified by a non-blank `uuid` that never changes.
//! - `position` is a non-negative integer; equal positions are legal.
//! - Entities are only changed by building a new value; fields are read-only
//!   outside this module.

pub mod todo_list;
