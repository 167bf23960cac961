//! Todo list repository contract.
//!
//! # Responsibility
//! - Provide lookup, insert, upsert and delete entry points for lists,
//!   headers and items.
//! - Assemble read-time sections for one list.
//!
//! # Invariants
//! - Implementations must be usable from several worker threads at once.
//! - A reader never observes a half-written entity.
//! - Section and item order returned by `get_sections_of_todo_list_id` is
//!   unspecified; callers sort by position.

use crate::db::DbError;
use crate::model::todo_list::{TodoList, TodoListHeader, TodoListItem, TodoListSection};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage-layer error for todo list persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Persisted data cannot be converted back to a domain value.
    InvalidData(String),
    /// A writer panicked while holding the storage lock.
    Poisoned,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted todo data: {message}"),
            Self::Poisoned => write!(f, "repository lock poisoned"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
            Self::Poisoned => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface used by interactors and list composition.
pub trait TodoListRepository: Send + Sync {
    fn get_todo_list_by_id(&self, uuid: &str) -> RepoResult<Option<TodoList>>;
    fn get_header_by_id(&self, uuid: &str) -> RepoResult<Option<TodoListHeader>>;
    fn get_item_by_id(&self, uuid: &str) -> RepoResult<Option<TodoListItem>>;
    /// Lists every todo list in arrival order.
    fn get_all_todo_lists(&self) -> RepoResult<Vec<TodoList>>;
    /// Returns headers of one list, each with its items.
    fn get_sections_of_todo_list_id(&self, list_id: &str) -> RepoResult<Vec<TodoListSection>>;

    /// Inserts a new list; `false` when storage rejects the row.
    fn insert_todo_list(&self, list: &TodoList) -> bool;
    /// Inserts a new header; `false` when storage rejects the row.
    fn insert_header(&self, header: &TodoListHeader) -> bool;
    /// Inserts a new item; `false` when storage rejects the row.
    fn insert_item(&self, item: &TodoListItem) -> bool;

    /// Creates the list, or overwrites every field of the existing one.
    fn update_todo_list(&self, list: &TodoList) -> RepoResult<()>;
    /// Creates the header, or overwrites every field of the existing one.
    fn update_header(&self, header: &TodoListHeader) -> RepoResult<()>;
    /// Creates the item, or overwrites every field of the existing one.
    fn update_item(&self, item: &TodoListItem) -> RepoResult<()>;

    /// Removes the list only; headers are left in place.
    fn delete_todo_list(&self, uuid: &str) -> RepoResult<()>;
    /// Removes the header only; items are left in place.
    fn delete_header(&self, uuid: &str) -> RepoResult<()>;
    fn delete_item(&self, uuid: &str) -> RepoResult<()>;
}
