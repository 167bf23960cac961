//! Core domain logic for todokit.
//! This crate is the single source of truth for todo-list invariants: the
//! use-case (interactor) framework, its threading seams, the repository
//! contract and list composition.

pub mod composition;
pub mod config;
pub mod db;
pub mod executor;
pub mod interactor;
pub mod logging;
pub mod model;
pub mod repo;

pub use composition::{
    compose_sections, sort_by_position, EntryKind, ListEntry, RowView, TodoListComposition,
    VIEW_TYPE_COUNT,
};
pub use config::{ConfigError, CoreConfig};
pub use executor::{
    main_loop, Executor, FailureHandler, MainLoop, MainTask, MainThread, MainThreadHandle,
    ThreadPoolExecutor,
};
pub use interactor::header::{
    CreateHeaderCallback, CreateHeaderInteractor, CreateHeaderRequest, DeleteHeaderCallback,
    DeleteHeaderInteractor, EditHeaderCallback, EditHeaderInteractor, EditHeaderRequest,
};
pub use interactor::item::{
    CreateItemCallback, CreateItemInteractor, CreateItemRequest, DeleteItemCallback,
    DeleteItemInteractor, EditItemCallback, EditItemInteractor, EditItemRequest,
};
pub use interactor::todo_list::{
    CreateTodoListCallback, CreateTodoListInteractor, DeleteTodoListCallback,
    DeleteTodoListInteractor, DisplayTodoListCallback, DisplayTodoListInteractor,
};
pub use interactor::{Interactor, InteractorError, InteractorResult, StorageError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::todo_list::{
    new_entity_id, Position, Positioned, TodoList, TodoListHeader, TodoListItem, TodoListSection,
    ValidationError,
};
pub use repo::memory_repo::InMemoryTodoListRepository;
pub use repo::sqlite_repo::SqliteTodoListRepository;
pub use repo::todo_list_repo::{RepoError, RepoResult, TodoListRepository};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
