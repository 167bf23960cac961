//! Use-case execution framework.
//!
//! # Responsibility
//! - Define the one-shot command contract every use-case implements.
//! - Separate domain validation failures from storage failures.
//!
//! # Invariants
//! - `run` validates before the first repository write.
//! - A validation failure never reaches the repository's write methods and
//!   never invokes a callback.
//! - Callbacks are invoked at most once per `run`, always through
//!   `MainThread::post`.
//! - `update_*` (upsert) is used for edits, so running the same edit twice
//!   converges to the latest arguments.

use crate::model::todo_list::ValidationError;
use crate::repo::todo_list_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod header;
pub mod item;
pub mod todo_list;

pub type InteractorResult<T> = Result<T, InteractorError>;

/// One-shot, parameterized use-case.
///
/// Interactors are constructed with their `Executor`, `MainThread`, callback,
/// repository and arguments; `execute` schedules `run` on the executor.
pub trait Interactor: Send + Sync {
    /// Stable snake_case name used in log events.
    fn name(&self) -> &'static str;

    /// Validates, persists and posts the notification.
    ///
    /// Expected to be called on a background thread.
    fn run(&self) -> InteractorResult<()>;
}

/// Storage-side failure observed by an interactor.
#[derive(Debug)]
pub enum StorageError {
    /// `insert_*` returned `false`.
    InsertRejected { entity: &'static str, uuid: String },
    /// A repository call returned an error.
    Repo(RepoError),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsertRejected { entity, uuid } => {
                write!(f, "storage rejected insert of {entity} {uuid}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InsertRejected { .. } => None,
            Self::Repo(err) => Some(err),
        }
    }
}

/// Failure of one interactor run.
#[derive(Debug)]
pub enum InteractorError {
    /// Domain invariant violated; fatal and never retried.
    Validation(ValidationError),
    /// Storage did not accept or serve the request; the caller may retry.
    Storage(StorageError),
    /// `run` panicked; carries the panic message.
    Panicked(String),
}

impl InteractorError {
    /// Short discriminator for log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Storage(_) => "storage",
            Self::Panicked(_) => "panic",
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

impl Display for InteractorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "validation failed: {err}"),
            Self::Storage(err) => write!(f, "storage failed: {err}"),
            Self::Panicked(message) => write!(f, "run panicked: {message}"),
        }
    }
}

impl Error for InteractorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Panicked(_) => None,
        }
    }
}

impl From<ValidationError> for InteractorError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for InteractorError {
    fn from(value: RepoError) -> Self {
        Self::Storage(StorageError::Repo(value))
    }
}

impl From<StorageError> for InteractorError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Maps an `insert_*` result to the storage error kind.
pub(crate) fn ensure_inserted(inserted: bool, entity: &'static str, uuid: &str) -> InteractorResult<()> {
    if inserted {
        return Ok(());
    }
    Err(StorageError::InsertRejected {
        entity,
        uuid: uuid.to_string(),
    }
    .into())
}
