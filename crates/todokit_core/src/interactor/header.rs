//! Header use-cases: create, edit and delete.
//!
//! # Invariants
//! - Create and edit require the owning todo list to exist.
//! - Deleting a header leaves its items untouched.

use crate::executor::{Executor, MainThread};
use crate::interactor::{ensure_inserted, Interactor, InteractorResult};
use crate::model::todo_list::{new_entity_id, Position, TodoListHeader, ValidationError};
use crate::repo::todo_list_repo::TodoListRepository;
use log::{debug, warn};
use std::sync::Arc;

pub trait CreateHeaderCallback: Send + Sync {
    fn on_header_created(&self, header: TodoListHeader);
}

impl<F> CreateHeaderCallback for F
where
    F: Fn(TodoListHeader) + Send + Sync,
{
    fn on_header_created(&self, header: TodoListHeader) {
        self(header)
    }
}

pub trait EditHeaderCallback: Send + Sync {
    fn on_header_updated(&self, header: TodoListHeader);
}

impl<F> EditHeaderCallback for F
where
    F: Fn(TodoListHeader) + Send + Sync,
{
    fn on_header_updated(&self, header: TodoListHeader) {
        self(header)
    }
}

pub trait DeleteHeaderCallback: Send + Sync {
    fn on_header_deleted(&self, uuid: String);
}

impl<F> DeleteHeaderCallback for F
where
    F: Fn(String) + Send + Sync,
{
    fn on_header_deleted(&self, uuid: String) {
        self(uuid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateHeaderRequest {
    pub list_id: String,
    pub title: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditHeaderRequest {
    pub uuid: String,
    pub list_id: String,
    pub title: String,
    pub position: Position,
}

fn ensure_todo_list(
    repository: &dyn TodoListRepository,
    interactor: &'static str,
    list_id: &str,
) -> InteractorResult<()> {
    if repository.get_todo_list_by_id(list_id)?.is_none() {
        warn!(
            "event=interactor_validate module=interactor status=rejected interactor={interactor} reason=todo_list_not_found list_id={list_id}"
        );
        return Err(ValidationError::TodoListNotFound(list_id.to_string()).into());
    }
    Ok(())
}

/// Creates a header with a generated uuid through `insert_header`.
pub struct CreateHeaderInteractor {
    executor: Arc<dyn Executor>,
    main_thread: Arc<dyn MainThread>,
    callback: Arc<dyn CreateHeaderCallback>,
    repository: Arc<dyn TodoListRepository>,
    request: CreateHeaderRequest,
}

impl CreateHeaderInteractor {
    pub fn new(
        executor: Arc<dyn Executor>,
        main_thread: Arc<dyn MainThread>,
        callback: Arc<dyn CreateHeaderCallback>,
        repository: Arc<dyn TodoListRepository>,
        request: CreateHeaderRequest,
    ) -> Self {
        Self {
            executor,
            main_thread,
            callback,
            repository,
            request,
        }
    }

    pub fn execute(self) {
        let executor = Arc::clone(&self.executor);
        executor.execute(Arc::new(self));
    }
}

impl Interactor for CreateHeaderInteractor {
    fn name(&self) -> &'static str {
        "create_header"
    }

    fn run(&self) -> InteractorResult<()> {
        let request = &self.request;
        let header = TodoListHeader::new(
            new_entity_id(),
            request.list_id.as_str(),
            request.title.as_str(),
            request.position,
        )?;
        ensure_todo_list(self.repository.as_ref(), self.name(), header.list_id())?;

        ensure_inserted(self.repository.insert_header(&header), "header", header.uuid())?;
        debug!(
            "event=interactor_run module=interactor status=ok interactor=create_header uuid={}",
            header.uuid()
        );

        let callback = Arc::clone(&self.callback);
        self.main_thread
            .post(Box::new(move || callback.on_header_created(header)));
        Ok(())
    }
}

/// Edits a header, creating it when its uuid is unknown.
pub struct EditHeaderInteractor {
    executor: Arc<dyn Executor>,
    main_thread: Arc<dyn MainThread>,
    callback: Arc<dyn EditHeaderCallback>,
    repository: Arc<dyn TodoListRepository>,
    request: EditHeaderRequest,
}

impl EditHeaderInteractor {
    pub fn new(
        executor: Arc<dyn Executor>,
        main_thread: Arc<dyn MainThread>,
        callback: Arc<dyn EditHeaderCallback>,
        repository: Arc<dyn TodoListRepository>,
        request: EditHeaderRequest,
    ) -> Self {
        Self {
            executor,
            main_thread,
            callback,
            repository,
            request,
        }
    }

    pub fn execute(self) {
        let executor = Arc::clone(&self.executor);
        executor.execute(Arc::new(self));
    }
}

impl Interactor for EditHeaderInteractor {
    fn name(&self) -> &'static str {
        "edit_header"
    }

    fn run(&self) -> InteractorResult<()> {
        let request = &self.request;
        let header = TodoListHeader::new(
            request.uuid.as_str(),
            request.list_id.as_str(),
            request.title.as_str(),
            request.position,
        )?;
        ensure_todo_list(self.repository.as_ref(), self.name(), header.list_id())?;

        self.repository.update_header(&header)?;
        debug!(
            "event=interactor_run module=interactor status=ok interactor=edit_header uuid={}",
            header.uuid()
        );

        let callback = Arc::clone(&self.callback);
        self.main_thread
            .post(Box::new(move || callback.on_header_updated(header)));
        Ok(())
    }
}

/// Deletes a header by uuid; unknown uuids are a no-op.
pub struct DeleteHeaderInteractor {
    executor: Arc<dyn Executor>,
    main_thread: Arc<dyn MainThread>,
    callback: Arc<dyn DeleteHeaderCallback>,
    repository: Arc<dyn TodoListRepository>,
    uuid: String,
}

impl DeleteHeaderInteractor {
    pub fn new(
        executor: Arc<dyn Executor>,
        main_thread: Arc<dyn MainThread>,
        callback: Arc<dyn DeleteHeaderCallback>,
        repository: Arc<dyn TodoListRepository>,
        uuid: impl Into<String>,
    ) -> Self {
        Self {
            executor,
            main_thread,
            callback,
            repository,
            uuid: uuid.into(),
        }
    }

    pub fn execute(self) {
        let executor = Arc::clone(&self.executor);
        executor.execute(Arc::new(self));
    }
}

impl Interactor for DeleteHeaderInteractor {
    fn name(&self) -> &'static str {
        "delete_header"
    }

    fn run(&self) -> InteractorResult<()> {
        self.repository.delete_header(&self.uuid)?;
        debug!(
            "event=interactor_run module=interactor status=ok interactor=delete_header uuid={}",
            self.uuid
        );

        let callback = Arc::clone(&self.callback);
        let uuid = self.uuid.clone();
        self.main_thread
            .post(Box::new(move || callback.on_header_deleted(uuid)));
        Ok(())
    }
}
