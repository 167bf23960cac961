//! Item use-cases: create, edit and delete.
//!
//! # Invariants
//! - Create and edit resolve the parent header before writing; a missing
//!   parent is `ValidationError::ParentHeaderNotFound`.
//! - Edit writes through `update_item` (upsert), so it also creates items
//!   whose uuid is not stored yet.
//! - Delete performs no existence check.

use crate::executor::{Executor, MainThread};
use crate::interactor::{ensure_inserted, Interactor, InteractorResult};
use crate::model::todo_list::{new_entity_id, Position, TodoListItem, ValidationError};
use crate::repo::todo_list_repo::TodoListRepository;
use log::{debug, warn};
use std::sync::Arc;

/// Presentation-side receiver for `CreateItemInteractor`.
pub trait CreateItemCallback: Send + Sync {
    fn on_item_created(&self, item: TodoListItem);
}

impl<F> CreateItemCallback for F
where
    F: Fn(TodoListItem) + Send + Sync,
{
    fn on_item_created(&self, item: TodoListItem) {
        self(item)
    }
}

/// Presentation-side receiver for `EditItemInteractor`.
pub trait EditItemCallback: Send + Sync {
    fn on_item_updated(&self, item: TodoListItem);
}

impl<F> EditItemCallback for F
where
    F: Fn(TodoListItem) + Send + Sync,
{
    fn on_item_updated(&self, item: TodoListItem) {
        self(item)
    }
}

/// Presentation-side receiver for `DeleteItemInteractor`.
pub trait DeleteItemCallback: Send + Sync {
    fn on_item_deleted(&self, uuid: String);
}

impl<F> DeleteItemCallback for F
where
    F: Fn(String) + Send + Sync,
{
    fn on_item_deleted(&self, uuid: String) {
        self(uuid)
    }
}

/// Arguments for creating an item under an existing header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateItemRequest {
    pub header_id: String,
    pub title: String,
    pub position: Position,
    pub details: String,
    pub is_important: bool,
}

/// Arguments for editing (or upserting) one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditItemRequest {
    pub uuid: String,
    pub title: String,
    pub position: Position,
    pub is_done: bool,
    pub details: String,
    pub is_important: bool,
    pub parent_header_id: String,
}

fn ensure_parent_header(
    repository: &dyn TodoListRepository,
    interactor: &'static str,
    header_id: &str,
) -> InteractorResult<()> {
    if repository.get_header_by_id(header_id)?.is_none() {
        warn!(
            "event=interactor_validate module=interactor status=rejected interactor={interactor} reason=parent_header_not_found header_id={header_id}"
        );
        return Err(ValidationError::ParentHeaderNotFound(header_id.to_string()).into());
    }
    Ok(())
}

/// Creates a new item with a generated uuid through `insert_item`.
pub struct CreateItemInteractor {
    executor: Arc<dyn Executor>,
    main_thread: Arc<dyn MainThread>,
    callback: Arc<dyn CreateItemCallback>,
    repository: Arc<dyn TodoListRepository>,
    request: CreateItemRequest,
}

impl CreateItemInteractor {
    pub fn new(
        executor: Arc<dyn Executor>,
        main_thread: Arc<dyn MainThread>,
        callback: Arc<dyn CreateItemCallback>,
        repository: Arc<dyn TodoListRepository>,
        request: CreateItemRequest,
    ) -> Self {
        Self {
            executor,
            main_thread,
            callback,
            repository,
            request,
        }
    }

    /// Schedules `run` on the executor.
    pub fn execute(self) {
        let executor = Arc::clone(&self.executor);
        executor.execute(Arc::new(self));
    }
}

impl Interactor for CreateItemInteractor {
    fn name(&self) -> &'static str {
        "create_item"
    }

    fn run(&self) -> InteractorResult<()> {
        let request = &self.request;
        let item = TodoListItem::new(
            new_entity_id(),
            request.header_id.as_str(),
            request.title.as_str(),
            request.position,
        )?
        .with_details(request.details.as_str())
        .with_important(request.is_important);
        ensure_parent_header(self.repository.as_ref(), self.name(), item.header_id())?;

        ensure_inserted(self.repository.insert_item(&item), "item", item.uuid())?;
        debug!(
            "event=interactor_run module=interactor status=ok interactor=create_item uuid={}",
            item.uuid()
        );

        let callback = Arc::clone(&self.callback);
        self.main_thread
            .post(Box::new(move || callback.on_item_created(item)));
        Ok(())
    }
}

/// Edits an item, creating it when its uuid is unknown.
pub struct EditItemInteractor {
    executor: Arc<dyn Executor>,
    main_thread: Arc<dyn MainThread>,
    callback: Arc<dyn EditItemCallback>,
    repository: Arc<dyn TodoListRepository>,
    request: EditItemRequest,
}

impl EditItemInteractor {
    pub fn new(
        executor: Arc<dyn Executor>,
        main_thread: Arc<dyn MainThread>,
        callback: Arc<dyn EditItemCallback>,
        repository: Arc<dyn TodoListRepository>,
        request: EditItemRequest,
    ) -> Self {
        Self {
            executor,
            main_thread,
            callback,
            repository,
            request,
        }
    }

    /// Schedules `run` on the executor.
    pub fn execute(self) {
        let executor = Arc::clone(&self.executor);
        executor.execute(Arc::new(self));
    }
}

impl Interactor for EditItemInteractor {
    fn name(&self) -> &'static str {
        "edit_item"
    }

    fn run(&self) -> InteractorResult<()> {
        let request = &self.request;
        let item = TodoListItem::new(
            request.uuid.as_str(),
            request.parent_header_id.as_str(),
            request.title.as_str(),
            request.position,
        )?
        .with_details(request.details.as_str())
        .with_done(request.is_done)
        .with_important(request.is_important);
        ensure_parent_header(self.repository.as_ref(), self.name(), item.header_id())?;

        self.repository.update_item(&item)?;
        debug!(
            "event=interactor_run module=interactor status=ok interactor=edit_item uuid={}",
            item.uuid()
        );

        let callback = Arc::clone(&self.callback);
        self.main_thread
            .post(Box::new(move || callback.on_item_updated(item)));
        Ok(())
    }
}

/// Deletes an item by uuid; unknown uuids are a no-op.
pub struct DeleteItemInteractor {
    executor: Arc<dyn Executor>,
    main_thread: Arc<dyn MainThread>,
    callback: Arc<dyn DeleteItemCallback>,
    repository: Arc<dyn TodoListRepository>,
    uuid: String,
}

impl DeleteItemInteractor {
    pub fn new(
        executor: Arc<dyn Executor>,
        main_thread: Arc<dyn MainThread>,
        callback: Arc<dyn DeleteItemCallback>,
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

    /// Schedules `run` on the executor.
    pub fn execute(self) {
        let executor = Arc::clone(&self.executor);
        executor.execute(Arc::new(self));
    }
}

impl Interactor for DeleteItemInteractor {
    fn name(&self) -> &'static str {
        "delete_item"
    }

    fn run(&self) -> InteractorResult<()> {
        self.repository.delete_item(&self.uuid)?;
        debug!(
            "event=interactor_run module=interactor status=ok interactor=delete_item uuid={}",
            self.uuid
        );

        let callback = Arc::clone(&self.callback);
        let uuid = self.uuid.clone();
        self.main_thread
            .post(Box::new(move || callback.on_item_deleted(uuid)));
        Ok(())
    }
}
