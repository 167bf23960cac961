//! Todo list use-cases: create, delete and display.

use crate::composition::{ListEntry, TodoListComposition};
use crate::executor::{Executor, MainThread};
use crate::interactor::{ensure_inserted, Interactor, InteractorResult};
use crate::model::todo_list::{new_entity_id, TodoList};
use crate::repo::todo_list_repo::TodoListRepository;
use log::debug;
use std::sync::Arc;

pub trait CreateTodoListCallback: Send + Sync {
    fn on_todo_list_created(&self, list: TodoList);
}

impl<F> CreateTodoListCallback for F
where
    F: Fn(TodoList) + Send + Sync,
{
    fn on_todo_list_created(&self, list: TodoList) {
        self(list)
    }
}

pub trait DeleteTodoListCallback: Send + Sync {
    fn on_todo_list_deleted(&self, uuid: String);
}

impl<F> DeleteTodoListCallback for F
where
    F: Fn(String) + Send + Sync,
{
    fn on_todo_list_deleted(&self, uuid: String) {
        self(uuid)
    }
}

/// Receives a composed list; `list` is `None` when the uuid is unknown.
pub trait DisplayTodoListCallback: Send + Sync {
    fn on_todo_list_retrieved(&self, list: Option<TodoList>, entries: Vec<ListEntry>);
}

impl<F> DisplayTodoListCallback for F
where
    F: Fn(Option<TodoList>, Vec<ListEntry>) + Send + Sync,
{
    fn on_todo_list_retrieved(&self, list: Option<TodoList>, entries: Vec<ListEntry>) {
        self(list, entries)
    }
}

/// Creates a todo list with a generated uuid.
pub struct CreateTodoListInteractor {
    executor: Arc<dyn Executor>,
    main_thread: Arc<dyn MainThread>,
    callback: Arc<dyn CreateTodoListCallback>,
    repository: Arc<dyn TodoListRepository>,
    title: String,
}

impl CreateTodoListInteractor {
    pub fn new(
        executor: Arc<dyn Executor>,
        main_thread: Arc<dyn MainThread>,
        callback: Arc<dyn CreateTodoListCallback>,
        repository: Arc<dyn TodoListRepository>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            executor,
            main_thread,
            callback,
            repository,
            title: title.into(),
        }
    }

    pub fn execute(self) {
        let executor = Arc::clone(&self.executor);
        executor.execute(Arc::new(self));
    }
}

impl Interactor for CreateTodoListInteractor {
    fn name(&self) -> &'static str {
        "create_todo_list"
    }

    fn run(&self) -> InteractorResult<()> {
        let list = TodoList::new(new_entity_id(), self.title.as_str())?;
        ensure_inserted(self.repository.insert_todo_list(&list), "todo_list", list.uuid())?;
        debug!(
            "event=interactor_run module=interactor status=ok interactor=create_todo_list uuid={}",
            list.uuid()
        );

        let callback = Arc::clone(&self.callback);
        self.main_thread
            .post(Box::new(move || callback.on_todo_list_created(list)));
        Ok(())
    }
}

/// Deletes a todo list by uuid; headers are not cascaded.
pub struct DeleteTodoListInteractor {
    executor: Arc<dyn Executor>,
    main_thread: Arc<dyn MainThread>,
    callback: Arc<dyn DeleteTodoListCallback>,
    repository: Arc<dyn TodoListRepository>,
    uuid: String,
}

impl DeleteTodoListInteractor {
    pub fn new(
        executor: Arc<dyn Executor>,
        main_thread: Arc<dyn MainThread>,
        callback: Arc<dyn DeleteTodoListCallback>,
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

impl Interactor for DeleteTodoListInteractor {
    fn name(&self) -> &'static str {
        "delete_todo_list"
    }

    fn run(&self) -> InteractorResult<()> {
        self.repository.delete_todo_list(&self.uuid)?;
        debug!(
            "event=interactor_run module=interactor status=ok interactor=delete_todo_list uuid={}",
            self.uuid
        );

        let callback = Arc::clone(&self.callback);
        let uuid = self.uuid.clone();
        self.main_thread
            .post(Box::new(move || callback.on_todo_list_deleted(uuid)));
        Ok(())
    }
}

/// Loads and composes one list on the background context.
pub struct DisplayTodoListInteractor {
    executor: Arc<dyn Executor>,
    main_thread: Arc<dyn MainThread>,
    callback: Arc<dyn DisplayTodoListCallback>,
    repository: Arc<dyn TodoListRepository>,
    list_id: String,
}

impl DisplayTodoListInteractor {
    pub fn new(
        executor: Arc<dyn Executor>,
        main_thread: Arc<dyn MainThread>,
        callback: Arc<dyn DisplayTodoListCallback>,
        repository: Arc<dyn TodoListRepository>,
        list_id: impl Into<String>,
    ) -> Self {
        Self {
            executor,
            main_thread,
            callback,
            repository,
            list_id: list_id.into(),
        }
    }

    pub fn execute(self) {
        let executor = Arc::clone(&self.executor);
        executor.execute(Arc::new(self));
    }
}

impl Interactor for DisplayTodoListInteractor {
    fn name(&self) -> &'static str {
        "display_todo_list"
    }

    fn run(&self) -> InteractorResult<()> {
        let list = self.repository.get_todo_list_by_id(&self.list_id)?;
        let entries = match list {
            Some(_) => TodoListComposition::load(self.repository.as_ref(), &self.list_id)?
                .into_entries(),
            None => Vec::new(),
        };
        debug!(
            "event=interactor_run module=interactor status=ok interactor=display_todo_list list_id={} entries={}",
            self.list_id,
            entries.len()
        );

        let callback = Arc::clone(&self.callback);
        self.main_thread
            .post(Box::new(move || callback.on_todo_list_retrieved(list, entries)));
        Ok(())
    }
}
