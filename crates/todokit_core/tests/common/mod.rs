#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use todokit_core::{
    Executor, InMemoryTodoListRepository, Interactor, MainTask, MainThread, RepoResult, TodoList,
    TodoListHeader, TodoListItem, TodoListRepository, TodoListSection,
};

pub const LIST_ID: &str = "list-id";
pub const HEADER_ID: &str = "header-id";

/// Repository double counting writes on top of the in-memory backend.
#[derive(Default)]
pub struct CountingRepository {
    inner: InMemoryTodoListRepository,
    pub insert_count: AtomicUsize,
    pub update_count: AtomicUsize,
    pub delete_count: AtomicUsize,
    pub uuids: Mutex<HashSet<String>>,
    pub reject_inserts: AtomicBool,
    pub panic_next_header_lookup: AtomicBool,
}

impl CountingRepository {
    /// Repository holding list `list-id` with header `header-id`.
    pub fn seeded() -> Self {
        let repo = Self::default();
        repo.inner
            .update_todo_list(&TodoList::new(LIST_ID, "Groceries").unwrap())
            .unwrap();
        repo.inner
            .update_header(&TodoListHeader::new(HEADER_ID, LIST_ID, "Dairy", 0).unwrap())
            .unwrap();
        repo
    }

    pub fn inserts(&self) -> usize {
        self.insert_count.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.update_count.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.delete_count.load(Ordering::SeqCst)
    }

    pub fn tracked_uuids(&self) -> usize {
        self.uuids.lock().unwrap().len()
    }

    fn track(&self, uuid: &str) {
        self.uuids.lock().unwrap().insert(uuid.to_string());
    }

    fn insert_with(&self, uuid: &str, insert: impl FnOnce() -> bool) -> bool {
        self.insert_count.fetch_add(1, Ordering::SeqCst);
        if self.reject_inserts.load(Ordering::SeqCst) {
            return false;
        }
        let inserted = insert();
        if inserted {
            self.track(uuid);
        }
        inserted
    }
}

impl TodoListRepository for CountingRepository {
    fn get_todo_list_by_id(&self, uuid: &str) -> RepoResult<Option<TodoList>> {
        self.inner.get_todo_list_by_id(uuid)
    }

    fn get_header_by_id(&self, uuid: &str) -> RepoResult<Option<TodoListHeader>> {
        if self.panic_next_header_lookup.swap(false, Ordering::SeqCst) {
            panic!("header lookup failed for {uuid}");
        }
        self.inner.get_header_by_id(uuid)
    }

    fn get_item_by_id(&self, uuid: &str) -> RepoResult<Option<TodoListItem>> {
        self.inner.get_item_by_id(uuid)
    }

    fn get_all_todo_lists(&self) -> RepoResult<Vec<TodoList>> {
        self.inner.get_all_todo_lists()
    }

    fn get_sections_of_todo_list_id(&self, list_id: &str) -> RepoResult<Vec<TodoListSection>> {
        self.inner.get_sections_of_todo_list_id(list_id)
    }

    fn insert_todo_list(&self, list: &TodoList) -> bool {
        self.insert_with(list.uuid(), || self.inner.insert_todo_list(list))
    }

    fn insert_header(&self, header: &TodoListHeader) -> bool {
        self.insert_with(header.uuid(), || self.inner.insert_header(header))
    }

    fn insert_item(&self, item: &TodoListItem) -> bool {
        self.insert_with(item.uuid(), || self.inner.insert_item(item))
    }

    fn update_todo_list(&self, list: &TodoList) -> RepoResult<()> {
        self.update_count.fetch_add(1, Ordering::SeqCst);
        self.inner.update_todo_list(list)?;
        self.track(list.uuid());
        Ok(())
    }

    fn update_header(&self, header: &TodoListHeader) -> RepoResult<()> {
        self.update_count.fetch_add(1, Ordering::SeqCst);
        self.inner.update_header(header)?;
        self.track(header.uuid());
        Ok(())
    }

    fn update_item(&self, item: &TodoListItem) -> RepoResult<()> {
        self.update_count.fetch_add(1, Ordering::SeqCst);
        self.inner.update_item(item)?;
        self.track(item.uuid());
        Ok(())
    }

    fn delete_todo_list(&self, uuid: &str) -> RepoResult<()> {
        self.delete_count.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_todo_list(uuid)
    }

    fn delete_header(&self, uuid: &str) -> RepoResult<()> {
        self.delete_count.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_header(uuid)
    }

    fn delete_item(&self, uuid: &str) -> RepoResult<()> {
        self.delete_count.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_item(uuid)
    }
}

/// Executor double for tests that call `run` directly.
pub struct UnusedExecutor;

impl Executor for UnusedExecutor {
    fn execute(&self, _interactor: Arc<dyn Interactor>) {
        panic!("tests drive `run` directly");
    }
}

/// Main thread double running every posted task immediately.
pub struct InlineMainThread;

impl MainThread for InlineMainThread {
    fn post(&self, task: MainTask) {
        task();
    }
}

/// Records every value delivered to a callback.
pub struct Recorder<T> {
    values: Mutex<Vec<T>>,
}

impl<T: Clone> Recorder<T> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            values: Mutex::new(Vec::new()),
        })
    }

    pub fn push(&self, value: T) {
        self.values.lock().unwrap().push(value);
    }

    pub fn values(&self) -> Vec<T> {
        self.values.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.values.lock().unwrap().len()
    }
}

pub fn seams() -> (Arc<dyn Executor>, Arc<dyn MainThread>) {
    (Arc::new(UnusedExecutor), Arc::new(InlineMainThread))
}
