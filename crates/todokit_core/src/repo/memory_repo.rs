//! In-memory todo list repository.
//!
//! # Responsibility
//! - Provide a storage backend without any I/O for tests, demos and
//!   ephemeral sessions.
//!
//! # Invariants
//! - All state sits behind one `RwLock`; a mutation is visible to readers
//!   only once every field has been written.
//! - Rows keep arrival order; an upsert of an existing uuid keeps its slot.
//! - Inserting an existing uuid is rejected like a primary-key violation.

use crate::model::todo_list::{TodoList, TodoListHeader, TodoListItem, TodoListSection};
use crate::repo::todo_list_repo::{RepoError, RepoResult, TodoListRepository};
use log::warn;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for TodoList {
    fn key(&self) -> &str {
        self.uuid()
    }
}

impl Keyed for TodoListHeader {
    fn key(&self) -> &str {
        self.uuid()
    }
}

impl Keyed for TodoListItem {
    fn key(&self) -> &str {
        self.uuid()
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    lists: Vec<TodoList>,
    headers: Vec<TodoListHeader>,
    items: Vec<TodoListItem>,
}

/// `RwLock`-guarded repository keeping every entity in memory.
#[derive(Debug, Default)]
pub struct InMemoryTodoListRepository {
    state: RwLock<MemoryState>,
}

impl InMemoryTodoListRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RepoResult<RwLockReadGuard<'_, MemoryState>> {
        self.state.read().map_err(|_| RepoError::Poisoned)
    }

    fn write(&self) -> RepoResult<RwLockWriteGuard<'_, MemoryState>> {
        self.state.write().map_err(|_| RepoError::Poisoned)
    }

    fn insert_with<T: Keyed + Clone>(
        &self,
        entity: &'static str,
        value: &T,
        rows: impl FnOnce(&mut MemoryState) -> &mut Vec<T>,
    ) -> bool {
        let mut state = match self.write() {
            Ok(state) => state,
            Err(err) => {
                warn!("event=repo_insert module=repo status=error backend=memory entity={entity} error={err}");
                return false;
            }
        };
        let rows = rows(&mut *state);
        if find(rows, value.key()).is_some() {
            warn!(
                "event=repo_insert module=repo status=rejected backend=memory entity={entity} reason=duplicate_uuid"
            );
            return false;
        }
        rows.push(value.clone());
        true
    }
}

fn find<T: Keyed>(rows: &[T], uuid: &str) -> Option<usize> {
    rows.iter().position(|row| row.key() == uuid)
}

fn upsert<T: Keyed + Clone>(rows: &mut Vec<T>, value: &T) {
    match find(rows, value.key()) {
        Some(index) => rows[index] = value.clone(),
        None => rows.push(value.clone()),
    }
}

fn remove<T: Keyed>(rows: &mut Vec<T>, uuid: &str) {
    rows.retain(|row| row.key() != uuid);
}

fn lookup<T: Keyed + Clone>(rows: &[T], uuid: &str) -> Option<T> {
    find(rows, uuid).map(|index| rows[index].clone())
}

impl TodoListRepository for InMemoryTodoListRepository {
    fn get_todo_list_by_id(&self, uuid: &str) -> RepoResult<Option<TodoList>> {
        Ok(lookup(&self.read()?.lists, uuid))
    }

    fn get_header_by_id(&self, uuid: &str) -> RepoResult<Option<TodoListHeader>> {
        Ok(lookup(&self.read()?.headers, uuid))
    }

    fn get_item_by_id(&self, uuid: &str) -> RepoResult<Option<TodoListItem>> {
        Ok(lookup(&self.read()?.items, uuid))
    }

    fn get_all_todo_lists(&self) -> RepoResult<Vec<TodoList>> {
        Ok(self.read()?.lists.clone())
    }

    fn get_sections_of_todo_list_id(&self, list_id: &str) -> RepoResult<Vec<TodoListSection>> {
        let state = self.read()?;
        let sections = state
            .headers
            .iter()
            .filter(|header| header.list_id() == list_id)
            .map(|header| {
                let items = state
                    .items
                    .iter()
                    .filter(|item| item.header_id() == header.uuid())
                    .cloned()
                    .collect();
                TodoListSection::new(header.clone(), items)
            })
            .collect();
        Ok(sections)
    }

    fn insert_todo_list(&self, list: &TodoList) -> bool {
        self.insert_with("todo_list", list, |state| &mut state.lists)
    }

    fn insert_header(&self, header: &TodoListHeader) -> bool {
        self.insert_with("header", header, |state| &mut state.headers)
    }

    fn insert_item(&self, item: &TodoListItem) -> bool {
        self.insert_with("item", item, |state| &mut state.items)
    }

    fn update_todo_list(&self, list: &TodoList) -> RepoResult<()> {
        upsert(&mut self.write()?.lists, list);
        Ok(())
    }

    fn update_header(&self, header: &TodoListHeader) -> RepoResult<()> {
        upsert(&mut self.write()?.headers, header);
        Ok(())
    }

    fn update_item(&self, item: &TodoListItem) -> RepoResult<()> {
        upsert(&mut self.write()?.items, item);
        Ok(())
    }

    fn delete_todo_list(&self, uuid: &str) -> RepoResult<()> {
        remove(&mut self.write()?.lists, uuid);
        Ok(())
    }

    fn delete_header(&self, uuid: &str) -> RepoResult<()> {
        remove(&mut self.write()?.headers, uuid);
        Ok(())
    }

    fn delete_item(&self, uuid: &str) -> RepoResult<()> {
        remove(&mut self.write()?.items, uuid);
        Ok(())
    }
}
