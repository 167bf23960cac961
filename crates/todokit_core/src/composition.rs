//! List composition: flattening sections into an indexable row sequence.
//!
//! # Responsibility
//! - Order sections by header position and items by item position.
//! - Expose the flat sequence the way list-style display surfaces consume
//!   it: by index, with two row kinds.
//!
//! # Invariants
//! - Both sorts are stable; equal positions keep repository order.
//! - Every header is immediately followed by its own items.
//! - Indices are only valid for the pass that produced them; call
//!   `refresh` after any write.

use crate::model::todo_list::{Positioned, TodoListHeader, TodoListItem, TodoListSection};
use crate::repo::todo_list_repo::{RepoResult, TodoListRepository};
use serde::{Deserialize, Serialize};

/// Number of distinct row kinds a display surface must provide views for.
pub const VIEW_TYPE_COUNT: usize = 2;

/// Row discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Header,
    Item,
}

impl EntryKind {
    /// Dense view-type index in `0..VIEW_TYPE_COUNT`.
    pub fn view_type(self) -> usize {
        match self {
            Self::Header => 0,
            Self::Item => 1,
        }
    }
}

/// One row of a composed list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListEntry {
    Header(TodoListHeader),
    Item(TodoListItem),
}

impl ListEntry {
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Header(_) => EntryKind::Header,
            Self::Item(_) => EntryKind::Item,
        }
    }

    pub fn uuid(&self) -> &str {
        match self {
            Self::Header(header) => header.uuid(),
            Self::Item(item) => item.uuid(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Header(header) => header.title(),
            Self::Item(item) => item.title(),
        }
    }
}

/// Presentation flags for one row; colors and fonts are left to the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowView {
    Header {
        title: String,
    },
    Item {
        title: String,
        /// Render struck through.
        is_done: bool,
        /// Render emphasized.
        is_important: bool,
        /// Show the details indicator.
        has_details: bool,
    },
}

impl From<&ListEntry> for RowView {
    fn from(entry: &ListEntry) -> Self {
        match entry {
            ListEntry::Header(header) => Self::Header {
                title: header.title().to_string(),
            },
            ListEntry::Item(item) => Self::Item {
                title: item.title().to_string(),
                is_done: item.is_done(),
                is_important: item.is_important(),
                has_details: !item.details().is_empty(),
            },
        }
    }
}

/// Stable ascending sort by `position`.
pub fn sort_by_position<T: Positioned>(values: &mut [T]) {
    values.sort_by_key(|value| value.position());
}

/// Flattens sections into `header, items.., header, items..` order.
pub fn compose_sections(mut sections: Vec<TodoListSection>) -> Vec<ListEntry> {
    sort_by_position(&mut sections);

    let capacity = sections
        .iter()
        .map(|section| section.items().len() + 1)
        .sum();
    let mut entries = Vec::with_capacity(capacity);
    for section in sections {
        let (header, mut items) = section.into_parts();
        entries.push(ListEntry::Header(header));
        sort_by_position(&mut items);
        entries.extend(items.into_iter().map(ListEntry::Item));
    }
    entries
}

/// Composed, index-addressable view of one todo list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoListComposition {
    list_id: String,
    entries: Vec<ListEntry>,
}

impl TodoListComposition {
    /// Reads all sections of `list_id` and composes them.
    ///
    /// An unknown list yields an empty composition.
    pub fn load(repository: &dyn TodoListRepository, list_id: &str) -> RepoResult<Self> {
        let sections = repository.get_sections_of_todo_list_id(list_id)?;
        Ok(Self::from_sections(list_id, sections))
    }

    pub fn from_sections(list_id: impl Into<String>, sections: Vec<TodoListSection>) -> Self {
        Self {
            list_id: list_id.into(),
            entries: compose_sections(sections),
        }
    }

    /// Recomputes the sequence after the data set changed.
    pub fn refresh(&mut self, repository: &dyn TodoListRepository) -> RepoResult<()> {
        let sections = repository.get_sections_of_todo_list_id(&self.list_id)?;
        self.entries = compose_sections(sections);
        Ok(())
    }

    pub fn list_id(&self) -> &str {
        &self.list_id
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ListEntry> {
        self.entries
    }

    /// Entry at `index`, or `None` past the end.
    pub fn entry_at(&self, index: usize) -> Option<&ListEntry> {
        self.entries.get(index)
    }

    pub fn row_at(&self, index: usize) -> Option<RowView> {
        self.entry_at(index).map(RowView::from)
    }

    /// Row id; the positional index itself.
    pub fn item_id(&self, index: usize) -> u64 {
        index as u64
    }

    pub fn view_type_count(&self) -> usize {
        VIEW_TYPE_COUNT
    }

    pub fn has_stable_ids(&self) -> bool {
        true
    }
}
