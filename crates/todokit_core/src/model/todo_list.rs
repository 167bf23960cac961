//! Todo list domain values.
//!
//! # Responsibility
//! - Model `TodoList -> TodoListHeader -> TodoListItem` ownership by foreign
//!   keys (`list_id`, `header_id`).
//! - Model `TodoListSection` as a read-time composite that is never persisted.
//!
//! # Invariants
//! - `uuid`, `list_id` and `header_id` must not be blank.
//! - Existence of the referenced parent is checked by interactors, not here.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Sort key controlling display order among siblings.
pub type Position = u32;

/// Domain validation failures.
///
/// These describe broken invariants of the caller's input, never storage
/// problems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// An identifier field was empty or whitespace only.
    BlankId(&'static str),
    /// The item's parent header does not exist.
    ParentHeaderNotFound(String),
    /// The header's owning todo list does not exist.
    TodoListNotFound(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId(field) => write!(f, "`{field}` must not be blank"),
            Self::ParentHeaderNotFound(id) => write!(f, "parent header not found: {id}"),
            Self::TodoListNotFound(id) => write!(f, "todo list not found: {id}"),
        }
    }
}

impl Error for ValidationError {}

/// Capability shared by every entity that takes part in positional ordering.
pub trait Positioned {
    /// Stable identity of the entity.
    fn uuid(&self) -> &str;
    /// Display order among siblings.
    fn position(&self) -> Position;
}

/// Generates a fresh entity identifier.
pub fn new_entity_id() -> String {
    Uuid::new_v4().to_string()
}

fn ensure_id(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankId(field));
    }
    Ok(())
}

/// Top-level list owning headers (and, transitively, items).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    uuid: String,
    title: String,
}

impl TodoList {
    /// Creates a list value with a caller-provided identity.
    pub fn new(uuid: impl Into<String>, title: impl Into<String>) -> Result<Self, ValidationError> {
        let uuid = uuid.into();
        ensure_id("uuid", &uuid)?;
        Ok(Self {
            uuid,
            title: title.into(),
        })
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Anchor of one section inside a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoListHeader {
    uuid: String,
    list_id: String,
    title: String,
    position: Position,
}

impl TodoListHeader {
    /// Creates a header value.
    ///
    /// Does not check that `list_id` resolves; see `CreateHeaderInteractor`.
    pub fn new(
        uuid: impl Into<String>,
        list_id: impl Into<String>,
        title: impl Into<String>,
        position: Position,
    ) -> Result<Self, ValidationError> {
        let uuid = uuid.into();
        let list_id = list_id.into();
        ensure_id("uuid", &uuid)?;
        ensure_id("list_id", &list_id)?;
        Ok(Self {
            uuid,
            list_id,
            title: title.into(),
            position,
        })
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn list_id(&self) -> &str {
        &self.list_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn position(&self) -> Position {
        self.position
    }
}

impl Positioned for TodoListHeader {
    fn uuid(&self) -> &str {
        &self.uuid
    }

    fn position(&self) -> Position {
        self.position
    }
}

/// One actionable entry under a header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoListItem {
    uuid: String,
    header_id: String,
    title: String,
    details: String,
    position: Position,
    is_done: bool,
    is_important: bool,
}

impl TodoListItem {
    /// Creates an open, unimportant item without details.
    ///
    /// Use `with_details`, `with_done` and `with_important` to fill the
    /// remaining fields.
    pub fn new(
        uuid: impl Into<String>,
        header_id: impl Into<String>,
        title: impl Into<String>,
        position: Position,
    ) -> Result<Self, ValidationError> {
        let uuid = uuid.into();
        let header_id = header_id.into();
        ensure_id("uuid", &uuid)?;
        ensure_id("header_id", &header_id)?;
        Ok(Self {
            uuid,
            header_id,
            title: title.into(),
            details: String::new(),
            position,
            is_done: false,
            is_important: false,
        })
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    pub fn with_done(mut self, is_done: bool) -> Self {
        self.is_done = is_done;
        self
    }

    pub fn with_important(mut self, is_important: bool) -> Self {
        self.is_important = is_important;
        self
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Parent header identifier.
    pub fn header_id(&self) -> &str {
        &self.header_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Free-form details; empty when the user entered none.
    pub fn details(&self) -> &str {
        &self.details
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_done(&self) -> bool {
        self.is_done
    }

    pub fn is_important(&self) -> bool {
        self.is_important
    }
}

impl Positioned for TodoListItem {
    fn uuid(&self) -> &str {
        &self.uuid
    }

    fn position(&self) -> Position {
        self.position
    }
}

/// Read-time composite of one header and its items.
///
/// Assembled by repositories on read; item order is whatever storage returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoListSection {
    header: TodoListHeader,
    items: Vec<TodoListItem>,
}

impl TodoListSection {
    pub fn new(header: TodoListHeader, items: Vec<TodoListItem>) -> Self {
        Self { header, items }
    }

    pub fn header(&self) -> &TodoListHeader {
        &self.header
    }

    pub fn items(&self) -> &[TodoListItem] {
        &self.items
    }

    /// Splits the section into its header and items.
    pub fn into_parts(self) -> (TodoListHeader, Vec<TodoListItem>) {
        (self.header, self.items)
    }
}

impl Positioned for TodoListSection {
    fn uuid(&self) -> &str {
        self.header.uuid()
    }

    fn position(&self) -> Position {
        self.header.position()
    }
}
