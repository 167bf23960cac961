//! SQLite-backed todo list repository.
//!
//! # Responsibility
//! - Persist lists, headers and items in the schema created by `db::schema`.
//! - Keep SQL details inside the repository boundary.
//!
//! # Invariants
//! - Every mutation runs in its own transaction and either commits all
//!   fields of one row or none.
//! - The connection is guarded by a mutex so one repository can be shared
//!   by all worker threads.
//! - Rows are read back in `rowid` (arrival) order; upserts keep the rowid.

use crate::db::{open_db, open_db_in_memory};
use crate::model::todo_list::{
    TodoList, TodoListHeader, TodoListItem, TodoListSection, ValidationError,
};
use crate::repo::todo_list_repo::{RepoError, RepoResult, TodoListRepository};
use log::warn;
use rusqlite::{params, Connection, OptionalExtension, Params, Row};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const LIST_SELECT_SQL: &str = "SELECT uuid, title FROM todo_lists";

const HEADER_SELECT_SQL: &str = "SELECT uuid, list_uuid, title, position FROM todo_list_headers";

const ITEM_SELECT_SQL: &str = "SELECT
    uuid,
    header_uuid,
    title,
    details,
    position,
    is_done,
    is_important
FROM todo_list_items";

const LIST_INSERT_SQL: &str = "INSERT INTO todo_lists (uuid, title) VALUES (?1, ?2)";

const HEADER_INSERT_SQL: &str =
    "INSERT INTO todo_list_headers (uuid, list_uuid, title, position) VALUES (?1, ?2, ?3, ?4)";

const ITEM_INSERT_SQL: &str = "INSERT INTO todo_list_items (
    uuid,
    header_uuid,
    title,
    details,
    position,
    is_done,
    is_important
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

/// SQLite repository sharing one connection across threads.
pub struct SqliteTodoListRepository {
    conn: Mutex<Connection>,
}

impl SqliteTodoListRepository {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Opens (or creates) a database file.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    pub fn open_in_memory() -> RepoResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| RepoError::Poisoned)
    }

    fn insert_row(&self, entity: &'static str, sql: &str, params: impl Params) -> bool {
        let mut conn = match self.lock() {
            Ok(conn) => conn,
            Err(err) => {
                warn!("event=repo_insert module=repo status=error backend=sqlite entity={entity} error={err}");
                return false;
            }
        };
        match execute_in_transaction(&mut conn, sql, params) {
            Ok(_) => true,
            Err(err) => {
                warn!("event=repo_insert module=repo status=rejected backend=sqlite entity={entity} error={err}");
                false
            }
        }
    }

    fn write_row(&self, sql: &str, params: impl Params) -> RepoResult<()> {
        let mut conn = self.lock()?;
        execute_in_transaction(&mut conn, sql, params)?;
        Ok(())
    }
}

fn execute_in_transaction(
    conn: &mut Connection,
    sql: &str,
    params: impl Params,
) -> rusqlite::Result<usize> {
    let tx = conn.transaction()?;
    let changed = tx.execute(sql, params)?;
    tx.commit()?;
    Ok(changed)
}

impl TodoListRepository for SqliteTodoListRepository {
    fn get_todo_list_by_id(&self, uuid: &str) -> RepoResult<Option<TodoList>> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                &format!("{LIST_SELECT_SQL} WHERE uuid = ?1;"),
                [uuid],
                read_list_columns,
            )
            .optional()?;
        row.map(into_list).transpose()
    }

    fn get_header_by_id(&self, uuid: &str) -> RepoResult<Option<TodoListHeader>> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                &format!("{HEADER_SELECT_SQL} WHERE uuid = ?1;"),
                [uuid],
                read_header_columns,
            )
            .optional()?;
        row.map(into_header).transpose()
    }

    fn get_item_by_id(&self, uuid: &str) -> RepoResult<Option<TodoListItem>> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                &format!("{ITEM_SELECT_SQL} WHERE uuid = ?1;"),
                [uuid],
                read_item_columns,
            )
            .optional()?;
        row.map(into_item).transpose()
    }

    fn get_all_todo_lists(&self) -> RepoResult<Vec<TodoList>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("{LIST_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let rows = stmt.query_map([], read_list_columns)?;
        let mut lists = Vec::new();
        for row in rows {
            lists.push(into_list(row?)?);
        }
        Ok(lists)
    }

    fn get_sections_of_todo_list_id(&self, list_id: &str) -> RepoResult<Vec<TodoListSection>> {
        let conn = self.lock()?;

        let mut header_stmt = conn.prepare(&format!(
            "{HEADER_SELECT_SQL} WHERE list_uuid = ?1 ORDER BY rowid ASC;"
        ))?;
        let mut headers = Vec::new();
        for row in header_stmt.query_map([list_id], read_header_columns)? {
            headers.push(into_header(row?)?);
        }

        let mut item_stmt = conn.prepare(&format!(
            "{ITEM_SELECT_SQL}
             WHERE header_uuid IN (SELECT uuid FROM todo_list_headers WHERE list_uuid = ?1)
             ORDER BY rowid ASC;"
        ))?;
        let mut items_by_header: HashMap<String, Vec<TodoListItem>> = HashMap::new();
        for row in item_stmt.query_map([list_id], read_item_columns)? {
            let item = into_item(row?)?;
            items_by_header
                .entry(item.header_id().to_string())
                .or_default()
                .push(item);
        }

        Ok(headers
            .into_iter()
            .map(|header| {
                let items = items_by_header.remove(header.uuid()).unwrap_or_default();
                TodoListSection::new(header, items)
            })
            .collect())
    }

    fn insert_todo_list(&self, list: &TodoList) -> bool {
        self.insert_row("todo_list", LIST_INSERT_SQL, params![list.uuid(), list.title()])
    }

    fn insert_header(&self, header: &TodoListHeader) -> bool {
        self.insert_row(
            "header",
            HEADER_INSERT_SQL,
            params![
                header.uuid(),
                header.list_id(),
                header.title(),
                header.position()
            ],
        )
    }

    fn insert_item(&self, item: &TodoListItem) -> bool {
        self.insert_row(
            "item",
            ITEM_INSERT_SQL,
            params![
                item.uuid(),
                item.header_id(),
                item.title(),
                item.details(),
                item.position(),
                item.is_done(),
                item.is_important()
            ],
        )
    }

    fn update_todo_list(&self, list: &TodoList) -> RepoResult<()> {
        self.write_row(
            &format!("{LIST_INSERT_SQL} ON CONFLICT(uuid) DO UPDATE SET title = excluded.title;"),
            params![list.uuid(), list.title()],
        )
    }

    fn update_header(&self, header: &TodoListHeader) -> RepoResult<()> {
        self.write_row(
            &format!(
                "{HEADER_INSERT_SQL}
                 ON CONFLICT(uuid) DO UPDATE SET
                    list_uuid = excluded.list_uuid,
                    title = excluded.title,
                    position = excluded.position;"
            ),
            params![
                header.uuid(),
                header.list_id(),
                header.title(),
                header.position()
            ],
        )
    }

    fn update_item(&self, item: &TodoListItem) -> RepoResult<()> {
        self.write_row(
            &format!(
                "{ITEM_INSERT_SQL}
                 ON CONFLICT(uuid) DO UPDATE SET
                    header_uuid = excluded.header_uuid,
                    title = excluded.title,
                    details = excluded.details,
                    position = excluded.position,
                    is_done = excluded.is_done,
                    is_important = excluded.is_important;"
            ),
            params![
                item.uuid(),
                item.header_id(),
                item.title(),
                item.details(),
                item.position(),
                item.is_done(),
                item.is_important()
            ],
        )
    }

    fn delete_todo_list(&self, uuid: &str) -> RepoResult<()> {
        self.write_row("DELETE FROM todo_lists WHERE uuid = ?1;", [uuid])
    }

    fn delete_header(&self, uuid: &str) -> RepoResult<()> {
        self.write_row("DELETE FROM todo_list_headers WHERE uuid = ?1;", [uuid])
    }

    fn delete_item(&self, uuid: &str) -> RepoResult<()> {
        self.write_row("DELETE FROM todo_list_items WHERE uuid = ?1;", [uuid])
    }
}

type ListColumns = (String, String);
type HeaderColumns = (String, String, String, u32);
type ItemColumns = (String, String, String, String, u32, bool, bool);

fn read_list_columns(row: &Row<'_>) -> rusqlite::Result<ListColumns> {
    Ok((row.get("uuid")?, row.get("title")?))
}

fn read_header_columns(row: &Row<'_>) -> rusqlite::Result<HeaderColumns> {
    Ok((
        row.get("uuid")?,
        row.get("list_uuid")?,
        row.get("title")?,
        row.get("position")?,
    ))
}

fn read_item_columns(row: &Row<'_>) -> rusqlite::Result<ItemColumns> {
    Ok((
        row.get("uuid")?,
        row.get("header_uuid")?,
        row.get("title")?,
        row.get("details")?,
        row.get("position")?,
        row.get("is_done")?,
        row.get("is_important")?,
    ))
}

fn invalid(table: &str, err: ValidationError) -> RepoError {
    RepoError::InvalidData(format!("{table}: {err}"))
}

fn into_list((uuid, title): ListColumns) -> RepoResult<TodoList> {
    TodoList::new(uuid, title).map_err(|err| invalid("todo_lists", err))
}

fn into_header((uuid, list_uuid, title, position): HeaderColumns) -> RepoResult<TodoListHeader> {
    TodoListHeader::new(uuid, list_uuid, title, position)
        .map_err(|err| invalid("todo_list_headers", err))
}

fn into_item(
    (uuid, header_uuid, title, details, position, is_done, is_important): ItemColumns,
) -> RepoResult<TodoListItem> {
    TodoListItem::new(uuid, header_uuid, title, position)
        .map(|item| {
            item.with_details(details)
                .with_done(is_done)
                .with_important(is_important)
        })
        .map_err(|err| invalid("todo_list_items", err))
}
