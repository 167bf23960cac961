//! `todokit` command line entry point.
//!
//! # Responsibility
//! - Resolve configuration from file and flags.
//! - Schedule one interactor per command and print what its callback
//!   delivers on the main thread.

mod args;
mod session;

use anyhow::{Context, Result};
use args::{Cli, Commands, ItemFlags};
use clap::Parser;
use log::info;
use session::{deliver, slot, Session};
use std::sync::Arc;
use todokit_core::{
    init_logging, CoreConfig, CreateHeaderCallback, CreateHeaderInteractor, CreateHeaderRequest,
    CreateItemCallback, CreateItemInteractor, CreateItemRequest, CreateTodoListCallback,
    CreateTodoListInteractor, DeleteHeaderCallback, DeleteHeaderInteractor, DeleteItemCallback,
    DeleteItemInteractor, DeleteTodoListCallback, DeleteTodoListInteractor,
    DisplayTodoListCallback, DisplayTodoListInteractor, EditItemCallback, EditItemInteractor,
    EditItemRequest, ListEntry, RowView, TodoList, TodoListHeader, TodoListItem,
};
use std::path::PathBuf;

/// Database used when neither `--db` nor `database_path` is given.
const DEFAULT_DATABASE_FILE: &str = "todokit.sqlite3";

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir)?;
    }

    let session = Session::start(&config)?;
    run(&session, cli.command)
}

fn resolve_config(cli: &Cli) -> Result<CoreConfig> {
    let mut config = CoreConfig::load_from(&cli.config)
        .with_context(|| format!("cannot load `{}`", cli.config.display()))?;
    if let Some(db) = &cli.db {
        config.database_path = Some(db.clone());
    }
    if config.database_path.is_none() {
        config.database_path = Some(PathBuf::from(DEFAULT_DATABASE_FILE));
    }
    if let Some(log_dir) = &cli.log_dir {
        config.log_dir = Some(log_dir.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(workers) = cli.workers {
        config.worker_threads = workers;
    }
    config.validate()?;
    Ok(config)
}

fn run(session: &Session, command: Commands) -> Result<()> {
    match command {
        Commands::Lists => {
            for list in session.repository.get_all_todo_lists()? {
                println!("{}\t{}", list.uuid(), list.title());
            }
        }
        Commands::NewList { title } => {
            let created = slot::<TodoList>();
            let callback: Arc<dyn CreateTodoListCallback> = Arc::new(deliver(&created));
            CreateTodoListInteractor::new(
                Arc::clone(&session.executor),
                Arc::clone(&session.main_thread),
                callback,
                Arc::clone(&session.repository),
                title,
            )
            .execute();
            let list = session.wait_for(&created)?;
            println!("created list {}", list.uuid());
        }
        Commands::DeleteList { uuid } => {
            let deleted = slot::<String>();
            let callback: Arc<dyn DeleteTodoListCallback> = Arc::new(deliver(&deleted));
            DeleteTodoListInteractor::new(
                Arc::clone(&session.executor),
                Arc::clone(&session.main_thread),
                callback,
                Arc::clone(&session.repository),
                uuid,
            )
            .execute();
            println!("deleted list {}", session.wait_for(&deleted)?);
        }
        Commands::AddHeader {
            list,
            title,
            position,
        } => {
            let created = slot::<TodoListHeader>();
            let callback: Arc<dyn CreateHeaderCallback> = Arc::new(deliver(&created));
            CreateHeaderInteractor::new(
                Arc::clone(&session.executor),
                Arc::clone(&session.main_thread),
                callback,
                Arc::clone(&session.repository),
                CreateHeaderRequest {
                    list_id: list,
                    title,
                    position,
                },
            )
            .execute();
            let header = session.wait_for(&created)?;
            println!("created header {}", header.uuid());
        }
        Commands::DeleteHeader { uuid } => {
            let deleted = slot::<String>();
            let callback: Arc<dyn DeleteHeaderCallback> = Arc::new(deliver(&deleted));
            DeleteHeaderInteractor::new(
                Arc::clone(&session.executor),
                Arc::clone(&session.main_thread),
                callback,
                Arc::clone(&session.repository),
                uuid,
            )
            .execute();
            println!("deleted header {}", session.wait_for(&deleted)?);
        }
        Commands::AddItem {
            header,
            title,
            position,
            flags: ItemFlags { details, important },
        } => {
            let created = slot::<TodoListItem>();
            let callback: Arc<dyn CreateItemCallback> = Arc::new(deliver(&created));
            CreateItemInteractor::new(
                Arc::clone(&session.executor),
                Arc::clone(&session.main_thread),
                callback,
                Arc::clone(&session.repository),
                CreateItemRequest {
                    header_id: header,
                    title,
                    position,
                    details,
                    is_important: important,
                },
            )
            .execute();
            let item = session.wait_for(&created)?;
            println!("created item {}", item.uuid());
        }
        Commands::EditItem {
            uuid,
            header,
            title,
            position,
            done,
            flags: ItemFlags { details, important },
        } => {
            let updated = slot::<TodoListItem>();
            let callback: Arc<dyn EditItemCallback> = Arc::new(deliver(&updated));
            EditItemInteractor::new(
                Arc::clone(&session.executor),
                Arc::clone(&session.main_thread),
                callback,
                Arc::clone(&session.repository),
                EditItemRequest {
                    uuid,
                    title,
                    position,
                    is_done: done,
                    details,
                    is_important: important,
                    parent_header_id: header,
                },
            )
            .execute();
            let item = session.wait_for(&updated)?;
            println!("updated item {}", item.uuid());
        }
        Commands::DeleteItem { uuid } => {
            let deleted = slot::<String>();
            let callback: Arc<dyn DeleteItemCallback> = Arc::new(deliver(&deleted));
            DeleteItemInteractor::new(
                Arc::clone(&session.executor),
                Arc::clone(&session.main_thread),
                callback,
                Arc::clone(&session.repository),
                uuid,
            )
            .execute();
            println!("deleted item {}", session.wait_for(&deleted)?);
        }
        Commands::Show { list } => {
            let retrieved = slot::<(Option<TodoList>, Vec<ListEntry>)>();
            let sink = deliver(&retrieved);
            let callback: Arc<dyn DisplayTodoListCallback> =
                Arc::new(move |list: Option<TodoList>, entries: Vec<ListEntry>| sink((list, entries)));
            DisplayTodoListInteractor::new(
                Arc::clone(&session.executor),
                Arc::clone(&session.main_thread),
                callback,
                Arc::clone(&session.repository),
                list.as_str(),
            )
            .execute();
            match session.wait_for(&retrieved)? {
                (Some(todo_list), entries) => print_list(&todo_list, &entries),
                (None, _) => println!("no list {list}"),
            }
        }
    }
    info!("event=cli_command module=cli status=ok");
    Ok(())
}

fn print_list(list: &TodoList, entries: &[ListEntry]) {
    println!("{}", list.title());
    for entry in entries {
        match RowView::from(entry) {
            RowView::Header { title } => println!("\n## {title}"),
            RowView::Item {
                title,
                is_done,
                is_important,
                has_details,
            } => {
                let mark = if is_done { "x" } else { " " };
                let flag = if is_important { " !" } else { "" };
                let more = if has_details { " +" } else { "" };
                println!("  [{mark}] {title}{flag}{more}  {}", entry.uuid());
            }
        }
    }
}
