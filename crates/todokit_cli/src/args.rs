use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "todokit")]
#[command(about = "Manage sectioned todo lists", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML config file; defaults apply when it does not exist.
    #[arg(long, default_value = "todokit.toml", global = true)]
    pub config: PathBuf,

    /// SQLite database file; overrides `database_path`.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Absolute log directory; overrides `log_dir`.
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[arg(long, global = true)]
    pub workers: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print every todo list.
    Lists,

    NewList {
        #[arg(long)]
        title: String,
    },

    DeleteList {
        #[arg(long)]
        uuid: String,
    },

    AddHeader {
        #[arg(long)]
        list: String,

        #[arg(long)]
        title: String,

        #[arg(long, default_value = "0")]
        position: u32,
    },

    DeleteHeader {
        #[arg(long)]
        uuid: String,
    },

    AddItem {
        #[arg(long)]
        header: String,

        #[arg(long)]
        title: String,

        #[arg(long, default_value = "0")]
        position: u32,

        #[command(flatten)]
        flags: ItemFlags,
    },

    /// Edit an item; an unknown uuid creates it.
    EditItem {
        #[arg(long)]
        uuid: String,

        #[arg(long)]
        header: String,

        #[arg(long)]
        title: String,

        #[arg(long, default_value = "0")]
        position: u32,

        #[arg(long)]
        done: bool,

        #[command(flatten)]
        flags: ItemFlags,
    },

    DeleteItem {
        #[arg(long)]
        uuid: String,
    },

    /// Print one list, headers followed by their items.
    Show {
        #[arg(long)]
        list: String,
    },
}

#[derive(Args)]
pub struct ItemFlags {
    #[arg(long, default_value = "")]
    pub details: String,

    #[arg(long)]
    pub important: bool,
}
