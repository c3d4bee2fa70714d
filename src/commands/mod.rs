//! Command-line interface for tasklink.
//!
//! Every command receives the store it works on as an argument; the store is
//! opened once here from `--memory`, `--db` or the `TASKLINK_DB` variable.

pub mod demo;
pub mod labels;
pub mod tasks;
pub mod users;

use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::msg_debug;
use crate::storage::{Storage, Store};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Seed users, labels and tasks and print every outcome")]
    Demo,
    #[command(about = "List users")]
    Users,
    #[command(about = "List labels")]
    Labels,
    #[command(about = "List tasks")]
    Tasks(tasks::TasksArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    /// Database file, overrides TASKLINK_DB
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Use a throwaway in-memory database
    #[arg(long, global = true, conflicts_with = "db")]
    memory: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        let mut store = cli.open_store()?;

        let result = match cli.command {
            Commands::Demo => demo::cmd(&mut store),
            Commands::Users => users::cmd(&mut store),
            Commands::Labels => labels::cmd(&mut store),
            Commands::Tasks(args) => tasks::cmd(&mut store, args),
        };

        store.close();
        result
    }

    fn open_store(&self) -> Result<Store> {
        if self.memory {
            msg_debug!(Message::InMemoryDatabase);
            return Store::open_in_memory().context("failed to open in-memory database");
        }

        let config = Config::resolve(self.db.clone())?;
        msg_debug!(Message::DatabaseOpened(config.db_path.display().to_string()));
        Store::open(&config.db_path).with_context(|| format!("failed to open database {}", config.db_path.display()))
    }
}
