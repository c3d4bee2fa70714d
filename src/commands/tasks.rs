use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::storage::Storage;
use crate::{msg_info, msg_print};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct TasksArgs {
    /// Only tasks created by this user
    #[arg(long, conflicts_with = "label")]
    author: Option<i64>,

    /// Only tasks carrying this label
    #[arg(long)]
    label: Option<i64>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

pub fn cmd(store: &mut impl Storage, args: TasksArgs) -> Result<()> {
    let (header, tasks) = match (args.author, args.label) {
        (Some(author_id), _) => (Message::TasksByAuthorHeader(author_id), store.select_tasks_by_author_id(author_id)?),
        (None, Some(label_id)) => (Message::TasksByLabelHeader(label_id), store.select_tasks_by_label_id(label_id)?),
        (None, None) => (Message::TasksHeader, store.select_tasks()?),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    if tasks.is_empty() {
        msg_info!(Message::NoTasksFound);
        return Ok(());
    }

    msg_print!(header, true);
    View::tasks(&tasks);
    Ok(())
}
