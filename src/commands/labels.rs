use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::storage::Storage;
use crate::{msg_info, msg_print};
use anyhow::Result;

pub fn cmd(store: &mut impl Storage) -> Result<()> {
    let labels = store.select_labels()?;

    if labels.is_empty() {
        msg_info!(Message::NoLabelsFound);
        return Ok(());
    }

    msg_print!(Message::LabelsHeader, true);
    View::labels(&labels);
    Ok(())
}
