use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::storage::Storage;
use crate::{msg_info, msg_print};
use anyhow::Result;

pub fn cmd(store: &mut impl Storage) -> Result<()> {
    let users = store.select_users()?;

    if users.is_empty() {
        msg_info!(Message::NoUsersFound);
        return Ok(());
    }

    msg_print!(Message::UsersHeader, true);
    View::users(&users);
    Ok(())
}
