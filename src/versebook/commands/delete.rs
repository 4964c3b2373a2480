use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VersebookError};
use crate::navigation::NavigationController;
use crate::store::{StorageBackend, StudyStore};

use super::helpers::{change_messages, resolve_id, short_id};

pub fn run<B: StorageBackend>(
    store: &mut StudyStore<B>,
    nav: &mut NavigationController,
    id_input: &str,
) -> Result<CmdResult> {
    let node_id = match resolve_id(store.forest(), id_input) {
        Ok(id) => id,
        Err(VersebookError::NodeNotFound(_)) => id_input.to_string(),
        Err(e) => return Err(e),
    };
    let removed = store.find_node(&node_id).cloned();
    let nested = store.forest().subtree_size(&node_id).saturating_sub(1);

    let change = store.delete(&node_id);
    nav.refresh_selection(store.forest());

    let mut result = CmdResult::default();
    if let (true, Some(node)) = (change.is_applied(), removed) {
        let suffix = match nested {
            0 => String::new(),
            1 => " and 1 nested item".to_string(),
            n => format!(" and {} nested items", n),
        };
        result.add_message(CmdMessage::success(format!(
            "Deleted ({}): {}{}",
            short_id(node.id()),
            node.name(),
            suffix
        )));
        result.affected_nodes.push(node);
    }
    for message in change_messages(&change) {
        result.add_message(message);
    }
    Ok(result)
}
