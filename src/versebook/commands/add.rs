use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VersebookError};
use crate::model::NodeKind;
use crate::navigation::NavigationController;
use crate::store::{StorageBackend, StudyStore};
use crate::tree::MutationOutcome;

use super::helpers::{change_messages, resolve_id, short_id};

pub fn run<B: StorageBackend>(
    store: &mut StudyStore<B>,
    nav: &mut NavigationController,
    kind: NodeKind,
    parent: Option<&str>,
    name: &str,
) -> Result<CmdResult> {
    // An unknown parent is left for the store to skip with a warning.
    let parent_id = match parent {
        None => None,
        Some(input) => match resolve_id(store.forest(), input) {
            Ok(id) => Some(id),
            Err(VersebookError::NodeNotFound(_)) => Some(input.to_string()),
            Err(e) => return Err(e),
        },
    };

    let change = store.add(kind, parent_id.as_deref(), name.trim());
    nav.refresh_selection(store.forest());

    let mut result = CmdResult::default();
    if let MutationOutcome::Applied { id } = &change.outcome {
        if let Some(node) = store.find_node(id) {
            result.add_message(CmdMessage::success(format!(
                "{} added ({}): {}",
                capitalize(kind.as_str()),
                short_id(id),
                node.name()
            )));
            result.affected_nodes.push(node.clone());
        }
    }
    for message in change_messages(&change) {
        result.add_message(message);
    }
    Ok(result)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
