use crate::commands::CmdMessage;
use crate::corpus::structure;
use crate::error::{Result, VersebookError};
use crate::store::StoreChange;
use crate::tree::{MutationOutcome, StudyForest};

/// Length of the id prefix shown in listings.
pub const SHORT_ID_LEN: usize = 8;

pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// Resolves a full id or an unambiguous id prefix.
pub fn resolve_id(forest: &StudyForest, input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(VersebookError::Api("Node id cannot be empty".to_string()));
    }
    if forest.contains(input) {
        return Ok(input.to_string());
    }

    let matches: Vec<&str> = forest
        .walk()
        .into_iter()
        .map(|(_, node)| node.id())
        .filter(|id| id.starts_with(input))
        .collect();

    match matches.as_slice() {
        [id] => Ok(id.to_string()),
        [] => Err(VersebookError::NodeNotFound(input.to_string())),
        _ => Err(VersebookError::Api(format!(
            "Id prefix '{}' matches {} nodes; use more characters",
            input,
            matches.len()
        ))),
    }
}

/// Resolves a book given by id or by English/Portuguese name. Unknown
/// input is passed through as an id so document versions with their own
/// abbreviations still resolve.
pub fn resolve_book(input: &str) -> String {
    structure::lookup_book(input)
        .map(str::to_string)
        .unwrap_or_else(|| input.trim().to_lowercase())
}

/// Messages for a store change that did not apply or was not saved.
pub fn change_messages(change: &StoreChange) -> Vec<CmdMessage> {
    let mut messages = Vec::new();
    if let MutationOutcome::Skipped(reason) = &change.outcome {
        messages.push(CmdMessage::warning(format!("Nothing changed: {}", reason)));
    }
    if let Some(err) = &change.persist_error {
        messages.push(CmdMessage::warning(format!(
            "Change kept for this session only, saving failed: {}",
            err
        )));
    }
    messages
}
