use crate::commands::{CmdMessage, CmdResult, ListedNode};
use crate::error::Result;
use crate::i18n::{t, Text};
use crate::model::Locale;
use crate::store::{StorageBackend, StudyStore};

/// The whole study tree, depth first.
pub fn run<B: StorageBackend>(store: &StudyStore<B>, locale: Locale) -> Result<CmdResult> {
    let listed: Vec<ListedNode> = store
        .forest()
        .walk()
        .into_iter()
        .map(|(depth, node)| ListedNode {
            depth,
            node: node.clone(),
        })
        .collect();

    let mut result = CmdResult::default().with_locale(locale);
    if let Some(warning) = store.load_warning() {
        result.add_message(CmdMessage::warning(warning));
    }
    if listed.is_empty() {
        result.add_message(CmdMessage::info(t(Text::NoStudies, locale)));
        result.add_message(CmdMessage::info(t(Text::ClickToStart, locale)));
    }
    Ok(result.with_listed_nodes(listed))
}
