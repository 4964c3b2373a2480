use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VersebookError};
use crate::i18n::{t, Text};
use crate::model::Locale;
use crate::navigation::NavigationController;
use crate::store::{StorageBackend, StudyStore};

use super::helpers::{change_messages, resolve_id};

/// Replaces the note text of a reference.
pub fn run<B: StorageBackend>(
    store: &mut StudyStore<B>,
    nav: &mut NavigationController,
    id_input: &str,
    content: &str,
    locale: Locale,
) -> Result<CmdResult> {
    let node_id = match resolve_id(store.forest(), id_input) {
        Ok(id) => id,
        Err(VersebookError::NodeNotFound(_)) => id_input.to_string(),
        Err(e) => return Err(e),
    };
    let change = store.update_reference_content(&node_id, content);
    nav.refresh_selection(store.forest());

    let mut result = CmdResult::default().with_locale(locale);
    if change.is_applied() {
        if let Some(node) = store.find_node(&node_id) {
            result.affected_nodes.push(node.clone());
        }
        result.add_message(CmdMessage::success(t(Text::NoteSaved, locale)));
    }
    for message in change_messages(&change) {
        result.add_message(message);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{add, MessageLevel};
    use crate::model::NodeKind;
    use crate::store::mem_backend::MemBackend;

    fn setup() -> (StudyStore<MemBackend>, NavigationController, String, String) {
        let mut store = StudyStore::open(MemBackend::new());
        let mut nav = NavigationController::new("pt_aa");
        let f = add::run(&mut store, &mut nav, NodeKind::Folder, None, "F").unwrap();
        let fid = f.affected_nodes[0].id().to_string();
        let r = add::run(&mut store, &mut nav, NodeKind::Reference, Some(&fid), "R").unwrap();
        let rid = r.affected_nodes[0].id().to_string();
        (store, nav, fid, rid)
    }

    #[test]
    fn saves_note_and_is_idempotent() {
        let (mut store, mut nav, _, rid) = setup();
        let first = run(&mut store, &mut nav, &rid, "grace", Locale::Pt).unwrap();
        assert_eq!(first.messages[0].content, "Nota salva!");
        let once = store.forest().clone();
        run(&mut store, &mut nav, &rid, "grace", Locale::Pt).unwrap();
        assert_eq!(store.forest(), &once);
        assert_eq!(store.find_node(&rid).unwrap().content(), Some("grace"));
    }

    #[test]
    fn folders_have_no_content() {
        let (mut store, mut nav, fid, _) = setup();
        let result = run(&mut store, &mut nav, &fid, "text", Locale::En).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert!(result.affected_nodes.is_empty());
    }

    #[test]
    fn unknown_id_changes_nothing() {
        let (mut store, mut nav, _, _) = setup();
        let before = store.forest().clone();
        let result = run(&mut store, &mut nav, "missing", "x", Locale::En).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(store.forest(), &before);
    }

    #[test]
    fn selected_note_sees_new_content() {
        let (mut store, mut nav, _, rid) = setup();
        nav.select_study_node(store.find_node(&rid).cloned());
        run(&mut store, &mut nav, &rid, "updated", Locale::En).unwrap();
        assert_eq!(nav.selected_node().unwrap().content(), Some("updated"));
    }
}
