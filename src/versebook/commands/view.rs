use crate::commands::{CmdResult, ListedNode};
use crate::error::{Result, VersebookError};
use crate::model::Locale;
use crate::navigation::NavigationController;
use crate::store::{StorageBackend, StudyStore};
use crate::tree::StudyForest;

use super::helpers::resolve_id;

/// Selects a node and returns it with its breadcrumb. Folders also list
/// their contents.
pub fn run<B: StorageBackend>(
    store: &StudyStore<B>,
    nav: &mut NavigationController,
    id_input: &str,
    locale: Locale,
) -> Result<CmdResult> {
    let node_id = resolve_id(store.forest(), id_input)?;
    let node = store
        .find_node(&node_id)
        .cloned()
        .ok_or_else(|| VersebookError::NodeNotFound(node_id.clone()))?;
    let breadcrumb = store
        .forest()
        .find_path(&node_id)
        .unwrap_or_default()
        .iter()
        .map(|n| n.name().to_string())
        .collect();

    let contents: Vec<ListedNode> = StudyForest::from_nodes(node.children().to_vec())
        .walk()
        .into_iter()
        .map(|(depth, n)| ListedNode {
            depth,
            node: n.clone(),
        })
        .collect();

    nav.select_study_node(Some(node.clone()));

    let mut result = CmdResult::default()
        .with_locale(locale)
        .with_affected_nodes(vec![node])
        .with_listed_nodes(contents);
    result.breadcrumb = breadcrumb;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::model::{ActiveView, NodeKind};
    use crate::navigation::PrimaryContent;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn shows_node_with_breadcrumb_and_selects_it() {
        let mut store = StudyStore::open(MemBackend::new());
        let mut nav = NavigationController::new("pt_aa");
        let f = add::run(&mut store, &mut nav, NodeKind::Folder, None, "Romans").unwrap();
        let fid = f.affected_nodes[0].id().to_string();
        let r = add::run(&mut store, &mut nav, NodeKind::Reference, Some(&fid), "8:28").unwrap();
        let rid = r.affected_nodes[0].id().to_string();

        let result = run(&store, &mut nav, &rid, Locale::En).unwrap();
        assert_eq!(result.breadcrumb, vec!["Romans", "8:28"]);
        assert_eq!(nav.active_view(), ActiveView::Studies);
        assert!(matches!(nav.primary_content(), PrimaryContent::Study(n) if n.id() == rid));

        let folder = run(&store, &mut nav, &fid, Locale::En).unwrap();
        assert_eq!(folder.listed_nodes.len(), 1);
        assert_eq!(folder.listed_nodes[0].depth, 0);
    }

    #[test]
    fn unknown_id_is_an_error() {
        let store = StudyStore::open(MemBackend::new());
        let mut nav = NavigationController::new("pt_aa");
        assert!(matches!(
            run(&store, &mut nav, "nope", Locale::En),
            Err(VersebookError::NodeNotFound(_))
        ));
    }
}
