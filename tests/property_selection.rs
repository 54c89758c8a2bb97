use std::sync::Arc;

use casegen::adapters::mock::MockGenerationService;
use casegen::domain::models::{SelectionSet, WorkflowConfig};
use casegen::services::WorkflowEngine;
use proptest::prelude::*;
use std::collections::HashSet;

fn path_strategy() -> impl Strategy<Value = String> {
    "[a-c]{1,2}(/[a-c]{1,2})?\\.js"
}

proptest! {
    /// Property: toggling the same path twice restores the selection set
    #[test]
    fn prop_toggle_twice_is_identity(
        initial in prop::collection::vec(path_strategy(), 0..8),
        path in path_strategy(),
    ) {
        let mut selection: SelectionSet = initial.iter().map(String::as_str).collect();
        let before = selection.clone();

        selection.toggle(&path);
        selection.toggle(&path);

        prop_assert_eq!(selection, before);
    }

    /// Property: the selection holds exactly the paths toggled an odd number
    /// of times, in the order they were last added
    #[test]
    fn prop_selection_matches_toggle_parity(
        toggles in prop::collection::vec(path_strategy(), 0..24),
    ) {
        let mut selection = SelectionSet::new();
        let mut expected: Vec<String> = Vec::new();

        for path in &toggles {
            let selected = selection.toggle(path);
            if let Some(pos) = expected.iter().position(|p| p == path) {
                expected.remove(pos);
                prop_assert!(!selected);
            } else {
                expected.push(path.clone());
                prop_assert!(selected);
            }
        }

        prop_assert_eq!(selection.to_vec(), expected);
        let unique: HashSet<&String> = toggles.iter().collect();
        prop_assert!(selection.len() <= unique.len());
    }

    /// Property: a successful reload empties the selection whatever it was
    #[test]
    fn prop_reload_always_clears_selection(
        toggles in prop::collection::vec(path_strategy(), 0..12),
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let snapshot = runtime.block_on(async {
            let service = Arc::new(MockGenerationService::new().with_listing(["a.js", "b.js"]));
            let engine = WorkflowEngine::new(service, WorkflowConfig::default());
            engine.load_listing("https://example.com/r").await.unwrap();
            for path in &toggles {
                engine.toggle_selection(path).await;
            }
            engine.load_listing("https://example.com/r").await.unwrap();
            engine.snapshot().await
        });

        prop_assert!(snapshot.selection.is_empty());
        prop_assert!(snapshot.summaries.is_empty());
        prop_assert!(snapshot.generated_code.is_none());
    }
}

/// Property: selection equality ignores insertion order
#[test_strategy::proptest]
fn prop_selection_equality_is_set_equality(
    #[strategy(prop::collection::hash_set(path_strategy(), 0..8))] paths: HashSet<String>,
) {
    let ordered: Vec<&String> = paths.iter().collect();
    let forward: SelectionSet = ordered.iter().map(|p| p.as_str()).collect();
    let backward: SelectionSet = ordered.iter().rev().map(|p| p.as_str()).collect();

    prop_assert_eq!(forward, backward);
}
