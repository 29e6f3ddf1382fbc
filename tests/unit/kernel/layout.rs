use super::*;

const TERMINAL: &str = "com.viloshell.terminal";
const EDITOR: &str = "com.viloshell.editor";

fn single_pane() -> (PaneTree, PaneId) {
    let tree = PaneTree::new(TERMINAL);
    let root_pane = tree.first_leaf(tree.root());
    (tree, root_pane)
}

#[test]
fn new_tree_has_one_leaf() {
    let (tree, p1) = single_pane();
    assert_eq!(tree.leaf_count(), 1);
    assert_eq!(tree.depth(), 1);
    assert_eq!(tree.find_pane(p1).unwrap().widget(), TERMINAL);
    assert!(matches!(tree.node(tree.root()), Some(NodeRef::Leaf(_))));
}

#[test]
fn split_replaces_leaf_with_split_node() {
    let (mut tree, p1) = single_pane();
    let p2 = tree.split(p1, SplitDirection::Horizontal, 500, EDITOR).unwrap();

    assert_eq!(tree.leaf_count(), 2);
    assert_eq!(tree.depth(), 2);
    match tree.node(tree.root()) {
        Some(NodeRef::Split {
            direction,
            ratio,
            first,
            second,
        }) => {
            assert_eq!(direction, SplitDirection::Horizontal);
            assert_eq!(ratio, 500);
            assert_eq!(tree.first_leaf(first), p1);
            assert_eq!(tree.first_leaf(second), p2);
        }
        other => panic!("expected split at root, got {other:?}"),
    }
    assert_eq!(tree.find_pane(p2).unwrap().widget(), EDITOR);
}

#[test]
fn split_of_missing_pane_fails() {
    let (mut tree, _) = single_pane();
    let err = tree
        .split(PaneId(99), SplitDirection::Vertical, 500, EDITOR)
        .unwrap_err();
    assert!(matches!(err, LayoutError::PaneNotFound(PaneId(99))));
    assert_eq!(tree.leaf_count(), 1);
}

#[test]
fn split_clamps_ratio() {
    let (mut tree, p1) = single_pane();
    tree.split(p1, SplitDirection::Vertical, 0, EDITOR).unwrap();
    match tree.node(tree.root()) {
        Some(NodeRef::Split { ratio, .. }) => assert_eq!(ratio, RATIO_MIN),
        other => panic!("expected split, got {other:?}"),
    }
}

#[test]
fn remove_restores_pre_split_structure() {
    let (mut tree, p1) = single_pane();
    let before: Vec<_> = tree.panes().map(|p| p.id()).collect();

    let p2 = tree.split(p1, SplitDirection::Vertical, 300, EDITOR).unwrap();
    let (removed, promoted) = tree.remove(p2).unwrap();

    assert_eq!(removed.id(), p2);
    assert_eq!(tree.first_leaf(promoted), p1);
    assert_eq!(tree.leaf_count(), 1);
    assert_eq!(tree.depth(), 1);
    let after: Vec<_> = tree.panes().map(|p| p.id()).collect();
    assert_eq!(before, after);
    assert!(matches!(tree.node(tree.root()), Some(NodeRef::Leaf(_))));
}

#[test]
fn remove_promotes_sibling_subtree_in_place() {
    // Build p1 | (p2 / p3), then remove p1: the inner split becomes root.
    let (mut tree, p1) = single_pane();
    let p2 = tree.split(p1, SplitDirection::Vertical, 500, EDITOR).unwrap();
    let p3 = tree
        .split(p2, SplitDirection::Horizontal, 400, TERMINAL)
        .unwrap();
    assert_eq!(tree.depth(), 3);

    tree.remove(p1).unwrap();

    assert_eq!(tree.leaf_count(), 2);
    assert_eq!(tree.depth(), 2);
    match tree.node(tree.root()) {
        Some(NodeRef::Split {
            direction, ratio, ..
        }) => {
            assert_eq!(direction, SplitDirection::Horizontal);
            assert_eq!(ratio, 400);
        }
        other => panic!("expected inner split promoted to root, got {other:?}"),
    }
    let ids: Vec<_> = tree.panes().map(|p| p.id()).collect();
    assert_eq!(ids, vec![p2, p3]);
}

#[test]
fn remove_last_pane_fails_and_tree_survives() {
    let (mut tree, p1) = single_pane();
    assert!(matches!(tree.remove(p1), Err(LayoutError::LastPane)));
    assert_eq!(tree.leaf_count(), 1);
    assert!(tree.contains(p1));
}

#[test]
fn remove_missing_pane_fails() {
    let (mut tree, _) = single_pane();
    assert!(matches!(
        tree.remove(PaneId(42)),
        Err(LayoutError::PaneNotFound(PaneId(42)))
    ));
}

#[test]
fn resize_clamps_to_open_interval() {
    let (mut tree, p1) = single_pane();
    tree.split(p1, SplitDirection::Vertical, 500, EDITOR).unwrap();
    let split = tree.root();

    assert_eq!(tree.resize(split, 0).unwrap(), RATIO_MIN);
    assert_eq!(tree.resize(split, 1000).unwrap(), RATIO_MAX);
    assert_eq!(tree.resize(split, 650).unwrap(), 650);
}

#[test]
fn resize_is_idempotent() {
    let (mut tree, p1) = single_pane();
    tree.split(p1, SplitDirection::Vertical, 500, EDITOR).unwrap();
    let split = tree.root();

    tree.resize(split, 700).unwrap();
    let once = match tree.node(split) {
        Some(NodeRef::Split { ratio, .. }) => ratio,
        _ => unreachable!(),
    };
    tree.resize(split, 700).unwrap();
    let twice = match tree.node(split) {
        Some(NodeRef::Split { ratio, .. }) => ratio,
        _ => unreachable!(),
    };
    assert_eq!(once, twice);
}

#[test]
fn resize_on_leaf_fails() {
    let (mut tree, p1) = single_pane();
    let leaf = tree.pane_node(p1).unwrap();
    assert!(matches!(
        tree.resize(leaf, 500),
        Err(LayoutError::NotASplit(_))
    ));
}

#[test]
fn preorder_traversal_is_deterministic() {
    let (mut tree, p1) = single_pane();
    let p2 = tree.split(p1, SplitDirection::Vertical, 500, EDITOR).unwrap();
    let p3 = tree
        .split(p1, SplitDirection::Horizontal, 500, TERMINAL)
        .unwrap();

    // p1's leaf was split again: first child keeps p1, second holds p3.
    let ids: Vec<_> = tree.panes().map(|p| p.id()).collect();
    assert_eq!(ids, vec![p1, p3, p2]);
}

#[test]
fn pane_ids_are_never_reused() {
    let (mut tree, p1) = single_pane();
    let p2 = tree.split(p1, SplitDirection::Vertical, 500, EDITOR).unwrap();
    tree.remove(p2).unwrap();
    let p3 = tree.split(p1, SplitDirection::Vertical, 500, EDITOR).unwrap();
    assert_ne!(p2, p3);
}

#[test]
fn parent_split_tracks_structure() {
    let (mut tree, p1) = single_pane();
    assert!(tree.parent_split(p1).is_none());

    let p2 = tree.split(p1, SplitDirection::Vertical, 500, EDITOR).unwrap();
    let split = tree.parent_split(p1).unwrap();
    assert_eq!(tree.parent_split(p2), Some(split));
    assert_eq!(split, tree.root());
}

#[test]
fn replace_widget_keeps_pane_id_and_resets_state() {
    let (mut tree, p1) = single_pane();
    tree.find_pane_mut(p1)
        .unwrap()
        .set_state(serde_json::json!({"scrollback": 120}));

    tree.replace_widget(p1, EDITOR).unwrap();

    let pane = tree.find_pane(p1).unwrap();
    assert_eq!(pane.widget(), EDITOR);
    assert_eq!(pane.state(), &serde_json::Value::Null);
}
