//! Layout snapshots: a serde-friendly mirror of the workspace tree.
//!
//! The on-disk schema and file handling belong to the persistence
//! collaborator; this module guarantees the walk is lossless: node kind,
//! orientation, ratio, widget id, per-widget state blob and the active
//! ids all survive a capture/restore cycle.

use serde::{Deserialize, Serialize};

use super::layout::{NodeRef, Pane, PaneId, PaneTree, RestoredNode, SplitDirection};
use super::state::{Tab, TabId, Workspace};
use crate::services::config::WorkbenchConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaneSnapshot {
    pub id: u64,
    pub widget: String,
    #[serde(default)]
    pub state: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeSnapshot {
    Leaf {
        pane: PaneSnapshot,
    },
    Split {
        direction: SplitDirection,
        ratio: u16,
        first: Box<NodeSnapshot>,
        second: Box<NodeSnapshot>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabSnapshot {
    pub id: u64,
    pub name: String,
    pub root: NodeSnapshot,
    pub active_pane: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceSnapshot {
    pub tabs: Vec<TabSnapshot>,
    pub active_tab: usize,
}

pub fn capture(workspace: &Workspace) -> WorkspaceSnapshot {
    let tabs: Vec<_> = workspace
        .tabs()
        .map(|tab| TabSnapshot {
            id: tab.id().0,
            name: tab.name().to_string(),
            root: capture_node(tab.tree(), tab.tree().root()),
            active_pane: tab.active_pane().0,
        })
        .collect();
    let active_tab = tabs
        .iter()
        .position(|t| t.id == workspace.active_tab().id().0)
        .unwrap_or(0);

    WorkspaceSnapshot { tabs, active_tab }
}

fn capture_node(tree: &PaneTree, node: super::layout::NodeId) -> NodeSnapshot {
    match tree.node(node) {
        Some(NodeRef::Leaf(pane)) => NodeSnapshot::Leaf {
            pane: PaneSnapshot {
                id: pane.id().0,
                widget: pane.widget().to_string(),
                state: pane.state().clone(),
            },
        },
        Some(NodeRef::Split {
            direction,
            ratio,
            first,
            second,
        }) => NodeSnapshot::Split {
            direction,
            ratio,
            first: Box::new(capture_node(tree, first)),
            second: Box::new(capture_node(tree, second)),
        },
        None => unreachable!("snapshot walk only visits live nodes"),
    }
}

/// Rebuild a workspace from a snapshot. Pane and tab ids are preserved.
/// An active-pane id that no longer resolves falls back to the first
/// pre-order leaf; an empty snapshot yields a fresh default workspace.
pub fn restore(snapshot: &WorkspaceSnapshot, config: WorkbenchConfig) -> Workspace {
    if snapshot.tabs.is_empty() {
        return Workspace::new(config);
    }

    let tabs: Vec<_> = snapshot
        .tabs
        .iter()
        .map(|tab| {
            let tree = PaneTree::restore(restored_node(&tab.root));
            let active = PaneId(tab.active_pane);
            let active = if tree.contains(active) {
                active
            } else {
                tree.first_leaf(tree.root())
            };
            Tab::from_restored(TabId(tab.id), tab.name.clone(), tree, active)
        })
        .collect();

    Workspace::from_restored(config, tabs, snapshot.active_tab)
}

fn restored_node(snapshot: &NodeSnapshot) -> RestoredNode {
    match snapshot {
        NodeSnapshot::Leaf { pane } => RestoredNode::Leaf(Pane::with_state(
            PaneId(pane.id),
            &pane.widget,
            pane.state.clone(),
        )),
        NodeSnapshot::Split {
            direction,
            ratio,
            first,
            second,
        } => RestoredNode::Split {
            direction: *direction,
            ratio: *ratio,
            first: Box::new(restored_node(first)),
            second: Box::new(restored_node(second)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::layout::SplitDirection;

    fn sample_workspace() -> Workspace {
        let mut ws = Workspace::new(WorkbenchConfig::default());
        let p1 = ws.active_tab().active_pane();
        let p2 = ws
            .split_pane(
                p1,
                SplitDirection::Vertical,
                Some(300),
                Some("com.viloshell.editor"),
            )
            .unwrap();
        ws.split_pane(p2, SplitDirection::Horizontal, Some(650), None)
            .unwrap();
        ws.set_pane_state(p2, serde_json::json!({"cursor": [4, 12]}))
            .unwrap();
        ws.open_tab(Some("scratch"), None);
        ws
    }

    #[test]
    fn capture_restore_preserves_structure() {
        let ws = sample_workspace();
        let snapshot = capture(&ws);
        let restored = restore(&snapshot, WorkbenchConfig::default());

        assert_eq!(capture(&restored), snapshot);
    }

    #[test]
    fn capture_records_ratios_and_state_blobs() {
        let ws = sample_workspace();
        let snapshot = capture(&ws);

        let NodeSnapshot::Split { ratio, second, .. } = &snapshot.tabs[0].root else {
            panic!("expected split at root");
        };
        assert_eq!(*ratio, 300);
        let NodeSnapshot::Split { ratio, first, .. } = second.as_ref() else {
            panic!("expected nested split");
        };
        assert_eq!(*ratio, 650);
        let NodeSnapshot::Leaf { pane } = first.as_ref() else {
            panic!("expected leaf under nested split");
        };
        assert_eq!(pane.widget, "com.viloshell.editor");
        assert_eq!(pane.state, serde_json::json!({"cursor": [4, 12]}));
    }

    #[test]
    fn restore_preserves_pane_and_tab_identity() {
        let ws = sample_workspace();
        let snapshot = capture(&ws);
        let restored = restore(&snapshot, WorkbenchConfig::default());

        assert_eq!(restored.tab_count(), ws.tab_count());
        assert_eq!(restored.active_tab().id(), ws.active_tab().id());
        assert_eq!(restored.active_tab().active_pane(), ws.active_tab().active_pane());

        let original: Vec<_> = ws.tabs().map(|t| t.id()).collect();
        let rebuilt: Vec<_> = restored.tabs().map(|t| t.id()).collect();
        assert_eq!(original, rebuilt);
    }

    #[test]
    fn restore_survives_dangling_active_pane() {
        let ws = sample_workspace();
        let mut snapshot = capture(&ws);
        snapshot.tabs[0].active_pane = 999;

        let restored = restore(&snapshot, WorkbenchConfig::default());
        let tab = restored.tabs().next().unwrap();
        assert!(tab.tree().contains(tab.active_pane()));
    }

    #[test]
    fn json_round_trip_is_lossless() {
        let ws = sample_workspace();
        let snapshot = capture(&ws);

        let text = serde_json::to_string_pretty(&snapshot).unwrap();
        let parsed: WorkspaceSnapshot = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn new_panes_after_restore_get_fresh_ids() {
        let ws = sample_workspace();
        let snapshot = capture(&ws);
        let mut restored = restore(&snapshot, WorkbenchConfig::default());

        // First tab holds panes 1..=3; ids are monotonic per tree, so a
        // new split must not recycle any snapshot id.
        let first_tab = restored.tabs().next().unwrap().id();
        restored.select_tab(first_tab).unwrap();
        let max_id = restored
            .active_tab()
            .tree()
            .panes()
            .map(|p| p.id().0)
            .max()
            .unwrap();

        let active = restored.active_tab().active_pane();
        let fresh = restored
            .split_pane(active, SplitDirection::Vertical, None, None)
            .unwrap();
        assert_eq!(fresh.0, max_id + 1);
    }
}
