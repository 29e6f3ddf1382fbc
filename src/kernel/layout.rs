//! Split-pane layout tree.
//!
//! A tab's layout is a binary tree kept in a slotmap arena: leaves hold
//! panes, splits hold a direction, a per-mille ratio and exactly two
//! children. Parent links are arena keys, so "find the parent split" is a
//! map lookup rather than a walk. The tree always contains at least one
//! leaf; the final pane can be replaced but never removed.

use std::fmt;

use compact_str::CompactString;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

new_key_type! { pub struct NodeId; }

/// Ratio bounds, per-mille of the first child's share. Resize and split
/// clamp into this interval so neither side can collapse to zero.
pub const RATIO_MIN: u16 = 50;
pub const RATIO_MAX: u16 = 950;
pub const RATIO_DEFAULT: u16 = 500;

/// Identity of a pane, stable for the lifetime of its tree.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PaneId(pub u64);

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pane#{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitDirection {
    Horizontal,
    Vertical,
}

#[derive(Debug)]
pub enum LayoutError {
    PaneNotFound(PaneId),
    TabNotFound,
    LastPane,
    LastTab,
    NotASplit(NodeId),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::PaneNotFound(pane) => write!(f, "{pane} does not exist in this layout"),
            LayoutError::TabNotFound => write!(f, "tab does not exist"),
            LayoutError::LastPane => write!(f, "the last pane cannot be removed"),
            LayoutError::LastTab => write!(f, "the last tab cannot be closed"),
            LayoutError::NotASplit(_) => write!(f, "node is not a split"),
        }
    }
}

impl std::error::Error for LayoutError {}

/// A leaf content slot: which widget fills it, plus that widget's opaque
/// state blob (restored verbatim by the rendering collaborator).
#[derive(Debug, Clone, PartialEq)]
pub struct Pane {
    id: PaneId,
    widget: CompactString,
    state: serde_json::Value,
}

impl Pane {
    fn new(id: PaneId, widget: &str) -> Self {
        Self {
            id,
            widget: CompactString::from(widget),
            state: serde_json::Value::Null,
        }
    }

    pub fn id(&self) -> PaneId {
        self.id
    }

    pub fn widget(&self) -> &str {
        &self.widget
    }

    pub fn state(&self) -> &serde_json::Value {
        &self.state
    }

    pub fn set_state(&mut self, state: serde_json::Value) {
        self.state = state;
    }

    pub(crate) fn set_widget(&mut self, widget: &str) {
        self.widget = CompactString::from(widget);
        self.state = serde_json::Value::Null;
    }

    pub(crate) fn with_state(id: PaneId, widget: &str, state: serde_json::Value) -> Self {
        Self {
            id,
            widget: CompactString::from(widget),
            state,
        }
    }
}

#[derive(Debug, Clone)]
enum NodeKind {
    Leaf(Pane),
    Split {
        direction: SplitDirection,
        ratio: u16,
        first: NodeId,
        second: NodeId,
    },
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    kind: NodeKind,
}

/// Read-only view of a node, handed to the rendering layer.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Leaf(&'a Pane),
    Split {
        direction: SplitDirection,
        ratio: u16,
        first: NodeId,
        second: NodeId,
    },
}

pub struct PaneTree {
    arena: SlotMap<NodeId, Node>,
    root: NodeId,
    pane_index: FxHashMap<PaneId, NodeId>,
    next_pane: u64,
}

impl PaneTree {
    pub fn new(widget: &str) -> Self {
        let mut arena = SlotMap::with_key();
        let pane = Pane::new(PaneId(1), widget);
        let id = pane.id;
        let root = arena.insert(Node {
            parent: None,
            kind: NodeKind::Leaf(pane),
        });

        let mut pane_index = FxHashMap::default();
        pane_index.insert(id, root);

        Self {
            arena,
            root,
            pane_index,
            next_pane: 2,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.arena.get(id).map(|node| match &node.kind {
            NodeKind::Leaf(pane) => NodeRef::Leaf(pane),
            NodeKind::Split {
                direction,
                ratio,
                first,
                second,
            } => NodeRef::Split {
                direction: *direction,
                ratio: *ratio,
                first: *first,
                second: *second,
            },
        })
    }

    pub fn find_pane(&self, pane: PaneId) -> Option<&Pane> {
        let node = self.pane_index.get(&pane)?;
        match &self.arena[*node].kind {
            NodeKind::Leaf(p) => Some(p),
            NodeKind::Split { .. } => None,
        }
    }

    pub fn find_pane_mut(&mut self, pane: PaneId) -> Option<&mut Pane> {
        let node = *self.pane_index.get(&pane)?;
        match &mut self.arena[node].kind {
            NodeKind::Leaf(p) => Some(p),
            NodeKind::Split { .. } => None,
        }
    }

    pub fn contains(&self, pane: PaneId) -> bool {
        self.pane_index.contains_key(&pane)
    }

    /// The leaf node currently holding `pane`.
    pub fn pane_node(&self, pane: PaneId) -> Option<NodeId> {
        self.pane_index.get(&pane).copied()
    }

    /// The split immediately above `pane`, if any.
    pub fn parent_split(&self, pane: PaneId) -> Option<NodeId> {
        let node = self.pane_index.get(&pane)?;
        self.arena[*node].parent
    }

    /// Panes in deterministic pre-order (first child before second).
    pub fn panes(&self) -> Panes<'_> {
        Panes {
            tree: self,
            stack: vec![self.root],
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.pane_index.len()
    }

    pub fn depth(&self) -> usize {
        self.depth_of(self.root)
    }

    fn depth_of(&self, id: NodeId) -> usize {
        match &self.arena[id].kind {
            NodeKind::Leaf(_) => 1,
            NodeKind::Split { first, second, .. } => {
                1 + self.depth_of(*first).max(self.depth_of(*second))
            }
        }
    }

    /// First pre-order leaf under `id`.
    pub fn first_leaf(&self, id: NodeId) -> PaneId {
        let mut current = id;
        loop {
            match &self.arena[current].kind {
                NodeKind::Leaf(pane) => return pane.id,
                NodeKind::Split { first, .. } => current = *first,
            }
        }
    }

    /// Replace the leaf holding `pane` with a split whose first child is
    /// the original pane and whose second child is a fresh pane showing
    /// `widget`. Returns the new pane's id.
    pub fn split(
        &mut self,
        pane: PaneId,
        direction: SplitDirection,
        ratio: u16,
        widget: &str,
    ) -> Result<PaneId, LayoutError> {
        let leaf = *self
            .pane_index
            .get(&pane)
            .ok_or(LayoutError::PaneNotFound(pane))?;
        let parent = self.arena[leaf].parent;
        let ratio = ratio.clamp(RATIO_MIN, RATIO_MAX);

        let new_pane = Pane::new(PaneId(self.next_pane), widget);
        let new_pane_id = new_pane.id;
        self.next_pane += 1;

        let second = self.arena.insert(Node {
            parent: None,
            kind: NodeKind::Leaf(new_pane),
        });
        let split = self.arena.insert(Node {
            parent,
            kind: NodeKind::Split {
                direction,
                ratio,
                first: leaf,
                second,
            },
        });

        self.arena[leaf].parent = Some(split);
        self.arena[second].parent = Some(split);
        self.pane_index.insert(new_pane_id, second);

        match parent {
            Some(parent) => self.replace_child(parent, leaf, split),
            None => self.root = split,
        }

        Ok(new_pane_id)
    }

    /// Remove the leaf holding `pane`; its sibling subtree takes the
    /// parent split's place. Returns the removed pane together with the
    /// root of the promoted sibling subtree.
    pub fn remove(&mut self, pane: PaneId) -> Result<(Pane, NodeId), LayoutError> {
        let leaf = *self
            .pane_index
            .get(&pane)
            .ok_or(LayoutError::PaneNotFound(pane))?;
        let split = self.arena[leaf].parent.ok_or(LayoutError::LastPane)?;

        let sibling = match self.arena[split].kind {
            NodeKind::Split { first, second, .. } => {
                if first == leaf {
                    second
                } else {
                    first
                }
            }
            NodeKind::Leaf(_) => unreachable!("leaf parent must be a split"),
        };
        let grandparent = self.arena[split].parent;

        self.arena[sibling].parent = grandparent;
        match grandparent {
            Some(grandparent) => self.replace_child(grandparent, split, sibling),
            None => self.root = sibling,
        }

        self.arena.remove(split);
        let removed = self.arena.remove(leaf);
        self.pane_index.remove(&pane);

        match removed {
            Some(Node {
                kind: NodeKind::Leaf(pane),
                ..
            }) => Ok((pane, sibling)),
            _ => unreachable!("pane index always points at live leaves"),
        }
    }

    /// Set a split's ratio, clamped into [RATIO_MIN, RATIO_MAX]. Returns
    /// the ratio actually stored.
    pub fn resize(&mut self, id: NodeId, ratio: u16) -> Result<u16, LayoutError> {
        let node = self.arena.get_mut(id).ok_or(LayoutError::NotASplit(id))?;
        match &mut node.kind {
            NodeKind::Split { ratio: slot, .. } => {
                let clamped = ratio.clamp(RATIO_MIN, RATIO_MAX);
                *slot = clamped;
                Ok(clamped)
            }
            NodeKind::Leaf(_) => Err(LayoutError::NotASplit(id)),
        }
    }

    /// Swap the widget shown in `pane`, resetting its state blob.
    pub fn replace_widget(&mut self, pane: PaneId, widget: &str) -> Result<(), LayoutError> {
        let found = self
            .find_pane_mut(pane)
            .ok_or(LayoutError::PaneNotFound(pane))?;
        found.set_widget(widget);
        Ok(())
    }

    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        match &mut self.arena[parent].kind {
            NodeKind::Split { first, second, .. } => {
                if *first == old {
                    *first = new;
                } else if *second == old {
                    *second = new;
                } else {
                    unreachable!("child is not attached to this split");
                }
            }
            NodeKind::Leaf(_) => unreachable!("parent must be a split"),
        }
    }

    /// Rebuild a tree from a captured shape, keeping the original pane ids.
    pub(crate) fn restore(shape: RestoredNode) -> PaneTree {
        let mut arena = SlotMap::with_key();
        let root = insert_restored(&mut arena, shape);

        let mut pane_index = FxHashMap::default();
        let mut next_pane = 1;
        for (id, node) in arena.iter() {
            if let NodeKind::Leaf(pane) = &node.kind {
                pane_index.insert(pane.id, id);
                next_pane = next_pane.max(pane.id.0 + 1);
            }
        }

        PaneTree {
            arena,
            root,
            pane_index,
            next_pane,
        }
    }
}

/// Intermediate shape handed from the snapshot module to [`PaneTree::restore`].
pub(crate) enum RestoredNode {
    Leaf(Pane),
    Split {
        direction: SplitDirection,
        ratio: u16,
        first: Box<RestoredNode>,
        second: Box<RestoredNode>,
    },
}

fn insert_restored(arena: &mut SlotMap<NodeId, Node>, shape: RestoredNode) -> NodeId {
    match shape {
        RestoredNode::Leaf(pane) => arena.insert(Node {
            parent: None,
            kind: NodeKind::Leaf(pane),
        }),
        RestoredNode::Split {
            direction,
            ratio,
            first,
            second,
        } => {
            let first = insert_restored(arena, *first);
            let second = insert_restored(arena, *second);
            let split = arena.insert(Node {
                parent: None,
                kind: NodeKind::Split {
                    direction,
                    ratio: ratio.clamp(RATIO_MIN, RATIO_MAX),
                    first,
                    second,
                },
            });
            arena[first].parent = Some(split);
            arena[second].parent = Some(split);
            split
        }
    }
}

pub struct Panes<'a> {
    tree: &'a PaneTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Panes<'a> {
    type Item = &'a Pane;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            match &self.tree.arena[id].kind {
                NodeKind::Leaf(pane) => return Some(pane),
                NodeKind::Split { first, second, .. } => {
                    // Second pushed first so the first child is visited first.
                    self.stack.push(*second);
                    self.stack.push(*first);
                }
            }
        }
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/layout.rs"]
mod tests;
