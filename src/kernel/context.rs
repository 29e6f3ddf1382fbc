//! Context-model builder: derives the when-clause vocabulary from live
//! workspace state.
//!
//! Always a full recomputation: caching a model across calls would let a
//! stale key enable a disabled command.

use super::state::Workspace;
use crate::when::ContextModel;

/// Context-key vocabulary. Fixed but extensible: embedders may add their
/// own keys on top of a built model.
pub mod keys {
    pub const TAB_COUNT: &str = "tabCount";
    pub const PANE_COUNT: &str = "paneCount";
    pub const TREE_DEPTH: &str = "treeDepth";
    pub const ACTIVE_WIDGET: &str = "activeWidget";
    pub const CAN_SPLIT: &str = "canSplit";
    pub const CAN_CLOSE_PANE: &str = "canClosePane";
    pub const CAN_CLOSE_TAB: &str = "canCloseTab";
    pub const FOCUS: &str = "focus";
    pub const IS_FULLSCREEN: &str = "isFullscreen";
    pub const SIDEBAR_VISIBLE: &str = "sidebarVisible";
    pub const PLATFORM: &str = "platform";
}

pub fn build_context(workspace: &Workspace) -> ContextModel {
    let mut model = ContextModel::new();
    let tab = workspace.active_tab();
    let tree = tab.tree();

    model.set(keys::TAB_COUNT, workspace.tab_count() as i64);
    model.set(keys::PANE_COUNT, tree.leaf_count() as i64);
    model.set(keys::TREE_DEPTH, tree.depth() as i64);
    model.set(
        keys::CAN_SPLIT,
        tree.depth() < workspace.config().max_split_depth,
    );
    model.set(keys::CAN_CLOSE_PANE, tree.leaf_count() > 1);
    model.set(keys::CAN_CLOSE_TAB, workspace.tab_count() > 1);

    if let Some(pane) = tree.find_pane(tab.active_pane()) {
        model.set(keys::ACTIVE_WIDGET, pane.widget());
    }

    let ui = workspace.ui();
    model.set(keys::FOCUS, ui.focus.as_str());
    model.set(keys::IS_FULLSCREEN, ui.fullscreen);
    model.set(keys::SIDEBAR_VISIBLE, ui.sidebar_visible);
    model.set(keys::PLATFORM, ui.platform.as_str());

    model
}
