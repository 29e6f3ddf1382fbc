//! Workspace state: tabs, their pane trees, and the ambient UI flags the
//! context model is derived from.
//!
//! All mutation goes through [`Workspace`] methods; every successful
//! structural change emits exactly one [`WorkspaceEvent`] so the rendering
//! layer can re-project the tree. Failed operations emit nothing.

use std::fmt;

use compact_str::CompactString;

use super::layout::{LayoutError, NodeId, Pane, PaneId, PaneTree, SplitDirection};
use crate::services::config::WorkbenchConfig;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(pub u64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Pane,
    Sidebar,
    BottomPanel,
    CommandPalette,
}

impl FocusTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            FocusTarget::Pane => "pane",
            FocusTarget::Sidebar => "sidebar",
            FocusTarget::BottomPanel => "bottomPanel",
            FocusTarget::CommandPalette => "commandPalette",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub focus: FocusTarget,
    pub fullscreen: bool,
    pub sidebar_visible: bool,
    pub platform: CompactString,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            focus: FocusTarget::Pane,
            fullscreen: false,
            sidebar_visible: true,
            platform: CompactString::from(std::env::consts::OS),
        }
    }
}

/// Change notification fired after every successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceEvent {
    TabOpened { tab: TabId },
    TabClosed { tab: TabId },
    TabSelected { tab: TabId },
    PaneSplit { tab: TabId, pane: PaneId, new_pane: PaneId },
    PaneRemoved { tab: TabId, pane: PaneId },
    PaneReplaced { tab: TabId, pane: PaneId },
    SplitResized { tab: TabId, node: NodeId, ratio: u16 },
    ActivePaneChanged { tab: TabId, pane: PaneId },
    FocusChanged { focus: FocusTarget },
    SidebarToggled { visible: bool },
    FullscreenChanged { fullscreen: bool },
}

pub type WorkspaceObserver = Box<dyn FnMut(&WorkspaceEvent)>;

pub struct Tab {
    id: TabId,
    name: String,
    tree: PaneTree,
    active_pane: PaneId,
}

impl Tab {
    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tree(&self) -> &PaneTree {
        &self.tree
    }

    /// Invariant: always a pane that exists in the tree.
    pub fn active_pane(&self) -> PaneId {
        self.active_pane
    }

    pub(crate) fn from_restored(
        id: TabId,
        name: String,
        tree: PaneTree,
        active_pane: PaneId,
    ) -> Self {
        Self {
            id,
            name,
            tree,
            active_pane,
        }
    }
}

/// The single source of truth for the shell's layout. A separate
/// rendering layer subscribes to [`WorkspaceEvent`] and re-renders from
/// the tree; re-rendering is expected to be idempotent over the whole
/// workspace, so no diffing contract exists here.
pub struct Workspace {
    config: WorkbenchConfig,
    tabs: Vec<Tab>,
    active_tab: usize,
    ui: UiState,
    observers: Vec<WorkspaceObserver>,
    next_tab: u64,
}

impl Workspace {
    pub fn new(config: WorkbenchConfig) -> Self {
        let mut ui = UiState::default();
        if let Some(platform) = &config.platform_override {
            ui.platform = platform.clone();
        }

        let mut workspace = Self {
            config,
            tabs: Vec::new(),
            active_tab: 0,
            ui,
            observers: Vec::new(),
            next_tab: 1,
        };
        // A workspace is never empty; the first tab exists from the start.
        let widget = workspace.config.default_widget.clone();
        workspace.push_tab(None, &widget);
        workspace
    }

    pub fn config(&self) -> &WorkbenchConfig {
        &self.config
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn add_observer(&mut self, observer: impl FnMut(&WorkspaceEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn emit(&mut self, event: WorkspaceEvent) {
        let mut observers = std::mem::take(&mut self.observers);
        for observer in observers.iter_mut() {
            observer(&event);
        }
        self.observers = observers;
    }

    // ==================== tabs ====================

    pub fn tabs(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn tab(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn active_tab(&self) -> &Tab {
        &self.tabs[self.active_tab]
    }

    fn active_tab_mut(&mut self) -> &mut Tab {
        &mut self.tabs[self.active_tab]
    }

    fn push_tab(&mut self, name: Option<&str>, widget: &str) -> TabId {
        let id = TabId(self.next_tab);
        self.next_tab += 1;

        let name = name
            .map(str::to_string)
            .unwrap_or_else(|| format!("Tab {}", id.0));
        let tree = PaneTree::new(widget);
        let active_pane = tree.first_leaf(tree.root());

        self.tabs.push(Tab {
            id,
            name,
            tree,
            active_pane,
        });
        self.active_tab = self.tabs.len() - 1;
        id
    }

    /// Open a new tab and select it. One notification: `TabOpened` implies
    /// the selection moved to the new tab.
    pub fn open_tab(&mut self, name: Option<&str>, widget: Option<&str>) -> TabId {
        let widget = widget
            .map(CompactString::from)
            .unwrap_or_else(|| self.config.default_widget.clone());
        let id = self.push_tab(name, &widget);
        self.emit(WorkspaceEvent::TabOpened { tab: id });
        id
    }

    pub fn close_tab(&mut self, id: TabId) -> Result<(), LayoutError> {
        let index = self
            .tabs
            .iter()
            .position(|t| t.id == id)
            .ok_or(LayoutError::TabNotFound)?;
        if self.tabs.len() == 1 {
            return Err(LayoutError::LastTab);
        }

        self.tabs.remove(index);
        if self.active_tab >= self.tabs.len() || self.active_tab > index {
            self.active_tab = self.active_tab.saturating_sub(1);
        }
        self.emit(WorkspaceEvent::TabClosed { tab: id });
        Ok(())
    }

    /// Select a tab; no event when it is already active.
    pub fn select_tab(&mut self, id: TabId) -> Result<bool, LayoutError> {
        let index = self
            .tabs
            .iter()
            .position(|t| t.id == id)
            .ok_or(LayoutError::TabNotFound)?;
        if index == self.active_tab {
            return Ok(false);
        }
        self.active_tab = index;
        self.emit(WorkspaceEvent::TabSelected { tab: id });
        Ok(true)
    }

    pub fn next_tab(&mut self) -> bool {
        self.rotate_tab(1)
    }

    pub fn prev_tab(&mut self) -> bool {
        self.rotate_tab(-1)
    }

    fn rotate_tab(&mut self, delta: isize) -> bool {
        if self.tabs.len() < 2 {
            return false;
        }
        let len = self.tabs.len() as isize;
        let index = (self.active_tab as isize + delta).rem_euclid(len) as usize;
        self.active_tab = index;
        let id = self.tabs[index].id;
        self.emit(WorkspaceEvent::TabSelected { tab: id });
        true
    }

    // ==================== panes (active tab) ====================

    /// Split the leaf holding `pane` in the active tab. The new pane
    /// becomes active; `PaneSplit` covers both changes.
    pub fn split_pane(
        &mut self,
        pane: PaneId,
        direction: SplitDirection,
        ratio: Option<u16>,
        widget: Option<&str>,
    ) -> Result<PaneId, LayoutError> {
        let ratio = ratio.unwrap_or(self.config.default_split_ratio);
        let widget = widget
            .map(CompactString::from)
            .unwrap_or_else(|| self.config.default_widget.clone());

        let tab = self.active_tab_mut();
        let new_pane = tab.tree.split(pane, direction, ratio, &widget)?;
        tab.active_pane = new_pane;
        let tab_id = tab.id;

        self.emit(WorkspaceEvent::PaneSplit {
            tab: tab_id,
            pane,
            new_pane,
        });
        Ok(new_pane)
    }

    /// Remove `pane` from the active tab. If it was the active pane, the
    /// first pre-order leaf of the promoted sibling takes over.
    pub fn remove_pane(&mut self, pane: PaneId) -> Result<Pane, LayoutError> {
        let tab = self.active_tab_mut();
        let (removed, promoted) = tab.tree.remove(pane)?;
        if tab.active_pane == pane {
            tab.active_pane = tab.tree.first_leaf(promoted);
        }
        let tab_id = tab.id;

        self.emit(WorkspaceEvent::PaneRemoved {
            tab: tab_id,
            pane,
        });
        Ok(removed)
    }

    pub fn resize_split(&mut self, node: NodeId, ratio: u16) -> Result<u16, LayoutError> {
        let tab = self.active_tab_mut();
        let stored = tab.tree.resize(node, ratio)?;
        let tab_id = tab.id;

        self.emit(WorkspaceEvent::SplitResized {
            tab: tab_id,
            node,
            ratio: stored,
        });
        Ok(stored)
    }

    /// Move input-focus intent to `pane`; no event when already active.
    pub fn set_active_pane(&mut self, pane: PaneId) -> Result<bool, LayoutError> {
        let tab = self.active_tab_mut();
        if !tab.tree.contains(pane) {
            return Err(LayoutError::PaneNotFound(pane));
        }
        if tab.active_pane == pane {
            return Ok(false);
        }
        tab.active_pane = pane;
        let tab_id = tab.id;

        self.emit(WorkspaceEvent::ActivePaneChanged {
            tab: tab_id,
            pane,
        });
        Ok(true)
    }

    /// Swap the widget shown in `pane` (same pane id, fresh state blob).
    pub fn replace_pane_widget(&mut self, pane: PaneId, widget: &str) -> Result<(), LayoutError> {
        let tab = self.active_tab_mut();
        tab.tree.replace_widget(pane, widget)?;
        let tab_id = tab.id;

        self.emit(WorkspaceEvent::PaneReplaced {
            tab: tab_id,
            pane,
        });
        Ok(())
    }

    /// Update a pane's widget-owned state blob. Not a structural change,
    /// so no notification fires.
    pub fn set_pane_state(
        &mut self,
        pane: PaneId,
        state: serde_json::Value,
    ) -> Result<(), LayoutError> {
        let tab = self.active_tab_mut();
        let found = tab
            .tree
            .find_pane_mut(pane)
            .ok_or(LayoutError::PaneNotFound(pane))?;
        found.set_state(state);
        Ok(())
    }

    // ==================== ambient ui ====================

    pub fn set_focus(&mut self, focus: FocusTarget) -> bool {
        if self.ui.focus == focus {
            return false;
        }
        self.ui.focus = focus;
        self.emit(WorkspaceEvent::FocusChanged { focus });
        true
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        self.ui.sidebar_visible = !self.ui.sidebar_visible;
        let visible = self.ui.sidebar_visible;
        self.emit(WorkspaceEvent::SidebarToggled { visible });
        visible
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) -> bool {
        if self.ui.fullscreen == fullscreen {
            return false;
        }
        self.ui.fullscreen = fullscreen;
        self.emit(WorkspaceEvent::FullscreenChanged { fullscreen });
        true
    }

    pub(crate) fn from_restored(
        config: WorkbenchConfig,
        tabs: Vec<Tab>,
        active_tab: usize,
    ) -> Self {
        debug_assert!(!tabs.is_empty());
        let next_tab = tabs.iter().map(|t| t.id.0 + 1).max().unwrap_or(1);
        let active_tab = active_tab.min(tabs.len() - 1);

        let mut ui = UiState::default();
        if let Some(platform) = &config.platform_override {
            ui.platform = platform.clone();
        }

        Self {
            config,
            tabs,
            active_tab,
            ui,
            observers: Vec::new(),
            next_tab,
        }
    }
}
