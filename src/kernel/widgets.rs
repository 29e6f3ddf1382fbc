//! Widget catalog: what content types exist and how they like to open.

use compact_str::CompactString;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::placement::Placement;

pub const TERMINAL_WIDGET: &str = "com.viloshell.terminal";
pub const EDITOR_WIDGET: &str = "com.viloshell.editor";
pub const SETTINGS_WIDGET: &str = "com.viloshell.settings";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetDescriptor {
    pub id: CompactString,
    pub title: String,
    #[serde(default = "Placement::smart")]
    pub default_placement: Placement,
    #[serde(default = "yes")]
    pub supports_replacement: bool,
    #[serde(default = "yes")]
    pub supports_new_tab: bool,
}

fn yes() -> bool {
    true
}

impl WidgetDescriptor {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: CompactString::from(id),
            title: title.to_string(),
            default_placement: Placement::Smart,
            supports_replacement: true,
            supports_new_tab: true,
        }
    }

    pub fn with_default_placement(mut self, placement: Placement) -> Self {
        self.default_placement = placement;
        self
    }

    pub fn replacement(mut self, supported: bool) -> Self {
        self.supports_replacement = supported;
        self
    }

    pub fn new_tab(mut self, supported: bool) -> Self {
        self.supports_new_tab = supported;
        self
    }
}

/// Registry of widget descriptors, keyed by widget id. Registration
/// order is preserved for menu listings.
#[derive(Debug, Default)]
pub struct WidgetCatalog {
    widgets: FxHashMap<CompactString, WidgetDescriptor>,
    order: Vec<CompactString>,
}

impl WidgetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in widget set every workspace starts from.
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        catalog.register(WidgetDescriptor::new(TERMINAL_WIDGET, "Terminal"));
        catalog.register(WidgetDescriptor::new(EDITOR_WIDGET, "Editor"));
        catalog.register(
            WidgetDescriptor::new(SETTINGS_WIDGET, "Settings")
                .with_default_placement(Placement::NewTab)
                .replacement(false),
        );
        catalog
    }

    /// Insert or replace a descriptor. Widgets may be re-declared by
    /// later contributors (unlike commands, the descriptor is metadata,
    /// not behavior).
    pub fn register(&mut self, descriptor: WidgetDescriptor) {
        let id = descriptor.id.clone();
        if self.widgets.insert(id.clone(), descriptor).is_none() {
            self.order.push(id);
        }
    }

    pub fn get(&self, id: &str) -> Option<&WidgetDescriptor> {
        self.widgets.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.widgets.contains_key(id)
    }

    pub fn widgets(&self) -> impl Iterator<Item = &WidgetDescriptor> {
        self.order.iter().filter_map(|id| self.widgets.get(id))
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_include_terminal_and_editor() {
        let catalog = WidgetCatalog::with_builtins();
        assert!(catalog.contains(TERMINAL_WIDGET));
        assert!(catalog.contains(EDITOR_WIDGET));
        assert_eq!(
            catalog.get(SETTINGS_WIDGET).unwrap().default_placement,
            Placement::NewTab
        );
    }

    #[test]
    fn redeclaring_a_widget_replaces_metadata_in_place() {
        let mut catalog = WidgetCatalog::with_builtins();
        let before: Vec<_> = catalog.widgets().map(|w| w.id.clone()).collect();

        catalog.register(WidgetDescriptor::new(TERMINAL_WIDGET, "Terminal v2"));

        let after: Vec<_> = catalog.widgets().map(|w| w.id.clone()).collect();
        assert_eq!(before, after);
        assert_eq!(catalog.get(TERMINAL_WIDGET).unwrap().title, "Terminal v2");
    }
}
