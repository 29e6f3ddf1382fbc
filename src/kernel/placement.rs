//! Widget placement policy: where a newly opened widget lands.
//!
//! Pure decision function, no state. An explicit preference always wins;
//! otherwise the invocation source picks a strategy and falls back when
//! the widget cannot honor it; anything else defers to the widget's own
//! declared default.

use serde::{Deserialize, Serialize};

use super::widgets::WidgetDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationSource {
    PaneHeader,
    MenuBar,
    CommandPalette,
    Shortcut,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    NewTab,
    ReplaceCurrent,
    Smart,
}

impl Placement {
    pub(crate) fn smart() -> Self {
        Placement::Smart
    }
}

pub fn determine_placement(
    widget: &WidgetDescriptor,
    source: InvocationSource,
    preferred: Option<Placement>,
) -> Placement {
    if let Some(preferred) = preferred {
        return preferred;
    }

    match source {
        InvocationSource::PaneHeader => {
            if widget.supports_replacement {
                Placement::ReplaceCurrent
            } else {
                Placement::NewTab
            }
        }
        InvocationSource::MenuBar => {
            if widget.supports_new_tab {
                Placement::NewTab
            } else {
                Placement::ReplaceCurrent
            }
        }
        _ => widget.default_placement,
    }
}

/// Collapse `Smart` into a concrete strategy for a given widget.
pub fn resolve_smart(placement: Placement, widget: &WidgetDescriptor) -> Placement {
    match placement {
        Placement::Smart => {
            if widget.supports_new_tab {
                Placement::NewTab
            } else {
                Placement::ReplaceCurrent
            }
        }
        concrete => concrete,
    }
}
