//! Headless command-palette model: filter the registry by a query,
//! honoring each command's when-clause.

use super::command::Command;
use super::registry::CommandRegistry;
use crate::when::ContextModel;

pub struct PaletteMatch<'a> {
    pub label: String,
    pub command: &'a Command,
}

/// Commands matching `query`, in registration order. A command appears
/// when its when-clause holds (or it has none) and the lowercased label
/// contains the lowercased query. An empty query lists everything
/// currently enabled.
pub fn filter_commands<'a>(
    registry: &'a CommandRegistry,
    model: &ContextModel,
    query: &str,
) -> Vec<PaletteMatch<'a>> {
    let needle = query.to_lowercase();

    registry
        .commands()
        .filter(|command| match command.when() {
            Some(when) => when.evaluate(model),
            None => true,
        })
        .filter_map(|command| {
            let label = command.palette_label();
            if needle.is_empty() || label.to_lowercase().contains(&needle) {
                Some(PaletteMatch { label, command })
            } else {
                None
            }
        })
        .collect()
}
