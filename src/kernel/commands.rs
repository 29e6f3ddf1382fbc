//! Built-in workbench command set.
//!
//! Registration is explicit and happens in one place, so order is
//! deterministic and a duplicate id is caught at startup instead of
//! silently shadowing an earlier contributor.

use compact_str::CompactString;
use serde_json::json;

use super::command::{Command, CommandContext, CommandError, CommandResult};
use super::layout::SplitDirection;
use super::placement::{determine_placement, resolve_smart, Placement};
use super::registry::CommandRegistry;

pub fn register_builtin_commands(registry: &mut CommandRegistry) -> Result<(), CommandError> {
    registry.register(
        Command::new("workbench.pane.splitHorizontal", "Split Pane (Horizontal)", |ctx| {
            split_active(ctx, SplitDirection::Horizontal)
        })
        .with_category("View")
        .with_shortcut("ctrl+shift+-")
        .with_when("canSplit"),
    )?;

    registry.register(
        Command::new("workbench.pane.splitVertical", "Split Pane (Vertical)", |ctx| {
            split_active(ctx, SplitDirection::Vertical)
        })
        .with_category("View")
        .with_shortcut("ctrl+shift+\\")
        .with_when("canSplit"),
    )?;

    registry.register(
        Command::new("workbench.pane.close", "Close Pane", |ctx| {
            let active = ctx.workspace.active_tab().active_pane();
            let removed = ctx.workspace.remove_pane(active)?;
            Ok(CommandResult::success_with(json!({ "pane": removed.id().0 })))
        })
        .with_category("View")
        .with_shortcut("ctrl+shift+w")
        .with_when("canClosePane"),
    )?;

    registry.register(
        Command::new("workbench.pane.focusNext", "Focus Next Pane", |ctx| {
            rotate_pane(ctx, 1)
        })
        .with_category("View")
        .with_shortcut("alt+right")
        .with_when("paneCount > 1"),
    )?;

    registry.register(
        Command::new("workbench.pane.focusPrevious", "Focus Previous Pane", |ctx| {
            rotate_pane(ctx, -1)
        })
        .with_category("View")
        .with_shortcut("alt+left")
        .with_when("paneCount > 1"),
    )?;

    registry.register(
        Command::new("workbench.pane.resize", "Resize Split", |ctx| {
            let ratio = ctx
                .param_u64("ratio")
                .ok_or_else(|| CommandError::Rejected("missing ratio parameter".into()))?;
            let active = ctx.workspace.active_tab().active_pane();
            let split = ctx
                .workspace
                .active_tab()
                .tree()
                .parent_split(active)
                .ok_or_else(|| {
                    CommandError::Rejected("active pane is not inside a split".into())
                })?;
            let stored = ctx.workspace.resize_split(split, ratio.min(1000) as u16)?;
            Ok(CommandResult::success_with(json!({ "ratio": stored })))
        })
        .with_category("View")
        .with_when("paneCount > 1"),
    )?;

    registry.register(
        Command::new("workbench.tab.new", "New Tab", |ctx| {
            let widget = ctx.param_str("widget").map(CompactString::from);
            let tab = ctx.workspace.open_tab(None, widget.as_deref());
            Ok(CommandResult::success_with(json!({ "tab": tab.0 })))
        })
        .with_category("File")
        .with_shortcut("ctrl+t"),
    )?;

    registry.register(
        Command::new("workbench.tab.close", "Close Tab", |ctx| {
            let active = ctx.workspace.active_tab().id();
            ctx.workspace.close_tab(active)?;
            Ok(CommandResult::success())
        })
        .with_category("File")
        .with_shortcut("ctrl+w")
        .with_when("canCloseTab"),
    )?;

    registry.register(
        Command::new("workbench.tab.next", "Next Tab", |ctx| {
            ctx.workspace.next_tab();
            Ok(CommandResult::success())
        })
        .with_category("View")
        .with_shortcut("ctrl+tab")
        .with_when("tabCount > 1"),
    )?;

    registry.register(
        Command::new("workbench.tab.previous", "Previous Tab", |ctx| {
            ctx.workspace.prev_tab();
            Ok(CommandResult::success())
        })
        .with_category("View")
        .with_shortcut("ctrl+shift+tab")
        .with_when("tabCount > 1"),
    )?;

    registry.register(
        Command::new("workbench.view.toggleSidebar", "Toggle Sidebar", |ctx| {
            let visible = ctx.workspace.toggle_sidebar();
            Ok(CommandResult::success_with(json!({ "visible": visible })))
        })
        .with_category("View")
        .with_shortcut("ctrl+b"),
    )?;

    registry.register(
        Command::new("workbench.window.toggleFullscreen", "Toggle Fullscreen", |ctx| {
            let fullscreen = !ctx.workspace.ui().fullscreen;
            ctx.workspace.set_fullscreen(fullscreen);
            Ok(CommandResult::success_with(json!({ "fullscreen": fullscreen })))
        })
        .with_category("Window")
        .with_shortcut("f11"),
    )?;

    registry.register(
        Command::new("workbench.widget.open", "Open Widget", |ctx| open_widget(ctx))
            .with_category("View"),
    )?;

    Ok(())
}

fn split_active(
    ctx: &mut CommandContext<'_>,
    direction: SplitDirection,
) -> Result<CommandResult, CommandError> {
    let ratio = ctx.param_u64("ratio").map(|r| r.min(1000) as u16);
    let widget = ctx.param_str("widget").map(CompactString::from);

    let active = ctx.workspace.active_tab().active_pane();
    let new_pane = ctx
        .workspace
        .split_pane(active, direction, ratio, widget.as_deref())?;
    Ok(CommandResult::success_with(json!({ "pane": new_pane.0 })))
}

fn rotate_pane(
    ctx: &mut CommandContext<'_>,
    delta: isize,
) -> Result<CommandResult, CommandError> {
    let tab = ctx.workspace.active_tab();
    let panes: Vec<_> = tab.tree().panes().map(|p| p.id()).collect();
    let active = tab.active_pane();

    let index = panes
        .iter()
        .position(|id| *id == active)
        .unwrap_or(0) as isize;
    let len = panes.len() as isize;
    let target = panes[(index + delta).rem_euclid(len) as usize];

    ctx.workspace.set_active_pane(target)?;
    Ok(CommandResult::success_with(json!({ "pane": target.0 })))
}

fn open_widget(ctx: &mut CommandContext<'_>) -> Result<CommandResult, CommandError> {
    let widget_id = ctx
        .param_str("widget")
        .map(CompactString::from)
        .ok_or_else(|| CommandError::Rejected("missing widget parameter".into()))?;
    let descriptor = ctx
        .widgets
        .get(&widget_id)
        .ok_or_else(|| CommandError::Rejected(format!("unknown widget: {widget_id}")))?;

    let preferred = match ctx.param_str("placement") {
        Some(raw) => Some(parse_placement(raw).ok_or_else(|| {
            CommandError::Rejected(format!("unknown placement: {raw}"))
        })?),
        None => None,
    };

    let placement = determine_placement(descriptor, ctx.source, preferred);
    match resolve_smart(placement, descriptor) {
        Placement::NewTab => {
            let tab = ctx
                .workspace
                .open_tab(Some(&descriptor.title), Some(&widget_id));
            Ok(CommandResult::success_with(json!({ "tab": tab.0 })))
        }
        Placement::ReplaceCurrent => {
            let pane = ctx.workspace.active_tab().active_pane();
            ctx.workspace.replace_pane_widget(pane, &widget_id)?;
            Ok(CommandResult::success_with(json!({ "pane": pane.0 })))
        }
        Placement::Smart => unreachable!("resolve_smart returns a concrete strategy"),
    }
}

fn parse_placement(raw: &str) -> Option<Placement> {
    match raw {
        "newTab" => Some(Placement::NewTab),
        "replaceCurrent" => Some(Placement::ReplaceCurrent),
        "smart" => Some(Placement::Smart),
        _ => None,
    }
}
