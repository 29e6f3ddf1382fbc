//! Headless workbench core (commands/layout/context).

pub mod command;
pub mod commands;
pub mod context;
pub mod executor;
pub mod layout;
pub mod palette;
pub mod placement;
pub mod registry;
pub mod snapshot;
pub mod state;
pub mod widgets;

pub use command::{
    Command, CommandContext, CommandError, CommandHandler, CommandResult, CommandStatus,
};
pub use commands::register_builtin_commands;
pub use context::{build_context, keys};
pub use executor::execute_command;
pub use layout::{
    LayoutError, NodeId, NodeRef, Pane, PaneId, PaneTree, SplitDirection, RATIO_DEFAULT,
    RATIO_MAX, RATIO_MIN,
};
pub use palette::{filter_commands, PaletteMatch};
pub use placement::{determine_placement, resolve_smart, InvocationSource, Placement};
pub use registry::CommandRegistry;
pub use snapshot::{capture, restore, NodeSnapshot, PaneSnapshot, TabSnapshot, WorkspaceSnapshot};
pub use state::{FocusTarget, Tab, TabId, UiState, Workspace, WorkspaceEvent};
pub use widgets::{
    WidgetCatalog, WidgetDescriptor, EDITOR_WIDGET, SETTINGS_WIDGET, TERMINAL_WIDGET,
};
