//! Command executor: the single entry point menus, shortcuts and the
//! palette call into.
//!
//! Hard error boundary: nothing a handler returns or a when-clause does
//! escapes as an error. Callers always get a structured [`CommandResult`].

use tracing::{debug, warn};

use super::command::{CommandContext, CommandError, CommandResult};
use super::context::build_context;
use super::registry::CommandRegistry;

/// Resolve `id`, gate it on its when-clause against a fresh context
/// snapshot, and run the handler.
///
/// Unknown ids and handler errors become `Failure` results; a false
/// when-clause short-circuits to `NotApplicable` without touching the
/// handler. Commands without a clause always reach their handler.
pub fn execute_command(
    registry: &CommandRegistry,
    id: &str,
    ctx: &mut CommandContext<'_>,
) -> CommandResult {
    let Some(command) = registry.get(id) else {
        warn!(command = id, "execute: unknown command id");
        return CommandResult::failure(CommandError::NotFound(id.into()).to_string());
    };

    if let Some(when) = command.when() {
        let model = build_context(ctx.workspace);
        if !when.evaluate(&model) {
            debug!(command = id, clause = when.source(), "execute: when-clause not satisfied");
            return CommandResult::not_applicable();
        }
    }

    match command.invoke(ctx) {
        Ok(result) => result,
        Err(err) => {
            warn!(command = id, error = %err, "execute: handler failed");
            CommandResult::failure(err.to_string())
        }
    }
}
