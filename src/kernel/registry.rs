//! Command registry: id → command, with stable registration order.
//!
//! Registration happens during single-threaded startup; later lookups are
//! read-only. Duplicate ids are rejected outright; permissive overwrite
//! hides shadowing bugs between contributors.

use compact_str::CompactString;
use rustc_hash::FxHashMap;
use tracing::debug;

use super::command::{Command, CommandError};

#[derive(Default)]
pub struct CommandRegistry {
    commands: FxHashMap<CompactString, Command>,
    order: Vec<CompactString>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, command: Command) -> Result<(), CommandError> {
        let id = CompactString::from(command.id());
        if self.commands.contains_key(&id) {
            return Err(CommandError::DuplicateCommand(id));
        }
        debug!(command = %id, "registered command");
        self.order.push(id.clone());
        self.commands.insert(id, command);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Command> {
        self.commands.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.commands.contains_key(id)
    }

    /// All commands, in registration order. Restartable: each call walks
    /// the order list from the beginning.
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.order.iter().filter_map(|id| self.commands.get(id))
    }

    /// Remove a command; absent ids are a no-op.
    pub fn unregister(&mut self, id: &str) -> Option<Command> {
        let removed = self.commands.remove(id);
        if removed.is_some() {
            self.order.retain(|entry| entry != id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
