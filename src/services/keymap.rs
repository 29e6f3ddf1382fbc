//! 快捷键服务：按键 → 命令 id 映射
//!
//! 功能：
//! - 解析 "ctrl+shift+p" 形式的快捷键描述
//! - 从注册表中已声明快捷键的命令自动建立绑定
//! - 绑定冲突检测（后绑定的返回被顶掉的命令 id）

use std::fmt;

use compact_str::CompactString;
use rustc_hash::FxHashMap;
use tracing::warn;

use crate::core::Service;
use crate::kernel::registry::CommandRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeymapError {
    EmptyChord,
    UnknownKey(String),
    UnknownModifier(String),
}

impl fmt::Display for KeymapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeymapError::EmptyChord => write!(f, "empty key chord"),
            KeymapError::UnknownKey(key) => write!(f, "unknown key: {key}"),
            KeymapError::UnknownModifier(modifier) => {
                write!(f, "unknown modifier: {modifier}")
            }
        }
    }
}

impl std::error::Error for KeymapError {}

const NAMED_KEYS: &[&str] = &[
    "enter", "tab", "escape", "space", "backspace", "delete", "home", "end", "pageup",
    "pagedown", "up", "down", "left", "right", "f1", "f2", "f3", "f4", "f5", "f6", "f7",
    "f8", "f9", "f10", "f11", "f12",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
    pub key: CompactString,
}

impl KeyChord {
    /// Parse a chord description: zero or more modifiers followed by one
    /// key, joined by `+`. Case-insensitive; `ctrl+shift+p` and
    /// `Ctrl+Shift+P` are the same chord.
    pub fn parse(text: &str) -> Result<Self, KeymapError> {
        let mut chord = Self {
            ctrl: false,
            shift: false,
            alt: false,
            meta: false,
            key: CompactString::default(),
        };

        let mut segments = text.split('+').peekable();
        while let Some(segment) = segments.next() {
            let lowered = segment.trim().to_lowercase();
            if lowered.is_empty() {
                return Err(KeymapError::EmptyChord);
            }

            if segments.peek().is_some() {
                match lowered.as_str() {
                    "ctrl" => chord.ctrl = true,
                    "shift" => chord.shift = true,
                    "alt" => chord.alt = true,
                    "meta" | "cmd" => chord.meta = true,
                    other => return Err(KeymapError::UnknownModifier(other.to_string())),
                }
            } else {
                if lowered.chars().count() != 1 && !NAMED_KEYS.contains(&lowered.as_str()) {
                    return Err(KeymapError::UnknownKey(lowered));
                }
                chord.key = CompactString::from(lowered);
            }
        }

        if chord.key.is_empty() {
            return Err(KeymapError::EmptyChord);
        }
        Ok(chord)
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            write!(f, "ctrl+")?;
        }
        if self.shift {
            write!(f, "shift+")?;
        }
        if self.alt {
            write!(f, "alt+")?;
        }
        if self.meta {
            write!(f, "meta+")?;
        }
        write!(f, "{}", self.key)
    }
}

pub struct KeymapService {
    bindings: FxHashMap<KeyChord, CompactString>,
}

impl KeymapService {
    pub fn new() -> Self {
        Self {
            bindings: FxHashMap::default(),
        }
    }

    /// Bind commands that declared a shortcut at registration. Malformed
    /// shortcuts and conflicts are logged and skipped; a bad declaration
    /// must not take down startup.
    pub fn seed_from_registry(&mut self, registry: &CommandRegistry) {
        for command in registry.commands() {
            let Some(shortcut) = command.shortcut() else {
                continue;
            };
            match KeyChord::parse(shortcut) {
                Ok(chord) => {
                    if let Some(existing) = self.bindings.get(&chord) {
                        warn!(
                            shortcut,
                            existing = %existing,
                            command = command.id(),
                            "shortcut already bound; keeping the first binding"
                        );
                        continue;
                    }
                    self.bindings.insert(chord, CompactString::from(command.id()));
                }
                Err(err) => {
                    warn!(shortcut, command = command.id(), error = %err, "invalid shortcut ignored");
                }
            }
        }
    }

    /// Bind a chord, returning the command id it displaced, if any.
    pub fn bind(&mut self, chord: KeyChord, command_id: &str) -> Option<CompactString> {
        self.bindings.insert(chord, CompactString::from(command_id))
    }

    pub fn unbind(&mut self, chord: &KeyChord) -> Option<CompactString> {
        self.bindings.remove(chord)
    }

    pub fn lookup(&self, chord: &KeyChord) -> Option<&str> {
        self.bindings.get(chord).map(|id| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeymapService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service for KeymapService {
    fn name(&self) -> &'static str {
        "KeymapService"
    }
}
