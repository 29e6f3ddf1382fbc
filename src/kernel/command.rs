//! 命令系统：命令描述符与执行结果
//!
//! 架构：
//! - Command: 带 id / 标题 / 快捷键 / when 条件的可调用动作
//! - CommandContext: 每次调用临时构造，持有工作区的独占引用
//! - CommandResult: 三态结果（成功 / 失败 / 不适用），永不 panic

use std::fmt;

use compact_str::CompactString;
use rustc_hash::FxHashMap;

use super::layout::LayoutError;
use super::placement::InvocationSource;
use super::state::Workspace;
use super::widgets::WidgetCatalog;
use crate::when::WhenClause;

#[derive(Debug)]
pub enum CommandError {
    NotFound(CompactString),
    DuplicateCommand(CompactString),
    Rejected(String),
    Layout(LayoutError),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::NotFound(id) => write!(f, "unknown command: {id}"),
            CommandError::DuplicateCommand(id) => {
                write!(f, "command already registered: {id}")
            }
            CommandError::Rejected(msg) => write!(f, "{msg}"),
            CommandError::Layout(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<LayoutError> for CommandError {
    fn from(err: LayoutError) -> Self {
        CommandError::Layout(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failure,
    NotApplicable,
}

/// Outcome of a command execution. Truthy iff the status is `Success`.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandResult {
    status: CommandStatus,
    message: Option<String>,
    payload: Option<serde_json::Value>,
}

impl CommandResult {
    pub fn success() -> Self {
        Self {
            status: CommandStatus::Success,
            message: None,
            payload: None,
        }
    }

    pub fn success_with(payload: serde_json::Value) -> Self {
        Self {
            status: CommandStatus::Success,
            message: None,
            payload: Some(payload),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Failure,
            message: Some(message.into()),
            payload: None,
        }
    }

    pub fn not_applicable() -> Self {
        Self {
            status: CommandStatus::NotApplicable,
            message: None,
            payload: None,
        }
    }

    pub fn status(&self) -> CommandStatus {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status == CommandStatus::Success
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn payload(&self) -> Option<&serde_json::Value> {
        self.payload.as_ref()
    }
}

/// Per-invocation context handed to handlers. Never persisted; built
/// fresh by the caller for every execution.
pub struct CommandContext<'a> {
    pub workspace: &'a mut Workspace,
    pub widgets: &'a WidgetCatalog,
    pub source: InvocationSource,
    params: FxHashMap<CompactString, serde_json::Value>,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        workspace: &'a mut Workspace,
        widgets: &'a WidgetCatalog,
        source: InvocationSource,
    ) -> Self {
        Self {
            workspace,
            widgets,
            source,
            params: FxHashMap::default(),
        }
    }

    pub fn with_param(mut self, key: &str, value: serde_json::Value) -> Self {
        self.params.insert(CompactString::from(key), value);
        self
    }

    pub fn param(&self, key: &str) -> Option<&serde_json::Value> {
        self.params.get(key)
    }

    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(|v| v.as_str())
    }

    pub fn param_u64(&self, key: &str) -> Option<u64> {
        self.params.get(key).and_then(|v| v.as_u64())
    }
}

pub type CommandHandler =
    Box<dyn Fn(&mut CommandContext<'_>) -> Result<CommandResult, CommandError>>;

/// A named, invokable action. Immutable once registered.
pub struct Command {
    id: CompactString,
    title: String,
    category: Option<CompactString>,
    shortcut: Option<CompactString>,
    icon: Option<CompactString>,
    when: Option<WhenClause>,
    handler: CommandHandler,
}

impl Command {
    pub fn new<F>(id: &str, title: &str, handler: F) -> Self
    where
        F: Fn(&mut CommandContext<'_>) -> Result<CommandResult, CommandError> + 'static,
    {
        Self {
            id: CompactString::from(id),
            title: title.to_string(),
            category: None,
            shortcut: None,
            icon: None,
            when: None,
            handler: Box::new(handler),
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(CompactString::from(category));
        self
    }

    pub fn with_shortcut(mut self, shortcut: &str) -> Self {
        self.shortcut = Some(CompactString::from(shortcut));
        self
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(CompactString::from(icon));
        self
    }

    /// Attach an enablement condition. Parsing is lenient: a malformed
    /// clause leaves the command permanently disabled (logged, not raised).
    pub fn with_when(mut self, when: &str) -> Self {
        self.when = Some(WhenClause::parse(when));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn shortcut(&self) -> Option<&str> {
        self.shortcut.as_deref()
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn when(&self) -> Option<&WhenClause> {
        self.when.as_ref()
    }

    /// Palette row label, `Category: Title` when a category is set.
    pub fn palette_label(&self) -> String {
        match &self.category {
            Some(category) => format!("{category}: {}", self.title),
            None => self.title.clone(),
        }
    }

    pub fn invoke(&self, ctx: &mut CommandContext<'_>) -> Result<CommandResult, CommandError> {
        (self.handler)(ctx)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("category", &self.category)
            .field("shortcut", &self.shortcut)
            .field("when", &self.when.as_ref().map(|w| w.source()))
            .finish_non_exhaustive()
    }
}
