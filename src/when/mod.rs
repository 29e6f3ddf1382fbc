//! When 子句引擎：命令启用条件的解析与求值
//!
//! 架构：
//! - ContextModel: 上下文键 → 值的快照，每次求值前重新构建
//! - WhenClause: 解析一次、可多次求值的布尔表达式
//! - 解析失败时命令按"禁用"处理（fail closed），绝不向调用方抛错

mod eval;
mod parse;

pub use parse::{CmpOp, Expr, Literal, WhenClauseParseError};

use compact_str::CompactString;
use rustc_hash::FxHashMap;
use tracing::warn;

/// A single fact about the current application state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextValue {
    Bool(bool),
    Int(i64),
    Str(CompactString),
}

impl ContextValue {
    /// Truthiness when an identifier is referenced bare: booleans are
    /// themselves, integers are true when non-zero, strings when non-empty.
    pub fn truthy(&self) -> bool {
        match self {
            ContextValue::Bool(b) => *b,
            ContextValue::Int(i) => *i != 0,
            ContextValue::Str(s) => !s.is_empty(),
        }
    }
}

impl From<bool> for ContextValue {
    fn from(v: bool) -> Self {
        ContextValue::Bool(v)
    }
}

impl From<i64> for ContextValue {
    fn from(v: i64) -> Self {
        ContextValue::Int(v)
    }
}

impl From<&str> for ContextValue {
    fn from(v: &str) -> Self {
        ContextValue::Str(CompactString::from(v))
    }
}

/// Snapshot of context keys, read-only to the evaluator.
///
/// Always rebuilt in full before an evaluation; incremental updates are
/// deliberately unsupported so a stale key can never enable a command.
#[derive(Debug, Clone, Default)]
pub struct ContextModel {
    values: FxHashMap<CompactString, ContextValue>,
}

impl ContextModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: impl Into<ContextValue>) {
        self.values.insert(CompactString::from(key), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A parsed enablement condition.
///
/// `parse` is lenient: a malformed source is remembered as permanently
/// false and the error is logged, matching the fail-closed policy for
/// conditions loaded from declarative sources. `try_parse` is the strict
/// variant for callers that want the error.
#[derive(Debug, Clone)]
pub struct WhenClause {
    source: CompactString,
    expr: Option<Expr>,
}

impl WhenClause {
    pub fn parse(source: &str) -> Self {
        match parse::parse(source) {
            Ok(expr) => Self {
                source: CompactString::from(source),
                expr: Some(expr),
            },
            Err(err) => {
                warn!(clause = source, error = %err, "when-clause failed to parse; treating as disabled");
                Self {
                    source: CompactString::from(source),
                    expr: None,
                }
            }
        }
    }

    pub fn try_parse(source: &str) -> Result<Self, WhenClauseParseError> {
        let expr = parse::parse(source)?;
        Ok(Self {
            source: CompactString::from(source),
            expr: Some(expr),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_valid(&self) -> bool {
        self.expr.is_some()
    }

    pub fn evaluate(&self, model: &ContextModel) -> bool {
        match &self.expr {
            Some(expr) => eval::evaluate(expr, model),
            None => false,
        }
    }
}
