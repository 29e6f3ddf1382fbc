//! 配置服务：工作台布局相关的配置项
//!
//! 提供统一的配置管理，支持运行时修改

use compact_str::CompactString;

use crate::core::Service;
use crate::kernel::layout::{SplitDirection, RATIO_DEFAULT};

#[derive(Clone, Debug)]
pub struct WorkbenchConfig {
    /// Widget placed into freshly created tabs and panes when the caller
    /// does not name one.
    pub default_widget: CompactString,
    pub default_split_direction: SplitDirection,
    pub default_split_ratio: u16,
    /// Splitting stops once the tree reaches this depth.
    pub max_split_depth: usize,
    /// Overrides the `platform` context key (normally `std::env::consts::OS`).
    pub platform_override: Option<CompactString>,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            default_widget: CompactString::from("com.viloshell.terminal"),
            default_split_direction: SplitDirection::Vertical,
            default_split_ratio: RATIO_DEFAULT,
            max_split_depth: 6,
            platform_override: None,
        }
    }
}

pub struct ConfigService {
    workbench: WorkbenchConfig,
}

impl ConfigService {
    pub fn new() -> Self {
        Self {
            workbench: WorkbenchConfig::default(),
        }
    }

    pub fn with_workbench_config(workbench: WorkbenchConfig) -> Self {
        Self { workbench }
    }

    pub fn workbench(&self) -> &WorkbenchConfig {
        &self.workbench
    }

    pub fn workbench_mut(&mut self) -> &mut WorkbenchConfig {
        &mut self.workbench
    }

    pub fn set_default_widget(&mut self, widget: &str) {
        self.workbench.default_widget = CompactString::from(widget);
    }

    pub fn set_max_split_depth(&mut self, depth: usize) {
        self.workbench.max_split_depth = depth.max(1);
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service for ConfigService {
    fn name(&self) -> &'static str {
        "ConfigService"
    }
}
