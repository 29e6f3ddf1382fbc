//! 服务层：配置与快捷键

pub mod config;
pub mod keymap;

pub use config::{ConfigService, WorkbenchConfig};
pub use keymap::{KeyChord, KeymapError, KeymapService};
