//! viloshell - 工作台核心库
//!
//! 模块结构：
//! - core: 核心框架（Service, AppContext）
//! - when: When 子句引擎（上下文模型、解析、求值）
//! - kernel: 无头工作台内核（命令注册表、执行器、分屏布局树）
//! - services: 服务层（ConfigService, KeymapService）

pub mod core;
pub mod kernel;
pub mod logging;
pub mod services;
pub mod when;
