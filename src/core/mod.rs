//! 核心框架：服务注册与依赖注入容器

pub mod context;
pub mod service;

pub use context::AppContext;
pub use service::{Service, ServiceError, ServiceRegistry};
