//! tally-bootstrap - 统一服务启动骨架
//!
//! 所有服务复用的启动逻辑：加载配置、初始化日志、装配基础设施

mod infrastructure;
mod runtime;
mod starter;

pub use infrastructure::*;
pub use runtime::*;
pub use starter::*;
