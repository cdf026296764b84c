//! ports - 抽象 trait 层
//!
//! 定义仓储、持久化上下文与邮件发送的抽象接口

mod email;
mod repository;
mod store;

pub use email::*;
pub use repository::*;
pub use store::*;
