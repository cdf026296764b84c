//! tally-adapter-memory - 进程内持久化上下文
//!
//! 一个 `InMemoryContext` 实例对应一个工作单元，实例销毁即丢弃数据。
//! 用于测试与本地开发。

mod context;

pub use context::InMemoryContext;
