//! 实体基础 trait

use std::fmt::{Debug, Display};
use std::hash::Hash;

use tally_errors::AppResult;
use uuid::Uuid;

/// 实体标识
///
/// 标识由持久化时分配，底层统一为 UUID（v7，时间有序）。
pub trait EntityId: Clone + Eq + Hash + Debug + Display + Send + Sync + 'static {
    /// 生成新的标识
    fn generate() -> Self;

    fn as_uuid(&self) -> Uuid;
}

/// 实体 trait
///
/// 新建但尚未持久化的实体没有标识，`id()` 返回 `None`。
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: EntityId;

    /// 实体名称，用于日志与错误信息
    const NAME: &'static str;

    fn id(&self) -> Option<&Self::Id>;

    fn assign_id(&mut self, id: Self::Id);

    /// 校验实体不变量，仓储在写入前调用
    fn validate(&self) -> AppResult<()> {
        Ok(())
    }
}
