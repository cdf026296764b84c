//! 持久化上下文 trait 定义

use async_trait::async_trait;
use tally_domain_core::Entity;
use tally_errors::AppResult;

/// 持久化上下文
///
/// 代表一个工作单元内对持久化存储的访问。生命周期由外部管理，
/// 仓储只持有引用，不负责创建或关闭。存储层失败统一返回
/// `AppError::Persistence`。
#[async_trait]
pub trait EntityStore<T: Entity>: Send + Sync {
    /// 插入实体，实体必须已有标识
    async fn insert(&self, entity: &T) -> AppResult<()>;

    async fn fetch(&self, id: &T::Id) -> AppResult<Option<T>>;

    /// 按标识排序
    async fn fetch_all(&self) -> AppResult<Vec<T>>;

    async fn fetch_page(&self, limit: u32, offset: u64) -> AppResult<Vec<T>>;

    async fn count(&self) -> AppResult<u64>;

    /// 替换已存在的实体，返回是否命中
    async fn replace(&self, entity: &T) -> AppResult<bool>;

    /// 删除实体，返回是否命中
    async fn remove(&self, id: &T::Id) -> AppResult<bool>;
}
