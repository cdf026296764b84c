//! Repository trait 定义

use async_trait::async_trait;
use tally_common::{PagedResult, Pagination};
use tally_domain_core::Entity;
use tally_errors::AppResult;

/// 基础 Repository trait
///
/// 读取、更新、删除不存在的标识时返回 `AppError::NotFound`。
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// 保存新实体，未设置标识时自动分配，返回持久化后的实体
    async fn create(&self, entity: T) -> AppResult<T>;

    /// 根据 ID 查找
    async fn find_by_id(&self, id: &T::Id) -> AppResult<T>;

    /// 查询全部，按标识排序
    async fn find_all(&self) -> AppResult<Vec<T>>;

    /// 更新实体
    async fn update(&self, entity: &T) -> AppResult<()>;

    /// 删除实体
    async fn delete(&self, id: &T::Id) -> AppResult<()>;

    /// 检查是否存在
    async fn exists(&self, id: &T::Id) -> AppResult<bool>;
}

/// 支持分页查询的 Repository
#[async_trait]
pub trait PageableRepository<T: Entity>: Repository<T> {
    /// 分页查询
    async fn find_page(&self, pagination: &Pagination) -> AppResult<PagedResult<T>>;

    /// 统计总数
    async fn count(&self) -> AppResult<u64>;
}
