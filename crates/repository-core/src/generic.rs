//! 通用仓储

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tally_common::{PagedResult, Pagination};
use tally_domain_core::{Entity, EntityId};
use tally_errors::{AppError, AppResult};
use tally_ports::{EntityStore, PageableRepository, Repository};
use tracing::debug;

/// 通用仓储
///
/// 绑定到唯一的持久化上下文，整个生命周期内不会替换，也不会关闭它。
pub struct GenericRepository<T, C> {
    context: Arc<C>,
    _entity: PhantomData<fn() -> T>,
}

impl<T, C> GenericRepository<T, C> {
    pub fn new(context: Arc<C>) -> Self {
        Self {
            context,
            _entity: PhantomData,
        }
    }

    /// 绑定的持久化上下文
    pub fn context(&self) -> &Arc<C> {
        &self.context
    }
}

impl<T, C> Clone for GenericRepository<T, C> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.context))
    }
}

impl<T, C> fmt::Debug for GenericRepository<T, C>
where
    T: Entity,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericRepository")
            .field("entity", &T::NAME)
            .finish_non_exhaustive()
    }
}

fn not_found<T: Entity>(id: &T::Id) -> AppError {
    AppError::not_found(format!("{} {}", T::NAME, id))
}

#[async_trait]
impl<T, C> Repository<T> for GenericRepository<T, C>
where
    T: Entity,
    C: EntityStore<T>,
{
    async fn create(&self, mut entity: T) -> AppResult<T> {
        entity.validate()?;

        let id = match entity.id().cloned() {
            Some(id) => id,
            None => {
                let id = <T::Id as EntityId>::generate();
                entity.assign_id(id.clone());
                id
            }
        };

        self.context.insert(&entity).await?;

        debug!(entity = T::NAME, id = %id, "Entity created");
        Ok(entity)
    }

    async fn find_by_id(&self, id: &T::Id) -> AppResult<T> {
        self.context
            .fetch(id)
            .await?
            .ok_or_else(|| not_found::<T>(id))
    }

    async fn find_all(&self) -> AppResult<Vec<T>> {
        self.context.fetch_all().await
    }

    async fn update(&self, entity: &T) -> AppResult<()> {
        let id = entity.id().ok_or_else(|| {
            AppError::validation(format!("{} has no identity and cannot be updated", T::NAME))
        })?;
        entity.validate()?;

        if !self.context.replace(entity).await? {
            return Err(not_found::<T>(id));
        }

        debug!(entity = T::NAME, id = %id, "Entity updated");
        Ok(())
    }

    async fn delete(&self, id: &T::Id) -> AppResult<()> {
        if !self.context.remove(id).await? {
            return Err(not_found::<T>(id));
        }

        debug!(entity = T::NAME, id = %id, "Entity deleted");
        Ok(())
    }

    async fn exists(&self, id: &T::Id) -> AppResult<bool> {
        Ok(self.context.fetch(id).await?.is_some())
    }
}

#[async_trait]
impl<T, C> PageableRepository<T> for GenericRepository<T, C>
where
    T: Entity,
    C: EntityStore<T>,
{
    async fn find_page(&self, pagination: &Pagination) -> AppResult<PagedResult<T>> {
        let items = self
            .context
            .fetch_page(pagination.limit(), pagination.offset())
            .await?;
        let total = self.context.count().await?;

        Ok(PagedResult::new(items, total, pagination))
    }

    async fn count(&self) -> AppResult<u64> {
        self.context.count().await
    }
}
