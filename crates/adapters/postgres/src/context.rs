//! PostgreSQL 持久化上下文

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgPool, PgRow};
use sqlx::{FromRow, Postgres};
use tally_domain_core::{Entity, EntityId};
use tally_errors::{AppError, AppResult};
use tally_ports::EntityStore;

use crate::sql;

/// 绑定了参数的查询
pub type PgQuery<'q> = sqlx::query::Query<'q, Postgres, PgArguments>;

/// 可映射到 PostgreSQL 表的实体
pub trait PgEntity: Entity {
    /// 行类型，列顺序为标识列后接 `COLUMNS`
    type Row: for<'r> FromRow<'r, PgRow> + Send + Unpin;

    const TABLE: &'static str;

    const ID_COLUMN: &'static str = "id";

    /// 除标识列之外的列，顺序必须与 `bind_columns` 一致
    const COLUMNS: &'static [&'static str];

    /// 按 `COLUMNS` 顺序绑定列值
    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q>;

    fn from_row(row: Self::Row) -> AppResult<Self>;
}

/// PostgreSQL 持久化上下文
///
/// 连接池由外部创建并管理，上下文只持有句柄。
#[derive(Debug, Clone)]
pub struct PgContext {
    pool: PgPool,
}

impl PgContext {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// 存储层错误统一映射为 Persistence，按 SQLSTATE 补充说明
fn persistence_error<T: Entity>(action: &str, e: sqlx::Error) -> AppError {
    let detail = match &e {
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some("23505") => format!("unique constraint violated: {}", db_err),
            Some("23514") => format!("check constraint violated: {}", db_err),
            Some(code) => format!("database error ({}): {}", code, db_err),
            None => db_err.to_string(),
        },
        sqlx::Error::PoolTimedOut => "connection pool timeout".to_string(),
        other => other.to_string(),
    };

    AppError::persistence(format!("Failed to {} {}: {}", action, T::NAME, detail))
}

#[async_trait]
impl<T> EntityStore<T> for PgContext
where
    T: PgEntity,
{
    async fn insert(&self, entity: &T) -> AppResult<()> {
        let id = entity.id().ok_or_else(|| {
            AppError::validation(format!("{} must have an identity before insert", T::NAME))
        })?;

        let statement = sql::insert(T::TABLE, T::ID_COLUMN, T::COLUMNS);
        let query = sqlx::query(&statement).bind(id.as_uuid());

        entity
            .bind_columns(query)
            .execute(&self.pool)
            .await
            .map_err(|e| persistence_error::<T>("insert", e))?;

        Ok(())
    }

    async fn fetch(&self, id: &T::Id) -> AppResult<Option<T>> {
        let statement = sql::select_by_id(T::TABLE, T::ID_COLUMN, T::COLUMNS);

        let row = sqlx::query_as::<_, T::Row>(&statement)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| persistence_error::<T>("fetch", e))?;

        row.map(T::from_row).transpose()
    }

    async fn fetch_all(&self) -> AppResult<Vec<T>> {
        let statement = sql::select_all(T::TABLE, T::ID_COLUMN, T::COLUMNS);

        let rows = sqlx::query_as::<_, T::Row>(&statement)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| persistence_error::<T>("list", e))?;

        rows.into_iter().map(T::from_row).collect()
    }

    async fn fetch_page(&self, limit: u32, offset: u64) -> AppResult<Vec<T>> {
        let statement = sql::select_page(T::TABLE, T::ID_COLUMN, T::COLUMNS);

        let rows = sqlx::query_as::<_, T::Row>(&statement)
            .bind(i64::from(limit))
            // 超出 BIGINT 的偏移量按最大值处理，结果为空页
            .bind(i64::try_from(offset).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| persistence_error::<T>("list", e))?;

        rows.into_iter().map(T::from_row).collect()
    }

    async fn count(&self) -> AppResult<u64> {
        let statement = sql::count(T::TABLE);

        let total = sqlx::query_scalar::<_, i64>(&statement)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| persistence_error::<T>("count", e))?;

        Ok(total as u64)
    }

    async fn replace(&self, entity: &T) -> AppResult<bool> {
        let id = entity.id().ok_or_else(|| {
            AppError::validation(format!("{} must have an identity before update", T::NAME))
        })?;

        let statement = sql::update(T::TABLE, T::ID_COLUMN, T::COLUMNS);
        let query = sqlx::query(&statement).bind(id.as_uuid());

        let result = entity
            .bind_columns(query)
            .execute(&self.pool)
            .await
            .map_err(|e| persistence_error::<T>("update", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, id: &T::Id) -> AppResult<bool> {
        let statement = sql::delete(T::TABLE, T::ID_COLUMN);

        let result = sqlx::query(&statement)
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| persistence_error::<T>("delete", e))?;

        Ok(result.rows_affected() > 0)
    }
}
