//! 数据库迁移

use sqlx::PgPool;
use tally_errors::{AppError, AppResult};
use tracing::info;

/// 执行 `migrations/` 下的迁移
pub async fn migrate(pool: &PgPool) -> AppResult<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::persistence(format!("Failed to run migrations: {}", e)))?;

    info!("Expense migrations applied");
    Ok(())
}
