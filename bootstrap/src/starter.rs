//! 服务启动器

use std::future::Future;

use tally_config::AppConfig;
use tally_errors::AppResult;
use tracing::{debug, error, info};

use crate::infrastructure::Infrastructure;
use crate::runtime::init_runtime;

/// 运行一个服务任务
///
/// 1. 加载配置
/// 2. 初始化运行时（日志、指标）
/// 3. 创建基础设施资源
/// 4. 执行调用方提供的任务，结束时输出指标快照
///
/// ```ignore
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     tally_bootstrap::run("config", |infra| async move {
///         migrate(infra.pg_context().pool()).await
///     })
///     .await
/// }
/// ```
pub async fn run<F, Fut>(config_dir: &str, task: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Infrastructure) -> Fut,
    Fut: Future<Output = AppResult<()>>,
{
    let config = AppConfig::load(config_dir)?;
    let metrics = init_runtime(&config)?;

    let infra = Infrastructure::from_config(config).await?;
    let app_name = infra.config().app_name.clone();
    info!(app_name = %app_name, "Infrastructure ready");

    let outcome = task(infra).await;
    debug!(app_name = %app_name, metrics = %metrics.render(), "Metrics snapshot");

    if let Err(e) = outcome {
        error!(app_name = %app_name, error = %e, "Task failed");
        return Err(e.into());
    }

    info!(app_name = %app_name, "Task completed");
    Ok(())
}
