//! 服务运行时

use tally_config::AppConfig;
use tally_errors::{AppError, AppResult};
use tally_telemetry::{PrometheusHandle, init_metrics, init_tracing, init_tracing_json};
use tracing::info;

/// 初始化服务运行时
///
/// 安装日志与 Prometheus recorder，返回的句柄用于导出指标。
pub fn init_runtime(config: &AppConfig) -> AppResult<PrometheusHandle> {
    // 生产环境强制 JSON 日志
    let result = if config.is_production() || config.telemetry.json {
        init_tracing_json(&config.telemetry.log_level)
    } else {
        init_tracing(&config.telemetry.log_level)
    };
    result.map_err(|e| AppError::internal(format!("Failed to initialize tracing: {}", e)))?;

    let metrics = init_metrics()
        .map_err(|e| AppError::internal(format!("Failed to initialize metrics: {}", e)))?;

    info!(
        app_name = %config.app_name,
        app_env = %config.app_env,
        "Runtime initialized"
    );
    Ok(metrics)
}
