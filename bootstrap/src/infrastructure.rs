//! 基础设施资源管理
//!
//! 根据配置装配持久化上下文与邮件发送器，服务只依赖抽象接口

use std::sync::Arc;

use secrecy::ExposeSecret;
use tally_adapter_email::{LogEmailSender, SmtpEmailSender};
use tally_adapter_postgres::{PgContext, PostgresConfig, check_connection, create_pool};
use tally_config::{AppConfig, EmailConfig, EmailTransport};
use tally_errors::AppResult;
use tally_ports::EmailSender;
use tracing::info;

/// 基础设施资源容器
pub struct Infrastructure {
    /// 应用配置
    config: AppConfig,
    /// PostgreSQL 持久化上下文
    pg_context: Arc<PgContext>,
    /// 邮件发送器
    email_sender: Arc<dyn EmailSender>,
}

impl Infrastructure {
    /// 从配置创建基础设施资源
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let pg_config = PostgresConfig::new(config.database.url.expose_secret())
            .with_max_connections(config.database.max_connections);
        let pool = create_pool(&pg_config).await?;
        check_connection(&pool).await?;

        let email_sender = build_email_sender(&config.email)?;

        Ok(Self {
            config,
            pg_context: Arc::new(PgContext::new(pool)),
            email_sender,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn pg_context(&self) -> Arc<PgContext> {
        Arc::clone(&self.pg_context)
    }

    pub fn email_sender(&self) -> Arc<dyn EmailSender> {
        Arc::clone(&self.email_sender)
    }
}

/// 按配置选择邮件发送实现
pub fn build_email_sender(config: &EmailConfig) -> AppResult<Arc<dyn EmailSender>> {
    let sender: Arc<dyn EmailSender> = match config.transport {
        EmailTransport::Smtp => Arc::new(SmtpEmailSender::new(config)?),
        EmailTransport::Log => Arc::new(LogEmailSender::new()),
    };

    info!(transport = ?config.transport, "Email sender initialized");
    Ok(sender)
}
