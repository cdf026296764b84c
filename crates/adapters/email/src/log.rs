//! 日志邮件发送实现

use tally_errors::AppResult;
use tally_ports::{EmailSender, validate_recipient};
use tracing::info;

use crate::record_send;

/// 只记录日志的邮件发送器
#[derive(Debug, Default, Clone)]
pub struct LogEmailSender;

impl LogEmailSender {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl EmailSender for LogEmailSender {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        validate_recipient(to)?;

        info!(
            to = %to,
            subject = %subject,
            body_len = body.len(),
            "Email captured by log transport"
        );
        record_send("log", "success");
        Ok(())
    }
}
