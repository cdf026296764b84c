//! EmailSender trait 定义

use async_trait::async_trait;
use email_address::EmailAddress;
use tally_errors::{AppError, AppResult};

/// 邮件发送接口
///
/// 具体传输方式（SMTP、日志等）在装配时选定，调用方只依赖此接口。
/// 传输失败返回 `AppError::Delivery`，本层不做重试。
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// 发送单封纯文本邮件
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> AppResult<()>;
}

/// 校验收件人地址
pub fn validate_recipient(to: &str) -> AppResult<()> {
    let to = to.trim();
    if to.is_empty() {
        return Err(AppError::validation("Recipient address must not be empty"));
    }
    if !EmailAddress::is_valid(to) {
        return Err(AppError::validation(format!(
            "Invalid recipient address: {}",
            to
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_recipient() {
        assert!(validate_recipient("alice@example.com").is_ok());
        assert!(matches!(
            validate_recipient(""),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            validate_recipient("   "),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            validate_recipient("not-an-address"),
            Err(AppError::Validation(_))
        ));
    }
}
