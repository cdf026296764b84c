//! SMTP 邮件发送实现

use std::time::Duration;

use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;
use tally_config::EmailConfig;
use tally_errors::{AppError, AppResult};
use tally_ports::{EmailSender, validate_recipient};
use tracing::{debug, info, warn};

use crate::record_send;

/// SMTP 邮件发送器
///
/// 传输在构造时建立一次，之后的发送复用同一连接池。
pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailSender {
    pub fn new(config: &EmailConfig) -> AppResult<Self> {
        let from = format!("{} <{}>", config.from_name, config.from_email)
            .parse::<Mailbox>()
            .map_err(|e| AppError::validation(format!("Invalid from address: {}", e)))?;

        let builder = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host).map_err(
                |e| AppError::internal(format!("Failed to create SMTP transport: {}", e)),
            )?
        } else {
            // 明文连接，仅用于本地 SMTP（如 mailpit）
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
        };

        let mut builder = builder
            .port(config.smtp_port)
            .timeout(Some(Duration::from_secs(config.timeout_secs)));

        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.expose_secret().clone(),
            ));
        }

        debug!(
            smtp_host = %config.smtp_host,
            smtp_port = config.smtp_port,
            use_tls = config.use_tls,
            "SMTP transport configured"
        );

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    /// 构建纯文本邮件
    fn build_message(&self, to: &str, subject: &str, body: &str) -> AppResult<Message> {
        let to = to
            .trim()
            .parse::<Mailbox>()
            .map_err(|e| AppError::validation(format!("Invalid to address: {}", e)))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| AppError::internal(format!("Failed to build message: {}", e)))
    }
}

#[async_trait::async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        validate_recipient(to)?;
        debug!(to = %to, subject = %subject, "Sending email");

        let message = self.build_message(to, subject, body)?;

        match self.transport.send(message).await {
            Ok(_) => {
                record_send("smtp", "success");
                info!(to = %to, subject = %subject, "Email sent successfully");
                Ok(())
            }
            Err(e) => {
                record_send("smtp", "failure");
                warn!(to = %to, error = %e, "Failed to send email");
                Err(AppError::delivery(format!("Failed to send email: {}", e)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics_capture::capture;
    use secrecy::Secret;
    use tally_config::EmailTransport;

    fn config(host: &str, port: u16) -> EmailConfig {
        EmailConfig {
            transport: EmailTransport::Smtp,
            smtp_host: host.to_string(),
            smtp_port: port,
            username: String::new(),
            password: Secret::new(String::new()),
            from_email: "noreply@example.com".to_string(),
            from_name: "Test".to_string(),
            use_tls: false,
            timeout_secs: 2,
            notify_to: None,
        }
    }

    #[tokio::test]
    async fn test_build_message() {
        let sender = SmtpEmailSender::new(&config("smtp.example.com", 587)).unwrap();

        let message = sender
            .build_message("test@example.com", "Test Subject", "")
            .unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("Subject: Test Subject"));
        assert!(raw.contains("To: test@example.com"));
        assert!(raw.contains("From: Test <noreply@example.com>"));
    }

    #[tokio::test]
    async fn test_invalid_from_address_rejected() {
        let mut cfg = config("smtp.example.com", 587);
        cfg.from_email = "not an address".to_string();

        assert!(matches!(
            SmtpEmailSender::new(&cfg),
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_recipient_rejected_before_transport() {
        let sender = SmtpEmailSender::new(&config("127.0.0.1", 1)).unwrap();

        let err = sender.send_email("", "subject", "body").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_delivery_error() {
        // 本机 1 号端口无服务监听，连接会被拒绝
        let sender = SmtpEmailSender::new(&config("127.0.0.1", 1)).unwrap();

        let err = sender
            .send_email("alice@example.com", "Expense approved", "Your expense was approved.")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Delivery(_)));
    }

    #[test]
    fn test_delivery_failure_is_counted() {
        let (result, counts) = capture(|| {
            tokio_test::block_on(async {
                let sender = SmtpEmailSender::new(&config("127.0.0.1", 1))?;
                sender.send_email("alice@example.com", "Report", "Body").await
            })
        });

        assert!(matches!(result, Err(AppError::Delivery(_))));
        assert_eq!(counts, vec![("smtp".to_string(), "failure".to_string(), 1)]);
    }
}
