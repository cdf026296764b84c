//! Email 适配器
//!
//! `EmailSender` 的两种实现：
//! - `SmtpEmailSender`：通过 SMTP 发送
//! - `LogEmailSender`：只写日志，用于开发环境

mod log;
mod smtp;

pub use log::LogEmailSender;
pub use smtp::SmtpEmailSender;

fn record_send(transport: &'static str, outcome: &'static str) {
    metrics::counter!(
        tally_telemetry::EMAIL_SEND_TOTAL,
        "transport" => transport,
        "outcome" => outcome
    )
    .increment(1);
}
