//! expense-migrate - 应用迁移并检查费用存储

use expense_service::infrastructure::persistence::{ExpenseRepositoryImpl, migrate};
use tally_ports::{EmailSender, PageableRepository};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tally_bootstrap::run("config", |infra| async move {
        let context = infra.pg_context();
        migrate(context.pool()).await?;

        let repository = ExpenseRepositoryImpl::new(context);
        let total = repository.count().await?;
        info!(expenses = total, "Expense store ready");

        if let Some(to) = &infra.config().email.notify_to {
            let subject = format!("[{}] expense store migrated", infra.config().app_name);
            let body = format!("Migrations applied. {} expenses stored.", total);
            infra.email_sender().send_email(to, &subject, &body).await?;
        }

        Ok(())
    })
    .await
}
