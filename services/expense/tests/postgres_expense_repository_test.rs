//! ExpenseRepository 集成测试（PostgreSQL）
//!
//! 需要 DATABASE_URL，默认忽略：`cargo test -- --ignored`

mod common;

use std::sync::Arc;

use common::new_expense;
use expense_service::infrastructure::persistence::ExpenseRepositoryImpl;
use sqlx::PgPool;
use tally_adapter_postgres::PgContext;
use tally_domain_core::{Entity, Money};
use tally_errors::AppError;
use tally_ports::{PageableRepository, Repository};

fn repository(pool: PgPool) -> ExpenseRepositoryImpl {
    ExpenseRepositoryImpl::new(Arc::new(PgContext::new(pool)))
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_create_read_delete_scenario(pool: PgPool) {
    let repo = repository(pool);

    let created = repo.create(new_expense("Flight to Lisbon", 32_000)).await.unwrap();
    let id = created.id().cloned().unwrap();

    assert_eq!(repo.find_by_id(&id).await.unwrap(), created);

    repo.delete(&id).await.unwrap();
    assert!(repo.find_by_id(&id).await.unwrap_err().is_not_found());
    assert!(repo.delete(&id).await.unwrap_err().is_not_found());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_update_and_count(pool: PgPool) {
    let repo = repository(pool);

    let mut expense = repo.create(new_expense("Dinner", 5_400).with_notes("Client")).await.unwrap();
    expense.change_amount(Money::usd(6_000)).unwrap();
    expense.set_notes(None);
    repo.update(&expense).await.unwrap();

    let read = repo.find_by_id(expense.id().unwrap()).await.unwrap();
    assert_eq!(read, expense);
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_duplicate_identity_is_persistence_error(pool: PgPool) {
    let repo = repository(pool);

    let created = repo.create(new_expense("Museum", 1_200)).await.unwrap();
    let err = repo.create(created).await.unwrap_err();

    assert!(matches!(err, AppError::Persistence(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_invalid_update_is_validation_error(pool: PgPool) {
    let repo = repository(pool);

    let mut expense = repo.create(new_expense("Parking", 800)).await.unwrap();
    expense.amount = Money::usd(-500);

    let err = repo.update(&expense).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(
        repo.find_by_id(expense.id().unwrap()).await.unwrap().amount,
        Money::usd(800)
    );
}
