//! Expense 仓储实现
//!
//! 通用仓储绑定到 `Expense`，另外提供 `expenses` 表的行映射。

use chrono::{DateTime, NaiveDate, Utc};
use tally_adapter_postgres::{PgContext, PgEntity, PgQuery};
use tally_domain_core::{Currency, Money, UserId};
use tally_errors::AppResult;
use tally_ports::EntityStore;
use tally_repository_core::GenericRepository;
use uuid::Uuid;

use crate::domain::{Expense, ExpenseId, ExpenseRepository};

/// Expense 仓储，默认使用 PostgreSQL 上下文
pub type ExpenseRepositoryImpl<C = PgContext> = GenericRepository<Expense, C>;

impl<C> ExpenseRepository for GenericRepository<Expense, C> where C: EntityStore<Expense> {}

/// `expenses` 表的行
#[derive(Debug, sqlx::FromRow)]
pub struct ExpenseRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub amount_minor: i64,
    pub currency: String,
    pub category: String,
    pub incurred_on: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PgEntity for Expense {
    type Row = ExpenseRow;

    const TABLE: &'static str = "expenses";

    const COLUMNS: &'static [&'static str] = &[
        "owner_id",
        "title",
        "amount_minor",
        "currency",
        "category",
        "incurred_on",
        "notes",
        "created_at",
        "updated_at",
    ];

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.owner_id.0)
            .bind(&self.title)
            .bind(self.amount.amount)
            .bind(self.amount.currency.as_str())
            .bind(self.category.as_str())
            .bind(self.incurred_on)
            .bind(&self.notes)
            .bind(self.created_at)
            .bind(self.updated_at)
    }

    fn from_row(row: ExpenseRow) -> AppResult<Self> {
        Ok(Self {
            id: Some(ExpenseId(row.id)),
            owner_id: UserId::from_uuid(row.owner_id),
            title: row.title,
            amount: Money::new(row.amount_minor, Currency::new(&row.currency)),
            category: row.category.parse()?,
            incurred_on: row.incurred_on,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
