//! 费用实体

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tally_domain_core::{Entity, EntityId, Money, UserId};
use tally_errors::{AppError, AppResult};
use uuid::Uuid;

/// 标题最大长度（字符）
pub const MAX_TITLE_LEN: usize = 200;

/// 费用 ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct ExpenseId(pub Uuid);

impl EntityId for ExpenseId {
    fn generate() -> Self {
        Self(tally_common::new_id())
    }

    fn as_uuid(&self) -> Uuid {
        self.0
    }
}

/// 费用类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Travel,
    Meals,
    Lodging,
    Supplies,
    Other,
}

impl ExpenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Travel => "travel",
            Self::Meals => "meals",
            Self::Lodging => "lodging",
            Self::Supplies => "supplies",
            Self::Other => "other",
        }
    }
}

impl FromStr for ExpenseCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "travel" => Ok(Self::Travel),
            "meals" => Ok(Self::Meals),
            "lodging" => Ok(Self::Lodging),
            "supplies" => Ok(Self::Supplies),
            "other" => Ok(Self::Other),
            _ => Err(AppError::validation(format!("Unknown expense category: {}", s))),
        }
    }
}

/// 费用
///
/// 新建时没有标识，由仓储在首次保存时分配。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Option<ExpenseId>,
    pub owner_id: UserId,
    pub title: String,
    pub amount: Money,
    pub category: ExpenseCategory,
    pub incurred_on: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        owner_id: UserId,
        title: impl Into<String>,
        amount: Money,
        category: ExpenseCategory,
        incurred_on: NaiveDate,
    ) -> AppResult<Self> {
        let title = title.into();
        validate_title(&title)?;
        validate_amount(&amount)?;

        let now = now();
        Ok(Self {
            id: None,
            owner_id,
            title,
            amount,
            category,
            incurred_on,
            notes: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn retitle(&mut self, title: impl Into<String>) -> AppResult<()> {
        let title = title.into();
        validate_title(&title)?;
        self.title = title;
        self.touch();
        Ok(())
    }

    pub fn change_amount(&mut self, amount: Money) -> AppResult<()> {
        validate_amount(&amount)?;
        self.amount = amount;
        self.touch();
        Ok(())
    }

    pub fn recategorize(&mut self, category: ExpenseCategory) {
        self.category = category;
        self.touch();
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = now();
    }
}

impl Entity for Expense {
    type Id = ExpenseId;
    const NAME: &'static str = "Expense";

    fn id(&self) -> Option<&ExpenseId> {
        self.id.as_ref()
    }

    fn assign_id(&mut self, id: ExpenseId) {
        self.id = Some(id);
    }

    fn validate(&self) -> AppResult<()> {
        validate_title(&self.title)?;
        validate_amount(&self.amount)
    }
}

// PostgreSQL 时间戳精度为微秒
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn validate_title(title: &str) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::validation("Expense title must not be empty"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(AppError::validation(format!(
            "Expense title must be at most {} characters",
            MAX_TITLE_LEN
        )));
    }
    Ok(())
}

fn validate_amount(amount: &Money) -> AppResult<()> {
    if !amount.currency.is_valid() {
        return Err(AppError::validation(format!(
            "Invalid currency code: {}",
            amount.currency.as_str()
        )));
    }
    if amount.is_negative() {
        return Err(AppError::validation("Expense amount must not be negative"));
    }
    Ok(())
}
