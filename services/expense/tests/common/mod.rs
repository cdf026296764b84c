// 测试辅助函数（被多个集成测试共享）

use chrono::NaiveDate;
use expense_service::domain::{Expense, ExpenseCategory};
use tally_domain_core::{Money, UserId};

pub fn new_expense(title: &str, amount_minor: i64) -> Expense {
    Expense::new(
        UserId::new(),
        title,
        Money::usd(amount_minor),
        ExpenseCategory::Travel,
        NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
    )
    .unwrap()
}
