//! 持久化层模块

mod expense_repository;
mod migrations;

pub use expense_repository::{ExpenseRepositoryImpl, ExpenseRow};
pub use migrations::migrate;
