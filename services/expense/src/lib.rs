//! expense-service - 费用记录服务
//!
//! 领域层定义 `Expense` 实体与 `ExpenseRepository` 契约，
//! 基础设施层把通用仓储绑定到 `Expense` 并提供 PostgreSQL 映射。

pub mod domain;
pub mod infrastructure;
