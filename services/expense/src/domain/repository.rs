//! 费用 Repository trait

use tally_ports::PageableRepository;

use super::Expense;

/// 费用仓储
///
/// 调用方依赖这个具名契约而不是泛型 `Repository<Expense>`，
/// 本身不增加任何操作。
pub trait ExpenseRepository: PageableRepository<Expense> {}
