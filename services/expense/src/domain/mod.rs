//! 领域层

mod expense;
mod repository;

pub use expense::*;
pub use repository::ExpenseRepository;
