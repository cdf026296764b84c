//! repository-core - 通用仓储实现
//!
//! `GenericRepository<T, C>` 把 `Repository<T>` 的语义（标识分配、
//! NotFound 判定）建立在任意持久化上下文 `C: EntityStore<T>` 之上。
//! 各实体通过显式实例化获得自己的仓储，例如
//! `GenericRepository<Expense, PgContext>`。

mod generic;

pub use generic::GenericRepository;
