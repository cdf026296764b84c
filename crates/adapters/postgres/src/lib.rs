//! tally-adapter-postgres - PostgreSQL 适配器

mod connection;
mod context;
mod sql;

pub use connection::*;
pub use context::*;
