//! Repository layer: table-scoped database operations.

mod audit;

pub use audit::*;
