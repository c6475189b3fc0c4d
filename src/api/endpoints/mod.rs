//! API endpoint handlers.

pub mod analyze;
pub mod audit;
pub mod health;
