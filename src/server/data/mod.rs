//! Database repository layer.
//!
//! Repositories use SeaORM entity models internally and return domain models, so
//! the rest of the server never touches entity types directly.

pub mod action_log;
pub mod user;
