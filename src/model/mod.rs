//! Wire DTOs exchanged with the dashboard.
//!
//! Field names follow what the dashboard already sends and reads (camelCase),
//! Discord snowflakes are carried as strings.

pub mod api;
pub mod discord;
pub mod session;
