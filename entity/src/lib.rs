//! SeaORM entity definitions for the chromeboard database.
//!
//! Tables mirror the migrations in the `migration` crate. Sessions are stored by
//! `tower-sessions-sqlx-store` in their own table and have no entity here.

pub mod prelude;

pub mod action_log;
pub mod user;
