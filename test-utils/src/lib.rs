//! Chromeboard Test Utils
//!
//! Shared helpers for the chromeboard server tests: a builder for in-memory SQLite
//! test contexts (with an attached session), row factories for the `user` and
//! `action_log` tables, and factories for Serenity API objects.
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn stores_identity() -> Result<(), TestError> {
//!     let mut test = TestBuilder::new().with_auth_tables().build().await?;
//!     let (db, session) = test.db_and_session().await?;
//!     // ...
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod serenity;
