//! Factories for Serenity API objects.
//!
//! Objects are built by deserializing JSON shaped like Discord's REST responses,
//! so they go through the same code paths as real payloads.
//!
//! - `role::create_test_role` - Serenity `Role`
//! - `member::create_test_member` - Serenity `Member` holding a set of role ids

pub mod member;
pub mod role;

pub use member::create_test_member;
pub use role::create_test_role;
