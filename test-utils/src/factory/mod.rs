//! Row factories for test data.
//!
//! Each table has a `Factory` builder for customised rows and a `create_*`
//! shorthand for rows with defaults.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::user::UserFactory::new(&db)
//!     .discord_id("304789212224552972")
//!     .username("admin")
//!     .build()
//!     .await?;
//! let entry = factory::create_action_log(&db, &user.discord_id).await?;
//! ```

pub mod action_log;
pub mod helpers;
pub mod user;

pub use action_log::create_action_log;
pub use user::create_user;
