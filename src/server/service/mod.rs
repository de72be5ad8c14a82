//! Service layer for business logic and orchestration.
//!
//! Services sit between controllers (or bot handlers) and the data layer and
//! own every call to Discord.

pub mod auth;
pub mod discord;
pub mod dispatch;
pub mod policy;
pub mod voice;
