//! Server-side domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and
//! into DTOs at the controller boundary.

pub mod action;
pub mod action_log;
pub mod identity;
pub mod user;
