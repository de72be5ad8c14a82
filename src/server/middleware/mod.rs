//! Session wrappers and the authentication guard used by controllers.

pub mod auth;
pub mod session;

#[cfg(test)]
mod test;
