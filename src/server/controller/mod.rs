//! HTTP request handlers.
//!
//! Controllers resolve the caller, convert DTOs into domain requests and hand
//! them to services; errors convert into responses through `AppError`.

pub mod auth;
pub mod discord;

#[cfg(test)]
mod test;
