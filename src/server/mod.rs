//! Server-side API backend and Discord bot.
//!
//! The backend authenticates dashboard users through Discord OAuth and runs
//! privileged Discord actions on their behalf: creating channel structures,
//! assigning the verified role and playing YouTube audio in voice. The same
//! actions are reachable from the bot's `/play` slash command.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers and DTO conversion
//! - **Service Layer** (`service/`) - Authorization policy, command dispatch and Discord adapters
//! - **Data Layer** (`data/`) - Users and the action log
//! - **Model Layer** (`model/`) - Identity, action requests and operation parameters
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Typed session access and the authentication guard
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state
//! - **Startup** (`startup`) - Database, session, HTTP and OAuth setup
//! - **Router** (`router`) - Axum routes and OpenAPI documentation
//! - **Bot** (`bot/`) - Gateway connection and slash command handling
//!
//! # Request Flow
//!
//! 1. **Router** receives the request; the session layer loads the session
//! 2. **Controller** resolves the identity through `AuthGuard`
//! 3. **Dispatcher** authorizes, validates and executes the action under a timeout
//! 4. **Data** records the outcome in the action log
//! 5. **Controller** returns `{"success":true}` or the curated error

pub mod bot;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
