//! Orientation API - backend for Moroccan higher-education orientation
//!
//! Catalog of institutions, their programs (filières) and admission
//! criteria, student profiles per track, email-verified accounts and an
//! advisory chat proxied to Groq or Gemini.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and request/response types
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, cache, storage, LLM vendors)
//! - **jobs**: Background mail delivery
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! orientation-api serve
//!
//! # Run migrations
//! orientation-api migrate up
//!
//! # Load the reference catalog, replacing what is there
//! orientation-api seed --force
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod jobs;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{hash_password, verify_password, User};
pub use errors::{AppError, AppResult};
pub use infra::Cache;
