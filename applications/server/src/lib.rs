//! Capsule Server Library
//!
//! Journal service with GitHub sign-in: exchanges OAuth codes for session
//! tokens and serves CRUD endpoints over memories.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use routes::create_router;
pub use services::{SessionClaims, SessionService};
pub use state::AppState;
