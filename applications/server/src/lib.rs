//! Worldwide Freight Server Library
//!
//! REST backend for carriers, commodities and user accounts, guarded by
//! bearer session tokens.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use api::create_router;
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{AccountService, CatalogueService, CredentialStore, TokenIssuer};
pub use state::AppState;
