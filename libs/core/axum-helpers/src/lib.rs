//! # Axum Helpers
//!
//! Cross-cutting utilities for the workspace's Axum services.
//!
//! ## Modules
//!
//! - **[`errors`]**: the central error-to-response translator
//! - **[`extractors`]**: custom extractors (numeric id path, validated JSON)
//! - **[`server`]**: router assembly, server startup, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new(); // Add your routes
//!     let router = create_router(api_routes);
//!
//!     let config = ServerConfig::default();
//!     create_app(router, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod server;

// Re-export error types
pub use errors::{AppError, FieldErrors, field_errors};

// Re-export extractors
pub use extractors::{IdPath, ValidatedJson};

// Re-export server helpers
pub use server::{create_app, create_router, shutdown_signal};
