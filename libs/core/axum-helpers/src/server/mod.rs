pub mod shutdown;

pub use shutdown::shutdown_signal;

use crate::errors::handlers::not_found;
use axum::Router;
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};

/// Starts the Axum server with graceful shutdown.
///
/// # Errors
/// Returns an error if the TCP listener fails to bind to the configured
/// address or the server fails while running.
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;

    info!("Server starting on {}", listener.local_addr()?);
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        })?;

    Ok(())
}

/// Assemble the application router with common middleware.
///
/// - API routes nested under `/api`
/// - request tracing (span per request, response log line)
/// - CORS (see below)
/// - response compression
/// - 404 fallback for unmatched routes
///
/// # CORS
///
/// `CORS_ALLOWED_ORIGIN` may carry a comma-separated origin list, e.g.
/// `CORS_ALLOWED_ORIGIN=http://localhost:8080,https://example.com`.
/// When unset, a permissive policy is used.
pub fn create_router(apis: Router) -> Router {
    Router::new()
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer())
        .layer(CompressionLayer::new())
}

fn cors_layer() -> CorsLayer {
    use axum::http::{HeaderValue, Method};

    let Ok(origins_str) = std::env::var("CORS_ALLOWED_ORIGIN") else {
        return CorsLayer::permissive();
    };

    let allowed_origins: Vec<HeaderValue> = origins_str
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", s);
                None
            }
        })
        .collect();

    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    info!("CORS configured with allowed origins: {}", origins_str);

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .max_age(Duration::from_secs(3600))
}
