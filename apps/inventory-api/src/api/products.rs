//! Products API routes

use axum::Router;
use domain_products::{ProductRepository, ProductService, handlers};

/// Create the products router
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    handlers::router(service)
}
