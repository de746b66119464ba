//! API routes module

pub mod health;
pub mod products;

use axum::Router;
use domain_products::{ProductRepository, ProductService};

/// Create all API routes
pub fn routes<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    Router::new().nest("/products", products::router(service))
}
