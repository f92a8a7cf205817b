//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store selection and service construction
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request DTOs and field validation
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::middleware;

pub use services::AppServices;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: Arc<AppServices>) -> Router {
    let member_state = middleware::MemberState {
        members: services.members.clone(),
    };

    // Cart routes act on behalf of a resolved member.
    let cart = routes::carts::router().layer(axum::middleware::from_fn_with_state(
        member_state,
        middleware::member_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/products", routes::products::router())
        .nest("/members", routes::members::router())
        .nest("/cart", cart)
        .layer(Extension(services))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(errors::panic_response)),
        )
}
