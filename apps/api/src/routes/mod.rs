pub mod contact;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

/// Request-body cap for the contact route. Base64 inflates the 5 MiB
/// attachment limit by 4/3, and the rest of the JSON rides on top, so
/// axum's default 2 MB limit would reject valid submissions.
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Builds the full application router, CORS layer included, so tests and
/// `main` exercise the same surface. Preflight `OPTIONS` requests are
/// answered by the CORS layer; non-POST methods on the contact route get
/// a 405 from the method router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/contact",
            post(contact::handle_submission).layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .layer(cors_layer())
        .with_state(state)
}

/// Mirrors the headers the browser form sends alongside submissions.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ])
}
