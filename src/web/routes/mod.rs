//! Contains all the routes that this application can handle.

mod notification_popup;

pub use notification_popup::notification_popup;

use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::AppState;

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// All the routes of the server.
///
/// Every response, errors included, carries the permissive CORS headers the
/// browser popup expects. The deployed surface sends a wildcard origin
/// together with allow-credentials, a combination `CorsLayer` refuses to
/// build, so the headers are set verbatim instead.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .route("/notificationPopup", post(notification_popup))
        .with_state(app_state)
        .route("/health-check", get(health_check))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("access-control-allow-origin"),
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("access-control-allow-methods"),
            HeaderValue::from_static("GET, POST, PUT, DELETE"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("access-control-allow-headers"),
            HeaderValue::from_static("Content-Type, Authorization"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("access-control-allow-credentials"),
            HeaderValue::from_static("true"),
        ))
        .layer(TraceLayer::new_for_http())
}
