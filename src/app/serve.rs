use axum::{serve::Serve, Router};
use tokio::net::TcpListener;

use crate::{web::routes, AppState};

/// SERVE
/// The core function serving this application. Accepts a "TcpListener" and an
/// `AppState` and returns a `Serve` future. Needs to be awaited like so:
/// ```ignore
/// klaviomat::serve(listener, app_state).await;
/// ```
pub fn serve(listener: TcpListener, app_state: AppState) -> Serve<TcpListener, Router, Router> {
    let app = Router::new().merge(routes::routes(app_state));

    axum::serve(listener, app)
}
