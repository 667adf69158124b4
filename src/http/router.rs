//! Router configuration: routes plus request logging.

use std::time::Instant;

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use log::info;

use super::handlers;
use super::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/districts", get(handlers::get_districts))
        .route("/uhi", get(handlers::get_uhi))
        .route("/lst/timeseries", get(handlers::get_lst_time_series));

    Router::new()
        .route("/", get(handlers::dashboard_page))
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;
    info!(
        "{} {} -> {} in {:?}",
        method,
        uri,
        response.status(),
        started.elapsed()
    );
    response
}
