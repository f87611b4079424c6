//! Per-request HTTP metrics for axum services.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::handlers::AppState;

pub use config::{Config, MetricsOptions};
pub use error::MetricsError;
pub use middleware::{
    metrics::{metrics_middleware, Instrumentor},
    route::{MatchedPathResolver, RouteResolver},
};
pub use models::labels::{LabelTuple, Outcome, LABEL_NAMES, STATUS_PENDING};
pub use services::metrics::{HttpServerMetric, MeasurementSink, RequestTimer};

pub fn create_app(state: AppState) -> Router {
    let instrumentor = state.instrumentor.clone();

    Router::new()
        .route("/health", get(handlers::health::liveness))
        .route("/hello/:name", get(handlers::hello::hello))
        .route("/metrics", get(handlers::metrics::metrics_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .layer(from_fn_with_state(
            instrumentor,
            metrics_middleware::<HttpServerMetric, MatchedPathResolver>,
        ))
}
