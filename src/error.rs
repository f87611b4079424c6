use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("Metric registration failed: {0}")]
    Registration(#[from] prometheus::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to encode metrics: {0}")]
    Encode(String),
}

impl IntoResponse for MetricsError {
    fn into_response(self) -> Response {
        let error_message = match self {
            MetricsError::Registration(ref e) => {
                tracing::error!("Metric registration error: {}", e);
                "Metric registration error"
            }
            MetricsError::InvalidConfig(ref msg) => {
                tracing::error!("Configuration error: {}", msg);
                "Configuration error"
            }
            MetricsError::Encode(ref msg) => {
                tracing::error!("Metrics encoding error: {}", msg);
                "Metrics encoding error"
            }
        };
        let status = StatusCode::INTERNAL_SERVER_ERROR;

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, MetricsError>;
