use crate::{
    config::Config,
    middleware::metrics::Instrumentor,
    services::metrics::HttpServerMetric,
};
use prometheus::Registry;
use std::sync::Arc;

pub mod health;
pub mod hello;
pub mod metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub registry: Registry,
    pub instrumentor: Arc<Instrumentor<HttpServerMetric>>,
}

impl AppState {
    pub fn new(config: Config, registry: Registry) -> crate::error::Result<Self> {
        let sink = HttpServerMetric::new(&config.metrics, &registry)?;
        Ok(Self {
            config,
            registry,
            instrumentor: Arc::new(Instrumentor::new(sink)),
        })
    }
}
