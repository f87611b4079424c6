use prometheus::{core::Collector, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};
use std::time::{Duration, Instant};

use crate::{
    config::MetricsOptions,
    error::Result,
    models::labels::{LabelTuple, LABEL_NAMES},
};

/// Shared by every in-flight request; calls must be safe concurrently.
pub trait MeasurementSink: Send + Sync + 'static {
    type Timer: Send;

    fn start_timer(&self, labels: &LabelTuple) -> Self::Timer;

    fn record_duration(&self, timer: Self::Timer, labels: &LabelTuple);

    /// Drop a timer whose request turned out not to be routed.
    fn discard_timer(&self, timer: Self::Timer) {
        drop(timer);
    }

    fn increment_success(&self, labels: &LabelTuple);

    fn increment_client_error(&self, labels: &LabelTuple);

    fn increment_server_error(&self, labels: &LabelTuple);
}

pub struct RequestTimer {
    start: Instant,
}

impl RequestTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[derive(Clone)]
pub struct HttpServerMetric {
    duration: HistogramVec,
    succeeded: IntCounterVec,
    client_errors: IntCounterVec,
    server_errors: IntCounterVec,
}

impl HttpServerMetric {
    /// Nothing stays registered if any family fails to register.
    pub fn new(options: &MetricsOptions, registry: &Registry) -> Result<Self> {
        let duration = HistogramVec::new(
            HistogramOpts::new(
                "request_duration_seconds",
                "Duration of HTTP requests in seconds",
            )
            .namespace(options.namespace.clone())
            .const_labels(options.const_labels.clone()),
            &LABEL_NAMES,
        )?;
        let succeeded = IntCounterVec::new(
            counter_opts(options, "request_succeeded_total", "Requests answered with a 2xx status"),
            &LABEL_NAMES,
        )?;
        let client_errors = IntCounterVec::new(
            counter_opts(options, "request_client_error_total", "Requests answered with a 4xx status"),
            &LABEL_NAMES,
        )?;
        let server_errors = IntCounterVec::new(
            counter_opts(options, "request_server_error_total", "Requests answered with a 5xx status"),
            &LABEL_NAMES,
        )?;

        let metric = Self {
            duration,
            succeeded,
            client_errors,
            server_errors,
        };
        metric.register(registry)?;

        tracing::info!(
            namespace = %options.namespace,
            const_labels = options.const_labels.len(),
            "Registered HTTP server metrics"
        );

        Ok(metric)
    }

    fn collectors(&self) -> Vec<Box<dyn Collector>> {
        vec![
            Box::new(self.duration.clone()),
            Box::new(self.succeeded.clone()),
            Box::new(self.client_errors.clone()),
            Box::new(self.server_errors.clone()),
        ]
    }

    fn register(&self, registry: &Registry) -> Result<()> {
        for (registered, collector) in self.collectors().into_iter().enumerate() {
            if let Err(e) = registry.register(collector) {
                for done in self.collectors().into_iter().take(registered) {
                    let _ = registry.unregister(done);
                }
                return Err(e.into());
            }
        }
        Ok(())
    }
}

fn counter_opts(options: &MetricsOptions, name: &str, help: &str) -> Opts {
    Opts::new(name, help)
        .namespace(options.namespace.clone())
        .const_labels(options.const_labels.clone())
}

impl MeasurementSink for HttpServerMetric {
    type Timer = RequestTimer;

    fn start_timer(&self, _labels: &LabelTuple) -> RequestTimer {
        RequestTimer::new()
    }

    fn record_duration(&self, timer: RequestTimer, labels: &LabelTuple) {
        let values = labels.values();
        self.duration
            .with_label_values(&values)
            .observe(timer.elapsed().as_secs_f64());

        // Materialise every outcome series for this tuple at zero so each
        // counter family lists all finished routes.
        self.succeeded.with_label_values(&values);
        self.client_errors.with_label_values(&values);
        self.server_errors.with_label_values(&values);
    }

    fn increment_success(&self, labels: &LabelTuple) {
        self.succeeded.with_label_values(&labels.values()).inc();
    }

    fn increment_client_error(&self, labels: &LabelTuple) {
        self.client_errors.with_label_values(&labels.values()).inc();
    }

    fn increment_server_error(&self, labels: &LabelTuple) {
        self.server_errors.with_label_values(&labels.values()).inc();
    }
}
