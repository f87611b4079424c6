use axum::{
    extract::{Request, State},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::Response,
};
use std::{future::Future, sync::Arc};

use crate::{
    middleware::route::{MatchedPathResolver, RouteResolver},
    models::labels::{LabelTuple, Outcome},
    services::metrics::MeasurementSink,
};

const STANDARD_METHODS: [Method; 9] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::HEAD,
    Method::OPTIONS,
    Method::CONNECT,
    Method::PATCH,
    Method::TRACE,
];

pub struct Instrumentor<S, R = MatchedPathResolver> {
    sink: S,
    resolver: R,
}

impl<S: MeasurementSink> Instrumentor<S> {
    pub fn new(sink: S) -> Self {
        Self::with_resolver(sink, MatchedPathResolver)
    }
}

impl<S: MeasurementSink, R: RouteResolver> Instrumentor<S, R> {
    pub fn with_resolver(sink: S, resolver: R) -> Self {
        Self { sink, resolver }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub async fn instrument<F, Fut>(&self, request: Request, downstream: F) -> Response
    where
        F: FnOnce(Request) -> Fut,
        Fut: Future<Output = Response>,
    {
        // Extension methods are client-chosen strings; never label them.
        let route = if STANDARD_METHODS.contains(request.method()) {
            self.resolver.resolve(&request)
        } else {
            None
        };
        let Some(route) = route else {
            tracing::trace!(path = %request.uri().path(), "No route matched, skipping metrics");
            return downstream(request).await;
        };

        let mut labels = LabelTuple::pending(route, request.method().as_str());
        let timer = self.sink.start_timer(&labels);

        let response = downstream(request).await;

        if is_method_not_routed(&response) {
            self.sink.discard_timer(timer);
            tracing::trace!(
                route = labels.route(),
                method = labels.method(),
                "Method not routed, skipping metrics"
            );
            return response;
        }

        let status = response.status().as_u16();
        labels.set_status(status);
        self.sink.record_duration(timer, &labels);

        let outcome = Outcome::classify(status);
        match outcome {
            Some(Outcome::Success) => self.sink.increment_success(&labels),
            Some(Outcome::ServerError) => self.sink.increment_server_error(&labels),
            Some(Outcome::ClientError) => self.sink.increment_client_error(&labels),
            None => {}
        }

        tracing::debug!(
            route = labels.route(),
            method = labels.method(),
            status,
            outcome = outcome.map(|o| o.as_str()).unwrap_or("unclassified"),
            "Recorded request metrics"
        );

        response
    }
}

// The router matched the path but had no handler for the method, and
// answered with its own 405 carrying `Allow`.
fn is_method_not_routed(response: &Response) -> bool {
    response.status() == StatusCode::METHOD_NOT_ALLOWED
        && response.headers().contains_key(header::ALLOW)
}

/// Install as the outermost `Router::layer` so timing covers every other layer.
pub async fn metrics_middleware<S, R>(
    State(instrumentor): State<Arc<Instrumentor<S, R>>>,
    request: Request,
    next: Next,
) -> Response
where
    S: MeasurementSink,
    R: RouteResolver,
{
    instrumentor
        .instrument(request, |request| next.run(request))
        .await
}
