use axum::extract::{MatchedPath, Request};

#[cfg_attr(test, mockall::automock)]
pub trait RouteResolver: Send + Sync + 'static {
    fn resolve(&self, request: &Request) -> Option<String>;
}

// `MatchedPath` is only set once routing has happened, so this needs the
// middleware installed with `Router::layer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchedPathResolver;

impl RouteResolver for MatchedPathResolver {
    fn resolve(&self, request: &Request) -> Option<String> {
        request
            .extensions()
            .get::<MatchedPath>()
            .map(|path| path.as_str().to_owned())
            .filter(|path| !path.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_request_without_matched_path_resolves_to_none() {
        let request = Request::builder()
            .uri("/users/42?expand=true")
            .body(Body::empty())
            .unwrap();

        assert_eq!(MatchedPathResolver.resolve(&request), None);
    }
}
