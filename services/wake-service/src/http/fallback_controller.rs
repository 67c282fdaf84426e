use crate::application::APPLICATION_NAME;
use axum::http::Method;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::response::IntoResponse;
use opentelemetry::KeyValue;
use std::sync::LazyLock;

static UNMATCHED_ROUTE_COUNTER: LazyLock<opentelemetry::metrics::Counter<u64>> =
    LazyLock::new(|| {
        opentelemetry::global::meter(APPLICATION_NAME)
            .u64_counter("http_server_unmatched_route_requests")
            .with_description("Number of requests matching no wake route")
            .build()
    });

/// Answers every path outside the wake route table.
pub struct FallbackController;

impl FallbackController {
    const NOT_FOUND_BODY: &str = "Unexpected route";

    #[allow(clippy::unused_async)]
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn not_found_endpoint_handler(method: Method, uri: Uri) -> impl IntoResponse {
        let path = uri.path().to_owned();
        tracing::warn!(method = %method, path = %path, "No wake route for request");

        UNMATCHED_ROUTE_COUNTER.add(
            1,
            &[
                KeyValue::new("http.request.method", method.to_string()),
                KeyValue::new("url.path", path),
            ],
        );

        (StatusCode::NOT_FOUND, Self::NOT_FOUND_BODY)
    }
}
