use crate::application::APPLICATION_NAME;
use crate::http::model::StatusDto;
use crate::http::wake_observer::WakeObserver;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use opentelemetry::KeyValue;
use std::sync::Arc;
use std::sync::LazyLock;

static WAKE_COUNTER: LazyLock<opentelemetry::metrics::Counter<u64>> = LazyLock::new(|| {
    opentelemetry::global::meter(APPLICATION_NAME)
        .u64_counter("http_server_wake_requests")
        .with_description("Number of wake requests")
        .build()
});

/// One registration of the wake handler: the path it answers on, and the
/// observer to notify, if any.
#[derive(Clone)]
pub struct WakeEndpoint {
    route: &'static str,
    observer: Option<Arc<dyn WakeObserver>>,
}

impl WakeEndpoint {
    pub const CANONICAL_ROUTE: &str = "/api/v1/wake";
    pub const LEGACY_ROUTE: &str = "/wake";

    pub fn canonical(observer: Arc<dyn WakeObserver>) -> Self {
        Self {
            route: Self::CANONICAL_ROUTE,
            observer: Some(observer),
        }
    }

    pub const fn legacy() -> Self {
        Self {
            route: Self::LEGACY_ROUTE,
            observer: None,
        }
    }
}

pub struct WakeController;

impl WakeController {
    #[allow(clippy::unused_async)]
    #[tracing::instrument(level = "debug", skip_all, fields(route = endpoint.route))]
    pub async fn wake_endpoint_handler(State(endpoint): State<WakeEndpoint>) -> impl IntoResponse {
        WAKE_COUNTER.add(1, &[KeyValue::new("http.route", endpoint.route)]);

        if let Some(observer) = &endpoint.observer {
            observer.on_wake(endpoint.route);
        }

        Json(StatusDto::up())
    }
}
