use crate::application::config::HttpConfig;
use crate::http::fallback_controller::FallbackController;
use crate::http::wake_controller::WakeController;
use crate::http::wake_controller::WakeEndpoint;
use crate::http::wake_observer::WakeObserver;
use anyhow::Result;
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower_http::trace::DefaultMakeSpan;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct HttpServer {
    config: HttpConfig,
    observer: Arc<dyn WakeObserver>,
}

impl HttpServer {
    pub fn new(config: HttpConfig, observer: Arc<dyn WakeObserver>) -> Self {
        tracing::debug!("Initializing the HTTP server");

        Self { config, observer }
    }

    pub fn start(&self, shutdown: CancellationToken) -> Vec<JoinHandle<Result<()>>> {
        let http_server = self.clone();

        vec![tokio::spawn(async move {
            let listener = http_server.bind().await?;
            http_server.serve(listener, shutdown).await
        })]
    }

    pub fn router(&self) -> Router {
        let trace_layer =
            TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::new().include_headers(true));

        // Construct the routes
        let mut router = Router::new().route(
            WakeEndpoint::CANONICAL_ROUTE,
            get(WakeController::wake_endpoint_handler)
                .with_state(WakeEndpoint::canonical(Arc::clone(&self.observer))),
        );

        if self.config.legacy_route_enabled {
            router = router.route(
                WakeEndpoint::LEGACY_ROUTE,
                get(WakeController::wake_endpoint_handler).with_state(WakeEndpoint::legacy()),
            );
        }

        router
            .fallback(FallbackController::not_found_endpoint_handler)
            .layer(trace_layer)
    }

    pub async fn bind(&self) -> Result<TcpListener> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;

        Ok(listener)
    }

    /// Serves on `listener` until `shutdown` is cancelled, letting in-flight requests finish.
    pub async fn serve(&self, listener: TcpListener, shutdown: CancellationToken) -> Result<()> {
        tracing::info!("Starting HTTP Server on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown.cancelled_owned())
            .await?;

        tracing::info!("HTTP Server stopped");

        Ok(())
    }
}
