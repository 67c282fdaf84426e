use crate::application::config::Config;
use crate::http::http_server::HttpServer;
use crate::http::wake_observer::TracingWakeObserver;
use crate::http::wake_observer::WakeObserver;
use anyhow::Result;
use std::sync::Arc;
use std::sync::OnceLock;
use tokio_util::sync::CancellationToken;

#[derive(Default)]
pub struct ApplicationState {
    http_server: OnceLock<HttpServer>,
}

impl ApplicationState {
    pub fn http_server(&self) -> Result<&HttpServer> {
        self.http_server
            .get()
            .ok_or_else(|| anyhow::anyhow!("HTTP server not initialized"))
    }

    pub fn set_http_server(&self, http_server: HttpServer) -> Result<()> {
        self.http_server
            .set(http_server)
            .map_err(|_| anyhow::anyhow!("Failed to set HTTP server in application state"))
    }
}

pub type SharedApplicationState = Arc<ApplicationState>;

pub fn create_application_state(config: Config) -> Result<SharedApplicationState> {
    create_application_state_with_observer(config, Arc::new(TracingWakeObserver))
}

pub fn create_application_state_with_observer(
    config: Config,
    observer: Arc<dyn WakeObserver>,
) -> Result<SharedApplicationState> {
    let application_state = Arc::new(ApplicationState::default());

    let http_server = HttpServer::new(config.http, observer);
    application_state.set_http_server(http_server)?;

    Ok(application_state)
}

pub async fn start_application(
    application_state: &SharedApplicationState,
    shutdown: CancellationToken,
) -> Result<()> {
    // Start the different components of the application
    let handles = [application_state.http_server()?.start(shutdown.clone())];

    for handle in handles.into_iter().flatten() {
        if let Err(err) = handle.await? {
            // Bring the other components down with the failing one
            shutdown.cancel();
            return Err(err);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::http::StatusCode;
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;
    use tower::ServiceExt as _;

    #[test]
    fn http_server_is_set_once() {
        let application_state = create_application_state(Config::default()).unwrap();

        assert!(application_state.http_server().is_ok());
        assert!(
            application_state
                .set_http_server(HttpServer::new(
                    Config::default().http,
                    Arc::new(TracingWakeObserver)
                ))
                .is_err()
        );
    }

    #[derive(Default)]
    struct CountingObserver(AtomicUsize);

    impl WakeObserver for CountingObserver {
        fn on_wake(&self, _route: &str) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn injected_observer_reaches_the_wake_route() {
        let observer = Arc::new(CountingObserver::default());
        let application_state =
            create_application_state_with_observer(Config::default(), observer.clone()).unwrap();

        let router = application_state.http_server().unwrap().router();
        let request = Request::builder()
            .uri("/api/v1/wake")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(observer.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn empty_state_reports_missing_http_server() {
        let application_state = ApplicationState::default();

        assert!(application_state.http_server().is_err());
    }
}
