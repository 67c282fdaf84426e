/// Side effect run when the canonical wake route is hit.
pub trait WakeObserver: Send + Sync {
    fn on_wake(&self, route: &str);
}

/// Writes the wake log line through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingWakeObserver;

impl WakeObserver for TracingWakeObserver {
    fn on_wake(&self, route: &str) {
        tracing::info!(route, "The server is WakeUp!");
    }
}
