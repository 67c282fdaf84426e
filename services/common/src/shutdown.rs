use tokio_util::sync::CancellationToken;

#[cfg(unix)]
type TerminateSignal = Option<tokio::signal::unix::Signal>;

#[cfg(not(unix))]
type TerminateSignal = ();

/// Returns a token cancelled on the first Ctrl-C or SIGTERM received by the process.
///
/// The SIGTERM handler is installed before this returns, so a signal sent right
/// after the call is not lost. Must be called from within a tokio runtime.
pub fn shutdown_token() -> CancellationToken {
    let token = CancellationToken::new();
    let terminate = listen_for_terminate();

    let token_cloned = token.clone();
    tokio::spawn(async move {
        wait_for_signal(terminate).await;

        tracing::info!("Shutdown signal received");
        token_cloned.cancel();
    });

    token
}

#[cfg(unix)]
fn listen_for_terminate() -> TerminateSignal {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
        Ok(signal) => Some(signal),
        Err(err) => {
            tracing::error!("Failed to listen for SIGTERM: {err}");
            None
        }
    }
}

#[cfg(not(unix))]
const fn listen_for_terminate() -> TerminateSignal {}

async fn wait_for_signal(terminate: TerminateSignal) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async move {
        match terminate {
            Some(mut signal) => {
                signal.recv().await;
            }
            None => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = {
        let () = terminate;
        std::future::pending::<()>()
    };

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
