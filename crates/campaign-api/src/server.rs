//! HTTP listener lifecycle.
//!
//! On the shutdown trigger the listener stops accepting connections and
//! in-flight requests get a bounded window to finish. Requests still running
//! when the window closes are dropped.

use axum::Router;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// How the shutdown drain ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// Every in-flight request finished within the window.
    Completed,
    /// The window closed with requests still running.
    TimedOut,
}

/// Failures of the serving task itself.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server task failed: {0}")]
    Task(#[from] JoinError),
}

/// Serve `app` on `listener` until `shutdown` resolves, then drain.
///
/// Waits at most `drain_timeout` for in-flight requests after the trigger.
///
/// # Errors
///
/// Returns `ServeError` if the server fails before or during the drain.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
    drain_timeout: Duration,
) -> Result<DrainOutcome, ServeError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let shutdown_token = CancellationToken::new();
    let server_token = shutdown_token.child_token();

    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                server_token.cancelled().await;
            })
            .await
    });

    tokio::select! {
        result = &mut server => {
            // Server exited without a shutdown trigger
            result??;
            return Ok(DrainOutcome::Completed);
        }
        () = shutdown => {
            info!(target: "ca.server", drain_timeout_seconds = drain_timeout.as_secs(), "Shutdown requested, draining in-flight requests");
        }
    }

    shutdown_token.cancel();

    match tokio::time::timeout(drain_timeout, &mut server).await {
        Ok(result) => {
            result??;
            info!(target: "ca.server", "Drain completed");
            Ok(DrainOutcome::Completed)
        }
        Err(_) => {
            warn!(target: "ca.server", "Drain timed out, dropping in-flight requests");
            server.abort();
            Ok(DrainOutcome::TimedOut)
        }
    }
}

/// Resolves on SIGINT or SIGTERM.
///
/// If a handler cannot be installed the error is logged and that signal is
/// ignored; the other one still triggers shutdown.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!(target: "ca.server", "Received SIGINT, starting graceful shutdown"),
            Err(e) => {
                error!(target: "ca.server", error = %e, "Failed to listen for SIGINT");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!(target: "ca.server", "Received SIGTERM, starting graceful shutdown");
            }
            Err(e) => {
                error!(target: "ca.server", error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
