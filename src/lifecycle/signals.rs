//! OS signal handling.
//!
//! SIGINT and SIGTERM both request a graceful shutdown. Configuration
//! reloads are driven by the file watcher, not by SIGHUP.

/// Wait until the process is asked to stop.
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            res = tokio::signal::ctrl_c() => res?,
            _ = terminate.recv() => {}
        }
    }

    #[cfg(not(unix))]
    tokio::signal::ctrl_c().await?;

    Ok(())
}
