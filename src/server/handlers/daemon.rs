use std::path::Path;
use std::sync::Arc;

use crate::server::proto::{DaemonInfo, GetDaemonInfoRequest, ShutdownRequest, ShutdownResponse};
use crate::server::ShutdownSignal;
use tokio::sync::watch;
use tonic::{Response, Status};
use tracing::info;

/// Crate version reported by `GetDaemonInfo`.
pub const DAEMON_VERSION: &str = env!("CARGO_PKG_VERSION");

#[allow(
    renamed_and_removed_lints,
    unknown_lints,
    unused_async,
    clippy::unused_async
)]
pub async fn get_daemon_info(
    data_path: Option<&Path>,
    _req: GetDaemonInfoRequest,
) -> Result<Response<DaemonInfo>, Status> {
    Ok(Response::new(DaemonInfo {
        version: DAEMON_VERSION.to_string(),
        data_path: data_path
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default(),
        ephemeral: data_path.is_none(),
    }))
}

#[allow(
    renamed_and_removed_lints,
    unknown_lints,
    unused_async,
    clippy::unused_async
)]
pub async fn shutdown(
    _req: ShutdownRequest,
    shutdown_tx: &Arc<watch::Sender<ShutdownSignal>>,
) -> Result<Response<ShutdownResponse>, Status> {
    info!("Shutdown requested");

    let shutdown_tx = Arc::clone(shutdown_tx);
    // Let the RPC response flush before the server stops accepting.
    tokio::spawn(async move {
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
        let _ = shutdown_tx.send(ShutdownSignal::Shutdown);
    });

    Ok(Response::new(ShutdownResponse {
        success: true,
        message: "Daemon shutting down".to_string(),
    }))
}
