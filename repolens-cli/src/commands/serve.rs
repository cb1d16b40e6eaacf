//! Health endpoint server command.

use std::net::SocketAddr;

use clap::Args;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::CliError;

/// Arguments for the serve command.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind the health endpoint on
    #[arg(long, default_value = "127.0.0.1:3000")]
    pub addr: SocketAddr,
}

/// Serve `GET /api/health` until Ctrl-C.
pub async fn run(args: ServeArgs) -> Result<(), CliError> {
    let cancel = CancellationToken::new();

    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            signal_cancel.cancel();
        }
    });

    repolens::health::serve(args.addr, cancel).await?;
    Ok(())
}
