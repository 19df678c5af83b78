use anyhow::Result;
use imgmap_core::MapConfig;
use std::net::SocketAddr;

use crate::relay::RelayServer;

/// Binds and runs the relay until the process exits.
pub async fn run_serve(bind: SocketAddr, cfg: &MapConfig) -> Result<()> {
    let server = RelayServer::bind(bind, cfg.file_proxy_origin.clone()).await?;
    server.run().await
}
