use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::Config;
use crate::http::connection::Connection;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    let static_config = Arc::new(cfg.static_files.clone());
    let linger = cfg.server.linger_secs.map(Duration::from_secs);

    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        #[allow(deprecated)]
        if let Err(e) = socket.set_linger(linger) {
            warn!(peer = %peer, error = %e, "Failed to set linger on socket");
        }

        let static_config = Arc::clone(&static_config);
        tokio::spawn(async move {
            Connection::new(socket, static_config).run().await;
        });
    }
}
