//! UDP datagram loop
//!
//! One request per datagram, one response datagram back to the sender. There
//! is no framing, retry or acknowledgement; a lost datagram is lost.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::UdpSocket;
use tracing::{debug, info, warn};

use crate::dispatcher::Dispatcher;

/// Largest request accepted; longer datagrams are truncated
pub const MAX_REQUEST: usize = 1024;

pub async fn bind(addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    UdpSocket::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))
}

/// Receive datagrams forever, handling each on its own task
pub async fn serve(socket: UdpSocket, dispatcher: Arc<Dispatcher>) -> anyhow::Result<()> {
    let socket = Arc::new(socket);
    info!(bind = %socket.local_addr()?, "duel server listening");

    let mut buf = vec![0u8; MAX_REQUEST];
    loop {
        let (n, peer) = match socket.recv_from(&mut buf).await {
            Ok(received) => received,
            Err(e) => {
                warn!(err = %e, "recv failed");
                continue;
            }
        };
        let line = String::from_utf8_lossy(&buf[..n]).into_owned();
        debug!(%peer, request = %line.trim(), "datagram received");

        let socket = socket.clone();
        let dispatcher = dispatcher.clone();
        tokio::spawn(async move {
            let reply = dispatcher.handle_line(&line).await;
            if let Err(e) = socket.send_to(reply.as_bytes(), peer).await {
                warn!(%peer, err = %e, "send failed");
            }
        });
    }
}
