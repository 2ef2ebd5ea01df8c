use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use duel_protocol::{ClientCommand, Reply, parse_reply};
use tokio::net::{ToSocketAddrs, UdpSocket, lookup_host};

/// Largest response accepted; roster listings are the long ones
const MAX_RESPONSE: usize = 64 * 1024;

/// Low-level UDP socket bound to a single server
pub struct Connection {
    socket: UdpSocket,
    server: SocketAddr,
    timeout: Option<Duration>,
}

impl Connection {
    pub async fn connect(server: impl ToSocketAddrs) -> Result<Self> {
        let server = lookup_host(server)
            .await
            .context("Failed to resolve server address")?
            .next()
            .ok_or_else(|| anyhow!("Server address resolved to nothing"))?;

        let local: SocketAddr = if server.is_ipv4() {
            "0.0.0.0:0".parse()?
        } else {
            "[::]:0".parse()?
        };
        let socket = UdpSocket::bind(local)
            .await
            .context("Failed to bind local socket")?;
        socket
            .connect(server)
            .await
            .with_context(|| format!("Failed to connect to {}", server))?;

        Ok(Self {
            socket,
            server,
            timeout: None,
        })
    }

    pub fn server(&self) -> SocketAddr {
        self.server
    }

    /// Give up on a response after `timeout`; `None` waits forever
    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    /// Send a command
    pub async fn send(&self, command: &ClientCommand) -> Result<()> {
        self.send_raw(&command.to_wire_format()).await
    }

    /// Send a raw request line
    pub async fn send_raw(&self, text: &str) -> Result<()> {
        self.socket
            .send(text.as_bytes())
            .await
            .context("Failed to send request")?;
        Ok(())
    }

    /// Receive the next response datagram
    pub async fn recv(&self) -> Result<Reply> {
        let mut buf = vec![0u8; MAX_RESPONSE];
        let n = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.socket.recv(&mut buf))
                .await
                .with_context(|| format!("No response from {} within {:?}", self.server, timeout))?,
            None => self.socket.recv(&mut buf).await,
        }
        .context("Failed to receive response")?;

        let text = String::from_utf8_lossy(&buf[..n]);
        parse_reply(&text).context("Failed to parse server response")
    }
}
