mod connection;

use std::time::Duration;

use anyhow::Result;
use connection::Connection;
use tokio::net::ToSocketAddrs;

pub use duel_protocol::{
    ClientCommand, CreatureSummary, DuelError, ErrorKind, Reply, ServerResponse, TurnAction,
};

/// Client for a duel server
///
/// Each call sends one request datagram and waits for the matching response.
/// Server-side rejections come back as the `Err` half of the [`Reply`]; the
/// outer `Result` only fails on I/O or unparseable responses.
pub struct DuelClient {
    connection: Connection,
}

impl DuelClient {
    /// Connect to a duel server
    pub async fn connect(addr: impl ToSocketAddrs) -> Result<Self> {
        let connection = Connection::connect(addr).await?;
        tracing::debug!(server = %connection.server(), "client connected");
        Ok(Self { connection })
    }

    /// Fail requests that get no response within `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.connection.set_timeout(Some(timeout));
        self
    }

    /// Send a command and wait for its reply
    pub async fn request(&mut self, command: ClientCommand) -> Result<Reply> {
        self.connection.send(&command).await?;
        let reply = self.connection.recv().await?;
        if let Err(e) = &reply {
            tracing::debug!(command = %command.to_wire_format(), err = %e, "request rejected");
        }
        Ok(reply)
    }

    /// Send a raw request line and wait for its reply
    pub async fn request_raw(&mut self, line: &str) -> Result<Reply> {
        self.connection.send_raw(line).await?;
        self.connection.recv().await
    }

    pub async fn register(&mut self, player: &str) -> Result<Reply> {
        self.request(ClientCommand::Register(player.to_string()))
            .await
    }

    /// Capture a creature from the catalog into the player's roster
    pub async fn capture(&mut self, player: &str, creature: &str) -> Result<Reply> {
        self.request(ClientCommand::Capture {
            player: player.to_string(),
            creature: creature.to_string(),
        })
        .await
    }

    pub async fn start_battle(&mut self, player: &str, opponent: &str) -> Result<Reply> {
        self.request(ClientCommand::StartBattle {
            player: player.to_string(),
            opponent: opponent.to_string(),
        })
        .await
    }

    pub async fn attack(&mut self, player: &str) -> Result<Reply> {
        self.turn(player, TurnAction::Attack).await
    }

    pub async fn switch(&mut self, player: &str, creature: &str) -> Result<Reply> {
        self.turn(player, TurnAction::SwitchTo(creature.to_string()))
            .await
    }

    pub async fn surrender(&mut self, player: &str) -> Result<Reply> {
        self.turn(player, TurnAction::Surrender).await
    }

    async fn turn(&mut self, player: &str, action: TurnAction) -> Result<Reply> {
        self.request(ClientCommand::Turn {
            player: player.to_string(),
            action,
        })
        .await
    }

    /// Move all of `donor`'s experience to `recipient`, releasing the donor
    pub async fn donate(&mut self, player: &str, donor: &str, recipient: &str) -> Result<Reply> {
        self.request(ClientCommand::Donate {
            player: player.to_string(),
            donor: donor.to_string(),
            recipient: recipient.to_string(),
        })
        .await
    }

    pub async fn list_roster(&mut self, player: &str) -> Result<Reply> {
        self.request(ClientCommand::ListRoster(player.to_string()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::UdpSocket;

    /// Answer one datagram per canned response; yields the requests it saw
    async fn fake_server(
        responses: Vec<&'static str>,
    ) -> (std::net::SocketAddr, tokio::task::JoinHandle<Vec<String>>) {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let mut seen = Vec::new();
            let mut buf = [0u8; 1024];
            for response in responses {
                let (n, peer) = socket.recv_from(&mut buf).await.unwrap();
                seen.push(String::from_utf8_lossy(&buf[..n]).into_owned());
                socket.send_to(response.as_bytes(), peer).await.unwrap();
            }
            seen
        });
        (addr, handle)
    }

    #[tokio::test]
    async fn test_requests_and_replies() {
        let (addr, server) = fake_server(vec![
            "registered",
            "started:00ff00ff00ff00ff:ash",
            "error:NotYourTurn:ash",
            "switched:vulpix",
        ])
        .await;
        let mut client = DuelClient::connect(addr).await.unwrap();

        assert_eq!(
            client.register("ash").await.unwrap(),
            Ok(ServerResponse::Registered)
        );
        assert_eq!(
            client.start_battle("ash", "gary").await.unwrap(),
            Ok(ServerResponse::Started {
                battle_id: "00ff00ff00ff00ff".into(),
                first_mover: "ash".into(),
            })
        );
        let err = client.attack("gary").await.unwrap().unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotYourTurn);
        assert_eq!(
            client.switch("ash", "vulpix").await.unwrap(),
            Ok(ServerResponse::Switched("vulpix".into()))
        );

        assert_eq!(
            server.await.unwrap(),
            [
                "register:ash",
                "startBattle:ash|gary",
                "turn:gary|attack",
                "turn:ash|switch|vulpix"
            ]
        );
    }

    #[tokio::test]
    async fn test_unparseable_response() {
        let (addr, _server) = fake_server(vec!["gibberish"]).await;
        let mut client = DuelClient::connect(addr).await.unwrap();
        assert!(client.list_roster("ash").await.is_err());
    }

    #[tokio::test]
    async fn test_timeout() {
        // Bound but never answers
        let silent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let mut client = DuelClient::connect(silent.local_addr().unwrap())
            .await
            .unwrap()
            .with_timeout(Duration::from_millis(50));

        let err = client.surrender("ash").await.unwrap_err();
        assert!(err.to_string().contains("No response"));
    }
}
