use crate::stats::{ServerStats, SessionEnd};
use coexist_engine::game::{CommandOutcome, MatchOutcome, MatchState};
use coexist_engine::player::Player;
use std::io;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::Instrument;
use uuid::Uuid;

pub type SessionId = String;

/// One side of a match: a line reader for commands and a writer for frames.
#[derive(Debug)]
pub struct Peer<R, W> {
    reader: R,
    writer: W,
}

pub type TcpPeer = Peer<BufReader<OwnedReadHalf>, OwnedWriteHalf>;

impl TcpPeer {
    pub fn from_tcp(stream: TcpStream) -> Self {
        let (read, write) = stream.into_split();
        Peer::new(BufReader::new(read), write)
    }
}

impl<R, W> Peer<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Next line from the peer, or `None` once the stream has ended.
    /// Invalid UTF-8 is replaced rather than treated as a failure.
    async fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        let n = self.reader.read_until(b'\n', &mut buf).await?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    async fn send_frame(&mut self, frame: &str) -> io::Result<()> {
        self.writer.write_all(frame.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }

    async fn close(&mut self) {
        if let Err(err) = self.writer.shutdown().await {
            tracing::trace!(error = %err, "peer already closed");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The match reached a terminal state and the final frame was sent
    Finished { outcome: MatchOutcome },
    /// The active player's stream ended mid-match
    Disconnected { player: Player },
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to read from {player}: {source}")]
    Read {
        player: Player,
        #[source]
        source: io::Error,
    },
    #[error("Failed to send frame to {player}: {source}")]
    Write {
        player: Player,
        #[source]
        source: io::Error,
    },
}

/// Drives one match between two peers, strictly alternating on the turn
/// indicator and broadcasting a fresh frame to both sides after every command.
#[derive(Debug)]
pub struct GameSession<R, W> {
    id: SessionId,
    state: MatchState,
    peers: [Peer<R, W>; 2],
    stats: ServerStats,
}

impl<R, W> GameSession<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(state: MatchState, first: Peer<R, W>, second: Peer<R, W>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            state,
            peers: [first, second],
            stats: ServerStats::new(),
        }
    }

    /// Report lifecycle and command counts into shared server counters.
    pub fn with_stats(mut self, stats: ServerStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Runs the match to completion. Both peers are closed on return,
    /// whatever the result.
    pub async fn run(mut self) -> Result<SessionOutcome, SessionError> {
        let span = tracing::info_span!("session", session_id = %self.id);
        async move {
            tracing::info!(seed = self.state.seed(), "session started");
            self.stats.session_started();

            let result = self.drive().await;
            for peer in &mut self.peers {
                peer.close().await;
            }

            let end = match &result {
                Ok(SessionOutcome::Finished { outcome }) => {
                    tracing::info!(outcome = ?outcome, "session ended: match over");
                    SessionEnd::Finished
                }
                Ok(SessionOutcome::Disconnected { player }) => {
                    tracing::info!(player = %player, "session ended: peer disconnected");
                    SessionEnd::Disconnected
                }
                Err(err) => {
                    tracing::warn!(error = %err, "session ended: stream failure");
                    SessionEnd::Failed
                }
            };
            self.stats.session_ended(end);
            result
        }
        .instrument(span)
        .await
    }

    async fn drive(&mut self) -> Result<SessionOutcome, SessionError> {
        self.broadcast().await?;

        loop {
            if let Some(outcome) = self.state.outcome() {
                self.broadcast().await?;
                return Ok(SessionOutcome::Finished { outcome });
            }

            let player = self.state.turn();
            let line = self.peers[player.index()]
                .read_line()
                .await
                .map_err(|source| SessionError::Read { player, source })?;
            let Some(line) = line else {
                return Ok(SessionOutcome::Disconnected { player });
            };

            let command = line.trim().to_uppercase();
            self.apply(player, &command);
            self.broadcast().await?;
        }
    }

    fn apply(&mut self, player: Player, command: &str) {
        match self.state.execute(command) {
            Ok(CommandOutcome::Attacked(mv)) => {
                tracing::debug!(
                    player = %player,
                    command,
                    attacker = %mv.attacker,
                    defender = %mv.defender,
                    scored = mv.scored,
                    "command applied"
                );
                self.stats.record_command(true);
            }
            Ok(CommandOutcome::Passed { new_round, .. }) => {
                tracing::debug!(player = %player, command, new_round, "command applied");
                if new_round {
                    tracing::info!(round = self.state.round(), "new round dealt");
                }
                self.stats.record_command(true);
            }
            Err(err) => {
                tracing::debug!(player = %player, command, reason = %err, "command rejected");
                self.stats.record_command(false);
            }
        }
    }

    async fn broadcast(&mut self) -> Result<(), SessionError> {
        for player in [Player::One, Player::Two] {
            let frame = self.state.generate_frame(player);
            self.peers[player.index()]
                .send_frame(&frame)
                .await
                .map_err(|source| SessionError::Write { player, source })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coexist_engine::units::Unit::{Arrow, Axe, Hammer, Sword};
    use tokio::io::{duplex, DuplexStream, ReadHalf, WriteHalf};

    type PipePeer = Peer<BufReader<ReadHalf<DuplexStream>>, WriteHalf<DuplexStream>>;

    /// A session-side peer plus the client's end of the pipe.
    fn pipe() -> (PipePeer, DuplexStream) {
        let (server_end, client_end) = duplex(64 * 1024);
        let (read, write) = tokio::io::split(server_end);
        (Peer::new(BufReader::new(read), write), client_end)
    }

    fn fixed_state() -> MatchState {
        MatchState::with_boards(
            3,
            [Axe, Hammer, Sword, Arrow, Axe, Hammer],
            [Hammer, Sword, Axe, Arrow, Sword, Axe],
        )
    }

    async fn read_all(mut stream: DuplexStream) -> String {
        use tokio::io::AsyncReadExt;
        let mut out = String::new();
        stream.read_to_string(&mut out).await.unwrap();
        out
    }

    #[tokio::test]
    async fn disconnect_of_active_peer_ends_without_final_broadcast() {
        let (p1, mut c1) = pipe();
        let (p2, mut c2) = pipe();
        let session = GameSession::new(fixed_state(), p1, p2);

        c1.write_all(b"AA\n").await.unwrap();
        c1.shutdown().await.unwrap();
        c2.shutdown().await.unwrap();

        // P1 AXE takes HAMMER, then P2 is to move and its stream is gone
        let result = session.run().await;
        assert!(matches!(
            result,
            Ok(SessionOutcome::Disconnected {
                player: Player::Two
            })
        ));
    }

    #[tokio::test]
    async fn every_command_rebroadcasts_even_when_rejected() {
        let (p1, mut c1) = pipe();
        let (p2, c2) = pipe();
        let stats = ServerStats::new();
        let session = GameSession::new(fixed_state(), p1, p2).with_stats(stats.clone());

        // Rejected twice (bad length, AXE vs SWORD), then P1 drops
        c1.write_all(b"xyz\nab\n").await.unwrap();
        c1.shutdown().await.unwrap();

        let reader = tokio::spawn(read_all(c2));
        let result = session.run().await.unwrap();
        assert_eq!(
            result,
            SessionOutcome::Disconnected {
                player: Player::One
            }
        );

        let p2_output = reader.await.unwrap();
        // Initial frame plus one per processed command
        assert_eq!(p2_output.matches("/---------").count() / 2, 3);

        let snap = stats.snapshot();
        assert_eq!(snap.commands_rejected, 2);
        assert_eq!(snap.sessions_disconnected, 1);
        assert_eq!(snap.active_sessions, 0);
    }
}
