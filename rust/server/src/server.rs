use crate::session::{GameSession, TcpPeer};
use crate::stats::ServerStats;
use coexist_engine::game::MatchState;
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 35754;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    host: String,
    port: u16,
    seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            seed: None,
        }
    }

    /// Base seed for reproducible matches; match `n` is dealt from `seed + n`.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn for_tests() -> Self {
        Self::new("127.0.0.1", 0)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn match_seed(&self, match_index: u64) -> Option<u64> {
        self.seed.map(|base| base.wrapping_add(match_index))
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Server task failed: {0}")]
    TaskError(String),
}

/// Accepts connections in pairs and runs one [`GameSession`] per pair.
#[derive(Debug)]
pub struct GameServer {
    listener: TcpListener,
    config: ServerConfig,
    stats: ServerStats,
}

impl GameServer {
    pub async fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        if config.host().trim().is_empty() {
            return Err(ServerError::ConfigError("host must not be empty".into()));
        }

        let listener = TcpListener::bind((config.host(), config.port())).await?;
        info!(address = %listener.local_addr()?, "server listening");

        Ok(Self {
            listener,
            config,
            stats: ServerStats::new(),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn stats(&self) -> ServerStats {
        self.stats.clone()
    }

    /// Accept loop. The first connection of each pair plays as player 1.
    /// Sessions run on their own tasks, so a slow or broken match never
    /// holds up pairing.
    pub async fn run(self) -> Result<(), ServerError> {
        let mut match_index: u64 = 0;
        loop {
            let (first, first_addr) = match self.listener.accept().await {
                Ok(conn) => conn,
                Err(err) => {
                    warn!(error = %err, "accept failed");
                    continue;
                }
            };
            info!(peer = %first_addr, "player 1 connected, waiting for opponent");

            let (second, second_addr) = match self.listener.accept().await {
                Ok(conn) => conn,
                Err(err) => {
                    warn!(error = %err, "accept failed, dropping waiting player");
                    continue;
                }
            };

            let state = MatchState::new(self.config.match_seed(match_index));
            let session = GameSession::new(
                state,
                TcpPeer::from_tcp(first),
                TcpPeer::from_tcp(second),
            )
            .with_stats(self.stats.clone());

            info!(
                match_index,
                session_id = %session.id(),
                player_one = %first_addr,
                player_two = %second_addr,
                "players paired"
            );
            match_index += 1;

            tokio::spawn(async move {
                // Outcome and failures are logged inside the session span
                let _ = session.run().await;
            });
        }
    }

    pub async fn start(self) -> Result<ServerHandle, ServerError> {
        let addr = self.local_addr()?;
        let stats = self.stats();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            tokio::select! {
                result = self.run() => result,
                _ = shutdown_rx => {
                    info!("server shutting down");
                    Ok(())
                }
            }
        });

        Ok(ServerHandle::new(addr, shutdown_tx, task, stats))
    }
}

/// Running server. Dropping the handle stops the acceptor; sessions
/// already paired play on.
#[derive(Debug)]
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Result<(), ServerError>>>,
    stats: ServerStats,
}

impl ServerHandle {
    fn new(
        addr: SocketAddr,
        shutdown: oneshot::Sender<()>,
        task: JoinHandle<Result<(), ServerError>>,
        stats: ServerStats,
    ) -> Self {
        Self {
            addr,
            shutdown: Some(shutdown),
            task: Some(task),
            stats,
        }
    }

    pub fn address(&self) -> SocketAddr {
        self.addr
    }

    pub fn stats(&self) -> &ServerStats {
        &self.stats
    }

    pub async fn shutdown(mut self) -> Result<(), ServerError> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            match task.await {
                Ok(result) => result?,
                Err(err) => {
                    return Err(ServerError::TaskError(format!(
                        "acceptor join error: {err}"
                    )))
                }
            }
        }

        Ok(())
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
