//! Pairing TCP server for coexist matches.
//!
//! Clients connect, are paired in arrival order, and each pair plays one
//! match driven by a [`GameSession`]. Frames go out after every command;
//! commands are two-letter lines read from whichever player holds the turn.

pub mod logging;
pub mod server;
pub mod session;
pub mod stats;

pub use logging::{init_logging, init_test_logging, LogEntry, TestLogSubscriber};
pub use server::{
    GameServer, ServerConfig, ServerError, ServerHandle, DEFAULT_HOST, DEFAULT_PORT,
};
pub use session::{GameSession, Peer, SessionError, SessionId, SessionOutcome, TcpPeer};
pub use stats::{ServerStats, SessionEnd, StatsSnapshot};
