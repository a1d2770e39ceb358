use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counters shared by the acceptor and every session it spawns
#[derive(Debug, Clone, Default)]
pub struct ServerStats {
    inner: Arc<StatsInner>,
}

#[derive(Debug, Default)]
struct StatsInner {
    sessions_started: AtomicU64,
    sessions_finished: AtomicU64,
    sessions_disconnected: AtomicU64,
    sessions_failed: AtomicU64,
    active_sessions: AtomicU64,
    commands_accepted: AtomicU64,
    commands_rejected: AtomicU64,
}

/// Point-in-time copy of [`ServerStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub sessions_started: u64,
    pub sessions_finished: u64,
    pub sessions_disconnected: u64,
    pub sessions_failed: u64,
    pub active_sessions: u64,
    pub commands_accepted: u64,
    pub commands_rejected: u64,
}

/// How a session left the active set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Finished,
    Disconnected,
    Failed,
}

impl ServerStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_started(&self) {
        self.inner.sessions_started.fetch_add(1, Ordering::Relaxed);
        let active = self.inner.active_sessions.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!(active_sessions = active, "session count increased");
    }

    pub fn session_ended(&self, end: SessionEnd) {
        let counter = match end {
            SessionEnd::Finished => &self.inner.sessions_finished,
            SessionEnd::Disconnected => &self.inner.sessions_disconnected,
            SessionEnd::Failed => &self.inner.sessions_failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);

        let decremented = self.inner.active_sessions.fetch_update(
            Ordering::Relaxed,
            Ordering::Relaxed,
            |n| n.checked_sub(1),
        );
        if decremented.is_err() {
            tracing::warn!("attempted to decrement active_sessions below zero");
        }
    }

    pub fn record_command(&self, accepted: bool) {
        if accepted {
            self.inner.commands_accepted.fetch_add(1, Ordering::Relaxed);
        } else {
            self.inner.commands_rejected.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let load = |c: &AtomicU64| c.load(Ordering::Relaxed);
        StatsSnapshot {
            sessions_started: load(&self.inner.sessions_started),
            sessions_finished: load(&self.inner.sessions_finished),
            sessions_disconnected: load(&self.inner.sessions_disconnected),
            sessions_failed: load(&self.inner.sessions_failed),
            active_sessions: load(&self.inner.active_sessions),
            commands_accepted: load(&self.inner.commands_accepted),
            commands_rejected: load(&self.inner.commands_rejected),
        }
    }
}
