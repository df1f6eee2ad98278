//! Per-browser UI state keyed by a session cookie.
//!
//! ARCHITECTURE
//! ============
//! A browser gets a random token the first time it confirms an edit. The
//! token keys a `SessionState` holding the inputs the operator has
//! confirmed. Reads never create sessions: a missing or unknown token reads
//! as defaults. Writes go only through explicit confirm operations, which
//! run the pure update under the write lock.
//!
//! TRADE-OFFS
//! ==========
//! Sessions live in memory only. A restart forgets every confirmed edit,
//! which is acceptable for a demo dashboard with no backing store. Tokens
//! the store does not recognise are replaced rather than adopted, so a
//! client cannot choose its own key.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::services::process::{self, Delays, ProcessError, ProcessState};

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a random 32-byte hex session token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Confirmed UI inputs for one browser session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub process: ProcessState,
}

struct SessionEntry {
    state: SessionState,
    last_seen: Instant,
}

/// In-memory session map with idle expiry.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, SessionEntry>>>,
    ttl: Duration,
}

impl SessionStore {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self { inner: Arc::new(RwLock::new(HashMap::new())), ttl }
    }

    /// Resolve the caller's session for a write, creating one if the token is
    /// missing or unknown. Returns the token to use and whether it was newly
    /// issued.
    pub async fn ensure(&self, token: Option<&str>) -> (String, bool) {
        self.ensure_at(token, Instant::now()).await
    }

    async fn ensure_at(&self, token: Option<&str>, now: Instant) -> (String, bool) {
        let mut sessions = self.inner.write().await;
        if let Some(token) = token {
            if let Some(entry) = sessions.get_mut(token) {
                entry.last_seen = now;
                return (token.to_owned(), false);
            }
        }

        let token = generate_token();
        sessions.insert(token.clone(), SessionEntry { state: SessionState::default(), last_seen: now });
        debug!(sessions = sessions.len(), "session created");
        (token, true)
    }

    /// Refresh a known session's idle clock. Returns `false` for unknown
    /// tokens, which are never inserted.
    pub async fn touch(&self, token: &str) -> bool {
        match self.inner.write().await.get_mut(token) {
            Some(entry) => {
                entry.last_seen = Instant::now();
                true
            }
            None => false,
        }
    }

    /// Snapshot of a session's state. Unknown tokens read as defaults.
    pub async fn snapshot(&self, token: &str) -> SessionState {
        self.inner
            .read()
            .await
            .get(token)
            .map(|e| e.state.clone())
            .unwrap_or_default()
    }

    /// Confirm new delays for a session.
    ///
    /// # Errors
    ///
    /// Propagates validation failures. The stored state is left unchanged and
    /// no entry is created for `token`.
    pub async fn confirm_delays(&self, token: &str, inputs: Delays) -> Result<(ProcessState, bool), ProcessError> {
        let mut sessions = self.inner.write().await;
        let current = sessions.get(token).map(|e| e.state.process.clone()).unwrap_or_default();
        let (next, changed) = process::apply(&current, inputs)?;

        let entry = sessions
            .entry(token.to_owned())
            .or_insert_with(|| SessionEntry { state: SessionState::default(), last_seen: Instant::now() });
        if changed {
            entry.state.process = next.clone();
        }
        entry.last_seen = Instant::now();
        Ok((next, changed))
    }

    /// Drop sessions idle for longer than the TTL. Returns how many were removed.
    pub async fn prune_expired(&self) -> usize {
        self.prune_expired_at(Instant::now()).await
    }

    async fn prune_expired_at(&self, now: Instant) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, e| now.duration_since(e.last_seen) <= self.ttl);
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

/// Spawn the background expiry task. Returns a handle for shutdown.
pub fn spawn_prune_task(store: SessionStore, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let removed = store.prune_expired().await;
            if removed > 0 {
                info!(removed, "expired sessions pruned");
            }
        }
    })
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
