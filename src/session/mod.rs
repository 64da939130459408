//! In-memory session store.
//!
//! Each session is keyed by an opaque token handed to the browser in a cookie
//! and holds a single field: the formatted time of the previous access.
//! Sessions idle for longer than `max_idle` are treated as absent, and the
//! least recently seen session is evicted when `max_sessions` is reached.

mod cookie;

pub use cookie::{session_cookie, session_token_from_headers};

use crate::config::SessionConfig;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

/// Display format of access timestamps (`yyyy-MM-dd HH:mm:ss`)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time in [`TIMESTAMP_FORMAT`]
pub fn now_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

#[derive(Debug, Clone)]
struct SessionEntry {
    last_access_time: Option<String>,
    /// For expiry and LRU eviction
    last_seen: Instant,
}

/// Result of recording one access against the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionVisit {
    /// Token of the session that was used (new if `created`)
    pub token: String,
    /// Whether a new session was created for this access
    pub created: bool,
    /// Value of `last_access_time` before this access, `None` on first visit
    pub previous_access: Option<String>,
    /// Value now stored in the session
    pub current_access: String,
}

/// Thread-safe session store.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionEntry>>,
    max_idle: Duration,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(max_idle: Duration, max_sessions: usize) -> Self {
        SessionStore {
            sessions: RwLock::new(HashMap::new()),
            max_idle,
            max_sessions: max_sessions.max(1),
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(
            Duration::from_secs(config.max_idle_secs),
            config.max_sessions,
        )
    }

    /// Resolve or create the session for `token`, swap its last access time
    /// for `now` and return the previous value.
    pub fn visit(&self, token: Option<&str>, now: String) -> SessionVisit {
        self.visit_at(token, now, Instant::now())
    }

    fn visit_at(&self, token: Option<&str>, now: String, at: Instant) -> SessionVisit {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(token) = token {
            if let Some(entry) = sessions.get_mut(token) {
                if !self.is_expired(entry, at) {
                    let previous_access = entry.last_access_time.replace(now.clone());
                    entry.last_seen = at;
                    return SessionVisit {
                        token: token.to_string(),
                        created: false,
                        previous_access,
                        current_access: now,
                    };
                }
                tracing::debug!("Session expired, issuing a new one");
                sessions.remove(token);
            } else {
                tracing::debug!("Unknown session token, issuing a new one");
            }
        }

        self.make_room(&mut sessions, at);

        let token = uuid::Uuid::new_v4().simple().to_string();
        sessions.insert(
            token.clone(),
            SessionEntry {
                last_access_time: Some(now.clone()),
                last_seen: at,
            },
        );

        SessionVisit {
            token,
            created: true,
            previous_access: None,
            current_access: now,
        }
    }

    /// Read a session's last access time without touching it
    pub fn get_last_access(&self, token: &str) -> Option<String> {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        sessions
            .get(token)
            .filter(|entry| !self.is_expired(entry, Instant::now()))
            .and_then(|entry| entry.last_access_time.clone())
    }

    /// Drop a session. Returns whether it existed.
    pub fn remove(&self, token: &str) -> bool {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token)
            .is_some()
    }

    /// Number of sessions held, including expired ones not yet swept
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every expired session. Returns how many were removed.
    pub fn sweep_expired(&self) -> usize {
        self.sweep_expired_at(Instant::now())
    }

    fn sweep_expired_at(&self, at: Instant) -> usize {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, entry| !self.is_expired(entry, at));
        before - sessions.len()
    }

    fn is_expired(&self, entry: &SessionEntry, at: Instant) -> bool {
        at.saturating_duration_since(entry.last_seen) > self.max_idle
    }

    /// Ensure one slot is free for a new session
    fn make_room(&self, sessions: &mut HashMap<String, SessionEntry>, at: Instant) {
        if sessions.len() < self.max_sessions {
            return;
        }

        sessions.retain(|_, entry| !self.is_expired(entry, at));
        if sessions.len() < self.max_sessions {
            return;
        }

        let oldest = sessions
            .iter()
            .min_by_key(|(_, entry)| entry.last_seen)
            .map(|(token, _)| token.clone());

        if let Some(oldest) = oldest {
            tracing::debug!("Evicting session {} (LRU)", &oldest[..8]);
            sessions.remove(&oldest);
        }
    }
}
