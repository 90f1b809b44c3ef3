//! In-memory session store. One `Session` per browser, keyed by the id carried
//! in the session cookie. Nothing survives a restart.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::conversation::models::ConversationState;

/// Ten years; keeps the chrono duration in range for absurd TTL settings.
const MAX_IDLE_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    /// Created lazily by the first non-empty submission.
    pub conversation: Option<ConversationState>,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl Session {
    pub fn new(id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            conversation: None,
            created_at: now,
            last_active: now,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.conversation.is_some()
    }

    pub fn touch(&mut self) {
        self.last_active = Utc::now();
    }
}

/// Sessions are individually locked; holding a session's lock for the whole
/// submission keeps at most one strategy request in flight per session.
pub type SessionHandle = Arc<Mutex<Session>>;

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(idle_ttl_secs: u64) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl: Duration::seconds(idle_ttl_secs.min(MAX_IDLE_TTL_SECS) as i64),
        }
    }

    /// Returns the session for `id` if it exists, otherwise creates a new one
    /// under a freshly generated id. A reused session is marked active before
    /// it is handed out.
    pub async fn get_or_create(&self, id: Option<Uuid>) -> (Uuid, SessionHandle) {
        if let Some(id) = id {
            if let Some(handle) = self.get(id).await {
                // A locked session is mid-submission and touched by it.
                if let Ok(mut session) = handle.try_lock() {
                    session.touch();
                }
                return (id, handle);
            }
        }

        let now = Utc::now();
        self.evict_idle(now).await;

        let id = Uuid::new_v4();
        let handle = Arc::new(Mutex::new(Session::new(id, now)));
        self.sessions.write().await.insert(id, handle.clone());
        info!("Created session {id}");
        (id, handle)
    }

    pub async fn get(&self, id: Uuid) -> Option<SessionHandle> {
        self.sessions.read().await.get(&id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops sessions idle for longer than the TTL. Sessions that are locked,
    /// or whose handle is held outside the store, are in use and kept.
    pub async fn evict_idle(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, handle| {
            if Arc::strong_count(handle) > 1 {
                return true;
            }
            match handle.try_lock() {
                Ok(session) => now - session.last_active <= self.idle_ttl,
                Err(_) => true,
            }
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!("Evicted {evicted} idle sessions");
        }
        evicted
    }
}
