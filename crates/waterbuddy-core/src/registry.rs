//! In-memory registry of live sessions, one per user.
//!
//! Each session sits behind its own mutex so commands for one user are
//! serialized while different users never contend. Nothing is persisted:
//! ending a session drops its state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::info;
use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::flow::HydrationEngine;
use crate::session::HydrationSession;

pub type SessionId = Uuid;

#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<SessionId, Arc<Mutex<HydrationEngine>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session and return its id.
    pub fn create(&self, session: HydrationSession) -> Result<SessionId> {
        let id = Uuid::new_v4();
        let mut sessions = self.lock_map()?;
        sessions.insert(id, Arc::new(Mutex::new(HydrationEngine::with_session(session))));
        info!(session_id = %id, live = sessions.len(), "session started");
        Ok(id)
    }

    /// Run `f` with exclusive access to one session's engine.
    ///
    /// The registry map is only locked long enough to find the session.
    pub fn with_session<T, F>(&self, id: SessionId, f: F) -> Result<T>
    where
        F: FnOnce(&mut HydrationEngine) -> T,
    {
        let engine = self
            .lock_map()?
            .get(&id)
            .cloned()
            .ok_or(CoreError::SessionNotFound(id))?;
        let mut engine = engine
            .lock()
            .map_err(|e| CoreError::LockPoisoned(e.to_string()))?;
        Ok(f(&mut engine))
    }

    /// Drop a session. Returns whether it existed.
    pub fn end(&self, id: SessionId) -> Result<bool> {
        let mut sessions = self.lock_map()?;
        let existed = sessions.remove(&id).is_some();
        if existed {
            info!(session_id = %id, live = sessions.len(), "session ended");
        }
        Ok(existed)
    }

    pub fn len(&self) -> usize {
        self.lock_map().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock_map(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<SessionId, Arc<Mutex<HydrationEngine>>>>> {
        self.sessions
            .lock()
            .map_err(|e| CoreError::LockPoisoned(e.to_string()))
    }
}
