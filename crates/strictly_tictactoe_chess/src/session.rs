//! Game session management for serving several games at once.
//!
//! Each game lives behind one lock, so actions on a game are applied in
//! the order they are received.

use super::action::{Action, ActionError};
use super::engine::{Game, GameState};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a game session.
pub type SessionId = String;

/// Errors from session operations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum SessionError {
    /// No session with that id.
    #[display("Session not found: {}", _0)]
    NotFound(SessionId),

    /// A session with that id already exists.
    #[display("Session already exists: {}", _0)]
    AlreadyExists(SessionId),

    /// The engine rejected the action.
    #[display("{}", _0)]
    #[from]
    Rejected(ActionError),

    /// Another thread panicked while holding the lock.
    #[display("Session lock poisoned")]
    LockPoisoned,
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Rejected(error) => Some(error),
            _ => None,
        }
    }
}

/// Manages multiple game sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<SessionId, Game>>>,
}

impl SessionManager {
    /// Creates a new session manager.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<SessionId, Game>>, SessionError> {
        self.sessions.lock().map_err(|_| {
            warn!("Session lock poisoned");
            SessionError::LockPoisoned
        })
    }

    /// Creates a new game under `id`.
    ///
    /// # Errors
    ///
    /// Fails if the id is taken or the lock is poisoned.
    #[instrument(skip(self))]
    pub fn create_session(
        &self,
        id: impl Into<SessionId> + std::fmt::Debug,
    ) -> Result<GameState, SessionError> {
        let id = id.into();
        let mut sessions = self.lock()?;
        if sessions.contains_key(&id) {
            warn!(session_id = %id, "Session already exists");
            return Err(SessionError::AlreadyExists(id));
        }
        info!(session_id = %id, "Creating new game session");
        let game = Game::new();
        let state = game.state().clone();
        sessions.insert(id, game);
        Ok(state)
    }

    /// Applies an action to a session's game and returns the new state.
    ///
    /// # Errors
    ///
    /// Fails if the session is missing, the lock is poisoned, or the engine
    /// rejects the action.
    #[instrument(skip(self))]
    pub fn apply(&self, id: &str, action: Action) -> Result<GameState, SessionError> {
        let mut sessions = self.lock()?;
        let game = sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        let state = game.apply(action)?.clone();
        debug!(session_id = id, player = %state.current_player(), "Action applied");
        Ok(state)
    }

    /// Returns a copy of a session's current state.
    ///
    /// # Errors
    ///
    /// Fails if the session is missing or the lock is poisoned.
    #[instrument(skip(self))]
    pub fn snapshot(&self, id: &str) -> Result<GameState, SessionError> {
        let sessions = self.lock()?;
        sessions
            .get(id)
            .map(|game| game.state().clone())
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    /// Removes a session, returning its final state.
    ///
    /// # Errors
    ///
    /// Fails if the session is missing or the lock is poisoned.
    #[instrument(skip(self))]
    pub fn remove_session(&self, id: &str) -> Result<GameState, SessionError> {
        let mut sessions = self.lock()?;
        let game = sessions
            .remove(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        info!(session_id = id, "Session removed");
        Ok(game.state().clone())
    }

    /// Ids of all sessions, sorted.
    ///
    /// # Errors
    ///
    /// Fails if the lock is poisoned.
    pub fn session_ids(&self) -> Result<Vec<SessionId>, SessionError> {
        let mut ids: Vec<SessionId> = self.lock()?.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}
