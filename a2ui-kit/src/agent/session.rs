//! Per-conversation surface registries.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::a2ui::SurfaceRegistry;

/// Shared handle to one session's registry.
pub type SharedRegistry = Arc<Mutex<SurfaceRegistry>>;

/// Maps session ids to their own [`SurfaceRegistry`].
///
/// Cloning the store shares the same sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, SharedRegistry>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the registry for a session, creating it on first use.
    pub fn registry(&self, session_id: &str) -> SharedRegistry {
        let mut sessions = lock(&self.sessions);
        sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                ::log::debug!("[A2UI agent] New session {}", session_id);
                Arc::new(Mutex::new(SurfaceRegistry::new()))
            })
            .clone()
    }

    /// Drop a session and all its surfaces.
    pub fn remove(&self, session_id: &str) -> bool {
        lock(&self.sessions).remove(session_id).is_some()
    }

    pub fn contains(&self, session_id: &str) -> bool {
        lock(&self.sessions).contains_key(session_id)
    }

    pub fn len(&self) -> usize {
        lock(&self.sessions).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Lock a mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
