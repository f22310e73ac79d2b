use std::collections::HashMap;

use crate::counter::{CounterSettings, PullUpCounter};
use crate::session_processor_utils::debug_println;

/// Owns one repetition counter per workout session id.
///
/// Counters are created on first use and destroyed when a session ends.
/// Each counter is fully independent, so distinct sessions may be processed
/// in parallel as long as every session has a single caller.
pub struct SessionStore {
    sessions: HashMap<String, PullUpCounter>,
    settings: CounterSettings,
}

impl SessionStore {
    /// Creates an empty store; every new session inherits `settings`
    pub fn new(settings: CounterSettings) -> Self {
        Self {
            sessions: HashMap::new(),
            settings,
        }
    }

    /// Returns the counter for `session_id`, creating it on first use
    pub fn counter(&mut self, session_id: &str) -> &mut PullUpCounter {
        self.sessions
            .entry(session_id.to_string())
            .or_insert_with(|| PullUpCounter::new(self.settings))
    }

    /// Resets an existing session to its initial state.
    ///
    /// Returns `false` when no such session exists.
    pub fn reset(&mut self, session_id: &str) -> bool {
        match self.sessions.get_mut(session_id) {
            Some(counter) => {
                counter.reset();
                debug_println(format_args!("session {} reset", session_id));
                true
            }
            None => false,
        }
    }

    /// Ends a session, dropping its state entirely.
    ///
    /// Returns `false` when no such session exists.
    pub fn end(&mut self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Check if no sessions are live
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
