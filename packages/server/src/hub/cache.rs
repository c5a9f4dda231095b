//! Live-state cache: the most recent telemetry per connected player.
//!
//! Owned exclusively by the coordinator task. The HTTP snapshot
//! endpoint never reads this map directly; it receives a copy through
//! a [`super::event::HubEvent::Snapshot`] request.

use std::collections::HashMap;

use crate::domain::LivePlayer;

/// At most one entry per player identity; an entry reflects the most
/// recently received state message only.
#[derive(Default)]
pub(super) struct LiveCache {
    entries: HashMap<i32, LivePlayer>,
}

impl LiveCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace or insert the entry for the player carried in `state`.
    pub fn upsert(&mut self, state: LivePlayer) {
        self.entries.insert(state.player_id, state);
    }

    /// Delete the entry for `player_id`. No-op when absent.
    pub fn remove(&mut self, player_id: i32) {
        self.entries.remove(&player_id);
    }

    /// Copy-on-read view of all current entries. The returned vector
    /// shares nothing with coordinator-owned memory.
    pub fn snapshot(&self) -> Vec<LivePlayer> {
        self.entries.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
