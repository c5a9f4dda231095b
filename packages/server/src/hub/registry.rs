//! Room membership table, owned exclusively by the coordinator task.

use std::collections::{HashMap, HashSet};

use super::ConnId;

/// Maps room name -> member set, with a reverse index from connection
/// to room so `leave` does not need the caller to remember the room.
///
/// Invariant: a connection belongs to at most one room at a time.
#[derive(Default)]
pub(super) struct RoomRegistry {
    rooms: HashMap<String, HashSet<ConnId>>,
    membership: HashMap<ConnId, String>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `conn` into `room`, creating the room on first join.
    /// No-op if the connection is already a member of a room.
    pub fn join(&mut self, room: &str, conn: ConnId) {
        if self.membership.contains_key(&conn) {
            return;
        }
        self.rooms.entry(room.to_string()).or_default().insert(conn);
        self.membership.insert(conn, room.to_string());
    }

    /// Remove `conn` from whichever room it belongs to, deleting the
    /// room once its member count reaches zero. Idempotent.
    pub fn leave(&mut self, conn: ConnId) {
        let Some(room) = self.membership.remove(&conn) else {
            return;
        };
        if let Some(members) = self.rooms.get_mut(&room) {
            members.remove(&conn);
            if members.is_empty() {
                self.rooms.remove(&room);
            }
        }
    }

    /// The room this connection currently belongs to, if any.
    pub fn room_of(&self, conn: ConnId) -> Option<&str> {
        self.membership.get(&conn).map(String::as_str)
    }

    /// Member set of `room`. Empty iterator for unknown rooms.
    pub fn members(&self, room: &str) -> impl Iterator<Item = ConnId> + '_ {
        self.rooms.get(room).into_iter().flatten().copied()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
