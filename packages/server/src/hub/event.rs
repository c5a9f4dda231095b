//! Events flowing into the hub coordinator.

use tokio::sync::oneshot;

use crate::domain::LivePlayer;

use super::{ConnId, OutboundQueue};

/// Everything that can mutate or read hub state travels through this
/// enum; the coordinator task is the only code that touches the room
/// registry and the live-state cache. Events from one connection are
/// processed in the order its adapter emitted them (mpsc is FIFO per
/// sender); no ordering is guaranteed across connections.
pub(super) enum HubEvent {
    /// A freshly upgraded connection joins a room.
    Register {
        conn: ConnId,
        room: String,
        outbound: OutboundQueue,
    },
    /// One decoded state message from a registered connection.
    StateUpdate {
        conn: ConnId,
        state: LivePlayer,
        /// Original payload, forwarded verbatim to room peers
        raw: String,
    },
    /// The connection's transport closed or failed.
    Unregister { conn: ConnId },
    /// Copy-on-read snapshot of the live-state cache.
    Snapshot {
        reply: oneshot::Sender<Vec<LivePlayer>>,
    },
}
