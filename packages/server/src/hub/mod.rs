//! Live-session broadcast hub.
//!
//! The hub accepts long-lived WebSocket connections, groups them into
//! rooms, relays state updates between the members of a room, and
//! maintains a queryable snapshot of who is currently live.
//!
//! Concurrency model: one task per connection for reading, one for
//! writing, and a single coordinator task that owns all room/cache
//! state. Everything crosses between tasks via bounded queues; there
//! is no shared lock on registry or cache memory.

mod cache;
mod connection;
mod coordinator;
mod event;
mod outbound;
mod registry;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

use crate::domain::LivePlayer;

pub use connection::handle_connection;
pub use outbound::OutboundQueue;

use event::HubEvent;

/// Opaque handle identifying one connection for its lifetime.
pub type ConnId = Uuid;

/// Capacity of the coordinator's inbound event queue.
const EVENT_QUEUE_CAPACITY: usize = 256;

/// Capacity of each connection's outbound queue; beyond this the
/// oldest pending message for that peer is dropped.
pub const OUTBOUND_QUEUE_CAPACITY: usize = 64;

/// Errors surfaced by the hub handle.
#[derive(Debug, Error)]
pub enum HubError {
    /// The coordinator task is gone; only happens at process shutdown
    #[error("hub coordinator is not running")]
    Closed,
}

/// Cloneable handle to the hub coordinator.
///
/// Constructed once at startup with [`Hub::spawn`] and injected into
/// the HTTP layer; there is no global instance. Dropping every handle
/// ends the coordinator task.
#[derive(Clone)]
pub struct Hub {
    events: mpsc::Sender<HubEvent>,
}

impl Hub {
    /// Start the coordinator task and return a handle to it.
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
        tokio::spawn(coordinator::run(rx));
        Self { events: tx }
    }

    /// Register a connection into `room`. The coordinator pushes
    /// broadcast payloads for this connection onto `outbound`.
    pub async fn register(&self, conn: ConnId, room: String, outbound: OutboundQueue) {
        self.send(HubEvent::Register {
            conn,
            room,
            outbound,
        })
        .await;
    }

    /// Forward one decoded state message from `conn`.
    pub async fn state_update(&self, conn: ConnId, state: LivePlayer, raw: String) {
        self.send(HubEvent::StateUpdate { conn, state, raw }).await;
    }

    /// Remove `conn` from its room and from the live-state cache.
    /// Duplicate unregisters are ignored by the coordinator.
    pub async fn unregister(&self, conn: ConnId) {
        self.send(HubEvent::Unregister { conn }).await;
    }

    /// Point-in-time copy of the live-state cache.
    pub async fn live_players(&self) -> Result<Vec<LivePlayer>, HubError> {
        let (reply, response) = oneshot::channel();
        self.send(HubEvent::Snapshot { reply }).await;
        response.await.map_err(|_| HubError::Closed)
    }

    async fn send(&self, event: HubEvent) {
        // The coordinator only stops when every handle is dropped, so
        // a failed send can occur solely during process shutdown.
        if self.events.send(event).await.is_err() {
            tracing::warn!("hub coordinator is gone, event discarded");
        }
    }
}
