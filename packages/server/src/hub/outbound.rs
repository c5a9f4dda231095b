//! Per-connection outbound message queue.
//!
//! The coordinator pushes broadcast payloads here without ever
//! blocking: the queue is a bounded ring and a full queue drops its
//! oldest pending message. The connection's write loop drains the
//! queue into the socket. One stalled peer therefore loses its own
//! messages instead of stalling broadcast to the rest of the room.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

struct QueueState {
    messages: VecDeque<String>,
    closed: bool,
    /// Messages discarded because the peer was too slow to drain
    dropped: u64,
}

struct Shared {
    state: Mutex<QueueState>,
    notify: Notify,
    capacity: usize,
}

/// Bounded drop-oldest queue between the coordinator and one write loop.
///
/// Clones share the same buffer; the coordinator holds one clone, the
/// connection adapter holds the other.
#[derive(Clone)]
pub struct OutboundQueue {
    shared: Arc<Shared>,
}

impl OutboundQueue {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "outbound queue capacity must be non-zero");
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(QueueState {
                    messages: VecDeque::with_capacity(capacity),
                    closed: false,
                    dropped: 0,
                }),
                notify: Notify::new(),
                capacity,
            }),
        }
    }

    /// Enqueue a message without blocking. When the queue is full the
    /// oldest pending message is discarded to make room. Pushing onto
    /// a closed queue is a no-op.
    pub fn push(&self, message: String) {
        let mut state = self.shared.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.closed {
            return;
        }
        if state.messages.len() == self.shared.capacity {
            state.messages.pop_front();
            state.dropped += 1;
            tracing::debug!(
                dropped_total = state.dropped,
                "outbound queue full, dropped oldest message"
            );
        }
        state.messages.push_back(message);
        drop(state);
        self.shared.notify.notify_one();
    }

    /// Dequeue the next message, waiting until one arrives. Returns
    /// `None` once the queue is closed and drained.
    pub async fn pop(&self) -> Option<String> {
        loop {
            {
                let mut state = self.shared.state.lock().unwrap_or_else(|e| e.into_inner());
                if let Some(message) = state.messages.pop_front() {
                    return Some(message);
                }
                if state.closed {
                    return None;
                }
            }
            // notify_one stores a permit, so a push racing with this
            // await is not lost.
            self.shared.notify.notified().await;
        }
    }

    /// Dequeue the next message if one is immediately available.
    pub fn try_pop(&self) -> Option<String> {
        let mut state = self.shared.state.lock().unwrap_or_else(|e| e.into_inner());
        state.messages.pop_front()
    }

    /// Close the queue and wake the write loop. Pending messages are
    /// still delivered before `pop` returns `None`.
    pub fn close(&self) {
        let mut state = self.shared.state.lock().unwrap_or_else(|e| e.into_inner());
        state.closed = true;
        drop(state);
        self.shared.notify.notify_one();
    }

    /// Number of messages currently buffered.
    pub fn len(&self) -> usize {
        let state = self.shared.state.lock().unwrap_or_else(|e| e.into_inner());
        state.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
