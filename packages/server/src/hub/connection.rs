//! Connection adapter: read/write loops for one upgraded WebSocket.

use axum::extract::ws::{Message, WebSocket};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use uuid::Uuid;

use crate::domain::LivePlayer;

use super::{ConnId, Hub, OUTBOUND_QUEUE_CAPACITY, OutboundQueue};

/// Drive one connection until its transport closes.
///
/// Registers the connection into `room`, then runs the read loop on
/// this task and the write loop on a companion task. The read loop
/// sends exactly one unregister event when it terminates and never
/// touches the hub afterwards.
pub async fn handle_connection(socket: WebSocket, hub: Hub, room: String) {
    let conn: ConnId = Uuid::new_v4();
    let outbound = OutboundQueue::new(OUTBOUND_QUEUE_CAPACITY);
    hub.register(conn, room, outbound.clone()).await;

    let (sink, stream) = socket.split();
    let writer = tokio::spawn(write_loop(sink, outbound.clone(), hub.clone(), conn));

    read_loop(stream, &hub, conn).await;
    hub.unregister(conn).await;

    // Wake the writer so it drains and exits; the coordinator also
    // closes the queue on unregister, this covers the shutdown race.
    outbound.close();
    let _ = writer.await;
    tracing::debug!(%conn, "connection closed");
}

/// Decode inbound messages one at a time and forward them to the
/// coordinator. Returns on transport error or close; a malformed
/// message is logged and dropped without tearing down the connection.
async fn read_loop(mut stream: SplitStream<WebSocket>, hub: &Hub, conn: ConnId) {
    while let Some(received) = stream.next().await {
        let message = match received {
            Ok(message) => message,
            Err(e) => {
                tracing::info!(%conn, "websocket read error: {e}");
                return;
            }
        };

        match message {
            Message::Text(text) => match serde_json::from_str::<LivePlayer>(&text) {
                Ok(state) => {
                    hub.state_update(conn, state, text.to_string()).await;
                }
                Err(e) => {
                    tracing::warn!(%conn, "malformed state message dropped: {e}");
                }
            },
            Message::Close(_) => {
                tracing::debug!(%conn, "peer requested close");
                return;
            }
            // Ping/pong is answered by axum itself.
            _ => {}
        }
    }
}

/// Drain the outbound queue into the socket. A send failure is the
/// peer disconnecting: synthesize an unregister for this peer only.
async fn write_loop(
    mut sink: SplitSink<WebSocket, Message>,
    outbound: OutboundQueue,
    hub: Hub,
    conn: ConnId,
) {
    while let Some(payload) = outbound.pop().await {
        if let Err(e) = sink.send(Message::Text(payload.into())).await {
            tracing::info!(%conn, "websocket write error: {e}");
            hub.unregister(conn).await;
            return;
        }
    }
}
