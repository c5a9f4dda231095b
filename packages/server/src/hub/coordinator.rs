//! The coordinator task: single owner of room and live-state tables.

use std::collections::HashMap;

use tokio::sync::mpsc;

use super::cache::LiveCache;
use super::event::HubEvent;
use super::registry::RoomRegistry;
use super::{ConnId, OutboundQueue};

struct ConnEntry {
    outbound: OutboundQueue,
    /// Set by the first accepted state message; a connection may be
    /// registered without a cache entry until then.
    player_id: Option<i32>,
}

/// Drains the hub event queue until every [`super::Hub`] handle is
/// dropped. All registry/cache mutation happens inside this loop, one
/// event at a time, so no observer can see a connection half-removed.
pub(super) async fn run(mut events: mpsc::Receiver<HubEvent>) {
    let mut connections: HashMap<ConnId, ConnEntry> = HashMap::new();
    let mut rooms = RoomRegistry::new();
    let mut live = LiveCache::new();

    while let Some(event) = events.recv().await {
        match event {
            HubEvent::Register {
                conn,
                room,
                outbound,
            } => {
                if connections.contains_key(&conn) {
                    tracing::debug!(%conn, "connection already registered, ignoring");
                    continue;
                }
                rooms.join(&room, conn);
                connections.insert(
                    conn,
                    ConnEntry {
                        outbound,
                        player_id: None,
                    },
                );
                tracing::info!(%conn, room, rooms = rooms.room_count(), "connection registered");
            }
            HubEvent::StateUpdate { conn, state, raw } => {
                // A write-failure unregister can race ahead of the
                // read loop's remaining events; unknown handles are
                // dropped rather than treated as fatal.
                let Some(entry) = connections.get_mut(&conn) else {
                    tracing::debug!(%conn, "state update for unknown connection, dropped");
                    continue;
                };
                // A connection owns at most one cache entry; if the
                // peer re-identifies under a new player id, the old
                // entry would otherwise outlive the connection.
                if let Some(previous) = entry.player_id {
                    if previous != state.player_id {
                        live.remove(previous);
                    }
                }
                entry.player_id = Some(state.player_id);
                live.upsert(state);

                let Some(room) = rooms.room_of(conn) else {
                    continue;
                };
                for member in rooms.members(room) {
                    if member == conn {
                        continue;
                    }
                    if let Some(peer) = connections.get(&member) {
                        peer.outbound.push(raw.clone());
                    }
                }
            }
            HubEvent::Unregister { conn } => {
                // Leave + cache removal happen within this single
                // event step; a snapshot request queued behind it sees
                // either both or neither.
                let Some(entry) = connections.remove(&conn) else {
                    tracing::debug!(%conn, "duplicate unregister ignored");
                    continue;
                };
                rooms.leave(conn);
                if let Some(player_id) = entry.player_id {
                    live.remove(player_id);
                }
                entry.outbound.close();
                tracing::info!(%conn, live = live.len(), "connection unregistered");
            }
            HubEvent::Snapshot { reply } => {
                // The requester may have given up waiting; that is fine.
                let _ = reply.send(live.snapshot());
            }
        }
    }

    tracing::debug!("hub coordinator stopped");
}

#[cfg(test)]
mod tests {
    use super::super::{Hub, OutboundQueue};
    use crate::domain::LivePlayer;
    use uuid::Uuid;

    fn state(player_id: i32, gems: i32) -> LivePlayer {
        LivePlayer {
            player_id,
            player_name: format!("player-{player_id}"),
            time: 10.0,
            gems,
            homing_daggers: 0,
            enemies_alive: 0,
            enemies_killed: 0,
            daggers_hit: 0,
            daggers_fired: 0,
            death_type: -1,
        }
    }

    fn raw(player_id: i32, gems: i32) -> String {
        serde_json::to_string(&state(player_id, gems)).unwrap()
    }

    #[tokio::test]
    async fn test_snapshot_empty_before_any_state_message() {
        // テスト項目: 登録済みでも state 未受信の接続はスナップショットに現れない
        // given (前提条件):
        let hub = Hub::spawn();
        let conn = Uuid::new_v4();
        hub.register(conn, "r2".to_string(), OutboundQueue::new(8))
            .await;

        // when (操作):
        let players = hub.live_players().await.unwrap();

        // then (期待する結果):
        assert!(players.is_empty());
    }

    #[tokio::test]
    async fn test_state_update_fills_cache_and_broadcasts() {
        // テスト項目: state 受信でキャッシュ反映と同室ブロードキャストが行われる
        // given (前提条件): A, B が r1 に参加している
        let hub = Hub::spawn();
        let conn_a = Uuid::new_v4();
        let conn_b = Uuid::new_v4();
        let queue_a = OutboundQueue::new(8);
        let queue_b = OutboundQueue::new(8);
        hub.register(conn_a, "r1".to_string(), queue_a.clone()).await;
        hub.register(conn_b, "r1".to_string(), queue_b.clone()).await;

        // when (操作): A が state を送る
        hub.state_update(conn_a, state(5, 10), raw(5, 10)).await;
        // live_players はイベントキューを通るため、先行イベントの完了が保証される
        let players = hub.live_players().await.unwrap();

        // then (期待する結果): キャッシュに player 5、B にだけ payload が届く
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].player_id, 5);
        assert_eq!(players[0].gems, 10);
        assert_eq!(queue_b.try_pop(), Some(raw(5, 10)));
        assert!(queue_a.is_empty());
    }

    #[tokio::test]
    async fn test_broadcast_reaches_all_but_sender() {
        // テスト項目: N 人のルームで送信者以外の N-1 人に配送される
        // given (前提条件): 3 人が r1、1 人が r2 にいる
        let hub = Hub::spawn();
        let conns: Vec<_> = (0..3).map(|_| Uuid::new_v4()).collect();
        let queues: Vec<_> = (0..3).map(|_| OutboundQueue::new(8)).collect();
        for (conn, queue) in conns.iter().zip(&queues) {
            hub.register(*conn, "r1".to_string(), queue.clone()).await;
        }
        let other_queue = OutboundQueue::new(8);
        hub.register(Uuid::new_v4(), "r2".to_string(), other_queue.clone())
            .await;

        // when (操作):
        hub.state_update(conns[0], state(1, 1), raw(1, 1)).await;
        hub.live_players().await.unwrap();

        // then (期待する結果): 送信者と別ルームには届かない
        assert!(queues[0].is_empty());
        assert_eq!(queues[1].try_pop(), Some(raw(1, 1)));
        assert_eq!(queues[2].try_pop(), Some(raw(1, 1)));
        assert!(other_queue.is_empty());
    }

    #[tokio::test]
    async fn test_per_sender_order_is_preserved() {
        // テスト項目: 同一送信者からのメッセージは送信順で受信される
        // given (前提条件):
        let hub = Hub::spawn();
        let conn_a = Uuid::new_v4();
        let conn_b = Uuid::new_v4();
        let queue_b = OutboundQueue::new(8);
        hub.register(conn_a, "r1".to_string(), OutboundQueue::new(8))
            .await;
        hub.register(conn_b, "r1".to_string(), queue_b.clone()).await;

        // when (操作):
        for gems in [1, 2, 3] {
            hub.state_update(conn_a, state(5, gems), raw(5, gems)).await;
        }
        hub.live_players().await.unwrap();

        // then (期待する結果):
        assert_eq!(queue_b.try_pop(), Some(raw(5, 1)));
        assert_eq!(queue_b.try_pop(), Some(raw(5, 2)));
        assert_eq!(queue_b.try_pop(), Some(raw(5, 3)));
    }

    #[tokio::test]
    async fn test_unregister_removes_room_and_cache_together() {
        // テスト項目: unregister でルームとキャッシュから同時に消える
        // given (前提条件): A が state 送信済み
        let hub = Hub::spawn();
        let conn_a = Uuid::new_v4();
        let conn_b = Uuid::new_v4();
        let queue_b = OutboundQueue::new(8);
        hub.register(conn_a, "r1".to_string(), OutboundQueue::new(8))
            .await;
        hub.register(conn_b, "r1".to_string(), queue_b.clone()).await;
        hub.state_update(conn_a, state(5, 10), raw(5, 10)).await;

        // when (操作):
        hub.unregister(conn_a).await;
        let players = hub.live_players().await.unwrap();

        // then (期待する結果): スナップショットから消え、以後 B に届かない
        assert!(players.is_empty());
        queue_b.try_pop(); // 切断前のブロードキャスト
        hub.state_update(conn_a, state(5, 11), raw(5, 11)).await;
        hub.live_players().await.unwrap();
        assert!(queue_b.is_empty());
    }

    #[tokio::test]
    async fn test_reidentified_connection_keeps_single_cache_entry() {
        // テスト項目: 同一接続が別の player_id を名乗ると旧エントリは
        // 消え、切断でキャッシュが空になる
        // given (前提条件): A が player 5 として state 送信済み
        let hub = Hub::spawn();
        let conn = Uuid::new_v4();
        hub.register(conn, "r1".to_string(), OutboundQueue::new(8))
            .await;
        hub.state_update(conn, state(5, 10), raw(5, 10)).await;

        // when (操作): 同じ接続が player 6 として送信する
        hub.state_update(conn, state(6, 20), raw(6, 20)).await;
        let players = hub.live_players().await.unwrap();

        // then (期待する結果): エントリは player 6 の 1 件だけ
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].player_id, 6);

        // when (操作): 切断する
        hub.unregister(conn).await;

        // then (期待する結果): スナップショットは空
        assert!(hub.live_players().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_unregister_is_ignored() {
        // テスト項目: 二重 unregister が後続の状態に影響しない
        // given (前提条件):
        let hub = Hub::spawn();
        let conn_a = Uuid::new_v4();
        let conn_b = Uuid::new_v4();
        hub.register(conn_a, "r1".to_string(), OutboundQueue::new(8))
            .await;
        hub.unregister(conn_a).await;

        // when (操作): もう一度 unregister してから B が参加・送信する
        hub.unregister(conn_a).await;
        hub.register(conn_b, "r1".to_string(), OutboundQueue::new(8))
            .await;
        hub.state_update(conn_b, state(7, 1), raw(7, 1)).await;

        // then (期待する結果): B の状態は正常に反映されている
        let players = hub.live_players().await.unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].player_id, 7);
    }

    #[tokio::test]
    async fn test_saturated_receiver_drops_only_its_own_messages() {
        // テスト項目: 飽和した受信者がいても他の受信者への配送は完走する
        // given (前提条件): B の outbound 容量は 2、C は十分
        let hub = Hub::spawn();
        let conn_a = Uuid::new_v4();
        let conn_b = Uuid::new_v4();
        let conn_c = Uuid::new_v4();
        let queue_b = OutboundQueue::new(2);
        let queue_c = OutboundQueue::new(16);
        hub.register(conn_a, "r1".to_string(), OutboundQueue::new(8))
            .await;
        hub.register(conn_b, "r1".to_string(), queue_b.clone()).await;
        hub.register(conn_c, "r1".to_string(), queue_c.clone()).await;

        // when (操作): A が 5 通ブロードキャストする
        for gems in 1..=5 {
            hub.state_update(conn_a, state(5, gems), raw(5, gems)).await;
        }
        hub.live_players().await.unwrap();

        // then (期待する結果): C は全件、B は直近 2 件のみ
        assert_eq!(queue_c.len(), 5);
        assert_eq!(queue_b.len(), 2);
        assert_eq!(queue_b.try_pop(), Some(raw(5, 4)));
        assert_eq!(queue_b.try_pop(), Some(raw(5, 5)));
    }
}
