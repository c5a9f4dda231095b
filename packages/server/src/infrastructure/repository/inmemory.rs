//! In-memory repository implementations.
//!
//! HashMaps/Vecs behind a tokio Mutex stand in for the relational
//! store. Good enough for development and tests; a database-backed
//! implementation would slot in behind the same traits.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use gamepulse_shared::time::get_utc_timestamp;

use crate::domain::{
    GameRecord, GameRepository, Motd, MotdRepository, Player, PlayerRepository, RepositoryError,
    SubmittedGame,
};

/// In-memory [`PlayerRepository`].
pub struct InMemoryPlayerRepository {
    players: Mutex<HashMap<i32, Player>>,
}

impl InMemoryPlayerRepository {
    pub fn new() -> Self {
        Self {
            players: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryPlayerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    async fn get(&self, id: i32) -> Result<Player, RepositoryError> {
        let players = self.players.lock().await;
        players.get(&id).cloned().ok_or(RepositoryError::NoRecord)
    }

    async fn upsert(&self, player: Player) -> Result<(), RepositoryError> {
        let mut players = self.players.lock().await;
        players.insert(player.id, player);
        Ok(())
    }

    async fn get_all(
        &self,
        page_size: usize,
        page_num: usize,
    ) -> Result<Vec<Player>, RepositoryError> {
        let players = self.players.lock().await;
        let mut all: Vec<Player> = players.values().cloned().collect();
        all.sort_by(|a, b| b.game_time.total_cmp(&a.game_time));
        Ok(all
            .into_iter()
            .skip(page_num.saturating_sub(1) * page_size)
            .take(page_size)
            .collect())
    }

    async fn total_count(&self) -> Result<usize, RepositoryError> {
        let players = self.players.lock().await;
        Ok(players.len())
    }
}

/// In-memory [`GameRepository`]. Records are held in submission order;
/// record ids start at 1.
pub struct InMemoryGameRepository {
    records: Mutex<Vec<GameRecord>>,
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryGameRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn insert(&self, game: SubmittedGame) -> Result<i32, RepositoryError> {
        let mut records = self.records.lock().await;
        let id = records.len() as i32 + 1;
        records.push(GameRecord {
            id,
            submitted_at: get_utc_timestamp(),
            game,
        });
        Ok(id)
    }

    async fn get(&self, id: i32) -> Result<GameRecord, RepositoryError> {
        let records = self.records.lock().await;
        records
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or(RepositoryError::NoRecord)
    }

    async fn check_duplicate(&self, game: &SubmittedGame) -> Result<Option<i32>, RepositoryError> {
        let records = self.records.lock().await;
        Ok(records
            .iter()
            .find(|record| {
                record.game.player_id == game.player_id && record.game.game_time == game.game_time
            })
            .map(|record| record.id))
    }

    async fn get_recent(
        &self,
        player_id: Option<i32>,
        page_size: usize,
        page_num: usize,
    ) -> Result<Vec<GameRecord>, RepositoryError> {
        let records = self.records.lock().await;
        Ok(records
            .iter()
            .rev()
            .filter(|record| player_id.is_none_or(|id| record.game.player_id == id))
            .skip(page_num.saturating_sub(1) * page_size)
            .take(page_size)
            .cloned()
            .collect())
    }

    async fn get_top(&self, limit: usize) -> Result<Vec<GameRecord>, RepositoryError> {
        let records = self.records.lock().await;
        let mut all: Vec<GameRecord> = records.clone();
        all.sort_by(|a, b| b.game.game_time.total_cmp(&a.game.game_time));
        all.truncate(limit);
        Ok(all)
    }

    async fn total_count(&self, player_id: Option<i32>) -> Result<usize, RepositoryError> {
        let records = self.records.lock().await;
        Ok(records
            .iter()
            .filter(|record| player_id.is_none_or(|id| record.game.player_id == id))
            .count())
    }
}

/// In-memory [`MotdRepository`].
pub struct InMemoryMotdRepository {
    motd: Mutex<Motd>,
}

impl InMemoryMotdRepository {
    pub fn new(motd: Motd) -> Self {
        Self {
            motd: Mutex::new(motd),
        }
    }
}

#[async_trait]
impl MotdRepository for InMemoryMotdRepository {
    async fn get(&self) -> Result<Motd, RepositoryError> {
        let motd = self.motd.lock().await;
        Ok(motd.clone())
    }

    async fn set(&self, motd: Motd) -> Result<(), RepositoryError> {
        let mut current = self.motd.lock().await;
        *current = motd;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: i32, game_time: f64) -> Player {
        Player {
            id,
            player_name: format!("player-{id}"),
            rank: 0,
            game_time,
            death_type: 0,
            gems: 0,
            daggers_hit: 0,
            daggers_fired: 0,
            enemies_killed: 0,
            accuracy: 0.0,
            overall_time: 0.0,
            overall_deaths: 0,
            overall_gems: 0,
            overall_enemies_killed: 0,
            overall_daggers_hit: 0,
            overall_daggers_fired: 0,
            overall_accuracy: 0.0,
        }
    }

    fn submitted(player_id: i32, game_time: f64) -> SubmittedGame {
        serde_json::from_str(&format!(
            r#"{{"player_id": {player_id}, "game_time": {game_time:?}, "version": "0.4.5"}}"#
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn test_player_get_all_orders_by_game_time_desc() {
        // テスト項目: プレイヤー一覧が game_time 降順でページングされる
        // given (前提条件):
        let repo = InMemoryPlayerRepository::new();
        repo.upsert(player(1, 100.0)).await.unwrap();
        repo.upsert(player(2, 300.0)).await.unwrap();
        repo.upsert(player(3, 200.0)).await.unwrap();

        // when (操作):
        let page1 = repo.get_all(2, 1).await.unwrap();
        let page2 = repo.get_all(2, 2).await.unwrap();

        // then (期待する結果):
        assert_eq!(
            page1.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![2, 3]
        );
        assert_eq!(page2.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(repo.total_count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_player_upsert_replaces_existing() {
        // テスト項目: 同一 id の upsert が既存レコードを置き換える
        // given (前提条件):
        let repo = InMemoryPlayerRepository::new();
        repo.upsert(player(1, 100.0)).await.unwrap();

        // when (操作):
        repo.upsert(player(1, 150.0)).await.unwrap();

        // then (期待する結果):
        assert_eq!(repo.total_count().await.unwrap(), 1);
        assert_eq!(repo.get(1).await.unwrap().game_time, 150.0);
    }

    #[tokio::test]
    async fn test_player_get_missing_returns_no_record() {
        // テスト項目: 存在しないプレイヤーは NoRecord になる
        // given (前提条件):
        let repo = InMemoryPlayerRepository::new();

        // when (操作):
        let result = repo.get(42).await;

        // then (期待する結果):
        assert_eq!(result, Err(RepositoryError::NoRecord));
    }

    #[tokio::test]
    async fn test_game_insert_assigns_sequential_ids() {
        // テスト項目: 挿入ごとに 1 から始まる連番 id が振られる
        // given (前提条件):
        let repo = InMemoryGameRepository::new();

        // when (操作):
        let first = repo.insert(submitted(7, 100.0)).await.unwrap();
        let second = repo.insert(submitted(7, 200.0)).await.unwrap();

        // then (期待する結果):
        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(repo.get(2).await.unwrap().game.game_time, 200.0);
    }

    #[tokio::test]
    async fn test_game_check_duplicate_matches_player_and_time() {
        // テスト項目: 同一 player_id + game_time の run だけが重複と判定される
        // given (前提条件):
        let repo = InMemoryGameRepository::new();
        let id = repo.insert(submitted(7, 100.0)).await.unwrap();

        // when (操作) / then (期待する結果):
        assert_eq!(
            repo.check_duplicate(&submitted(7, 100.0)).await.unwrap(),
            Some(id)
        );
        assert_eq!(repo.check_duplicate(&submitted(7, 101.0)).await.unwrap(), None);
        assert_eq!(repo.check_duplicate(&submitted(8, 100.0)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_game_get_recent_filters_and_pages() {
        // テスト項目: recent が新しい順に並び、player_id で絞り込める
        // given (前提条件):
        let repo = InMemoryGameRepository::new();
        repo.insert(submitted(7, 100.0)).await.unwrap();
        repo.insert(submitted(8, 200.0)).await.unwrap();
        repo.insert(submitted(7, 300.0)).await.unwrap();

        // when (操作):
        let recent = repo.get_recent(None, 10, 1).await.unwrap();
        let player7 = repo.get_recent(Some(7), 10, 1).await.unwrap();

        // then (期待する結果):
        assert_eq!(recent.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3, 2, 1]);
        assert_eq!(player7.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3, 1]);
        assert_eq!(repo.total_count(Some(7)).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_game_get_top_orders_by_game_time() {
        // テスト項目: top が game_time 降順で limit 件に切り詰められる
        // given (前提条件):
        let repo = InMemoryGameRepository::new();
        repo.insert(submitted(7, 100.0)).await.unwrap();
        repo.insert(submitted(8, 300.0)).await.unwrap();
        repo.insert(submitted(9, 200.0)).await.unwrap();

        // when (操作):
        let top = repo.get_top(2).await.unwrap();

        // then (期待する結果):
        assert_eq!(top.iter().map(|r| r.game.player_id).collect::<Vec<_>>(), vec![8, 9]);
    }

    #[tokio::test]
    async fn test_motd_get_and_set() {
        // テスト項目: MOTD の取得と更新ができる
        // given (前提条件):
        let repo = InMemoryMotdRepository::new(Motd {
            message: "hello".to_string(),
        });

        // when (操作):
        let initial = repo.get().await.unwrap();
        repo.set(Motd {
            message: "updated".to_string(),
        })
        .await
        .unwrap();

        // then (期待する結果):
        assert_eq!(initial.message, "hello");
        assert_eq!(repo.get().await.unwrap().message, "updated");
    }
}
