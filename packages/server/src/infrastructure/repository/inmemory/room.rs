//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をルームレジストリとして使用します。
//!
//! ## 一貫性
//!
//! - レジストリ全体の Mutex は「ルームの作成・検索」だけを守る
//! - ルーム内の状態（メンバー・履歴）は各ルームの Mutex が守る
//! - 異なるルームの操作が互いに待つことはない
//!
//! プロセスが再起動するとルームは空の状態で作り直されます（永続化はしない）。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use elderscape_shared::time::{Clock, SystemClock};
use tokio::sync::Mutex;

use crate::domain::{DEFAULT_HISTORY_CAPACITY, Room, RoomName, RoomRepository, SharedRoom, Timestamp};

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    /// ルーム名 → ルーム
    rooms: Mutex<HashMap<RoomName, SharedRoom>>,
    /// 新しく作るルームの履歴容量
    history_capacity: usize,
    /// ルーム作成時刻の取得元
    clock: Arc<dyn Clock>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock), DEFAULT_HISTORY_CAPACITY)
    }

    /// 時刻の取得元と履歴容量を指定して作成（テスト用）
    pub fn with_clock(clock: Arc<dyn Clock>, history_capacity: usize) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            history_capacity,
            clock,
        }
    }
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn get_or_create(&self, name: &RoomName) -> SharedRoom {
        let mut rooms = self.rooms.lock().await;
        rooms
            .entry(name.clone())
            .or_insert_with(|| {
                tracing::info!("Room '{}' created", name);
                Arc::new(Mutex::new(Room::with_capacity(
                    name.clone(),
                    Timestamp::new(self.clock.now_millis()),
                    self.history_capacity,
                )))
            })
            .clone()
    }

    async fn find(&self, name: &RoomName) -> Option<SharedRoom> {
        let rooms = self.rooms.lock().await;
        rooms.get(name).cloned()
    }

    async fn list(&self) -> Vec<SharedRoom> {
        let rooms = self.rooms.lock().await;
        let mut entries: Vec<(&RoomName, &SharedRoom)> = rooms.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter().map(|(_, room)| room.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elderscape_shared::time::FixedClock;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - ルーム名ごとにルームが 1 つだけ存在すること
    // - 初回アクセスで空のルームが作られること
    // - find は作成しないこと、list が名前順であること
    // ========================================

    fn create_test_repository() -> InMemoryRoomRepository {
        InMemoryRoomRepository::with_clock(Arc::new(FixedClock::new(1000)), 3)
    }

    fn room_name(name: &str) -> RoomName {
        RoomName::new(name.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_get_or_create_creates_empty_room() {
        // テスト項目: 初回アクセスで空のルームが作成される
        // given (前提条件):
        let repo = create_test_repository();

        // when (操作):
        let room = repo.get_or_create(&RoomName::global()).await;

        // then (期待する結果):
        let room = room.lock().await;
        assert_eq!(room.name, RoomName::global());
        assert_eq!(room.created_at, Timestamp::new(1000));
        assert_eq!(room.member_count(), 0);
        assert!(room.history().is_empty());
        assert_eq!(room.history().capacity(), 3);
    }

    #[tokio::test]
    async fn test_get_or_create_returns_same_instance() {
        // テスト項目: 同じルーム名には常に同じインスタンスが返される
        // given (前提条件):
        let repo = create_test_repository();

        // when (操作):
        let first = repo.get_or_create(&RoomName::global()).await;
        let second = repo.get_or_create(&RoomName::global()).await;

        // then (期待する結果):
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_concurrent_get_or_create_yields_single_room() {
        // テスト項目: 同時に作成要求が来てもルームは 1 つだけ作られる
        // given (前提条件):
        let repo = Arc::new(create_test_repository());

        // when (操作):
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.get_or_create(&RoomName::global()).await })
            })
            .collect();
        let mut rooms = Vec::new();
        for handle in handles {
            rooms.push(handle.await.unwrap());
        }

        // then (期待する結果):
        assert!(rooms.iter().all(|room| Arc::ptr_eq(room, &rooms[0])));
        assert_eq!(repo.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_find_does_not_create() {
        // テスト項目: find は存在しないルームを作成しない
        // given (前提条件):
        let repo = create_test_repository();

        // when (操作):
        let found = repo.find(&room_name("tavern")).await;

        // then (期待する結果):
        assert!(found.is_none());
        assert!(repo.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_name() {
        // テスト項目: list はルーム名順に返される
        // given (前提条件):
        let repo = create_test_repository();
        repo.get_or_create(&room_name("tavern")).await;
        repo.get_or_create(&room_name("guild")).await;
        repo.get_or_create(&room_name("market")).await;

        // when (操作):
        let rooms = repo.list().await;

        // then (期待する結果):
        let mut names = Vec::new();
        for room in rooms {
            names.push(room.lock().await.name.as_str().to_string());
        }
        assert_eq!(names, vec!["guild", "market", "tavern"]);
    }
}
