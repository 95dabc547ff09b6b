//! UseCase: ルーム一覧取得

use std::sync::Arc;

use crate::domain::{RoomRepository, RoomSnapshot};

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 全ルームのスナップショットを名前順で返す
    pub async fn execute(&self) -> Vec<RoomSnapshot> {
        let mut snapshots = Vec::new();
        for room in self.repository.list().await {
            snapshots.push(room.lock().await.snapshot());
        }
        snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::RoomName, infrastructure::repository::InMemoryRoomRepository};

    #[tokio::test]
    async fn test_get_rooms_empty() {
        // テスト項目: ルームがない場合は空のリストが返される
        // given (前提条件):
        let usecase = GetRoomsUseCase::new(Arc::new(InMemoryRoomRepository::new()));

        // when (操作):
        let rooms = usecase.execute().await;

        // then (期待する結果):
        assert!(rooms.is_empty());
    }

    #[tokio::test]
    async fn test_get_rooms_returns_created_rooms() {
        // テスト項目: 作成済みのルームがスナップショットとして返される
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        repository.get_or_create(&RoomName::global()).await;
        let usecase = GetRoomsUseCase::new(repository);

        // when (操作):
        let rooms = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].name, RoomName::global());
        assert!(rooms[0].members.is_empty());
    }
}
