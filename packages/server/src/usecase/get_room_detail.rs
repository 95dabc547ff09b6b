//! UseCase: ルーム詳細取得

use std::sync::Arc;

use crate::domain::{RoomName, RoomRepository, RoomSnapshot};

use super::error::GetRoomDetailError;

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 指定したルームのスナップショットを返す（ルームは作成しない）
    pub async fn execute(&self, room_name: String) -> Result<RoomSnapshot, GetRoomDetailError> {
        let name = RoomName::new(room_name.clone())
            .map_err(|_| GetRoomDetailError::InvalidRoomName(room_name))?;

        let room = self
            .repository
            .find(&name)
            .await
            .ok_or(GetRoomDetailError::RoomNotFound)?;
        let snapshot = room.lock().await.snapshot();
        Ok(snapshot)
    }
}
