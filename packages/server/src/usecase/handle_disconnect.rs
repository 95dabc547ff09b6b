//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - HandleDisconnectUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 切断した接続がメンバーから外れ、以降の配信対象にならないことを保証
//! - 切断は冪等であること（ブロードキャスト失敗で既に外れていても問題ない）
//!
//! ### どのような状況を想定しているか
//! - 正常系：メンバーの切断
//! - エッジケース：二重切断、存在しないルームでの切断

use std::sync::Arc;

use crate::domain::{ConnectionId, RoomName, RoomRepository};

/// 切断のユースケース
pub struct HandleDisconnectUseCase {
    /// Repository（ルームレジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl HandleDisconnectUseCase {
    /// 新しい HandleDisconnectUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// メンバーから外した場合は `true`、既に外れていた場合は `false`
    pub async fn execute(&self, room_name: &RoomName, connection_id: &ConnectionId) -> bool {
        let Some(room) = self.repository.find(room_name).await else {
            return false;
        };

        let mut room = room.lock().await;
        let removed = room.disconnect(connection_id);
        if removed {
            tracing::info!(
                "Connection '{}' left room '{}' ({} members remaining)",
                connection_id,
                room_name,
                room.member_count()
            );
        } else {
            tracing::debug!(
                "Connection '{}' was already removed from room '{}'",
                connection_id,
                room_name
            );
        }
        removed
    }
}
