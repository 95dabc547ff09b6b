//! UseCase: 接続受付処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - AcceptConnectionUseCase::execute() メソッド
//! - メンバー追加と履歴 envelope の送信
//!
//! ### なぜこのテストが必要か
//! - 新規接続は最初に必ず 1 通だけ history を受け取る
//! - 参加は他のメンバーに通知されない（サイレント join）
//! - 履歴送信に失敗した接続はルームに残らない
//!
//! ### どのような状況を想定しているか
//! - 正常系：空のルーム・履歴のあるルームへの接続
//! - 異常系：履歴送信の失敗
//! - エッジケース：同一ユーザーの重複接続

use std::sync::Arc;

use elderscape_shared::time::Clock;

use crate::{
    domain::{ClientConnection, ConnectionId, MessagePusher, RoomName, RoomRepository, Timestamp},
    infrastructure::dto::websocket::encode_history,
};

use super::error::AcceptError;

/// 接続受付のユースケース
pub struct AcceptConnectionUseCase {
    /// Repository（ルームレジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
    /// 接続時刻の取得元
    clock: Arc<dyn Clock>,
}

impl AcceptConnectionUseCase {
    /// 新しい AcceptConnectionUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// 接続受付を実行
    ///
    /// メンバーへの追加と history envelope の送信は同じロックの中で行うため、
    /// 新しい接続には必ず history が最初に届き、その後のブロードキャストと重複しない。
    ///
    /// # Arguments
    ///
    /// * `room_name` - 接続先のルーム名（存在しなければ作成される）
    /// * `pusher` - この接続への送信口
    ///
    /// # Returns
    ///
    /// * `Ok(ConnectionId)` - 割り当てた接続 ID
    /// * `Err(AcceptError)` - history を送れなかった（接続はルームに残らない）
    pub async fn execute(
        &self,
        room_name: &RoomName,
        pusher: Box<dyn MessagePusher>,
    ) -> Result<ConnectionId, AcceptError> {
        let connection_id = ConnectionId::generate();
        let connected_at = Timestamp::new(self.clock.now_millis());
        let connection = ClientConnection::new(connection_id, pusher, connected_at);

        let room = self.repository.get_or_create(room_name).await;
        let mut room = room.lock().await;

        // 1. メンバーに追加し、その時点の履歴を取得
        let history = room.accept(connection);

        // 2. history envelope を本人にだけ送る
        let payload = match encode_history(&history) {
            Ok(payload) => payload,
            Err(e) => {
                room.disconnect(&connection_id);
                return Err(AcceptError::Encode(e.to_string()));
            }
        };
        room.push_to(&connection_id, &payload)?;

        tracing::info!(
            "Connection '{}' joined room '{}' ({} members, {} messages in history)",
            connection_id,
            room_name,
            room.member_count(),
            history.len()
        );

        Ok(connection_id)
    }
}
