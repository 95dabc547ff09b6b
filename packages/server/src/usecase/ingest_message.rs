//! UseCase: メッセージ取り込み・ブロードキャスト処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - IngestMessageUseCase::execute() メソッド
//! - 履歴への追加と、送信者を含む全メンバーへのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 履歴は最大 100 件で、古いものから捨てられることを保証
//! - 送信に失敗したメンバーだけが外され、他のメンバーには届くことを確認
//! - 不正なペイロードが履歴・メンバー・配信に一切影響しないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数メンバーへの配信（送信者へのエコーを含む）
//! - 異常系：デコードできないペイロード、送信失敗したメンバー
//! - エッジケース：メンバー 0 人のルーム、容量ちょうどの履歴

use std::sync::Arc;

use crate::{
    domain::{BroadcastReport, ConnectionId, RoomName, RoomRepository},
    infrastructure::dto::websocket::{decode_inbound, encode_message},
};

use super::error::IngestError;

/// メッセージ取り込みのユースケース
pub struct IngestMessageUseCase {
    /// Repository（ルームレジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl IngestMessageUseCase {
    /// 新しい IngestMessageUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// メッセージ取り込みを実行
    ///
    /// 履歴への追加とブロードキャストは 1 回のロック取得の中で行う。
    /// これにより、同じ接続からのメッセージは受信順に配信される。
    ///
    /// # Arguments
    ///
    /// * `room_name` - ルーム名（存在しなければ作成される）
    /// * `from` - 受信した接続の ID
    /// * `raw` - 受信したペイロード
    ///
    /// # Returns
    ///
    /// * `Ok(BroadcastReport)` - 配信できたメンバーと、外したメンバー
    /// * `Err(IngestError::Malformed)` - ペイロードを破棄した（状態は変わらない）
    pub async fn execute(
        &self,
        room_name: &RoomName,
        from: &ConnectionId,
        raw: &str,
    ) -> Result<BroadcastReport, IngestError> {
        // 1. デコード（失敗したら何も変更せずに破棄）
        let message = decode_inbound(raw).map_err(|e| {
            tracing::warn!("Discarding malformed message from '{}': {}", from, e);
            IngestError::Malformed(e.to_string())
        })?;
        let payload = encode_message(&message).map_err(|e| IngestError::Encode(e.to_string()))?;

        let room = self.repository.get_or_create(room_name).await;
        let mut room = room.lock().await;

        // 2. 履歴に追加（追加してから古いものを捨てる）
        room.ingest(message);

        // 3. 送信者を含む全メンバーへブロードキャスト
        let report = room.broadcast(&payload);

        for dropped in &report.dropped {
            tracing::warn!(
                "Connection '{}' failed during broadcast and was removed from room '{}'",
                dropped,
                room_name
            );
        }
        tracing::debug!(
            "Broadcasted message from '{}' to {} members of room '{}'",
            from,
            report.delivered.len(),
            room_name
        );

        Ok(report)
    }
}
