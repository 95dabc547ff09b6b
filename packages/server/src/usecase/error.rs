//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::MessagePushError;

/// 接続受付のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcceptError {
    /// 履歴 envelope のシリアライズに失敗
    #[error("Failed to encode history: {0}")]
    Encode(String),

    /// 履歴 envelope を送れなかった（接続はルームから外されている）
    #[error("Failed to deliver history: {0}")]
    HistoryDeliveryFailed(#[from] MessagePushError),
}

/// メッセージ取り込みのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    /// デコードできないペイロード（破棄される）
    #[error("Malformed message: {0}")]
    Malformed(String),

    /// ブロードキャスト用のシリアライズに失敗
    #[error("Failed to encode message: {0}")]
    Encode(String),
}

/// ルーム詳細取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    /// ルーム名として不正
    #[error("Invalid room name: {0}")]
    InvalidRoomName(String),

    /// ルームが存在しない
    #[error("Room not found")]
    RoomNotFound,
}
