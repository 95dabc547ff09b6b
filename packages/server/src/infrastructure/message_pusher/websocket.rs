//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 1 接続ぶんの有界な送信キュー（`mpsc::Sender`）を保持
//! - `push` で送信キューにメッセージを積む（待たない）
//!
//! ## 設計ノート
//!
//! WebSocket の生成と書き込みは UI 層（`ui/handler/websocket.rs`）で行われます。
//! UI 層は `Receiver` を読み出してソケットに書き込むタスクを接続ごとに持ち、
//! ソケットへの書き込みに失敗するとそのタスクが終了して receiver が破棄されます。
//!
//! 読み出さないクライアントはキューが埋まった時点で `QueueFull` になり、
//! 読み出し側が破棄された場合と同じくルームから外されます。

use tokio::sync::mpsc::{self, error::TrySendError};

use crate::domain::{MessagePushError, MessagePusher};

/// 1 接続あたりの送信キューの既定サイズ
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// 接続ごとの送信キュー
pub type PusherChannel = mpsc::Sender<String>;

/// WebSocket を使った MessagePusher 実装
pub struct WebSocketMessagePusher {
    /// 送信キュー
    sender: PusherChannel,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(sender: PusherChannel) -> Self {
        Self { sender }
    }

    /// 既定サイズの送信キューと、その読み出し側をまとめて作成
    pub fn channel() -> (Self, mpsc::Receiver<String>) {
        Self::with_capacity(DEFAULT_QUEUE_CAPACITY)
    }

    /// 指定サイズ（最低 1）の送信キューと、その読み出し側をまとめて作成
    pub fn with_capacity(capacity: usize) -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self::new(tx), rx)
    }
}

impl MessagePusher for WebSocketMessagePusher {
    fn push(&self, payload: &str) -> Result<(), MessagePushError> {
        self.sender
            .try_send(payload.to_string())
            .map_err(|e| match e {
                TrySendError::Full(_) => MessagePushError::QueueFull(self.sender.max_capacity()),
                TrySendError::Closed(_) => {
                    MessagePushError::ChannelClosed("receiver dropped".to_string())
                }
            })
    }
}
