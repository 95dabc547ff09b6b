//! MessagePusher trait 定義
//!
//! 1 本の接続に対してメッセージを送り出すためのインターフェース。
//! WebSocket などトランスポート固有の実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## 送信モデル
//!
//! `push` はブロックしません。実装は送信キューへの投入までを担当し、
//! 実際のソケット書き込みは接続ごとの独立したタスクで行います。
//! これにより、遅いクライアントが他のメンバーへの配信を止めることはありません。

#[cfg(test)]
use mockall::automock;

use super::MessagePushError;

/// 1 接続ぶんの送信口
#[cfg_attr(test, automock)]
pub trait MessagePusher: Send + Sync {
    /// シリアライズ済みのメッセージを送信キューに投入する
    ///
    /// `Err` は接続が既に死んでいることを意味し、呼び出し側はその接続をルームから外す。
    fn push(&self, payload: &str) -> Result<(), MessagePushError>;
}
