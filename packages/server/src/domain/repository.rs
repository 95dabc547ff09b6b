//! Repository trait 定義
//!
//! ドメイン層が必要とするルームレジストリのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{Room, RoomName};

/// ルーム 1 つぶんの排他領域
///
/// メンバー集合と履歴の変更はすべてこの Mutex の内側で行う。
pub type SharedRoom = Arc<Mutex<Room>>;

/// Room Repository trait
///
/// ルーム名からルームインスタンスを引くレジストリ。
/// 同じルーム名に対して存在するルームは常に 1 つだけ。
///
/// ## 依存性の逆転（DIP）
///
/// - ドメイン層が必要とするインターフェースをドメイン層自身が定義
/// - Infrastructure 層がドメイン層のインターフェースに依存
/// - UseCase 層はこの trait に依存し、具体的な実装には依存しない
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// ルームを取得し、存在しなければ空の履歴で作成する
    async fn get_or_create(&self, name: &RoomName) -> SharedRoom;

    /// 既存のルームを取得（作成はしない）
    async fn find(&self, name: &RoomName) -> Option<SharedRoom>;

    /// 全ルームを名前順で取得
    async fn list(&self) -> Vec<SharedRoom>;
}
