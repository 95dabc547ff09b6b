//! ドメイン層
//!
//! チャットリレーのドメインモデル（値オブジェクト・エンティティ）と、
//! ドメイン層が必要とするインターフェース（Repository, MessagePusher）を定義します。

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{
    BroadcastReport, ChatMessage, ClientConnection, DEFAULT_HISTORY_CAPACITY, MessageKind, Room,
    RoomHistory, RoomSnapshot,
};
pub use error::{MessagePushError, ValueObjectError};
pub use message_pusher::MessagePusher;
pub use repository::{RoomRepository, SharedRoom};
pub use value_object::{ConnectionId, RoomName, Timestamp};
