//! UseCase 層
//!
//! チャットリレーの各操作（接続受付・メッセージ取り込み・切断）と、
//! HTTP API 向けの参照系ユースケースを提供します。

mod accept_connection;
mod error;
mod get_room_detail;
mod get_rooms;
mod handle_disconnect;
mod ingest_message;

pub use accept_connection::AcceptConnectionUseCase;
pub use error::{AcceptError, GetRoomDetailError, IngestError};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use handle_disconnect::HandleDisconnectUseCase;
pub use ingest_message::IngestMessageUseCase;
