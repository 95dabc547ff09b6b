//! Server state shared by all handlers.

use std::sync::Arc;

use crate::{
    domain::RoomName,
    usecase::{
        AcceptConnectionUseCase, GetRoomDetailUseCase, GetRoomsUseCase, HandleDisconnectUseCase,
        IngestMessageUseCase,
    },
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Room served by `/api/game_chat_ws`
    pub default_room: RoomName,
    /// Payloads that may wait for one connection before it is dropped as stalled
    pub outbound_queue_capacity: usize,
    /// AcceptConnectionUseCase（接続受付のユースケース）
    pub accept_connection_usecase: Arc<AcceptConnectionUseCase>,
    /// IngestMessageUseCase（メッセージ取り込みのユースケース）
    pub ingest_message_usecase: Arc<IngestMessageUseCase>,
    /// HandleDisconnectUseCase（切断のユースケース）
    pub handle_disconnect_usecase: Arc<HandleDisconnectUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}
