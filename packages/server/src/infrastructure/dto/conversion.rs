//! Conversion logic between DTOs and domain entities.

use elderscape_shared::time::timestamp_to_rfc3339;

use crate::domain::{
    entity::{self, MessageKind, RoomSnapshot},
    value_object::Timestamp,
};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// DTO → Domain Entity
// ========================================

impl TryFrom<dto::ChatMessage> for entity::ChatMessage {
    type Error = dto::DecodeError;

    fn try_from(dto: dto::ChatMessage) -> Result<Self, Self::Error> {
        let kind = match dto.r#type {
            dto::MessageType::Chat => MessageKind::Chat,
            dto::MessageType::System => MessageKind::System,
            dto::MessageType::History => return Err(dto::DecodeError::HistoryFromClient),
        };

        Ok(Self::new(
            kind,
            dto.sender,
            dto.content,
            Timestamp::new(dto.timestamp),
        ))
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<MessageKind> for dto::MessageType {
    fn from(kind: MessageKind) -> Self {
        match kind {
            MessageKind::Chat => Self::Chat,
            MessageKind::System => Self::System,
        }
    }
}

impl From<entity::ChatMessage> for dto::ChatMessage {
    fn from(model: entity::ChatMessage) -> Self {
        Self {
            r#type: model.kind.into(),
            sender: model.sender,
            content: model.content,
            timestamp: model.timestamp.value(),
        }
    }
}

impl From<&RoomSnapshot> for http::RoomSummaryDto {
    fn from(snapshot: &RoomSnapshot) -> Self {
        Self {
            name: snapshot.name.as_str().to_string(),
            member_count: snapshot.members.len(),
            history_length: snapshot.history.len(),
            created_at: timestamp_to_rfc3339(snapshot.created_at.value()),
        }
    }
}

impl From<RoomSnapshot> for http::RoomDetailDto {
    fn from(snapshot: RoomSnapshot) -> Self {
        Self {
            name: snapshot.name.into_string(),
            created_at: timestamp_to_rfc3339(snapshot.created_at.value()),
            members: snapshot
                .members
                .into_iter()
                .map(|(id, connected_at)| http::MemberDetailDto {
                    connection_id: id.to_string(),
                    connected_at: timestamp_to_rfc3339(connected_at.value()),
                })
                .collect(),
            history: snapshot
                .history
                .into_iter()
                .map(dto::ChatMessage::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionId, RoomName};

    #[test]
    fn test_dto_chat_message_to_domain() {
        // テスト項目: DTO の ChatMessage がドメインエンティティに変換される
        // given (前提条件):
        let dto_msg = dto::ChatMessage {
            r#type: dto::MessageType::Chat,
            sender: "alice".to_string(),
            content: "Hello!".to_string(),
            timestamp: 1000,
        };

        // when (操作):
        let domain_msg = entity::ChatMessage::try_from(dto_msg).unwrap();

        // then (期待する結果):
        assert_eq!(domain_msg.kind, MessageKind::Chat);
        assert_eq!(domain_msg.sender, "alice");
        assert_eq!(domain_msg.content, "Hello!");
        assert_eq!(domain_msg.timestamp, Timestamp::new(1000));
    }

    #[test]
    fn test_domain_system_message_to_dto() {
        // テスト項目: system 種別のドメインエンティティが system の DTO に変換される
        // given (前提条件):
        let domain_msg = entity::ChatMessage::new(
            MessageKind::System,
            "System".to_string(),
            "Server restarting".to_string(),
            Timestamp::new(2000),
        );

        // when (操作):
        let dto_msg: dto::ChatMessage = domain_msg.into();

        // then (期待する結果):
        assert_eq!(dto_msg.r#type, dto::MessageType::System);
        assert_eq!(dto_msg.sender, "System");
        assert_eq!(dto_msg.timestamp, 2000);
    }

    #[test]
    fn test_snapshot_to_room_detail() {
        // テスト項目: ルームのスナップショットが詳細 DTO に変換される
        // given (前提条件):
        let id = ConnectionId::generate();
        let snapshot = RoomSnapshot {
            name: RoomName::global(),
            created_at: Timestamp::new(1672531200000),
            members: vec![(id, Timestamp::new(1672531200000))],
            history: vec![entity::ChatMessage::chat("A", "hello", Timestamp::new(1000))],
        };

        // when (操作):
        let summary = http::RoomSummaryDto::from(&snapshot);
        let detail = http::RoomDetailDto::from(snapshot);

        // then (期待する結果):
        assert_eq!(summary.member_count, 1);
        assert_eq!(summary.history_length, 1);
        assert_eq!(detail.name, "global-game-chat");
        assert!(detail.created_at.starts_with("2023-01-01T00:00:00"));
        assert_eq!(detail.members[0].connection_id, id.to_string());
        assert_eq!(detail.history[0].content, "hello");
    }
}
