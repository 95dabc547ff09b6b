//! Domain entities: chat messages, the rolling history and the room itself.
//!
//! `Room` is plain data plus the relay operations. It is never shared
//! directly; callers reach it through a [`SharedRoom`](super::SharedRoom),
//! which is the room's single exclusion domain.

use std::collections::VecDeque;

use super::{ConnectionId, MessagePushError, MessagePusher, RoomName, Timestamp};

/// Number of messages a room keeps for newly joined members.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Kind of a message exchanged with clients.
///
/// The `history` envelope is a wire-level construct and has no entity here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Chat,
    System,
}

/// A single chat message as received by the relay.
///
/// Sender and content are untrusted and stored verbatim. The timestamp is
/// assigned by the producer and only used for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub kind: MessageKind,
    pub sender: String,
    pub content: String,
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn new(kind: MessageKind, sender: String, content: String, timestamp: Timestamp) -> Self {
        Self {
            kind,
            sender,
            content,
            timestamp,
        }
    }

    pub fn chat(sender: impl Into<String>, content: impl Into<String>, timestamp: Timestamp) -> Self {
        Self::new(MessageKind::Chat, sender.into(), content.into(), timestamp)
    }
}

/// Bounded FIFO log of the most recent messages, oldest first.
#[derive(Debug, Clone)]
pub struct RoomHistory {
    messages: VecDeque<ChatMessage>,
    capacity: usize,
}

impl RoomHistory {
    /// Create an empty history. A capacity of zero is raised to one so the
    /// newest message is always retained.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append, then evict from the front until within capacity.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push_back(message);
        while self.messages.len() > self.capacity {
            self.messages.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    /// Copy of the stored messages, oldest first.
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.messages.iter().cloned().collect()
    }
}

impl Default for RoomHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

/// One live session attached to a room.
///
/// Liveness is one-way: once a push fails the connection is dead and the
/// room drops it.
pub struct ClientConnection {
    pub id: ConnectionId,
    pub connected_at: Timestamp,
    alive: bool,
    pusher: Box<dyn MessagePusher>,
}

impl ClientConnection {
    pub fn new(id: ConnectionId, pusher: Box<dyn MessagePusher>, connected_at: Timestamp) -> Self {
        Self {
            id,
            connected_at,
            alive: true,
            pusher,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    fn send(&mut self, payload: &str) -> Result<(), MessagePushError> {
        if !self.alive {
            return Err(MessagePushError::ChannelClosed(self.id.to_string()));
        }
        let result = self.pusher.push(payload);
        if result.is_err() {
            self.alive = false;
        }
        result
    }
}

impl std::fmt::Debug for ClientConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConnection")
            .field("id", &self.id)
            .field("connected_at", &self.connected_at)
            .field("alive", &self.alive)
            .finish_non_exhaustive()
    }
}

/// Result of one broadcast pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Members the payload was handed to
    pub delivered: Vec<ConnectionId>,
    /// Members whose push failed and which were removed from the room
    pub dropped: Vec<ConnectionId>,
}

/// Read-only copy of a room's state, safe to hold outside the room lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub name: RoomName,
    pub created_at: Timestamp,
    pub members: Vec<(ConnectionId, Timestamp)>,
    pub history: Vec<ChatMessage>,
}

/// A chat room: live membership and rolling history.
#[derive(Debug)]
pub struct Room {
    pub name: RoomName,
    pub created_at: Timestamp,
    members: Vec<ClientConnection>,
    history: RoomHistory,
}

impl Room {
    pub fn new(name: RoomName, created_at: Timestamp) -> Self {
        Self::with_capacity(name, created_at, DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_capacity(name: RoomName, created_at: Timestamp, history_capacity: usize) -> Self {
        Self {
            name,
            created_at,
            members: Vec::new(),
            history: RoomHistory::with_capacity(history_capacity),
        }
    }

    /// Add a connection and return the history it must be sent, oldest first.
    ///
    /// Joins are silent: no other member is notified.
    pub fn accept(&mut self, connection: ClientConnection) -> Vec<ChatMessage> {
        self.members.push(connection);
        self.history.snapshot()
    }

    /// Push a payload to a single member. A failed push removes the member.
    pub fn push_to(&mut self, id: &ConnectionId, payload: &str) -> Result<(), MessagePushError> {
        let Some(index) = self.members.iter().position(|c| &c.id == id) else {
            return Err(MessagePushError::ConnectionNotFound(id.to_string()));
        };

        let result = self.members[index].send(payload);
        if result.is_err() {
            self.members.remove(index);
        }
        result
    }

    /// Append a message to the history.
    pub fn ingest(&mut self, message: ChatMessage) {
        self.history.push(message);
    }

    /// Push a payload to every current member, including the sender.
    ///
    /// Failed members are collected during the pass and removed after it, so a
    /// failure never affects delivery to the others.
    pub fn broadcast(&mut self, payload: &str) -> BroadcastReport {
        let mut report = BroadcastReport::default();

        for connection in self.members.iter_mut() {
            match connection.send(payload) {
                Ok(()) => report.delivered.push(connection.id),
                Err(_) => report.dropped.push(connection.id),
            }
        }

        if !report.dropped.is_empty() {
            self.members.retain(|c| c.is_alive());
        }

        report
    }

    /// Remove a member. Returns `false` if it was already gone.
    pub fn disconnect(&mut self, id: &ConnectionId) -> bool {
        let before = self.members.len();
        self.members.retain(|c| &c.id != id);
        self.members.len() != before
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.members.iter().any(|c| &c.id == id)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn member_ids(&self) -> Vec<ConnectionId> {
        self.members.iter().map(|c| c.id).collect()
    }

    pub fn history(&self) -> &RoomHistory {
        &self.history
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            name: self.name.clone(),
            created_at: self.created_at,
            members: self
                .members
                .iter()
                .map(|c| (c.id, c.connected_at))
                .collect(),
            history: self.history.snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::message_pusher::MockMessagePusher;

    fn message(n: usize) -> ChatMessage {
        ChatMessage::chat("alice", format!("message {}", n), Timestamp::new(n as i64))
    }

    fn ok_pusher(times: usize) -> Box<dyn MessagePusher> {
        let mut pusher = MockMessagePusher::new();
        pusher.expect_push().times(times).returning(|_| Ok(()));
        Box::new(pusher)
    }

    fn failing_pusher() -> Box<dyn MessagePusher> {
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_push()
            .times(1)
            .returning(|_| Err(MessagePushError::ChannelClosed("closed".to_string())));
        Box::new(pusher)
    }

    fn connection(pusher: Box<dyn MessagePusher>) -> ClientConnection {
        ClientConnection::new(ConnectionId::generate(), pusher, Timestamp::new(0))
    }

    fn test_room() -> Room {
        Room::new(RoomName::global(), Timestamp::new(0))
    }

    #[test]
    fn test_history_keeps_everything_under_capacity() {
        // テスト項目: 容量未満の追加ではすべてのメッセージが到着順に保持される
        // given (前提条件):
        let mut history = RoomHistory::with_capacity(100);

        // when (操作):
        for n in 0..42 {
            history.push(message(n));
        }

        // then (期待する結果):
        assert_eq!(history.len(), 42);
        let expected: Vec<ChatMessage> = (0..42).map(message).collect();
        assert_eq!(history.snapshot(), expected);
    }

    #[test]
    fn test_history_evicts_oldest_first() {
        // テスト項目: 101 件追加すると最古の 1 件が捨てられ、残りは順序を保つ
        // given (前提条件):
        let mut history = RoomHistory::default();

        // when (操作):
        for n in 1..=101 {
            history.push(message(n));
        }

        // then (期待する結果):
        assert_eq!(history.len(), DEFAULT_HISTORY_CAPACITY);
        let expected: Vec<ChatMessage> = (2..=101).map(message).collect();
        assert_eq!(history.snapshot(), expected);
    }

    #[test]
    fn test_history_bound_holds_for_many_lengths() {
        // テスト項目: N 件追加後の履歴長は min(N, 容量) で、内容は末尾の min(N, 容量) 件
        // given (前提条件):
        let capacity = 5;

        for total in [0, 1, 4, 5, 6, 17] {
            let mut history = RoomHistory::with_capacity(capacity);

            // when (操作):
            for n in 0..total {
                history.push(message(n));
            }

            // then (期待する結果):
            let kept = total.min(capacity);
            assert_eq!(history.len(), kept);
            let expected: Vec<ChatMessage> = (total - kept..total).map(message).collect();
            assert_eq!(history.snapshot(), expected);
        }
    }

    #[test]
    fn test_history_zero_capacity_still_keeps_newest() {
        // テスト項目: 容量 0 を指定しても最新のメッセージは保持される
        // given (前提条件):
        let mut history = RoomHistory::with_capacity(0);

        // when (操作):
        history.push(message(1));
        history.push(message(2));

        // then (期待する結果):
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.snapshot(), vec![message(2)]);
    }

    #[test]
    fn test_accept_returns_history_and_adds_member() {
        // テスト項目: 接続受付で現在の履歴が返され、メンバーが 1 人増える
        // given (前提条件):
        let mut room = test_room();
        room.ingest(message(1));
        room.ingest(message(2));
        let conn = connection(ok_pusher(0));
        let id = conn.id;

        // when (操作):
        let history = room.accept(conn);

        // then (期待する結果):
        assert_eq!(history, vec![message(1), message(2)]);
        assert_eq!(room.member_count(), 1);
        assert!(room.contains(&id));
    }

    #[test]
    fn test_broadcast_reaches_every_member_including_sender() {
        // テスト項目: ブロードキャストは送信者を含む全メンバーにちょうど 1 回届く
        // given (前提条件):
        let mut room = test_room();
        let a = connection(ok_pusher(1));
        let b = connection(ok_pusher(1));
        let (a_id, b_id) = (a.id, b.id);
        room.accept(a);
        room.accept(b);

        // when (操作):
        let report = room.broadcast("payload");

        // then (期待する結果):
        assert_eq!(report.delivered, vec![a_id, b_id]);
        assert!(report.dropped.is_empty());
        assert_eq!(room.member_count(), 2);
    }

    #[test]
    fn test_broadcast_drops_failed_member_without_disturbing_others() {
        // テスト項目: 送信に失敗したメンバーだけが外され、他のメンバーには配信される
        // given (前提条件):
        let mut room = test_room();
        let a = connection(ok_pusher(2));
        let dead = connection(failing_pusher());
        let c = connection(ok_pusher(2));
        let (a_id, dead_id, c_id) = (a.id, dead.id, c.id);
        room.accept(a);
        room.accept(dead);
        room.accept(c);

        // when (操作):
        let first = room.broadcast("first");
        let second = room.broadcast("second");

        // then (期待する結果):
        assert_eq!(first.delivered, vec![a_id, c_id]);
        assert_eq!(first.dropped, vec![dead_id]);
        assert!(!room.contains(&dead_id));
        assert_eq!(second.delivered, vec![a_id, c_id]);
        assert!(second.dropped.is_empty());
    }

    #[test]
    fn test_broadcast_in_empty_room() {
        // テスト項目: メンバー 0 人のブロードキャストはエラーにならない
        // given (前提条件):
        let mut room = test_room();

        // when (操作):
        let report = room.broadcast("payload");

        // then (期待する結果):
        assert_eq!(report, BroadcastReport::default());
    }

    #[test]
    fn test_push_to_failure_removes_member() {
        // テスト項目: 個別送信に失敗した接続はルームから外される
        // given (前提条件):
        let mut room = test_room();
        let dead = connection(failing_pusher());
        let dead_id = dead.id;
        room.accept(dead);

        // when (操作):
        let result = room.push_to(&dead_id, "history");

        // then (期待する結果):
        assert!(matches!(result, Err(MessagePushError::ChannelClosed(_))));
        assert_eq!(room.member_count(), 0);
    }

    #[test]
    fn test_push_to_unknown_connection() {
        // テスト項目: 存在しない接続への個別送信は ConnectionNotFound になる
        // given (前提条件):
        let mut room = test_room();

        // when (操作):
        let result = room.push_to(&ConnectionId::generate(), "payload");

        // then (期待する結果):
        assert!(matches!(result, Err(MessagePushError::ConnectionNotFound(_))));
    }

    #[test]
    fn test_disconnect_is_idempotent() {
        // テスト項目: 切断は冪等で、2 回目は何もしない
        // given (前提条件):
        let mut room = test_room();
        let conn = connection(ok_pusher(0));
        let id = conn.id;
        room.accept(conn);

        // when (操作):
        let first = room.disconnect(&id);
        let second = room.disconnect(&id);

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert_eq!(room.member_count(), 0);
    }

    #[test]
    fn test_snapshot_copies_members_and_history() {
        // テスト項目: スナップショットにメンバーと履歴がコピーされる
        // given (前提条件):
        let mut room = test_room();
        let conn = ClientConnection::new(ConnectionId::generate(), ok_pusher(0), Timestamp::new(7));
        let id = conn.id;
        room.accept(conn);
        room.ingest(message(1));

        // when (操作):
        let snapshot = room.snapshot();

        // then (期待する結果):
        assert_eq!(snapshot.name, RoomName::global());
        assert_eq!(snapshot.members, vec![(id, Timestamp::new(7))]);
        assert_eq!(snapshot.history, vec![message(1)]);
    }
}
