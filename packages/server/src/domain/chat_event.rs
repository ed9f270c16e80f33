//! Chat events delivered to clients and kept in the room history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Nickname, UserId, wire};

/// Author shown on lines addressed to a single connection
pub const DIRECT_AUTHOR: &str = "**";

/// Author shown on room-wide notices
pub const NOTICE_AUTHOR: &str = "*";

/// Display colour of a chat line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    #[default]
    #[serde(rename = "")]
    Default,
    #[serde(rename = "green")]
    Green,
    #[serde(rename = "red")]
    Red,
}

/// One line of chat, either a user message or a meta notice.
///
/// Meta events are delivered live but never stored in the history.
/// The timestamp is set by the coordinator when the event is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChatEvent {
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub meta: bool,
    #[serde(rename = "TimeStamp", default)]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub message: String,
    /// Id of a user who just claimed their first nickname
    #[serde(default, with = "wire::zero_as_none")]
    pub user_new: Option<UserId>,
    /// Id of a user who changed nickname
    #[serde(default, with = "wire::zero_as_none")]
    pub user_change: Option<UserId>,
    /// Id of a user who left
    #[serde(default, with = "wire::zero_as_none")]
    pub user_left: Option<UserId>,
    /// The new or changed nickname
    #[serde(default, with = "wire::empty_as_none")]
    pub user_nick: Option<Nickname>,
}

impl ChatEvent {
    fn base(color: Color, meta: bool, author: &str, message: String) -> Self {
        Self {
            color,
            meta,
            timestamp: DateTime::<Utc>::default(),
            author: author.to_string(),
            message,
            user_new: None,
            user_change: None,
            user_left: None,
            user_nick: None,
        }
    }

    /// A plain chat message from a user; the only kind kept in history
    pub fn chat(author: &Nickname, message: impl Into<String>) -> Self {
        Self::base(Color::Default, false, author.as_str(), message.into())
    }

    /// A meta line addressed to a single connection (command feedback)
    pub fn direct(color: Color, message: impl Into<String>) -> Self {
        Self::base(color, true, DIRECT_AUTHOR, message.into())
    }

    /// A meta line announced to the room (joins, leaves, actions)
    pub fn notice(color: Color, message: impl Into<String>) -> Self {
        Self::base(color, true, NOTICE_AUTHOR, message.into())
    }

    pub fn with_user_new(mut self, id: UserId) -> Self {
        self.user_new = Some(id);
        self
    }

    pub fn with_user_change(mut self, id: UserId) -> Self {
        self.user_change = Some(id);
        self
    }

    pub fn with_user_left(mut self, id: UserId) -> Self {
        self.user_left = Some(id);
        self
    }

    pub fn with_user_nick(mut self, nick: Nickname) -> Self {
        self.user_nick = Some(nick);
        self
    }

    /// Return the event with its timestamp set to `at`
    pub fn stamped(mut self, at: DateTime<Utc>) -> Self {
        self.timestamp = at;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_event_is_not_meta() {
        // テスト項目: 通常のチャットメッセージは meta ではない
        // given (前提条件):
        let bob = Nickname::new("bob").unwrap();

        // when (操作):
        let event = ChatEvent::chat(&bob, "hello");

        // then (期待する結果):
        assert!(!event.meta);
        assert_eq!(event.author, "bob");
        assert_eq!(event.message, "hello");
        assert_eq!(event.color, Color::Default);
    }

    #[test]
    fn test_serialized_event_keeps_zero_valued_fields() {
        // テスト項目: 値のないオプションフィールドも省略されずに JSON に含まれる
        // given (前提条件):
        let at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let event = ChatEvent::direct(Color::Red, "Unknown command.").stamped(at);

        // when (操作):
        let json = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(
            json,
            serde_json::json!({
                "Color": "red",
                "Meta": true,
                "TimeStamp": "2023-11-14T22:13:20Z",
                "Author": "**",
                "Message": "Unknown command.",
                "UserNew": 0,
                "UserChange": 0,
                "UserLeft": 0,
                "UserNick": ""
            })
        );
    }

    #[test]
    fn test_serialized_join_notice_carries_ids() {
        // テスト項目: 参加通知はユーザー ID とニックネームを含む
        // given (前提条件):
        let bob = Nickname::new("bob").unwrap();
        let event = ChatEvent::notice(Color::Green, "bob has joined the chat")
            .with_user_new(UserId::new(3))
            .with_user_nick(bob);

        // when (操作):
        let json = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(json["Color"], "green");
        assert_eq!(json["Author"], "*");
        assert_eq!(json["UserNew"], 3);
        assert_eq!(json["UserChange"], 0);
        assert_eq!(json["UserNick"], "bob");
    }

    #[test]
    fn test_deserialize_reads_zero_as_absent() {
        // テスト項目: クライアント側で 0 と空文字は「なし」として読み込まれる
        // given (前提条件):
        let json = r#"{"Color":"","Meta":false,"TimeStamp":"2023-11-14T22:13:20Z",
            "Author":"bob","Message":"hi","UserNew":0,"UserChange":0,"UserLeft":0,"UserNick":""}"#;

        // when (操作):
        let event: ChatEvent = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(event.color, Color::Default);
        assert_eq!(event.user_new, None);
        assert_eq!(event.user_nick, None);
        assert_eq!(event.author, "bob");
    }
}
