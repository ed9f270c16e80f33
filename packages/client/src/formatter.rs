//! Message formatting utilities for client display.

use snakk_server::domain::{ChatEvent, Color};
use snakk_shared::time::format_clock_time;

const ANSI_GREEN: &str = "\x1b[32m";
const ANSI_RED: &str = "\x1b[31m";
const ANSI_RESET: &str = "\x1b[0m";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a chat event as `[HH:MM] author message`, coloured by the
    /// event colour
    pub fn format_event(event: &ChatEvent) -> String {
        let line = format!(
            "[{}] {} {}",
            format_clock_time(event.timestamp),
            event.author,
            event.message
        );
        format!("\r{}\n", Self::paint(event.color, &line))
    }

    /// Parse a text frame and format it; frames that are not chat events
    /// are shown verbatim
    pub fn format_frame(text: &str) -> String {
        match serde_json::from_str::<ChatEvent>(text) {
            Ok(event) => Self::format_event(&event),
            Err(_) => Self::format_raw_message(text),
        }
    }

    pub fn format_raw_message(text: &str) -> String {
        format!("\r{}\n", text)
    }

    pub fn format_disconnected() -> String {
        format!("\r{}\n", Self::paint(Color::Red, "server disconnected"))
    }

    fn paint(color: Color, text: &str) -> String {
        match color {
            Color::Default => text.to_string(),
            Color::Green => format!("{}{}{}", ANSI_GREEN, text, ANSI_RESET),
            Color::Red => format!("{}{}{}", ANSI_RED, text, ANSI_RESET),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use snakk_server::domain::Nickname;

    fn sample_time() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 34, 56).unwrap()
    }

    #[test]
    fn test_format_plain_chat_line() {
        // テスト項目: 通常メッセージは色なしで "[HH:MM] author message" 形式になる
        // given (前提条件):
        let nick = Nickname::new("bob").unwrap();
        let event = ChatEvent::chat(&nick, "hello").stamped(sample_time());

        // when (操作):
        let formatted = MessageFormatter::format_event(&event);

        // then (期待する結果):
        let expected = format!("\r[{}] bob hello\n", format_clock_time(sample_time()));
        assert_eq!(formatted, expected);
    }

    #[test]
    fn test_format_coloured_notice() {
        // テスト項目: 色付きのイベントは ANSI エスケープで囲まれる
        // given (前提条件):
        let event = ChatEvent::notice(Color::Red, "Server is shutting down, sorry!")
            .stamped(sample_time());

        // when (操作):
        let formatted = MessageFormatter::format_event(&event);

        // then (期待する結果):
        assert!(formatted.contains(ANSI_RED));
        assert!(formatted.contains("* Server is shutting down, sorry!"));
        assert!(formatted.trim_end().ends_with(ANSI_RESET));
    }

    #[test]
    fn test_format_frame_falls_back_to_raw_text() {
        // テスト項目: JSON でないフレームはそのまま表示される
        let formatted = MessageFormatter::format_frame("not json");
        assert_eq!(formatted, "\rnot json\n");
    }

    #[test]
    fn test_format_frame_parses_wire_json() {
        // テスト項目: サーバーから受信した JSON が解釈されて整形される
        // given (前提条件):
        let frame = r#"{"Color":"green","Meta":true,"TimeStamp":"2024-05-01T12:34:56Z","Author":"**","Message":"Welcome to snakk!","UserNew":0,"UserChange":0,"UserLeft":0,"UserNick":""}"#;

        // when (操作):
        let formatted = MessageFormatter::format_frame(frame);

        // then (期待する結果):
        assert!(formatted.contains(ANSI_GREEN));
        assert!(formatted.contains("** Welcome to snakk!"));
    }

    #[test]
    fn test_format_disconnected_is_red() {
        // テスト項目: 切断メッセージは赤で表示される
        let formatted = MessageFormatter::format_disconnected();
        assert!(formatted.contains(ANSI_RED));
        assert!(formatted.contains("server disconnected"));
    }
}
