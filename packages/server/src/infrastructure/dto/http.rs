//! HTTP response bodies.

use serde::Serialize;

use crate::domain::{ChatEvent, User};

/// `GET /api/room`
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoomSnapshotDto {
    pub users: Vec<User>,
    pub history: Vec<ChatEvent>,
}

/// `GET /.status`
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatusDto {
    pub up_time: String,
    pub clients_connected: usize,
    pub users_online: usize,
    pub history_capacity: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_uses_pascal_case_keys() {
        // テスト項目: ステータスの JSON キーが PascalCase になる
        let status = StatusDto {
            up_time: "1m5s".to_string(),
            clients_connected: 3,
            users_online: 2,
            history_capacity: 50,
        };

        let value = serde_json::to_value(&status).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "UpTime": "1m5s",
                "ClientsConnected": 3,
                "UsersOnline": 2,
                "HistoryCapacity": 50
            })
        );
    }
}
