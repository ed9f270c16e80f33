//! End-to-end chat tests over real WebSocket connections.

mod fixtures;

use std::time::Duration;

use fixtures::{TestClient, TestServer};
use snakk_server::domain::{
    Color,
    command::{MSG_NICK_REQUIRED, MSG_NICK_TAKEN},
};

const QUIET: Duration = Duration::from_millis(200);

#[tokio::test]
async fn test_new_connection_receives_welcome() {
    // テスト項目: 接続直後に 2 行のウェルカムメッセージが届く
    // given (前提条件):
    let server = TestServer::start(10).await;

    // when (操作):
    let mut client = TestClient::connect_raw(&server).await;

    // then (期待する結果):
    let first = client.recv().await;
    let second = client.recv().await;
    assert_eq!(first.message, "Welcome to snakk!");
    assert_eq!(
        second.message,
        "Enter your nickname with /nick <name> to join the chat."
    );
    assert_eq!(first.color, Color::Green);
    assert!(first.meta);
}

#[tokio::test]
async fn test_message_without_nickname_is_rejected() {
    // テスト項目: ニックネーム未設定のメッセージは本人だけにエラーが返る
    // given (前提条件):
    let server = TestServer::start(10).await;
    let mut anon = TestClient::connect(&server).await;
    let mut bob = TestClient::join(&server, "bob").await;

    // when (操作):
    anon.send("hello").await;

    // then (期待する結果):
    let reply = anon.recv().await;
    assert_eq!(reply.message, MSG_NICK_REQUIRED);
    assert_eq!(reply.color, Color::Red);
    assert!(bob.try_recv(QUIET).await.is_none());
}

#[tokio::test]
async fn test_join_and_broadcast() {
    // テスト項目: 参加通知と通常メッセージが全員に配信される
    // given (前提条件):
    let server = TestServer::start(10).await;
    let mut alice = TestClient::join(&server, "alice").await;

    // when (操作):
    let mut bob = TestClient::join(&server, "bob").await;
    bob.send("hello").await;

    // then (期待する結果):
    let joined = alice.recv().await;
    assert_eq!(joined.message, "bob has joined the chat");
    assert!(joined.user_new.is_some());
    assert_eq!(joined.user_nick.as_ref().map(|n| n.as_str()), Some("bob"));

    for client in [&mut alice, &mut bob] {
        let event = client.recv().await;
        assert_eq!(event.author, "bob");
        assert_eq!(event.message, "hello");
        assert!(!event.meta);
    }
}

#[tokio::test]
async fn test_duplicate_nickname_is_rejected() {
    // テスト項目: 使用中のニックネームは取得できない
    // given (前提条件):
    let server = TestServer::start(10).await;
    let _alice = TestClient::join(&server, "alice").await;
    let mut other = TestClient::connect(&server).await;

    // when (操作):
    other.send("/nick alice").await;

    // then (期待する結果):
    assert_eq!(other.recv().await.message, MSG_NICK_TAKEN);
}

#[tokio::test]
async fn test_me_and_help_commands() {
    // テスト項目: /me は全員に、/help は本人だけに届く
    // given (前提条件):
    let server = TestServer::start(10).await;
    let mut alice = TestClient::join(&server, "alice").await;
    let mut bob = TestClient::join(&server, "bob").await;
    alice.recv().await; // bob has joined

    // when (操作):
    bob.send("/me waves").await;
    bob.send("/help nick").await;

    // then (期待する結果):
    assert_eq!(alice.recv().await.message, "bob waves");
    assert_eq!(bob.recv().await.message, "bob waves");
    assert_eq!(
        bob.recv().await.message,
        "'/nick <nickname>', sets your nickname."
    );
    assert!(alice.try_recv(QUIET).await.is_none());
}

#[tokio::test]
async fn test_binary_utf8_frames_are_accepted() {
    // テスト項目: UTF-8 のバイナリフレームはテキストとして扱われ、不正なバイト列は無視される
    // given (前提条件):
    let server = TestServer::start(10).await;
    let mut alice = TestClient::join(&server, "alice").await;

    // when (操作):
    alice.send_binary(vec![0xff, 0xfe]).await;
    alice.send_binary("hej".as_bytes().to_vec()).await;

    // then (期待する結果):
    assert_eq!(alice.recv().await.message, "hej");
}

#[tokio::test]
async fn test_disconnect_announces_left() {
    // テスト項目: ニックネームを持つクライアントの切断で退出通知が届き、ニックネームが解放される
    // given (前提条件):
    let server = TestServer::start(10).await;
    let mut alice = TestClient::join(&server, "alice").await;
    let bob = TestClient::join(&server, "bob").await;
    alice.recv().await; // bob has joined

    // when (操作):
    bob.close().await;

    // then (期待する結果):
    let left = alice.recv().await;
    assert_eq!(left.message, "bob has left the chat");
    assert!(left.user_left.is_some());

    let users = server.coordinator.users().await.unwrap();
    assert_eq!(users.len(), 1);
    let _again = TestClient::join(&server, "bob").await;
}

#[tokio::test]
async fn test_shutdown_notifies_and_closes_connections() {
    // テスト項目: シャットダウン時に通知が届き、接続が閉じられる
    // given (前提条件):
    let server = TestServer::start(10).await;
    let mut alice = TestClient::join(&server, "alice").await;

    // when (操作):
    server.coordinator.shutdown().await.unwrap();

    // then (期待する結果):
    let notice = alice.recv().await;
    assert_eq!(notice.message, "Server is shutting down, sorry!");
    assert_eq!(notice.color, Color::Red);
    alice.expect_closed().await;
}
