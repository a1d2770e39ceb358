use coexist_engine::game::MatchState;
use coexist_engine::units::Unit::{Arrow, Axe, Hammer, Sword};
use coexist_server::{init_test_logging, GameSession, Peer};
use tokio::io::{duplex, AsyncReadExt, AsyncWriteExt, BufReader};

#[tokio::test]
async fn session_logs_commands_and_lifecycle() {
    let logs = init_test_logging();

    let (server_one, mut client_one) = duplex(64 * 1024);
    let (server_two, mut client_two) = duplex(64 * 1024);
    let (r1, w1) = tokio::io::split(server_one);
    let (r2, w2) = tokio::io::split(server_two);

    let state = MatchState::with_boards(
        1,
        [Axe, Hammer, Sword, Arrow, Axe, Hammer],
        [Hammer, Sword, Axe, Arrow, Sword, Axe],
    );
    let session = GameSession::new(
        state,
        Peer::new(BufReader::new(r1), w1),
        Peer::new(BufReader::new(r2), w2),
    );

    // P1 AXE takes HAMMER, P2 sends garbage, then P2 leaves
    client_one.write_all(b"AA\n").await.unwrap();
    client_two.write_all(b"Q\n").await.unwrap();
    client_two.shutdown().await.unwrap();

    let drain = tokio::spawn(async move {
        let mut sink = Vec::new();
        client_one.read_to_end(&mut sink).await.unwrap();
    });
    session.run().await.unwrap();
    drain.await.unwrap();

    assert_eq!(logs.find("session started").len(), 1);

    let applied = logs.find("command applied");
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].field("player"), Some("PLAYER 1"));
    assert_eq!(applied[0].field("command"), Some("AA"));
    assert_eq!(applied[0].field("scored"), Some("true"));

    let rejected = logs.find("command rejected");
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].field("player"), Some("PLAYER 2"));

    let ended = logs.find("peer disconnected");
    assert_eq!(ended.len(), 1);
    assert_eq!(ended[0].field("player"), Some("PLAYER 2"));
}
