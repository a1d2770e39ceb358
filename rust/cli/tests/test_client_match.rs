use coexist_cli::{ClientOutcome, run_client, ui};
use coexist_server::{GameServer, ServerConfig};
use std::net::SocketAddr;
use tokio::io::BufReader;
use tokio::net::TcpStream;

/// Connecting one at a time fixes who plays first.
async fn connect_pair(addr: SocketAddr) -> (TcpStream, TcpStream) {
    let first = TcpStream::connect(addr).await.unwrap();
    let second = TcpStream::connect(addr).await.unwrap();
    (first, second)
}

async fn play(stream: TcpStream, input: &'static [u8], out: &mut Vec<u8>) -> ClientOutcome {
    let (read, write) = stream.into_split();
    run_client(BufReader::new(read), write, input, out, false)
        .await
        .unwrap()
}

#[tokio::test]
async fn two_clients_play_to_game_over() {
    let server = GameServer::bind(ServerConfig::for_tests().with_seed(Some(21)))
        .await
        .unwrap();
    let handle = server.start().await.unwrap();
    let (one, two) = connect_pair(handle.address()).await;

    let mut out_one = Vec::new();
    let mut out_two = Vec::new();
    // Blank lines never reach the server
    let (first, second) = tokio::join!(
        play(one, b"PS\n\nps\nPS\n  ps\n", &mut out_one),
        play(two, b"ps\nPS\n\n\nps\nPS\n", &mut out_two),
    );
    assert_eq!(first, ClientOutcome::GameOver);
    assert_eq!(second, ClientOutcome::GameOver);

    for out in [out_one, out_two] {
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("NEW GAME"));
        assert!(shown.contains("NEW ROUND"));
        assert!(shown.trim_end().ends_with("\\----------------------------------------/"));
        assert!(shown.contains("GAME OVER - BOTH PLAYERS LOST"));
        // One prompt per frame before the final one
        assert_eq!(shown.matches(ui::MOVE_PROMPT).count(), 8);
        assert!(!shown.contains(ui::CLEAR_SCREEN));
    }

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn leaving_early_ends_the_match_for_the_opponent() {
    let handle = GameServer::bind(ServerConfig::for_tests())
        .await
        .unwrap()
        .start()
        .await
        .unwrap();
    let (one, two) = connect_pair(handle.address()).await;

    let mut out_one = Vec::new();
    let mut out_two = Vec::new();
    // Player 1 has no input, so its write half closes straight away
    let (first, second) = tokio::join!(
        play(one, b"", &mut out_one),
        play(two, b"PS\n", &mut out_two),
    );
    assert_eq!(first, ClientOutcome::ServerClosed);
    assert_eq!(second, ClientOutcome::ServerClosed);
    assert_eq!(
        String::from_utf8(out_two).unwrap().matches(ui::MOVE_PROMPT).count(),
        1
    );

    handle.shutdown().await.unwrap();
}
