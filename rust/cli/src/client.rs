//! Line-based match client.
//!
//! Frames arrive from the server delimited by start/end marker lines and are
//! shown whole. Terminal input is forwarded to the server by a second task,
//! so typing never waits on the network and frames never wait on typing.

use crate::error::CliError;
use crate::ui;
use coexist_engine::frame::{FrameScanner, is_game_over_frame};
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// How a client session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientOutcome {
    /// A frame announcing the end of the match was shown
    GameOver,
    /// The server stream ended first
    ServerClosed,
}

/// Reassembles complete frames from a server stream.
#[derive(Debug)]
pub struct FrameReader<R> {
    reader: R,
    scanner: FrameScanner,
    buf: Vec<u8>,
}

impl<R> FrameReader<R>
where
    R: AsyncBufRead + Unpin,
{
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            scanner: FrameScanner::new(),
            buf: Vec::new(),
        }
    }

    /// Next complete frame, or `None` at end of stream. A frame cut off by
    /// the end of the stream is discarded.
    pub async fn next_frame(&mut self) -> io::Result<Option<String>> {
        loop {
            self.buf.clear();
            let n = self.reader.read_until(b'\n', &mut self.buf).await?;
            if n == 0 {
                if self.scanner.in_frame() {
                    tracing::debug!("stream ended inside a frame, dropping it");
                    self.scanner.reset();
                }
                return Ok(None);
            }
            let line = String::from_utf8_lossy(&self.buf);
            if let Some(frame) = self.scanner.push_line(&line) {
                return Ok(Some(frame));
            }
        }
    }
}

/// Plays one match: shows every frame from `reader` on `out` and forwards
/// each non-blank `input` line to `writer`. Returns once a game-over frame
/// has been shown or the server closes the stream.
pub async fn run_client<R, W, I>(
    reader: R,
    writer: W,
    input: I,
    out: &mut dyn Write,
    clear_screen: bool,
) -> Result<ClientOutcome, CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
    I: AsyncBufRead + Unpin + Send + 'static,
{
    let forwarder = tokio::spawn(async move {
        if let Err(err) = forward_input(input, writer).await {
            tracing::debug!(error = %err, "input forwarding stopped");
        }
    });

    let mut frames = FrameReader::new(reader);
    let result = show_frames(&mut frames, out, clear_screen).await;
    forwarder.abort();
    result
}

async fn show_frames<R>(
    frames: &mut FrameReader<R>,
    out: &mut dyn Write,
    clear_screen: bool,
) -> Result<ClientOutcome, CliError>
where
    R: AsyncBufRead + Unpin,
{
    while let Some(frame) = frames.next_frame().await? {
        if clear_screen {
            out.write_all(ui::CLEAR_SCREEN.as_bytes())?;
        }
        out.write_all(frame.as_bytes())?;
        if is_game_over_frame(&frame) {
            out.flush()?;
            return Ok(ClientOutcome::GameOver);
        }
        out.write_all(ui::MOVE_PROMPT.as_bytes())?;
        out.flush()?;
    }
    Ok(ClientOutcome::ServerClosed)
}

/// Copies trimmed, non-blank lines to the server. When input runs out the
/// write half is shut down so the server sees this player leave.
async fn forward_input<I, W>(input: I, mut writer: W) -> io::Result<()>
where
    I: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = line.trim();
        if command.is_empty() {
            continue;
        }
        writer.write_all(command.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    writer.shutdown().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use coexist_engine::game::MatchState;
    use coexist_engine::player::Player;
    use tokio::io::{AsyncReadExt, BufReader, duplex};

    #[tokio::test]
    async fn reader_skips_noise_and_drops_truncated_frame() {
        let frame = MatchState::new(Some(4)).generate_frame(Player::One);
        let mut partial: Vec<&str> = frame.lines().take(5).collect();
        partial.push("");
        let stream = format!("Connected to server.\n{frame}\n{}", partial.join("\n"));

        let mut reader = FrameReader::new(stream.as_bytes());
        assert_eq!(reader.next_frame().await.unwrap(), Some(frame));
        assert_eq!(reader.next_frame().await.unwrap(), None);
        assert_eq!(reader.next_frame().await.unwrap(), None);
    }

    #[tokio::test]
    async fn forwards_trimmed_non_blank_lines_then_closes() {
        let (writer, mut server) = duplex(1024);
        let input: &'static [u8] = b"  ab \n\n   \nPS\n";
        forward_input(input, writer).await.unwrap();

        let mut sent = String::new();
        server.read_to_string(&mut sent).await.unwrap();
        assert_eq!(sent, "ab\nPS\n");
    }

    #[tokio::test]
    async fn stops_at_game_over_frame() {
        let mut state = MatchState::new(Some(6));
        let opening = state.generate_frame(Player::One);
        for _ in 0..8 {
            state.process_command("PS");
        }
        let over = state.generate_frame(Player::One);
        let stream = format!("{opening}\n{over}\n{opening}\n");

        let (writer, _server) = duplex(1024);
        let input: &'static [u8] = b"";
        let mut out = Vec::new();
        let outcome = run_client(
            BufReader::new(stream.as_bytes()),
            writer,
            input,
            &mut out,
            true,
        )
        .await
        .unwrap();

        assert_eq!(outcome, ClientOutcome::GameOver);
        let shown = String::from_utf8(out).unwrap();
        assert_eq!(shown.matches(ui::CLEAR_SCREEN).count(), 2);
        assert_eq!(shown.matches(ui::MOVE_PROMPT).count(), 1);
        assert!(shown.ends_with(&over));
    }

    #[tokio::test]
    async fn reports_server_close() {
        let (writer, _server) = duplex(1024);
        let input: &'static [u8] = b"";
        let mut out = Vec::new();
        let outcome = run_client(&b""[..], writer, input, &mut out, false)
            .await
            .unwrap();
        assert_eq!(outcome, ClientOutcome::ServerClosed);
        assert!(out.is_empty());
    }
}
