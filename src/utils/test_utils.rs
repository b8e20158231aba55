use crate::core::app::{App, SessionContext, UiState};
use crate::core::app::{AppActionContext, AppCommand};
use crate::core::config::Config;
use crate::core::message::Message;
use crate::ui::theme::Theme;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub const TEST_TERM_WIDTH: u16 = 80;
pub const TEST_TERM_HEIGHT: u16 = 24;

pub fn create_test_app() -> App {
    let session = SessionContext::new(
        reqwest::Client::new(),
        "http://127.0.0.1:9".to_string(),
        &Config::default(),
        None,
    );

    App {
        session,
        ui: UiState::new(Theme::dark_default()),
    }
}

pub fn default_ctx() -> AppActionContext {
    AppActionContext {
        term_width: TEST_TERM_WIDTH,
        term_height: TEST_TERM_HEIGHT,
    }
}

pub fn create_test_messages() -> Vec<Message> {
    vec![
        Message::user("Hello"),
        Message::assistant("Hi there!"),
        Message::user("How are you?"),
        Message::assistant("I'm doing well, thank you for asking!"),
    ]
}

/// Unwrap a spawn command and return the stream id it was issued for.
pub fn expect_spawned_stream(command: Option<AppCommand>) -> u64 {
    match command {
        Some(AppCommand::SpawnStream(params)) => params.stream_id,
        _ => panic!("expected a stream to be spawned"),
    }
}

async fn read_request_head(stream: &mut TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 1024];
    while !buffer.windows(4).any(|window| window == b"\r\n\r\n") {
        let read = stream.read(&mut chunk).await.expect("request read");
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Accept one connection, answer it with a chunked body (one write per
/// chunk, 20ms apart), and return the request line.
pub async fn serve_once(
    listener: TcpListener,
    status_line: &'static str,
    chunks: Vec<&'static str>,
) -> String {
    let (mut stream, _) = listener.accept().await.expect("accept");
    let head = read_request_head(&mut stream).await;

    let headers = format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: text/plain; charset=utf-8\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n"
    );
    stream.write_all(headers.as_bytes()).await.expect("write");
    stream.flush().await.expect("flush");

    for chunk in chunks {
        let framed = format!("{:X}\r\n{}\r\n", chunk.len(), chunk);
        stream.write_all(framed.as_bytes()).await.expect("write");
        stream.flush().await.expect("flush");
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    stream.write_all(b"0\r\n\r\n").await.expect("write");
    stream.flush().await.expect("flush");

    head.lines().next().unwrap_or_default().to_string()
}


/// Accept one connection, send the headers and a single body chunk, then
/// close the socket without the terminating zero-length chunk.
pub async fn serve_truncated(listener: TcpListener, chunk: &'static str) {
    let (mut stream, _) = listener.accept().await.expect("accept");
    read_request_head(&mut stream).await;

    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain; charset=utf-8\r\nTransfer-Encoding: chunked\r\n\r\n{:X}\r\n{}\r\n",
        chunk.len(),
        chunk
    );
    stream.write_all(response.as_bytes()).await.expect("write");
    stream.flush().await.expect("flush");
    tokio::time::sleep(Duration::from_millis(50)).await;
    let _ = stream.shutdown().await;
}
