use futures_util::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::core::constants::PROMPT_QUERY_PARAM;
use crate::utils::url::generate_stream_url;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StreamMessage {
    Chunk(String),
    Error(String),
    End,
}

/// Turns raw body chunks into display text.
///
/// Bytes are decoded as UTF-8 incrementally: a character whose bytes straddle
/// two network chunks is held back until the rest arrives. When the decoded
/// text of a chunk ends with the end-of-turn marker, that trailing marker is
/// dropped. Markers elsewhere in a chunk are kept as-is.
#[derive(Debug, Clone)]
pub struct StreamDecoder {
    end_marker: String,
    pending: Vec<u8>,
}

impl StreamDecoder {
    pub fn new(end_marker: impl Into<String>) -> Self {
        Self {
            end_marker: end_marker.into(),
            pending: Vec::new(),
        }
    }

    /// Decode one chunk. Returns `None` when nothing displayable remains.
    pub fn decode(&mut self, bytes: &[u8]) -> Option<String> {
        self.pending.extend_from_slice(bytes);
        let text = self.take_complete_text();
        self.publishable(text)
    }

    /// Flush bytes left over from an incomplete trailing character.
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let text = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        self.publishable(text)
    }

    fn take_complete_text(&mut self) -> String {
        let mut out = String::new();
        loop {
            let err = match std::str::from_utf8(&self.pending) {
                Ok(_) => {
                    out.push_str(&String::from_utf8_lossy(&self.pending));
                    self.pending.clear();
                    return out;
                }
                Err(err) => err,
            };

            let valid = err.valid_up_to();
            out.push_str(&String::from_utf8_lossy(&self.pending[..valid]));
            match err.error_len() {
                Some(invalid_len) => {
                    out.push(char::REPLACEMENT_CHARACTER);
                    self.pending.drain(..valid + invalid_len);
                }
                None => {
                    // Incomplete sequence at the end; wait for the next chunk.
                    self.pending.drain(..valid);
                    return out;
                }
            }
        }
    }

    fn publishable(&self, mut text: String) -> Option<String> {
        if !self.end_marker.is_empty() && text.ends_with(&self.end_marker) {
            text.truncate(text.len() - self.end_marker.len());
        }
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

pub struct StreamParams {
    pub client: reqwest::Client,
    pub base_url: String,
    pub prompt: String,
    pub end_marker: String,
    pub stream_id: u64,
}

#[derive(Clone)]
pub struct ChatStreamService {
    tx: mpsc::UnboundedSender<(StreamMessage, u64)>,
}

impl ChatStreamService {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(StreamMessage, u64)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn spawn_stream(&self, params: StreamParams) {
        let tx = self.tx.clone();
        tokio::spawn(run_stream(params, tx));
    }

    #[cfg(test)]
    pub fn send_for_test(&self, message: StreamMessage, stream_id: u64) {
        let _ = self.tx.send((message, stream_id));
    }
}

fn send_failure(tx: &mpsc::UnboundedSender<(StreamMessage, u64)>, stream_id: u64, error: String) {
    warn!(stream_id, %error, "generation stream failed");
    let _ = tx.send((StreamMessage::Error(error), stream_id));
    let _ = tx.send((StreamMessage::End, stream_id));
}

async fn run_stream(params: StreamParams, tx: mpsc::UnboundedSender<(StreamMessage, u64)>) {
    let StreamParams {
        client,
        base_url,
        prompt,
        end_marker,
        stream_id,
    } = params;

    let url = generate_stream_url(&base_url);
    debug!(stream_id, %url, prompt_len = prompt.len(), "starting generation stream");

    let response = match client
        .get(&url)
        .query(&[(PROMPT_QUERY_PARAM, prompt.as_str())])
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            send_failure(&tx, stream_id, format!("Request failed: {e}"));
            return;
        }
    };

    let status = response.status();
    if !status.is_success() {
        send_failure(&tx, stream_id, format!("Server responded with {status}"));
        return;
    }

    let mut decoder = StreamDecoder::new(end_marker);
    let mut stream = response.bytes_stream();
    let mut chunk_count = 0usize;

    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(bytes) => {
                chunk_count += 1;
                if let Some(text) = decoder.decode(&bytes) {
                    if tx.send((StreamMessage::Chunk(text), stream_id)).is_err() {
                        // Receiver gone: the view has shut down.
                        return;
                    }
                }
            }
            Err(e) => {
                send_failure(&tx, stream_id, format!("Stream read failed: {e}"));
                return;
            }
        }
    }

    if let Some(text) = decoder.finish() {
        let _ = tx.send((StreamMessage::Chunk(text), stream_id));
    }

    info!(stream_id, chunk_count, "generation stream finished");
    let _ = tx.send((StreamMessage::End, stream_id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::DEFAULT_END_MARKER;
    use crate::utils::test_utils::{serve_once, serve_truncated};
    use std::time::Duration;
    use tokio::net::TcpListener;

    fn decode_all(decoder: &mut StreamDecoder, chunks: &[&[u8]]) -> Vec<String> {
        chunks
            .iter()
            .filter_map(|chunk| decoder.decode(chunk))
            .collect()
    }

    #[test]
    fn decoder_strips_trailing_end_marker_chunk() {
        let mut decoder = StreamDecoder::new(DEFAULT_END_MARKER);
        let published = decode_all(&mut decoder, &[b"Hel", b"lo", b"</s>"]);
        assert_eq!(published, vec!["Hel".to_string(), "lo".to_string()]);
        assert_eq!(published.concat(), "Hello");
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn decoder_strips_marker_at_end_of_text_chunk() {
        let mut decoder = StreamDecoder::new(DEFAULT_END_MARKER);
        assert_eq!(decoder.decode(b"world.</s>").as_deref(), Some("world."));
    }

    #[test]
    fn decoder_keeps_marker_in_the_middle_of_a_chunk() {
        let mut decoder = StreamDecoder::new(DEFAULT_END_MARKER);
        assert_eq!(
            decoder.decode(b"a </s> b").as_deref(),
            Some("a </s> b")
        );
    }

    #[test]
    fn decoder_removes_only_the_trailing_marker() {
        let mut decoder = StreamDecoder::new(DEFAULT_END_MARKER);
        assert_eq!(decoder.decode(b"a</s>b</s>").as_deref(), Some("a</s>b"));
    }

    #[test]
    fn decoder_holds_back_split_multibyte_characters() {
        let mut decoder = StreamDecoder::new(DEFAULT_END_MARKER);
        let bytes = "caf\u{e9}!".as_bytes();
        // "é" is two bytes; split between them.
        let (head, tail) = bytes.split_at(4);
        assert_eq!(decoder.decode(head).as_deref(), Some("caf"));
        assert_eq!(decoder.decode(tail).as_deref(), Some("\u{e9}!"));
    }

    #[test]
    fn decoder_replaces_invalid_bytes() {
        let mut decoder = StreamDecoder::new(DEFAULT_END_MARKER);
        assert_eq!(
            decoder.decode(&[b'o', 0xFF, b'k']).as_deref(),
            Some("o\u{FFFD}k")
        );
    }

    #[test]
    fn decoder_finish_flushes_incomplete_tail_lossily() {
        let mut decoder = StreamDecoder::new(DEFAULT_END_MARKER);
        assert_eq!(decoder.decode(&[b'x', 0xE2, 0x82]).as_deref(), Some("x"));
        assert_eq!(decoder.finish().as_deref(), Some("\u{FFFD}"));
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn decoder_with_empty_marker_never_strips() {
        let mut decoder = StreamDecoder::new("");
        assert_eq!(decoder.decode(b"</s>").as_deref(), Some("</s>"));
    }

    async fn collect_until_end(
        rx: &mut mpsc::UnboundedReceiver<(StreamMessage, u64)>,
    ) -> Vec<(StreamMessage, u64)> {
        let mut received = Vec::new();
        loop {
            let next = tokio::time::timeout(Duration::from_secs(5), rx.recv())
                .await
                .expect("stream should finish in time")
                .expect("channel should stay open");
            let is_end = next.0 == StreamMessage::End;
            received.push(next);
            if is_end {
                return received;
            }
        }
    }

    fn params_for(base_url: String, prompt: &str, stream_id: u64) -> StreamParams {
        StreamParams {
            client: reqwest::Client::new(),
            base_url,
            prompt: prompt.to_string(),
            end_marker: DEFAULT_END_MARKER.to_string(),
            stream_id,
        }
    }

    #[tokio::test]
    async fn streams_chunks_from_generate_endpoint() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        let server = tokio::spawn(serve_once(listener, "200 OK", vec!["Hel", "lo", "</s>"]));

        let (service, mut rx) = ChatStreamService::new();
        service.spawn_stream(params_for(
            format!("http://{addr}/"),
            "[INST] Hi [/INST]",
            7,
        ));

        let received = collect_until_end(&mut rx).await;
        let request_line = server.await.expect("server task");

        assert!(
            request_line.starts_with("GET /generate-stream?prompt=%5BINST%5D+Hi+%5B%2FINST%5D "),
            "unexpected request line: {request_line}"
        );
        assert!(received.iter().all(|(_, id)| *id == 7));

        let text: String = received
            .iter()
            .filter_map(|(message, _)| match message {
                StreamMessage::Chunk(text) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(text, "Hello");
        assert!(!received
            .iter()
            .any(|(message, _)| matches!(message, StreamMessage::Error(_))));
    }

    #[tokio::test]
    async fn non_success_status_reports_error_then_end() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        let server = tokio::spawn(serve_once(
            listener,
            "500 Internal Server Error",
            vec!["boom"],
        ));

        let (service, mut rx) = ChatStreamService::new();
        service.spawn_stream(params_for(format!("http://{addr}"), "[INST] x [/INST]", 3));

        let received = collect_until_end(&mut rx).await;
        let _ = server.await;

        assert_eq!(received.len(), 2);
        match &received[0].0 {
            StreamMessage::Error(text) => assert!(text.contains("500"), "got {text}"),
            other => panic!("expected error message, got {other:?}"),
        }
        assert_eq!(received[1], (StreamMessage::End, 3));
    }

    #[tokio::test]
    async fn body_cut_off_mid_stream_reports_error_after_partial_chunk() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        let server = tokio::spawn(serve_truncated(listener, "Hel"));

        let (service, mut rx) = ChatStreamService::new();
        service.spawn_stream(params_for(format!("http://{addr}"), "[INST] Hi [/INST]", 5));

        let received = collect_until_end(&mut rx).await;
        let _ = server.await;

        assert_eq!(received.len(), 3, "got {received:?}");
        assert_eq!(received[0], (StreamMessage::Chunk("Hel".to_string()), 5));
        match &received[1].0 {
            StreamMessage::Error(text) => {
                assert!(text.starts_with("Stream read failed"), "got {text}")
            }
            other => panic!("expected error message, got {other:?}"),
        }
        assert_eq!(received[2], (StreamMessage::End, 5));
    }

    #[tokio::test]
    async fn connection_failure_reports_error_then_end() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let (service, mut rx) = ChatStreamService::new();
        service.spawn_stream(params_for(format!("http://{addr}"), "hi", 1));

        let received = collect_until_end(&mut rx).await;
        assert_eq!(received.len(), 2);
        assert!(matches!(received[0].0, StreamMessage::Error(_)));
        assert_eq!(received[1].0, StreamMessage::End);
    }
}
