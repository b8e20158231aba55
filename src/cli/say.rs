//! TUI-less "say" command

use std::error::Error;
use std::io::{self, Write};

use crate::core::chat_stream::{ChatStreamService, StreamMessage, StreamParams};
use crate::core::config::Config;
use crate::core::message::Message;

pub async fn run_say(
    prompt: Vec<String>,
    base_url: String,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        return Err("Usage: mistral-chat say <PROMPT>".into());
    }

    let params = StreamParams {
        client: reqwest::Client::builder().build()?,
        base_url,
        prompt: config.prompt_template().format(&[Message::user(prompt)]),
        end_marker: config.end_marker().to_string(),
        stream_id: 0,
    };

    let mut stdout = io::stdout();
    stream_to_writer(params, &mut stdout).await?;
    Ok(())
}

/// Stream one reply into `out` chunk by chunk and return the full text.
pub(crate) async fn stream_to_writer<W: Write>(
    params: StreamParams,
    out: &mut W,
) -> Result<String, Box<dyn Error>> {
    let (stream_service, mut rx) = ChatStreamService::new();
    stream_service.spawn_stream(params);
    drop(stream_service);

    let mut full_response = String::new();
    loop {
        match rx.recv().await {
            Some((StreamMessage::Chunk(content), _)) => {
                full_response.push_str(&content);
                write!(out, "{content}")?;
                out.flush()?;
            }
            Some((StreamMessage::Error(err), _)) => {
                writeln!(out)?;
                return Err(err.into());
            }
            Some((StreamMessage::End, _)) | None => {
                writeln!(out)?;
                break;
            }
        }
    }

    Ok(full_response)
}
