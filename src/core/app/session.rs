use std::path::PathBuf;

use reqwest::Client;

use crate::core::chat_stream::StreamParams;
use crate::core::config::Config;
use crate::core::prompt::PromptTemplate;

/// Everything needed to issue generation requests for this session.
pub struct SessionContext {
    pub client: Client,
    pub base_url: String,
    pub prompt_template: PromptTemplate,
    pub end_marker: String,
    /// Config file the theme toggle is persisted to; `None` disables saving.
    pub config_path: Option<PathBuf>,
    pub current_stream_id: u64,
}

impl SessionContext {
    pub fn new(
        client: Client,
        base_url: String,
        config: &Config,
        config_path: Option<PathBuf>,
    ) -> Self {
        Self {
            client,
            base_url,
            prompt_template: config.prompt_template(),
            end_marker: config.end_marker().to_string(),
            config_path,
            current_stream_id: 0,
        }
    }

    /// Allocate the id for a new request. Anything still tagged with an
    /// older id is stale from here on.
    pub fn start_new_stream(&mut self) -> u64 {
        self.current_stream_id += 1;
        self.current_stream_id
    }

    pub fn is_current_stream(&self, stream_id: u64) -> bool {
        stream_id == self.current_stream_id
    }

    pub fn build_stream_params(&self, prompt: String, stream_id: u64) -> StreamParams {
        StreamParams {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            prompt,
            end_marker: self.end_marker.clone(),
            stream_id,
        }
    }
}
