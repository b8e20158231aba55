//! Conversation-to-prompt formatting.
//!
//! The generation server takes a single prompt string, so the transcript is
//! flattened into instruction-tuned turn delimiters before every request.
//! With the default template a transcript renders as:
//!
//! ```text
//! [INST] first question [/INST] first answer </s>[INST] follow-up [/INST]
//! ```

use serde::{Deserialize, Serialize};

use crate::core::message::{Message, TranscriptRole};

/// Delimiters wrapped around each transcript entry.
///
/// Message text is trimmed before wrapping; the delimiters themselves are
/// inserted verbatim, so any spacing belongs in the delimiter strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptTemplate {
    pub user_prefix: String,
    pub user_suffix: String,
    pub assistant_prefix: String,
    pub assistant_suffix: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            user_prefix: "[INST] ".to_string(),
            user_suffix: " [/INST]".to_string(),
            assistant_prefix: " ".to_string(),
            assistant_suffix: " </s>".to_string(),
        }
    }
}

impl PromptTemplate {
    pub fn format(&self, messages: &[Message]) -> String {
        let mut prompt = String::new();
        for message in messages {
            let (prefix, suffix) = match message.role {
                TranscriptRole::User => (&self.user_prefix, &self.user_suffix),
                TranscriptRole::Assistant => (&self.assistant_prefix, &self.assistant_suffix),
            };
            prompt.push_str(prefix);
            prompt.push_str(message.content.trim());
            prompt.push_str(suffix);
        }
        prompt
    }
}

/// Format a transcript with the default template.
pub fn format_prompt(messages: &[Message]) -> String {
    PromptTemplate::default().format(messages)
}
