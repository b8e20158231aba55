//! Shared constants used across the application

/// Base URL used when neither the command line, the environment, nor the
/// config file names one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable consulted for the generation server base URL.
pub const BASE_URL_ENV_VAR: &str = "MISTRAL_CHAT_BASE_URL";

/// Environment variable naming a file that receives tracing output.
pub const LOG_FILE_ENV_VAR: &str = "MISTRAL_CHAT_LOG";

/// Endpoint (relative to the base URL) that streams generated text.
pub const GENERATE_STREAM_ENDPOINT: &str = "generate-stream";

/// Query parameter carrying the formatted prompt.
pub const PROMPT_QUERY_PARAM: &str = "prompt";

/// End-of-turn token the server appends to the final chunk.
pub const DEFAULT_END_MARKER: &str = "</s>";

pub const ERROR_TOAST_TITLE: &str = "Some error occurred";
pub const ERROR_TOAST_DESCRIPTION: &str = "Press Ctrl+L to start a new chat session";

/// Space reserved for the loading indicator + margin in the input area.
/// Used both when rendering and when placing the cursor.
pub const INDICATOR_SPACE: u16 = 4;

/// Rows taken by the header bar above the transcript.
pub const HEADER_HEIGHT: u16 = 1;

/// Rows taken by the bordered single-line input box.
pub const INPUT_AREA_HEIGHT: u16 = 3;
