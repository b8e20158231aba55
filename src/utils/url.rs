//! URL utilities for consistent URL handling
//!
//! Base URLs come from flags, the environment, or the config file, so they
//! may or may not carry a trailing slash. Endpoints are always joined through
//! these helpers to avoid double slashes.

use crate::core::constants::GENERATE_STREAM_ENDPOINT;

/// Normalize a base URL by removing surrounding whitespace and trailing slashes
///
/// # Examples
///
/// ```
/// use mistral_chat::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://localhost:8000"), "http://localhost:8000");
/// assert_eq!(normalize_base_url("http://localhost:8000/"), "http://localhost:8000");
/// assert_eq!(normalize_base_url(" http://localhost:8000/// "), "http://localhost:8000");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Construct a complete endpoint URL from a base URL and endpoint path
///
/// # Examples
///
/// ```
/// use mistral_chat::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://localhost:8000", "generate-stream"),
///     "http://localhost:8000/generate-stream"
/// );
/// assert_eq!(
///     construct_api_url("http://localhost:8000/api/", "/generate-stream"),
///     "http://localhost:8000/api/generate-stream"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{}/{}", normalized_base, endpoint)
}

/// URL of the streaming generation endpoint, without the query string.
pub fn generate_stream_url(base_url: &str) -> String {
    construct_api_url(base_url, GENERATE_STREAM_ENDPOINT)
}
