use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
/// Weather page and GitHub calls.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Model completions can take a while to stream out 800 tokens.
pub(crate) const GENERATION_TIMEOUT: Duration = Duration::from_secs(180);

/// Client used by every adapter. GitHub rejects requests without a user agent.
pub(crate) fn client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}

/// Shorten a response body for error messages, on a char boundary.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
