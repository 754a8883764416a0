//! Transport policy shared by the reqwest feed adapters.
//!
//! Every adapter builds its client here so timeout, identity, and HTTP error
//! mapping stay identical across feeds.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};

use crate::domain::ports::SourceError;

const DEFAULT_USER_AGENT: &str = "horizon-backend/0.1";
const PREVIEW_CHAR_LIMIT: usize = 160;

/// Outbound identity sent with every feed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpIdentity {
    /// HTTP user-agent sent to upstream services.
    pub user_agent: String,
}

impl Default for HttpIdentity {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

/// Build a client with an explicit request timeout and user agent.
pub(crate) fn build_client(
    timeout: Duration,
    identity: &HttpIdentity,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(identity.user_agent.as_str())
        .build()
}

/// Read a response body, turning non-success statuses into source errors.
pub(crate) async fn success_body(response: Response) -> Result<Vec<u8>, SourceError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    Ok(body.to_vec())
}

pub(crate) fn map_transport_error(error: reqwest::Error) -> SourceError {
    if error.is_timeout() {
        SourceError::timeout(error.to_string())
    } else if error.is_decode() {
        SourceError::decode(error.to_string())
    } else {
        SourceError::transport(error.to_string())
    }
}

pub(crate) fn map_status_error(status: StatusCode, body: &[u8]) -> SourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => SourceError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => SourceError::timeout(message),
        _ if status.is_client_error() => SourceError::invalid_request(message),
        _ => SourceError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
