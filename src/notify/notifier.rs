//! Best-effort boot announcement.

use std::time::Duration;

use http::HeaderValue;
use http::header::CONTENT_TYPE;
use serde::Serialize;

use super::{HttpClient, HttpRequest, NotifyError};

/// Message length limit for the `content` field (chat webhooks cap near 2000).
pub const MAX_CONTENT_CHARS: usize = 1900;

/// Response bodies kept in errors are cut to this many characters.
const MAX_ERROR_BODY_CHARS: usize = 300;

/// What happened to an announcement.
///
/// Informational only: a failed announcement never stops bootstrap, and
/// callers are free to discard this value.
#[derive(Debug)]
pub enum NotifyOutcome {
    /// No endpoint configured; nothing was sent.
    Skipped,
    /// The endpoint accepted the message.
    Sent,
    /// Delivery failed; the error has already been logged.
    Failed(NotifyError),
}

impl NotifyOutcome {
    /// Returns `true` if the message was delivered.
    #[must_use]
    pub const fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// JSON payload posted to the webhook.
#[derive(Debug, Serialize)]
struct Announcement<'a> {
    content: &'a str,
}

/// Sends a single liveness message to an optional webhook.
///
/// One attempt, bounded by a timeout, no retries. Every failure is logged
/// and reported as [`NotifyOutcome::Failed`], never as an error.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use whale_boot::notify::{Notifier, ReqwestClient};
///
/// let notifier = Notifier::new(ReqwestClient::new(), None, Duration::from_secs(10));
/// assert!(!notifier.is_enabled());
/// ```
#[derive(Debug)]
pub struct Notifier<H> {
    client: H,
    endpoint: Option<String>,
    timeout: Duration,
}

impl<H: HttpClient> Notifier<H> {
    /// Creates a notifier. A blank endpoint counts as absent.
    #[must_use]
    pub fn new(client: H, endpoint: Option<String>, timeout: Duration) -> Self {
        let endpoint = endpoint
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        Self {
            client,
            endpoint,
            timeout,
        }
    }

    /// Returns `true` if an endpoint is configured.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.endpoint.is_some()
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn client(&self) -> &H {
        &self.client
    }

    /// Posts `message` to the endpoint, if any.
    pub async fn announce(&self, message: &str) -> NotifyOutcome {
        let Some(endpoint) = &self.endpoint else {
            tracing::info!("Boot notification skipped: no webhook configured");
            return NotifyOutcome::Skipped;
        };

        match self.send(endpoint, message).await {
            Ok(()) => {
                tracing::info!("Boot notification sent");
                NotifyOutcome::Sent
            }
            Err(e) => {
                tracing::warn!("Boot notification failed (continuing): {e}");
                NotifyOutcome::Failed(e)
            }
        }
    }

    async fn send(&self, endpoint: &str, message: &str) -> Result<(), NotifyError> {
        let url = url::Url::parse(endpoint).map_err(NotifyError::InvalidEndpoint)?;
        let content = truncate_chars(message, MAX_CONTENT_CHARS);
        let body = serde_json::to_vec(&Announcement { content }).map_err(NotifyError::Encode)?;

        let request = HttpRequest::post(url)
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .with_body(body)
            .with_timeout(self.timeout);

        // Bound the call even if the client ignores the request timeout.
        let response = tokio::time::timeout(self.timeout, self.client.request(request))
            .await
            .map_err(|_| super::HttpError::Timeout)??;

        if response.is_success() {
            return Ok(());
        }

        Err(NotifyError::Status {
            status: response.status,
            body: response
                .body_text()
                .map(|text| truncate_chars(text, MAX_ERROR_BODY_CHARS).to_string()),
        })
    }
}

/// Returns at most `max` characters of `text`, cut on a char boundary.
fn truncate_chars(text: &str, max: usize) -> &str {
    text.char_indices()
        .nth(max)
        .map_or(text, |(index, _)| &text[..index])
}

#[cfg(test)]
#[path = "notifier_tests.rs"]
mod tests;
