//! Review service client using reqwest

use bookrev_core::{Config, Session};
use reqwest::{RequestBuilder, Response};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{Error, Result};

/// Error body shape used by the review service
#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the review service
///
/// Holds the base URL and the bearer token for the current session. The
/// token is attached to every request when present; unauthenticated
/// clients can still issue requests the server allows without one.
pub struct ReviewClient {
    pub(crate) http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ReviewClient {
    /// Create a client for the configured service with an injected
    /// session
    ///
    /// The session is resolved once at startup and passed in; the client
    /// never reads ambient stored state itself.
    pub fn for_session(config: &Config, session: Option<&Session>) -> Self {
        Self::with_token(&config.api.base_url, session.map(|s| s.token.clone()))
    }

    /// Create a client with an explicit token (or none)
    pub fn with_token(base_url: &str, token: Option<String>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        info!(base_url = %base_url, authenticated = token.is_some(), "Created review client");

        Self {
            http: reqwest::Client::new(),
            base_url,
            token,
        }
    }

    /// Base URL of the review service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether this client carries a bearer token
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Build a full endpoint URL from a path like `/api/reviews`
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Public URL for a stored review image
    pub fn image_url(&self, filename: &str) -> String {
        format!("{}/public/images/{}", self.base_url, filename)
    }

    /// Attach the bearer token when present
    pub(crate) fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Turn a non-success response into an error, surfacing the
    /// server-supplied message when one was sent
    pub(crate) async fn check_response(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ApiMessage>().await {
            Ok(body) => body.message,
            Err(_) => None,
        };
        let message =
            message.unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());

        debug!(status = %status, message = %message, "Review service returned an error");

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Auth(message));
        }

        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl std::fmt::Debug for ReviewClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = ReviewClient::with_token("http://localhost:5000/", None);
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(
            client.endpoint("/api/reviews"),
            "http://localhost:5000/api/reviews"
        );
    }

    #[test]
    fn test_image_url() {
        let client = ReviewClient::with_token("http://localhost:5000", None);
        assert_eq!(
            client.image_url("dune.jpg"),
            "http://localhost:5000/public/images/dune.jpg"
        );
    }

    #[test]
    fn test_authenticated_flag() {
        let client = ReviewClient::with_token("http://localhost:5000", Some("abc".to_string()));
        assert!(client.is_authenticated());
        let client = ReviewClient::with_token("http://localhost:5000", None);
        assert!(!client.is_authenticated());
    }
}
