//! Blocking JSON-over-HTTP GET requests shared by the GitHub resolver and the registry client.

use std::time::Duration;

use reqwest::{StatusCode, Url, blocking::Client, header};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// Per-request timeout used unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Errors encountered while performing a request.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HttpError {
    /// The base URL cannot have path segments appended to it.
    #[error("invalid base url '{0}'")]
    InvalidUrl(String),

    /// The HTTP client could not be constructed.
    #[error("build http client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request could not be sent or no response arrived in time.
    #[error("request '{url}': {source}")]
    Request {
        /// The requested URL.
        url: String,

        /// The underlying transport error.
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("request '{url}' returned status {status}")]
    Status {
        /// The requested URL.
        url: String,

        /// The status code returned.
        status: StatusCode,
    },

    /// The response body was not the expected JSON document.
    #[error("decode response from '{url}': {source}")]
    Decode {
        /// The requested URL.
        url: String,

        /// The underlying decoding error.
        source: reqwest::Error,
    },
}

impl HttpError {
    /// Whether the server reported that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }

    /// The status code returned by the server, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Append `segments` to the path of `base`, percent-encoding each one.
///
/// Segments are taken verbatim, so a `/`, `#` or `?` inside one stays part of it.
pub fn endpoint<'a>(
    base: &str,
    segments: impl IntoIterator<Item = &'a str>,
) -> Result<Url, HttpError> {
    let invalid = || HttpError::InvalidUrl(base.to_string());
    let mut url = Url::parse(base).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|_| invalid())?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Performs GET requests with a fixed timeout and decodes JSON responses.
///
/// The client is cheap to clone and safe to share between threads.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a client whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, HttpError> {
        Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map(|client| Self { client })
            .map_err(HttpError::Client)
    }

    /// GET `url` and decode the response body as JSON.
    ///
    /// When `bearer_token` is provided it is sent in the `Authorization` header.
    /// Any non-2xx status is reported as [`HttpError::Status`].
    pub fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        bearer_token: Option<&str>,
    ) -> Result<T, HttpError> {
        debug!(%url, authenticated = bearer_token.is_some(), "GET");

        let mut request = self
            .client
            .get(url.clone())
            .header(header::ACCEPT, "application/json");
        if let Some(token) = bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(|source| HttpError::Request {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            debug!(%url, %status, "request failed");
            return Err(HttpError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.json().map_err(|source| HttpError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
