//! Error types for Chess.com API calls.
//!
//! Transport failures, non-200 responses, body parsing problems and misuse of
//! the response wrapper are all reported through [`Error`]. Errors that carry a
//! response keep the raw body and headers so callers can inspect what the API
//! actually sent.

use crate::rate_limit::RateLimitInfo;
use http::{HeaderMap, StatusCode};

/// The main error type for Chess.com API calls.
///
/// # Examples
///
/// ```no_run
/// use chessdotcom::{CallOptions, Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::new()?;
///
/// match client.get_player_profile("hikaru", CallOptions::default()).await {
///     Ok(response) => println!("{}", response.text()),
///     Err(Error::HttpError { status, raw_response, .. }) => {
///         eprintln!("API error {}: {}", status, raw_response);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A network-level error occurred (connection failed, DNS lookup failed, etc.).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A single attempt took longer than the per-attempt timeout.
    #[error("Request timed out")]
    Timeout,

    /// The API answered with a status other than 200 and no retry is left.
    ///
    /// # Fields
    ///
    /// * `status` - The HTTP status code
    /// * `raw_response` - The raw response body
    /// * `headers` - The response headers
    /// * `rate_limit_info` - Parsed rate limit headers, if the response carried any
    #[error("HTTP error {status}: {raw_response}")]
    HttpError {
        /// The HTTP status code
        status: StatusCode,
        /// The raw response body
        raw_response: String,
        /// The response headers
        headers: HeaderMap,
        /// Rate limit information parsed from headers
        rate_limit_info: Option<RateLimitInfo>,
    },

    /// The response body could not be parsed as JSON, or the JSON did not
    /// match the requested type.
    ///
    /// Raised lazily, on first JSON access, never at dispatch time.
    #[error("Failed to deserialize response: {serde_error}")]
    DeserializationFailed {
        /// The raw response body that failed to deserialize
        raw_response: String,
        /// The serde error message
        serde_error: String,
    },

    /// JSON was requested from a resource that does not return JSON.
    #[error("Resource does not return JSON, use `text()` instead")]
    NoJson,

    /// The requested attribute (or array index) is not present.
    #[error("No field `{field}` in response")]
    MissingField {
        /// The field name or bracketed index that was looked up
        field: String,
    },

    /// No endpoint with this name is registered.
    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    /// Invalid configuration was provided.
    ///
    /// This covers invalid header names/values, bad proxies and wrong
    /// argument counts for dynamically dispatched endpoints.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// An invalid URL was provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Maps a transport failure, separating timeouts from other network errors.
    pub(crate) fn from_transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Error::Timeout
        } else {
            Error::Network(error)
        }
    }

    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Error::MissingField {
            field: field.into(),
        }
    }

    /// Returns the HTTP status code if this error has one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body if this error has one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::HttpError { raw_response, .. } => Some(raw_response),
            Error::DeserializationFailed { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }

    /// Returns the response headers of an `HttpError`.
    pub fn headers(&self) -> Option<&HeaderMap> {
        match self {
            Error::HttpError { headers, .. } => Some(headers),
            _ => None,
        }
    }

    /// Returns rate limit information if available.
    pub fn rate_limit_info(&self) -> Option<&RateLimitInfo> {
        match self {
            Error::HttpError {
                rate_limit_info, ..
            } => rate_limit_info.as_ref(),
            _ => None,
        }
    }

    /// Returns `true` if the API rejected the call with 429 Too Many Requests.
    ///
    /// # Examples
    ///
    /// ```
    /// use chessdotcom::Error;
    /// use http::{HeaderMap, StatusCode};
    ///
    /// let err = Error::HttpError {
    ///     status: StatusCode::TOO_MANY_REQUESTS,
    ///     raw_response: String::new(),
    ///     headers: HeaderMap::new(),
    ///     rate_limit_info: None,
    /// };
    /// assert!(err.is_rate_limited());
    /// ```
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(StatusCode::TOO_MANY_REQUESTS)
    }
}

/// A specialized `Result` type for Chess.com API calls.
pub type Result<T> = std::result::Result<T, Error>;
