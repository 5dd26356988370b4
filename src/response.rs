//! Response wrapper with lazy JSON access.
//!
//! A [`Response`] keeps the raw body of a successful call. JSON is parsed on
//! first access and cached, so a body that is never read as JSON is never
//! parsed, and one that is read many times is parsed once.

use crate::node::Node;
use crate::{Error, Result};
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::OnceLock;
use std::time::Duration;

/// A successful response from the Chess.com API.
///
/// Fields are reached through [`get`](Response::get), which returns a
/// [`Node`] that can be walked further. Endpoints that nest their payload
/// under a named field (`"puzzle"`, `"games"`, ...) also expose that payload
/// through [`top_level`](Response::top_level), and its fields can be read
/// directly from the response.
///
/// # Examples
///
/// ```
/// use chessdotcom::Response;
///
/// let response = Response::new(r#"{"puzzle": {"title": "t"}}"#, Some("puzzle"), false);
///
/// assert_eq!(response.get("puzzle")?.get("title")?.as_str(), Some("t"));
/// assert_eq!(response.get("title")?.as_str(), Some("t"));
/// # Ok::<(), chessdotcom::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Response {
    text: String,
    top_level_attribute: Option<String>,
    no_json: bool,
    json: OnceLock<std::result::Result<Value, String>>,
    status: StatusCode,
    headers: HeaderMap,
    latency: Duration,
    attempts: usize,
}

impl Response {
    /// Creates a response over a raw body.
    ///
    /// When `no_json` is set the body is only available through
    /// [`text`](Response::text).
    pub fn new(text: impl Into<String>, top_level_attribute: Option<&str>, no_json: bool) -> Self {
        Self {
            text: text.into(),
            top_level_attribute: top_level_attribute.map(str::to_owned),
            no_json,
            json: OnceLock::new(),
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            latency: Duration::ZERO,
            attempts: 1,
        }
    }

    /// Attaches transport metadata. Called by the client after a successful call.
    pub(crate) fn with_metadata(
        mut self,
        status: StatusCode,
        headers: HeaderMap,
        latency: Duration,
        attempts: usize,
    ) -> Self {
        self.status = status;
        self.headers = headers;
        self.latency = latency;
        self.attempts = attempts;
        self
    }

    /// The raw response body.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The parsed response body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoJson`] for plain-text resources and
    /// [`Error::DeserializationFailed`] if the body is not valid JSON. A
    /// failed parse is not retried on later calls.
    pub fn json(&self) -> Result<&Value> {
        if self.no_json {
            return Err(Error::NoJson);
        }

        let parsed = self.json.get_or_init(|| {
            serde_json::from_str(&self.text).map_err(|e| {
                tracing::error!(error = %e, "Failed to parse response body as JSON");
                e.to_string()
            })
        });

        parsed
            .as_ref()
            .map_err(|serde_error| Error::DeserializationFailed {
                raw_response: self.text.clone(),
                serde_error: serde_error.clone(),
            })
    }

    /// The whole parsed body as a [`Node`].
    pub fn root(&self) -> Result<Node<'_>> {
        self.json().map(Node::new)
    }

    /// The name of the field this endpoint nests its payload under.
    pub fn top_level_attribute(&self) -> Option<&str> {
        self.top_level_attribute.as_deref()
    }

    /// The payload view for endpoints that declare a top-level attribute.
    ///
    /// If the body is an object holding the attribute, the view is that
    /// field. Otherwise the whole body is the payload and the view is the
    /// root. Returns `Ok(None)` when no attribute is declared.
    pub fn top_level(&self) -> Result<Option<Node<'_>>> {
        let Some(name) = self.top_level_attribute.as_deref() else {
            return Ok(None);
        };

        let root = self.root()?;
        Ok(Some(root.get(name).unwrap_or(root)))
    }

    /// Looks up a field by name.
    ///
    /// The top-level attribute name resolves to the [`top_level`] view. Any
    /// other name is looked up in the body first and then in the top-level
    /// view, so the payload's fields can be read without naming the wrapper.
    ///
    /// [`top_level`]: Response::top_level
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] if neither the body nor the top-level
    /// view has the field.
    pub fn get(&self, name: &str) -> Result<Node<'_>> {
        if let Some(top_level) = self.top_level()? {
            if self.top_level_attribute.as_deref() == Some(name) {
                return Ok(top_level);
            }
            return self.root()?.get(name).or_else(|_| top_level.get(name));
        }

        self.root()?.get(name)
    }

    /// Deserializes the whole body into a typed value.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        let json = self.json()?;
        T::deserialize(json).map_err(|e| {
            tracing::error!(error = %e, "Failed to deserialize response");
            Error::DeserializationFailed {
                raw_response: self.text.clone(),
                serde_error: e.to_string(),
            }
        })
    }

    /// The HTTP status code of the response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a header value by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Total time from the first attempt until the response arrived.
    ///
    /// Includes rate limit waits but not the initial `tts` pacing delay.
    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Number of attempts made, `1` if the first one succeeded.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Returns `true` if the call was rate limited and retried.
    pub fn was_retried(&self) -> bool {
        self.attempts > 1
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
