//! Transport options for requests and per-call settings.

use http::{header::USER_AGENT, HeaderMap, HeaderName, HeaderValue};
use std::collections::BTreeMap;
use std::time::Duration;

/// Transport options applied to a request.
///
/// Options live at two levels: the client's defaults and the call's own
/// options. They are merged at dispatch time by [`RequestOptions::merged`].
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Request headers.
    pub headers: HeaderMap,

    /// Proxy URL used for the request, if any.
    pub proxy: Option<String>,

    /// Query parameters appended to the request URL.
    pub query_params: BTreeMap<String, String>,
}

impl RequestOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn with_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, crate::Error> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| crate::Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| crate::Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Routes the request through the given proxy URL.
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Adds a query parameter.
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(key.into(), value.into());
        self
    }

    /// Merges call-level options with client-level defaults.
    ///
    /// Headers are merged key by key and a default header replaces a call
    /// header of the same name. Proxy and query parameters set on the call
    /// win over the defaults.
    pub fn merged(call: &RequestOptions, defaults: &RequestOptions) -> RequestOptions {
        let mut headers = call.headers.clone();
        for name in defaults.headers.keys() {
            headers.remove(name);
        }
        for (name, value) in &defaults.headers {
            headers.append(name, value.clone());
        }

        let mut query_params = defaults.query_params.clone();
        query_params.extend(
            call.query_params
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        RequestOptions {
            headers,
            proxy: call.proxy.clone().or_else(|| defaults.proxy.clone()),
            query_params,
        }
    }

    /// Returns `true` if a `User-Agent` header is set.
    ///
    /// Header names are case-insensitive, so any spelling counts.
    pub fn has_user_agent(&self) -> bool {
        self.headers.contains_key(USER_AGENT)
    }
}

/// Per-call settings accepted by every endpoint.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Time to wait before the first attempt. Retries do not wait for it again.
    pub tts: Duration,

    /// Options for this call only.
    pub request_options: RequestOptions,
}

impl CallOptions {
    /// Creates default options: no pacing delay, no extra transport options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits `tts` before making the first request.
    pub fn tts(mut self, tts: Duration) -> Self {
        self.tts = tts;
        self
    }

    /// Sets the call-level request options.
    pub fn request_options(mut self, options: RequestOptions) -> Self {
        self.request_options = options;
        self
    }
}

impl From<RequestOptions> for CallOptions {
    fn from(request_options: RequestOptions) -> Self {
        Self {
            tts: Duration::ZERO,
            request_options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_headers_replace_call_headers() {
        let defaults = RequestOptions::new().with_header("header", "value").unwrap();
        let call = RequestOptions::new()
            .with_header("header", "override_value")
            .unwrap()
            .with_header("x-call-only", "kept")
            .unwrap();

        let merged = RequestOptions::merged(&call, &defaults);

        assert_eq!(merged.headers.get("header").unwrap(), "value");
        assert_eq!(merged.headers.get_all("header").iter().count(), 1);
        assert_eq!(merged.headers.get("x-call-only").unwrap(), "kept");
    }

    #[test]
    fn test_call_proxy_and_query_params_win() {
        let defaults = RequestOptions::new()
            .with_proxy("http://default:8080")
            .with_query_param("a", "default")
            .with_query_param("b", "default");
        let call = RequestOptions::new()
            .with_proxy("http://call:8080")
            .with_query_param("a", "call");

        let merged = RequestOptions::merged(&call, &defaults);

        assert_eq!(merged.proxy.as_deref(), Some("http://call:8080"));
        assert_eq!(merged.query_params["a"], "call");
        assert_eq!(merged.query_params["b"], "default");
    }

    #[test]
    fn test_user_agent_detection_is_case_insensitive() {
        let options = RequestOptions::new().with_header("uSeR-aGeNt", "me").unwrap();
        assert!(options.has_user_agent());
        assert!(!RequestOptions::new().has_user_agent());
    }

    #[test]
    fn test_invalid_header_name() {
        let result = RequestOptions::new().with_header("bad header", "value");
        assert!(matches!(result, Err(crate::Error::ConfigurationError(_))));
    }
}
