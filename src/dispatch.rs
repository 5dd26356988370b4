//! Steps shared by the asynchronous and blocking clients.
//!
//! Both clients run the same loop: pace, prepare, send, count the attempt,
//! then let [`evaluate`] decide between returning, retrying and failing. Only
//! the way they wait and send differs.

use crate::options::RequestOptions;
use crate::rate_limit::{RateLimitHandler, RateLimitInfo};
use crate::resource::Resource;
use crate::{Error, Response, Result};
use http::{HeaderMap, StatusCode};
use std::time::Duration;
use url::Url;

/// Base URL of the Chess.com published-data API.
pub const DEFAULT_BASE_URL: &str = "https://api.chess.com/pub";

/// Upper bound on a single attempt.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A request ready to be sent.
pub(crate) struct PreparedRequest {
    pub url: Url,
    pub options: RequestOptions,
}

/// What to do after an attempt.
#[derive(Debug)]
pub(crate) enum Outcome {
    Done(Response),
    Retry(Duration),
    Fail(Error),
}

/// Raw pieces of a received response, independent of the transport.
pub(crate) struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub text: String,
}

/// Merges options and builds the full URL for the next attempt.
///
/// Logs a warning when no `User-Agent` header ends up on the request.
pub(crate) fn prepare(
    base_url: &Url,
    resource: &Resource,
    defaults: &RequestOptions,
) -> Result<PreparedRequest> {
    let options = RequestOptions::merged(&resource.request_options, defaults);

    if !options.has_user_agent() {
        tracing::warn!(
            uri = %resource.uri,
            "Calls to api.chess.com require an updated 'User-Agent' header, \
             set one with ClientBuilder::user_agent"
        );
    }

    // path parameters are inserted verbatim
    let mut url = Url::parse(&format!(
        "{}{}",
        base_url.as_str().trim_end_matches('/'),
        resource.uri
    ))?;
    if !options.query_params.is_empty() {
        url.query_pairs_mut().extend_pairs(&options.query_params);
    }

    Ok(PreparedRequest { url, options })
}

/// Builds the proxy for a prepared request, if one is configured.
pub(crate) fn proxy(options: &RequestOptions) -> Result<Option<reqwest::Proxy>> {
    options
        .proxy
        .as_deref()
        .map(|proxy| {
            reqwest::Proxy::all(proxy)
                .map_err(|e| Error::ConfigurationError(format!("Invalid proxy: {}", e)))
        })
        .transpose()
}

/// Decides what follows an attempt. `resource.times_requested` must already
/// count this attempt.
pub(crate) fn evaluate(
    raw: RawResponse,
    resource: &Resource,
    handler: &RateLimitHandler,
    latency: Duration,
) -> Outcome {
    let RawResponse {
        status,
        headers,
        text,
    } = raw;

    tracing::info!(
        status = status.as_u16(),
        latency_ms = latency.as_millis(),
        attempts = resource.times_requested,
        uri = %resource.uri,
        "Received HTTP response"
    );

    if status == StatusCode::OK {
        let response = Response::new(text, resource.top_level_attribute.as_deref(), resource.no_json)
            .with_metadata(status, headers, latency, resource.times_requested);
        return Outcome::Done(response);
    }

    if handler.should_retry(status, resource.times_requested) {
        tracing::warn!(
            delay_ms = handler.tts().as_millis(),
            attempt = resource.times_requested,
            uri = %resource.uri,
            "Rate limited - waiting before retry"
        );
        return Outcome::Retry(handler.tts());
    }

    if status.is_server_error() {
        tracing::warn!(status = status.as_u16(), response = %text, "Server error (5xx)");
    } else {
        tracing::error!(status = status.as_u16(), response = %text, "Request failed");
    }

    let rate_limit_info = RateLimitInfo::from_headers(&headers);
    Outcome::Fail(Error::HttpError {
        status,
        raw_response: text,
        headers,
        rate_limit_info,
    })
}
