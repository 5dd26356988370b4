//! Rate limit handling.
//!
//! The Chess.com API answers bursts of requests with `429 Too Many Requests`.
//! [`RateLimitHandler`] decides whether such a response is retried and how
//! long to wait first. [`RateLimitInfo`] keeps whatever rate limit headers the
//! API sent so they can be inspected on the final error.

use http::{HeaderMap, StatusCode};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Retry policy for rate-limited calls.
///
/// # Examples
///
/// ```
/// use chessdotcom::RateLimitHandler;
/// use http::StatusCode;
/// use std::time::Duration;
///
/// let handler = RateLimitHandler::new(Duration::from_secs(4), 2);
///
/// assert!(handler.should_retry(StatusCode::TOO_MANY_REQUESTS, 1));
/// assert!(handler.should_retry(StatusCode::TOO_MANY_REQUESTS, 2));
/// assert!(!handler.should_retry(StatusCode::TOO_MANY_REQUESTS, 3));
/// assert!(!handler.should_retry(StatusCode::BAD_REQUEST, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitHandler {
    tts: Duration,
    retries: usize,
}

impl RateLimitHandler {
    /// Creates a handler that waits `tts` after a 429 and retries at most
    /// `retries` times after the first attempt.
    ///
    /// A negative `retries` is replaced by 0 and a warning is logged.
    pub fn new(tts: Duration, retries: i32) -> Self {
        let retries = if retries < 0 {
            tracing::warn!(
                retries = retries,
                "Number of retries can not be less than 0, using 0"
            );
            0
        } else {
            retries as usize
        };

        Self { tts, retries }
    }

    /// The wait between a 429 response and the next attempt.
    pub fn tts(&self) -> Duration {
        self.tts
    }

    /// The maximum number of retries after the first attempt.
    pub fn retries(&self) -> usize {
        self.retries
    }

    /// Returns `true` if a call that got `status` after `times_requested`
    /// attempts should be tried again.
    ///
    /// Only 429 is ever retried. The first attempt counts as attempt 1, so a
    /// budget of `retries` allows `retries + 1` attempts in total.
    pub fn should_retry(&self, status: StatusCode, times_requested: usize) -> bool {
        status == StatusCode::TOO_MANY_REQUESTS && times_requested <= self.retries
    }
}

impl Default for RateLimitHandler {
    fn default() -> Self {
        Self {
            tts: Duration::ZERO,
            retries: 1,
        }
    }
}

/// Information extracted from rate limit headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// When the rate limit resets (from X-RateLimit-Reset or RateLimit-Reset headers).
    pub reset_at: Option<SystemTime>,

    /// How long to wait before retrying (from Retry-After header).
    pub retry_after: Option<Duration>,

    /// Number of requests remaining in the current window.
    pub remaining: Option<u64>,
}

impl RateLimitInfo {
    /// Extracts rate limit information from HTTP response headers.
    ///
    /// Parses `Retry-After` (seconds or HTTP date), `X-RateLimit-Reset` /
    /// `RateLimit-Reset` (Unix timestamp) and `X-RateLimit-Remaining`.
    /// Returns `None` when none of them is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use chessdotcom::rate_limit::RateLimitInfo;
    /// use http::HeaderMap;
    ///
    /// let mut headers = HeaderMap::new();
    /// headers.insert("retry-after", "60".parse().unwrap());
    ///
    /// let info = RateLimitInfo::from_headers(&headers).unwrap();
    /// assert_eq!(info.retry_after, Some(std::time::Duration::from_secs(60)));
    /// ```
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let info = Self {
            reset_at: parse_rate_limit_reset(headers),
            retry_after: parse_retry_after(headers),
            remaining: parse_rate_limit_remaining(headers),
        };

        if info.reset_at.is_none() && info.retry_after.is_none() && info.remaining.is_none() {
            None
        } else {
            Some(info)
        }
    }
}

fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let header = headers.get("retry-after")?.to_str().ok()?;

    if let Ok(seconds) = header.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    let date_time = httpdate::parse_http_date(header).ok()?;
    date_time.duration_since(SystemTime::now()).ok()
}

fn parse_rate_limit_reset(headers: &HeaderMap) -> Option<SystemTime> {
    ["x-ratelimit-reset", "ratelimit-reset"]
        .iter()
        .filter_map(|name| headers.get(*name)?.to_str().ok()?.parse::<u64>().ok())
        .map(|timestamp| UNIX_EPOCH + Duration::from_secs(timestamp))
        .next()
}

fn parse_rate_limit_remaining(headers: &HeaderMap) -> Option<u64> {
    headers
        .get("x-ratelimit-remaining")?
        .to_str()
        .ok()?
        .parse()
        .ok()
}
