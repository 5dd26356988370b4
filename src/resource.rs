//! Description of a single API call.

use crate::options::{CallOptions, RequestOptions};
use std::time::Duration;

/// One pending or in-flight API call.
///
/// Endpoint builders create a fresh `Resource` per call. Only the dispatch
/// loop touches it afterwards, incrementing [`times_requested`] once per
/// attempt.
///
/// [`times_requested`]: Resource::times_requested
#[derive(Debug, Clone)]
pub struct Resource {
    /// The path relative to the API base URL, e.g. `/player/hikaru`.
    pub uri: String,

    /// Call-level transport options.
    pub request_options: RequestOptions,

    /// JSON field the payload is nested under, if any.
    pub top_level_attribute: Option<String>,

    /// The endpoint returns plain text rather than JSON.
    pub no_json: bool,

    /// Time to wait before the first attempt.
    pub tts: Duration,

    /// Number of attempts made so far.
    pub times_requested: usize,
}

impl Resource {
    /// Creates a resource for the given relative path.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            request_options: RequestOptions::default(),
            top_level_attribute: None,
            no_json: false,
            tts: Duration::ZERO,
            times_requested: 0,
        }
    }

    /// Sets the top-level attribute name.
    pub fn with_top_level_attribute(mut self, name: impl Into<String>) -> Self {
        self.top_level_attribute = Some(name.into());
        self
    }

    /// Marks the resource as returning plain text.
    pub fn with_no_json(mut self, no_json: bool) -> Self {
        self.no_json = no_json;
        self
    }

    /// Applies per-call options: pacing delay and request options.
    pub fn with_call_options(mut self, options: CallOptions) -> Self {
        self.tts = options.tts;
        self.request_options = options.request_options;
        self
    }
}
