//! Blocking client.
//!
//! Same behavior as [`Client`](crate::Client), but every call blocks the
//! current thread, including rate limit and pacing waits. Do not use it from
//! inside an async runtime.

use crate::client::{ClientBuilder, ClientConfig};
use crate::dispatch::{self, Outcome, RawResponse, REQUEST_TIMEOUT};
use crate::options::CallOptions;
use crate::registry;
use crate::resource::Resource;
use crate::{Error, Response, Result};
use std::sync::Arc;
use std::time::Instant;

/// A blocking client for the Chess.com API.
///
/// # Examples
///
/// ```no_run
/// use chessdotcom::{BlockingClient, CallOptions};
///
/// # fn example() -> Result<(), chessdotcom::Error> {
/// let client = BlockingClient::builder()
///     .user_agent("My Application. Contact me at email@example.com")?
///     .build_blocking()?;
///
/// let response = client.get_player_stats("hikaru", CallOptions::default())?;
/// println!("{}", response.text());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BlockingClient {
    inner: Arc<ClientConfig>,
}

impl BlockingClient {
    /// Creates a client with the default configuration.
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build_blocking()
    }

    /// Creates a new `ClientBuilder`; finish it with
    /// [`build_blocking`](ClientBuilder::build_blocking).
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub(crate) fn from_config(config: ClientConfig) -> Self {
        Self {
            inner: Arc::new(config),
        }
    }

    /// Returns this client's configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner
    }

    /// Performs the call described by `resource`, retrying on 429 as the
    /// client's rate limit handler allows.
    ///
    /// See [`Client::do_get_request`](crate::Client::do_get_request).
    pub fn do_get_request(&self, resource: &mut Resource) -> Result<Response> {
        if !resource.tts.is_zero() {
            tracing::debug!(tts_ms = resource.tts.as_millis(), uri = %resource.uri, "Pacing before first request");
            std::thread::sleep(resource.tts);
        }

        let start_time = Instant::now();

        loop {
            let prepared = dispatch::prepare(&self.inner.base_url, resource, &self.inner.default_request_options)?;
            let raw = self.execute_request(prepared, resource.times_requested + 1);
            resource.times_requested += 1;

            match dispatch::evaluate(raw?, resource, &self.inner.rate_limit_handler, start_time.elapsed()) {
                Outcome::Done(response) => return Ok(response),
                Outcome::Retry(delay) => std::thread::sleep(delay),
                Outcome::Fail(e) => return Err(e),
            }
        }
    }

    /// Calls a registered endpoint by name with string path arguments.
    pub fn call(&self, name: &str, args: &[&str], options: CallOptions) -> Result<Response> {
        let mut resource = registry::registry().build(name, args, options)?;
        self.do_get_request(&mut resource)
    }

    fn execute_request(&self, prepared: dispatch::PreparedRequest, attempt: usize) -> Result<RawResponse> {
        tracing::debug!(url = %prepared.url, attempt = attempt, "Executing HTTP request");

        let mut builder = reqwest::blocking::Client::builder().timeout(REQUEST_TIMEOUT);
        if let Some(proxy) = dispatch::proxy(&prepared.options)? {
            builder = builder.proxy(proxy);
        }
        let http_client = builder.build().map_err(|e| {
            Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
        })?;

        let response = http_client
            .get(prepared.url)
            .headers(prepared.options.headers)
            .send()
            .map_err(Error::from_transport)?;

        let status = response.status();
        let headers = response.headers().clone();
        let text = response.text().map_err(Error::from_transport)?;

        Ok(RawResponse {
            status,
            headers,
            text,
        })
    }
}
