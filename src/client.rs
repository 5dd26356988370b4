//! Asynchronous client and the shared builder.
//!
//! [`Client`] is the main entry point. Use [`ClientBuilder`] to configure it,
//! or to build the blocking variant with
//! [`build_blocking`](ClientBuilder::build_blocking).

use crate::blocking::BlockingClient;
use crate::dispatch::{self, Outcome, RawResponse, DEFAULT_BASE_URL, REQUEST_TIMEOUT};
use crate::options::{CallOptions, RequestOptions};
use crate::rate_limit::RateLimitHandler;
use crate::registry;
use crate::resource::Resource;
use crate::{Error, Response, Result};
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Configuration owned by one client.
///
/// Built once by [`ClientBuilder`] and never mutated afterwards. Cloning a
/// client shares this configuration read-only; building another client
/// creates a separate copy.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every resource path is appended to.
    pub base_url: Url,
    /// Options merged into every request.
    pub default_request_options: RequestOptions,
    /// Retry policy for 429 responses.
    pub rate_limit_handler: RateLimitHandler,
}

/// An asynchronous client for the Chess.com API.
///
/// Every endpoint of the API is available as a method, e.g.
/// [`get_player_profile`](Client::get_player_profile), and by name through
/// [`call`](Client::call).
///
/// # Examples
///
/// ```no_run
/// use chessdotcom::{CallOptions, Client};
///
/// # async fn example() -> Result<(), chessdotcom::Error> {
/// let client = Client::builder()
///     .user_agent("My Application. Contact me at email@example.com")?
///     .build()?;
///
/// let response = client.get_current_daily_puzzle(CallOptions::default()).await?;
/// println!("{}", response.get("title")?.as_str().unwrap_or_default());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    inner: Arc<ClientConfig>,
}

impl Client {
    /// Creates a client with the default configuration.
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Returns this client's configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner
    }

    /// Performs the call described by `resource`, retrying on 429 as the
    /// client's [`RateLimitHandler`] allows.
    ///
    /// `resource.times_requested` is incremented once per attempt and is
    /// left at the number of attempts made.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HttpError`] for a non-200 response that is not
    /// retried, and transport errors unchanged.
    pub async fn do_get_request(&self, resource: &mut Resource) -> Result<Response> {
        if !resource.tts.is_zero() {
            tracing::debug!(tts_ms = resource.tts.as_millis(), uri = %resource.uri, "Pacing before first request");
            tokio::time::sleep(resource.tts).await;
        }

        let start_time = Instant::now();

        loop {
            let prepared = dispatch::prepare(&self.inner.base_url, resource, &self.inner.default_request_options)?;
            let raw = self.execute_request(prepared, resource.times_requested + 1).await;
            resource.times_requested += 1;

            match dispatch::evaluate(raw?, resource, &self.inner.rate_limit_handler, start_time.elapsed()) {
                Outcome::Done(response) => return Ok(response),
                Outcome::Retry(delay) => tokio::time::sleep(delay).await,
                Outcome::Fail(e) => return Err(e),
            }
        }
    }

    /// Calls a registered endpoint by name with string path arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEndpoint`] if no endpoint has this name and
    /// [`Error::ConfigurationError`] if the argument count is wrong.
    pub async fn call(&self, name: &str, args: &[&str], options: CallOptions) -> Result<Response> {
        let mut resource = registry::registry().build(name, args, options)?;
        self.do_get_request(&mut resource).await
    }

    /// Executes a single attempt on a connection scoped to this attempt.
    async fn execute_request(
        &self,
        prepared: dispatch::PreparedRequest,
        attempt: usize,
    ) -> Result<RawResponse> {
        tracing::debug!(url = %prepared.url, attempt = attempt, "Executing HTTP request");

        let mut builder = reqwest::Client::builder().timeout(REQUEST_TIMEOUT);
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
            .await
            .map_err(Error::from_transport)?;

        let status = response.status();
        let headers = response.headers().clone();
        let text = response.text().await.map_err(Error::from_transport)?;

        Ok(RawResponse {
            status,
            headers,
            text,
        })
    }
}

/// Builder for configuring and creating a [`Client`] or [`BlockingClient`].
///
/// # Examples
///
/// ```no_run
/// use chessdotcom::{ClientBuilder, RateLimitHandler};
/// use std::time::Duration;
///
/// # fn example() -> Result<(), chessdotcom::Error> {
/// let client = ClientBuilder::new()
///     .user_agent("my-app/1.0 (me@example.com)")?
///     .rate_limit_handler(RateLimitHandler::new(Duration::from_secs(2), 3))
///     .build_blocking()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: std::result::Result<Url, url::ParseError>,
    default_request_options: RequestOptions,
    rate_limit_handler: RateLimitHandler,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL),
            default_request_options: RequestOptions::default(),
            rate_limit_handler: RateLimitHandler::default(),
        }
    }

    /// Sets the base URL for all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.base_url = Ok(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Adds a default header that will be included in all requests.
    ///
    /// A default header replaces a call-level header of the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        self.default_request_options = self.default_request_options.with_header(name, value)?;
        Ok(self)
    }

    /// Sets the `User-Agent` header sent with every request.
    pub fn user_agent(self, user_agent: impl AsRef<str>) -> Result<Self> {
        self.default_header(http::header::USER_AGENT.as_str(), user_agent)
    }

    /// Routes requests through a proxy unless a call sets its own.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.default_request_options.proxy = Some(proxy.into());
        self
    }

    /// Replaces the default request options.
    pub fn default_request_options(mut self, options: RequestOptions) -> Self {
        self.default_request_options = options;
        self
    }

    /// Sets the retry policy for 429 responses.
    pub fn rate_limit_handler(mut self, handler: RateLimitHandler) -> Self {
        self.rate_limit_handler = handler;
        self
    }

    fn into_config(self) -> Result<ClientConfig> {
        Ok(ClientConfig {
            base_url: self.base_url?,
            default_request_options: self.default_request_options,
            rate_limit_handler: self.rate_limit_handler,
        })
    }

    /// Builds an asynchronous [`Client`].
    pub fn build(self) -> Result<Client> {
        Ok(Client {
            inner: Arc::new(self.into_config()?),
        })
    }

    /// Builds a [`BlockingClient`].
    pub fn build_blocking(self) -> Result<BlockingClient> {
        Ok(BlockingClient::from_config(self.into_config()?))
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
