//! # chessdotcom - A client for the Chess.com published-data API
//!
//! Every endpoint of the read-only API at `https://api.chess.com/pub` is a
//! method on [`Client`] (asynchronous) and [`BlockingClient`]. Responses keep
//! the raw body and parse JSON lazily, calls rejected with
//! `429 Too Many Requests` are retried according to a [`RateLimitHandler`],
//! and everything else surfaces as a typed [`Error`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use chessdotcom::{CallOptions, Client, RateLimitHandler};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), chessdotcom::Error> {
//!     let client = Client::builder()
//!         .user_agent("My Application. Contact me at email@example.com")?
//!         .rate_limit_handler(RateLimitHandler::new(Duration::from_secs(2), 3))
//!         .build()?;
//!
//!     let response = client.get_player_profile("fabianocaruana", CallOptions::default()).await?;
//!     println!("Name: {:?}", response.get("name")?.as_str());
//!
//!     // endpoints that nest their payload expose it by name, and directly
//!     let puzzle = client.get_current_daily_puzzle(CallOptions::default()).await?;
//!     println!("Puzzle: {:?}", puzzle.get("puzzle")?.get("title")?.as_str());
//!     println!("Same: {:?}", puzzle.get("title")?.as_str());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Rate limits
//!
//! The API answers bursts of parallel requests with 429. The client waits
//! [`RateLimitHandler::tts`] and tries again, at most
//! [`RateLimitHandler::retries`] times after the first attempt. Any other
//! non-200 status fails immediately with [`Error::HttpError`].
//!
//! ## User-Agent
//!
//! Chess.com asks every caller to identify itself. A warning is logged
//! through `tracing` for every request sent without a `User-Agent` header;
//! set one with [`ClientBuilder::user_agent`].
//!
//! ## Calling endpoints by name
//!
//! ```no_run
//! use chessdotcom::{registry, BlockingClient, CallOptions};
//!
//! # fn example() -> Result<(), chessdotcom::Error> {
//! for endpoint in registry().iter() {
//!     println!("{} -> {}", endpoint.name, endpoint.template);
//! }
//!
//! let client = BlockingClient::new()?;
//! let response = client.call("get_player_stats", &["hikaru"], CallOptions::default())?;
//! # Ok(())
//! # }
//! ```

pub mod blocking;
mod client;
mod dispatch;
pub mod endpoints;
mod error;
mod node;
mod options;
pub mod rate_limit;
pub mod registry;
mod resource;
mod response;

pub use blocking::BlockingClient;
pub use client::{Client, ClientBuilder, ClientConfig};
pub use dispatch::{DEFAULT_BASE_URL, REQUEST_TIMEOUT};
pub use endpoints::YearMonth;
pub use error::{Error, Result};
pub use node::{Kind, Node};
pub use options::{CallOptions, RequestOptions};
pub use rate_limit::RateLimitHandler;
pub use registry::{registry, EndpointDef, Registry};
pub use resource::Resource;
pub use response::Response;
