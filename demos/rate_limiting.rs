//! Example demonstrating rate limit handling.
//!
//! Chess.com answers bursts of parallel requests with 429. This example fires
//! several requests at once with a handler that waits and retries.
//!
//! Run with: `cargo run --example rate_limiting`

use chessdotcom::{CallOptions, Client, Error, RateLimitHandler};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("chessdotcom=info")
        .init();

    let client = Client::builder()
        .user_agent("chessdotcom rate_limiting example (you@example.com)")?
        .rate_limit_handler(RateLimitHandler::new(Duration::from_secs(2), 3))
        .build()?;

    let players = ["hikaru", "magnuscarlsen", "fabianocaruana", "gothamchess", "danielnaroditsky"];
    let mut calls = tokio::task::JoinSet::new();
    for player in players {
        let client = client.clone();
        calls.spawn(async move { (player, client.get_player_stats(player, CallOptions::default()).await) });
    }

    while let Some(joined) = calls.join_next().await {
        let (player, result) = joined?;
        match result {
            Ok(response) => println!(
                "{}: ok after {} attempt(s) in {:?}",
                player,
                response.attempts(),
                response.latency()
            ),
            Err(e) if e.is_rate_limited() => {
                println!("{}: still rate limited", player);
                if let Some(info) = e.rate_limit_info() {
                    println!("  Retry after: {:?}", info.retry_after);
                }
            }
            Err(Error::HttpError { status, .. }) => println!("{}: HTTP {}", player, status),
            Err(e) => println!("{}: {}", player, e),
        }
    }

    println!();
    println!("=== Pacing with tts ===");
    let response = client
        .get_leaderboards(CallOptions::new().tts(Duration::from_millis(500)))
        .await?;
    println!("Leaderboards fetched, {} categories", response.top_level()?.map_or(0, |n| n.len()));

    Ok(())
}
