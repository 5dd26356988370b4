//! Example using the blocking client, with endpoints called by name.
//!
//! Run with: `cargo run --example blocking`

use chessdotcom::{registry, BlockingClient, CallOptions, RateLimitHandler};
use std::time::Duration;

fn main() -> Result<(), chessdotcom::Error> {
    tracing_subscriber::fmt()
        .with_env_filter("chessdotcom=info")
        .init();

    let client = BlockingClient::builder()
        .user_agent("chessdotcom blocking example (you@example.com)")?
        .rate_limit_handler(RateLimitHandler::new(Duration::from_secs(1), 2))
        .build_blocking()?;

    println!("=== Registered endpoints ===");
    for endpoint in registry().iter() {
        println!("{:40} {}", endpoint.name, endpoint.template);
    }
    println!();

    let response = client.call("get_titled_players", &["GM"], CallOptions::default())?;
    println!("Titled players: {}", response.get("players")?.len());

    let response = client.get_random_daily_puzzle(CallOptions::default())?;
    println!("Random puzzle: {:?}", response.get("title")?.as_str());

    Ok(())
}
