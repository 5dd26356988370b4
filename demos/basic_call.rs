//! Basic example fetching a player profile, the daily puzzle and a monthly
//! game archive.
//!
//! This example shows how to:
//! - Create a client with a User-Agent
//! - Read fields from a response
//! - Use the top-level view of nested payloads
//! - Deserialize a response into your own types
//!
//! Run with: `cargo run --example basic_call`

use chessdotcom::{CallOptions, Client, Error, YearMonth};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Profile {
    username: String,
    followers: u64,
    joined: i64,
    status: String,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("chessdotcom=debug,basic_call=info")
        .init();

    let client = Client::builder()
        .user_agent("chessdotcom basic_call example (you@example.com)")?
        .build()?;

    println!("=== Player Profile ===");
    let response = client
        .get_player_profile("fabianocaruana", CallOptions::default())
        .await?;
    let profile: Profile = response.deserialize()?;
    println!("Username: {}", profile.username);
    println!("Followers: {}", profile.followers);
    println!("Request latency: {:?}", response.latency());
    println!();

    println!("=== Daily Puzzle ===");
    let response = client.get_current_daily_puzzle(CallOptions::default()).await?;
    let puzzle = response.get("puzzle")?;
    println!("Title: {:?}", puzzle.get("title")?.as_str());
    println!("FEN: {:?}", response.get("fen")?.as_str());
    println!();

    println!("=== Monthly Archive ===");
    let response = client
        .get_player_games_by_month("fabianocaruana", YearMonth::new(2020, 5), CallOptions::default())
        .await?;
    if let Some(games) = response.top_level()? {
        println!("{} games", games.len());
        for game in games.iter().take(3) {
            println!("  {:?}", game.get("url")?.as_str());
        }
    }
    println!("Was retried: {}", response.was_retried());

    Ok(())
}
