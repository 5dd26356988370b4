//! Example demonstrating error handling.
//!
//! This example shows how to:
//! - Handle API errors and inspect status, body and headers
//! - Deal with missing fields
//! - Deal with text-only endpoints
//!
//! Run with: `cargo run --example error_handling`

use chessdotcom::{CallOptions, Client, Error, YearMonth};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("chessdotcom=info")
        .init();

    let client = Client::builder()
        .user_agent("chessdotcom error_handling example (you@example.com)")?
        .build()?;

    println!("=== Example 1: Handling API Errors ===");
    match client
        .get_player_profile("this-player-does-not-exist-42", CallOptions::default())
        .await
    {
        Ok(response) => println!("Success: {}", response),
        Err(Error::HttpError {
            status,
            raw_response,
            headers,
            ..
        }) => {
            println!("API Error!");
            println!("  Status: {}", status);
            println!("  Raw response: {}", raw_response);
            println!("  Content-Type: {:?}", headers.get("content-type"));
        }
        Err(e) => println!("Other error: {}", e),
    }
    println!();

    println!("=== Example 2: Missing Fields ===");
    let response = client.get_player_profile("hikaru", CallOptions::default()).await?;
    match response.get("favorite_opening") {
        Ok(node) => println!("Favorite opening: {:?}", node.value()),
        Err(Error::MissingField { field }) => println!("No `{}` in profile", field),
        Err(e) => println!("Other error: {}", e),
    }
    println!();

    println!("=== Example 3: Text-only Endpoints ===");
    let response = client
        .get_player_games_by_month_pgn("hikaru", YearMonth::new(2023, 1), CallOptions::default())
        .await?;
    match response.json() {
        Err(Error::NoJson) => println!("PGN archive, {} bytes of text", response.text().len()),
        other => println!("Unexpected: {:?}", other.map(|_| ())),
    }

    Ok(())
}
