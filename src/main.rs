use anyhow::Context;
use chrono::Utc;
use listing_scout::{Credentials, FetchOutcome, ListingFetcher, OxylabsFetcher, SearchParams};
use tracing::{info, Level};
use tracing_subscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("🔎 Listing Scout - Oxylabs Realtime fetcher");
    info!("===========================================");
    info!("");

    let mut args = std::env::args().skip(1);
    let target = args
        .next()
        .context("usage: listing-scout <url> [key=value ...]")?;

    let mut params = SearchParams::new(target);
    for arg in args {
        let (key, value) = arg
            .split_once('=')
            .with_context(|| format!("expected key=value, got '{}'", arg))?;
        params.insert(key, value);
    }

    let credentials = Credentials::from_env()?;
    let fetcher = OxylabsFetcher::new(credentials);

    info!("Starting search via {}...", fetcher.source_name());

    match fetcher.fetch(&params).await? {
        FetchOutcome::Found(result) => {
            let listings = result.listings();
            info!("✅ Fetched {} listings", listings.len());

            for (i, listing) in listings.iter().enumerate() {
                println!(
                    "{}. {}",
                    i + 1,
                    listing.title.as_deref().unwrap_or("(untitled)")
                );
                if let Some(price) = &listing.price {
                    println!("   Price: {}", price);
                }
                if let Some(rating) = &listing.rating {
                    println!(
                        "   Rating: {} ({})",
                        rating,
                        listing.rating_word.as_deref().unwrap_or("-")
                    );
                }
                if let Some(link) = &listing.link {
                    println!("   URL: {}", link);
                }
                println!();
            }

            if let Some(total) = result.total_listings() {
                println!("Total: {}", total);
            }

            // Save the raw result for inspection
            let report = serde_json::json!({
                "fetched_at": Utc::now(),
                "result": result,
            });
            let json = serde_json::to_string_pretty(&report)?;
            tokio::fs::write("search_result.json", json).await?;
            info!("💾 Saved raw result to search_result.json");
        }
        FetchOutcome::Empty => {
            info!("No listings found");
        }
        FetchOutcome::Failed(reason) => {
            info!("Fetch failed: {}", reason);
        }
    }

    Ok(())
}
