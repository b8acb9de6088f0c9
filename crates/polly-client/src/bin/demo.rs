//! End-to-end walkthrough against a running poll service.
//!
//! ```bash
//! cargo run -p polly-client --bin demo -- --base-url http://localhost:8000
//! ```
//!
//! Registers two users, creates a poll, casts votes (including a rejected
//! duplicate), prints the tally, and deletes the poll.

use anyhow::Result;
use clap::Parser;

use polly_client::{ClientError, PollyClient};

#[derive(Parser)]
#[command(about = "Walk through the poll service API end to end")]
struct Args {
    /// Base URL of the poll service
    #[arg(long, default_value = "http://localhost:8000")]
    base_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let suffix = std::process::id();
    let alice_name = format!("alice_{suffix}");
    let bob_name = format!("bob_{suffix}");

    let mut alice = PollyClient::new(&args.base_url);
    let mut bob = PollyClient::new(&args.base_url);

    println!("Registering {alice_name} and {bob_name}...");
    alice.register(&alice_name, "wonderland").await?;
    bob.register(&bob_name, "builder").await?;

    alice.login(&alice_name, "wonderland").await?;
    bob.login(&bob_name, "builder").await?;

    println!("Creating a poll...");
    let poll = alice
        .create_poll("Which season is best?", &["spring", "summer", "autumn", "winter"])
        .await?;
    println!("  poll {} with {} options", poll.id, poll.options.len());

    println!("Voting...");
    alice.vote(poll.id, poll.options[2].id).await?;
    bob.vote(poll.id, poll.options[2].id).await?;

    // The second vote from the same user must be rejected.
    match bob.vote(poll.id, poll.options[0].id).await {
        Err(ClientError::Api { kind, .. }) => {
            println!("  duplicate vote rejected: {kind}");
        }
        Ok(_) => anyhow::bail!("duplicate vote was accepted"),
        Err(e) => return Err(e.into()),
    }

    println!("Results:");
    let results = alice.results(poll.id).await?;
    for tally in &results.results {
        println!("  {:<10} {}", tally.text, tally.vote_count);
    }

    println!("Cleaning up...");
    alice.delete_poll(poll.id).await?;
    match alice.get_poll(poll.id).await {
        Err(ClientError::Api { status, .. }) if status.as_u16() == 404 => {
            println!("  poll {} deleted", poll.id);
        }
        Ok(_) => anyhow::bail!("poll still exists after delete"),
        Err(e) => return Err(e.into()),
    }

    println!("Done.");
    Ok(())
}
