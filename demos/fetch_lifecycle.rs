//! Fetch Lifecycle
//!
//! This example demonstrates driving an async operation through the
//! pending/settle protocol.
//!
//! Key concepts:
//! - AsyncState as a closed sum type (idle/pending/resolved/rejected)
//! - run() dispatches Pending, awaits, then settles
//! - Run ids correlating the dispatches of one run
//!
//! Run with: cargo run --example fetch_lifecycle

use std::time::Duration;

use tidepool::builder::async_task;
use tidepool::runner::Liveness;

async fn fetch_pokemon(name: &str) -> Result<String, String> {
    tokio::time::sleep(Duration::from_millis(50)).await;
    match name {
        "" => Err("network error".to_string()),
        name => Ok(format!("{{\"name\":\"{name}\"}}")),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Fetch Lifecycle ===\n");

    let scope = Liveness::new();
    let task = async_task::<String, String>(&scope);
    println!("Initial state: {:?}\n", task.snapshot());

    println!("Fetching \"ditto\"...");
    let outcome = task.run(fetch_pokemon("ditto")).await;
    println!("Outcome: {:?}", outcome);
    println!("State:   {:?}\n", task.snapshot());

    println!("Fetching \"\" (fails)...");
    let outcome = task.run(fetch_pokemon("")).await;
    println!("Outcome: {:?}", outcome);
    println!("State:   {:?}\n", task.snapshot());

    println!("Transition log:");
    for record in task.log().records() {
        let run = record.run.map(|run| run.to_string()).unwrap_or_default();
        println!("  {:<8} run {}", record.kind, run);
    }

    println!("\nKey Characteristics:");
    println!("- Pending always clears the previous payload");
    println!("- Exactly one of data/error is ever populated");
    println!("- Both dispatches of a run carry the same run id");

    println!("\n=== Example Complete ===");
}
