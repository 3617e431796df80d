//! Teardown Guard
//!
//! This example demonstrates what liveness scopes are for: a slow fetch
//! settles after its owner is gone, and the settle is discarded instead
//! of applied.
//!
//! Key concepts:
//! - Liveness scopes retire on drop or on an explicit retire()
//! - Dispatches after retirement are discarded, not applied
//! - In-flight futures still run to completion
//!
//! Run with: cargo run --example teardown_guard

use std::time::Duration;

use tidepool::builder::async_task;
use tidepool::core::AsyncState;
use tidepool::runner::Liveness;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Teardown Guard ===\n");

    let scope = Liveness::new();
    let task = async_task::<String, String>(&scope);

    println!("Starting a slow fetch (200ms)...");
    let handle = task.spawn(async {
        tokio::time::sleep(Duration::from_millis(200)).await;
        Ok("too late".to_string())
    });

    let mut watcher = task.subscribe();
    watcher
        .wait_for(AsyncState::is_pending)
        .await
        .expect("publisher should be alive");
    println!("State while in flight: {:?}", task.snapshot());

    println!("Retiring the scope before the fetch settles...");
    scope.retire();

    let outcome = handle.await.expect("run should finish");
    println!("Settle outcome: {:?}", outcome);
    println!("State after completion: {:?}", task.snapshot());
    println!("Log kinds: {:?}\n", task.log().kinds());

    println!("Key Characteristics:");
    println!("- The fetch finished, but its settle was discarded");
    println!("- The state stayed exactly as teardown left it");
    println!("- No liveness checks are scattered through caller code");

    println!("\n=== Example Complete ===");
}
