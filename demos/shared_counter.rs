//! Shared Counter
//!
//! This example demonstrates one store dispatched into from several
//! tokio tasks, with an observer awaiting a target state.
//!
//! Key concepts:
//! - SharedStore clones as cheap handles to the same state
//! - Dispatches serialize through one write lock
//! - watch subscriptions for awaiting snapshots without polling
//!
//! Run with: cargo run --example shared_counter

use tidepool::builder::shared_counter;
use tidepool::core::CounterAction;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Shared Counter ===\n");

    let counter = shared_counter(0);

    let mut watcher = counter.subscribe();
    let observer = tokio::spawn(async move {
        let state = watcher
            .wait_for(|state| state.count >= 40)
            .await
            .expect("publisher should be alive");
        println!("Observer: count reached {}", state.count);
    });

    println!("Spawning 4 workers, 10 increments each...");
    let mut workers = Vec::new();
    for id in 0..4 {
        let counter = counter.clone();
        workers.push(tokio::spawn(async move {
            for _ in 0..10 {
                counter.dispatch(CounterAction::Increment { step: 1 });
            }
            println!("Worker {id} done");
        }));
    }
    for worker in workers {
        worker.await.expect("worker should finish");
    }
    observer.await.expect("observer should finish");

    println!("\nFinal count: {}", counter.snapshot().count);
    println!("Dispatches logged: {}", counter.log().len());

    println!("\nKey Characteristics:");
    println!("- All clones share one state and one log");
    println!("- The log orders dispatches exactly as applied");
    println!("- Handles are plain values, passed where they are needed");

    println!("\n=== Example Complete ===");
}
