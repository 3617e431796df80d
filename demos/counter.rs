//! Counter Store
//!
//! This example demonstrates the smallest useful reducer driving a store.
//!
//! Key concepts:
//! - Pure reducers: state changes only through (state, action) -> state
//! - Dispatch through a single-owner store
//! - The transition log as a record of everything applied
//!
//! Run with: cargo run --example counter

use tidepool::builder::counter_store;
use tidepool::core::CounterAction;

fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Counter Store ===\n");

    let mut store = counter_store(0);
    println!("Counter store created");
    println!("Initial state: {:?}\n", store.state());

    println!("Dispatch sequence:");
    store.dispatch(CounterAction::Increment { step: 1 });
    println!("  Increment step 1 -> {:?}", store.state());
    store.dispatch(CounterAction::Increment { step: 1 });
    println!("  Increment step 1 -> {:?}", store.state());
    store.dispatch(CounterAction::Decrement { step: 5 });
    println!("  Decrement step 5 -> {:?}\n", store.state());

    println!("Transition log:");
    for record in store.log().records() {
        println!("  {} : {:?} -> {:?}", record.kind, record.from, record.to);
    }

    println!("\nKey Characteristics:");
    println!("- The reducer is pure; dispatch is the only way state changes");
    println!("- Saturating arithmetic at the i64 bounds");
    println!("- Every dispatch is recorded with a timestamp");

    println!("\n=== Example Complete ===");
}
