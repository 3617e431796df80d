//! Persisted Value
//!
//! This example demonstrates keyed write-through persistence with the
//! default JSON codec and key migration.
//!
//! Key concepts:
//! - load_or reads an existing entry or writes the default back
//! - Every set writes through immediately
//! - set_key moves the entry, removing the old key
//!
//! Run with: cargo run --example persisted_value

use tidepool::persist::{KeyValueStore, MemoryStore, PersistError, PersistedValue};

fn main() -> Result<(), PersistError> {
    tracing_subscriber::fmt::init();

    println!("=== Persisted Value ===\n");

    let storage = MemoryStore::new();

    let mut name = PersistedValue::load_or(storage.clone(), "name", "ditto".to_string())?;
    println!("Loaded \"{}\" under key \"{}\"", name.get(), name.key());
    println!("Stored form: {:?}\n", storage.get("name"));

    name.set("mew".to_string())?;
    println!("After set(\"mew\"): {:?}", storage.get("name"));

    name.set_key("pokemon")?;
    println!("After set_key(\"pokemon\"):");
    println!("  old key: {:?}", storage.get("name"));
    println!("  new key: {:?}\n", storage.get("pokemon"));

    drop(name);
    let reloaded = PersistedValue::load_or(storage, "pokemon", String::new())?;
    println!("Reloaded: \"{}\"", reloaded.get());

    println!("\nKey Characteristics:");
    println!("- JSON is the default stored form; codecs are pluggable");
    println!("- Unreadable entries fall back to the default");
    println!("- Key changes never leave stale entries behind");

    println!("\n=== Example Complete ===");
    Ok(())
}
