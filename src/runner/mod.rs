//! Stores, scopes, and async runners around the pure core.
//!
//! This module provides the "imperative shell" around the pure reducers,
//! implementing dispatch with locking, liveness guarding, and tokio tasks.
//!
//! # Key Concepts
//!
//! - **Stores**: Own state and run the reducer on every dispatch
//! - **Liveness**: Marks a scope's lifetime; retired scopes discard dispatches
//! - **Async tasks**: Drive futures through the pending/settle protocol
//!
//! # Teardown Safety
//!
//! A dispatch that starts after its scope retires is discarded, never
//! applied. In-flight futures still run to completion; only their effect
//! on the store is dropped.

mod liveness;
mod store;
mod task;

pub use liveness::{Liveness, LivenessToken};
pub use store::{DispatchOutcome, GuardedStore, SharedStore, Store};
pub use task::AsyncTask;
