//! Builder API for ergonomic store and task construction.
//!
//! This module provides fluent builders and macros for creating stores
//! and async tasks with minimal boilerplate while maintaining type safety.

pub mod error;
pub mod macros;
pub mod store;
pub mod task;

pub use error::BuildError;
pub use store::StoreBuilder;
pub use task::AsyncTaskBuilder;

use std::fmt;

use crate::core::{CounterReducer, CounterState};
use crate::runner::{AsyncTask, Liveness, SharedStore, Store};

/// Create a single-owner counter store starting at `initial`.
///
/// # Example
///
/// ```
/// use tidepool::builder::counter_store;
/// use tidepool::core::CounterAction;
///
/// let mut store = counter_store(0);
/// store.dispatch(CounterAction::Increment { step: 1 });
///
/// assert_eq!(store.state().count, 1);
/// ```
pub fn counter_store(initial: i64) -> Store<CounterReducer> {
    StoreBuilder::new()
        .initial(CounterState::new(initial))
        .build()
        .expect("Counter store should always build")
}

/// Create a shared counter store starting at `initial`.
///
/// # Example
///
/// ```
/// use tidepool::builder::shared_counter;
/// use tidepool::core::CounterAction;
///
/// let store = shared_counter(10);
/// let handle = store.clone();
/// handle.dispatch(CounterAction::Decrement { step: 4 });
///
/// assert_eq!(store.snapshot().count, 6);
/// ```
pub fn shared_counter(initial: i64) -> SharedStore<CounterReducer> {
    StoreBuilder::new()
        .initial(CounterState::new(initial))
        .build_shared()
        .expect("Shared counter store should always build")
}

/// Create an idle async task bound to `scope`.
///
/// # Example
///
/// ```
/// use tidepool::builder::async_task;
/// use tidepool::runner::Liveness;
///
/// let scope = Liveness::new();
/// let task = async_task::<String, String>(&scope);
///
/// assert!(task.snapshot().is_idle());
/// ```
pub fn async_task<T, E>(scope: &Liveness) -> AsyncTask<T, E>
where
    T: Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
    E: Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
{
    AsyncTaskBuilder::new()
        .liveness(scope)
        .build()
        .expect("Idle async task should always build")
}
