//! Tidepool: reducer-driven state containers with teardown-safe async dispatch
//!
//! Tidepool is built on the "pure core, imperative shell" philosophy.
//! State only ever changes through pure reducers, while stores, liveness
//! scopes, and tokio tasks form the shell that drives them. Once a scope
//! retires, every dispatch bound to it is discarded instead of applied,
//! so late async completions can never write into torn-down state.
//!
//! # Core Concepts
//!
//! - **Reducers**: Pure `(state, action) -> state` functions via the `Reducer` trait
//! - **Stores**: Containers that apply dispatches and log every transition
//! - **Liveness**: Scope handles that turn dispatches into no-ops after teardown
//! - **Async tasks**: The pending/settle protocol for futures, with run correlation
//!
//! # Example
//!
//! ```rust
//! use tidepool::builder::counter_store;
//! use tidepool::core::CounterAction;
//!
//! let mut store = counter_store(0);
//! store.dispatch(CounterAction::Increment { step: 1 });
//! store.dispatch(CounterAction::Increment { step: 1 });
//!
//! assert_eq!(store.state().count, 2);
//! assert_eq!(store.log().kinds(), vec!["Increment", "Increment"]);
//! ```

pub mod builder;
pub mod core;
pub mod persist;
pub mod runner;

// Re-export commonly used types
pub use core::{
    Action, AsyncAction, AsyncReducer, AsyncState, AsyncStatus, CounterAction, CounterReducer,
    CounterState, Reducer, RunId, TransitionLog, TransitionRecord,
};
pub use runner::{
    AsyncTask, DispatchOutcome, GuardedStore, Liveness, LivenessToken, SharedStore, Store,
};
