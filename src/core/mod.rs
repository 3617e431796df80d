//! Core reducer types and logic.
//!
//! This module contains the pure functional core of the crate:
//! - Action and reducer contracts via the `Action` and `Reducer` traits
//! - The async operation lifecycle as the `AsyncState` sum type
//! - Immutable transition logging
//! - A minimal counter reducer used throughout tests and demos
//!
//! All logic in this module is pure (no side effects), following
//! the "pure core, imperative shell" philosophy.

mod async_state;
mod counter;
mod log;
mod reducer;

pub use async_state::{AsyncAction, AsyncReducer, AsyncState, AsyncStatus};
pub use counter::{CounterAction, CounterReducer, CounterState};
pub use log::{RunId, TransitionLog, TransitionRecord};
pub use reducer::{Action, Reducer};
