//! Counter state, the smallest useful reducer.
//!
//! A worked example of the reducer contract that the rest of the crate
//! builds on, and a convenient state for exercising stores in tests and
//! demos.

use serde::{Deserialize, Serialize};

use super::reducer::{Action, Reducer};

/// Counter value owned by one store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterState {
    /// Current count.
    pub count: i64,
}

impl CounterState {
    /// Create a counter starting at `count`.
    pub fn new(count: i64) -> Self {
        Self { count }
    }
}

/// Requested change to a counter.
///
/// Both variants carry the step magnitude so the reducer stays a pure
/// function of its inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterAction {
    /// Add `step` to the count.
    Increment { step: i64 },
    /// Subtract `step` from the count.
    Decrement { step: i64 },
}

impl Action for CounterAction {
    fn kind(&self) -> &'static str {
        match self {
            Self::Increment { .. } => "Increment",
            Self::Decrement { .. } => "Decrement",
        }
    }
}

/// Reducer for [`CounterState`].
///
/// Arithmetic saturates at the `i64` bounds instead of wrapping.
///
/// # Example
///
/// ```rust
/// use tidepool::core::{CounterAction, CounterReducer, CounterState, Reducer};
///
/// let zero = CounterState::default();
/// let one = CounterReducer::reduce(&zero, CounterAction::Increment { step: 1 });
/// let two = CounterReducer::reduce(&one, CounterAction::Increment { step: 1 });
///
/// assert_eq!(two.count, 2);
/// assert_eq!(zero.count, 0);
/// ```
pub struct CounterReducer;

impl Reducer for CounterReducer {
    type State = CounterState;
    type Action = CounterAction;

    fn reduce(state: &CounterState, action: CounterAction) -> CounterState {
        match action {
            CounterAction::Increment { step } => CounterState {
                count: state.count.saturating_add(step),
            },
            CounterAction::Decrement { step } => CounterState {
                count: state.count.saturating_sub(step),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_increments_from_zero() {
        let state = CounterState::default();

        let state = CounterReducer::reduce(&state, CounterAction::Increment { step: 1 });
        let state = CounterReducer::reduce(&state, CounterAction::Increment { step: 1 });

        assert_eq!(state, CounterState { count: 2 });
    }

    #[test]
    fn decrement_subtracts_step() {
        let state = CounterState::new(10);

        let state = CounterReducer::reduce(&state, CounterAction::Decrement { step: 3 });

        assert_eq!(state.count, 7);
    }

    #[test]
    fn step_magnitude_is_respected() {
        let state = CounterState::default();

        let state = CounterReducer::reduce(&state, CounterAction::Increment { step: 5 });

        assert_eq!(state.count, 5);
    }

    #[test]
    fn reduce_does_not_mutate_input() {
        let before = CounterState::new(4);

        let _ = CounterReducer::reduce(&before, CounterAction::Increment { step: 1 });

        assert_eq!(before.count, 4);
    }

    #[test]
    fn arithmetic_saturates_at_bounds() {
        let top = CounterState::new(i64::MAX);
        let bumped = CounterReducer::reduce(&top, CounterAction::Increment { step: 1 });
        assert_eq!(bumped.count, i64::MAX);

        let bottom = CounterState::new(i64::MIN);
        let dropped = CounterReducer::reduce(&bottom, CounterAction::Decrement { step: 1 });
        assert_eq!(dropped.count, i64::MIN);
    }

    #[test]
    fn action_kinds() {
        assert_eq!(CounterAction::Increment { step: 1 }.kind(), "Increment");
        assert_eq!(CounterAction::Decrement { step: 1 }.kind(), "Decrement");
    }

    #[test]
    fn counter_state_serializes() {
        let state = CounterState::new(42);
        let json = serde_json::to_string(&state).unwrap();
        let back: CounterState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
