//! Reducer and action traits for state containers.
//!
//! A reducer is the only place where state transitions happen: a pure
//! function from the current state and one action to the next state.
//! Reducers know nothing about locks, tasks, or time - those live in the
//! imperative shell (`crate::runner`).

use std::fmt::Debug;

/// A tagged value describing one requested state change.
///
/// Actions are closed enums, so every kind a reducer can receive is known
/// at compile time and matched exhaustively; an unrecognized kind is a
/// compile error rather than a runtime throw. The `kind` label is recorded
/// by the transition log and emitted with log events.
///
/// # Example
///
/// ```rust
/// use tidepool::core::Action;
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum TabAction {
///     Next,
///     Select { index: usize },
/// }
///
/// impl Action for TabAction {
///     fn kind(&self) -> &'static str {
///         match self {
///             Self::Next => "Next",
///             Self::Select { .. } => "Select",
///         }
///     }
/// }
///
/// assert_eq!(TabAction::Select { index: 2 }.kind(), "Select");
/// ```
pub trait Action: Debug + Send + 'static {
    /// Stable label for this action kind, used by instrumentation.
    ///
    /// The label must not depend on payload values.
    fn kind(&self) -> &'static str;
}

/// Pure state transition function.
///
/// `reduce` takes the current state by shared reference and one action by
/// value, and returns the next state as a fresh value. It must not mutate
/// its input and must not perform side effects: calling it twice with
/// identical inputs yields structurally equal results.
///
/// Reducers are type-level: they are never instantiated, only named as the
/// type parameter of a store.
///
/// # Required Traits on `State`
///
/// - `Clone`: snapshots are cloned into the transition log and out to
///   observers
/// - `PartialEq`: states must be comparable for change detection and tests
/// - `Debug`: states must be debuggable for diagnostics
/// - `Send + Sync`: shared stores hand snapshots across task boundaries
///
/// # Example
///
/// ```rust
/// use tidepool::core::{Action, Reducer};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Toggle {
///     on: bool,
/// }
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum ToggleAction {
///     Flip,
/// }
///
/// impl Action for ToggleAction {
///     fn kind(&self) -> &'static str {
///         "Flip"
///     }
/// }
///
/// struct ToggleReducer;
///
/// impl Reducer for ToggleReducer {
///     type State = Toggle;
///     type Action = ToggleAction;
///
///     fn reduce(state: &Toggle, _action: ToggleAction) -> Toggle {
///         Toggle { on: !state.on }
///     }
/// }
///
/// let before = Toggle { on: false };
/// let after = ToggleReducer::reduce(&before, ToggleAction::Flip);
/// assert!(after.on);
/// assert!(!before.on); // input untouched
/// ```
pub trait Reducer {
    /// State this reducer operates on.
    type State: Clone + PartialEq + Debug + Send + Sync + 'static;

    /// Actions this reducer handles.
    type Action: Action;

    /// Apply one action to the current state, returning the next state.
    fn reduce(state: &Self::State, action: Self::Action) -> Self::State;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Lamp {
        lit: bool,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum LampAction {
        On,
        Off,
    }

    impl Action for LampAction {
        fn kind(&self) -> &'static str {
            match self {
                Self::On => "On",
                Self::Off => "Off",
            }
        }
    }

    struct LampReducer;

    impl Reducer for LampReducer {
        type State = Lamp;
        type Action = LampAction;

        fn reduce(_state: &Lamp, action: LampAction) -> Lamp {
            match action {
                LampAction::On => Lamp { lit: true },
                LampAction::Off => Lamp { lit: false },
            }
        }
    }

    #[test]
    fn reduce_returns_fresh_state() {
        let before = Lamp { lit: false };
        let after = LampReducer::reduce(&before, LampAction::On);

        assert!(after.lit);
        assert!(!before.lit);
    }

    #[test]
    fn reduce_is_deterministic() {
        let state = Lamp { lit: true };

        let first = LampReducer::reduce(&state, LampAction::Off);
        let second = LampReducer::reduce(&state, LampAction::Off);

        assert_eq!(first, second);
    }

    #[test]
    fn kind_labels_are_stable() {
        assert_eq!(LampAction::On.kind(), "On");
        assert_eq!(LampAction::Off.kind(), "Off");
        assert_eq!(LampAction::On.kind(), LampAction::On.kind());
    }
}
