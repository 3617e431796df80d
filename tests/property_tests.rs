//! Property-based tests for core reducer types.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use chrono::Utc;
use proptest::prelude::*;
use tidepool::core::{
    Action, AsyncAction, AsyncReducer, AsyncState, CounterAction, CounterReducer, CounterState,
    Reducer, TransitionLog, TransitionRecord,
};
use tidepool::runner::Store;

type Fetch = AsyncReducer<String, String>;

prop_compose! {
    fn arbitrary_counter_action()(increment in any::<bool>(), step in 0..1000i64) -> CounterAction {
        if increment {
            CounterAction::Increment { step }
        } else {
            CounterAction::Decrement { step }
        }
    }
}

prop_compose! {
    fn arbitrary_async_action()(variant in 0..3u8, payload in "[a-z]{0,12}") -> AsyncAction<String, String> {
        match variant {
            0 => AsyncAction::Pending,
            1 => AsyncAction::Resolved { data: payload },
            _ => AsyncAction::Rejected { error: payload },
        }
    }
}

proptest! {
    #[test]
    fn counter_reduce_is_deterministic(
        count in -1000..1000i64,
        action in arbitrary_counter_action()
    ) {
        let state = CounterState::new(count);
        let first = CounterReducer::reduce(&state, action);
        let second = CounterReducer::reduce(&state, action);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn counter_reduce_leaves_input_untouched(
        count in -1000..1000i64,
        action in arbitrary_counter_action()
    ) {
        let state = CounterState::new(count);
        let _ = CounterReducer::reduce(&state, action);
        prop_assert_eq!(state, CounterState::new(count));
    }

    #[test]
    fn counter_arithmetic_never_panics(count in any::<i64>(), step in any::<i64>()) {
        let state = CounterState::new(count);
        let incremented = CounterReducer::reduce(&state, CounterAction::Increment { step });
        prop_assert_eq!(incremented.count, count.saturating_add(step));
        let decremented = CounterReducer::reduce(&state, CounterAction::Decrement { step });
        prop_assert_eq!(decremented.count, count.saturating_sub(step));
    }

    #[test]
    fn increment_then_decrement_is_identity(
        count in -1_000_000..1_000_000i64,
        step in 0..1000i64
    ) {
        let state = CounterState::new(count);
        let up = CounterReducer::reduce(&state, CounterAction::Increment { step });
        let back = CounterReducer::reduce(&up, CounterAction::Decrement { step });
        prop_assert_eq!(back, state);
    }

    #[test]
    fn dispatch_sequence_accumulates(
        actions in prop::collection::vec(arbitrary_counter_action(), 0..20)
    ) {
        let mut store: Store<CounterReducer> = Store::new(CounterState::default());
        let mut expected = 0i64;

        for action in &actions {
            match action {
                CounterAction::Increment { step } => expected += step,
                CounterAction::Decrement { step } => expected -= step,
            }
            store.dispatch(*action);
        }

        prop_assert_eq!(store.state().count, expected);
        prop_assert_eq!(store.log().len(), actions.len());
    }

    #[test]
    fn async_payloads_are_exclusive(
        actions in prop::collection::vec(arbitrary_async_action(), 0..12)
    ) {
        let mut state: AsyncState<String, String> = AsyncState::default();

        for action in actions {
            state = Fetch::reduce(&state, action);

            let payloads =
                usize::from(state.data().is_some()) + usize::from(state.error().is_some());
            prop_assert!(payloads <= 1);
            prop_assert_eq!(state.is_settled(), payloads == 1);
        }
    }

    #[test]
    fn pending_clears_previous_payload(
        actions in prop::collection::vec(arbitrary_async_action(), 0..8)
    ) {
        let mut state: AsyncState<String, String> = AsyncState::default();
        for action in actions {
            state = Fetch::reduce(&state, action);
        }

        let state = Fetch::reduce(&state, AsyncAction::Pending);

        prop_assert!(state.is_pending());
        prop_assert_eq!(state.data(), None);
        prop_assert_eq!(state.error(), None);
    }

    #[test]
    fn log_preserves_dispatch_order(
        actions in prop::collection::vec(arbitrary_counter_action(), 1..10)
    ) {
        let mut store: Store<CounterReducer> = Store::new(CounterState::default());
        let mut expected_kinds = Vec::new();
        let mut expected_path = vec![CounterState::default()];

        for action in &actions {
            expected_kinds.push(action.kind());
            let next = CounterReducer::reduce(expected_path.last().unwrap(), *action);
            expected_path.push(next);
            store.dispatch(*action);
        }

        prop_assert_eq!(store.log().kinds(), expected_kinds);

        let path = store.log().path();
        prop_assert_eq!(path.len(), expected_path.len());
        for (i, state) in path.iter().enumerate() {
            prop_assert_eq!(*state, &expected_path[i]);
        }
    }

    #[test]
    fn log_record_is_pure(count in -100..100i64, action in arbitrary_counter_action()) {
        let log = TransitionLog::new();
        let from = CounterState::new(count);

        let grown = log.record(TransitionRecord {
            to: CounterReducer::reduce(&from, action),
            kind: action.kind(),
            from,
            run: None,
            timestamp: Utc::now(),
        });

        // Original log unchanged
        prop_assert_eq!(log.len(), 0);
        // New log has the record
        prop_assert_eq!(grown.len(), 1);
    }

    #[test]
    fn async_state_serializes_with_status_tag(
        actions in prop::collection::vec(arbitrary_async_action(), 0..6)
    ) {
        let mut state: AsyncState<String, String> = AsyncState::default();
        for action in actions {
            state = Fetch::reduce(&state, action);
        }

        let json = serde_json::to_value(&state).unwrap();

        prop_assert_eq!(json["status"].as_str(), Some(state.status().as_str()));
    }

    #[test]
    fn async_state_roundtrip_serialization(
        actions in prop::collection::vec(arbitrary_async_action(), 0..6)
    ) {
        let mut state: AsyncState<String, String> = AsyncState::default();
        for action in actions {
            state = Fetch::reduce(&state, action);
        }

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: AsyncState<String, String> = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(state, deserialized);
    }
}
