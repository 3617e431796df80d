//! Builder for constructing async tasks.

use std::fmt;

use crate::builder::error::BuildError;
use crate::core::{AsyncReducer, AsyncState};
use crate::runner::{AsyncTask, GuardedStore, Liveness, LivenessToken, SharedStore};

/// Builder for constructing async tasks with a fluent API.
///
/// The liveness scope is required; the initial state defaults to idle and
/// may be set to pending for tasks that start a run immediately. Settled
/// initial states are rejected because a task that begins resolved or
/// rejected never reflects an actual run.
pub struct AsyncTaskBuilder<T, E> {
    initial: AsyncState<T, E>,
    liveness: Option<LivenessToken>,
    store: Option<SharedStore<AsyncReducer<T, E>>>,
}

impl<T, E> AsyncTaskBuilder<T, E>
where
    T: Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
    E: Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
{
    /// Create a new builder starting from the idle state.
    pub fn new() -> Self {
        Self {
            initial: AsyncState::Idle,
            liveness: None,
            store: None,
        }
    }

    /// Bind the task to a liveness scope (required).
    pub fn liveness(mut self, scope: &Liveness) -> Self {
        self.liveness = Some(scope.token());
        self
    }

    /// Set the initial state. Only idle and pending pass validation.
    pub fn initial(mut self, state: AsyncState<T, E>) -> Self {
        self.initial = state;
        self
    }

    /// Dispatch into an existing shared store instead of a fresh one.
    pub fn store(mut self, store: SharedStore<AsyncReducer<T, E>>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the async task.
    /// Returns an error if required fields are missing or invalid.
    pub fn build(self) -> Result<AsyncTask<T, E>, BuildError> {
        let token = self.liveness.ok_or(BuildError::MissingLiveness)?;
        let store = match self.store {
            Some(store) => store,
            None => {
                if self.initial.is_settled() {
                    return Err(BuildError::SettledInitialState {
                        status: self.initial.status(),
                    });
                }
                SharedStore::new(self.initial)
            }
        };
        Ok(AsyncTask::new(GuardedStore::new(store, token)))
    }
}

impl<T, E> Default for AsyncTaskBuilder<T, E>
where
    T: Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
    E: Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
