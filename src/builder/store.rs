//! Builder for constructing stores.

use crate::builder::error::BuildError;
use crate::core::Reducer;
use crate::runner::{GuardedStore, Liveness, LivenessToken, SharedStore, Store};

/// Builder for constructing stores with a fluent API.
pub struct StoreBuilder<R: Reducer> {
    initial: Option<R::State>,
    liveness: Option<LivenessToken>,
}

impl<R: Reducer> StoreBuilder<R> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            liveness: None,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: R::State) -> Self {
        self.initial = Some(state);
        self
    }

    /// Bind the store to a liveness scope (required for guarded stores).
    pub fn liveness(mut self, scope: &Liveness) -> Self {
        self.liveness = Some(scope.token());
        self
    }

    /// Build a single-owner store.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<Store<R>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        Ok(Store::new(initial))
    }

    /// Build a store shared between tasks.
    pub fn build_shared(self) -> Result<SharedStore<R>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        Ok(SharedStore::new(initial))
    }

    /// Build a shared store bound to the configured liveness scope.
    pub fn build_guarded(self) -> Result<GuardedStore<R>, BuildError> {
        let token = self.liveness.clone().ok_or(BuildError::MissingLiveness)?;
        let store = self.build_shared()?;
        Ok(GuardedStore::new(store, token))
    }
}

impl<R: Reducer> Default for StoreBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}
