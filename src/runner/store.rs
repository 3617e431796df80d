//! Stores that drive reducers and publish their state.
//!
//! [`Store`] is the single-owner container: it holds the current state,
//! runs the reducer on each dispatch, and keeps the transition log.
//! [`SharedStore`] wraps one in `Arc<RwLock<..>>` plus a watch channel so
//! clones in different tasks dispatch against the same state and observers
//! can await snapshots. [`GuardedStore`] binds a shared store to a
//! [`LivenessToken`] so dispatches from a retired scope are discarded
//! instead of applied.

use std::marker::PhantomData;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use tokio::sync::watch;

use super::liveness::LivenessToken;
use crate::core::{Action, Reducer, RunId, TransitionLog, TransitionRecord};

/// What became of a guarded dispatch.
#[derive(Clone, Debug, PartialEq)]
#[must_use = "check whether the dispatch was applied or discarded"]
pub enum DispatchOutcome<S> {
    /// The action was applied; the payload is the state after reduction.
    Applied(S),
    /// The owning scope had retired, so the action was dropped.
    Discarded,
}

impl<S> DispatchOutcome<S> {
    /// True if the action was applied.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// True if the action was dropped.
    pub fn is_discarded(&self) -> bool {
        matches!(self, Self::Discarded)
    }

    /// The resulting state, if the action was applied.
    pub fn applied(&self) -> Option<&S> {
        match self {
            Self::Applied(state) => Some(state),
            Self::Discarded => None,
        }
    }

    /// Consume the outcome, yielding the resulting state if applied.
    pub fn into_applied(self) -> Option<S> {
        match self {
            Self::Applied(state) => Some(state),
            Self::Discarded => None,
        }
    }
}

/// Single-owner state container.
///
/// Holds the current state and the log of every applied dispatch. The
/// reducer runs synchronously inside [`dispatch`](Store::dispatch); state
/// only ever changes through it.
///
/// # Example
///
/// ```rust
/// use tidepool::core::{CounterAction, CounterReducer, CounterState};
/// use tidepool::runner::Store;
///
/// let mut store: Store<CounterReducer> = Store::new(CounterState::default());
/// store.dispatch(CounterAction::Increment { step: 1 });
/// store.dispatch(CounterAction::Increment { step: 1 });
///
/// assert_eq!(store.state().count, 2);
/// assert_eq!(store.log().kinds(), vec!["Increment", "Increment"]);
/// ```
pub struct Store<R: Reducer> {
    state: R::State,
    log: TransitionLog<R::State>,
    _reducer: PhantomData<fn() -> R>,
}

impl<R: Reducer> Store<R> {
    /// Create a store holding `initial`.
    pub fn new(initial: R::State) -> Self {
        Self {
            state: initial,
            log: TransitionLog::new(),
            _reducer: PhantomData,
        }
    }

    /// The current state.
    pub fn state(&self) -> &R::State {
        &self.state
    }

    /// Apply `action` through the reducer and return the new state.
    pub fn dispatch(&mut self, action: R::Action) -> &R::State {
        self.dispatch_tagged(action, None)
    }

    pub(crate) fn dispatch_tagged(&mut self, action: R::Action, run: Option<RunId>) -> &R::State {
        let kind = action.kind();
        let from = self.state.clone();
        let to = R::reduce(&from, action);
        tracing::debug!(target: "tidepool::store", kind, ?run, "dispatch applied");
        self.log = self.log.record(TransitionRecord {
            from,
            to: to.clone(),
            kind,
            run,
            timestamp: Utc::now(),
        });
        self.state = to;
        &self.state
    }

    /// The log of applied dispatches.
    pub fn log(&self) -> &TransitionLog<R::State> {
        &self.log
    }
}

/// Store shared between tasks.
///
/// Clones are cheap handles to the same state. Dispatches from any clone
/// serialize through one write lock, and every applied state is published
/// on a watch channel for observers obtained via
/// [`subscribe`](SharedStore::subscribe).
///
/// # Example
///
/// ```rust
/// use tidepool::core::{CounterAction, CounterReducer, CounterState};
/// use tidepool::runner::SharedStore;
///
/// let store = SharedStore::<CounterReducer>::new(CounterState::default());
/// let handle = store.clone();
///
/// handle.dispatch(CounterAction::Increment { step: 3 });
///
/// assert_eq!(store.snapshot().count, 3);
/// ```
pub struct SharedStore<R: Reducer> {
    inner: Arc<RwLock<Store<R>>>,
    publisher: Arc<watch::Sender<R::State>>,
}

impl<R: Reducer> Clone for SharedStore<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            publisher: Arc::clone(&self.publisher),
        }
    }
}

impl<R: Reducer> SharedStore<R> {
    /// Create a shared store holding `initial`.
    pub fn new(initial: R::State) -> Self {
        let (publisher, _) = watch::channel(initial.clone());
        Self {
            inner: Arc::new(RwLock::new(Store::new(initial))),
            publisher: Arc::new(publisher),
        }
    }

    /// A clone of the current state.
    pub fn snapshot(&self) -> R::State {
        self.inner.read().state().clone()
    }

    /// Apply `action` through the reducer and return the new state.
    pub fn dispatch(&self, action: R::Action) -> R::State {
        let mut store = self.inner.write();
        let next = store.dispatch(action).clone();
        // Publish inside the critical section so watchers observe states
        // in log order.
        self.publisher.send_replace(next.clone());
        next
    }

    pub(crate) fn dispatch_if(
        &self,
        token: &LivenessToken,
        action: R::Action,
        run: Option<RunId>,
    ) -> DispatchOutcome<R::State> {
        let mut store = self.inner.write();
        // The liveness check happens under the write lock, so a dispatch
        // that starts after retire can never apply.
        if !token.is_live() {
            tracing::trace!(
                target: "tidepool::store",
                kind = action.kind(),
                "dispatch discarded, scope retired"
            );
            return DispatchOutcome::Discarded;
        }
        let next = store.dispatch_tagged(action, run).clone();
        self.publisher.send_replace(next.clone());
        DispatchOutcome::Applied(next)
    }

    /// Watch receiver that tracks the latest applied state.
    pub fn subscribe(&self) -> watch::Receiver<R::State> {
        self.publisher.subscribe()
    }

    /// A clone of the transition log.
    pub fn log(&self) -> TransitionLog<R::State> {
        self.inner.read().log().clone()
    }
}

/// Shared store bound to a liveness scope.
///
/// Every dispatch through a guarded store checks the scope first. While
/// the scope is live the dispatch applies as usual; after the scope
/// retires the action is dropped and [`DispatchOutcome::Discarded`] comes
/// back. The underlying state and log are left exactly as they were.
///
/// # Example
///
/// ```rust
/// use tidepool::core::{CounterAction, CounterReducer, CounterState};
/// use tidepool::runner::{GuardedStore, Liveness, SharedStore};
///
/// let scope = Liveness::new();
/// let store = SharedStore::<CounterReducer>::new(CounterState::default());
/// let guarded = GuardedStore::new(store, scope.token());
///
/// let outcome = guarded.dispatch(CounterAction::Increment { step: 1 });
/// assert!(outcome.is_applied());
///
/// scope.retire();
/// let outcome = guarded.dispatch(CounterAction::Increment { step: 1 });
/// assert!(outcome.is_discarded());
/// assert_eq!(guarded.snapshot().count, 1);
/// ```
pub struct GuardedStore<R: Reducer> {
    store: SharedStore<R>,
    token: LivenessToken,
}

impl<R: Reducer> Clone for GuardedStore<R> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            token: self.token.clone(),
        }
    }
}

impl<R: Reducer> GuardedStore<R> {
    /// Bind `store` to the scope behind `token`.
    pub fn new(store: SharedStore<R>, token: LivenessToken) -> Self {
        Self { store, token }
    }

    /// Apply `action` if the scope is still live.
    pub fn dispatch(&self, action: R::Action) -> DispatchOutcome<R::State> {
        self.store.dispatch_if(&self.token, action, None)
    }

    pub(crate) fn dispatch_run(&self, action: R::Action, run: RunId) -> DispatchOutcome<R::State> {
        self.store.dispatch_if(&self.token, action, Some(run))
    }

    /// A clone of the current state.
    pub fn snapshot(&self) -> R::State {
        self.store.snapshot()
    }

    /// Watch receiver that tracks the latest applied state.
    pub fn subscribe(&self) -> watch::Receiver<R::State> {
        self.store.subscribe()
    }

    /// A clone of the transition log.
    pub fn log(&self) -> TransitionLog<R::State> {
        self.store.log()
    }

    /// The underlying shared store.
    pub fn store(&self) -> &SharedStore<R> {
        &self.store
    }

    /// The token guarding this store.
    pub fn token(&self) -> &LivenessToken {
        &self.token
    }
}
