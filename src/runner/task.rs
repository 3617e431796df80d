//! Driving asynchronous operations through a guarded store.
//!
//! [`AsyncTask`] owns the dispatch protocol for one async operation: each
//! run gets a fresh [`RunId`], dispatches `Pending`, awaits its future, and
//! settles with `Resolved` or `Rejected`. Every dispatch goes through the
//! guarded store, so a run whose scope retired mid-flight settles into
//! nothing: the future finishes, the state stays untouched.

use std::future::Future;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::store::{DispatchOutcome, GuardedStore};
use crate::core::{AsyncAction, AsyncReducer, AsyncState, RunId, TransitionLog};

/// Runner for one asynchronous operation.
///
/// Cheap to clone; clones share the store and scope.
///
/// # Example
///
/// ```rust
/// use tidepool::builder::async_task;
/// use tidepool::runner::Liveness;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let scope = Liveness::new();
/// let task = async_task::<String, String>(&scope);
///
/// let outcome = task.run(async { Ok("ditto".to_string()) }).await;
///
/// assert!(outcome.is_applied());
/// assert_eq!(task.snapshot().data().map(String::as_str), Some("ditto"));
/// # }
/// ```
pub struct AsyncTask<T, E> {
    store: GuardedStore<AsyncReducer<T, E>>,
}

impl<T, E> Clone for AsyncTask<T, E>
where
    T: Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static,
    E: Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<T, E> AsyncTask<T, E>
where
    T: Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static,
    E: Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static,
{
    /// Create a task dispatching into `store`.
    pub fn new(store: GuardedStore<AsyncReducer<T, E>>) -> Self {
        Self { store }
    }

    /// Run `fut` through the pending/settle protocol.
    ///
    /// Dispatches `Pending`, awaits the future, then dispatches `Resolved`
    /// or `Rejected`. All three dispatches are guarded: once the scope has
    /// retired they are discarded, but the future itself still runs to
    /// completion. The returned outcome is the settle dispatch's.
    pub async fn run<F>(&self, fut: F) -> DispatchOutcome<AsyncState<T, E>>
    where
        F: Future<Output = Result<T, E>>,
    {
        let run = RunId::new();
        let _ = self.store.dispatch_run(AsyncAction::Pending, run);
        match fut.await {
            Ok(data) => self.store.dispatch_run(AsyncAction::Resolved { data }, run),
            Err(error) => self.store.dispatch_run(AsyncAction::Rejected { error }, run),
        }
    }

    /// Spawn `fut` as a detached run on the tokio runtime.
    pub fn spawn<F>(&self, fut: F) -> JoinHandle<DispatchOutcome<AsyncState<T, E>>>
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        let task = self.clone();
        tokio::spawn(async move { task.run(fut).await })
    }

    /// Re-run whenever a watched trigger changes.
    ///
    /// Calls `factory` with the current trigger value, runs the returned
    /// future if there is one, then waits for the next change. A `None`
    /// from the factory skips that value without touching the state. The
    /// spawned worker exits when the trigger sender is dropped or the
    /// scope retires.
    pub fn watch_triggers<K, F, Fut>(
        &self,
        mut triggers: watch::Receiver<K>,
        mut factory: F,
    ) -> JoinHandle<()>
    where
        K: Clone + Send + Sync + 'static,
        F: FnMut(&K) -> Option<Fut> + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let task = self.clone();
        tokio::spawn(async move {
            loop {
                let trigger = triggers.borrow_and_update().clone();
                if let Some(fut) = factory(&trigger) {
                    let _ = task.run(fut).await;
                }
                tokio::select! {
                    changed = triggers.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    _ = task.store.token().retired() => break,
                }
            }
        })
    }

    /// Settle directly with `data`, outside any run.
    pub fn set_data(&self, data: T) -> DispatchOutcome<AsyncState<T, E>> {
        self.store.dispatch(AsyncAction::Resolved { data })
    }

    /// Settle directly with `error`, outside any run.
    pub fn set_error(&self, error: E) -> DispatchOutcome<AsyncState<T, E>> {
        self.store.dispatch(AsyncAction::Rejected { error })
    }

    /// A clone of the current state.
    pub fn snapshot(&self) -> AsyncState<T, E> {
        self.store.snapshot()
    }

    /// Watch receiver that tracks the latest applied state.
    pub fn subscribe(&self) -> watch::Receiver<AsyncState<T, E>> {
        self.store.subscribe()
    }

    /// A clone of the transition log.
    pub fn log(&self) -> TransitionLog<AsyncState<T, E>> {
        self.store.log()
    }

    /// The guarded store this task dispatches into.
    pub fn store(&self) -> &GuardedStore<AsyncReducer<T, E>> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{Liveness, SharedStore};
    use std::sync::Arc;
    use tokio::sync::Notify;

    type FetchTask = AsyncTask<String, String>;

    fn task_in_scope() -> (Liveness, FetchTask) {
        let scope = Liveness::new();
        let store = SharedStore::new(AsyncState::default());
        let task = AsyncTask::new(GuardedStore::new(store, scope.token()));
        (scope, task)
    }

    #[tokio::test]
    async fn run_resolves_with_data() {
        let (_scope, task) = task_in_scope();

        let outcome = task.run(async { Ok("ditto".to_string()) }).await;

        assert!(outcome.is_applied());
        assert_eq!(task.snapshot().data().map(String::as_str), Some("ditto"));
        assert_eq!(task.log().kinds(), vec!["Pending", "Resolved"]);
    }

    #[tokio::test]
    async fn run_rejects_with_error() {
        let (_scope, task) = task_in_scope();

        let outcome = task.run(async { Err("network error".to_string()) }).await;

        assert!(outcome.is_applied());
        assert_eq!(
            task.snapshot().error().map(String::as_str),
            Some("network error")
        );
        assert_eq!(task.log().kinds(), vec!["Pending", "Rejected"]);
    }

    #[tokio::test]
    async fn run_ids_pair_pending_with_settle() {
        let (_scope, task) = task_in_scope();

        let _ = task.run(async { Ok("ditto".to_string()) }).await;

        let log = task.log();
        let records = log.records();
        assert!(records[0].run.is_some());
        assert_eq!(records[0].run, records[1].run);
    }

    #[tokio::test]
    async fn consecutive_runs_get_distinct_ids() {
        let (_scope, task) = task_in_scope();

        let _ = task.run(async { Ok("first".to_string()) }).await;
        let _ = task.run(async { Ok("second".to_string()) }).await;

        let log = task.log();
        let records = log.records();
        assert_ne!(records[0].run, records[2].run);
    }

    #[tokio::test]
    async fn retired_scope_discards_whole_run() {
        let (scope, task) = task_in_scope();
        scope.retire();

        let outcome = task.run(async { Ok("ditto".to_string()) }).await;

        assert!(outcome.is_discarded());
        assert!(task.snapshot().is_idle());
        assert!(task.log().is_empty());
    }

    #[tokio::test]
    async fn late_completion_after_retire_is_discarded() {
        let (scope, task) = task_in_scope();
        let gate = Arc::new(Notify::new());

        let fut = {
            let gate = Arc::clone(&gate);
            async move {
                gate.notified().await;
                Ok("too late".to_string())
            }
        };
        let handle = task.spawn(fut);

        let mut watcher = task.subscribe();
        watcher
            .wait_for(AsyncState::is_pending)
            .await
            .expect("publisher should be alive");

        scope.retire();
        gate.notify_one();

        let outcome = handle.await.expect("run should finish");
        assert!(outcome.is_discarded());
        assert!(task.snapshot().is_pending());
        assert_eq!(task.log().kinds(), vec!["Pending"]);
    }

    #[tokio::test]
    async fn set_data_and_set_error_are_guarded() {
        let (scope, task) = task_in_scope();

        let outcome = task.set_data("ditto".to_string());
        assert!(outcome.is_applied());

        let outcome = task.set_error("network error".to_string());
        assert!(outcome.is_applied());
        assert!(task.snapshot().is_rejected());

        scope.retire();
        let outcome = task.set_data("ignored".to_string());
        assert!(outcome.is_discarded());
        assert!(task.snapshot().is_rejected());
    }

    #[tokio::test]
    async fn watch_triggers_runs_on_change() {
        let (_scope, task) = task_in_scope();
        let (sender, receiver) = watch::channel::<Option<String>>(None);

        let worker = task.watch_triggers(receiver, |name| {
            let name = name.clone()?;
            Some(async move { Ok(format!("fetched {name}")) })
        });

        sender
            .send(Some("mew".to_string()))
            .expect("worker should be listening");

        let mut watcher = task.subscribe();
        let state = watcher
            .wait_for(AsyncState::is_resolved)
            .await
            .expect("publisher should be alive");
        assert_eq!(state.data().map(String::as_str), Some("fetched mew"));
        drop(state);

        drop(sender);
        worker.await.expect("worker should exit cleanly");

        // The initial None trigger was skipped, so exactly one run happened.
        assert_eq!(task.log().kinds(), vec!["Pending", "Resolved"]);
    }

    #[tokio::test]
    async fn watch_triggers_stops_when_scope_retires() {
        let (scope, task) = task_in_scope();
        let (sender, receiver) = watch::channel::<Option<String>>(None);

        let worker = task.watch_triggers(receiver, |name| {
            let name = name.clone()?;
            Some(async move { Ok(name) })
        });

        sender
            .send(Some("mew".to_string()))
            .expect("worker should be listening");
        let mut watcher = task.subscribe();
        watcher
            .wait_for(AsyncState::is_resolved)
            .await
            .expect("publisher should be alive");

        scope.retire();
        worker.await.expect("worker should exit cleanly");

        // The sender is still alive; retirement alone stopped the worker.
        drop(sender);
    }
}
