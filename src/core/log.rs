//! Transition log for observing how a store's state evolved.
//!
//! Every dispatch that a store applies is captured as an immutable
//! [`TransitionRecord`]. The log itself is a value: [`TransitionLog::record`]
//! returns a new log instead of mutating the old one, so snapshots taken at
//! different times stay independent.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Identifier correlating the dispatches of one asynchronous run.
///
/// A run that starts by dispatching `Pending` and later settles with
/// `Resolved` or `Rejected` tags both records with the same `RunId`, so
/// the pair can be matched up in the log even when runs overlap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Record of a single applied dispatch.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransitionRecord<S> {
    /// State before the action was applied.
    pub from: S,
    /// State after the action was applied.
    pub to: S,
    /// Label of the action that caused the transition.
    pub kind: &'static str,
    /// Run this dispatch belongs to, if it came from an asynchronous task.
    pub run: Option<RunId>,
    /// When the dispatch was applied.
    pub timestamp: DateTime<Utc>,
}

/// Ordered log of applied dispatches.
///
/// The log is immutable: `record` returns a new log with the entry
/// appended and leaves the original untouched.
///
/// # Example
///
/// ```rust
/// use tidepool::core::{CounterState, TransitionLog, TransitionRecord};
/// use chrono::Utc;
///
/// let log = TransitionLog::new();
///
/// let log = log.record(TransitionRecord {
///     from: CounterState::new(0),
///     to: CounterState::new(1),
///     kind: "Increment",
///     run: None,
///     timestamp: Utc::now(),
/// });
///
/// let log = log.record(TransitionRecord {
///     from: CounterState::new(1),
///     to: CounterState::new(2),
///     kind: "Increment",
///     run: None,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(log.kinds(), vec!["Increment", "Increment"]);
/// assert_eq!(log.path().len(), 3); // 0 -> 1 -> 2
/// ```
#[derive(Clone, Debug, Serialize)]
pub struct TransitionLog<S> {
    records: Vec<TransitionRecord<S>>,
}

impl<S> Default for TransitionLog<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> TransitionLog<S> {
    /// Create a new empty log.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Record a dispatch, returning a new log.
    ///
    /// This is a pure function. The existing log is not mutated; the
    /// returned log holds the new entry at the end.
    pub fn record(&self, record: TransitionRecord<S>) -> Self
    where
        S: Clone,
    {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// All recorded dispatches, in application order.
    pub fn records(&self) -> &[TransitionRecord<S>] {
        &self.records
    }

    /// The sequence of states traversed.
    ///
    /// Returns references in order: the initial state, then the `to`
    /// state of each record.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tidepool::core::{CounterState, TransitionLog, TransitionRecord};
    /// use chrono::Utc;
    ///
    /// let log = TransitionLog::new().record(TransitionRecord {
    ///     from: CounterState::new(0),
    ///     to: CounterState::new(5),
    ///     kind: "Increment",
    ///     run: None,
    ///     timestamp: Utc::now(),
    /// });
    ///
    /// let path = log.path();
    /// assert_eq!(path[0], &CounterState::new(0));
    /// assert_eq!(path[1], &CounterState::new(5));
    /// ```
    pub fn path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(&first.from);
        }
        for record in &self.records {
            path.push(&record.to);
        }
        path
    }

    /// The action labels in application order.
    pub fn kinds(&self) -> Vec<&'static str> {
        self.records.iter().map(|record| record.kind).collect()
    }

    /// Elapsed time from the first to the last record.
    ///
    /// Returns `None` while the log is empty.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.first(), self.records.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Number of recorded dispatches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True while nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
