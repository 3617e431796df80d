//! The lifecycle of one asynchronous operation as a closed sum type.
//!
//! [`AsyncState`] replaces the "status field plus data field plus error
//! field" record that async code tends to accumulate. Because each variant
//! carries only the payload that is meaningful for it, impossible
//! combinations such as a resolved state that still holds an error cannot
//! be constructed at all.
//!
//! [`AsyncReducer`] pairs the state with [`AsyncAction`]: starting a run
//! returns to a clean [`AsyncState::Pending`], and settling replaces the
//! whole state rather than patching fields.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use super::reducer::{Action, Reducer};

/// Where an asynchronous operation currently stands.
///
/// The payload lives inside the variant, so a state can never hold both
/// leftover data and a fresh error.
///
/// # Example
///
/// ```rust
/// use tidepool::core::AsyncState;
///
/// let state: AsyncState<String, String> = AsyncState::Resolved {
///     data: "ditto".to_string(),
/// };
///
/// assert!(state.is_resolved());
/// assert_eq!(state.data(), Some(&"ditto".to_string()));
/// assert_eq!(state.error(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AsyncState<T, E> {
    /// No run has started yet.
    Idle,
    /// A run is in flight.
    Pending,
    /// The most recent run produced `data`.
    Resolved { data: T },
    /// The most recent run failed with `error`.
    Rejected { error: E },
}

impl<T, E> AsyncState<T, E> {
    /// The discriminant without the payload.
    pub fn status(&self) -> AsyncStatus {
        match self {
            Self::Idle => AsyncStatus::Idle,
            Self::Pending => AsyncStatus::Pending,
            Self::Resolved { .. } => AsyncStatus::Resolved,
            Self::Rejected { .. } => AsyncStatus::Rejected,
        }
    }

    /// Resolved payload, if any.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Resolved { data } => Some(data),
            _ => None,
        }
    }

    /// Rejection payload, if any.
    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Rejected { error } => Some(error),
            _ => None,
        }
    }

    /// True before any run has been started.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// True while a run is in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// True once a run has produced data.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }

    /// True once a run has failed.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// True once a run has finished, either way.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Resolved { .. } | Self::Rejected { .. })
    }
}

impl<T, E> Default for AsyncState<T, E> {
    fn default() -> Self {
        Self::Idle
    }
}

/// Payload-free view of an [`AsyncState`] variant.
///
/// Useful for logging and for error messages that should name the phase
/// without dragging the payload types along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AsyncStatus {
    Idle,
    Pending,
    Resolved,
    Rejected,
}

impl AsyncStatus {
    /// Lowercase label, matching the serialized `status` tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Resolved => "resolved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for AsyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle event for an asynchronous operation.
#[derive(Clone, Debug, PartialEq)]
pub enum AsyncAction<T, E> {
    /// A new run started.
    Pending,
    /// The current run produced `data`.
    Resolved { data: T },
    /// The current run failed with `error`.
    Rejected { error: E },
}

impl<T, E> Action for AsyncAction<T, E>
where
    T: fmt::Debug + Send + 'static,
    E: fmt::Debug + Send + 'static,
{
    fn kind(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Resolved { .. } => "Resolved",
            Self::Rejected { .. } => "Rejected",
        }
    }
}

/// Reducer for [`AsyncState`].
///
/// Every action replaces the whole state, so stale payloads from an
/// earlier run can never leak into the next one: `Pending` wipes a
/// previous `Resolved` or `Rejected` clean, and settling from any phase
/// leaves exactly one payload standing.
///
/// # Example
///
/// ```rust
/// use tidepool::core::{AsyncAction, AsyncReducer, AsyncState, Reducer};
///
/// type Fetch = AsyncReducer<String, String>;
///
/// let state = AsyncState::default();
/// let state = Fetch::reduce(&state, AsyncAction::Pending);
/// assert!(state.is_pending());
///
/// let state = Fetch::reduce(
///     &state,
///     AsyncAction::Resolved { data: "ditto".to_string() },
/// );
/// assert_eq!(state.data().map(String::as_str), Some("ditto"));
///
/// // Starting over discards the old payload entirely.
/// let state = Fetch::reduce(&state, AsyncAction::Pending);
/// assert_eq!(state.data(), None);
/// ```
pub struct AsyncReducer<T, E> {
    _marker: PhantomData<fn() -> (T, E)>,
}

impl<T, E> Reducer for AsyncReducer<T, E>
where
    T: Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
    E: Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
{
    type State = AsyncState<T, E>;
    type Action = AsyncAction<T, E>;

    fn reduce(_state: &AsyncState<T, E>, action: AsyncAction<T, E>) -> AsyncState<T, E> {
        match action {
            AsyncAction::Pending => AsyncState::Pending,
            AsyncAction::Resolved { data } => AsyncState::Resolved { data },
            AsyncAction::Rejected { error } => AsyncState::Rejected { error },
        }
    }
}
