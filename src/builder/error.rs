//! Build errors for store and async task builders.

use thiserror::Error;

use crate::core::AsyncStatus;

/// Errors that can occur when building stores and async tasks.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Liveness scope not specified. Call .liveness(&scope) before .build()")]
    MissingLiveness,

    #[error("Initial async state is already {status}. Start from idle or pending")]
    SettledInitialState { status: AsyncStatus },
}
