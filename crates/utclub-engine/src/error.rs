use std::time::Duration;

use thiserror::Error;

use crate::locator::Locator;
use crate::session::SessionError;

/// Engine-level failure taxonomy. Everything here is caught at the
/// challenge/pack task boundary and fed into the bounded retry policy;
/// nothing may leave the squad-building UI in a submitted-but-invalid state.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A required element did not appear within budget. Recoverable by the
    /// enclosing bounded retry, never within a single attempt.
    #[error("element not found after {timeout:?}: {locator}")]
    NotFound { locator: Locator, timeout: Duration },

    /// A search-filter dropdown or option could not be located. Non-retryable
    /// locally; propagates to the caller's retry policy.
    #[error("filter control missing: {0}")]
    FilterControlMissing(String),

    /// The requirement checklist was not fully satisfied. Always fatal to the
    /// current attempt; never bypassed.
    #[error("requirement not complete: {0}")]
    Validation(String),

    /// A blocking dialog the workflow cannot resolve automatically.
    #[error("blocking dialog: {0}")]
    BlockingInterstitial(String),

    /// A squad slot could not be completed during explicit assembly. Aborts
    /// the assembly without submitting.
    #[error("could not fill squad slot {index} ({position})")]
    SlotFill { index: usize, position: String },

    #[error(transparent)]
    Session(#[from] SessionError),
}
