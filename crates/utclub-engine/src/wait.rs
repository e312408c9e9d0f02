//! Polling bridge between asynchronous page state and sequential control flow.
//!
//! The UI loads asynchronously and re-renders after every submission, so
//! every interaction goes through a poll-sleep-recheck cycle with a hard
//! wall-clock bound. No operation blocks longer than its timeout.

use std::time::Duration;

use tokio::time::Instant;

use crate::error::EngineError;
use crate::locator::Locator;
use crate::session::Session;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Known slow transitions (e.g. the initial login redirect) get this budget.
pub const SLOW_TIMEOUT: Duration = Duration::from_secs(25);
pub const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Which of the two conditions of a dual wait resolved first.
#[derive(Debug)]
pub enum FirstMatch<E> {
    Primary(E),
    Secondary(E),
}

/// Caller-supplied wait budgets. Components receive the policy as a value so
/// nothing reads timeouts from ambient process state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub timeout: Duration,
    pub slow: Duration,
    pub poll: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            slow: SLOW_TIMEOUT,
            poll: POLL_INTERVAL,
        }
    }
}

impl WaitPolicy {
    /// Return the first matching element once it exists in the DOM, or fail
    /// with `NotFound` after the default timeout.
    pub async fn await_presence<S: Session>(
        &self,
        session: &S,
        locator: &Locator,
    ) -> Result<S::Element, EngineError> {
        self.await_presence_for(session, locator, self.timeout).await
    }

    pub async fn await_presence_for<S: Session>(
        &self,
        session: &S,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<S::Element, EngineError> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(element) = session.find(locator).await? {
                return Ok(element);
            }
            if Instant::now() >= deadline {
                return Err(EngineError::NotFound {
                    locator: locator.clone(),
                    timeout,
                });
            }
            tokio::time::sleep(self.poll).await;
        }
    }

    /// Wait until the element is present, visible and enabled, then click it
    /// as one atomic action and return it. A click intercepted by a
    /// transitional overlay is re-attempted until the deadline.
    pub async fn await_clickable<S: Session>(
        &self,
        session: &S,
        locator: &Locator,
    ) -> Result<S::Element, EngineError> {
        self.await_clickable_for(session, locator, self.timeout).await
    }

    pub async fn await_clickable_for<S: Session>(
        &self,
        session: &S,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<S::Element, EngineError> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(element) = session.find(locator).await? {
                if session.is_interactable(&element).await.unwrap_or(false)
                    && session.click(&element).await.is_ok()
                {
                    return Ok(element);
                }
            }
            if Instant::now() >= deadline {
                return Err(EngineError::NotFound {
                    locator: locator.clone(),
                    timeout,
                });
            }
            tokio::time::sleep(self.poll).await;
        }
    }

    /// Single non-throwing presence query, for branching on optional UI.
    pub async fn try_find<S: Session>(
        &self,
        session: &S,
        locator: &Locator,
    ) -> Result<Option<S::Element>, EngineError> {
        Ok(session.find(locator).await?)
    }

    /// Cancellable dual wait: whichever condition resolves first terminates
    /// the wait and the other is abandoned without side effects. One poll
    /// loop checks both, primary first.
    pub async fn await_either<S: Session>(
        &self,
        session: &S,
        primary: &Locator,
        secondary: &Locator,
    ) -> Result<FirstMatch<S::Element>, EngineError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(element) = session.find(primary).await? {
                return Ok(FirstMatch::Primary(element));
            }
            if let Some(element) = session.find(secondary).await? {
                return Ok(FirstMatch::Secondary(element));
            }
            if Instant::now() >= deadline {
                return Err(EngineError::NotFound {
                    locator: primary.clone(),
                    timeout: self.timeout,
                });
            }
            tokio::time::sleep(self.poll).await;
        }
    }
}

/// Best-effort pause for states with no observable DOM signal (scroll
/// throttling, animation settle). Everything else waits on a condition.
pub async fn settle(duration: Duration) {
    tokio::time::sleep(duration).await;
}
