//! Interaction engine for the club-management UI.
//!
//! Turns declarative task descriptions (complete challenge X with quality Y,
//! drawn from source Z, N times; open every pack named P) into sequences of
//! DOM waits and clicks against an already-authenticated browser session.
//! The session itself is owned by the caller; the engine only operates on it.

pub mod challenge;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod filters;
pub mod locator;
pub mod nav;
pub mod selectors;
pub mod session;
pub mod squad;
pub mod store;
pub mod task;
pub mod wait;

pub use error::EngineError;
pub use session::{Session, SessionError};
pub use task::{TaskOutcome, TaskRunner};
pub use wait::WaitPolicy;
