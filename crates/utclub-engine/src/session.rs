use async_trait::async_trait;
use thiserror::Error;

use crate::locator::Locator;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("webdriver command failed: {0}")]
    Command(String),

    #[error("stale element reference")]
    Stale,

    #[error("script evaluation failed: {0}")]
    Script(String),
}

/// The single live browser context the engine operates on.
///
/// The engine never creates or destroys a session; it only issues the
/// operations below, strictly sequentially. `find*` report absence as data
/// rather than as an error so callers can branch without catching anything.
#[async_trait]
pub trait Session: Send + Sync {
    type Element: Clone + Send + Sync;

    /// First element matching `locator`, if any exists right now.
    async fn find(&self, locator: &Locator) -> Result<Option<Self::Element>, SessionError>;

    /// All elements currently matching `locator`.
    async fn find_all(&self, locator: &Locator) -> Result<Vec<Self::Element>, SessionError>;

    /// First descendant of `scope` matching `locator`, if any.
    async fn find_within(
        &self,
        scope: &Self::Element,
        locator: &Locator,
    ) -> Result<Option<Self::Element>, SessionError>;

    /// All descendants of `scope` matching `locator`.
    async fn find_all_within(
        &self,
        scope: &Self::Element,
        locator: &Locator,
    ) -> Result<Vec<Self::Element>, SessionError>;

    async fn click(&self, element: &Self::Element) -> Result<(), SessionError>;

    /// Visible and enabled.
    async fn is_interactable(&self, element: &Self::Element) -> Result<bool, SessionError>;

    async fn text(&self, element: &Self::Element) -> Result<String, SessionError>;

    async fn attribute(
        &self,
        element: &Self::Element,
        name: &str,
    ) -> Result<Option<String>, SessionError>;

    /// Scroll the element into the viewport. Controls below the fold are not
    /// always interactable until this has happened.
    async fn scroll_into_view(&self, element: &Self::Element) -> Result<(), SessionError>;

    /// Scroll a scrollable container by `delta_y` pixels.
    async fn scroll_by(&self, element: &Self::Element, delta_y: i64) -> Result<(), SessionError>;

    /// Scroll a scrollable container back to its top.
    async fn scroll_to_top(&self, element: &Self::Element) -> Result<(), SessionError>;

    /// PNG screenshot of the current viewport.
    async fn screenshot(&self) -> Result<Vec<u8>, SessionError>;
}
