//! fantoccini-backed implementation of the engine's `Session` trait.
//!
//! Connect/close are owned here and invoked only by the caller of the
//! engine; the engine itself never creates or destroys the session.

use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::{Client, ClientBuilder, Locator as WdLocator};
use tracing::info;

use utclub_engine::locator::Locator;
use utclub_engine::session::{Session, SessionError};

pub struct WebDriverSession {
    client: Client,
}

impl WebDriverSession {
    /// Connect to an already-running WebDriver server. The browser behind
    /// it is expected to hold an authenticated session.
    pub async fn connect(
        url: &str,
        capabilities: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> Result<Self, SessionError> {
        let mut caps = serde_json::Map::new();
        if let Some(user_caps) = capabilities {
            for (k, v) in user_caps {
                caps.insert(k, v);
            }
        }

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(url)
            .await
            .map_err(|e| {
                SessionError::Command(format!("failed to connect to WebDriver at {url}: {e}"))
            })?;
        info!("connected to WebDriver at {}", url);

        Ok(Self { client })
    }

    pub async fn goto(&self, url: &str) -> Result<(), SessionError> {
        self.client.goto(url).await.map_err(cmd_err)
    }

    pub async fn close(self) -> Result<(), SessionError> {
        self.client.close().await.map_err(cmd_err)
    }

    fn wd_locator(locator: &Locator) -> WdLocator<'_> {
        match locator {
            Locator::Css(s) => WdLocator::Css(s),
            Locator::XPath(s) => WdLocator::XPath(s),
        }
    }

    /// Run a scroll script with the element as `arguments[0]`.
    async fn scroll_script(
        &self,
        element: &Element,
        script: &str,
    ) -> Result<(), SessionError> {
        let arg = serde_json::to_value(element)
            .map_err(|e| SessionError::Script(e.to_string()))?;
        self.client
            .execute(script, vec![arg])
            .await
            .map_err(|e| SessionError::Script(e.to_string()))?;
        Ok(())
    }
}

fn cmd_err(e: fantoccini::error::CmdError) -> SessionError {
    let message = e.to_string();
    if message.contains("stale element reference") {
        SessionError::Stale
    } else {
        SessionError::Command(message)
    }
}

#[async_trait]
impl Session for WebDriverSession {
    type Element = Element;

    async fn find(&self, locator: &Locator) -> Result<Option<Element>, SessionError> {
        // find_all so that absence is data, not an error to catch.
        let mut found = self
            .client
            .find_all(Self::wd_locator(locator))
            .await
            .map_err(cmd_err)?;
        Ok(if found.is_empty() {
            None
        } else {
            Some(found.remove(0))
        })
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<Element>, SessionError> {
        self.client
            .find_all(Self::wd_locator(locator))
            .await
            .map_err(cmd_err)
    }

    async fn find_within(
        &self,
        scope: &Element,
        locator: &Locator,
    ) -> Result<Option<Element>, SessionError> {
        let mut found = scope
            .find_all(Self::wd_locator(locator))
            .await
            .map_err(cmd_err)?;
        Ok(if found.is_empty() {
            None
        } else {
            Some(found.remove(0))
        })
    }

    async fn find_all_within(
        &self,
        scope: &Element,
        locator: &Locator,
    ) -> Result<Vec<Element>, SessionError> {
        scope
            .find_all(Self::wd_locator(locator))
            .await
            .map_err(cmd_err)
    }

    async fn click(&self, element: &Element) -> Result<(), SessionError> {
        element.click().await.map_err(cmd_err)
    }

    async fn is_interactable(&self, element: &Element) -> Result<bool, SessionError> {
        let displayed = element.is_displayed().await.map_err(cmd_err)?;
        if !displayed {
            return Ok(false);
        }
        element.is_enabled().await.map_err(cmd_err)
    }

    async fn text(&self, element: &Element) -> Result<String, SessionError> {
        element.text().await.map_err(cmd_err)
    }

    async fn attribute(
        &self,
        element: &Element,
        name: &str,
    ) -> Result<Option<String>, SessionError> {
        element.attr(name).await.map_err(cmd_err)
    }

    async fn scroll_into_view(&self, element: &Element) -> Result<(), SessionError> {
        self.scroll_script(element, "arguments[0].scrollIntoView(true);")
            .await
    }

    async fn scroll_by(&self, element: &Element, delta_y: i64) -> Result<(), SessionError> {
        self.scroll_script(element, &format!("arguments[0].scrollBy(0, {delta_y});"))
            .await
    }

    async fn scroll_to_top(&self, element: &Element) -> Result<(), SessionError> {
        self.scroll_script(element, "arguments[0].scrollTo(0, 0);")
            .await
    }

    async fn screenshot(&self) -> Result<Vec<u8>, SessionError> {
        self.client.screenshot().await.map_err(cmd_err)
    }
}
