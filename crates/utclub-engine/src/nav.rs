//! Movement between the top-level application sections.

use std::fmt;

use tracing::info;

use crate::error::EngineError;
use crate::selectors;
use crate::session::Session;
use crate::wait::WaitPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Challenges,
    Store,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Challenges => write!(f, "challenges"),
            Section::Store => write!(f, "store"),
        }
    }
}

/// Click the section tab in the persistent navigation bar. Idempotent in
/// effect: clicking the tab of the current section is a no-op for the UI.
pub async fn navigate_to<S: Session>(
    session: &S,
    waits: &WaitPolicy,
    section: Section,
) -> Result<(), EngineError> {
    // The tab bar is the first thing to render after the login redirect,
    // the one known slow transition, so it gets the longer budget.
    waits
        .await_presence_for(session, &selectors::TAB_BAR, waits.slow)
        .await?;
    let tab = match section {
        Section::Challenges => &selectors::TAB_CHALLENGES,
        Section::Store => &selectors::TAB_STORE,
    };
    waits.await_clickable(session, tab).await?;
    info!("navigated to the {} section", section);
    Ok(())
}

/// Open the upgrades submenu inside the challenge hub.
pub async fn open_upgrades_menu<S: Session>(
    session: &S,
    waits: &WaitPolicy,
) -> Result<(), EngineError> {
    waits
        .await_presence(session, &selectors::MENU_CONTAINER)
        .await?;
    waits
        .await_clickable(session, &selectors::UPGRADES_MENU_ITEM)
        .await?;
    info!("opened the upgrades menu");
    Ok(())
}

/// Open the pack hub from the store landing page.
pub async fn open_pack_hub<S: Session>(
    session: &S,
    waits: &WaitPolicy,
) -> Result<(), EngineError> {
    waits.await_presence(session, &selectors::PACKS_TILE).await?;
    waits
        .await_clickable(session, &selectors::PACKS_TILE)
        .await?;
    info!("opened the pack hub");
    Ok(())
}
