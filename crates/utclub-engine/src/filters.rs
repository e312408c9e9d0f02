//! Player-search filter configuration within a squad-building panel.
//!
//! The UI exposes filters as sequential dropdowns, so application order is
//! significant: sort, quality, optional rarity, optional inventory source.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::EngineError;
use crate::locator::Locator;
use crate::selectors;
use crate::session::Session;
use crate::wait::WaitPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Lowest resale value first, to minimize the cost of each fill.
    LowestQuickSell,
}

impl SortOrder {
    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::LowestQuickSell => "Lowest Quick Sell",
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::LowestQuickSell
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    Bronze,
    Silver,
    Gold,
}

impl Quality {
    pub fn label(&self) -> &'static str {
        match self {
            Quality::Bronze => "Bronze",
            Quality::Silver => "Silver",
            Quality::Gold => "Gold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
}

impl Rarity {
    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
        }
    }
}

/// Where eligible players are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventorySource {
    /// The open market; the default, nothing to switch.
    Market,
    /// The dedicated already-owned storage pool.
    SbcStorage,
}

impl InventorySource {
    pub fn label(&self) -> &'static str {
        match self {
            InventorySource::Market => "My Club",
            InventorySource::SbcStorage => "SBC Storage",
        }
    }
}

/// Ephemeral UI state applied before each player search; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilterConfig {
    pub sort: SortOrder,
    pub quality: Quality,
    pub rarity: Option<Rarity>,
    pub source: Option<InventorySource>,
}

impl SearchFilterConfig {
    pub fn new(sort: SortOrder, quality: Quality) -> Self {
        Self {
            sort,
            quality,
            rarity: None,
            source: None,
        }
    }
}

/// Open a dropdown and select the option with the exact visible label.
/// The control is scrolled into view first; controls below the fold are not
/// always interactable.
async fn select_filter_option<S: Session>(
    session: &S,
    waits: &WaitPolicy,
    control: &Locator,
    option: &Locator,
    what: &str,
) -> Result<(), EngineError> {
    let control_el = waits
        .await_presence(session, control)
        .await
        .map_err(|e| match e {
            EngineError::NotFound { .. } => EngineError::FilterControlMissing(what.to_string()),
            other => other,
        })?;
    session.scroll_into_view(&control_el).await?;
    session.click(&control_el).await?;

    waits
        .await_clickable(session, option)
        .await
        .map_err(|e| match e {
            EngineError::NotFound { .. } => {
                EngineError::FilterControlMissing(format!("{what} option"))
            }
            other => other,
        })?;
    Ok(())
}

/// Apply the full filter configuration, in dropdown order.
pub async fn apply_filters<S: Session>(
    session: &S,
    waits: &WaitPolicy,
    config: &SearchFilterConfig,
) -> Result<(), EngineError> {
    select_filter_option(
        session,
        waits,
        &selectors::SORT_DROPDOWN,
        &selectors::dropdown_option(config.sort.label()),
        "sort order",
    )
    .await?;
    info!("set sorting to '{}'", config.sort.label());

    select_filter_option(
        session,
        waits,
        &selectors::QUALITY_DROPDOWN,
        &selectors::inline_option(config.quality.label()),
        "quality",
    )
    .await?;
    info!("set quality to '{}'", config.quality.label());

    if let Some(rarity) = config.rarity {
        select_filter_option(
            session,
            waits,
            &selectors::RARITY_DROPDOWN,
            &selectors::icon_option(rarity.label()),
            "rarity",
        )
        .await?;
        info!("set rarity to '{}'", rarity.label());
    }

    if let Some(InventorySource::SbcStorage) = config.source {
        select_filter_option(
            session,
            waits,
            &selectors::SOURCE_DROPDOWN,
            &selectors::icon_option(InventorySource::SbcStorage.label()),
            "inventory source",
        )
        .await?;
        info!("switched inventory source to SBC storage");
    }

    Ok(())
}

/// Trigger the search and add the first returned candidate. "First result"
/// is deliberate: the sort filter already guarantees the ranking we want.
pub async fn search_and_add_first_result<S: Session>(
    session: &S,
    waits: &WaitPolicy,
) -> Result<(), EngineError> {
    waits
        .await_clickable(session, &selectors::SEARCH_BUTTON)
        .await?;
    waits
        .await_clickable(session, &selectors::FIRST_RESULT_ADD)
        .await?;
    info!("added the first search result");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_the_visible_ui_text() {
        assert_eq!(SortOrder::LowestQuickSell.label(), "Lowest Quick Sell");
        assert_eq!(Quality::Bronze.label(), "Bronze");
        assert_eq!(Rarity::Rare.label(), "Rare");
        assert_eq!(InventorySource::SbcStorage.label(), "SBC Storage");
    }

    #[test]
    fn config_defaults_to_market_without_rarity() {
        let config = SearchFilterConfig::new(SortOrder::LowestQuickSell, Quality::Silver);
        assert_eq!(config.rarity, None);
        assert_eq!(config.source, None);
    }
}
