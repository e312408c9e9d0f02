//! Squad assembly: fill the 11 positions of a challenge squad, either by
//! delegating to the UI's own squad builder or slot-by-slot with explicit
//! filter-driven searches.
//!
//! A partial squad is never submitted: any slot that fails to yield an
//! addable result short-circuits the assembly with `SlotFill`.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::EngineError;
use crate::filters::{
    self, InventorySource, Quality, Rarity, SearchFilterConfig, SortOrder,
};
use crate::selectors;
use crate::session::Session;
use crate::wait::WaitPolicy;

pub const SQUAD_SIZE: usize = 11;

/// Fully automatic fill via the UI's delegated squad builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegatedAssembly {
    #[serde(default)]
    pub sort: SortOrder,
    pub quality: Quality,
    /// Toggle "Ignore Position" when exact position matching is unnecessary.
    #[serde(default)]
    pub ignore_position: bool,
}

/// Slot-by-slot fill with explicit searches, for challenges that need
/// specific rarity or source per slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplicitAssembly {
    #[serde(default)]
    pub sort: SortOrder,
    pub quality: Quality,
    /// How many filled slots are forced to Rare before the remainder
    /// default to Common.
    #[serde(default)]
    pub rare_count: u32,
    /// Draw players from the dedicated storage pool instead of the market.
    #[serde(default)]
    pub use_storage: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AssemblyStrategy {
    Delegated(DelegatedAssembly),
    Explicit(ExplicitAssembly),
}

pub async fn assemble<S: Session>(
    session: &S,
    waits: &WaitPolicy,
    strategy: &AssemblyStrategy,
) -> Result<(), EngineError> {
    match strategy {
        AssemblyStrategy::Delegated(spec) => assemble_delegated(session, waits, spec).await,
        AssemblyStrategy::Explicit(spec) => assemble_explicit(session, waits, spec).await,
    }
}

async fn assemble_delegated<S: Session>(
    session: &S,
    waits: &WaitPolicy,
    spec: &DelegatedAssembly,
) -> Result<(), EngineError> {
    waits.await_presence(session, &selectors::SQUAD_PANEL).await?;
    waits
        .await_clickable(session, &selectors::USE_SQUAD_BUILDER)
        .await?;
    info!("opened the squad builder");

    let config = SearchFilterConfig::new(spec.sort, spec.quality);
    filters::apply_filters(session, waits, &config).await?;

    if spec.ignore_position {
        toggle_ignore_position(session, waits).await?;
    }

    waits
        .await_clickable(session, &selectors::BUILD_BUTTON)
        .await?;
    info!("triggered the squad builder fill");
    Ok(())
}

async fn assemble_explicit<S: Session>(
    session: &S,
    waits: &WaitPolicy,
    spec: &ExplicitAssembly,
) -> Result<(), EngineError> {
    waits.await_presence(session, &selectors::PITCH_VIEW).await?;

    let mut rare_remaining = spec.rare_count;
    for index in 0..SQUAD_SIZE {
        dismiss_requirements_popover(session, waits).await?;

        let slot = match waits.try_find(session, &selectors::squad_slot(index)).await? {
            Some(slot) => slot,
            None => {
                return Err(EngineError::SlotFill {
                    index,
                    position: String::new(),
                });
            }
        };

        if slot_locked(session, &slot).await? {
            info!("slot {} is locked by the challenge, skipping", index);
            continue;
        }
        if slot_filled(session, &slot).await? {
            info!("slot {} is already filled, skipping", index);
            continue;
        }

        session.scroll_into_view(&slot).await?;
        let position = slot_label(session, &slot).await?;
        session.click(&slot).await?;
        info!("selected slot {} ({})", index, position);

        waits
            .await_clickable(session, &selectors::ADD_PLAYER)
            .await
            .map_err(|e| match e {
                EngineError::NotFound { .. } => EngineError::SlotFill {
                    index,
                    position: position.clone(),
                },
                other => other,
            })?;

        let rarity = if rare_remaining > 0 {
            rare_remaining -= 1;
            Rarity::Rare
        } else {
            Rarity::Common
        };
        let config = SearchFilterConfig {
            sort: spec.sort,
            quality: spec.quality,
            rarity: Some(rarity),
            source: spec.use_storage.then_some(InventorySource::SbcStorage),
        };
        filters::apply_filters(session, waits, &config).await?;

        filters::search_and_add_first_result(session, waits)
            .await
            .map_err(|e| match e {
                EngineError::NotFound { .. } => EngineError::SlotFill {
                    index,
                    position: position.clone(),
                },
                other => other,
            })?;
        info!("filled slot {} ({})", index, position);
    }

    Ok(())
}

/// The requirement popover blocks clicks on anything behind it.
async fn dismiss_requirements_popover<S: Session>(
    session: &S,
    waits: &WaitPolicy,
) -> Result<(), EngineError> {
    if let Some(popover) = waits
        .try_find(session, &selectors::REQUIREMENTS_POPOVER)
        .await?
    {
        let class = session.attribute(&popover, "class").await?.unwrap_or_default();
        if class.split_whitespace().any(|c| c == "show") {
            session.click(&popover).await?;
            info!("dismissed the requirements popover");
        }
    }
    Ok(())
}

async fn toggle_ignore_position<S: Session>(
    session: &S,
    waits: &WaitPolicy,
) -> Result<(), EngineError> {
    match waits
        .try_find(session, &selectors::IGNORE_POSITION_TOGGLE)
        .await?
    {
        Some(toggle) if session.is_interactable(&toggle).await? => {
            session.click(&toggle).await?;
            info!("toggled 'Ignore Position'");
        }
        _ => warn!("ignore-position toggle is not interactable"),
    }
    Ok(())
}

/// Pre-filled by the challenge and not assignable.
async fn slot_locked<S: Session>(session: &S, slot: &S::Element) -> Result<bool, EngineError> {
    let class = session.attribute(slot, "class").await?.unwrap_or_default();
    Ok(class.split_whitespace().any(|c| c == "locked"))
}

/// Filled is derived from the presence of a non-empty rating value.
async fn slot_filled<S: Session>(session: &S, slot: &S::Element) -> Result<bool, EngineError> {
    match session.find_within(slot, &selectors::SLOT_RATING).await? {
        Some(rating) => Ok(!session.text(&rating).await?.trim().is_empty()),
        None => Ok(false),
    }
}

async fn slot_label<S: Session>(session: &S, slot: &S::Element) -> Result<String, EngineError> {
    match session.find_within(slot, &selectors::SLOT_LABEL).await? {
        Some(label) => Ok(session.text(&label).await?.trim().to_string()),
        None => Ok(String::new()),
    }
}
