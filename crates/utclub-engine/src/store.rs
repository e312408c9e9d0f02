//! Pack redemption: locate purchasably-claimed packs by name, claim them,
//! and resolve the post-claim interstitials.
//!
//! Duplicate resolution order is mandatory: swap in all tradeable duplicates
//! first, then quick-sell what remains. Selling first would destroy value
//! recoverable via the swap.

use tracing::{error, info, warn};

use crate::challenge::MAX_RETRY_ATTEMPTS;
use crate::diagnostics::DiagnosticsSink;
use crate::error::EngineError;
use crate::nav::{self, Section};
use crate::selectors;
use crate::session::Session;
use crate::task::TaskOutcome;
use crate::wait::{self, FirstMatch, WaitPolicy};

/// Scroll-attempt budget while hunting for a pack tile.
const PACK_SCROLL_BUDGET: usize = 50;
const PACK_SCROLL_STEP: i64 = 150;

const UNASSIGNED_ITEMS_TITLE: &str = "Unassigned Items Remain";

pub struct PackRedeemer {
    waits: WaitPolicy,
    diagnostics: DiagnosticsSink,
    max_attempts: u32,
}

impl PackRedeemer {
    pub fn new(waits: WaitPolicy, diagnostics: DiagnosticsSink) -> Self {
        Self {
            waits,
            diagnostics,
            max_attempts: MAX_RETRY_ATTEMPTS,
        }
    }

    /// Open every remaining copy of each named pack, in order. A name with
    /// no claimable tile is exhausted and the next name is tried; errors are
    /// retried at this task boundary like challenges.
    pub async fn redeem_packs<S: Session>(
        &self,
        session: &S,
        pack_names: &[String],
    ) -> TaskOutcome {
        if pack_names.is_empty() {
            return TaskOutcome::Skipped;
        }
        for attempt in 1..=self.max_attempts {
            match self.run_once(session, pack_names).await {
                Ok(()) => return TaskOutcome::Completed,
                Err(err) => {
                    error!(
                        "pack redemption attempt {}/{} failed: {}",
                        attempt, self.max_attempts, err
                    );
                    self.diagnostics
                        .capture(session, &format!("pack redemption: {err}"))
                        .await;
                }
            }
        }
        warn!(
            "pack redemption failed after {} attempts, moving on",
            self.max_attempts
        );
        TaskOutcome::Failed
    }

    async fn run_once<S: Session>(
        &self,
        session: &S,
        pack_names: &[String],
    ) -> Result<(), EngineError> {
        for name in pack_names {
            loop {
                nav::navigate_to(session, &self.waits, Section::Store).await?;
                nav::open_pack_hub(session, &self.waits).await?;
                self.scroll_hub_to_top(session).await?;
                if !self.claim_one(session, name).await? {
                    info!("no claimable '{}' tiles remain", name);
                    break;
                }
            }
        }
        Ok(())
    }

    /// Claim one copy of the named pack. Returns false when no tile is
    /// found within the scroll budget, meaning the pack type is exhausted.
    async fn claim_one<S: Session>(&self, session: &S, name: &str) -> Result<bool, EngineError> {
        if self.find_pack_tile(session, name).await?.is_none() {
            return Ok(false);
        }
        info!("found pack '{}'", name);

        let claim = self
            .waits
            .await_presence(session, &selectors::pack_claim(name))
            .await?;
        session.click(&claim).await?;
        info!("claimed pack '{}'", name);

        // Either the bulk-action menu of the claimed-items screen shows up,
        // or a blocking message dialog does; whichever appears first decides.
        match self
            .waits
            .await_either(
                session,
                &selectors::BULK_MENU_BUTTON,
                &selectors::MESSAGE_DIALOG,
            )
            .await?
        {
            FirstMatch::Primary(menu) => {
                session.click(&menu).await?;
            }
            FirstMatch::Secondary(dialog) => {
                let title = match session
                    .find_within(&dialog, &selectors::DIALOG_TITLE)
                    .await?
                {
                    Some(header) => session.text(&header).await?,
                    None => String::from("message dialog"),
                };
                if title == UNASSIGNED_ITEMS_TITLE {
                    // Items could not be auto-assigned; nothing the workflow
                    // can resolve on its own.
                    warn!("unassigned items remain after claiming '{}'", name);
                }
                return Err(EngineError::BlockingInterstitial(title));
            }
        }

        self.waits
            .await_clickable(session, &selectors::STORE_ALL_IN_CLUB)
            .await?;
        info!("stored all won items in the club");

        self.resolve_duplicates(session).await?;
        Ok(true)
    }

    async fn scroll_hub_to_top<S: Session>(&self, session: &S) -> Result<(), EngineError> {
        let hub = self
            .waits
            .await_presence(session, &selectors::PACK_HUB_CONTENT)
            .await?;
        session.scroll_to_top(&hub).await?;
        // Scroll animation; no DOM signal to wait on.
        wait::settle(self.waits.poll).await;
        Ok(())
    }

    async fn find_pack_tile<S: Session>(
        &self,
        session: &S,
        name: &str,
    ) -> Result<Option<S::Element>, EngineError> {
        let hub = self
            .waits
            .await_presence(session, &selectors::PACK_HUB_CONTENT)
            .await?;
        let tile = selectors::pack_tile(name);

        for _ in 0..PACK_SCROLL_BUDGET {
            if let Some(found) = session.find(&tile).await? {
                return Ok(Some(found));
            }
            session.scroll_by(&hub, PACK_SCROLL_STEP).await?;
            wait::settle(self.waits.poll).await;
        }
        info!("scroll budget exhausted looking for pack '{}'", name);
        Ok(None)
    }

    /// Swap-then-sell, strictly in that order.
    async fn resolve_duplicates<S: Session>(&self, session: &S) -> Result<(), EngineError> {
        match self
            .waits
            .await_presence(session, &selectors::DUPLICATES_HEADER)
            .await
        {
            Ok(_) => {}
            Err(EngineError::NotFound { .. }) => {
                info!("no duplicates screen after storing items");
                return Ok(());
            }
            Err(other) => return Err(other),
        }
        info!("duplicates screen shown, swapping before selling");

        self.waits
            .await_clickable(session, &selectors::DUPLICATES_BULK_MENU)
            .await?;
        self.waits
            .await_clickable(session, &selectors::SWAP_TRADEABLE_DUPLICATES)
            .await?;
        self.waits
            .await_clickable(session, &selectors::CONFIRM_SWAP_YES)
            .await?;
        info!("swapped in all tradeable duplicates");

        self.waits
            .await_clickable(session, &selectors::DUPLICATES_BULK_MENU)
            .await?;
        self.waits
            .await_clickable(session, &selectors::QUICK_SELL_DUPLICATES)
            .await?;
        self.waits
            .await_clickable(session, &selectors::CONFIRM_SELL_OK)
            .await?;
        info!("quick-sold the remaining duplicates");
        Ok(())
    }
}
