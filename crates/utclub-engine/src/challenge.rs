//! Challenge lifecycle: open a named challenge, determine its remaining
//! repeat count, assemble a squad, validate requirements, submit, claim.
//!
//! The whole sequence is wrapped in a bounded retry; validation strictly
//! gates submission on every attempt.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::diagnostics::DiagnosticsSink;
use crate::error::EngineError;
use crate::nav::{self, Section};
use crate::selectors;
use crate::session::Session;
use crate::squad::{self, AssemblyStrategy};
use crate::task::TaskOutcome;
use crate::wait::{self, WaitPolicy};

/// Fixed maximum attempts per task. Retries are immediate, no backoff.
pub const MAX_RETRY_ATTEMPTS: u32 = 3;

/// Scroll-attempt budget while hunting for a challenge tile. Exceeding it is
/// a non-fatal miss, treated as skip.
const TILE_SCROLL_BUDGET: usize = 10;
const TILE_SCROLL_STEP: i64 = 150;

/// Remaining repeat count read from the tile's repeat label. The label is
/// read fresh from the DOM on every lookup; the UI re-renders after each
/// submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatCount {
    Finite(u32),
    /// The label could not be parsed as a number (e.g. infinitely
    /// repeatable challenges).
    Unbounded,
}

impl RepeatCount {
    /// Tolerant label parser: the first integer found in the label wins
    /// ("Repeat 3x" -> 3); no integer means unbounded.
    pub fn parse(label: &str) -> Self {
        for token in label.split_whitespace() {
            if let Some(start) = token.find(|c: char| c.is_ascii_digit()) {
                let digits: String = token[start..]
                    .chars()
                    .take_while(|c| c.is_ascii_digit())
                    .collect();
                if let Ok(n) = digits.parse() {
                    return RepeatCount::Finite(n);
                }
            }
        }
        RepeatCount::Unbounded
    }
}

impl fmt::Display for RepeatCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepeatCount::Finite(n) => write!(f, "{}", n),
            RepeatCount::Unbounded => write!(f, "unbounded"),
        }
    }
}

fn default_claim_count() -> u32 {
    1
}

/// Declarative description of one challenge task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeSpec {
    /// Display name of the challenge tile.
    pub name: String,
    pub strategy: AssemblyStrategy,
    /// How many claim actions one successful submission awards. A property
    /// of the challenge type (daily upgrades award twice), not retry logic.
    #[serde(default = "default_claim_count")]
    pub claim_count: u32,
    /// Overrides the repeat count read from the UI.
    #[serde(default)]
    pub repeats: Option<u32>,
}

pub struct ChallengeRunner {
    waits: WaitPolicy,
    diagnostics: DiagnosticsSink,
    max_attempts: u32,
}

impl ChallengeRunner {
    pub fn new(waits: WaitPolicy, diagnostics: DiagnosticsSink) -> Self {
        Self {
            waits,
            diagnostics,
            max_attempts: MAX_RETRY_ATTEMPTS,
        }
    }

    /// Run one challenge task to completion, with bounded retry. Never
    /// returns an error: retry exhaustion degrades to a logged `Failed`.
    pub async fn run<S: Session>(&self, session: &S, spec: &ChallengeSpec) -> TaskOutcome {
        for attempt in 1..=self.max_attempts {
            match self.run_once(session, spec).await {
                Ok(outcome) => return outcome,
                Err(err) => {
                    error!(
                        "challenge '{}' attempt {}/{} failed: {}",
                        spec.name, attempt, self.max_attempts, err
                    );
                    self.diagnostics
                        .capture(session, &format!("challenge '{}': {}", spec.name, err))
                        .await;
                }
            }
        }
        warn!(
            "challenge '{}' failed after {} attempts, moving on",
            spec.name, self.max_attempts
        );
        TaskOutcome::Failed
    }

    async fn run_once<S: Session>(
        &self,
        session: &S,
        spec: &ChallengeSpec,
    ) -> Result<TaskOutcome, EngineError> {
        nav::navigate_to(session, &self.waits, Section::Challenges).await?;
        nav::open_upgrades_menu(session, &self.waits).await?;
        self.waits
            .await_presence(session, &selectors::CHALLENGE_GRID)
            .await?;

        let Some(tile) = self.find_challenge_tile(session, &spec.name).await? else {
            warn!("challenge '{}' not found, skipping", spec.name);
            return Ok(TaskOutcome::Skipped);
        };

        // Completion marker check first: re-running a finished challenge
        // must perform no further UI mutation.
        let class = session.attribute(&tile, "class").await?.unwrap_or_default();
        if class.split_whitespace().any(|c| c == "complete") {
            info!("challenge '{}' is already complete", spec.name);
            return Ok(TaskOutcome::Skipped);
        }

        let repeat = self.read_repeat_count(session, &tile).await?;
        info!("repeat count for '{}': {}", spec.name, repeat);
        if repeat == RepeatCount::Finite(0) {
            return Ok(TaskOutcome::Skipped);
        }

        self.open_challenge(session, &tile).await?;

        let runs = spec.repeats.unwrap_or(match repeat {
            RepeatCount::Finite(n) => n,
            RepeatCount::Unbounded => 1,
        });
        for run in 1..=runs {
            info!("assembling squad for '{}' ({}/{})", spec.name, run, runs);
            squad::assemble(session, &self.waits, &spec.strategy).await?;

            // Validation strictly gates submission; never submit
            // speculatively.
            self.validate_requirements(session).await?;

            self.waits
                .await_clickable(session, &selectors::SUBMIT_BUTTON)
                .await?;
            info!("submitted squad for '{}'", spec.name);

            for _ in 0..spec.claim_count {
                self.waits
                    .await_clickable(session, &selectors::CLAIM_REWARDS)
                    .await?;
            }
            info!(
                "claimed rewards for '{}' ({} claim(s))",
                spec.name, spec.claim_count
            );
        }

        Ok(TaskOutcome::Completed)
    }

    /// Scroll through the tile list until the named tile shows up, within
    /// the bounded scroll budget.
    async fn find_challenge_tile<S: Session>(
        &self,
        session: &S,
        name: &str,
    ) -> Result<Option<S::Element>, EngineError> {
        let list = self
            .waits
            .await_presence(session, &selectors::CHALLENGE_LIST)
            .await?;
        let tile = selectors::challenge_tile(name);

        for _ in 0..TILE_SCROLL_BUDGET {
            if let Some(found) = session.find(&tile).await? {
                info!("found challenge tile '{}'", name);
                return Ok(Some(found));
            }
            session.scroll_by(&list, TILE_SCROLL_STEP).await?;
            // Scroll throttle; the list has no render signal to wait on.
            wait::settle(self.waits.poll).await;
        }
        Ok(None)
    }

    async fn read_repeat_count<S: Session>(
        &self,
        session: &S,
        tile: &S::Element,
    ) -> Result<RepeatCount, EngineError> {
        match session.find_within(tile, &selectors::REPEAT_LABEL).await? {
            Some(label) => Ok(RepeatCount::parse(&session.text(&label).await?)),
            // No repeat label: the challenge can be completed once.
            None => Ok(RepeatCount::Finite(1)),
        }
    }

    async fn open_challenge<S: Session>(
        &self,
        session: &S,
        tile: &S::Element,
    ) -> Result<(), EngineError> {
        match session.find_within(tile, &selectors::TILE_HEADER).await? {
            Some(header) => session.click(&header).await?,
            None => session.click(tile).await?,
        }
        self.waits
            .await_clickable(session, &selectors::START_CHALLENGE)
            .await?;
        info!("opened the challenge");
        Ok(())
    }

    /// Every listed requirement must carry the complete marker before a
    /// submission is allowed.
    async fn validate_requirements<S: Session>(&self, session: &S) -> Result<(), EngineError> {
        let checklist = self
            .waits
            .await_presence(session, &selectors::REQUIREMENTS_CHECKLIST)
            .await?;
        let items = session
            .find_all_within(&checklist, &selectors::CHECKLIST_ITEM)
            .await?;
        for item in &items {
            let class = session.attribute(item, "class").await?.unwrap_or_default();
            if !class.split_whitespace().any(|c| c == "complete") {
                let text = session.text(item).await.unwrap_or_default();
                return Err(EngineError::Validation(text));
            }
        }
        info!("all requirements are complete");
        Ok(())
    }
}
