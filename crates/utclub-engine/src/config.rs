//! Static task-plan configuration.
//!
//! The plan is an explicit value handed to the task-list builder at startup;
//! nothing in the engine reads ambient process-wide state.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::challenge::ChallengeSpec;
use crate::filters::{Quality, SortOrder};
use crate::squad::{AssemblyStrategy, DelegatedAssembly};
use crate::task::Task;
use crate::wait::WaitPolicy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Daily upgrades of one quality tier, all driven by the delegated squad
/// builder. The daily upgrades award their rewards in two stages, hence the
/// default claim count of 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeGroup {
    pub names: Vec<String>,
    pub claim_count: u32,
    pub repeats: Option<u32>,
    pub sort: SortOrder,
}

impl Default for UpgradeGroup {
    fn default() -> Self {
        Self {
            names: Vec::new(),
            claim_count: 2,
            repeats: None,
            sort: SortOrder::LowestQuickSell,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitSettings {
    pub default_secs: u64,
    pub slow_secs: u64,
    pub poll_millis: u64,
}

impl Default for WaitSettings {
    fn default() -> Self {
        Self {
            default_secs: 10,
            slow_secs: 25,
            poll_millis: 250,
        }
    }
}

impl WaitSettings {
    pub fn policy(&self) -> WaitPolicy {
        WaitPolicy {
            timeout: Duration::from_secs(self.default_secs),
            slow: Duration::from_secs(self.slow_secs),
            poll: Duration::from_millis(self.poll_millis),
        }
    }
}

/// The full static configuration for one unattended run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskPlan {
    pub bronze_upgrades: UpgradeGroup,
    pub silver_upgrades: UpgradeGroup,
    /// Optional challenges with full per-challenge specs (explicit assembly,
    /// rare counts, storage source), gated by `run_special_upgrades`.
    pub special_upgrades: Vec<ChallengeSpec>,
    pub run_special_upgrades: bool,
    pub pack_names: Vec<String>,
    pub gold_pack_names: Vec<String>,
    pub open_gold_packs: bool,
    pub wait: WaitSettings,
    pub screenshot_dir: String,
}

impl Default for TaskPlan {
    fn default() -> Self {
        Self {
            bronze_upgrades: UpgradeGroup {
                names: vec!["Daily Bronze Upgrade".into()],
                ..UpgradeGroup::default()
            },
            silver_upgrades: UpgradeGroup {
                names: vec!["Daily Silver Upgrade".into()],
                ..UpgradeGroup::default()
            },
            special_upgrades: Vec::new(),
            run_special_upgrades: false,
            pack_names: vec![
                "BRONZE PLAYERS PREMIUM".into(),
                "SMALL BRONZE PLAYERS".into(),
                "SILVER PLAYERS PREMIUM".into(),
                "Small Silver Players Pack".into(),
                "Super Bronze Pack".into(),
            ],
            gold_pack_names: vec!["x11 Gold Players Pack".into()],
            open_gold_packs: false,
            wait: WaitSettings::default(),
            screenshot_dir: "screenshots".into(),
        }
    }
}

impl TaskPlan {
    /// Load from default locations:
    /// 1. ./utclub.yaml
    /// 2. ~/.utclub/config.yaml
    /// 3. Default configuration
    pub async fn load_default() -> Result<Self, ConfigError> {
        let local_config = PathBuf::from("./utclub.yaml");
        if local_config.exists() {
            return Self::load_from(&local_config).await;
        }

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".utclub").join("config.yaml");
            if home_config.exists() {
                return Self::load_from(&home_config).await;
            }
        }

        Ok(Self::default())
    }

    pub async fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        let plan: TaskPlan = serde_yaml::from_str(&content)?;
        Ok(plan)
    }

    pub fn wait_policy(&self) -> WaitPolicy {
        self.wait.policy()
    }

    /// Expand the plan into the ordered task list for one run.
    pub fn build_tasks(&self) -> Vec<Task> {
        let mut tasks = Vec::new();

        for group in [
            (&self.bronze_upgrades, Quality::Bronze),
            (&self.silver_upgrades, Quality::Silver),
        ] {
            let (upgrades, quality) = group;
            for name in &upgrades.names {
                tasks.push(Task::Challenge(ChallengeSpec {
                    name: name.clone(),
                    strategy: AssemblyStrategy::Delegated(DelegatedAssembly {
                        sort: upgrades.sort,
                        quality,
                        ignore_position: false,
                    }),
                    claim_count: upgrades.claim_count,
                    repeats: upgrades.repeats,
                }));
            }
        }

        if self.run_special_upgrades {
            for spec in &self.special_upgrades {
                tasks.push(Task::Challenge(spec.clone()));
            }
        }

        if !self.pack_names.is_empty() {
            tasks.push(Task::RedeemPacks(self.pack_names.clone()));
        }
        if self.open_gold_packs && !self.gold_pack_names.is_empty() {
            tasks.push(Task::RedeemPacks(self.gold_pack_names.clone()));
        }

        tasks
    }
}
