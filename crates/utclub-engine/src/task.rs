//! Sequential task orchestration over one browser session.

use std::fmt;

use tracing::info;

use crate::challenge::{ChallengeRunner, ChallengeSpec};
use crate::config::TaskPlan;
use crate::diagnostics::DiagnosticsSink;
use crate::session::Session;
use crate::store::PackRedeemer;
use crate::wait::WaitPolicy;

/// Per-task result. Used for logging and the end-of-run summary only;
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Completed,
    /// Already complete, exhausted, or not found: nothing left to do.
    Skipped,
    /// All retry attempts exhausted.
    Failed,
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskOutcome::Completed => write!(f, "completed"),
            TaskOutcome::Skipped => write!(f, "skipped"),
            TaskOutcome::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Task {
    Challenge(ChallengeSpec),
    RedeemPacks(Vec<String>),
}

impl Task {
    pub fn label(&self) -> String {
        match self {
            Task::Challenge(spec) => format!("challenge '{}'", spec.name),
            Task::RedeemPacks(names) => format!("redeem {} pack type(s)", names.len()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TaskReport {
    pub label: String,
    pub outcome: TaskOutcome,
}

/// Runs a task plan strictly sequentially against a single session. A task
/// failure never terminates the run, and the session is never closed here;
/// closing is the caller's bracketed responsibility.
pub struct TaskRunner {
    challenges: ChallengeRunner,
    packs: PackRedeemer,
}

impl TaskRunner {
    pub fn new(waits: WaitPolicy, diagnostics: DiagnosticsSink) -> Self {
        Self {
            challenges: ChallengeRunner::new(waits, diagnostics.clone()),
            packs: PackRedeemer::new(waits, diagnostics),
        }
    }

    pub async fn run_all<S: Session>(&self, session: &S, plan: &TaskPlan) -> Vec<TaskReport> {
        let tasks = plan.build_tasks();
        info!("running {} task(s)", tasks.len());

        let mut reports = Vec::with_capacity(tasks.len());
        for task in tasks {
            let outcome = match &task {
                Task::Challenge(spec) => self.challenges.run(session, spec).await,
                Task::RedeemPacks(names) => self.packs.redeem_packs(session, names).await,
            };
            info!("task {}: {}", task.label(), outcome);
            reports.push(TaskReport {
                label: task.label(),
                outcome,
            });
        }
        reports
    }
}
