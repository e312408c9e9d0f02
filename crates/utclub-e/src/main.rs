use std::path::Path;

use clap::Parser as ClapParser;
use tracing::{error, info, warn};

use utclub_e::backend::WebDriverSession;
use utclub_engine::config::TaskPlan;
use utclub_engine::diagnostics::DiagnosticsSink;
use utclub_engine::session::SessionError;
use utclub_engine::task::{TaskOutcome, TaskReport, TaskRunner};

#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL of the WebDriver server holding the authenticated session
    #[arg(short, long, default_value = "http://localhost:9515")]
    webdriver_url: String,

    /// Task plan file (YAML). Defaults to ./utclub.yaml, then
    /// ~/.utclub/config.yaml, then the built-in plan.
    #[arg(short, long)]
    config: Option<String>,

    /// Navigate here before running. Omit when the session is already on
    /// the club UI.
    #[arg(short, long)]
    app_url: Option<String>,

    /// Directory for failure screenshots, overriding the plan's setting.
    #[arg(long)]
    screenshot_dir: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

async fn run_plan(
    session: &WebDriverSession,
    plan: &TaskPlan,
    app_url: Option<&str>,
) -> Result<Vec<TaskReport>, SessionError> {
    if let Some(url) = app_url {
        info!("navigating to {}", url);
        session.goto(url).await?;
    }
    let runner = TaskRunner::new(plan.wait_policy(), DiagnosticsSink::new(&plan.screenshot_dir));
    Ok(runner.run_all(session, plan).await)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut plan = match &args.config {
        Some(path) => TaskPlan::load_from(Path::new(path)).await?,
        None => TaskPlan::load_default().await?,
    };
    if let Some(dir) = &args.screenshot_dir {
        plan.screenshot_dir = dir.clone();
    }

    info!("Connecting to WebDriver at {}...", args.webdriver_url);
    let session = match WebDriverSession::connect(&args.webdriver_url, None).await {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to connect: {}", e);
            std::process::exit(1);
        }
    };

    // The session must be released on every exit path, including a failed
    // run, so close before surfacing any error.
    let result = run_plan(&session, &plan, args.app_url.as_deref()).await;
    let close_result = session.close().await;

    let reports = result?;
    close_result?;

    for report in &reports {
        println!("{}: {}", report.label, report.outcome);
    }
    let failed = reports
        .iter()
        .filter(|r| r.outcome == TaskOutcome::Failed)
        .count();
    if failed > 0 {
        warn!("{} task(s) exhausted their retries", failed);
    }
    Ok(())
}
