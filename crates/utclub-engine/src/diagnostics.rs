//! Failure diagnostics: screenshot capture on unrecoverable steps.

use std::path::{Path, PathBuf};

use tracing::{error, warn};

use crate::session::Session;

/// Writes `error_<YYYYMMDD-HHMMSS>.png` artifacts under a dedicated
/// directory. Capture failures degrade to a warning; diagnostics must never
/// turn a task failure into a run failure.
#[derive(Debug, Clone)]
pub struct DiagnosticsSink {
    dir: PathBuf,
}

impl DiagnosticsSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Capture a screenshot for the given failure context. Returns the
    /// artifact path when the capture succeeded.
    pub async fn capture<S: Session>(&self, session: &S, context: &str) -> Option<PathBuf> {
        let bytes = match session.screenshot().await {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("screenshot capture failed: {}", err);
                return None;
            }
        };

        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let path = self.dir.join(format!("error_{stamp}.png"));
        if let Err(err) = tokio::fs::create_dir_all(&self.dir).await {
            warn!("could not create screenshot directory: {}", err);
            return None;
        }
        if let Err(err) = tokio::fs::write(&path, &bytes).await {
            warn!("could not write screenshot: {}", err);
            return None;
        }

        error!("{}; screenshot saved to {}", context, path.display());
        Some(path)
    }
}

impl Default for DiagnosticsSink {
    fn default() -> Self {
        Self::new("screenshots")
    }
}
