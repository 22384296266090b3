use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use super::{ScanError, ScanOutput, VulnerabilityScanner};

/// Adapter around the Snyk CLI. Runs `<program> test --json` in the project
/// directory and parses the machine-readable output.
#[derive(Debug, Clone)]
pub struct SnykScanner {
    program: String,
}

impl SnykScanner {
    /// Create a scanner invoking the given executable (normally `snyk`).
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for SnykScanner {
    fn default() -> Self {
        Self::new("snyk")
    }
}

#[async_trait]
impl VulnerabilityScanner for SnykScanner {
    async fn scan(&self, project_dir: &Path) -> Result<ScanOutput, ScanError> {
        info!(project = %project_dir.display(), "running vulnerability scan");
        let output = Command::new(&self.program)
            .args(["test", "--json"])
            .current_dir(project_dir)
            .output()
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => ScanError::ToolNotFound {
                    program: self.program.clone(),
                },
                _ => ScanError::Launch {
                    program: self.program.clone(),
                    source: err,
                },
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        // Snyk exits non-zero when it finds vulnerabilities; that is still a
        // valid result as long as it produced output.
        if !output.status.success() && stdout.trim().is_empty() {
            return Err(ScanError::ToolFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        debug!(
            status = %output.status,
            bytes = stdout.len(),
            "scanner finished"
        );

        serde_json::from_str(&stdout).map_err(ScanError::MalformedOutput)
    }
}
