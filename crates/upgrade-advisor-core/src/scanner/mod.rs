use std::fmt;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod snyk;

/// Severity assigned by the scanner. Values outside the known set collapse
/// into `Unknown` rather than failing the whole parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
    #[serde(other)]
    #[default]
    Unknown,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
            Severity::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// One reported issue from the scanner. All fields default on absence so a
/// sparse record still deserializes; a missing upgrade path means no fix.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Vulnerability {
    pub package_name: String,
    pub version: String,
    pub title: String,
    pub severity: Severity,
    /// Ordered upgrade chain. The first element is the vulnerable package
    /// itself; a genuine fix requires a second element.
    pub upgrade_path: Vec<String>,
}

impl Vulnerability {
    /// Whether a direct upgrade removes this vulnerability.
    pub fn has_fix(&self) -> bool {
        self.upgrade_path.len() > 1
    }

    /// The first genuine upgrade target (index 1 of the upgrade path).
    pub fn suggested_upgrade(&self) -> Option<&str> {
        self.upgrade_path.get(1).map(String::as_str)
    }
}

/// Vulnerability list for a single scanned project.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProjectScan {
    pub vulnerabilities: Vec<Vulnerability>,
}

/// Parsed scanner output. Snyk emits a single object for a plain project and
/// an array of per-subproject objects for a monorepo.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ScanOutput {
    Monorepo(Vec<ProjectScan>),
    Project(ProjectScan),
}

impl ScanOutput {
    /// Flatten into one ordered vulnerability sequence: subproject order
    /// first, then in-list order.
    pub fn flatten(self) -> Vec<Vulnerability> {
        match self {
            ScanOutput::Project(scan) => scan.vulnerabilities,
            ScanOutput::Monorepo(scans) => scans
                .into_iter()
                .flat_map(|scan| scan.vulnerabilities)
                .collect(),
        }
    }
}

/// Stable partition of scan findings by upgrade-path presence.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Classified {
    pub fixable: Vec<Vulnerability>,
    pub unfixable: Vec<Vulnerability>,
}

/// Partition vulnerabilities into fixable and unfixable sets, preserving
/// input order in both. Every record lands in exactly one set.
pub fn classify(vulnerabilities: Vec<Vulnerability>) -> Classified {
    let mut classified = Classified::default();
    for vuln in vulnerabilities {
        if vuln.has_fix() {
            classified.fixable.push(vuln);
        } else {
            classified.unfixable.push(vuln);
        }
    }
    classified
}

/// Failures while invoking the external scanner or interpreting its output.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("`{program}` not found on PATH; is the Snyk CLI installed?")]
    ToolNotFound { program: String },
    #[error("failed to launch `{program}`")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("scanner exited with {status} and produced no output:\n{stderr}")]
    ToolFailed {
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("failed to parse scanner output as JSON")]
    MalformedOutput(#[source] serde_json::Error),
}

/// Abstraction over the external vulnerability scanner so the concrete
/// binary and flags stay a swappable adapter.
#[async_trait]
pub trait VulnerabilityScanner: Send + Sync {
    /// Scan the given project directory and return its parsed findings.
    async fn scan(&self, project_dir: &Path) -> Result<ScanOutput, ScanError>;
}
