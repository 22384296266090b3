pub mod llm;
pub mod prompt;
pub mod report;
pub mod scanner;

pub use llm::{gemini::GeminiClient, LlmClient, LlmError, LlmSettings, QueryOptions};
pub use scanner::{
    classify, snyk::SnykScanner, Classified, ProjectScan, ScanError, ScanOutput, Severity,
    Vulnerability, VulnerabilityScanner,
};
