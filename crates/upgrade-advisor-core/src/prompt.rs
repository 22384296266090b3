//! Prompt construction for the two advisory requests. Both builders are pure
//! string functions: equal input sequences produce byte-identical prompts.

use crate::scanner::Vulnerability;

const UPGRADE_INSTRUCTIONS: &str = "You are an expert software engineer. \
Based on the following list of vulnerabilities, create a prioritized, \
step-by-step upgrade plan in Markdown format. Group patch and minor updates \
first to minimize breaking changes.";

const REPLACEMENT_INSTRUCTIONS: &str = "You are an expert software engineer. \
The following open-source packages have vulnerabilities with no direct \
upgrade path available. For each package, infer its primary purpose from its \
name and suggest 1-2 popular, well-maintained alternative packages that \
fulfill the same purpose. Provide a brief justification for each suggestion. \
Format the output clearly in Markdown.";

/// Build the upgrade-plan prompt for vulnerabilities with a direct fix.
///
/// The suggested upgrade is the second element of the upgrade path; the
/// classifier guarantees it exists for fixable records, but a placeholder is
/// substituted if that contract is ever violated.
pub fn build_upgrade_prompt(fixable: &[Vulnerability]) -> String {
    let details = fixable
        .iter()
        .map(|vuln| {
            format!(
                "- Package: {}\n  Current Version: {}\n  Suggested Upgrade: {}\n  Severity: {}",
                vuln.package_name,
                vuln.version,
                vuln.suggested_upgrade().unwrap_or("N/A"),
                vuln.severity
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("{UPGRADE_INSTRUCTIONS}\n\nVulnerabilities with a direct fix:\n{details}\n")
}

/// Build the replacement-suggestion prompt for vulnerabilities without a fix.
pub fn build_replacement_prompt(unfixable: &[Vulnerability]) -> String {
    let details = unfixable
        .iter()
        .map(|vuln| {
            format!(
                "- Package: '{}'\n  Vulnerability: {} ({} severity)",
                vuln.package_name, vuln.title, vuln.severity
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("{REPLACEMENT_INSTRUCTIONS}\n\nPackages needing replacement:\n{details}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::Severity;

    fn fixable_sample() -> Vec<Vulnerability> {
        vec![Vulnerability {
            package_name: "lodash".into(),
            version: "4.0.0".into(),
            title: "Prototype Pollution".into(),
            severity: Severity::High,
            upgrade_path: vec!["lodash".into(), "4.17.21".into()],
        }]
    }

    fn unfixable_sample() -> Vec<Vulnerability> {
        vec![Vulnerability {
            package_name: "old-lib".into(),
            version: "0.1.0".into(),
            title: "Prototype Pollution".into(),
            severity: Severity::Critical,
            upgrade_path: vec![],
        }]
    }

    #[test]
    fn upgrade_prompt_includes_record_fields() {
        let prompt = build_upgrade_prompt(&fixable_sample());
        assert!(prompt.contains("lodash"));
        assert!(prompt.contains("4.0.0"));
        assert!(prompt.contains("4.17.21"));
        assert!(prompt.contains("high"));
    }

    #[test]
    fn replacement_prompt_includes_record_fields() {
        let prompt = build_replacement_prompt(&unfixable_sample());
        assert!(prompt.contains("old-lib"));
        assert!(prompt.contains("Prototype Pollution"));
        assert!(prompt.contains("critical"));
    }

    #[test]
    fn builders_are_deterministic() {
        assert_eq!(
            build_upgrade_prompt(&fixable_sample()),
            build_upgrade_prompt(&fixable_sample())
        );
        assert_eq!(
            build_replacement_prompt(&unfixable_sample()),
            build_replacement_prompt(&unfixable_sample())
        );
    }

    #[test]
    fn upgrade_prompt_substitutes_placeholder_for_short_path() {
        let mut records = fixable_sample();
        records[0].upgrade_path.truncate(1);
        let prompt = build_upgrade_prompt(&records);
        assert!(prompt.contains("Suggested Upgrade: N/A"));
    }

    #[test]
    fn empty_input_still_yields_valid_prompt() {
        let prompt = build_upgrade_prompt(&[]);
        assert!(prompt.contains("Vulnerabilities with a direct fix:"));
        let prompt = build_replacement_prompt(&[]);
        assert!(prompt.contains("Packages needing replacement:"));
    }
}
