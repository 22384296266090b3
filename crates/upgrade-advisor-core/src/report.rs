//! Console rendering for the advisory output.

use std::fmt::Write;

pub const UPGRADE_PLAN_TITLE: &str = "Your AI-Generated Dependency Upgrade Plan";
pub const REPLACEMENTS_TITLE: &str = "AI Suggestions for Package Replacements";

pub const NO_FIXABLE_NOTICE: &str = "No vulnerabilities with direct upgrade paths were found.";
pub const ALL_FIXABLE_NOTICE: &str =
    "All found vulnerabilities seem to have a direct upgrade path.";

const BANNER_WIDTH: usize = 50;

/// Render one advisory section: a fixed-width banner around the title,
/// followed by the body (generated Markdown or an inline error message).
pub fn render_section(title: &str, body: &str) -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", body.trim_end());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_wraps_title_in_banner() {
        let out = render_section(UPGRADE_PLAN_TITLE, "1. bump lodash");
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[1], "=".repeat(50));
        assert_eq!(lines[2], UPGRADE_PLAN_TITLE);
        assert_eq!(lines[3], "=".repeat(50));
        assert!(out.contains("1. bump lodash"));
    }

    #[test]
    fn section_trims_trailing_body_whitespace() {
        let out = render_section(REPLACEMENTS_TITLE, "body\n\n\n");
        assert!(out.ends_with("body\n"));
    }
}
