//! Inline suppression: `throwspec-ignore` and ESLint-style disable comments.

use throwspec_core::constants::PLUGIN_NAME;

/// Checks whether diagnostics in one file are suppressed by inline comments.
pub struct SuppressionChecker<'s> {
    lines: Vec<&'s str>,
}

impl<'s> SuppressionChecker<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            lines: source.lines().collect(),
        }
    }

    /// Check if a diagnostic for `rule_id` on one-based `line` is suppressed.
    ///
    /// Supports:
    /// - `// throwspec-ignore` on the line above or at the end of the line
    /// - `// throwspec-ignore throws-annotation, other-rule`
    /// - `// eslint-disable-next-line [rules]` on the line above
    /// - `// eslint-disable-line [rules]` at the end of the line
    pub fn is_suppressed(&self, line: u32, rule_id: &str) -> bool {
        if line == 0 {
            return false;
        }
        let idx = (line - 1) as usize;

        if let Some(current) = self.lines.get(idx) {
            if self.same_line_suppresses(current, rule_id) {
                return true;
            }
        }

        if idx > 0 {
            if let Some(above) = self.lines.get(idx - 1) {
                if self.next_line_suppresses(above, rule_id) {
                    return true;
                }
            }
        }

        false
    }

    fn same_line_suppresses(&self, line: &str, rule_id: &str) -> bool {
        check_directive(line, "throwspec-ignore", rule_id).unwrap_or(false)
            || check_directive(line, "eslint-disable-line", rule_id).unwrap_or(false)
    }

    fn next_line_suppresses(&self, line: &str, rule_id: &str) -> bool {
        check_directive(line, "throwspec-ignore", rule_id).unwrap_or(false)
            || check_directive(line, "eslint-disable-next-line", rule_id).unwrap_or(false)
    }

    /// Extract all `throwspec-ignore` directives in the file.
    pub fn extract_suppressions(&self) -> Vec<SuppressionDirective> {
        self.lines
            .iter()
            .enumerate()
            .filter_map(|(i, line)| parse_directive(i as u32 + 1, line))
            .collect()
    }
}

/// `Some(matches)` when `line` carries `marker` inside a comment.
fn check_directive(line: &str, marker: &str, rule_id: &str) -> Option<bool> {
    let rules = directive_rules(line, marker)?;
    if rules.is_empty() {
        return Some(true);
    }
    Some(rules.iter().any(|r| rule_matches(r, rule_id)))
}

/// Rule list after `marker`, empty for a bare directive.
fn directive_rules<'l>(line: &'l str, marker: &str) -> Option<Vec<&'l str>> {
    let trimmed = line.trim();
    let pos = trimmed.find(marker)?;

    let before = &trimmed[..pos];
    if !before.contains("//") && !before.contains("/*") {
        return None;
    }

    let after = trimmed[pos + marker.len()..].trim();
    // Longer markers share a prefix (`eslint-disable-line` vs `-next-line`).
    if after.starts_with('-') && !after.starts_with("--") {
        return None;
    }
    let after = after
        .split("--")
        .next()
        .unwrap_or("")
        .trim_end_matches("*/")
        .trim();
    if after.is_empty() {
        return Some(Vec::new());
    }
    Some(after.split(',').map(str::trim).filter(|r| !r.is_empty()).collect())
}

/// Accept both `throws-annotation` and `throwspec/throws-annotation`.
fn rule_matches(written: &str, rule_id: &str) -> bool {
    if written == rule_id {
        return true;
    }
    written
        .strip_prefix(PLUGIN_NAME)
        .and_then(|rest| rest.strip_prefix('/'))
        .is_some_and(|bare| bare == rule_id)
}

fn parse_directive(line_num: u32, line: &str) -> Option<SuppressionDirective> {
    let rules = directive_rules(line, "throwspec-ignore")?;
    Some(SuppressionDirective {
        line: line_num,
        applies_to_line: line_num + 1,
        rule_ids: rules.into_iter().map(str::to_string).collect(),
    })
}

/// A parsed suppression directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuppressionDirective {
    pub line: u32,
    pub applies_to_line: u32,
    pub rule_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULE: &str = "throws-annotation";

    #[test]
    fn test_bare_ignore_on_previous_line() {
        let source = "// throwspec-ignore\nthrows(fn());\nthrows(fn());";
        let checker = SuppressionChecker::new(source);
        assert!(checker.is_suppressed(2, RULE));
        assert!(!checker.is_suppressed(3, RULE));
    }

    #[test]
    fn test_qualified_rule_id() {
        let source = "// eslint-disable-next-line throwspec/throws-annotation\nthrows(fn());";
        assert!(SuppressionChecker::new(source).is_suppressed(2, RULE));
    }

    #[test]
    fn test_other_rule_does_not_suppress() {
        let source = "// throwspec-ignore no-console\nthrows(fn());";
        assert!(!SuppressionChecker::new(source).is_suppressed(2, RULE));
    }

    #[test]
    fn test_same_line_directives() {
        let source = "throws(fn()); // eslint-disable-line throws-annotation\nthrows(fn()); // throwspec-ignore";
        let checker = SuppressionChecker::new(source);
        assert!(checker.is_suppressed(1, RULE));
        assert!(checker.is_suppressed(2, RULE));
    }

    #[test]
    fn test_next_line_directive_does_not_apply_to_its_own_line() {
        let source = "throws(fn()); // eslint-disable-next-line";
        assert!(!SuppressionChecker::new(source).is_suppressed(1, RULE));
    }

    #[test]
    fn test_marker_outside_comment_is_ignored() {
        let source = "const s = \"throwspec-ignore\";\nthrows(fn());";
        assert!(!SuppressionChecker::new(source).is_suppressed(2, RULE));
    }

    #[test]
    fn test_extract_suppressions() {
        let source = "a();\n// throwspec-ignore throws-annotation, other\nb();";
        let directives = SuppressionChecker::new(source).extract_suppressions();
        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0].applies_to_line, 3);
        assert_eq!(directives[0].rule_ids, vec!["throws-annotation", "other"]);
    }
}
