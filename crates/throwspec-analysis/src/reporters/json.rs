//! JSON reporter: structured JSON output.

use serde_json::json;

use super::Reporter;
use crate::linter::LintReport;

/// JSON reporter for machine-readable output.
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, report: &LintReport) -> Result<String, String> {
        let diagnostics: Vec<serde_json::Value> = report
            .diagnostics
            .iter()
            .map(|d| {
                json!({
                    "file": d.file.display().to_string(),
                    "line": d.line(),
                    "column": d.column(),
                    "end_line": d.range.end.line + 1,
                    "end_column": d.range.end.column + 1,
                    "severity": d.severity,
                    "rule_id": d.rule_id,
                    "message_id": d.message_id,
                    "message": d.message,
                    "suggestions": d.suggestions,
                })
            })
            .collect();

        let output = json!({
            "files_checked": report.files_checked,
            "problem_count": report.diagnostics.len(),
            "suppressed": report.suppressed,
            "diagnostics": diagnostics,
        });

        serde_json::to_string_pretty(&output).map_err(|e| e.to_string())
    }
}
