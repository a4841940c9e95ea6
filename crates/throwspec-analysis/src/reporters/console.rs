//! Console reporter: human-readable output with color codes.

use super::Reporter;
use crate::linter::LintReport;
use crate::rules::Severity;

/// Console reporter for human-readable terminal output.
pub struct ConsoleReporter {
    pub use_color: bool,
}

impl ConsoleReporter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn color_start(&self, severity: &Severity) -> &'static str {
        if !self.use_color {
            return "";
        }
        match severity {
            Severity::Error => "\x1b[31m",   // red
            Severity::Warning => "\x1b[33m", // yellow
            Severity::Info => "\x1b[36m",    // cyan
            Severity::Hint => "\x1b[90m",    // gray
        }
    }

    fn color_end(&self) -> &'static str {
        if self.use_color {
            "\x1b[0m"
        } else {
            ""
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Reporter for ConsoleReporter {
    fn name(&self) -> &'static str {
        "console"
    }

    fn generate(&self, report: &LintReport) -> Result<String, String> {
        let mut output = String::new();

        for diagnostic in &report.diagnostics {
            let cs = self.color_start(&diagnostic.severity);
            let ce = self.color_end();
            output.push_str(&format!(
                "{}:{}:{}: {}{}{}: {} [{}]\n",
                diagnostic.file.display(),
                diagnostic.line(),
                diagnostic.column(),
                cs,
                diagnostic.severity,
                ce,
                diagnostic.message,
                diagnostic.rule_id,
            ));
            for suggestion in &diagnostic.suggestions {
                output.push_str(&format!("    suggestion: {}\n", suggestion.description));
            }
        }

        let problems = report.diagnostics.len();
        output.push_str(&format!(
            "{} problem{} in {} file{}",
            problems,
            if problems == 1 { "" } else { "s" },
            report.files_checked,
            if report.files_checked == 1 { "" } else { "s" },
        ));
        if report.suppressed > 0 {
            output.push_str(&format!(" ({} suppressed)", report.suppressed));
        }
        output.push('\n');

        Ok(output)
    }
}
