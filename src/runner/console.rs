use std::fmt::Write as _;
use std::io::{self, Write};

use crate::models::{Summary, TestStatus};

use super::events::{Reporter, TestEvent};

const RULE_WIDTH: usize = 60;

/// Writes the line-oriented report that CI log scrapers key on.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        // Nothing sensible to do if the report channel itself is gone.
        let _ = writeln!(self.out, "{}", text);
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn on_event(&mut self, event: &TestEvent<'_>) {
        match *event {
            TestEvent::RunStarted { title } => {
                self.line(&format!("\n[TEST RUN] Starting {}...\n", title));
            }
            TestEvent::SuiteStarted { name } => {
                self.line(&format!("\n[TEST SUITE] {}", name));
            }
            TestEvent::SuiteError { name, message } => {
                self.line(&format!("[TEST SUITE ERROR] {}: {}", name, message));
            }
            TestEvent::TestStarted { name } => {
                self.line(&format!("[TEST START] {}", name));
            }
            TestEvent::TestFinished { result } => match result.status {
                TestStatus::Fail => self.line(&format!(
                    "[TEST FAIL] {}: {}",
                    result.name,
                    result.error.as_deref().unwrap_or_default()
                )),
                _ => self.line(&format!(
                    "[TEST PASS] {} ({}ms)",
                    result.name, result.duration_ms
                )),
            },
            TestEvent::RunError { message } => {
                self.line(&format!("[TEST ERROR] {}", message));
            }
        }
    }

    fn on_summary(&mut self, summary: &Summary) {
        let text = render_summary(summary);
        let _ = self.out.write_all(text.as_bytes());
        let _ = self.out.flush();
    }
}

/// Render the end-of-run block: totals, then every suite and test in
/// registration order, then the verdict line.
pub fn render_summary(summary: &Summary) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "\n{}", rule);
    let _ = writeln!(out, "[TEST SUMMARY]");
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Total Tests: {}", summary.total);
    let _ = writeln!(out, "Passed: {}", summary.passed);
    let _ = writeln!(out, "Failed: {}", summary.failed);
    let _ = writeln!(out, "{}", rule);

    for suite in &summary.suites {
        let _ = writeln!(out, "\n{}:", suite.name);
        for test in &suite.tests {
            let _ = writeln!(
                out,
                "  {} [{}] {} ({}ms)",
                test.status.icon(),
                test.status.label(),
                test.name,
                test.duration_ms
            );
            if let Some(ref error) = test.error {
                let _ = writeln!(out, "    Error: {}", error);
            }
        }
    }

    let _ = writeln!(out, "\n{}", rule);
    if summary.is_success() {
        let _ = writeln!(out, "[TEST RUN PASSED]");
    } else {
        let _ = writeln!(out, "[TEST RUN FAILED]");
    }
    out
}
