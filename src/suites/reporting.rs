use anyhow::{Context, Result, anyhow};

use crate::assert::expect;
use crate::models::{RunOutcome, TestStatus};
use crate::runner::{ConsoleReporter, Reporter, TestRunner, render_summary};

/// Runs a throwaway session and checks what a UI consumer would read back.
pub fn register<R: Reporter>(runner: &mut TestRunner<R>) -> Result<()> {
    runner.describe("Reporting", |r| {
        r.it("counts every settled test", || {
            let mut inner = TestRunner::with_reporter(ConsoleReporter::new(std::io::sink()));
            inner.describe("inner", |r| {
                r.it("ok", || Ok(()))?;
                r.it("broken", || Err(anyhow!("boom")))?;
                Ok(())
            })?;

            let summary = inner.summary();
            expect(summary.total).to_be(summary.passed + summary.failed)?;
            expect(summary.failed).to_be(1)?;
            let broken = summary.suites[0]
                .tests
                .iter()
                .find(|t| t.status == TestStatus::Fail)
                .context("failed test missing from summary")?;
            expect(broken.error.as_deref()).to_be(Some("boom"))?;
            Ok(())
        })?;

        r.it("serializes the outcome for consumers", || {
            let mut inner = TestRunner::with_reporter(ConsoleReporter::new(std::io::sink()));
            inner.describe("inner", |r| {
                r.it("ok", || Ok(()))?;
                Ok(())
            })?;
            let outcome = RunOutcome::completed(true, inner.summary());
            let value = serde_json::to_value(&outcome)?;

            expect(&value["summary"]["suites"][0]["tests"][0]["status"]).to_be_defined()?;
            expect(value["summary"]["suites"][0]["tests"][0]["status"].as_str())
                .to_be(Some("pass"))?;
            expect(value.get("error").is_none()).to_be(true)?;
            Ok(())
        })?;

        r.it("ends the report with a verdict", || {
            let rendered = render_summary(&Default::default());
            expect(rendered.ends_with("[TEST RUN PASSED]\n")).to_be(true)?;
            Ok(())
        })?;

        Ok(())
    })?;
    Ok(())
}
