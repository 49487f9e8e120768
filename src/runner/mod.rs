pub mod console;
pub mod events;

use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Summary, TestResult, TestStatus, TestSuite};

pub use console::{ConsoleReporter, render_summary};
pub use events::{Reporter, TestEvent};

/// Misuse of the registration API. These are programmer errors and are
/// returned to the caller instead of being recorded as test outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunnerError {
    #[error("Test `{test}` must be inside a describe block")]
    NoActiveSuite { test: String },

    #[error("Suite `{inner}` cannot be nested inside suite `{outer}`")]
    NestedSuite { outer: String, inner: String },
}

/// Synchronous suite/test registry for one session.
///
/// Bodies run to completion on the calling thread in registration order.
/// There is no timeout: a body that never returns stalls the whole session.
/// Create a fresh runner per session; nothing is reset between runs.
pub struct TestRunner<R: Reporter = ConsoleReporter<io::Stdout>> {
    suites: Vec<TestSuite>,
    /// Index of the suite whose body is currently executing.
    current: Option<usize>,
    reporter: R,
}

impl TestRunner {
    pub fn new() -> Self {
        Self::with_reporter(ConsoleReporter::stdout())
    }
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Reporter> TestRunner<R> {
    pub fn with_reporter(reporter: R) -> Self {
        Self {
            suites: Vec::new(),
            current: None,
            reporter,
        }
    }

    /// Register a suite and run its body immediately.
    ///
    /// The suite is visible in the registry before the body runs, so a body
    /// that fails part-way leaves its earlier tests in place. Body failures
    /// (an `Err` return or a panic) are reported and swallowed. Only nesting
    /// is refused.
    pub fn describe<F>(&mut self, name: impl Into<String>, body: F) -> Result<(), RunnerError>
    where
        F: FnOnce(&mut Self) -> anyhow::Result<()>,
    {
        let name = name.into();
        if let Some(outer) = self.current_suite() {
            return Err(RunnerError::NestedSuite {
                outer: outer.to_string(),
                inner: name,
            });
        }

        debug!(suite = %name, "suite started");
        self.reporter.on_event(&TestEvent::SuiteStarted { name: &name });
        self.suites.push(TestSuite::new(name.clone()));
        self.current = Some(self.suites.len() - 1);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| body(self)));
        self.current = None;

        let failure = match outcome {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(format!("{e:#}")),
            Err(payload) => Some(panic_message(payload.as_ref())),
        };
        if let Some(message) = failure {
            warn!(suite = %name, error = %message, "suite body failed");
            self.reporter.on_event(&TestEvent::SuiteError {
                name: &name,
                message: &message,
            });
        }
        Ok(())
    }

    /// Run one test in the open suite and record its outcome.
    ///
    /// Failures of the body never escape: they become a `fail` result.
    /// Returns an error without running the body when no suite is open.
    pub fn it<F>(&mut self, name: impl Into<String>, body: F) -> Result<(), RunnerError>
    where
        F: FnOnce() -> anyhow::Result<()>,
    {
        let name = name.into();
        let Some(index) = self.current else {
            return Err(RunnerError::NoActiveSuite { test: name });
        };

        let start = Instant::now();
        let mut result = TestResult::pending(name);
        self.reporter
            .on_event(&TestEvent::TestStarted { name: &result.name });

        let outcome = match panic::catch_unwind(AssertUnwindSafe(body)) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(format!("{e:#}")),
            Err(payload) => Err(panic_message(payload.as_ref())),
        };
        result.finish(outcome, start.elapsed());

        debug!(
            test = %result.name,
            status = result.status.label(),
            duration_ms = result.duration_ms,
            "test finished"
        );
        self.reporter
            .on_event(&TestEvent::TestFinished { result: &result });
        self.suites[index].tests.push(result);
        Ok(())
    }

    /// Snapshot of everything registered so far.
    pub fn summary(&self) -> Summary {
        Summary::from_suites(&self.suites)
    }

    /// Write the summary block and return whether no test failed.
    pub fn print_summary(&mut self) -> bool {
        let summary = self.summary();
        self.reporter.on_summary(&summary);
        if !summary.is_success() {
            warn!(failed = summary.failed, total = summary.total, "test run failed");
        }
        summary.is_success()
    }

    pub fn suites(&self) -> &[TestSuite] {
        &self.suites
    }

    pub fn into_suites(self) -> Vec<TestSuite> {
        self.suites
    }

    /// Name of the suite whose body is executing, if any.
    pub fn current_suite(&self) -> Option<&str> {
        self.current
            .and_then(|i| self.suites.get(i))
            .map(|s| s.name.as_str())
    }

    pub fn failed_tests(&self) -> impl Iterator<Item = (&str, &TestResult)> {
        self.suites.iter().flat_map(|suite| {
            suite
                .tests
                .iter()
                .filter(|t| t.status == TestStatus::Fail)
                .map(move |t| (suite.name.as_str(), t))
        })
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    pub(crate) fn emit(&mut self, event: &TestEvent<'_>) {
        self.reporter.on_event(event);
    }
}

/// Turn a panic payload into a failure message.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "test panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert::expect;
    use anyhow::{anyhow, bail};
    use pretty_assertions::assert_eq;

    fn quiet() -> TestRunner<ConsoleReporter<io::Sink>> {
        TestRunner::with_reporter(ConsoleReporter::new(io::sink()))
    }

    fn captured() -> TestRunner<ConsoleReporter<Vec<u8>>> {
        TestRunner::with_reporter(ConsoleReporter::new(Vec::new()))
    }

    fn output(runner: TestRunner<ConsoleReporter<Vec<u8>>>) -> String {
        String::from_utf8(runner.into_reporter().into_inner()).unwrap()
    }

    #[test]
    fn test_passing_body_records_pass() {
        let mut runner = quiet();
        runner
            .describe("math", |r| {
                r.it("adds", || {
                    expect(2 + 2).to_be(4)?;
                    Ok(())
                })?;
                Ok(())
            })
            .unwrap();

        let summary = runner.summary();
        let test = &summary.suites[0].tests[0];
        assert_eq!(test.status, TestStatus::Pass);
        assert_eq!(test.error, None);
    }

    #[test]
    fn test_failing_body_records_message() {
        let mut runner = quiet();
        runner
            .describe("errors", |r| {
                r.it("explodes", || Err(anyhow!("boom")))?;
                Ok(())
            })
            .unwrap();

        let test = &runner.suites()[0].tests[0];
        assert_eq!(test.status, TestStatus::Fail);
        assert_eq!(test.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_assertion_failure_message_is_recorded() {
        let mut runner = quiet();
        runner
            .describe("numbers", |r| {
                r.it("compares", || Ok(expect(3).to_be_greater_than(5)?))?;
                Ok(())
            })
            .unwrap();

        assert_eq!(
            runner.suites()[0].tests[0].error.as_deref(),
            Some("Expected 3 to be greater than 5")
        );
    }

    #[test]
    fn test_panicking_body_is_isolated() {
        let mut runner = quiet();
        runner
            .describe("panics", |r| {
                r.it("unwraps nothing", || {
                    let missing: Option<u8> = None;
                    missing.expect("no wallet loaded");
                    Ok(())
                })?;
                r.it("still runs", || Ok(()))?;
                Ok(())
            })
            .unwrap();

        let tests = &runner.suites()[0].tests;
        assert_eq!(tests.len(), 2);
        assert_eq!(tests[0].status, TestStatus::Fail);
        assert_eq!(tests[0].error.as_deref(), Some("no wallet loaded"));
        assert_eq!(tests[1].status, TestStatus::Pass);
    }

    #[test]
    fn test_it_without_suite_is_refused_before_running() {
        let mut runner = quiet();
        let mut ran = false;
        let err = runner
            .it("orphan", || {
                ran = true;
                Ok(())
            })
            .unwrap_err();

        assert!(!ran);
        assert_eq!(
            err,
            RunnerError::NoActiveSuite {
                test: "orphan".to_string()
            }
        );
        assert_eq!(runner.summary().total, 0);
    }

    #[test]
    fn test_closed_suite_cannot_be_reopened() {
        let mut runner = quiet();
        runner.describe("closed", |_| Ok(())).unwrap();

        assert_eq!(runner.current_suite(), None);
        assert!(runner.it("late", || Ok(())).is_err());
        assert!(runner.suites()[0].tests.is_empty());
    }

    #[test]
    fn test_suite_error_keeps_earlier_tests() {
        let mut runner = captured();
        runner
            .describe("setup", |r| {
                r.it("before", || Ok(()))?;
                bail!("node unreachable");
            })
            .unwrap();
        runner
            .describe("next", |r| {
                r.it("after", || Ok(()))?;
                Ok(())
            })
            .unwrap();

        let summary = runner.summary();
        assert_eq!(summary.suites.len(), 2);
        assert_eq!(summary.suites[0].tests.len(), 1);
        assert_eq!(summary.passed, 2);

        let log = output(runner);
        assert!(log.contains("[TEST SUITE ERROR] setup: node unreachable\n"));
    }

    #[test]
    fn test_panicking_suite_body_is_suppressed() {
        let mut runner = quiet();
        let result = runner.describe("fragile", |_| panic!("setup crashed"));

        assert!(result.is_ok());
        assert_eq!(runner.suites()[0].name, "fragile");
        assert_eq!(runner.current_suite(), None);
    }

    #[test]
    fn test_nested_describe_is_refused() {
        let mut runner = quiet();
        let mut nested = None;
        runner
            .describe("outer", |r| {
                nested = Some(r.describe("inner", |_| Ok(())));
                r.it("outer test", || Ok(()))?;
                Ok(())
            })
            .unwrap();

        assert_eq!(
            nested,
            Some(Err(RunnerError::NestedSuite {
                outer: "outer".to_string(),
                inner: "inner".to_string(),
            }))
        );
        assert_eq!(runner.suites().len(), 1);
        assert_eq!(runner.suites()[0].tests.len(), 1);
    }

    #[test]
    fn test_order_follows_registration() {
        let mut runner = quiet();
        for suite in ["zeta", "alpha", "mid"] {
            runner
                .describe(suite, |r| {
                    for test in ["c", "a", "b"] {
                        r.it(test, || Ok(()))?;
                    }
                    Ok(())
                })
                .unwrap();
        }

        let summary = runner.summary();
        let suites: Vec<_> = summary.suites.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(suites, ["zeta", "alpha", "mid"]);
        let tests: Vec<_> = summary.suites[1].tests.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(tests, ["c", "a", "b"]);
        assert_eq!(runner.into_suites(), summary.suites);
    }

    #[test]
    fn test_summary_is_idempotent() {
        let mut runner = quiet();
        runner
            .describe("s", |r| {
                r.it("ok", || Ok(()))?;
                r.it("bad", || Err(anyhow!("no")))?;
                Ok(())
            })
            .unwrap();

        let first = runner.summary();
        assert_eq!(first, runner.summary());
        assert_eq!(first.total, first.passed + first.failed);
        assert!(first.suites.iter().flat_map(|s| &s.tests).all(|t| t.status.is_terminal()));
    }

    #[test]
    fn test_summary_mid_run_sees_open_suite() {
        let mut runner = quiet();
        let mut seen = 0;
        runner
            .describe("live", |r| {
                r.it("one", || Ok(()))?;
                seen = r.summary().total;
                Ok(())
            })
            .unwrap();
        assert_eq!(seen, 1);
    }

    #[test]
    fn test_print_summary_verdict() {
        let mut empty = quiet();
        assert!(empty.print_summary());

        let mut failing = quiet();
        failing
            .describe("s", |r| {
                r.it("bad", || Err(anyhow!("no")))?;
                Ok(())
            })
            .unwrap();
        assert!(!failing.print_summary());
        assert_eq!(failing.failed_tests().count(), 1);
    }

    #[test]
    fn test_progress_output() {
        let mut runner = captured();
        runner
            .describe("Mnemonic", |r| {
                r.it("rejects", || Err(anyhow!("invalid word")))?;
                Ok(())
            })
            .unwrap();

        assert_eq!(
            output(runner),
            "\n[TEST SUITE] Mnemonic\n[TEST START] rejects\n[TEST FAIL] rejects: invalid word\n"
        );
    }

    #[test]
    fn test_panic_message_payloads() {
        assert_eq!(panic_message(&"static"), "static");
        assert_eq!(panic_message(&String::from("owned")), "owned");
        assert_eq!(panic_message(&42_u32), "test panicked");
    }
}
