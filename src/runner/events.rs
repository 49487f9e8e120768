use crate::models::{Summary, TestResult};

/// Progress notifications emitted while suites are registered and run.
#[derive(Debug, Clone, Copy)]
pub enum TestEvent<'a> {
    RunStarted { title: &'a str },
    SuiteStarted { name: &'a str },
    /// A suite body failed outside of any test and was suppressed.
    SuiteError { name: &'a str, message: &'a str },
    TestStarted { name: &'a str },
    TestFinished { result: &'a TestResult },
    /// Orchestration itself failed; no summary follows.
    RunError { message: &'a str },
}

/// Receives runner progress and the final summary.
pub trait Reporter {
    fn on_event(&mut self, event: &TestEvent<'_>);

    fn on_summary(&mut self, summary: &Summary);
}
