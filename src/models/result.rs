use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::status::TestStatus;

/// Outcome of a single `it` registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub status: TestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wall-clock time of the body in whole milliseconds.
    #[serde(rename = "duration")]
    pub duration_ms: u64,
}

impl TestResult {
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Pending,
            error: None,
            duration_ms: 0,
        }
    }

    /// Settle a pending result. Status, duration and error are written together
    /// and the result never changes afterwards.
    pub fn finish(&mut self, outcome: Result<(), String>, elapsed: Duration) {
        debug_assert_eq!(self.status, TestStatus::Pending, "result settled twice");
        self.duration_ms = elapsed.as_millis() as u64;
        match outcome {
            Ok(()) => self.status = TestStatus::Pass,
            Err(message) => {
                self.status = TestStatus::Fail;
                self.error = Some(message);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSuite {
    pub name: String,
    pub tests: Vec<TestResult>,
}

impl TestSuite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tests: Vec::new(),
        }
    }
}

/// Aggregate view over every suite registered so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub suites: Vec<TestSuite>,
}

impl Summary {
    pub fn from_suites(suites: &[TestSuite]) -> Self {
        let mut summary = Summary {
            suites: suites.to_vec(),
            ..Default::default()
        };
        for test in suites.iter().flat_map(|s| &s.tests) {
            summary.total += 1;
            match test.status {
                TestStatus::Pass => summary.passed += 1,
                TestStatus::Fail => summary.failed += 1,
                TestStatus::Pending => {}
            }
        }
        summary
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// What a full session hands back to a UI or CI consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub passed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunOutcome {
    pub fn completed(passed: bool, summary: Summary) -> Self {
        Self {
            passed,
            summary: Some(summary),
            error: None,
        }
    }

    pub fn aborted(error: impl Into<String>) -> Self {
        Self {
            passed: false,
            summary: None,
            error: Some(error.into()),
        }
    }
}
