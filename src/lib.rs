//! Synchronous describe/it test runner with an `expect` assertion library,
//! a line-oriented console report and a serializable summary.

pub mod assert;
pub mod config;
pub mod logging;
pub mod models;
pub mod runner;
pub mod session;
pub mod suites;

pub use assert::{AssertionError, Definedness, Expectation, expect};
pub use models::{RunOutcome, Summary, TestResult, TestStatus, TestSuite};
pub use runner::{ConsoleReporter, Reporter, RunnerError, TestEvent, TestRunner};
pub use session::{SuiteFn, run_all_tests};
