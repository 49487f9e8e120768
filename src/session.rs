//! One full run over a fixed list of suite registration functions.

use std::panic::{self, AssertUnwindSafe};

use tracing::{error, info};

use crate::models::RunOutcome;
use crate::runner::{Reporter, TestEvent, TestRunner, panic_message};

/// A function that registers one or more suites on the runner.
pub type SuiteFn<R> = fn(&mut TestRunner<R>) -> anyhow::Result<()>;

/// Register every suite in order, print the summary and hand back the
/// outcome.
///
/// Test and suite failures are already absorbed by the runner. Anything that
/// still escapes a registration function (an `Err` such as a test declared
/// outside a suite, or a panic) aborts the session and comes back as an
/// outcome with `error` set and no summary.
pub fn run_all_tests<R: Reporter>(
    runner: &mut TestRunner<R>,
    title: &str,
    suites: &[SuiteFn<R>],
) -> RunOutcome {
    runner.emit(&TestEvent::RunStarted { title });

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| -> anyhow::Result<bool> {
        for register in suites {
            register(runner)?;
        }
        Ok(runner.print_summary())
    }));

    let message = match outcome {
        Ok(Ok(passed)) => {
            let summary = runner.summary();
            info!(
                total = summary.total,
                passed = summary.passed,
                failed = summary.failed,
                "test run complete"
            );
            return RunOutcome::completed(passed, summary);
        }
        Ok(Err(e)) => format!("{e:#}"),
        Err(payload) => panic_message(payload.as_ref()),
    };

    error!(error = %message, "test run aborted");
    runner.emit(&TestEvent::RunError { message: &message });
    RunOutcome::aborted(message)
}
