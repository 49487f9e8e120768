//! Suites run by the `verdict` binary.

mod assertions;
mod reporting;

use crate::runner::Reporter;
use crate::session::SuiteFn;

/// Registration functions in the order they run.
pub fn builtin<R: Reporter>() -> Vec<SuiteFn<R>> {
    vec![
        assertions::register::<R> as SuiteFn<R>,
        reporting::register::<R>,
    ]
}
