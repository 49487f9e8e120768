pub mod result;
pub mod status;

pub use result::{RunOutcome, Summary, TestResult, TestSuite};
pub use status::TestStatus;
