use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    #[default]
    Pending,
    Pass,
    Fail,
}

impl TestStatus {
    pub fn icon(&self) -> &'static str {
        match self {
            TestStatus::Pending => "◌",
            TestStatus::Pass => "✓",
            TestStatus::Fail => "✗",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TestStatus::Pending => "PENDING",
            TestStatus::Pass => "PASS",
            TestStatus::Fail => "FAIL",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TestStatus::Pass | TestStatus::Fail)
    }
}
