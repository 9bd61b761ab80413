//! Status aggregation over result trees.

use crate::testing::{TestResult, TestStatus};

/// Whether a node carries information worth attaching to its parent.
pub fn attachable(result: &TestResult) -> bool {
    result.declared_status().is_some() || !result.children().is_empty()
}

/// ERROR beats FAILURE beats everything else. Ignored children count as passing.
pub fn suite_status<'a>(children: impl IntoIterator<Item = &'a TestResult>) -> TestStatus {
    let mut status = TestStatus::Success;

    for child in children {
        match child.status() {
            TestStatus::Error => return TestStatus::Error,
            TestStatus::Failure => status = TestStatus::Failure,
            TestStatus::Success | TestStatus::Ignored => {}
        }
    }

    status
}

/// True iff every leaf below `result` succeeded or was ignored. An empty tree is a success.
pub fn is_all_success(result: &TestResult) -> bool {
    match result.declared_status() {
        Some(status) => matches!(status, TestStatus::Success | TestStatus::Ignored),
        None => result.children().iter().all(is_all_success),
    }
}

/// Leaf counts per status.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub success: usize,
    pub failure: usize,
    pub error: usize,
    pub ignored: usize,
}

impl Tally {
    pub fn of(result: &TestResult) -> Self {
        let mut tally = Self::default();
        tally.add(result);
        tally
    }

    fn add(&mut self, result: &TestResult) {
        match result.declared_status() {
            Some(TestStatus::Success) => self.success += 1,
            Some(TestStatus::Failure) => self.failure += 1,
            Some(TestStatus::Error) => self.error += 1,
            Some(TestStatus::Ignored) => self.ignored += 1,
            None => result.children().iter().for_each(|child| self.add(child)),
        }
    }

    pub fn total(&self) -> usize {
        self.success + self.failure + self.error + self.ignored
    }
}
