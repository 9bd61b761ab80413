//! Process exit codes.

use crate::testing::TestResult;

/// Every test succeeded or was ignored.
pub const SUCCESS: u8 = 0;
/// At least one test failed or errored.
pub const TEST_FAILURE: u8 = 1;
/// The run itself broke: configuration, resource synchronization or an unexpected defect.
pub const INFRASTRUCTURE_FAILURE: u8 = 2;

/// # Examples
/// ```
/// use suiterun::cli::exit_code::{exit_code_for, SUCCESS, TEST_FAILURE};
/// use suiterun::testing::{TestResult, TestStatus};
///
/// assert_eq!(exit_code_for(&TestResult::leaf("a", TestStatus::Ignored)), SUCCESS);
/// assert_eq!(exit_code_for(&TestResult::error("b", "boom")), TEST_FAILURE);
/// ```
pub fn exit_code_for(result: &TestResult) -> u8 {
    if result.is_all_success() {
        SUCCESS
    } else {
        TEST_FAILURE
    }
}
