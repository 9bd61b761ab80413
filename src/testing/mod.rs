pub mod aggregate;
mod discoverer;
mod executor;
pub mod report;
mod result;

pub use aggregate::{Tally, attachable, is_all_success, suite_status};
pub use discoverer::{ALL_TESTS, TestDiscoverer, is_test_entry};
pub use executor::TestExecutor;
pub use result::{TestResult, TestStatus};
