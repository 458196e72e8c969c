//! Core entities for test case generation.

mod test_case;

pub use test_case::{TestCase, DEFAULT_PRIORITY, DEFAULT_STATUS, EXPORT_COLUMNS};
