//! Test case entity.

use serde::{Deserialize, Serialize};

/// Default execution status for a freshly generated case.
pub const DEFAULT_STATUS: &str = "Not Executed";

/// Default priority when the model omits one.
pub const DEFAULT_PRIORITY: &str = "Medium";

/// Fixed export column order for spreadsheets.
///
/// Each entry is `(field name, header label)`. The order is part of the
/// exporter contract and must not change between releases.
pub const EXPORT_COLUMNS: &[(&str, &str)] = &[
    ("test_case_id", "Test Case ID"),
    ("test_scenario", "Test Scenario"),
    ("test_case_name", "Test Case Name"),
    ("preconditions", "Preconditions"),
    ("test_steps", "Test Steps"),
    ("test_data", "Test Data"),
    ("expected_result", "Expected Result"),
    ("actual_result", "Actual Result"),
    ("status", "Status"),
    ("priority", "Priority"),
    ("test_type", "Test Type"),
    ("notes", "Notes"),
];

/// One manual test case.
///
/// Records are transient: they live for the duration of a generation batch
/// and are never persisted outside the exported spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Unique identifier within a generation batch, e.g. `TC_FUNCTIONAL_001`
    pub test_case_id: String,
    /// Description of the situation under test
    pub test_scenario: String,
    /// Short, descriptive name
    pub test_case_name: String,
    /// Execution steps as numbered text
    pub test_steps: String,
    /// Expected outcome
    pub expected_result: String,
    /// Observed outcome (empty until executed)
    #[serde(default)]
    pub actual_result: String,
    /// Execution status
    #[serde(default = "default_status")]
    pub status: String,
    /// Priority (High/Medium/Low)
    #[serde(default = "default_priority")]
    pub priority: String,
    /// Category of coverage, e.g. "Functional"
    #[serde(default)]
    pub test_type: String,
    /// Preconditions, if any
    #[serde(default)]
    pub preconditions: String,
    /// Test data needed to execute
    #[serde(default)]
    pub test_data: String,
    /// Free-form notes
    #[serde(default)]
    pub notes: String,
}

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

fn default_priority() -> String {
    DEFAULT_PRIORITY.to_string()
}

impl TestCase {
    /// Look up a field value by its export column name.
    ///
    /// Returns `None` for names outside the record shape; the exporter
    /// silently skips those columns.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "test_case_id" => Some(&self.test_case_id),
            "test_scenario" => Some(&self.test_scenario),
            "test_case_name" => Some(&self.test_case_name),
            "test_steps" => Some(&self.test_steps),
            "expected_result" => Some(&self.expected_result),
            "actual_result" => Some(&self.actual_result),
            "status" => Some(&self.status),
            "priority" => Some(&self.priority),
            "test_type" => Some(&self.test_type),
            "preconditions" => Some(&self.preconditions),
            "test_data" => Some(&self.test_data),
            "notes" => Some(&self.notes),
            _ => None,
        }
    }

    /// Synthesize the default identifier for a record at 1-based position
    /// `seq` within a category's batch.
    pub fn default_id(category: &str, seq: usize) -> String {
        format!("TC_{}_{:03}", category.to_uppercase(), seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_id_format() {
        assert_eq!(TestCase::default_id("functional", 1), "TC_FUNCTIONAL_001");
        assert_eq!(TestCase::default_id("edge_case", 12), "TC_EDGE_CASE_012");
        assert_eq!(TestCase::default_id("ui", 123), "TC_UI_123");
    }

    #[test]
    fn test_serde_defaults() {
        let json = r#"{
            "test_case_id": "TC_FUNCTIONAL_001",
            "test_scenario": "Login succeeds",
            "test_case_name": "Valid login",
            "test_steps": "1. Open login page\n2. Submit credentials",
            "expected_result": "User lands on dashboard"
        }"#;

        let tc: TestCase = serde_json::from_str(json).unwrap();
        assert_eq!(tc.status, DEFAULT_STATUS);
        assert_eq!(tc.priority, DEFAULT_PRIORITY);
        assert!(tc.actual_result.is_empty());
        assert!(tc.notes.is_empty());
    }

    #[test]
    fn test_field_lookup() {
        let tc = TestCase {
            test_case_id: "TC_UI_001".to_string(),
            test_scenario: "scenario".to_string(),
            test_case_name: "name".to_string(),
            test_steps: "1. step".to_string(),
            expected_result: "ok".to_string(),
            actual_result: String::new(),
            status: DEFAULT_STATUS.to_string(),
            priority: DEFAULT_PRIORITY.to_string(),
            test_type: "Ui".to_string(),
            preconditions: String::new(),
            test_data: String::new(),
            notes: String::new(),
        };

        assert_eq!(tc.field("test_case_id"), Some("TC_UI_001"));
        assert_eq!(tc.field("priority"), Some("Medium"));
        assert_eq!(tc.field("nonexistent_column"), None);
    }

    #[test]
    fn test_export_columns_cover_record_shape() {
        let tc = TestCase {
            test_case_id: "id".to_string(),
            test_scenario: "s".to_string(),
            test_case_name: "n".to_string(),
            test_steps: "1.".to_string(),
            expected_result: "e".to_string(),
            actual_result: String::new(),
            status: String::new(),
            priority: String::new(),
            test_type: String::new(),
            preconditions: String::new(),
            test_data: String::new(),
            notes: String::new(),
        };
        for (field, _) in EXPORT_COLUMNS.iter().copied() {
            assert!(tc.field(field).is_some(), "column '{field}' not in record");
        }
    }
}
