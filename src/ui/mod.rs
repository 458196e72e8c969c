//! Terminal UI helpers for test case display.
//!
//! This module uses println! for CLI output, which is appropriate
//! for terminal user interfaces.

use colored::Colorize;
use comfy_table::{Cell, Color, ContentArrangement, Table};

use crate::entities::TestCase;

/// Print success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print error message
pub fn print_error(message: &str) {
    println!("{} {}", "✗".red().bold(), message);
}

/// Print info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Print warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Color for a priority value.
fn priority_color(priority: &str) -> Color {
    match priority.to_lowercase().as_str() {
        "low" => Color::DarkGrey,
        "high" => Color::Yellow,
        "critical" => Color::Red,
        _ => Color::White,
    }
}

/// Create a summary table for generated test cases.
pub fn case_table(cases: &[TestCase]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Name").fg(Color::Cyan),
        Cell::new("Type").fg(Color::Cyan),
        Cell::new("Priority").fg(Color::Cyan),
        Cell::new("Scenario").fg(Color::Cyan),
    ]);

    for case in cases {
        table.add_row(vec![
            Cell::new(&case.test_case_id),
            Cell::new(&case.test_case_name),
            Cell::new(&case.test_type),
            Cell::new(&case.priority).fg(priority_color(&case.priority)),
            Cell::new(truncate(&case.test_scenario, 50)),
        ]);
    }

    table
}

/// Truncate a string to `max` characters, appending an ellipsis.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max).collect();
        format!("{cut}...")
    }
}
