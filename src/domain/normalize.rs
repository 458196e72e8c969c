//! Response normalizer.
//!
//! Turns raw model output text into validated, defaulted [`TestCase`]
//! records: strips markdown fencing, parses the JSON array, and backfills
//! missing fields with per-category defaults.

use serde_json::Value;

use crate::entities::{TestCase, DEFAULT_PRIORITY, DEFAULT_STATUS};
use crate::errors::{CasegenError, CasegenResult};

/// How to treat object fields outside the known record shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownFieldPolicy {
    /// Reject unknown fields; construction of that record fails and aborts
    /// the category's normalization.
    #[default]
    Strict,
    /// Ignore unknown fields.
    Lenient,
}

/// Normalize raw model output into test case records for one category.
///
/// Unparseable top-level JSON is contained here: the failure is logged and
/// an empty vec returned, so a malformed category contributes zero records
/// instead of aborting the batch. A record missing a required field (or
/// carrying an unknown field under [`UnknownFieldPolicy::Strict`]) is an
/// error that aborts the whole category, with no partial-record recovery.
pub fn normalize(
    raw: &str,
    category: &str,
    policy: UnknownFieldPolicy,
) -> CasegenResult<Vec<TestCase>> {
    let cleaned = strip_code_fence(raw.trim());

    let parsed: Value = match serde_json::from_str(cleaned) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(
                category,
                error = %e,
                "Model response is not valid JSON; category contributes no records"
            );
            tracing::debug!(response = %truncate(cleaned, 500), "Unparseable response text");
            return Ok(Vec::new());
        }
    };

    let Value::Array(items) = parsed else {
        tracing::warn!(
            category,
            "Model response is valid JSON but not an array; category contributes no records"
        );
        return Ok(Vec::new());
    };

    let mut cases = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        // 1-based position, restarting per category
        cases.push(build_case(item, category, index + 1, policy)?);
    }

    Ok(cases)
}

/// Strip a leading/trailing markdown code fence if present.
///
/// Models frequently wrap JSON output as ```` ```json ... ``` ````.
fn strip_code_fence(text: &str) -> &str {
    let mut text = text;
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Build a single record from a JSON object via explicit field-by-field
/// mapping, applying defaults before construction.
fn build_case(
    item: Value,
    category: &str,
    seq: usize,
    policy: UnknownFieldPolicy,
) -> CasegenResult<TestCase> {
    let Value::Object(map) = item else {
        return Err(CasegenError::ResponseParse {
            reason: format!("entry {seq} for category '{category}' is not a JSON object"),
        });
    };

    if policy == UnknownFieldPolicy::Strict {
        if let Some(unknown) = map.keys().find(|k| !is_known_field(k)) {
            return Err(CasegenError::ResponseParse {
                reason: format!(
                    "entry {seq} for category '{category}' has unknown field '{unknown}'"
                ),
            });
        }
    }

    let required = |field: &str| -> CasegenResult<String> {
        map.get(field)
            .map(|v| text_value(field, v))
            .transpose()?
            .ok_or_else(|| CasegenError::ResponseParse {
                reason: format!(
                    "entry {seq} for category '{category}' is missing required field '{field}'"
                ),
            })
    };
    let optional = |field: &str, default: &str| -> CasegenResult<String> {
        match map.get(field) {
            Some(v) => text_value(field, v),
            None => Ok(default.to_string()),
        }
    };

    Ok(TestCase {
        test_case_id: optional("test_case_id", &TestCase::default_id(category, seq))?,
        test_scenario: required("test_scenario")?,
        test_case_name: required("test_case_name")?,
        test_steps: required("test_steps")?,
        expected_result: required("expected_result")?,
        actual_result: optional("actual_result", "")?,
        status: optional("status", DEFAULT_STATUS)?,
        priority: optional("priority", DEFAULT_PRIORITY)?,
        test_type: optional("test_type", &capitalize_first(category))?,
        preconditions: optional("preconditions", "")?,
        test_data: optional("test_data", "")?,
        notes: optional("notes", "")?,
    })
}

fn is_known_field(key: &str) -> bool {
    matches!(
        key,
        "test_case_id"
            | "test_scenario"
            | "test_case_name"
            | "test_steps"
            | "expected_result"
            | "actual_result"
            | "status"
            | "priority"
            | "test_type"
            | "preconditions"
            | "test_data"
            | "notes"
    )
}

/// Coerce a JSON value into record text.
///
/// Steps are sometimes returned as an array of strings; those are rendered
/// as numbered lines. Scalars pass through as their display form.
fn text_value(field: &str, value: &Value) -> CasegenResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(items) if field == "test_steps" => {
            let mut lines = Vec::with_capacity(items.len());
            for (i, step) in items.iter().enumerate() {
                let Value::String(step) = step else {
                    return Err(CasegenError::ResponseParse {
                        reason: format!("'{field}' array contains a non-string entry"),
                    });
                };
                lines.push(format!("{}. {}", i + 1, step));
            }
            Ok(lines.join("\n"))
        }
        _ => Err(CasegenError::ResponseParse {
            reason: format!("field '{field}' has unsupported type"),
        }),
    }
}

/// Capitalize the first letter of a category token: "functional" →
/// "Functional", "edge_case" → "Edge_case".
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
