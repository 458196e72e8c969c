//! Test case generation prompt template.
//!
//! Turns a free-text requirement plus a requested test category into the
//! instruction pair sent to the model.

use serde::Serialize;

use super::PromptTemplate;

/// Context for the generate-cases prompt.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateCasesContext {
    /// Free-text feature requirement
    pub requirement: String,
    /// Requested test category token, e.g. "functional"
    pub category: String,
    /// Category upper-cased for emphasis in the prompt
    pub category_upper: String,
}

impl GenerateCasesContext {
    /// Build a context from a requirement and a category token.
    ///
    /// Category tokens are accepted verbatim; membership in a known set is
    /// not validated here.
    pub fn new(requirement: impl Into<String>, category: impl Into<String>) -> Self {
        let category = category.into();
        let category_upper = category.to_uppercase();
        Self {
            requirement: requirement.into(),
            category,
            category_upper,
        }
    }
}

/// Get the generate-cases template.
pub fn template() -> PromptTemplate {
    PromptTemplate::new("generate-cases", SYSTEM_PROMPT, USER_PROMPT)
        .with_description("Generate manual test cases for a requirement and category")
}

const SYSTEM_PROMPT: &str =
    "You are a senior QA engineer who writes standard, well-structured manual test cases.";

const USER_PROMPT: &str = r#"Create standard manual test cases for the following requirement:

REQUIREMENT: {{requirement}}

TEST TYPE: {{category_upper}}

Requirements:
- Create 3-5 test cases for the {{category}} type
- Each test case must have:
  * test_case_id (format: TC_{{category_upper}}_001, TC_{{category_upper}}_002, ...)
  * test_scenario: description of the situation under test
  * test_case_name: short, clear name
  * test_steps: execution steps, numbered (1. 2. 3. ...)
  * expected_result: the expected outcome
  * preconditions: prerequisites, if any
  * test_data: data needed to execute the test
  * priority: High/Medium/Low
- The test cases must fully cover the requirement

OUTPUT FORMAT: a JSON array of objects, each object with exactly the fields above.
Return ONLY the JSON array. No markdown formatting, no explanatory text before or after."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_uppercases_category() {
        let ctx = GenerateCasesContext::new("login flow", "edge_case");
        assert_eq!(ctx.category, "edge_case");
        assert_eq!(ctx.category_upper, "EDGE_CASE");
    }

    #[test]
    fn test_rendered_prompt_embeds_inputs() {
        let ctx = GenerateCasesContext::new("login with email and password", "negative");
        let (system, user) = template().render(&ctx).unwrap();

        assert!(system.contains("QA engineer"));
        assert!(user.contains("REQUIREMENT: login with email and password"));
        assert!(user.contains("TEST TYPE: NEGATIVE"));
        assert!(user.contains("TC_NEGATIVE_001"));
        assert!(user.contains("JSON array"));
    }

    #[test]
    fn test_unrecognized_category_passes_through() {
        let ctx = GenerateCasesContext::new("checkout", "chaos_monkey");
        let (_, user) = template().render(&ctx).unwrap();
        assert!(user.contains("TEST TYPE: CHAOS_MONKEY"));
    }
}
