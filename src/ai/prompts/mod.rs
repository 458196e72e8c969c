//! Prompt template system.
//!
//! Handlebars-based templates rendering a (system, user) prompt pair from a
//! typed context.

use handlebars::Handlebars;
use serde::Serialize;

use crate::errors::{CasegenError, CasegenResult};

mod generate_cases;

pub use generate_cases::{template as generate_cases_template, GenerateCasesContext};

/// A prompt template with system and user messages.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// Template ID
    pub id: String,
    /// Description
    pub description: String,
    /// System prompt template
    pub system: String,
    /// User prompt template
    pub user: String,
}

impl PromptTemplate {
    /// Create a new prompt template.
    pub fn new(id: impl Into<String>, system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            system: system.into(),
            user: user.into(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Render the template with the given context.
    ///
    /// Rendering is deterministic: identical inputs produce byte-identical
    /// output.
    pub fn render<T: Serialize>(&self, context: &T) -> CasegenResult<(String, String)> {
        let mut handlebars = Handlebars::new();
        // Prompts are plain text, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        handlebars
            .register_template_string("system", &self.system)
            .map_err(|e| CasegenError::Template {
                reason: format!("Invalid system template: {e}"),
            })?;
        handlebars
            .register_template_string("user", &self.user)
            .map_err(|e| CasegenError::Template {
                reason: format!("Invalid user template: {e}"),
            })?;

        let system = handlebars
            .render("system", context)
            .map_err(|e| CasegenError::Template {
                reason: format!("Failed to render system prompt: {e}"),
            })?;
        let user = handlebars
            .render("user", context)
            .map_err(|e| CasegenError::Template {
                reason: format!("Failed to render user prompt: {e}"),
            })?;

        Ok((system, user))
    }
}
