//! Generation orchestrator.
//!
//! Iterates over the requested test categories, invokes the AI provider for
//! each, and accumulates the normalized records into a batch.

use std::sync::Arc;

use serde::Serialize;

use crate::ai::{
    prompts::generate_cases_template, AiMessage, AiProvider, GenerateCasesContext,
    GenerateOptions, ProviderRegistry, TokenUsage,
};
use crate::entities::TestCase;
use crate::errors::{CasegenError, CasegenResult};

use super::normalize::{normalize, UnknownFieldPolicy};

/// Categories generated when the caller does not request any.
pub const DEFAULT_CATEGORIES: &[&str] = &["functional", "negative", "edge_case", "regression"];

/// A category that produced no records because its generation failed.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryFailure {
    /// The category token that failed
    pub category: String,
    /// Human-readable failure description
    pub error: String,
}

/// The outcome of one generation batch.
///
/// Failures are isolated per category: a failing category is recorded here
/// while the remaining categories are still attempted, so the report can
/// carry partial results alongside the failure list.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// All records, in requested-category order then model order
    pub cases: Vec<TestCase>,
    /// Categories that failed (provider or record-construction errors)
    pub failures: Vec<CategoryFailure>,
    /// Aggregate token usage across successful calls
    pub usage: TokenUsage,
}

impl GenerationReport {
    /// Number of generated records.
    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    /// True when every requested category produced records without error.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// AI-powered test case generator.
pub struct Generator {
    provider: Arc<dyn AiProvider>,
    model: String,
    policy: UnknownFieldPolicy,
}

impl Generator {
    /// Create a generator for a provider, using its default model.
    pub fn new(provider: Arc<dyn AiProvider>) -> Self {
        let model = provider.default_model().to_string();
        Self {
            provider,
            model,
            policy: UnknownFieldPolicy::default(),
        }
    }

    /// Create a generator by provider name.
    ///
    /// Fails fast at construction time when the provider is unknown or has
    /// no credential, before any network activity.
    pub fn from_registry(registry: &ProviderRegistry, provider_name: &str) -> CasegenResult<Self> {
        let provider = registry.require(provider_name)?;
        Ok(Self::new(provider))
    }

    /// Override the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the unknown-field policy used during normalization.
    pub fn with_unknown_field_policy(mut self, policy: UnknownFieldPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Name of the provider backing this generator.
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Model identifier used for generation.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate test cases for a requirement across the given categories.
    ///
    /// Categories are processed in the given order, one blocking provider
    /// call at a time; `DEFAULT_CATEGORIES` is used when `categories` is
    /// empty. Identical identifiers across categories are possible when the
    /// model supplies its own ids; they are not reconciled.
    pub async fn generate(
        &self,
        requirement: &str,
        categories: &[String],
    ) -> CasegenResult<GenerationReport> {
        if requirement.trim().is_empty() {
            return Err(CasegenError::InvalidArgument {
                reason: "requirement must not be blank".to_string(),
            });
        }

        let default_categories: Vec<String> =
            DEFAULT_CATEGORIES.iter().map(ToString::to_string).collect();
        let categories = if categories.is_empty() {
            &default_categories[..]
        } else {
            categories
        };

        let template = generate_cases_template();
        let options = GenerateOptions::for_case_generation();
        let mut report = GenerationReport::default();

        for category in categories {
            tracing::info!(category, "Generating test cases");

            let context = GenerateCasesContext::new(requirement, category);
            let (system, user) = template.render(&context)?;
            let messages = vec![AiMessage::system(system), AiMessage::user(user)];

            let response = match self
                .provider
                .generate_text(&self.model, &messages, &options)
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!(category, error = %e, "Provider call failed");
                    report.failures.push(CategoryFailure {
                        category: category.clone(),
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            report.usage.add(response.usage);

            match normalize(&response.text, category, self.policy) {
                Ok(cases) => {
                    tracing::info!(category, count = cases.len(), "Normalized test cases");
                    report.cases.extend(cases);
                }
                Err(e) => {
                    tracing::error!(category, error = %e, "Record construction failed");
                    report.failures.push(CategoryFailure {
                        category: category.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        // Nothing succeeded at all: surface a batch-level error
        if report.cases.is_empty() && report.failures.len() == categories.len() {
            if let Some(first) = report.failures.first() {
                return Err(CasegenError::Provider(format!(
                    "all {} categories failed; first failure ({}): {}",
                    categories.len(),
                    first.category,
                    first.error
                )));
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AiResponse, ProviderRegistry};
    use crate::errors::CasegenError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Provider returning canned responses per call, in order.
    struct ScriptedProvider {
        responses: Mutex<Vec<CasegenResult<String>>>,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<CasegenResult<String>>) -> Self {
            Self {
                responses: Mutex::new(responses),
            }
        }
    }

    #[async_trait]
    impl AiProvider for ScriptedProvider {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn api_key_env_var(&self) -> &'static str {
            "SCRIPTED_API_KEY"
        }

        fn is_configured(&self) -> bool {
            true
        }

        fn default_model(&self) -> &'static str {
            "scripted-1"
        }

        async fn generate_text(
            &self,
            _model: &str,
            _messages: &[AiMessage],
            _options: &GenerateOptions,
        ) -> CasegenResult<AiResponse> {
            let mut responses = self.responses.lock().unwrap();
            let text = responses.remove(0)?;
            Ok(AiResponse {
                text,
                usage: TokenUsage {
                    input_tokens: 10,
                    output_tokens: 20,
                    total_tokens: 30,
                },
                model: "scripted-1".to_string(),
                provider: "scripted".to_string(),
            })
        }
    }

    fn cases_json(n: usize) -> String {
        let objects: Vec<String> = (0..n)
            .map(|i| {
                format!(
                    r#"{{"test_scenario": "s{i}", "test_case_name": "n{i}", "test_steps": "1. go", "expected_result": "ok"}}"#
                )
            })
            .collect();
        format!("[{}]", objects.join(","))
    }

    #[tokio::test]
    async fn test_blank_requirement_rejected_before_any_call() {
        let provider = Arc::new(ScriptedProvider::new(vec![]));
        let generator = Generator::new(provider);

        let err = generator.generate("   ", &[]).await.unwrap_err();
        assert!(matches!(err, CasegenError::InvalidArgument { .. }));
    }

    #[tokio::test]
    async fn test_batch_length_is_sum_of_category_counts() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(cases_json(3)),
            Ok(cases_json(2)),
        ]));
        let generator = Generator::new(provider);

        let categories = vec!["functional".to_string(), "negative".to_string()];
        let report = generator.generate("login", &categories).await.unwrap();

        assert_eq!(report.case_count(), 5);
        assert!(report.is_complete());
        assert_eq!(report.usage.total_tokens, 60);
    }

    #[tokio::test]
    async fn test_category_order_preserved() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(cases_json(1)),
            Ok(cases_json(1)),
        ]));
        let generator = Generator::new(provider);

        let categories = vec!["negative".to_string(), "functional".to_string()];
        let report = generator.generate("login", &categories).await.unwrap();

        assert_eq!(report.cases[0].test_case_id, "TC_NEGATIVE_001");
        assert_eq!(report.cases[1].test_case_id, "TC_FUNCTIONAL_001");
    }

    #[tokio::test]
    async fn test_default_categories_used_when_empty() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(cases_json(1)),
            Ok(cases_json(1)),
            Ok(cases_json(1)),
            Ok(cases_json(1)),
        ]));
        let generator = Generator::new(provider);

        let report = generator.generate("login", &[]).await.unwrap();

        assert_eq!(report.case_count(), 4);
        assert_eq!(report.cases[0].test_type, "Functional");
        assert_eq!(report.cases[3].test_type, "Regression");
    }

    #[tokio::test]
    async fn test_malformed_category_contributes_zero_records() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok("not json at all".to_string()),
            Ok(cases_json(2)),
        ]));
        let generator = Generator::new(provider);

        let categories = vec!["functional".to_string(), "negative".to_string()];
        let report = generator.generate("login", &categories).await.unwrap();

        // Malformed JSON is degradation, not failure
        assert!(report.is_complete());
        assert_eq!(report.case_count(), 2);
        assert!(report.cases.iter().all(|c| c.test_type == "Negative"));
    }

    #[tokio::test]
    async fn test_provider_failure_isolated_per_category() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Err(CasegenError::Provider("connection reset".to_string())),
            Ok(cases_json(2)),
        ]));
        let generator = Generator::new(provider);

        let categories = vec!["functional".to_string(), "negative".to_string()];
        let report = generator.generate("login", &categories).await.unwrap();

        assert_eq!(report.case_count(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].category, "functional");
        assert!(report.failures[0].error.contains("connection reset"));
    }

    #[tokio::test]
    async fn test_all_categories_failing_is_an_error() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Err(CasegenError::Provider("timeout".to_string())),
            Err(CasegenError::Provider("timeout".to_string())),
        ]));
        let generator = Generator::new(provider);

        let categories = vec!["functional".to_string(), "negative".to_string()];
        let err = generator.generate("login", &categories).await.unwrap_err();
        assert!(err.to_string().contains("all 2 categories failed"));
    }

    #[tokio::test]
    async fn test_record_construction_failure_isolated() {
        // Second category has a record missing expected_result
        let bad = r#"[{"test_scenario": "s", "test_case_name": "n", "test_steps": "1."}]"#;
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(cases_json(1)),
            Ok(bad.to_string()),
        ]));
        let generator = Generator::new(provider);

        let categories = vec!["functional".to_string(), "negative".to_string()];
        let report = generator.generate("login", &categories).await.unwrap();

        assert_eq!(report.case_count(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].category, "negative");
    }

    #[test]
    fn test_from_registry_rejects_unknown_provider() {
        let registry = ProviderRegistry::new();
        let err = Generator::from_registry(&registry, "nope").err().unwrap();
        assert!(matches!(err, CasegenError::UnknownProvider { .. }));
    }
}
