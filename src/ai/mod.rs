//! AI integration.
//!
//! This module provides:
//! - AI provider abstraction (Anthropic, OpenAI)
//! - Prompt template system with Handlebars
//! - Provider registry keyed by provider name

pub mod prompts;
pub mod provider;
pub mod registry;

// Provider implementations
pub mod anthropic;
pub mod openai;

// Re-exports
pub use prompts::{GenerateCasesContext, PromptTemplate};
pub use provider::{AiMessage, AiProvider, AiResponse, AiRole, GenerateOptions, TokenUsage};
pub use registry::ProviderRegistry;
