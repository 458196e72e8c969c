#![warn(clippy::pedantic)]
// Allow common pedantic lints that don't affect correctness
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::unused_self)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

//! # casegen
//!
//! AI-powered manual test case generation with spreadsheet export.
//!
//! This crate provides:
//! - A prompt-to-structured-record pipeline: prompt construction, response
//!   parsing and repair, and record normalization
//! - Provider abstraction over OpenAI and Anthropic chat APIs
//! - xlsx export with a fixed, stable column layout
//! - CLI and HTTP surfaces wrapping the same generation operation
//!
//! ## Example
//!
//! ```rust,ignore
//! use casegen::ai::ProviderRegistry;
//! use casegen::domain::Generator;
//! use casegen::export::export_to_excel;
//!
//! let registry = ProviderRegistry::with_defaults();
//! let generator = Generator::from_registry(&registry, "openai")?;
//! let report = generator.generate("login with email/password", &[]).await?;
//! let path = export_to_excel(&report.cases, None)?;
//! ```

// Core entities
pub mod entities;

// Error types
pub mod errors;

// AI integration
pub mod ai;

// Generation pipeline
pub mod domain;

// Spreadsheet export
pub mod export;

// HTTP surface
pub mod server;

// Terminal UI helpers
pub mod ui;

// Re-export key types for convenience
pub use ai::{AiMessage, AiProvider, AiResponse, AiRole, GenerateOptions, ProviderRegistry, TokenUsage};
pub use domain::{CategoryFailure, GenerationReport, Generator, UnknownFieldPolicy, DEFAULT_CATEGORIES};
pub use entities::TestCase;
pub use errors::{CasegenError, CasegenResult};
pub use export::export_to_excel;
