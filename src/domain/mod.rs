//! Domain layer: the prompt-to-structured-record pipeline.

pub mod generator;
pub mod normalize;

pub use generator::{CategoryFailure, GenerationReport, Generator, DEFAULT_CATEGORIES};
pub use normalize::{normalize, UnknownFieldPolicy};
