//! delf-core: evaluation normalization for the DELF B2 trainer.
//!
//! Turns a student's submission into a prompt, sends it to a generative-text
//! backend through the [`traits::LlmProvider`] trait, and coerces the free-form
//! reply into a validated [`result::EvaluationResult`].

pub mod adapter;
pub mod cancel;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod parser;
pub mod progress;
pub mod prompt;
pub mod result;
pub mod sanitize;
pub mod traits;
pub mod validate;

pub use adapter::{AdapterSettings, ProviderAdapter, TranslationRequest};
pub use error::{EvaluationError, EvaluationFailed, ProviderError, Stage};
pub use evaluator::Evaluator;
pub use model::{EvaluationRequest, ExerciseType};
pub use result::EvaluationResult;
