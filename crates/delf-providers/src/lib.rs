//! delf-providers: generative-text backends for the DELF B2 trainer.
//!
//! Implements the `LlmProvider` trait for Anthropic and Gemini, and loads the
//! `delf.toml` configuration that selects between them.

pub mod anthropic;
pub mod config;
pub mod gemini;
mod http;
pub mod mock;

pub use config::{
    build_evaluator, create_provider, load_config, load_config_from, DelfConfig, ProviderKind,
};
pub use delf_core::error::ProviderError;
