//! The `delf evaluate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use delf_core::model::EvaluationRequest;
use delf_providers::config::load_config_from;
use delf_providers::build_evaluator;

use super::cancel_on_ctrl_c;
use crate::output::{print_evaluation, OutputFormat};

pub async fn execute(
    request_path: PathBuf,
    format: OutputFormat,
    config_path: Option<PathBuf>,
    timeout_secs: Option<u64>,
) -> Result<()> {
    let content = std::fs::read_to_string(&request_path)
        .with_context(|| format!("failed to read request: {}", request_path.display()))?;
    let request: EvaluationRequest = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse request: {}", request_path.display()))?;
    tracing::debug!(exercise_type = %request.exercise_type, "loaded request");

    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(secs) = timeout_secs {
        config.timeout_secs = secs;
    }
    let evaluator = build_evaluator(&config)?;

    let (signal, interrupt) = cancel_on_ctrl_c("evaluation");
    let outcome = evaluator.evaluate_with_cancel(&request, &signal).await;
    interrupt.abort();

    let result = outcome?;
    print_evaluation(&result, format)
}
