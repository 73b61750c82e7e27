//! The `delf recommend` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use delf_providers::config::load_config_from;
use delf_providers::build_evaluator;

use super::cancel_on_ctrl_c;
use crate::output::{print_recommendations, OutputFormat};

pub async fn execute(
    stats_path: PathBuf,
    progress_path: PathBuf,
    format: OutputFormat,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let stats = read_json(&stats_path)?;
    let progress = read_json(&progress_path)?;

    let config = load_config_from(config_path.as_deref())?;
    let evaluator = build_evaluator(&config)?;

    let (signal, interrupt) = cancel_on_ctrl_c("recommendations");
    let outcome = evaluator
        .recommend_with_cancel(&stats, &progress, &signal)
        .await;
    interrupt.abort();

    let recommendations = outcome?;
    print_recommendations(&recommendations, format)
}

fn read_json(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}
