//! The `delf translate` command.

use std::path::PathBuf;

use anyhow::Result;

use delf_core::adapter::TranslationRequest;
use delf_providers::config::load_config_from;
use delf_providers::build_evaluator;

use super::cancel_on_ctrl_c;

pub async fn execute(
    text: String,
    context: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    if text.trim().is_empty() {
        anyhow::bail!("nothing to translate");
    }

    let config = load_config_from(config_path.as_deref())?;
    let evaluator = build_evaluator(&config)?;

    let mut request = TranslationRequest::new(text);
    if let Some(context) = context {
        request = request.with_context(context);
    }

    let (signal, interrupt) = cancel_on_ctrl_c("translation");
    let outcome = evaluator.translate_with_cancel(&request, &signal).await;
    interrupt.abort();

    let translated = outcome?;
    println!("{translated}");
    Ok(())
}
