//! Trainer configuration and provider factory.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use delf_core::adapter::{AdapterSettings, ProviderAdapter, DEFAULT_TIMEOUT_SECS};
use delf_core::evaluator::Evaluator;
use delf_core::traits::LlmProvider;

use crate::anthropic::{self, AnthropicProvider};
use crate::gemini::{self, GeminiProvider};

pub const CONFIG_FILE_NAME: &str = "delf.toml";

/// Which generative-text backend to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Anthropic,
    Gemini,
}

impl ProviderKind {
    pub fn default_model(self) -> &'static str {
        match self {
            ProviderKind::Anthropic => anthropic::DEFAULT_MODEL,
            ProviderKind::Gemini => gemini::DEFAULT_MODEL,
        }
    }

    /// Environment variable holding this backend's API key.
    pub fn key_env_var(self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
            ProviderKind::Gemini => "GEMINI_API_KEY",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Gemini => "gemini",
        })
    }
}

impl FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anthropic" | "claude" => Ok(ProviderKind::Anthropic),
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            other => anyhow::bail!("unknown provider '{other}' (expected anthropic or gemini)"),
        }
    }
}

/// Top-level trainer configuration, built once at startup.
///
/// Note: Custom Debug impl masks the API key.
#[derive(Clone, Serialize, Deserialize)]
pub struct DelfConfig {
    #[serde(default)]
    pub provider: ProviderKind,
    /// Model identifier; the backend's default when unset.
    #[serde(default)]
    pub model: Option<String>,
    /// Override of the backend's API base URL.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Deadline for a single backend call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub temperature: f64,
    /// API key; may reference environment variables as `${VAR}`.
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for DelfConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: None,
            base_url: None,
            timeout_secs: default_timeout_secs(),
            temperature: 0.0,
            api_key: None,
        }
    }
}

impl fmt::Debug for DelfConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelfConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

impl DelfConfig {
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn adapter_settings(&self) -> AdapterSettings {
        AdapterSettings {
            temperature: self.temperature,
            ..AdapterSettings::new(self.model()).with_timeout(self.timeout())
        }
    }

    /// Apply environment overrides, expand `${VAR}` references and pick up
    /// the provider's key variable. Fails when no API key is left.
    fn resolve_with(mut self, env: &dyn Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(provider) = env("DELF_PROVIDER").filter(|v| !v.trim().is_empty()) {
            self.provider = provider.parse().context("invalid DELF_PROVIDER")?;
        }
        if let Some(model) = env("DELF_MODEL").filter(|v| !v.trim().is_empty()) {
            self.model = Some(model);
        }

        self.base_url = self.base_url.map(|u| resolve_env_vars(&u, env));
        let configured = self
            .api_key
            .map(|k| resolve_env_vars(&k, env))
            .filter(|k| !k.trim().is_empty());
        let key = configured.or_else(|| {
            env(self.provider.key_env_var()).filter(|k| !k.trim().is_empty())
        });

        match key {
            Some(key) => self.api_key = Some(key),
            None => anyhow::bail!(
                "no API key for provider '{}': set {} or api_key in {CONFIG_FILE_NAME}",
                self.provider,
                self.provider.key_env_var()
            ),
        }

        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than zero");
        }
        Ok(self)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied as-is and never rescanned.
fn resolve_env_vars(s: &str, env: &dyn Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&env(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `delf.toml` in the current directory
/// 2. `~/.config/delf/config.toml`
///
/// Environment overrides: `DELF_PROVIDER`, `DELF_MODEL`, plus
/// `ANTHROPIC_API_KEY` / `GEMINI_API_KEY` when the file has no key.
pub fn load_config() -> Result<DelfConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<DelfConfig> {
    load_config_with(path, &process_env)
}

fn load_config_with(
    path: Option<&Path>,
    env: &dyn Fn(&str) -> Option<String>,
) -> Result<DelfConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<DelfConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => DelfConfig::default(),
    };

    config.resolve_with(env)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("delf"))
}

/// Create the configured backend.
pub fn create_provider(config: &DelfConfig) -> Result<Arc<dyn LlmProvider>> {
    let api_key = config
        .api_key
        .as_deref()
        .with_context(|| format!("no API key configured for {}", config.provider))?;
    let timeout = config.timeout();
    let provider: Arc<dyn LlmProvider> = match config.provider {
        ProviderKind::Anthropic => Arc::new(AnthropicProvider::new(
            api_key,
            config.base_url.clone(),
            timeout,
        )),
        ProviderKind::Gemini => Arc::new(GeminiProvider::new(
            api_key,
            config.base_url.clone(),
            timeout,
        )),
    };
    Ok(provider)
}

/// Wire the configured backend into a ready-to-use [`Evaluator`].
pub fn build_evaluator(config: &DelfConfig) -> Result<Evaluator> {
    let provider = create_provider(config)?;
    tracing::debug!(provider = %config.provider, model = config.model(), "evaluator ready");
    Ok(Evaluator::new(ProviderAdapter::new(
        provider,
        config.adapter_settings(),
    )))
}
