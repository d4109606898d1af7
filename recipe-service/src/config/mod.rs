use crate::services::providers::gemini::{GeminiConfig, DEFAULT_MODEL, GEMINI_API_BASE};
use secrecy::Secret;
use service_core::config::{self as core_config, DeploymentMode};
use service_core::error::AppError;
use std::env;

/// 50 MiB: base64 photos from phones are large.
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 50 * 1024 * 1024;

const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Clone)]
pub struct RecipeConfig {
    pub common: core_config::Config,
    pub mode: DeploymentMode,
    pub gemini: GeminiConfig,
    pub server: ServerSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Directory holding `index.html` and the front-end assets.
    pub static_dir: String,
    /// Largest accepted request body, in bytes.
    pub body_limit_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            static_dir: DEFAULT_STATIC_DIR.to_string(),
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

impl RecipeConfig {
    /// Load from the process environment (and `.env` in local mode).
    pub fn load(mode: DeploymentMode) -> Result<Self, AppError> {
        let common = core_config::Config::load(mode)?;
        Self::from_lookup(mode, common, |key| env::var(key).ok())
    }

    /// Build the service config from any key lookup.
    ///
    /// In `Local` mode a missing `GEMINI_API_KEY` is an error. In `Hosted`
    /// mode it is logged and every generation call will fail instead.
    pub fn from_lookup<F>(
        mode: DeploymentMode,
        common: core_config::Config,
        lookup: F,
    ) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("GEMINI_API_KEY");
        if api_key.is_none() {
            match mode {
                DeploymentMode::Local => {
                    return Err(AppError::ConfigError(anyhow::anyhow!(
                        "GEMINI_API_KEY is required but not set"
                    )));
                }
                DeploymentMode::Hosted => {
                    tracing::warn!("GEMINI_API_KEY not found. API calls will fail.");
                }
            }
        }

        let body_limit_bytes = match get("BODY_LIMIT_BYTES") {
            Some(raw) => raw.trim().parse().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("BODY_LIMIT_BYTES is invalid: {}", e))
            })?,
            None => DEFAULT_BODY_LIMIT_BYTES,
        };

        Ok(RecipeConfig {
            common,
            mode,
            gemini: GeminiConfig {
                api_key: api_key.map(Secret::new),
                model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                base_url: get("GEMINI_API_BASE").unwrap_or_else(|| GEMINI_API_BASE.to_string()),
            },
            server: ServerSettings {
                static_dir: get("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
                body_limit_bytes,
            },
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.gemini.api_key.is_some()
    }
}
