//! Command configuration: built-in defaults, environment overrides, CLI flags.

use std::env;

use tracing::warn;

use crate::error::ConfigError;

/// Default chat completion endpoint.
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model used for commit messages.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

/// Environment variable holding the bearer token.
pub const DEFAULT_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Maximum combined message length accepted before sending.
pub const DEFAULT_MAX_INPUT_CHARS: usize = 10_000;

/// Page where an API key can be created.
pub const API_KEYS_URL: &str = "https://platform.openai.com/account/api-keys";

const API_URL_ENV_VAR: &str = "HOTCOMMIT_API_URL";
const MODEL_ENV_VAR: &str = "HOTCOMMIT_MODEL";
const TEMPERATURE_ENV_VAR: &str = "HOTCOMMIT_TEMPERATURE";

/// Settings for the commit message command.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitConfig {
    pub api_url: String,
    pub model: String,
    pub temperature: f32,
    /// Name of the environment variable that holds the API key.
    pub api_key_var: String,
    pub max_input_chars: usize,
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            api_key_var: DEFAULT_API_KEY_VAR.to_string(),
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }
}

impl CommitConfig {
    /// Defaults with `HOTCOMMIT_*` environment overrides applied.
    ///
    /// Invalid values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(url) = non_empty_var(API_URL_ENV_VAR) {
            match validate_api_url(&url) {
                Ok(()) => config.api_url = url,
                Err(e) => warn!("Ignoring {}: {}", API_URL_ENV_VAR, e),
            }
        }

        if let Some(model) = non_empty_var(MODEL_ENV_VAR) {
            config.model = model;
        }

        if let Some(raw) = non_empty_var(TEMPERATURE_ENV_VAR) {
            match raw.parse::<f32>() {
                Ok(t) if (0.0..=2.0).contains(&t) => config.temperature = t,
                _ => warn!(
                    "Invalid {} value '{}', using default {}",
                    TEMPERATURE_ENV_VAR, raw, config.temperature
                ),
            }
        }

        config
    }

    /// Apply CLI flag overrides on top of the current values.
    pub fn with_overrides(
        mut self,
        api_url: Option<String>,
        model: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = api_url {
            validate_api_url(&url)?;
            self.api_url = url;
        }
        if let Some(model) = model {
            if model.trim().is_empty() {
                return Err(ConfigError::EmptyModel);
            }
            self.model = model;
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::TemperatureOutOfRange(self.temperature));
        }
        Ok(self)
    }
}

/// Settings for the hotfix command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotfixConfig {
    pub remote: String,
    /// Branch synced before the default branch (usually `develop`).
    pub secondary_branch: String,
    pub manifest: String,
    pub lock_manifest: String,
    /// Path fragment that marks a dirty path as a submodule.
    pub submodule_marker: String,
    pub branch_prefix: String,
}

impl Default for HotfixConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            secondary_branch: "develop".to_string(),
            manifest: "package.json".to_string(),
            lock_manifest: "package-lock.json".to_string(),
            submodule_marker: "submodules".to_string(),
            branch_prefix: "hotfix/".to_string(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => None,
    }
}

fn validate_api_url(url: &str) -> Result<(), ConfigError> {
    match reqwest::Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        Ok(parsed) => Err(ConfigError::InvalidApiUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        }),
        Err(e) => Err(ConfigError::InvalidApiUrl {
            url: url.to_string(),
            reason: e.to_string(),
        }),
    }
}
