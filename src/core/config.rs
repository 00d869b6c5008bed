//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::core::errors::{ProviderError, Result, TranslationError};
use crate::core::models::{DeeplPlan, TranslationApi};

/// User-facing settings, read fresh for every lookup.
///
/// Keys are written snake_case; the settings-store spelling (`translationApi`)
/// is accepted too, in both its camelCase and its lowercased form since the
/// `config` crate lowercases keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Primary backend
    #[serde(alias = "translationApi", alias = "translationapi")]
    pub translation_api: TranslationApi,
    /// DeepL credential, sent as `auth_key`
    #[serde(alias = "deeplAuthKey", alias = "deeplauthkey")]
    pub deepl_auth_key: String,
    /// Selects the free or paid DeepL endpoint
    #[serde(alias = "deeplPlan", alias = "deeplplan")]
    pub deepl_plan: DeeplPlan,
    /// Only used when rendering results
    #[serde(alias = "ifShowCandidate", alias = "ifshowcandidate")]
    pub if_show_candidate: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            translation_api: TranslationApi::Google,
            deepl_auth_key: String::new(),
            deepl_plan: DeeplPlan::DeeplFree,
            if_show_candidate: true,
        }
    }
}

/// Backend URLs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Google `translate_a/single`
    pub google: String,
    /// DeepL free plan
    pub deepl_free: String,
    /// DeepL paid plans
    pub deepl_pro: String,
    /// Mazii word search
    pub mazii_search: String,
    /// Mazii community meanings
    pub mazii_mean: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            google: "https://translate.googleapis.com/translate_a/single".to_string(),
            deepl_free: "https://api-free.deepl.com/v2/translate".to_string(),
            deepl_pro: "https://api.deepl.com/v2/translate".to_string(),
            mazii_search: "https://mazii.net/api/search".to_string(),
            mazii_mean: "https://api.mazii.net/api/get-mean".to_string(),
        }
    }
}

impl Endpoints {
    /// DeepL endpoint for the given plan
    pub fn deepl(&self, plan: DeeplPlan) -> &str {
        match plan {
            DeeplPlan::DeeplFree => &self.deepl_free,
            DeeplPlan::DeeplPro => &self.deepl_pro,
        }
    }

    /// Point every backend at one base URL (mock servers, proxies)
    pub fn with_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            google: format!("{}/translate_a/single", base),
            deepl_free: format!("{}/free/v2/translate", base),
            deepl_pro: format!("{}/v2/translate", base),
            mazii_search: format!("{}/api/search", base),
            mazii_mean: format!("{}/api/get-mean", base),
        }
    }

    fn all(&self) -> [(&'static str, &str); 5] {
        [
            ("google", self.google.as_str()),
            ("deepl_free", self.deepl_free.as_str()),
            ("deepl_pro", self.deepl_pro.as_str()),
            ("mazii_search", self.mazii_search.as_str()),
            ("mazii_mean", self.mazii_mean.as_str()),
        ]
    }
}

/// Localizable messages shown for failed lookups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorMessages {
    /// No response from the backend
    pub network_error: String,
    /// Throttled or down (429 / 503)
    pub unavailable_error: String,
    /// Prefix for every other failure
    pub unknown_error: String,
    /// DeepL rejected the key (403)
    pub deepl_auth_error: String,
}

impl Default for ErrorMessages {
    fn default() -> Self {
        Self {
            network_error: "Could not connect to the network.".to_string(),
            unavailable_error:
                "The translation service is temporarily unavailable. Please try again later."
                    .to_string(),
            unknown_error: "An unknown error has occurred.".to_string(),
            deepl_auth_error:
                "Failed to authenticate with DeepL. Please check your authentication key."
                    .to_string(),
        }
    }
}

impl ErrorMessages {
    /// User-visible message for a backend failure
    pub fn render(&self, error: &ProviderError) -> String {
        match error {
            ProviderError::Network { .. } => self.network_error.clone(),
            ProviderError::Unavailable { .. } => self.unavailable_error.clone(),
            ProviderError::Authentication => self.deepl_auth_error.clone(),
            ProviderError::Unknown {
                status,
                status_text,
                detail,
            } => match detail {
                Some(detail) => format!(
                    "{} [{} {}] {}",
                    self.unknown_error, status, status_text, detail
                ),
                None => format!("{} [{} {}]", self.unknown_error, status, status_text),
            },
            ProviderError::InvalidResponse { message } => {
                format!("{} [{}]", self.unknown_error, message)
            }
        }
    }
}

/// Configuration for translator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Defaults for callers that do not supply their own settings
    pub settings: Settings,
    /// Backend URLs
    pub endpoints: Endpoints,
    /// Messages for failed lookups
    pub messages: ErrorMessages,
    /// No timeout unless set; transport defaults apply
    pub timeout_ms: Option<u64>,
}

/// Read an env var, falling back to `default` when unset
fn env_or(name: &str, default: String) -> String {
    std::env::var(name).unwrap_or(default)
}

impl TranslatorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let translation_api = match std::env::var("TRANSLATION_API") {
            Ok(value) => value
                .parse::<TranslationApi>()
                .map_err(|message| TranslationError::ConfigError { message })?,
            Err(_) => defaults.settings.translation_api,
        };

        let deepl_plan = match std::env::var("DEEPL_PLAN") {
            Ok(value) => value
                .parse::<DeeplPlan>()
                .map_err(|message| TranslationError::ConfigError { message })?,
            Err(_) => defaults.settings.deepl_plan,
        };

        let if_show_candidate = match std::env::var("IF_SHOW_CANDIDATE") {
            Ok(value) => value.parse::<bool>().map_err(|e| TranslationError::ConfigError {
                message: format!("IF_SHOW_CANDIDATE: {}", e),
            })?,
            Err(_) => defaults.settings.if_show_candidate,
        };

        let timeout_ms = match std::env::var("REQUEST_TIMEOUT_MS") {
            Ok(value) => Some(value.parse::<u64>().map_err(|e| {
                TranslationError::ConfigError {
                    message: format!("REQUEST_TIMEOUT_MS: {}", e),
                }
            })?),
            Err(_) => None,
        };

        let endpoints = Endpoints {
            google: env_or("GOOGLE_ENDPOINT", defaults.endpoints.google),
            deepl_free: env_or("DEEPL_FREE_ENDPOINT", defaults.endpoints.deepl_free),
            deepl_pro: env_or("DEEPL_PRO_ENDPOINT", defaults.endpoints.deepl_pro),
            mazii_search: env_or("MAZII_SEARCH_ENDPOINT", defaults.endpoints.mazii_search),
            mazii_mean: env_or("MAZII_MEAN_ENDPOINT", defaults.endpoints.mazii_mean),
        };

        Ok(Self {
            settings: Settings {
                translation_api,
                deepl_auth_key: std::env::var("DEEPL_AUTH_KEY").unwrap_or_default(),
                deepl_plan,
                if_show_candidate,
            },
            endpoints,
            messages: defaults.messages,
            timeout_ms,
        })
    }

    /// Load from a JSON, YAML or TOML file, with `TRANSLATOR_` env overrides
    /// (`TRANSLATOR_SETTINGS__DEEPL_AUTH_KEY=...`)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config: Self = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(
                config::Environment::with_prefix("TRANSLATOR")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        for (name, url) in self.endpoints.all() {
            if url.is_empty() {
                return Err(TranslationError::ConfigError {
                    message: format!("{} endpoint is required", name),
                });
            }

            let parsed = reqwest::Url::parse(url).map_err(|e| TranslationError::ConfigError {
                message: format!("{} endpoint is invalid: {}", name, e),
            })?;

            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                return Err(TranslationError::ConfigError {
                    message: format!("{} endpoint must be http(s): {}", name, url),
                });
            }
        }

        if self.timeout_ms == Some(0) {
            return Err(TranslationError::ConfigError {
                message: "timeout_ms must be greater than 0".to_string(),
            });
        }

        if self.settings.translation_api == TranslationApi::Deepl
            && self.settings.deepl_auth_key.is_empty()
        {
            warn!("DeepL is selected but no auth key is configured");
        }

        Ok(())
    }
}
