//! Core data models for translation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Primary translation backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationApi {
    /// translate.googleapis.com
    #[default]
    Google,
    /// api.deepl.com / api-free.deepl.com
    Deepl,
}

impl fmt::Display for TranslationApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationApi::Google => write!(f, "google"),
            TranslationApi::Deepl => write!(f, "deepl"),
        }
    }
}

impl FromStr for TranslationApi {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(TranslationApi::Google),
            "deepl" => Ok(TranslationApi::Deepl),
            other => Err(format!("unknown translation api: {}", other)),
        }
    }
}

/// DeepL subscription plan, selects the endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DeeplPlan {
    /// api-free.deepl.com
    #[default]
    #[serde(rename = "deeplFree")]
    DeeplFree,
    /// api.deepl.com
    #[serde(rename = "deeplPro")]
    DeeplPro,
}

impl FromStr for DeeplPlan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "deeplFree" | "free" => Ok(DeeplPlan::DeeplFree),
            "deeplPro" | "pro" => Ok(DeeplPlan::DeeplPro),
            other => Err(format!("unknown deepl plan: {}", other)),
        }
    }
}

/// Translation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    /// Word or phrase; trimmed before lookup
    pub source_word: String,
    /// Source language code, `"auto"` to detect
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    /// Target language code
    pub target_lang: String,
    /// Primary backend to ask
    #[serde(default)]
    pub translation_api: TranslationApi,
}

fn default_source_lang() -> String {
    "auto".to_string()
}

impl TranslationRequest {
    /// Request with auto-detected source language
    pub fn new(
        source_word: impl Into<String>,
        target_lang: impl Into<String>,
        translation_api: TranslationApi,
    ) -> Self {
        Self {
            source_word: source_word.into(),
            source_lang: default_source_lang(),
            target_lang: target_lang.into(),
            translation_api,
        }
    }

    /// Set an explicit source language
    pub fn with_source_lang(mut self, source_lang: impl Into<String>) -> Self {
        self.source_lang = source_lang.into();
        self
    }
}

/// Normalized result of a primary backend lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    /// Translated text, fragments concatenated
    pub result_text: String,
    /// Dictionary gloss grouped by part of speech, one line per group
    pub candidate_text: String,
    /// Detected source language, lowercase ISO code
    pub source_language: String,
    /// Detection confidence in [0, 1]
    pub percentage: f64,
    /// Whether the lookup failed
    pub is_error: bool,
    /// User-visible failure message, empty on success
    pub error_message: String,
}

impl TranslationResult {
    /// Result returned for empty input, never touches a backend
    pub fn neutral() -> Self {
        Self {
            source_language: "en".to_string(),
            ..Default::default()
        }
    }

    /// Error result; text fields stay empty
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            is_error: true,
            error_message: message.into(),
            ..Default::default()
        }
    }
}

/// Community meaning from the Mazii dictionary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DictionaryEntry {
    /// Contributed meaning
    #[serde(default)]
    pub mean: String,
    /// Upvotes
    #[serde(default)]
    pub like: i64,
    /// Downvotes
    #[serde(default)]
    pub dislike: i64,
    /// Contributor
    #[serde(default)]
    pub username: String,
}

/// Primary result merged with the optional dictionary lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedResult {
    /// Primary backend result
    pub result_gg: TranslationResult,
    /// `None` when the dictionary was not consulted; `Some(vec![])` when it ran and found nothing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_mazii: Option<Vec<DictionaryEntry>>,
}

impl CombinedResult {
    /// Merge a primary result with the optional dictionary entries
    pub fn new(result_gg: TranslationResult, result_mazii: Option<Vec<DictionaryEntry>>) -> Self {
        Self {
            result_gg,
            result_mazii,
        }
    }

    /// Whether the primary lookup failed
    pub fn is_error(&self) -> bool {
        self.result_gg.is_error
    }
}

/// Cache identity of a lookup
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HistoryKey {
    /// Trimmed input
    pub source_word: String,
    /// Source language as requested, not as detected
    pub source_lang: String,
    /// Target language
    pub target_lang: String,
    /// Backend that produced the result
    pub translation_api: TranslationApi,
}

impl HistoryKey {
    /// Key from its four parts
    pub fn new(
        source_word: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
        translation_api: TranslationApi,
    ) -> Self {
        Self {
            source_word: source_word.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            translation_api,
        }
    }
}

/// One remembered lookup
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Identity of the lookup
    pub key: HistoryKey,
    /// What the lookup returned, errors included
    pub result: CombinedResult,
}

impl HistoryEntry {
    /// Exact match on all identity fields
    pub fn matches(&self, key: &HistoryKey) -> bool {
        self.key == *key
    }
}
