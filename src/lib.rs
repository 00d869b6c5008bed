//! Popup Translator - word lookup across Google Translate, DeepL and Mazii
//!
//! This library dispatches single-word and short-phrase lookups to a
//! configured translation backend, normalizes the responses, enriches
//! Japanese input with Mazii dictionary meanings, and remembers successful
//! lookups in an in-memory history.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;
pub mod providers;
pub mod server;

// Re-export key types for convenience
pub use crate::core::{
    client::Translator,
    config::{Endpoints, ErrorMessages, Settings, TranslatorConfig},
    errors::{ProviderError, TranslationError},
    history::TranslationHistory,
    links::web_translate_url,
    models::{
        CombinedResult, DeeplPlan, DictionaryEntry, HistoryEntry, HistoryKey, TranslationApi,
        TranslationRequest, TranslationResult,
    },
};

pub use crate::providers::{
    deepl::DeeplTranslator, google::GoogleTranslator, mazii::MaziiDictionary, DictionaryBackend,
    TranslationBackend,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
