//! Backend adapters
//!
//! Each adapter wraps one HTTP backend and normalizes its responses. The
//! primary backends ([`google`], [`deepl`]) report failures inside the
//! returned [`TranslationResult`]; the dictionary backend ([`mazii`]) has no
//! failure channel at all and returns an empty list instead.

use async_trait::async_trait;

use crate::core::config::Settings;
use crate::core::models::{DictionaryEntry, TranslationApi, TranslationResult};

pub mod deepl;
pub mod google;
pub mod mazii;

/// A primary translation backend
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Which setting selects this backend
    fn api(&self) -> TranslationApi;

    /// Translate one word or phrase; never fails, errors are folded into the result
    async fn translate(
        &self,
        word: &str,
        source_lang: &str,
        target_lang: &str,
        settings: &Settings,
    ) -> TranslationResult;
}

/// A supplementary dictionary backend
#[async_trait]
pub trait DictionaryBackend: Send + Sync {
    /// Community meanings for the word; empty when none or on any failure
    async fn lookup(&self, word: &str) -> Vec<DictionaryEntry>;
}
