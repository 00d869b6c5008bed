//! In-memory history of lookups, consulted before any backend call

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::core::models::{CombinedResult, HistoryEntry, HistoryKey};

/// Append-only lookup history.
///
/// Cloning shares the underlying list. Entries are never updated or
/// evicted; a lookup returns the earliest stored non-error entry for a key.
#[derive(Debug, Clone, Default)]
pub struct TranslationHistory {
    entries: Arc<RwLock<Vec<HistoryEntry>>>,
}

impl TranslationHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// First successful entry for the key, if any
    pub async fn lookup(&self, key: &HistoryKey) -> Option<CombinedResult> {
        let entries = self.entries.read().await;
        let hit = entries
            .iter()
            .find(|entry| entry.matches(key) && !entry.result.is_error())
            .map(|entry| entry.result.clone());

        debug!(
            "History {} for '{}' ({} -> {}, {})",
            if hit.is_some() { "hit" } else { "miss" },
            key.source_word,
            key.source_lang,
            key.target_lang,
            key.translation_api
        );
        hit
    }

    /// Append a result, error results included
    pub async fn store(&self, key: HistoryKey, result: CombinedResult) {
        let mut entries = self.entries.write().await;
        entries.push(HistoryEntry { key, result });
    }

    /// Number of stored entries, duplicates and errors included
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether nothing has been stored yet
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop every entry (for testing or manual reset)
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{TranslationApi, TranslationResult};

    fn ok(text: &str) -> CombinedResult {
        CombinedResult::new(
            TranslationResult {
                result_text: text.to_string(),
                source_language: "en".to_string(),
                percentage: 1.0,
                ..Default::default()
            },
            None,
        )
    }

    fn key(word: &str) -> HistoryKey {
        HistoryKey::new(word, "auto", "ja", TranslationApi::Google)
    }

    #[tokio::test]
    async fn test_lookup_miss_on_empty() {
        let history = TranslationHistory::new();
        assert!(history.is_empty().await);
        assert_eq!(history.lookup(&key("hello")).await, None);
    }

    #[tokio::test]
    async fn test_first_match_wins() {
        let history = TranslationHistory::new();
        history.store(key("hello"), ok("first")).await;
        history.store(key("hello"), ok("second")).await;

        assert_eq!(history.len().await, 2);
        assert_eq!(history.lookup(&key("hello")).await, Some(ok("first")));
    }

    #[tokio::test]
    async fn test_error_entries_never_match() {
        let history = TranslationHistory::new();
        let failed = CombinedResult::new(TranslationResult::error("offline"), None);
        history.store(key("hello"), failed).await;

        assert_eq!(history.lookup(&key("hello")).await, None);

        history.store(key("hello"), ok("later")).await;
        assert_eq!(history.lookup(&key("hello")).await, Some(ok("later")));
        assert_eq!(history.len().await, 2);
    }

    #[tokio::test]
    async fn test_all_key_fields_compared() {
        let history = TranslationHistory::new();
        history.store(key("hello"), ok("x")).await;

        assert!(history.lookup(&key("Hello")).await.is_none());
        assert!(history
            .lookup(&HistoryKey::new("hello", "en", "ja", TranslationApi::Google))
            .await
            .is_none());
        assert!(history
            .lookup(&HistoryKey::new("hello", "auto", "fr", TranslationApi::Google))
            .await
            .is_none());
        assert!(history
            .lookup(&HistoryKey::new("hello", "auto", "ja", TranslationApi::Deepl))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let history = TranslationHistory::new();
        let other = history.clone();
        history.store(key("hello"), ok("x")).await;
        assert_eq!(other.len().await, 1);

        other.clear().await;
        assert!(history.is_empty().await);
    }
}
