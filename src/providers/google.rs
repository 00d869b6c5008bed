//! Google Translate (gtx web client endpoint)

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, error};

use crate::core::config::{ErrorMessages, Settings};
use crate::core::errors::ProviderError;
use crate::core::models::{TranslationApi, TranslationResult};
use crate::providers::TranslationBackend;

/// `dj=1` response body; every field is optional on the wire
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct GoogleResponse {
    sentences: Vec<Sentence>,
    src: String,
    ld_result: LanguageDetection,
    dict: Option<Vec<DictionaryGroup>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct Sentence {
    /// Absent on transliteration entries
    trans: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct LanguageDetection {
    srclangs_confidences: Vec<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DictionaryGroup {
    pos: String,
    terms: Option<Vec<String>>,
}

impl GoogleResponse {
    fn into_result(self) -> TranslationResult {
        let result_text = self
            .sentences
            .iter()
            .filter_map(|s| s.trans.as_deref())
            .collect::<String>();

        let candidate_text = self
            .dict
            .map(|groups| groups.iter().map(format_candidate).collect::<String>())
            .unwrap_or_default();

        TranslationResult {
            result_text,
            candidate_text,
            source_language: self.src,
            percentage: self
                .ld_result
                .srclangs_confidences
                .first()
                .copied()
                .unwrap_or(0.0),
            is_error: false,
            error_message: String::new(),
        }
    }
}

/// `"<pos>: <term, term>\n"`, or `"<term, term>\n"` without a part of speech
fn format_candidate(group: &DictionaryGroup) -> String {
    let terms = group
        .terms
        .as_ref()
        .map(|terms| terms.join(", "))
        .unwrap_or_default();

    if group.pos.is_empty() {
        format!("{}\n", terms)
    } else {
        format!("{}: {}\n", group.pos, terms)
    }
}

/// Map a non-200 status to the failure class
fn classify_status(status: StatusCode) -> ProviderError {
    match status {
        StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE => {
            ProviderError::Unavailable {
                status: status.as_u16(),
            }
        }
        _ => ProviderError::unknown(status, None),
    }
}

/// Google Translate adapter
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
    messages: ErrorMessages,
}

impl GoogleTranslator {
    /// Adapter for the given `translate_a/single` endpoint
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>, messages: ErrorMessages) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            messages,
        }
    }

    async fn send_request(
        &self,
        word: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<TranslationResult, ProviderError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source_lang),
                ("tl", target_lang),
                ("dt", "t"),
                ("dt", "bd"),
                ("dj", "1"),
                ("q", word),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Network {
                message: e.to_string(),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(classify_status(status));
        }

        let body: GoogleResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::InvalidResponse {
                    message: e.to_string(),
                })?;

        Ok(body.into_result())
    }
}

#[async_trait]
impl TranslationBackend for GoogleTranslator {
    fn api(&self) -> TranslationApi {
        TranslationApi::Google
    }

    async fn translate(
        &self,
        word: &str,
        source_lang: &str,
        target_lang: &str,
        _settings: &Settings,
    ) -> TranslationResult {
        match self.send_request(word, source_lang, target_lang).await {
            Ok(result) => {
                debug!(
                    "Google translated '{}' ({} {:.2}) -> '{}'",
                    word, result.source_language, result.percentage, result.result_text
                );
                result
            }
            Err(e) => {
                error!("Google request failed for '{}': {}", word, e);
                TranslationResult::error(self.messages.render(&e))
            }
        }
    }
}
