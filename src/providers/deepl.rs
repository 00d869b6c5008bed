//! DeepL REST API v2

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, error};

use crate::core::config::{Endpoints, ErrorMessages, Settings};
use crate::core::errors::ProviderError;
use crate::core::models::{TranslationApi, TranslationResult};
use crate::providers::TranslationBackend;

#[derive(Debug, Deserialize)]
struct DeeplResponse {
    translations: Vec<DeeplTranslation>,
}

#[derive(Debug, Deserialize)]
struct DeeplTranslation {
    text: String,
    detected_source_language: String,
}

/// Error body, e.g. `{"message": "Quota Exceeded"}`
#[derive(Debug, Deserialize)]
struct DeeplErrorBody {
    message: Option<String>,
}

/// DeepL adapter. Endpoint and key come from [`Settings`] on every call.
#[derive(Debug, Clone)]
pub struct DeeplTranslator {
    client: reqwest::Client,
    endpoints: Endpoints,
    messages: ErrorMessages,
}

impl DeeplTranslator {
    /// Adapter choosing between the free and paid endpoints per call
    pub fn new(client: reqwest::Client, endpoints: Endpoints, messages: ErrorMessages) -> Self {
        Self {
            client,
            endpoints,
            messages,
        }
    }

    async fn send_request(
        &self,
        word: &str,
        target_lang: &str,
        settings: &Settings,
    ) -> Result<TranslationResult, ProviderError> {
        let url = self.endpoints.deepl(settings.deepl_plan);

        let response = self
            .client
            .post(url)
            .form(&[
                ("auth_key", settings.deepl_auth_key.as_str()),
                ("text", word),
                ("target_lang", target_lang),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Network {
                message: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            return Err(ProviderError::Authentication);
        }
        if status != StatusCode::OK {
            let detail = response
                .json::<DeeplErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message);
            return Err(ProviderError::unknown(status, detail));
        }

        let body: DeeplResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::InvalidResponse {
                    message: e.to_string(),
                })?;

        let first = body
            .translations
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::InvalidResponse {
                message: "No translation in response".to_string(),
            })?;

        Ok(TranslationResult {
            result_text: first.text,
            candidate_text: String::new(),
            source_language: first.detected_source_language.to_lowercase(),
            percentage: 1.0,
            is_error: false,
            error_message: String::new(),
        })
    }
}

#[async_trait]
impl TranslationBackend for DeeplTranslator {
    fn api(&self) -> TranslationApi {
        TranslationApi::Deepl
    }

    /// DeepL detects the source itself; `source_lang` is not sent
    async fn translate(
        &self,
        word: &str,
        _source_lang: &str,
        target_lang: &str,
        settings: &Settings,
    ) -> TranslationResult {
        match self.send_request(word, target_lang, settings).await {
            Ok(result) => {
                debug!(
                    "DeepL translated '{}' ({}) -> '{}'",
                    word, result.source_language, result.result_text
                );
                result
            }
            Err(e) => {
                error!("DeepL request failed for '{}': {}", word, e);
                TranslationResult::error(self.messages.render(&e))
            }
        }
    }
}
