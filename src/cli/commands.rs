//! CLI command definitions and handlers

use clap::Subcommand;
use std::fmt::Write as _;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::core::client::Translator;
use crate::core::config::{Settings, TranslatorConfig};
use crate::core::links::web_translate_url;
use crate::core::models::{CombinedResult, TranslationApi, TranslationRequest};

/// Commands for Popup Translator
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a single word or phrase
    Translate {
        /// Text to translate
        word: String,

        /// Source language (auto-detect if not specified)
        #[arg(long, default_value = "auto")]
        source_lang: String,

        /// Target language
        #[arg(short, long)]
        target_lang: String,

        /// Translation backend (google or deepl), overrides the configured one
        #[arg(long)]
        api: Option<TranslationApi>,

        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Translate one line at a time from stdin, sharing one lookup history
    Repl {
        /// Source language (auto-detect if not specified)
        #[arg(long, default_value = "auto")]
        source_lang: String,

        /// Target language
        #[arg(short, long)]
        target_lang: String,

        /// Translation backend (google or deepl), overrides the configured one
        #[arg(long)]
        api: Option<TranslationApi>,
    },

    /// Start HTTP API server
    Serve {
        /// Listen host (default: 127.0.0.1)
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Listen port (default: 8000)
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },
}

/// Settings with the backend optionally overridden from the command line
fn effective_settings(config: &TranslatorConfig, api: Option<TranslationApi>) -> Settings {
    let mut settings = config.settings.clone();
    if let Some(api) = api {
        settings.translation_api = api;
    }
    settings
}

/// Plain-text result panel
pub fn render(
    result: &CombinedResult,
    input: &str,
    target_lang: &str,
    settings: &Settings,
) -> String {
    let gg = &result.result_gg;
    let mut out = String::new();

    if !gg.result_text.is_empty() {
        let _ = writeln!(out, "{}", gg.result_text);
    }

    if settings.if_show_candidate && !gg.candidate_text.is_empty() {
        out.push_str(&gg.candidate_text);
    }

    if gg.is_error {
        let label = match settings.translation_api {
            TranslationApi::Google => "Open in Google Translate",
            TranslationApi::Deepl => "Open in DeepL",
        };
        let _ = writeln!(out, "Error: {}", gg.error_message);
        let _ = writeln!(
            out,
            "{}: {}",
            label,
            web_translate_url(settings.translation_api, target_lang, input)
        );
    }

    if let Some(entries) = &result.result_mazii {
        for entry in entries {
            let _ = writeln!(out, "- {}", entry.mean);
            let _ = writeln!(
                out,
                "  Like: {}  Dislike: {}  {}",
                entry.like, entry.dislike, entry.username
            );
        }
    }

    out
}

/// Handle single translation command
pub async fn handle_translate(
    config: TranslatorConfig,
    word: String,
    source_lang: String,
    target_lang: String,
    api: Option<TranslationApi>,
    json: bool,
) -> anyhow::Result<()> {
    let settings = effective_settings(&config, api);
    let translator = Translator::new(&config)?;

    info!("Translating with {}", settings.translation_api);

    let request = TranslationRequest::new(word.as_str(), target_lang.as_str(), settings.translation_api)
        .with_source_lang(source_lang);
    let result = translator.translate(&request, &settings).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render(&result, word.trim(), &target_lang, &settings));
    }

    if result.is_error() {
        anyhow::bail!("Translation failed: {}", result.result_gg.error_message);
    }

    Ok(())
}

/// Handle interactive command
pub async fn handle_repl(
    config: TranslatorConfig,
    source_lang: String,
    target_lang: String,
    api: Option<TranslationApi>,
) -> anyhow::Result<()> {
    let settings = effective_settings(&config, api);
    let translator = Translator::new(&config)?;

    info!(
        "Reading words from stdin ({} -> {}, {})",
        source_lang, target_lang, settings.translation_api
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let word = line.trim();
        if word.is_empty() {
            continue;
        }

        let result = translator
            .translate_text(word, &source_lang, &target_lang, &settings)
            .await;
        print!("{}", render(&result, word, &target_lang, &settings));
        println!();
    }

    info!(
        "Session finished, {} lookups remembered",
        translator.history().len().await
    );

    Ok(())
}

/// Handle server command
pub async fn handle_serve(config: TranslatorConfig, host: String, port: u16) -> anyhow::Result<()> {
    use crate::server::api::run_server;

    info!("Starting HTTP server on {}:{}", host, port);
    println!("🚀 Server starting on http://{}:{}", host, port);

    run_server(config, host, port).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{DictionaryEntry, TranslationResult};

    fn success() -> CombinedResult {
        CombinedResult::new(
            TranslationResult {
                result_text: "こんにちは".to_string(),
                candidate_text: "interjection: こんにちは, やあ\n".to_string(),
                source_language: "en".to_string(),
                percentage: 1.0,
                ..Default::default()
            },
            None,
        )
    }

    #[test]
    fn test_render_with_candidate() {
        let out = render(&success(), "hello", "ja", &Settings::default());
        assert_eq!(out, "こんにちは\ninterjection: こんにちは, やあ\n");
    }

    #[test]
    fn test_render_hides_candidate() {
        let settings = Settings {
            if_show_candidate: false,
            ..Default::default()
        };
        let out = render(&success(), "hello", "ja", &settings);
        assert_eq!(out, "こんにちは\n");
    }

    #[test]
    fn test_render_error_offers_link() {
        let result = CombinedResult::new(TranslationResult::error("offline"), None);
        let settings = Settings {
            translation_api: TranslationApi::Deepl,
            ..Default::default()
        };
        let out = render(&result, "good night", "de", &settings);
        assert_eq!(
            out,
            "Error: offline\nOpen in DeepL: https://www.deepl.com/translator#auto/de/good%20night\n"
        );
    }

    #[test]
    fn test_render_dictionary_entries() {
        let mut result = success();
        result.result_mazii = Some(vec![DictionaryEntry {
            mean: "xin chào".to_string(),
            like: 5,
            dislike: 1,
            username: "hana".to_string(),
        }]);
        let settings = Settings {
            if_show_candidate: false,
            ..Default::default()
        };

        let out = render(&result, "こんにちは", "vi", &settings);
        assert!(out.ends_with("- xin chào\n  Like: 5  Dislike: 1  hana\n"));
    }

    #[test]
    fn test_effective_settings_override() {
        let config = TranslatorConfig::default();
        assert_eq!(
            effective_settings(&config, Some(TranslationApi::Deepl)).translation_api,
            TranslationApi::Deepl
        );
        assert_eq!(
            effective_settings(&config, None).translation_api,
            TranslationApi::Google
        );
    }
}
