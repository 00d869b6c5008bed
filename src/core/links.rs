//! Links to the providers' own web pages, offered when a lookup fails

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::core::models::TranslationApi;

/// Characters `encodeURIComponent` leaves untouched
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Web translator URL pre-filled with the input text
pub fn web_translate_url(api: TranslationApi, target_lang: &str, text: &str) -> String {
    let encoded = utf8_percent_encode(text, URI_COMPONENT);
    match api {
        TranslationApi::Google => format!(
            "https://translate.google.com/?sl=auto&tl={}&text={}",
            target_lang, encoded
        ),
        TranslationApi::Deepl => format!(
            "https://www.deepl.com/translator#auto/{}/{}",
            target_lang, encoded
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_url() {
        assert_eq!(
            web_translate_url(TranslationApi::Google, "ja", "hello world"),
            "https://translate.google.com/?sl=auto&tl=ja&text=hello%20world"
        );
    }

    #[test]
    fn test_deepl_url() {
        assert_eq!(
            web_translate_url(TranslationApi::Deepl, "en", "こんにちは"),
            "https://www.deepl.com/translator#auto/en/%E3%81%93%E3%82%93%E3%81%AB%E3%81%A1%E3%81%AF"
        );
    }

    #[test]
    fn test_encodes_like_uri_component() {
        assert_eq!(
            web_translate_url(TranslationApi::Google, "de", "a&b=c/d?(it's)!*~_.-"),
            "https://translate.google.com/?sl=auto&tl=de&text=a%26b%3Dc%2Fd%3F(it's)!*~_.-"
        );
    }
}
