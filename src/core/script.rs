//! Writing-system detection

use once_cell::sync::Lazy;
use regex::Regex;

/// CJK punctuation, hiragana, katakana, full/half-width forms and CJK ideographs
static JAPANESE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x{3000}-\x{303f}\x{3040}-\x{309f}\x{30a0}-\x{30ff}\x{ff00}-\x{ff9f}\x{4e00}-\x{9faf}\x{3400}-\x{4dbf}]")
        .expect("static regex")
});

/// Whether the text contains any Japanese-script character
pub fn is_japanese(text: &str) -> bool {
    JAPANESE_REGEX.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_kana_and_kanji() {
        assert!(is_japanese("こんにちは"));
        assert!(is_japanese("カタカナ"));
        assert!(is_japanese("日本語"));
        assert!(is_japanese("hello 世界"));
    }

    #[test]
    fn test_rejects_latin_and_hangul() {
        assert!(!is_japanese("hello"));
        assert!(!is_japanese("Grüße"));
        assert!(!is_japanese("안녕하세요"));
        assert!(!is_japanese(""));
    }
}
