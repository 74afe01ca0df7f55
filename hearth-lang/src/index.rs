//! Locale index
//!
//! Maps a short language code to every known locale tag sharing it, so that
//! registering one language file makes it available for all region variants
//! of that language. Built once at first use, immutable afterward.

use crate::Locale;
use once_cell::sync::Lazy;
use std::collections::{BTreeSet, HashMap};

/// The universe of recognized locale tags.
///
/// Stands in for the platform locale table: each language appears both bare
/// and with its common region variants.
pub const KNOWN_LOCALES: &[&str] = &[
    "ar", "ar-AE", "ar-EG", "ar-MA", "ar-SA", //
    "bg", "bg-BG", //
    "cs", "cs-CZ", //
    "da", "da-DK", //
    "de", "de-AT", "de-CH", "de-DE", "de-LU", //
    "el", "el-GR", //
    "en", "en-AU", "en-CA", "en-GB", "en-IE", "en-IN", "en-NZ", "en-US", "en-ZA", //
    "es", "es-419", "es-AR", "es-CL", "es-CO", "es-ES", "es-MX", "es-US", //
    "fi", "fi-FI", //
    "fr", "fr-BE", "fr-CA", "fr-CH", "fr-FR", "fr-LU", //
    "he", "he-IL", //
    "hi", "hi-IN", //
    "hu", "hu-HU", //
    "id", "id-ID", //
    "it", "it-CH", "it-IT", //
    "ja", "ja-JP", //
    "ko", "ko-KR", //
    "ms", "ms-MY", //
    "nb", "nb-NO", //
    "nl", "nl-BE", "nl-NL", //
    "pl", "pl-PL", //
    "pt", "pt-BR", "pt-PT", //
    "ro", "ro-RO", //
    "ru", "ru-RU", //
    "sk", "sk-SK", //
    "sv", "sv-SE", //
    "th", "th-TH", //
    "tr", "tr-TR", //
    "uk", "uk-UA", //
    "vi", "vi-VN", //
    "zh", "zh-CN", "zh-HK", "zh-SG", "zh-TW", //
];

static INDEX: Lazy<HashMap<String, BTreeSet<Locale>>> = Lazy::new(|| {
    let mut index: HashMap<String, BTreeSet<Locale>> = HashMap::new();
    for tag in KNOWN_LOCALES {
        if let Ok(locale) = Locale::parse(tag) {
            index.entry(locale.language.clone()).or_default().insert(locale);
        }
    }
    index
});

/// Every known locale tag sharing the given language code, or `None` for an
/// unrecognized code. Lookup is case-insensitive.
pub fn tags_for_language(code: &str) -> Option<&'static BTreeSet<Locale>> {
    INDEX.get(&code.to_lowercase())
}
