//! Locale tags recognized when loading catalogs.

/// Sorted list of language and language-region tags.
///
/// Catalog files whose name is not in this list still load with a warning.
pub const LOCALES: &[&str] = &[
    "ar", "ar-EG", "ar-SA", "bg", "bg-BG", "bn", "bn-IN", "ca", "ca-ES", "cs", "cs-CZ",
    "da", "da-DK", "de", "de-AT", "de-CH", "de-DE", "el", "el-GR", "en", "en-AU",
    "en-CA", "en-GB", "en-IE", "en-IN", "en-NZ", "en-US", "es", "es-AR", "es-ES",
    "es-MX", "es-US", "et", "fa", "fa-IR", "fi", "fi-FI", "fil", "fr", "fr-BE", "fr-CA",
    "fr-CH", "fr-FR", "he", "he-IL", "hi", "hi-IN", "hr", "hu", "hu-HU", "id", "id-ID",
    "it", "it-IT", "ja", "ja-JP", "ko", "ko-KR", "lt", "lv", "ms", "ms-MY", "nb",
    "nb-NO", "nl", "nl-BE", "nl-NL", "pl", "pl-PL", "pt", "pt-BR", "pt-PT", "ro",
    "ro-RO", "ru", "ru-RU", "sk", "sl", "sr", "sv", "sv-SE", "th", "th-TH", "tr",
    "tr-TR", "uk", "uk-UA", "ur", "vi", "vi-VN", "zh", "zh-CN", "zh-HK", "zh-Hans",
    "zh-Hant", "zh-SG", "zh-TW",
];

/// Whether `locale` is a recognized tag.
pub fn is_known_locale(locale: &str) -> bool {
    LOCALES.binary_search(&locale).is_ok()
}
