use bevy::log::{ info, warn };

use crate::catalog::Catalogs;
use crate::format::format_placeholders;
use crate::storage::{ PreferenceStore, DEFAULT_STORAGE_KEY };

/// Active-locale state over a set of catalogs.
///
/// Lookups go active locale, then fallback locale, then the key itself.
/// Switching locale is persisted through a [`PreferenceStore`].
pub struct Localizer {
    catalogs: Catalogs,
    current_lang: String,
    default_lang: String,
    fallback_lang: String,
    store: Box<dyn PreferenceStore>,
    storage_key: String,
}

impl Localizer {
    /// Creates a localizer on `default_lang`, which is also the fallback.
    ///
    /// The stored preference is not read until [`Localizer::init`].
    pub fn new(catalogs: Catalogs, default_lang: &str, store: Box<dyn PreferenceStore>) -> Self {
        Self {
            catalogs,
            current_lang: default_lang.to_string(),
            default_lang: default_lang.to_string(),
            fallback_lang: default_lang.to_string(),
            store,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    pub fn with_fallback(mut self, fallback_lang: &str) -> Self {
        self.fallback_lang = fallback_lang.to_string();
        self
    }

    pub fn with_storage_key(mut self, storage_key: &str) -> Self {
        self.storage_key = storage_key.to_string();
        self
    }

    /// Activates the stored locale, or the default one when nothing usable
    /// is stored.
    pub fn init(&mut self) -> &str {
        self.current_lang = match self.store.load(&self.storage_key) {
            Some(stored) if self.catalogs.contains_locale(&stored) => stored,
            Some(stored) => {
                warn!("Stored locale '{}' not available, using '{}'", stored, self.default_lang);
                self.default_lang.clone()
            }
            None => self.default_lang.clone(),
        };
        &self.current_lang
    }

    /// Switches to `locale` and persists it.
    ///
    /// Unknown locales are ignored and `false` is returned. A failed write
    /// is logged but the switch still happens.
    pub fn change_locale(&mut self, locale: &str) -> bool {
        if !self.catalogs.contains_locale(locale) {
            warn!("Locale '{}' not available", locale);
            return false;
        }

        self.current_lang = locale.to_string();
        if let Err(e) = self.store.save(&self.storage_key, locale) {
            warn!("Failed to persist locale '{}': {}", locale, e);
        }
        info!("Locale changed to '{}'", locale);
        true
    }

    /// Sets the locale consulted when the active one lacks a key.
    pub fn set_fallback_locale(&mut self, locale: &str) -> bool {
        if !self.catalogs.contains_locale(locale) {
            warn!("Fallback locale '{}' not available", locale);
            return false;
        }
        self.fallback_lang = locale.to_string();
        true
    }

    /// Active locale id, also what a host would use as its document language.
    pub fn current_locale(&self) -> &str {
        &self.current_lang
    }

    pub fn fallback_locale(&self) -> &str {
        &self.fallback_lang
    }

    pub fn default_locale(&self) -> &str {
        &self.default_lang
    }

    pub fn available_locales(&self) -> Vec<String> {
        self.catalogs.locales()
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    /// Template for `key`: active locale, then fallback, then `key` itself.
    ///
    /// An empty template counts as missing.
    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        self.catalogs
            .get(&self.current_lang, key)
            .filter(|template| !template.is_empty())
            .or_else(|| {
                self.catalogs
                    .get(&self.fallback_lang, key)
                    .filter(|template| !template.is_empty())
            })
            .unwrap_or(key)
    }

    /// Translated text for `key`.
    pub fn t(&self, key: &str) -> String {
        self.resolve(key).to_string()
    }

    /// Translated text for `key` with `{i}` replaced by `args[i]`.
    pub fn translate(&self, key: &str, args: &[&dyn ToString]) -> String {
        format_placeholders(self.resolve(key), args)
    }
}
