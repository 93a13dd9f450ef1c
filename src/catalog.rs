//! Locale catalogs: `locale -> key -> template`.
//!
//! Catalogs are loaded either from a folder of `<locale>.json` files or from
//! the bundle `build.rs` writes into `OUT_DIR`. Loading never panics: any
//! failure falls back to a one-entry error catalog and is logged.

use std::collections::HashMap;
use std::error::Error;

use bevy::log::{ debug, warn };
use serde_json::Value;

use crate::format::placeholder_indices;
use crate::locales::is_known_locale;

/// Templates of a single locale, by translation key.
pub type Catalog = HashMap<String, String>;

/// Every loaded locale catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    langs: HashMap<String, Catalog>,
}

impl Catalogs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the catalog of `locale`.
    pub fn insert(&mut self, locale: impl Into<String>, catalog: Catalog) {
        self.langs.insert(locale.into(), catalog);
    }

    /// Builder-style [`Catalogs::insert`] taking `(key, template)` pairs.
    pub fn with_locale<K, V>(mut self, locale: &str, entries: impl IntoIterator<Item = (K, V)>) -> Self
        where K: Into<String>, V: Into<String>
    {
        let catalog = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.insert(locale, catalog);
        self
    }

    pub fn contains_locale(&self, locale: &str) -> bool {
        self.langs.contains_key(locale)
    }

    pub fn catalog(&self, locale: &str) -> Option<&Catalog> {
        self.langs.get(locale)
    }

    /// Template for `key` in `locale`, without any fallback.
    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        self.langs
            .get(locale)
            .and_then(|catalog| catalog.get(key))
            .map(String::as_str)
    }

    /// Loaded locale identifiers, sorted.
    pub fn locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = self.langs.keys().cloned().collect();
        locales.sort();
        locales
    }

    pub fn is_empty(&self) -> bool {
        self.langs.is_empty()
    }

    /// Compares every other locale against `reference`.
    ///
    /// Returns one report per locale, sorted by locale. Returns nothing when
    /// `reference` itself is not loaded.
    pub fn coverage(&self, reference: &str) -> Vec<CoverageReport> {
        let Some(base) = self.langs.get(reference) else {
            return Vec::new();
        };

        let mut reports: Vec<CoverageReport> = self.langs
            .iter()
            .filter(|(locale, _)| locale.as_str() != reference)
            .map(|(locale, catalog)| {
                let mut report = CoverageReport {
                    locale: locale.clone(),
                    ..Default::default()
                };

                for (key, template) in base {
                    match catalog.get(key) {
                        None => report.missing.push(key.clone()),
                        Some(translated) => {
                            if placeholder_indices(template) != placeholder_indices(translated) {
                                report.placeholder_mismatches.push(key.clone());
                            }
                        }
                    }
                }
                report.extra = catalog
                    .keys()
                    .filter(|key| !base.contains_key(*key))
                    .cloned()
                    .collect();

                report.missing.sort();
                report.extra.sort();
                report.placeholder_mismatches.sort();
                report
            })
            .collect();

        reports.sort_by(|a, b| a.locale.cmp(&b.locale));
        reports
    }
}

/// Drift of one locale relative to the reference locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageReport {
    pub locale: String,
    /// Keys of the reference locale this locale lacks.
    pub missing: Vec<String>,
    /// Keys this locale has that the reference does not.
    pub extra: Vec<String>,
    /// Keys whose `{i}` markers differ from the reference template.
    pub placeholder_mismatches: Vec<String>,
}

impl CoverageReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty() && self.placeholder_mismatches.is_empty()
    }
}

// ---------- Loaders ----------

/// Loads catalogs from the bundle or from `messages_folder`.
///
/// Falls back to the other source when the first one is empty or missing, and
/// to [`error_catalogs`] when nothing can be loaded.
pub fn load_catalogs(use_bundled: bool, messages_folder: &str, default_lang: &str) -> Catalogs {
    let loaded = if use_bundled {
        load_bundled_catalogs(messages_folder)
    } else {
        load_filesystem_catalogs(messages_folder)
    };

    match loaded {
        Some(catalogs) => catalogs,
        None => error_catalogs(default_lang),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_filesystem_catalogs(messages_folder: &str) -> Option<Catalogs> {
    match load_catalogs_from_dir(std::path::Path::new(messages_folder)) {
        Ok(catalogs) if !catalogs.is_empty() => Some(catalogs),
        Ok(_) => {
            warn!("No catalogs found in '{}'", messages_folder);
            None
        }
        Err(e) => {
            warn!("Failed to load catalogs from '{}': {}", messages_folder, e);
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn load_filesystem_catalogs(_messages_folder: &str) -> Option<Catalogs> {
    warn!("Filesystem loading not available on WASM, using bundled catalogs");
    load_bundled_catalogs("")
}

fn load_bundled_catalogs(messages_folder: &str) -> Option<Catalogs> {
    match load_bundled_data() {
        Ok(catalogs) if catalogs.is_empty() => {
            if cfg!(target_arch = "wasm32") {
                warn!("Bundled catalogs are empty");
                None
            } else {
                debug!("Bundled catalogs are empty, trying '{}'", messages_folder);
                load_filesystem_catalogs(messages_folder)
            }
        }
        Ok(catalogs) => Some(catalogs),
        Err(e) => {
            warn!("Failed to load bundled catalogs: {}", e);
            None
        }
    }
}

/// Parses the catalogs bundled at build time from the `messages/` folder.
pub fn load_bundled_data() -> Result<Catalogs, Box<dyn Error>> {
    const BUNDLED_CATALOGS: &str = include_str!(concat!(env!("OUT_DIR"), "/all_translations.json"));

    parse_catalogs(serde_json::from_str(BUNDLED_CATALOGS)?)
}

/// Parses `{ "<locale>": { "<key>": "<template>" } }`.
///
/// Non-string templates are skipped with a warning rather than rejected.
pub fn parse_catalogs(value: Value) -> Result<Catalogs, Box<dyn Error>> {
    let Value::Object(langs) = value else {
        return Err("catalog bundle must be a JSON object".into());
    };

    let mut catalogs = Catalogs::new();
    for (locale, entries) in langs {
        catalogs.insert(locale.clone(), parse_catalog(&locale, entries)?);
    }
    Ok(catalogs)
}

fn parse_catalog(locale: &str, value: Value) -> Result<Catalog, Box<dyn Error>> {
    let Value::Object(entries) = value else {
        return Err(format!("catalog '{}' must be a JSON object", locale).into());
    };

    let mut catalog = Catalog::new();
    for (key, template) in entries {
        match template {
            Value::String(text) => {
                catalog.insert(key, text);
            }
            other => warn!("Skipping non-string entry '{}' in '{}': {}", key, locale, other),
        }
    }
    Ok(catalog)
}

/// Reads every `<locale>.json` file directly inside `dir`.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_catalogs_from_dir(dir: &std::path::Path) -> std::io::Result<Catalogs> {
    use std::fs;

    if !dir.exists() {
        return Err(
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} folder not found", dir.display())
            )
        );
    }

    let mut catalogs = Catalogs::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let Some(locale) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if !is_known_locale(locale) {
            warn!("Catalog '{}' is not a recognized locale tag", locale);
        }

        let content = fs::read_to_string(&path)?;
        let json: Value = serde_json
            ::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let catalog = parse_catalog(locale, json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;

        debug!("Loaded {} keys for '{}'", catalog.len(), locale);
        catalogs.insert(locale, catalog);
    }

    Ok(catalogs)
}

/// Minimal catalog used when nothing could be loaded.
pub fn error_catalogs(locale: &str) -> Catalogs {
    Catalogs::new().with_locale(locale, [("error", "Translation Error")])
}
