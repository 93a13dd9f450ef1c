#![doc = include_str!("../README.md")]

//! ## Modules
//!
//! - [`catalog`]: loading and auditing `locale -> key -> template` catalogs
//! - [`format`]: `{0}`, `{1}` placeholder substitution
//! - [`binding`]: `key` / `attr:key` markers and the [`LocalizedTarget`] trait
//! - [`storage`]: persistence of the chosen locale
//!
//! Nothing outside this file touches Bevy UI types; [`Localizer`] can be used
//! on its own.

use std::collections::HashMap;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

pub mod binding;
pub mod catalog;
pub mod format;
pub mod locales;
mod localizer;
pub mod storage;

pub use binding::{ apply_binding, apply_bindings, Binding, BindingTarget, LocalizedTarget };
pub use catalog::{ Catalog, Catalogs, CoverageReport };
pub use localizer::Localizer;
pub use storage::{ FileStore, MemoryStore, PreferenceBackend, PreferenceStore };

use catalog::load_catalogs;
use storage::DEFAULT_STORAGE_KEY;

/// Configuration for the I18n plugin.
///
/// # Example
///
/// ```rust,ignore
/// use bevy_intl_bind::{ I18nConfig, MemoryStore, PreferenceBackend };
///
/// let config = I18nConfig {
///     default_lang: "en-US".to_string(),
///     preferences: PreferenceBackend::Memory(MemoryStore::new()),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Resource)]
pub struct I18nConfig {
    /// Whether to use the catalogs bundled at build time instead of reading
    /// `messages_folder`. Always `true` for WASM or with `bundle-only`.
    pub use_bundled_translations: bool,
    /// Folder containing one `<locale>.json` file per locale.
    /// Default: "messages"
    pub messages_folder: String,
    /// Locale used when no valid preference is stored.
    /// Default: "zh-CN"
    pub default_lang: String,
    /// Locale consulted when the active one lacks a key.
    /// Default: "zh-CN"
    pub fallback_lang: String,
    /// Where the chosen locale is persisted.
    pub preferences: PreferenceBackend,
    /// Key under which the chosen locale is stored.
    /// Default: "uiLanguage"
    pub storage_key: String,
    /// Key whose translation becomes the primary window title, if any.
    /// Default: "app-title"
    pub title_key: Option<String>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            use_bundled_translations: cfg!(target_arch = "wasm32") || cfg!(feature = "bundle-only"),
            messages_folder: "messages".to_string(),
            default_lang: "zh-CN".to_string(),
            fallback_lang: "zh-CN".to_string(),
            preferences: PreferenceBackend::default(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            title_key: Some("app-title".to_string()),
        }
    }
}

// ---------- Bevy Plugin ----------

/// Loads the catalogs, restores the persisted locale and keeps every
/// [`Localized`] entity in sync with the active locale.
///
/// # Example
///
/// ```rust,ignore
/// use bevy::prelude::*;
/// use bevy_intl_bind::{ I18nPlugin, Localized };
///
/// fn setup(mut commands: Commands) {
///     commands.spawn((Text::new(""), Localized::new("start-recording")));
/// }
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(I18nPlugin::default())
///     .add_systems(Startup, setup)
///     .run();
/// ```
#[derive(Default)]
pub struct I18nPlugin {
    pub config: I18nConfig,
}

impl I18nPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: I18nConfig) -> Self {
        Self { config }
    }
}

impl Plugin for I18nPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .init_resource::<I18n>()
            .add_systems(PostUpdate, (apply_window_title, apply_localized_targets));
    }
}

/// The active [`Localizer`] as a Bevy resource.
///
/// Mutating it through `ResMut` (for example `change_locale`) re-applies
/// every binding on the next `PostUpdate`.
///
/// ```rust,ignore
/// fn pick_japanese(mut i18n: ResMut<I18n>) {
///     i18n.change_locale("ja-JP");
/// }
///
/// fn confirm_text(i18n: Res<I18n>, task: &str) -> String {
///     i18n.translate("confirm-delete-message", &[&task])
/// }
/// ```
#[derive(Resource, Deref, DerefMut)]
pub struct I18n(Localizer);

impl I18n {
    pub fn new(localizer: Localizer) -> Self {
        Self(localizer)
    }
}

impl FromWorld for I18n {
    fn from_world(world: &mut World) -> Self {
        let config = world.get_resource::<I18nConfig>().cloned().unwrap_or_default();

        let catalogs = load_catalogs(
            config.use_bundled_translations,
            &config.messages_folder,
            &config.default_lang
        );
        for report in catalogs.coverage(&config.default_lang) {
            if !report.is_complete() {
                warn!(
                    "Catalog '{}' drifts from '{}': missing {:?}, extra {:?}, placeholder mismatches {:?}",
                    report.locale,
                    config.default_lang,
                    report.missing,
                    report.extra,
                    report.placeholder_mismatches
                );
            }
        }

        let mut localizer = Localizer::new(catalogs, &config.default_lang, config.preferences.open())
            .with_storage_key(&config.storage_key);
        localizer.set_fallback_locale(&config.fallback_lang);
        let locale = localizer.init().to_string();
        info!("I18n ready with locale '{}' ({:?})", locale, localizer.available_locales());

        Self(localizer)
    }
}

// ---------- Components ----------

/// Marks an entity whose text (or one attribute) is localized.
///
/// The marker is either a key (`"settings"`) bound to the entity's [`Text`],
/// or `"attr:key"` (`"placeholder:search-placeholder"`) bound to an entry of
/// its [`UiAttributes`].
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Localized(pub String);

impl Localized {
    pub fn new(marker: impl Into<String>) -> Self {
        Self(marker.into())
    }
}

/// Named string attributes of a UI entity (placeholder, tooltip, ...).
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct UiAttributes(pub HashMap<String, String>);

impl UiAttributes {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }
}

// ---------- Systems ----------

struct EntityTarget<'w> {
    entity: Entity,
    text: Option<Mut<'w, Text>>,
    attributes: Option<Mut<'w, UiAttributes>>,
}

impl LocalizedTarget for EntityTarget<'_> {
    fn set_text(&mut self, text: String) {
        match self.text.as_mut() {
            Some(current) if current.0 != text => current.0 = text,
            Some(_) => {}
            None => debug!("{:?} has a text binding but no Text", self.entity),
        }
    }

    fn set_attribute(&mut self, name: &str, value: String) {
        match self.attributes.as_mut() {
            Some(attributes) if attributes.attribute(name) != Some(value.as_str()) => {
                attributes.insert(name, value);
            }
            Some(_) => {}
            None => debug!("{:?} binds '{}' but has no UiAttributes", self.entity, name),
        }
    }
}

/// Re-applies every binding when the locale changed, and new bindings always.
fn apply_localized_targets(
    i18n: Res<I18n>,
    mut query: Query<(Entity, Ref<Localized>, Option<&mut Text>, Option<&mut UiAttributes>)>
) {
    let refresh_all = i18n.is_changed();

    for (entity, localized, text, attributes) in &mut query {
        if !refresh_all && !localized.is_changed() {
            continue;
        }
        let mut target = EntityTarget { entity, text, attributes };
        apply_binding(&i18n, &localized.0, &mut target);
    }
}

/// Titles the primary window on locale change, or as soon as it appears.
fn apply_window_title(
    i18n: Res<I18n>,
    config: Res<I18nConfig>,
    mut windows: Query<(&mut Window, Ref<PrimaryWindow>)>
) {
    let Some(title_key) = config.title_key.as_deref() else {
        return;
    };
    let refresh_all = i18n.is_changed();

    for (mut window, primary) in &mut windows {
        if refresh_all || primary.is_added() {
            window.title = i18n.t(title_key);
        }
    }
}

// ---------- API ----------

/// Extension trait for `App` to manage the active locale.
pub trait LanguageAppExt {
    /// Switches and persists the locale; unknown locales are ignored.
    fn set_lang_i18n(&mut self, locale: &str);
    /// Sets the fallback locale; unknown locales are ignored.
    fn set_fallback_lang(&mut self, locale: &str);
    /// Forces every binding to be re-applied on the next update.
    fn refresh_i18n(&mut self);
}

impl LanguageAppExt for App {
    fn set_lang_i18n(&mut self, locale: &str) {
        if let Some(mut i18n) = self.world_mut().get_resource_mut::<I18n>() {
            i18n.change_locale(locale);
        }
    }

    fn set_fallback_lang(&mut self, locale: &str) {
        if let Some(mut i18n) = self.world_mut().get_resource_mut::<I18n>() {
            i18n.set_fallback_locale(locale);
        }
    }

    fn refresh_i18n(&mut self) {
        if let Some(mut i18n) = self.world_mut().get_resource_mut::<I18n>() {
            i18n.set_changed();
        }
    }
}
