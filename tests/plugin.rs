use bevy::prelude::*;
use bevy_intl_bind::{
    I18n,
    I18nConfig,
    I18nPlugin,
    LanguageAppExt,
    Localized,
    MemoryStore,
    PreferenceBackend,
    PreferenceStore,
    UiAttributes,
};

fn test_app(store: &MemoryStore) -> App {
    let mut app = App::new();
    app.add_plugins(
        I18nPlugin::with_config(I18nConfig {
            use_bundled_translations: true,
            preferences: PreferenceBackend::Memory(store.clone()),
            ..Default::default()
        })
    );
    app
}

fn text_of(app: &App, entity: Entity) -> String {
    app.world().get::<Text>(entity).unwrap().0.clone()
}

fn attribute_of(app: &App, entity: Entity, name: &str) -> Option<String> {
    app.world()
        .get::<UiAttributes>(entity)
        .and_then(|attributes| attributes.attribute(name).map(str::to_string))
}

#[test]
fn starts_on_default_locale_and_binds_new_entities() {
    let store = MemoryStore::new();
    let mut app = test_app(&store);

    let heading = app.world_mut().spawn((Text::new(""), Localized::new("settings"))).id();
    let search = app
        .world_mut()
        .spawn((UiAttributes::default(), Localized::new("placeholder:search-placeholder")))
        .id();
    app.update();

    assert_eq!(app.world().resource::<I18n>().current_locale(), "zh-CN");
    assert_eq!(text_of(&app, heading), "设置");
    assert_eq!(attribute_of(&app, search, "placeholder").as_deref(), Some("搜索"));
}

#[test]
fn changing_locale_refreshes_every_binding() {
    let store = MemoryStore::new();
    let mut app = test_app(&store);

    let heading = app.world_mut().spawn((Text::new(""), Localized::new("settings"))).id();
    let search = app
        .world_mut()
        .spawn((Text::new(""), UiAttributes::default(), Localized::new("placeholder:search-placeholder")))
        .id();
    app.update();

    app.set_lang_i18n("en-US");
    app.update();

    assert_eq!(text_of(&app, heading), "Settings");
    assert_eq!(attribute_of(&app, search, "placeholder").as_deref(), Some("Search"));
    assert_eq!(text_of(&app, search), "");
    assert_eq!(store.load("uiLanguage").as_deref(), Some("en-US"));
}

#[test]
fn unsupported_locale_changes_nothing() {
    let store = MemoryStore::new();
    let mut app = test_app(&store);
    let heading = app.world_mut().spawn((Text::new(""), Localized::new("cancel"))).id();
    app.update();

    app.set_lang_i18n("fr-FR");
    app.update();

    assert_eq!(app.world().resource::<I18n>().current_locale(), "zh-CN");
    assert_eq!(text_of(&app, heading), "取消");
    assert_eq!(store.load("uiLanguage"), None);
}

#[test]
fn persisted_locale_survives_a_restart() {
    let store = MemoryStore::new();
    {
        let mut app = test_app(&store);
        app.update();
        app.world_mut().resource_mut::<I18n>().change_locale("ja-JP");
    }

    let mut app = test_app(&store);
    let heading = app.world_mut().spawn((Text::new(""), Localized::new("delete-task"))).id();
    app.update();

    assert_eq!(app.world().resource::<I18n>().current_locale(), "ja-JP");
    assert_eq!(text_of(&app, heading), "タスクを削除");
}

#[test]
fn unknown_key_is_shown_verbatim() {
    let store = MemoryStore::new();
    let mut app = test_app(&store);
    let label = app.world_mut().spawn((Text::new("old"), Localized::new("no-such-key"))).id();
    app.update();

    assert_eq!(text_of(&app, label), "no-such-key");
}

#[test]
fn refresh_restores_overwritten_text() {
    let store = MemoryStore::new();
    let mut app = test_app(&store);
    let heading = app.world_mut().spawn((Text::new(""), Localized::new("settings"))).id();
    app.update();

    app.world_mut().get_mut::<Text>(heading).unwrap().0 = "scribbled".to_string();
    app.update();
    assert_eq!(text_of(&app, heading), "scribbled");

    app.refresh_i18n();
    app.update();
    assert_eq!(text_of(&app, heading), "设置");
}

#[test]
fn fallback_covers_keys_missing_from_active_locale() {
    let store = MemoryStore::new();
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("zh-CN.json"), r#"{ "only-zh": "仅中文", "shared": "共享" }"#).unwrap();
    std::fs::write(dir.path().join("en-US.json"), r#"{ "shared": "Shared" }"#).unwrap();

    let mut app = App::new();
    app.add_plugins(
        I18nPlugin::with_config(I18nConfig {
            use_bundled_translations: false,
            messages_folder: dir.path().to_string_lossy().to_string(),
            preferences: PreferenceBackend::Memory(store.clone()),
            ..Default::default()
        })
    );
    app.set_lang_i18n("en-US");

    let shared = app.world_mut().spawn((Text::new(""), Localized::new("shared"))).id();
    let only_zh = app.world_mut().spawn((Text::new(""), Localized::new("only-zh"))).id();
    app.update();

    assert_eq!(text_of(&app, shared), "Shared");
    assert_eq!(text_of(&app, only_zh), "仅中文");
    // app-title is in neither catalog
    assert_eq!(app.world().resource::<I18n>().t("app-title"), "app-title");
}

#[test]
fn primary_window_title_follows_locale() {
    let store = MemoryStore::new();
    let mut app = test_app(&store);
    let window = app.world_mut().spawn((Window::default(), bevy::window::PrimaryWindow)).id();
    app.update();
    assert_eq!(app.world().get::<Window>(window).unwrap().title, "语音/视频转文字工具");

    app.set_lang_i18n("en-US");
    app.update();
    assert_eq!(app.world().get::<Window>(window).unwrap().title, "Speech/Video to Text Tool");
}

#[test]
fn primary_window_spawned_later_gets_the_title() {
    let store = MemoryStore::new();
    let mut app = test_app(&store);
    app.update();
    app.update();

    let window = app.world_mut().spawn((Window::default(), bevy::window::PrimaryWindow)).id();
    app.update();
    assert_eq!(app.world().get::<Window>(window).unwrap().title, "语音/视频转文字工具");
}

#[test]
fn fallback_locale_can_be_switched_from_the_app() {
    let store = MemoryStore::new();
    let mut app = test_app(&store);

    app.set_fallback_lang("en-US");
    assert_eq!(app.world().resource::<I18n>().fallback_locale(), "en-US");

    app.set_fallback_lang("xx-XX");
    assert_eq!(app.world().resource::<I18n>().fallback_locale(), "en-US");
}
