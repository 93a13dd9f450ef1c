//! Binding of translation keys to UI targets.
//!
//! A target is labeled with a marker string. `"key"` binds the target's text,
//! `"attr:key"` binds the named attribute (for example `placeholder:search`).

use bevy::log::debug;

use crate::localizer::Localizer;

/// Where a marker's translation is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingTarget<'a> {
    Text,
    Attribute(&'a str),
}

/// A parsed marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding<'a> {
    pub target: BindingTarget<'a>,
    pub key: &'a str,
}

impl<'a> Binding<'a> {
    /// Parses a marker; an empty marker binds nothing.
    ///
    /// With a `:` the first segment names the attribute and the second is the
    /// key. Anything after a second `:` is ignored.
    pub fn parse(marker: &'a str) -> Option<Self> {
        if marker.is_empty() {
            return None;
        }

        if !marker.contains(':') {
            return Some(Self { target: BindingTarget::Text, key: marker });
        }

        let mut segments = marker.split(':');
        let attribute = segments.next().unwrap_or_default();
        let key = segments.next().unwrap_or_default();
        Some(Self { target: BindingTarget::Attribute(attribute), key })
    }
}

/// Something localized text can be written to.
pub trait LocalizedTarget {
    fn set_text(&mut self, text: String);
    fn set_attribute(&mut self, name: &str, value: String);
}

/// Writes the translation for `marker` into `target`.
///
/// Returns `false` when the marker is empty and nothing was written.
pub fn apply_binding(localizer: &Localizer, marker: &str, target: &mut dyn LocalizedTarget) -> bool {
    let Some(binding) = Binding::parse(marker) else {
        return false;
    };

    let text = localizer.t(binding.key);
    match binding.target {
        BindingTarget::Text => target.set_text(text),
        BindingTarget::Attribute(name) => target.set_attribute(name, text),
    }
    true
}

/// Re-applies every `(marker, target)` pair; returns how many were written.
pub fn apply_bindings<'t, I>(localizer: &Localizer, targets: I) -> usize
    where I: IntoIterator<Item = (&'t str, &'t mut dyn LocalizedTarget)>
{
    let mut applied = 0;
    for (marker, target) in targets {
        if apply_binding(localizer, marker, target) {
            applied += 1;
        }
    }
    debug!("Applied {} bindings for '{}'", applied, localizer.current_locale());
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::catalog::Catalogs;
    use crate::storage::MemoryStore;

    #[derive(Default)]
    struct Element {
        text: String,
        attributes: HashMap<String, String>,
    }

    impl LocalizedTarget for Element {
        fn set_text(&mut self, text: String) {
            self.text = text;
        }

        fn set_attribute(&mut self, name: &str, value: String) {
            self.attributes.insert(name.to_string(), value);
        }
    }

    fn localizer() -> Localizer {
        let catalogs = Catalogs::new()
            .with_locale("zh-CN", [("search-placeholder", "搜索"), ("settings", "设置")])
            .with_locale("en-US", [("search-placeholder", "Search"), ("settings", "Settings")]);
        Localizer::new(catalogs, "zh-CN", Box::new(MemoryStore::new()))
    }

    #[test]
    fn parses_markers() {
        assert_eq!(Binding::parse(""), None);
        assert_eq!(
            Binding::parse("settings"),
            Some(Binding { target: BindingTarget::Text, key: "settings" })
        );
        assert_eq!(
            Binding::parse("placeholder:search-placeholder"),
            Some(Binding { target: BindingTarget::Attribute("placeholder"), key: "search-placeholder" })
        );
        assert_eq!(
            Binding::parse("title:settings:ignored"),
            Some(Binding { target: BindingTarget::Attribute("title"), key: "settings" })
        );
        assert_eq!(
            Binding::parse("title:"),
            Some(Binding { target: BindingTarget::Attribute("title"), key: "" })
        );
    }

    #[test]
    fn applies_text_and_attribute_bindings() {
        let mut localizer = localizer();
        let mut heading = Element::default();
        let mut search = Element::default();
        let mut unbound = Element { text: "keep".to_string(), ..Default::default() };

        let applied = apply_bindings(
            &localizer,
            [
                ("settings", &mut heading as &mut dyn LocalizedTarget),
                ("placeholder:search-placeholder", &mut search as &mut dyn LocalizedTarget),
                ("", &mut unbound as &mut dyn LocalizedTarget),
            ]
        );
        assert_eq!(applied, 2);
        assert_eq!(heading.text, "设置");
        assert_eq!(search.attributes["placeholder"], "搜索");
        assert!(search.text.is_empty());
        assert_eq!(unbound.text, "keep");

        assert!(localizer.change_locale("en-US"));
        apply_binding(&localizer, "settings", &mut heading);
        apply_binding(&localizer, "placeholder:search-placeholder", &mut search);
        assert_eq!(heading.text, "Settings");
        assert_eq!(search.attributes["placeholder"], "Search");
    }

    #[test]
    fn unknown_key_is_written_verbatim() {
        let localizer = localizer();
        let mut element = Element::default();
        apply_binding(&localizer, "aria-label:no-such-key", &mut element);
        assert_eq!(element.attributes["aria-label"], "no-such-key");
    }
}
