//! Positional placeholder handling.
//!
//! Templates carry markers of the form `{0}`, `{1}`, ... Substitution is plain
//! text replacement: each argument replaces only the first occurrence of its
//! own marker, in argument order.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(\d+)\}").unwrap());

/// Replaces `{i}` with the `i`-th argument.
///
/// Arguments are applied one after another, so text inserted for `{0}` is
/// visible when `{1}` is searched for. Markers without a matching argument are
/// left as they are; surplus arguments are ignored.
///
/// ```
/// use bevy_intl_bind::format::format_placeholders;
///
/// assert_eq!(format_placeholders("a {0} b", &[&"x"]), "a x b");
/// assert_eq!(format_placeholders("{0} {0}", &[&1]), "1 {0}");
/// ```
pub fn format_placeholders(template: &str, args: &[&dyn ToString]) -> String {
    let mut text = template.to_string();
    for (index, arg) in args.iter().enumerate() {
        let marker = format!("{{{}}}", index);
        text = text.replacen(&marker, &arg.to_string(), 1);
    }
    text
}

/// Indices of every `{i}` marker found in `template`.
pub fn placeholder_indices(template: &str) -> BTreeSet<usize> {
    PLACEHOLDER_RE.captures_iter(template)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}
