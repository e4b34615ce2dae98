use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use tracing::debug;

/// Per-locale string bundles, loaded once at startup from
/// `<path>/<locale>/<namespace>.json`. A missing bundle is not fatal; the
/// affected namespace falls back to the default locale, or to an empty map.
pub(crate) struct LocaleBundles {
    default_locale: String,
    bundles: HashMap<String, HashMap<String, Map<String, Value>>>,
}

impl LocaleBundles {
    pub(crate) fn load(path: &Path, default_locale: &str, namespaces: &[String]) -> Self {
        let mut bundles = HashMap::new();

        for locale in list_locales(path) {
            let mut locale_bundle = HashMap::new();

            for namespace in namespaces {
                match read_namespace(&path.join(&locale).join(format!("{namespace}.json"))) {
                    Some(strings) => {
                        locale_bundle.insert(namespace.clone(), strings);
                    }
                    None => debug!(%locale, %namespace, "locale bundle missing or malformed. skipping."),
                }
            }

            bundles.insert(locale, locale_bundle);
        }

        Self { default_locale: default_locale.to_owned(), bundles }
    }

    #[cfg(test)]
    pub(crate) fn empty(default_locale: &str) -> Self {
        Self { default_locale: default_locale.to_owned(), bundles: HashMap::new() }
    }

    /// Strings for the requested locale, falling back per namespace to the
    /// default locale.
    pub(crate) fn for_locale(&self, locale: Option<&str>) -> HashMap<String, Map<String, Value>> {
        let locale = locale.unwrap_or(&self.default_locale);

        let mut merged = self.bundles.get(&self.default_locale).cloned().unwrap_or_default();
        if let Some(requested) = self.bundles.get(locale) {
            for (namespace, strings) in requested {
                merged.insert(namespace.clone(), strings.clone());
            }
        }

        merged
    }
}

fn list_locales(path: &Path) -> Vec<String> {
    let entries = match std::fs::read_dir(path) {
        Ok(entries) => entries,
        Err(error) => {
            debug!(path = %path.display(), error = %error, "locales directory could not be read.");
            return Vec::new();
        }
    };

    entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect()
}

fn read_namespace(path: &PathBuf) -> Option<Map<String, Value>> {
    let content = std::fs::read_to_string(path).ok()?;

    serde_json::from_str(&content).ok()
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use super::LocaleBundles;

    fn fixture_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("portico-locales-{}", hex::encode(rand::random::<[u8; 8]>())));
        std::fs::create_dir_all(dir.join("en")).expect("en dir");
        std::fs::create_dir_all(dir.join("fr")).expect("fr dir");
        std::fs::write(dir.join("en").join("common.json"), r#"{"title": "Welcome"}"#).expect("en common");
        std::fs::write(dir.join("en").join("auth.json"), r#"{"signIn": "Sign in"}"#).expect("en auth");
        std::fs::write(dir.join("fr").join("common.json"), r#"{"title": "Bienvenue"}"#).expect("fr common");
        dir
    }

    fn namespaces() -> Vec<String> {
        vec!["common".to_owned(), "auth".to_owned()]
    }

    #[test]
    fn when_locale_is_omitted_then_default_locale_strings_are_returned() {
        let dir = fixture_dir();
        let bundles = LocaleBundles::load(&dir, "en", &namespaces());

        let strings = bundles.for_locale(None);

        assert_eq!(strings["common"]["title"], "Welcome");
        assert_eq!(strings["auth"]["signIn"], "Sign in");
    }

    #[test]
    fn when_requested_locale_misses_a_namespace_then_it_falls_back_to_the_default_locale() {
        let dir = fixture_dir();
        let bundles = LocaleBundles::load(&dir, "en", &namespaces());

        let strings = bundles.for_locale(Some("fr"));

        assert_eq!(strings["common"]["title"], "Bienvenue");
        assert_eq!(strings["auth"]["signIn"], "Sign in");
    }

    #[test]
    fn when_locales_directory_is_missing_then_bundles_are_empty() {
        let bundles = LocaleBundles::load(&PathBuf::from("/nonexistent/locales"), "en", &namespaces());

        assert!(bundles.for_locale(None).is_empty());
    }
}
