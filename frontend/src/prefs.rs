use web_sys::Storage;

pub const THEME_KEY: &str = "nazbot-theme";
pub const BANNER_DISMISSED_KEY: &str = "nazbot-banner-dismissed";
pub const BANNER_VISIBLE_CLASS: &str = "banner-visible";

/// Key/value persistence for user preferences.
///
/// Reads of a broken store behave like an empty one; failed writes are dropped.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// `window.localStorage`, when the browser lets us have it.
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::info!("localStorage unavailable, preferences will not persist");
        }
        Self { storage }
    }
}

impl PreferenceStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.set_item(key, value) {
                log::warn!("could not store {}: {:?}", key, e);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn parse(value: &str) -> Option<Theme> {
        match value {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Glyph on the toggle button.
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Dark => "☀",
            Theme::Light => "☾",
        }
    }
}

pub fn load_theme(store: &dyn PreferenceStore) -> Theme {
    store
        .get(THEME_KEY)
        .and_then(|v| Theme::parse(&v))
        .unwrap_or_default()
}

pub fn save_theme(store: &dyn PreferenceStore, theme: Theme) {
    store.set(THEME_KEY, theme.as_str());
}

pub fn banner_dismissed(store: &dyn PreferenceStore) -> bool {
    store.get(BANNER_DISMISSED_KEY).is_some()
}

pub fn dismiss_banner(store: &dyn PreferenceStore) {
    store.set(BANNER_DISMISSED_KEY, "true");
}

pub fn apply_theme(theme: Theme) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    if let Some(root) = root {
        let _ = root.set_attribute("data-theme", theme.as_str());
    }
}

pub fn set_banner_visible(visible: bool) {
    let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) else {
        return;
    };
    let classes = body.class_list();
    let _ = if visible {
        classes.add_1(BANNER_VISIBLE_CLASS)
    } else {
        classes.remove_1(BANNER_VISIBLE_CLASS)
    };
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    #[derive(Default)]
    struct MemoryStore(RefCell<HashMap<String, String>>);

    impl PreferenceStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) {
            self.0.borrow_mut().insert(key.to_string(), value.to_string());
        }
    }

    /// A store whose every access fails.
    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get(&self, _: &str) -> Option<String> {
            None
        }

        fn set(&self, _: &str, _: &str) {}
    }

    #[test]
    fn theme_defaults_to_dark() {
        assert_eq!(load_theme(&MemoryStore::default()), Theme::Dark);
        assert_eq!(load_theme(&BrokenStore), Theme::Dark);
    }

    #[test]
    fn unknown_theme_value_falls_back_to_dark() {
        let store = MemoryStore::default();
        store.set(THEME_KEY, "sepia");
        assert_eq!(load_theme(&store), Theme::Dark);
    }

    #[test]
    fn toggled_theme_persists() {
        let store = MemoryStore::default();
        let next = load_theme(&store).toggled();
        save_theme(&store, next);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
        assert_eq!(load_theme(&store), Theme::Light);
    }

    #[test]
    fn icon_shows_the_other_theme() {
        assert_eq!(Theme::Dark.icon(), "☀");
        assert_eq!(Theme::Light.icon(), "☾");
    }

    #[test]
    fn banner_stays_dismissed() {
        let store = MemoryStore::default();
        assert!(!banner_dismissed(&store));
        dismiss_banner(&store);
        assert!(banner_dismissed(&store));
        assert!(!banner_dismissed(&BrokenStore));
    }
}
