use crate::persistence::{KeyValueStore, THEME_KEY};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Value written under the `theme` key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Class applied to `document.body`.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Light => "light-mode",
            Self::Dark => "dark-mode",
        }
    }

    /// Only an exact `"dark"` selects dark mode; missing or unknown values
    /// fall back to light.
    pub fn from_stored(raw: Option<&str>) -> Self {
        match raw {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    pub fn from_checked(checked: bool) -> Self {
        if checked {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Checked state of the theme switch.
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

pub fn load_theme<S>(store: &S) -> Theme
where
    S: KeyValueStore + ?Sized,
{
    match store.get_item(THEME_KEY) {
        Ok(raw) => Theme::from_stored(raw.as_deref()),
        Err(err) => {
            log::warn!("using light theme, saved preference unreadable: {err}");
            Theme::Light
        }
    }
}

/// Maps the switch state to a theme and persists it.
///
/// The returned theme should be applied even when the write failed.
pub fn switch_theme<S>(store: &mut S, checked: bool) -> Theme
where
    S: KeyValueStore + ?Sized,
{
    let theme = Theme::from_checked(checked);
    match store.set_item(THEME_KEY, theme.as_str()) {
        Ok(()) => log::debug!("theme switched to {}", theme.as_str()),
        Err(err) => log::warn!("theme switched to {} but not saved: {err}", theme.as_str()),
    }
    theme
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, StoreError};

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable)
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    fn saved(store: &MemoryStore) -> Option<String> {
        store.get_item(THEME_KEY).expect("memory store reads never fail")
    }

    #[test]
    fn defaults_to_light_without_saved_theme() {
        let store = MemoryStore::new();

        let theme = load_theme(&store);

        assert_eq!(theme, Theme::Light);
        assert_eq!(theme.class_name(), "light-mode");
        assert!(!theme.is_dark());
    }

    #[test]
    fn saved_dark_theme_checks_the_switch() {
        let mut store = MemoryStore::new();
        store.set_item(THEME_KEY, "dark").expect("seed");

        let theme = load_theme(&store);

        assert_eq!(theme, Theme::Dark);
        assert_eq!(theme.class_name(), "dark-mode");
        assert!(theme.is_dark());
    }

    #[test]
    fn unknown_saved_values_fall_back_to_light() {
        for raw in ["light", "Dark", "", "blue"] {
            assert_eq!(Theme::from_stored(Some(raw)), Theme::Light, "{raw:?}");
        }
    }

    #[test]
    fn toggling_updates_class_and_saved_value() {
        let mut store = MemoryStore::new();

        let on = switch_theme(&mut store, true);
        assert_eq!(on.class_name(), "dark-mode");
        assert_eq!(saved(&store).as_deref(), Some("dark"));

        let off = switch_theme(&mut store, false);
        assert_eq!(off.class_name(), "light-mode");
        assert_eq!(saved(&store).as_deref(), Some("light"));
        assert_eq!(load_theme(&store), Theme::Light);
    }

    #[test]
    fn opposite_is_the_class_to_remove() {
        assert_eq!(Theme::Dark.opposite().class_name(), "light-mode");
        assert_eq!(Theme::Light.opposite().class_name(), "dark-mode");
    }

    #[test]
    fn storage_failures_do_not_block_theme_changes() {
        assert_eq!(load_theme(&BrokenStore), Theme::Light);
        assert_eq!(switch_theme(&mut BrokenStore, true), Theme::Dark);
    }
}
