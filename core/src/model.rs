//! Persisted and in-memory theme data.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Root marker toggled on the rendering surface for the dark theme.
pub const DARK_MARKER: &str = "dark";

/// The two supported base themes.
///
/// Serialized as `"DARK"` / `"LIGHT"`. Older records stored the enum ordinal
/// (`0` for dark, `1` for light); both shapes are accepted on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "StoredTheme")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark { Theme::Dark } else { Theme::Light }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => write!(f, "DARK"),
            Theme::Light => write!(f, "LIGHT"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredTheme {
    Name(String),
    Ordinal(u64),
}

impl TryFrom<StoredTheme> for Theme {
    type Error = String;

    fn try_from(stored: StoredTheme) -> Result<Self, Self::Error> {
        match stored {
            StoredTheme::Name(name) if name.eq_ignore_ascii_case("dark") => Ok(Theme::Dark),
            StoredTheme::Name(name) if name.eq_ignore_ascii_case("light") => Ok(Theme::Light),
            StoredTheme::Ordinal(0) => Ok(Theme::Dark),
            StoredTheme::Ordinal(1) => Ok(Theme::Light),
            StoredTheme::Name(name) => Err(format!("unknown theme '{name}'")),
            StoredTheme::Ordinal(ordinal) => Err(format!("unknown theme ordinal {ordinal}")),
        }
    }
}

/// The record persisted under [`THEME_KEY`](crate::storage::THEME_KEY).
///
/// `accent_color` is never null once persisted; the empty string means no
/// accent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePreference {
    pub theme: Theme,
    #[serde(rename = "themeColor", default, deserialize_with = "null_as_empty")]
    pub accent_color: String,
}

impl ThemePreference {
    pub fn new(theme: Theme, accent_color: impl Into<String>) -> Self {
        Self {
            theme,
            accent_color: accent_color.into(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Lifecycle of the theme manager's initialization gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitPhase {
    #[default]
    Uninitialized,
    Initializing,
    Ready,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_preference_serializes_with_storage_field_names() {
        let preference = ThemePreference::new(Theme::Dark, "accentA");
        assert_eq!(
            serde_json::to_value(&preference).unwrap(),
            json!({"theme": "DARK", "themeColor": "accentA"})
        );
    }

    #[test]
    fn test_preference_accepts_legacy_ordinals() {
        let dark: ThemePreference =
            serde_json::from_value(json!({"theme": 0, "themeColor": "gold"})).unwrap();
        assert_eq!(dark, ThemePreference::new(Theme::Dark, "gold"));

        let light: ThemePreference = serde_json::from_value(json!({"theme": 1})).unwrap();
        assert_eq!(light, ThemePreference::new(Theme::Light, ""));
    }

    #[test]
    fn test_preference_null_accent_is_empty() {
        let preference: ThemePreference =
            serde_json::from_value(json!({"theme": "LIGHT", "themeColor": null})).unwrap();
        assert_eq!(preference.accent_color, "");
    }

    #[test]
    fn test_preference_rejects_unknown_theme() {
        assert!(serde_json::from_value::<ThemePreference>(json!({"theme": "SEPIA"})).is_err());
        assert!(serde_json::from_value::<ThemePreference>(json!({"theme": 7})).is_err());
    }
}
