//! Theme preference and palettes
//!
//! Two themes are supported, light (the default) and dark. The choice is
//! persisted under [`THEME_KEY`] as a JSON string and exposed to the
//! presentation layer through the `data-theme` attribute value.
//!
//! # Usage
//!
//! ```rust
//! use app_ui::theme::{ThemeName, ThemeState};
//!
//! let mut state = ThemeState::default();
//! assert_eq!(state.data_theme(), "light");
//! assert_eq!(state.toggle_label(), "🌙 Dark");
//!
//! state.toggle();
//! assert_eq!(state.theme_name, ThemeName::Dark);
//! assert_eq!(state.palette.background, "#0B1220");
//! ```

use serde::{Deserialize, Serialize};
use storage::KvStore;
use thiserror::Error;

/// Storage key holding the theme preference
pub const THEME_KEY: &str = "theme";

/// A color represented as a hex string (e.g., "#FFFFFF")
pub type Color = &'static str;

// =============================================================================
// Theme Name
// =============================================================================

/// Error parsing a theme name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown theme: {0}")]
pub struct ParseThemeError(pub String);

/// Theme name enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    /// Light theme
    #[default]
    Light,
    /// Dark theme
    Dark,
}

impl ThemeName {
    /// Value of the `data-theme` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
        }
    }

    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            ThemeName::Light => ThemeName::Dark,
            ThemeName::Dark => ThemeName::Light,
        }
    }
}

impl std::fmt::Display for ThemeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeName::Light => write!(f, "Light"),
            ThemeName::Dark => write!(f, "Dark"),
        }
    }
}

impl std::str::FromStr for ThemeName {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(ThemeName::Light),
            "dark" => Ok(ThemeName::Dark),
            _ => Err(ParseThemeError(s.to_string())),
        }
    }
}

/// Decode a persisted theme value
///
/// Accepts the JSON form (`"dark"`) and a bare legacy value (`dark`).
pub fn parse_stored_theme(raw: &str) -> Option<ThemeName> {
    serde_json::from_str::<ThemeName>(raw)
        .ok()
        .or_else(|| raw.parse().ok())
}

// =============================================================================
// Palettes
// =============================================================================

/// Colors applied by a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemePalette {
    /// Page background
    pub background: Color,
    /// Cards, modal and nav surfaces
    pub surface: Color,
    /// Body text
    pub text: Color,
    /// Accent for buttons and the active tab
    pub primary: Color,
    /// Hairline borders
    pub border: Color,
}

/// Light palette
pub const LIGHT_PALETTE: ThemePalette = ThemePalette {
    background: "#F9FAFB",
    surface: "#FFFFFF",
    text: "#111827",
    primary: "#2563EB",
    border: "#E5E7EB",
};

/// Dark palette
pub const DARK_PALETTE: ThemePalette = ThemePalette {
    background: "#0B1220",
    surface: "#111827",
    text: "#E5E7EB",
    primary: "#60A5FA",
    border: "#1F2937",
};

/// Get the palette for a theme
pub fn get_palette(name: ThemeName) -> ThemePalette {
    match name {
        ThemeName::Light => LIGHT_PALETTE,
        ThemeName::Dark => DARK_PALETTE,
    }
}

// =============================================================================
// Theme State
// =============================================================================

/// Theme provider state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeState {
    /// Current theme name
    pub theme_name: ThemeName,
    /// Palette of the current theme
    pub palette: ThemePalette,
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::new(ThemeName::Light)
    }
}

impl ThemeState {
    /// Create a new theme state with the given theme
    pub fn new(theme_name: ThemeName) -> Self {
        Self { theme_name, palette: get_palette(theme_name) }
    }

    /// Set the current theme
    pub fn set_theme(&mut self, theme_name: ThemeName) {
        self.theme_name = theme_name;
        self.palette = get_palette(theme_name);
    }

    /// Switch to the other theme, returning the new one
    pub fn toggle(&mut self) -> ThemeName {
        self.set_theme(self.theme_name.toggled());
        self.theme_name
    }

    /// Check if the dark theme is active
    pub fn is_dark(&self) -> bool {
        self.theme_name == ThemeName::Dark
    }

    /// Value for the `data-theme` attribute
    pub fn data_theme(&self) -> &'static str {
        self.theme_name.as_str()
    }

    /// Label of the header toggle button
    pub fn toggle_label(&self) -> &'static str {
        match self.theme_name {
            ThemeName::Light => "🌙 Dark",
            ThemeName::Dark => "☀️ Light",
        }
    }

    /// Accessible label of the header toggle button
    pub fn toggle_aria_label(&self) -> String {
        format!("Switch to {} mode", self.theme_name.toggled().as_str())
    }
}

// =============================================================================
// Persistence
// =============================================================================

/// Reads and writes the theme preference
#[derive(Debug, Clone)]
pub struct ThemePreference {
    kv: KvStore,
}

impl ThemePreference {
    /// Create a preference handle over `kv`
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }

    /// Load the saved theme, falling back to light
    pub fn load(&self) -> ThemeName {
        match self.kv.get_raw(THEME_KEY) {
            Ok(Some(raw)) => parse_stored_theme(&raw).unwrap_or_else(|| {
                tracing::warn!("Ignoring malformed theme value: {:?}", raw);
                ThemeName::default()
            }),
            Ok(None) => ThemeName::default(),
            Err(e) => {
                tracing::warn!("Failed to read theme: {}", e);
                ThemeName::default()
            }
        }
    }

    /// Persist `theme`; failures are logged and ignored
    pub fn save(&self, theme: ThemeName) {
        if let Err(e) = self.kv.set(THEME_KEY, &theme) {
            tracing::warn!("Failed to persist theme: {}", e);
        }
    }
}
