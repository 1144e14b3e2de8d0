//! YAML configuration loader for UI labels and themes.
use std::sync::LazyLock;

use serde::Deserialize;
use std::collections::HashMap;

// ============================================================================
// UI Labels
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct UiConfig {
    pub title: String,
    pub controls: ControlLabels,
    pub grid: GridLabels,
    pub modal: ModalLabels,
    pub preview: PreviewLabels,
}

#[derive(Debug, Deserialize)]
pub struct ControlLabels {
    pub rows: String,
    pub cols: String,
    pub generate_grid: String,
    pub generate_config: String,
}

#[derive(Debug, Deserialize)]
pub struct GridLabels {
    pub empty: String,
    pub no_icon: String,
    pub has_icon: String,
}

#[derive(Debug, Deserialize)]
pub struct ModalLabels {
    pub title: String,
    pub icon: String,
    pub icon_hint: String,
    pub command: String,
    pub args: String,
    pub save: String,
    pub cancel: String,
    pub loading: String,
}

#[derive(Debug, Deserialize)]
pub struct PreviewLabels {
    pub command: String,
    pub args: String,
    pub missing: String,
}

// ============================================================================
// Theme Configuration
// ============================================================================

#[derive(Debug, Deserialize, Clone)]
pub struct ThemesConfig {
    pub themes: HashMap<String, Theme>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Theme {
    pub name: String,
    pub description: String,
    pub cell: CellGlyphs,
    pub colors: ThemeColors,
}

/// Glyphs drawn inside a grid cell to hint at its content.
#[derive(Debug, Deserialize, Clone)]
pub struct CellGlyphs {
    pub empty: String,
    pub icon: String,
    pub command: String,
}

/// RGB color as [r, g, b] array
pub type RgbColor = [u8; 3];

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeColors {
    pub accent: RgbColor,
    pub accent_dim: RgbColor,
    pub success: RgbColor,
    pub warning: RgbColor,
    pub error: RgbColor,
    pub text: RgbColor,
    pub text_secondary: RgbColor,
    pub text_muted: RgbColor,
    pub bg_base: RgbColor,
    pub bg_surface: RgbColor,
    pub bg_elevated: RgbColor,
    pub border: RgbColor,
    pub border_muted: RgbColor,
}

/// Default theme ID
pub const DEFAULT_THEME: &str = "slate";

/// Available theme IDs in display order
pub const THEME_ORDER: &[&str] = &["slate", "ember", "paper"];

// ============================================================================
// Loading Functions
// ============================================================================

fn parse_yaml<T: for<'de> Deserialize<'de>>(name: &str, content: &str) -> T {
    serde_yaml::from_str(content).unwrap_or_else(|e| panic!("Failed to parse {}: {}", name, e))
}

// ============================================================================
// Global Configuration (embedded at compile time)
// ============================================================================

pub static UI: LazyLock<UiConfig> = LazyLock::new(|| parse_yaml("ui.yaml", include_str!("../../../../yamls/ui.yaml")));
pub static THEMES: LazyLock<ThemesConfig> =
    LazyLock::new(|| parse_yaml("themes.yaml", include_str!("../../../../yamls/themes.yaml")));

/// Get a theme by ID, falling back to default if not found
pub fn get_theme(theme_id: &str) -> &'static Theme {
    THEMES.themes.get(theme_id).or_else(|| THEMES.themes.get(DEFAULT_THEME)).expect("Default theme must exist")
}

// ============================================================================
// Active Theme (set once at startup, read on every render)
// ============================================================================

use std::sync::atomic::{AtomicPtr, Ordering};

/// Cached pointer to the active theme. Updated by set_active_theme().
/// Points into the static THEMES LazyLock, so the reference is always valid.
static CACHED_THEME: AtomicPtr<Theme> = AtomicPtr::new(std::ptr::null_mut());

/// Set the active theme ID. Unknown IDs fall back to the default theme.
pub fn set_active_theme(theme_id: &str) {
    let theme: &'static Theme = get_theme(theme_id);
    CACHED_THEME.store(theme as *const Theme as *mut Theme, Ordering::Release);
}

/// Get the currently active theme
pub fn active_theme() -> &'static Theme {
    let ptr = CACHED_THEME.load(Ordering::Acquire);
    if !ptr.is_null() {
        // SAFETY: ptr was set from a &'static Theme reference stored in LazyLock THEMES.
        // The Theme data is never mutated or freed after initialization.
        unsafe { &*ptr }
    } else {
        let theme = get_theme(DEFAULT_THEME);
        CACHED_THEME.store(theme as *const Theme as *mut Theme, Ordering::Release);
        theme
    }
}

// =============================================================================
// THEME COLORS (loaded from active theme in yamls/themes.yaml)
// =============================================================================

pub mod theme {
    use crate::config::active_theme;
    use ratatui::style::Color;

    fn rgb(c: [u8; 3]) -> Color {
        Color::Rgb(c[0], c[1], c[2])
    }

    pub fn accent() -> Color {
        rgb(active_theme().colors.accent)
    }
    pub fn accent_dim() -> Color {
        rgb(active_theme().colors.accent_dim)
    }
    pub fn success() -> Color {
        rgb(active_theme().colors.success)
    }
    pub fn warning() -> Color {
        rgb(active_theme().colors.warning)
    }
    pub fn error() -> Color {
        rgb(active_theme().colors.error)
    }
    pub fn text() -> Color {
        rgb(active_theme().colors.text)
    }
    pub fn text_secondary() -> Color {
        rgb(active_theme().colors.text_secondary)
    }
    pub fn text_muted() -> Color {
        rgb(active_theme().colors.text_muted)
    }
    pub fn bg_base() -> Color {
        rgb(active_theme().colors.bg_base)
    }
    pub fn bg_surface() -> Color {
        rgb(active_theme().colors.bg_surface)
    }
    pub fn bg_elevated() -> Color {
        rgb(active_theme().colors.bg_elevated)
    }
    pub fn border() -> Color {
        rgb(active_theme().colors.border)
    }
    pub fn border_muted() -> Color {
        rgb(active_theme().colors.border_muted)
    }
}

// =============================================================================
// UI CHARACTERS
// =============================================================================

pub mod chars {
    pub const HORIZONTAL: &str = "─";
    pub const ARROW_RIGHT: &str = "▸";
    pub const CURSOR: &str = "▏";
    pub const CHECK: &str = "✓";
    pub const CROSS: &str = "✗";
}

// =============================================================================
// LABELS (loaded from yamls/ui.yaml)
// =============================================================================

pub mod labels {
    use crate::config::{UI, active_theme};

    pub fn title() -> &'static str {
        &UI.title
    }
    pub fn controls() -> &'static crate::config::ControlLabels {
        &UI.controls
    }
    pub fn grid() -> &'static crate::config::GridLabels {
        &UI.grid
    }
    pub fn modal() -> &'static crate::config::ModalLabels {
        &UI.modal
    }
    pub fn preview() -> &'static crate::config::PreviewLabels {
        &UI.preview
    }
    pub fn cell_glyphs() -> &'static crate::config::CellGlyphs {
        &active_theme().cell
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_theme_exists() {
        for id in THEME_ORDER {
            assert!(THEMES.themes.contains_key(*id), "theme {} missing from themes.yaml", id);
        }
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let theme = get_theme("does-not-exist");
        assert_eq!(theme.name, get_theme(DEFAULT_THEME).name);
    }

    #[test]
    fn ui_labels_parse() {
        assert!(!UI.title.is_empty());
        assert_eq!(UI.modal.save, "Save");
        assert_eq!(UI.preview.missing, "N/A");
    }
}
