//! Menu configuration, fixed at construction time.

use serde::{Deserialize, Serialize};

use padui_theme::palette::DEFAULT_ACCENT_HEX;

/// Top-level layout mode of a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuStyle {
    /// Vertically stacked items with icons and hover highlights.
    Menu,
    /// Vertically stacked, centered title lines.
    Title,
    /// Free-floating, edge-anchored items.
    Absolute,
    /// Single-item carousel with navigation and confirm/cancel buttons.
    List,
}

/// Construction-time menu configuration.
///
/// There is no runtime reconfiguration; state that changes after
/// construction (hover, pressed, list index, suspension) lives on the menu
/// itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Logical surface size (the surface is square).
    pub size: u32,
    /// Scale factor applied to every length and font size.
    pub scale: f64,
    /// Font family for menu text. `None` uses the backend's default family.
    pub font: Option<String>,
    /// Layout mode.
    pub style: MenuStyle,
    /// Accent color as a hex string, e.g. `#1E88E5`.
    pub theme: String,
    /// Menu title, drawn when no title logo is set.
    pub title: Option<String>,
    /// Asset key of the title logo.
    pub title_logo: Option<String>,
    /// Label of the list-style cancel button.
    pub cancel_text: String,
    /// Label of the list-style confirm button.
    pub confirm_text: String,
    /// Footer line, centered at the bottom.
    pub footer: Option<String>,
    /// Sub-footer line above the footer, with an optional hot region.
    pub sub_footer: Option<String>,
    /// Inner padding of stacked items, in logical pixels.
    pub item_padding: f64,
    /// Vertical gap between the title band and the list body, in logical
    /// pixels.
    pub list_item_padding: f64,
    /// Whether to draw the pointer cursor overlay.
    pub show_cursor: bool,
    /// Initial carousel index for the list style.
    pub initial_index: usize,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            size: 320,
            scale: 1.0,
            font: None,
            style: MenuStyle::Menu,
            theme: DEFAULT_ACCENT_HEX.to_string(),
            title: None,
            title_logo: None,
            cancel_text: "Cancel".to_string(),
            confirm_text: "Confirm".to_string(),
            footer: None,
            sub_footer: None,
            item_padding: 1.0,
            list_item_padding: 48.0,
            show_cursor: true,
            initial_index: 0,
        }
    }
}

impl MenuConfig {
    /// The device-pixel size of the surface.
    pub fn scaled_size(&self) -> f64 {
        f64::from(self.size) * self.scale
    }

    /// Sets the layout mode and returns the configuration.
    pub fn with_style(mut self, style: MenuStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the title and returns the configuration.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the title logo asset key and returns the configuration.
    pub fn with_title_logo(mut self, key: impl Into<String>) -> Self {
        self.title_logo = Some(key.into());
        self
    }

    /// Sets the accent color hex string and returns the configuration.
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    /// Sets the footer line and returns the configuration.
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Sets the sub-footer line and returns the configuration.
    pub fn with_sub_footer(mut self, sub_footer: impl Into<String>) -> Self {
        self.sub_footer = Some(sub_footer.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = MenuConfig::default();
        assert_eq!(config.size, 320);
        assert_eq!(config.scale, 1.0);
        assert_eq!(config.style, MenuStyle::Menu);
        assert_eq!(config.theme, "#1E88E5");
        assert_eq!(config.item_padding, 1.0);
        assert_eq!(config.list_item_padding, 48.0);
        assert!(config.show_cursor);
        assert_eq!(config.scaled_size(), 320.0);
    }

    #[test]
    fn test_config_toml_round_trip() {
        let config = MenuConfig::default()
            .with_style(MenuStyle::List)
            .with_theme("#4CAF50")
            .with_title("Settings");

        let encoded = toml::to_string(&config).unwrap();
        let decoded: MenuConfig = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded.style, MenuStyle::List);
        assert_eq!(decoded.theme, "#4CAF50");
        assert_eq!(decoded.title.as_deref(), Some("Settings"));
    }
}
