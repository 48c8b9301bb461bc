//! Visual theming state for a document session.
//!
//! The theme is independent of the document kind: switching templates keeps
//! the user's colors, font and logo. Every field always holds a value:
//! absent user input maps to the documented defaults below, never to a
//! missing key.

use papier_types::Color;
use serde::{Deserialize, Serialize};

/// Font families offered by the style panel. The first entry is the default.
pub const FONT_CHOICES: &[&str] = &["Inter", "Roboto", "Open Sans", "Montserrat", "Lato"];

/// The complete visual style of a document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StyleConfig {
    /// Hosted URL of the uploaded logo, if any. The core never stores image
    /// bytes here; ingestion returns a stable URL and this is it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub primary_color: Color,
    pub secondary_color: Color,
    pub accent_color: Color,
    pub page_background: Color,
    pub font_family: String,
    /// Base font size in points.
    pub font_size: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            logo_url: None,
            primary_color: Color::rgb(0x10, 0xb9, 0x81),  // green
            secondary_color: Color::rgb(0x1f, 0x29, 0x37), // graphite
            accent_color: Color::rgb(0xf0, 0xf4, 0xf8),    // light table wash
            page_background: Color::WHITE,
            font_family: FONT_CHOICES[0].to_string(),
            font_size: 10.0,
        }
    }
}

/// A partial style update. `None` fields keep their current value, so a
/// patch can never leave the config with a missing entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StylePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_background: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
}

impl StyleConfig {
    /// Applies a partial update in place.
    pub fn apply(&mut self, patch: StylePatch) {
        if let Some(logo) = patch.logo_url {
            self.logo_url = logo;
        }
        if let Some(c) = patch.primary_color {
            self.primary_color = c;
        }
        if let Some(c) = patch.secondary_color {
            self.secondary_color = c;
        }
        if let Some(c) = patch.accent_color {
            self.accent_color = c;
        }
        if let Some(c) = patch.page_background {
            self.page_background = c;
        }
        if let Some(f) = patch.font_family {
            self.font_family = f;
        }
        if let Some(s) = patch.font_size {
            self.font_size = s;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_fully_populated() {
        let style = StyleConfig::default();
        assert_eq!(style.primary_color, Color::rgb(0x10, 0xb9, 0x81));
        assert_eq!(style.page_background, Color::WHITE);
        assert_eq!(style.font_family, "Inter");
        assert_eq!(style.font_size, 10.0);
        assert!(style.logo_url.is_none());
    }

    #[test]
    fn test_patch_only_touches_given_fields() {
        let mut style = StyleConfig::default();
        style.apply(StylePatch {
            primary_color: Some(Color::rgb(1, 2, 3)),
            ..StylePatch::default()
        });
        assert_eq!(style.primary_color, Color::rgb(1, 2, 3));
        assert_eq!(style.secondary_color, StyleConfig::default().secondary_color);
        assert_eq!(style.font_family, "Inter");
    }

    #[test]
    fn test_patch_can_clear_logo() {
        let mut style = StyleConfig::default();
        style.apply(StylePatch {
            logo_url: Some(Some("https://img.example/logo.png".into())),
            ..StylePatch::default()
        });
        assert_eq!(style.logo_url.as_deref(), Some("https://img.example/logo.png"));

        style.apply(StylePatch { logo_url: Some(None), ..StylePatch::default() });
        assert!(style.logo_url.is_none());
    }
}
