//! FontProvider trait for abstracting font loading.
//!
//! The layout engine asks for font bytes by family/weight/style and does not
//! care where they come from. Native builds usually layer system-font
//! discovery on top; constrained environments inject fonts through this
//! trait instead.

use papier_style::{FontStyle, FontWeight};
use std::sync::Arc;
use thiserror::Error;

/// Shared font data type (reference-counted raw TTF/OTF bytes).
pub type SharedFontData = Arc<Vec<u8>>;

#[derive(Error, Debug, Clone)]
pub enum FontError {
    #[error("No font found for family '{family}' ({weight:?}, {style:?})")]
    NotFound {
        family: String,
        weight: FontWeight,
        style: FontStyle,
    },

    #[error("Failed to load font '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Invalid font data: {0}")]
    InvalidData(String),
}

/// A font lookup request.
#[derive(Debug, Clone)]
pub struct FontQuery {
    pub family: String,
    pub weight: FontWeight,
    pub style: FontStyle,
    pub fallbacks: Vec<String>,
}

impl FontQuery {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            weight: FontWeight::Regular,
            style: FontStyle::Normal,
            fallbacks: Vec::new(),
        }
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_fallbacks(mut self, fallbacks: &[&str]) -> Self {
        self.fallbacks = fallbacks.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// A source of raw font bytes.
pub trait FontProvider: Send + Sync {
    /// Resolve a query to font bytes. Implementations should consult the
    /// query's fallback families before giving up.
    fn load_font(&self, query: &FontQuery) -> Result<SharedFontData, FontError>;
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct FontKey {
    family: String,
    weight: u16,
    italic: bool,
}

impl FontKey {
    fn new(family: &str, weight: FontWeight, style: FontStyle) -> Self {
        Self {
            family: family.to_lowercase(),
            weight: weight.numeric_value(),
            italic: !matches!(style, FontStyle::Normal),
        }
    }
}

/// A font provider backed by pre-registered in-memory fonts.
#[derive(Default)]
pub struct InMemoryFontProvider {
    fonts: std::sync::RwLock<std::collections::HashMap<FontKey, SharedFontData>>,
}

impl InMemoryFontProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register font bytes under a (family, weight, style) key.
    ///
    /// # Errors
    ///
    /// Returns `FontError::LoadFailed` if the internal lock is poisoned.
    pub fn add_font(
        &self,
        family: impl Into<String>,
        weight: FontWeight,
        style: FontStyle,
        data: Vec<u8>,
    ) -> Result<(), FontError> {
        let family = family.into();
        let mut fonts = self.fonts.write().map_err(|_| FontError::LoadFailed {
            path: family.clone(),
            message: "font store lock poisoned".to_string(),
        })?;
        fonts.insert(FontKey::new(&family, weight, style), Arc::new(data));
        Ok(())
    }
}

impl FontProvider for InMemoryFontProvider {
    fn load_font(&self, query: &FontQuery) -> Result<SharedFontData, FontError> {
        let fonts = self.fonts.read().map_err(|_| FontError::LoadFailed {
            path: query.family.clone(),
            message: "font store lock poisoned".to_string(),
        })?;

        let families = std::iter::once(query.family.as_str())
            .chain(query.fallbacks.iter().map(|s| s.as_str()));
        for family in families {
            if let Some(data) = fonts.get(&FontKey::new(family, query.weight, query.style)) {
                return Ok(data.clone());
            }
        }

        Err(FontError::NotFound {
            family: query.family.clone(),
            weight: query.weight,
            style: query.style,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_provider_resolves_exact_match() {
        let provider = InMemoryFontProvider::new();
        provider
            .add_font("Inter", FontWeight::Regular, FontStyle::Normal, vec![0, 1])
            .unwrap();

        let data = provider
            .load_font(&FontQuery::new("Inter"))
            .unwrap();
        assert_eq!(&*data, &[0, 1]);
    }

    #[test]
    fn test_in_memory_provider_uses_fallbacks() {
        let provider = InMemoryFontProvider::new();
        provider
            .add_font("Fallback Sans", FontWeight::Regular, FontStyle::Normal, vec![7])
            .unwrap();

        let query = FontQuery::new("Missing Family").with_fallbacks(&["Fallback Sans"]);
        assert_eq!(&*provider.load_font(&query).unwrap(), &[7]);
    }

    #[test]
    fn test_in_memory_provider_weight_mismatch_is_not_found() {
        let provider = InMemoryFontProvider::new();
        provider
            .add_font("Inter", FontWeight::Regular, FontStyle::Normal, vec![0])
            .unwrap();

        let query = FontQuery::new("Inter").with_weight(FontWeight::Bold);
        assert!(matches!(
            provider.load_font(&query),
            Err(FontError::NotFound { .. })
        ));
    }
}
