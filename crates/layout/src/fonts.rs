//! Font library for layout measurement and rasterization.
//!
//! The library can operate in two modes:
//! - **System fonts mode** (feature: `system-fonts`): uses fontdb discovery
//! - **Provider mode**: uses an injected `FontProvider` for custom loading
//!
//! Fonts from an external provider take precedence over system fonts. When
//! neither source can satisfy a query the caller falls back to synthetic
//! metrics, so layout stays deterministic on fontless hosts.

use papier_style::{FontStyle, FontWeight};
use papier_traits::{FontProvider, FontQuery, SharedFontData};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// A thread-safe handle to raw font data.
pub struct FontInstance {
    pub data: Arc<Vec<u8>>,
}

impl std::fmt::Debug for FontInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontInstance")
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl FontInstance {
    pub fn new(data: Arc<Vec<u8>>) -> Self {
        Self { data }
    }

    /// Creates a lightweight Face view over the font data.
    /// This is cheap (parsing the header) and avoids self-referential
    /// struct issues.
    pub fn as_face(&self) -> Option<rustybuzz::Face<'_>> {
        rustybuzz::Face::from_slice(&self.data, 0)
    }
}

pub type FontData = Arc<FontInstance>;

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct FontCacheKey {
    family: String,
    weight: u16,
    style: u8, // 0=Normal, 1=Italic, 2=Oblique
}

impl FontCacheKey {
    fn new(family: &str, weight: FontWeight, style: FontStyle) -> Self {
        Self {
            family: family.to_lowercase(),
            weight: weight.numeric_value(),
            style: style_to_u8(style),
        }
    }
}

fn style_to_u8(s: FontStyle) -> u8 {
    match s {
        FontStyle::Normal => 0,
        FontStyle::Italic => 1,
        FontStyle::Oblique => 2,
    }
}

/// Shared, cached access to font binaries by (family, weight, style).
#[derive(Clone)]
pub struct FontLibrary {
    #[cfg(feature = "system-fonts")]
    db: Arc<RwLock<fontdb::Database>>,

    external_provider: Option<Arc<dyn FontProvider>>,

    cache: Arc<RwLock<HashMap<FontCacheKey, Option<FontData>>>>,
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl FontLibrary {
    /// Creates an empty library. Call `with_system_fonts(true)` or attach a
    /// provider before resolving.
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "system-fonts")]
            db: Arc::new(RwLock::new(fontdb::Database::new())),
            external_provider: None,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a font library using only the provided `FontProvider`.
    pub fn from_provider(provider: Arc<dyn FontProvider>) -> Self {
        Self::new().with_provider(provider)
    }

    /// Adds an external font provider. Provider fonts take precedence over
    /// system fonts.
    pub fn with_provider(mut self, provider: Arc<dyn FontProvider>) -> Self {
        self.external_provider = Some(provider);
        self
    }

    /// Enables system font discovery (native platforms only).
    #[cfg(feature = "system-fonts")]
    pub fn with_system_fonts(self, enable: bool) -> Self {
        if enable && let Ok(mut db) = self.db.write() {
            db.load_system_fonts();
        }
        self
    }

    /// Adds raw font data to the fontdb database.
    #[cfg(feature = "system-fonts")]
    pub fn add_font_data(&self, data: Vec<u8>) {
        log::debug!("add_font_data called with {} bytes", data.len());
        if let Ok(mut db) = self.db.write() {
            db.load_font_data(data);
        }
    }

    /// Resolves the font for a family/weight/style triple.
    ///
    /// Resolution order: external provider first, then fontdb (with a
    /// sans-serif fallback query). Failed lookups are cached too so a
    /// fontless host does not re-query per glyph run.
    pub fn resolve(&self, family: &str, weight: FontWeight, style: FontStyle) -> Option<FontData> {
        let cache_key = FontCacheKey::new(family, weight, style);

        if let Ok(cache) = self.cache.read()
            && let Some(hit) = cache.get(&cache_key)
        {
            return hit.clone();
        }

        let resolved = self.resolve_uncached(family, weight, style);
        if resolved.is_none() {
            log::warn!(
                "No font for family='{}' weight={:?} style={:?}; layout falls back to synthetic metrics",
                family,
                weight,
                style
            );
        }
        if let Ok(mut cache) = self.cache.write() {
            cache.insert(cache_key, resolved.clone());
        }
        resolved
    }

    fn resolve_uncached(
        &self,
        family: &str,
        weight: FontWeight,
        style: FontStyle,
    ) -> Option<FontData> {
        if let Some(ref provider) = self.external_provider {
            let query = FontQuery::new(family)
                .with_weight(weight)
                .with_style(style)
                .with_fallbacks(&["sans-serif"]);
            match provider.load_font(&query) {
                Ok(bytes) => {
                    log::debug!("Font '{}' ({:?}) resolved via provider", family, weight);
                    return Some(Arc::new(FontInstance::new(bytes)));
                }
                Err(e) => log::debug!("Provider miss for '{}': {}", family, e),
            }
        }

        #[cfg(feature = "system-fonts")]
        {
            self.resolve_from_fontdb(family, weight, style)
        }
        #[cfg(not(feature = "system-fonts"))]
        {
            None
        }
    }

    #[cfg(feature = "system-fonts")]
    fn resolve_from_fontdb(
        &self,
        family: &str,
        weight: FontWeight,
        style: FontStyle,
    ) -> Option<FontData> {
        let fontdb_weight = fontdb::Weight(weight.numeric_value());
        let fontdb_style = match style {
            FontStyle::Normal => fontdb::Style::Normal,
            FontStyle::Italic => fontdb::Style::Italic,
            FontStyle::Oblique => fontdb::Style::Oblique,
        };

        let db = self.db.read().ok()?;
        let id = db
            .query(&fontdb::Query {
                families: &[fontdb::Family::Name(family), fontdb::Family::SansSerif],
                weight: fontdb_weight,
                stretch: fontdb::Stretch::Normal,
                style: fontdb_style,
            })
            .or_else(|| {
                db.query(&fontdb::Query {
                    families: &[fontdb::Family::SansSerif],
                    weight: fontdb_weight,
                    stretch: fontdb::Stretch::Normal,
                    style: fontdb_style,
                })
            })?;

        let face_info = db.face(id)?;
        log::debug!(
            "Font '{}' ({:?}) resolved via fontdb: {:?}",
            family,
            weight,
            face_info.post_script_name
        );

        let bytes: SharedFontData = match &face_info.source {
            fontdb::Source::Binary(data) => Arc::new(data.as_ref().as_ref().to_vec()),
            fontdb::Source::File(path) => match std::fs::read(path) {
                Ok(data) => Arc::new(data),
                Err(e) => {
                    log::warn!("Failed to read font file {}: {}", path.display(), e);
                    return None;
                }
            },
            _ => return None,
        };

        Some(Arc::new(FontInstance::new(bytes)))
    }

    /// True when at least one face is available from any source.
    pub fn has_any_font(&self) -> bool {
        if self.external_provider.is_some() {
            return true;
        }
        #[cfg(feature = "system-fonts")]
        {
            self.db
                .read()
                .map(|db| db.faces().next().is_some())
                .unwrap_or(false)
        }
        #[cfg(not(feature = "system-fonts"))]
        {
            false
        }
    }
}

impl std::fmt::Debug for FontLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontLibrary")
            .field("has_provider", &self.external_provider.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_normalizes_family_case() {
        let key1 = FontCacheKey::new("Inter", FontWeight::Bold, FontStyle::Normal);
        let key2 = FontCacheKey::new("inter", FontWeight::Bold, FontStyle::Normal);
        let key3 = FontCacheKey::new("Inter", FontWeight::Regular, FontStyle::Normal);

        assert_eq!(key1, key2);
        assert_ne!(key1, key3);
    }

    #[test]
    fn test_empty_library_resolves_nothing() {
        let library = FontLibrary::new();
        assert!(library
            .resolve("Inter", FontWeight::Regular, FontStyle::Normal)
            .is_none());
        // The miss is cached; a second lookup takes the fast path.
        assert!(library
            .resolve("Inter", FontWeight::Regular, FontStyle::Normal)
            .is_none());
    }
}
