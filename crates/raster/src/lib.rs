//! Software rasterizer for scenes.
//!
//! Turns the unscaled visual tree into a fixed-resolution RGBA surface at
//! an integer oversampling factor, and encodes the result as a lossless
//! PNG. The raster (not the scene) is what ends up embedded in the
//! exported page, so everything here must be deterministic for a given
//! scene, font set, and resource store.

mod glyph;
mod paint;
mod pixmap;

pub use pixmap::Pixmap;

use paint::Painter;
use papier_layout::FontLibrary;
use papier_scene::Scene;
use papier_traits::ResourceProvider;
use std::io::Cursor;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("Oversampling factor must be at least 1")]
    InvalidOversampling,

    #[error("Scene has a degenerate size {width}x{height}")]
    InvalidSurface { width: f32, height: f32 },

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// Rasterizes scenes against a fixed font library and resource store.
pub struct Rasterizer {
    fonts: FontLibrary,
    resources: Arc<dyn ResourceProvider>,
}

impl Rasterizer {
    pub fn new(fonts: FontLibrary, resources: Arc<dyn ResourceProvider>) -> Self {
        Self { fonts, resources }
    }

    /// Renders `scene` at `oversampling` device pixels per scene unit.
    /// The background is forced opaque white before the scene paints.
    pub fn rasterize(&self, scene: &Scene, oversampling: u32) -> Result<Pixmap, RasterError> {
        if oversampling == 0 {
            return Err(RasterError::InvalidOversampling);
        }
        if scene.size.width <= 0.0 || scene.size.height <= 0.0 {
            return Err(RasterError::InvalidSurface {
                width: scene.size.width,
                height: scene.size.height,
            });
        }

        let width = (scene.size.width * oversampling as f32).round() as u32;
        let height = (scene.size.height * oversampling as f32).round() as u32;
        log::debug!(
            "Rasterizing {}x{} scene at {}x -> {}x{} px",
            scene.size.width,
            scene.size.height,
            oversampling,
            width,
            height
        );

        let mut pixmap = Pixmap::white(width, height);
        Painter {
            fonts: &self.fonts,
            resources: self.resources.as_ref(),
            scale: oversampling as f32,
        }
        .paint(scene, &mut pixmap);
        Ok(pixmap)
    }

    /// Encodes the raster as PNG. The surface is opaque by construction,
    /// so the encoding drops the alpha channel.
    pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, RasterError> {
        let mut rgb = Vec::with_capacity((pixmap.width() * pixmap.height() * 3) as usize);
        for px in pixmap.data().chunks_exact(4) {
            rgb.extend_from_slice(&px[..3]);
        }
        let buffer = image::RgbImage::from_raw(pixmap.width(), pixmap.height(), rgb)
            .ok_or_else(|| RasterError::Encode("pixel buffer size mismatch".to_string()))?;

        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(buffer)
            .write_to(&mut out, image::ImageFormat::Png)
            .map_err(|e| RasterError::Encode(e.to_string()))?;
        Ok(out.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use papier_scene::{Scene, TextStyle};
    use papier_traits::InMemoryResourceProvider;
    use papier_types::{Color, Rect, Size};

    fn rasterizer() -> Rasterizer {
        Rasterizer::new(FontLibrary::new(), Arc::new(InMemoryResourceProvider::new()))
    }

    fn small_scene() -> Scene {
        let mut scene = Scene::page(Color::WHITE);
        scene.size = Size::new(40.0, 30.0);
        scene
    }

    #[test]
    fn test_oversampling_multiplies_dimensions() {
        let scene = small_scene();
        let r = rasterizer();
        let pm = r.rasterize(&scene, 3).unwrap();
        assert_eq!((pm.width(), pm.height()), (120, 90));
    }

    #[test]
    fn test_zero_oversampling_is_rejected() {
        let r = rasterizer();
        assert!(matches!(
            r.rasterize(&small_scene(), 0),
            Err(RasterError::InvalidOversampling)
        ));
    }

    #[test]
    fn test_translucent_background_stays_opaque_over_white() {
        let mut scene = small_scene();
        scene.background = Color::BLACK.with_alpha(0.5);
        let pm = rasterizer().rasterize(&scene, 1).unwrap();
        let (r, _, _, a) = pm.get(10, 10);
        assert!(r.abs_diff(127) <= 1);
        assert_eq!(a, 0xff);
    }

    #[test]
    fn test_fill_lands_scaled() {
        let mut scene = small_scene();
        scene.push_fill(Rect::new(10.0, 10.0, 5.0, 5.0), Color::BLACK);
        let pm = rasterizer().rasterize(&scene, 2).unwrap();
        assert_eq!(pm.get(25, 25).0, 0);
        assert_eq!(pm.get(5, 5).0, 0xff);
    }

    #[test]
    fn test_missing_font_or_image_does_not_fail_rasterization() {
        let mut scene = small_scene();
        scene.push_text(
            Rect::new(0.0, 0.0, 40.0, 15.0),
            "texte",
            TextStyle::new("Inter", 10.0, Color::BLACK),
        );
        scene.push(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            papier_scene::Element::Image(papier_scene::ImageElement {
                src: "https://nowhere.example/logo.png".to_string(),
                fit: papier_scene::ImageFit::Contain,
                rounded: false,
            }),
        );
        // Empty font library and empty resource store: both elements
        // degrade, the surface still comes out.
        assert!(rasterizer().rasterize(&scene, 1).is_ok());
    }

    #[test]
    fn test_png_round_trip_dimensions() {
        let scene = small_scene();
        let pm = rasterizer().rasterize(&scene, 2).unwrap();
        let png = Rasterizer::encode_png(&pm).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
        assert_eq!((decoded.width(), decoded.height()), (80, 60));
    }

    #[test]
    fn test_logo_bytes_are_painted() {
        // A 2x2 all-red PNG, generated through the same image crate.
        let mut red = image::RgbImage::new(2, 2);
        for p in red.pixels_mut() {
            *p = image::Rgb([255, 0, 0]);
        }
        let mut png = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(red)
            .write_to(&mut png, image::ImageFormat::Png)
            .unwrap();

        let store = InMemoryResourceProvider::new();
        store.add("logo.png", png.into_inner()).unwrap();

        let mut scene = small_scene();
        scene.push(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            papier_scene::Element::Image(papier_scene::ImageElement {
                src: "logo.png".to_string(),
                fit: papier_scene::ImageFit::Cover,
                rounded: false,
            }),
        );

        let r = Rasterizer::new(FontLibrary::new(), Arc::new(store));
        let pm = r.rasterize(&scene, 1).unwrap();
        let (red_ch, green_ch, ..) = pm.get(5, 5);
        assert!(red_ch > 200 && green_ch < 60);
    }
}
