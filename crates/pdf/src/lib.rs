//! Single-page PDF composition.
//!
//! The exported document is exactly one physical A4 page (210x297 mm)
//! carrying one full-bleed raster. The raster's pixel aspect ratio is
//! chosen upstream to match the page's physical aspect ratio, so the
//! embed is a plain scale with no letterboxing logic.

use chrono::NaiveDate;
use printpdf::ops::Op;
use printpdf::xobject::{XObject, XObjectTransform};
use printpdf::{Mm, PdfDocument, PdfPage, PdfSaveOptions, Pt, XObjectId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("Failed to decode page raster: {0}")]
    BadRaster(String),

    #[error("Page raster has zero dimensions")]
    EmptyRaster,
}

/// A4 portrait in millimeters.
pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// Embeds an encoded PNG as the sole, full-bleed content of a one-page A4
/// document and returns the serialized PDF bytes.
pub fn compose_single_page(png: &[u8], title: &str) -> Result<Vec<u8>, ComposeError> {
    let mut warnings = Vec::new();
    let raw_image = printpdf::image::RawImage::decode_from_bytes(png, &mut warnings)
        .map_err(|e| ComposeError::BadRaster(format!("{}", e)))?;
    if raw_image.width == 0 || raw_image.height == 0 {
        return Err(ComposeError::EmptyRaster);
    }

    let mut doc = PdfDocument::new(title);

    let xobj_id = XObjectId::new();
    let (img_w, img_h) = (raw_image.width as f32, raw_image.height as f32);
    doc.resources
        .xobjects
        .map
        .insert(xobj_id.clone(), XObject::Image(raw_image));

    // At dpi 72 one image pixel maps to one point, so scaling the XObject
    // by page/image stretches the raster edge-to-edge.
    let page_w_pt = Mm(A4_WIDTH_MM).into_pt().0;
    let page_h_pt = Mm(A4_HEIGHT_MM).into_pt().0;
    let transform = XObjectTransform {
        translate_x: Some(Pt(0.0)),
        translate_y: Some(Pt(0.0)),
        scale_x: Some(page_w_pt / img_w),
        scale_y: Some(page_h_pt / img_h),
        rotate: None,
        dpi: Some(72.0),
    };

    let ops = vec![Op::UseXobject { id: xobj_id, transform }];
    let page = PdfPage::new(Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), ops);
    doc.pages.push(page);

    let mut bytes = Vec::new();
    doc.save_writer(&mut bytes, &PdfSaveOptions::default(), &mut warnings);
    for warning in &warnings {
        log::debug!("printpdf: {:?}", warning);
    }
    log::info!("Composed single-page A4 document ({} bytes)", bytes.len());
    Ok(bytes)
}

/// Builds the download filename: `{kind}_{sanitized label}_{date}.pdf`.
/// The label cleaner lowercases and squashes anything non-alphanumeric to
/// underscores.
pub fn export_filename(kind_id: &str, label: &str, date: NaiveDate) -> String {
    format!(
        "{}_{}_{}.pdf",
        kind_id,
        sanitize_label(label),
        date.format("%Y-%m-%d")
    )
}

fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn tiny_png(width: u32, height: u32) -> Vec<u8> {
        let buffer = image::RgbImage::from_pixel(width, height, image::Rgb([10, 20, 30]));
        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(buffer)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_compose_produces_exactly_one_a4_page() {
        let pdf_bytes = compose_single_page(&tiny_png(794, 1123), "Facture").unwrap();
        let doc = lopdf::Document::load_mem(&pdf_bytes).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 1);

        let page_id = *pages.get(&1).unwrap();
        let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
        let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
        let dims: Vec<f32> = media_box
            .iter()
            .map(|o| match o {
                lopdf::Object::Integer(i) => *i as f32,
                lopdf::Object::Real(r) => *r,
                _ => f32::NAN,
            })
            .collect();
        // 210x297 mm in points.
        assert!((dims[2] - 595.276).abs() < 0.5, "width was {}", dims[2]);
        assert!((dims[3] - 841.89).abs() < 0.5, "height was {}", dims[3]);
    }

    #[test]
    fn test_compose_embeds_an_image_xobject() {
        let pdf_bytes = compose_single_page(&tiny_png(20, 30), "Devis").unwrap();
        let doc = lopdf::Document::load_mem(&pdf_bytes).unwrap();
        let has_image = doc.objects.values().any(|obj| {
            obj.as_stream()
                .ok()
                .and_then(|s| s.dict.get(b"Subtype").ok())
                .and_then(|st| st.as_name().ok())
                .is_some_and(|name| name == b"Image".as_slice())
        });
        assert!(has_image, "no image XObject found in the produced PDF");
    }

    #[test]
    fn test_compose_rejects_garbage() {
        assert!(matches!(
            compose_single_page(b"not a png", "x"),
            Err(ComposeError::BadRaster(_))
        ));
    }

    #[test]
    fn test_export_filename_pattern() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(
            export_filename("facture", "Facture Simple", date),
            "facture_facture_simple_2024-03-05.pdf"
        );
        // Accented characters squash to underscores like the original
        // cleaner did.
        assert_eq!(
            export_filename("attestation", "Attestation Générique", date),
            "attestation_attestation_g_n_rique_2024-03-05.pdf"
        );
    }
}
