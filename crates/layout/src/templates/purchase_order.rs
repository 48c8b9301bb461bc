//! Purchase order template ("Bon de Commande").
//!
//! Item lines use the `description: price` convention; quantities are
//! always 1 and amounts are tax-exclusive throughout.

use super::{Canvas, TextStyleExt, gray, text_or};
use crate::compute::{format_date_fr, format_date_fr_or, format_eur, non_empty_lines, parse_order_item};
use crate::fonts::FontLibrary;
use papier_scene::{ImageFit, PAGE_HEIGHT, PAGE_WIDTH, Scene};
use papier_schema::DocumentData;
use papier_style::{FontWeight, StyleConfig};
use papier_types::{Color, Rect};

const MARGIN: f32 = 32.0;

const ITEMS_PLACEHOLDER: &str = "Description des articles...\nArticle 1: 100\nArticle 2: 50";

pub fn render(data: &DocumentData, theme: &StyleConfig, fonts: &FontLibrary) -> Scene {
    let mut c = Canvas::new(theme, fonts);
    let left = MARGIN;
    let right = PAGE_WIDTH - MARGIN;
    let content_width = right - left;
    let primary = theme.primary_color;
    let secondary = theme.secondary_color;

    let company_name = text_or(data, "companyName", "Votre Entreprise");
    let company_address = text_or(data, "companyAddress", "Votre Adresse");
    let company_siret = text_or(data, "companySiret", "000 000 000 00000");

    // --- Header ---
    let mut y = MARGIN;
    if let Some(logo) = &theme.logo_url {
        c.image(Rect::new(left, y, 150.0, 80.0), logo, ImageFit::Contain, false);
        y += 80.0 + 8.0;
    }
    c.text(left, y, company_name, c.ts(1.0).bold());
    y += c.ts(1.0).line_height;
    y += c.wrapped(left, y, content_width * 0.45, company_address, c.ts(0.75));
    c.text(left, y, &format!("SIRET: {}", company_siret), c.ts(0.75));
    let left_bottom = y + c.ts(0.75).line_height;

    let mut ry = MARGIN;
    let title_style = c.ts(1.875).weight(FontWeight::ExtraBold).color(primary);
    c.text_right(right, ry, "BON DE COMMANDE", title_style.clone());
    ry += title_style.line_height + 4.0;

    let number = text_or(data, "orderNumber", "BC-XXXX");
    let number_style = c.ts(0.875).bold().color(primary);
    let prefix_style = c.ts(0.875).bold();
    let number_width = c.measurer().measure(number, &number_style);
    let prefix_width = c.measurer().measure("N°: ", &prefix_style);
    c.text(right - number_width - prefix_width, ry, "N°: ", prefix_style.clone());
    c.text(right - number_width, ry, number, number_style);
    ry += prefix_style.line_height;

    let order_date = format_date_fr(data.text("orderDate"));
    c.text_right(right, ry, &format!("Date de Commande: {}", order_date), c.ts(0.875));
    ry += c.ts(0.875).line_height;
    c.text_right(
        right,
        ry,
        &format!("Fournisseur: {}", text_or(data, "supplierName", "Nom du Fournisseur")),
        c.ts(0.875).weight(FontWeight::SemiBold),
    );
    ry += c.ts(0.875).line_height;

    y = left_bottom.max(ry) + 16.0;
    c.hline(left, y, content_width, 4.0, primary);
    y += 4.0 + 24.0;

    // --- Desired delivery banner ---
    let banner_style = c.ts(0.875).weight(FontWeight::SemiBold);
    let banner_height = 12.0 + banner_style.line_height + 12.0;
    c.fill(Rect::new(left, y, content_width, banner_height), gray(50));
    let delivery = format_date_fr_or(data.text("deliveryDate"), "Non spécifiée");
    let label = "Date de Livraison Souhaitée: ";
    let label_width = c.text(left + 12.0, y + 12.0, label, banner_style.clone());
    c.text(left + 12.0 + label_width, y + 12.0, &delivery, banner_style.clone().color(primary));
    y += banner_height + 16.0;

    // --- Items table ---
    let heading_style = c.ts(1.125).bold().color(primary);
    c.text(left, y, "Articles Commandés", heading_style.clone());
    y += heading_style.line_height + 12.0;

    let raw_items = text_or(data, "itemsOrdered", ITEMS_PLACEHOLDER);
    let items: Vec<_> = non_empty_lines(raw_items)
        .into_iter()
        .map(parse_order_item)
        .collect();
    let sum: f64 = items.iter().map(|i| i.price).sum();

    let col_desc = left + 8.0;
    let col_desc_width = content_width * 0.6 - 16.0;
    let col_qty_right = left + content_width * 0.8 - 8.0;
    let col_amount_right = right - 8.0;

    let table_top = y;
    let head_style = c.ts(0.875).bold().color(Color::WHITE);
    let head_height = 8.0 + head_style.line_height + 8.0;
    c.fill(Rect::new(left, y, content_width, head_height), secondary);
    c.text(col_desc, y + 8.0, "Article/Description", head_style.clone());
    c.text_right(col_qty_right, y + 8.0, "Quantité", head_style.clone());
    c.text_right(col_amount_right, y + 8.0, "Montant HT", head_style.clone());
    y += head_height;

    let cell_style = c.ts(0.875);
    if items.is_empty() {
        let row_height = 8.0 + cell_style.line_height + 8.0;
        c.text(col_desc, y + 8.0, "Aucun article commandé", cell_style.clone().color(gray(400)));
        c.text_right(col_qty_right, y + 8.0, "-", cell_style.clone());
        c.text_right(col_amount_right, y + 8.0, &format_eur(0.0), cell_style.clone());
        y += row_height;
        c.hline(left, y - 1.0, content_width, 1.0, gray(200));
    } else {
        for (i, item) in items.iter().enumerate() {
            let desc_lines = c
                .measurer()
                .wrap(&item.description, &cell_style, col_desc_width)
                .len() as f32;
            let row_height = 8.0 + desc_lines.max(1.0) * cell_style.line_height + 8.0;
            if i % 2 == 1 {
                c.fill(
                    Rect::new(left, y, content_width, row_height),
                    theme.accent_color.with_alpha(0.06),
                );
            }
            c.wrapped(col_desc, y + 8.0, col_desc_width, &item.description, cell_style.clone());
            c.text_right(col_qty_right, y + 8.0, "1", cell_style.clone());
            c.text_right(col_amount_right, y + 8.0, &format_eur(item.price), cell_style.clone());
            y += row_height;
            c.hline(left, y - 1.0, content_width, 1.0, gray(200));
        }
    }
    c.stroke(Rect::new(left, table_top, content_width, y - table_top), gray(300), 1.0);
    y += 32.0;

    // --- Totals, right half ---
    let totals_x = left + content_width / 2.0;
    let totals_width = content_width / 2.0;
    let row_label = c.ts(0.875);
    let row_value = c.ts(0.875).weight(FontWeight::SemiBold);
    c.text(totals_x, y, "Total des Articles HT:", row_label.clone());
    c.text_right(right, y, &format_eur(sum), row_value.clone());
    y += row_label.line_height + 4.0;
    c.text(totals_x, y, "Frais de port (Est.):", row_label.clone());
    c.text_right(right, y, &format_eur(0.0), row_value.clone());
    y += row_label.line_height + 2.0;
    c.hline(totals_x, y, totals_width, 1.0, gray(300));
    y += 10.0;

    let band_style = c.ts(1.125).bold().color(Color::WHITE);
    let band_height = 8.0 + band_style.line_height + 8.0;
    c.fill(Rect::new(totals_x, y, totals_width, band_height), primary);
    c.text(totals_x + 8.0, y + 8.0, "MONTANT TOTAL À FACTURER HT:", band_style.clone());
    c.text_right(right - 8.0, y + 8.0, &format_eur(sum), band_style);

    // --- Footer: signature boxes and terms note ---
    let sign_style = c.ts(0.75).bold().color(gray(500));
    let note_style = c.ts(0.75).italic().color(gray(500));
    let footer_height = 16.0 + sign_style.line_height + 32.0 + 1.0 + 24.0 + note_style.line_height;
    let mut fy = PAGE_HEIGHT - MARGIN - footer_height;
    c.hline(left, fy, content_width, 2.0, primary);
    fy += 16.0;

    let box_width = 128.0;
    let left_center = left + 32.0 + box_width / 2.0 + 32.0;
    let right_center = right - 32.0 - box_width / 2.0 - 32.0;
    c.text_center(left_center, fy, "Date et Signature du Fournisseur", sign_style.clone());
    c.text_center(right_center, fy, "Cachet du Commanditaire", sign_style.clone());
    fy += sign_style.line_height + 32.0;
    c.hline(left_center - box_width / 2.0, fy, box_width, 1.0, gray(300));
    c.hline(right_center - box_width / 2.0, fy, box_width, 1.0, gray(300));
    fy += 1.0 + 24.0;
    c.text_center(
        left + content_width / 2.0,
        fy,
        "Ce bon de commande est sujet à nos conditions générales de vente.",
        note_style,
    );

    c.into_scene()
}
