//! Quote template ("Devis Commercial").
//!
//! Unlike the invoice, the line-item column is explicitly labeled "Total
//! HT" and therefore shows the tax-exclusive share of each row; the footer
//! stack reconciles the same split back to the tax-inclusive total.

use super::{Canvas, TextStyleExt, gray, text_or};
use crate::compute::{
    TAX_RATE, format_date_fr, format_eur, non_empty_lines, per_line_amount, split_tax_inclusive,
};
use crate::fonts::FontLibrary;
use papier_scene::{ImageFit, PAGE_HEIGHT, PAGE_WIDTH, Scene};
use papier_schema::DocumentData;
use papier_style::{FontWeight, StyleConfig};
use papier_types::{Color, Rect};

const MARGIN: f32 = 32.0;

pub fn render(data: &DocumentData, theme: &StyleConfig, fonts: &FontLibrary) -> Scene {
    let mut c = Canvas::new(theme, fonts);
    let left = MARGIN;
    let right = PAGE_WIDTH - MARGIN;
    let content_width = right - left;
    let primary = theme.primary_color;
    let secondary = theme.secondary_color;
    let accent = theme.accent_color;

    let company_name = text_or(data, "companyName", "NOM DE L'ENTREPRISE");
    let company_address = text_or(data, "companyAddress", "Adresse complète de l'entreprise");
    let company_siret = text_or(data, "companySiret", "000 000 000 00000");
    let total = data.number("totalTTC").unwrap_or(0.0);
    let split = split_tax_inclusive(total);

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
    let title_style = c.ts(2.25).weight(FontWeight::ExtraBold).color(primary);
    c.text_right(right, ry, "DEVIS", title_style.clone());
    ry += title_style.line_height + 4.0;

    let number = text_or(data, "devisNumber", "DEV-XXXX");
    let number_style = c.ts(0.875).bold().color(primary);
    let prefix_style = c.ts(0.875).bold();
    let number_width = c.measurer().measure(number, &number_style);
    let prefix_width = c.measurer().measure("N°: ", &prefix_style);
    c.text(right - number_width - prefix_width, ry, "N°: ", prefix_style.clone());
    c.text(right - number_width, ry, number, number_style);
    ry += prefix_style.line_height;

    let date = format_date_fr(data.text("devisDate"));
    let date_style = c.ts(0.875);
    c.text_right(right, ry, &format!("Date: {}", date), date_style.clone());
    ry += date_style.line_height;

    y = left_bottom.max(ry) + 16.0;
    c.hline(left, y, content_width, 4.0, primary);
    y += 4.0 + 24.0;

    // --- Recipient panel, right half, on an accent wash ---
    let panel_x = left + content_width / 2.0;
    let panel_width = content_width / 2.0;
    let pad = 16.0;
    let label_style = c.ts(0.75).weight(FontWeight::SemiBold).color(primary);
    let name_style = c.ts(1.125).bold();
    let addr_style = c.ts(0.875).faded();

    let client_address = text_or(data, "clientAddress", "Adresse du client");
    let addr_lines = c
        .measurer()
        .wrap(client_address, &addr_style, panel_width - 2.0 * pad)
        .len() as f32;
    let panel_height = pad + label_style.line_height + 4.0 + name_style.line_height + 4.0
        + addr_lines * addr_style.line_height + pad;

    c.fill(Rect::new(panel_x, y, panel_width, panel_height), accent.with_alpha(0.125));
    c.vline(panel_x, y, panel_height, 4.0, primary);

    let mut py = y + pad;
    c.text(panel_x + pad, py, "DESTINATAIRE", label_style.clone());
    py += label_style.line_height + 4.0;
    c.text(panel_x + pad, py, text_or(data, "clientName", "Nom du Client"), name_style.clone());
    py += name_style.line_height + 4.0;
    c.wrapped(panel_x + pad, py, panel_width - 2.0 * pad, client_address, addr_style);

    y += panel_height + 32.0;

    // --- Services table ---
    let heading_style = c.ts(1.125).bold().color(primary);
    c.text(left, y, "DÉTAILS DES SERVICES", heading_style.clone());
    y += heading_style.line_height + 16.0;

    let description = text_or(data, "serviceDescription", "Description des services...");
    let lines = non_empty_lines(description);
    // Tax-exclusive share per row, consistent with the "Total HT" header.
    let each_ht = per_line_amount(total, lines.len()) / (1.0 + TAX_RATE);

    let col_desc = left + 16.0;
    let col_desc_width = content_width * 0.6 - 32.0;
    let col_tva_right = left + content_width * 0.8 - 16.0;
    let col_total_right = right - 16.0;

    let table_top = y;
    let head_style = c.ts(0.875).bold().color(Color::WHITE);
    let head_height = 8.0 + head_style.line_height + 8.0;
    c.fill(Rect::new(left, y, content_width, head_height), secondary);
    c.text(col_desc, y + 8.0, "Description", head_style.clone());
    c.text_right(col_tva_right, y + 8.0, "TVA", head_style.clone());
    c.text_right(col_total_right, y + 8.0, "Total HT", head_style.clone());
    y += head_height;

    let cell_style = c.ts(0.875);
    if lines.is_empty() {
        let empty_style = c.ts(0.875).italic().color(gray(400));
        c.text_center(
            left + content_width / 2.0,
            y + 32.0,
            "Aucune description saisie pour le moment",
            empty_style.clone(),
        );
        y += 32.0 + empty_style.line_height + 32.0;
    } else {
        for (i, line) in lines.iter().enumerate() {
            let desc_lines = c.measurer().wrap(line, &cell_style, col_desc_width).len() as f32;
            let row_height = 12.0 + desc_lines.max(1.0) * cell_style.line_height + 12.0;
            if i % 2 == 1 {
                c.fill(Rect::new(left, y, content_width, row_height), accent.with_alpha(0.06));
            }
            c.wrapped(col_desc, y + 12.0, col_desc_width, line, cell_style.clone());
            c.text_right(col_tva_right, y + 12.0, "20%", c.ts(0.875).faded());
            c.text_right(
                col_total_right,
                y + 12.0,
                &format_eur(each_ht),
                c.ts(0.875).weight(FontWeight::Medium),
            );
            y += row_height;
            c.hline(left, y - 1.0, content_width, 1.0, gray(100));
        }
    }
    c.stroke(Rect::new(left, table_top, content_width, y - table_top), gray(200), 1.0);
    y += 32.0;

    // --- Totals ---
    let totals_x = panel_x;
    let row_label = c.ts(0.875).faded();
    let row_value = c.ts(0.875).weight(FontWeight::SemiBold);
    c.text(totals_x, y, "Total Hors Taxes (HT)", row_label.clone());
    c.text_right(right, y, &format_eur(split.base), row_value.clone());
    y += row_label.line_height + 4.0;
    c.hline(totals_x, y, panel_width, 1.0, gray(100));
    y += 6.0;
    c.text(totals_x, y, "TVA (20%)", row_label.clone());
    c.text_right(right, y, &format_eur(split.tax), row_value.clone());
    y += row_label.line_height + 4.0;
    c.hline(totals_x, y, panel_width, 1.0, gray(100));
    y += 16.0;

    let band_label = c.ts(0.875).bold().color(Color::WHITE);
    let band_value = c.ts(1.25).weight(FontWeight::ExtraBold).color(Color::WHITE);
    let band_height = 12.0 + band_value.line_height + 12.0;
    c.fill(Rect::new(totals_x, y, panel_width, band_height), primary);
    c.text(totals_x + 16.0, y + 12.0 + (band_value.line_height - band_label.line_height) / 2.0,
        "NET À PAYER", band_label);
    c.text_right(right - 16.0, y + 12.0, &format_eur(total), band_value);

    // --- Footer ---
    let validity = data
        .number("validityDays")
        .map(|d| d.round() as i64)
        .unwrap_or(30);
    let foot_style = c.ts(0.75).faded();
    let footer_height = 24.0 + 2.0 * foot_style.line_height + 16.0 + foot_style.line_height;
    let mut fy = PAGE_HEIGHT - MARGIN - footer_height;
    c.hline(left, fy, content_width, 1.0, primary);
    fy += 24.0;
    let center = left + content_width / 2.0;
    c.text_center(
        center,
        fy,
        &format!("Devis valable {} jours à compter de la date d'émission.", validity),
        foot_style.clone(),
    );
    fy += foot_style.line_height;
    c.text_center(center, fy, "Bon pour accord (Date, Signature et Cachet) :", foot_style.clone());
    fy += foot_style.line_height + 16.0;
    c.text_center(
        center,
        fy,
        &format!("{} - {}", company_name, company_address),
        c.ts(0.75).weight(FontWeight::SemiBold).faded(),
    );

    c.into_scene()
}
