//! Invoice template ("Facture Simple").
//!
//! Per-line amounts are tax-inclusive, matching the footer total: a table
//! of N description lines shows `total / N` per row, the totals stack shows
//! the HT/TVA split of the same total.

use super::{Canvas, TextStyleExt, centered, gray, text_or};
use crate::compute::{
    format_date_fr, format_eur, non_empty_lines, per_line_amount, split_tax_inclusive,
};
use crate::fonts::FontLibrary;
use papier_scene::{ImageFit, PAGE_HEIGHT, PAGE_WIDTH, Scene};
use papier_schema::DocumentData;
use papier_style::{FontWeight, StyleConfig};
use papier_types::{Color, Rect};

const MARGIN: f32 = 48.0;

pub fn render(data: &DocumentData, theme: &StyleConfig, fonts: &FontLibrary) -> Scene {
    let mut c = Canvas::new(theme, fonts);
    let left = MARGIN;
    let right = PAGE_WIDTH - MARGIN;
    let content_width = right - left;
    let primary = theme.primary_color;
    let secondary = theme.secondary_color;

    let company_name = text_or(data, "companyName", "VOTRE ENTREPRISE");
    let company_address = text_or(data, "companyAddress", "Adresse complète...");
    let company_siret = text_or(data, "companySiret", "000 000 000 00000");
    let total = data.number("totalTTC").unwrap_or(0.0);
    let split = split_tax_inclusive(total);

    // --- Header: company block left, invoice identity right ---
    let mut y = MARGIN;
    if let Some(logo) = &theme.logo_url {
        c.image(Rect::new(left, y, 150.0, 96.0), logo, ImageFit::Contain, false);
        y += 96.0 + 16.0;
    }
    c.text(left, y, company_name, c.ts(1.125).bold());
    y += c.ts(1.125).line_height;
    y += c.wrapped(left, y, content_width * 0.45, company_address, c.ts(0.875).faded());
    y += 8.0;
    c.text(left, y, &format!("SIRET: {}", company_siret), c.ts(0.75).color(gray(500)));
    let left_bottom = y + c.ts(0.75).line_height;

    let mut ry = MARGIN;
    let title_style = c.ts(2.25).weight(FontWeight::ExtraBold).color(primary);
    c.text_right(right, ry, "FACTURE", title_style.clone());
    ry += title_style.line_height + 8.0;

    let number = text_or(data, "invoiceNumber", "FAC-2024-001");
    let number_style = c.ts(1.0).bold().color(primary);
    let prefix_style = c.ts(1.0).bold();
    let number_width = c.measurer().measure(number, &number_style);
    let prefix_width = c.measurer().measure("N° ", &prefix_style);
    c.text(right - number_width - prefix_width, ry, "N° ", prefix_style.clone());
    c.text(right - number_width, ry, number, number_style);
    ry += prefix_style.line_height + 8.0;

    let date_style = c.ts(0.875).faded();
    let issue = format_date_fr(data.text("invoiceDate"));
    let due = format_date_fr(data.text("dueDate"));
    c.text_right(right, ry, &format!("Date : {}", issue), date_style.clone());
    ry += date_style.line_height;
    c.text_right(right, ry, &format!("Échéance : {}", due), date_style.clone());
    ry += date_style.line_height;

    // Bottom rule of the header, in the theme's primary color.
    y = left_bottom.max(ry) + 24.0;
    c.hline(left, y, content_width, 4.0, primary);
    y += 4.0 + 32.0;

    // --- "Facturé à" panel, right half ---
    let panel_x = left + content_width / 2.0;
    let panel_width = content_width / 2.0;
    let pad = 24.0;
    let label_style = c.ts(0.75).bold().color(primary);
    let name_style = c.ts(1.25).bold();
    let addr_style = c.ts(0.875).faded();

    let client_address = text_or(data, "clientAddress", "Adresse du client...");
    let addr_lines = c
        .measurer()
        .wrap(client_address, &addr_style, panel_width - 2.0 * pad)
        .len() as f32;
    let panel_height =
        pad + label_style.line_height + 8.0 + name_style.line_height + 4.0
            + addr_lines * addr_style.line_height + pad;

    let panel = Rect::new(panel_x, y, panel_width, panel_height);
    c.fill(panel, gray(50));
    c.vline(panel_x, y, panel_height, 4.0, primary);

    let mut py = y + pad;
    c.text(panel_x + pad, py, "FACTURÉ À :", label_style.clone());
    py += label_style.line_height + 8.0;
    c.text(panel_x + pad, py, text_or(data, "clientName", "Nom du Client"), name_style.clone());
    py += name_style.line_height + 4.0;
    c.wrapped(panel_x + pad, py, panel_width - 2.0 * pad, client_address, addr_style);

    y += panel_height + 48.0;

    // --- Line-item table ---
    let description = text_or(data, "serviceDescription", "Description des produits/services...");
    let lines = non_empty_lines(description);
    let each = per_line_amount(total, lines.len());

    let col_desc = left + 16.0;
    let col_desc_width = content_width * 0.6 - 32.0;
    let col_tva_right = left + content_width * 0.8 - 16.0;
    let col_total_right = right - 16.0;

    let table_top = y;
    let head_style = c.ts(0.875).bold().color(Color::WHITE);
    let head_height = 12.0 + head_style.line_height + 12.0;
    c.fill(Rect::new(left, y, content_width, head_height), secondary);
    let head_y = y + 12.0;
    c.text(col_desc, head_y, "Désignation", head_style.clone());
    c.text_right(col_tva_right, head_y, "TVA", head_style.clone());
    c.text_right(col_total_right, head_y, "Total TTC", head_style.clone());
    y += head_height;

    let cell_style = c.ts(0.875);
    if lines.is_empty() {
        let empty_style = c.ts(0.875).italic().color(gray(400));
        let row_height = 32.0 + empty_style.line_height + 32.0;
        c.text_center(left + content_width / 2.0, y + 32.0, "Aucun article ajouté.", empty_style);
        y += row_height;
    } else {
        for (i, line) in lines.iter().enumerate() {
            let desc_lines = c.measurer().wrap(line, &cell_style, col_desc_width).len() as f32;
            let row_height = 12.0 + desc_lines.max(1.0) * cell_style.line_height + 12.0;
            if i % 2 == 1 {
                c.fill(
                    Rect::new(left, y, content_width, row_height),
                    Color::BLACK.with_alpha(0.02),
                );
            }
            c.wrapped(col_desc, y + 12.0, col_desc_width, line, cell_style.clone());
            c.text_right(col_tva_right, y + 12.0, "20%", c.ts(0.875).faded());
            c.text_right(
                col_total_right,
                y + 12.0,
                &format_eur(each),
                c.ts(0.875).weight(FontWeight::Medium),
            );
            y += row_height;
            c.hline(left, y - 1.0, content_width, 1.0, gray(100));
        }
    }
    c.stroke(Rect::new(left, table_top, content_width, y - table_top), gray(200), 1.0);
    y += 32.0;

    // --- Totals stack, right half ---
    let totals_x = panel_x;
    let row_style = c.ts(0.875).faded();
    c.text(totals_x, y, "Total HT", row_style.clone());
    c.text_right(right, y, &format_eur(split.base), row_style.clone());
    y += row_style.line_height + 12.0;
    c.text(totals_x, y, "TVA (20%)", row_style.clone());
    c.text_right(right, y, &format_eur(split.tax), row_style.clone());
    y += row_style.line_height + 8.0;
    c.hline(totals_x, y, panel_width, 1.0, gray(200));
    y += 12.0;

    let band_style = c.ts(1.25).bold().color(Color::WHITE);
    let band_height = 8.0 + band_style.line_height + 8.0;
    c.fill(Rect::new(totals_x, y, panel_width, band_height), primary);
    c.text(totals_x + 16.0, y + 8.0, "Net à payer", band_style.clone());
    c.text_right(right - 16.0, y + 8.0, &format_eur(total), band_style);

    // --- Footer, pinned to the bottom edge ---
    let terms_label = match data.text("paymentTerms") {
        "immediate" => "Paiement Immédiat",
        "30_days" => "30 jours",
        _ => "Non spécifié",
    };
    let foot_style = c.ts(0.75).faded();
    let foot_line_height = foot_style.line_height;
    let footer_height = 24.0 + 3.0 * foot_line_height + 12.0;
    let mut fy = PAGE_HEIGHT - MARGIN - footer_height;
    c.hline(left, fy, content_width, 1.0, gray(200));
    fy += 24.0;
    let center = left + content_width / 2.0;
    c.text_center(
        center,
        fy,
        &format!("Conditions : {}", terms_label),
        c.ts(0.75).weight(FontWeight::SemiBold).faded(),
    );
    fy += foot_line_height + 4.0;
    c.wrapped(
        left,
        fy,
        content_width,
        "En cas de retard de paiement, une indemnité forfaitaire pour frais de recouvrement de 40€ sera due.",
        centered(foot_style.clone()),
    );
    fy += foot_line_height + 8.0;
    c.text_center(
        center,
        fy,
        &format!("{} • {} • SIRET {}", company_name, company_address, company_siret),
        foot_style,
    );

    c.into_scene()
}
