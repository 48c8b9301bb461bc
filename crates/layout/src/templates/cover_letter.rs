//! Cover letter template ("Lettre de Motivation").

use super::{Canvas, TextStyleExt, text_or};
use crate::compute::format_date_fr;
use crate::fonts::FontLibrary;
use papier_scene::{PAGE_HEIGHT, PAGE_WIDTH, Scene};
use papier_schema::DocumentData;
use papier_style::{FontWeight, StyleConfig, TextAlign};

const MARGIN: f32 = 48.0;

const BODY_PLACEHOLDER: &str = "Rédigez ici le corps de votre lettre de motivation, en \
structurant vos idées en paragraphes pour une lecture facile. Mettez en avant vos \
compétences et votre intérêt pour l'entreprise.";

const CLOSING_PLACEHOLDER: &str =
    "Je vous prie d'agréer, Madame, Monsieur, l'expression de mes salutations distinguées.";

pub fn render(data: &DocumentData, theme: &StyleConfig, fonts: &FontLibrary) -> Scene {
    let mut c = Canvas::new(theme, fonts);
    let left = MARGIN;
    let right = PAGE_WIDTH - MARGIN;
    let content_width = right - left;
    let primary = theme.primary_color;

    let sender = text_or(data, "senderName", "Votre Prénom Nom");
    let body_style = c.ts(0.875).line_height(c.base_px() * 1.5);

    // --- Sender block left, recipient block right ---
    let mut y = MARGIN;
    let line = c.ts(0.875);
    c.text(left, y, sender, c.ts(0.875).bold());
    c.text_right(
        right,
        y,
        text_or(data, "recipientName", "Nom du Recruteur"),
        c.ts(0.875).weight(FontWeight::SemiBold).color(primary),
    );
    y += line.line_height + 4.0;
    c.text(left, y, "Adresse de l'expéditeur", line.clone());
    c.text_right(right, y, text_or(data, "recipientTitle", "Titre/Poste"), line.clone());
    y += line.line_height + 4.0;
    c.text(left, y, "Email / Téléphone", line.clone());
    c.text_right(right, y, "Adresse de l'Entreprise", line.clone());
    y += line.line_height + 48.0;

    // --- Place, date, subject, greeting ---
    let city = text_or(data, "senderCity", "Ville");
    let date = format_date_fr(data.text("date"));
    c.text_right(right, y, &format!("{}, le {}", city, date), line.clone());
    y += line.line_height + 32.0;

    let job = text_or(data, "jobTitle", "Intitulé du Poste");
    y += c.wrapped(
        left,
        y,
        content_width,
        &format!("Objet: Candidature au poste de {}", job),
        c.ts(0.875).bold().color(primary),
    );
    y += 16.0;
    c.text(left, y, "Madame, Monsieur,", line.clone());
    y += line.line_height + 24.0;

    // --- Body, paragraph breaks preserved ---
    let body = text_or(data, "bodyContent", BODY_PLACEHOLDER);
    y += c.wrapped(left, y, content_width, body, body_style.clone().align(TextAlign::Justify));
    y += 32.0;

    // --- Closing formula and signature space ---
    let closing = text_or(data, "closingFormula", CLOSING_PLACEHOLDER);
    c.wrapped(left, y, content_width, closing, body_style.clone());

    // Signature block bottom-right; the blank area below the name is where
    // a handwritten signature goes.
    let sig_style = c.ts(0.875).bold();
    let sig_width = c.measurer().measure(sender, &sig_style).max(150.0);
    let fy = PAGE_HEIGHT - MARGIN - 96.0;
    c.text_center(right - sig_width / 2.0, fy, sender, sig_style);

    c.into_scene()
}
