use papier::{DocumentKind, DocumentSession, ExportOutcome, PipelineError, StylePatch};
use std::env;

fn main() -> Result<(), PipelineError> {
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "papier=info");
        }
    }
    env_logger::init();

    println!("Running Invoice Example...");

    let mut session = DocumentSession::builder(DocumentKind::Invoice).build();
    session.update_field("clientName", "ACME SARL");
    session.update_field("invoiceNumber", "FAC-2026-042");
    session.update_field("invoiceDate", "2026-08-08");
    session.update_field("dueDate", "2026-09-07");
    session.update_field("paymentTerms", "30_days");
    session.update_field(
        "serviceDescription",
        "Développement du site vitrine\nIntégration du paiement en ligne\nFormation de l'équipe",
    );
    session.update_field("totalTTC", 3600.0);
    session.update_style(StylePatch {
        font_size: Some(10.0),
        ..StylePatch::default()
    });
    println!("✓ Session populated.");

    match session.export()? {
        ExportOutcome::Done(doc) => {
            let path = doc.save_to(".")?;
            println!("\nSuccess! Generated {}", path.display());
        }
        ExportOutcome::AlreadyInProgress => {
            println!("An export was already running; nothing produced.");
        }
    }
    Ok(())
}
