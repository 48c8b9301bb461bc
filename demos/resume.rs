use papier::{DocumentKind, DocumentSession, ExportOutcome, PipelineError};
use std::env;

fn main() -> Result<(), PipelineError> {
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "papier=info");
        }
    }
    env_logger::init();

    println!("Running CV/Resume Example...");

    let mut session = DocumentSession::builder(DocumentKind::Resume).build();
    session.update_field("fullName", "Camille Roy");
    session.update_field("title", "Ingénieur Systèmes Senior");
    session.update_field("email", "camille.roy@exemple.fr");
    session.update_field("phone", "06 12 34 56 78");
    session.update_field(
        "summary",
        "Dix ans d'expérience en **infrastructure** et outillage interne. \
Goût prononcé pour les systèmes simples qui tombent rarement en panne.",
    );
    session.update_field(
        "experience",
        "- **2020-2026** Ingénieur Systèmes, Exemple SA\n\
- **2016-2020** Administrateur Réseaux, Demo SARL",
    );
    session.update_field("education", "- **2016** Diplôme d'ingénieur, INSA Lyon");
    session.update_field("skills", "Rust\nLinux\nRéseaux\nObservabilité");
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
